/*!
 * Tests for error types and conversions
 */

use noveltrans::errors::{AppError, ProviderError, TranslationError};

#[test]
fn test_providerError_requestFailed_shouldDisplayCorrectly() {
    let error = ProviderError::RequestFailed("Connection timeout".to_string());
    let display = format!("{}", error);
    assert!(display.contains("API request failed"));
    assert!(display.contains("Connection timeout"));
}

#[test]
fn test_providerError_apiError_shouldDisplayStatusAndMessage() {
    let error = ProviderError::ApiError {
        status_code: 503,
        message: "Service unavailable".to_string(),
    };
    let display = format!("{}", error);
    assert!(display.contains("503"));
    assert!(display.contains("Service unavailable"));
}

#[test]
fn test_providerError_rateLimitExceeded_shouldDisplayCorrectly() {
    let error = ProviderError::RateLimitExceeded("Retry after 60s".to_string());
    let display = format!("{}", error);
    assert!(display.contains("Rate limit exceeded"));
    assert!(display.contains("Retry after 60s"));
}

#[test]
fn test_translationError_fromProviderError_shouldWrapCorrectly() {
    let provider_error = ProviderError::RequestFailed("Test error".to_string());
    let translation_error: TranslationError = provider_error.into();
    let display = format!("{}", translation_error);
    assert!(display.contains("Provider error"));
}

#[test]
fn test_translationError_noBackendConfigured_shouldDisplayCorrectly() {
    let display = format!("{}", TranslationError::NoBackendConfigured);
    assert!(display.contains("No translation backend configured"));
}

#[test]
fn test_appError_fromProviderError_shouldWrapCorrectly() {
    let provider_error = ProviderError::AuthenticationError("Invalid API key".to_string());
    let app_error: AppError = provider_error.into();
    let display = format!("{}", app_error);
    assert!(display.contains("Provider error"));
}

#[test]
fn test_appError_fromTranslationError_shouldWrapCorrectly() {
    let app_error: AppError = TranslationError::NoBackendConfigured.into();
    let display = format!("{}", app_error);
    assert!(display.contains("Translation error"));
}

#[test]
fn test_appError_fromIoError_shouldWrapAsFileError() {
    let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
    let app_error: AppError = io_error.into();
    let display = format!("{}", app_error);
    assert!(display.contains("File error"));
    assert!(display.contains("File not found"));
}

#[test]
fn test_appError_fromAnyhowError_shouldWrapAsUnknown() {
    let anyhow_error = anyhow::anyhow!("Something went wrong");
    let app_error: AppError = anyhow_error.into();
    let display = format!("{}", app_error);
    assert!(display.contains("Unknown error"));
    assert!(display.contains("Something went wrong"));
}

#[test]
fn test_appError_debug_shouldBeImplemented() {
    let error = AppError::File("test".to_string());
    let debug = format!("{:?}", error);
    assert!(debug.contains("File"));
}
