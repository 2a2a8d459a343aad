use anyhow::{Result, anyhow};
use isolang::Language;

/// Language utilities for ISO language code handling
///
/// This module provides functions for validating and normalizing language
/// codes as they appear in scraped novel metadata and translation backends.
/// Codes may carry a region subtag (e.g. "zh-CN", "zh-TW"); validation only
/// looks at the primary subtag.
/// Return the primary subtag of a language code ("zh-CN" -> "zh").
pub fn primary_subtag(code: &str) -> &str {
    code.split(['-', '_']).next().unwrap_or(code).trim()
}

/// Validate that a language code has a recognizable ISO 639 primary subtag
pub fn validate_language_code(code: &str) -> Result<()> {
    let primary = primary_subtag(code).to_lowercase();

    let known = match primary.len() {
        2 => Language::from_639_1(&primary).is_some(),
        3 => Language::from_639_3(&primary).is_some(),
        _ => false,
    };

    if known {
        Ok(())
    } else {
        Err(anyhow!("Invalid language code: {}", code))
    }
}

/// Get the English name for a language code ("zh-CN" -> "Chinese")
pub fn get_language_name(code: &str) -> Result<String> {
    let primary = primary_subtag(code).to_lowercase();

    let language = match primary.len() {
        2 => Language::from_639_1(&primary),
        3 => Language::from_639_3(&primary),
        _ => None,
    };

    language
        .map(|l| l.to_name().to_string())
        .ok_or_else(|| anyhow!("Unknown language code: {}", code))
}

/// Rewrite a source code to the form the free machine-translation backend
/// expects. The backend only understands the lowercase "zh-cn" variant for
/// Chinese (Simplified); every other code passes through unchanged.
pub fn to_free_backend_code(code: &str) -> String {
    if code.eq_ignore_ascii_case("zh-cn") {
        "zh-cn".to_string()
    } else {
        code.to_string()
    }
}
