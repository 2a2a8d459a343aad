// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, info, warn};
use std::io::Write;
use std::path::{Path, PathBuf};

use noveltrans::app_config::{self, Config, TranslationService};
use noveltrans::file_utils::FileManager;
use noveltrans::pipeline::{
    Chapter, ChapterSource, Pipeline, PublishSink, TranslatedChapter, TranslatedNovelInfo,
};

/// CLI wrapper for TranslationService to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliTranslationService {
    OpenRouter,
    Google,
}

impl From<CliTranslationService> for TranslationService {
    fn from(cli_service: CliTranslationService) -> Self {
        match cli_service {
            CliTranslationService::OpenRouter => TranslationService::OpenRouter,
            CliTranslationService::Google => TranslationService::Google,
        }
    }
}

/// CLI wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Translate a directory of novel chapters (default command)
    #[command(alias = "translate")]
    Translate(TranslateArgs),

    /// Generate shell completions for noveltrans
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct TranslateArgs {
    /// Directory of chapter .txt files to translate
    #[arg(value_name = "INPUT_DIR")]
    input_dir: PathBuf,

    /// Force overwrite of existing translated chapters
    #[arg(short, long)]
    force_overwrite: bool,

    /// Translation service to use
    #[arg(long, value_enum)]
    service: Option<CliTranslationService>,

    /// Model name for chat-completion translation
    #[arg(short, long)]
    model: Option<String>,

    /// Source language code (e.g. 'zh-CN')
    #[arg(short, long)]
    source_language: Option<String>,

    /// Target language code (e.g. 'en')
    #[arg(short, long)]
    target_language: Option<String>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// noveltrans - AI-powered web-novel translation
///
/// Translates a directory of serialized novel chapters while keeping names
/// and invented terms consistent through a persistent per-novel glossary.
#[derive(Parser, Debug)]
#[command(name = "noveltrans")]
#[command(version = "1.0.0")]
#[command(about = "AI-powered web-novel translation tool")]
#[command(long_about = "noveltrans translates a directory of chapter files while maintaining a \
per-novel glossary so character names and invented terms stay consistent across chapters.

EXAMPLES:
    noveltrans ./novel/                         # Translate using default config
    noveltrans -f ./novel/                      # Force overwrite existing output
    noveltrans -m qwen/qwen-2.5-72b ./novel/    # Use a specific model
    noveltrans -s zh-CN -t en ./novel/          # Translate Chinese to English
    noveltrans --service google ./novel/        # Use the free backend
    noveltrans completions bash                 # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default
    one will be created automatically. The OpenRouter API key can also be
    supplied via the OPENROUTER_API_KEY environment variable.

SUPPORTED SERVICES:
    openrouter - LLM chat completions, glossary-aware (requires API key)
    google     - free machine translation, no glossary conditioning")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Directory of chapter .txt files to translate
    #[arg(value_name = "INPUT_DIR")]
    input_dir: Option<PathBuf>,

    /// Force overwrite of existing translated chapters
    #[arg(short, long)]
    force_overwrite: bool,

    /// Translation service to use
    #[arg(long, value_enum)]
    service: Option<CliTranslationService>,

    /// Model name for chat-completion translation
    #[arg(short, long)]
    model: Option<String>,

    /// Source language code (e.g. 'zh-CN')
    #[arg(short, long)]
    source_language: Option<String>,

    /// Target language code (e.g. 'en')
    #[arg(short, long)]
    target_language: Option<String>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// Custom logger with timestamps, colors, and level emoji
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    fn get_emoji_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "❌ ",
            Level::Warn => "🚧 ",
            Level::Info => " ",
            Level::Debug => "🔍 ",
            Level::Trace => "📋 ",
        }
    }

    fn get_color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let emoji = Self::get_emoji_for_level(record.level());
            let color = Self::get_color_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "{}{} {} {}\x1B[0m",
                color,
                now,
                emoji,
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

/// Chapter source backed by a directory of .txt files, sorted by name.
///
/// The first line of each file is treated as the chapter title; the rest is
/// the body.
struct DirectoryChapterSource {
    files: Vec<PathBuf>,
    next: usize,
}

impl DirectoryChapterSource {
    fn new(files: Vec<PathBuf>) -> Self {
        Self { files, next: 0 }
    }
}

#[async_trait]
impl ChapterSource for DirectoryChapterSource {
    fn chapter_count(&self) -> usize {
        self.files.len()
    }

    async fn next_chapter(&mut self) -> Result<Option<Chapter>> {
        let Some(path) = self.files.get(self.next) else {
            return Ok(None);
        };
        self.next += 1;

        let raw = FileManager::read_to_string(path)?;
        let (title, content) = split_title(&raw, path);
        Ok(Some(Chapter { title, content }))
    }
}

/// Publish sink that writes each translated chapter to its precomputed
/// output path, title on the first line
struct DirectoryPublishSink {
    output_paths: Vec<PathBuf>,
    next: usize,
}

impl DirectoryPublishSink {
    fn new(output_paths: Vec<PathBuf>) -> Self {
        Self {
            output_paths,
            next: 0,
        }
    }
}

#[async_trait]
impl PublishSink for DirectoryPublishSink {
    async fn publish_chapter(&mut self, chapter: &TranslatedChapter) -> Result<()> {
        let path = self
            .output_paths
            .get(self.next)
            .ok_or_else(|| anyhow!("More chapters published than source files"))?;
        self.next += 1;

        let output = format!("{}\n\n{}", chapter.title, chapter.content);
        FileManager::write_to_file(path, &output)
    }

    async fn publish_novel_info(&mut self, _info: &TranslatedNovelInfo) -> Result<()> {
        Ok(())
    }
}

/// Split a chapter file into title (first non-empty line) and body
fn split_title(raw: &str, path: &Path) -> (String, String) {
    let trimmed = raw.trim_start();
    match trimmed.split_once('\n') {
        Some((first, rest)) if !first.trim().is_empty() => {
            (first.trim().to_string(), rest.trim().to_string())
        }
        _ => {
            let stem = path.file_stem().unwrap_or_default().to_string_lossy();
            (stem.to_string(), trimmed.trim().to_string())
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Start at info; the level is adjusted after config load if needed
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "noveltrans", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Translate(args)) => run_translate(args).await,
        None => {
            // Default behavior: top-level args double as the translate command
            let input_dir = cli
                .input_dir
                .ok_or_else(|| anyhow!("INPUT_DIR is required when no subcommand is specified"))?;

            let translate_args = TranslateArgs {
                input_dir,
                force_overwrite: cli.force_overwrite,
                service: cli.service,
                model: cli.model,
                source_language: cli.source_language,
                target_language: cli.target_language,
                config_path: cli.config_path,
                log_level: cli.log_level,
            };
            run_translate(translate_args).await
        }
    }
}

async fn run_translate(options: TranslateArgs) -> Result<()> {
    if let Some(cmd_log_level) = &options.log_level {
        log::set_max_level(to_level_filter(&cmd_log_level.clone().into()));
    }

    let config = load_config(&options)?;
    config
        .validate()
        .context("Configuration validation failed")?;

    if options.log_level.is_none() {
        log::set_max_level(to_level_filter(&config.log_level));
    }

    if !FileManager::dir_exists(&options.input_dir) {
        return Err(anyhow!(
            "Input path is not a directory: {:?}",
            options.input_dir
        ));
    }

    // Collect chapter files, skipping already-translated output unless forced
    let all_files = FileManager::find_chapter_files(&options.input_dir, "txt")?;
    let translated_suffix = format!(".{}.txt", config.target_language);
    let mut input_files = Vec::new();
    let mut output_paths = Vec::new();

    for file in all_files {
        let name = file.file_name().unwrap_or_default().to_string_lossy().to_string();
        if name.ends_with(&translated_suffix) {
            continue;
        }

        let output = FileManager::translated_chapter_path(
            file.as_path(),
            options.input_dir.as_path(),
            &config.target_language,
        );
        if FileManager::file_exists(&output) && !options.force_overwrite {
            info!("Skipping already translated chapter: {} (use -f to overwrite)", name);
            continue;
        }

        input_files.push(file);
        output_paths.push(output);
    }

    if input_files.is_empty() {
        warn!("No chapters to translate in {:?}", options.input_dir);
        return Ok(());
    }

    info!(
        "Translating {} chapter(s) from {} to {} via {}",
        input_files.len(),
        config.source_language,
        config.target_language,
        config.translation.service.display_name()
    );

    let glossary_path = options.input_dir.join("glossary.json");
    let mut pipeline = Pipeline::from_config(&config, &glossary_path)?;

    let mut source = DirectoryChapterSource::new(input_files);
    let mut sink = DirectoryPublishSink::new(output_paths);
    let published = pipeline.run(&mut source, &mut sink).await?;

    info!(
        "Done: {} chapter(s) translated, glossary holds {} terms",
        published,
        pipeline.glossary().len()
    );
    Ok(())
}

/// Load the config file, creating a default one when absent, and apply
/// CLI overrides on top
fn load_config(options: &TranslateArgs) -> Result<Config> {
    let config_path = &options.config_path;

    let mut config = if FileManager::file_exists(config_path) {
        Config::load(config_path)?
    } else {
        warn!(
            "Config file not found at '{}', creating default config.",
            config_path
        );

        let mut config = Config::default();
        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;
        std::fs::write(config_path, config_json)
            .context(format!("Failed to write default config to file: {}", config_path))?;

        config.apply_env_overrides();
        config
    };

    if let Some(service) = &options.service {
        config.translation.service = service.clone().into();
    }
    if let Some(model) = &options.model {
        config.translation.model = model.clone();
    }
    if let Some(source_lang) = &options.source_language {
        config.source_language = source_lang.clone();
    }
    if let Some(target_lang) = &options.target_language {
        config.target_language = target_lang.clone();
    }
    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    }

    Ok(config)
}

fn to_level_filter(level: &app_config::LogLevel) -> LevelFilter {
    match level {
        app_config::LogLevel::Error => LevelFilter::Error,
        app_config::LogLevel::Warn => LevelFilter::Warn,
        app_config::LogLevel::Info => LevelFilter::Info,
        app_config::LogLevel::Debug => LevelFilter::Debug,
        app_config::LogLevel::Trace => LevelFilter::Trace,
    }
}
