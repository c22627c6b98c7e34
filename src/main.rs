// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, error, info};
use std::io::{BufRead, Read, Write};
use std::path::PathBuf;

use traductor::app_config::{self, Config, TranslationProvider};
use traductor::app_controller::{Controller, EMPTY_TEXT_WARNING, TranslationOutcome};

/// CLI Wrapper for TranslationProvider to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliTranslationProvider {
    Libretranslate,
    Ollama,
    Mock,
}

impl From<CliTranslationProvider> for TranslationProvider {
    fn from(cli_provider: CliTranslationProvider) -> Self {
        match cli_provider {
            CliTranslationProvider::Libretranslate => TranslationProvider::LibreTranslate,
            CliTranslationProvider::Ollama => TranslationProvider::Ollama,
            CliTranslationProvider::Mock => TranslationProvider::Mock,
        }
    }
}

/// CLI Wrapper for LogLevel to implement ValueEnum
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

/// Upload kinds accepted by `--kind`
#[derive(Debug, Clone, ValueEnum)]
enum CliInputKind {
    Txt,
    Xlsx,
    Pdf,
}

impl CliInputKind {
    fn as_str(&self) -> &'static str {
        match self {
            CliInputKind::Txt => "txt",
            CliInputKind::Xlsx => "xlsx",
            CliInputKind::Pdf => "pdf",
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Translate typed Spanish text (read from stdin when omitted)
    Text {
        /// Text to translate
        #[arg(value_name = "TEXT")]
        text: Option<String>,
    },

    /// Translate a .txt, .xlsx or .pdf file
    File {
        /// File to translate
        #[arg(value_name = "PATH")]
        path: PathBuf,

        /// Treat the file as this kind instead of guessing from its extension
        #[arg(short, long, value_enum)]
        kind: Option<CliInputKind>,
    },

    /// Translate text blocks and files one after another, loading the engine once
    Interactive,

    /// Generate shell completions for traductor
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// traductor - Spanish to English translator
///
/// Translates typed text, text files, spreadsheets and PDFs from Spanish to
/// English with a local open-source backend, and writes the result as
/// downloadable TXT, Word and Excel files.
#[derive(Parser, Debug)]
#[command(name = "traductor")]
#[command(version)]
#[command(about = "Spanish to English translator for text, spreadsheets and PDFs")]
#[command(long_about = "traductor translates Spanish text or files into English locally, no API key required.

EXAMPLES:
    traductor text \"Hola mundo\"                 # Translate typed text
    echo \"Buenos días\" | traductor text          # Translate text from stdin
    traductor file carta.pdf                     # Translate a PDF
    traductor file datos.xlsx -o salida/         # Translate a spreadsheet into salida/
    traductor -p ollama -m mistral file notas.txt
    traductor interactive                        # Several requests, one engine
    traductor completions bash > traductor.bash

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config. If the config file doesn't exist, a default one
    will be created automatically.

SUPPORTED PROVIDERS:
    libretranslate - Self-hosted LibreTranslate server (default: http://localhost:5000)
    ollama         - Local Ollama server (default: llama3.1)
    mock           - Offline identity backend for dry runs")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = "conf.json")]
    config: PathBuf,

    /// Directory receiving the translated files
    #[arg(short, long, global = true)]
    output_dir: Option<PathBuf>,

    /// Translation provider to use
    #[arg(short, long, global = true, value_enum)]
    provider: Option<CliTranslationProvider>,

    /// Model name (Ollama only)
    #[arg(short, long, global = true)]
    model: Option<String>,

    /// Backend URL
    #[arg(short, long, global = true)]
    endpoint: Option<String>,

    /// Set logging level
    #[arg(short, long, global = true, value_enum)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation, filtered by the global max level
struct CustomLogger;

impl CustomLogger {
    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        log::set_boxed_logger(Box::new(CustomLogger))?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI colour and tag for a level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("\x1B[1;31m", "ERROR"),
            Level::Warn => ("\x1B[1;33m", "WARN "),
            Level::Info => ("\x1B[1;32m", "INFO "),
            Level::Debug => ("\x1B[1;36m", "DEBUG"),
            Level::Trace => ("\x1B[1;35m", "TRACE"),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let (colour, tag) = Self::style_for_level(record.level());
            let _ = writeln!(std::io::stderr(), "{}{} {} {}\x1B[0m", colour, now, tag, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // The level is refined once the config is loaded
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(*shell, &mut cmd, "traductor", &mut std::io::stdout());
        return Ok(());
    }

    if let Some(level) = &cli.log_level {
        let level: app_config::LogLevel = level.clone().into();
        log::set_max_level(level.to_level_filter());
    }

    let config = load_config(&cli)?;
    log::set_max_level(config.log_level.to_level_filter());

    let controller = Controller::with_config(config).with_progress(true);

    match cli.command {
        Commands::Text { text } => {
            let text = match text {
                Some(text) => text,
                None => {
                    let mut buffer = String::new();
                    std::io::stdin()
                        .read_to_string(&mut buffer)
                        .context("Failed to read text from stdin")?;
                    buffer
                }
            };
            if let Some(outcome) = controller.submit_text(&text).await? {
                print_outcome(&outcome);
            }
        }
        Commands::File { path, kind } => {
            let outcome = controller
                .upload_file(&path, kind.as_ref().map(CliInputKind::as_str))
                .await?;
            print_outcome(&outcome);
        }
        Commands::Interactive => run_interactive(&controller).await?,
        Commands::Completions { .. } => {}
    }

    Ok(())
}

/// Load the config file and apply command-line overrides
fn load_config(cli: &CommandLineOptions) -> Result<Config> {
    let mut config = Config::load_or_create(&cli.config)?;

    if let Some(provider) = &cli.provider {
        config.translation.provider = provider.clone().into();
    }
    if let Some(model) = &cli.model {
        config.translation.active_provider_config_mut().model = model.clone();
    }
    if let Some(endpoint) = &cli.endpoint {
        config.translation.active_provider_config_mut().endpoint = endpoint.clone();
    }
    if let Some(output_dir) = &cli.output_dir {
        config.output.directory = output_dir.clone();
    }
    if let Some(log_level) = &cli.log_level {
        config.log_level = log_level.clone().into();
    }

    config.validate().context("Configuration validation failed")?;
    Ok(config)
}

/// One line of interactive input
#[derive(Debug, PartialEq)]
enum SessionCommand {
    /// `:quit`
    Quit,
    /// `:go`, submit the text typed so far
    Submit,
    /// `:file <path>`
    File(String),
    /// Anything else, blank lines included, is part of the text
    Text(String),
}

fn parse_session_line(line: &str) -> SessionCommand {
    let command = line.trim();
    if command == ":quit" {
        SessionCommand::Quit
    } else if command == ":go" {
        SessionCommand::Submit
    } else if let Some(path) = command.strip_prefix(":file") {
        SessionCommand::File(path.trim().to_string())
    } else {
        SessionCommand::Text(line.to_string())
    }
}

/// Read requests from stdin until end of input or `:quit`
///
/// Text lines, blank ones included, accumulate until `:go` submits them as
/// one request. `:file <path>` uploads a file. A failing request is reported
/// and the session goes on.
async fn run_interactive(controller: &Controller) -> Result<()> {
    println!("Type Spanish text and finish it with `:go`, `:file <path>` to upload, `:quit` to exit.");
    let stdin = std::io::stdin();
    let mut block: Vec<String> = Vec::new();

    for line in stdin.lock().lines() {
        let line = line.context("Failed to read from stdin")?;

        match parse_session_line(&line) {
            SessionCommand::Quit => break,
            SessionCommand::Submit => {
                submit_block(controller, &block.join("\n")).await;
                block.clear();
            }
            SessionCommand::File(path) if path.is_empty() => error!("Usage: :file <path>"),
            SessionCommand::File(path) => match controller.upload_file(path.as_ref(), None).await {
                Ok(outcome) => print_outcome(&outcome),
                Err(e) => error!("{}", e),
            },
            SessionCommand::Text(text) => block.push(text),
        }
    }

    if block.iter().any(|line| !line.trim().is_empty()) {
        submit_block(controller, &block.join("\n")).await;
    }
    info!("Bye");
    Ok(())
}

async fn submit_block(controller: &Controller, text: &str) {
    match controller.submit_text(text).await {
        Ok(Some(outcome)) => print_outcome(&outcome),
        Ok(None) => println!("{}", EMPTY_TEXT_WARNING),
        Err(e) => error!("{}", e),
    }
}

fn print_outcome(outcome: &TranslationOutcome) {
    let (original_heading, translated_heading) = outcome.headings();
    if let Some(heading) = original_heading {
        println!("{}\n{}\n", heading, outcome.original_preview);
    }
    println!("{}\n{}\n", translated_heading, outcome.translated_preview);
    for artifact in &outcome.artifacts {
        println!("{}: {}", outcome.download_label(artifact), artifact.path.display());
    }
}
