use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use musicbank::clipboard::{ClipboardBackend, TwoTierClipboard};
use musicbank::credentials::{
    self, clear_api_key, load_api_key, mask, resolve_api_key, save_api_key, FileCredentialStore,
};
use musicbank::llm::{GeminiClient, Generator};
use musicbank::lyrics::{CopyTarget, LyricSheet};
use musicbank::notify;
use musicbank::tui::{Runner, TuiApp};
use musicbank_config::Config;

/// Environment variable consulted for the API key by one-shot commands.
const API_KEY_ENV: &str = "MUSICBANK_API_KEY";

#[derive(Parser)]
#[command(name = "musicbank", version, about = "Song lyrics from a topic, via Gemini")]
struct Cli {
    /// Path to a YAML config file (default: <data dir>/config.yaml if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory for the saved key and the TUI log (default: ~/.musicbank)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Interactive terminal UI (the default)
    Tui,
    /// Generate lyrics for a topic and print them
    Generate {
        /// Topic words; joined with spaces
        #[arg(required = true, num_args = 1..)]
        topic: Vec<String>,
        /// API key for this call (else $MUSICBANK_API_KEY, else the saved key)
        #[arg(long)]
        api_key: Option<String>,
        /// Also copy a section to the clipboard
        #[arg(long, value_enum)]
        copy: Option<CopyTarget>,
        /// Print the parsed sections as JSON
        #[arg(long)]
        json: bool,
    },
    /// Manage the saved API key
    Key {
        #[command(subcommand)]
        action: KeyAction,
    },
}

#[derive(Subcommand)]
enum KeyAction {
    /// Save the API key
    Set { key: String },
    /// Show the saved key, masked
    Show,
    /// Delete the saved key
    Clear,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = Config::resolve(cli.config.as_deref(), cli.data_dir)?;
    let data_dir = config.data_dir();
    let store = Arc::new(FileCredentialStore::open(&data_dir));

    match cli.command.unwrap_or(Command::Tui) {
        Command::Tui => {
            init_file_logging(&data_dir)?;
            tracing::info!(model = %config.model, "starting TUI");

            let saved = load_api_key(&*store).unwrap_or_else(|e| {
                tracing::warn!("could not read saved key: {e}");
                None
            });
            let generator = Arc::new(Generator::new(Arc::new(GeminiClient::from_config(&config))));
            let clipboard: Arc<dyn ClipboardBackend> = Arc::new(TwoTierClipboard::detect());
            let app = TuiApp::new(saved, Duration::from_secs(config.notification_secs));

            Runner::new(generator, store, clipboard).run(app).await?;
        }
        Command::Generate {
            topic,
            api_key,
            copy,
            json,
        } => {
            init_stderr_logging();
            let topic = topic.join(" ");
            let env_key = std::env::var(API_KEY_ENV).ok();
            let credential = resolve_api_key(api_key.as_deref(), env_key.as_deref(), &*store)?
                .unwrap_or_default();

            let generator = Generator::new(Arc::new(GeminiClient::from_config(&config)));
            let sections = generator
                .generate(&topic, &credential)
                .await
                .map_err(|e| anyhow::anyhow!("{} ({e})", notify::failure_message(&e)))?;

            let sheet = LyricSheet::from_sections(&sections);
            if json {
                println!("{}", serde_json::to_string_pretty(&sections)?);
            } else {
                println!("{}", sheet.clipboard_text(CopyTarget::All));
            }

            if let Some(target) = copy {
                TwoTierClipboard::detect()
                    .write(&sheet.clipboard_text(target))
                    .context(notify::COPY_FAILED)?;
                eprintln!("{}", notify::COPIED);
            }
        }
        Command::Key { action } => {
            init_stderr_logging();
            match action {
                KeyAction::Set { key } => {
                    let result = save_api_key(&*store, &key);
                    let outcome = notify::key_save_outcome(&result);
                    result.context(outcome.message.clone())?;
                    println!("{}", outcome.message);
                }
                KeyAction::Show => match load_api_key(&*store)? {
                    Some(key) => println!("{}", mask(&key)),
                    None => println!("(no key saved in {})", store.path().display()),
                },
                KeyAction::Clear => {
                    clear_api_key(&*store)?;
                    println!("API key removed");
                }
            }
        }
    }

    Ok(())
}

fn env_filter(default: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

fn init_stderr_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter("warn"))
        .with_writer(std::io::stderr)
        .init();
}

/// The TUI owns the terminal, so logs go to `<data dir>/musicbank.log`.
fn init_file_logging(data_dir: &std::path::Path) -> anyhow::Result<()> {
    std::fs::create_dir_all(data_dir)
        .with_context(|| format!("creating data dir {}", data_dir.display()))?;
    let path = data_dir.join("musicbank.log");
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("opening log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter("musicbank=info"))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    tracing::debug!(store = %data_dir.join(credentials::CREDENTIALS_FILE).display(), "data dir ready");
    Ok(())
}
