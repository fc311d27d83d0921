//! Command-line interface parsing and startup.
//!
//! Startup failures are reported to stderr before any terminal setup:
//! missing configuration exits with code 2, client initialization failure
//! with code 1. Once the chat loop is running, errors stay inside the
//! session.

use std::error::Error;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::api::GeminiClient;
use crate::core::config::Config;
use crate::ui::chat_loop::run_chat;

#[derive(Parser)]
#[command(name = "gemcha")]
#[command(about = "A terminal-based chat interface for Google Gemini")]
#[command(
    long_about = "Gemcha is a full-screen terminal chat interface for Google Gemini. \
It keeps the conversation for the lifetime of the session and can export it \
as a plain-text file.\n\n\
Environment Variables:\n\
  GEMINI_API_KEY    Your Gemini API key (required; a .env file in the\n\
                    current directory is also read)\n\
  GEMINI_BASE_URL   Custom API base URL (optional)\n\n\
Controls:\n\
  Type              Enter your message in the input field\n\
  Enter             Send the message\n\
  Up/Down/Mouse     Scroll through chat history\n\
  Ctrl+C            Quit the application\n\
  Backspace         Delete characters in the input field\n\n\
Commands:\n\
  /help             Show commands and keys\n\
  /clear            Clear the chat history\n\
  /save [filename]  Save the chat log as a text file"
)]
pub struct Args {
    /// Gemini model to use for chat
    #[arg(short, long, default_value = "gemini-2.5-flash")]
    pub model: String,
}

pub fn main() -> Result<(), Box<dyn Error>> {
    tokio::runtime::Runtime::new()?.block_on(async_main())
}

async fn async_main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    // A missing .env file is fine; the environment alone may be enough
    let _ = dotenvy::dotenv();

    // Inert unless RUST_LOG is set; writes to stderr, so redirect it to a
    // file when debugging a full-screen session
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(2);
        }
    };

    let client = match GeminiClient::new(config.api_key, args.model, config.base_url) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Failed to initialize the Gemini client: {e}");
            std::process::exit(1);
        }
    };

    run_chat(client).await
}
