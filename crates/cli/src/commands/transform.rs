//! `redpen transform` — Run one transform against a document file.
//!
//! The file stands in for the live document: `--select` marks a substring as
//! the selection, `--replace` writes the answer back over it, `--insert`
//! appends the answer after it. Requires a running relay (`redpen relay`).

use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;

use redpen_config::AppConfig;
use redpen_core::{Mode, Role};
use redpen_document::BufferDocument;
use redpen_prompts::detect_mode;
use redpen_session::{ChatSession, RelayClient, SendOptions, load_settings};

#[derive(Args)]
pub struct TransformArgs {
    /// The document file to read
    pub file: PathBuf,

    /// Transform mode. Omit to auto-detect from the prompt (falls back to
    /// chat).
    #[arg(short, long)]
    pub mode: Option<Mode>,

    /// Free-text instruction for the model
    #[arg(short = 'p', long, default_value = "")]
    pub prompt: String,

    /// Mark the first occurrence of this substring as the selection
    #[arg(short, long)]
    pub select: Option<String>,

    /// Replace the selection with the answer and write the file back
    #[arg(long)]
    pub replace: bool,

    /// Insert the answer after the selection and write the file back
    #[arg(long, conflicts_with = "replace")]
    pub insert: bool,

    /// Relay base URL. Defaults to the configured relay address.
    #[arg(long)]
    pub relay_url: Option<String>,

    /// Use the plain (non-legal) prompt variants for this run
    #[arg(long)]
    pub plain: bool,
}

pub async fn run(args: TransformArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;
    let mut settings = load_settings();
    if args.plain {
        settings.legal_style = false;
    }

    let mode = match args.mode {
        Some(mode) => mode,
        None => {
            let detected = detect_mode(&args.prompt);
            if let Some(mode) = detected {
                println!("  Detected mode: {} ({})", mode, mode.label());
            }
            detected.unwrap_or(Mode::Chat)
        }
    };

    let text = std::fs::read_to_string(&args.file)?;
    let doc = Arc::new(BufferDocument::new(text));

    if let Some(needle) = &args.select {
        if !doc.select_str(needle) {
            return Err(format!("Selection text not found in {}", args.file.display()).into());
        }
    }

    let relay_url = args
        .relay_url
        .unwrap_or_else(|| format!("http://{}:{}", config.relay.host, config.relay.port));

    let session = ChatSession::new(doc.clone(), RelayClient::new(relay_url), settings);

    session
        .send(
            mode,
            &args.prompt,
            SendOptions {
                use_selection: args.select.is_some(),
                replace_selection: args.replace,
                insert_at_cursor: args.insert,
            },
        )
        .await?;

    let messages = session.messages();
    let answer = messages
        .iter()
        .rev()
        .find(|m| m.role == Role::Assistant)
        .map(|m| m.content.as_str())
        .unwrap_or_default();

    println!("{answer}");

    if args.replace || args.insert {
        std::fs::write(&args.file, doc.text())?;
        println!("\n  ✅ Updated {}", args.file.display());
    }

    Ok(())
}
