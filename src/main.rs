//! Command line front end: writes one guest's invitation to disk.
//!
//! ```bash
//! # Configuration from EVENT_TITLE, PUBLIC_DOMAIN, INVITE_FILE_QR_* ...
//! rsvpress --guest g42
//!
//! # Configuration from a file, only for guests on the roster
//! rsvpress --guest g42 --config press.json --roster guests.json --out g42.pdf
//! ```

use clap::Parser;
use rsvpress::{InMemoryRoster, InvitationPipeline, PipelineError, PressConfig};
use std::fs;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "rsvpress")]
#[command(about = "Personalise an invitation PDF with a guest's RSVP code")]
struct Cli {
    /// Guest identifier to encode in the RSVP link
    #[arg(long)]
    guest: String,

    /// Output path (defaults to "<event title>.pdf" in the current directory)
    #[arg(long)]
    out: Option<PathBuf>,

    /// JSON configuration file; without it the environment is used
    #[arg(long)]
    config: Option<PathBuf>,

    /// JSON roster; when given, unknown guests are refused
    #[arg(long)]
    roster: Option<PathBuf>,

    /// Leave the document's links as they are
    #[arg(long)]
    no_link_rewrite: bool,
}

fn main() -> Result<(), PipelineError> {
    env_logger::init();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => PressConfig::from_json_file(path)?,
        None => PressConfig::from_env()?,
    };
    if cli.no_link_rewrite {
        config.rewrite_links = false;
    }

    let pipeline = InvitationPipeline::from_config(config)?;
    let invite = match &cli.roster {
        Some(path) => {
            let roster = InMemoryRoster::from_json(&fs::read_to_string(path)?)?;
            pipeline.prepare_for_guest(&roster, &cli.guest)?
        }
        None => pipeline.prepare_document(&cli.guest)?,
    };

    let out = cli.out.unwrap_or_else(|| PathBuf::from(&invite.file_name));
    fs::write(&out, &invite.bytes)?;
    log::info!("Wrote {} for {}", out.display(), invite.url);
    println!("{}", out.display());
    Ok(())
}
