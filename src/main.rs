use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::{error, info};
use simplelog::{Config, LevelFilter, WriteLogger};

use pdfsnip::event_source::KeyboardEventSource;
use pdfsnip::panic_handler::initialize_panic_handler;
use pdfsnip::session::Session;
use pdfsnip::ui;

/// Display a PDF page by page, zoom into quadrants, and split single pages
/// into new files.
#[derive(Parser)]
#[command(name = "pdfsnip", version, about)]
struct Cli {
    /// PDF document to open; prompts interactively when omitted
    file: Option<PathBuf>,

    /// Log level written to pdfsnip.log
    #[arg(long, default_value = "info")]
    log_level: LevelFilter,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    WriteLogger::init(
        cli.log_level,
        Config::default(),
        File::create("pdfsnip.log")?,
    )?;
    initialize_panic_handler();

    let path = match cli.file {
        Some(path) => path,
        None => match prompt_for_path()? {
            Some(path) => path,
            None => {
                // Cancelled file prompt: exit cleanly, not an error.
                info!("no file chosen, exiting");
                return Ok(());
            }
        },
    };

    info!("opening {}", path.display());
    let mut session = Session::open(path).context("cannot open document")?;
    info!("document has {} pages", session.page_count());

    let mut events = KeyboardEventSource;
    let result = ui::run(&mut session, &mut events);

    if let Err(ref e) = result {
        error!("viewer error: {e:?}");
    }
    info!("shutting down");
    result
}

fn prompt_for_path() -> Result<Option<PathBuf>> {
    print!("PDF file to open (empty to cancel): ");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().read_line(&mut line)?;

    let trimmed = line.trim();
    if trimmed.is_empty() {
        Ok(None)
    } else {
        Ok(Some(PathBuf::from(trimmed)))
    }
}
