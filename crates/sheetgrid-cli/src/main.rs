//! sheetgrid CLI - spreadsheet grid extraction tool

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs;
use std::path::PathBuf;

use sheetgrid_core::extract_grids;
use sheetgrid_xlsx::XlsxReader;

#[derive(Parser)]
#[command(name = "sheetgrid")]
#[command(
    author,
    version,
    about = "Extract presentation-aware grids from spreadsheets"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract grids from a workbook and print them as JSON
    Grids {
        /// Input spreadsheet file (xlsx)
        input: PathBuf,

        /// Only emit the sheet with this title
        #[arg(short, long)]
        sheet: Option<String>,

        /// Pretty-print the JSON output
        #[arg(short, long)]
        pretty: bool,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List the visible sheet titles in a workbook
    Sheets {
        /// Input spreadsheet file (xlsx)
        input: PathBuf,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Grids {
            input,
            sheet,
            pretty,
            output,
        } => {
            let document = XlsxReader::read_file(&input)
                .with_context(|| format!("failed to read {}", input.display()))?;

            let mut grids = extract_grids(&document);
            if let Some(title) = sheet {
                grids.retain(|grid| grid.title == title);
                if grids.is_empty() {
                    anyhow::bail!("no visible sheet titled '{title}'");
                }
            }

            let json = if pretty {
                serde_json::to_string_pretty(&grids)?
            } else {
                serde_json::to_string(&grids)?
            };

            match output {
                Some(path) => fs::write(&path, json)
                    .with_context(|| format!("failed to write {}", path.display()))?,
                None => println!("{json}"),
            }
        }

        Commands::Sheets { input } => {
            let document = XlsxReader::read_file(&input)
                .with_context(|| format!("failed to read {}", input.display()))?;

            for sheet in document.sheets.iter().filter(|s| !s.hidden) {
                println!("{}", sheet.title);
            }
        }
    }

    Ok(())
}
