//! write3mf command-line front end
//!
//! Currently exposes the demo mode, which writes the built-in colored
//! tetrahedron to a 3MF file.

#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::level_filters::LevelFilter;
use write3mf::{DocumentInfo, demo};

/// Command-line arguments
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Log debug output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write the built-in four-color tetrahedron
    Demo {
        /// Destination .3mf file
        #[arg(value_name = "OUTPUT", default_value = "demo.3mf")]
        output: PathBuf,

        /// Description metadata
        #[arg(short, long)]
        description: Option<String>,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let level = if args.verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };
    tracing_subscriber::fmt().with_max_level(level).init();

    match args.command {
        Command::Demo {
            output,
            description,
        } => {
            let mut info = DocumentInfo::new();
            if let Some(description) = description {
                info = info.with_description(description);
            }
            demo::write_demo(&output, &info)?;
            println!("Wrote {}", output.display());
        }
    }

    Ok(())
}
