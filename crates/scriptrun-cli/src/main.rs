// this_file: crates/scriptrun-cli/src/main.rs

//! scriptrun CLI: run reports and shape reports from the command line.

mod cli;
mod setup;

use std::io::{self, Read, Write};

use anyhow::{Context, Result};
use clap::Parser;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Runs(args) => {
            let analyzer = setup::runs_analyzer(&args)?;
            let text = input_bytes(args.text)?;
            analyzer
                .analyze_runs(&text, args.size, &mut out)
                .context("Run analysis failed")?;
        },
        Commands::Shape(args) => {
            let analyzer = setup::shape_analyzer(&args)?;
            log::info!("Shaping with {}", analyzer.shaper_name());
            let text = input_bytes(args.common.text.clone())?;
            analyzer
                .analyze_shaped_runs(&text, args.common.size, &mut out)
                .context("Shaping failed")?;
        },
    }

    out.flush()?;
    Ok(())
}

/// The text argument, or raw stdin bytes when it is absent
fn input_bytes(text: Option<String>) -> Result<Vec<u8>> {
    match text {
        Some(text) => Ok(text.into_bytes()),
        None => {
            let mut buf = Vec::new();
            io::stdin()
                .read_to_end(&mut buf)
                .context("Failed to read text from stdin")?;
            // One trailing line ending belongs to the pipe, not the text
            if buf.last() == Some(&b'\n') {
                buf.pop();
                if buf.last() == Some(&b'\r') {
                    buf.pop();
                }
            }
            Ok(buf)
        },
    }
}
