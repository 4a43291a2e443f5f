use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use std::fs;
use std::path::PathBuf;

use crate::commands::open_session;
use crate::config::Config;

#[derive(Args, Debug)]
pub struct PreviewArgs {
    /// Layout JSON file
    pub input: PathBuf,

    /// Output HTML file (prints to stdout when omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Asset host for preview fonts (overrides config)
    #[arg(long)]
    pub cdn: Option<String>,

    /// Document title (overrides config)
    #[arg(long)]
    pub title: Option<String>,
}

pub fn preview(args: PreviewArgs, config: &Config) -> Result<()> {
    let session = open_session(&args.input, config)?;

    let mut options = config.preview_options();
    if let Some(cdn) = args.cdn {
        options.cdn_base_path = cdn;
    }
    if let Some(title) = args.title {
        options.title = title;
    }

    let document = session.preview(&options);
    match args.output {
        Some(output) => {
            fs::write(&output, document)
                .with_context(|| format!("Cannot write {}", output.display()))?;
            println!("{} Preview written to {}", "✓".green(), output.display());
        }
        None => println!("{}", document),
    }
    Ok(())
}
