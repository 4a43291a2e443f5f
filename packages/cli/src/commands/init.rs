use anyhow::Result;
use clap::Args;
use colored::Colorize;
use exhibit_layout::Layout;
use std::path::PathBuf;

use crate::commands::write_layout;
use crate::config::Config;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Layout file to create
    pub output: PathBuf,

    /// Layout name
    #[arg(short, long, default_value = "Layout")]
    pub name: String,

    /// Overwrite an existing file
    #[arg(short, long)]
    pub force: bool,
}

pub fn init(args: InitArgs, config: &Config) -> Result<()> {
    if args.output.exists() && !args.force {
        println!(
            "{} {} already exists",
            "⚠️".yellow(),
            args.output.display().to_string().bright_white()
        );
        println!("Use --force to overwrite");
        return Ok(());
    }

    let mut ids = config.id_generator();
    let layout = Layout::new_html(&args.name, &mut ids)?;
    write_layout(&args.output, &layout, config)?;

    println!(
        "{} Created layout {} ({} resources)",
        "✓".green(),
        args.name.bold(),
        layout.default_resources.len()
    );
    println!("   {}", args.output.display());

    Ok(())
}
