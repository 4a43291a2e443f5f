use anyhow::{anyhow, Result};
use clap::Args;
use colored::Colorize;
use exhibit_layout::{ComponentKind, EditOutcome, Placement};
use std::path::PathBuf;

use crate::commands::{open_session, write_layout};
use crate::config::Config;

#[derive(Args, Debug)]
pub struct AddArgs {
    /// Layout JSON file
    pub input: PathBuf,

    /// Component kind (layout, button, text, image, video, image-button, tabs, tab, video-controls)
    #[arg(short, long)]
    pub kind: ComponentKind,

    /// Path of the component to insert into (defaults to the layout root)
    #[arg(short, long)]
    pub target: Option<String>,

    /// Insert after the target instead of inside it
    #[arg(long)]
    pub sibling: bool,

    /// Name of the new component
    #[arg(short, long)]
    pub name: Option<String>,

    /// Write the result here instead of overwriting the input
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn add(args: AddArgs, config: &Config) -> Result<()> {
    let mut session = open_session(&args.input, config)?;

    let target = match args.target.clone() {
        Some(target) => target,
        None => session
            .root_path()
            .map(str::to_string)
            .ok_or_else(|| anyhow!("Layout has no root component"))?,
    };
    let placement = if args.sibling {
        Placement::AsSibling
    } else {
        Placement::AsChild
    };

    match session.add_component(args.kind, args.name.as_deref(), &target, placement)? {
        EditOutcome::Applied => {}
        EditOutcome::NotFound => return Err(anyhow!("No component at {}", target)),
        EditOutcome::NotAContainer => {
            return Err(anyhow!("{} cannot hold a {} component", target, args.kind))
        }
    }

    let added = session
        .selected()
        .map(|component| component.path.clone())
        .unwrap_or_default();
    write_layout(
        args.output.as_ref().unwrap_or(&args.input),
        &session.to_layout(),
        config,
    )?;

    println!("{} Added {} at {}", "✓".green(), args.kind.to_string().cyan(), added);
    Ok(())
}
