pub mod add;
pub mod init;
pub mod inspect;
pub mod preview;
pub mod reconcile;
pub mod remove;
pub mod validate;

pub use add::{add, AddArgs};
pub use init::{init, InitArgs};
pub use inspect::{inspect, InspectArgs};
pub use preview::{preview, PreviewArgs};
pub use reconcile::{reconcile, ReconcileArgs};
pub use remove::{remove, RemoveArgs};
pub use validate::{validate, ValidateArgs};

use anyhow::{Context, Result};
use colored::Colorize;
use exhibit_layout::{DiagnosticLevel, Diagnostics, EditSession, Layout};
use std::fs;
use std::path::Path;

use crate::config::Config;

pub fn read_layout(path: &Path) -> Result<Layout> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Cannot read {}", path.display()))?;
    Layout::from_json(&json).with_context(|| format!("Invalid layout file {}", path.display()))
}

pub fn write_layout(path: &Path, layout: &Layout, config: &Config) -> Result<()> {
    let json = if config.pretty {
        layout.to_json_pretty()?
    } else {
        serde_json::to_string(layout)?
    };
    fs::write(path, json).with_context(|| format!("Cannot write {}", path.display()))
}

pub fn open_session(path: &Path, config: &Config) -> Result<EditSession> {
    let layout = read_layout(path)?;
    EditSession::open_with_options(layout, config.id_generator(), &config.parse_options())
        .with_context(|| format!("Cannot open {}", path.display()))
}

/// Print diagnostics the way the validator does. Info level only when verbose.
pub fn print_diagnostics(diagnostics: &Diagnostics, verbose: bool) {
    for diagnostic in diagnostics.iter() {
        let level_str = match diagnostic.level {
            DiagnosticLevel::Error => "error".red().bold(),
            DiagnosticLevel::Warning => "warning".yellow().bold(),
            DiagnosticLevel::Info => "info".blue().bold(),
        };

        if !verbose && diagnostic.level == DiagnosticLevel::Info {
            continue;
        }

        match &diagnostic.path {
            Some(path) => println!(
                "  {} [{}] {} ({})",
                level_str,
                diagnostic.rule,
                diagnostic.message,
                path.dimmed()
            ),
            None => println!("  {} [{}] {}", level_str, diagnostic.rule, diagnostic.message),
        }

        if let Some(suggestion) = &diagnostic.suggestion {
            println!("    {} {}", "hint:".dimmed(), suggestion.dimmed());
        }
    }
}
