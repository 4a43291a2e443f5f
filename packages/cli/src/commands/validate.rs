use anyhow::Result;
use clap::Args;
use colored::Colorize;
use exhibit_layout::resources::missing_resource_ids;
use exhibit_layout::{build_tree, Diagnostic, DiagnosticLevel, Diagnostics, Layout, LayoutType};
use exhibit_markup::ParseOptions;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::commands::print_diagnostics;
use crate::config::Config;

#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Layout JSON file or directory of layouts
    pub input: PathBuf,

    /// Reject malformed markup instead of recovering from it
    #[arg(long)]
    pub strict: bool,

    /// Output format (text, json)
    #[arg(short, long, default_value = "text")]
    pub format: String,
}

pub fn validate(args: ValidateArgs, config: &Config, verbose: bool) -> Result<()> {
    let options = ParseOptions {
        strict: args.strict || config.strict_parse,
    };

    let files = if args.input.is_file() {
        vec![args.input.clone()]
    } else if args.input.is_dir() {
        find_layout_files(&args.input)
    } else {
        return Err(anyhow::anyhow!(
            "Input path does not exist: {}",
            args.input.display()
        ));
    };

    let mut total_errors = 0;
    let mut total_warnings = 0;

    for file in &files {
        let diagnostics = validate_file(file, &options)?;
        total_errors += diagnostics
            .iter()
            .filter(|d| d.level == DiagnosticLevel::Error)
            .count();
        total_warnings += diagnostics
            .iter()
            .filter(|d| d.level == DiagnosticLevel::Warning)
            .count();

        if args.format == "json" {
            let json = serde_json::json!({ "file": file, "diagnostics": diagnostics });
            println!("{}", serde_json::to_string_pretty(&json)?);
        } else if diagnostics.is_empty() {
            if verbose {
                println!("{} {}", "✓".green(), file.display());
            }
        } else {
            println!("{}", file.display());
            print_diagnostics(&diagnostics, verbose);
            println!();
        }
    }

    if args.format != "json" {
        println!(
            "{} {} layout(s) checked",
            if total_errors > 0 {
                "Done".red().bold()
            } else {
                "Done".green().bold()
            },
            files.len()
        );
        if total_errors > 0 {
            println!("   {} {}", "Errors:".red(), total_errors);
        }
        if total_warnings > 0 {
            println!("   {} {}", "Warnings:".yellow(), total_warnings);
        }
        if total_errors == 0 && total_warnings == 0 {
            println!("   {} No issues found!", "✓".green());
        }
    }

    if total_errors > 0 {
        std::process::exit(1);
    }

    Ok(())
}

/// Check one layout file. Problems with the file itself become error
/// diagnostics rather than aborting the run.
pub fn validate_file(path: &Path, options: &ParseOptions) -> Result<Diagnostics> {
    let mut diagnostics = Diagnostics::new();

    let json = fs::read_to_string(path)?;
    let layout = match Layout::from_json(&json) {
        Ok(layout) => layout,
        Err(err) => {
            diagnostics.push(Diagnostic::error("invalid-layout", err.to_string()));
            return Ok(diagnostics);
        }
    };

    if layout.layout_type != LayoutType::Html {
        diagnostics.push(Diagnostic::info(
            "unsupported-layout-type",
            format!("{} layouts are not checked", layout.layout_type),
        ));
        return Ok(diagnostics);
    }

    let html = match layout.html() {
        Ok(html) => html,
        Err(err) => {
            diagnostics.push(Diagnostic::error("invalid-layout", err.to_string()));
            return Ok(diagnostics);
        }
    };

    match build_tree(html, options, &mut diagnostics) {
        Ok(tree) if tree.is_empty() => {
            diagnostics.push(Diagnostic::error(
                "empty-layout",
                "Markup has no layout component",
            ));
        }
        Ok(_) => {}
        Err(err) => {
            diagnostics.push(Diagnostic::error("parse-error", err.to_string()));
            return Ok(diagnostics);
        }
    }

    for id in missing_resource_ids(html, &layout.default_resources) {
        diagnostics.push(
            Diagnostic::warning(
                "missing-resource",
                format!("Resource {} is referenced but not listed", id),
            )
            .with_suggestion("Run `exhibit reconcile` to add it"),
        );
    }

    Ok(diagnostics)
}

fn find_layout_files(dir: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();

    for entry in WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();
        if path.is_file()
            && path.extension().map(|e| e == "json").unwrap_or(false)
            && path.file_name().map(|n| n != crate::config::DEFAULT_CONFIG_NAME).unwrap_or(true)
        {
            files.push(path.to_path_buf());
        }
    }

    files.sort();
    files
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_clean_layout() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            dir.path(),
            "ok.json",
            r#"{ "name": "Ok", "layoutType": "HTML", "data": { "html": "<div id=\"r\" data-component-type=\"layout\" style=\"background-color: @resources/c;\"></div>" }, "defaultResources": [{ "id": "c", "data": "transparent", "type": "color" }] }"#,
        );

        let diagnostics = validate_file(&path, &ParseOptions::default()).unwrap();
        assert!(diagnostics.is_empty(), "{:?}", diagnostics);
    }

    #[test]
    fn test_reports_missing_resources_and_parse_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            dir.path(),
            "broken.json",
            r#"{ "name": "Broken", "layoutType": "HTML", "data": { "html": "<div id=\"r\" data-component-type=\"layout\">@resources/t" } }"#,
        );

        let lenient = validate_file(&path, &ParseOptions::default()).unwrap();
        assert_eq!(lenient.by_rule("missing-resource").count(), 1);
        assert!(!lenient.has_errors());

        let strict = validate_file(&path, &ParseOptions::strict()).unwrap();
        assert_eq!(strict.by_rule("parse-error").count(), 1);
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "bad.json", "{ not json");
        let diagnostics = validate_file(&path, &ParseOptions::default()).unwrap();
        assert!(diagnostics.has_errors());
    }

    #[test]
    fn test_finds_layouts_but_not_config() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "a.json", "{}");
        write(dir.path(), "notes.txt", "");
        write(dir.path(), crate::config::DEFAULT_CONFIG_NAME, "{}");

        let files = find_layout_files(dir.path());
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("a.json"));
    }
}
