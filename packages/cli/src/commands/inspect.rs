use anyhow::Result;
use clap::Args;
use colored::Colorize;
use exhibit_layout::{to_element, ComponentDescriptor};
use exhibit_markup::{SerializeOptions, Serializer};
use serde::Serialize;
use std::path::PathBuf;

use crate::commands::{open_session, print_diagnostics};
use crate::config::Config;

#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Layout JSON file
    pub input: PathBuf,

    /// Output format (text, json)
    #[arg(short, long, default_value = "text")]
    pub format: String,

    /// Also print the layout markup, indented
    #[arg(long)]
    pub markup: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TreeEntry<'a> {
    id: &'a str,
    kind: String,
    name: Option<&'a str>,
    path: &'a str,
    children: Vec<TreeEntry<'a>>,
}

fn entries(tree: &[ComponentDescriptor]) -> Vec<TreeEntry<'_>> {
    tree.iter()
        .map(|node| TreeEntry {
            id: &node.id,
            kind: node.kind.to_string(),
            name: node.name.as_deref(),
            path: &node.path,
            children: entries(&node.children),
        })
        .collect()
}

pub fn inspect(args: InspectArgs, config: &Config, verbose: bool) -> Result<()> {
    let session = open_session(&args.input, config)?;

    if args.format == "json" {
        let json = serde_json::json!({
            "tree": entries(session.tree()),
            "resources": session.resources(),
            "diagnostics": session.diagnostics(),
        });
        println!("{}", serde_json::to_string_pretty(&json)?);
        return Ok(());
    }

    println!("{}", args.input.display().to_string().bold());
    for node in session.tree() {
        print_node(node, 1);
    }
    println!();
    println!("   Resources: {}", session.resources().len());

    if !session.diagnostics().is_empty() {
        println!();
        print_diagnostics(session.diagnostics(), verbose);
    }

    if args.markup {
        println!();
        let mut serializer = Serializer::new(SerializeOptions::pretty());
        for node in session.tree() {
            println!("{}", serializer.serialize_element(&to_element(node)));
        }
    }

    Ok(())
}

fn print_node(node: &ComponentDescriptor, depth: usize) {
    let indent = "  ".repeat(depth);
    let name = node.name.as_deref().unwrap_or("");
    println!(
        "{}{} {} {}",
        indent,
        node.kind.to_string().cyan(),
        name,
        node.path.dimmed()
    );
    for child in &node.children {
        print_node(child, depth + 1);
    }
}
