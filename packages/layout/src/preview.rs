use exhibit_markup::escape::escape_text;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

use crate::builder::tree_to_markup;
use crate::descriptor::ComponentDescriptor;
use crate::resources::{substitute_resources, ResourceEntry};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PreviewOptions {
    /// Base URL of the asset host serving `fonts/stylesheet.css`
    pub cdn_base_path: String,
    pub title: String,
}

impl Default for PreviewOptions {
    fn default() -> Self {
        Self {
            cdn_base_path: String::new(),
            title: "Preview".to_string(),
        }
    }
}

fn max_width_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"max-width:\s*\d+\s*px;?\s*").expect("valid regex"))
}

/// Drop pixel `max-width` declarations, which the device viewport sizes
/// differently from the authoring canvas
pub fn strip_max_width(markup: &str) -> String {
    max_width_pattern().replace_all(markup, "").into_owned()
}

/// Embed resolved layout markup in a standalone document
pub fn wrap_document(body: &str, options: &PreviewOptions) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
  <head>
    <meta charset="UTF-8">
    <meta http-equiv="X-UA-Compatible" content="IE=edge">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <link rel="stylesheet" href="{cdn}/fonts/stylesheet.css"/>
    <style>
      body {{
        margin: 0;
        padding: 0;
        pointer-events: none;
        height: 100vh;
        overflow: hidden;
        user-select: none;
        -webkit-user-select: none;
      }}
      h1, h2, h3, h4, h5, h6 {{
        font-family: 'Larken-Medium';
        margin: 0;
      }}
      p, button {{
        font-family: 'Source-Sans-Pro-Regular';
        border: none;
        margin: 0;
      }}
    </style>
  </head>
  <body>
    {body}
  </body>
</html>"#,
        title = escape_text(&options.title),
        cdn = options.cdn_base_path.trim_end_matches('/'),
        body = strip_max_width(body),
    )
}

/// Preview document for a tree: markup with every known resource substituted
pub fn render_preview(
    tree: &[ComponentDescriptor],
    resources: &[ResourceEntry],
    options: &PreviewOptions,
) -> String {
    let markup = tree_to_markup(tree);
    wrap_document(&substitute_resources(&markup, resources), options)
}
