use serde::{Deserialize, Serialize};
use std::fmt;

use crate::catalog::ComponentKind;
use crate::errors::{LayoutError, LayoutResult};
use crate::ids::IdGenerator;
use crate::resources::{default_style_resources, ResourceEntry};
use crate::templates::serialize_component;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LayoutType {
    #[default]
    Html,
    Android,
}

impl fmt::Display for LayoutType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutType::Html => f.write_str("HTML"),
            LayoutType::Android => f.write_str("ANDROID"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ScreenOrientation {
    Portrait,
    Landscape,
}

/// A persisted device screen layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Layout {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub layout_type: LayoutType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub screen_orientation: Option<ScreenOrientation>,
    /// `{ "html": ... }` for HTML layouts, opaque otherwise
    pub data: serde_json::Value,
    #[serde(default)]
    pub default_resources: Vec<ResourceEntry>,
}

impl Layout {
    /// New HTML layout holding one empty root layout component and the
    /// resources its template references
    pub fn new_html(name: &str, ids: &mut IdGenerator) -> LayoutResult<Self> {
        let html = serialize_component(ComponentKind::Layout, Some(name), ids);
        let root = exhibit_markup::parse_element(&html)?.ok_or(LayoutError::MissingHtml)?;

        Ok(Self {
            id: None,
            name: name.to_string(),
            layout_type: LayoutType::Html,
            model_id: None,
            screen_orientation: None,
            data: serde_json::json!({ "html": html }),
            default_resources: default_style_resources(&root),
        })
    }

    /// Markup of an HTML layout
    pub fn html(&self) -> LayoutResult<&str> {
        if self.layout_type != LayoutType::Html {
            return Err(LayoutError::UnsupportedLayoutType(self.layout_type.to_string()));
        }
        self.data
            .get("html")
            .and_then(serde_json::Value::as_str)
            .ok_or(LayoutError::MissingHtml)
    }

    pub fn set_html(&mut self, html: String) {
        match self.data.as_object_mut() {
            Some(data) => {
                data.insert("html".to_string(), serde_json::Value::String(html));
            }
            None => self.data = serde_json::json!({ "html": html }),
        }
    }

    pub fn from_json(json: &str) -> LayoutResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json_pretty(&self) -> LayoutResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
