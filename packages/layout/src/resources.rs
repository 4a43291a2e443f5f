//! # Resource Resolver
//!
//! Layout markup never carries colors, texts or media URLs directly. It
//! carries `@resources/<id>` references into the layout's flat resource list.
//! This module finds those references, keeps the list complete as the tree is
//! edited and substitutes resolved values back in for previews.
//!
//! Entries are never removed: a reference that disappears from the markup
//! leaves its entry behind in the list.

use exhibit_markup::{outer_html, parse, Element, Node};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use tracing::{debug, info};

use crate::catalog::{ComponentKind, COMPONENT_TYPE_ATTRIBUTE};
use crate::color::normalize_color;
use crate::descriptor::ComponentDescriptor;
use crate::errors::{LayoutError, LayoutResult};
use crate::ids::IdGenerator;
use crate::layout::{Layout, LayoutType};

pub const RESOURCE_PREFIX: &str = "@resources/";

pub const BACKGROUND_COLOR: &str = "background-color";
pub const BACKGROUND_IMAGE: &str = "background-image";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceType {
    Image,
    Video,
    Text,
    Color,
    Html,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceMode {
    #[default]
    Static,
    Dynamic,
    Scripted,
}

/// One entry of a layout's default resource list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceEntry {
    pub id: String,
    pub data: String,
    #[serde(rename = "type")]
    pub resource_type: ResourceType,
    #[serde(default)]
    pub mode: ResourceMode,
}

impl ResourceEntry {
    pub fn new(id: impl Into<String>, resource_type: ResourceType, data: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            data: data.into(),
            resource_type,
            mode: ResourceMode::Static,
        }
    }
}

fn reference_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"@resources/([a-zA-Z0-9-]+)").expect("valid regex"))
}

fn exact_reference_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^@resources/([a-zA-Z0-9-]+)$").expect("valid regex"))
}

/// `@resources/<id>` for an id
pub fn resource_path_for(id: &str) -> String {
    format!("{}{}", RESOURCE_PREFIX, id)
}

/// Bare id of a `@resources/<id>` path. A value without the prefix is
/// returned as is.
pub fn resource_id(path: Option<&str>) -> Option<String> {
    let path = path?;
    Some(path.strip_prefix(RESOURCE_PREFIX).unwrap_or(path).to_string())
}

pub fn resource_path(id: Option<&str>) -> Option<String> {
    id.map(resource_path_for)
}

/// Id of a value that is exactly one resource reference
pub fn parse_reference(value: &str) -> Option<&str> {
    exact_reference_pattern()
        .captures(value.trim())
        .and_then(|captures| captures.get(1))
        .map(|id| id.as_str())
}

/// First `@resources/<id>` reference inside arbitrary text
pub fn reference_in(text: &str) -> Option<String> {
    reference_pattern()
        .find(text)
        .map(|found| found.as_str().to_string())
}

pub fn find_resource<'a>(resources: &'a [ResourceEntry], id: &str) -> Option<&'a ResourceEntry> {
    resources.iter().find(|resource| resource.id == id)
}

/// Data of the resource a `@resources/<id>` path points at. `None` for an
/// empty path or an unknown id.
pub fn resource_data<'a>(resources: &'a [ResourceEntry], path: Option<&str>) -> Option<&'a str> {
    let path = path.filter(|path| !path.is_empty())?;
    let id = resource_id(Some(path))?;
    find_resource(resources, &id).map(|resource| resource.data.as_str())
}

/// Every referenced id in document order. Repeated references are repeated.
pub fn extract_resource_ids(markup: &str) -> Vec<String> {
    reference_pattern()
        .captures_iter(markup)
        .filter_map(|captures| captures.get(1))
        .map(|id| id.as_str().to_string())
        .collect()
}

/// Resource type bound to a style property
pub fn resource_type_for_attribute(key: &str) -> Option<ResourceType> {
    match key {
        BACKGROUND_IMAGE => Some(ResourceType::Image),
        BACKGROUND_COLOR => Some(ResourceType::Color),
        _ => None,
    }
}

/// Placeholder data for a style-bound resource with no value
pub fn default_value_for_attribute(key: &str) -> Option<&'static str> {
    match key {
        BACKGROUND_IMAGE => Some("none"),
        BACKGROUND_COLOR => Some("transparent"),
        _ => None,
    }
}

/// A resource reference found in markup and what its position implies
#[derive(Debug, Clone, PartialEq)]
struct FoundReference {
    id: String,
    resource_type: ResourceType,
    /// Style property the reference is bound to
    style_key: Option<String>,
}

/// Collect references in `element` (attributes before children), typing each
/// by where it appears. `kind` is the nearest enclosing component kind.
fn collect_references(
    element: &Element,
    kind: Option<ComponentKind>,
    descend_into_components: bool,
    out: &mut Vec<FoundReference>,
) {
    let kind = element
        .attribute(COMPONENT_TYPE_ATTRIBUTE)
        .and_then(|value| value.parse().ok())
        .or(kind);
    let content_type = kind.map(|k| k.resource_type()).unwrap_or(ResourceType::Html);

    for attribute in &element.attributes {
        let Some(value) = attribute.value.as_deref() else {
            continue;
        };
        if attribute.name == "style" {
            for (key, style_value) in exhibit_markup::StyleMap::parse(value).iter() {
                let resource_type = resource_type_for_attribute(key).unwrap_or(content_type);
                for id in extract_resource_ids(style_value) {
                    out.push(FoundReference {
                        id,
                        resource_type,
                        style_key: Some(key.to_string()),
                    });
                }
            }
            continue;
        }
        let resource_type = match (element.tag_name.as_str(), attribute.name.as_str()) {
            ("img", "src") => ResourceType::Image,
            ("source", "src") | ("video", "src") => ResourceType::Video,
            _ => content_type,
        };
        for id in extract_resource_ids(value) {
            out.push(FoundReference {
                id,
                resource_type,
                style_key: None,
            });
        }
    }

    for child in &element.children {
        match child {
            Node::Text { content } => {
                for id in extract_resource_ids(content) {
                    out.push(FoundReference {
                        id,
                        resource_type: content_type,
                        style_key: None,
                    });
                }
            }
            Node::Element(child) => {
                if !descend_into_components && child.has_attribute(COMPONENT_TYPE_ATTRIBUTE) {
                    continue;
                }
                collect_references(child, kind, descend_into_components, out);
            }
            Node::Comment { .. } | Node::Doctype { .. } => {}
        }
    }
}

fn push_unique(resources: &mut Vec<ResourceEntry>, entry: ResourceEntry) -> bool {
    if find_resource(resources, &entry.id).is_some() {
        return false;
    }
    resources.push(entry);
    true
}

/// Entries for the style-bound references of a single element, with
/// placeholder data (`transparent` for colors, `none` for images)
pub fn default_style_resources(element: &Element) -> Vec<ResourceEntry> {
    let styles = element.style();
    let mut resources = Vec::new();
    for key in [BACKGROUND_IMAGE, BACKGROUND_COLOR] {
        let (Some(value), Some(resource_type), Some(data)) = (
            styles.get(key),
            resource_type_for_attribute(key),
            default_value_for_attribute(key),
        ) else {
            continue;
        };
        if let Some(id) = parse_reference(value) {
            push_unique(&mut resources, ResourceEntry::new(id, resource_type, data));
        }
    }
    resources
}

/// Entries for every reference in a freshly created component and its
/// children. Style-bound entries get placeholder data, content entries are
/// empty.
pub fn default_resources_for_component(component: &ComponentDescriptor) -> Vec<ResourceEntry> {
    let mut resources = Vec::new();
    collect_component_defaults(component, &mut resources);
    resources
}

fn collect_component_defaults(component: &ComponentDescriptor, resources: &mut Vec<ResourceEntry>) {
    let mut found = Vec::new();
    collect_references(&component.element, Some(component.kind), false, &mut found);
    for reference in found {
        let data = reference
            .style_key
            .as_deref()
            .and_then(default_value_for_attribute)
            .unwrap_or("");
        push_unique(
            resources,
            ResourceEntry::new(reference.id, reference.resource_type, data),
        );
    }
    for child in &component.children {
        collect_component_defaults(child, resources);
    }
}

/// Make every style-bound resource reference in the tree resolvable.
///
/// Walks the tree depth first. Video nodes are skipped but their children are
/// visited. For every other node the `background-color` declaration (and
/// `background-image` for kinds that support it) must be a reference to a
/// listed entry. Literal values move into a new entry and the style is
/// rewritten to reference it. Dangling references keep their id and get an
/// entry. Other references in the node's own content without an entry get one
/// typed by the component kind with empty data.
///
/// Returns `resources` plus every synthesized entry.
pub fn reconcile(
    tree: &mut [ComponentDescriptor],
    resources: &[ResourceEntry],
    ids: &mut IdGenerator,
) -> Vec<ResourceEntry> {
    let mut reconciled = resources.to_vec();
    for component in tree.iter_mut() {
        reconcile_component(component, &mut reconciled, ids);
    }
    info!(
        existing = resources.len(),
        synthesized = reconciled.len() - resources.len(),
        "Reconciled layout resources"
    );
    reconciled
}

fn reconcile_component(
    component: &mut ComponentDescriptor,
    resources: &mut Vec<ResourceEntry>,
    ids: &mut IdGenerator,
) {
    if component.kind != ComponentKind::Video {
        reconcile_styles(component, resources, ids);

        let mut found = Vec::new();
        collect_references(&component.element, Some(component.kind), false, &mut found);
        for reference in found.into_iter().filter(|r| r.style_key.is_none()) {
            if push_unique(
                resources,
                ResourceEntry::new(&reference.id, reference.resource_type, ""),
            ) {
                debug!(path = %component.path, resource_id = %reference.id, "Synthesized content resource");
            }
        }
    }

    for child in component.children.iter_mut() {
        reconcile_component(child, resources, ids);
    }
}

fn reconcile_styles(
    component: &mut ComponentDescriptor,
    resources: &mut Vec<ResourceEntry>,
    ids: &mut IdGenerator,
) {
    let mut styles = component.element.style();
    let mut changed = false;

    let mut keys = vec![BACKGROUND_COLOR];
    if component.kind.supports_background_image() {
        keys.push(BACKGROUND_IMAGE);
    }

    for key in keys {
        let Some(resource_type) = resource_type_for_attribute(key) else {
            continue;
        };
        let current = styles.get(key).map(str::to_string);

        if let Some(id) = current.as_deref().and_then(parse_reference) {
            if find_resource(resources, id).is_none() {
                let data = default_value_for_attribute(key).unwrap_or("");
                resources.push(ResourceEntry::new(id, resource_type, data));
                debug!(path = %component.path, resource_id = %id, "Adopted dangling style reference");
            }
            continue;
        }

        let data = literal_data(key, current.as_deref());
        let id = ids.next_id();
        styles.set(key, resource_path_for(&id));
        debug!(path = %component.path, resource_id = %id, key, data = %data, "Synthesized style resource");
        resources.push(ResourceEntry::new(id, resource_type, data));
        changed = true;
    }

    if changed {
        component.element.set_style(&styles);
    }
}

fn literal_data(key: &str, value: Option<&str>) -> String {
    let value = value.map(str::trim).filter(|value| !value.is_empty());
    let fallback = default_value_for_attribute(key).unwrap_or("");
    match key {
        BACKGROUND_COLOR => value.and_then(normalize_color),
        _ => value.map(str::to_string),
    }
    .unwrap_or_else(|| fallback.to_string())
}

/// The resource list a stored layout should have, given its markup.
///
/// One entry per referenced id in document order: the stored entry when there
/// is one, otherwise a new entry with empty data typed by where the reference
/// appears. Stored entries the markup no longer references follow, unchanged.
///
/// Only HTML layouts have resources derived from markup.
pub fn layout_default_resources(layout: &Layout) -> LayoutResult<Vec<ResourceEntry>> {
    if layout.layout_type != LayoutType::Html {
        return Err(LayoutError::UnsupportedLayoutType(
            layout.layout_type.to_string(),
        ));
    }

    let nodes = parse(layout.html()?)?;
    let mut found = Vec::new();
    for node in &nodes {
        if let Node::Element(element) = node {
            collect_references(element, None, true, &mut found);
        }
    }

    let mut resources = Vec::new();
    for reference in found {
        let entry = match find_resource(&layout.default_resources, &reference.id) {
            Some(existing) => existing.clone(),
            None => {
                debug!(resource_id = %reference.id, "Missing resource entry for markup reference");
                ResourceEntry::new(&reference.id, reference.resource_type, "")
            }
        };
        push_unique(&mut resources, entry);
    }
    for stored in &layout.default_resources {
        push_unique(&mut resources, stored.clone());
    }
    Ok(resources)
}

/// Ids referenced by the markup that the stored resource list lacks
pub fn missing_resource_ids(markup: &str, resources: &[ResourceEntry]) -> Vec<String> {
    let mut missing: Vec<String> = Vec::new();
    for id in extract_resource_ids(markup) {
        if find_resource(resources, &id).is_none() && !missing.contains(&id) {
            missing.push(id);
        }
    }
    missing
}

/// Replace every reference to a known resource with its data. Unknown
/// references are left in place.
pub fn substitute_resources(markup: &str, resources: &[ResourceEntry]) -> String {
    reference_pattern()
        .replace_all(markup, |captures: &regex::Captures| {
            let whole = &captures[0];
            match find_resource(resources, &captures[1]) {
                Some(resource) => resource.data.clone(),
                None => whole.to_string(),
            }
        })
        .into_owned()
}

/// Resource ids referenced by a descriptor's own element and every descendant
pub fn tree_resource_ids(component: &ComponentDescriptor) -> Vec<String> {
    let mut ids = component.resource_ids();
    for child in &component.children {
        ids.extend(tree_resource_ids(child));
    }
    ids
}

/// Ids referenced by an element's serialized markup
pub fn element_resource_ids(element: &Element) -> Vec<String> {
    extract_resource_ids(&outer_html(element))
}
