//! Markup ⇄ component tree.
//!
//! Building never fails on layout content: elements the catalog does not
//! know are left out of the tree and reported through [`Diagnostics`]. Only a
//! markup parse error in strict mode is an error.

use exhibit_markup::{outer_html, parse_with_options, Element, Node, ParseOptions};
use tracing::{debug, info};

use crate::catalog::{ComponentKind, COMPONENT_TYPE_ATTRIBUTE};
use crate::descriptor::ComponentDescriptor;
use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::errors::LayoutResult;

/// Build the component tree of a layout document
pub fn build_tree(
    html: &str,
    options: &ParseOptions,
    diagnostics: &mut Diagnostics,
) -> LayoutResult<Vec<ComponentDescriptor>> {
    let nodes = parse_with_options(html, *options)?;
    let mut tree = Vec::new();

    for node in nodes {
        let Node::Element(element) = node else {
            continue;
        };
        match component_kind(&element, diagnostics) {
            Some(kind) => tree.push(build_component(element, kind, None, diagnostics)),
            None => debug!(tag = %element.tag_name, "Skipped top-level element without component type"),
        }
    }

    info!(roots = tree.len(), "Built component tree");
    Ok(tree)
}

/// Lenient [`build_tree`] that drops diagnostics
pub fn parse_tree(html: &str) -> LayoutResult<Vec<ComponentDescriptor>> {
    build_tree(html, &ParseOptions::default(), &mut Diagnostics::new())
}

/// Build one descriptor from a component fragment (the first recognized
/// top-level element). Its path is its id until it is inserted into a tree.
pub fn deserialize_component(
    markup: &str,
    diagnostics: &mut Diagnostics,
) -> LayoutResult<Option<ComponentDescriptor>> {
    let mut tree = build_tree(markup, &ParseOptions::default(), diagnostics)?;
    Ok(if tree.is_empty() {
        None
    } else {
        Some(tree.swap_remove(0))
    })
}

/// Catalog kind of an element. Unknown type values are reported; elements
/// without a type are foreign markup and yield `None` quietly.
fn component_kind(element: &Element, diagnostics: &mut Diagnostics) -> Option<ComponentKind> {
    let value = element.attribute(COMPONENT_TYPE_ATTRIBUTE)?;
    match value.parse() {
        Ok(kind) => Some(kind),
        Err(err) => {
            let mut diagnostic = Diagnostic::warning("unknown-component-type", err.to_string())
                .with_suggestion(format!(
                    "Use one of: {}",
                    ComponentKind::ALL.map(|kind| kind.as_str()).join(", ")
                ));
            if let Some(id) = element.id() {
                diagnostic = diagnostic.at(id);
            }
            diagnostics.push(diagnostic);
            None
        }
    }
}

fn build_component(
    mut element: Element,
    kind: ComponentKind,
    parent_path: Option<&str>,
    diagnostics: &mut Diagnostics,
) -> ComponentDescriptor {
    let id = element.id().unwrap_or_default().to_string();
    let path = child_path(parent_path, &id);
    if id.is_empty() {
        diagnostics.push(
            Diagnostic::warning("missing-id", format!("{} component has no id", kind))
                .at(path.clone())
                .with_suggestion("Give every component a unique id attribute"),
        );
    }
    let name = element
        .attribute("name")
        .filter(|name| !name.is_empty())
        .map(str::to_string);

    let holds_components = kind.is_container() || kind.composite_child().is_some();
    let mut content = Vec::new();
    let mut children = Vec::new();

    for node in std::mem::take(&mut element.children) {
        match node {
            Node::Element(child) if child.has_attribute(COMPONENT_TYPE_ATTRIBUTE) => {
                match component_kind(&child, diagnostics) {
                    Some(child_kind) if kind.accepts_child(child_kind) => {
                        let mut component =
                            build_component(child, child_kind, Some(&path), diagnostics);
                        component.slot = Some(content.len());
                        children.push(component);
                    }
                    Some(child_kind) => {
                        diagnostics.push(
                            Diagnostic::warning(
                                "nested-component-ignored",
                                format!("{} inside {} is kept as plain markup", child_kind, kind),
                            )
                            .at(path.clone()),
                        );
                        content.push(Node::Element(child));
                    }
                    None => content.push(Node::Element(child)),
                }
            }
            Node::Element(child) => {
                report_buried_components(&child, &path, diagnostics);
                content.push(Node::Element(child));
            }
            node if holds_components && node.is_blank_text() => {}
            node => content.push(node),
        }
    }

    element.children = content;
    ComponentDescriptor {
        id,
        kind,
        name,
        path,
        children,
        element,
        slot: None,
    }
}

/// Components wrapped in foreign markup are not reachable by the editor
fn report_buried_components(element: &Element, path: &str, diagnostics: &mut Diagnostics) {
    for child in element.child_elements() {
        if child.has_attribute(COMPONENT_TYPE_ATTRIBUTE) {
            diagnostics.push(
                Diagnostic::warning(
                    "nested-component-ignored",
                    format!(
                        "Component {} is wrapped in a <{}> and is kept as plain markup",
                        child.id().unwrap_or(""),
                        element.tag_name
                    ),
                )
                .at(path.to_string()),
            );
        } else {
            report_buried_components(child, path, diagnostics);
        }
    }
}

pub(crate) fn child_path(parent_path: Option<&str>, id: &str) -> String {
    match parent_path {
        Some(parent) => format!("{}/{}", parent, id),
        None => id.to_string(),
    }
}

/// Recompute every path from the current structure
pub fn assign_paths(tree: &mut [ComponentDescriptor]) {
    fn assign(component: &mut ComponentDescriptor, parent_path: Option<&str>) {
        component.path = child_path(parent_path, &component.id);
        let path = component.path.clone();
        for child in component.children.iter_mut() {
            assign(child, Some(&path));
        }
    }

    for component in tree.iter_mut() {
        assign(component, None);
    }
}

/// Reassemble a descriptor's markup. Each child component goes back at its
/// slot among the own content; children without a slot follow all of it.
pub fn to_element(component: &ComponentDescriptor) -> Element {
    let mut element = component.element.clone();
    let content = std::mem::take(&mut element.children);
    let mut content = content.into_iter().peekable();
    let mut emitted = 0;

    for child in &component.children {
        let slot = child.slot.unwrap_or(usize::MAX);
        while emitted < slot {
            let Some(node) = content.next() else {
                break;
            };
            element.children.push(node);
            emitted += 1;
        }
        element.children.push(Node::Element(to_element(child)));
    }
    element.children.extend(content);
    element
}

/// Persisted markup of a tree: the outer markup of its root(s)
pub fn tree_to_markup(tree: &[ComponentDescriptor]) -> String {
    tree.iter()
        .map(|component| outer_html(&to_element(component)))
        .collect()
}
