//! # Tree Mutations
//!
//! Path-addressed edits of the component tree. A path is resolved once per
//! operation to a route of child indices. A target that cannot be found is
//! not an error: the tree is left untouched and the outcome says so, which
//! callers are free to ignore.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::builder::{assign_paths, child_path};
use crate::catalog::ComponentKind;
use crate::descriptor::ComponentDescriptor;

/// Where an inserted component goes relative to the target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Placement {
    /// Last child of the target
    #[default]
    AsChild,
    /// Directly after the target in its parent
    AsSibling,
}

/// What an edit did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EditOutcome {
    Applied,
    /// No component has the target path
    NotFound,
    /// The edit would put a child under a kind that cannot hold it
    NotAContainer,
}

impl EditOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, EditOutcome::Applied)
    }
}

/// Serializable form of a tree edit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum TreeMutation {
    Insert {
        component: ComponentDescriptor,
        target: String,
        #[serde(default)]
        placement: Placement,
    },
    Delete {
        target: String,
    },
    Replace {
        component: ComponentDescriptor,
        target: String,
    },
}

impl TreeMutation {
    pub fn target(&self) -> &str {
        match self {
            TreeMutation::Insert { target, .. }
            | TreeMutation::Delete { target }
            | TreeMutation::Replace { target, .. } => target,
        }
    }

    pub fn apply(self, tree: &mut Vec<ComponentDescriptor>) -> EditOutcome {
        match self {
            TreeMutation::Insert {
                component,
                target,
                placement,
            } => insert_component(tree, component, &target, placement),
            TreeMutation::Delete { target } => delete_component(tree, &target),
            TreeMutation::Replace { component, target } => {
                replace_component(tree, component, &target)
            }
        }
    }
}

/// Child-index route to the component at `path`.
///
/// Ids may themselves contain `/`, so a prefix match can be a false lead; the
/// search backtracks until the whole path matches.
pub fn resolve_route(tree: &[ComponentDescriptor], path: &str) -> Option<Vec<usize>> {
    fn search(
        nodes: &[ComponentDescriptor],
        parent_path: Option<&str>,
        target: &str,
        route: &mut Vec<usize>,
    ) -> bool {
        for (index, node) in nodes.iter().enumerate() {
            let path = child_path(parent_path, &node.id);
            route.push(index);
            if path == target {
                return true;
            }
            let descends = target
                .strip_prefix(path.as_str())
                .is_some_and(|rest| rest.starts_with('/'));
            if descends && search(&node.children, Some(&path), target, route) {
                return true;
            }
            route.pop();
        }
        false
    }

    let mut route = Vec::new();
    search(tree, None, path, &mut route).then_some(route)
}

fn node_at<'a>(tree: &'a [ComponentDescriptor], route: &[usize]) -> Option<&'a ComponentDescriptor> {
    let (first, rest) = route.split_first()?;
    let mut node = tree.get(*first)?;
    for index in rest {
        node = node.children.get(*index)?;
    }
    Some(node)
}

fn node_at_mut<'a>(
    tree: &'a mut [ComponentDescriptor],
    route: &[usize],
) -> Option<&'a mut ComponentDescriptor> {
    let (first, rest) = route.split_first()?;
    let mut node = tree.get_mut(*first)?;
    for index in rest {
        node = node.children.get_mut(*index)?;
    }
    Some(node)
}

/// Child list holding the node at `route`, with the node's index in it
fn siblings_mut<'a>(
    tree: &'a mut Vec<ComponentDescriptor>,
    route: &[usize],
) -> Option<(&'a mut Vec<ComponentDescriptor>, usize)> {
    let (index, parent_route) = route.split_last()?;
    if parent_route.is_empty() {
        return Some((tree, *index));
    }
    node_at_mut(tree, parent_route).map(|parent| (&mut parent.children, *index))
}

/// Insert `component` relative to the component at `target_path`.
///
/// A top-level target has no siblings, so insertion there is always as child.
pub fn insert_component(
    tree: &mut Vec<ComponentDescriptor>,
    mut component: ComponentDescriptor,
    target_path: &str,
    placement: Placement,
) -> EditOutcome {
    let Some(route) = resolve_route(tree, target_path) else {
        warn!(path = %target_path, "Insert target not found");
        return EditOutcome::NotFound;
    };
    let placement = if route.len() == 1 {
        Placement::AsChild
    } else {
        placement
    };

    match placement {
        Placement::AsChild => {
            let Some(target) = node_at_mut(tree, &route) else {
                return EditOutcome::NotFound;
            };
            if !target.is_container() {
                debug!(path = %target_path, kind = %target.kind, "Refused insert into non-container");
                return EditOutcome::NotAContainer;
            }
            component.slot = None;
            target.children.push(component);
        }
        Placement::AsSibling => {
            let parent_route = &route[..route.len() - 1];
            if !node_at(tree, parent_route).is_some_and(ComponentDescriptor::is_container) {
                debug!(path = %target_path, "Refused sibling insert under non-container");
                return EditOutcome::NotAContainer;
            }
            let Some((siblings, index)) = siblings_mut(tree, &route) else {
                return EditOutcome::NotFound;
            };
            // Right after the target, ahead of the content that follows it
            component.slot = siblings[index].slot;
            siblings.insert(index + 1, component);
        }
    }

    assign_paths(tree);
    EditOutcome::Applied
}

/// Remove the component at `target_path` with its subtree. Deleting the root
/// empties the tree.
pub fn delete_component(tree: &mut Vec<ComponentDescriptor>, target_path: &str) -> EditOutcome {
    let Some(route) = resolve_route(tree, target_path) else {
        warn!(path = %target_path, "Delete target not found");
        return EditOutcome::NotFound;
    };
    let Some((siblings, index)) = siblings_mut(tree, &route) else {
        return EditOutcome::NotFound;
    };
    siblings.remove(index);

    assign_paths(tree);
    EditOutcome::Applied
}

/// Put `component` in place of the component at `target_path`, keeping its
/// position among its siblings.
pub fn replace_component(
    tree: &mut Vec<ComponentDescriptor>,
    mut component: ComponentDescriptor,
    target_path: &str,
) -> EditOutcome {
    let Some(route) = resolve_route(tree, target_path) else {
        warn!(path = %target_path, "Replace target not found");
        return EditOutcome::NotFound;
    };
    if route.len() > 1 {
        let parent_route = &route[..route.len() - 1];
        let accepted = node_at(tree, parent_route)
            .is_some_and(|parent| parent.kind.accepts_child(component.kind));
        if !accepted {
            return EditOutcome::NotAContainer;
        }
    }
    let Some(target) = node_at_mut(tree, &route) else {
        return EditOutcome::NotFound;
    };
    component.slot = target.slot;
    *target = component;

    assign_paths(tree);
    EditOutcome::Applied
}

pub fn find_by_path<'a>(tree: &'a [ComponentDescriptor], path: &str) -> Option<&'a ComponentDescriptor> {
    let route = resolve_route(tree, path)?;
    node_at(tree, &route)
}

pub fn find_by_path_mut<'a>(
    tree: &'a mut [ComponentDescriptor],
    path: &str,
) -> Option<&'a mut ComponentDescriptor> {
    let route = resolve_route(tree, path)?;
    node_at_mut(tree, &route)
}

/// First component with `id` in depth-first order
pub fn find_by_id<'a>(tree: &'a [ComponentDescriptor], id: &str) -> Option<&'a ComponentDescriptor> {
    tree.iter().find_map(|node| {
        if node.id == id {
            Some(node)
        } else {
            find_by_id(&node.children, id)
        }
    })
}

/// Ancestors of the component at `path`, root first. Empty when the path
/// does not resolve.
pub fn ancestors<'a>(tree: &'a [ComponentDescriptor], path: &str) -> Vec<&'a ComponentDescriptor> {
    let Some(route) = resolve_route(tree, path) else {
        return Vec::new();
    };
    (1..route.len())
        .filter_map(|depth| node_at(tree, &route[..depth]))
        .collect()
}

pub fn is_inside_video_controls(tree: &[ComponentDescriptor], path: &str) -> bool {
    ancestors(tree, path)
        .iter()
        .any(|ancestor| ancestor.kind == ComponentKind::VideoControls)
}

/// Visit every component depth first, parents before children
pub fn walk<'a, F>(tree: &'a [ComponentDescriptor], visit: &mut F)
where
    F: FnMut(&'a ComponentDescriptor),
{
    for node in tree {
        visit(node);
        walk(&node.children, visit);
    }
}
