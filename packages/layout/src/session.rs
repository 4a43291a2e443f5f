//! # Edit Session
//!
//! One layout being edited. The session owns the component tree and the
//! resource list for the duration of the edit and serializes access to them:
//! every edit runs to completion (mutate, reconcile, bump version) before the
//! next one starts.
//!
//! Edits that miss their target never fail. They leave the layout unchanged
//! and add a diagnostic.

use exhibit_markup::ParseOptions;
use tracing::info;

use crate::builder::{assign_paths, build_tree, deserialize_component, tree_to_markup};
use crate::catalog::ComponentKind;
use crate::descriptor::ComponentDescriptor;
use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::errors::LayoutResult;
use crate::ids::IdGenerator;
use crate::layout::Layout;
use crate::mutations::{
    delete_component, find_by_id, find_by_path_mut, insert_component, replace_component,
    EditOutcome, Placement, TreeMutation,
};
use crate::preview::{render_preview, PreviewOptions};
use crate::resources::{
    default_resources_for_component, layout_default_resources, missing_resource_ids, reconcile,
    ResourceEntry,
};
use crate::templates::serialize_component;

pub struct EditSession {
    layout: Layout,
    tree: Vec<ComponentDescriptor>,
    resources: Vec<ResourceEntry>,
    /// Id of the selected component
    selected: Option<String>,
    version: u64,
    diagnostics: Diagnostics,
    ids: IdGenerator,
}

impl EditSession {
    pub fn open(layout: Layout, ids: IdGenerator) -> LayoutResult<Self> {
        Self::open_with_options(layout, ids, &ParseOptions::default())
    }

    /// Build the tree, complete the stored resource list against the markup
    /// and reconcile style resources.
    pub fn open_with_options(
        layout: Layout,
        mut ids: IdGenerator,
        options: &ParseOptions,
    ) -> LayoutResult<Self> {
        let html = layout.html()?;
        let mut diagnostics = Diagnostics::new();
        let mut tree = build_tree(html, options, &mut diagnostics)?;

        for id in missing_resource_ids(html, &layout.default_resources) {
            diagnostics.push(
                Diagnostic::warning(
                    "missing-resource",
                    format!("Resource {} is referenced but not listed", id),
                )
                .with_suggestion("An empty entry has been added"),
            );
        }

        let stored = layout_default_resources(&layout)?;
        let resources = reconcile(&mut tree, &stored, &mut ids);

        info!(
            layout = %layout.name,
            components = count(&tree),
            resources = resources.len(),
            "Opened layout"
        );

        Ok(Self {
            layout,
            tree,
            resources,
            selected: None,
            version: 0,
            diagnostics,
            ids,
        })
    }

    pub fn tree(&self) -> &[ComponentDescriptor] {
        &self.tree
    }

    pub fn resources(&self) -> &[ResourceEntry] {
        &self.resources
    }

    /// Number of applied edits since the session was opened
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn take_diagnostics(&mut self) -> Diagnostics {
        std::mem::take(&mut self.diagnostics)
    }

    /// Path of the layout root, if the tree has one
    pub fn root_path(&self) -> Option<&str> {
        self.tree.first().map(|root| root.path.as_str())
    }

    /// Insert a new component made from the catalog template for `kind`.
    /// Its resources are added to the list and the new component becomes the
    /// selection.
    pub fn add_component(
        &mut self,
        kind: ComponentKind,
        name: Option<&str>,
        target_path: &str,
        placement: Placement,
    ) -> LayoutResult<EditOutcome> {
        let markup = serialize_component(kind, name, &mut self.ids);
        let Some(component) = deserialize_component(&markup, &mut self.diagnostics)? else {
            return Ok(EditOutcome::NotFound);
        };
        let id = component.id.clone();
        let new_resources = default_resources_for_component(&component);

        let outcome = insert_component(&mut self.tree, component, target_path, placement);
        if outcome.is_applied() {
            for resource in new_resources {
                if !self.resources.iter().any(|r| r.id == resource.id) {
                    self.resources.push(resource);
                }
            }
            self.selected = Some(id);
            self.commit();
        } else {
            self.record_miss(outcome, "add", target_path);
        }
        Ok(outcome)
    }

    /// Delete a component and its subtree. Its resources stay in the list.
    pub fn remove_component(&mut self, path: &str) -> EditOutcome {
        let outcome = delete_component(&mut self.tree, path);
        if outcome.is_applied() {
            if let Some(selected) = &self.selected {
                if find_by_id(&self.tree, selected).is_none() {
                    self.selected = None;
                }
            }
            self.commit();
        } else {
            self.record_miss(outcome, "remove", path);
        }
        outcome
    }

    pub fn replace_component(&mut self, path: &str, component: ComponentDescriptor) -> EditOutcome {
        let outcome = replace_component(&mut self.tree, component, path);
        if outcome.is_applied() {
            self.commit();
        } else {
            self.record_miss(outcome, "replace", path);
        }
        outcome
    }

    /// Edit one component in place (styles, attributes, text). An edit that
    /// changes the kind or gives it children it cannot hold is rolled back.
    pub fn update_component<F>(&mut self, path: &str, edit: F) -> EditOutcome
    where
        F: FnOnce(&mut ComponentDescriptor),
    {
        let Some(component) = find_by_path_mut(&mut self.tree, path) else {
            self.record_miss(EditOutcome::NotFound, "update", path);
            return EditOutcome::NotFound;
        };
        let before = component.clone();
        edit(component);

        let kind = before.kind;
        let allowed = component.kind == kind
            && component
                .children
                .iter()
                .all(|child| kind.accepts_child(child.kind));
        if !allowed {
            *component = before;
            self.record_miss(EditOutcome::NotAContainer, "update", path);
            return EditOutcome::NotAContainer;
        }
        assign_paths(&mut self.tree);
        self.commit();
        EditOutcome::Applied
    }

    pub fn apply(&mut self, mutation: TreeMutation) -> EditOutcome {
        let target = mutation.target().to_string();
        let outcome = mutation.apply(&mut self.tree);
        if outcome.is_applied() {
            self.commit();
        } else {
            self.record_miss(outcome, "apply", &target);
        }
        outcome
    }

    /// Change the value of a resource. `false` when no entry has the id.
    pub fn set_resource_data(&mut self, id: &str, data: &str) -> bool {
        match self.resources.iter_mut().find(|r| r.id == id) {
            Some(resource) => {
                resource.data = data.to_string();
                self.version += 1;
                true
            }
            None => {
                self.diagnostics.push(Diagnostic::warning(
                    "resource-not-found",
                    format!("No resource with id {}", id),
                ));
                false
            }
        }
    }

    pub fn reconcile(&mut self) {
        self.resources = reconcile(&mut self.tree, &self.resources, &mut self.ids);
    }

    /// Select a component by id. `false` (and selection unchanged) when no
    /// component has the id.
    pub fn select(&mut self, id: &str) -> bool {
        if find_by_id(&self.tree, id).is_none() {
            return false;
        }
        self.selected = Some(id.to_string());
        true
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    pub fn selected(&self) -> Option<&ComponentDescriptor> {
        self.selected
            .as_deref()
            .and_then(|id| find_by_id(&self.tree, id))
    }

    /// The layout as it should be persisted
    pub fn to_layout(&self) -> Layout {
        let mut layout = self.layout.clone();
        layout.set_html(tree_to_markup(&self.tree));
        layout.default_resources = self.resources.clone();
        layout
    }

    pub fn preview(&self, options: &PreviewOptions) -> String {
        render_preview(&self.tree, &self.resources, options)
    }

    fn commit(&mut self) {
        self.reconcile();
        self.version += 1;
    }

    fn record_miss(&mut self, outcome: EditOutcome, operation: &str, path: &str) {
        let diagnostic = match outcome {
            EditOutcome::Applied => return,
            EditOutcome::NotFound => Diagnostic::warning(
                "path-not-found",
                format!("Cannot {}: no component at {}", operation, path),
            ),
            EditOutcome::NotAContainer => Diagnostic::warning(
                "not-a-container",
                format!("Cannot {}: target at {} cannot hold the component", operation, path),
            )
            .with_suggestion("Insert into a layout, tab, tabs or video controls component"),
        };
        self.diagnostics.push(diagnostic.at(path));
    }
}

fn count(tree: &[ComponentDescriptor]) -> usize {
    tree.iter().map(|node| 1 + count(&node.children)).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> EditSession {
        let mut ids = IdGenerator::sequential("session");
        let layout = Layout::new_html("Lobby", &mut ids).unwrap();
        EditSession::open(layout, ids).unwrap()
    }

    #[test]
    fn test_add_selects_new_component() {
        let mut session = session();
        let root = session.root_path().unwrap().to_string();

        let outcome = session
            .add_component(ComponentKind::Button, Some("Buy"), &root, Placement::AsChild)
            .unwrap();

        assert_eq!(outcome, EditOutcome::Applied);
        assert_eq!(session.version(), 1);
        let selected = session.selected().unwrap();
        assert_eq!(selected.kind, ComponentKind::Button);
        assert_eq!(selected.path, format!("{}/{}", root, selected.id));
    }

    #[test]
    fn test_miss_is_logged_not_raised() {
        let mut session = session();
        let outcome = session.remove_component("nowhere");

        assert_eq!(outcome, EditOutcome::NotFound);
        assert_eq!(session.version(), 0);
        assert_eq!(session.diagnostics().by_rule("path-not-found").count(), 1);
    }

    #[test]
    fn test_set_resource_data() {
        let mut session = session();
        let id = session.resources()[0].id.clone();

        assert!(session.set_resource_data(&id, "url(bg.png)"));
        assert_eq!(session.resources()[0].data, "url(bg.png)");
        assert!(!session.set_resource_data("missing", "x"));
    }

    #[test]
    fn test_to_layout_reserializes_tree() {
        let mut session = session();
        let root = session.root_path().unwrap().to_string();
        session
            .add_component(ComponentKind::Text, None, &root, Placement::AsChild)
            .unwrap();

        let layout = session.to_layout();
        assert!(layout.html().unwrap().contains(r#"data-component-type="text""#));
        assert_eq!(layout.default_resources, session.resources());
    }
}
