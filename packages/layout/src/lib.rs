//! # Exhibit Layout
//!
//! Editing core for HTML exhibition layouts.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ markup: HTML subset text ⇄ node tree        │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ layout: component tree + resources          │
//! │  - Catalog and templates for new components │
//! │  - Build descriptors from markup and back   │
//! │  - Path-addressed insert/delete/replace     │
//! │  - Reconcile @resources/<id> references     │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ preview: resolved standalone HTML document  │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use exhibit_layout::{ComponentKind, EditSession, IdGenerator, Layout, Placement};
//!
//! let layout = Layout::from_json(&std::fs::read_to_string("lobby.json")?)?;
//! let mut session = EditSession::open(layout, IdGenerator::random())?;
//!
//! let root = session.root_path().unwrap_or_default().to_string();
//! session.add_component(ComponentKind::Text, Some("Title"), &root, Placement::AsChild)?;
//!
//! let saved = session.to_layout().to_json_pretty()?;
//! ```

pub mod builder;
pub mod catalog;
pub mod color;
pub mod descriptor;
pub mod diagnostics;
pub mod errors;
pub mod ids;
pub mod layout;
pub mod mutations;
pub mod preview;
pub mod properties;
pub mod resources;
pub mod session;
pub mod templates;

pub use builder::{
    assign_paths, build_tree, deserialize_component, parse_tree, to_element, tree_to_markup,
};
pub use catalog::{ComponentKind, UnknownComponentKind, COMPONENT_TYPE_ATTRIBUTE};
pub use color::normalize_color;
pub use descriptor::ComponentDescriptor;
pub use diagnostics::{Diagnostic, DiagnosticLevel, Diagnostics};
pub use errors::{LayoutError, LayoutResult};
pub use ids::IdGenerator;
pub use layout::{Layout, LayoutType, ScreenOrientation};
pub use mutations::{
    ancestors, delete_component, find_by_id, find_by_path, find_by_path_mut, insert_component,
    is_inside_video_controls, replace_component, walk, EditOutcome, Placement, TreeMutation,
};
pub use preview::{render_preview, wrap_document, PreviewOptions};
pub use properties::{apply_alignment, font_size, Alignment, FlexDirection, TextTag};
pub use resources::{
    default_resources_for_component, default_style_resources, extract_resource_ids,
    find_resource, layout_default_resources, reconcile, resource_data, resource_id,
    resource_path, substitute_resources, ResourceEntry, ResourceMode, ResourceType,
};
pub use session::EditSession;
pub use templates::serialize_component;
