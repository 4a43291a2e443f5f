//! # Component Catalog
//!
//! Fixed registry of the component kinds a layout can contain and the
//! per-kind rules the rest of the editor consults: which kinds hold children,
//! which take a background image, how they may be sized and what resource type
//! their references default to.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::resources::ResourceType;

/// Attribute carrying the component kind on a layout element
pub const COMPONENT_TYPE_ATTRIBUTE: &str = "data-component-type";

/// Component kinds, serialized as their `data-component-type` values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ComponentKind {
    Layout,
    Button,
    Text,
    Image,
    Video,
    ImageButton,
    Tabs,
    Tab,
    VideoControls,
}

impl ComponentKind {
    pub const ALL: [ComponentKind; 9] = [
        ComponentKind::Layout,
        ComponentKind::Button,
        ComponentKind::Text,
        ComponentKind::Image,
        ComponentKind::Video,
        ComponentKind::ImageButton,
        ComponentKind::Tabs,
        ComponentKind::Tab,
        ComponentKind::VideoControls,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentKind::Layout => "layout",
            ComponentKind::Button => "button",
            ComponentKind::Text => "text",
            ComponentKind::Image => "image",
            ComponentKind::Video => "video",
            ComponentKind::ImageButton => "image-button",
            ComponentKind::Tabs => "tabs",
            ComponentKind::Tab => "tab",
            ComponentKind::VideoControls => "video-controls",
        }
    }

    /// Kinds that accept arbitrary child components
    pub fn is_container(&self) -> bool {
        matches!(
            self,
            ComponentKind::Layout
                | ComponentKind::Tab
                | ComponentKind::Tabs
                | ComponentKind::VideoControls
        )
    }

    /// The one structural child a non-container kind carries because its
    /// template embeds it.
    pub fn composite_child(&self) -> Option<ComponentKind> {
        match self {
            ComponentKind::Video => Some(ComponentKind::VideoControls),
            _ => None,
        }
    }

    /// Whether a child of `kind` may appear under this kind in the tree
    pub fn accepts_child(&self, kind: ComponentKind) -> bool {
        self.is_container() || self.composite_child() == Some(kind)
    }

    /// Kinds whose `background-image` style is bound to a resource
    pub fn supports_background_image(&self) -> bool {
        matches!(self, ComponentKind::Layout | ComponentKind::VideoControls)
    }

    /// Kinds that cannot be sized in percentages and must use pixels
    pub fn requires_absolute_sizing(&self) -> bool {
        matches!(
            self,
            ComponentKind::Image
                | ComponentKind::Video
                | ComponentKind::ImageButton
                | ComponentKind::Button
        )
    }

    /// Kinds that can be configured to start video playback
    pub fn can_trigger_playback(&self) -> bool {
        matches!(
            self,
            ComponentKind::Button | ComponentKind::ImageButton | ComponentKind::Image
        )
    }

    /// Default type of the resources referenced from a component's content
    pub fn resource_type(&self) -> ResourceType {
        match self {
            ComponentKind::Image
            | ComponentKind::Layout
            | ComponentKind::ImageButton
            | ComponentKind::VideoControls => ResourceType::Image,
            ComponentKind::Video => ResourceType::Video,
            ComponentKind::Text
            | ComponentKind::Button
            | ComponentKind::Tabs
            | ComponentKind::Tab => ResourceType::Text,
        }
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for a `data-component-type` value outside the catalog
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown component type: {0}")]
pub struct UnknownComponentKind(pub String);

impl FromStr for ComponentKind {
    type Err = UnknownComponentKind;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        ComponentKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == value)
            .ok_or_else(|| UnknownComponentKind(value.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_names_round_trip() {
        for kind in ComponentKind::ALL {
            assert_eq!(kind.as_str().parse::<ComponentKind>(), Ok(kind));
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.as_str()));
        }
    }

    #[test]
    fn test_unknown_kind() {
        assert!("carousel".parse::<ComponentKind>().is_err());
        assert!("Layout".parse::<ComponentKind>().is_err());
    }

    #[test]
    fn test_container_set() {
        let containers: Vec<_> = ComponentKind::ALL
            .into_iter()
            .filter(ComponentKind::is_container)
            .collect();
        assert_eq!(
            containers,
            vec![
                ComponentKind::Layout,
                ComponentKind::Tabs,
                ComponentKind::Tab,
                ComponentKind::VideoControls
            ]
        );
    }

    #[test]
    fn test_video_only_accepts_controls() {
        assert!(ComponentKind::Video.accepts_child(ComponentKind::VideoControls));
        assert!(!ComponentKind::Video.accepts_child(ComponentKind::Text));
        assert!(!ComponentKind::Button.accepts_child(ComponentKind::Text));
        assert!(ComponentKind::Layout.accepts_child(ComponentKind::Video));
    }
}
