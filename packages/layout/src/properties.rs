//! Typography and alignment helpers used by the property editors.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::descriptor::ComponentDescriptor;

pub const BASE_FONT_SIZE: f64 = 16.0;
pub const DEFAULT_LINE_HEIGHT: f64 = 1.2;
pub const DEFAULT_TEXT_ALIGNMENT: &str = "left";
pub const DEFAULT_PARAGRAPH_FONT: &str = "Source-Sans-Pro-Regular";
pub const DEFAULT_HEADER_FONT: &str = "Larken-Medium";

/// Tags a text-bearing component can be rendered with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextTag {
    H1,
    H2,
    H3,
    H4,
    H5,
    H6,
    P,
    Button,
}

impl TextTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextTag::H1 => "h1",
            TextTag::H2 => "h2",
            TextTag::H3 => "h3",
            TextTag::H4 => "h4",
            TextTag::H5 => "h5",
            TextTag::H6 => "h6",
            TextTag::P => "p",
            TextTag::Button => "button",
        }
    }

    /// Browser default font size in pixels
    pub fn default_font_size(&self) -> f64 {
        let scale = match self {
            TextTag::H1 => 2.0,
            TextTag::H2 => 1.5,
            TextTag::H3 => 1.17,
            TextTag::H4 | TextTag::P | TextTag::Button => 1.0,
            TextTag::H5 => 0.83,
            TextTag::H6 => 0.67,
        };
        BASE_FONT_SIZE * scale
    }

    pub fn is_heading(&self) -> bool {
        !matches!(self, TextTag::P | TextTag::Button)
    }

    pub fn default_font(&self) -> &'static str {
        if self.is_heading() {
            DEFAULT_HEADER_FONT
        } else {
            DEFAULT_PARAGRAPH_FONT
        }
    }
}

impl FromStr for TextTag {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "h1" => Ok(TextTag::H1),
            "h2" => Ok(TextTag::H2),
            "h3" => Ok(TextTag::H3),
            "h4" => Ok(TextTag::H4),
            "h5" => Ok(TextTag::H5),
            "h6" => Ok(TextTag::H6),
            "p" => Ok(TextTag::P),
            "button" => Ok(TextTag::Button),
            other => Err(format!("Unknown text tag: {}", other)),
        }
    }
}

/// Font size in whole pixels: the explicit `font-size` when it has a pixel
/// value, the tag's default otherwise. `None` for tags with no default.
pub fn font_size(component: &ComponentDescriptor) -> Option<u32> {
    if let Some(size) = component
        .style_value("font-size")
        .and_then(|value| parse_pixels(&value))
    {
        return Some(size);
    }
    let tag: TextTag = component.tag_name().parse().ok()?;
    Some(tag.default_font_size().round() as u32)
}

/// Whole pixels of a `px` length such as `24px` or `13.6px`. Other units and
/// negative sizes give `None`.
pub fn parse_pixels(value: &str) -> Option<u32> {
    let number: f64 = value.trim().strip_suffix("px")?.trim_end().parse().ok()?;
    if !number.is_finite() || number < 0.0 {
        return None;
    }
    Some(number.round() as u32)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlexDirection {
    #[default]
    Row,
    Column,
}

impl FlexDirection {
    /// Direction declared by a container's `flex-direction`
    pub fn of(component: &ComponentDescriptor) -> Self {
        match component.style_value("flex-direction").as_deref() {
            Some("column") | Some("column-reverse") => FlexDirection::Column,
            _ => FlexDirection::Row,
        }
    }
}

/// Compass position of a container's content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    Nw,
    N,
    Ne,
    W,
    C,
    E,
    Sw,
    S,
    Se,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    Start,
    Center,
    End,
}

impl Axis {
    fn as_css(&self) -> &'static str {
        match self {
            Axis::Start => "flex-start",
            Axis::Center => "center",
            Axis::End => "flex-end",
        }
    }
}

/// The three flexbox declarations that place content in a container
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlignmentStyles {
    pub justify_content: &'static str,
    pub justify_items: &'static str,
    pub align_items: &'static str,
}

impl Alignment {
    fn axes(&self) -> (Axis, Axis) {
        use Axis::*;
        match self {
            Alignment::Nw => (Start, Start),
            Alignment::N => (Center, Start),
            Alignment::Ne => (End, Start),
            Alignment::W => (Start, Center),
            Alignment::C => (Center, Center),
            Alignment::E => (End, Center),
            Alignment::Sw => (Start, End),
            Alignment::S => (Center, End),
            Alignment::Se => (End, End),
        }
    }

    pub fn styles(&self, direction: FlexDirection) -> AlignmentStyles {
        let (horizontal, vertical) = self.axes();
        let (main, cross) = match direction {
            FlexDirection::Row => (horizontal, vertical),
            FlexDirection::Column => (vertical, horizontal),
        };
        AlignmentStyles {
            justify_content: main.as_css(),
            justify_items: main.as_css(),
            align_items: cross.as_css(),
        }
    }
}

/// Write an alignment onto a container for its current flex direction
pub fn apply_alignment(component: &mut ComponentDescriptor, alignment: Alignment) {
    let styles = alignment.styles(FlexDirection::of(component));
    component.set_style_property("justify-content", Some(styles.justify_content));
    component.set_style_property("justify-items", Some(styles.justify_items));
    component.set_style_property("align-items", Some(styles.align_items));
}
