//! Markup templates for freshly inserted components.
//!
//! Every template gets a new element id and a new resource id for each
//! resource slot it introduces, so two insertions of the same kind never share
//! resources.

use exhibit_markup::escape::escape_attribute;

use crate::catalog::{ComponentKind, COMPONENT_TYPE_ATTRIBUTE};
use crate::ids::IdGenerator;
use crate::resources::resource_path_for;

/// Suffix appended to a video's name to name its controls overlay
pub const VIDEO_CONTROLS_SUFFIX: &str = "-hallinta";

/// Generate the markup fragment for a new component of `kind`
pub fn serialize_component(kind: ComponentKind, name: Option<&str>, ids: &mut IdGenerator) -> String {
    let name = name.unwrap_or("");
    let id = ids.next_id();
    let open = |tag: &str, style: &str| {
        format!(
            r#"<{} id="{}" {}="{}" name="{}" style="{}""#,
            tag,
            id,
            COMPONENT_TYPE_ATTRIBUTE,
            kind,
            escape_attribute(name),
            style
        )
    };

    match kind {
        ComponentKind::Layout => {
            let style = format!(
                "display: flex; flex-direction: row; width: 100%; height: 100%; \
                 background-repeat: no-repeat; background-position: center; \
                 background-image: {}; background-color: {};",
                fresh_ref(ids),
                fresh_ref(ids)
            );
            format!("{}></div>", open("div", &style))
        }
        ComponentKind::Button => {
            let style = format!("background-color: {};", fresh_ref(ids));
            format!("{}>{}</button>", open("button", &style), fresh_ref(ids))
        }
        ComponentKind::Text => {
            let style = format!("background-color: {};", fresh_ref(ids));
            format!("{}>{}</p>", open("p", &style), fresh_ref(ids))
        }
        ComponentKind::Image => {
            let src = fresh_ref(ids);
            let style = format!("background-color: {};", fresh_ref(ids));
            format!("{} src=\"{}\">", open("img", &style), src)
        }
        ComponentKind::Tabs | ComponentKind::Tab => {
            let style = format!(
                "display: flex; flex-direction: column; background-color: {};",
                fresh_ref(ids)
            );
            format!("{}></div>", open("div", &style))
        }
        ComponentKind::Video => {
            let style = format!("position: relative; background-color: {};", fresh_ref(ids));
            let source = fresh_ref(ids);
            let controls_name = format!("{}{}", name, VIDEO_CONTROLS_SUFFIX);
            let controls =
                serialize_component(ComponentKind::VideoControls, Some(&controls_name), ids);
            format!(
                "{}><video><source src=\"{}\"></video>{}</div>",
                open("div", &style),
                source,
                controls
            )
        }
        ComponentKind::ImageButton => {
            let style = format!("padding: 0; background-color: {};", fresh_ref(ids));
            format!(
                "{}><img src=\"{}\" style=\"width: 100%; height: 100%;\"></button>",
                open("button", &style),
                fresh_ref(ids)
            )
        }
        ComponentKind::VideoControls => {
            let style = format!(
                "position: absolute; top: 0; left: 0; width: 100%; height: 100%; \
                 background-image: {}; background-color: {};",
                fresh_ref(ids),
                fresh_ref(ids)
            );
            format!("{}></div>", open("div", &style))
        }
    }
}

fn fresh_ref(ids: &mut IdGenerator) -> String {
    resource_path_for(&ids.next_id())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::extract_resource_ids;
    use exhibit_markup::parse_element;

    #[test]
    fn test_every_kind_parses_with_type_attribute() {
        let mut ids = IdGenerator::sequential("templates");
        for kind in ComponentKind::ALL {
            let markup = serialize_component(kind, Some("Item"), &mut ids);
            let element = parse_element(&markup).unwrap().unwrap();
            assert_eq!(
                element.attribute(COMPONENT_TYPE_ATTRIBUTE),
                Some(kind.as_str()),
                "{}",
                markup
            );
            assert_eq!(element.attribute("name"), Some("Item"));
            assert!(element.style().get("background-color").is_some());
        }
    }

    #[test]
    fn test_button_has_text_and_color_refs() {
        let mut ids = IdGenerator::sequential("button");
        let markup = serialize_component(ComponentKind::Button, Some("Buy"), &mut ids);
        let element = parse_element(&markup).unwrap().unwrap();

        let color_ref = element.style().get("background-color").unwrap().to_string();
        assert!(color_ref.starts_with("@resources/"));
        assert!(element.text_content().starts_with("@resources/"));
        assert_eq!(extract_resource_ids(&markup).len(), 2);
    }

    #[test]
    fn test_background_image_only_for_supporting_kinds() {
        let mut ids = IdGenerator::sequential("bg");
        for kind in ComponentKind::ALL {
            let markup = serialize_component(kind, None, &mut ids);
            let element = parse_element(&markup).unwrap().unwrap();
            assert_eq!(
                element.style().contains("background-image"),
                kind.supports_background_image(),
                "{}",
                kind
            );
        }
    }

    #[test]
    fn test_video_embeds_controls() {
        let mut ids = IdGenerator::sequential("video");
        let markup = serialize_component(ComponentKind::Video, Some("Intro"), &mut ids);
        let element = parse_element(&markup).unwrap().unwrap();

        let controls = element
            .find_descendant(|e| e.attribute(COMPONENT_TYPE_ATTRIBUTE) == Some("video-controls"))
            .unwrap();
        assert_eq!(controls.attribute("name"), Some("Intro-hallinta"));
        assert!(element.find_descendant(|e| e.tag_name == "source").is_some());
    }

    #[test]
    fn test_fresh_ids_per_insertion() {
        let mut ids = IdGenerator::sequential("fresh");
        let a = serialize_component(ComponentKind::Text, None, &mut ids);
        let b = serialize_component(ComponentKind::Text, None, &mut ids);

        let a_ids = extract_resource_ids(&a);
        let b_ids = extract_resource_ids(&b);
        assert!(a_ids.iter().all(|id| !b_ids.contains(id)));
    }

    #[test]
    fn test_name_is_escaped() {
        let mut ids = IdGenerator::sequential("escape");
        let markup = serialize_component(ComponentKind::Text, Some("\"quoted\""), &mut ids);
        let element = parse_element(&markup).unwrap().unwrap();
        assert_eq!(element.attribute("name"), Some("\"quoted\""));
    }
}
