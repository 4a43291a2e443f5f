//! Markup → tree → markup

use exhibit_layout::{
    build_tree, parse_tree, serialize_component, tree_to_markup, ComponentDescriptor,
    ComponentKind, Diagnostics, IdGenerator,
};
use exhibit_markup::ParseOptions;

/// Ids, kinds and child order, ignoring everything else
#[derive(Debug, PartialEq)]
struct Shape {
    id: String,
    kind: ComponentKind,
    children: Vec<Shape>,
}

fn shape(tree: &[ComponentDescriptor]) -> Vec<Shape> {
    tree.iter()
        .map(|node| Shape {
            id: node.id.clone(),
            kind: node.kind,
            children: shape(&node.children),
        })
        .collect()
}

const EXHIBIT: &str = r#"
<div id="root" data-component-type="layout" name="Hall" style="display: flex; flex-direction: row; background-color: @resources/c1;">
  <div id="left" data-component-type="layout" name="Left" style="flex-direction: column; max-width: 400px;">
    <h1 id="title" data-component-type="text" name="Title" style="background-color: @resources/c2;">@resources/t1</h1>
    <p id="body" data-component-type="text">Plain &amp; simple</p>
    <!-- editor note -->
    <button id="buy" data-component-type="image-button" style="padding: 0;"><img src="@resources/i1" style="width: 100%; height: 100%;"></button>
  </div>
  <div id="tabs" data-component-type="tabs">
    <div id="tab-1" data-component-type="tab"><img id="pic" data-component-type="image" src="@resources/i2"></div>
    <div id="tab-2" data-component-type="tab"></div>
  </div>
  <div id="clip" data-component-type="video" style="position: relative;">
    <video autoplay muted loop><source src="@resources/v1"></video>
    <div id="clip-controls" data-component-type="video-controls" name="Clip-hallinta">
      <button id="play" data-component-type="button" data-play="clip">@resources/t2</button>
    </div>
  </div>
</div>"#;

#[test]
fn test_round_trip_preserves_structure() {
    let tree = parse_tree(EXHIBIT).unwrap();
    let markup = tree_to_markup(&tree);
    let reparsed = parse_tree(&markup).unwrap();

    assert_eq!(shape(&reparsed), shape(&tree));
    assert_eq!(reparsed, tree);
}

#[test]
fn test_second_serialization_is_identical() {
    let first = tree_to_markup(&parse_tree(EXHIBIT).unwrap());
    let second = tree_to_markup(&parse_tree(&first).unwrap());
    assert_eq!(first, second);
}

#[test]
fn test_content_survives_round_trip() {
    let tree = parse_tree(EXHIBIT).unwrap();
    let markup = tree_to_markup(&tree);

    assert!(markup.contains("Plain &amp; simple"));
    assert!(markup.contains("<!-- editor note -->"));
    assert!(markup.contains("<video autoplay muted loop><source src=\"@resources/v1\"></video>"));
    assert!(markup.contains("data-play=\"clip\""));
    assert!(markup.contains("max-width: 400px;"));
}

#[test]
fn test_exhibit_is_valid_in_strict_mode() {
    let mut diagnostics = Diagnostics::new();
    let tree = build_tree(EXHIBIT, &ParseOptions::strict(), &mut diagnostics).unwrap();
    assert_eq!(tree.len(), 1);
    assert!(diagnostics.is_empty(), "{:?}", diagnostics);
}

#[test]
fn test_every_template_round_trips() {
    let mut ids = IdGenerator::sequential("roundtrip");
    for kind in ComponentKind::ALL {
        let markup = serialize_component(kind, Some("Item"), &mut ids);
        let tree = parse_tree(&markup).unwrap();
        assert_eq!(tree.len(), 1, "{}", markup);
        assert_eq!(tree[0].kind, kind);

        let again = parse_tree(&tree_to_markup(&tree)).unwrap();
        assert_eq!(again, tree, "{}", kind);
    }
}

#[test]
fn test_paths_after_parse() {
    let tree = parse_tree(EXHIBIT).unwrap();
    let play = &tree[0].children[2].children[0].children[0];
    assert_eq!(play.path, "root/clip/clip-controls/play");
    assert_eq!(play.attribute("data-play"), Some("clip"));
}
