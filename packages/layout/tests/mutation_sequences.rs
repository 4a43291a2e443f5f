//! Mutation sequences over realistic layouts
//!
//! After every step:
//! - every path is the parent path plus the node id
//! - non-container kinds hold no children (video only its controls)
//! - misses leave the tree untouched

use exhibit_layout::{
    delete_component, find_by_path, insert_component, is_inside_video_controls, parse_tree,
    replace_component, serialize_component, ComponentDescriptor, ComponentKind, Diagnostics,
    EditOutcome, IdGenerator, Placement,
};

fn assert_invariants(tree: &[ComponentDescriptor]) {
    fn check(node: &ComponentDescriptor, parent_path: Option<&str>) {
        let expected = match parent_path {
            Some(parent) => format!("{}/{}", parent, node.id),
            None => node.id.clone(),
        };
        assert_eq!(node.path, expected);

        if !node.kind.is_container() {
            assert!(
                node.children
                    .iter()
                    .all(|child| Some(child.kind) == node.kind.composite_child()),
                "{} holds unexpected children",
                node.path
            );
        }
        for child in &node.children {
            check(child, Some(&node.path));
        }
    }

    for node in tree {
        check(node, None);
    }
}

fn new_component(kind: ComponentKind, ids: &mut IdGenerator) -> ComponentDescriptor {
    let markup = serialize_component(kind, Some("New"), ids);
    exhibit_layout::deserialize_component(&markup, &mut Diagnostics::new())
        .unwrap()
        .unwrap()
}

fn empty_root() -> Vec<ComponentDescriptor> {
    parse_tree(r#"<div id="root" data-component-type="layout" name="Main"></div>"#).unwrap()
}

#[test]
fn test_insert_text_into_empty_root() {
    let mut ids = IdGenerator::sequential("insert");
    let mut tree = empty_root();

    let text = new_component(ComponentKind::Text, &mut ids);
    let outcome = insert_component(&mut tree, text, "root", Placement::AsChild);

    assert_eq!(outcome, EditOutcome::Applied);
    assert_eq!(tree[0].children.len(), 1);
    assert_eq!(tree[0].children[0].kind, ComponentKind::Text);
    assert_invariants(&tree);
}

#[test]
fn test_delete_only_child() {
    let mut ids = IdGenerator::sequential("delete");
    let mut tree = empty_root();
    let text = new_component(ComponentKind::Text, &mut ids);
    let child_path = format!("root/{}", text.id);
    insert_component(&mut tree, text, "root", Placement::AsChild);

    assert_eq!(delete_component(&mut tree, &child_path), EditOutcome::Applied);
    assert!(tree[0].children.is_empty());
    assert_invariants(&tree);
}

#[test]
fn test_build_nested_layout_step_by_step() {
    let mut ids = IdGenerator::sequential("nested");
    let mut tree = empty_root();

    let column = new_component(ComponentKind::Layout, &mut ids);
    let column_path = format!("root/{}", column.id);
    insert_component(&mut tree, column, "root", Placement::AsChild);

    let title = new_component(ComponentKind::Text, &mut ids);
    let title_path = format!("{}/{}", column_path, title.id);
    insert_component(&mut tree, title, &column_path, Placement::AsChild);

    let button = new_component(ComponentKind::Button, &mut ids);
    let button_id = button.id.clone();
    insert_component(&mut tree, button, &title_path, Placement::AsSibling);

    let video = new_component(ComponentKind::Video, &mut ids);
    insert_component(&mut tree, video, &column_path, Placement::AsSibling);
    assert_invariants(&tree);

    let column = find_by_path(&tree, &column_path).unwrap();
    let kinds: Vec<_> = column.children.iter().map(|c| c.kind).collect();
    assert_eq!(kinds, vec![ComponentKind::Text, ComponentKind::Button]);
    assert_eq!(column.children[1].id, button_id);

    let root_kinds: Vec<_> = tree[0].children.iter().map(|c| c.kind).collect();
    assert_eq!(root_kinds, vec![ComponentKind::Layout, ComponentKind::Video]);

    // Video carries its controls as its only child
    let video = &tree[0].children[1];
    assert_eq!(video.children.len(), 1);
    assert_eq!(video.children[0].kind, ComponentKind::VideoControls);

    // Components can be placed on top of the video
    let controls_path = video.children[0].path.clone();
    let play = new_component(ComponentKind::ImageButton, &mut ids);
    let play_path = format!("{}/{}", controls_path, play.id);
    assert_eq!(
        insert_component(&mut tree, play, &controls_path, Placement::AsChild),
        EditOutcome::Applied
    );
    assert!(is_inside_video_controls(&tree, &play_path));
    assert!(!is_inside_video_controls(&tree, &title_path));
    assert_invariants(&tree);
}

#[test]
fn test_refusals_keep_container_invariant() {
    let mut ids = IdGenerator::sequential("refuse");
    let mut tree = empty_root();

    let video = new_component(ComponentKind::Video, &mut ids);
    let video_path = format!("root/{}", video.id);
    insert_component(&mut tree, video, "root", Placement::AsChild);
    let controls_path = tree[0].children[0].children[0].path.clone();
    let before = tree.clone();

    let text = new_component(ComponentKind::Text, &mut ids);
    assert_eq!(
        insert_component(&mut tree, text.clone(), &video_path, Placement::AsChild),
        EditOutcome::NotAContainer
    );
    assert_eq!(
        insert_component(&mut tree, text.clone(), &controls_path, Placement::AsSibling),
        EditOutcome::NotAContainer
    );
    assert_eq!(
        replace_component(&mut tree, text, &controls_path),
        EditOutcome::NotAContainer
    );
    assert_eq!(tree, before);
    assert_invariants(&tree);
}

#[test]
fn test_misses_are_noops() {
    let mut ids = IdGenerator::sequential("miss");
    let mut tree = empty_root();
    let before = tree.clone();

    for placement in [Placement::AsChild, Placement::AsSibling] {
        let text = new_component(ComponentKind::Text, &mut ids);
        assert_eq!(
            insert_component(&mut tree, text, "root/ghost", placement),
            EditOutcome::NotFound
        );
    }
    assert_eq!(delete_component(&mut tree, "ghost"), EditOutcome::NotFound);
    assert_eq!(delete_component(&mut tree, ""), EditOutcome::NotFound);
    assert_eq!(tree, before);
}

#[test]
fn test_replace_changes_heading_level_in_place() {
    let mut tree = parse_tree(
        r#"<div id="root" data-component-type="layout"><p id="a" data-component-type="text">A</p><p id="b" data-component-type="text" style="color: red;">B</p><p id="c" data-component-type="text">C</p></div>"#,
    )
    .unwrap();

    let heading = find_by_path(&tree, "root/b").unwrap().with_tag("h3");
    assert_eq!(
        replace_component(&mut tree, heading, "root/b"),
        EditOutcome::Applied
    );

    let tags: Vec<_> = tree[0].children.iter().map(|c| c.tag_name().to_string()).collect();
    assert_eq!(tags, vec!["p", "h3", "p"]);
    assert_eq!(tree[0].children[1].style_value("color"), Some("red".to_string()));
    assert_eq!(tree[0].children[1].text_content(), "B");
    assert_invariants(&tree);
}

#[test]
fn test_delete_root_empties_tree() {
    let mut tree = empty_root();
    assert_eq!(delete_component(&mut tree, "root"), EditOutcome::Applied);
    assert!(tree.is_empty());
}

#[test]
fn test_paths_follow_moves_between_levels() {
    let mut tree = parse_tree(
        r#"<div id="root" data-component-type="layout"><div id="left" data-component-type="layout"><p id="t" data-component-type="text"></p></div><div id="right" data-component-type="layout"></div></div>"#,
    )
    .unwrap();

    // Move by delete + insert, the way the editor drags components
    let moved = find_by_path(&tree, "root/left/t").unwrap().clone();
    delete_component(&mut tree, "root/left/t");
    insert_component(&mut tree, moved, "root/right", Placement::AsChild);

    assert!(find_by_path(&tree, "root/left/t").is_none());
    assert_eq!(find_by_path(&tree, "root/right/t").unwrap().path, "root/right/t");
    assert_invariants(&tree);
}
