//! Full edit cycles through an EditSession

use exhibit_layout::properties::{apply_alignment, Alignment};
use exhibit_layout::{
    extract_resource_ids, find_resource, ComponentKind, EditOutcome, EditSession, IdGenerator,
    Layout, Placement, PreviewOptions, TreeMutation,
};

fn stored_layout() -> Layout {
    Layout::from_json(
        r#"{
            "id": "layout-1",
            "name": "Lobby",
            "layoutType": "HTML",
            "data": { "html": "<div id=\"root\" data-component-type=\"layout\" name=\"Lobby\" style=\"display: flex; background-color: #336699;\"><p id=\"greeting\" data-component-type=\"text\" style=\"background-color: @resources/g-bg;\">@resources/g-text</p></div>" },
            "defaultResources": [
                { "id": "g-bg", "data": "transparent", "type": "color", "mode": "static" },
                { "id": "retired", "data": "Old banner", "type": "text", "mode": "static" }
            ]
        }"#,
    )
    .unwrap()
}

fn open() -> EditSession {
    EditSession::open(stored_layout(), IdGenerator::sequential("session-tests")).unwrap()
}

#[test]
fn test_open_completes_resources() {
    let session = open();

    assert_eq!(session.diagnostics().by_rule("missing-resource").count(), 1);
    assert!(find_resource(session.resources(), "g-text").is_some());
    assert!(find_resource(session.resources(), "retired").is_some());

    // The literal root color became a resource
    let root_color = session.tree()[0].style_value("background-color").unwrap();
    assert!(root_color.starts_with("@resources/"));
    let id = root_color.trim_start_matches("@resources/");
    assert_eq!(find_resource(session.resources(), id).unwrap().data, "rgb(51, 102, 153)");
}

#[test]
fn test_edit_cycle_persists() {
    let mut session = open();

    let outcome = session
        .add_component(ComponentKind::Image, Some("Logo"), "root/greeting", Placement::AsSibling)
        .unwrap();
    assert_eq!(outcome, EditOutcome::Applied);
    let logo = session.selected().unwrap().clone();
    assert_eq!(logo.path, format!("root/{}", logo.id));

    let outcome = session.update_component("root/greeting", |text| {
        text.set_style_property("font-size", Some("32px"));
        text.set_name("Greeting");
    });
    assert_eq!(outcome, EditOutcome::Applied);
    assert!(session.set_resource_data("g-text", "Welcome!"));
    assert_eq!(session.version(), 3);

    let layout = session.to_layout();
    let html = layout.html().unwrap();
    assert!(html.contains("font-size: 32px;"));
    assert!(html.contains(r#"name="Greeting""#));
    for id in extract_resource_ids(html) {
        assert!(find_resource(&layout.default_resources, &id).is_some(), "{}", id);
    }

    // A saved layout reopens to the same tree and resources
    let reopened = EditSession::open(layout.clone(), IdGenerator::sequential("again")).unwrap();
    assert_eq!(reopened.tree(), session.tree());
    // Reopening lists resources in markup order, so compare as sets
    assert_eq!(reopened.resources().len(), session.resources().len());
    for entry in session.resources() {
        assert_eq!(find_resource(reopened.resources(), &entry.id), Some(entry));
    }
    assert!(reopened.diagnostics().is_empty());
}

#[test]
fn test_removed_components_leave_resources_behind() {
    let mut session = open();
    let before = session.resources().len();

    assert_eq!(session.remove_component("root/greeting"), EditOutcome::Applied);
    assert!(session.tree()[0].children.is_empty());
    assert_eq!(session.resources().len(), before);
    assert!(find_resource(session.resources(), "g-text").is_some());
}

#[test]
fn test_selection_follows_tree() {
    let mut session = open();
    assert!(session.select("greeting"));
    assert!(!session.select("nobody"));
    assert_eq!(session.selected().unwrap().id, "greeting");

    session.remove_component("root/greeting");
    assert!(session.selected().is_none());
}

#[test]
fn test_refused_edits_are_diagnosed() {
    let mut session = open();
    let outcome = session
        .add_component(ComponentKind::Text, None, "root/greeting", Placement::AsChild)
        .unwrap();

    assert_eq!(outcome, EditOutcome::NotAContainer);
    assert_eq!(session.version(), 0);
    assert_eq!(session.diagnostics().by_rule("not-a-container").count(), 1);
    assert_eq!(session.tree()[0].children.len(), 1);
}

#[test]
fn test_updates_keep_kind_and_container_rules() {
    let mut session = open();
    let extra = session.tree()[0].children[0].clone();

    let outcome = session.update_component("root/greeting", |text| text.kind = ComponentKind::Layout);
    assert_eq!(outcome, EditOutcome::NotAContainer);
    assert_eq!(session.tree()[0].children[0].kind, ComponentKind::Text);

    let outcome = session.update_component("root/greeting", |text| {
        text.set_text_content("changed");
        text.children.push(extra);
    });
    assert_eq!(outcome, EditOutcome::NotAContainer);
    assert!(session.tree()[0].children[0].children.is_empty());
    assert_eq!(session.tree()[0].children[0].text_content(), "@resources/g-text");

    assert_eq!(session.version(), 0);
    assert_eq!(session.diagnostics().by_rule("not-a-container").count(), 2);
}

#[test]
fn test_saving_unchanged_layout_keeps_markup() {
    let html = r#"<div id="root" data-component-type="layout" style="background-image: @resources/bi; background-color: @resources/bc;"><p id="a" data-component-type="text" style="background-color: @resources/a-bg;">A</p><span>caption</span><p id="b" data-component-type="text" style="background-color: @resources/b-bg;">B</p><img src="logo.png"></div>"#;
    let mut layout = Layout::new_html("Mixed", &mut IdGenerator::sequential("mixed")).unwrap();
    layout.set_html(html.to_string());

    let session = EditSession::open(layout, IdGenerator::sequential("mixed")).unwrap();
    assert_eq!(session.to_layout().html().unwrap(), html);
}

#[test]
fn test_alignment_and_tag_change() {
    let mut session = open();
    session.update_component("root", |root| apply_alignment(root, Alignment::C));
    assert_eq!(
        session.tree()[0].style_value("justify-content"),
        Some("center".to_string())
    );

    let heading = session.tree()[0].children[0].with_tag("h2");
    assert_eq!(
        session.apply(TreeMutation::Replace {
            component: heading,
            target: "root/greeting".to_string(),
        }),
        EditOutcome::Applied
    );
    assert_eq!(session.tree()[0].children[0].tag_name(), "h2");
}

#[test]
fn test_preview_resolves_resources() {
    let mut session = open();
    session.set_resource_data("g-text", "Hello visitors");

    let document = session.preview(&PreviewOptions {
        cdn_base_path: "https://cdn.example.com".to_string(),
        title: "Lobby".to_string(),
    });

    assert!(document.contains("Hello visitors"));
    assert!(document.contains("background-color: rgb(51, 102, 153);"));
    assert!(document.contains("https://cdn.example.com/fonts/stylesheet.css"));
}

#[test]
fn test_android_layout_cannot_be_opened() {
    let layout =
        Layout::from_json(r#"{ "name": "Old", "layoutType": "ANDROID", "data": {} }"#).unwrap();
    assert!(EditSession::open(layout, IdGenerator::random()).is_err());
}
