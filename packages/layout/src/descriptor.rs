use exhibit_markup::{Element, StyleMap};
use serde::{Deserialize, Serialize};

use crate::catalog::ComponentKind;
use crate::resources::{element_resource_ids, reference_in};

/// One node of the editable layout tree.
///
/// `element` holds the component's own markup: its attributes and the content
/// that is not itself a component (text, the `<video>` of a video, the inner
/// image of an image button, foreign markup). Child components live in
/// `children` and are put back among the own content at their `slot` when the
/// tree is serialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentDescriptor {
    pub id: String,
    pub kind: ComponentKind,
    pub name: Option<String>,
    /// Slash-joined ids from the root down to this node
    pub path: String,
    pub children: Vec<ComponentDescriptor>,
    pub element: Element,
    /// How many of the parent's own content nodes precede this component in
    /// the markup. `None` puts it after all of them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slot: Option<usize>,
}

impl ComponentDescriptor {
    pub fn is_container(&self) -> bool {
        self.kind.is_container()
    }

    pub fn tag_name(&self) -> &str {
        &self.element.tag_name
    }

    pub fn style(&self) -> StyleMap {
        self.element.style()
    }

    pub fn style_value(&self, key: &str) -> Option<String> {
        self.element.style().get(key).map(str::to_string)
    }

    /// Set one inline style property. `None` or an empty value removes it.
    pub fn set_style_property(&mut self, key: &str, value: Option<&str>) {
        let mut styles = self.element.style();
        match value.filter(|value| !value.is_empty()) {
            Some(value) => styles.set(key, value),
            None => {
                styles.remove(key);
            }
        }
        self.element.set_style(&styles);
    }

    /// Set an attribute. An empty value removes it.
    pub fn set_attribute(&mut self, name: &str, value: &str) {
        if value.is_empty() {
            self.element.remove_attribute(name);
        } else {
            self.element.set_attribute(name, value);
        }
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.element.attribute(name)
    }

    pub fn set_name(&mut self, name: &str) {
        self.element.set_attribute("name", name);
        self.name = Some(name.to_string()).filter(|name| !name.is_empty());
    }

    pub fn text_content(&self) -> String {
        self.element.text_content()
    }

    pub fn set_text_content(&mut self, content: &str) {
        self.element.set_text_content(content);
    }

    /// The `@resources/<id>` reference in the text content, if any
    pub fn text_resource_path(&self) -> Option<String> {
        reference_in(&self.text_content())
    }

    /// Ids referenced by this component's own markup (children excluded)
    pub fn resource_ids(&self) -> Vec<String> {
        element_resource_ids(&self.element)
    }

    /// Copy of this descriptor rendered with another tag, keeping attributes
    /// and content. Applied to the tree with a replace.
    pub fn with_tag(&self, tag_name: &str) -> Self {
        let mut element = Element::new(tag_name);
        element.attributes = self.element.attributes.clone();
        element.children = self.element.children.clone();
        Self {
            element,
            ..self.clone()
        }
    }
}
