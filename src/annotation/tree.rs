//! A small owned XML element tree.
//!
//! `roxmltree` documents are read-only, so a parsed annotation is copied into
//! this tree, edited in place and serialized back out. Comments, processing
//! instructions and text interleaved with child elements are not preserved.

use std::fmt::Write as _;

use roxmltree::Node;

/// One XML element with its attributes, text and child elements.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct XmlElement {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub text: Option<String>,
    pub children: Vec<XmlElement>,
}

impl XmlElement {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Copy a `roxmltree` element and its subtree.
    pub fn from_node(node: Node<'_, '_>) -> Self {
        let children: Vec<XmlElement> = node
            .children()
            .filter(|child| child.is_element())
            .map(XmlElement::from_node)
            .collect();

        let text = if children.is_empty() {
            let raw: String = node
                .children()
                .filter(|child| child.is_text())
                .filter_map(|child| child.text())
                .collect();
            let trimmed = raw.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        } else {
            None
        };

        Self {
            name: node.tag_name().name().to_string(),
            attributes: node
                .attributes()
                .map(|attr| (attr.name().to_string(), attr.value().to_string()))
                .collect(),
            text,
            children,
        }
    }

    /// First child element named `tag`.
    pub fn child(&self, tag: &str) -> Option<&XmlElement> {
        self.children.iter().find(|child| child.name == tag)
    }

    /// First child element named `tag`, mutably.
    pub fn child_mut(&mut self, tag: &str) -> Option<&mut XmlElement> {
        self.children.iter_mut().find(|child| child.name == tag)
    }

    /// All child elements named `tag`, in document order.
    pub fn children_named<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a XmlElement> {
        self.children.iter().filter(move |child| child.name == tag)
    }

    /// Trimmed, non-empty text of the first child named `tag`.
    pub fn child_text(&self, tag: &str) -> Option<&str> {
        self.child(tag)
            .and_then(|child| child.text.as_deref())
            .map(str::trim)
            .filter(|text| !text.is_empty())
    }

    /// Set the text of the first child named `tag`, appending the child if absent.
    pub fn set_child_text(&mut self, tag: &str, value: impl ToString) {
        let value = value.to_string();
        match self.child_mut(tag) {
            Some(child) => child.text = Some(value),
            None => {
                let mut child = XmlElement::new(tag);
                child.text = Some(value);
                self.children.push(child);
            }
        }
    }

    /// Serialize as an XML document with a UTF-8 declaration.
    pub fn to_document_string(&self) -> String {
        let mut xml = String::new();
        xml.push_str("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n");
        self.write_into(&mut xml, 0);
        xml
    }

    fn write_into(&self, xml: &mut String, depth: usize) {
        let indent = "  ".repeat(depth);
        let mut open = format!("{indent}<{}", self.name);
        for (key, value) in &self.attributes {
            write!(open, " {}=\"{}\"", key, xml_escape(value)).expect("write to string");
        }

        if self.children.is_empty() {
            match &self.text {
                Some(text) => {
                    writeln!(xml, "{open}>{}</{}>", xml_escape(text), self.name)
                        .expect("write to string");
                }
                None => {
                    writeln!(xml, "{open} />").expect("write to string");
                }
            }
            return;
        }

        writeln!(xml, "{open}>").expect("write to string");
        for child in &self.children {
            child.write_into(xml, depth + 1);
        }
        writeln!(xml, "{indent}</{}>", self.name).expect("write to string");
    }
}

fn xml_escape(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
