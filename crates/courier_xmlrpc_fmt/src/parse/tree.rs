use crate::error::{ErrorKind, Result};
use std::io::Read;
use xml::reader::{EventReader, ParserConfig, XmlEvent};

/// A read-only element of a parsed document.
#[derive(Clone, Debug, PartialEq)]
pub struct Element {
    name: String,
    children: Vec<Node>,
}

#[derive(Clone, Debug, PartialEq)]
enum Node {
    Element(Element),
    Text(String),
}

impl Element {
    /// Parses a complete document and returns its root element.
    pub fn parse<R: Read>(source: R) -> Result<Element> {
        let config = ParserConfig::new()
            .ignore_comments(true)
            .cdata_to_characters(true)
            .whitespace_to_characters(true)
            .coalesce_characters(true);
        build(EventReader::new_with_config(source, config))
    }

    /// The local tag name, e.g. `value`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Iterates over the child elements in document order.
    pub fn children(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match *node {
            Node::Element(ref element) => Some(element),
            Node::Text(_) => None,
        })
    }

    /// The first child element, whatever its name.
    pub fn first_child(&self) -> Option<&Element> {
        self.children().next()
    }

    /// The first child element with the given name.
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.children().find(|element| element.name == name)
    }

    /// Follows a path of child names, returning `None` as soon as a segment is missing.
    pub fn path(&self, names: &[&str]) -> Option<&Element> {
        names
            .iter()
            .try_fold(self, |element, name| element.child(name))
    }

    /// The concatenated text of this element and all its descendants.
    pub fn text(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn drop_indentation(&mut self) {
        if self.first_child().is_some() {
            self.children.retain(|node| match *node {
                Node::Text(ref text) => !text.trim().is_empty(),
                Node::Element(_) => true,
            });
        }
    }

    fn collect_text(&self, out: &mut String) {
        for node in &self.children {
            match *node {
                Node::Element(ref element) => element.collect_text(out),
                Node::Text(ref text) => out.push_str(text),
            }
        }
    }
}

/// Builds the tree from the event stream. Whitespace-only text is dropped from elements that have
/// child elements, where it can only be indentation; all other text is kept verbatim.
fn build<R: Read>(reader: EventReader<R>) -> Result<Element> {
    let mut stack: Vec<Element> = Vec::new();
    let mut root = None;

    for event in reader {
        let event = event.map_err(|e| ErrorKind::MalformedDocument(e.to_string()))?;
        match event {
            XmlEvent::StartElement { name, .. } => stack.push(Element {
                name: name.local_name,
                children: Vec::new(),
            }),
            XmlEvent::EndElement { .. } => {
                let mut element = stack.pop().ok_or_else(|| {
                    ErrorKind::MalformedDocument("unbalanced closing tag".to_owned())
                })?;
                element.drop_indentation();
                match stack.last_mut() {
                    Some(parent) => parent.children.push(Node::Element(element)),
                    None => root = Some(element),
                }
            }
            XmlEvent::Characters(text) => {
                if let Some(parent) = stack.last_mut() {
                    parent.children.push(Node::Text(text));
                }
            }
            _ => {}
        }
    }

    root.ok_or_else(|| ErrorKind::MalformedDocument("no root element found".to_owned()).into())
}
