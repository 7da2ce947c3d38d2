//! XML-like markup serialization
//!
//! Walks a tree of [`Node`]s and emits nested tags with no prolog, no
//! indentation and no attributes.
//!
//! ## Rules
//!
//! - Map entry holding a map → `<key>...</key>` around the nested entries
//! - Map entry holding a list → one `<key>...</key>` per element, side by side
//! - Map entry holding text → `<key>text</key>`
//!
//! Keys and text are written verbatim. Nothing is escaped, so keys must
//! already be valid tag names and text must not contain markup characters.
//!
//! Maps are shared handles, so a map can end up inside itself. Such trees are
//! rejected with [`SerializeError::CyclicStructure`] instead of recursing
//! forever.

use crate::domain::model::Person;
use crate::utils::error::{Result, SerializeError};
use serde_json::Value;
use std::cell::RefCell;
use std::rc::Rc;

type Entries = Vec<(String, Node)>;

/// Ordered string-keyed entries behind a shared handle.
#[derive(Debug, Clone, Default)]
pub struct Map(Rc<RefCell<Entries>>);

impl Map {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry, or replaces the value of an existing key in place.
    pub fn insert(&self, key: impl Into<String>, value: Node) {
        let key = key.into();
        let mut entries = self.0.borrow_mut();
        match entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => *slot = value,
            None => entries.push((key, value)),
        }
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    /// Drops all entries. Breaks reference cycles built through this map.
    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }

    fn id(&self) -> *const RefCell<Entries> {
        Rc::as_ptr(&self.0)
    }
}

impl<K: Into<String>> FromIterator<(K, Node)> for Map {
    fn from_iter<I: IntoIterator<Item = (K, Node)>>(iter: I) -> Self {
        let map = Map::new();
        for (key, value) in iter {
            map.insert(key, value);
        }
        map
    }
}

#[derive(Debug, Clone)]
pub enum Node {
    Text(String),
    List(Vec<Node>),
    Map(Map),
}

impl Node {
    /// Converts a JSON value. Numbers, booleans and null have no markup
    /// form and come back as `None`; object entries holding them are dropped.
    pub fn from_json(value: &Value) -> Option<Node> {
        match value {
            Value::String(text) => Some(Node::Text(text.clone())),
            Value::Array(items) => Some(Node::List(
                items.iter().filter_map(Node::from_json).collect(),
            )),
            Value::Object(object) => Some(Node::Map(
                object
                    .iter()
                    .filter_map(|(key, value)| {
                        Node::from_json(value).map(|node| (key.clone(), node))
                    })
                    .collect(),
            )),
            Value::Null | Value::Bool(_) | Value::Number(_) => None,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            Node::Text(_) => "text",
            Node::List(_) => "list",
            Node::Map(_) => "map",
        }
    }
}

impl From<&str> for Node {
    fn from(text: &str) -> Self {
        Node::Text(text.to_string())
    }
}

impl From<Map> for Node {
    fn from(map: Map) -> Self {
        Node::Map(map)
    }
}

struct MarkupSerializer {
    output: String,
    /// Maps currently being written, outermost first.
    ancestors: Vec<*const RefCell<Entries>>,
}

impl MarkupSerializer {
    fn open_tag(&mut self, tag: &str) {
        self.output.push('<');
        self.output.push_str(tag);
        self.output.push('>');
    }

    fn close_tag(&mut self, tag: &str) {
        self.output.push_str("</");
        self.output.push_str(tag);
        self.output.push('>');
    }

    fn write_map(&mut self, map: &Map, tag: &str) -> std::result::Result<(), SerializeError> {
        if self.ancestors.contains(&map.id()) {
            return Err(SerializeError::CyclicStructure(tag.to_string()));
        }
        self.ancestors.push(map.id());

        let entries = map.0.borrow();
        for (key, value) in entries.iter() {
            match value {
                Node::List(items) => {
                    for item in items {
                        let Node::Map(child) = item else {
                            return Err(SerializeError::NotPlainStructure(format!(
                                "element of <{}> is a {}",
                                key,
                                item.kind()
                            )));
                        };
                        self.open_tag(key);
                        self.write_map(child, key)?;
                        self.close_tag(key);
                    }
                }
                Node::Map(child) => {
                    self.open_tag(key);
                    self.write_map(child, key)?;
                    self.close_tag(key);
                }
                Node::Text(text) => {
                    self.open_tag(key);
                    self.output.push_str(text);
                    self.close_tag(key);
                }
            }
        }

        self.ancestors.pop();
        Ok(())
    }
}

/// Serializes the entries of a map node into sibling tags.
pub fn serialize(node: &Node) -> std::result::Result<String, SerializeError> {
    let Node::Map(map) = node else {
        return Err(SerializeError::NotPlainStructure(format!(
            "expected a map at the root, found a {}",
            node.kind()
        )));
    };

    let mut serializer = MarkupSerializer {
        output: String::new(),
        ancestors: Vec::new(),
    };
    serializer.write_map(map, "")?;
    Ok(serializer.output)
}

/// Renders people as `<root><item>...</item>...</root>`.
pub fn render_document(people: &[Person], root_tag: &str, item_tag: &str) -> Result<String> {
    let value = serde_json::to_value(people)?;
    let items = Node::from_json(&value).ok_or_else(|| {
        SerializeError::NotPlainStructure("people did not serialize to a list".to_string())
    })?;

    let body = Map::new();
    body.insert(item_tag, items);
    let inner = serialize(&Node::Map(body))?;

    Ok(format!("<{root_tag}>{inner}</{root_tag}>"))
}
