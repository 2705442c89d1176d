//! A small HTML fragment grammar and an editable document tree
//!
//! Supported: elements with matching closing tags, the standard void elements, quoted
//! attributes, text, and the five XML entities. Comments, doctypes, raw-text elements
//! and unquoted attribute values are not recognized.
//!
//! Parsing produces owned [`Node`] trees; [`Document`] stores them in an arena where every
//! node knows its parent, so a node can later be swapped out in place.

use crate::error::{Fail, Failure};
use crate::prelude::*;
use crate::text::{any_char_of, is_char, is_string, one, span};
use crate::{many, some};
use std::borrow::Cow;
use thiserror::Error;

/// Names of elements that never have children or a closing tag
pub const VOID_ELEMENTS: [&str; 14] = [
    "br", "hr", "img", "input", "meta", "link", "base", "area", "col", "embed", "param",
    "source", "track", "wbr",
];

const ENTITIES: [(&str, char); 5] = [
    ("amp", '&'),
    ("lt", '<'),
    ("gt", '>'),
    ("quot", '"'),
    ("apos", '\''),
];

pub fn is_void(name: &str) -> bool {
    VOID_ELEMENTS.contains(&name)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub key: String,
    pub value: String,
}

impl Attribute {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Attribute {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn dump(&self) -> String {
        let mut out = format!("{}=\"", self.key);
        for c in self.value.chars() {
            match c {
                '&' => out.push_str("&amp;"),
                '"' => out.push_str("&quot;"),
                '\'' => out.push_str("&apos;"),
                c => out.push(c),
            }
        }
        out.push('"');
        out
    }
}

/// An owned markup tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element {
        name: String,
        attributes: Vec<Attribute>,
        children: Vec<Node>,
    },
    Void {
        name: String,
        attributes: Vec<Attribute>,
    },
    Text(String),
}

impl Node {
    pub fn element(name: impl Into<String>, attributes: Vec<Attribute>, children: Vec<Node>) -> Self {
        Node::Element {
            name: name.into(),
            attributes,
            children,
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Node::Text(text.into())
    }

    /// Serialize back to markup, escaping text and attribute values
    pub fn dump(&self) -> String {
        match self {
            Node::Element {
                name,
                attributes,
                children,
            } => {
                let inner: String = children.iter().map(Node::dump).collect();
                format!("<{}>{}</{}>", open_tag(name, attributes), inner, name)
            }
            Node::Void { name, attributes } => format!("<{}>", open_tag(name, attributes)),
            Node::Text(text) => escape_text(text),
        }
    }
}

fn open_tag(name: &str, attributes: &[Attribute]) -> String {
    let mut out = name.to_string();
    for attribute in attributes {
        out.push(' ');
        out.push_str(&attribute.dump());
    }
    out
}

fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            c => out.push(c),
        }
    }
    out
}

fn whitespace() -> impl Parser<Output = String, Error = Fail> {
    span(char::is_whitespace)
}

fn name() -> impl Parser<Output = String, Error = Fail> {
    one()
        .filter(|c| c.is_ascii_alphabetic() || *c == '_')
        .and(span(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-')))
        .map(|(first, rest)| format!("{}{}", first, rest))
}

/// `&name;` for one of the known entities
fn entity() -> impl Parser<Output = char, Error = Fail> {
    let named = ENTITIES
        .iter()
        .map(|(name, c)| is_string(format!("{};", name)).to(*c));
    is_char('&').right(choice(named)).attempt()
}

/// A codepoint of text or attribute value; `excluded` must appear as an entity
fn character(excluded: &'static [char]) -> impl Parser<Output = char, Error = Fail> {
    one()
        .filter(move |c| *c != '&' && !excluded.contains(c))
        .or(entity())
}

/// A quoted value; the closing quote must match the opening one
fn attribute_value() -> impl Parser<Output = String, Error = Fail> {
    any_char_of(['"', '\'']).bind(|delimiter| {
        many(character(&['"', '\'']))
            .left(is_char(delimiter))
            .map(|cs| cs.into_iter().collect::<String>())
    })
}

fn attribute() -> impl Parser<Output = Attribute, Error = Fail> {
    name()
        .left(whitespace())
        .left(is_char('='))
        .left(whitespace())
        .and(attribute_value())
        .map(|(key, value)| Attribute { key, value })
}

/// `<name attr="..." ...` up to, not including, the closing `>`
fn open(void: bool) -> impl Parser<Output = (String, Vec<Attribute>), Error = Fail> {
    is_char('<')
        .right(whitespace())
        .right(name().filter(move |name| is_void(name) == void))
        .and(many(whitespace().right(attribute()).attempt()))
        .left(whitespace())
}

fn close(name: String) -> impl Parser<Output = Cow<'static, str>, Error = Fail> {
    is_string("</")
        .right(whitespace())
        .right(is_string(name))
        .left(whitespace())
        .left(is_char('>'))
}

fn element() -> impl Parser<Output = Node, Error = Fail> {
    open(false)
        .left(is_char('>'))
        .bind(|(name, attributes)| {
            many(lazy(node))
                .left(close(name.clone()))
                .map(move |children| Node::Element {
                    name: name.clone(),
                    attributes: attributes.clone(),
                    children,
                })
        })
}

fn void_element() -> impl Parser<Output = Node, Error = Fail> {
    open(true)
        .left(is_char('/').optional())
        .left(whitespace())
        .left(is_char('>'))
        .map(|(name, attributes)| Node::Void { name, attributes })
}

fn text() -> impl Parser<Output = Node, Error = Fail> {
    some(character(&['<', '>'])).map(|cs| Node::Text(cs.into_iter().collect()))
}

fn node() -> BoxedParser<Node> {
    choice([
        element().attempt().boxed(),
        void_element().attempt().boxed(),
        text().boxed(),
    ])
    .boxed()
}

/// Grammar for a sequence of top-level nodes covering the whole input
pub fn parser() -> BoxedParser<Vec<Node>> {
    many(node()).left(eof()).boxed()
}

/// Handle to a node stored in a [`Document`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Element {
        name: String,
        attributes: Vec<Attribute>,
    },
    Void {
        name: String,
        attributes: Vec<Attribute>,
    },
    Text(String),
}

#[derive(Debug, Clone)]
struct Slot {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ReplaceError {
    #[error("node {0:?} does not exist")]
    Unknown(NodeId),
    #[error("cannot replace node {0:?}: it has no parent")]
    Orphan(NodeId),
}

/// An arena of nodes with parent links
///
/// Top-level nodes have no parent. Nodes removed by `replace_with` or
/// `merge_adjacent_text` stay in the arena but are no longer reachable from the roots.
#[derive(Debug, Clone, Default)]
pub struct Document {
    slots: Vec<Slot>,
    roots: Vec<NodeId>,
}

impl Document {
    pub fn new(nodes: Vec<Node>) -> Self {
        let mut document = Document::default();
        let roots = nodes
            .into_iter()
            .map(|node| document.insert(node, None))
            .collect();
        document.roots = roots;
        document
    }

    /// Parse a fragment; the whole input must be consumed
    pub fn parse(input: &str) -> Result<Self, Failure<Fail>> {
        parser()
            .run(input)
            .map(|(nodes, _)| Document::new(nodes))
            .inspect_err(|failure| tracing::debug!(index = failure.index, "invalid HTML fragment"))
    }

    fn insert(&mut self, node: Node, parent: Option<NodeId>) -> NodeId {
        let id = NodeId(self.slots.len());
        let (kind, children) = match node {
            Node::Element {
                name,
                attributes,
                children,
            } => (NodeKind::Element { name, attributes }, children),
            Node::Void { name, attributes } => (NodeKind::Void { name, attributes }, Vec::new()),
            Node::Text(text) => (NodeKind::Text(text), Vec::new()),
        };
        self.slots.push(Slot {
            kind,
            parent,
            children: Vec::new(),
        });

        let child_ids: Vec<NodeId> = children
            .into_iter()
            .map(|child| self.insert(child, Some(id)))
            .collect();
        self.slots[id.0].children = child_ids;
        id
    }

    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn kind(&self, id: NodeId) -> Option<&NodeKind> {
        self.slots.get(id.0).map(|slot| &slot.kind)
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.slots.get(id.0).and_then(|slot| slot.parent)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.slots.get(id.0).map_or(&[][..], |slot| slot.children.as_slice())
    }

    /// Tag name of an element or void element
    pub fn name(&self, id: NodeId) -> Option<&str> {
        match self.kind(id)? {
            NodeKind::Element { name, .. } | NodeKind::Void { name, .. } => Some(name),
            NodeKind::Text(_) => None,
        }
    }

    pub fn attributes(&self, id: NodeId) -> &[Attribute] {
        match self.kind(id) {
            Some(NodeKind::Element { attributes, .. } | NodeKind::Void { attributes, .. }) => {
                attributes
            }
            _ => &[],
        }
    }

    pub fn text(&self, id: NodeId) -> Option<&str> {
        match self.kind(id)? {
            NodeKind::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Rebuild the owned subtree rooted at `id`
    pub fn to_node(&self, id: NodeId) -> Option<Node> {
        let slot = self.slots.get(id.0)?;
        let node = match &slot.kind {
            NodeKind::Element { name, attributes } => Node::Element {
                name: name.clone(),
                attributes: attributes.clone(),
                children: slot
                    .children
                    .iter()
                    .filter_map(|child| self.to_node(*child))
                    .collect(),
            },
            NodeKind::Void { name, attributes } => Node::Void {
                name: name.clone(),
                attributes: attributes.clone(),
            },
            NodeKind::Text(text) => Node::Text(text.clone()),
        };
        Some(node)
    }

    pub fn dump_node(&self, id: NodeId) -> String {
        self.to_node(id).map(|node| node.dump()).unwrap_or_default()
    }

    /// Serialize every top-level node in order
    pub fn dump(&self) -> String {
        self.roots.iter().map(|id| self.dump_node(*id)).collect()
    }

    /// Put `node` where `id` is in its parent's children and return the new node's id
    pub fn replace_with(&mut self, id: NodeId, node: Node) -> Result<NodeId, ReplaceError> {
        let slot = self.slots.get(id.0).ok_or(ReplaceError::Unknown(id))?;
        let parent = slot.parent.ok_or(ReplaceError::Orphan(id))?;
        let position = self.slots[parent.0]
            .children
            .iter()
            .position(|child| *child == id)
            .ok_or(ReplaceError::Orphan(id))?;

        let replacement = self.insert(node, Some(parent));
        self.slots[parent.0].children[position] = replacement;
        self.slots[id.0].parent = None;
        tracing::trace!(old = id.0, new = replacement.0, "replaced node");
        Ok(replacement)
    }

    /// Join runs of neighbouring text nodes, at every level of the tree
    pub fn merge_adjacent_text(&mut self) {
        let roots = std::mem::take(&mut self.roots);
        self.roots = self.merge_siblings(roots);

        for index in 0..self.slots.len() {
            if self.slots[index].children.len() > 1 {
                let children = std::mem::take(&mut self.slots[index].children);
                self.slots[index].children = self.merge_siblings(children);
            }
        }
    }

    fn merge_siblings(&mut self, ids: Vec<NodeId>) -> Vec<NodeId> {
        let mut merged: Vec<NodeId> = Vec::with_capacity(ids.len());
        for id in ids {
            let previous_text = merged.last().and_then(|last| match &self.slots[last.0].kind {
                NodeKind::Text(_) => Some(*last),
                _ => None,
            });

            match (previous_text, self.slots[id.0].kind.clone()) {
                (Some(previous), NodeKind::Text(text)) => {
                    if let NodeKind::Text(existing) = &mut self.slots[previous.0].kind {
                        existing.push_str(&text);
                    }
                    self.slots[id.0].parent = None;
                }
                _ => merged.push(id),
            }
        }
        merged
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SAMPLE: &str = r#"<div><div>Hello</div><img alt="description &amp; care"><p>Wo<b>r</b>ld</p></div>"#;

    #[test]
    fn test_parse_nested_fragment() {
        let document = Document::parse(SAMPLE).unwrap();
        let [root] = document.roots() else {
            panic!("expected one root");
        };
        let [a, b, c] = document.children(*root) else {
            panic!("expected three children");
        };

        assert_eq!(document.name(*a), Some("div"));
        assert_eq!(document.text(document.children(*a)[0]), Some("Hello"));

        assert_eq!(document.name(*b), Some("img"));
        assert!(matches!(document.kind(*b), Some(NodeKind::Void { .. })));
        assert_eq!(
            document.attributes(*b),
            &[Attribute::new("alt", "description & care")]
        );

        assert_eq!(document.name(*c), Some("p"));
        let p_children = document.children(*c);
        assert_eq!(p_children.len(), 3);
        assert_eq!(document.text(p_children[0]), Some("Wo"));
        assert_eq!(document.name(p_children[1]), Some("b"));
        assert_eq!(document.text(document.children(p_children[1])[0]), Some("r"));
        assert_eq!(document.text(p_children[2]), Some("ld"));
    }

    #[test]
    fn test_parent_links() {
        let document = Document::parse(SAMPLE).unwrap();
        let root = document.roots()[0];
        let p = document.children(root)[2];
        let b = document.children(p)[1];

        assert_eq!(document.parent(root), None);
        assert_eq!(document.parent(p), Some(root));
        assert_eq!(document.parent(b), Some(p));
    }

    #[test]
    fn test_dump_round_trip() {
        let document = Document::parse(SAMPLE).unwrap();
        assert_eq!(document.dump(), SAMPLE);
    }

    #[test]
    fn test_attributes_and_whitespace() {
        let document =
            Document::parse(r#"< a href = 'x.html' title="say &quot;hi&quot;" >link</ a >"#)
                .unwrap();
        let a = document.roots()[0];

        assert_eq!(
            document.attributes(a),
            &[
                Attribute::new("href", "x.html"),
                Attribute::new("title", "say \"hi\""),
            ]
        );
        assert_eq!(
            document.dump(),
            r#"<a href="x.html" title="say &quot;hi&quot;">link</a>"#
        );

        let empty = Document::parse(r#"<p a='' b="">t</p>"#).unwrap();
        assert_eq!(
            empty.attributes(empty.roots()[0]),
            &[Attribute::new("a", ""), Attribute::new("b", "")]
        );
    }

    #[test]
    fn test_void_elements() {
        let document = Document::parse("line<br/>next<hr >").unwrap();
        let kinds: Vec<_> = document
            .roots()
            .iter()
            .map(|id| document.name(*id).unwrap_or("#text"))
            .collect();

        assert_eq!(kinds, vec!["#text", "br", "#text", "hr"]);
        assert_eq!(document.dump(), "line<br>next<hr>");
    }

    #[test]
    fn test_empty_element_and_empty_input() {
        let document = Document::parse("<div></div>").unwrap();
        assert!(document.children(document.roots()[0]).is_empty());

        assert!(Document::parse("").unwrap().roots().is_empty());
    }

    #[test]
    fn test_rejects_malformed_markup() {
        assert!(Document::parse("<div>text</span>").is_err());
        assert!(Document::parse("<div>unclosed").is_err());
        assert!(Document::parse("a < b").is_err());
        assert!(Document::parse("fish &chips").is_err());
        assert!(Document::parse("<br></br>").is_err());
        assert!(Document::parse("<1div></1div>").is_err());
        assert!(Document::parse(r#"<a b="'x'>t</a>"#).is_err());
        assert!(Document::parse(r#"<a b='x">t</a>"#).is_err());
        assert!(Document::parse(r#"<a b=x>t</a>"#).is_err());
    }

    #[test]
    fn test_text_entities() {
        let document = Document::parse("a &lt; b &amp;&amp; c &gt; d &apos;").unwrap();
        assert_eq!(document.text(document.roots()[0]), Some("a < b && c > d '"));
        assert_eq!(document.dump(), "a &lt; b &amp;&amp; c &gt; d '");
    }

    #[test]
    fn test_replace_with() {
        let mut document = Document::parse("<p>Wo<b>r</b>ld</p>").unwrap();
        let p = document.roots()[0];
        let b = document.children(p)[1];

        let replacement = document
            .replace_with(b, Node::element("i", vec![], vec![Node::text("R")]))
            .unwrap();

        assert_eq!(document.parent(replacement), Some(p));
        assert_eq!(document.parent(b), None);
        assert_eq!(document.children(p)[1], replacement);
        assert_eq!(document.dump(), "<p>Wo<i>R</i>ld</p>");
    }

    #[test]
    fn test_replace_root_fails() {
        let mut document = Document::parse("<p>x</p>").unwrap();
        let p = document.roots()[0];

        assert_eq!(
            document.replace_with(p, Node::text("y")),
            Err(ReplaceError::Orphan(p))
        );
        assert_eq!(
            document.replace_with(NodeId(99), Node::text("y")),
            Err(ReplaceError::Unknown(NodeId(99)))
        );
    }

    #[test]
    fn test_replace_detached_node_fails() {
        let mut document = Document::parse("<p><b>x</b></p>").unwrap();
        let b = document.children(document.roots()[0])[0];

        document.replace_with(b, Node::text("y")).unwrap();
        assert_eq!(
            document.replace_with(b, Node::text("z")),
            Err(ReplaceError::Orphan(b))
        );
    }

    #[test]
    fn test_merge_adjacent_text() {
        let mut document = Document::new(vec![Node::element(
            "div",
            vec![],
            vec![
                Node::text("H"),
                Node::text("E"),
                Node::element("div", vec![], vec![Node::text("!"), Node::text("#"), Node::text("?")]),
                Node::text("L"),
                Node::text("L"),
                Node::text("O"),
                Node::element("div", vec![], vec![]),
                Node::text("WOR"),
                Node::text("LD"),
            ],
        )]);

        document.merge_adjacent_text();

        let root = document.roots()[0];
        let children = document.children(root);
        assert_eq!(children.len(), 5);
        assert_eq!(document.text(children[0]), Some("HE"));
        assert_eq!(document.text(document.children(children[1])[0]), Some("!#?"));
        assert_eq!(document.text(children[2]), Some("LLO"));
        assert_eq!(document.text(children[4]), Some("WORLD"));
        assert_eq!(
            document.dump(),
            "<div>HE<div>!#?</div>LLO<div></div>WORLD</div>"
        );
    }
}
