//! HTML tree for modeling the injected script.
//!
//! Documents are parsed with html5ever, so the tree matches what a browser
//! builds from the same markup (implied end tags, foster parenting, the
//! implicit `html`/`head`/`body` wrappers). The result is flattened into an
//! arena that answers the queries the navigation script makes
//! (`getElementById`, `closest`, `textContent`, attribute and class checks).

use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData as DomData, RcDom};

pub type NodeId = usize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub tag: String,
    pub attrs: Vec<(String, String)>,
}

impl Element {
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn id(&self) -> Option<&str> {
        self.attr("id")
    }

    /// `.class` selector semantics: whole whitespace-separated token.
    pub fn has_class(&self, class: &str) -> bool {
        self.attr("class")
            .is_some_and(|classes| classes.split_ascii_whitespace().any(|c| c == class))
    }

    pub fn is_heading(&self) -> bool {
        matches!(self.tag.as_str(), "h1" | "h2" | "h3")
    }
}

#[derive(Debug, Clone)]
pub enum NodeData {
    Document,
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone)]
pub struct Node {
    pub data: NodeData,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
}

/// Parsed document. Nodes are stored in creation order, which is document
/// (pre-)order.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Node>,
}

impl Document {
    pub const ROOT: NodeId = 0;

    /// Parse like a browser would. Never fails; comments and doctypes are
    /// dropped.
    pub fn parse(html: &str) -> Self {
        let dom = parse_document(RcDom::default(), Default::default()).one(html);

        let mut doc = Document {
            nodes: vec![Node {
                data: NodeData::Document,
                parent: None,
                children: Vec::new(),
            }],
        };

        // Explicit stack keeps deeply nested pages off the call stack.
        let mut pending: Vec<(NodeId, Handle)> = dom
            .document
            .children
            .borrow()
            .iter()
            .rev()
            .map(|child| (Document::ROOT, child.clone()))
            .collect();

        while let Some((parent, handle)) = pending.pop() {
            match &handle.data {
                DomData::Element { name, attrs, .. } => {
                    let element = Element {
                        tag: String::from(&*name.local),
                        attrs: attrs
                            .borrow()
                            .iter()
                            .map(|attr| (attr.name.local.to_string(), String::from(&*attr.value)))
                            .collect(),
                    };
                    let id = doc.append(parent, NodeData::Element(element));
                    pending.extend(handle.children.borrow().iter().rev().map(|child| (id, child.clone())));
                }
                DomData::Text { contents } => doc.append_text(parent, &contents.borrow()),
                _ => {}
            }
        }

        doc
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn element(&self, id: NodeId) -> Option<&Element> {
        match self.nodes.get(id).map(|n| &n.data) {
            Some(NodeData::Element(el)) => Some(el),
            _ => None,
        }
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id).and_then(|n| n.parent)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes.get(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// All elements in document order.
    pub fn elements(&self) -> impl Iterator<Item = (NodeId, &Element)> + '_ {
        self.nodes.iter().enumerate().filter_map(|(id, node)| match &node.data {
            NodeData::Element(el) => Some((id, el)),
            _ => None,
        })
    }

    /// Descendants of `id` in document order, excluding `id` itself.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(id).iter().rev().copied().collect();
        while let Some(next) = stack.pop() {
            out.push(next);
            stack.extend(self.children(next).iter().rev().copied());
        }
        out
    }

    pub fn find_element(&self, pred: impl Fn(&Element) -> bool) -> Option<NodeId> {
        self.elements().find(|(_, el)| pred(el)).map(|(id, _)| id)
    }

    pub fn first_by_tag(&self, tag: &str) -> Option<NodeId> {
        self.find_element(|el| el.tag == tag)
    }

    /// `getElementById` semantics: case-sensitive, and the empty id never matches.
    pub fn element_by_id(&self, id: &str) -> Option<NodeId> {
        if id.is_empty() {
            return None;
        }
        self.find_element(|el| el.id() == Some(id))
    }

    /// Nearest inclusive ancestor with the given tag name.
    pub fn closest(&self, from: NodeId, tag: &str) -> Option<NodeId> {
        let mut current = Some(from);
        while let Some(id) = current {
            if self.element(id).is_some_and(|el| el.tag == tag) {
                return Some(id);
            }
            current = self.parent(id);
        }
        None
    }

    pub fn text_content(&self, id: NodeId) -> String {
        let mut text = String::new();
        if let Some(NodeData::Text(t)) = self.nodes.get(id).map(|n| &n.data) {
            text.push_str(t);
        }
        for desc in self.descendants(id) {
            if let Some(NodeData::Text(t)) = self.nodes.get(desc).map(|n| &n.data) {
                text.push_str(t);
            }
        }
        text
    }

    fn append(&mut self, parent: NodeId, data: NodeData) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(Node {
            data,
            parent: Some(parent),
            children: Vec::new(),
        });
        self.nodes[parent].children.push(id);
        id
    }

    fn append_text(&mut self, parent: NodeId, text: &str) {
        if text.is_empty() {
            return;
        }
        if let Some(&last) = self.nodes[parent].children.last() {
            if let NodeData::Text(existing) = &mut self.nodes[last].data {
                existing.push_str(text);
                return;
            }
        }
        self.append(parent, NodeData::Text(text.to_string()));
    }
}
