//! Document model hosting the widgets
//!
//! A small element tree with the structural hooks the widgets rely on:
//! classes, attributes, text, `hidden`/display toggles and canvas nodes
//! backed by a [`DisplayList`]. Structural mutations (append, remove)
//! bump a generation counter published on a `watch` channel, which is
//! how widgets notice that their root has left the document.
//!
//! ```text
//!   body
//!    └── div.tzc-wrap[data-tzc]          widget root
//!         └── div.tzc-clock[data-kind][data-tz]
//!              ├── div.tzc-label
//!              ├── canvas.tzc-canvas     (analog)
//!              │   or div.tzc-digital > div.tzc-time + div.tzc-date
//!              └── div.tzc-tz
//! ```

use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::watch;
use tzclock_render::DisplayList;

/// Document shared between the bootstrapper, widgets and their watchers
pub type SharedDocument = Arc<RwLock<Document>>;

/// Canvas size used when a canvas carries no (valid) width/height
const DEFAULT_CANVAS_WIDTH: u32 = 300;
const DEFAULT_CANVAS_HEIGHT: u32 = 150;

/// Handle to an element in a [`Document`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

/// Simple element matcher: tag, class and attribute presence, all optional
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selector<'a> {
    pub tag: Option<&'a str>,
    pub class: Option<&'a str>,
    pub attr: Option<&'a str>,
}

impl<'a> Selector<'a> {
    pub fn class(class: &'a str) -> Self {
        Self {
            class: Some(class),
            ..Default::default()
        }
    }

    pub fn tag(tag: &'a str) -> Self {
        Self {
            tag: Some(tag),
            ..Default::default()
        }
    }

    pub fn with_attr(mut self, attr: &'a str) -> Self {
        self.attr = Some(attr);
        self
    }

    fn matches(&self, node: &Node) -> bool {
        self.tag.is_none_or(|t| node.tag.eq_ignore_ascii_case(t))
            && self.class.is_none_or(|c| node.classes.iter().any(|k| k == c))
            && self.attr.is_none_or(|a| node.attrs.contains_key(a))
    }
}

#[derive(Debug, Clone)]
struct Node {
    tag: String,
    classes: Vec<String>,
    attrs: BTreeMap<String, String>,
    text: String,
    hidden: bool,
    displayed: bool,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    canvas: Option<DisplayList>,
}

impl Node {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            classes: Vec::new(),
            attrs: BTreeMap::new(),
            text: String::new(),
            hidden: false,
            displayed: true,
            parent: None,
            children: Vec::new(),
            canvas: None,
        }
    }

    fn dimension(&self, name: &str, default: u32) -> f64 {
        self.attrs
            .get(name)
            .and_then(|v| v.trim().parse::<u32>().ok())
            .unwrap_or(default) as f64
    }
}

/// In-memory page
pub struct Document {
    nodes: Vec<Node>,
    body: NodeId,
    /// Generation counter bumped on every structural mutation
    mutations: watch::Sender<u64>,
    /// Whether structural content is complete
    ready: watch::Sender<bool>,
}

impl Document {
    /// Create an empty document that is still loading
    pub fn new() -> Self {
        let (mutations, _) = watch::channel(0);
        let (ready, _) = watch::channel(false);
        Self {
            nodes: vec![Node::new("body")],
            body: NodeId(0),
            mutations,
            ready,
        }
    }

    /// Wrap into the shared handle used by widgets
    pub fn into_shared(self) -> SharedDocument {
        Arc::new(RwLock::new(self))
    }

    pub fn body(&self) -> NodeId {
        self.body
    }

    // ------------------------------------------------------------------
    // Readiness
    // ------------------------------------------------------------------

    pub fn is_ready(&self) -> bool {
        *self.ready.borrow()
    }

    /// Declare structural content complete; idempotent
    pub fn mark_ready(&mut self) {
        self.ready.send_if_modified(|ready| !std::mem::replace(ready, true));
    }

    pub fn subscribe_ready(&self) -> watch::Receiver<bool> {
        self.ready.subscribe()
    }

    /// Receiver that changes on every structural mutation
    pub fn subscribe_mutations(&self) -> watch::Receiver<u64> {
        self.mutations.subscribe()
    }

    /// Number of structural mutations so far
    pub fn generation(&self) -> u64 {
        *self.mutations.borrow()
    }

    // ------------------------------------------------------------------
    // Structure
    // ------------------------------------------------------------------

    /// Create a detached element
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.nodes.push(Node::new(tag));
        NodeId(self.nodes.len() - 1)
    }

    /// Move `child` under `parent` as its last child
    ///
    /// Appending a node under itself or one of its descendants is ignored.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if self.is_inclusive_ancestor(child, parent) {
            log::warn!("Refusing to append {:?} under its own subtree", child);
            return;
        }
        self.unlink(child);
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
        self.notify_structure();
    }

    /// Detach `node` (and its subtree) from its parent
    pub fn remove(&mut self, node: NodeId) {
        if self.unlink(node) {
            self.notify_structure();
        }
    }

    /// Whether `node` is reachable from the body
    pub fn is_connected(&self, node: NodeId) -> bool {
        self.is_inclusive_ancestor(self.body, node)
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes[node.0].parent
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        &self.nodes[node.0].children
    }

    fn unlink(&mut self, node: NodeId) -> bool {
        let Some(parent) = self.nodes[node.0].parent.take() else {
            return false;
        };
        self.nodes[parent.0].children.retain(|c| *c != node);
        true
    }

    fn is_inclusive_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.nodes[id.0].parent;
        }
        false
    }

    fn notify_structure(&mut self) {
        self.mutations.send_modify(|generation| *generation += 1);
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// First descendant of `scope` matching `selector`, in document order
    pub fn query(&self, scope: NodeId, selector: &Selector<'_>) -> Option<NodeId> {
        let mut stack: Vec<NodeId> = self.nodes[scope.0].children.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            if selector.matches(&self.nodes[id.0]) {
                return Some(id);
            }
            stack.extend(self.nodes[id.0].children.iter().rev().copied());
        }
        None
    }

    /// All descendants of `scope` matching `selector`, in document order
    pub fn query_all(&self, scope: NodeId, selector: &Selector<'_>) -> Vec<NodeId> {
        let mut found = Vec::new();
        let mut stack: Vec<NodeId> = self.nodes[scope.0].children.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            if selector.matches(&self.nodes[id.0]) {
                found.push(id);
            }
            stack.extend(self.nodes[id.0].children.iter().rev().copied());
        }
        found
    }

    // ------------------------------------------------------------------
    // Element state
    // ------------------------------------------------------------------

    pub fn tag(&self, node: NodeId) -> &str {
        &self.nodes[node.0].tag
    }

    pub fn add_class(&mut self, node: NodeId, class: &str) {
        let classes = &mut self.nodes[node.0].classes;
        for name in class.split_whitespace() {
            if !classes.iter().any(|c| c == name) {
                classes.push(name.to_string());
            }
        }
    }

    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.nodes[node.0].classes.iter().any(|c| c == class)
    }

    /// Set an attribute; changing a canvas size resets its surface
    pub fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) {
        let entry = &mut self.nodes[node.0];
        if name == "width" || name == "height" {
            entry.canvas = None;
        }
        entry.attrs.insert(name.to_string(), value.to_string());
    }

    pub fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        self.nodes[node.0].attrs.get(name).map(String::as_str)
    }

    pub fn set_text(&mut self, node: NodeId, text: &str) {
        let entry = &mut self.nodes[node.0];
        if entry.text != text {
            entry.text.clear();
            entry.text.push_str(text);
        }
    }

    pub fn text(&self, node: NodeId) -> &str {
        &self.nodes[node.0].text
    }

    /// The `hidden` flag
    pub fn set_hidden(&mut self, node: NodeId, hidden: bool) {
        self.nodes[node.0].hidden = hidden;
    }

    pub fn is_hidden(&self, node: NodeId) -> bool {
        self.nodes[node.0].hidden
    }

    /// Display toggle (`display: none` when false)
    pub fn set_displayed(&mut self, node: NodeId, displayed: bool) {
        self.nodes[node.0].displayed = displayed;
    }

    pub fn is_displayed(&self, node: NodeId) -> bool {
        self.nodes[node.0].displayed
    }

    // ------------------------------------------------------------------
    // Canvas
    // ------------------------------------------------------------------

    /// Drawing surface of a canvas element, created on first use
    pub fn canvas_mut(&mut self, node: NodeId) -> Option<&mut DisplayList> {
        let entry = &mut self.nodes[node.0];
        if entry.tag != tzclock_core::markup::CANVAS_TAG {
            return None;
        }
        if entry.canvas.is_none() {
            let width = entry.dimension("width", DEFAULT_CANVAS_WIDTH);
            let height = entry.dimension("height", DEFAULT_CANVAS_HEIGHT);
            entry.canvas = Some(DisplayList::new(width, height));
        }
        entry.canvas.as_mut()
    }

    /// Drawing surface of a canvas element, if anything was drawn yet
    pub fn canvas(&self, node: NodeId) -> Option<&DisplayList> {
        self.nodes[node.0].canvas.as_ref()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
