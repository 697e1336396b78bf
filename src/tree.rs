//! Arena-backed feature tree.
//!
//! The tree owns every node in a flat `Vec`; `NodeId` handles index into it.
//! Children are owned top-down, the parent link is a non-owning back-reference
//! used only for upward traversal (building dotted paths, debugging).

use serde_json::Value as Json;

use crate::value::Value;

/// Handle to a node inside a [`FeatureTree`]. Only meaningful for the tree
/// that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug, Clone)]
pub struct FeatureNode {
    /// Field or section identifier, e.g. "stem", "prickles".
    pub name: String,
    /// Exact text span the node was extracted from (provenance only; not
    /// part of the serialized export).
    pub raw_text: String,
    /// Parsed value; `None` for purely structural nodes.
    pub value: Option<Value>,
    children: Vec<NodeId>,
    parent: Option<NodeId>,
}

#[derive(Debug, Clone)]
pub struct FeatureTree {
    nodes: Vec<FeatureNode>,
    root: NodeId,
}

impl FeatureTree {
    pub fn new(root_name: &str, raw_text: &str) -> Self {
        let root = FeatureNode {
            name: root_name.to_string(),
            raw_text: raw_text.to_string(),
            value: None,
            children: Vec::new(),
            parent: None,
        };
        FeatureTree {
            nodes: vec![root],
            root: NodeId(0),
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> &FeatureNode {
        &self.nodes[id.0]
    }

    /// Append a node under `parent`. Children keep insertion order, which the
    /// extractor uses to preserve document order.
    pub fn add_child(
        &mut self,
        parent: NodeId,
        name: &str,
        raw_text: &str,
        value: Option<Value>,
    ) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(FeatureNode {
            name: name.to_string(),
            raw_text: raw_text.to_string(),
            value,
            children: Vec::new(),
            parent: Some(parent),
        });
        self.nodes[parent.0].children.push(id);
        id
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    /// Total node count, root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Drop `id` and every node added after it. Only valid while `id` is the
    /// most recently attached child of its parent and its subtree forms the
    /// tail of the arena; the extractor uses this to discard structural nodes
    /// that ended up with no children.
    pub(crate) fn truncate(&mut self, id: NodeId) {
        if let Some(parent) = self.nodes[id.0].parent {
            let children = &mut self.nodes[parent.0].children;
            if children.last() == Some(&id) {
                children.pop();
            }
        }
        self.nodes.truncate(id.0);
    }

    /// All node ids in depth-first pre-order starting at the root.
    pub fn preorder(&self) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.nodes.len());
        self.collect_preorder(self.root, &mut order);
        order
    }

    fn collect_preorder(&self, id: NodeId, out: &mut Vec<NodeId>) {
        out.push(id);
        for &child in self.children(id) {
            self.collect_preorder(child, out);
        }
    }

    /// All nodes with the given name, case-insensitively, in document order.
    pub fn find(&self, name: &str) -> Vec<NodeId> {
        self.preorder()
            .into_iter()
            .filter(|&id| self.node(id).name.eq_ignore_ascii_case(name))
            .collect()
    }

    /// Dotted path from the root (exclusive) down to `id`, e.g.
    /// "stem.prickles.length". Walks the parent back-references.
    pub fn path(&self, id: NodeId) -> String {
        let mut parts = Vec::new();
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            if current == self.root {
                break;
            }
            parts.push(self.node(current).name.as_str());
            cursor = self.parent(current);
        }
        parts.reverse();
        parts.join(".")
    }

    /// Export the tree as the nested `{name, value, children}` mapping.
    /// Child order equals document order of extraction.
    pub fn to_json(&self) -> Json {
        self.node_json(self.root)
    }

    fn node_json(&self, id: NodeId) -> Json {
        let node = self.node(id);
        let value = match &node.value {
            // Safe to unwrap: Value always serializes successfully
            Some(v) => serde_json::to_value(v).unwrap(),
            None => Json::Null,
        };
        let children: Vec<Json> = self
            .children(id)
            .iter()
            .map(|&child| self.node_json(child))
            .collect();
        serde_json::json!({
            "name": node.name,
            "value": value,
            "children": children,
        })
    }
}
