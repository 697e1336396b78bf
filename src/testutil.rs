//! Shared helpers for unit tests.

use crate::parser::DescriptionParser;
use crate::tree::{FeatureTree, NodeId};

/// Parse a description with the default Jepson vocabulary.
pub fn parse(description: &str) -> FeatureTree {
    DescriptionParser::new().unwrap().parse(description)
}

/// Names of the direct children of `id`, in document order.
pub fn child_names(tree: &FeatureTree, id: NodeId) -> Vec<String> {
    tree.children(id)
        .iter()
        .map(|&child| tree.node(child).name.clone())
        .collect()
}

/// The single node named `name`; panics unless exactly one exists.
pub fn find_one(tree: &FeatureTree, name: &str) -> NodeId {
    let found = tree.find(name);
    assert_eq!(
        found.len(),
        1,
        "expected exactly one `{name}` node, found {}",
        found.len()
    );
    found[0]
}
