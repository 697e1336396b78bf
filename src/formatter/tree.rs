use std::io::Write;

use crate::formatter::Formatter;
use crate::runner::ParsedFile;
use crate::tree::{FeatureTree, NodeId};

/// Indented tree view, one block per file. The default format.
pub struct TreeFormatter;

impl Formatter for TreeFormatter {
    fn format_to(&self, files: &[ParsedFile], out: &mut dyn Write) {
        for (i, file) in files.iter().enumerate() {
            if i > 0 {
                let _ = writeln!(out);
            }
            let _ = writeln!(out, "{}", file.path.display());
            for &child in file.tree.children(file.tree.root()) {
                write_node(&file.tree, child, 1, out);
            }
        }
    }
}

fn write_node(tree: &FeatureTree, id: NodeId, depth: usize, out: &mut dyn Write) {
    let node = tree.node(id);
    let indent = "  ".repeat(depth);
    match &node.value {
        Some(value) => {
            let _ = writeln!(out, "{indent}{}: {value}", node.name);
        }
        None => {
            let _ = writeln!(out, "{indent}{}", node.name);
        }
    }
    for &child in tree.children(id) {
        write_node(tree, child, depth + 1, out);
    }
}
