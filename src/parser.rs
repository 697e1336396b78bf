//! Facade: split a description into labeled clauses and drive the extractor
//! once per clause, assembling the final tree.

use crate::clause::split_clauses;
use crate::extract::extract;
use crate::schema::jepson;
use crate::schema::{SchemaError, Vocabulary};
use crate::tree::FeatureTree;
use crate::value::Value;

/// Name of the synthetic root node.
pub const ROOT: &str = "description";
/// Bucket for unlabeled text preceding the first recognized clause.
pub const UNLABELED: &str = "unlabeled";
/// Bucket for `Word:` clauses whose label is not in the vocabulary. Kept so
/// downstream consumers can detect schema drift in new description sources.
pub const UNRECOGNIZED: &str = "unrecognized";

/// Parses whole taxon descriptions against a fixed label vocabulary.
///
/// The vocabulary is immutable once the parser is built; one parser can be
/// shared freely across threads and calls.
#[derive(Debug, Clone)]
pub struct DescriptionParser {
    vocabulary: Vocabulary,
}

impl DescriptionParser {
    /// Parser over the built-in Jepson vocabulary.
    pub fn new() -> Result<Self, SchemaError> {
        Ok(DescriptionParser {
            vocabulary: jepson::default_vocabulary()?,
        })
    }

    pub fn with_vocabulary(vocabulary: Vocabulary) -> Self {
        DescriptionParser { vocabulary }
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// Parse one description into a feature tree. Total over input text:
    /// malformed prose only ever produces a sparser tree, never an error.
    /// Identical input always produces a structurally identical tree.
    pub fn parse(&self, description: &str) -> FeatureTree {
        let mut tree = FeatureTree::new(ROOT, description);
        let root = tree.root();
        let split = split_clauses(description);

        if let Some(text) = split.leading {
            let bucket = tree.add_child(root, UNLABELED, text, None);
            tree.add_child(
                bucket,
                "text",
                text,
                Some(Value::Text {
                    raw: text.to_string(),
                }),
            );
        }

        let mut unrecognized = None;
        for clause in &split.clauses {
            match self.vocabulary.section(clause.label) {
                Some(schema) => {
                    extract(schema, clause.text, &mut tree, root);
                }
                None => {
                    let bucket = *unrecognized
                        .get_or_insert_with(|| tree.add_child(root, UNRECOGNIZED, "", None));
                    tree.add_child(
                        bucket,
                        &bucket_field_name(clause.label),
                        clause.raw,
                        Some(Value::Text {
                            raw: clause.raw.to_string(),
                        }),
                    );
                }
            }
        }

        tree
    }
}

/// "Flowering Time" reads as the node name "flowering_time".
fn bucket_field_name(label: &str) -> String {
    label.to_ascii_lowercase().replace(' ', "_")
}
