use std::io::Write;

use serde::Serialize;

use crate::formatter::Formatter;
use crate::runner::ParsedFile;

pub struct JsonFormatter;

#[derive(Serialize)]
struct JsonOutput {
    metadata: Metadata,
    descriptions: Vec<Description>,
}

#[derive(Serialize)]
struct Metadata {
    files_inspected: usize,
    features_extracted: usize,
}

#[derive(Serialize)]
struct Description {
    path: String,
    features: serde_json::Value,
}

impl Formatter for JsonFormatter {
    fn format_to(&self, files: &[ParsedFile], out: &mut dyn Write) {
        // Every node except the per-file root is an extracted feature
        let features_extracted = files.iter().map(|f| f.tree.len() - 1).sum();

        let output = JsonOutput {
            metadata: Metadata {
                files_inspected: files.len(),
                features_extracted,
            },
            descriptions: files
                .iter()
                .map(|f| Description {
                    path: f.path.display().to_string(),
                    features: f.tree.to_json(),
                })
                .collect(),
        };
        // Safe to unwrap: our types always serialize successfully
        let _ = writeln!(out, "{}", serde_json::to_string_pretty(&output).unwrap());
    }
}
