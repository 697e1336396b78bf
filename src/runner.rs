//! Batch runner: parse many description files in parallel.
//!
//! The extraction engine itself is pure and single-threaded; parallelism
//! lives only here, one description file per rayon task.

use std::path::PathBuf;

use anyhow::{Context, Result};
use rayon::prelude::*;

use crate::cli::Args;
use crate::parser::{DescriptionParser, UNLABELED, UNRECOGNIZED};
use crate::tree::FeatureTree;

/// One parsed description file.
pub struct ParsedFile {
    pub path: PathBuf,
    pub tree: FeatureTree,
}

/// Parse every file, in parallel, one description per file. Output order is
/// deterministic (sorted by path) regardless of scheduling.
pub fn parse_files(
    paths: &[PathBuf],
    parser: &DescriptionParser,
    args: &Args,
) -> Result<Vec<ParsedFile>> {
    let start = std::time::Instant::now();

    let mut files: Vec<ParsedFile> = paths
        .par_iter()
        .map(|path| {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            Ok(ParsedFile {
                path: path.clone(),
                tree: parser.parse(&text),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    files.sort_by(|a, b| a.path.cmp(&b.path));

    if args.debug {
        let nodes: usize = files.iter().map(|f| f.tree.len() - 1).sum();
        eprintln!(
            "debug: parsed {} files ({nodes} feature nodes) in {:.0?}",
            files.len(),
            start.elapsed()
        );
    }

    Ok(files)
}

/// Parse an in-memory description under a display path (used for --stdin).
pub fn parse_source(display_path: &str, text: &str, parser: &DescriptionParser) -> ParsedFile {
    ParsedFile {
        path: PathBuf::from(display_path),
        tree: parser.parse(text),
    }
}

/// True when at least one recognized section was extracted: a child that is
/// neither the unlabeled nor the unrecognized bucket.
pub fn has_recognized_sections(tree: &FeatureTree) -> bool {
    tree.children(tree.root())
        .iter()
        .any(|&id| !matches!(tree.node(id).name.as_str(), UNLABELED | UNRECOGNIZED))
}
