//! Clause segmentation: locate `Label:` tokens at clause boundaries and cut
//! the description into labeled top-level clauses.

use std::sync::LazyLock;

/// A capitalized (possibly multi-word) label followed by a colon, at the
/// start of the text, after sentence or clause punctuation, or after a
/// newline. The boundary look-behinds need the backtracking engine.
static LABEL_RE: LazyLock<fancy_regex::Regex> = LazyLock::new(|| {
    fancy_regex::Regex::new(r"(?:^|(?<=[.;]\s)|(?<=\n))([A-Z][A-Za-z]*(?: [A-Z][A-Za-z]*)*):\s*")
        .unwrap()
});

/// One labeled clause of a description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clause<'a> {
    /// The label as written, without the colon.
    pub label: &'a str,
    /// Clause body: everything after the colon up to the next label.
    pub text: &'a str,
    /// The full clause including its label, used to preserve unknown clauses.
    pub raw: &'a str,
    /// Byte offset of the label within the description.
    pub start: usize,
}

#[derive(Debug, Clone)]
pub struct SplitClauses<'a> {
    /// Unlabeled text before the first recognized label, if any.
    pub leading: Option<&'a str>,
    pub clauses: Vec<Clause<'a>>,
}

pub fn split_clauses(description: &str) -> SplitClauses<'_> {
    // (match start, body start, label start, label end) per label token
    let mut marks: Vec<(usize, usize, usize, usize)> = Vec::new();
    for caps in LABEL_RE.captures_iter(description) {
        let Ok(caps) = caps else { continue };
        let (Some(whole), Some(label)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        marks.push((whole.start(), whole.end(), label.start(), label.end()));
    }

    let leading = {
        let upto = marks.first().map_or(description.len(), |&(start, ..)| start);
        let text = description[..upto].trim();
        (!text.is_empty()).then_some(text)
    };

    let mut clauses = Vec::with_capacity(marks.len());
    for (i, &(start, body_start, label_start, label_end)) in marks.iter().enumerate() {
        let next = marks.get(i + 1).map_or(description.len(), |&(n, ..)| n);
        clauses.push(Clause {
            label: &description[label_start..label_end],
            text: description[body_start..next].trim_end(),
            raw: description[start..next].trim_end(),
            start,
        });
    }

    SplitClauses { leading, clauses }
}
