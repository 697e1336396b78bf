//! Field schemas: declarative match specifications and their compiled form.
//!
//! A [`FieldSpec`] is the declarative description of one field (pattern tiers,
//! value kind, nesting); [`Schema::new`] compiles and validates a whole
//! section at once. Compiled schemas are immutable and safe to share across
//! concurrent extraction calls.

pub mod jepson;

use regex::Regex;
use thiserror::Error;

use crate::value::ValueKind;

/// A schema that is internally inconsistent. The only fatal error in the
/// crate: it is raised at construction time and never during extraction.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("field `{field}`: invalid pattern `{pattern}`: {message}")]
    BadPattern {
        field: String,
        pattern: String,
        message: String,
    },
    #[error("field `{field}`: pattern `{pattern}` has no capture group for the value span")]
    MissingCaptureGroup { field: String, pattern: String },
    #[error("field `{field}` declares no match rules and no child fields")]
    DeadField { field: String },
    #[error("duplicate field `{field}` under `{parent}`")]
    DuplicateField { parent: String, field: String },
    #[error("duplicate section label `{label}`")]
    DuplicateLabel { label: String },
}

/// Declarative description of one field, nested recursively.
///
/// Rules are grouped into priority tiers: [`rule`](FieldSpec::rule) starts a
/// new tier, [`alt`](FieldSpec::alt) adds an equal-priority alternative to the
/// current one. Earlier tiers win outright, so declare specific patterns
/// before generic catch-alls.
#[derive(Debug, Clone)]
pub struct FieldSpec {
    name: String,
    tiers: Vec<Vec<String>>,
    kind: ValueKind,
    repeatable: bool,
    children: Vec<FieldSpec>,
}

impl FieldSpec {
    pub fn new(name: &str) -> Self {
        FieldSpec {
            name: name.to_string(),
            tiers: Vec::new(),
            kind: ValueKind::default(),
            repeatable: false,
            children: Vec::new(),
        }
    }

    /// Append a pattern as a new, lower-priority tier.
    pub fn rule(mut self, pattern: &str) -> Self {
        self.tiers.push(vec![pattern.to_string()]);
        self
    }

    /// Append a pattern as an equal-priority alternative to the last tier.
    pub fn alt(mut self, pattern: &str) -> Self {
        match self.tiers.last_mut() {
            Some(tier) => tier.push(pattern.to_string()),
            None => self.tiers.push(vec![pattern.to_string()]),
        }
        self
    }

    pub fn kind(mut self, kind: ValueKind) -> Self {
        self.kind = kind;
        self
    }

    /// Collect every occurrence in the segment as sibling nodes instead of
    /// stopping at the first.
    pub fn repeatable(mut self) -> Self {
        self.repeatable = true;
        self
    }

    pub fn child(mut self, child: FieldSpec) -> Self {
        self.children.push(child);
        self
    }
}

/// A compiled match rule. Patterns compile case-insensitively through the
/// plain `regex` engine; patterns it rejects (look-around) fall back to the
/// backtracking `fancy_regex` engine.
#[derive(Debug, Clone)]
pub(crate) struct MatchRule {
    engine: Engine,
}

#[derive(Debug, Clone)]
enum Engine {
    Std(Regex),
    Fancy(fancy_regex::Regex),
}

/// One located occurrence of a rule. Offsets are absolute byte positions
/// within the searched segment; `value_*` delimit the first capture group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RuleMatch {
    pub start: usize,
    pub end: usize,
    pub value_start: usize,
    pub value_end: usize,
}

impl MatchRule {
    fn compile(field: &str, pattern: &str) -> Result<Self, SchemaError> {
        if !has_capture_group(pattern) {
            return Err(SchemaError::MissingCaptureGroup {
                field: field.to_string(),
                pattern: pattern.to_string(),
            });
        }
        let case_insensitive = format!("(?i){pattern}");
        let engine = match Regex::new(&case_insensitive) {
            Ok(re) => Engine::Std(re),
            Err(_) => match fancy_regex::Regex::new(&case_insensitive) {
                Ok(re) => Engine::Fancy(re),
                Err(e) => {
                    return Err(SchemaError::BadPattern {
                        field: field.to_string(),
                        pattern: pattern.to_string(),
                        message: e.to_string(),
                    });
                }
            },
        };
        Ok(MatchRule { engine })
    }

    /// First occurrence at or after `from` whose first capture group is
    /// non-empty after trimming. Occurrences with an absent or blank group
    /// are skipped, not treated as terminal.
    pub(crate) fn find_from(&self, text: &str, from: usize) -> Option<RuleMatch> {
        let mut pos = from;
        while pos <= text.len() {
            let (start, end, group) = self.captures_from(text, pos)?;
            if let Some((value_start, value_end)) = group {
                if !text[value_start..value_end].trim().is_empty() {
                    return Some(RuleMatch {
                        start,
                        end,
                        value_start,
                        value_end,
                    });
                }
            }
            // Empty match: step one character so the scan always advances.
            pos = if end > pos {
                end
            } else {
                pos + text[pos..].chars().next()?.len_utf8()
            };
        }
        None
    }

    fn captures_from(
        &self,
        text: &str,
        pos: usize,
    ) -> Option<(usize, usize, Option<(usize, usize)>)> {
        let haystack = &text[pos..];
        match &self.engine {
            Engine::Std(re) => {
                let caps = re.captures(haystack)?;
                let whole = caps.get(0)?;
                let group = caps.get(1).map(|g| (pos + g.start(), pos + g.end()));
                Some((pos + whole.start(), pos + whole.end(), group))
            }
            Engine::Fancy(re) => {
                // Backtracking errors (e.g. runaway patterns) read as no-match.
                let caps = re.captures(haystack).ok()??;
                let whole = caps.get(0)?;
                let group = caps.get(1).map(|g| (pos + g.start(), pos + g.end()));
                Some((pos + whole.start(), pos + whole.end(), group))
            }
        }
    }
}

/// Does the pattern contain at least one capturing group? Non-capturing
/// groups `(?:`, look-arounds, escaped and character-class parens don't count.
fn has_capture_group(pattern: &str) -> bool {
    let bytes = pattern.as_bytes();
    let mut in_class = false;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 1,
            b'[' if !in_class => in_class = true,
            b']' if in_class => in_class = false,
            b'(' if !in_class => {
                if bytes.get(i + 1) != Some(&b'?') {
                    return true;
                }
            }
            _ => {}
        }
        i += 1;
    }
    false
}

/// A compiled field. Produced only by [`Schema::new`]; extraction reads it,
/// never mutates it.
#[derive(Debug, Clone)]
pub(crate) struct Field {
    pub name: String,
    pub tiers: Vec<Vec<MatchRule>>,
    pub kind: ValueKind,
    pub repeatable: bool,
    pub children: Vec<Field>,
}

/// A compiled, validated section schema: an ordered set of fields extracted
/// under a single named node.
#[derive(Debug, Clone)]
pub struct Schema {
    name: String,
    fields: Vec<Field>,
}

impl Schema {
    pub fn new(name: &str, fields: Vec<FieldSpec>) -> Result<Self, SchemaError> {
        Ok(Schema {
            name: name.to_string(),
            fields: compile_fields(name, &fields)?,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn fields(&self) -> &[Field] {
        &self.fields
    }
}

fn compile_fields(parent: &str, specs: &[FieldSpec]) -> Result<Vec<Field>, SchemaError> {
    let mut fields = Vec::with_capacity(specs.len());
    for (i, spec) in specs.iter().enumerate() {
        if specs[..i]
            .iter()
            .any(|s| s.name.eq_ignore_ascii_case(&spec.name))
        {
            return Err(SchemaError::DuplicateField {
                parent: parent.to_string(),
                field: spec.name.clone(),
            });
        }
        if spec.tiers.is_empty() && spec.children.is_empty() {
            return Err(SchemaError::DeadField {
                field: spec.name.clone(),
            });
        }
        let mut tiers = Vec::with_capacity(spec.tiers.len());
        for tier in &spec.tiers {
            let mut rules = Vec::with_capacity(tier.len());
            for pattern in tier {
                rules.push(MatchRule::compile(&spec.name, pattern)?);
            }
            tiers.push(rules);
        }
        fields.push(Field {
            name: spec.name.clone(),
            tiers,
            kind: spec.kind,
            repeatable: spec.repeatable,
            children: compile_fields(&spec.name, &spec.children)?,
        });
    }
    Ok(fields)
}

/// The top-level label vocabulary: an ordered mapping from clause label
/// ("Habit", "Stem", ...) to the section schema extracted under it.
/// Constructed once, then shared read-only.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    sections: Vec<(String, Schema)>,
}

impl Vocabulary {
    pub fn new(sections: Vec<(&str, Schema)>) -> Result<Self, SchemaError> {
        let mut out: Vec<(String, Schema)> = Vec::with_capacity(sections.len());
        for (label, schema) in sections {
            if out.iter().any(|(l, _)| l.eq_ignore_ascii_case(label)) {
                return Err(SchemaError::DuplicateLabel {
                    label: label.to_string(),
                });
            }
            out.push((label.to_string(), schema));
        }
        Ok(Vocabulary { sections: out })
    }

    /// Look up a section schema by clause label, case-insensitively.
    pub fn section(&self, label: &str) -> Option<&Schema> {
        self.sections
            .iter()
            .find(|(l, _)| l.eq_ignore_ascii_case(label))
            .map(|(_, schema)| schema)
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.sections.iter().map(|(label, _)| label.as_str())
    }

    /// Keep only the sections whose label passes the predicate. Used to apply
    /// config-level section disabling.
    pub fn retain_sections(&mut self, keep: impl Fn(&str) -> bool) {
        self.sections.retain(|(label, _)| keep(label));
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}
