//! The schema-driven extraction engine.
//!
//! `extract` walks a compiled schema over one text segment and attaches the
//! resulting feature nodes to the tree. Extraction is a pure function of
//! (schema, segment): it never fails on input text, it only omits fields or
//! degrades their values to `Text`.

use crate::schema::{Field, MatchRule, RuleMatch, Schema};
use crate::tree::{FeatureTree, NodeId};
use crate::value::parse_value;

/// Extract `schema` from `segment` and attach the section node under
/// `parent`. The section node is kept even when nothing inside matched, so
/// an empty segment yields a node with zero children.
pub fn extract(schema: &Schema, segment: &str, tree: &mut FeatureTree, parent: NodeId) -> NodeId {
    let node = tree.add_child(parent, schema.name(), segment, None);
    extract_fields(schema.fields(), segment, tree, node);
    node
}

/// One located field occurrence within a segment. `value_*` delimit the text
/// handed to the value parser or recursed into.
struct Occurrence<'a> {
    field: &'a Field,
    start: usize,
    end: usize,
    value_start: usize,
    value_end: usize,
}

fn extract_fields(fields: &[Field], segment: &str, tree: &mut FeatureTree, node: NodeId) {
    let mut occurrences = Vec::new();
    for field in fields {
        collect_occurrences(field, segment, &mut occurrences);
    }

    // Children attach in document order, not declaration order. The sort is
    // stable, so equal starts fall back to declaration order.
    occurrences.sort_by_key(|occ| occ.start);

    // Overlapping siblings: the earlier occurrence is truncated at the start
    // of the next one.
    for i in 0..occurrences.len().saturating_sub(1) {
        let next_start = occurrences[i + 1].start;
        let occ = &mut occurrences[i];
        occ.end = occ.end.min(next_start);
        occ.value_end = occ.value_end.min(occ.end);
    }

    for occ in &occurrences {
        if occ.value_start >= occ.value_end {
            continue;
        }
        let span = &segment[occ.value_start..occ.value_end];
        if span.trim().is_empty() {
            continue;
        }
        if occ.field.children.is_empty() {
            let value = parse_value(span.trim(), occ.field.kind);
            tree.add_child(node, &occ.field.name, span, Some(value));
        } else {
            let child = tree.add_child(node, &occ.field.name, span, None);
            extract_fields(&occ.field.children, span, tree, child);
            // A structural node whose fields all missed is omitted.
            if tree.children(child).is_empty() {
                tree.truncate(child);
            }
        }
    }
}

fn collect_occurrences<'a>(field: &'a Field, segment: &str, out: &mut Vec<Occurrence<'a>>) {
    if field.tiers.is_empty() {
        // Container field: its span is the union of its children's matches.
        if let Some((start, end)) = container_range(field, segment) {
            out.push(Occurrence {
                field,
                start,
                end,
                value_start: start,
                value_end: end,
            });
        }
        return;
    }

    let mut from = 0;
    while let Some(m) = find_in_tiers(&field.tiers, segment, from) {
        out.push(Occurrence {
            field,
            start: m.start,
            end: m.end,
            value_start: m.value_start,
            value_end: m.value_end,
        });
        if !field.repeatable || m.end <= from {
            break;
        }
        // Repeats resume after the previous match; non-contiguous repeats
        // still collect into siblings.
        from = m.end;
    }
}

/// Union of the match spans of a container's children, or `None` when no
/// child matches anywhere in the segment.
fn container_range(field: &Field, segment: &str) -> Option<(usize, usize)> {
    let mut range: Option<(usize, usize)> = None;
    for child in &field.children {
        let child_range = if child.tiers.is_empty() {
            container_range(child, segment)
        } else {
            find_in_tiers(&child.tiers, segment, 0).map(|m| (m.start, m.end))
        };
        if let Some((start, end)) = child_range {
            range = Some(match range {
                None => (start, end),
                Some((s, e)) => (s.min(start), e.max(end)),
            });
        }
    }
    range
}

/// Locate the winning match for a field: tiers are tried in priority order,
/// and within the first tier that matches at all, leftmost start wins, the
/// longer match wins on equal starts, declaration order breaks exact ties.
fn find_in_tiers(tiers: &[Vec<MatchRule>], segment: &str, from: usize) -> Option<RuleMatch> {
    for tier in tiers {
        let mut best: Option<RuleMatch> = None;
        for rule in tier {
            if let Some(m) = rule.find_from(segment, from) {
                best = Some(match best {
                    None => m,
                    Some(b) if m.start < b.start || (m.start == b.start && m.end > b.end) => m,
                    Some(b) => b,
                });
            }
        }
        if best.is_some() {
            return best;
        }
    }
    None
}
