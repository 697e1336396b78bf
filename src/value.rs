//! Leaf value parsing: numeric ranges, scalars, enumerations, free text.
//!
//! `parse_value` is total. Any fragment that doesn't fit the expected kind
//! degrades to `Value::Text` so extraction never aborts on unexpected phrasing.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

/// Expected value kind declared by a field. A hint, not a guarantee: the
/// parser degrades to `Text` whenever the fragment doesn't fit the kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValueKind {
    Numeric,
    Enumerated,
    #[default]
    Text,
}

/// A parsed leaf value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Value {
    Scalar {
        value: f64,
        #[serde(skip_serializing_if = "Option::is_none")]
        unit: Option<String>,
        #[serde(skip_serializing_if = "is_false")]
        approximate: bool,
    },
    /// A measured range. Outlier bounds capture the parenthetical rare
    /// extremes in notation like `(1)3--30(50)` and always lie outside
    /// `[low, high]`.
    Range {
        low: f64,
        high: f64,
        #[serde(skip_serializing_if = "Option::is_none")]
        low_outlier: Option<f64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        high_outlier: Option<f64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        unit: Option<String>,
        #[serde(skip_serializing_if = "is_false")]
        approximate: bool,
    },
    /// `shrub or thicket-forming`: the first alternative is the primary
    /// reading, the rest are preserved verbatim.
    Enumeration {
        chosen: String,
        alternatives: Vec<String>,
    },
    Text {
        raw: String,
    },
}

fn is_false(b: &bool) -> bool {
    !*b
}

/// `(1)3--30(50) mm`, `8--25 dm`, `3-15`, `5 to 7`. Outliers and unit optional.
static RANGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:\((\d+(?:\.\d+)?)\)\s*)?(\d+(?:\.\d+)?)(?:\s*--\s*|\s*-\s*|\s+to\s+)(\d+(?:\.\d+)?)(?:\s*\((\d+(?:\.\d+)?)\))?(?:\s*([A-Za-z]+))?\.?$",
    )
    .unwrap()
});

/// `8 dm`, `14`, `3.5`.
static SCALAR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+(?:\.\d+)?)(?:\s*([A-Za-z]+))?\.?$").unwrap()
});

/// Leading qualifier words and approximation markers preceding a measurement.
static QUALIFIER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:(?:generally|mostly|usually|sometimes|often|about|up\s+to|ca)\b\.?|\+-|±)\s*")
        .unwrap()
});

/// Parse a trimmed text fragment into a typed value. Never fails: unmatched
/// fragments come back as `Text`.
pub fn parse_value(text: &str, kind: ValueKind) -> Value {
    let cleaned = clean(text);
    match kind {
        ValueKind::Numeric => parse_numeric(cleaned)
            .or_else(|| parse_enumeration(cleaned))
            .unwrap_or_else(|| text_value(cleaned)),
        ValueKind::Enumerated => {
            parse_enumeration(cleaned).unwrap_or_else(|| text_value(cleaned))
        }
        ValueKind::Text => text_value(cleaned),
    }
}

/// Strip the trailing sentence period and surrounding whitespace.
fn clean(text: &str) -> &str {
    text.trim().trim_end_matches('.').trim_end()
}

fn text_value(raw: &str) -> Value {
    Value::Text {
        raw: raw.to_string(),
    }
}

fn parse_numeric(text: &str) -> Option<Value> {
    let (body, approximate) = strip_qualifiers(text);

    if let Some(caps) = RANGE_RE.captures(body) {
        let low: f64 = caps[2].parse().ok()?;
        let high: f64 = caps[3].parse().ok()?;
        if low > high {
            return None;
        }
        let mut low_outlier: Option<f64> = caps.get(1).and_then(|m| m.as_str().parse().ok());
        let mut high_outlier: Option<f64> = caps.get(4).and_then(|m| m.as_str().parse().ok());
        // Outlier bounds must lie outside [low, high]; drop any that don't.
        if low_outlier.is_some_and(|v| v > low) {
            low_outlier = None;
        }
        if high_outlier.is_some_and(|v| v < high) {
            high_outlier = None;
        }
        return Some(Value::Range {
            low,
            high,
            low_outlier,
            high_outlier,
            unit: caps.get(5).map(|m| m.as_str().to_string()),
            approximate,
        });
    }

    if let Some(caps) = SCALAR_RE.captures(body) {
        let value: f64 = caps[1].parse().ok()?;
        return Some(Value::Scalar {
            value,
            unit: caps.get(2).map(|m| m.as_str().to_string()),
            approximate,
        });
    }

    None
}

/// Strip leading qualifiers (`generally`, `+-`, `ca.`, ...) from a numeric
/// fragment. `+-`/`ca.`/`about` mark the measurement as approximate.
fn strip_qualifiers(text: &str) -> (&str, bool) {
    let mut rest = text.trim();
    let mut approximate = false;
    while let Some(m) = QUALIFIER_RE.find(rest) {
        if m.is_empty() {
            break;
        }
        let marker = m.as_str().trim_end();
        if matches!(marker, "+-" | "±" | "ca" | "ca." | "about") {
            approximate = true;
        }
        rest = &rest[m.end()..];
    }
    (rest, approximate)
}

fn parse_enumeration(text: &str) -> Option<Value> {
    let parts: Vec<&str> = if text.contains(" or ") {
        text.split(" or ").map(str::trim).filter(|p| !p.is_empty()).collect()
    } else if text.contains(',') {
        text.split(',').map(str::trim).filter(|p| !p.is_empty()).collect()
    } else {
        return None;
    };
    if parts.len() < 2 {
        return None;
    }
    let chosen = parts[0].to_string();
    let alternatives = parts[1..]
        .iter()
        .map(|p| {
            // "paired or not" reads as "paired or not paired"
            if p.eq_ignore_ascii_case("not") {
                format!("not {chosen}")
            } else {
                (*p).to_string()
            }
        })
        .collect();
    Some(Value::Enumeration {
        chosen,
        alternatives,
    })
}

fn fmt_number(f: &mut fmt::Formatter<'_>, v: f64) -> fmt::Result {
    if v.fract() == 0.0 {
        write!(f, "{}", v as i64)
    } else {
        write!(f, "{v}")
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Scalar {
                value,
                unit,
                approximate,
            } => {
                if *approximate {
                    write!(f, "+- ")?;
                }
                fmt_number(f, *value)?;
                if let Some(unit) = unit {
                    write!(f, " {unit}")?;
                }
                Ok(())
            }
            Value::Range {
                low,
                high,
                low_outlier,
                high_outlier,
                unit,
                approximate,
            } => {
                if *approximate {
                    write!(f, "+- ")?;
                }
                if let Some(v) = low_outlier {
                    write!(f, "(")?;
                    fmt_number(f, *v)?;
                    write!(f, ")")?;
                }
                fmt_number(f, *low)?;
                write!(f, "--")?;
                fmt_number(f, *high)?;
                if let Some(v) = high_outlier {
                    write!(f, "(")?;
                    fmt_number(f, *v)?;
                    write!(f, ")")?;
                }
                if let Some(unit) = unit {
                    write!(f, " {unit}")?;
                }
                Ok(())
            }
            Value::Enumeration {
                chosen,
                alternatives,
            } => {
                write!(f, "{chosen}")?;
                for alt in alternatives {
                    write!(f, " or {alt}")?;
                }
                Ok(())
            }
            Value::Text { raw } => write!(f, "{raw}"),
        }
    }
}
