//! Built-in Jepson eFlora vocabulary: section schemas for the fixed label
//! set used by Jepson taxon descriptions.
//!
//! Field patterns target the measurement notation of that prose style:
//! double-hyphen ranges, parenthetical outliers, `+-` approximation markers.

use super::{FieldSpec, Schema, SchemaError, Vocabulary};
use crate::value::ValueKind;

/// Numeric range with optional parenthetical outlier bounds: `(1)3--30(50)`.
const NUM_RANGE: &str =
    r"(?:\(\d+(?:\.\d+)?\))?\d+(?:\.\d+)?--\d+(?:\.\d+)?(?:\(\d+(?:\.\d+)?\))?";

/// Build the default vocabulary. Infallible in practice; the `Result` keeps
/// schema validation on the one construction path.
pub fn default_vocabulary() -> Result<Vocabulary, SchemaError> {
    Vocabulary::new(vec![
        ("Habit", habit()?),
        ("Stem", stem()?),
        ("Leaf", leaf()?),
        ("Inflorescence", inflorescence()?),
        ("Flower", flower()?),
        ("Fruit", fruit()?),
        ("Chromosomes", chromosomes()?),
        ("Ecology", ecology()?),
        ("Elevation", elevation()?),
        ("Bioregional Distribution", bioregional_distribution()?),
        ("Distribution Outside California", outside_distribution()?),
        ("Flowering Time", flowering_time()?),
    ])
}

fn habit() -> Result<Schema, SchemaError> {
    Schema::new(
        "habit",
        vec![
            FieldSpec::new("growth_form")
                .rule(r"((?:shrub|subshrub|tree|vine|herb|thicket-forming)(?: or (?:shrub|subshrub|tree|vine|herb|thicket-forming|not))*)")
                .kind(ValueKind::Enumerated),
            FieldSpec::new("height")
                .rule(&format!(r"({NUM_RANGE} ?(?:mm|cm|dm|m))"))
                .kind(ValueKind::Numeric),
        ],
    )
}

fn stem() -> Result<Schema, SchemaError> {
    Schema::new(
        "stem",
        vec![
            // A stem clause can describe prickles more than once, e.g. for
            // young growth; collect each run as a sibling.
            FieldSpec::new("prickles")
                .rule(r"prickles\s+([^;]+)")
                .repeatable()
                .child(
                    FieldSpec::new("count")
                        .rule(r"(few to many)")
                        .rule(r"(few|many|dense|sparse)")
                        .kind(ValueKind::Enumerated),
                )
                .child(
                    FieldSpec::new("grouping")
                        .rule(r"(paired or not)")
                        .rule(r"(paired|unpaired)")
                        .kind(ValueKind::Enumerated),
                )
                .child(
                    FieldSpec::new("length")
                        .rule(&format!(r"({NUM_RANGE} ?mm)"))
                        .kind(ValueKind::Numeric),
                )
                .child(
                    FieldSpec::new("shape")
                        .rule(r"(thick-based and compressed)")
                        .rule(r"(thick-based|compressed|slender|stout)"),
                )
                .child(
                    FieldSpec::new("curvature")
                        .rule(r"((?:generally )?curved(?: \(straight\))?)")
                        .alt(r"((?:generally )?straight)"),
                ),
        ],
    )
}

fn leaf() -> Result<Schema, SchemaError> {
    Schema::new(
        "leaf",
        vec![
            FieldSpec::new("axis")
                .rule(r"axis\s+([^;]+)")
                .child(
                    FieldSpec::new("trichome")
                        .child(
                            FieldSpec::new("form")
                                .rule(r"(shaggy-hairy)")
                                .rule(r"(glabrous|hairless|hairy)"),
                        )
                        .child(
                            FieldSpec::new("hair_length")
                                .rule(r"hairs to ([^,;]+)")
                                .kind(ValueKind::Numeric),
                        )
                        .child(
                            FieldSpec::new("glandularity")
                                .rule(r"(glandless or glandular|glandular or not)")
                                .rule(r"(glandless|glandular)")
                                .kind(ValueKind::Enumerated),
                        ),
                ),
            FieldSpec::new("leaflets")
                .rule(&format!(r"leaflets\s+({NUM_RANGE})"))
                .kind(ValueKind::Numeric),
            FieldSpec::new("terminal_leaflet")
                .rule(r"terminal leaflet\s+([^;]+)")
                .child(
                    FieldSpec::new("length")
                        .rule(&format!(r"({NUM_RANGE} ?mm)"))
                        .kind(ValueKind::Numeric),
                )
                .child(
                    FieldSpec::new("shape")
                        .rule(r"((?:ob)?ovate(?:-elliptic)?)")
                        .alt(r"(elliptic|oblong|lanceolate)"),
                )
                .child(FieldSpec::new("tip").rule(r"tip ([^,;]+)"))
                .child(FieldSpec::new("margins").rule(r"margins ([^,;]+)")),
        ],
    )
}

fn inflorescence() -> Result<Schema, SchemaError> {
    Schema::new(
        "inflorescence",
        vec![
            FieldSpec::new("flower_count")
                .rule(&format!(r"({NUM_RANGE})-flowered"))
                .kind(ValueKind::Numeric),
            FieldSpec::new("pedicels")
                .rule(r"pedicels\s+([^;]+)")
                .child(
                    FieldSpec::new("length")
                        .rule(&format!(r"({NUM_RANGE} ?mm)"))
                        .kind(ValueKind::Numeric),
                )
                .child(FieldSpec::new("surface").rule(r"(glabrous|hairless|hairy)"))
                .child(
                    FieldSpec::new("glandularity")
                        .rule(r"(glandless|glandular)")
                        .kind(ValueKind::Enumerated),
                ),
        ],
    )
}

fn flower() -> Result<Schema, SchemaError> {
    Schema::new(
        "flower",
        vec![
            FieldSpec::new("hypanthium")
                .rule(r"hypanthium\s+([^;]+)")
                .child(
                    FieldSpec::new("width")
                        .rule(&format!(r"({NUM_RANGE} ?mm)(?= wide)"))
                        .kind(ValueKind::Numeric),
                )
                .child(
                    FieldSpec::new("neck_width")
                        .rule(&format!(r"neck ({NUM_RANGE} ?mm)"))
                        .kind(ValueKind::Numeric),
                )
                .child(
                    FieldSpec::new("surface")
                        .rule(r"(glabrous to sparsely hairy)")
                        .rule(r"(glabrous|hairy)"),
                )
                .child(
                    FieldSpec::new("glandularity")
                        .rule(r"(glandless|glandular)")
                        .kind(ValueKind::Enumerated),
                ),
            FieldSpec::new("sepals")
                .rule(r"sepals\s+([^;]+)")
                .child(
                    FieldSpec::new("glandularity")
                        .rule(r"(glandular or not|glandless or glandular)")
                        .rule(r"(glandless|glandular)")
                        .kind(ValueKind::Enumerated),
                )
                .child(FieldSpec::new("margin").rule(r"(entire|toothed|lobed)")),
            FieldSpec::new("petals")
                .rule(r"petals\s+([^;]+)")
                .child(
                    FieldSpec::new("length")
                        .rule(&format!(r"({NUM_RANGE} ?mm)"))
                        .kind(ValueKind::Numeric),
                )
                .child(
                    FieldSpec::new("color")
                        .rule(r"(pink|white|red|yellow|cream)")
                        .kind(ValueKind::Enumerated),
                ),
            FieldSpec::new("pistils")
                .rule(&format!(r"pistils\s+({NUM_RANGE})"))
                .kind(ValueKind::Numeric),
        ],
    )
}

fn fruit() -> Result<Schema, SchemaError> {
    Schema::new(
        "fruit",
        vec![
            FieldSpec::new("width")
                .rule(&format!(r"({NUM_RANGE} ?mm)(?= wide)"))
                .kind(ValueKind::Numeric),
            FieldSpec::new("shape").rule(r"(\(ob\)ovoid|obovoid|ovoid|globose|ellipsoid)"),
            FieldSpec::new("sepals")
                .rule(r"sepals\s+([^;]+)")
                .child(FieldSpec::new("orientation").rule(r"(erect|spreading|reflexed)"))
                .child(
                    FieldSpec::new("persistence")
                        .rule(r"(persistent|deciduous)")
                        .kind(ValueKind::Enumerated),
                ),
            FieldSpec::new("achenes")
                .rule(&format!(r"achenes\s+(?:generally\s+)?({NUM_RANGE} ?mm)"))
                .kind(ValueKind::Numeric),
        ],
    )
}

fn chromosomes() -> Result<Schema, SchemaError> {
    Schema::new(
        "chromosomes",
        vec![
            // \b keeps the haploid rule from matching inside "2n=".
            FieldSpec::new("diploid_count")
                .rule(r"\b2n\s*=\s*(\d+)")
                .kind(ValueKind::Numeric),
            FieldSpec::new("haploid_count")
                .rule(r"\bn\s*=\s*(\d+)")
                .kind(ValueKind::Numeric),
        ],
    )
}

fn ecology() -> Result<Schema, SchemaError> {
    Schema::new(
        "ecology",
        vec![FieldSpec::new("habitat").rule(r"^\s*([^;.]+)")],
    )
}

fn elevation() -> Result<Schema, SchemaError> {
    Schema::new(
        "elevation",
        vec![FieldSpec::new("limit").rule(r"([<>]?\s*\d[^;.]*)")],
    )
}

fn bioregional_distribution() -> Result<Schema, SchemaError> {
    Schema::new(
        "bioregional_distribution",
        vec![FieldSpec::new("regions").rule(r"^\s*([^.;]+)")],
    )
}

fn outside_distribution() -> Result<Schema, SchemaError> {
    Schema::new(
        "distribution_outside_california",
        vec![FieldSpec::new("regions").rule(r"^\s*([^.;]+)")],
    )
}

fn flowering_time() -> Result<Schema, SchemaError> {
    Schema::new(
        "flowering_time",
        vec![FieldSpec::new("months")
            .rule(r"([A-Za-z]{3}--[A-Za-z]{3})")
            .rule(r"^\s*([^.;]+)")],
    )
}
