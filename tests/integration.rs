//! End-to-end tests over complete taxon descriptions.

use std::fs;

use floraparse::config::load_config;
use floraparse::parser::DescriptionParser;
use floraparse::runner::{has_recognized_sections, parse_source};
use floraparse::schema::jepson;
use floraparse::tree::{FeatureTree, NodeId};
use floraparse::value::Value;

/// Rosa californica, Jepson eFlora style.
const ROSA: &str = "Habit: shrub or thicket-forming, 8--25 dm. \
Stem: prickles few to many, paired or not, 3--15 mm, thick-based and compressed, generally curved (straight). \
Leaf: axis +- shaggy-hairy (+- glabrous), hairs to 1 mm, glandless or glandular; leaflets 5--7(9), +- hairy, sometimes glandular; terminal leaflet generally 15--50 mm, +- ovate-elliptic, generally widest at or below middle, tip rounded to acute, margins single- or double-toothed, glandular or not. \
Inflorescence: (1)3--30(50)-flowered; pedicels generally +- 5--20 mm, generally +- hairy, glandless. \
Flower: hypanthium 3--5.5 mm wide at flower, glabrous to sparsely hairy, glandless, neck 2--4.5 mm wide; sepals glandular or not, entire, tip generally +- equal to body, entire; petals generally 15--25 mm, pink; pistils 20--40. \
Fruit: generally 8--15(20) mm wide, generally (ob)ovoid; sepals generally erect, persistent; achenes generally 3.5--4.5 mm. \
Chromosomes: n=14.\n\
Ecology: Generally +- moist areas, especially streambanks; Elevation: < 1800 m. \
Bioregional Distribution: CA-FP (exc CaRH, SNH, Teh); Distribution Outside California: southern Oregon, northern Baja California. Flowering Time: Feb--Nov";

fn parse(description: &str) -> FeatureTree {
    DescriptionParser::new().unwrap().parse(description)
}

fn child_names(tree: &FeatureTree, id: NodeId) -> Vec<&str> {
    tree.children(id)
        .iter()
        .map(|&child| tree.node(child).name.as_str())
        .collect()
}

fn find_one(tree: &FeatureTree, name: &str) -> NodeId {
    let found = tree.find(name);
    assert_eq!(found.len(), 1, "expected exactly one `{name}` node");
    found[0]
}

/// The direct child of `parent` with the given name.
fn child(tree: &FeatureTree, parent: NodeId, name: &str) -> NodeId {
    *tree
        .children(parent)
        .iter()
        .find(|&&id| tree.node(id).name == name)
        .unwrap_or_else(|| panic!("no `{name}` child under `{}`", tree.node(parent).name))
}

fn child_value(tree: &FeatureTree, parent: NodeId, name: &str) -> Value {
    tree.node(child(tree, parent, name)).value.clone().unwrap()
}

fn plain_range(low: f64, high: f64, unit: Option<&str>) -> Value {
    Value::Range {
        low,
        high,
        low_outlier: None,
        high_outlier: None,
        unit: unit.map(str::to_string),
        approximate: false,
    }
}

#[test]
fn all_sections_extracted_in_document_order() {
    let tree = parse(ROSA);
    assert_eq!(
        child_names(&tree, tree.root()),
        vec![
            "habit",
            "stem",
            "leaf",
            "inflorescence",
            "flower",
            "fruit",
            "chromosomes",
            "ecology",
            "elevation",
            "bioregional_distribution",
            "distribution_outside_california",
            "flowering_time",
        ]
    );
}

#[test]
fn habit_section() {
    let tree = parse(ROSA);
    let habit = tree.children(tree.root())[0];
    assert_eq!(child_names(&tree, habit), vec!["growth_form", "height"]);
    assert_eq!(
        child_value(&tree, habit, "growth_form"),
        Value::Enumeration {
            chosen: "shrub".to_string(),
            alternatives: vec!["thicket-forming".to_string()],
        }
    );
    assert_eq!(
        child_value(&tree, habit, "height"),
        plain_range(8.0, 25.0, Some("dm"))
    );
}

#[test]
fn stem_prickles_subtree() {
    let tree = parse(ROSA);
    let prickles = find_one(&tree, "prickles");
    assert_eq!(
        child_names(&tree, prickles),
        vec!["count", "grouping", "length", "shape", "curvature"]
    );
    assert_eq!(tree.node(child(&tree, prickles, "count")).raw_text, "few to many");
    assert_eq!(
        child_value(&tree, prickles, "grouping"),
        Value::Enumeration {
            chosen: "paired".to_string(),
            alternatives: vec!["not paired".to_string()],
        }
    );
    assert_eq!(
        child_value(&tree, prickles, "length"),
        plain_range(3.0, 15.0, Some("mm"))
    );
    assert_eq!(
        child_value(&tree, prickles, "curvature"),
        Value::Text {
            raw: "generally curved (straight)".to_string()
        }
    );
}

#[test]
fn leaf_axis_trichome_subtree() {
    let tree = parse(ROSA);
    let axis = find_one(&tree, "axis");
    assert_eq!(child_names(&tree, axis), vec!["trichome"]);
    let trichome = tree.children(axis)[0];
    assert_eq!(
        child_names(&tree, trichome),
        vec!["form", "hair_length", "glandularity"]
    );
    assert_eq!(
        child_value(&tree, trichome, "form"),
        Value::Text {
            raw: "shaggy-hairy".to_string()
        }
    );
    assert_eq!(
        child_value(&tree, trichome, "hair_length"),
        Value::Scalar {
            value: 1.0,
            unit: Some("mm".to_string()),
            approximate: false,
        }
    );
    assert_eq!(
        child_value(&tree, trichome, "glandularity"),
        Value::Enumeration {
            chosen: "glandless".to_string(),
            alternatives: vec!["glandular".to_string()],
        }
    );
}

#[test]
fn leaflet_counts_with_outlier() {
    let tree = parse(ROSA);
    assert_eq!(
        tree.node(find_one(&tree, "leaflets")).value,
        Some(Value::Range {
            low: 5.0,
            high: 7.0,
            low_outlier: None,
            high_outlier: Some(9.0),
            unit: None,
            approximate: false,
        })
    );
}

#[test]
fn terminal_leaflet_subtree() {
    let tree = parse(ROSA);
    let terminal = find_one(&tree, "terminal_leaflet");
    assert_eq!(
        child_names(&tree, terminal),
        vec!["length", "shape", "tip", "margins"]
    );
    assert_eq!(
        child_value(&tree, terminal, "length"),
        plain_range(15.0, 50.0, Some("mm"))
    );
    assert_eq!(
        tree.node(child(&tree, terminal, "shape")).raw_text,
        "ovate-elliptic"
    );
}

#[test]
fn inflorescence_flower_count_with_both_outliers() {
    let tree = parse(ROSA);
    assert_eq!(
        tree.node(find_one(&tree, "flower_count")).value,
        Some(Value::Range {
            low: 3.0,
            high: 30.0,
            low_outlier: Some(1.0),
            high_outlier: Some(50.0),
            unit: None,
            approximate: false,
        })
    );
}

#[test]
fn flower_hypanthium_measurements() {
    let tree = parse(ROSA);
    let hypanthium = find_one(&tree, "hypanthium");
    assert_eq!(
        child_value(&tree, hypanthium, "width"),
        plain_range(3.0, 5.5, Some("mm"))
    );
    assert_eq!(
        child_value(&tree, hypanthium, "neck_width"),
        plain_range(2.0, 4.5, Some("mm"))
    );
    assert_eq!(
        tree.node(find_one(&tree, "pistils")).value,
        Some(plain_range(20.0, 40.0, None))
    );
}

#[test]
fn fruit_section() {
    let tree = parse(ROSA);
    let fruit = child(&tree, tree.root(), "fruit");
    assert_eq!(
        child_value(&tree, fruit, "width"),
        Value::Range {
            low: 8.0,
            high: 15.0,
            low_outlier: None,
            high_outlier: Some(20.0),
            unit: Some("mm".to_string()),
            approximate: false,
        }
    );
    assert_eq!(
        child_value(&tree, fruit, "shape"),
        Value::Text {
            raw: "(ob)ovoid".to_string()
        }
    );
    assert_eq!(
        child_value(&tree, fruit, "achenes"),
        plain_range(3.5, 4.5, Some("mm"))
    );
}

#[test]
fn chromosome_count() {
    let tree = parse(ROSA);
    assert_eq!(
        tree.node(find_one(&tree, "haploid_count")).value,
        Some(Value::Scalar {
            value: 14.0,
            unit: None,
            approximate: false,
        })
    );
    assert!(tree.find("diploid_count").is_empty());
}

#[test]
fn trailing_label_sections() {
    let tree = parse(ROSA);
    assert_eq!(
        tree.node(find_one(&tree, "limit")).value,
        Some(Value::Text {
            raw: "< 1800 m".to_string()
        })
    );
    assert_eq!(
        tree.node(find_one(&tree, "months")).value,
        Some(Value::Text {
            raw: "Feb--Nov".to_string()
        })
    );
    let bioregional = child(&tree, tree.root(), "bioregional_distribution");
    assert_eq!(
        child_value(&tree, bioregional, "regions"),
        Value::Text {
            raw: "CA-FP (exc CaRH, SNH, Teh)".to_string()
        }
    );
    let outside = child(&tree, tree.root(), "distribution_outside_california");
    assert_eq!(
        child_value(&tree, outside, "regions"),
        Value::Text {
            raw: "southern Oregon, northern Baja California".to_string()
        }
    );
}

#[test]
fn order_preservation_scenario() {
    let tree = parse("Stem: prickles few to many. Leaf: axis hairy.");
    assert_eq!(child_names(&tree, tree.root()), vec!["stem", "leaf"]);
}

#[test]
fn unknown_label_scenario() {
    let tree = parse("Foo: bar baz.");
    let bucket = find_one(&tree, "unrecognized");
    let entry = tree.children(bucket)[0];
    assert_eq!(
        tree.node(entry).value,
        Some(Value::Text {
            raw: "Foo: bar baz.".to_string()
        })
    );
}

#[test]
fn parse_is_deterministic_over_full_description() {
    let a = parse(ROSA);
    let b = parse(ROSA);
    assert_eq!(a.to_json(), b.to_json());
}

#[test]
fn json_export_contract() {
    let tree = parse(ROSA);
    let json = tree.to_json();
    assert_eq!(json["name"], "description");
    assert!(json["value"].is_null());
    let stem = &json["children"][1];
    assert_eq!(stem["name"], "stem");
    let prickles = &stem["children"][0];
    assert_eq!(prickles["name"], "prickles");
    let length = &prickles["children"][2];
    assert_eq!(length["name"], "length");
    assert_eq!(length["value"]["type"], "range");
    assert_eq!(length["value"]["low"], 3.0);
    assert_eq!(length["value"]["high"], 15.0);
    assert_eq!(length["value"]["unit"], "mm");
}

#[test]
fn disabled_sections_are_skipped() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join(".floraparse.yml");
    fs::write(&config_path, "Ecology:\n  Enabled: false\n").unwrap();
    let config = load_config(Some(&config_path)).unwrap();

    let mut vocabulary = jepson::default_vocabulary().unwrap();
    vocabulary.retain_sections(|label| config.is_section_enabled(label));
    let parser = DescriptionParser::with_vocabulary(vocabulary);

    let tree = parser.parse(ROSA);
    assert!(!child_names(&tree, tree.root()).contains(&"ecology"));
    // The clause is no longer recognized, so it surfaces as schema drift
    let bucket = find_one(&tree, "unrecognized");
    assert_eq!(child_names(&tree, bucket), vec!["ecology"]);
    assert!(!tree.find("habit").is_empty());
}

#[test]
fn malformed_inputs_never_fail() {
    let parser = DescriptionParser::new().unwrap();
    for text in ["", "   ", "no labels here at all", "::::", "Habit:", "Habit: "] {
        let parsed = parse_source("x.txt", text, &parser);
        let _ = parsed.tree.to_json();
    }
    assert!(!has_recognized_sections(
        &parse_source("x.txt", "", &parser).tree
    ));
}
