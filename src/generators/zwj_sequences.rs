//! `emoji-zwj-sequences.txt`

use serde_json::{json, Value};

use super::sequences::{render_sequence, sequence_input_schema, SequenceEntry};
use super::{table_options_schema, TableOptions};
use crate::error::Result;
use crate::loom::{create_loom, Loom, LoomConfig};

pub type ZwjSequencesLoom = Loom<SequenceEntry, TableOptions>;

const ZWJ: &str = "200D";
const VS16: &str = "FE0F";

fn zwj(code_points: &[&str], description: &str, comment: &str) -> Value {
    json!({
        "codePoints": code_points,
        "type": "zwj_sequence",
        "description": description,
        "comment": comment,
    })
}

fn family_combinations() -> Vec<Value> {
    vec![
        zwj(
            &["1F468", ZWJ, "1F469", ZWJ, "1F467"],
            "family: man, woman, girl",
            "basic family combination",
        ),
        zwj(
            &["1F469", ZWJ, "1F469", ZWJ, "1F466"],
            "family: woman, woman, boy",
            "same-sex parent family",
        ),
        zwj(
            &["1F468", ZWJ, "1F468", ZWJ, "1F467", ZWJ, "1F466"],
            "family: man, man, girl, boy",
            "extended family combination",
        ),
    ]
}

fn professions() -> Vec<Value> {
    vec![
        zwj(&["1F469", ZWJ, "1F3EB"], "woman teacher", "profession with female emoji"),
        zwj(&["1F468", ZWJ, "1F373"], "man cook", "profession with male emoji"),
        zwj(&["1F469", ZWJ, "1F4BB"], "woman technologist", "modern profession"),
    ]
}

fn couples() -> Vec<Value> {
    vec![
        zwj(
            &["1F469", ZWJ, "2764", VS16, ZWJ, "1F468"],
            "couple with heart: woman, man",
            "romantic combination with heart",
        ),
        zwj(
            &["1F468", ZWJ, "2764", VS16, ZWJ, "1F468"],
            "couple with heart: man, man",
            "same-sex couple with heart",
        ),
        zwj(
            &["1F469", ZWJ, "2764", VS16, ZWJ, "1F469"],
            "couple with heart: woman, woman",
            "same-sex couple with heart",
        ),
    ]
}

/// Loom for `emoji-zwj-sequences.txt`
pub fn zwj_sequences() -> Result<ZwjSequencesLoom> {
    let config = LoomConfig::new(
        sequence_input_schema("zwj-sequences")?,
        table_options_schema("zwj-sequences")?,
        render_sequence,
    )
    .eof(true)
    .preset("familyCombinations", family_combinations())
    .preset("professions", professions())
    .preset("couples", couples());

    Ok(create_loom(config))
}
