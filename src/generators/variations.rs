//! `emoji-variation-sequences.txt`

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::{join_code_points, table_options_schema, TableOptions};
use crate::context::LoomContext;
use crate::error::Result;
use crate::loom::{create_loom, Loom, LoomConfig};
use crate::schema::Schema;

pub type VariationsLoom = Loom<VariationEntry, TableOptions>;

/// Text presentation selector
const VS15: &str = "FE0E";
/// Emoji presentation selector
const VS16: &str = "FE0F";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariationEntry {
    pub code_points: Vec<String>,
    /// `text` or `emoji`
    pub style: String,
    pub comment: String,
}

fn input_schema() -> Result<Schema> {
    Schema::new(
        "variations.input",
        json!({
            "type": "object",
            "required": ["codePoints", "style", "comment"],
            "properties": {
                "codePoints": { "type": "array", "items": { "type": "string" } },
                "style": { "type": "string" },
                "comment": { "type": "string" }
            }
        }),
    )
}

fn render_variation(ctx: &LoomContext<TableOptions>, item: &VariationEntry) -> String {
    let options = ctx.options();
    format!(
        "{} {} {} {} {} {}",
        join_code_points(&item.code_points),
        options.separator,
        item.style,
        options.separator,
        options.comment_prefix,
        item.comment,
    )
}

/// Text and emoji presentation of the same base character
fn pair(base: &str, text_comment: &str, emoji_comment: &str) -> [Value; 2] {
    [
        json!({ "codePoints": [base, VS15], "style": "text", "comment": text_comment }),
        json!({ "codePoints": [base, VS16], "style": "emoji", "comment": emoji_comment }),
    ]
}

fn presets(pairs: &[(&str, &str, &str)]) -> Vec<Value> {
    pairs
        .iter()
        .flat_map(|(base, text, emoji)| pair(base, text, emoji))
        .collect()
}

/// Loom for `emoji-variation-sequences.txt`
pub fn variations() -> Result<VariationsLoom> {
    let config = LoomConfig::new(input_schema()?, table_options_schema("variations")?, render_variation)
        .eof(true)
        .preset(
            "commonSymbols",
            presets(&[
                ("2764", "heart as text symbol", "heart as emoji symbol"),
                ("2B50", "star as text symbol", "star as emoji symbol"),
            ]),
        )
        .preset(
            "punctuation",
            presets(&[
                ("2757", "exclamation mark as text", "exclamation mark as emoji"),
                ("2753", "question mark as text", "question mark as emoji"),
            ]),
        )
        .preset(
            "miscellaneous",
            presets(&[
                ("2600", "sun as text symbol", "sun as emoji symbol"),
                ("2695", "medical symbol as text", "medical symbol as emoji"),
            ]),
        );

    Ok(create_loom(config))
}
