//! `emoji-sequences.txt`

use serde::{Deserialize, Serialize};
use serde_json::json;

use super::{join_code_points, table_options_schema, TableOptions};
use crate::context::LoomContext;
use crate::error::Result;
use crate::loom::{create_loom, Loom, LoomConfig};
use crate::schema::Schema;

pub type SequencesLoom = Loom<SequenceEntry, TableOptions>;

/// One line of a sequence table (also used for ZWJ sequences)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SequenceEntry {
    pub code_points: Vec<String>,
    /// Sequence type, e.g. `Basic_Emoji` or `RGI_Emoji_ZWJ_Sequence`
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
    pub comment: String,
}

pub(crate) fn sequence_input_schema(name: &str) -> Result<Schema> {
    Schema::new(
        format!("{name}.input"),
        json!({
            "type": "object",
            "required": ["codePoints", "type", "description", "comment"],
            "properties": {
                "codePoints": { "type": "array", "items": { "type": "string" } },
                "type": { "type": "string" },
                "description": { "type": "string" },
                "comment": { "type": "string" }
            }
        }),
    )
}

pub(crate) fn render_sequence(ctx: &LoomContext<TableOptions>, item: &SequenceEntry) -> String {
    let options = ctx.options();
    format!(
        "{} {} {} {} {} {} {}",
        join_code_points(&item.code_points),
        options.separator,
        item.kind,
        options.separator,
        item.description,
        options.comment_prefix,
        item.comment,
    )
}

/// Loom for `emoji-sequences.txt`
pub fn sequences() -> Result<SequencesLoom> {
    Ok(create_loom(LoomConfig::new(
        sequence_input_schema("sequences")?,
        table_options_schema("sequences")?,
        render_sequence,
    )))
}
