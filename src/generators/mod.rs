//! Generators for the Unicode emoji data files
//!
//! Each generator is a [`Loom`](crate::Loom) configured for one file format:
//!
//! | Generator | File | EOF | Presets |
//! |---|---|---|---|
//! | [`emoji_test`] | `emoji-test.txt` | yes | smileys, flags, multipleGroups, invalid |
//! | [`sequences`] | `emoji-sequences.txt` | no | |
//! | [`variations`] | `emoji-variation-sequences.txt` | yes | commonSymbols, punctuation, miscellaneous |
//! | [`zwj_sequences`] | `emoji-zwj-sequences.txt` | yes | familyCombinations, professions, couples |
//!
//! All of them share [`TableOptions`].

mod sequences;
mod variations;
mod zwj_sequences;

pub use emoji_test::{
    emoji_test, EmojiStatus, EmojiTestEntry, EmojiTestGroup, EmojiTestLoom, EmojiTestSubgroup,
};
pub use sequences::{sequences, SequenceEntry, SequencesLoom};
pub use variations::{variations, VariationEntry, VariationsLoom};
pub use zwj_sequences::{zwj_sequences, ZwjSequencesLoom};

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::context::LoomOptions;
use crate::error::Result;
use crate::schema::Schema;

/// Unicode version used when none is configured
pub const DEFAULT_VERSION: &str = "16.0";

/// Field separator used by the Unicode data files
pub const DEFAULT_SEPARATOR: &str = ";";

/// Comment prefix used by the Unicode data files
pub const DEFAULT_COMMENT_PREFIX: &str = "#";

/// Options shared by every generator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableOptions {
    /// Token placed between fields
    pub separator: String,
    /// Token starting the trailing comment
    pub comment_prefix: String,
    /// Unicode version the table is generated for
    ///
    /// Parsed on every render, so a value such as `"latest"` is rejected as
    /// an options violation even by looms that never compare versions.
    pub version: String,
}

impl TableOptions {
    /// Options with the standard `;` / `#` tokens
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            separator: DEFAULT_SEPARATOR.to_string(),
            comment_prefix: DEFAULT_COMMENT_PREFIX.to_string(),
            version: version.into(),
        }
    }

    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    pub fn with_comment_prefix(mut self, comment_prefix: impl Into<String>) -> Self {
        self.comment_prefix = comment_prefix.into();
        self
    }
}

impl Default for TableOptions {
    fn default() -> Self {
        Self::new(DEFAULT_VERSION)
    }
}

impl LoomOptions for TableOptions {
    fn version(&self) -> &str {
        &self.version
    }
}

/// Schema for [`TableOptions`]
pub(crate) fn table_options_schema(name: &str) -> Result<Schema> {
    Schema::new(
        format!("{name}.options"),
        json!({
            "type": "object",
            "required": ["separator", "commentPrefix", "version"],
            "properties": {
                "separator": { "type": "string" },
                "commentPrefix": { "type": "string" },
                "version": { "type": "string" }
            }
        }),
    )
}

/// Space separated code points, as written in the data files
pub(crate) fn join_code_points(code_points: &[String]) -> String {
    code_points.join(" ")
}
