//! Sample datasets embedded at compile time
//!
//! The files under `bundled/` are real-looking excerpts of Unicode data in
//! the item shape of the matching generator. Generators re-export them as
//! presets.

use include_dir::{include_dir, Dir};
use serde_json::Value;

use crate::error::{LoomError, Result};

static BUNDLED: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/bundled");

/// Emoji test excerpt: the "Smileys & Emotion" group
pub const EMOJI_TEST_SMILEYS: &str = "emoji-test-smileys.json";

/// Emoji test excerpt: the "Flags" group
pub const EMOJI_TEST_FLAGS: &str = "emoji-test-flags.json";

/// Names of every bundled dataset
pub fn names() -> impl Iterator<Item = &'static str> {
    BUNDLED
        .files()
        .filter_map(|file| file.path().to_str())
}

/// Load a bundled dataset as a list of items
pub fn load(name: &str) -> Result<Vec<Value>> {
    let content = BUNDLED
        .get_file(name)
        .and_then(|file| file.contents_utf8())
        .ok_or_else(|| LoomError::BundledNotFound(name.to_string()))?;

    Ok(serde_json::from_str(content)?)
}
