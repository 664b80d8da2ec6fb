//! Loomicode
//!
//! Generates synthetic test fixtures in the plain-text formats of the Unicode
//! emoji data files (`emoji-test.txt`, `emoji-sequences.txt`, ...), so that
//! parsers of those files can be tested against any Unicode version without
//! hand-writing fixture text.
//!
//! ## Features
//!
//! - **Schema Validation**: options and items are checked against JSON Schema before rendering
//! - **Version Helpers**: templates and predicates compare the target version, with `3.x` style ranges
//! - **Presets**: named item lists bundled with each generator
//! - **Weaving**: multiply a few sample items into many, optionally seeded
//!
//! ## Architecture
//!
//! ```text
//! LoomConfig ── create_loom ──▶ Loom ── render({ ...options, input }) ──▶ String
//!   ├── input_schema                 └── preset(name).render(options)
//!   ├── options_schema
//!   ├── template(ctx, item)
//!   ├── predicate(ctx, item)
//!   ├── eof
//!   └── presets
//! ```
//!
//! ## Example
//!
//! ```
//! use loomicode::generators::{variations, TableOptions};
//! use serde_json::json;
//!
//! let loom = variations().unwrap();
//! let output = loom
//!     .render(&json!({
//!         "separator": ";",
//!         "commentPrefix": "#",
//!         "version": "15.0",
//!         "input": [{ "codePoints": ["2764", "FE0F"], "style": "emoji", "comment": "heart" }]
//!     }))
//!     .unwrap();
//! assert_eq!(output, "2764 FE0F ; emoji ; # heart\n#EOF\n");
//!
//! let preset = loom.render_preset_with("punctuation", &TableOptions::new("15.0")).unwrap();
//! assert!(preset.ends_with("\n#EOF\n"));
//! ```

pub mod bundled;
pub mod checksum;
pub mod config;
pub mod context;
pub mod error;
pub mod generators;
pub mod loom;
pub mod schema;
pub mod version;
pub mod weave;

pub use checksum::Checksum;
pub use config::LoomSettings;
pub use context::{LoomContext, LoomOptions};
pub use error::{LoomError, Result, WeaveError};
pub use loom::{create_loom, Loom, LoomConfig, Preset, EOF_MARKER};
pub use schema::{Schema, Violation, Violations};
pub use version::{compare, CompareOp, UnicodeVersion};
pub use weave::{weave, weave_one, WeaveOptions};
