//! The loom engine
//!
//! A [`Loom`] turns a list of items into a text table. Each call runs the
//! same pipeline:
//!
//! ```text
//! options ──validate──▶ LoomContext ─┐
//! input[] ──validate──▶ items ───────┴─▶ predicate ─▶ template ─▶ lines
//!                                                                   │
//!                                  "#EOF\n" if enabled and non-blank ┤
//!                                                                   ▼
//!                                                          lines.join("\n")
//! ```
//!
//! Validation is finished before the first template runs, so a call either
//! returns the whole table or an error and never a partial result.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::checksum::Checksum;
use crate::context::{LoomContext, LoomOptions};
use crate::error::{LoomError, Result};
use crate::schema::{Schema, Violation, Violations};
use crate::version::UnicodeVersion;

/// Terminal line appended by looms with `eof` enabled
pub const EOF_MARKER: &str = "#EOF\n";

/// Request field holding the items to render
pub const INPUT_FIELD: &str = "input";

/// Renders one item into one output line (which may itself contain newlines)
pub type Template<I, O> = Box<dyn Fn(&LoomContext<O>, &I) -> String + Send + Sync>;

/// Decides whether an item is rendered at all
pub type Predicate<I, O> = Box<dyn Fn(&LoomContext<O>, &I) -> bool + Send + Sync>;

/// Everything a loom is built from
pub struct LoomConfig<I, O> {
    /// Schema every input item must satisfy
    pub input_schema: Schema,
    /// Schema the options (without `input`) must satisfy
    pub options_schema: Schema,
    pub template: Template<I, O>,
    /// Items for which this returns false are skipped; `None` keeps all
    pub predicate: Option<Predicate<I, O>>,
    /// Append [`EOF_MARKER`] when anything non-blank was rendered
    pub eof: bool,
    /// Named, fixed input arrays
    pub presets: BTreeMap<String, Vec<Value>>,
}

impl<I, O> LoomConfig<I, O> {
    /// Create a configuration with no predicate, no EOF marker and no presets
    pub fn new<F>(input_schema: Schema, options_schema: Schema, template: F) -> Self
    where
        F: Fn(&LoomContext<O>, &I) -> String + Send + Sync + 'static,
    {
        Self {
            input_schema,
            options_schema,
            template: Box::new(template),
            predicate: None,
            eof: false,
            presets: BTreeMap::new(),
        }
    }

    /// Only render items accepted by `predicate`
    pub fn predicate<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&LoomContext<O>, &I) -> bool + Send + Sync + 'static,
    {
        self.predicate = Some(Box::new(predicate));
        self
    }

    pub fn eof(mut self, eof: bool) -> Self {
        self.eof = eof;
        self
    }

    /// Attach a named input array
    pub fn preset(mut self, name: impl Into<String>, items: impl IntoIterator<Item = Value>) -> Self {
        self.presets.insert(name.into(), items.into_iter().collect());
        self
    }
}

/// Build a loom from its configuration
///
/// Nothing is validated here; schemas are only applied when rendering.
pub fn create_loom<I, O>(config: LoomConfig<I, O>) -> Loom<I, O> {
    Loom::new(config)
}

/// A configured renderer for one table format
pub struct Loom<I, O> {
    config: LoomConfig<I, O>,
}

impl<I, O> Loom<I, O> {
    pub fn new(config: LoomConfig<I, O>) -> Self {
        Self { config }
    }

    pub fn input_schema(&self) -> &Schema {
        &self.config.input_schema
    }

    pub fn options_schema(&self) -> &Schema {
        &self.config.options_schema
    }

    /// Whether output is terminated with an EOF marker
    pub fn has_eof(&self) -> bool {
        self.config.eof
    }

    /// Names of all presets, sorted
    pub fn presets(&self) -> impl Iterator<Item = &str> {
        self.config.presets.keys().map(String::as_str)
    }

    /// Look up a preset by name
    pub fn preset(&self, name: &str) -> Option<Preset<'_, I, O>> {
        self.config
            .presets
            .get_key_value(name)
            .map(|(name, items)| Preset {
                loom: self,
                name,
                items,
            })
    }
}

impl<I, O> Loom<I, O>
where
    I: for<'de> Deserialize<'de>,
    O: LoomOptions,
{
    /// Render a `{ ...options, "input": [...] }` request
    pub fn render(&self, request: &Value) -> Result<String> {
        let ctx = self.validate_options(request)?;

        let items = match request.get(INPUT_FIELD) {
            Some(Value::Array(items)) => items,
            Some(other) => {
                return Err(LoomError::MalformedRequest(format!(
                    "`{INPUT_FIELD}` must be an array, got {}",
                    type_name(other)
                )))
            }
            None => {
                return Err(LoomError::MalformedRequest(format!(
                    "missing `{INPUT_FIELD}` array"
                )))
            }
        };

        let items = self.validate_input(items)?;
        Ok(self.weave_lines(&ctx, &items))
    }

    /// Render typed options and items
    ///
    /// Both are serialized first and then go through the same validation as
    /// [`Loom::render`].
    pub fn render_with<P, T>(&self, options: &P, input: &[T]) -> Result<String>
    where
        P: Serialize,
        T: Serialize,
    {
        let options = serde_json::to_value(options)?;
        let items = input
            .iter()
            .map(serde_json::to_value)
            .collect::<std::result::Result<Vec<_>, _>>()?;
        self.render_items(&options, &items)
    }

    /// Render the preset `name` with the given options
    pub fn render_preset(&self, name: &str, options: &Value) -> Result<String> {
        self.find_preset(name)?.render(options)
    }

    /// Render the preset `name` with typed options
    pub fn render_preset_with<P: Serialize>(&self, name: &str, options: &P) -> Result<String> {
        self.find_preset(name)?.render_with(options)
    }

    /// Render a request and fingerprint the result
    pub fn render_checksum(&self, request: &Value) -> Result<Checksum> {
        self.render(request).map(|output| Checksum::from_str(&output))
    }

    fn find_preset(&self, name: &str) -> Result<Preset<'_, I, O>> {
        self.preset(name).ok_or_else(|| LoomError::PresetNotFound {
            name: name.to_string(),
            available: self.presets().map(str::to_string).collect(),
        })
    }

    fn render_items(&self, options: &Value, items: &[Value]) -> Result<String> {
        let ctx = self.validate_options(options)?;
        let items = self.validate_input(items)?;
        Ok(self.weave_lines(&ctx, &items))
    }

    fn validate_options(&self, options: &Value) -> Result<LoomContext<O>> {
        // `input` belongs to the request, not to the options shape
        let stripped;
        let options = match options {
            Value::Object(fields) if fields.contains_key(INPUT_FIELD) => {
                let mut fields = fields.clone();
                fields.remove(INPUT_FIELD);
                stripped = Value::Object(fields);
                &stripped
            }
            Value::Object(_) => options,
            other => {
                return Err(LoomError::MalformedRequest(format!(
                    "request must be an object, got {}",
                    type_name(other)
                )))
            }
        };

        self.config
            .options_schema
            .validate(options)
            .map_err(|violations| LoomError::OptionsValidation { violations })?;

        let options = O::deserialize(options).map_err(|e| LoomError::OptionsValidation {
            violations: Violations::single(Violation::at("", e.to_string())),
        })?;

        let version = UnicodeVersion::parse(options.version()).map_err(|_| {
            LoomError::OptionsValidation {
                violations: Violations::single(Violation::at(
                    "/version",
                    format!("{:?} is not a valid version", options.version()),
                )),
            }
        })?;

        Ok(LoomContext::new(options, version))
    }

    fn validate_input(&self, items: &[Value]) -> Result<Vec<I>> {
        items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                self.config
                    .input_schema
                    .validate(item)
                    .map_err(|violations| LoomError::InputValidation { index, violations })?;

                I::deserialize(item).map_err(|e| LoomError::InputValidation {
                    index,
                    violations: Violations::single(Violation::at("", e.to_string())),
                })
            })
            .collect()
    }

    fn weave_lines(&self, ctx: &LoomContext<O>, items: &[I]) -> String {
        let mut lines = Vec::with_capacity(items.len() + 1);
        let mut skipped = 0usize;

        for item in items {
            if let Some(predicate) = &self.config.predicate {
                if !predicate(ctx, item) {
                    skipped += 1;
                    continue;
                }
            }
            lines.push((self.config.template)(ctx, item));
        }

        let eof = self.config.eof && lines.iter().any(|line| !line.trim().is_empty());
        if eof {
            lines.push(EOF_MARKER.to_string());
        }

        tracing::debug!(
            loom = self.config.input_schema.name(),
            version = %ctx.version(),
            rendered = lines.len() - usize::from(eof),
            skipped,
            eof,
            "rendered loom"
        );

        lines.join("\n")
    }
}

impl<I, O> fmt::Debug for Loom<I, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Loom")
            .field("input_schema", &self.config.input_schema.name())
            .field("options_schema", &self.config.options_schema.name())
            .field("has_predicate", &self.config.predicate.is_some())
            .field("eof", &self.config.eof)
            .field("presets", &self.config.presets.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// A preset bound to its loom
///
/// Rendering a preset is the same as rendering the loom with the preset's
/// items as `input`.
pub struct Preset<'a, I, O> {
    loom: &'a Loom<I, O>,
    name: &'a str,
    items: &'a [Value],
}

impl<'a, I, O> Preset<'a, I, O> {
    pub fn name(&self) -> &'a str {
        self.name
    }

    pub fn items(&self) -> &'a [Value] {
        self.items
    }
}

impl<'a, I, O> Preset<'a, I, O>
where
    I: for<'de> Deserialize<'de>,
    O: LoomOptions,
{
    /// Render with options given as JSON; an `input` field is ignored
    pub fn render(&self, options: &Value) -> Result<String> {
        self.loom.render_items(options, self.items)
    }

    pub fn render_with<P: Serialize>(&self, options: &P) -> Result<String> {
        let options = serde_json::to_value(options)?;
        self.render(&options)
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
