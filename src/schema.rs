//! JSON Schema backed validators
//!
//! A [`Schema`] is compiled once when a generator is defined and then used to
//! validate every options object and input item it is handed. Failures are
//! reported as [`Violations`]: one entry per problem, each naming the JSON
//! pointer of the offending field and what the schema expected there.

use std::fmt;

use jsonschema::{Draft, JSONSchema};
use serde_json::Value;

use crate::error::{LoomError, Result};

/// A compiled JSON Schema
pub struct Schema {
    /// Name used in diagnostics (e.g. "variations.input")
    name: String,
    /// The schema document as written
    content: Value,
    compiled: JSONSchema,
}

impl Schema {
    /// Compile a Draft 7 schema
    pub fn new(name: impl Into<String>, content: Value) -> Result<Self> {
        let name = name.into();
        let compiled = JSONSchema::options()
            .with_draft(Draft::Draft7)
            .compile(&content)
            .map_err(|e| LoomError::InvalidSchema {
                name: name.clone(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            name,
            content,
            compiled,
        })
    }

    /// Get the schema name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the schema document
    pub fn content(&self) -> &Value {
        &self.content
    }

    /// Check a value without collecting diagnostics
    pub fn is_valid(&self, instance: &Value) -> bool {
        self.compiled.is_valid(instance)
    }

    /// Validate a value, collecting every violation
    pub fn validate(&self, instance: &Value) -> std::result::Result<(), Violations> {
        match self.compiled.validate(instance) {
            Ok(()) => Ok(()),
            Err(errors) => Err(Violations::new(
                errors
                    .map(|error| Violation {
                        instance_path: error.instance_path.to_string(),
                        schema_path: error.schema_path.to_string(),
                        message: error.to_string(),
                    })
                    .collect(),
            )),
        }
    }
}

impl fmt::Debug for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Schema")
            .field("name", &self.name)
            .field("content", &self.content)
            .finish_non_exhaustive()
    }
}

/// A single validation problem
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// JSON pointer to the offending value ("" for the root)
    pub instance_path: String,
    /// JSON pointer to the schema keyword that rejected it
    pub schema_path: String,
    /// What was expected, e.g. `null is not of type "string"`
    pub message: String,
}

impl Violation {
    /// A violation that did not come from the schema itself
    pub fn at(instance_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            instance_path: instance_path.into(),
            schema_path: String::new(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.instance_path.is_empty() {
            write!(f, "(root): {}", self.message)
        } else {
            write!(f, "{}: {}", self.instance_path, self.message)
        }
    }
}

/// Every violation found in one value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violations(Vec<Violation>);

impl Violations {
    pub fn new(violations: Vec<Violation>) -> Self {
        Self(violations)
    }

    pub fn single(violation: Violation) -> Self {
        Self(vec![violation])
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Violation> {
        self.0.iter()
    }

    /// True if any violation mentions `needle` in its path or message
    pub fn mentions(&self, needle: &str) -> bool {
        self.0
            .iter()
            .any(|v| v.instance_path.contains(needle) || v.message.contains(needle))
    }
}

impl fmt::Display for Violations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, violation) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{violation}")?;
        }
        Ok(())
    }
}
