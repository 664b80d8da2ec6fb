//! Per-render context handed to templates and predicates

use serde::de::DeserializeOwned;

use crate::version::{CompareOp, UnicodeVersion};

/// Options accepted by a loom
///
/// Every options shape carries the Unicode version being generated for; the
/// context's version helpers compare against it.
pub trait LoomOptions: DeserializeOwned {
    fn version(&self) -> &str;
}

/// Read-only view of one render call
///
/// Built fresh for every call and only ever lent out by shared reference,
/// so templates and predicates cannot change what later items see.
#[derive(Debug, Clone)]
pub struct LoomContext<O> {
    options: O,
    version: UnicodeVersion,
}

impl<O> LoomContext<O> {
    pub(crate) fn new(options: O, version: UnicodeVersion) -> Self {
        Self { options, version }
    }

    /// The validated options of this call
    pub fn options(&self) -> &O {
        &self.options
    }

    /// The parsed `version` option
    pub fn version(&self) -> &UnicodeVersion {
        &self.version
    }

    /// Check if the configured version is lower than `version`
    pub fn is_version_less_than(&self, version: &str) -> bool {
        self.check(CompareOp::LessThan, version)
    }

    /// Check if the configured version is greater than `version`
    pub fn is_version_greater_than(&self, version: &str) -> bool {
        self.check(CompareOp::GreaterThan, version)
    }

    /// Check if the configured version is equal to `version`
    pub fn is_version_equal(&self, version: &str) -> bool {
        self.check(CompareOp::Equal, version)
    }

    /// Check if the configured version is greater than or equal to `version`
    pub fn is_version_greater_than_or_equal(&self, version: &str) -> bool {
        self.check(CompareOp::GreaterThanOrEqual, version)
    }

    /// Check if the configured version is lower than or equal to `version`
    pub fn is_version_less_than_or_equal(&self, version: &str) -> bool {
        self.check(CompareOp::LessThanOrEqual, version)
    }

    /// # Panics
    ///
    /// Panics if `version` does not parse. Comparands are written by the
    /// loom's author, so a typo here is a broken configuration.
    fn check(&self, op: CompareOp, version: &str) -> bool {
        match UnicodeVersion::parse(version) {
            Ok(other) => self.version.satisfies(op, &other),
            Err(err) => panic!("version comparison `{op} {version:?}` is invalid: {err}"),
        }
    }
}
