//! Version parsing and comparison
//!
//! Unicode data versions are dotted numeric strings ("15.1", "3.0.1") that
//! are compared segment by segment rather than as text. A trailing `x`
//! (or `X` / `*`) segment is a wildcard, so `"3.x"` stands for the whole
//! 3.y.z family:
//!
//! ```
//! use loomicode::version::compare;
//!
//! assert!(compare("14.0", "3.x", ">=").unwrap());
//! assert!(!compare("2.0", "3.x", ">=").unwrap());
//! assert!(compare("3.2", "3.x", "=").unwrap());
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use semver::{BuildMetadata, Prerelease};

use crate::error::{LoomError, Result};

/// Versions may have at most this many dotted segments
const MAX_SEGMENTS: usize = 4;

/// Prerelease and build suffixes need at least major.minor.patch
const MIN_SEGMENTS_FOR_SUFFIX: usize = 3;

/// One dotted component of a version
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment {
    Number(u64),
    /// `x`, `X` or `*`; equal to any other segment
    Wildcard,
}

impl Segment {
    fn parse(raw: &str) -> Option<Self> {
        match raw {
            "x" | "X" | "*" => Some(Segment::Wildcard),
            _ if !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit()) => {
                raw.parse().ok().map(Segment::Number)
            }
            _ => None,
        }
    }

    fn compare(self, other: Segment) -> Ordering {
        match (self, other) {
            (Segment::Number(a), Segment::Number(b)) => a.cmp(&b),
            _ => Ordering::Equal,
        }
    }
}

/// A parsed version string
///
/// Comparison is deliberately not exposed through `Ord`: wildcards make
/// equality non-transitive (`3.1 = 3.x = 3.2`, yet `3.1 < 3.2`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnicodeVersion {
    raw: String,
    segments: Vec<Segment>,
    pre: Prerelease,
}

impl UnicodeVersion {
    /// Parse a version such as `"15.1"`, `"3.x"`, `"v1.0.0-beta.2"`
    pub fn parse(input: &str) -> Result<Self> {
        let invalid = || LoomError::InvalidVersion(input.to_string());

        let trimmed = input
            .trim()
            .trim_start_matches(|c| matches!(c, 'v' | 'V' | '^' | '~' | '<' | '>' | '='));

        let (rest, build) = match trimmed.split_once('+') {
            Some((rest, build)) => (rest, Some(build)),
            None => (trimmed, None),
        };
        let (core, pre) = match rest.split_once('-') {
            Some((core, pre)) => (core, Some(pre)),
            None => (rest, None),
        };

        let segments = core
            .split('.')
            .map(Segment::parse)
            .collect::<Option<Vec<_>>>()
            .ok_or_else(invalid)?;

        if segments.len() > MAX_SEGMENTS {
            return Err(invalid());
        }
        // The leading segment is always a concrete number
        if !matches!(segments.first(), Some(Segment::Number(_))) {
            return Err(invalid());
        }

        if (pre.is_some() || build.is_some()) && segments.len() < MIN_SEGMENTS_FOR_SUFFIX {
            return Err(invalid());
        }
        if pre == Some("") || build == Some("") {
            return Err(invalid());
        }

        let pre = match pre {
            Some(pre) => Prerelease::new(pre).map_err(|_| invalid())?,
            None => Prerelease::EMPTY,
        };
        if let Some(build) = build {
            BuildMetadata::new(build).map_err(|_| invalid())?;
        }

        Ok(Self {
            raw: input.to_string(),
            segments,
            pre,
        })
    }

    /// The string this version was parsed from
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// The dotted segments, without prerelease or build suffix
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Whether any segment is a wildcard
    pub fn is_range(&self) -> bool {
        self.segments.contains(&Segment::Wildcard)
    }

    /// Compare two versions
    ///
    /// Segments are compared numerically from the left; a missing segment
    /// counts as `0` and a wildcard on either side counts as equal. When the
    /// segments tie, a prerelease sorts below the plain release.
    pub fn compare_to(&self, other: &UnicodeVersion) -> Ordering {
        let len = self.segments.len().max(other.segments.len());
        for i in 0..len {
            let a = self.segments.get(i).copied().unwrap_or(Segment::Number(0));
            let b = other.segments.get(i).copied().unwrap_or(Segment::Number(0));
            match a.compare(b) {
                Ordering::Equal => continue,
                ordering => return ordering,
            }
        }

        match (self.pre.is_empty(), other.pre.is_empty()) {
            (true, true) => Ordering::Equal,
            (false, false) => self.pre.cmp(&other.pre),
            (false, true) => Ordering::Less,
            (true, false) => Ordering::Greater,
        }
    }

    /// Check whether `self <op> other` holds
    pub fn satisfies(&self, op: CompareOp, other: &UnicodeVersion) -> bool {
        op.accepts(self.compare_to(other))
    }
}

impl fmt::Display for UnicodeVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl FromStr for UnicodeVersion {
    type Err = LoomError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Relational operator for version comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompareOp {
    LessThan,
    GreaterThan,
    Equal,
    NotEqual,
    GreaterThanOrEqual,
    LessThanOrEqual,
}

impl CompareOp {
    /// The operator's symbol (e.g. `">="`)
    pub fn symbol(&self) -> &'static str {
        match self {
            CompareOp::LessThan => "<",
            CompareOp::GreaterThan => ">",
            CompareOp::Equal => "=",
            CompareOp::NotEqual => "!=",
            CompareOp::GreaterThanOrEqual => ">=",
            CompareOp::LessThanOrEqual => "<=",
        }
    }

    /// Whether an ordering of `lhs.compare_to(rhs)` satisfies `lhs <op> rhs`
    pub fn accepts(&self, ordering: Ordering) -> bool {
        match self {
            CompareOp::LessThan => ordering == Ordering::Less,
            CompareOp::GreaterThan => ordering == Ordering::Greater,
            CompareOp::Equal => ordering == Ordering::Equal,
            CompareOp::NotEqual => ordering != Ordering::Equal,
            CompareOp::GreaterThanOrEqual => ordering != Ordering::Less,
            CompareOp::LessThanOrEqual => ordering != Ordering::Greater,
        }
    }
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for CompareOp {
    type Err = LoomError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "<" => Ok(CompareOp::LessThan),
            ">" => Ok(CompareOp::GreaterThan),
            "=" | "==" => Ok(CompareOp::Equal),
            "!=" => Ok(CompareOp::NotEqual),
            ">=" => Ok(CompareOp::GreaterThanOrEqual),
            "<=" => Ok(CompareOp::LessThanOrEqual),
            other => Err(LoomError::InvalidOperator(other.to_string())),
        }
    }
}

/// Compare two version strings with a textual operator
pub fn compare(a: &str, b: &str, op: &str) -> Result<bool> {
    let op: CompareOp = op.parse()?;
    let a = UnicodeVersion::parse(a)?;
    let b = UnicodeVersion::parse(b)?;
    Ok(a.satisfies(op, &b))
}
