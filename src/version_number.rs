use std::cmp::Ordering;
use std::fmt;
use std::sync::LazyLock;

use crate::comparator::alphanum_cmp;
use crate::error::{Error, Result};

const MIN_SEGMENTS: usize = 3;
const SEPARATOR: char = '.';

static UNKNOWN: LazyLock<VersionNumber> = LazyLock::new(|| VersionNumber {
    segments: vec![String::new(); MIN_SEGMENTS],
    extension: String::new(),
});

/// A multi-segment version (`major.minor.bugfix[.more…]`) plus a free-form
/// extension such as `-RC1` or ` beta`.
///
/// Segments keep their literal digits: `"007"` and `"7"` are different
/// segments. An empty segment stands for "not present". There are always at
/// least three segments.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VersionNumber {
    segments: Vec<String>,
    extension: String,
}

impl VersionNumber {
    /// Build a version from its segments and extension, padding to three
    /// segments with empty ones.
    pub fn new<S: Into<String>>(
        segments: impl IntoIterator<Item = S>,
        extension: impl Into<String>,
    ) -> Result<Self> {
        let mut segments: Vec<String> = segments.into_iter().map(Into::into).collect();
        if let Some(bad) = segments
            .iter()
            .find(|s| !s.bytes().all(|b| b.is_ascii_digit()))
        {
            return Err(Error::InvalidVersionSegment(bad.clone()));
        }
        if segments.len() < MIN_SEGMENTS {
            segments.resize(MIN_SEGMENTS, String::new());
        }
        Ok(Self {
            segments,
            extension: extension.into(),
        })
    }

    /// Construct from segments already known to be digit runs.
    pub(crate) fn from_digit_runs(mut segments: Vec<String>, extension: String) -> Self {
        debug_assert!(segments.iter().all(|s| s.bytes().all(|b| b.is_ascii_digit())));
        if segments.len() < MIN_SEGMENTS {
            segments.resize(MIN_SEGMENTS, String::new());
        }
        Self {
            segments,
            extension,
        }
    }

    /// The shared "no version detected" value.
    pub fn unknown() -> &'static VersionNumber {
        &UNKNOWN
    }

    pub fn is_unknown(&self) -> bool {
        self == Self::unknown()
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn major(&self) -> &str {
        &self.segments[0]
    }

    pub fn minor(&self) -> &str {
        &self.segments[1]
    }

    pub fn bugfix(&self) -> &str {
        &self.segments[2]
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Dot-joined segments up to the first empty one, followed by the
    /// extension.
    pub fn to_version_string(&self) -> String {
        let mut out = join_segments(&self.segments);
        out.push_str(&self.extension);
        out
    }
}

fn join_segments(segments: &[String]) -> String {
    let mut out = String::new();
    for (i, segment) in segments.iter().take_while(|s| !s.is_empty()).enumerate() {
        if i > 0 {
            out.push(SEPARATOR);
        }
        out.push_str(segment);
    }
    out
}

impl Default for VersionNumber {
    fn default() -> Self {
        UNKNOWN.clone()
    }
}

impl fmt::Display for VersionNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_version_string())
    }
}

impl Ord for VersionNumber {
    fn cmp(&self, other: &Self) -> Ordering {
        self.segments
            .iter()
            .zip(&other.segments)
            .map(|(a, b)| alphanum_cmp(a, b))
            .find(|o| *o != Ordering::Equal)
            .unwrap_or(Ordering::Equal)
            .then_with(|| self.segments.len().cmp(&other.segments.len()))
            .then_with(|| self.extension.cmp(&other.extension))
            .then_with(|| alphanum_cmp(&self.to_version_string(), &other.to_version_string()))
    }
}

impl PartialOrd for VersionNumber {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
