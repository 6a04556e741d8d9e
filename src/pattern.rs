use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use fancy_regex::{Captures, Regex};

use crate::error::{Error, Result};

/// Translate a Perl-style `/body/flags` pattern into an inline-flag regex
/// string (`(?is)body`). Text without slash delimiters passes through as-is.
///
/// Supported flags are `i`, `s`, `m` and `x`; any other letter is dropped.
/// `\/` inside the body is unescaped to `/`.
pub(crate) fn convert_pattern(text: &str) -> Result<String> {
    let Some(inner) = text.strip_prefix('/') else {
        return Ok(text.to_owned());
    };
    let Some(close) = inner.rfind('/') else {
        return Err(Error::InvalidPattern(text.to_owned()));
    };
    let (body, flags) = (&inner[..close], &inner[close + 1..]);
    if !flags.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(Error::InvalidPattern(text.to_owned()));
    }

    let inline: String = flags
        .chars()
        .filter(|c| matches!(*c, 'i' | 's' | 'm' | 'x'))
        .collect();
    let mut out = String::with_capacity(body.len() + inline.len() + 3);
    if !inline.is_empty() {
        out.push_str("(?");
        out.push_str(&inline);
        out.push(')');
    }

    let mut chars = body.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('/') => out.push('/'),
            Some(next) => {
                out.push('\\');
                out.push(next);
            }
            None => out.push('\\'),
        }
    }
    Ok(out)
}

/// Compile a dataset pattern, see [`convert_pattern`].
pub fn compile_pattern(text: &str) -> Result<Regex> {
    Ok(Regex::new(&convert_pattern(text)?)?)
}

/// A compiled pattern with an identifier and a match priority.
///
/// Patterns are ordered by position alone: two patterns at the same position
/// compare equal under [`OrderedPattern::cmp_position`] even when their ids or
/// expressions differ. Equality and hashing look at all three fields.
pub trait OrderedPattern {
    fn id(&self) -> u32;
    fn position(&self) -> u32;
    fn pattern(&self) -> &Regex;

    fn cmp_position(&self, other: &Self) -> Ordering
    where
        Self: Sized,
    {
        self.position().cmp(&other.position())
    }

    /// Captures of the leftmost match anywhere in `text`. Regex runtime
    /// errors (backtrack limit) count as no match.
    fn captures<'t>(&self, text: &'t str) -> Option<Captures<'t>> {
        self.pattern().captures(text).ok().flatten()
    }

    fn is_match(&self, text: &str) -> bool {
        self.pattern().is_match(text).unwrap_or(false)
    }
}

macro_rules! ordered_pattern {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        pub struct $name {
            id: u32,
            position: u32,
            pattern: Regex,
        }

        impl $name {
            pub fn new(id: u32, position: u32, pattern: Regex) -> Self {
                Self { id, position, pattern }
            }

            /// Compile a `/body/flags` pattern text.
            pub fn compile(id: u32, position: u32, text: &str) -> Result<Self> {
                Ok(Self::new(id, position, compile_pattern(text)?))
            }
        }

        impl OrderedPattern for $name {
            fn id(&self) -> u32 {
                self.id
            }

            fn position(&self) -> u32 {
                self.position
            }

            fn pattern(&self) -> &Regex {
                &self.pattern
            }
        }

        impl PartialEq for $name {
            fn eq(&self, other: &Self) -> bool {
                self.id == other.id
                    && self.position == other.position
                    && self.pattern.as_str() == other.pattern.as_str()
            }
        }

        impl Eq for $name {}

        impl Hash for $name {
            fn hash<H: Hasher>(&self, state: &mut H) {
                self.id.hash(state);
                self.position.hash(state);
                self.pattern.as_str().hash(state);
            }
        }
    };
}

ordered_pattern! {
    /// Pattern recognising a browser (or other client) in a user-agent string.
    BrowserPattern
}

ordered_pattern! {
    /// Pattern recognising an operating system in a user-agent string.
    OperatingSystemPattern
}

ordered_pattern! {
    /// Pattern recognising a device in a user-agent string.
    DevicePattern
}

/// Sort by position; ties keep their existing (id) order.
pub(crate) fn sort_by_position<P: OrderedPattern>(patterns: &mut [P]) {
    patterns.sort_by(|a, b| a.cmp_position(b));
}
