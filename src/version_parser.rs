//! Version extraction from free-form text.
//!
//! A version run is a digit sequence optionally continued by `.digits`
//! groups. Letters glued directly onto the run (`3.0b2`) or introduced by a
//! single `-`/`_` (`1.0-beta`) form its extension.

use crate::{OperatingSystemFamily, VersionNumber};

/// Byte offsets of one version run: `[start, numeric_end)` holds the dotted
/// digits, `[numeric_end, end)` the extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Run {
    start: usize,
    numeric_end: usize,
    end: usize,
}

fn digits_end(bytes: &[u8], mut i: usize) -> usize {
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    i
}

fn numeric_end(bytes: &[u8], start: usize) -> usize {
    let mut end = digits_end(bytes, start);
    while end + 1 < bytes.len() && bytes[end] == b'.' && bytes[end + 1].is_ascii_digit() {
        end = digits_end(bytes, end + 1);
    }
    end
}

fn extension_end(bytes: &[u8], start: usize) -> usize {
    let alnum_end = |mut i: usize| {
        while i < bytes.len() && bytes[i].is_ascii_alphanumeric() {
            i += 1;
        }
        i
    };
    match bytes.get(start).copied() {
        Some(b) if b.is_ascii_alphabetic() => alnum_end(start),
        Some(b'-' | b'_') if bytes.get(start + 1).is_some_and(u8::is_ascii_alphanumeric) => {
            alnum_end(start + 1)
        }
        _ => start,
    }
}

fn runs(text: &str) -> impl Iterator<Item = Run> + '_ {
    let bytes = text.as_bytes();
    let mut i = 0;
    std::iter::from_fn(move || {
        while i < bytes.len() && !bytes[i].is_ascii_digit() {
            i += 1;
        }
        if i >= bytes.len() {
            return None;
        }
        let start = i;
        let numeric_end = numeric_end(bytes, start);
        let end = extension_end(bytes, numeric_end);
        i = end;
        Some(Run {
            start,
            numeric_end,
            end,
        })
    })
}

fn to_version(text: &str, run: Run) -> VersionNumber {
    let segments = text[run.start..run.numeric_end]
        .split('.')
        .map(str::to_owned)
        .collect();
    VersionNumber::from_digit_runs(segments, text[run.numeric_end..run.end].to_owned())
}

/// Parse an isolated version token such as `"13.0.782.112"` or `"1.0-RC1"`.
///
/// Everything after the leading dotted digits becomes the extension
/// (right-trimmed). A token that does not start with a digit yields a version
/// with empty segments and the whole token as extension, so `"-1"` renders
/// back as `"-1"`.
pub fn parse_version(token: &str) -> VersionNumber {
    let token = token.trim_start();
    let bytes = token.as_bytes();
    if !bytes.first().is_some_and(u8::is_ascii_digit) {
        return VersionNumber::from_digit_runs(Vec::new(), token.trim_end().to_owned());
    }
    let numeric_end = numeric_end(bytes, 0);
    let segments = token[..numeric_end].split('.').map(str::to_owned).collect();
    VersionNumber::from_digit_runs(segments, token[numeric_end..].trim_end().to_owned())
}

/// First version run found in `text`, or [`VersionNumber::unknown`].
pub fn parse_first_version_number(text: &str) -> VersionNumber {
    runs(text)
        .next()
        .map(|run| to_version(text, run))
        .unwrap_or_default()
}

/// Last version run found in `text`, or [`VersionNumber::unknown`].
pub fn parse_last_version_number(text: &str) -> VersionNumber {
    runs(text)
        .last()
        .map(|run| to_version(text, run))
        .unwrap_or_default()
}

/// Find `marker` (ASCII case-insensitive) and read the version that follows
/// it, skipping blanks and a `/`. `_` is accepted as a segment separator.
fn version_after(ua: &str, markers: &[&str]) -> Option<VersionNumber> {
    let haystack = ua.to_ascii_lowercase();
    markers.iter().find_map(|marker| {
        let at = haystack.find(&marker.to_ascii_lowercase())? + marker.len();
        let rest = ua[at..].trim_start_matches([' ', '/']);
        let len = rest
            .bytes()
            .take_while(|b| b.is_ascii_digit() || *b == b'.' || *b == b'_')
            .count();
        let token = rest[..len].replace('_', ".");
        let token = token.trim_end_matches('.');
        if token.is_empty() {
            None
        } else {
            Some(parse_version(token))
        }
    })
}

/// Identify the operating-system version inside a full user-agent string,
/// using the marker the given family writes in front of its version.
pub fn parse_operating_system_version(family: OperatingSystemFamily, ua: &str) -> VersionNumber {
    use OperatingSystemFamily as F;
    let markers: &[&str] = match family {
        F::Android => &["Android"],
        F::Ios => &["iPhone OS", "CPU OS"],
        F::MacOsX | F::OsX => &["Mac OS X"],
        F::Windows => &["Windows NT", "Windows Phone OS", "Windows CE"],
        F::Bsd => &["FreeBSD", "OpenBSD", "NetBSD", "DragonFly"],
        F::Symbian => &["SymbianOS"],
        F::WebOs => &["webOS", "hpwOS"],
        F::Bada => &["Bada"],
        _ => &[],
    };
    version_after(ua, markers).unwrap_or_default()
}
