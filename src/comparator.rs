//! String orderings for strings that mix digit and non-digit runs.
//!
//! [`alphanum_cmp`] is the total order used for version segments: digit runs
//! compare by length first, then digit by digit, so `"2" < "02" < "20"`.
//! [`natural_order_cmp`] reads digit runs the way a person would
//! (`"img2" < "img10"`), skipping leading zeros and whitespace.

use std::cmp::Ordering;

/// Split off the leading run of `s` that is either all ASCII digits or
/// contains no ASCII digit at all.
fn next_chunk(s: &str) -> (&str, &str) {
    let digits = s.as_bytes().first().is_some_and(u8::is_ascii_digit);
    let end = s
        .char_indices()
        .find(|&(_, c)| c.is_ascii_digit() != digits)
        .map_or(s.len(), |(i, _)| i);
    s.split_at(end)
}

fn is_digit_chunk(chunk: &str) -> bool {
    chunk.as_bytes().first().is_some_and(u8::is_ascii_digit)
}

/// Compare two strings chunk by chunk.
///
/// Two digit chunks compare by length, then by their first differing digit.
/// Any other pair of chunks compares lexically. When one string runs out of
/// chunks, the shorter string sorts first.
pub fn alphanum_cmp(a: &str, b: &str) -> Ordering {
    let (mut rest_a, mut rest_b) = (a, b);
    while !rest_a.is_empty() && !rest_b.is_empty() {
        let (chunk_a, tail_a) = next_chunk(rest_a);
        let (chunk_b, tail_b) = next_chunk(rest_b);
        rest_a = tail_a;
        rest_b = tail_b;

        let result = if is_digit_chunk(chunk_a) && is_digit_chunk(chunk_b) {
            chunk_a
                .len()
                .cmp(&chunk_b.len())
                .then_with(|| chunk_a.cmp(chunk_b))
        } else {
            chunk_a.cmp(chunk_b)
        };
        if result != Ordering::Equal {
            return result;
        }
    }
    a.len().cmp(&b.len())
}

fn char_at(s: &[char], i: usize) -> char {
    s.get(i).copied().unwrap_or('\0')
}

/// Compare two right-aligned digit runs: the longer run wins, otherwise the
/// first differing digit decides.
fn compare_right(a: &[char], b: &[char]) -> Ordering {
    let mut bias = Ordering::Equal;
    let mut i = 0;
    loop {
        let ca = char_at(a, i);
        let cb = char_at(b, i);
        match (ca.is_ascii_digit(), cb.is_ascii_digit()) {
            (false, false) => return bias,
            (false, true) => return Ordering::Less,
            (true, false) => return Ordering::Greater,
            (true, true) => {
                if bias == Ordering::Equal {
                    bias = ca.cmp(&cb);
                }
            }
        }
        i += 1;
    }
}

/// Natural ("human") ordering of two strings.
///
/// Leading whitespace and zeros in front of each run are skipped, digit runs
/// compare by magnitude, everything else character by character. Strings
/// that only differ in skipped zeros order by the first run whose zero count
/// differs, more zeros sorting later.
pub fn natural_order_cmp(a: &str, b: &str) -> Ordering {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let (mut ia, mut ib) = (0, 0);
    let mut zero_bias = Ordering::Equal;

    loop {
        let (mut zeros_a, mut zeros_b) = (0usize, 0usize);
        let mut ca = char_at(&a, ia);
        let mut cb = char_at(&b, ib);

        while ca.is_whitespace() || ca == '0' {
            if ca == '0' {
                zeros_a += 1;
            } else {
                zeros_a = 0;
            }
            ia += 1;
            ca = char_at(&a, ia);
        }
        while cb.is_whitespace() || cb == '0' {
            if cb == '0' {
                zeros_b += 1;
            } else {
                zeros_b = 0;
            }
            ib += 1;
            cb = char_at(&b, ib);
        }

        if zero_bias == Ordering::Equal {
            zero_bias = zeros_a.cmp(&zeros_b);
        }

        if ca.is_ascii_digit() && cb.is_ascii_digit() {
            let result = compare_right(&a[ia..], &b[ib..]);
            if result != Ordering::Equal {
                return result;
            }
        }

        if ca == '\0' && cb == '\0' {
            return zero_bias;
        }
        match ca.cmp(&cb) {
            Ordering::Equal => {}
            other => return other,
        }
        ia += 1;
        ib += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alphanum_digit_runs_compare_by_length_first() {
        assert_eq!(alphanum_cmp("02", "20"), Ordering::Less);
        assert_eq!(alphanum_cmp("02", "2"), Ordering::Greater);
        assert_eq!(alphanum_cmp("9", "10"), Ordering::Less);
        assert_eq!(alphanum_cmp("007", "7"), Ordering::Greater);
    }

    #[test]
    fn alphanum_mixed_runs() {
        assert_eq!(alphanum_cmp("img12", "img10"), Ordering::Greater);
        assert_eq!(alphanum_cmp("img2", "img10"), Ordering::Less);
        assert_eq!(alphanum_cmp("abc", "abd"), Ordering::Less);
        assert_eq!(alphanum_cmp("1a", "1"), Ordering::Greater);
        assert_eq!(alphanum_cmp("", ""), Ordering::Equal);
        assert_eq!(alphanum_cmp("", "0"), Ordering::Less);
    }

    #[test]
    fn alphanum_sorts_a_list() {
        let mut values = vec!["z10", "z2", "z1", "a", "z02", "10", "9"];
        values.sort_by(|a, b| alphanum_cmp(a, b));
        assert_eq!(values, vec!["9", "10", "a", "z1", "z2", "z02", "z10"]);
    }

    #[test]
    fn natural_order_reads_numbers() {
        assert_eq!(natural_order_cmp("img2", "img10"), Ordering::Less);
        assert_eq!(natural_order_cmp("1.10", "1.9"), Ordering::Greater);
        assert_eq!(natural_order_cmp("x2-g8", "x2-y7"), Ordering::Less);
        assert_eq!(natural_order_cmp("abc", "abc"), Ordering::Equal);
    }

    #[test]
    fn natural_order_skips_leading_zeros_and_spaces() {
        assert_eq!(natural_order_cmp("  7", "7"), Ordering::Equal);
        assert_eq!(natural_order_cmp("007", "7"), Ordering::Greater);
        assert_eq!(natural_order_cmp("0.9", "1.0"), Ordering::Less);
    }

    #[test]
    fn natural_order_breaks_ties_on_first_zero_run() {
        assert_eq!(natural_order_cmp("7", "007"), Ordering::Less);
        assert_eq!(natural_order_cmp("a01b2", "a1b002"), Ordering::Greater);
        assert_eq!(natural_order_cmp("a1b002", "a01b2"), Ordering::Less);
        assert_eq!(natural_order_cmp("v 01", "v 01"), Ordering::Equal);
    }
}
