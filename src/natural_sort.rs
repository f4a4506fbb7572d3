//! Natural ("human") ordering of file names: `media2` sorts before `media10`.

use std::cmp::Ordering;
use std::path::{Path, PathBuf};

/// Whether letter case takes part in comparisons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaseMode {
    #[default]
    Insensitive,
    Sensitive,
}

impl CaseMode {
    pub fn from_case_sensitive(case_sensitive: bool) -> Self {
        if case_sensitive {
            CaseMode::Sensitive
        } else {
            CaseMode::Insensitive
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Segment<'a> {
    Text(&'a str),
    Number(&'a str),
}

/// Split into maximal runs of ASCII digits and non-digits. The first segment is
/// always text (possibly empty), so text and number segments line up
/// position-by-position between any two names.
fn segments(s: &str) -> Vec<Segment<'_>> {
    let mut out = vec![];
    let mut start = 0;
    let mut in_digits = false;
    for (i, c) in s.char_indices() {
        let is_digit = c.is_ascii_digit();
        if is_digit != in_digits {
            out.push(segment(&s[start..i], in_digits));
            start = i;
            in_digits = is_digit;
        }
    }
    out.push(segment(&s[start..], in_digits));
    out
}

fn segment(s: &str, digits: bool) -> Segment<'_> {
    if digits {
        Segment::Number(s)
    } else {
        Segment::Text(s)
    }
}

/// Numeric comparison of two digit runs of any length.
fn cmp_digits(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

fn cmp_text(a: &str, b: &str, case: CaseMode) -> Ordering {
    match case {
        CaseMode::Sensitive => a.cmp(b),
        CaseMode::Insensitive => a
            .chars()
            .flat_map(char::to_lowercase)
            .cmp(b.chars().flat_map(char::to_lowercase)),
    }
}

/// Compare two names in natural order.
///
/// Digit runs compare by value (leading zeros ignored), text runs compare
/// lexically, and a name whose segments are a prefix of the other's sorts
/// first. Names that tie on every segment (`media05` vs `media5`, or names
/// differing only in case when case-insensitive) fall back to plain byte
/// order so the result is a total order.
pub fn natural_cmp(a: &str, b: &str, case: CaseMode) -> Ordering {
    let sa = segments(a);
    let sb = segments(b);
    for (x, y) in sa.iter().zip(sb.iter()) {
        let ord = match (x, y) {
            (Segment::Number(x), Segment::Number(y)) => cmp_digits(x, y),
            (Segment::Text(x), Segment::Text(y)) => cmp_text(x, y, case),
            // Alignment makes mixed pairs impossible; keep a stable answer anyway.
            (Segment::Text(_), Segment::Number(_)) => Ordering::Greater,
            (Segment::Number(_), Segment::Text(_)) => Ordering::Less,
        };
        if ord != Ordering::Equal {
            return ord;
        }
    }
    sa.len().cmp(&sb.len()).then_with(|| a.cmp(b))
}

fn sort_key(path: &Path) -> std::borrow::Cow<'_, str> {
    path.file_name()
        .unwrap_or(path.as_os_str())
        .to_string_lossy()
}

/// Sort paths in place by the natural order of their file names.
pub fn sort_naturally(paths: &mut [PathBuf], case: CaseMode) {
    paths.sort_by(|a, b| natural_cmp(&sort_key(a), &sort_key(b), case));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(names: &[&str], case: CaseMode) -> Vec<String> {
        let mut v: Vec<String> = names.iter().map(|s| s.to_string()).collect();
        v.sort_by(|a, b| natural_cmp(a, b, case));
        v
    }

    #[test]
    fn numbers_sort_by_value_not_digit_count() {
        assert_eq!(
            sorted(&["media10.m4a", "media2.m4a", "media1.m4a"], CaseMode::Insensitive),
            vec!["media1.m4a", "media2.m4a", "media10.m4a"]
        );
    }

    #[test]
    fn names_without_digits_sort_lexically() {
        assert_eq!(
            sorted(&["b.m4a", "a.m4a"], CaseMode::Insensitive),
            vec!["a.m4a", "b.m4a"]
        );
    }

    #[test]
    fn leading_zeros_do_not_change_position() {
        let with_zero = sorted(&["media10.m4a", "media05.m4a", "media4.m4a"], CaseMode::Insensitive);
        let without = sorted(&["media10.m4a", "media5.m4a", "media4.m4a"], CaseMode::Insensitive);
        assert_eq!(with_zero, vec!["media4.m4a", "media05.m4a", "media10.m4a"]);
        assert_eq!(without, vec!["media4.m4a", "media5.m4a", "media10.m4a"]);
        assert_eq!(cmp_digits("05", "5"), Ordering::Equal);
    }

    #[test]
    fn sorting_is_idempotent() {
        let once = sorted(
            &["track 3.m4a", "Track 12.m4a", "intro.m4a", "track 1b.m4a", "track 1.m4a"],
            CaseMode::Insensitive,
        );
        let refs: Vec<&str> = once.iter().map(String::as_str).collect();
        assert_eq!(sorted(&refs, CaseMode::Insensitive), once);
    }

    #[test]
    fn shorter_segment_sequence_sorts_first() {
        assert_eq!(natural_cmp("media", "media1", CaseMode::Insensitive), Ordering::Less);
        assert_eq!(natural_cmp("part1", "part1a", CaseMode::Insensitive), Ordering::Less);
    }

    #[test]
    fn digit_runs_only_compare_after_shared_text() {
        // "media" is a prefix of "media.m", so the numbered name sorts first.
        assert_eq!(
            sorted(&["mediab.m4a", "media1.m4a", "media.m4a"], CaseMode::Insensitive),
            vec!["media1.m4a", "media.m4a", "mediab.m4a"]
        );
    }

    #[test]
    fn case_policy_is_configurable() {
        assert_eq!(
            sorted(&["b.m4a", "c.m4a", "A.m4a"], CaseMode::Insensitive),
            vec!["A.m4a", "b.m4a", "c.m4a"]
        );
        assert_eq!(
            sorted(&["b.m4a", "a.m4a", "C.m4a"], CaseMode::Sensitive),
            vec!["C.m4a", "a.m4a", "b.m4a"]
        );
    }

    #[test]
    fn very_long_digit_runs_do_not_overflow() {
        let big = format!("x{}.m4a", "9".repeat(40));
        let bigger = format!("x1{}.m4a", "0".repeat(40));
        assert_eq!(natural_cmp(&big, &bigger, CaseMode::Sensitive), Ordering::Less);
    }

    #[test]
    fn ties_are_broken_deterministically() {
        assert_eq!(natural_cmp("media5", "media05", CaseMode::Insensitive), Ordering::Greater);
        assert_eq!(natural_cmp("a.m4a", "a.m4a", CaseMode::Insensitive), Ordering::Equal);
    }

    #[test]
    fn empty_input_stays_empty() {
        let mut paths: Vec<PathBuf> = vec![];
        sort_naturally(&mut paths, CaseMode::Insensitive);
        assert!(paths.is_empty());
    }

    #[test]
    fn paths_sort_by_file_name() {
        let mut paths = vec![
            PathBuf::from("/z/media10.m4a"),
            PathBuf::from("/a/media2.m4a"),
            PathBuf::from("/m/media1.m4a"),
        ];
        sort_naturally(&mut paths, CaseMode::Insensitive);
        assert_eq!(
            paths,
            vec![
                PathBuf::from("/m/media1.m4a"),
                PathBuf::from("/a/media2.m4a"),
                PathBuf::from("/z/media10.m4a"),
            ]
        );
    }

    #[test]
    fn segments_alternate_starting_with_text() {
        assert_eq!(
            segments("12ab3"),
            vec![
                Segment::Text(""),
                Segment::Number("12"),
                Segment::Text("ab"),
                Segment::Number("3"),
            ]
        );
    }
}
