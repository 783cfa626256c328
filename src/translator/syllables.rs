//! @dose
//! purpose: Heuristic syllable counting for a single token. The count drives how many
//!     filler units a generated word gets, so it only has to be plausible, not correct.
//!
//! when-editing:
//!     - !EDGE_CASES is matched against the start of the normalized token (anchored match)
//!     - !Every matching edge case applies; order only matters for readability
//!     - Rules use fancy_regex because one of them needs a backreference
//!
//! invariants:
//!     - Whitespace (and the empty string) counts as 0 syllables
//!     - Any other token counts as at least 1 syllable
//!
//! gotchas:
//!     - Because matches are anchored, unanchored-looking rules like "ia" only fire when the
//!         word starts with them
//!     - Only one trailing "e" is dropped before counting

use fancy_regex::Regex;
use once_cell::sync::Lazy;

/// Adjustments applied on top of the vowel-group count
const EDGE_CASE_TABLE: &[(&str, i32)] = &[
    // Edge cases which add a syllable
    (r"[aeiou]{3}", 1),
    (r"([^aeiouy])\1l$", 1),
    (r"[aeiouym]bl$", 1),
    (r"^coa[dglx].", 1),
    (r"dien", 1),
    (r"dnt$", 1),
    (r"[^gq]ua[^auieo]", 1),
    (r"ia", 1),
    (r"ii", 1),
    (r"io", 1),
    (r"ism$", 1),
    (r"iu", 1),
    (r"[^l]lien", 1),
    (r"^mc", 1),
    (r"riet", 1),
    // Edge cases which subtract a syllable
    (r"cial", -1),
    (r"cious", -1),
    (r"cius", -1),
    (r".ely$", -1),
    (r"giu", -1),
    (r"ion", -1),
    (r"iou", -1),
    (r"sia$", -1),
    (r"tia", -1),
];

/// Compiled edge cases, each anchored to the start of the normalized token
static EDGE_CASES: Lazy<Vec<(Regex, i32)>> = Lazy::new(|| {
    EDGE_CASE_TABLE
        .iter()
        .map(|(pattern, delta)| (Regex::new(&format!("^(?:{})", pattern)).unwrap(), *delta))
        .collect()
});

static VOWEL_GROUPS: Lazy<regex::Regex> = Lazy::new(|| regex::Regex::new(r"[aeiouy]+").unwrap());

/// Estimate the number of syllables in a token
pub fn syllables(token: &str) -> usize {
    if token.trim().is_empty() {
        log::debug!("Token <{}> is whitespace, no syllables", token);
        return 0;
    }
    if token.chars().count() < 2 {
        log::debug!("Token <{}> is short, 1 syllable", token);
        return 1;
    }

    let normalized = normalize(token);

    // Runs of vowels are what remain after splitting on everything else
    let mut count = VOWEL_GROUPS.find_iter(&normalized).count() as i32;

    for (pattern, delta) in EDGE_CASES.iter() {
        if pattern.is_match(&normalized).unwrap_or(false) {
            log::debug!("Token <{}> edge case {} ({:+})", token, pattern.as_str(), delta);
            count += delta;
        }
    }

    let count = count.max(1) as usize;
    log::debug!("Token <{}> syllables: {}", token, count);
    count
}

/// Lowercase, drop apostrophes and a single trailing "e"
fn normalize(token: &str) -> String {
    let lowered = token.to_lowercase().replace('\'', "");
    match lowered.strip_suffix('e') {
        Some(stripped) => stripped.to_string(),
        None => lowered,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== syllables Tests ====================

    #[test]
    fn test_whitespace_has_no_syllables() {
        assert_eq!(syllables("   "), 0);
        assert_eq!(syllables("\n"), 0);
        assert_eq!(syllables(""), 0);
    }

    #[test]
    fn test_short_tokens() {
        assert_eq!(syllables("a"), 1);
        assert_eq!(syllables("I"), 1);
        assert_eq!(syllables("!"), 1);
    }

    #[test]
    fn test_vowel_groups() {
        assert_eq!(syllables("trump"), 1);
        assert_eq!(syllables("weak"), 1);
        assert_eq!(syllables("media"), 2);
        assert_eq!(syllables("wonderful"), 3);
        assert_eq!(syllables("sleepy"), 2);
    }

    #[test]
    fn test_single_trailing_e_is_silent() {
        assert_eq!(syllables("fake"), 1);
        assert_eq!(syllables("agree"), 2);
        // "covfef" keeps two vowel groups
        assert_eq!(syllables("covfefe"), 2);
    }

    #[test]
    fn test_apostrophes_are_ignored() {
        assert_eq!(syllables("don't"), 1);
        assert_eq!(syllables("they're"), 1);
    }

    #[test]
    fn test_no_letters_still_counts_one() {
        assert_eq!(syllables("2020"), 1);
        assert_eq!(syllables("--"), 1);
    }

    #[test]
    fn test_uppercase_matches_lowercase() {
        assert_eq!(syllables("WONDERFUL"), syllables("wonderful"));
    }

    // ==================== edge case Tests ====================

    #[test]
    fn test_edge_case_adds_at_start() {
        // "mc" prefix: "mcdonald" has vowel groups o, o, a plus one
        assert_eq!(syllables("mcdonald"), 4);
        // "io" at the start: "ion" -> one group, +1 for "io", -1 for "ion"
        assert_eq!(syllables("ion"), 1);
        // "ia" at the start: "iamb" -> one group, +1
        assert_eq!(syllables("iamb"), 2);
    }

    #[test]
    fn test_edge_case_only_at_start() {
        // "ia" appears mid-word, so only the vowel groups count
        assert_eq!(syllables("trivia"), 2);
    }

    #[test]
    fn test_edge_case_subtracts() {
        // "tiara" -> groups ia, a = 2, minus 1 for the leading "tia"
        assert_eq!(syllables("tiara"), 1);
        // ".ely$": "lely" -> groups e, y = 2, minus 1
        assert_eq!(syllables("lely"), 1);
    }

    #[test]
    fn test_edge_case_backreference() {
        // doubled consonant followed by a final l
        let (pattern, delta) = &EDGE_CASES[1];
        assert_eq!(*delta, 1);
        assert!(pattern.is_match("ttl").unwrap());
        assert!(!pattern.is_match("tsl").unwrap());
        assert!(!pattern.is_match("eel").unwrap());
    }

    #[test]
    fn test_never_below_one() {
        assert_eq!(syllables("ciallll"), 1);
        assert_eq!(syllables("brr"), 1);
    }
}
