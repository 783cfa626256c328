//! @dose
//! purpose: Brings a translated token sequence under a character limit. Pass A collapses
//!     runs of repeated token pairs, Pass B deletes short expendable translations.
//!
//! when-editing:
//!     - !Both passes mark token indices for removal first and rebuild the sequence once
//!     - !Lengths are counted in characters, never bytes
//!     - Pass A spreads removals across chains round-robin unless it must remove everything
//!
//! invariants:
//!     - A sequence already within the limit is returned untouched by both passes
//!     - Tokens are only ever removed whole; nothing is truncated mid-token
//!     - delete_tokens either returns a sequence within the limit or InsufficientSalvage
//!
//! gotchas:
//!     - A pair chain of k repeats yields k-1 removable pairs, so one copy always survives
//!     - Pass B removes the victim together with one neighbour (a preceding single space if
//!         there is one, otherwise the following token)
//!     - An expendable value that no longer occurs at or after the rolling offset is skipped
//!
//! flows:
//!     - Pass A: find chains -> total salvage -> remove all pairs, or interleave until enough
//!     - Pass B: sort expendable values by length -> delete shortest first -> stop at limit

use super::TranslationMap;
use thiserror::Error;

/// Default character budget
pub const DEFAULT_LIMIT: usize = 280;

/// Characters that mark a translation as bound to its neighbours
const BOUNDARY_PUNCTUATION: &[char] = &['.', ',', '\'', '-'];

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FitError {
    #[error("Ran out of expendable tokens with {excess} characters still over the limit")]
    InsufficientSalvage { excess: usize, best_effort: String },
}

/// One removable pair inside a chain of repeats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct DuplicatePair {
    start: usize,
    salvage: usize,
}

fn char_len(token: &str) -> usize {
    token.chars().count()
}

fn joined_len(tokens: &[String]) -> usize {
    tokens.iter().map(|t| char_len(t)).sum()
}

/// Keep only the tokens not marked as removed
fn rebuild(tokens: Vec<String>, removed: &[bool]) -> Vec<String> {
    tokens
        .into_iter()
        .zip(removed)
        .filter(|(_, gone)| !**gone)
        .map(|(token, _)| token)
        .collect()
}

/// Find chains of adjacent repeated pairs, where tokens[i..i+2] == tokens[i+2..i+4]
fn find_duplicate_chains(tokens: &[String]) -> Vec<Vec<DuplicatePair>> {
    let repeats_at = |i: usize| i + 4 <= tokens.len() && tokens[i..i + 2] == tokens[i + 2..i + 4];

    let mut chains = Vec::new();
    let mut idx = 0;
    while idx + 4 <= tokens.len() {
        if !repeats_at(idx) {
            idx += 1;
            continue;
        }

        let mut chain = Vec::new();
        while repeats_at(idx) {
            chain.push(DuplicatePair {
                start: idx,
                salvage: char_len(&tokens[idx]) + char_len(&tokens[idx + 1]),
            });
            idx += 2;
        }
        chains.push(chain);
    }
    chains
}

/// Take one pair from each chain in turn until every chain is drained
fn interleave(chains: &[Vec<DuplicatePair>]) -> Vec<DuplicatePair> {
    let longest = chains.iter().map(Vec::len).max().unwrap_or(0);
    (0..longest)
        .flat_map(|round| chains.iter().filter_map(move |chain| chain.get(round).copied()))
        .collect()
}

/// Collapse repeated token pairs as conservatively as the limit allows
pub fn deduplicate_tokens(tokens: Vec<String>, limit: usize) -> Vec<String> {
    let length = joined_len(&tokens);
    if length <= limit {
        return tokens;
    }
    let excess = length - limit;

    let chains = find_duplicate_chains(&tokens);
    let salvageable: usize = chains.iter().flatten().map(|pair| pair.salvage).sum();
    log::debug!("Token deduplication can salvage {}", salvageable);
    if salvageable == 0 {
        return tokens;
    }

    let victims: Vec<DuplicatePair> = if length.saturating_sub(salvageable) >= limit {
        // Collapsing everything still won't fit, so take every pair
        chains.into_iter().flatten().collect()
    } else {
        let mut salvaged = 0;
        let mut chosen = Vec::new();
        for pair in interleave(&chains) {
            if salvaged > excess {
                break;
            }
            salvaged += pair.salvage;
            chosen.push(pair);
        }
        log::debug!("Token deduplication salvaged {}", salvaged);
        chosen
    };

    let mut removed = vec![false; tokens.len()];
    for pair in &victims {
        removed[pair.start] = true;
        removed[pair.start + 1] = true;
    }

    let tokens = rebuild(tokens, &removed);
    log::warn!("Tokens deduplicated to: {}", tokens.concat());
    tokens
}

/// Translations that can be deleted: lowercase and not bounded by punctuation, shortest first
fn expendable(translations: &TranslationMap) -> Vec<&str> {
    let mut values: Vec<&str> = translations
        .values()
        .filter(|value| *value == value.to_lowercase())
        .filter(|value| *value == value.trim_matches(BOUNDARY_PUNCTUATION))
        .collect();
    values.sort_by_key(|value| char_len(value));
    values
}

fn previous_live(removed: &[bool], idx: usize) -> Option<usize> {
    (0..idx).rev().find(|&i| !removed[i])
}

fn next_live(removed: &[bool], idx: usize) -> Option<usize> {
    (idx + 1..removed.len()).find(|&i| !removed[i])
}

/// Delete expendable translated tokens, shortest first, until the text fits
pub fn delete_tokens(
    tokens: Vec<String>,
    limit: usize,
    translations: &TranslationMap,
) -> Result<Vec<String>, FitError> {
    let length = joined_len(&tokens);
    if length <= limit {
        return Ok(tokens);
    }
    let mut excess = length - limit;
    log::debug!("Tokens will be deleted to salvage {}", excess);

    let mut candidates = expendable(translations).into_iter();
    let mut removed = vec![false; tokens.len()];
    let mut offset = 0;

    while excess > 0 {
        let Some(victim) = candidates.next() else {
            let best_effort = rebuild(tokens, &removed).concat();
            return Err(FitError::InsufficientSalvage {
                excess,
                best_effort,
            });
        };

        let Some(found) = (offset..tokens.len()).find(|&i| !removed[i] && tokens[i] == victim)
        else {
            log::debug!("Token <{}> not found after offset {}, skipping", victim, offset);
            continue;
        };

        let start = match previous_live(&removed, found) {
            Some(prev) if tokens[prev] == " " => prev,
            _ => found,
        };
        let mut doomed = vec![start];
        doomed.extend(next_live(&removed, start));

        let salvaged: usize = doomed.iter().map(|&i| char_len(&tokens[i])).sum();
        log::debug!(
            "Tokens deleted: <{}>",
            doomed
                .iter()
                .map(|&i| tokens[i].as_str())
                .collect::<Vec<_>>()
                .join("> <")
        );
        for &i in &doomed {
            removed[i] = true;
        }

        excess = excess.saturating_sub(salvaged);
        log::debug!("Token deletion salvaged {}", salvaged);
        offset = start;
    }

    let tokens = rebuild(tokens, &removed);
    log::warn!("Tokens deleted to: {}", tokens.concat());
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|p| p.to_string()).collect()
    }

    fn words(text: &str) -> Vec<String> {
        crate::translator::tokenize(text)
            .into_iter()
            .map(String::from)
            .collect()
    }

    fn translations(pairs: &[(&str, &str)]) -> TranslationMap {
        let mut map = TranslationMap::default();
        for (source, translated) in pairs {
            map.insert(source, translated);
        }
        map
    }

    // ==================== find_duplicate_chains Tests ====================

    #[test]
    fn test_find_chains_single_run() {
        let chains = find_duplicate_chains(&words("ha ha ha ha"));
        assert_eq!(
            chains,
            vec![vec![
                DuplicatePair { start: 0, salvage: 3 },
                DuplicatePair { start: 2, salvage: 3 },
            ]]
        );
    }

    #[test]
    fn test_find_chains_two_runs() {
        let chains = find_duplicate_chains(&words("a a a b c c c"));
        assert_eq!(chains.len(), 2);
        assert_eq!(chains[0].iter().map(|p| p.start).collect::<Vec<_>>(), vec![0, 2]);
        assert_eq!(chains[1].iter().map(|p| p.start).collect::<Vec<_>>(), vec![7, 9]);
    }

    #[test]
    fn test_find_chains_none() {
        assert!(find_duplicate_chains(&words("no repeats in here")).is_empty());
        assert!(find_duplicate_chains(&tokens(&["a", "a", "a"])).is_empty());
    }

    // ==================== deduplicate_tokens Tests ====================

    #[test]
    fn test_deduplicate_within_limit_is_noop() {
        let input = words("ha ha ha ha");
        assert_eq!(deduplicate_tokens(input.clone(), 11), input);
        assert_eq!(deduplicate_tokens(input.clone(), 280), input);
    }

    #[test]
    fn test_deduplicate_removes_only_what_is_needed() {
        let output = deduplicate_tokens(words("ha ha ha ha"), 10);
        assert_eq!(output.concat(), "ha ha ha");
    }

    #[test]
    fn test_deduplicate_removes_everything_when_short_of_limit() {
        let output = deduplicate_tokens(words("ha ha ha ha"), 4);
        assert_eq!(output.concat(), "ha ha");
    }

    #[test]
    fn test_deduplicate_spreads_across_chains() {
        let output = deduplicate_tokens(words("a a a b c c c"), 10);
        assert_eq!(output.concat(), "a a b c c");
    }

    #[test]
    fn test_deduplicate_without_repeats_is_noop() {
        let input = words("nothing repeats here");
        assert_eq!(deduplicate_tokens(input.clone(), 5), input);
    }

    // ==================== delete_tokens Tests ====================

    fn sample() -> (Vec<String>, TranslationMap) {
        (
            tokens(&["Ack", " ", "acks", " ", "ack", " ", "ackack", "!"]),
            translations(&[("is", "acks"), ("the", "ack"), ("media", "ackack")]),
        )
    }

    #[test]
    fn test_delete_within_limit_is_noop() {
        let (input, map) = sample();
        assert_eq!(delete_tokens(input.clone(), 20, &map).unwrap(), input);
    }

    #[test]
    fn test_delete_shortest_first_with_preceding_space() {
        let (input, map) = sample();
        let output = delete_tokens(input, 16, &map).unwrap();
        assert_eq!(output.concat(), "Ack acks ackack!");
    }

    #[test]
    fn test_delete_skips_values_behind_offset() {
        let (input, map) = sample();
        let output = delete_tokens(input, 12, &map).unwrap();
        assert_eq!(output.concat(), "Ack acks!");
    }

    #[test]
    fn test_delete_at_start_takes_following_token() {
        let input = tokens(&["ack", " ", "Big", "!"]);
        let map = translations(&[("the", "ack")]);
        let output = delete_tokens(input, 4, &map).unwrap();
        assert_eq!(output.concat(), "Big!");
    }

    #[test]
    fn test_delete_exhaustion_reports_best_effort() {
        let (input, map) = sample();
        let err = delete_tokens(input, 3, &map).unwrap_err();
        assert_eq!(
            err,
            FitError::InsufficientSalvage {
                excess: 6,
                best_effort: "Ack acks!".to_string(),
            }
        );
    }

    #[test]
    fn test_expendable_filters_case_and_punctuation() {
        let map = translations(&[
            ("Trump", "Ack"),
            ("fake,", "ack,"),
            ("news", "acks"),
            ("it's", "ack'ack"),
            ("the", "ack"),
        ]);
        assert_eq!(expendable(&map), vec!["ack", "acks", "ack'ack"]);
    }
}
