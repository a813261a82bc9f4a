//! Fuzzy string scoring on a 0-100 scale.
//!
//! ## Algorithm
//! Both strings are preprocessed (lowercase, punctuation to spaces, trimmed)
//! and then scored with a weighted ratio that picks the best of several
//! views of the pair:
//! - `ratio`: normalized Levenshtein similarity of the whole strings
//! - `token_sort_ratio` / `token_set_ratio`: word-order tolerant variants,
//!   used when the strings have similar lengths
//! - `partial_ratio`: best alignment of the shorter string inside the
//!   longer one, used when lengths differ a lot (partial titles)

use std::collections::BTreeSet;
use strsim::normalized_levenshtein;

/// Length ratio above which partial matching is considered
const PARTIAL_LENGTH_RATIO: f64 = 1.5;

/// Length ratio above which partial matches are heavily discounted
const LONG_LENGTH_RATIO: f64 = 8.0;

const TOKEN_SCALE: f64 = 0.95;

/// Lowercase, replace non-alphanumeric characters by spaces, trim
pub fn preprocess(s: &str) -> String {
    let mapped: String = s
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .flat_map(char::to_lowercase)
        .collect();
    mapped.trim().to_string()
}

/// Plain similarity of two already processed strings
pub fn ratio(a: &str, b: &str) -> f64 {
    if a.is_empty() && b.is_empty() {
        return 100.0;
    }
    normalized_levenshtein(a, b) * 100.0
}

/// Best `ratio` of the shorter string against every equally long window
/// of the longer one
pub fn partial_ratio(a: &str, b: &str) -> f64 {
    let (short, long): (Vec<char>, Vec<char>) = {
        let a: Vec<char> = a.chars().collect();
        let b: Vec<char> = b.chars().collect();
        if a.len() <= b.len() { (a, b) } else { (b, a) }
    };

    if short.is_empty() {
        return 0.0;
    }

    let needle: String = short.iter().collect();
    let mut best = 0.0_f64;
    for window in long.windows(short.len()) {
        let candidate: String = window.iter().collect();
        let score = ratio(&needle, &candidate);
        if score > best {
            best = score;
            if best >= 100.0 {
                break;
            }
        }
    }
    best
}

fn sorted_tokens(s: &str) -> Vec<&str> {
    let mut tokens: Vec<&str> = s.split_whitespace().collect();
    tokens.sort_unstable();
    tokens
}

/// `ratio` after sorting the words of both strings
pub fn token_sort_ratio(a: &str, b: &str) -> f64 {
    ratio(&sorted_tokens(a).join(" "), &sorted_tokens(b).join(" "))
}

/// Compare the shared words against each side's remainder.
///
/// When the words of one side are a subset of the other's the score is 100.
pub fn token_set_ratio(a: &str, b: &str) -> f64 {
    let tokens_a: BTreeSet<&str> = a.split_whitespace().collect();
    let tokens_b: BTreeSet<&str> = b.split_whitespace().collect();
    if tokens_a.is_empty() || tokens_b.is_empty() {
        return 0.0;
    }

    let intersection: Vec<&str> = tokens_a.intersection(&tokens_b).copied().collect();
    let diff_ab: Vec<&str> = tokens_a.difference(&tokens_b).copied().collect();
    let diff_ba: Vec<&str> = tokens_b.difference(&tokens_a).copied().collect();

    if !intersection.is_empty() && (diff_ab.is_empty() || diff_ba.is_empty()) {
        return 100.0;
    }

    let sect = intersection.join(" ");
    let combined_ab = join_nonempty(&sect, &diff_ab.join(" "));
    let combined_ba = join_nonempty(&sect, &diff_ba.join(" "));

    let mut best = ratio(&combined_ab, &combined_ba);
    if !sect.is_empty() {
        best = best
            .max(ratio(&sect, &combined_ab))
            .max(ratio(&sect, &combined_ba));
    }
    best
}

fn join_nonempty(a: &str, b: &str) -> String {
    match (a.is_empty(), b.is_empty()) {
        (true, _) => b.to_string(),
        (_, true) => a.to_string(),
        _ => format!("{} {}", a, b),
    }
}

/// `partial_ratio` after sorting the words of both strings
fn partial_token_ratio(a: &str, b: &str) -> f64 {
    partial_ratio(&sorted_tokens(a).join(" "), &sorted_tokens(b).join(" "))
}

/// Weighted ratio of two processed strings
pub fn weighted_ratio(a: &str, b: &str) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let len_a = a.chars().count() as f64;
    let len_b = b.chars().count() as f64;
    let len_ratio = len_a.max(len_b) / len_a.min(len_b);

    let mut best = ratio(a, b);

    if len_ratio < PARTIAL_LENGTH_RATIO {
        let token = token_sort_ratio(a, b).max(token_set_ratio(a, b));
        return best.max(token * TOKEN_SCALE);
    }

    let partial_scale = if len_ratio < LONG_LENGTH_RATIO { 0.9 } else { 0.6 };
    best = best.max(partial_ratio(a, b) * partial_scale);
    best.max(partial_token_ratio(a, b) * TOKEN_SCALE * partial_scale)
}

/// Score raw strings: preprocess then `weighted_ratio`
pub fn score(query: &str, candidate: &str) -> f64 {
    weighted_ratio(&preprocess(query), &preprocess(candidate))
}
