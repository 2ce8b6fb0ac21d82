// file: src/matching/similarity.rs
// description: token-order-insensitive similarity scoring between questions
// reference: normalized insertion/deletion edit distance

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref NON_WORD: Regex = Regex::new(r"\W+").expect("NON_WORD regex is valid");
}

/// Canonical form used for scoring: non-ASCII characters dropped, lowercased,
/// punctuation replaced by spaces, tokens sorted lexicographically and joined
/// by single spaces.
pub fn token_sort_key(text: &str) -> String {
    let lowered: String = text
        .chars()
        .filter(char::is_ascii)
        .map(|c| c.to_ascii_lowercase())
        .collect();
    let cleaned = NON_WORD.replace_all(&lowered, " ");

    let mut tokens: Vec<&str> = cleaned.split_whitespace().collect();
    tokens.sort_unstable();
    tokens.join(" ")
}

/// Similarity of two strings on a 0-100 scale that ignores token order.
///
/// `token_sort_ratio(q, q) == 100` for any `q` with at least one ASCII word
/// character, and any permutation of the tokens of `q` scores the same.
pub fn token_sort_ratio(a: &str, b: &str) -> u8 {
    indel_ratio(&token_sort_key(a), &token_sort_key(b))
}

/// `100 * (len_a + len_b - indel_distance) / (len_a + len_b)`, rounded half
/// to even. Lengths count chars. Returns 0 when either side is empty.
pub fn indel_ratio(a: &str, b: &str) -> u8 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.is_empty() || b.is_empty() {
        return 0;
    }

    let total = a.len() + b.len();
    // indel_distance = total - 2 * lcs, so the matched length is 2 * lcs
    let matched = 2 * longest_common_subsequence(&a, &b);

    round_half_even(100 * matched, total) as u8
}

fn longest_common_subsequence(a: &[char], b: &[char]) -> usize {
    let mut prev = vec![0usize; b.len() + 1];
    let mut curr = vec![0usize; b.len() + 1];

    for ca in a {
        for (j, cb) in b.iter().enumerate() {
            curr[j + 1] = if ca == cb {
                prev[j] + 1
            } else {
                prev[j + 1].max(curr[j])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

fn round_half_even(numerator: usize, denominator: usize) -> usize {
    let quotient = numerator / denominator;
    let twice_remainder = 2 * (numerator % denominator);

    if twice_remainder > denominator || (twice_remainder == denominator && quotient % 2 == 1) {
        quotient + 1
    } else {
        quotient
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_self_similarity_is_perfect() {
        for q in [
            "What programs does Kepler offer?",
            "When does orientation start",
            "a",
            "How much is tuition at Kepler College in 2024?",
        ] {
            assert_eq!(token_sort_ratio(q, q), 100, "self-match failed for {q:?}");
        }
    }

    #[test]
    fn test_token_order_is_ignored() {
        let question = "What programs does Kepler offer?";
        let permuted = "offer does programs What Kepler?";

        assert_eq!(
            token_sort_ratio(question, permuted),
            token_sort_ratio(question, question)
        );
        assert_eq!(token_sort_ratio(question, permuted), 100);
    }

    #[test]
    fn test_symmetric() {
        let a = "How do I apply to Kepler?";
        let b = "What is the application deadline?";
        assert_eq!(token_sort_ratio(a, b), token_sort_ratio(b, a));
    }

    #[test]
    fn test_case_and_punctuation_ignored() {
        assert_eq!(
            token_sort_ratio("WHAT PROGRAMS?!", "what programs"),
            100
        );
    }

    #[test]
    fn test_sort_key() {
        assert_eq!(
            token_sort_key("  What programs does Kepler offer? "),
            "does kepler offer programs what"
        );
    }

    #[test]
    fn test_non_ascii_characters_are_dropped() {
        assert_eq!(token_sort_key("Café menu"), "caf menu");
        // "caf menu" vs "cafe menu": 8 shared chars over 8 + 9
        assert_eq!(token_sort_ratio("café menu", "cafe menu"), 94);
        assert_eq!(token_sort_ratio("日本", "日本"), 0);
    }

    #[test]
    fn test_empty_sides_score_zero() {
        assert_eq!(token_sort_ratio("", ""), 0);
        assert_eq!(token_sort_ratio("kepler", ""), 0);
        assert_eq!(token_sort_ratio("???", "kepler"), 0);
    }

    #[test]
    fn test_known_ratios() {
        // 8 shared chars over 8 + 12
        assert_eq!(indel_ratio("abcdefgh", "abcdefghijkl"), 80);
        // 19 shared chars over 19 + 29
        assert_eq!(
            indel_ratio("abcdefghijklmnopqrs", "abcdefghijklmnopqrstuvwxyzabc"),
            79
        );
        assert_eq!(indel_ratio("kitten", "sitting"), 62);
    }

    #[test]
    fn test_unrelated_question_scores_low() {
        let score = token_sort_ratio(
            "What is the weather today?",
            "What programs does Kepler offer?",
        );
        assert!(score < 80, "unexpected score {score}");
    }

    #[test]
    fn test_round_half_even() {
        assert_eq!(round_half_even(25, 2), 12);
        assert_eq!(round_half_even(27, 2), 14);
        assert_eq!(round_half_even(26, 4), 6);
        assert_eq!(round_half_even(10, 3), 3);
    }
}
