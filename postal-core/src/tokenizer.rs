use crate::types::Candidate;

/// Words per candidate window unless configured otherwise.
pub const DEFAULT_WINDOW_SIZE: usize = 10;

/// Slide a `window_size`-word window over `text`, one word at a time.
///
/// Words are runs of non-whitespace. A text with fewer than `window_size`
/// words yields no candidates at all, even when it holds a complete address.
///
/// ```
/// use postal_core::tokenize;
///
/// let windows: Vec<String> = tokenize("the big bad wolf", 3)
///     .iter()
///     .map(|c| c.to_string())
///     .collect();
/// assert_eq!(windows, ["the big bad", "big bad wolf"]);
/// ```
pub fn tokenize(text: &str, window_size: usize) -> Vec<Candidate> {
    if window_size == 0 {
        return Vec::new();
    }
    let words: Vec<&str> = text.split_whitespace().collect();
    words
        .windows(window_size)
        .enumerate()
        .map(|(index, window)| Candidate::new(index, window.join(" ")))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(candidates: &[Candidate]) -> Vec<&str> {
        candidates.iter().map(Candidate::as_str).collect()
    }

    #[test]
    fn overlapping_windows_in_text_order() {
        let candidates = tokenize("the big bad wolf and the beautiful fox", 3);
        assert_eq!(
            texts(&candidates),
            vec![
                "the big bad",
                "big bad wolf",
                "bad wolf and",
                "wolf and the",
                "and the beautiful",
                "the beautiful fox",
            ]
        );
        let indices: Vec<usize> = candidates.iter().map(Candidate::index).collect();
        assert_eq!(indices, vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn short_text_yields_nothing() {
        assert!(tokenize("123 Main Street, Springfield, Illinois 62704", 10).is_empty());
        assert!(tokenize("", 3).is_empty());
    }

    #[test]
    fn exact_length_yields_one_window() {
        assert_eq!(texts(&tokenize("one two three", 3)), vec!["one two three"]);
    }

    #[test]
    fn window_count_is_words_minus_width_plus_one() {
        let text = (0..57).map(|i| format!("w{i}")).collect::<Vec<_>>().join(" ");
        for width in [1, 2, 10, 57] {
            let candidates = tokenize(&text, width);
            assert_eq!(candidates.len(), 57 - width + 1);
            assert!(candidates
                .iter()
                .all(|c| c.as_str().split(' ').count() == width));
        }
        assert!(tokenize(&text, 58).is_empty());
    }

    #[test]
    fn whitespace_runs_collapse_to_single_spaces() {
        let candidates = tokenize("  alpha\t\tbeta \u{a0} gamma\n delta ", 2);
        assert_eq!(
            texts(&candidates),
            vec!["alpha beta", "beta gamma", "gamma delta"]
        );
    }

    #[test]
    fn zero_width_yields_nothing() {
        assert!(tokenize("a b c", 0).is_empty());
    }
}
