//! Extractive summarization by sentence prefix.

use unicode_segmentation::UnicodeSegmentation;

/// Default word budget for a summary.
pub const DEFAULT_SUMMARY_WORDS: usize = 250;

/// Keep whole leading sentences of `text` while their combined word count
/// stays within `max_words`.
///
/// The first sentence that would overflow the budget ends the summary, even
/// if a later, shorter sentence would still fit. Sentence and word
/// boundaries follow Unicode text segmentation (UAX #29), so punctuation is
/// not counted as a word.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(summarize("One two three. Four five six seven.", 5), "One two three.");
/// assert_eq!(summarize("", 250), "");
/// ```
pub fn summarize(text: &str, max_words: usize) -> String {
    let mut kept: Vec<&str> = Vec::new();
    let mut word_count = 0usize;

    for sentence in text.unicode_sentences() {
        let words = sentence.unicode_words().count();
        if word_count + words > max_words {
            break;
        }
        word_count += words;

        let sentence = sentence.trim();
        if !sentence.is_empty() {
            kept.push(sentence);
        }
    }

    kept.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_sentence_over_budget_is_dropped() {
        let text = "One two three. Four five six seven.";
        assert_eq!(summarize(text, 5), "One two three.");
    }

    #[test]
    fn test_empty_text() {
        assert_eq!(summarize("", DEFAULT_SUMMARY_WORDS), "");
    }

    #[test]
    fn test_everything_fits() {
        let text = "One two three. Four five six seven.";
        assert_eq!(summarize(text, 7), text);
    }

    #[test]
    fn test_first_sentence_over_budget_yields_empty() {
        assert_eq!(summarize("One two three four five six. Seven.", 3), "");
    }

    #[test]
    fn test_cutoff_is_a_prefix_not_best_fit() {
        // "Three." would fit after the cutoff, but sentences after the first
        // overflowing one are never considered.
        let text = "One two. Three four five six. Seven.";
        assert_eq!(summarize(text, 4), "One two.");
    }

    #[test]
    fn test_headline_line_counts_as_sentence() {
        let text = "Budget passed\nThe house voted late on Monday. Debate lasted hours.";
        assert_eq!(
            summarize(text, 8),
            "Budget passed The house voted late on Monday."
        );
    }

    #[test]
    fn test_output_is_trimmed() {
        assert_eq!(summarize("  Hello there.   ", 10), "Hello there.");
    }

    #[test]
    fn test_deterministic() {
        let text = "Markets rallied. Investors cheered the news. Analysts were cautious.";
        assert_eq!(summarize(text, 6), summarize(text, 6));
        assert_eq!(summarize(text, 6), "Markets rallied. Investors cheered the news.");
    }
}
