//! Emoji run counting.
//!
//! An emoji "run" is a maximal sequence of characters from the emoticon,
//! pictograph, transport and regional-indicator blocks. Two adjacent emoji
//! count once. Symbols outside these blocks (U+2600 dingbats, U+1F900
//! supplemental symbols, ZWJ) are not matched and also break a run.

use regex::Regex;
use std::sync::LazyLock;

use super::EmojiCounter;

static EMOJI_RUN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        "[",
        "\u{1F600}-\u{1F64F}", // emoticons
        "\u{1F300}-\u{1F5FF}", // symbols & pictographs
        "\u{1F680}-\u{1F6FF}", // transport & map symbols
        "\u{1F1E0}-\u{1F1FF}", // regional indicators (flags)
        "]+",
    ))
    .expect("emoji pattern is valid")
});

/// Count emoji runs in `text`.
pub fn count_emoji_runs(text: &str) -> usize {
    EMOJI_RUN.find_iter(text).count()
}

/// [`EmojiCounter`] backed by the fixed emoji block pattern.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmojiRunCounter;

impl EmojiCounter for EmojiRunCounter {
    fn count(&self, text: &str) -> usize {
        count_emoji_runs(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_emoji() {
        assert_eq!(count_emoji_runs(""), 0);
        assert_eq!(count_emoji_runs("Great!"), 0);
        assert_eq!(count_emoji_runs(":) <3"), 0);
    }

    #[test]
    fn test_adjacent_emoji_are_one_run() {
        assert_eq!(count_emoji_runs("😀😀 bad"), 1);
        assert_eq!(count_emoji_runs("🚀🌙😂"), 1);
    }

    #[test]
    fn test_separated_emoji_are_separate_runs() {
        assert_eq!(count_emoji_runs("😀 😀"), 2);
        assert_eq!(count_emoji_runs("to the 🚀, then 🌙!"), 2);
        assert_eq!(count_emoji_runs("😀a😀b😀c😀d😀e😀f😀"), 7);
    }

    #[test]
    fn test_flag_is_one_run() {
        // U+1F1FA U+1F1F8
        assert_eq!(count_emoji_runs("go 🇺🇸"), 1);
    }

    #[test]
    fn test_blocks_outside_the_set_are_ignored() {
        // U+2764 heavy heart, U+1F914 thinking face, U+1F97A pleading face
        assert_eq!(count_emoji_runs("❤ 🤔 🥺"), 0);
        // U+1F3FD skin-tone modifier sits inside U+1F300..U+1F5FF, ZWJ does not.
        assert_eq!(count_emoji_runs("👍🏽"), 1);
        assert_eq!(count_emoji_runs("👨\u{200D}💻"), 2);
    }
}
