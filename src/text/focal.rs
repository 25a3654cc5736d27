use unicode_segmentation::UnicodeSegmentation;

/// Index of the character the eye should fixate on, counted in grapheme
/// clusters. Sits slightly left of center for longer words.
///
/// | length | index |
/// |--------|-------|
/// | 1      | 0     |
/// | 2–5    | 1     |
/// | 6–9    | 2     |
/// | 10–13  | 3     |
/// | 14+    | 4     |
///
/// Always `< length` for a non-empty word. An empty word maps to 0.
pub fn focal_index(word: &str) -> usize {
    let length = word.graphemes(true).count();
    match length {
        0 | 1 => 0,
        2..=5 => 1,
        6..=9 => 2,
        10..=13 => 3,
        _ => 4.min(length - 1),
    }
}

/// Splits a word into the part before the focal character, the focal
/// character itself, and the rest.
pub fn split_at_focal(word: &str) -> (&str, &str, &str) {
    let focal = focal_index(word);
    let mut graphemes = word.grapheme_indices(true).skip(focal);

    let Some((start, grapheme)) = graphemes.next() else {
        return ("", "", "");
    };
    let end = start + grapheme.len();

    (&word[..start], &word[start..end], &word[end..])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn follows_length_tiers() {
        assert_eq!(focal_index("a"), 0);
        assert_eq!(focal_index("am"), 1);
        assert_eq!(focal_index("speed"), 1);
        assert_eq!(focal_index("reading"), 2);
        assert_eq!(focal_index("paragraph"), 2);
        assert_eq!(focal_index("typography"), 3);
        assert_eq!(focal_index("extraordinary"), 3);
        assert_eq!(focal_index("incomprehensible"), 4);
    }

    #[test]
    fn always_inside_the_word() {
        let samples = ["x", "ab", "abcdef", "abcdefghijklmnopqrstuvwxyz", "naïve", "🇯🇵🇫🇷"];
        for word in samples {
            let len = word.graphemes(true).count();
            assert!(focal_index(word) < len, "{word}");
        }
    }

    #[test]
    fn counts_graphemes_not_bytes() {
        // "e" + combining acute is a single user-perceived character
        let word = "cafe\u{301}s";
        assert_eq!(word.graphemes(true).count(), 5);
        assert_eq!(focal_index(word), 1);
        assert_eq!(split_at_focal(word), ("c", "a", "fe\u{301}s"));
    }

    #[test]
    fn empty_word_has_no_parts() {
        assert_eq!(focal_index(""), 0);
        assert_eq!(split_at_focal(""), ("", "", ""));
    }

    #[test]
    fn splits_around_the_focal_character() {
        assert_eq!(split_at_focal("I"), ("", "I", ""));
        assert_eq!(split_at_focal("reading"), ("re", "a", "ding"));
        assert_eq!(split_at_focal("extraordinary"), ("ext", "r", "aordinary"));
    }

    #[test]
    fn multibyte_focal_character_is_kept_whole() {
        let (left, focal, right) = split_at_focal("über");
        assert_eq!((left, focal, right), ("ü", "b", "er"));

        let (left, focal, right) = split_at_focal("日本語");
        assert_eq!((left, focal, right), ("日", "本", "語"));
    }
}
