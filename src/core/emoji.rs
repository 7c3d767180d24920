//! Emoji code point classification.

/// Decides whether a single code point counts as an emoji.
pub trait EmojiCatalog {
    fn is_emoji(&self, c: char) -> bool;

    /// Number of emoji code points in `text`.
    fn count(&self, text: &str) -> usize {
        text.chars().filter(|&c| self.is_emoji(c)).count()
    }
}

impl<F: Fn(char) -> bool> EmojiCatalog for F {
    fn is_emoji(&self, c: char) -> bool {
        self(c)
    }
}

/// Inclusive code point ranges treated as emoji.
///
/// Skin-tone modifiers, ZWJ and variation selectors are excluded, so `👍🏽`
/// counts once.
pub const EMOJI_RANGES: &[(u32, u32)] = &[
    (0x1F1E6, 0x1F1FF), // regional indicators
    (0x1F300, 0x1F3FA), // misc symbols and pictographs
    (0x1F400, 0x1F5FF), // misc symbols and pictographs (cont.)
    (0x1F600, 0x1F64F), // emoticons
    (0x1F680, 0x1F6FF), // transport and map
    (0x1F700, 0x1F77F), // alchemical
    (0x1F780, 0x1F7FF), // geometric shapes extended
    (0x1F800, 0x1F8FF), // supplemental arrows-c
    (0x1F900, 0x1F9FF), // supplemental symbols and pictographs
    (0x1FA70, 0x1FAFF), // symbols and pictographs extended-a
    (0x2600, 0x26FF),   // misc symbols
    (0x2702, 0x27B0),   // dingbats
    (0x2B50, 0x2B50),   // star
    (0x2B55, 0x2B55),   // heavy large circle
    (0x1F004, 0x1F004), // mahjong red dragon
    (0x1F0CF, 0x1F0CF), // joker
    (0x1F170, 0x1F251), // enclosed alphanumeric and ideographic supplements
];

/// Static range table over [`EMOJI_RANGES`].
///
/// # Example
///
/// ```rust
/// use chatstat::core::emoji::{EmojiCatalog, UnicodeEmojiCatalog};
///
/// let catalog = UnicodeEmojiCatalog;
/// assert!(catalog.is_emoji('🙂'));
/// assert!(!catalog.is_emoji('a'));
/// assert_eq!(catalog.count("hi 🙂🎉!"), 2);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct UnicodeEmojiCatalog;

impl EmojiCatalog for UnicodeEmojiCatalog {
    fn is_emoji(&self, c: char) -> bool {
        let cp = u32::from(c);
        EMOJI_RANGES
            .iter()
            .any(|&(lo, hi)| (lo..=hi).contains(&cp))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_common_emoji() {
        let catalog = UnicodeEmojiCatalog;
        let emojis = [
            '😀', '🙂', '🎉', '🚀', '🤔', '🥳', '❤', '✅', '☀', '⭐', '🇺',
        ];
        for c in emojis {
            assert!(catalog.is_emoji(c), "{c:?}");
        }
    }

    #[test]
    fn test_non_emoji() {
        let catalog = UnicodeEmojiCatalog;
        let plain = [
            'a', 'Z', '1', ' ', 'é', 'Д', '中', '\u{fe0f}', '\u{200d}', '\u{1f3fd}', '©', 'Ⓜ',
        ];
        for c in plain {
            assert!(!catalog.is_emoji(c), "{c:?}");
        }
    }

    #[test]
    fn test_count_modifiers_not_double_counted() {
        let catalog = UnicodeEmojiCatalog;
        assert_eq!(catalog.count("👍🏽"), 1);
        assert_eq!(catalog.count("❤️"), 1);
        assert_eq!(catalog.count("plain text"), 0);
        assert_eq!(catalog.count(""), 0);
    }

    #[test]
    fn test_closure_catalog() {
        let only_hearts = |c: char| c == '❤';
        assert_eq!(only_hearts.count("❤❤ 🙂"), 2);
    }

    #[test]
    fn test_ranges_are_well_formed() {
        for &(lo, hi) in EMOJI_RANGES {
            assert!(lo <= hi);
            assert!(char::from_u32(lo).is_some());
            assert!(char::from_u32(hi).is_some());
        }
    }
}
