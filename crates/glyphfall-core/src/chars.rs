//! Glyph sets for the rain alphabet.

/// Full-width katakana, including small kana and voiced forms.
pub const KATAKANA: &str = "アァカサタナハマヤャラワガザダバパイィキシチニヒミリヰギジヂビピウゥクスツヌフムユュルグズブヅプエェケセテネヘメレヱゲゼデベペオォコソトノホモヨョロヲゴゾドボポヴッン";

/// Upper-case Latin letters.
pub const LATIN: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Decimal digits.
pub const DIGITS: &str = "0123456789";

/// The default rain alphabet: katakana, then Latin, then digits.
pub fn default_alphabet() -> Vec<char> {
    KATAKANA.chars().chain(LATIN.chars()).chain(DIGITS.chars()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_alphabet_contains_all_sets() {
        let alphabet = default_alphabet();
        assert_eq!(
            alphabet.len(),
            KATAKANA.chars().count() + LATIN.len() + DIGITS.len()
        );
        assert_eq!(alphabet.first(), Some(&'ア'));
        assert_eq!(alphabet.last(), Some(&'9'));
        assert!(alphabet.contains(&'Z'));
    }
}
