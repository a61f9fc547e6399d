/// A message prepared for matching: the original text for regex checks and a
/// lowercase form for phrase lookup.
#[derive(Debug, Clone)]
pub struct NormalizedMessage {
    pub original: String,
    pub lowered: String,
}

pub struct MessageNormalizer {
    zero_width_chars: Vec<char>,
}

impl Default for MessageNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageNormalizer {
    pub fn new() -> Self {
        // ZWJ (U+200D) and ZWNJ (U+200C) are left alone, Devanagari conjuncts need them.
        Self {
            zero_width_chars: vec![
                '\u{200B}', // Zero Width Space
                '\u{2060}', // Word Joiner
                '\u{FEFF}', // Zero Width No-Break Space
            ],
        }
    }

    pub fn normalize(&self, text: &str) -> NormalizedMessage {
        let stripped: String = text
            .chars()
            .filter(|c| !self.zero_width_chars.contains(c))
            .collect();

        NormalizedMessage {
            lowered: stripped.to_lowercase(),
            original: stripped,
        }
    }
}

/// First `max_chars` characters of `text`, never splitting a code point.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_chars_respects_boundaries() {
        assert_eq!(truncate_chars("लॉटरी जीतें", 3), "लॉट");
        assert_eq!(truncate_chars("short", 100), "short");
        assert_eq!(truncate_chars("abcdef", 0), "");
    }

    #[test]
    fn test_lowercases() {
        let normalized = MessageNormalizer::new().normalize("Send OTP NOW");
        assert_eq!(normalized.lowered, "send otp now");
        assert_eq!(normalized.original, "Send OTP NOW");
    }

    #[test]
    fn test_strips_zero_width_space() {
        let normalized = MessageNormalizer::new().normalize("lot\u{200B}tery win\u{FEFF}ner");
        assert_eq!(normalized.lowered, "lottery winner");
    }

    #[test]
    fn test_keeps_devanagari_joiners() {
        let text = "क्\u{200D}ष";
        let normalized = MessageNormalizer::new().normalize(text);
        assert_eq!(normalized.lowered, text);
    }
}
