// File: src/core/segmenter.rs
use crate::core::trie::LexiconTrie;

/// Turns raw text into an ordered sequence of tokens.
///
/// The production segmenter is a statistical model living outside this crate;
/// anything that can split text deterministically plugs in here.
pub trait Segmenter: Send + Sync {
    fn segment(&self, text: &str) -> Vec<String>;

    /// Segments every text in order and concatenates the tokens.
    fn segment_all(&self, texts: &[String]) -> Vec<String> {
        texts.iter().flat_map(|text| self.segment(text)).collect()
    }
}

/// Splits on Unicode whitespace and nothing else.
#[derive(Debug, Clone, Copy, Default)]
pub struct WhitespaceSegmenter;

impl Segmenter for WhitespaceSegmenter {
    fn segment(&self, text: &str) -> Vec<String> {
        text.split_whitespace().map(str::to_string).collect()
    }
}

/// Forward maximum matching against a dictionary, with a character-class
/// fallback for text the dictionary does not cover:
/// alphanumeric runs stay together, CJK ideographs and punctuation stand alone.
#[derive(Debug, Clone, Default)]
pub struct LexiconSegmenter {
    lexicon: LexiconTrie,
}

impl LexiconSegmenter {
    pub fn new(lexicon: LexiconTrie) -> Self {
        Self { lexicon }
    }

    pub fn lexicon_size(&self) -> usize {
        self.lexicon.len()
    }
}

impl Segmenter for LexiconSegmenter {
    /// O(n * m) where m is the longest dictionary word.
    fn segment(&self, text: &str) -> Vec<String> {
        let chars: Vec<char> = text.chars().collect();
        let mut tokens: Vec<String> = Vec::new();
        let mut i = 0;

        while i < chars.len() {
            let c = chars[i];
            if c.is_whitespace() {
                i += 1;
                continue;
            }
            if let Some(len) = self.lexicon.longest_match(&chars, i) {
                tokens.push(chars[i..i + len].iter().collect());
                i += len;
                continue;
            }
            if is_cjk(c) || !c.is_alphanumeric() {
                tokens.push(c.to_string());
                i += 1;
                continue;
            }
            let start = i;
            while i < chars.len() && chars[i].is_alphanumeric() && !is_cjk(chars[i]) {
                i += 1;
            }
            tokens.push(chars[start..i].iter().collect());
        }

        tokens
    }
}

fn is_cjk(c: char) -> bool {
    matches!(c,
        '\u{3040}'..='\u{30FF}'   // Hiragana, Katakana
        | '\u{3400}'..='\u{4DBF}' // CJK Extension A
        | '\u{4E00}'..='\u{9FFF}' // CJK Unified Ideographs
        | '\u{F900}'..='\u{FAFF}' // CJK Compatibility Ideographs
        | '\u{20000}'..='\u{2FA1F}')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fruit_segmenter() -> LexiconSegmenter {
        LexiconSegmenter::new(["苹果", "香蕉"].into_iter().collect())
    }

    #[test]
    fn test_segment_all_concatenates_in_order() {
        let texts = vec!["这是苹果".to_string(), "那是香蕉".to_string()];
        let expected = vec!["这", "是", "苹果", "那", "是", "香蕉"];
        assert_eq!(fruit_segmenter().segment_all(&texts), expected);
    }

    #[test]
    fn test_mixed_script_fallback() {
        let tokens = fruit_segmenter().segment("I like 苹果, a lot!");
        assert_eq!(tokens, vec!["I", "like", "苹果", ",", "a", "lot", "!"]);
    }

    #[test]
    fn test_whitespace_segmenter() {
        assert_eq!(WhitespaceSegmenter.segment("  a b\tc\n"), vec!["a", "b", "c"]);
        assert!(WhitespaceSegmenter.segment("   ").is_empty());
    }
}
