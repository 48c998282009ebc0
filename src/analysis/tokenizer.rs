use unicode_segmentation::UnicodeSegmentation;
use crate::analysis::token::Token;
use crate::core::error::Result;

/// Splits a field value into tokens.
///
/// Implementations may fail; the index writer then discards everything it
/// already wrote for the document being inserted.
pub trait Tokenizer: Send + Sync {
    fn tokenize(&self, text: &str) -> Result<Vec<Token>>;

    fn name(&self) -> &str;
}

/// Unicode word tokenizer (UAX #29 word boundaries)
#[derive(Debug, Clone)]
pub struct StandardTokenizer {
    pub max_token_length: usize,
}

impl StandardTokenizer {
    pub fn new(max_token_length: usize) -> Self {
        StandardTokenizer { max_token_length }
    }
}

impl Default for StandardTokenizer {
    fn default() -> Self {
        StandardTokenizer {
            max_token_length: 255,
        }
    }
}

impl Tokenizer for StandardTokenizer {
    fn tokenize(&self, text: &str) -> Result<Vec<Token>> {
        let mut tokens = Vec::new();
        let mut position = 0u32;

        for (offset, word) in text.unicode_word_indices() {
            // Overlong words are skipped without consuming a position.
            if word.len() > self.max_token_length {
                continue;
            }
            tokens.push(Token::new(word, position, offset));
            position += 1;
        }

        Ok(tokens)
    }

    fn name(&self) -> &str {
        "standard"
    }
}
