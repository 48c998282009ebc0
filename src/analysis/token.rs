use serde::{Serialize, Deserialize};

/// A single term produced by an analyzer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub text: String,      // Normalized term text
    pub position: u32,     // Word position inside the field value
    pub offset: usize,     // Byte offset in the original value
}

impl Token {
    pub fn new(text: impl Into<String>, position: u32, offset: usize) -> Self {
        Token {
            text: text.into(),
            position,
            offset,
        }
    }
}
