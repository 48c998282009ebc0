use crate::analysis::filter::TokenFilter;
use crate::analysis::token::Token;

/// Lowercases token text in place; already-lowercase tokens are not reallocated.
pub struct LowercaseFilter;

impl TokenFilter for LowercaseFilter {
    fn filter(&self, mut tokens: Vec<Token>) -> Vec<Token> {
        for token in &mut tokens {
            if token.text.chars().any(char::is_uppercase) {
                token.text = token.text.to_lowercase();
            }
        }
        tokens
    }

    fn name(&self) -> &str {
        "lowercase"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_unicode() {
        let tokens = vec![Token::new("ÉCOLE", 0, 0), Token::new("rust", 1, 6)];
        let out = LowercaseFilter.filter(tokens);
        assert_eq!(out[0].text, "école");
        assert_eq!(out[1], Token::new("rust", 1, 6));
    }
}
