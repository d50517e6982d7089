//! # Token `palavra/classe`
//!
//! No corpus PKU cada palavra segmentada vem colada à sua classe gramatical
//! por uma barra: `访问/v`, `。/w`, `法国/ns`. O [`Token`] guarda as duas
//! partes já separadas.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Um token do corpus já separado em forma de superfície e classe gramatical.
///
/// Tokens sem barra (ex: `国务院`) ficam com `pos` vazio.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token {
    /// Forma de superfície (ex: "访问").
    pub word: String,
    /// Classe gramatical (ex: "v", "ns", "w").
    pub pos: String,
}

impl Token {
    pub fn new(word: impl Into<String>, pos: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            pos: pos.into(),
        }
    }

    /// Interpreta um token cru `palavra/classe`.
    ///
    /// A palavra é o trecho antes da primeira barra e a classe o trecho
    /// seguinte, até uma eventual segunda barra.
    pub fn parse(raw: &str) -> Self {
        let mut parts = raw.split('/');
        let word = parts.next().unwrap_or_default();
        let pos = parts.next().unwrap_or_default();
        Self::new(word, pos)
    }

    /// `true` se a classe gramatical for exatamente `tag`.
    pub fn has_pos(&self, tag: &str) -> bool {
        self.pos == tag
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.pos.is_empty() {
            write!(f, "{}", self.word)
        } else {
            write!(f, "{}/{}", self.word, self.pos)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_word_and_pos() {
        let token = Token::parse("访问/v");
        assert_eq!(token.word, "访问");
        assert_eq!(token.pos, "v");
        assert!(token.has_pos("v"));
    }

    #[test]
    fn test_parse_without_slash() {
        let token = Token::parse("国务院");
        assert_eq!(token.word, "国务院");
        assert_eq!(token.pos, "");
        assert_eq!(token.to_string(), "国务院");
    }

    #[test]
    fn test_display_round_trip() {
        assert_eq!(Token::parse("法国/ns").to_string(), "法国/ns");
    }
}
