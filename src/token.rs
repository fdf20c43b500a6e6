use strum_macros::{Display, EnumDiscriminants};

#[derive(Debug, Display, Clone, PartialEq, Eq, EnumDiscriminants)]
#[strum_discriminants(derive(Hash, Display))]
#[strum_discriminants(name(TokenType))]
pub enum TokenKind {
    Word,
    // Lexed but never given a meaning by the parser.
    Quote,

    // Literals
    Integer(i64),

    // Delimiters
    Colon,
    Semicolon,

    // Keywords
    If,
    Else,
    Then,
    Do,
    Loop,
    Variable,
}

impl From<&str> for TokenKind {
    fn from(text: &str) -> Self {
        if let Some(n) = parse_integer(text) {
            return Self::Integer(n);
        }

        match text {
            "\"" => Self::Quote,
            ":" => Self::Colon,
            ";" => Self::Semicolon,
            "if" => Self::If,
            "else" => Self::Else,
            "then" => Self::Then,
            "do" => Self::Do,
            "loop" => Self::Loop,
            "variable" => Self::Variable,
            _ => Self::Word,
        }
    }
}

/// Base-10 with an optional leading minus. Anything else, including values
/// that do not fit in an `i64`, is left for word classification.
fn parse_integer(text: &str) -> Option<i64> {
    let digits = text.strip_prefix('-').unwrap_or(text);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub literal: String,
    pub line: usize,
    pub column: usize,
}

impl Token {
    pub fn new(literal: String, line: usize, column: usize) -> Self {
        Self {
            kind: TokenKind::from(literal.as_str()),
            literal,
            line,
            column,
        }
    }

    pub fn token_type(&self) -> TokenType {
        TokenType::from(&self.kind)
    }

    pub fn is(&self, token_type: TokenType) -> bool {
        self.token_type() == token_type
    }

    pub fn value(&self) -> Option<i64> {
        match self.kind {
            TokenKind::Integer(n) => Some(n),
            _ => None,
        }
    }
}
