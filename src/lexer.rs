use crate::token::Token;

pub struct Lexer {
    input: Vec<char>,
    position: usize,
    line: usize,
    column: usize,
}

fn is_newline(c: char) -> bool {
    c == '\n'
}

fn is_whitespace(c: char) -> bool {
    c == ' ' || c == '\t' || c == '\r' || is_newline(c)
}

impl Iterator for Lexer {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token()
    }
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
            line: 1,
            column: 1,
        }
    }

    fn read_char(&mut self) -> Option<char> {
        let ch = *self.input.get(self.position)?;
        self.position += 1;
        if is_newline(ch) {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(ch)
    }

    fn peek_char(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn skip_whitespace(&mut self) {
        while self.peek_char().map_or(false, is_whitespace) {
            self.read_char();
        }
    }

    /// Returns `None` once the input is exhausted.
    pub fn next_token(&mut self) -> Option<Token> {
        self.skip_whitespace();

        let (line, column) = (self.line, self.column);
        let mut literal = String::new();
        while let Some(ch) = self.peek_char() {
            if is_whitespace(ch) {
                break;
            }
            literal.push(ch);
            self.read_char();
        }

        if literal.is_empty() {
            None
        } else {
            Some(Token::new(literal, line, column))
        }
    }
}

pub fn tokenize(input: &str) -> Vec<Token> {
    Lexer::new(input).collect()
}
