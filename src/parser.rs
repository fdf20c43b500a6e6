use crate::ast::{Node, Program};
use crate::token::{Token, TokenKind, TokenType};
use custom_error::custom_error;

custom_error! {
    #[derive(Clone, PartialEq)]
    pub ParseError

    UnexpectedEnd{expected: TokenType, line: usize, column: usize} = "unexpected end of input: expected {expected} to close the construct at {line}:{column}",
    UnexpectedToken{found: String, line: usize, column: usize} = "unexpected `{found}` at {line}:{column}",
    InvalidName{found: String, line: usize, column: usize} = "`{found}` at {line}:{column} cannot be used as a name",
}

pub type Result<T> = std::result::Result<T, ParseError>;

pub struct Parser<I: Iterator<Item = Token>> {
    tokens: I,
}

impl<I: Iterator<Item = Token>> Parser<I> {
    pub fn new<T>(tokens: T) -> Self
    where
        T: IntoIterator<Item = Token, IntoIter = I>,
    {
        Self {
            tokens: tokens.into_iter(),
        }
    }

    pub fn parse_program(mut self) -> Result<Program> {
        let (program, _) = self.parse_block(&[])?;
        Ok(program)
    }

    /// Parses nodes until one of `terminators` is consumed, returning the body
    /// and the terminator. Nested constructs are parsed recursively, so a
    /// terminator always closes the innermost open construct. `None` means
    /// the input ran out first.
    fn parse_block(&mut self, terminators: &[TokenType]) -> Result<(Program, Option<Token>)> {
        let mut nodes = vec![];
        while let Some(token) = self.tokens.next() {
            if terminators.contains(&token.token_type()) {
                return Ok((nodes.into(), Some(token)));
            }
            nodes.push(self.parse_node(token)?);
        }
        Ok((nodes.into(), None))
    }

    fn parse_node(&mut self, token: Token) -> Result<Node> {
        match token.kind {
            TokenKind::Integer(n) => Ok(Node::Push(n)),
            TokenKind::Word => Ok(Node::Call(token.literal)),
            TokenKind::Colon => self.parse_definition(&token),
            TokenKind::If => self.parse_conditional(&token),
            TokenKind::Do => self.parse_loop(&token),
            TokenKind::Variable => self.parse_name(&token).map(Node::Variable),
            _ => Err(ParseError::UnexpectedToken {
                found: token.literal,
                line: token.line,
                column: token.column,
            }),
        }
    }

    fn parse_definition(&mut self, opener: &Token) -> Result<Node> {
        let name = self.parse_name(opener)?;
        let (body, _) = self.expect_block(opener, &[TokenType::Semicolon])?;

        Ok(Node::Define { name, body })
    }

    fn parse_conditional(&mut self, opener: &Token) -> Result<Node> {
        let (consequence, terminator) =
            self.expect_block(opener, &[TokenType::Else, TokenType::Then])?;

        if terminator.is(TokenType::Then) {
            return Ok(Node::Conditional {
                consequence,
                alternative: None,
            });
        }

        let (alternative, _) = self.expect_block(opener, &[TokenType::Then])?;
        Ok(Node::Conditional {
            consequence,
            alternative: Some(alternative),
        })
    }

    fn parse_loop(&mut self, opener: &Token) -> Result<Node> {
        let (body, _) = self.expect_block(opener, &[TokenType::Loop])?;

        Ok(Node::Loop { body })
    }

    fn parse_name(&mut self, opener: &Token) -> Result<String> {
        match self.tokens.next() {
            Some(token) if token.is(TokenType::Word) => Ok(token.literal),
            Some(token) => Err(ParseError::InvalidName {
                found: token.literal,
                line: token.line,
                column: token.column,
            }),
            None => Err(ParseError::UnexpectedEnd {
                expected: TokenType::Word,
                line: opener.line,
                column: opener.column,
            }),
        }
    }

    /// Like `parse_block`, but running out of input is an error. The last
    /// terminator is the one reported as missing.
    fn expect_block(
        &mut self,
        opener: &Token,
        terminators: &[TokenType],
    ) -> Result<(Program, Token)> {
        match self.parse_block(terminators)? {
            (body, Some(terminator)) => Ok((body, terminator)),
            (_, None) => Err(ParseError::UnexpectedEnd {
                expected: terminators[terminators.len() - 1],
                line: opener.line,
                column: opener.column,
            }),
        }
    }
}

pub fn parse(tokens: Vec<Token>) -> Result<Program> {
    Parser::new(tokens).parse_program()
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::lexer::{tokenize, Lexer};

    fn call(name: &str) -> Node {
        Node::Call(name.to_owned())
    }

    fn test_parse(input: &str) -> Program {
        Parser::new(Lexer::new(input))
            .parse_program()
            .expect("Parse errors found")
    }

    #[test]
    fn test_literals_and_calls() {
        let program = test_parse("3 4 + -1 invert");
        assert_eq!(
            program,
            Program::new(vec![
                Node::Push(3),
                Node::Push(4),
                call("+"),
                Node::Push(-1),
                call("invert"),
            ])
        );
    }

    #[test]
    fn test_definition() {
        let program = test_parse(": double dup + ;");
        assert_eq!(
            program,
            Program::new(vec![Node::Define {
                name: "double".to_owned(),
                body: vec![call("dup"), call("+")].into(),
            }])
        );
    }

    #[test]
    fn test_conditionals() {
        let cases = vec![
            (
                "if 10 then",
                Node::Conditional {
                    consequence: vec![Node::Push(10)].into(),
                    alternative: None,
                },
            ),
            (
                "if 10 else 20 then",
                Node::Conditional {
                    consequence: vec![Node::Push(10)].into(),
                    alternative: Some(vec![Node::Push(20)].into()),
                },
            ),
            (
                "if else then",
                Node::Conditional {
                    consequence: Program::default(),
                    alternative: Some(Program::default()),
                },
            ),
        ];

        for (input, expected) in cases.into_iter() {
            assert_eq!(test_parse(input), Program::new(vec![expected]));
        }
    }

    #[test]
    fn test_loop_and_variable() {
        let program = test_parse("variable x 0 5 do i x ! loop");
        assert_eq!(
            program,
            Program::new(vec![
                Node::Variable("x".to_owned()),
                Node::Push(0),
                Node::Push(5),
                Node::Loop {
                    body: vec![call("i"), call("x"), call("!")].into(),
                },
            ])
        );
    }

    #[test]
    fn test_nested_constructs() {
        let program = test_parse(": f if 1 if 2 then else do do i loop loop then ;");
        assert_eq!(
            program,
            Program::new(vec![Node::Define {
                name: "f".to_owned(),
                body: vec![Node::Conditional {
                    consequence: vec![
                        Node::Push(1),
                        Node::Conditional {
                            consequence: vec![Node::Push(2)].into(),
                            alternative: None,
                        },
                    ]
                    .into(),
                    alternative: Some(
                        vec![Node::Loop {
                            body: vec![Node::Loop {
                                body: vec![call("i")].into(),
                            }]
                            .into(),
                        }]
                        .into()
                    ),
                }]
                .into(),
            }])
        );
    }

    #[test]
    fn test_nested_definition() {
        let program = test_parse(": outer : inner 1 ; inner ;");
        assert_eq!(
            program,
            Program::new(vec![Node::Define {
                name: "outer".to_owned(),
                body: vec![
                    Node::Define {
                        name: "inner".to_owned(),
                        body: vec![Node::Push(1)].into(),
                    },
                    call("inner"),
                ]
                .into(),
            }])
        );
    }

    #[test]
    fn test_parse_errors() {
        let cases = vec![
            (
                ": foo 1 2",
                ParseError::UnexpectedEnd {
                    expected: TokenType::Semicolon,
                    line: 1,
                    column: 1,
                },
            ),
            (
                "1 if 2 else 3",
                ParseError::UnexpectedEnd {
                    expected: TokenType::Then,
                    line: 1,
                    column: 3,
                },
            ),
            (
                "if 2",
                ParseError::UnexpectedEnd {
                    expected: TokenType::Then,
                    line: 1,
                    column: 1,
                },
            ),
            (
                "\n  do i",
                ParseError::UnexpectedEnd {
                    expected: TokenType::Loop,
                    line: 2,
                    column: 3,
                },
            ),
            (
                "variable",
                ParseError::UnexpectedEnd {
                    expected: TokenType::Word,
                    line: 1,
                    column: 1,
                },
            ),
            (
                ":",
                ParseError::UnexpectedEnd {
                    expected: TokenType::Word,
                    line: 1,
                    column: 1,
                },
            ),
            (
                "1 then",
                ParseError::UnexpectedToken {
                    found: "then".to_owned(),
                    line: 1,
                    column: 3,
                },
            ),
            (
                "1 ;",
                ParseError::UnexpectedToken {
                    found: ";".to_owned(),
                    line: 1,
                    column: 3,
                },
            ),
            (
                "\" hello",
                ParseError::UnexpectedToken {
                    found: "\"".to_owned(),
                    line: 1,
                    column: 1,
                },
            ),
            (
                ": f if 1 ; then",
                ParseError::UnexpectedToken {
                    found: ";".to_owned(),
                    line: 1,
                    column: 10,
                },
            ),
            (
                ": 5 dup ;",
                ParseError::InvalidName {
                    found: "5".to_owned(),
                    line: 1,
                    column: 3,
                },
            ),
            (
                "variable if",
                ParseError::InvalidName {
                    found: "if".to_owned(),
                    line: 1,
                    column: 10,
                },
            ),
        ];

        for (input, expected) in cases.into_iter() {
            assert_eq!(parse(tokenize(input)), Err(expected), "parsing {:?}", input);
        }
    }

    #[test]
    fn test_error_messages() {
        let err = parse(tokenize("do 1")).unwrap_err();
        assert_eq!(
            err.to_string(),
            "unexpected end of input: expected Loop to close the construct at 1:1"
        );

        let err = parse(tokenize("else")).unwrap_err();
        assert_eq!(err.to_string(), "unexpected `else` at 1:1");
    }

    #[test]
    fn test_reparse_rendering() {
        let inputs = vec![
            "3 4 +",
            ": sq dup + ;",
            ":   nop   ;",
            "-1 if 10 else 20 then",
            "if then",
            "0 if else then",
            "0 5 do i loop",
            "variable x 42 x ! x @",
            ": f if do i if 1 else 2 then loop then ; f",
            ": outer : inner 1 ; inner ;",
        ];

        for input in inputs.into_iter() {
            let program = test_parse(input);
            let rendered = program.to_string();
            assert_eq!(test_parse(&rendered), program, "re-parsing {:?}", rendered);
        }
    }
}
