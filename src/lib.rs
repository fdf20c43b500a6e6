mod ast;
mod builtins;
mod environment;
mod kernel;
mod lexer;
mod machine;
mod parser;
pub mod repl;
mod token;

pub use ast::{Node, Program};
pub use kernel::KERNEL;
pub use lexer::{tokenize, Lexer};
pub use machine::{
    EvalError, Machine, MachineConfig, RuntimeError, DEFAULT_CELLS, MAX_DEPTH, RESERVED_CELLS,
};
pub use parser::{parse, ParseError, Parser};
pub use token::{Token, TokenKind, TokenType};
