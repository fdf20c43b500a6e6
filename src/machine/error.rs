use crate::parser::ParseError;
use custom_error::custom_error;

custom_error! {
    #[derive(Clone, PartialEq)]
    pub RuntimeError

    StackUnderflow{word: &'static str, needed: usize, found: usize} = "stack underflow in `{word}`: needs {needed}, found {found}",
    ReturnStackUnderflow{word: &'static str} = "return stack underflow in `{word}`",
    UnknownWord{name: String} = "unknown word: {name}",
    AddressOutOfRange{address: i64, size: usize} = "address {address} is outside memory of {size} cells",
    OutputFailed{message: String} = "failed to write output: {message}",
    NestingTooDeep{limit: usize} = "word calls nested deeper than {limit} levels, evaluation aborted",
}

custom_error! {
    #[derive(Clone, PartialEq)]
    pub EvalError

    Parse{source: ParseError} = "parse error: {source}",
    Runtime{source: RuntimeError} = "{source}",
    MemoryTooLarge{cells: usize, reserved_cells: usize} = "cannot allocate {cells} cells plus {reserved_cells} reserved",
}
