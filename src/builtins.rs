use crate::machine::{Machine, RuntimeError};
use lazy_static::lazy_static;
use std::collections::HashMap;
use std::io::Write;

/// A native word. Errors are non-fatal: the machine reports them and moves on,
/// and every primitive leaves both stacks untouched when it fails a check.
pub type Primitive = fn(&mut Machine) -> Result<(), RuntimeError>;

fn underflow(word: &'static str, needed: usize, machine: &Machine) -> RuntimeError {
    RuntimeError::StackUnderflow {
        word,
        needed,
        found: machine.stack.len(),
    }
}

fn print_pop(machine: &mut Machine) -> Result<(), RuntimeError> {
    let val = machine.stack.pop().ok_or_else(|| underflow(".", 1, machine))?;
    writeln!(machine.output, "{}", val).map_err(|err| RuntimeError::OutputFailed {
        message: err.to_string(),
    })
}

fn drop_top(machine: &mut Machine) -> Result<(), RuntimeError> {
    machine
        .stack
        .pop()
        .map(|_| ())
        .ok_or_else(|| underflow("drop", 1, machine))
}

fn to_return(machine: &mut Machine) -> Result<(), RuntimeError> {
    let val = machine.stack.pop().ok_or_else(|| underflow(">r", 1, machine))?;
    machine.return_stack.push(val);
    Ok(())
}

fn from_return(machine: &mut Machine) -> Result<(), RuntimeError> {
    let val = machine
        .return_stack
        .pop()
        .ok_or(RuntimeError::ReturnStackUnderflow { word: "r>" })?;
    machine.stack.push(val);
    Ok(())
}

fn binary_op(
    machine: &mut Machine,
    word: &'static str,
    op: fn(i64, i64) -> i64,
) -> Result<(), RuntimeError> {
    let (x, y) = machine
        .stack
        .pop_pair()
        .ok_or_else(|| underflow(word, 2, machine))?;
    machine.stack.push(op(x, y));
    Ok(())
}

fn add(machine: &mut Machine) -> Result<(), RuntimeError> {
    binary_op(machine, "+", |x, y| x.wrapping_add(y))
}

fn nand(machine: &mut Machine) -> Result<(), RuntimeError> {
    binary_op(machine, "nand", |x, y| !(x & y))
}

fn store(machine: &mut Machine) -> Result<(), RuntimeError> {
    let (address, _) = machine
        .stack
        .peek_pair()
        .ok_or_else(|| underflow("!", 2, machine))?;
    machine.memory.check(address)?;

    let (address, val) = machine
        .stack
        .pop_pair()
        .ok_or_else(|| underflow("!", 2, machine))?;
    machine.memory.store(address, val)
}

fn fetch(machine: &mut Machine) -> Result<(), RuntimeError> {
    let found = machine.stack.len();
    let top = machine
        .stack
        .top_mut()
        .ok_or(RuntimeError::StackUnderflow {
            word: "@",
            needed: 1,
            found,
        })?;
    *top = machine.memory.load(*top)?;
    Ok(())
}

fn sign_test(machine: &mut Machine) -> Result<(), RuntimeError> {
    let top = machine.stack.top_mut().ok_or(RuntimeError::StackUnderflow {
        word: "0<",
        needed: 1,
        found: 0,
    })?;
    *top = if *top < 0 { -1 } else { 0 };
    Ok(())
}

lazy_static! {
    pub static ref PRIMITIVES: HashMap<&'static str, Primitive> = vec![
        (".", print_pop as Primitive),
        ("drop", drop_top as Primitive),
        (">r", to_return as Primitive),
        ("r>", from_return as Primitive),
        ("+", add as Primitive),
        ("nand", nand as Primitive),
        ("!", store as Primitive),
        ("@", fetch as Primitive),
        ("0<", sign_test as Primitive),
    ]
    .into_iter()
    .collect();
}
