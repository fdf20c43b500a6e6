mod error;
mod memory;
mod stack;

pub use error::{EvalError, RuntimeError};

use memory::Memory;
use stack::Stack;

use crate::ast::{Node, Program};
use crate::builtins::PRIMITIVES;
use crate::environment::Environment;
use crate::kernel::KERNEL;
use crate::lexer::Lexer;
use crate::parser::Parser;
use std::collections::HashMap;
use std::io::{self, Write};
use std::rc::Rc;
use tracing::{debug, info, trace, warn};

pub static DEFAULT_CELLS: usize = 1000;
pub static RESERVED_CELLS: usize = 1000;
pub static MAX_DEPTH: usize = 1024;

/// Name bound by `do ... loop` to the current index.
static LOOP_INDEX: &str = "i";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MachineConfig {
    /// Cells requested by the caller.
    pub cells: usize,
    /// Headroom added on top of `cells`.
    pub reserved_cells: usize,
    /// Deepest nesting of dictionary word calls before the current source
    /// unit is aborted.
    pub max_depth: usize,
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            cells: DEFAULT_CELLS,
            reserved_cells: RESERVED_CELLS,
            max_depth: MAX_DEPTH,
        }
    }
}

pub struct Machine {
    dictionary: HashMap<String, Rc<Program>>,
    variables: HashMap<String, usize>,
    next_address: usize,
    environment: Environment,

    pub(crate) stack: Stack,
    pub(crate) return_stack: Stack,
    pub(crate) memory: Memory,
    pub(crate) output: Box<dyn Write>,

    depth: usize,
    max_depth: usize,
    reports: Vec<RuntimeError>,
}

impl Machine {
    pub fn new(cells: usize) -> Result<Self, EvalError> {
        Self::with_config(MachineConfig {
            cells,
            ..Default::default()
        })
    }

    pub fn with_config(config: MachineConfig) -> Result<Self, EvalError> {
        Self::with_output(config, Box::new(io::stdout()))
    }

    /// Builds a machine whose `.` writes to `output`, then loads the kernel.
    pub fn with_output(config: MachineConfig, output: Box<dyn Write>) -> Result<Self, EvalError> {
        let too_large = EvalError::MemoryTooLarge {
            cells: config.cells,
            reserved_cells: config.reserved_cells,
        };
        let memory = config
            .cells
            .checked_add(config.reserved_cells)
            .and_then(Memory::new)
            .ok_or(too_large)?;

        let mut machine = Self {
            dictionary: HashMap::new(),
            variables: HashMap::new(),
            next_address: 0,
            environment: Environment::new(),

            stack: Stack::default(),
            return_stack: Stack::default(),
            memory,
            output,

            depth: 0,
            max_depth: config.max_depth,
            reports: vec![],
        };

        machine.evaluate_source(KERNEL)?;
        info!(
            words = machine.dictionary.len(),
            cells = machine.memory.len(),
            "kernel loaded"
        );
        Ok(machine)
    }

    /// Parses the whole of `source` before running any of it, so a parse error
    /// leaves the machine untouched.
    pub fn evaluate_source(&mut self, source: &str) -> Result<(), EvalError> {
        let program = Parser::new(Lexer::new(source)).parse_program()?;
        self.evaluate(&program).map_err(|err| {
            debug!(%err, "evaluation aborted");
            err.into()
        })
    }

    /// Runs each node in order. Only fatal errors are returned; the rest are
    /// reported and collected for `take_reports`.
    pub fn evaluate(&mut self, program: &Program) -> Result<(), RuntimeError> {
        for node in program.nodes.iter() {
            self.execute(node)?;
        }
        Ok(())
    }

    fn execute(&mut self, node: &Node) -> Result<(), RuntimeError> {
        match node {
            Node::Push(n) => self.stack.push(*n),
            Node::Call(name) => return self.call(name),
            Node::Define { name, body } => {
                debug!(word = %name, "defined");
                self.dictionary.insert(name.clone(), Rc::new(body.clone()));
            }
            Node::Conditional {
                consequence,
                alternative,
            } => match self.stack.pop() {
                None => self.report(RuntimeError::StackUnderflow {
                    word: "if",
                    needed: 1,
                    found: 0,
                }),
                Some(0) => {
                    if let Some(alt) = alternative {
                        return self.evaluate(alt);
                    }
                }
                Some(_) => return self.evaluate(consequence),
            },
            Node::Loop { body } => return self.execute_loop(body),
            Node::Variable(name) => {
                let address = self.next_address;
                self.variables.insert(name.clone(), address);
                self.next_address += 1;
                debug!(variable = %name, address, "declared");
            }
        }
        Ok(())
    }

    /// Primitives first, then the innermost loop binding, then the dictionary,
    /// then variables.
    fn call(&mut self, name: &str) -> Result<(), RuntimeError> {
        trace!(word = name, "call");

        if let Some(primitive) = PRIMITIVES.get(name) {
            if let Err(err) = primitive(self) {
                self.report(err);
            }
            return Ok(());
        }

        if let Some(val) = self.environment.get(name) {
            self.stack.push(val);
            return Ok(());
        }

        if let Some(body) = self.dictionary.get(name).cloned() {
            return self.call_body(&body);
        }

        if let Some(&address) = self.variables.get(name) {
            self.stack.push(address as i64);
            return Ok(());
        }

        self.report(RuntimeError::UnknownWord {
            name: name.to_owned(),
        });
        Ok(())
    }

    /// Only word calls count towards `max_depth`; branches and loop bodies
    /// nest freely.
    fn call_body(&mut self, body: &Program) -> Result<(), RuntimeError> {
        if self.depth >= self.max_depth {
            return Err(RuntimeError::NestingTooDeep {
                limit: self.max_depth,
            });
        }

        self.depth += 1;
        let result = self.evaluate(body);
        self.depth -= 1;
        result
    }

    fn execute_loop(&mut self, body: &Program) -> Result<(), RuntimeError> {
        let (limit, start) = match self.stack.pop_pair() {
            Some(bounds) => bounds,
            None => {
                let found = self.stack.len();
                self.report(RuntimeError::StackUnderflow {
                    word: "do",
                    needed: 2,
                    found,
                });
                return Ok(());
            }
        };

        self.environment.enclose(LOOP_INDEX, start);
        let mut index = start;
        let result = loop {
            if index == limit {
                break Ok(());
            }
            self.environment.set(LOOP_INDEX, index);
            if let Err(err) = self.evaluate(body) {
                break Err(err);
            }
            index = index.wrapping_add(1);
        };
        self.environment.unenclose();
        result
    }

    fn report(&mut self, err: RuntimeError) {
        warn!(%err, "reported");
        self.reports.push(err);
    }

    /// Drains the non-fatal conditions reported since the last call.
    pub fn take_reports(&mut self) -> Vec<RuntimeError> {
        std::mem::take(&mut self.reports)
    }

    pub fn stack(&self) -> &[i64] {
        &self.stack
    }

    pub fn return_stack(&self) -> &[i64] {
        &self.return_stack
    }

    pub fn memory(&self) -> &[i64] {
        self.memory.cells()
    }

    pub fn variable_address(&self, name: &str) -> Option<usize> {
        self.variables.get(name).copied()
    }

    /// True for primitives and dictionary words, not variables.
    pub fn is_defined(&self, name: &str) -> bool {
        PRIMITIVES.contains_key(name) || self.dictionary.contains_key(name)
    }
}
