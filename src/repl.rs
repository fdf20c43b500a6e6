use crate::machine::Machine;
use std::io::{self, BufRead, Write};

static PROMPT: &str = "> ";

/// Evaluates `source` and writes any reported conditions, then the error that
/// aborted it, if there was one.
pub fn run_source<W: Write>(machine: &mut Machine, source: &str, out: &mut W) -> io::Result<()> {
    let result = machine.evaluate_source(source);

    for report in machine.take_reports() {
        writeln!(out, "\t{}", report)?;
    }
    if let Err(err) = result {
        writeln!(out, "ERROR: {}", err)?;
    }
    Ok(())
}

pub fn start(machine: &mut Machine) -> io::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        write!(stdout, "{}", PROMPT)?;
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            return Ok(());
        }
        if line.trim_end() == "exit" {
            return Ok(());
        }

        run_source(machine, &line, &mut stdout)?;
        writeln!(stdout, "Stack: {:?}", machine.stack())?;
    }
}
