use clap::Parser;
use nandforth::{repl, Machine, MachineConfig, DEFAULT_CELLS, MAX_DEPTH};
use std::fs;
use std::io;
use std::path::PathBuf;
use std::process;
use tracing::error;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "nandforth")]
#[command(about = "A small stack language built on nand")]
struct Cli {
    /// Source file to evaluate at startup
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Read and evaluate lines from stdin after loading
    #[arg(short, long)]
    repl: bool,

    /// Memory cells available to programs
    #[arg(long, default_value_t = DEFAULT_CELLS)]
    cells: usize,

    /// Deepest nesting of word calls
    #[arg(long, default_value_t = MAX_DEPTH)]
    max_depth: usize,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("error")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = MachineConfig {
        cells: cli.cells,
        max_depth: cli.max_depth,
        ..Default::default()
    };

    let mut machine = match Machine::with_config(config) {
        Ok(machine) => machine,
        Err(err) => {
            error!(%err, "failed to load kernel");
            process::exit(1);
        }
    };

    if let Some(path) = &cli.file {
        match fs::read_to_string(path) {
            Ok(source) => {
                if let Err(err) = repl::run_source(&mut machine, &source, &mut io::stdout()) {
                    error!(%err, "failed to write output");
                }
            }
            Err(err) => println!("{}: {}", path.display(), err),
        }
    }

    if cli.repl {
        if let Err(err) = repl::start(&mut machine) {
            error!(%err, "repl stopped");
            process::exit(1);
        }
    }
}
