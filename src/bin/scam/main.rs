//! # scam
//!
//! The standalone driver. It reads S-expression source from a file or from
//! stdin, evaluates each top-level form in order, and prints each result.
//! Stdin gets an interactive prompt; file input prints results only.

mod cli;

use std::{
    fs::File,
    io::{self, BufReader},
    process,
};

use anyhow::Context;
use log::error;

use cli::Cli;
use scam::{
    primitives,
    repl::{Repl, BANNER},
};

fn main() -> anyhow::Result<()> {
    let args = Cli::init();

    simple_logger::init_with_level((&args.verbosity).into()).context("initializing logger")?;

    let root = primitives::root_environment();

    match args.input.as_str() {
        "-" => {
            let mut repl = Repl::new("stdin", BufReader::new(io::stdin()), io::stdout(), io::stderr());
            repl.set_preface(BANNER);
            repl.run(&root).context("running session")?;
        }
        path => {
            let file = match File::open(path) {
                Ok(file) => file,
                Err(error) => {
                    error!("Failed to open file {path:?}: {error}");
                    process::exit(1);
                }
            };
            let mut repl = Repl::new(path, BufReader::new(file), io::stdout(), io::stderr());
            repl.set_prompt("");
            repl.run(&root).context("running session")?;
        }
    }

    Ok(())
}
