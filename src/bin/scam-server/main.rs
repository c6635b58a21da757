//! # scam-server
//!
//! The TCP driver. Each accepted connection runs an independent REPL over
//! the socket; every session shares the one root environment.

mod cli;

use std::process;

use anyhow::Context;
use log::error;

use cli::Cli;
use scam::{primitives, server};

fn main() -> anyhow::Result<()> {
    let args = Cli::init();

    simple_logger::init_with_level((&args.verbosity).into()).context("initializing logger")?;

    let root = primitives::root_environment();

    if let Err(setup) = server::serve(args.port, root) {
        error!("{setup:#}");
        process::exit(1);
    }

    Ok(())
}
