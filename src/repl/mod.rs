//! # Repl
//!
//! The read-eval-print driver. It owns nothing but its streams: source text
//! comes in through any reader, results and prompts leave through any
//! writer, so the same loop serves stdin, files, and sockets.

use std::{
    io::{self, BufRead, Write},
    panic::{catch_unwind, AssertUnwindSafe},
    sync::Arc,
};

use crate::evaluator::evaluate;
use crate::input::Chars;
use crate::lexer::Lexer;
use crate::parser::Parser;
use crate::sexpr::{Environment, Sexpr};

pub const BANNER: &str = "SCAM, a Scheme dialect. Forms are evaluated as they complete.";

pub struct Repl<R, W, E> {
    name: String,
    input: R,
    out: W,
    err: E,
    preface: String,
    prompt: String,
}

impl<R: BufRead, W: Write, E: Write> Repl<R, W, E> {
    pub fn new(name: impl Into<String>, input: R, out: W, err: E) -> Self {
        Self {
            name: name.into(),
            input,
            out,
            err,
            preface: String::new(),
            prompt: "> ".to_owned(),
        }
    }

    pub fn set_preface(&mut self, preface: impl Into<String>) {
        self.preface = preface.into();
    }

    pub fn set_prompt(&mut self, prompt: impl Into<String>) {
        self.prompt = prompt.into();
    }

    /// Evaluates each top-level form from the input under `env`, printing
    /// one result per form. Returns when the input is exhausted.
    pub fn run(self, env: &Arc<Environment>) -> io::Result<()> {
        let Repl {
            name,
            input,
            mut out,
            mut err,
            preface,
            prompt,
        } = self;

        if !preface.is_empty() {
            writeln!(out, "{preface}")?;
        }
        write!(out, "{prompt}")?;
        out.flush()?;

        let mut forms = Parser::new(Lexer::new(Chars::new(input)));
        for form in forms.by_ref() {
            log::debug!("[{name}] Evaluating {form}");
            let value = match catch_unwind(AssertUnwindSafe(|| evaluate(&form, env))) {
                Ok(value) => value,
                Err(fault) => {
                    // A host-level fault must not take the session down.
                    Sexpr::error("root", fault_message(fault))
                }
            };
            writeln!(out, "{value}")?;
            write!(out, "{prompt}")?;
            out.flush()?;
        }

        for diagnostic in &forms.errors {
            writeln!(err, "{diagnostic}")?;
        }
        Ok(())
    }
}

fn fault_message(fault: Box<dyn std::any::Any + Send>) -> String {
    if let Some(message) = fault.downcast_ref::<&str>() {
        (*message).to_owned()
    } else if let Some(message) = fault.downcast_ref::<String>() {
        message.clone()
    } else {
        "unrecognized runtime fault".to_owned()
    }
}
