//! # Parser
//!
//! Consumes tokens and emits top-level S-expressions lazily. The parser is a
//! shift/reduce machine over an explicit stack: open parens and quotes push
//! markers, atoms and closed lists roll up into the nearest enclosing
//! context. Errors never panic; they are reported on the error stream and
//! recovery continues at the next top-level form where possible.

use colored::Colorize;
use std::{error::Error, fmt::Display};

use crate::lexer::{Position, Token};
use crate::sexpr::{consify, number, symbol, Atom, Sexpr};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub message: String,
    pub position: Option<Position>,
}

impl ParseError {
    fn new(message: impl Into<String>, position: Option<Position>) -> Self {
        Self {
            message: message.into(),
            position,
        }
    }
}

impl Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.position {
            Some((line, col)) => write!(f, "{line}:{col}: {}", self.message.red()),
            None => write!(f, "{}", self.message.red()),
        }
    }
}

impl Error for ParseError {}

/// A stack element: a value under construction or a marker for a pending
/// `(` or `'`.
#[derive(Debug)]
enum StackEntry {
    LparenMarker,
    QuoteMarker(Position),
    Value(Sexpr),
}

pub struct Parser<I: Iterator<Item = Token>> {
    tokens: I,
    stack: Vec<StackEntry>,
    pub errors: Vec<ParseError>,
    done: bool,
}

impl<I: Iterator<Item = Token>> Parser<I> {
    pub fn new(tokens: I) -> Self {
        Self {
            tokens,
            stack: vec![],
            errors: vec![],
            done: false,
        }
    }

    fn report(&mut self, error: ParseError) {
        log::error!("parse error: {error}");
        self.errors.push(error);
    }

    /// Rolls a finished value up into its context: quote markers directly
    /// above it wrap it as `(quote v)`, then it either joins the pending
    /// list or, with nothing on the stack, becomes a top-level form.
    fn emit(&mut self, mut value: Sexpr) -> Option<Sexpr> {
        while let Some(StackEntry::QuoteMarker(_)) = self.stack.last() {
            self.stack.pop();
            value = consify(vec![Sexpr::Atom(symbol("quote")), value]);
        }
        if self.stack.is_empty() {
            Some(value)
        } else {
            self.stack.push(StackEntry::Value(value));
            None
        }
    }

    /// Pops values down to the matching `(` marker and emits them as a
    /// proper list, in the order they were pushed.
    fn reduce_list(&mut self, position: Position) -> Option<Sexpr> {
        let mut items = vec![];
        loop {
            match self.stack.pop() {
                None => {
                    self.report(ParseError::new(
                        "unexpected ')' with no open list",
                        Some(position),
                    ));
                    return None;
                }
                Some(StackEntry::LparenMarker) => {
                    items.reverse();
                    return self.emit(consify(items));
                }
                Some(StackEntry::QuoteMarker(quoted_at)) => {
                    self.report(ParseError::new(
                        "quote with nothing to quote",
                        Some(quoted_at),
                    ));
                }
                Some(StackEntry::Value(value)) => items.push(value),
            }
        }
    }
}

impl<I: Iterator<Item = Token>> Iterator for Parser<I> {
    type Item = Sexpr;

    fn next(&mut self) -> Option<Sexpr> {
        if self.done {
            return None;
        }
        loop {
            let Some(token) = self.tokens.next() else {
                self.done = true;
                return None;
            };
            match token {
                Token::LeftParen { .. } => self.stack.push(StackEntry::LparenMarker),
                Token::RightParen { position } => {
                    if let Some(form) = self.reduce_list(position) {
                        return Some(form);
                    }
                }
                Token::Quote { position } => self.stack.push(StackEntry::QuoteMarker(position)),
                Token::Number { text, .. } => {
                    if let Some(form) = self.emit(Sexpr::Atom(number(&text))) {
                        return Some(form);
                    }
                }
                Token::Symbol { text, .. } => {
                    if let Some(form) = self.emit(Sexpr::Atom(symbol(&text))) {
                        return Some(form);
                    }
                }
                Token::Boolean { value, .. } => {
                    if let Some(form) = self.emit(Sexpr::Atom(Atom::Bool(value))) {
                        return Some(form);
                    }
                }
                Token::Comment { .. } => continue,
                Token::Dot { position } | Token::QuotationMark { position } => {
                    self.report(ParseError::new(
                        "dotted pairs and strings are not supported yet",
                        Some(position),
                    ));
                    self.done = true;
                    return None;
                }
                Token::Eof => {
                    if !self.stack.is_empty() {
                        self.report(ParseError::new(
                            "unexpected EOF inside an unfinished form",
                            None,
                        ));
                    }
                    self.done = true;
                    return None;
                }
                Token::Error { message, position } => {
                    self.report(ParseError::new(message, Some(position)));
                    self.done = true;
                    return None;
                }
            }
        }
    }
}
