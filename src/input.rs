//! # Input
//!
//! Adapts any buffered reader into the lazy, finite, non-restartable
//! sequence of code points the lexer consumes. Reading stays line-at-a-time
//! so an interactive session sees each line as soon as it is entered.

use std::io::BufRead;

pub struct Chars<R: BufRead> {
    reader: R,
    line: String,
    pos: usize,
}

impl<R: BufRead> Chars<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: String::new(),
            pos: 0,
        }
    }
}

impl<R: BufRead> Iterator for Chars<R> {
    type Item = char;

    fn next(&mut self) -> Option<char> {
        loop {
            if self.pos < self.line.len() {
                let c = self.line[self.pos..].chars().next()?;
                self.pos += c.len_utf8();
                return Some(c);
            }
            self.line.clear();
            self.pos = 0;
            match self.reader.read_line(&mut self.line) {
                Ok(0) => return None,
                Ok(_) => continue,
                Err(error) => {
                    log::error!("reading input: {error}");
                    return None;
                }
            }
        }
    }
}
