// Copyright (c) 2015-2022 Frank Fischer <frank-fischer@shadow-soft.de>
//
// This program is free software: you can redistribute it and/or
// modify it under the terms of the GNU General Public License as
// published by the Free Software Foundation, either version 3 of the
// License, or (at your option) any later version.
//
// This program is distributed in the hope that it will be useful, but
// WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU
// General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see  <http://www.gnu.org/licenses/>
//

//! Reading and writing assignment problems in DIMACS format.

pub mod asn;

use std::error;
use std::fmt;
use std::io::{self, BufRead, BufReader, Read};
use std::str::{FromStr, SplitWhitespace};

/// Error when reading a file in DIMACS format.
#[derive(Debug)]
pub enum Error {
    Io(io::Error),
    Format { line: usize, msg: String },
    Data { line: usize, msg: String },
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Io(err)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> std::result::Result<(), fmt::Error> {
        use self::Error::*;
        match self {
            Io(err) => err.fmt(fmt),
            Format { line, msg } => write!(fmt, "Format error on line {}: {}", line, msg),
            Data { line, msg } => write!(fmt, "Data error on line {}: {}", line, msg),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// The data lines of a DIMACS file.
///
/// Empty lines and comment lines (first field starting with `c`) are
/// skipped, all other lines are handed out as [`Line`].
struct Lines<R> {
    io: BufReader<R>,
    buf: String,
    number: usize,
}

impl<R: Read> Lines<R> {
    fn new(r: R) -> Self {
        Lines {
            io: BufReader::new(r),
            buf: String::new(),
            number: 0,
        }
    }

    /// The number of the last line read, 0 before the first line.
    fn number(&self) -> usize {
        self.number
    }

    /// Return the next data line or `None` at the end of the input.
    fn next_line(&mut self) -> Result<Option<Line<'_>>> {
        loop {
            self.buf.clear();
            if self.io.read_line(&mut self.buf)? == 0 {
                return Ok(None);
            }
            self.number += 1;

            let is_data = self.buf.split_whitespace().next().map_or(false, |kind| !kind.starts_with('c'));
            if is_data {
                let mut fields = self.buf.split_whitespace();
                let kind = fields.next().unwrap_or("");
                return Ok(Some(Line {
                    number: self.number,
                    kind,
                    fields,
                }));
            }
        }
    }
}

/// A data line: its kind (the first field) and the remaining fields.
struct Line<'a> {
    number: usize,
    kind: &'a str,
    fields: SplitWhitespace<'a>,
}

impl<'a> Line<'a> {
    /// Parse the next field. `what` names the field in error messages.
    fn field<T>(&mut self, what: &str) -> Result<T>
    where
        T: FromStr,
        T::Err: fmt::Display,
    {
        let tok = match self.fields.next() {
            Some(tok) => tok,
            None => return Err(self.format_error(format!("missing {}", what))),
        };
        tok.parse()
            .map_err(|err| self.format_error(format!("invalid {} '{}': {}", what, tok, err)))
    }

    /// Consume the next field, which must be `keyword`.
    fn keyword(&mut self, keyword: &str) -> Result<()> {
        match self.fields.next() {
            Some(tok) if tok == keyword => Ok(()),
            Some(tok) => Err(self.format_error(format!("expected '{}', got '{}'", keyword, tok))),
            None => Err(self.format_error(format!("missing '{}'", keyword))),
        }
    }

    /// Fail if there are unread fields.
    fn finish(mut self) -> Result<()> {
        match self.fields.next() {
            Some(tok) => Err(self.format_error(format!("unexpected field '{}' at end of line", tok))),
            None => Ok(()),
        }
    }

    fn unexpected(&self) -> Error {
        self.format_error(format!("unexpected '{}' line", self.kind))
    }

    fn format_error(&self, msg: String) -> Error {
        Error::Format { line: self.number, msg }
    }

    fn data_error(&self, msg: String) -> Error {
        Error::Data { line: self.number, msg }
    }
}

#[cfg(test)]
mod tests {
    use super::{Error, Lines};
    use std::io::Cursor;

    #[test]
    fn test_skip_comments() {
        let mut lines = Lines::new(Cursor::new("c comment\n\n   \nccc\np asn 4 4\n  c indented\nn 1\n"));

        let mut line = lines.next_line().unwrap().unwrap();
        assert_eq!((line.number, line.kind), (5, "p"));
        line.keyword("asn").unwrap();
        assert_eq!(line.field::<usize>("nodes").unwrap(), 4);
        assert_eq!(line.field::<u8>("arcs").unwrap(), 4);
        line.finish().unwrap();

        let line = lines.next_line().unwrap().unwrap();
        assert_eq!((line.number, line.kind), (7, "n"));
        assert!(lines.next_line().unwrap().is_none());
        assert_eq!(lines.number(), 7);
    }

    #[test]
    fn test_field_errors() {
        let mut lines = Lines::new(Cursor::new("\na 1 x\n"));
        let mut line = lines.next_line().unwrap().unwrap();
        assert_eq!(line.field::<u32>("worker").unwrap(), 1);
        match line.field::<u32>("task") {
            Err(Error::Format { line, msg }) => {
                assert_eq!(line, 2);
                assert!(msg.starts_with("invalid task 'x'"), "{}", msg);
            }
            _ => panic!("expected format error"),
        }
        match line.field::<u32>("cost") {
            Err(Error::Format { line: 2, msg }) => assert_eq!(msg, "missing cost"),
            _ => panic!("expected format error"),
        }

        let mut lines = Lines::new(Cursor::new("s 3 4\n"));
        let mut line = lines.next_line().unwrap().unwrap();
        assert_eq!(line.field::<i32>("value").unwrap(), 3);
        assert_eq!(
            format!("{}", line.finish().unwrap_err()),
            "Format error on line 1: unexpected field '4' at end of line"
        );
    }
}
