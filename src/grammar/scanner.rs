// Copyright (c) 2021, BlockProject 3D
//
// All rights reserved.
//
// Redistribution and use in source and binary forms, with or without modification,
// are permitted provided that the following conditions are met:
//
//     * Redistributions of source code must retain the above copyright notice,
//       this list of conditions and the following disclaimer.
//     * Redistributions in binary form must reproduce the above copyright notice,
//       this list of conditions and the following disclaimer in the documentation
//       and/or other materials provided with the distribution.
//     * Neither the name of BlockProject 3D nor the names of its contributors
//       may be used to endorse or promote products derived from this software
//       without specific prior written permission.
//
// THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS
// "AS IS" AND ANY EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT
// LIMITED TO, THE IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR
// A PARTICULAR PURPOSE ARE DISCLAIMED. IN NO EVENT SHALL THE COPYRIGHT OWNER OR
// CONTRIBUTORS BE LIABLE FOR ANY DIRECT, INDIRECT, INCIDENTAL, SPECIAL,
// EXEMPLARY, OR CONSEQUENTIAL DAMAGES (INCLUDING, BUT NOT LIMITED TO,
// PROCUREMENT OF SUBSTITUTE GOODS OR SERVICES; LOSS OF USE, DATA, OR
// PROFITS; OR BUSINESS INTERRUPTION) HOWEVER CAUSED AND ON ANY THEORY OF
// LIABILITY, WHETHER IN CONTRACT, STRICT LIABILITY, OR TORT (INCLUDING
// NEGLIGENCE OR OTHERWISE) ARISING IN ANY WAY OUT OF THE USE OF THIS
// SOFTWARE, EVEN IF ADVISED OF THE POSSIBILITY OF SUCH DAMAGE.

//! A byte cursor over effect source text with trivia skipping.
//!
//! Trivia is whitespace, `//` and `/* */` comments and preprocessor directive lines (a `#`
//! preceded only by blanks on its line, up to the end of the line including `\`
//! continuations).

use crate::grammar::error::ParseError;

fn is_ident_start(c: u8) -> bool {
    c.is_ascii_alphabetic() || c == b'_'
}

fn is_ident_char(c: u8) -> bool {
    c.is_ascii_alphanumeric() || c == b'_'
}

pub struct Scanner<'a> {
    src: &'a str,
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Scanner<'a> {
    pub fn new(src: &'a str) -> Scanner<'a> {
        Scanner {
            src,
            bytes: src.as_bytes(),
            pos: 0,
        }
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    pub fn set_pos(&mut self, pos: usize) {
        self.pos = pos;
    }

    pub fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.bytes.get(self.pos + offset).copied()
    }

    fn char_len(&self) -> usize {
        self.src
            .get(self.pos..)
            .and_then(|v| v.chars().next())
            .map(char::len_utf8)
            .unwrap_or(1)
    }

    fn at_line_start(&self) -> bool {
        self.bytes[..self.pos]
            .iter()
            .rev()
            .take_while(|b| **b != b'\n')
            .all(|b| *b == b' ' || *b == b'\t' || *b == b'\r')
    }

    fn skip_line(&mut self) {
        while let Some(c) = self.peek() {
            if c == b'\n' {
                break;
            }
            if c == b'\\' && self.peek_at(1) == Some(b'\n') {
                self.pos += 1;
            } else if c == b'\\'
                && self.peek_at(1) == Some(b'\r')
                && self.peek_at(2) == Some(b'\n')
            {
                self.pos += 2;
            }
            self.pos += 1;
        }
    }

    /// Skips trivia, returns true if anything was skipped.
    pub fn skip_trivia(&mut self) -> bool {
        let start = self.pos;
        while let Some(c) = self.peek() {
            match c {
                b' ' | b'\t' | b'\r' | b'\n' | 0x0B | 0x0C => self.pos += 1,
                b'/' if self.peek_at(1) == Some(b'/') => self.skip_line(),
                b'/' if self.peek_at(1) == Some(b'*') => {
                    self.pos = match self.src[self.pos + 2..].find("*/") {
                        Some(end) => self.pos + 2 + end + 2,
                        None => self.bytes.len(),
                    };
                },
                b'#' if self.at_line_start() => self.skip_line(),
                _ => break,
            }
        }
        self.pos != start
    }

    pub fn eat(&mut self, c: u8) -> bool {
        if self.peek() == Some(c) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Reads an identifier at the current position.
    pub fn ident(&mut self) -> Option<&'a str> {
        let start = self.pos;
        if !self.peek().map(is_ident_start).unwrap_or(false) {
            return None;
        }
        while self.peek().map(is_ident_char).unwrap_or(false) {
            self.pos += 1;
        }
        Some(&self.src[start..self.pos])
    }

    /// Reads an integer (decimal, or hexadecimal prefixed with `0x`) or an identifier.
    pub fn value(&mut self) -> Option<&'a str> {
        let start = self.pos;
        match self.peek() {
            Some(c) if c.is_ascii_digit() => {
                if c == b'0'
                    && self.peek_at(1) == Some(b'x')
                    && self.peek_at(2).map(|c| c.is_ascii_hexdigit()).unwrap_or(false)
                {
                    self.pos += 2;
                    while self.peek().map(|c| c.is_ascii_hexdigit()).unwrap_or(false) {
                        self.pos += 1;
                    }
                } else {
                    while self.peek().map(|c| c.is_ascii_digit()).unwrap_or(false) {
                        self.pos += 1;
                    }
                }
                Some(&self.src[start..self.pos])
            },
            _ => self.ident(),
        }
    }

    /// Matches a keyword on identifier boundaries, leaves the position unchanged on mismatch.
    pub fn keyword(&mut self, kw: &str) -> bool {
        let start = self.pos;
        match self.ident() {
            Some(v) if v == kw => true,
            _ => {
                self.pos = start;
                false
            },
        }
    }

    /// Advances to the next identifier outside trivia, string literals and numbers.
    ///
    /// returns: the identifier and its byte offset, or None at the end of the text.
    pub fn next_ident(&mut self) -> Option<(usize, &'a str)> {
        loop {
            self.skip_trivia();
            let c = self.peek()?;
            if is_ident_start(c) {
                let start = self.pos;
                return self.ident().map(|v| (start, v));
            } else if c.is_ascii_digit() {
                while self.peek().map(is_ident_char).unwrap_or(false) {
                    self.pos += 1;
                }
            } else if c == b'"' {
                self.pos += 1;
                while let Some(c) = self.peek() {
                    self.pos += 1;
                    if c == b'\\' {
                        self.pos += self.char_len();
                    } else if c == b'"' || c == b'\n' {
                        break;
                    }
                }
                self.pos = self.pos.min(self.bytes.len());
            } else {
                self.pos += self.char_len();
            }
        }
    }

    pub fn error(&self, message: impl Into<String>) -> ParseError {
        ParseError::at(self.src, self.pos, message)
    }

    /// Skips trivia then requires the given character.
    pub fn expect(&mut self, c: u8, context: &str) -> Result<(), ParseError> {
        self.skip_trivia();
        if self.eat(c) {
            Ok(())
        } else {
            Err(self.error(format!("expected '{}' {}", c as char, context)))
        }
    }

    /// Skips trivia then requires an identifier.
    pub fn expect_ident(&mut self, context: &str) -> Result<&'a str, ParseError> {
        self.skip_trivia();
        self.ident()
            .ok_or_else(|| self.error(format!("expected identifier {}", context)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trivia() {
        let mut s = Scanner::new("  // line\n/* block */\n#define A \\\n  1\nx");
        assert!(s.skip_trivia());
        assert_eq!(s.ident(), Some("x"));
        assert!(!s.skip_trivia());
    }

    #[test]
    fn hash_inside_line_is_not_a_directive() {
        let mut s = Scanner::new("a # b");
        assert_eq!(s.next_ident(), Some((0, "a")));
        assert_eq!(s.next_ident(), Some((4, "b")));
        assert_eq!(s.next_ident(), None);
    }

    #[test]
    fn values() {
        let mut s = Scanner::new("0x1F 42 SOLID 0xZ");
        assert_eq!(s.value(), Some("0x1F"));
        s.skip_trivia();
        assert_eq!(s.value(), Some("42"));
        s.skip_trivia();
        assert_eq!(s.value(), Some("SOLID"));
        s.skip_trivia();
        assert_eq!(s.value(), Some("0"));
    }

    #[test]
    fn next_ident_skips_strings_and_numbers() {
        let mut s = Scanner::new("\"technique \\\" é\" 12ab é name");
        let (offset, ident) = s.next_ident().unwrap();
        assert_eq!(ident, "name");
        assert_eq!(&s.src[offset..], "name");
    }

    #[test]
    fn keyword_boundaries() {
        let mut s = Scanner::new("techniques");
        assert!(!s.keyword("technique"));
        assert_eq!(s.pos(), 0);
        assert!(s.keyword("techniques"));
    }
}
