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

//! Effect grammar error definitions.

use std::fmt::{Display, Formatter};

use crate::{assignment::SemanticError, macros::impl_err_conversion};

/// Represents a structural mismatch in effect source text.
///
/// The [Display](std::fmt::Display) implementation renders the offending line followed by a
/// caret pointing at the column.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ParseError {
    /// What the grammar expected to find.
    pub message: String,

    /// The 1-based line number.
    pub line: usize,

    /// The text of the offending line, without its line terminator.
    pub line_text: String,

    /// The 0-based column, counted in characters.
    pub column: usize,
}

impl ParseError {
    /// Creates a parse error pointing at a byte offset of a source text.
    ///
    /// # Arguments
    ///
    /// * `source`: the full source text.
    /// * `offset`: the byte offset of the mismatch.
    /// * `message`: what was expected.
    ///
    /// returns: ParseError
    pub fn at(source: &str, offset: usize, message: impl Into<String>) -> ParseError {
        let offset = offset.min(source.len());
        let start = source[..offset].rfind('\n').map(|v| v + 1).unwrap_or(0);
        let end = source[offset..]
            .find('\n')
            .map(|v| v + offset)
            .unwrap_or(source.len());
        ParseError {
            message: message.into(),
            line: source[..start].matches('\n').count() + 1,
            line_text: source[start..end].trim_end_matches('\r').into(),
            column: source[start..offset].chars().count(),
        }
    }
}

impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "line {}: {}", self.line, self.message)?;
        writeln!(f, "{}", self.line_text)?;
        write!(f, "{:>width$}", "^", width = self.column + 1)
    }
}

impl std::error::Error for ParseError {}

/// Represents an effect grammar error.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Error {
    /// The source text does not match the expected structure.
    Parse(ParseError),

    /// An assignment could not be resolved.
    Semantic(SemanticError),
}

impl_err_conversion!(Error {
    ParseError => Parse,
    SemanticError => Semantic
});

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Parse(e) => write!(f, "parse error: {}", e),
            Error::Semantic(e) => write!(f, "semantic error: {}", e),
        }
    }
}

impl std::error::Error for Error {}
