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

//! Assignment resolution error definitions.

use std::fmt::{Display, Formatter};

use crate::macros::named_enum;

named_enum!(
    /// The context an assignment appears in.
    Context {
        /// A render state assignment inside a technique pass.
        TechniquePass: "technique pass",

        /// An assignment inside a sampler state block.
        SamplerState: "sampler state"
    }
);

/// Represents an assignment that could not be resolved to a typed state.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum SemanticError {
    /// The assignment name is not part of the vocabulary.
    UnknownName(String),

    /// The value is not one of the names accepted by the state kind.
    UnknownValue {
        /// The assignment name.
        name: String,

        /// The offending value token.
        value: String,
    },

    /// The state kind exists but is not allowed in the given context.
    WrongContext {
        /// The assignment name.
        name: String,

        /// The context the assignment was found in.
        context: Context,
    },

    /// The value of a numeric state kind is not a valid 32-bit integer.
    InvalidNumber {
        /// The assignment name.
        name: String,

        /// The offending value token.
        value: String,
    },
}

impl SemanticError {
    /// Returns the source token this error is about.
    pub fn token(&self) -> &str {
        match self {
            SemanticError::UnknownName(name) => name,
            SemanticError::UnknownValue { value, .. } => value,
            SemanticError::WrongContext { name, .. } => name,
            SemanticError::InvalidNumber { value, .. } => value,
        }
    }
}

impl Display for SemanticError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            SemanticError::UnknownName(name) => write!(f, "unknown assignment type '{}'", name),
            SemanticError::UnknownValue { name, value } => {
                write!(f, "unknown value '{}' for type '{}'", value, name)
            },
            SemanticError::WrongContext { name, context } => {
                write!(f, "invalid {} assignment type '{}'", context, name)
            },
            SemanticError::InvalidNumber { name, value } => {
                write!(f, "invalid integer '{}' for type '{}'", value, name)
            },
        }
    }
}

impl std::error::Error for SemanticError {}
