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

//! Error declarations.

use std::fmt::{Display, Formatter};

use crate::{
    assignment::SemanticError,
    grammar::{self, ParseError},
    macros::{impl_err_conversion, named_enum},
    program::ProgramType,
};

named_enum!(
    /// The table whose 1-byte count field overflowed.
    CapacityContext {
        Techniques: "techniques",
        Passes: "passes",
        Programs: "programs",
        ProgramVariables: "program variables",
        ProgramBuffers: "program buffers",
        Buffers: "buffers",
        Variables: "variables",
        InitialValues: "initial values",
        Assignments: "pass assignments",
        Elements: "array elements",
        CodeBytes: "bytecode bytes"
    }
);

/// Represents an effect compilation or serialization error.
#[derive(Debug)]
pub enum Error {
    /// Describes a structural mismatch in the effect source.
    Parse(ParseError),

    /// Describes an assignment which could not be resolved.
    Semantic(SemanticError),

    /// Describes a preprocessor failure (toolchain diagnostic).
    Preprocess(String),

    /// Describes a compiler failure.
    Compile {
        /// The entry point being compiled.
        entry_point: String,

        /// The toolchain diagnostic.
        message: String,
    },

    /// Describes a count or size which does not fit its field.
    Capacity(CapacityContext, usize),

    /// Describes a string longer than 254 bytes.
    StringTooLong(usize),

    /// Describes a request for the code of an entry point no pass references.
    EntryPointNotFound(String),

    /// Describes more distinct programs of a type than a 1-byte index can reference.
    ProgramIndexOverflow(ProgramType),

    /// Describes a reflected variable whose type has no engine type code.
    UnsupportedType {
        /// The variable name.
        name: String,

        /// A description of the reflected type.
        ty: String,
    },

    /// Describes a default value whose size is not a multiple of 4 bytes.
    UnalignedDefaultValue {
        /// The variable name.
        name: String,

        /// The size in bytes of the default value.
        size: usize,
    },

    /// Describes a register which does not fit its field.
    InvalidRegister {
        /// The buffer or resource name.
        name: String,

        /// The reflected bind point.
        register: u32,
    },

    /// Describes an invalid output path.
    InvalidPath(String),

    /// Describes an io error.
    Io(std::io::Error),
}

impl_err_conversion!(Error {
    std::io::Error => Io,
    ParseError => Parse,
    SemanticError => Semantic
});

impl From<grammar::Error> for Error {
    fn from(e: grammar::Error) -> Self {
        match e {
            grammar::Error::Parse(e) => Error::Parse(e),
            grammar::Error::Semantic(e) => Error::Semantic(e),
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Parse(e) => write!(f, "parse error at {}", e),
            Error::Semantic(e) => write!(f, "semantic error: {}", e),
            Error::Preprocess(e) => write!(f, "preprocessor error: {}", e),
            Error::Compile {
                entry_point,
                message,
            } => write!(f, "failed to compile '{}': {}", entry_point, message),
            Error::Capacity(context, count) => {
                write!(f, "too many {} ({}) for the field size", context, count)
            },
            Error::StringTooLong(len) => write!(f, "string too long ({} > 254 bytes)", len),
            Error::EntryPointNotFound(name) => write!(f, "entry point '{}' not found", name),
            Error::ProgramIndexOverflow(ty) => {
                write!(f, "too many {} programs (more than 255 including NULL)", ty)
            },
            Error::UnsupportedType { name, ty } => {
                write!(f, "unsupported type {} for variable '{}'", ty, name)
            },
            Error::UnalignedDefaultValue { name, size } => write!(
                f,
                "default value of '{}' is {} bytes, not a multiple of 4",
                name, size
            ),
            Error::InvalidRegister { name, register } => {
                write!(f, "register {} of '{}' is out of range", register, name)
            },
            Error::InvalidPath(e) => write!(f, "invalid path: {}", e),
            Error::Io(e) => write!(f, "io error: {}", e),
        }
    }
}

impl std::error::Error for Error {}
