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

//! The effect grammar: extracts techniques, sampler states and shared variable names from
//! preprocessed source text.
//!
//! Only the effect specific syntax is parsed structurally; everything else is opaque text
//! that the grammar steps over. Comments, whitespace and preprocessor directive lines are
//! insignificant between tokens. The three parses are independent passes over the same text.
//!
//! # Examples
//!
//! ```
//! use rgxe::grammar::parse_techniques;
//! use rgxe::program::ProgramType;
//!
//! let techniques = parse_techniques("technique T { pass { VertexShader = VS; } }").unwrap();
//! assert_eq!(techniques[0].name(), "T");
//! assert_eq!(techniques[0].passes()[0].program(ProgramType::Vertex), Some("VS"));
//! assert_eq!(techniques[0].passes()[0].program(ProgramType::Fragment), None);
//! ```

mod error;
mod sampler;
mod scanner;
mod shared;
mod technique;

pub use error::{Error, ParseError};
pub use sampler::{parse_sampler_states, SamplerState, SAMPLER_TYPES};
pub use shared::parse_shared_variables;
pub use technique::{parse_techniques, Pass, Technique};
