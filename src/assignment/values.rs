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

//! Legal value tables for render state and sampler state assignments.
//!
//! Named values use the Direct3D 11 numeric encodings.

/// The set of values a state kind accepts.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ValueSet {
    /// Any decimal or `0x` prefixed hexadecimal integer.
    Any,

    /// One of a closed list of names, each mapped to its numeric encoding.
    Named(&'static [(&'static str, u32)]),
}

impl ValueSet {
    /// Looks up the encoding of a named value (case-sensitive).
    ///
    /// Always returns None for [Any](ValueSet::Any).
    ///
    /// # Arguments
    ///
    /// * `value`: the value token as written in the source.
    ///
    /// returns: Option<u32>
    pub fn lookup(&self, value: &str) -> Option<u32> {
        match self {
            ValueSet::Any => None,
            ValueSet::Named(table) => table
                .iter()
                .find(|(name, _)| *name == value)
                .map(|(_, code)| *code),
        }
    }

    /// Returns the name of an encoded value, if this set has one.
    pub fn name_of(&self, code: u32) -> Option<&'static str> {
        match self {
            ValueSet::Any => None,
            ValueSet::Named(table) => table.iter().find(|(_, v)| *v == code).map(|(n, _)| *n),
        }
    }
}

pub const ANY: ValueSet = ValueSet::Any;

pub const BOOL: ValueSet = ValueSet::Named(&[("FALSE", 0), ("TRUE", 1)]);

pub const FILL_MODE: ValueSet = ValueSet::Named(&[("WIREFRAME", 2), ("SOLID", 3)]);

pub const CULL_MODE: ValueSet = ValueSet::Named(&[("NONE", 1), ("FRONT", 2), ("BACK", 3)]);

pub const DEPTH_WRITE_MASK: ValueSet = ValueSet::Named(&[("ZERO", 0), ("ALL", 1)]);

pub const COMPARISON_FUNC: ValueSet = ValueSet::Named(&[
    ("NEVER", 1),
    ("LESS", 2),
    ("EQUAL", 3),
    ("LESS_EQUAL", 4),
    ("GREATER", 5),
    ("NOT_EQUAL", 6),
    ("GREATER_EQUAL", 7),
    ("ALWAYS", 8),
]);

pub const STENCIL_OP: ValueSet = ValueSet::Named(&[
    ("KEEP", 1),
    ("ZERO", 2),
    ("REPLACE", 3),
    ("INCR_SAT", 4),
    ("DECR_SAT", 5),
    ("INVERT", 6),
    ("INCR", 7),
    ("DECR", 8),
]);

pub const BLEND: ValueSet = ValueSet::Named(&[
    ("ZERO", 1),
    ("ONE", 2),
    ("SRC_COLOR", 3),
    ("INV_SRC_COLOR", 4),
    ("SRC_ALPHA", 5),
    ("INV_SRC_ALPHA", 6),
    ("DEST_ALPHA", 7),
    ("INV_DEST_ALPHA", 8),
    ("DEST_COLOR", 9),
    ("INV_DEST_COLOR", 10),
    ("SRC_ALPHA_SAT", 11),
    ("BLEND_FACTOR", 14),
    ("INV_BLEND_FACTOR", 15),
    ("SRC1_COLOR", 16),
    ("INV_SRC1_COLOR", 17),
    ("SRC1_ALPHA", 18),
    ("INV_SRC1_ALPHA", 19),
]);

pub const BLEND_OP: ValueSet = ValueSet::Named(&[
    ("ADD", 1),
    ("SUBTRACT", 2),
    ("REV_SUBTRACT", 3),
    ("MIN", 4),
    ("MAX", 5),
]);

pub const TEXTURE_ADDRESS_MODE: ValueSet = ValueSet::Named(&[
    ("WRAP", 1),
    ("MIRROR", 2),
    ("CLAMP", 3),
    ("BORDER", 4),
    ("MIRROR_ONCE", 5),
]);

pub const FILTER: ValueSet = ValueSet::Named(&[
    ("MIN_MAG_MIP_POINT", 0x00),
    ("MIN_MAG_POINT_MIP_LINEAR", 0x01),
    ("MIN_POINT_MAG_LINEAR_MIP_POINT", 0x04),
    ("MIN_POINT_MAG_MIP_LINEAR", 0x05),
    ("MIN_LINEAR_MAG_MIP_POINT", 0x10),
    ("MIN_LINEAR_MAG_POINT_MIP_LINEAR", 0x11),
    ("MIN_MAG_LINEAR_MIP_POINT", 0x14),
    ("MIN_MAG_MIP_LINEAR", 0x15),
    ("ANISOTROPIC", 0x55),
    ("COMPARISON_MIN_MAG_MIP_POINT", 0x80),
    ("COMPARISON_MIN_MAG_MIP_LINEAR", 0x95),
    ("COMPARISON_ANISOTROPIC", 0xD5),
]);
