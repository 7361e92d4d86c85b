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

//! Contains an implementation of the engine string hashing function.

use std::{
    fmt::{Display, Formatter},
    num::Wrapping,
};

/// Convenient utility to wrap engine name hashes.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct Name(u32);

impl Display for Name {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "0x{:08X}", self.0)
    }
}

impl Name {
    /// The hash written for values which are not owned by any named entity.
    pub const NONE: Name = Name(0);

    /// Returns the underlying hash code.
    pub fn into_inner(self) -> u32 {
        self.0
    }
}

impl From<u32> for Name {
    fn from(hash: u32) -> Self {
        Self(hash)
    }
}

impl<'a> From<&'a str> for Name {
    fn from(s: &'a str) -> Self {
        Self(hash(s))
    }
}

impl<'a> From<&'a String> for Name {
    fn from(s: &'a String) -> Self {
        Self(hash(s.as_ref()))
    }
}

/// Hash text using the engine 32-bit string hash (one-at-a-time, case-insensitive).
///
/// ASCII upper case letters are folded to lower case before being mixed in, and
/// backslashes are folded to forward slashes, so that names and paths hash the same
/// regardless of how they were spelled.
///
/// # Arguments
///
/// * `s`: the string to compute the hash of.
///
/// returns: u32
///
/// # Examples
///
/// ```
/// use rgxe::hash::hash;
///
/// assert_eq!(hash("rage_matrices"), hash("RAGE_Matrices"));
/// assert_ne!(hash("rage_matrices"), hash("LaserParam"));
/// assert_eq!(hash(""), 0);
/// ```
pub fn hash(s: &str) -> u32 {
    let mut val: Wrapping<u32> = Wrapping(0);

    for v in s.as_bytes() {
        let c = match *v {
            b'\\' => b'/',
            c => c.to_ascii_lowercase(),
        };
        val += Wrapping(c as u32);
        val += val << 10;
        val ^= val >> 6;
    }
    val += val << 3;
    val ^= val >> 11;
    val += val << 15;
    val.0
}
