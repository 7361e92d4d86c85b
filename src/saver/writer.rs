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

//! Low-level little-endian field writer for compiled effects.

use std::io::Write;

use bytesutil::WriteBytes;

use crate::{
    error::{CapacityContext, Error},
    Result,
};

/// The largest value of a 1-byte count field.
pub const MAX_COUNT: usize = u8::MAX as usize;

/// Writes the primitive fields of a compiled effect.
///
/// Strings are length-prefixed: one byte holding the length including a trailing NUL, the
/// raw bytes, then the NUL.
pub struct BinaryWriter<W: Write> {
    inner: W,
}

impl<W: Write> BinaryWriter<W> {
    /// Creates a new writer.
    pub fn new(inner: W) -> BinaryWriter<W> {
        BinaryWriter { inner }
    }

    /// Returns the underlying stream.
    pub fn into_inner(self) -> W {
        self.inner
    }

    /// Writes a byte.
    pub fn u8(&mut self, v: u8) -> Result<()> {
        self.inner.write_all(&[v])?;
        Ok(())
    }

    /// Writes a little-endian 16-bit integer.
    pub fn u16(&mut self, v: u16) -> Result<()> {
        let mut b: [u8; 2] = [0; 2];
        v.write_bytes_le(&mut b);
        self.inner.write_all(&b)?;
        Ok(())
    }

    /// Writes a little-endian 32-bit integer.
    pub fn u32(&mut self, v: u32) -> Result<()> {
        let mut b: [u8; 4] = [0; 4];
        v.write_bytes_le(&mut b);
        self.inner.write_all(&b)?;
        Ok(())
    }

    /// Writes raw bytes.
    pub fn bytes(&mut self, v: &[u8]) -> Result<()> {
        self.inner.write_all(v)?;
        Ok(())
    }

    /// Writes a length-prefixed string.
    ///
    /// # Arguments
    ///
    /// * `s`: the string to write.
    ///
    /// returns: Result<(), Error>
    ///
    /// # Errors
    ///
    /// Returns [StringTooLong](Error::StringTooLong) without writing anything if the
    /// string is longer than 254 bytes.
    pub fn str(&mut self, s: &str) -> Result<()> {
        let len = s.len() + 1;
        if len > MAX_COUNT {
            return Err(Error::StringTooLong(s.len()));
        }
        self.u8(len as u8)?;
        self.bytes(s.as_bytes())?;
        self.u8(0)
    }

    /// Writes a 1-byte count.
    ///
    /// # Arguments
    ///
    /// * `context`: the table the count belongs to.
    /// * `count`: the number of entries.
    ///
    /// returns: Result<(), Error>
    ///
    /// # Errors
    ///
    /// Returns [Capacity](Error::Capacity) without writing anything if the count does not
    /// fit a byte.
    pub fn count(&mut self, context: CapacityContext, count: usize) -> Result<()> {
        if count > MAX_COUNT {
            return Err(Error::Capacity(context, count));
        }
        self.u8(count as u8)
    }
}
