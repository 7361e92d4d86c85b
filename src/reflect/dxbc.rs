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

//! A reflector for DXBC containers, reading the `RDEF` resource definition chunk.

use std::fmt::{Display, Formatter};

use crate::{
    reflect::{
        BoundResource, ReflectedBuffer, ReflectedVariable, Reflection, ResourceKind, TypeDesc,
    },
    toolchain::Reflector,
};

const DXBC_MAGIC: &[u8; 4] = b"DXBC";
const DXBC_HEADER_SIZE: usize = 32;
const RDEF_MAGIC: &[u8; 4] = b"RDEF";
const RD11_MAGIC: &[u8; 4] = b"RD11";

const CBUFFER_DESC_SIZE: usize = 24;
const RESOURCE_DESC_SIZE: usize = 32;
const VARIABLE_DESC_SIZE: usize = 24;
const VARIABLE_DESC_SIZE_RD11: usize = 40;

/// Represents a malformed DXBC container or resource definition chunk.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum DxbcError {
    /// The container does not start with the `DXBC` magic.
    BadSignature,

    /// The container has no `RDEF` chunk.
    MissingResourceDefinitions,

    /// A read went past the end of its buffer.
    Truncated {
        /// What was being read.
        context: &'static str,

        /// The offset of the read.
        offset: usize,
    },

    /// A name is not valid UTF-8.
    Utf8(usize),
}

impl Display for DxbcError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            DxbcError::BadSignature => f.write_str("not a DXBC container"),
            DxbcError::MissingResourceDefinitions => f.write_str("missing RDEF chunk"),
            DxbcError::Truncated { context, offset } => {
                write!(f, "truncated {} at offset {}", context, offset)
            },
            DxbcError::Utf8(offset) => write!(f, "invalid utf8 string at offset {}", offset),
        }
    }
}

impl std::error::Error for DxbcError {}

#[derive(Copy, Clone)]
struct Reader<'a> {
    bytes: &'a [u8],
    pos: usize,
    context: &'static str,
}

impl<'a> Reader<'a> {
    fn new(bytes: &'a [u8], pos: usize, context: &'static str) -> Reader<'a> {
        Reader {
            bytes,
            pos,
            context,
        }
    }

    fn take<const N: usize>(&mut self) -> Result<[u8; N], DxbcError> {
        let end = self.pos.checked_add(N);
        let slice = end
            .and_then(|end| self.bytes.get(self.pos..end))
            .ok_or(DxbcError::Truncated {
                context: self.context,
                offset: self.pos,
            })?;
        let mut buf = [0; N];
        buf.copy_from_slice(slice);
        self.pos += N;
        Ok(buf)
    }

    fn u16(&mut self) -> Result<u16, DxbcError> {
        self.take().map(u16::from_le_bytes)
    }

    fn u32(&mut self) -> Result<u32, DxbcError> {
        self.take().map(u32::from_le_bytes)
    }

    fn cstr_at(&self, offset: usize) -> Result<String, DxbcError> {
        let tail = self.bytes.get(offset..).ok_or(DxbcError::Truncated {
            context: "string",
            offset,
        })?;
        let len = tail
            .iter()
            .position(|b| *b == 0)
            .ok_or(DxbcError::Truncated {
                context: "string",
                offset,
            })?;
        std::str::from_utf8(&tail[..len])
            .map(String::from)
            .map_err(|_| DxbcError::Utf8(offset))
    }
}

/// Finds the data of the first chunk with the given four character code.
fn find_chunk<'a>(container: &'a [u8], fourcc: &[u8; 4]) -> Result<Option<&'a [u8]>, DxbcError> {
    let mut header = Reader::new(container, 0, "container header");
    if &header.take::<4>()? != DXBC_MAGIC {
        return Err(DxbcError::BadSignature);
    }
    header.pos = 28;
    let chunk_count = header.u32()? as usize;
    for i in 0..chunk_count {
        let mut table = Reader::new(container, DXBC_HEADER_SIZE + i * 4, "chunk offset table");
        let offset = table.u32()? as usize;
        let mut chunk = Reader::new(container, offset, "chunk header");
        let magic = chunk.take::<4>()?;
        let size = chunk.u32()? as usize;
        if &magic == fourcc {
            let data = chunk
                .pos
                .checked_add(size)
                .and_then(|end| container.get(chunk.pos..end))
                .ok_or(DxbcError::Truncated {
                    context: "chunk data",
                    offset: chunk.pos,
                })?;
            return Ok(Some(data));
        }
    }
    Ok(None)
}

/// Checks that a table of `count` entries of `stride` bytes lies inside `bytes`.
fn check_table(
    bytes: &[u8],
    offset: usize,
    count: usize,
    stride: usize,
    context: &'static str,
) -> Result<(), DxbcError> {
    count
        .checked_mul(stride)
        .and_then(|size| offset.checked_add(size))
        .filter(|end| *end <= bytes.len())
        .map(|_| ())
        .ok_or(DxbcError::Truncated { context, offset })
}

fn parse_type(rdef: &[u8], offset: usize) -> Result<TypeDesc, DxbcError> {
    let mut r = Reader::new(rdef, offset, "type description");
    let class = r.u16()?;
    let base = r.u16()?;
    let rows = r.u16()?;
    let columns = r.u16()?;
    let elements = r.u16()?;
    Ok(TypeDesc {
        class: class.into(),
        base: base.into(),
        rows,
        columns,
        elements,
    })
}

fn parse_variables(
    rdef: &[u8],
    offset: usize,
    count: usize,
    stride: usize,
) -> Result<Vec<ReflectedVariable>, DxbcError> {
    check_table(rdef, offset, count, stride, "variable description")?;
    let mut variables = Vec::with_capacity(count);
    for i in 0..count {
        let mut r = Reader::new(rdef, offset + i * stride, "variable description");
        let name_offset = r.u32()? as usize;
        let start = r.u32()?;
        let size = r.u32()?;
        let _flags = r.u32()?;
        let type_offset = r.u32()? as usize;
        let default_offset = r.u32()? as usize;
        let default_value = match default_offset {
            0 => None,
            v => Some(
                v.checked_add(size as usize)
                    .and_then(|end| rdef.get(v..end))
                    .ok_or(DxbcError::Truncated {
                        context: "default value",
                        offset: v,
                    })?
                    .to_vec(),
            ),
        };
        variables.push(ReflectedVariable {
            name: r.cstr_at(name_offset)?,
            offset: start,
            size,
            ty: parse_type(rdef, type_offset)?,
            default_value,
        });
    }
    Ok(variables)
}

/// Parses the data of an `RDEF` chunk.
///
/// # Arguments
///
/// * `rdef`: the chunk data, without the chunk header.
///
/// returns: Result<Reflection, DxbcError>
///
/// # Errors
///
/// Returns a [DxbcError](DxbcError) if any table or string lies outside the chunk.
pub fn parse_rdef(rdef: &[u8]) -> Result<Reflection, DxbcError> {
    let mut header = Reader::new(rdef, 0, "RDEF header");
    let cb_count = header.u32()? as usize;
    let cb_offset = header.u32()? as usize;
    let res_count = header.u32()? as usize;
    let res_offset = header.u32()? as usize;
    let _target = header.u32()?;
    let _flags = header.u32()?;
    let _creator = header.u32()?;
    let var_stride = match rdef.get(28..32) {
        Some(magic) if magic == RD11_MAGIC => VARIABLE_DESC_SIZE_RD11,
        _ => VARIABLE_DESC_SIZE,
    };

    check_table(rdef, res_offset, res_count, RESOURCE_DESC_SIZE, "resource binding")?;
    let mut resources = Vec::with_capacity(res_count);
    for i in 0..res_count {
        let mut r = Reader::new(rdef, res_offset + i * RESOURCE_DESC_SIZE, "resource binding");
        let name_offset = r.u32()? as usize;
        let kind = r.u32()?;
        let _return_type = r.u32()?;
        let _dimension = r.u32()?;
        let _samples = r.u32()?;
        let bind_point = r.u32()?;
        let bind_count = r.u32()?;
        resources.push(BoundResource {
            name: r.cstr_at(name_offset)?,
            kind: kind.into(),
            bind_point,
            bind_count,
        });
    }

    check_table(rdef, cb_offset, cb_count, CBUFFER_DESC_SIZE, "constant buffer")?;
    let mut constant_buffers = Vec::with_capacity(cb_count);
    for i in 0..cb_count {
        let mut r = Reader::new(rdef, cb_offset + i * CBUFFER_DESC_SIZE, "constant buffer");
        let name_offset = r.u32()? as usize;
        let var_count = r.u32()? as usize;
        let var_offset = r.u32()? as usize;
        let size = r.u32()?;
        let name = r.cstr_at(name_offset)?;
        let bind_point = resources
            .iter()
            .find(|v| v.kind == ResourceKind::ConstantBuffer && v.name == name)
            .map(|v| v.bind_point)
            .unwrap_or(0);
        constant_buffers.push(ReflectedBuffer {
            variables: parse_variables(rdef, var_offset, var_count, var_stride)?,
            name,
            size,
            bind_point,
        });
    }

    Ok(Reflection {
        constant_buffers,
        resources,
    })
}

/// A [Reflector] for DXBC bytecode, as produced by the Direct3D shader compiler for shader
/// models 4 and 5.
#[derive(Copy, Clone, Debug, Default)]
pub struct DxbcReflector;

impl DxbcReflector {
    /// Creates a new DXBC reflector.
    pub fn new() -> DxbcReflector {
        DxbcReflector
    }

    /// Reflects a DXBC container.
    ///
    /// # Arguments
    ///
    /// * `bytecode`: the full DXBC container.
    ///
    /// returns: Result<Reflection, DxbcError>
    ///
    /// # Errors
    ///
    /// Returns a [DxbcError](DxbcError) if the container is malformed or has no resource
    /// definitions.
    pub fn parse(&self, bytecode: &[u8]) -> Result<Reflection, DxbcError> {
        let rdef =
            find_chunk(bytecode, RDEF_MAGIC)?.ok_or(DxbcError::MissingResourceDefinitions)?;
        parse_rdef(rdef)
    }
}

impl Reflector for DxbcReflector {
    fn reflect(&self, bytecode: &[u8]) -> Result<Reflection, String> {
        self.parse(bytecode).map_err(|e| e.to_string())
    }
}
