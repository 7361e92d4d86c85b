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

#![allow(dead_code)]

use std::{cell::RefCell, collections::HashMap, path::Path, rc::Rc};

use rgxe::{
    include::IncludeHandler,
    program::Target,
    reflect::{
        BaseType, BoundResource, ReflectedBuffer, ReflectedVariable, Reflection, ResourceKind,
        TypeClass, TypeDesc,
    },
    toolchain::{CompileFlags, Compiler, Preprocessor, Reflector, Toolchain},
};

pub fn push_u32(out: &mut Vec<u8>, v: u32) {
    out.extend_from_slice(&v.to_le_bytes());
}

pub fn push_u16(out: &mut Vec<u8>, v: u16) {
    out.extend_from_slice(&v.to_le_bytes());
}

/// Returns the source unchanged.
pub struct PassThrough;

impl Preprocessor for PassThrough {
    fn preprocess(
        &self,
        source: &str,
        _: &Path,
        _: &mut dyn IncludeHandler,
    ) -> Result<String, String> {
        Ok(source.into())
    }
}

/// Compiles every entry point to `code:<name>` and records each call.
#[derive(Clone, Default)]
pub struct MockCompiler {
    pub calls: Rc<RefCell<Vec<(String, &'static str)>>>,
    pub failing: Option<&'static str>,
    /// Restricts `failing` to one target profile.
    pub failing_profile: Option<&'static str>,
    pub empty: Vec<&'static str>,
}

impl Compiler for MockCompiler {
    fn compile(
        &self,
        _: &str,
        _: &Path,
        _: &mut dyn IncludeHandler,
        entry_point: &str,
        target: &Target,
        _: CompileFlags,
    ) -> Result<Vec<u8>, String> {
        self.calls.borrow_mut().push((entry_point.into(), target.profile));
        let profile_fails = self.failing_profile.map_or(true, |v| v == target.profile);
        if self.failing == Some(entry_point) && profile_fails {
            return Err(format!("error X3000: syntax error in {}", entry_point));
        }
        if self.empty.iter().any(|v| *v == entry_point) {
            return Ok(Vec::new());
        }
        Ok(code(entry_point))
    }
}

pub fn code(entry_point: &str) -> Vec<u8> {
    format!("code:{}", entry_point).into_bytes()
}

/// Reflects `code:<name>` blobs from a table, fails for anything else.
#[derive(Clone, Default)]
pub struct MockReflector {
    pub table: HashMap<Vec<u8>, Reflection>,
}

impl MockReflector {
    pub fn with(mut self, entry_point: &str, reflection: Reflection) -> Self {
        self.table.insert(code(entry_point), reflection);
        self
    }
}

impl Reflector for MockReflector {
    fn reflect(&self, bytecode: &[u8]) -> Result<Reflection, String> {
        self.table
            .get(bytecode)
            .cloned()
            .ok_or_else(|| "not a program".into())
    }
}

pub fn toolchain(compiler: MockCompiler, reflector: MockReflector) -> Toolchain {
    Toolchain::new(PassThrough, compiler, reflector)
}

pub fn scalar(base: BaseType, columns: u16) -> TypeDesc {
    TypeDesc {
        class: if columns == 1 { TypeClass::Scalar } else { TypeClass::Vector },
        base,
        rows: 1,
        columns,
        elements: 0,
    }
}

pub fn matrix(rows: u16, columns: u16) -> TypeDesc {
    TypeDesc {
        class: TypeClass::MatrixRows,
        base: BaseType::Float,
        rows,
        columns,
        elements: 0,
    }
}

pub fn variable(
    name: &str,
    offset: u32,
    ty: TypeDesc,
    default_value: Option<Vec<u8>>,
) -> ReflectedVariable {
    let size = match ty.class {
        TypeClass::MatrixRows => ty.rows as u32 * 16,
        _ => ty.columns as u32 * 4,
    };
    ReflectedVariable {
        name: name.into(),
        offset,
        size,
        ty,
        default_value,
    }
}

pub fn buffer(
    name: &str,
    bind_point: u32,
    size: u32,
    variables: Vec<ReflectedVariable>,
) -> ReflectedBuffer {
    ReflectedBuffer {
        name: name.into(),
        size,
        bind_point,
        variables,
    }
}

pub fn resource(name: &str, kind: ResourceKind, bind_point: u32) -> BoundResource {
    BoundResource {
        name: name.into(),
        kind,
        bind_point,
        bind_count: 1,
    }
}

/// A minimal reader over serialized effects.
pub struct Cursor<'a> {
    pub bytes: &'a [u8],
    pub pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Cursor { bytes, pos: 0 }
    }

    pub fn u8(&mut self) -> u8 {
        let v = self.bytes[self.pos];
        self.pos += 1;
        v
    }

    pub fn u16(&mut self) -> u16 {
        let v = u16::from_le_bytes([self.bytes[self.pos], self.bytes[self.pos + 1]]);
        self.pos += 2;
        v
    }

    pub fn u32(&mut self) -> u32 {
        let b = &self.bytes[self.pos..self.pos + 4];
        self.pos += 4;
        u32::from_le_bytes([b[0], b[1], b[2], b[3]])
    }

    pub fn bytes(&mut self, len: usize) -> &'a [u8] {
        let v = &self.bytes[self.pos..self.pos + len];
        self.pos += len;
        v
    }

    pub fn str(&mut self) -> String {
        let len = self.u8() as usize;
        let v = self.bytes(len);
        assert_eq!(v[len - 1], 0);
        String::from_utf8(v[..len - 1].to_vec()).unwrap()
    }

    pub fn is_eof(&self) -> bool {
        self.pos == self.bytes.len()
    }
}

/// A constant buffer variable of a synthetic RDEF chunk.
pub struct RdefVariable {
    pub name: &'static str,
    pub offset: u32,
    pub size: u32,
    pub class: u16,
    pub ty: u16,
    pub rows: u16,
    pub columns: u16,
    pub elements: u16,
    pub default_value: Option<Vec<u8>>,
}

pub struct RdefBuffer {
    pub name: &'static str,
    pub size: u32,
    pub variables: Vec<RdefVariable>,
}

pub struct RdefResource {
    pub name: &'static str,
    pub kind: u32,
    pub bind_point: u32,
}

struct Heap {
    base: usize,
    bytes: Vec<u8>,
}

impl Heap {
    fn add(&mut self, data: &[u8]) -> u32 {
        let offset = self.base + self.bytes.len();
        self.bytes.extend_from_slice(data);
        offset as u32
    }

    fn add_str(&mut self, s: &str) -> u32 {
        let offset = self.add(s.as_bytes());
        self.bytes.push(0);
        offset
    }
}

/// Builds an `RDEF` chunk. With `rd11` the shader model 5 header and 40-byte variable
/// entries are used.
pub fn build_rdef(buffers: &[RdefBuffer], resources: &[RdefResource], rd11: bool) -> Vec<u8> {
    let header_size = if rd11 { 60 } else { 28 };
    let var_size = if rd11 { 40 } else { 24 };
    let res_offset = header_size;
    let cb_offset = res_offset + resources.len() * 32;
    let mut var_offset = cb_offset + buffers.len() * 24;
    let mut var_offsets = Vec::new();
    for b in buffers {
        var_offsets.push(var_offset);
        var_offset += b.variables.len() * var_size;
    }
    let mut heap = Heap {
        base: var_offset,
        bytes: Vec::new(),
    };

    let mut out = Vec::new();
    push_u32(&mut out, buffers.len() as u32);
    push_u32(&mut out, cb_offset as u32);
    push_u32(&mut out, resources.len() as u32);
    push_u32(&mut out, res_offset as u32);
    push_u32(&mut out, if rd11 { 0xFFFF_0500 } else { 0xFFFF_0400 });
    push_u32(&mut out, 0);
    let creator = heap.add_str("rgxe test suite");
    push_u32(&mut out, creator);
    if rd11 {
        out.extend_from_slice(b"RD11");
        for v in [60, 24, 40, 36, 12, 32, 0] {
            push_u32(&mut out, v);
        }
    }

    for r in resources {
        push_u32(&mut out, heap.add_str(r.name));
        push_u32(&mut out, r.kind);
        push_u32(&mut out, 0);
        push_u32(&mut out, 0);
        push_u32(&mut out, 0);
        push_u32(&mut out, r.bind_point);
        push_u32(&mut out, 1);
        push_u32(&mut out, 0);
    }

    for (b, offset) in buffers.iter().zip(&var_offsets) {
        push_u32(&mut out, heap.add_str(b.name));
        push_u32(&mut out, b.variables.len() as u32);
        push_u32(&mut out, *offset as u32);
        push_u32(&mut out, b.size);
        push_u32(&mut out, 0);
        push_u32(&mut out, 0);
    }

    for b in buffers {
        for v in &b.variables {
            let mut ty = Vec::new();
            for f in [v.class, v.ty, v.rows, v.columns, v.elements, 0] {
                push_u16(&mut ty, f);
            }
            push_u32(&mut ty, 0);
            push_u32(&mut out, heap.add_str(v.name));
            push_u32(&mut out, v.offset);
            push_u32(&mut out, v.size);
            push_u32(&mut out, 2);
            push_u32(&mut out, heap.add(&ty));
            push_u32(
                &mut out,
                v.default_value.as_ref().map(|d| heap.add(d)).unwrap_or(0),
            );
            if rd11 {
                for _ in 0..4 {
                    push_u32(&mut out, 0xFFFF_FFFF);
                }
            }
        }
    }

    assert_eq!(out.len(), heap.base);
    out.extend_from_slice(&heap.bytes);
    out
}

/// Builds a minimal `DXBC` container containing the provided chunks (checksum left zeroed).
pub fn build_container(chunks: &[(&[u8; 4], &[u8])]) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(b"DXBC");
    out.extend_from_slice(&[0u8; 16]);
    push_u32(&mut out, 1);
    push_u32(&mut out, 0);
    push_u32(&mut out, chunks.len() as u32);
    let offsets_pos = out.len();
    out.resize(out.len() + 4 * chunks.len(), 0);
    for (i, (fourcc, data)) in chunks.iter().enumerate() {
        let offset = out.len() as u32;
        out[offsets_pos + i * 4..offsets_pos + i * 4 + 4].copy_from_slice(&offset.to_le_bytes());
        out.extend_from_slice(*fourcc);
        push_u32(&mut out, data.len() as u32);
        out.extend_from_slice(data);
    }
    let total = out.len() as u32;
    out[24..28].copy_from_slice(&total.to_le_bytes());
    out
}
