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

//! Bytecode reflection data: constant buffers, their variables and bound resources.

mod dxbc;

pub use dxbc::{DxbcError, DxbcReflector};

/// The class of a reflected type.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum TypeClass {
    Scalar,
    Vector,
    /// A matrix stored row-major.
    MatrixRows,
    /// A matrix stored column-major.
    MatrixColumns,
    /// A texture, sampler or string object.
    Object,
    Struct,
    /// Any other class code.
    Other(u16),
}

impl From<u16> for TypeClass {
    fn from(code: u16) -> Self {
        match code {
            0 => TypeClass::Scalar,
            1 => TypeClass::Vector,
            2 => TypeClass::MatrixRows,
            3 => TypeClass::MatrixColumns,
            4 => TypeClass::Object,
            5 => TypeClass::Struct,
            v => TypeClass::Other(v),
        }
    }
}

/// The underlying element type of a reflected type.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum BaseType {
    Void,
    Bool,
    Int,
    UInt,
    Float,
    String,
    /// Any texture object.
    Texture,
    /// Any sampler object.
    Sampler,
    /// Any other type code.
    Other(u16),
}

impl From<u16> for BaseType {
    fn from(code: u16) -> Self {
        match code {
            0 => BaseType::Void,
            1 => BaseType::Bool,
            2 => BaseType::Int,
            3 => BaseType::Float,
            4 => BaseType::String,
            5..=9 | 28 => BaseType::Texture,
            10..=14 | 46 => BaseType::Sampler,
            19 => BaseType::UInt,
            v => BaseType::Other(v),
        }
    }
}

/// Describes the type of a reflected variable.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct TypeDesc {
    pub class: TypeClass,
    pub base: BaseType,
    pub rows: u16,
    pub columns: u16,
    /// The array length, 0 when the variable is not an array.
    pub elements: u16,
}

/// A variable of a constant buffer.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ReflectedVariable {
    pub name: String,

    /// The byte offset of the variable in its buffer.
    pub offset: u32,

    /// The size in bytes of the variable.
    pub size: u32,

    pub ty: TypeDesc,

    /// The initial value bytes, if the source declares one.
    pub default_value: Option<Vec<u8>>,
}

/// A constant buffer used by a program.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ReflectedBuffer {
    pub name: String,

    /// The size in bytes of the buffer.
    pub size: u32,

    /// The register the buffer is bound to.
    pub bind_point: u32,

    pub variables: Vec<ReflectedVariable>,
}

/// The kind of a bound resource.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ResourceKind {
    ConstantBuffer,
    TextureBuffer,
    Texture,
    Sampler,
    /// Any other shader input type.
    Other(u32),
}

impl From<u32> for ResourceKind {
    fn from(code: u32) -> Self {
        match code {
            0 => ResourceKind::ConstantBuffer,
            1 => ResourceKind::TextureBuffer,
            2 => ResourceKind::Texture,
            3 => ResourceKind::Sampler,
            v => ResourceKind::Other(v),
        }
    }
}

/// A resource bound to a register of a program.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BoundResource {
    pub name: String,
    pub kind: ResourceKind,
    pub bind_point: u32,
    pub bind_count: u32,
}

/// Reflection data of one program.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Reflection {
    pub constant_buffers: Vec<ReflectedBuffer>,
    pub resources: Vec<BoundResource>,
}

impl Reflection {
    /// Returns an iterator over the texture and sampler resources.
    pub fn textures_and_samplers(&self) -> impl Iterator<Item = &BoundResource> {
        self.resources
            .iter()
            .filter(|r| matches!(r.kind, ResourceKind::Texture | ResourceKind::Sampler))
    }
}
