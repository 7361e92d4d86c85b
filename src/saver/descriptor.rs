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

//! Buffer and variable descriptors derived from program reflection data.

use std::collections::BTreeMap;

use crate::{
    effect::Effect,
    error::{CapacityContext, Error},
    hash::Name,
    reflect::{
        BaseType, BoundResource, ReflectedBuffer, ReflectedVariable, Reflection, ResourceKind,
        TypeClass, TypeDesc,
    },
    Result,
};

/// The value added to the bind point of a texture in its first flag byte.
pub const TEXTURE_FLAG_BASE: u32 = 0x40;

/// The value added to the bind point of a sampler in its first flag byte.
pub const SAMPLER_FLAG_BASE: u32 = 0x00;

/// Enum of all engine variable types.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum EngineType {
    /// A texture or sampler resource.
    Texture,
    Float,
    Float2,
    Float3,
    Float4,
    String,
    Bool,
    /// A row-major 3x4 matrix.
    Float3x4,
    /// A row-major 4x4 matrix.
    Float4x4,
    Int,
    Int2,
    Int3,
    Int4,
}

impl EngineType {
    /// Returns the type code written in compiled effects.
    pub fn code(&self) -> u8 {
        match self {
            EngineType::Texture => 1,
            EngineType::Float => 2,
            EngineType::Float2 => 3,
            EngineType::Float3 => 4,
            EngineType::Float4 => 5,
            EngineType::String => 6,
            EngineType::Bool => 7,
            EngineType::Float3x4 => 8,
            EngineType::Float4x4 => 9,
            EngineType::Int => 10,
            EngineType::Int2 => 11,
            EngineType::Int3 => 12,
            EngineType::Int4 => 13,
        }
    }

    /// Classifies a reflected type.
    ///
    /// returns: None if the type has no engine counterpart.
    pub fn from_type(ty: &TypeDesc) -> Option<EngineType> {
        let vector_width = match ty.class {
            TypeClass::Scalar => Some(1),
            TypeClass::Vector => Some(ty.columns),
            _ => None,
        };
        match (ty.class, ty.base, vector_width) {
            (_, BaseType::Float, Some(1)) => Some(EngineType::Float),
            (_, BaseType::Float, Some(2)) => Some(EngineType::Float2),
            (_, BaseType::Float, Some(3)) => Some(EngineType::Float3),
            (_, BaseType::Float, Some(4)) => Some(EngineType::Float4),
            (_, BaseType::Int | BaseType::UInt, Some(1)) => Some(EngineType::Int),
            (_, BaseType::Int | BaseType::UInt, Some(2)) => Some(EngineType::Int2),
            (_, BaseType::Int | BaseType::UInt, Some(3)) => Some(EngineType::Int3),
            (_, BaseType::Int | BaseType::UInt, Some(4)) => Some(EngineType::Int4),
            (TypeClass::Scalar, BaseType::Bool, _) => Some(EngineType::Bool),
            (TypeClass::MatrixRows, BaseType::Float, _) => match (ty.rows, ty.columns) {
                (3, 4) => Some(EngineType::Float3x4),
                (4, 4) => Some(EngineType::Float4x4),
                _ => None,
            },
            (TypeClass::Object, BaseType::String, _) => Some(EngineType::String),
            (TypeClass::Object, BaseType::Texture | BaseType::Sampler, _) => {
                Some(EngineType::Texture)
            },
            _ => None,
        }
    }
}

/// A constant buffer entry of a buffer table or program buffer table.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BufferDescriptor {
    pub name: String,
    pub size: u32,
    pub register: u16,
}

impl BufferDescriptor {
    fn new(buffer: &ReflectedBuffer) -> Result<BufferDescriptor> {
        let register = u16::try_from(buffer.bind_point).map_err(|_| Error::InvalidRegister {
            name: buffer.name.clone(),
            register: buffer.bind_point,
        })?;
        Ok(BufferDescriptor {
            name: buffer.name.clone(),
            size: buffer.size,
            register,
        })
    }
}

/// A variable entry of a buffer table.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VariableDescriptor {
    pub name: String,
    pub ty: EngineType,
    pub elements: u8,
    pub flags: [u8; 2],
    /// The byte offset in the owning buffer, 0 for resources.
    pub offset: u32,
    /// The hash of the owning buffer name, [NONE](Name::NONE) for resources.
    pub buffer: Name,
    pub initial_values: Vec<u32>,
}

impl VariableDescriptor {
    fn from_member(buffer: &ReflectedBuffer, var: &ReflectedVariable) -> Result<Self> {
        let ty = EngineType::from_type(&var.ty).ok_or_else(|| Error::UnsupportedType {
            name: var.name.clone(),
            ty: format!("{:?}", var.ty),
        })?;
        let elements = u8::try_from(var.ty.elements)
            .map_err(|_| Error::Capacity(CapacityContext::Elements, var.ty.elements as usize))?;
        let initial_values = match &var.default_value {
            Some(bytes) => {
                if bytes.len() % 4 != 0 {
                    return Err(Error::UnalignedDefaultValue {
                        name: var.name.clone(),
                        size: bytes.len(),
                    });
                }
                bytes
                    .chunks_exact(4)
                    .map(|w| u32::from_le_bytes([w[0], w[1], w[2], w[3]]))
                    .collect()
            },
            None => Vec::new(),
        };
        Ok(VariableDescriptor {
            name: var.name.clone(),
            ty,
            elements,
            flags: [0, 0],
            offset: var.offset,
            buffer: Name::from(&buffer.name),
            initial_values,
        })
    }

    fn from_resource(effect: &Effect, res: &BoundResource) -> Result<Self> {
        let base = match res.kind {
            ResourceKind::Texture => TEXTURE_FLAG_BASE,
            _ => SAMPLER_FLAG_BASE,
        };
        let flag = res
            .bind_point
            .checked_add(base)
            .and_then(|v| u8::try_from(v).ok())
            .ok_or_else(|| Error::InvalidRegister {
                name: res.name.clone(),
                register: res.bind_point,
            })?;
        let initial_values = match effect.sampler_state(&res.name) {
            Some(state) => state
                .assignments()
                .iter()
                .flat_map(|a| [a.relative_code(), a.value])
                .collect(),
            None => Vec::new(),
        };
        Ok(VariableDescriptor {
            name: res.name.clone(),
            ty: EngineType::Texture,
            elements: 0,
            flags: [flag, 0],
            offset: 0,
            buffer: Name::NONE,
            initial_values,
        })
    }
}

/// The constant buffers and variables of one class (global or local).
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct BufferTable {
    /// Buffers ordered by name.
    pub buffers: BTreeMap<String, BufferDescriptor>,

    /// Variables ordered by name.
    pub variables: BTreeMap<String, VariableDescriptor>,
}

/// The global and local buffer tables of an effect.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct BufferTables {
    pub global: BufferTable,
    pub local: BufferTable,
}

impl BufferTables {
    fn table(&mut self, global: bool) -> &mut BufferTable {
        if global {
            &mut self.global
        } else {
            &mut self.local
        }
    }

    /// Adds the buffers and variables of one program. Entries already present by name are
    /// kept as first seen.
    ///
    /// # Arguments
    ///
    /// * `effect`: the effect the program belongs to.
    /// * `reflection`: the reflection data of the program.
    ///
    /// returns: Result<(), Error>
    ///
    /// # Errors
    ///
    /// An [Error](crate::error::Error) is returned if a variable type is unsupported, a
    /// default value is not word aligned or a register does not fit its field.
    pub fn add(&mut self, effect: &Effect, reflection: &Reflection) -> Result<()> {
        for buffer in &reflection.constant_buffers {
            let table = self.table(effect.is_shared(&buffer.name));
            if !table.buffers.contains_key(&buffer.name) {
                table
                    .buffers
                    .insert(buffer.name.clone(), BufferDescriptor::new(buffer)?);
            }
            for var in &buffer.variables {
                if !table.variables.contains_key(&var.name) {
                    let desc = VariableDescriptor::from_member(buffer, var)?;
                    table.variables.insert(var.name.clone(), desc);
                }
            }
        }
        for res in reflection.textures_and_samplers() {
            let table = self.table(effect.is_shared(&res.name));
            if !table.variables.contains_key(&res.name) {
                let desc = VariableDescriptor::from_resource(effect, res)?;
                table.variables.insert(res.name.clone(), desc);
            }
        }
        Ok(())
    }
}

/// Returns the buffer table of one program, ordered by name.
pub fn program_buffers(reflection: &Reflection) -> Result<Vec<BufferDescriptor>> {
    let mut buffers: BTreeMap<&str, BufferDescriptor> = BTreeMap::new();
    for buffer in &reflection.constant_buffers {
        if !buffers.contains_key(buffer.name.as_str()) {
            buffers.insert(&buffer.name, BufferDescriptor::new(buffer)?);
        }
    }
    Ok(buffers.into_values().collect())
}

/// Returns the variable names of one program: constant buffer members and texture/sampler
/// resources, without duplicates and ordered by name.
pub fn program_variable_names(reflection: &Reflection) -> Vec<&str> {
    let mut names: Vec<&str> = reflection
        .constant_buffers
        .iter()
        .flat_map(|b| b.variables.iter().map(|v| v.name.as_str()))
        .chain(reflection.textures_and_samplers().map(|r| r.name.as_str()))
        .collect();
    names.sort_unstable();
    names.dedup();
    names
}
