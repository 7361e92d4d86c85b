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

//! Serialization of compiled effects.
//!
//! A compiled effect is laid out as follows (little-endian, `str` being a length-prefixed
//! string):
//!
//! * header: `u32` magic, `u32` vertex format tag, `u8` annotation count (always 0),
//! * one program table per [ProgramType], in [ProgramType::ALL] order, each starting with
//!   the implicit NULL program,
//! * the global buffer table then the local buffer table,
//! * the technique table.

mod descriptor;
mod writer;

use std::{collections::HashMap, io::Write, path::Path};

pub use descriptor::{
    program_buffers, program_variable_names, BufferDescriptor, BufferTable, BufferTables,
    EngineType, VariableDescriptor, SAMPLER_FLAG_BASE, TEXTURE_FLAG_BASE,
};
pub use writer::{BinaryWriter, MAX_COUNT};

use crate::{
    effect::Effect,
    error::{CapacityContext, Error},
    program::{ProgramType, NULL_PROGRAM_NAME, PROGRAM_TYPE_COUNT},
    reflect::Reflection,
    toolchain::Reflector,
    Result,
};

/// The file magic: `'r', 'g', 'x', 'e'` read as a little-endian u32.
pub const MAGIC: u32 = u32::from_le_bytes(*b"rgxe");

/// Serializes an [Effect] into a compiled effect.
pub struct EffectSaver<'a> {
    effect: &'a Effect,
    reflector: &'a dyn Reflector,
}

impl<'a> EffectSaver<'a> {
    /// Creates a new effect saver.
    ///
    /// # Arguments
    ///
    /// * `effect`: the effect to serialize.
    /// * `reflector`: the reflector used to extract buffer and variable metadata from the
    ///   compiled programs.
    ///
    /// returns: EffectSaver
    pub fn new(effect: &'a Effect, reflector: &'a dyn Reflector) -> EffectSaver<'a> {
        EffectSaver { effect, reflector }
    }

    // Programs with no code or which fail to reflect are serialized without metadata.
    fn reflect_programs(&self) -> Result<Vec<(&'a str, Reflection)>> {
        let mut reflections: Vec<(&'a str, Reflection)> = Vec::new();
        for ty in ProgramType::ALL {
            for name in self.effect.used_programs(ty) {
                if reflections.iter().any(|(v, _)| *v == name.as_str()) {
                    continue;
                }
                let code = self.effect.program_code(name)?;
                if code.is_empty() {
                    continue;
                }
                match self.reflector.reflect(code) {
                    Ok(r) => reflections.push((name.as_str(), r)),
                    Err(e) => {
                        log::warn!("failed to reflect '{}' ({}), writing no metadata", name, e)
                    },
                }
            }
        }
        Ok(reflections)
    }

    fn write_programs<W: Write>(
        &self,
        w: &mut BinaryWriter<W>,
        reflections: &HashMap<&str, &Reflection>,
    ) -> Result<()> {
        let empty = Reflection::default();
        for ty in ProgramType::ALL {
            let used = self.effect.used_programs(ty);
            log::debug!("writing {} {} program(s)", used.len(), ty);
            w.count(CapacityContext::Programs, used.len() + 1)?;
            w.str(NULL_PROGRAM_NAME)?;
            w.u8(0)?;
            w.u8(0)?;
            if ty == ProgramType::Geometry {
                w.u8(0)?;
            }
            w.u32(0)?;
            for name in used {
                let code = self.effect.program_code(name)?;
                let reflection = reflections.get(name.as_str()).copied().unwrap_or(&empty);
                w.str(name)?;
                let names = program_variable_names(reflection);
                w.count(CapacityContext::ProgramVariables, names.len())?;
                for v in names {
                    w.str(v)?;
                }
                let buffers = program_buffers(reflection)?;
                w.count(CapacityContext::ProgramBuffers, buffers.len())?;
                for b in &buffers {
                    w.str(&b.name)?;
                    w.u16(b.register)?;
                    w.u8(0)?;
                }
                let len = u32::try_from(code.size())
                    .map_err(|_| Error::Capacity(CapacityContext::CodeBytes, code.size()))?;
                w.u32(len)?;
                w.bytes(code)?;
                if len > 0 {
                    let target = ty.target();
                    w.u8(target.major)?;
                    w.u8(target.minor)?;
                }
            }
        }
        Ok(())
    }

    fn write_buffer_table<W: Write>(w: &mut BinaryWriter<W>, table: &BufferTable) -> Result<()> {
        w.count(CapacityContext::Buffers, table.buffers.len())?;
        for b in table.buffers.values() {
            w.u32(b.size)?;
            for _ in 0..PROGRAM_TYPE_COUNT {
                w.u16(b.register)?;
            }
            w.str(&b.name)?;
        }
        w.count(CapacityContext::Variables, table.variables.len())?;
        for v in table.variables.values() {
            w.u8(v.ty.code())?;
            w.u8(v.elements)?;
            w.u8(v.flags[0])?;
            w.u8(v.flags[1])?;
            w.str(&v.name)?;
            // No separate description is stored.
            w.str(&v.name)?;
            w.u32(v.offset)?;
            w.u32(v.buffer.into_inner())?;
            w.u8(0)?;
            w.count(CapacityContext::InitialValues, v.initial_values.len())?;
            for value in &v.initial_values {
                w.u32(*value)?;
            }
        }
        Ok(())
    }

    fn write_techniques<W: Write>(&self, w: &mut BinaryWriter<W>) -> Result<()> {
        let techniques = self.effect.techniques();
        log::debug!("writing {} technique(s)", techniques.len());
        w.count(CapacityContext::Techniques, techniques.len())?;
        for technique in techniques {
            w.str(technique.name())?;
            w.count(CapacityContext::Passes, technique.passes().len())?;
            for pass in technique.passes() {
                w.bytes(&self.effect.program_indices_for_pass(pass)?)?;
                w.count(CapacityContext::Assignments, pass.assignments().len())?;
                for a in pass.assignments() {
                    w.u32(a.kind.code())?;
                    w.u32(a.value)?;
                }
            }
        }
        Ok(())
    }

    /// Serializes the effect to a byte buffer.
    ///
    /// returns: Result<Vec<u8>, Error>
    ///
    /// # Errors
    ///
    /// An [Error](crate::error::Error) is returned if any table or string exceeds its field
    /// capacity or a reflected variable cannot be encoded.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let reflections = self.reflect_programs()?;
        let mut tables = BufferTables::default();
        for (_, reflection) in &reflections {
            tables.add(self.effect, reflection)?;
        }
        let by_name: HashMap<&str, &Reflection> =
            reflections.iter().map(|(name, r)| (*name, r)).collect();

        let mut w = BinaryWriter::new(Vec::new());
        w.u32(MAGIC)?;
        w.u32(self.effect.vertex_format())?;
        w.u8(0)?;
        self.write_programs(&mut w, &by_name)?;
        log::debug!(
            "writing {} global and {} local buffer(s)",
            tables.global.buffers.len(),
            tables.local.buffers.len()
        );
        Self::write_buffer_table(&mut w, &tables.global)?;
        Self::write_buffer_table(&mut w, &tables.local)?;
        self.write_techniques(&mut w)?;
        Ok(w.into_inner())
    }

    /// Serializes the effect to an io backend.
    ///
    /// Nothing is written unless serialization succeeds entirely.
    ///
    /// # Arguments
    ///
    /// * `out`: the io backend to write to.
    ///
    /// returns: Result<(), Error>
    ///
    /// # Errors
    ///
    /// Same as [to_bytes](EffectSaver::to_bytes), plus io errors.
    pub fn write_to<W: Write>(&self, out: &mut W) -> Result<()> {
        let bytes = self.to_bytes()?;
        out.write_all(&bytes)?;
        out.flush()?;
        Ok(())
    }

    /// Serializes the effect to a file.
    ///
    /// The effect is first written to a temporary file next to `path`, which then replaces
    /// `path`; a failure never leaves a partial file at `path`.
    ///
    /// # Arguments
    ///
    /// * `path`: the destination file path.
    ///
    /// returns: Result<(), Error>
    ///
    /// # Errors
    ///
    /// Returns [InvalidPath](Error::InvalidPath) if `path` has no file name or its parent
    /// directory does not exist, otherwise same as [write_to](EffectSaver::write_to).
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if path.file_name().is_none() {
            return Err(Error::InvalidPath(format!(
                "'{}' is not a valid file path",
                path.display()
            )));
        }
        let full = if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir()?.join(path)
        };
        let parent = match full.parent() {
            Some(v) if v.is_dir() => v,
            _ => {
                return Err(Error::InvalidPath(format!(
                    "parent directory of '{}' does not exist",
                    path.display()
                )))
            },
        };
        let mut file = tempfile::NamedTempFile::new_in(parent)?;
        self.write_to(&mut file)?;
        file.persist(&full).map_err(|e| Error::Io(e.error))?;
        log::debug!("saved {}", full.display());
        Ok(())
    }
}
