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

//! The effect model: parsed techniques, sampler states and shared variables plus the
//! compiled code of every program the techniques reference.

mod options;

use std::{
    collections::{BTreeSet, HashMap},
    ops::Deref,
    path::{Path, PathBuf},
};

pub use options::EffectOptions;

use crate::{
    error::Error,
    grammar::{
        parse_sampler_states, parse_shared_variables, parse_techniques, Pass, SamplerState,
        Technique,
    },
    include::IncludeResolver,
    program::{ProgramType, PROGRAM_TYPE_COUNT},
    toolchain::Toolchain,
    Result,
};

/// The largest program index a pass can reference (index 0 being NULL).
pub const MAX_PROGRAM_INDEX: usize = u8::MAX as usize;

/// Immutable compiled bytecode of one entry point.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CodeBlob(Box<[u8]>);

impl CodeBlob {
    /// Returns the size in bytes of the bytecode.
    pub fn size(&self) -> usize {
        self.0.len()
    }
}

impl From<Vec<u8>> for CodeBlob {
    fn from(v: Vec<u8>) -> Self {
        CodeBlob(v.into_boxed_slice())
    }
}

impl Deref for CodeBlob {
    type Target = [u8];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

fn local_root(source_path: &Path) -> PathBuf {
    match source_path.parent() {
        Some(v) if !v.as_os_str().is_empty() => v.into(),
        _ => PathBuf::from("."),
    }
}

fn release_leftovers(resolver: &mut IncludeResolver, step: &str) {
    let count = resolver.release_all();
    if count > 0 {
        log::warn!("{} left {} include buffer(s) open", step, count);
    }
}

/// A parsed and compiled effect.
#[derive(Debug)]
pub struct Effect {
    source: String,
    source_path: PathBuf,
    vertex_format: u32,
    techniques: Vec<Technique>,
    sampler_states: Vec<SamplerState>,
    shared_variables: Vec<String>,
    programs: [Vec<String>; PROGRAM_TYPE_COUNT],
    code: HashMap<String, CodeBlob>,
}

impl Effect {
    /// Builds an effect: preprocesses the source, parses it, then compiles every entry point
    /// referenced by a technique pass.
    ///
    /// An entry point bound to several program types is compiled for each of them; the code
    /// kept is the one compiled for the first type in [ProgramType::ALL] order.
    ///
    /// # Arguments
    ///
    /// * `source`: the raw effect source text.
    /// * `source_path`: the path of the source; local includes resolve against its directory.
    /// * `options`: the effect options.
    /// * `toolchain`: the shader toolchain.
    ///
    /// returns: Result<Effect, Error>
    ///
    /// # Errors
    ///
    /// An [Error](crate::error::Error) is returned if preprocessing, parsing or compilation
    /// fails, or if a program type has more than 254 distinct programs.
    pub fn new(
        source: impl Into<String>,
        source_path: impl Into<PathBuf>,
        options: &EffectOptions,
        toolchain: &Toolchain,
    ) -> Result<Effect> {
        let source = source.into();
        let source_path = source_path.into();
        let mut resolver = IncludeResolver::new(
            local_root(&source_path),
            options.get_include_dirs().to_vec(),
        );

        let preprocessed = toolchain
            .preprocessor()
            .preprocess(&source, &source_path, &mut resolver)
            .map_err(Error::Preprocess);
        release_leftovers(&mut resolver, "preprocessor");
        let preprocessed = preprocessed?;

        let techniques = parse_techniques(&preprocessed);
        let sampler_states = parse_sampler_states(&preprocessed);
        let shared_variables = parse_shared_variables(&preprocessed);
        let techniques = techniques?;
        let sampler_states = sampler_states?;
        log::debug!(
            "parsed {} technique(s), {} sampler(s), {} shared variable(s)",
            techniques.len(),
            sampler_states.len(),
            shared_variables.len()
        );

        let mut programs: [Vec<String>; PROGRAM_TYPE_COUNT] = Default::default();
        for ty in ProgramType::ALL {
            let used: BTreeSet<&str> = techniques
                .iter()
                .flat_map(|t| t.passes())
                .filter_map(|p| p.program(ty))
                .collect();
            if used.len() >= MAX_PROGRAM_INDEX {
                return Err(Error::ProgramIndexOverflow(ty));
            }
            programs[ty.index()] = used.into_iter().map(String::from).collect();
        }

        let mut code = HashMap::new();
        for ty in ProgramType::ALL {
            let target = ty.target();
            for entry_point in &programs[ty.index()] {
                log::debug!("compiling {} ({})", entry_point, target.profile);
                let res = toolchain.compiler().compile(
                    &source,
                    &source_path,
                    &mut resolver,
                    entry_point,
                    &target,
                    options.get_flags(),
                );
                release_leftovers(&mut resolver, "compiler");
                let bytecode = res.map_err(|message| Error::Compile {
                    entry_point: entry_point.clone(),
                    message,
                })?;
                // The first program type an entry point is compiled for owns its code.
                code.entry(entry_point.clone()).or_insert_with(|| CodeBlob::from(bytecode));
            }
        }

        Ok(Effect {
            source,
            source_path,
            vertex_format: options.get_vertex_format(),
            techniques,
            sampler_states,
            shared_variables,
            programs,
            code,
        })
    }

    /// Returns the raw source text.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Returns the path of the source.
    pub fn source_path(&self) -> &Path {
        &self.source_path
    }

    /// Returns the vertex format tag written in the effect header.
    pub fn vertex_format(&self) -> u32 {
        self.vertex_format
    }

    /// Returns the techniques, in declaration order.
    pub fn techniques(&self) -> &[Technique] {
        &self.techniques
    }

    /// Returns the sampler states, in declaration order.
    pub fn sampler_states(&self) -> &[SamplerState] {
        &self.sampler_states
    }

    /// Returns the names of all `shared` declarations, in declaration order.
    pub fn shared_variables(&self) -> &[String] {
        &self.shared_variables
    }

    /// Returns true if the given name was declared `shared`.
    pub fn is_shared(&self, name: &str) -> bool {
        self.shared_variables.iter().any(|v| v == name)
    }

    /// Looks up a sampler state by sampler name.
    pub fn sampler_state(&self, name: &str) -> Option<&SamplerState> {
        self.sampler_states.iter().find(|v| v.name() == name)
    }

    /// Returns the entry points used by at least one pass for a program type, without
    /// duplicates and in ascending name order. NULL is never part of the list.
    pub fn used_programs(&self, ty: ProgramType) -> &[String] {
        &self.programs[ty.index()]
    }

    /// Computes the program index of each program type for a pass.
    ///
    /// Index 0 always designates the NULL program; used programs are numbered from 1 in the
    /// order of [used_programs](Effect::used_programs).
    ///
    /// # Arguments
    ///
    /// * `pass`: a pass of one of the techniques of this effect.
    ///
    /// returns: Result<[u8; PROGRAM_TYPE_COUNT], Error>
    ///
    /// # Errors
    ///
    /// Returns [EntryPointNotFound](Error::EntryPointNotFound) if the pass references a
    /// program this effect does not use, or
    /// [ProgramIndexOverflow](Error::ProgramIndexOverflow) if an index does not fit a byte.
    pub fn program_indices_for_pass(&self, pass: &Pass) -> Result<[u8; PROGRAM_TYPE_COUNT]> {
        let mut indices = [0; PROGRAM_TYPE_COUNT];
        for ty in ProgramType::ALL {
            if let Some(name) = pass.program(ty) {
                let pos = self.programs[ty.index()]
                    .binary_search_by(|v| v.as_str().cmp(name))
                    .map_err(|_| Error::EntryPointNotFound(name.into()))?;
                indices[ty.index()] =
                    u8::try_from(pos + 1).map_err(|_| Error::ProgramIndexOverflow(ty))?;
            }
        }
        Ok(indices)
    }

    /// Returns the compiled code of an entry point.
    ///
    /// # Errors
    ///
    /// Returns [EntryPointNotFound](Error::EntryPointNotFound) if no pass references the
    /// entry point.
    pub fn program_code(&self, entry_point: &str) -> Result<&CodeBlob> {
        self.code
            .get(entry_point)
            .ok_or_else(|| Error::EntryPointNotFound(entry_point.into()))
    }
}
