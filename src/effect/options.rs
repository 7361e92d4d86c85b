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

//! Effect compilation options.

use std::path::PathBuf;

use crate::toolchain::CompileFlags;

/// Options for building an [Effect](crate::effect::Effect).
#[derive(Clone, Debug, Default)]
pub struct EffectOptions {
    include_dirs: Vec<PathBuf>,
    vertex_format: u32,
    flags: CompileFlags,
}

impl EffectOptions {
    /// Creates a new set of effect options.
    pub fn new() -> EffectOptions {
        EffectOptions::default()
    }

    /// Adds a directory searched for system includes.
    ///
    /// *Directories are searched in the order they were added, after the built-in headers.*
    ///
    /// # Arguments
    ///
    /// * `dir`: the include directory.
    ///
    /// returns: &mut EffectOptions
    ///
    /// # Examples
    ///
    /// ```
    /// use rgxe::effect::EffectOptions;
    ///
    /// let mut options = EffectOptions::new();
    /// options.include_dir("shaders/common").include_dir("shaders/lib");
    /// assert_eq!(options.get_include_dirs().len(), 2);
    /// ```
    pub fn include_dir(&mut self, dir: impl Into<PathBuf>) -> &mut Self {
        self.include_dirs.push(dir.into());
        self
    }

    /// Defines the vertex format tag written in the effect header.
    ///
    /// *The default value is 0.*
    ///
    /// # Arguments
    ///
    /// * `tag`: the vertex format tag.
    ///
    /// returns: &mut EffectOptions
    pub fn vertex_format(&mut self, tag: u32) -> &mut Self {
        self.vertex_format = tag;
        self
    }

    /// Defines the flags passed to the compiler.
    ///
    /// *By default, matrices are packed row-major and backwards compatibility is enabled.*
    ///
    /// # Arguments
    ///
    /// * `flags`: the compiler flags.
    ///
    /// returns: &mut EffectOptions
    ///
    /// # Examples
    ///
    /// ```
    /// use rgxe::effect::EffectOptions;
    /// use rgxe::toolchain::CompileFlags;
    ///
    /// let mut options = EffectOptions::new();
    /// assert!(options.get_flags().contains(CompileFlags::PACK_MATRIX_ROW_MAJOR));
    /// options.flags(CompileFlags::NONE);
    /// assert_eq!(options.get_flags().bits(), 0);
    /// ```
    pub fn flags(&mut self, flags: CompileFlags) -> &mut Self {
        self.flags = flags;
        self
    }

    /// Returns the directories searched for system includes, in order.
    pub fn get_include_dirs(&self) -> &[PathBuf] {
        &self.include_dirs
    }

    /// Returns the vertex format written to the effect header.
    pub fn get_vertex_format(&self) -> u32 {
        self.vertex_format
    }

    /// Returns the compiler flags.
    pub fn get_flags(&self) -> CompileFlags {
        self.flags
    }
}
