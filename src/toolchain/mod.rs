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

//! The shader toolchain seams: preprocessing, compilation and reflection.
//!
//! The effect model never compiles shader code itself; it drives a [Toolchain] made of a
//! [Preprocessor], a [Compiler] and a [Reflector]. This crate ships Rust-native
//! implementations of each ([IncludeExpander], [PrecompiledCompiler] and
//! [DxbcReflector](crate::reflect::DxbcReflector)).

mod precompiled;
mod preprocess;

use std::{ops::BitOr, path::Path};

pub use precompiled::PrecompiledCompiler;
pub use preprocess::{IncludeExpander, MAX_INCLUDE_DEPTH};

pub use crate::include::{IncludeHandle, IncludeHandler, IncludeKind};
use crate::{program::Target, reflect::Reflection};

/// A set of compiler flags, using the Direct3D compiler bit values.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct CompileFlags(u32);

impl CompileFlags {
    /// No flags.
    pub const NONE: CompileFlags = CompileFlags(0);

    /// Pack matrices in row-major order.
    pub const PACK_MATRIX_ROW_MAJOR: CompileFlags = CompileFlags(1 << 3);

    /// Accept legacy syntax.
    pub const ENABLE_BACKWARDS_COMPATIBILITY: CompileFlags = CompileFlags(1 << 12);

    /// Creates a flag set from raw bits.
    pub fn from_bits(bits: u32) -> CompileFlags {
        CompileFlags(bits)
    }

    /// Returns the raw bits of this flag set.
    pub fn bits(&self) -> u32 {
        self.0
    }

    /// Returns true if every flag of `other` is set.
    pub fn contains(&self, other: CompileFlags) -> bool {
        self.0 & other.0 == other.0
    }
}

impl Default for CompileFlags {
    fn default() -> Self {
        CompileFlags::PACK_MATRIX_ROW_MAJOR | CompileFlags::ENABLE_BACKWARDS_COMPATIBILITY
    }
}

impl BitOr for CompileFlags {
    type Output = CompileFlags;

    fn bitor(self, rhs: Self) -> Self::Output {
        CompileFlags(self.0 | rhs.0)
    }
}

/// Expands a source text before it is handed to the grammar.
pub trait Preprocessor {
    /// Preprocesses a source text.
    ///
    /// # Arguments
    ///
    /// * `source`: the raw source text.
    /// * `source_path`: the path identifying the source in diagnostics.
    /// * `includes`: the include callback.
    ///
    /// returns: Result<String, String>
    ///
    /// # Errors
    ///
    /// Returns the toolchain diagnostic on failure.
    fn preprocess(
        &self,
        source: &str,
        source_path: &Path,
        includes: &mut dyn IncludeHandler,
    ) -> Result<String, String>;
}

/// Compiles one entry point of a source text to bytecode.
pub trait Compiler {
    /// Compiles an entry point.
    ///
    /// # Arguments
    ///
    /// * `source`: the raw source text.
    /// * `source_path`: the path identifying the source in diagnostics.
    /// * `includes`: the include callback.
    /// * `entry_point`: the name of the function to compile.
    /// * `target`: the target profile.
    /// * `flags`: the compiler flags.
    ///
    /// returns: Result<Vec<u8>, String>
    ///
    /// # Errors
    ///
    /// Returns the toolchain diagnostic on failure.
    fn compile(
        &self,
        source: &str,
        source_path: &Path,
        includes: &mut dyn IncludeHandler,
        entry_point: &str,
        target: &Target,
        flags: CompileFlags,
    ) -> Result<Vec<u8>, String>;
}

/// Extracts constant buffer and resource metadata from bytecode.
pub trait Reflector {
    /// Reflects a bytecode blob.
    ///
    /// # Errors
    ///
    /// Returns a diagnostic if the bytecode cannot be reflected.
    fn reflect(&self, bytecode: &[u8]) -> Result<Reflection, String>;
}

/// A preprocessor, compiler and reflector used together to build effects.
pub struct Toolchain {
    preprocessor: Box<dyn Preprocessor>,
    compiler: Box<dyn Compiler>,
    reflector: Box<dyn Reflector>,
}

impl Toolchain {
    /// Creates a new toolchain.
    ///
    /// # Arguments
    ///
    /// * `preprocessor`: the source preprocessor.
    /// * `compiler`: the entry point compiler.
    /// * `reflector`: the bytecode reflector.
    ///
    /// returns: Toolchain
    pub fn new(
        preprocessor: impl Preprocessor + 'static,
        compiler: impl Compiler + 'static,
        reflector: impl Reflector + 'static,
    ) -> Toolchain {
        Toolchain {
            preprocessor: Box::new(preprocessor),
            compiler: Box::new(compiler),
            reflector: Box::new(reflector),
        }
    }

    /// Returns the source preprocessor.
    pub fn preprocessor(&self) -> &dyn Preprocessor {
        &*self.preprocessor
    }

    /// Returns the entry point compiler.
    pub fn compiler(&self) -> &dyn Compiler {
        &*self.compiler
    }

    /// Returns the bytecode reflector.
    pub fn reflector(&self) -> &dyn Reflector {
        &*self.reflector
    }
}
