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

use std::path::{Path, PathBuf};

use crate::{
    program::Target,
    toolchain::{CompileFlags, Compiler, IncludeHandler},
};

/// The file extension of compiled shader objects.
pub const COMPILED_SHADER_EXT: &str = "cso";

/// A [Compiler] which loads bytecode produced ahead of time by an external shader compiler.
///
/// The bytecode of entry point `name` is read from `<directory>/<name>.cso`; the source text,
/// target and flags are ignored.
#[derive(Clone, Debug)]
pub struct PrecompiledCompiler {
    directory: PathBuf,
}

impl PrecompiledCompiler {
    /// Creates a new precompiled bytecode loader.
    ///
    /// # Arguments
    ///
    /// * `directory`: the directory containing the compiled shader objects.
    ///
    /// returns: PrecompiledCompiler
    pub fn new(directory: impl Into<PathBuf>) -> PrecompiledCompiler {
        PrecompiledCompiler {
            directory: directory.into(),
        }
    }

    /// Returns the path the bytecode of an entry point is loaded from.
    pub fn object_path(&self, entry_point: &str) -> PathBuf {
        self.directory
            .join(entry_point)
            .with_extension(COMPILED_SHADER_EXT)
    }
}

impl Compiler for PrecompiledCompiler {
    fn compile(
        &self,
        _: &str,
        source_path: &Path,
        _: &mut dyn IncludeHandler,
        entry_point: &str,
        target: &Target,
        _: CompileFlags,
    ) -> Result<Vec<u8>, String> {
        let path = self.object_path(entry_point);
        log::debug!(
            "loading {} ({}) for {} from {}",
            entry_point,
            target.profile,
            source_path.display(),
            path.display()
        );
        std::fs::read(&path).map_err(|e| format!("{}: {}", path.display(), e))
    }
}
