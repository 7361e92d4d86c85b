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

//! The include resolver serving `#include` requests of the shader toolchain.
//!
//! Every successful [open](IncludeHandler::open) returns an opaque [IncludeHandle]; the
//! included bytes stay available through [data](IncludeHandler::data) until the matching
//! [close](IncludeHandler::close).

pub mod builtin;

use std::{
    collections::HashMap,
    fmt::{Display, Formatter},
    num::NonZeroU32,
    path::{Path, PathBuf},
};

use crate::macros::named_enum;

const BUILTIN_BIT: u32 = 0x8000_0000;

named_enum!(
    /// The kind of an include request.
    IncludeKind {
        /// `#include "file"`: resolved relative to the including file.
        Local: "local",

        /// `#include <file>`: resolved against built-in headers then include directories.
        System: "system"
    }
);

/// Opaque identity of an open include buffer.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct IncludeHandle(NonZeroU32);

impl IncludeHandle {
    /// Extracts the raw key from this handle.
    pub fn into_raw(self) -> u32 {
        self.0.get()
    }

    fn builtin(index: usize) -> IncludeHandle {
        let raw = (index as u32 + 1) | BUILTIN_BIT;
        IncludeHandle(NonZeroU32::new(raw).unwrap_or(NonZeroU32::MIN))
    }

    fn builtin_index(&self) -> Option<usize> {
        let raw = self.0.get();
        if raw & BUILTIN_BIT != 0 {
            Some(((raw & !BUILTIN_BIT) - 1) as usize)
        } else {
            None
        }
    }
}

impl Display for IncludeHandle {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:08X}", self.0.get())
    }
}

struct HandleGenerator(u32);

impl HandleGenerator {
    fn new() -> HandleGenerator {
        HandleGenerator(0)
    }

    fn next(&mut self) -> IncludeHandle {
        // Start at 1 and stay clear of the built-in handle range.
        self.0 = (self.0 + 1) & !BUILTIN_BIT;
        IncludeHandle(NonZeroU32::new(self.0).unwrap_or(NonZeroU32::MIN))
    }
}

/// The include callback interface exposed to the shader toolchain.
///
/// Each successful open must be matched by exactly one close with the same handle.
pub trait IncludeHandler {
    /// Opens an included file.
    ///
    /// # Arguments
    ///
    /// * `kind`: the kind of include directive.
    /// * `filename`: the file name as written in the directive.
    /// * `parent`: the handle of the including file, None for the top-level source.
    ///
    /// returns: Option<IncludeHandle>, None if the file could not be opened.
    fn open(
        &mut self,
        kind: IncludeKind,
        filename: &str,
        parent: Option<IncludeHandle>,
    ) -> Option<IncludeHandle>;

    /// Returns the content of an open include, None if the handle is not open.
    fn data(&self, handle: IncludeHandle) -> Option<&[u8]>;

    /// Closes an include previously returned by [open](IncludeHandler::open).
    ///
    /// returns: false if the handle is not open.
    fn close(&mut self, handle: IncludeHandle) -> bool;
}

struct OpenBuffer {
    path: PathBuf,
    data: Vec<u8>,
}

/// Resolves includes against built-in headers, a root directory and include directories.
///
/// A resolver instance must not be shared between concurrent compilations.
pub struct IncludeResolver {
    root: PathBuf,
    include_dirs: Vec<PathBuf>,
    handles: HandleGenerator,
    buffers: HashMap<IncludeHandle, OpenBuffer>,
}

impl IncludeResolver {
    /// Creates a new include resolver.
    ///
    /// # Arguments
    ///
    /// * `root`: the directory local includes of the top-level source are resolved against.
    /// * `include_dirs`: the directories searched for system includes, in order.
    ///
    /// returns: IncludeResolver
    pub fn new(root: impl Into<PathBuf>, include_dirs: Vec<PathBuf>) -> IncludeResolver {
        IncludeResolver {
            root: root.into(),
            include_dirs,
            handles: HandleGenerator::new(),
            buffers: HashMap::new(),
        }
    }

    /// Returns the directory local includes of the top-level source are resolved against.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the number of file buffers currently open.
    ///
    /// Built-in headers are never counted.
    pub fn open_count(&self) -> usize {
        self.buffers.len()
    }

    /// Returns the path a file buffer was loaded from.
    pub fn path(&self, handle: IncludeHandle) -> Option<&Path> {
        self.buffers.get(&handle).map(|v| v.path.as_path())
    }

    /// Releases every open file buffer.
    ///
    /// returns: the number of buffers which were still open.
    pub fn release_all(&mut self) -> usize {
        let count = self.buffers.len();
        for (handle, buffer) in self.buffers.drain() {
            log::warn!(
                "include {} ({}) was never closed",
                handle,
                buffer.path.display()
            );
        }
        count
    }

    fn local_dir(&self, parent: Option<IncludeHandle>) -> &Path {
        parent
            .and_then(|h| self.buffers.get(&h))
            .and_then(|b| b.path.parent())
            .unwrap_or(self.root.as_path())
    }

    fn load(&mut self, path: PathBuf) -> Option<IncludeHandle> {
        if !path.is_file() {
            return None;
        }
        let data = match std::fs::read(&path) {
            Ok(v) => v,
            Err(e) => {
                log::debug!("failed to read include {}: {}", path.display(), e);
                return None;
            },
        };
        let handle = self.handles.next();
        log::trace!("opened include {} as {}", path.display(), handle);
        self.buffers.insert(handle, OpenBuffer { path, data });
        Some(handle)
    }
}

impl IncludeHandler for IncludeResolver {
    fn open(
        &mut self,
        kind: IncludeKind,
        filename: &str,
        parent: Option<IncludeHandle>,
    ) -> Option<IncludeHandle> {
        match kind {
            IncludeKind::System => {
                if let Some((index, _)) = builtin::find(filename) {
                    log::trace!("opened built-in include {}", filename);
                    return Some(IncludeHandle::builtin(index));
                }
                let path = self
                    .include_dirs
                    .iter()
                    .map(|dir| dir.join(filename))
                    .find(|path| path.is_file())?;
                self.load(path)
            },
            IncludeKind::Local => {
                let path = self.local_dir(parent).join(filename);
                self.load(path)
            },
        }
    }

    fn data(&self, handle: IncludeHandle) -> Option<&[u8]> {
        match handle.builtin_index() {
            Some(index) => builtin::get(index).map(str::as_bytes),
            None => self.buffers.get(&handle).map(|v| v.data.as_slice()),
        }
    }

    fn close(&mut self, handle: IncludeHandle) -> bool {
        if handle.builtin_index().is_some() {
            return true;
        }
        match self.buffers.remove(&handle) {
            Some(buffer) => {
                log::trace!("closed include {} ({})", handle, buffer.path.display());
                true
            },
            None => false,
        }
    }
}
