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

use std::{collections::HashSet, path::Path};

use crate::toolchain::{IncludeHandle, IncludeHandler, IncludeKind, Preprocessor};

/// The maximum nesting of include directives.
pub const MAX_INCLUDE_DEPTH: usize = 32;

/// A [Preprocessor] which only expands `#include` directives.
///
/// Included text is spliced in place of the directive, surrounded by `#line` markers so that
/// later diagnostics still point at the right file. Files containing `#pragma once` are
/// identified by their include name and expanded at most once. Every other directive is
/// left untouched and no macro expansion is performed.
#[derive(Copy, Clone, Debug, Default)]
pub struct IncludeExpander;

impl IncludeExpander {
    /// Creates a new include expander.
    pub fn new() -> IncludeExpander {
        IncludeExpander
    }
}

enum Directive<'a> {
    Include(IncludeKind, &'a str),
    PragmaOnce,
    Other,
}

fn parse_directive(line: &str) -> Option<Directive> {
    let rest = line.trim_start().strip_prefix('#')?.trim_start();
    if let Some(args) = rest.strip_prefix("include") {
        let args = args.trim();
        let directive = if let Some(name) = args.strip_prefix('"') {
            name.find('"')
                .map(|end| Directive::Include(IncludeKind::Local, &name[..end]))
        } else if let Some(name) = args.strip_prefix('<') {
            name.find('>')
                .map(|end| Directive::Include(IncludeKind::System, &name[..end]))
        } else {
            None
        };
        return Some(directive.unwrap_or(Directive::Other));
    }
    if let Some(args) = rest.strip_prefix("pragma") {
        if args.trim() == "once" {
            return Some(Directive::PragmaOnce);
        }
    }
    Some(Directive::Other)
}

struct Expansion<'a> {
    includes: &'a mut dyn IncludeHandler,
    once: HashSet<String>,
    output: String,
}

impl<'a> Expansion<'a> {
    fn expand(
        &mut self,
        text: &str,
        name: &str,
        parent: Option<IncludeHandle>,
        depth: usize,
    ) -> Result<(), String> {
        for (index, line) in text.lines().enumerate() {
            match parse_directive(line) {
                Some(Directive::Include(kind, file)) => {
                    if self.once.contains(file) {
                        self.output.push('\n');
                        continue;
                    }
                    if depth >= MAX_INCLUDE_DEPTH {
                        return Err(format!(
                            "{}({}): include nesting deeper than {} levels",
                            name,
                            index + 1,
                            MAX_INCLUDE_DEPTH
                        ));
                    }
                    let handle = self.includes.open(kind, file, parent).ok_or_else(|| {
                        format!(
                            "{}({}): cannot open {} include file '{}'",
                            name,
                            index + 1,
                            kind,
                            file
                        )
                    })?;
                    let data = self
                        .includes
                        .data(handle)
                        .map(|v| String::from_utf8_lossy(v).into_owned())
                        .unwrap_or_default();
                    self.output.push_str(&format!("#line 1 \"{}\"\n", file));
                    let res = self.expand(&data, file, Some(handle), depth + 1);
                    if !self.includes.close(handle) {
                        log::warn!("include {} ({}) could not be closed", handle, file);
                    }
                    res?;
                    self.output
                        .push_str(&format!("#line {} \"{}\"\n", index + 2, name));
                },
                Some(Directive::PragmaOnce) => {
                    self.once.insert(name.into());
                    self.output.push('\n');
                },
                Some(Directive::Other) | None => {
                    self.output.push_str(line);
                    self.output.push('\n');
                },
            }
        }
        Ok(())
    }
}

impl Preprocessor for IncludeExpander {
    fn preprocess(
        &self,
        source: &str,
        source_path: &Path,
        includes: &mut dyn IncludeHandler,
    ) -> Result<String, String> {
        let mut expansion = Expansion {
            includes,
            once: HashSet::new(),
            output: String::with_capacity(source.len()),
        };
        let name = source_path.display().to_string();
        expansion.expand(source, &name, None, 0)?;
        Ok(expansion.output)
    }
}
