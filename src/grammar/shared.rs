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

use crate::grammar::scanner::Scanner;

const MODIFIERS: &[&str] = &["const", "row_major", "column_major"];

/// Collects the names of every `shared` declaration of a preprocessed source text.
///
/// Recognizes `shared [const|row_major|column_major] <type> <name>`. Since `cbuffer` parses as
/// a type, shared constant buffers are collected under their buffer name. Duplicate names are
/// reported once, in order of first declaration.
///
/// # Arguments
///
/// * `source`: the preprocessed source text.
///
/// returns: Vec<String>
pub fn parse_shared_variables(source: &str) -> Vec<String> {
    let mut scanner = Scanner::new(source);
    let mut names: Vec<String> = Vec::new();
    while let Some((_, ident)) = scanner.next_ident() {
        if ident != "shared" {
            continue;
        }
        let resume = scanner.pos();
        if !scanner.skip_trivia() {
            continue;
        }
        let mut ty = scanner.ident();
        while ty.map(|v| MODIFIERS.contains(&v)).unwrap_or(false) {
            scanner.skip_trivia();
            ty = scanner.ident();
        }
        scanner.skip_trivia();
        let name = match ty.and_then(|_| scanner.ident()) {
            Some(v) => v,
            None => {
                scanner.set_pos(resume);
                continue;
            },
        };
        if !names.iter().any(|v| v == name) {
            names.push(name.into());
        }
    }
    names
}
