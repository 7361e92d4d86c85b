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

use crate::{
    assignment::PassAssignment,
    grammar::{error::Error, scanner::Scanner},
    program::{ProgramType, NULL_PROGRAM_NAME, PROGRAM_TYPE_COUNT},
};

/// A binding of up to one program per shader stage plus a set of render state assignments.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Pass {
    programs: [Option<String>; PROGRAM_TYPE_COUNT],
    assignments: Vec<PassAssignment>,
}

impl Pass {
    /// Returns the entry point bound to a shader stage, None if the stage is NULL.
    pub fn program(&self, ty: ProgramType) -> Option<&str> {
        self.programs[ty.index()].as_deref()
    }

    /// Returns the entry point bound to a shader stage or the NULL program name.
    pub fn program_name(&self, ty: ProgramType) -> &str {
        self.program(ty).unwrap_or(NULL_PROGRAM_NAME)
    }

    /// Returns the render state assignments of this pass, in source order.
    pub fn assignments(&self) -> &[PassAssignment] {
        &self.assignments
    }
}

/// A named, ordered sequence of passes.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Technique {
    name: String,
    passes: Vec<Pass>,
}

impl Technique {
    /// Returns the name of this technique.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the passes of this technique.
    pub fn passes(&self) -> &[Pass] {
        &self.passes
    }
}

fn parse_pass(scanner: &mut Scanner) -> Result<Pass, Error> {
    let mut pass = Pass::default();
    loop {
        scanner.skip_trivia();
        if scanner.eat(b'}') {
            return Ok(pass);
        }
        let name = scanner.expect_ident("(assignment name) or '}'")?;
        scanner.expect(b'=', "after assignment name")?;
        scanner.skip_trivia();
        let value = scanner
            .value()
            .ok_or_else(|| scanner.error("expected integer or identifier"))?;
        scanner.expect(b';', "after assignment value")?;
        match ProgramType::from_assignment_name(name) {
            Some(ty) if value == NULL_PROGRAM_NAME => pass.programs[ty.index()] = None,
            Some(ty) => pass.programs[ty.index()] = Some(value.into()),
            None => pass.assignments.push(PassAssignment::resolve(name, value)?),
        }
    }
}

fn parse_technique(scanner: &mut Scanner, name: &str) -> Result<Technique, Error> {
    let mut passes = Vec::new();
    loop {
        scanner.skip_trivia();
        if scanner.eat(b'}') {
            return Ok(Technique {
                name: name.into(),
                passes,
            });
        }
        if !scanner.keyword("pass") {
            return Err(scanner.error("expected 'pass' or '}'").into());
        }
        scanner.skip_trivia();
        // Pass names are accepted but not stored.
        scanner.ident();
        scanner.expect(b'{', "after 'pass'")?;
        passes.push(parse_pass(scanner)?);
    }
}

/// Parses every `technique` block of a preprocessed source text.
///
/// A `technique` keyword that is not followed by a name and an opening brace is ignored;
/// once the opening brace is consumed, any mismatch is an error.
///
/// # Arguments
///
/// * `source`: the preprocessed source text.
///
/// returns: Result<Vec<Technique>, Error>
///
/// # Errors
///
/// An [Error](Error) is returned on structural mismatch, duplicate technique names or
/// unresolvable assignments.
pub fn parse_techniques(source: &str) -> Result<Vec<Technique>, Error> {
    let mut scanner = Scanner::new(source);
    let mut techniques: Vec<Technique> = Vec::new();
    while let Some((_, ident)) = scanner.next_ident() {
        if ident != "technique" {
            continue;
        }
        let resume = scanner.pos();
        if !scanner.skip_trivia() {
            continue;
        }
        let name_pos = scanner.pos();
        let name = match scanner.ident() {
            Some(v) => v,
            None => {
                scanner.set_pos(resume);
                continue;
            },
        };
        scanner.skip_trivia();
        if !scanner.eat(b'{') {
            scanner.set_pos(resume);
            continue;
        }
        if techniques.iter().any(|t| t.name == name) {
            scanner.set_pos(name_pos);
            return Err(scanner
                .error(format!("duplicate technique '{}'", name))
                .into());
        }
        techniques.push(parse_technique(&mut scanner, name)?);
    }
    Ok(techniques)
}
