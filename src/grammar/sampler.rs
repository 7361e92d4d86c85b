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
    assignment::SamplerAssignment,
    grammar::{error::Error, scanner::Scanner},
};

/// Every type spelling that introduces a sampler declaration.
pub const SAMPLER_TYPES: &[&str] = &[
    "sampler",
    "sampler1D",
    "sampler2D",
    "sampler3D",
    "samplerCUBE",
    "SamplerState",
    "SamplerComparisonState",
];

/// A named sampler declaration with its sampler state assignments.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SamplerState {
    name: String,
    assignments: Vec<SamplerAssignment>,
}

impl SamplerState {
    /// Returns the declared name of the sampler.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the sampler state assignments, in source order.
    pub fn assignments(&self) -> &[SamplerAssignment] {
        &self.assignments
    }
}

// Matches zero or more `: register(x0)` clauses; false if a clause is malformed.
fn skip_registers(scanner: &mut Scanner) -> bool {
    loop {
        scanner.skip_trivia();
        if !scanner.eat(b':') {
            return true;
        }
        scanner.skip_trivia();
        if !scanner.keyword("register") {
            return false;
        }
        scanner.skip_trivia();
        if !scanner.eat(b'(') {
            return false;
        }
        scanner.skip_trivia();
        if scanner.ident().is_none() {
            return false;
        }
        scanner.skip_trivia();
        if !scanner.eat(b')') {
            return false;
        }
    }
}

fn parse_block(scanner: &mut Scanner) -> Result<Vec<SamplerAssignment>, Error> {
    let mut assignments = Vec::new();
    loop {
        scanner.skip_trivia();
        if scanner.eat(b'}') {
            return Ok(assignments);
        }
        let name = scanner.expect_ident("(assignment name) or '}'")?;
        scanner.expect(b'=', "after assignment name")?;
        scanner.skip_trivia();
        let value = scanner
            .value()
            .ok_or_else(|| scanner.error("expected integer or identifier"))?;
        scanner.expect(b';', "after assignment value")?;
        assignments.push(SamplerAssignment::resolve(name, value)?);
    }
}

/// Parses every sampler declaration of a preprocessed source text.
///
/// A declaration is a sampler type, a name, optional `: register(...)` clauses, an optional
/// brace block of sampler state assignments and a terminating `;`. Each declaration produces
/// exactly one [SamplerState], with no assignments when the block is absent. Incomplete
/// declarations (for example sampler parameters of a function) are ignored.
///
/// # Arguments
///
/// * `source`: the preprocessed source text.
///
/// returns: Result<Vec<SamplerState>, Error>
///
/// # Errors
///
/// An [Error](Error) is returned if a brace block is malformed, is not followed by `;` or
/// contains an assignment that is not a valid sampler state.
pub fn parse_sampler_states(source: &str) -> Result<Vec<SamplerState>, Error> {
    let mut scanner = Scanner::new(source);
    let mut samplers = Vec::new();
    while let Some((_, ident)) = scanner.next_ident() {
        if !SAMPLER_TYPES.contains(&ident) {
            continue;
        }
        let resume = scanner.pos();
        if !scanner.skip_trivia() {
            continue;
        }
        let name = match scanner.ident() {
            Some(v) if !SAMPLER_TYPES.contains(&v) => v,
            _ => {
                scanner.set_pos(resume);
                continue;
            },
        };
        if !skip_registers(&mut scanner) {
            scanner.set_pos(resume);
            continue;
        }
        let assignments = if scanner.eat(b'{') {
            let block = parse_block(&mut scanner)?;
            scanner.expect(b';', "after sampler state block")?;
            block
        } else if scanner.eat(b';') {
            Vec::new()
        } else {
            scanner.set_pos(resume);
            continue;
        };
        samplers.push(SamplerState {
            name: name.into(),
            assignments,
        });
    }
    Ok(samplers)
}
