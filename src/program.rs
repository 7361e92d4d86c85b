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

//! Shader program types (pipeline stages) and their compilation targets.

use std::fmt::{Display, Formatter};

/// The name used in technique passes to leave a program slot empty.
///
/// Every program table starts with an implicit program carrying this name, which is why
/// real programs are indexed from 1.
pub const NULL_PROGRAM_NAME: &str = "NULL";

/// The number of program types.
pub const PROGRAM_TYPE_COUNT: usize = 6;

/// Enum of all program types, in the order they are stored in compiled effects.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash, Ord, PartialOrd)]
pub enum ProgramType {
    /// Vertex shader stage.
    Vertex,

    /// Pixel/fragment shader stage.
    Fragment,

    /// Compute shader stage.
    Compute,

    /// Domain/Tessellation Evaluation Shader (TES) stage.
    Domain,

    /// Geometry shader stage.
    Geometry,

    /// Hull/Tessellation Control Shader (TCS) stage.
    Hull,
}

/// A shader model target profile, such as `vs_4_0`.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Target {
    /// The profile string handed to the compiler.
    pub profile: &'static str,

    /// The shader model major version.
    pub major: u8,

    /// The shader model minor version.
    pub minor: u8,
}

impl ProgramType {
    /// Every program type, in serialization order.
    pub const ALL: [ProgramType; PROGRAM_TYPE_COUNT] = [
        ProgramType::Vertex,
        ProgramType::Fragment,
        ProgramType::Compute,
        ProgramType::Domain,
        ProgramType::Geometry,
        ProgramType::Hull,
    ];

    /// Returns the position of this program type in [ALL](ProgramType::ALL).
    pub fn index(&self) -> usize {
        match self {
            ProgramType::Vertex => 0,
            ProgramType::Fragment => 1,
            ProgramType::Compute => 2,
            ProgramType::Domain => 3,
            ProgramType::Geometry => 4,
            ProgramType::Hull => 5,
        }
    }

    /// Returns the name of the technique pass assignment which binds a program of this type.
    pub fn assignment_name(&self) -> &'static str {
        match self {
            ProgramType::Vertex => "VertexShader",
            ProgramType::Fragment => "PixelShader",
            ProgramType::Compute => "ComputeShader",
            ProgramType::Domain => "DomainShader",
            ProgramType::Geometry => "GeometryShader",
            ProgramType::Hull => "HullShader",
        }
    }

    /// Finds the program type bound by a technique pass assignment name.
    ///
    /// # Arguments
    ///
    /// * `name`: the assignment name, for example `PixelShader`.
    ///
    /// returns: Option<ProgramType>
    pub fn from_assignment_name(name: &str) -> Option<ProgramType> {
        Self::ALL
            .iter()
            .copied()
            .find(|ty| ty.assignment_name() == name)
    }

    /// Returns the compilation target of this program type.
    pub fn target(&self) -> Target {
        let (profile, major, minor) = match self {
            ProgramType::Vertex => ("vs_4_0", 4, 0),
            ProgramType::Fragment => ("ps_4_0", 4, 0),
            ProgramType::Compute => ("cs_5_0", 5, 0),
            ProgramType::Domain => ("ds_5_0", 5, 0),
            ProgramType::Geometry => ("gs_5_0", 5, 0),
            ProgramType::Hull => ("hs_5_0", 5, 0),
        };
        Target {
            profile,
            major,
            minor,
        }
    }

    /// Returns a short human readable name.
    pub fn name(&self) -> &'static str {
        match self {
            ProgramType::Vertex => "vertex",
            ProgramType::Fragment => "fragment",
            ProgramType::Compute => "compute",
            ProgramType::Domain => "domain",
            ProgramType::Geometry => "geometry",
            ProgramType::Hull => "hull",
        }
    }
}

impl Display for ProgramType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
