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

//! The assignment vocabulary: every recognized render state and sampler state name, the
//! values it accepts and their numeric encoding.
//!
//! Technique pass assignments and sampler state assignments are kept apart at the type
//! level: a [PassAssignment] can only be built from a technique pass state kind and a
//! [SamplerAssignment] only from a sampler state kind.

mod error;
pub mod values;

use std::ops::Deref;

pub use error::{Context, SemanticError};

use crate::macros::state_kinds;

/// The first numeric code of the sampler state kinds.
///
/// Sampler states are stored in compiled effects relative to this base.
pub const SAMPLER_STATE_BASE: u32 = 0x40;

state_kinds!(
    /// Enum of all assignment state kinds.
    StateKind {
        /// Rasterizer fill mode.
        FillMode = 0 => "FillMode" : values::FILL_MODE,
        /// Rasterizer cull mode.
        CullMode = 1 => "CullMode" : values::CULL_MODE,
        /// Depth test enable.
        DepthEnable = 2 => "DepthEnable" : values::BOOL,
        /// Depth write mask.
        DepthWriteMask = 3 => "DepthWriteMask" : values::DEPTH_WRITE_MASK,
        /// Depth comparison function.
        DepthFunc = 4 => "DepthFunc" : values::COMPARISON_FUNC,
        /// Stencil test enable.
        StencilEnable = 5 => "StencilEnable" : values::BOOL,
        /// Stencil read mask.
        StencilReadMask = 6 => "StencilReadMask" : values::ANY,
        /// Stencil write mask.
        StencilWriteMask = 7 => "StencilWriteMask" : values::ANY,
        FrontFaceStencilFail = 8 => "FrontFaceStencilFail" : values::STENCIL_OP,
        FrontFaceStencilDepthFail = 9 => "FrontFaceStencilDepthFail" : values::STENCIL_OP,
        FrontFaceStencilPass = 10 => "FrontFaceStencilPass" : values::STENCIL_OP,
        FrontFaceStencilFunc = 11 => "FrontFaceStencilFunc" : values::COMPARISON_FUNC,
        BackFaceStencilFail = 12 => "BackFaceStencilFail" : values::STENCIL_OP,
        BackFaceStencilDepthFail = 13 => "BackFaceStencilDepthFail" : values::STENCIL_OP,
        BackFaceStencilPass = 14 => "BackFaceStencilPass" : values::STENCIL_OP,
        BackFaceStencilFunc = 15 => "BackFaceStencilFunc" : values::COMPARISON_FUNC,
        /// Alpha to coverage enable.
        AlphaToCoverageEnable = 16 => "AlphaToCoverageEnable" : values::BOOL,
        /// Blend enable for render target 0.
        BlendEnable0 = 17 => "BlendEnable0" : values::BOOL,
        SrcBlend0 = 18 => "SrcBlend0" : values::BLEND,
        DestBlend0 = 19 => "DestBlend0" : values::BLEND,
        BlendOp0 = 20 => "BlendOp0" : values::BLEND_OP,
        SrcBlendAlpha0 = 21 => "SrcBlendAlpha0" : values::BLEND,
        DestBlendAlpha0 = 22 => "DestBlendAlpha0" : values::BLEND,
        BlendOpAlpha0 = 23 => "BlendOpAlpha0" : values::BLEND_OP,
        /// Color write mask for render target 0.
        RenderTargetWriteMask0 = 24 => "RenderTargetWriteMask0" : values::ANY,
        /// Texture addressing mode for the U coordinate.
        AddressU = SAMPLER_STATE_BASE => "AddressU" : values::TEXTURE_ADDRESS_MODE,
        /// Texture addressing mode for the V coordinate.
        AddressV = SAMPLER_STATE_BASE + 1 => "AddressV" : values::TEXTURE_ADDRESS_MODE,
        /// Texture addressing mode for the W coordinate.
        AddressW = SAMPLER_STATE_BASE + 2 => "AddressW" : values::TEXTURE_ADDRESS_MODE,
        /// Texture filtering mode.
        Filter = SAMPLER_STATE_BASE + 3 => "Filter" : values::FILTER,
        /// Maximum anisotropy for anisotropic filtering.
        MaxAnisotropy = SAMPLER_STATE_BASE + 4 => "MaxAnisotropy" : values::ANY,
        /// Comparison function of comparison samplers.
        ComparisonFunc = SAMPLER_STATE_BASE + 5 => "ComparisonFunc" : values::COMPARISON_FUNC,
    }
);

impl StateKind {
    /// Returns true if this kind may only appear inside sampler state blocks.
    pub fn is_sampler_state(&self) -> bool {
        self.code() >= SAMPLER_STATE_BASE
    }
}

/// A resolved assignment: a state kind and its encoded value.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Assignment {
    /// The state kind.
    pub kind: StateKind,

    /// The encoded value.
    pub value: u32,
}

impl Assignment {
    /// Resolves an assignment without any context restriction.
    ///
    /// Named value kinds require `value` to be one of their names (case-sensitive); numeric
    /// kinds accept decimal integers or hexadecimal integers prefixed with `0x`.
    ///
    /// # Arguments
    ///
    /// * `name`: the assignment name.
    /// * `value`: the value token.
    ///
    /// returns: Result<Assignment, SemanticError>
    ///
    /// # Errors
    ///
    /// Returns a [SemanticError](SemanticError) if the name is unknown, the value is not a
    /// legal name for this kind or the number does not parse.
    ///
    /// # Examples
    ///
    /// ```
    /// use rgxe::assignment::{Assignment, StateKind};
    ///
    /// let a = Assignment::resolve("StencilReadMask", "0xFF").unwrap();
    /// assert_eq!(a.kind, StateKind::StencilReadMask);
    /// assert_eq!(a.value, 255);
    /// assert!(Assignment::resolve("CullMode", "none").is_err());
    /// ```
    pub fn resolve(name: &str, value: &str) -> Result<Assignment, SemanticError> {
        let kind =
            StateKind::from_name(name).ok_or_else(|| SemanticError::UnknownName(name.into()))?;
        let value = match kind.values() {
            values::ValueSet::Any => parse_integer(value).ok_or_else(|| {
                SemanticError::InvalidNumber {
                    name: name.into(),
                    value: value.into(),
                }
            })?,
            set => set
                .lookup(value)
                .ok_or_else(|| SemanticError::UnknownValue {
                    name: name.into(),
                    value: value.into(),
                })?,
        };
        Ok(Assignment { kind, value })
    }
}

fn parse_integer(value: &str) -> Option<u32> {
    match value.strip_prefix("0x") {
        Some(hex) => u32::from_str_radix(hex, 16).ok(),
        None => value.parse().ok(),
    }
}

/// An assignment allowed inside a technique pass.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct PassAssignment(Assignment);

impl PassAssignment {
    /// Resolves a technique pass assignment.
    ///
    /// # Arguments
    ///
    /// * `name`: the assignment name.
    /// * `value`: the value token.
    ///
    /// returns: Result<PassAssignment, SemanticError>
    ///
    /// # Errors
    ///
    /// Same as [Assignment::resolve](Assignment::resolve), plus
    /// [WrongContext](SemanticError::WrongContext) for sampler state kinds.
    pub fn resolve(name: &str, value: &str) -> Result<PassAssignment, SemanticError> {
        let a = Assignment::resolve(name, value)?;
        if a.kind.is_sampler_state() {
            return Err(SemanticError::WrongContext {
                name: name.into(),
                context: Context::TechniquePass,
            });
        }
        Ok(PassAssignment(a))
    }
}

impl Deref for PassAssignment {
    type Target = Assignment;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// An assignment allowed inside a sampler state block.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct SamplerAssignment(Assignment);

impl SamplerAssignment {
    /// Resolves a sampler state assignment.
    ///
    /// # Arguments
    ///
    /// * `name`: the assignment name.
    /// * `value`: the value token.
    ///
    /// returns: Result<SamplerAssignment, SemanticError>
    ///
    /// # Errors
    ///
    /// Same as [Assignment::resolve](Assignment::resolve), plus
    /// [WrongContext](SemanticError::WrongContext) for technique pass state kinds.
    pub fn resolve(name: &str, value: &str) -> Result<SamplerAssignment, SemanticError> {
        let a = Assignment::resolve(name, value)?;
        if !a.kind.is_sampler_state() {
            return Err(SemanticError::WrongContext {
                name: name.into(),
                context: Context::SamplerState,
            });
        }
        Ok(SamplerAssignment(a))
    }

    /// Returns the state kind code relative to [SAMPLER_STATE_BASE].
    pub fn relative_code(&self) -> u32 {
        self.0.kind.code() - SAMPLER_STATE_BASE
    }
}

impl Deref for SamplerAssignment {
    type Target = Assignment;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
