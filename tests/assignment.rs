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

use rgxe::assignment::{
    values::ValueSet, Assignment, Context, PassAssignment, SamplerAssignment, SemanticError,
    StateKind, SAMPLER_STATE_BASE,
};

#[test]
fn pass_kinds_are_numbered_in_declaration_order() {
    let pass_kinds: Vec<&StateKind> =
        StateKind::ALL.iter().filter(|k| !k.is_sampler_state()).collect();
    assert_eq!(pass_kinds.len(), 25);
    for (i, kind) in pass_kinds.iter().enumerate() {
        assert_eq!(kind.code(), i as u32, "{}", kind);
    }
    assert_eq!(StateKind::FillMode.code(), 0);
    assert_eq!(StateKind::RenderTargetWriteMask0.code(), 24);
}

#[test]
fn sampler_kinds_start_at_base() {
    assert_eq!(StateKind::AddressU.code(), SAMPLER_STATE_BASE);
    assert_eq!(StateKind::AddressW.code(), SAMPLER_STATE_BASE + 2);
    assert!(StateKind::ComparisonFunc.is_sampler_state());
    assert!(!StateKind::BlendOpAlpha0.is_sampler_state());
}

#[test]
fn names_round_trip() {
    for kind in StateKind::ALL {
        assert_eq!(StateKind::from_name(kind.name()), Some(*kind));
    }
    assert_eq!(StateKind::from_name("fillmode"), None);
}

#[test]
fn named_values() {
    let a = Assignment::resolve("FillMode", "SOLID").unwrap();
    assert_eq!(a.kind, StateKind::FillMode);
    assert_eq!(a.value, 3);
    assert_eq!(Assignment::resolve("DepthFunc", "LESS_EQUAL").unwrap().value, 4);
    assert_eq!(Assignment::resolve("BlendOp0", "REV_SUBTRACT").unwrap().value, 3);
    assert_eq!(Assignment::resolve("DestBlend0", "BLEND_FACTOR").unwrap().value, 14);
    assert_eq!(StateKind::CullMode.values().name_of(1), Some("NONE"));
}

#[test]
fn named_values_are_case_sensitive() {
    let err = Assignment::resolve("FillMode", "solid").unwrap_err();
    assert_eq!(
        err,
        SemanticError::UnknownValue {
            name: "FillMode".into(),
            value: "solid".into()
        }
    );
    assert_eq!(err.to_string(), "unknown value 'solid' for type 'FillMode'");
}

#[test]
fn numeric_values() {
    assert_eq!(StateKind::StencilReadMask.values(), ValueSet::Any);
    assert_eq!(Assignment::resolve("StencilReadMask", "255").unwrap().value, 255);
    assert_eq!(Assignment::resolve("StencilWriteMask", "0x0f").unwrap().value, 15);
    assert_eq!(
        Assignment::resolve("RenderTargetWriteMask0", "0xFFFFFFFF").unwrap().value,
        u32::MAX
    );
    assert_eq!(
        Assignment::resolve("StencilReadMask", "ALL").unwrap_err(),
        SemanticError::InvalidNumber {
            name: "StencilReadMask".into(),
            value: "ALL".into()
        }
    );
    assert!(Assignment::resolve("StencilReadMask", "4294967296").is_err());
}

#[test]
fn unknown_name() {
    let err = Assignment::resolve("UnknownState", "5").unwrap_err();
    assert_eq!(err.token(), "UnknownState");
    assert_eq!(err.to_string(), "unknown assignment type 'UnknownState'");
}

#[test]
fn contexts_are_disjoint() {
    let err = PassAssignment::resolve("AddressU", "WRAP").unwrap_err();
    assert_eq!(
        err,
        SemanticError::WrongContext {
            name: "AddressU".into(),
            context: Context::TechniquePass
        }
    );
    assert_eq!(err.to_string(), "invalid technique pass assignment type 'AddressU'");
    assert!(SamplerAssignment::resolve("FillMode", "SOLID").is_err());

    let pass = PassAssignment::resolve("FillMode", "WIREFRAME").unwrap();
    assert_eq!(pass.value, 2);
    let sampler = SamplerAssignment::resolve("AddressV", "MIRROR").unwrap();
    assert_eq!(sampler.relative_code(), 1);
    assert_eq!(sampler.value, 2);
}

#[test]
fn every_pass_kind_resolves_in_pass_context() {
    for kind in StateKind::ALL.iter().filter(|k| !k.is_sampler_state()) {
        let value = match kind.values() {
            ValueSet::Any => "1",
            ValueSet::Named(table) => table[0].0,
        };
        assert!(PassAssignment::resolve(kind.name(), value).is_ok(), "{}", kind);
        assert!(SamplerAssignment::resolve(kind.name(), value).is_err(), "{}", kind);
    }
}
