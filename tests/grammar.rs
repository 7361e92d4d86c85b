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

use rgxe::{
    assignment::{SemanticError, StateKind},
    grammar::{parse_sampler_states, parse_shared_variables, parse_techniques, Error},
    program::ProgramType,
};

const EFFECT: &str = r#"
#line 1 "effect.fx"
#include <global_buffers.fxh>

shared float4 gSunColor;
shared const float gTime : register(c10);
shared row_major float4x4 gShadowMatrix;
groupshared float cache[64];

Texture2D DiffuseTexture;
sampler2D DiffuseSampler : register(s0)
{
    AddressU = WRAP;
    AddressV = CLAMP; // clamp vertically
    Filter = MIN_MAG_MIP_LINEAR;
};
SamplerState PointSampler : register(s1);

float4 Sample(sampler2D s, float2 uv) { return tex2D(s, uv); }

/* technique Disabled { pass { VertexShader = Nope; } } */
// technique AlsoDisabled { }

technique Draw
{
    pass P0
    {
        VertexShader = VS_Main;
        PixelShader = PS_Main;
        FillMode = SOLID;
        CullMode = BACK;
        StencilReadMask = 0xF0;
        StencilWriteMask = 15;
    }

    pass
    {
        VertexShader = VS_Main;
        PixelShader = NULL;
        BlendEnable0 = TRUE;
        SrcBlend0 = SRC_ALPHA;
        DestBlend0 = INV_SRC_ALPHA;
    }
}

technique Shadow { pass { VertexShader = VS_Shadow; } }
"#;

#[test]
fn techniques_and_passes() {
    let techniques = parse_techniques(EFFECT).unwrap();
    assert_eq!(techniques.len(), 2);
    assert_eq!(techniques[0].name(), "Draw");
    assert_eq!(techniques[1].name(), "Shadow");

    let passes = techniques[0].passes();
    assert_eq!(passes.len(), 2);
    assert_eq!(passes[0].program(ProgramType::Vertex), Some("VS_Main"));
    assert_eq!(passes[0].program(ProgramType::Fragment), Some("PS_Main"));
    assert_eq!(passes[0].program(ProgramType::Geometry), None);
    assert_eq!(passes[0].program_name(ProgramType::Hull), "NULL");
    let assignments: Vec<(StateKind, u32)> = passes[0]
        .assignments()
        .iter()
        .map(|a| (a.kind, a.value))
        .collect();
    assert_eq!(
        assignments,
        vec![
            (StateKind::FillMode, 3),
            (StateKind::CullMode, 3),
            (StateKind::StencilReadMask, 0xF0),
            (StateKind::StencilWriteMask, 15),
        ]
    );

    assert_eq!(passes[1].program(ProgramType::Fragment), None);
    assert_eq!(passes[1].assignments().len(), 3);
    assert_eq!(passes[1].assignments()[1].kind, StateKind::SrcBlend0);
    assert_eq!(passes[1].assignments()[1].value, 5);
}

#[test]
fn samplers_with_and_without_blocks() {
    let samplers = parse_sampler_states(EFFECT).unwrap();
    assert_eq!(samplers.len(), 2);
    assert_eq!(samplers[0].name(), "DiffuseSampler");
    let codes: Vec<(u32, u32)> = samplers[0]
        .assignments()
        .iter()
        .map(|a| (a.relative_code(), a.value))
        .collect();
    assert_eq!(codes, vec![(0, 1), (1, 3), (3, 0x15)]);
    assert_eq!(samplers[1].name(), "PointSampler");
    assert!(samplers[1].assignments().is_empty());
}

#[test]
fn shared_variables() {
    let shared = parse_shared_variables(EFFECT);
    assert_eq!(shared, vec!["gSunColor", "gTime", "gShadowMatrix"]);
}

#[test]
fn shared_cbuffer_is_collected_by_buffer_name() {
    let shared = parse_shared_variables("shared cbuffer rage_matrices : register(b0) { };");
    assert_eq!(shared, vec!["rage_matrices"]);
}

#[test]
fn unknown_assignment_is_semantic_error() {
    let err = parse_techniques("technique T { pass { UnknownState = 5; } }").unwrap_err();
    match err {
        Error::Semantic(e) => {
            assert_eq!(e, SemanticError::UnknownName("UnknownState".into()));
            assert_eq!(e.token(), "UnknownState");
        },
        e => panic!("unexpected error: {}", e),
    }
}

#[test]
fn unknown_value_is_semantic_error() {
    let err = parse_techniques("technique T { pass { CullMode = SIDEWAYS; } }").unwrap_err();
    assert!(matches!(
        err,
        Error::Semantic(SemanticError::UnknownValue { ref value, .. }) if value == "SIDEWAYS"
    ));
}

#[test]
fn sampler_state_in_pass_is_rejected() {
    let err = parse_techniques("technique T { pass { AddressU = WRAP; } }").unwrap_err();
    assert!(matches!(
        err,
        Error::Semantic(SemanticError::WrongContext { .. })
    ));
}

#[test]
fn pass_state_in_sampler_is_rejected() {
    let err = parse_sampler_states("sampler S { FillMode = SOLID; };").unwrap_err();
    assert!(matches!(
        err,
        Error::Semantic(SemanticError::WrongContext { .. })
    ));
}

#[test]
fn missing_semicolon_reports_line_and_column() {
    let src = "float4 x;\ntechnique T {\n  pass {\n    FillMode = SOLID\n  }\n}\n";
    let err = parse_techniques(src).unwrap_err();
    let err = match err {
        Error::Parse(e) => e,
        e => panic!("unexpected error: {}", e),
    };
    assert_eq!(err.line, 5);
    assert_eq!(err.line_text, "  }");
    assert_eq!(err.column, 2);
    let text = err.to_string();
    assert!(text.ends_with("  }\n  ^"), "{}", text);
}

#[test]
fn unbalanced_technique_is_parse_error() {
    let err = parse_techniques("technique T { pass { FillMode = SOLID; }").unwrap_err();
    assert!(matches!(err, Error::Parse(_)));
}

#[test]
fn duplicate_technique_is_parse_error() {
    let src = "technique T { } technique T { }";
    let err = parse_techniques(src).unwrap_err();
    match err {
        Error::Parse(e) => assert_eq!(e.column, 26),
        e => panic!("unexpected error: {}", e),
    }
}

#[test]
fn incomplete_declarations_are_ignored() {
    let src = "float technique; void f(SamplerState s) {} int shared;";
    assert!(parse_techniques(src).unwrap().is_empty());
    assert!(parse_sampler_states(src).unwrap().is_empty());
    assert!(parse_shared_variables(src).is_empty());
}

#[test]
fn keywords_match_whole_identifiers() {
    let src = "sampler2DArray notASampler; mytechnique T { pass { } }";
    assert!(parse_sampler_states(src).unwrap().is_empty());
    assert!(parse_techniques(src).unwrap().is_empty());
}

#[test]
fn empty_source() {
    assert!(parse_techniques("").unwrap().is_empty());
    assert!(parse_sampler_states("").unwrap().is_empty());
    assert!(parse_shared_variables("").is_empty());
}
