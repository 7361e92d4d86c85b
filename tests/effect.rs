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

mod common;

use common::{MockCompiler, MockReflector};
use rgxe::{
    assignment::StateKind,
    effect::{Effect, EffectOptions},
    error::Error,
    program::ProgramType,
};

const SOURCE: &str = r#"
shared float4 gSunColor;

technique Opaque
{
    pass { VertexShader = VS_Basic; PixelShader = PS_Lit; }
    pass { VertexShader = VS_Skinned; PixelShader = PS_Lit; CullMode = NONE; }
}

technique Transparent
{
    pass { VertexShader = VS_Basic; PixelShader = PS_Alpha; GeometryShader = GS_Expand; }
}
"#;

fn build(source: &str, compiler: MockCompiler) -> Result<Effect, Error> {
    let toolchain = common::toolchain(compiler, MockReflector::default());
    Effect::new(source, "shaders/test.fx", &EffectOptions::new(), &toolchain)
}

#[test]
fn single_vertex_pass() {
    let src = "technique T { pass { VertexShader = VS; FillMode = SOLID; } }";
    let effect = build(src, MockCompiler::default()).unwrap();
    assert_eq!(effect.used_programs(ProgramType::Vertex), ["VS"]);
    let pass = &effect.techniques()[0].passes()[0];
    assert_eq!(
        effect.program_indices_for_pass(pass).unwrap(),
        [1, 0, 0, 0, 0, 0]
    );
    assert_eq!(pass.assignments().len(), 1);
    assert_eq!(pass.assignments()[0].kind, StateKind::FillMode);
    assert_eq!(pass.assignments()[0].value, 3);
    assert_eq!(&**effect.program_code("VS").unwrap(), b"code:VS");
}

#[test]
fn used_programs_are_sorted_and_unique() {
    let effect = build(SOURCE, MockCompiler::default()).unwrap();
    assert_eq!(
        effect.used_programs(ProgramType::Vertex),
        ["VS_Basic", "VS_Skinned"]
    );
    assert_eq!(
        effect.used_programs(ProgramType::Fragment),
        ["PS_Alpha", "PS_Lit"]
    );
    assert_eq!(effect.used_programs(ProgramType::Geometry), ["GS_Expand"]);
    assert!(effect.used_programs(ProgramType::Compute).is_empty());
    assert!(effect.used_programs(ProgramType::Hull).is_empty());
}

#[test]
fn program_indices_start_at_one() {
    let effect = build(SOURCE, MockCompiler::default()).unwrap();
    let opaque = &effect.techniques()[0];
    let transparent = &effect.techniques()[1];
    assert_eq!(
        effect.program_indices_for_pass(&opaque.passes()[0]).unwrap(),
        [1, 2, 0, 0, 0, 0]
    );
    assert_eq!(
        effect.program_indices_for_pass(&opaque.passes()[1]).unwrap(),
        [2, 2, 0, 0, 0, 0]
    );
    assert_eq!(
        effect.program_indices_for_pass(&transparent.passes()[0]).unwrap(),
        [1, 1, 0, 0, 1, 0]
    );
}

#[test]
fn programs_compile_in_type_order() {
    let compiler = MockCompiler::default();
    let calls = compiler.calls.clone();
    build(SOURCE, compiler).unwrap();
    let calls = calls.borrow();
    assert_eq!(
        *calls,
        vec![
            ("VS_Basic".to_string(), "vs_4_0"),
            ("VS_Skinned".to_string(), "vs_4_0"),
            ("PS_Alpha".to_string(), "ps_4_0"),
            ("PS_Lit".to_string(), "ps_4_0"),
            ("GS_Expand".to_string(), "gs_5_0"),
        ]
    );
}

const MULTI_STAGE: &str = "technique T { pass { VertexShader = Main; PixelShader = Main; } }";

#[test]
fn entry_point_compiles_for_every_type() {
    let compiler = MockCompiler::default();
    let calls = compiler.calls.clone();
    let effect = build(MULTI_STAGE, compiler).unwrap();
    assert_eq!(
        *calls.borrow(),
        vec![
            ("Main".to_string(), "vs_4_0"),
            ("Main".to_string(), "ps_4_0"),
        ]
    );
    assert_eq!(&**effect.program_code("Main").unwrap(), b"code:Main");
    let pass = &effect.techniques()[0].passes()[0];
    assert_eq!(
        effect.program_indices_for_pass(pass).unwrap(),
        [1, 1, 0, 0, 0, 0]
    );
}

#[test]
fn entry_point_failing_for_second_type() {
    let compiler = MockCompiler {
        failing: Some("Main"),
        failing_profile: Some("ps_4_0"),
        ..Default::default()
    };
    let calls = compiler.calls.clone();
    match build(MULTI_STAGE, compiler) {
        Err(Error::Compile { entry_point, .. }) => assert_eq!(entry_point, "Main"),
        Err(e) => panic!("unexpected error: {}", e),
        Ok(_) => panic!("compilation should fail"),
    }
    assert_eq!(calls.borrow().len(), 2);
}

#[test]
fn compile_failure_carries_entry_point() {
    let compiler = MockCompiler {
        failing: Some("PS_Alpha"),
        ..Default::default()
    };
    match build(SOURCE, compiler) {
        Err(Error::Compile {
            entry_point,
            message,
        }) => {
            assert_eq!(entry_point, "PS_Alpha");
            assert!(message.contains("X3000"));
        },
        Err(e) => panic!("unexpected error: {}", e),
        Ok(_) => panic!("compilation should fail"),
    }
}

#[test]
fn unreferenced_entry_point_is_not_found() {
    let effect = build(SOURCE, MockCompiler::default()).unwrap();
    assert!(matches!(
        effect.program_code("PS_Unused"),
        Err(Error::EntryPointNotFound(_))
    ));
    assert!(effect.program_code("NULL").is_err());
}

#[test]
fn too_many_programs_overflow() {
    let mut src = String::from("technique T {");
    for i in 0..255 {
        src.push_str(&format!(" pass {{ PixelShader = PS_{:03}; }}", i));
    }
    src.push('}');
    match build(&src, MockCompiler::default()) {
        Err(Error::ProgramIndexOverflow(ty)) => assert_eq!(ty, ProgramType::Fragment),
        Err(e) => panic!("unexpected error: {}", e),
        Ok(_) => panic!("255 programs should overflow"),
    }
}

#[test]
fn max_programs_fit() {
    let mut src = String::from("technique T {");
    for i in 0..254 {
        src.push_str(&format!(" pass {{ PixelShader = PS_{:03}; }}", i));
    }
    src.push('}');
    let effect = build(&src, MockCompiler::default()).unwrap();
    let last = effect.techniques()[0].passes().last().unwrap();
    assert_eq!(effect.program_indices_for_pass(last).unwrap()[1], 254);
}

#[test]
fn accessors() {
    let effect = build(SOURCE, MockCompiler::default()).unwrap();
    assert_eq!(effect.source(), SOURCE);
    assert_eq!(effect.source_path().to_str(), Some("shaders/test.fx"));
    assert_eq!(effect.shared_variables(), ["gSunColor"]);
    assert!(effect.is_shared("gSunColor"));
    assert!(!effect.is_shared("gsuncolor"));
    assert!(effect.sampler_state("Missing").is_none());
    assert_eq!(effect.vertex_format(), 0);
}

#[test]
fn grammar_errors_propagate() {
    let err = build("technique T { pass { Bogus = 1; } }", MockCompiler::default()).unwrap_err();
    assert!(matches!(err, Error::Semantic(_)));
    let err = build("technique T { pass { FillMode SOLID; } }", MockCompiler::default())
        .unwrap_err();
    assert!(matches!(err, Error::Parse(_)));
}
