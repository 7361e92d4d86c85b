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

use std::path::PathBuf;

use clap::Parser;
use rgxe::{
    effect::{Effect, EffectOptions},
    reflect::DxbcReflector,
    saver::EffectSaver,
    toolchain::{IncludeExpander, PrecompiledCompiler, Toolchain},
};

/// Compiles an effect source into a binary effect.
#[derive(Parser)]
#[command(version, about = "Effect compiler")]
struct Args {
    /// Effect source file path
    input: PathBuf,

    /// Output effect file path
    #[arg(long, short)]
    output: PathBuf,

    /// Directory searched for system includes (repeatable)
    #[arg(long = "include", short = 'I')]
    include_dirs: Vec<PathBuf>,

    /// Directory containing the compiled programs (<entry point>.cso),
    /// defaults to the directory of the input
    #[arg(long)]
    bytecode_dir: Option<PathBuf>,

    /// Vertex format tag written in the effect header
    #[arg(long, default_value_t = 0)]
    vertex_format: u32,
}

fn run(args: Args) -> rgxe::Result<()> {
    let source = std::fs::read_to_string(&args.input)?;
    let bytecode_dir = args.bytecode_dir.unwrap_or_else(|| {
        args.input
            .parent()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."))
    });
    let toolchain = Toolchain::new(
        IncludeExpander::new(),
        PrecompiledCompiler::new(bytecode_dir),
        DxbcReflector::new(),
    );
    let mut options = EffectOptions::new();
    options.vertex_format(args.vertex_format);
    for dir in args.include_dirs {
        options.include_dir(dir);
    }
    let effect = Effect::new(source, &args.input, &options, &toolchain)?;
    log::info!(
        "compiled {} technique(s) from {}",
        effect.techniques().len(),
        args.input.display()
    );
    EffectSaver::new(&effect, toolchain.reflector()).save_to(&args.output)?;
    Ok(())
}

fn main() {
    env_logger::init();
    let args = Args::parse();
    if let Err(e) = run(args) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
