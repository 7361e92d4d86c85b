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

use std::collections::HashMap;

use once_cell::sync::Lazy;

/// Header files served to system includes without touching the file system.
static BUILTINS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    let mut map = HashMap::new();
    map.insert("global_buffers.fxh", include_str!("global_buffers.fxh"));
    map
});

/// Looks up a built-in header by file name.
///
/// # Arguments
///
/// * `name`: the file name as written in the `#include` directive.
///
/// returns: Option<(usize, &'static str)>, the index of the header and its content.
pub fn find(name: &str) -> Option<(usize, &'static str)> {
    let (key, content) = BUILTINS.get_key_value(name)?;
    let index = names().iter().position(|v| v == key)?;
    Some((index, content))
}

/// Returns the content of the built-in header at the given index.
pub fn get(index: usize) -> Option<&'static str> {
    names().get(index).and_then(|v| BUILTINS.get(v)).copied()
}

/// Returns the names of all built-in headers, in a stable order.
pub fn names() -> &'static [&'static str] {
    static NAMES: Lazy<Vec<&'static str>> = Lazy::new(|| {
        let mut names: Vec<&'static str> = BUILTINS.keys().copied().collect();
        names.sort_unstable();
        names
    });
    &NAMES
}
