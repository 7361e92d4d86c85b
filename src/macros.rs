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

//! Utility generation macros for error types and the assignment vocabulary.

#[macro_export]
/// Automatically implements conversion from the given set of error types.
macro_rules! impl_err_conversion {
    ($self: ident { $($foreign: ty => $variant: ident),* }) => {
        $(
            impl From<$foreign> for $self {
                fn from(e: $foreign) -> Self {
                    $self::$variant(e)
                }
            }
        )*
    };
}

#[macro_export]
/// Generates a fieldless enum where each variant is assigned a &'static str name.
///
/// The generated enum implements [Display](std::fmt::Display) through the variant name.
macro_rules! named_enum {
    (
        $(#[$enum_outer:meta])* $name: ident { $($(#[$outer:meta])* $variant: ident : $namestr: expr),* }
    ) => {
        $(#[$enum_outer])*
        #[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
        pub enum $name {
            $(
                $(#[$outer])*
                $variant
            ),*
        }

        impl $name {
            /// Returns the string corresponding to the current enum variant.
            pub fn name(&self) -> &'static str {
                match self {
                    $(Self::$variant => $namestr),*
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.name())
            }
        }
    };
}

#[macro_export]
/// Generates a closed set of state kinds with a numeric code, a source spelling and the
/// named value table each kind accepts.
///
/// The generated enum exposes `ALL`, `code()`, `name()`, `values()` and `from_name()`.
macro_rules! state_kinds {
    (
        $(#[$enum_outer:meta])* $name: ident {
            $($(#[$outer:meta])* $variant: ident = $code: expr => $namestr: literal : $values: expr),* $(,)?
        }
    ) => {
        $(#[$enum_outer])*
        #[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
        pub enum $name {
            $(
                $(#[$outer])*
                $variant
            ),*
        }

        impl $name {
            /// Every kind, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),*];

            /// Returns the numeric code written in compiled effects.
            pub fn code(&self) -> u32 {
                match self {
                    $(Self::$variant => $code),*
                }
            }

            /// Returns the spelling used in effect sources.
            pub fn name(&self) -> &'static str {
                match self {
                    $(Self::$variant => $namestr),*
                }
            }

            /// Returns the values this kind accepts.
            pub fn values(&self) -> $crate::assignment::values::ValueSet {
                match self {
                    $(Self::$variant => $values),*
                }
            }

            /// Looks up a kind from its source spelling (case-sensitive).
            pub fn from_name(name: &str) -> Option<$name> {
                match name {
                    $($namestr => Some(Self::$variant),)*
                    _ => None
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.name())
            }
        }
    };
}

pub use impl_err_conversion;
pub use named_enum;
pub use state_kinds;
