// SPDX-FileCopyrightText: 2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Syntax layer: unfolding, lexing, content-line scanning, tree assembly.
//!
//! ```text
//! bytes -> LineStream -> logical lines -> lexer -> scanner -> ContentLine
//!       -> Assembler -> Component tree
//! ```

pub mod lexer;
pub mod scanner;
pub(crate) mod tree;
pub mod unfold;

pub use self::scanner::{ContentLine, encode_rfc6868};
pub use self::unfold::{LineEvent, LineStream, LogicalLine, StreamError};
