//! # Render State Stacks
//!
//! Typed front-ends over [`StructStack`](crate::memory::StructStack) for the
//! two kinds of nested state a renderer tracks per frame.

mod matrix;
mod rect;

pub use matrix::MatrixStack;
pub use rect::{RectAccessor, RectStack};
