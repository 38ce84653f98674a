//! inkmark browser host
//!
//! Binds an [`inkmark_render::Annotator`] to an HTML canvas and exposes it to
//! JavaScript. Everything except the CSS color helper and callback delivery is
//! compiled for `wasm32` only.

pub mod callback;
mod css;

pub use css::css_color;

#[cfg(target_arch = "wasm32")]
mod canvas;
#[cfg(target_arch = "wasm32")]
mod web;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;
#[cfg(target_arch = "wasm32")]
pub use web::{WebAnnotator, WindowPrompt, start};
