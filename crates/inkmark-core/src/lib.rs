//! inkmark core library
//!
//! Platform-agnostic annotation model for inkmark: the element types,
//! the pointer-gesture state machine, the eraser and the JSON document format.
//! Nothing in this crate draws; rendering lives in `inkmark-render`.

pub mod background;
pub mod color;
pub mod config;
pub mod document;
pub mod elements;
pub mod eraser;
pub mod session;
pub mod tools;

pub use background::{Background, LoadTicket};
pub use color::Rgba8;
pub use config::{AnnotatorConfig, ConfigError};
pub use document::{DocumentError, ImageRequest, SerializedDocument};
pub use elements::{Element, ElementKind, ElementStyle, Font, Freedraw, Rectangle, Text, TextMetrics};
pub use eraser::{EraseOutcome, Eraser, DEFAULT_ERASER_RADIUS};
pub use session::Session;
pub use tools::{DrawingMode, GestureController, GestureState, Redraw, TextPrompt};
