//! inkmark render library
//!
//! The drawing-surface capability, the full/incremental render pipeline and
//! the [`Annotator`] that ties pointer input, the core session and a surface
//! together.

mod annotator;
pub mod image_source;
mod pipeline;
mod recording;
mod surface;

pub use annotator::Annotator;
pub use image_source::{DataUrl, ImageSourceError};
pub use pipeline::RenderPipeline;
pub use recording::{DrawCommand, RecordingSurface};
pub use surface::{Surface, SurfaceError};
