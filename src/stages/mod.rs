//! Pipeline stages.
//!
//! Each stage reads completed buffers from earlier stages, allocates its own
//! output and fills it row by row through a [`StageExecutor`](crate::executor::StageExecutor).
//! Stages whose output feeds a stencil refresh the halo before returning.
//!
//! # Stages, in pipeline order
//!
//! - [`decode`] - RGBA bytes to normalized float RGB
//! - [`upscale`] - bilinear enlargement to the target size
//! - [`luminance`] - `(2R + 3G + B) / 6` brightness map
//! - [`thin`] - luminance-driven line thinning
//! - [`gradient`] - inverted Sobel edge magnitude
//! - [`refine`] - gradient-driven push toward edge neighbors
//! - [`encode`] - float RGB back to opaque RGBA bytes
//!
//! [`patterns`] holds the eight directional tests shared by `thin` and `refine`.

pub mod decode;
pub mod encode;
pub mod gradient;
pub mod luminance;
pub mod patterns;
pub mod refine;
pub mod thin;
pub mod upscale;

pub use decode::decode;
pub use encode::encode;
pub use gradient::gradient;
pub use luminance::luminance;
pub use refine::refine;
pub use thin::thin_lines;
pub use upscale::upscale;
