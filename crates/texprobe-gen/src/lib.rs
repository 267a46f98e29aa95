//! Deterministic texture data for the volume and palettized texture suites.
//!
//! Everything here is a pure function of its arguments so that the rendered output of two
//! hosts can be compared bit for bit:
//! - gradient volume layers ([`generate_gradient_layer`]),
//! - palettized index volumes ([`generate_palettized_volume`]),
//! - the matching color lookup table ([`generate_palette`]),
//! - the four-quad geometry that samples every depth slice ([`build_volume_quads`]).

mod error;
mod geometry;
mod gradient;
mod palette;
mod palettized;
mod surface;

pub use error::{GenError, Result};
pub use geometry::{build_volume_quads, GeometryBuffer, QuadRect, Vertex, DEPTH_SLICES};
pub use gradient::{
    generate_gradient_layer, generate_gradient_volume, layer_channel_mask, ChannelMask,
};
pub use palette::generate_palette;
pub use palettized::generate_palettized_volume;
pub use surface::{pack_rgba8888, unpack_rgba8888, Surface, SurfaceLock};

/// Number of layers in every generated volume.
pub const TEXTURE_DEPTH: u32 = 4;
