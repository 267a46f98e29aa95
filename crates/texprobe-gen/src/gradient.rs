use bitflags::bitflags;
use tracing::debug;

use crate::error::Result;
use crate::surface::{pack_rgba8888, Surface};

bitflags! {
    /// Color channels that keep their gradient value in a volume layer.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ChannelMask: u8 {
        const RED = 1 << 0;
        const GREEN = 1 << 1;
        const BLUE = 1 << 2;
    }
}

impl ChannelMask {
    #[inline]
    fn byte_mask(self, channel: ChannelMask) -> u8 {
        if self.contains(channel) {
            0xFF
        } else {
            0
        }
    }
}

/// Channel selection for a layer, repeating every four layers:
/// full gradient, blue only, red only, green only.
pub fn layer_channel_mask(layer: u32) -> ChannelMask {
    match layer % 4 {
        0 => ChannelMask::all(),
        1 => ChannelMask::BLUE,
        2 => ChannelMask::RED,
        _ => ChannelMask::GREEN,
    }
}

/// Builds one layer of the gradient volume.
///
/// For texel `(x, y)` with `xn = x * 255 / width` and `yn = y * 255 / height` (truncating
/// integer division):
/// - red = `yn`, green = `xn`, blue = `255 - yn`, each zeroed when masked out by
///   [`layer_channel_mask`];
/// - alpha = `(xn + yn) mod 256`, never masked.
pub fn generate_gradient_layer(width: u32, height: u32, layer: u32) -> Result<Surface> {
    let mut surface = Surface::new(width, height)?;
    let mask = layer_channel_mask(layer);
    let red_mask = mask.byte_mask(ChannelMask::RED);
    let green_mask = mask.byte_mask(ChannelMask::GREEN);
    let blue_mask = mask.byte_mask(ChannelMask::BLUE);

    {
        let mut lock = surface.lock()?;
        for (y, row) in lock.rows_mut().enumerate() {
            let y_normal = normalize(y as u64, height);
            for (x, texel) in row.iter_mut().enumerate() {
                let x_normal = normalize(x as u64, width);
                *texel = pack_rgba8888(
                    y_normal & red_mask,
                    x_normal & green_mask,
                    (255 - y_normal) & blue_mask,
                    x_normal.wrapping_add(y_normal),
                );
            }
        }
    }

    debug!(width, height, layer, channels = ?mask, "generated gradient layer");
    Ok(surface)
}

/// Generates layers `0..depth` in sampling order.
pub fn generate_gradient_volume(width: u32, height: u32, depth: u32) -> Result<Vec<Surface>> {
    (0..depth)
        .map(|layer| generate_gradient_layer(width, height, layer))
        .collect()
}

#[inline]
fn normalize(coord: u64, extent: u32) -> u8 {
    // coord < extent, so the quotient is at most 254.
    (coord * 255 / u64::from(extent)) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::unpack_rgba8888;

    #[test]
    fn masks_cycle_every_four_layers() {
        assert_eq!(layer_channel_mask(0), ChannelMask::all());
        assert_eq!(layer_channel_mask(1), ChannelMask::BLUE);
        assert_eq!(layer_channel_mask(2), ChannelMask::RED);
        assert_eq!(layer_channel_mask(3), ChannelMask::GREEN);
        assert_eq!(layer_channel_mask(6), ChannelMask::RED);
    }

    #[test]
    fn blue_only_layer_4x4() {
        let surface = generate_gradient_layer(4, 4, 1).unwrap();
        for y in 0..4u32 {
            let yn = (y * 255 / 4) as u8;
            for x in 0..4u32 {
                let xn = (x * 255 / 4) as u8;
                let [r, g, b, a] = surface.rgba(x, y).unwrap();
                assert_eq!((r, g), (0, 0));
                assert_eq!(b, 255 - yn);
                assert_eq!(a, xn.wrapping_add(yn));
            }
        }
    }

    #[test]
    fn full_layer_corner_values() {
        let surface = generate_gradient_layer(256, 256, 0).unwrap();
        assert_eq!(surface.rgba(0, 0), Some([0, 0, 255, 0]));
        // xn = yn = 254, alpha wraps: 508 mod 256 = 252.
        assert_eq!(surface.rgba(255, 255), Some([254, 254, 1, 252]));
        assert_eq!(unpack_rgba8888(surface.pixels()[1]), [0, 0, 255, 0]);
        // 2 * 255 / 256 = 1.99 truncates to 1.
        assert_eq!(surface.rgba(2, 0), Some([0, 1, 255, 1]));
    }

    #[test]
    fn volume_has_one_surface_per_layer() {
        let volume = generate_gradient_volume(8, 2, 4).unwrap();
        assert_eq!(volume.len(), 4);
        assert!(volume.iter().all(|s| s.width() == 8 && s.height() == 2));
        // Red-only layer: green and blue are zero everywhere.
        assert!(volume[2]
            .pixels()
            .iter()
            .all(|&p| p & 0x00FF_FF00 == 0));
    }
}
