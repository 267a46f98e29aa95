use texprobe_formats::PaletteSize;
use tracing::debug;

use crate::error::{try_alloc, Result};

/// Builds an 8-bit index volume of `depth` layers, each `width * height` bytes.
///
/// Per layer `d`:
/// - the first `layer_size / 2` bytes hold the single index `(d << 2) & mask`;
/// - the rest is written in groups of four identical bytes, the group starting at layer
///   offset `i` holding `(i + (d << 2)) & mask`.
///
/// A trailing group that does not fit in the layer is truncated, so every layer is exactly
/// `width * height` bytes.
pub fn generate_palettized_volume(
    width: u32,
    height: u32,
    depth: u32,
    palette_size: PaletteSize,
) -> Result<Vec<u8>> {
    let layer_size = u128::from(width) * u128::from(height);
    let mut volume: Vec<u8> = try_alloc("palettized volume", layer_size * u128::from(depth))?;
    if layer_size == 0 {
        return Ok(volume);
    }

    let mask = palette_size.index_mask() as usize;
    // try_alloc succeeded, so a single layer fits in usize.
    let layer_size = layer_size as usize;
    let half_size = layer_size / 2;

    for (d, layer) in volume.chunks_exact_mut(layer_size).enumerate() {
        let layer_bias = d << 2;
        let (flat, grouped) = layer.split_at_mut(half_size);
        flat.fill((layer_bias & mask) as u8);

        for (group, bytes) in grouped.chunks_mut(4).enumerate() {
            let offset = half_size + group * 4;
            bytes.fill((offset.wrapping_add(layer_bias) & mask) as u8);
        }
    }

    debug!(
        width,
        height,
        depth,
        palette_entries = palette_size.entries(),
        bytes = volume.len(),
        "generated palettized volume"
    );
    Ok(volume)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn layer_two_of_8x8_volume() {
        let volume = generate_palettized_volume(8, 8, 4, PaletteSize::Palette256).unwrap();
        assert_eq!(volume.len(), 256);

        let layer = &volume[128..192];
        assert!(layer[..32].iter().all(|&b| b == 8));

        let expected: Vec<u8> = (32..64usize)
            .map(|i| {
                let group_start = i - (i - 32) % 4;
                ((group_start + 8) & 0xFF) as u8
            })
            .collect();
        assert_eq!(&layer[32..], expected.as_slice());
        assert_eq!(&layer[32..40], &[40, 40, 40, 40, 44, 44, 44, 44]);
    }

    #[test]
    fn trailing_partial_group_is_truncated() {
        // 3x3 layer: 4 flat bytes, then groups at offsets 4 and 8 (the latter 1 byte long).
        let volume = generate_palettized_volume(3, 3, 2, PaletteSize::Palette32).unwrap();
        assert_eq!(volume.len(), 18);
        assert_eq!(&volume[..9], &[0, 0, 0, 0, 4, 4, 4, 4, 8]);
        assert_eq!(&volume[9..], &[4, 4, 4, 4, 8, 8, 8, 8, 12]);
    }

    #[test]
    fn indices_wrap_to_palette_range() {
        let volume = generate_palettized_volume(16, 16, 4, PaletteSize::Palette32).unwrap();
        assert!(volume.iter().all(|&b| u32::from(b) < 32));
        // Layer 3 flat index: 12 & 31.
        assert!(volume[3 * 256..3 * 256 + 128].iter().all(|&b| b == 12));
        // Layer 0 offset 252: (252 + 0) & 31 = 28.
        assert_eq!(volume[252], 28);
    }

    #[test]
    fn empty_dimensions_produce_empty_volume() {
        assert!(generate_palettized_volume(0, 4, 4, PaletteSize::Palette64)
            .unwrap()
            .is_empty());
        assert!(generate_palettized_volume(4, 4, 0, PaletteSize::Palette64)
            .unwrap()
            .is_empty());
    }
}
