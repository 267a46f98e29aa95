use proptest::prelude::*;
use texprobe_formats::PaletteSize;
use texprobe_gen::{
    build_volume_quads, generate_gradient_layer, generate_palette, generate_palettized_volume,
    DEPTH_SLICES,
};

fn palette_size_strategy() -> impl Strategy<Value = PaletteSize> {
    prop_oneof![
        Just(PaletteSize::Palette32),
        Just(PaletteSize::Palette64),
        Just(PaletteSize::Palette128),
        Just(PaletteSize::Palette256),
    ]
}

fn gradient_case() -> impl Strategy<Value = (u32, u32, u32, u32, u32)> {
    (1u32..=96, 1u32..=96, 0u32..16).prop_flat_map(|(w, h, layer)| {
        (Just(w), Just(h), 0..w, 0..h, Just(layer))
    })
}

proptest! {
    #[test]
    fn gradient_texel_matches_formula((width, height, x, y, layer) in gradient_case()) {
        let surface = generate_gradient_layer(width, height, layer).unwrap();
        let xn = (u64::from(x) * 255 / u64::from(width)) as u8;
        let yn = (u64::from(y) * 255 / u64::from(height)) as u8;
        let (keep_r, keep_g, keep_b) = match layer % 4 {
            0 => (true, true, true),
            1 => (false, false, true),
            2 => (true, false, false),
            _ => (false, true, false),
        };
        let expected = [
            if keep_r { yn } else { 0 },
            if keep_g { xn } else { 0 },
            if keep_b { 255 - yn } else { 0 },
            xn.wrapping_add(yn),
        ];
        prop_assert_eq!(surface.rgba(x, y), Some(expected));
    }

    #[test]
    fn palettized_indices_stay_in_range(
        width in 1u32..=40,
        height in 1u32..=40,
        depth in 1u32..=6,
        palette_size in palette_size_strategy(),
    ) {
        let volume = generate_palettized_volume(width, height, depth, palette_size).unwrap();
        let layer_size = (width * height) as usize;
        prop_assert_eq!(volume.len(), layer_size * depth as usize);
        prop_assert!(volume.iter().all(|&b| u32::from(b) < palette_size.entries()));

        for (d, layer) in volume.chunks_exact(layer_size).enumerate() {
            let flat = ((d << 2) as u32 & palette_size.index_mask()) as u8;
            prop_assert!(layer[..layer_size / 2].iter().all(|&b| b == flat));

            for (offset, &b) in layer.iter().enumerate().skip(layer_size / 2) {
                let group_start = offset - (offset - layer_size / 2) % 4;
                let expected = ((group_start + (d << 2)) as u32 & palette_size.index_mask()) as u8;
                prop_assert_eq!(b, expected);
            }
        }
    }

    #[test]
    fn palette_shape(size in 0u32..=1024) {
        let palette = generate_palette(size);
        let block = (size / 4) as usize;
        prop_assert_eq!(palette.len(), 4 * block);
        prop_assert!(palette.iter().all(|&e| e >> 24 == 0xFF));
        for &entry in &palette[3 * block..] {
            let [_, r, g, b] = entry.to_be_bytes();
            prop_assert!(r == g && g == b);
        }
        prop_assert_eq!(palette, generate_palette(size));
    }
}

#[test]
fn geometry_depths_follow_construction_order() {
    let mut buffer = build_volume_quads();
    for (width, height) in [(1.0, 1.0), (64.0, 32.0), (512.0, 512.0)] {
        buffer.linearize(width, height);
        let depths: Vec<f32> = buffer
            .vertices()
            .chunks_exact(6)
            .map(|quad| quad[0].texcoord[2])
            .collect();
        assert_eq!(depths, DEPTH_SLICES.to_vec());
    }
}
