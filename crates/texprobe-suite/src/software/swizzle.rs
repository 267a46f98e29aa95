//! NV2A swizzled (Morton order) texture addressing.
//!
//! Bits of the x, y and z coordinates are interleaved starting from the least significant
//! bit, in x, y, z order, for as long as each dimension still has bits left. All dimensions
//! must be powers of two.

/// Precomputed bit masks for one texture size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Swizzler {
    mask_x: u32,
    mask_y: u32,
    mask_z: u32,
}

impl Swizzler {
    /// Returns `None` unless every dimension is a non-zero power of two.
    pub fn new(width: u32, height: u32, depth: u32) -> Option<Self> {
        if ![width, height, depth].iter().all(|d| d.is_power_of_two()) {
            return None;
        }

        let (mut mask_x, mut mask_y, mut mask_z) = (0u32, 0u32, 0u32);
        let mut out_bit = 1u32;
        let mut coord_bit = 1u32;
        loop {
            let mut assigned = false;
            if coord_bit < width {
                mask_x |= out_bit;
                out_bit <<= 1;
                assigned = true;
            }
            if coord_bit < height {
                mask_y |= out_bit;
                out_bit <<= 1;
                assigned = true;
            }
            if coord_bit < depth {
                mask_z |= out_bit;
                out_bit <<= 1;
                assigned = true;
            }
            if !assigned {
                break;
            }
            coord_bit <<= 1;
        }

        Some(Self {
            mask_x,
            mask_y,
            mask_z,
        })
    }

    /// Element offset of `(x, y, z)` in swizzled storage.
    #[inline]
    pub fn offset(&self, x: u32, y: u32, z: u32) -> usize {
        (deposit(self.mask_x, x) | deposit(self.mask_y, y) | deposit(self.mask_z, z)) as usize
    }
}

/// Scatters the low bits of `value` into the set bits of `pattern`.
fn deposit(pattern: u32, mut value: u32) -> u32 {
    let mut result = 0;
    let mut bit = 1u32;
    while value != 0 && bit != 0 {
        if pattern & bit != 0 {
            if value & 1 != 0 {
                result |= bit;
            }
            value >>= 1;
        }
        bit = bit.wrapping_shl(1);
    }
    result
}

/// Rearranges a densely packed `width * height * depth` box into swizzled order.
pub fn swizzle_box<T: Copy + Default>(
    swizzler: &Swizzler,
    src: &[T],
    width: u32,
    height: u32,
    depth: u32,
) -> Vec<T> {
    let mut out = vec![T::default(); src.len()];
    let mut texels = src.iter();
    for z in 0..depth {
        for y in 0..height {
            for x in 0..width {
                if let Some(&texel) = texels.next() {
                    out[swizzler.offset(x, y, z)] = texel;
                }
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn masks_interleave_xyz() {
        let s = Swizzler::new(4, 4, 4).unwrap();
        assert_eq!(
            (s.mask_x, s.mask_y, s.mask_z),
            (0b001_001, 0b010_010, 0b100_100)
        );
        assert_eq!(s.offset(1, 0, 0), 1);
        assert_eq!(s.offset(0, 1, 0), 2);
        assert_eq!(s.offset(0, 0, 1), 4);
        assert_eq!(s.offset(3, 3, 3), 63);
    }

    #[test]
    fn narrow_dimension_stops_contributing() {
        // Width 8, height 2, depth 1: y takes only bit 1, x fills the rest.
        let s = Swizzler::new(8, 2, 1).unwrap();
        assert_eq!((s.mask_x, s.mask_y, s.mask_z), (0b1101, 0b0010, 0));
        assert_eq!(s.offset(2, 0, 0), 4);
        assert_eq!(s.offset(7, 1, 0), 15);
    }

    #[test]
    fn non_power_of_two_is_rejected() {
        assert!(Swizzler::new(6, 4, 4).is_none());
        assert!(Swizzler::new(4, 0, 4).is_none());
    }

    #[test]
    fn swizzle_box_is_a_permutation() {
        let s = Swizzler::new(4, 2, 2).unwrap();
        let src: Vec<u32> = (0..16).collect();
        let out = swizzle_box(&s, &src, 4, 2, 2);
        let mut sorted = out.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, src);
        for z in 0..2 {
            for y in 0..2 {
                for x in 0..4 {
                    let linear = (z * 8 + y * 4 + x) as u32;
                    assert_eq!(out[s.offset(x, y, z)], linear);
                }
            }
        }
    }
}
