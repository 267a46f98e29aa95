/// Builds an A8R8G8B8 lookup table of four equally sized bands.
///
/// With `block = size / 4` and `step = ceil(255 / block)`, entry `i` of each band uses
/// `value = 0xFF - i * step` (8-bit arithmetic, wrapping):
/// band 0 is blue, band 1 green, band 2 red, band 3 gray. Alpha is always `0xFF`.
///
/// The result holds `4 * block` entries, which is short of `size` when `size` is not a
/// multiple of four. For large blocks `i * step` can pass 255 before the last entry; the
/// value then wraps instead of clamping at zero.
pub fn generate_palette(size: u32) -> Vec<u32> {
    let block_size = size / 4;
    if block_size == 0 {
        return Vec::new();
    }
    let step = 255u32.div_ceil(block_size);

    let mut bands: [Vec<u32>; 4] = Default::default();
    for i in 0..block_size {
        let component = i.wrapping_mul(step);
        let value = u32::from(0xFFu8.wrapping_sub(component as u8));
        bands[0].push(0xFF00_0000 | value);
        bands[1].push(0xFF00_0000 | (value << 8));
        bands[2].push(0xFF00_0000 | (value << 16));
        bands[3].push(0xFF00_0000 | (value << 16) | (value << 8) | value);
    }

    bands.concat()
}
