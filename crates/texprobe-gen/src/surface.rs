use crate::error::{try_alloc, GenError, Result};

/// Packs 8-bit channels into an RGBA8888 word (`R` in the most significant byte).
#[inline]
pub const fn pack_rgba8888(r: u8, g: u8, b: u8, a: u8) -> u32 {
    ((r as u32) << 24) | ((g as u32) << 16) | ((b as u32) << 8) | a as u32
}

/// Inverse of [`pack_rgba8888`], returning `[r, g, b, a]`.
#[inline]
pub const fn unpack_rgba8888(texel: u32) -> [u8; 4] {
    [
        (texel >> 24) as u8,
        (texel >> 16) as u8,
        (texel >> 8) as u8,
        texel as u8,
    ]
}

/// A 2-D pixel container with 32-bit RGBA8888 texels stored row-major, no row padding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Surface {
    width: u32,
    height: u32,
    pixels: Vec<u32>,
}

impl Surface {
    /// Allocates a zeroed `width` x `height` surface.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        let pixels = try_alloc("surface", u128::from(width) * u128::from(height))?;
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Adopts an externally produced texel buffer.
    ///
    /// The length is not checked here; [`Surface::lock`] refuses storage that does not cover
    /// the declared dimensions.
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<u32>) -> Self {
        Self {
            width,
            height,
            pixels,
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Bytes per row.
    #[inline]
    pub fn pitch(&self) -> usize {
        self.width as usize * std::mem::size_of::<u32>()
    }

    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    /// Texel storage as native-endian bytes, suitable for a host upload.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Returns `[r, g, b, a]` at `(x, y)`, or `None` outside the surface.
    pub fn rgba(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = y as usize * self.width as usize + x as usize;
        self.pixels.get(idx).copied().map(unpack_rgba8888)
    }

    /// Grants write access to the texels.
    pub fn lock(&mut self) -> Result<SurfaceLock<'_>> {
        let expected = self.width as usize * self.height as usize;
        if self.pixels.len() < expected {
            return Err(GenError::SurfaceAcquisition {
                width: self.width,
                height: self.height,
                texels: self.pixels.len(),
            });
        }
        Ok(SurfaceLock {
            width: self.width as usize,
            pixels: &mut self.pixels[..expected],
        })
    }
}

/// Exclusive write access to a [`Surface`]'s texels, obtained from [`Surface::lock`].
pub struct SurfaceLock<'a> {
    width: usize,
    pixels: &'a mut [u32],
}

impl SurfaceLock<'_> {
    /// Iterates rows top to bottom.
    pub fn rows_mut(&mut self) -> impl Iterator<Item = &mut [u32]> + '_ {
        // A zero-width surface has no texels; `chunks_exact_mut(0)` would panic.
        self.pixels.chunks_exact_mut(self.width.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pack_places_red_in_high_byte() {
        assert_eq!(pack_rgba8888(0x11, 0x22, 0x33, 0x44), 0x1122_3344);
        assert_eq!(unpack_rgba8888(0x1122_3344), [0x11, 0x22, 0x33, 0x44]);
    }

    #[test]
    fn lock_rejects_short_backing_store() {
        let mut surface = Surface::from_pixels(4, 4, vec![0; 15]);
        assert_eq!(
            surface.lock().err(),
            Some(GenError::SurfaceAcquisition {
                width: 4,
                height: 4,
                texels: 15
            })
        );
    }

    #[test]
    fn rows_cover_whole_surface() {
        let mut surface = Surface::new(3, 2).unwrap();
        {
            let mut lock = surface.lock().unwrap();
            for (y, row) in lock.rows_mut().enumerate() {
                row.fill(y as u32 + 1);
            }
        }
        assert_eq!(surface.pixels(), &[1, 1, 1, 2, 2, 2]);
        assert_eq!(surface.pitch(), 12);
        assert_eq!(surface.as_bytes().len(), 24);
        assert_eq!(surface.rgba(3, 0), None);
    }

    #[test]
    fn empty_surface_locks() {
        let mut surface = Surface::new(0, 0).unwrap();
        let mut lock = surface.lock().unwrap();
        assert_eq!(lock.rows_mut().count(), 0);
    }
}
