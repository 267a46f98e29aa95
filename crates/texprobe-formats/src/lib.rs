//! NV2A texture color encodings exercised by the texprobe suites.
//!
//! The catalog mirrors the `NV097_SET_TEXTURE_FORMAT_COLOR_*` values accepted by the
//! Kelvin (`NV097`) graphics class. It is a closed, read-only table: consumers borrow
//! `&'static FormatDescriptor` entries and never construct their own.

mod catalog;

pub use catalog::{format_by_encoding, palettized_format, TEXTURE_FORMATS};

/// Encoding ids (`NV097_SET_TEXTURE_FORMAT_COLOR`) referenced outside the catalog.
pub mod encoding {
    pub const SZ_Y8: u32 = 0x00;
    pub const SZ_AY8: u32 = 0x01;
    pub const SZ_A1R5G5B5: u32 = 0x02;
    pub const SZ_X1R5G5B5: u32 = 0x03;
    pub const SZ_A4R4G4B4: u32 = 0x04;
    pub const SZ_R5G6B5: u32 = 0x05;
    pub const SZ_A8R8G8B8: u32 = 0x06;
    pub const SZ_X8R8G8B8: u32 = 0x07;
    pub const SZ_I8_A8R8G8B8: u32 = 0x0B;
    pub const LU_IMAGE_A1R5G5B5: u32 = 0x10;
    pub const LU_IMAGE_R5G6B5: u32 = 0x11;
    pub const LU_IMAGE_A8R8G8B8: u32 = 0x12;
    pub const LU_IMAGE_Y8: u32 = 0x13;
    pub const SZ_A8: u32 = 0x19;
    pub const SZ_A8Y8: u32 = 0x1A;
    pub const LU_IMAGE_AY8: u32 = 0x1B;
    pub const LU_IMAGE_X1R5G5B5: u32 = 0x1C;
    pub const LU_IMAGE_A4R4G4B4: u32 = 0x1D;
    pub const LU_IMAGE_X8R8G8B8: u32 = 0x1E;
    pub const LU_IMAGE_A8: u32 = 0x1F;
    pub const LU_IMAGE_A8Y8: u32 = 0x20;
    pub const SZ_R6G5B5: u32 = 0x27;
    pub const SZ_G8B8: u32 = 0x28;
    pub const SZ_R8B8: u32 = 0x29;
    pub const LU_IMAGE_R6G5B5: u32 = 0x37;
    pub const LU_IMAGE_G8B8: u32 = 0x38;
    pub const SZ_A8B8G8R8: u32 = 0x3A;
    pub const SZ_B8G8R8A8: u32 = 0x3B;
    pub const SZ_R8G8B8A8: u32 = 0x3C;
    pub const LU_IMAGE_A8B8G8R8: u32 = 0x3F;
    pub const LU_IMAGE_B8G8R8A8: u32 = 0x40;
    pub const LU_IMAGE_R8G8B8A8: u32 = 0x41;
}

/// A hardware texture color encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FormatDescriptor {
    /// Short catalog name, e.g. `SZ_A8R8G8B8`. Also used as the test and artifact name.
    pub name: &'static str,
    /// Value programmed into `NV097_SET_TEXTURE_FORMAT_COLOR`.
    pub encoding_id: u32,
    /// Whether the encoding uses the swizzled (tiled) layout. Only swizzled textures can
    /// be sampled as volumes; the hardware has no linear 3-D layout.
    pub is_tiled_volume_capable: bool,
    /// Whether the host has to convert the generated RGBA texels before upload.
    pub requires_conversion: bool,
}

impl FormatDescriptor {
    /// True for the 8-bit index + A8R8G8B8 palette encoding.
    pub fn is_palettized(&self) -> bool {
        self.encoding_id == encoding::SZ_I8_A8R8G8B8
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("unsupported palette size {0} (expected 32, 64, 128 or 256)")]
pub struct UnsupportedPaletteSize(pub u32);

/// Palette lengths supported by `NV097_SET_TEXTURE_PALETTE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum PaletteSize {
    Palette32,
    Palette64,
    Palette128,
    #[default]
    Palette256,
}

impl PaletteSize {
    pub const ALL: [PaletteSize; 4] = [
        PaletteSize::Palette32,
        PaletteSize::Palette64,
        PaletteSize::Palette128,
        PaletteSize::Palette256,
    ];

    /// Number of palette entries.
    pub const fn entries(self) -> u32 {
        match self {
            PaletteSize::Palette32 => 32,
            PaletteSize::Palette64 => 64,
            PaletteSize::Palette128 => 128,
            PaletteSize::Palette256 => 256,
        }
    }

    /// Mask that folds an arbitrary value into the valid index range.
    #[inline]
    pub const fn index_mask(self) -> u32 {
        self.entries() - 1
    }
}

impl TryFrom<u32> for PaletteSize {
    type Error = UnsupportedPaletteSize;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        PaletteSize::ALL
            .into_iter()
            .find(|size| size.entries() == value)
            .ok_or(UnsupportedPaletteSize(value))
    }
}

impl std::fmt::Display for PaletteSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.entries())
    }
}
