use crate::encoding::*;
use crate::FormatDescriptor;

macro_rules! texture_formats {
    ($($name:ident => swizzled: $swizzled:literal, convert: $convert:literal,)+) => {
        /// Every color encoding known to the suites, swizzled encodings first, then their linear
        /// counterparts.
        pub static TEXTURE_FORMATS: &[FormatDescriptor] = &[
            $(FormatDescriptor {
                name: stringify!($name),
                encoding_id: $name,
                is_tiled_volume_capable: $swizzled,
                requires_conversion: $convert,
            },)+
        ];
    };
}

texture_formats! {
    SZ_A8B8G8R8 => swizzled: true, convert: false,
    SZ_B8G8R8A8 => swizzled: true, convert: false,
    SZ_R8G8B8A8 => swizzled: true, convert: false,
    SZ_A8R8G8B8 => swizzled: true, convert: false,
    SZ_X8R8G8B8 => swizzled: true, convert: false,
    SZ_Y8 => swizzled: true, convert: true,
    SZ_AY8 => swizzled: true, convert: true,
    SZ_A8 => swizzled: true, convert: true,
    SZ_A8Y8 => swizzled: true, convert: true,
    SZ_R5G6B5 => swizzled: true, convert: false,
    SZ_R6G5B5 => swizzled: true, convert: true,
    SZ_A1R5G5B5 => swizzled: true, convert: false,
    SZ_X1R5G5B5 => swizzled: true, convert: false,
    SZ_A4R4G4B4 => swizzled: true, convert: false,
    SZ_G8B8 => swizzled: true, convert: true,
    SZ_R8B8 => swizzled: true, convert: true,
    SZ_I8_A8R8G8B8 => swizzled: true, convert: true,

    LU_IMAGE_A8B8G8R8 => swizzled: false, convert: false,
    LU_IMAGE_B8G8R8A8 => swizzled: false, convert: false,
    LU_IMAGE_R8G8B8A8 => swizzled: false, convert: false,
    LU_IMAGE_A8R8G8B8 => swizzled: false, convert: false,
    LU_IMAGE_X8R8G8B8 => swizzled: false, convert: false,
    LU_IMAGE_Y8 => swizzled: false, convert: true,
    LU_IMAGE_AY8 => swizzled: false, convert: true,
    LU_IMAGE_A8 => swizzled: false, convert: true,
    LU_IMAGE_A8Y8 => swizzled: false, convert: true,
    LU_IMAGE_R5G6B5 => swizzled: false, convert: false,
    LU_IMAGE_R6G5B5 => swizzled: false, convert: true,
    LU_IMAGE_A1R5G5B5 => swizzled: false, convert: false,
    LU_IMAGE_X1R5G5B5 => swizzled: false, convert: false,
    LU_IMAGE_A4R4G4B4 => swizzled: false, convert: false,
    LU_IMAGE_G8B8 => swizzled: false, convert: true,
}

/// Looks up a descriptor by its `NV097_SET_TEXTURE_FORMAT_COLOR` value.
pub fn format_by_encoding(encoding_id: u32) -> Option<&'static FormatDescriptor> {
    TEXTURE_FORMATS
        .iter()
        .find(|format| format.encoding_id == encoding_id)
}

/// Descriptor of the 8-bit index + A8R8G8B8 palette encoding.
pub fn palettized_format() -> &'static FormatDescriptor {
    format_by_encoding(SZ_I8_A8R8G8B8).expect("catalog lists SZ_I8_A8R8G8B8")
}
