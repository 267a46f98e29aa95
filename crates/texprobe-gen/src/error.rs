use thiserror::Error;

pub type Result<T> = std::result::Result<T, GenError>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GenError {
    /// The backing store for a buffer could not be reserved (or its size overflows `usize`).
    #[error("failed to allocate {bytes} bytes for {what}")]
    Allocation { what: &'static str, bytes: u128 },

    /// A surface's pixel storage does not cover its declared dimensions.
    #[error("surface {width}x{height} cannot be locked: backing store holds {texels} texels")]
    SurfaceAcquisition {
        width: u32,
        height: u32,
        texels: usize,
    },
}

/// Reserves a zero-filled buffer of `len` elements, reporting allocation failure instead of
/// aborting.
pub(crate) fn try_alloc<T: Copy + Default>(what: &'static str, len: u128) -> Result<Vec<T>> {
    let bytes = len * std::mem::size_of::<T>() as u128;
    let Ok(len) = usize::try_from(len) else {
        return Err(GenError::Allocation { what, bytes });
    };
    let mut buf = Vec::new();
    buf.try_reserve_exact(len)
        .map_err(|_| GenError::Allocation { what, bytes })?;
    buf.resize(len, T::default());
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn oversized_request_reports_allocation_failure() {
        let len = u128::from(u64::MAX) + 1;
        assert_eq!(
            try_alloc::<u32>("surface", len),
            Err(GenError::Allocation {
                what: "surface",
                bytes: len * 4,
            })
        );
        // Fits in usize but not in the address space.
        assert!(matches!(
            try_alloc::<u32>("surface", u128::from(u64::MAX / 2)),
            Err(GenError::Allocation { .. })
        ));
    }

    #[test]
    fn buffers_start_zeroed() {
        assert_eq!(try_alloc::<u8>("index volume", 5), Ok(vec![0; 5]));
    }
}
