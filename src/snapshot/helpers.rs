//! Utility functions for register offset calculations.
//!
//! These helpers are useful when implementing a custom
//! [`AccessPolicy`](crate::snapshot::AccessPolicy) or a transport that needs
//! to reason about offsets into the register map.

use crate::snapshot::{SnapshotError, config::ReadWindow};

/// Calculates the byte offset range for an address and length.
///
/// Returns `(start_offset, end_offset)` where end is exclusive,
/// or an error if the range is invalid.
///
/// # Type Parameters
/// * `N` - Size of the register map
///
/// # Errors
/// * [`SnapshotError::ZeroLength`] - if `len` is 0
/// * [`SnapshotError::OutOfRange`] - if the range exceeds the map
///
/// # Example
/// ```
/// use embedded_snapshot::snapshot::helpers::range_span;
///
/// assert_eq!(range_span::<14>(0x0B, 2), Ok((11, 13)));
/// assert!(range_span::<14>(0x0D, 2).is_err());
/// ```
pub fn range_span<const N: usize>(addr: u8, len: usize) -> Result<(usize, usize), SnapshotError> {
    if len == 0 {
        return Err(SnapshotError::ZeroLength);
    }

    let offset = addr as usize;
    let end = offset.checked_add(len).ok_or(SnapshotError::OutOfRange)?;

    if end > N {
        return Err(SnapshotError::OutOfRange);
    }

    Ok((offset, end))
}

/// Clamps a requested read pointer into the map, falling back to offset 0.
#[inline]
pub fn clamp_pointer<const N: usize>(addr: u8) -> u8 {
    if (addr as usize) < N { addr } else { 0 }
}

/// Number of bytes a block read starting at `pointer` supplies under `window`.
///
/// The result never exceeds `capacity`, the size of the transmit buffer.
pub fn read_len<const N: usize>(pointer: u8, window: ReadWindow, capacity: usize) -> usize {
    let pointer = clamp_pointer::<N>(pointer) as usize;
    let available = match window {
        ReadWindow::Truncate => N - pointer,
        ReadWindow::Wrap => N,
    };
    available.min(capacity)
}

#[test]
fn range_span_edge_cases() {
    assert_eq!(range_span::<14>(0, 0), Err(SnapshotError::ZeroLength));
    assert_eq!(range_span::<14>(13, 2), Err(SnapshotError::OutOfRange));
    assert_eq!(range_span::<14>(200, 1), Err(SnapshotError::OutOfRange));
    assert_eq!(range_span::<14>(13, 1), Ok((13, 14)));
    assert_eq!(range_span::<14>(0, 14), Ok((0, 14)));
}

#[test]
fn read_len_scenarios() {
    // Truncate stops at the end of the map
    assert_eq!(read_len::<14>(0, ReadWindow::Truncate, 32), 14);
    assert_eq!(read_len::<14>(0x0C, ReadWindow::Truncate, 32), 2);
    assert_eq!(read_len::<14>(0x0D, ReadWindow::Truncate, 32), 1);

    // Wrap always supplies a full map
    assert_eq!(read_len::<14>(0x0C, ReadWindow::Wrap, 32), 14);

    // Transmit buffer bounds the response
    assert_eq!(read_len::<14>(0, ReadWindow::Truncate, 4), 4);
    assert_eq!(read_len::<14>(0, ReadWindow::Wrap, 0), 0);

    // Out-of-range pointer is treated as 0
    assert_eq!(read_len::<14>(40, ReadWindow::Truncate, 32), 14);
}
