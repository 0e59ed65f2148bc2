/// Errors that can occur during register map operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotError {
    /// Offset or length exceeds the register map.
    OutOfRange,
    /// Operation attempted with zero length.
    ZeroLength,
    /// Peripheral bus address outside the 7-bit range `0x01..=0x7F`.
    InvalidBusAddress,
}

impl core::fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            SnapshotError::OutOfRange => write!(f, "offset or length exceeds register map"),
            SnapshotError::ZeroLength => write!(f, "operation attempted with zero length"),
            SnapshotError::InvalidBusAddress => write!(f, "bus address outside 0x01..=0x7F"),
        }
    }
}
