mod macros;

use macros::{impl_be_field, impl_be_fields};

use crate::snapshot::{SnapshotError, helpers::range_span};

/// Fixed-size, byte-addressable register image.
///
/// The peripheral keeps two of these: a staging image written by the
/// production cycle and an exposed image served to bus reads. Every access
/// is bounds-checked against `N`.
#[derive(Clone, PartialEq, Eq)]
pub struct RegisterImage<const N: usize> {
    bytes: [u8; N],
}

impl<const N: usize> core::fmt::Debug for RegisterImage<N> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "RegisterImage({:02X?})", &self.bytes[..])
    }
}

impl<const N: usize> Default for RegisterImage<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> RegisterImage<N> {
    /// Creates a zero-filled image.
    pub const fn new() -> Self {
        Self { bytes: [0; N] }
    }

    /// Creates an image holding `bytes`.
    pub const fn from_bytes(bytes: [u8; N]) -> Self {
        Self { bytes }
    }

    /// Returns the byte at `addr`.
    pub fn get(&self, addr: u8) -> Result<u8, SnapshotError> {
        let (offset, _) = range_span::<N>(addr, 1)?;
        Ok(self.bytes[offset])
    }

    /// Stores `value` at `addr`.
    pub fn set(&mut self, addr: u8, value: u8) -> Result<(), SnapshotError> {
        let (offset, _) = range_span::<N>(addr, 1)?;
        self.bytes[offset] = value;
        Ok(())
    }

    /// Replaces the whole image with `other` in one bulk copy.
    #[inline]
    pub fn copy_from(&mut self, other: &Self) {
        self.bytes.copy_from_slice(&other.bytes);
    }

    /// Returns the raw bytes of the image.
    #[inline]
    pub fn as_bytes(&self) -> &[u8; N] {
        &self.bytes
    }

    pub fn with_bytes<F, R>(&self, addr: u8, len: usize, f: F) -> Result<R, SnapshotError>
    where
        F: FnOnce(&[u8]) -> R,
    {
        let (offset, end) = range_span::<N>(addr, len)?;
        Ok(f(&self.bytes[offset..end]))
    }

    impl_be_fields!();
}
