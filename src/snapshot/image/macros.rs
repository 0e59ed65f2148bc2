/// Generates big-endian read/write methods for a single multi-byte field width.
///
/// Encoding is done with explicit shifts and masks so the wire layout does not
/// depend on the byte order of the target.
macro_rules! impl_be_field {
    ($type:ty, $bits:ty, $size:literal) => {
        paste::paste! {
            #[doc = "Reads a big-endian `" $type "` starting at `addr`."]
            #[doc = ""]
            #[doc = "# Errors"]
            #[doc = "[`SnapshotError::OutOfRange`] if `addr + " $size "` exceeds the map."]
            #[inline]
            pub fn [<read_ $type _be_at>](&self, addr: u8) -> Result<$type, SnapshotError> {
                let (offset, end) = range_span::<N>(addr, $size)?;
                let mut bits: $bits = 0;
                for &byte in &self.bytes[offset..end] {
                    bits = (bits << 8) | byte as $bits;
                }
                Ok(bits as $type)
            }

            #[doc = "Writes a big-endian `" $type "` starting at `addr`, MSB first."]
            #[doc = ""]
            #[doc = "# Errors"]
            #[doc = "[`SnapshotError::OutOfRange`] if `addr + " $size "` exceeds the map."]
            #[inline]
            pub fn [<write_ $type _be_at>](&mut self, addr: u8, value: $type) -> Result<(), SnapshotError> {
                let (offset, end) = range_span::<N>(addr, $size)?;
                let bits = value as $bits;
                for (i, slot) in self.bytes[offset..end].iter_mut().enumerate() {
                    let shift = 8 * ($size - 1 - i);
                    *slot = ((bits >> shift) & 0xFF) as u8;
                }
                Ok(())
            }
        }
    };
}

/// Generates accessors for every field width used by the register map.
macro_rules! impl_be_fields {
    () => {
        impl_be_field!(u16, u16, 2);
        impl_be_field!(i16, u16, 2);
        impl_be_field!(u32, u32, 4);
        impl_be_field!(i32, u32, 4);
    };
}

pub(super) use impl_be_field;
pub(super) use impl_be_fields;
