use crate::snapshot::{SnapshotError, helpers::range_span};

/// Writes accepted from the bus that have not yet reached the staging image.
///
/// One dirty bit and one value slot per register address. The decoder sets
/// entries; the production cycle drains them between field computations.
pub struct PendingWrites<const N: usize>
where
    bitmaps::BitsImpl<N>: bitmaps::Bits,
{
    dirty: bitmaps::Bitmap<N>,
    values: [u8; N],
}

impl<const N: usize> core::fmt::Debug for PendingWrites<N>
where
    bitmaps::BitsImpl<N>: bitmaps::Bits,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PendingWrites")
            .field("dirty", &self.dirty.len())
            .finish_non_exhaustive()
    }
}

impl<const N: usize> Default for PendingWrites<N>
where
    bitmaps::BitsImpl<N>: bitmaps::Bits,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> PendingWrites<N>
where
    bitmaps::BitsImpl<N>: bitmaps::Bits,
{
    pub fn new() -> Self {
        Self {
            dirty: bitmaps::Bitmap::new(),
            values: [0; N],
        }
    }

    /// Records `value` for `addr`, replacing any earlier pending value.
    pub fn stage(&mut self, addr: u8, value: u8) -> Result<(), SnapshotError> {
        let (offset, _) = range_span::<N>(addr, 1)?;
        self.values[offset] = value;
        self.dirty.set(offset, true);
        Ok(())
    }

    /// Returns true if any write is waiting to be applied.
    #[inline]
    pub fn any(&self) -> bool {
        !self.dirty.is_empty()
    }

    /// Returns the pending value for `addr`, if one is dirty.
    pub fn get(&self, addr: u8) -> Result<Option<u8>, SnapshotError> {
        let (offset, _) = range_span::<N>(addr, 1)?;
        Ok(self.dirty.get(offset).then_some(self.values[offset]))
    }

    /// Hands every pending write to `f` in address order, then clears flags and values.
    ///
    /// Entries are only cleared once `f` has succeeded for all of them.
    pub fn drain<F>(&mut self, mut f: F) -> Result<usize, SnapshotError>
    where
        F: FnMut(u8, u8) -> Result<(), SnapshotError>,
    {
        let mut count = 0;
        let mut idx = self.dirty.first_index();
        while let Some(offset) = idx {
            f(offset as u8, self.values[offset])?;
            count += 1;
            idx = self.dirty.next_index(offset);
        }

        self.dirty = bitmaps::Bitmap::new();
        self.values = [0; N];
        Ok(count)
    }
}
