use crate::snapshot::{
    ReadySignal, SnapshotError,
    source::Measurements,
    state::{MapImage, SyncState},
};

/// Production-side view of the peripheral state.
///
/// Owns the staging image for the duration of the view: absorbs pending
/// writes into it and commits finished cycles. Never touches the exposed image.
pub struct ProducerView<'a, RS>
where
    RS: ReadySignal,
{
    state: &'a mut SyncState,
    signal: &'a mut RS,
}

impl<'a, RS> core::fmt::Debug for ProducerView<'a, RS>
where
    RS: ReadySignal,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ProducerView").finish_non_exhaustive()
    }
}

impl<'a, RS> ProducerView<'a, RS>
where
    RS: ReadySignal,
{
    pub(crate) fn new(state: &'a mut SyncState, signal: &'a mut RS) -> Self {
        Self { state, signal }
    }

    /// Returns true if a write is waiting to be absorbed.
    pub fn has_pending(&self) -> bool {
        self.state.pending.any()
    }

    /// Applies every pending write to staging and withdraws any ready snapshot.
    ///
    /// Returns false if nothing was pending, in which case nothing changes.
    pub fn absorb_pending(&mut self) -> Result<bool, SnapshotError> {
        if !self.state.pending.any() {
            return Ok(false);
        }

        let staging = &mut self.state.staging;
        let applied = self
            .state
            .pending
            .drain(|addr, value| staging.set(addr, value))?;
        log::debug!("absorbed {applied} pending write(s)");

        self.state.ready = false;
        self.signal.drive(false);
        Ok(true)
    }

    /// Stores `fields` in staging and marks the snapshot ready.
    ///
    /// If a write arrived since the last check it is absorbed instead and
    /// nothing is committed; returns whether the commit happened.
    pub fn try_commit(&mut self, fields: &Measurements) -> Result<bool, SnapshotError> {
        if self.absorb_pending()? {
            return Ok(false);
        }

        fields.store(&mut self.state.staging)?;
        self.state.ready = true;
        self.signal.drive(true);
        Ok(true)
    }

    /// The image the next snapshot will be published from.
    pub fn staging(&self) -> &MapImage {
        &self.state.staging
    }

    pub fn is_ready(&self) -> bool {
        self.state.ready
    }
}
