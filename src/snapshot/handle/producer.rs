#![allow(unsafe_code)]

use crate::snapshot::{
    AccessPolicy, ReadySignal, SnapshotError, source::Measurements, storage::SnapshotStorage,
    view::ProducerView,
};

/// Handle given to the production loop.
pub struct ProducerHandle<'a, AP, RS>
where
    AP: AccessPolicy,
    RS: ReadySignal,
{
    storage: &'a SnapshotStorage<AP, RS>,
}

impl<'a, AP, RS> core::fmt::Debug for ProducerHandle<'a, AP, RS>
where
    AP: AccessPolicy,
    RS: ReadySignal,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ProducerHandle").finish_non_exhaustive()
    }
}

impl<'a, AP, RS> ProducerHandle<'a, AP, RS>
where
    AP: AccessPolicy,
    RS: ReadySignal,
{
    pub(crate) fn new(storage: &'a SnapshotStorage<AP, RS>) -> Self {
        Self { storage }
    }

    pub fn with_view<R>(&self, f: impl FnOnce(&mut ProducerView<RS>) -> R) -> R {
        critical_section::with(|_| unsafe { self.with_view_unchecked(f) })
    }

    /// # Safety
    /// Requires exclusive access to the SnapshotStorage for the duration of `f`.
    /// The bus handlers must not run until `f` returns, e.g. because the bus
    /// interrupt is masked by the caller.
    pub unsafe fn with_view_unchecked<R>(&self, f: impl FnOnce(&mut ProducerView<RS>) -> R) -> R {
        let state = unsafe { &mut *self.storage.state.get() };
        let signal = unsafe { &mut *self.storage.signal.get() };
        let mut view = ProducerView::new(state, signal);
        f(&mut view)
    }

    /// Applies pending writes to staging; see [`ProducerView::absorb_pending`].
    pub fn absorb_pending(&self) -> Result<bool, SnapshotError> {
        self.with_view(|view| view.absorb_pending())
    }

    /// Commits `fields` unless a write is pending; see [`ProducerView::try_commit`].
    pub fn try_commit(&self, fields: &Measurements) -> Result<bool, SnapshotError> {
        self.with_view(|view| view.try_commit(fields))
    }
}
