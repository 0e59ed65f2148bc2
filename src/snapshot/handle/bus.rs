#![allow(unsafe_code)]

use crate::snapshot::{
    AccessPolicy, ReadySignal,
    decoder::{Decoded, capture},
    storage::SnapshotStorage,
    types::TransferCoordinator,
    view::BusView,
};

/// Handle given to the bus transport.
///
/// Implements [`TransferCoordinator`], so the transport's receive and request
/// callbacks can forward straight to it.
pub struct BusHandle<'a, AP, RS>
where
    AP: AccessPolicy,
    RS: ReadySignal,
{
    storage: &'a SnapshotStorage<AP, RS>,
}

impl<'a, AP, RS> core::fmt::Debug for BusHandle<'a, AP, RS>
where
    AP: AccessPolicy,
    RS: ReadySignal,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("BusHandle").finish_non_exhaustive()
    }
}

impl<'a, AP, RS> BusHandle<'a, AP, RS>
where
    AP: AccessPolicy,
    RS: ReadySignal,
{
    pub(crate) fn new(storage: &'a SnapshotStorage<AP, RS>) -> Self {
        Self { storage }
    }

    pub fn with_view<R>(&self, f: impl FnOnce(&mut BusView<AP, RS>) -> R) -> R {
        critical_section::with(|_| unsafe { self.with_view_unchecked(f) })
    }

    /// # Safety
    /// Requires exclusive access to the SnapshotStorage for the duration of `f`.
    /// Inside a bus interrupt that the production loop cannot preempt, and with
    /// no other handler sharing the storage, this holds without a critical section.
    pub unsafe fn with_view_unchecked<R>(&self, f: impl FnOnce(&mut BusView<AP, RS>) -> R) -> R {
        let state = unsafe { &mut *self.storage.state.get() };
        let signal = unsafe { &mut *self.storage.signal.get() };
        let mut view = BusView::new(
            state,
            &self.storage.access_policy,
            signal,
            self.storage.config.read_window,
        );
        f(&mut view)
    }

    /// Returns true if a committed snapshot awaits a read.
    pub fn is_ready(&self) -> bool {
        self.with_view(|view| view.is_ready())
    }
}

impl<'a, AP, RS> TransferCoordinator for BusHandle<'a, AP, RS>
where
    AP: AccessPolicy,
    RS: ReadySignal,
{
    fn on_receive<I>(&self, bytes: I) -> Decoded
    where
        I: IntoIterator<Item = u8>,
    {
        // Draining the transport touches no shared state.
        let (payload, _) = capture(bytes);
        self.with_view(|view| view.receive(&payload))
    }

    fn on_request(&self, tx: &mut [u8]) -> usize {
        self.with_view(|view| view.request(tx))
    }
}
