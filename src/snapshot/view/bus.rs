use crate::snapshot::{
    AccessPolicy, ReadySignal,
    config::ReadWindow,
    decoder::{Decoded, WriteCommandDecoder},
    helpers::{clamp_pointer, read_len},
    map::REG_MAP_SIZE,
    state::{MapImage, SyncState},
};

/// Transport-side view of the peripheral state.
///
/// Serves block reads from the exposed image and feeds inbound payloads to the
/// write-command decoder. Never reads pending writes and never writes staging.
pub struct BusView<'a, AP, RS>
where
    AP: AccessPolicy,
    RS: ReadySignal,
{
    state: &'a mut SyncState,
    access_policy: &'a AP,
    signal: &'a mut RS,
    read_window: ReadWindow,
}

impl<'a, AP, RS> core::fmt::Debug for BusView<'a, AP, RS>
where
    AP: AccessPolicy,
    RS: ReadySignal,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("BusView")
            .field("read_pointer", &self.state.read_pointer)
            .field("ready", &self.state.ready)
            .finish_non_exhaustive()
    }
}

impl<'a, AP, RS> BusView<'a, AP, RS>
where
    AP: AccessPolicy,
    RS: ReadySignal,
{
    pub(crate) fn new(
        state: &'a mut SyncState,
        access_policy: &'a AP,
        signal: &'a mut RS,
        read_window: ReadWindow,
    ) -> Self {
        Self {
            state,
            access_policy,
            signal,
            read_window,
        }
    }

    /// Handles one retained inbound payload.
    ///
    /// Decoding failures degrade to [`Decoded::Ignored`]; the bus has no
    /// channel to report them.
    pub fn receive(&mut self, payload: &[u8]) -> Decoded {
        let mut decoder = WriteCommandDecoder::new(
            self.access_policy,
            &mut self.state.read_pointer,
            &mut self.state.pending,
        );
        decoder.decode(payload).unwrap_or_else(|err| {
            log::warn!("discarded payload: {err}");
            Decoded::Ignored
        })
    }

    /// Handles a read request, filling `out` from the read pointer.
    ///
    /// Publishes the staged snapshot first if one is ready, then clears the
    /// ready state. Returns the number of bytes supplied.
    pub fn request(&mut self, out: &mut [u8]) -> usize {
        if self.state.ready {
            self.state.exposed.copy_from(&self.state.staging);
            log::trace!("published snapshot");
        }
        self.state.ready = false;
        self.signal.drive(false);

        let pointer = clamp_pointer::<REG_MAP_SIZE>(self.state.read_pointer) as usize;
        let len = read_len::<REG_MAP_SIZE>(pointer as u8, self.read_window, out.len());
        let bytes = self.state.exposed.as_bytes();
        for (i, slot) in out[..len].iter_mut().enumerate() {
            *slot = bytes[(pointer + i) % REG_MAP_SIZE];
        }
        len
    }

    /// Returns true if a committed snapshot awaits a read.
    pub fn is_ready(&self) -> bool {
        self.state.ready
    }

    pub fn read_pointer(&self) -> u8 {
        self.state.read_pointer
    }

    /// The image block reads are served from.
    pub fn exposed(&self) -> &MapImage {
        &self.state.exposed
    }
}
