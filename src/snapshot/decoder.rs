//! Inbound payload capture and write-command decoding.
//!
//! A payload is `[address]` (pointer-set, precedes every block read) or
//! `[address][data]..` (register write). Only the first
//! [`MAX_SENT_BYTES`] bytes are kept; anything beyond is drained from the
//! transport so the transaction completes without desynchronizing the bus.

use heapless::Vec;

use crate::snapshot::{
    AccessPolicy, SnapshotError,
    helpers::clamp_pointer,
    map::{MAX_SENT_BYTES, is_mutable},
    pending::PendingWrites,
};

/// Bytes retained from one inbound transaction.
pub type Payload = Vec<u8, MAX_SENT_BYTES>;

/// Reads every byte from `bytes`, keeping the first [`MAX_SENT_BYTES`].
///
/// Returns the retained payload and the total number of bytes received.
pub fn capture<I>(bytes: I) -> (Payload, usize)
where
    I: IntoIterator<Item = u8>,
{
    let mut payload = Payload::new();
    let mut received = 0;
    for byte in bytes {
        received += 1;
        // Overflow is drained, never buffered.
        let _ = payload.push(byte);
    }
    if received > MAX_SENT_BYTES {
        log::trace!("drained {} excess byte(s)", received - MAX_SENT_BYTES);
    }
    (payload, received)
}

/// A parsed inbound payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command<'a> {
    /// Zero-length transaction.
    Empty,
    /// Sets the offset the next block read starts at.
    SetPointer(u8),
    /// Writes `data` to consecutive registers starting at `addr`.
    Write { addr: u8, data: &'a [u8] },
}

impl<'a> Command<'a> {
    pub fn parse(payload: &'a [u8]) -> Self {
        match payload {
            [] => Command::Empty,
            [addr] => Command::SetPointer(*addr),
            [addr, data @ ..] => Command::Write { addr: *addr, data },
        }
    }
}

/// What a decoded command did to the peripheral state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decoded {
    /// Nothing changed: empty payload or a write to a protected address.
    Ignored,
    /// The read pointer now holds this offset.
    Pointer(u8),
    /// This many register writes were recorded as pending.
    Staged(usize),
}

/// Applies inbound commands to the read pointer and the pending-write table.
///
/// Never touches a register image directly: writes only become visible once
/// the production cycle absorbs them. Only mode and configuration are ever
/// staged, whatever the access policy allows.
pub struct WriteCommandDecoder<'a, const N: usize, AP>
where
    AP: AccessPolicy,
    bitmaps::BitsImpl<N>: bitmaps::Bits,
{
    access_policy: &'a AP,
    read_pointer: &'a mut u8,
    pending: &'a mut PendingWrites<N>,
}

impl<'a, const N: usize, AP> WriteCommandDecoder<'a, N, AP>
where
    AP: AccessPolicy,
    bitmaps::BitsImpl<N>: bitmaps::Bits,
{
    pub fn new(
        access_policy: &'a AP,
        read_pointer: &'a mut u8,
        pending: &'a mut PendingWrites<N>,
    ) -> Self {
        Self {
            access_policy,
            read_pointer,
            pending,
        }
    }

    /// Decodes one retained payload.
    pub fn decode(&mut self, payload: &[u8]) -> Result<Decoded, SnapshotError> {
        match Command::parse(payload) {
            Command::Empty => Ok(Decoded::Ignored),
            Command::SetPointer(addr) => {
                let pointer = clamp_pointer::<N>(addr);
                if pointer != addr {
                    log::debug!("pointer {addr:#04x} past end of map, reset to 0");
                }
                *self.read_pointer = pointer;
                Ok(Decoded::Pointer(pointer))
            }
            Command::Write { addr, data } => self.stage_writes(addr, data),
        }
    }

    fn stage_writes(&mut self, addr: u8, data: &[u8]) -> Result<Decoded, SnapshotError> {
        let mut staged = 0;
        for (i, &value) in data.iter().enumerate() {
            let Some(target) = u8::try_from(i).ok().and_then(|i| addr.checked_add(i)) else {
                break;
            };
            if usize::from(target) >= N
                || !is_mutable(target)
                || !self.access_policy.can_write(target)
            {
                break;
            }
            self.pending.stage(target, value)?;
            staged += 1;
        }

        if staged == 0 {
            log::debug!("ignored write to protected register {addr:#04x}");
            return Ok(Decoded::Ignored);
        }
        log::trace!("staged {staged} write(s) at {addr:#04x}");
        Ok(Decoded::Staged(staged))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::{
        map::{CONFIG, IDENTIFICATION, MODE, SPEED},
        pending::PendingWrites,
        policy::MutableRegisterPolicy,
        test_support::{AllowAllPolicy, DenyAllPolicy, TestPending},
    };

    struct Fixture {
        policy: MutableRegisterPolicy,
        pointer: u8,
        pending: TestPending,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                policy: MutableRegisterPolicy::default(),
                pointer: 0,
                pending: TestPending::new(),
            }
        }

        fn decode(&mut self, payload: &[u8]) -> Decoded {
            WriteCommandDecoder::new(&self.policy, &mut self.pointer, &mut self.pending)
                .decode(payload)
                .unwrap()
        }
    }

    #[test]
    fn capture_keeps_first_three_bytes() {
        let (payload, received) = capture([0x0B, 0x01, 0x02, 0x03, 0x04]);
        assert_eq!(received, 5);
        assert_eq!(payload.as_slice(), &[0x0B, 0x01, 0x02]);

        let (payload, received) = capture(core::iter::empty());
        assert_eq!(received, 0);
        assert!(payload.is_empty());
    }

    #[test]
    fn capture_drains_the_whole_source() {
        let mut source = [0u8; 16].into_iter();
        let _ = capture(&mut source);
        assert_eq!(source.next(), None);
    }

    #[test]
    fn parse_scenarios() {
        assert_eq!(Command::parse(&[]), Command::Empty);
        assert_eq!(Command::parse(&[0x0C]), Command::SetPointer(0x0C));
        assert_eq!(
            Command::parse(&[0x0B, 0x05, 0x09]),
            Command::Write {
                addr: 0x0B,
                data: &[0x05, 0x09]
            }
        );
    }

    #[test]
    fn single_byte_sets_pointer() {
        let mut fixture = Fixture::new();

        assert_eq!(fixture.decode(&[0x05]), Decoded::Pointer(0x05));
        assert_eq!(fixture.pointer, 0x05);
        assert!(!fixture.pending.any());
    }

    #[test]
    fn pointer_past_end_is_clamped_to_zero() {
        let mut fixture = Fixture::new();
        fixture.pointer = 0x05;

        assert_eq!(fixture.decode(&[0x0E]), Decoded::Pointer(0));
        assert_eq!(fixture.pointer, 0);

        fixture.decode(&[0xFF]);
        assert_eq!(fixture.pointer, 0);
    }

    #[test]
    fn mode_write_with_one_byte() {
        let mut fixture = Fixture::new();

        assert_eq!(fixture.decode(&[MODE, 0x05]), Decoded::Staged(1));
        assert_eq!(fixture.pending.get(MODE), Ok(Some(0x05)));
        assert_eq!(fixture.pending.get(CONFIG), Ok(None));
    }

    #[test]
    fn mode_write_with_two_bytes_also_sets_config() {
        let mut fixture = Fixture::new();

        assert_eq!(fixture.decode(&[MODE, 0x05, 0x09]), Decoded::Staged(2));
        assert_eq!(fixture.pending.get(MODE), Ok(Some(0x05)));
        assert_eq!(fixture.pending.get(CONFIG), Ok(Some(0x09)));
    }

    #[test]
    fn config_write_ignores_trailing_byte() {
        let mut fixture = Fixture::new();

        // 0x0D is read-only, so the second data byte is dropped
        assert_eq!(fixture.decode(&[CONFIG, 0x09, 0x77]), Decoded::Staged(1));
        assert_eq!(fixture.pending.get(CONFIG), Ok(Some(0x09)));
        assert_eq!(fixture.pending.get(0x0D), Ok(None));
    }

    #[test]
    fn writes_elsewhere_are_silently_ignored() {
        let mut fixture = Fixture::new();

        for addr in [0x00, 0x02, 0x0A, 0x0D, 0x0E, 0xFF] {
            assert_eq!(fixture.decode(&[addr, 0x55, 0x66]), Decoded::Ignored);
        }
        assert!(!fixture.pending.any());
    }

    #[test]
    fn writes_never_move_the_pointer() {
        let mut fixture = Fixture::new();
        fixture.decode(&[0x03]);

        fixture.decode(&[MODE, 0x01]);
        fixture.decode(&[0x02, 0x01]);

        assert_eq!(fixture.pointer, 0x03);
    }

    #[test]
    fn deny_all_policy_blocks_every_write() {
        let policy = DenyAllPolicy;
        let mut pointer = 0;
        let mut pending = TestPending::new();

        let decoded = WriteCommandDecoder::new(&policy, &mut pointer, &mut pending)
            .decode(&[MODE, 0x01, 0x02])
            .unwrap();

        assert_eq!(decoded, Decoded::Ignored);
        assert!(!pending.any());
    }

    #[test]
    fn permissive_policy_cannot_reach_protected_registers() {
        let policy = AllowAllPolicy;
        let mut pointer = 0;
        let mut pending = TestPending::new();
        let mut decoder = WriteCommandDecoder::new(&policy, &mut pointer, &mut pending);

        assert_eq!(decoder.decode(&[IDENTIFICATION, 0xEE]), Ok(Decoded::Ignored));
        assert_eq!(decoder.decode(&[IDENTIFICATION, 0x11, 0x22]), Ok(Decoded::Ignored));
        assert_eq!(decoder.decode(&[SPEED, 0x11, 0x22]), Ok(Decoded::Ignored));
        assert_eq!(decoder.decode(&[CONFIG, 0x09, 0xEE]), Ok(Decoded::Staged(1)));

        assert_eq!(pending.get(IDENTIFICATION), Ok(None));
        assert_eq!(pending.get(SPEED), Ok(None));
        assert_eq!(pending.get(CONFIG), Ok(Some(0x09)));
    }

    #[test]
    fn write_running_off_a_short_map_reports_what_was_staged() {
        // Twelve slots: mode fits, configuration does not
        let policy = AllowAllPolicy;
        let mut pointer = 0;
        let mut pending = PendingWrites::<12>::new();

        let decoded = WriteCommandDecoder::new(&policy, &mut pointer, &mut pending)
            .decode(&[MODE, 0x05, 0x09]);

        assert_eq!(decoded, Ok(Decoded::Staged(1)));
        assert_eq!(pending.get(MODE), Ok(Some(0x05)));
    }
}
