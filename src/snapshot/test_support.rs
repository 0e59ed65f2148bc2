//! Test support utilities - only compiled in test builds.

use core::cell::Cell;

use embedded_hal::digital::{ErrorKind, ErrorType, OutputPin};

use crate::snapshot::{
    config::{PeripheralConfig, ReadWindow},
    image::RegisterImage,
    map::{DEFAULT_IDENTIFICATION, REG_MAP_SIZE},
    pending::PendingWrites,
    policy::{AccessPolicy, MutableRegisterPolicy},
    signal::{ActiveLowPin, NoSignal, ReadySignal},
    source::MeasurementSource,
    state::SyncState,
    storage::SnapshotStorage,
    types::TransferCoordinator,
    view::{BusView, ProducerView},
};

/// Standard test configuration: the 14-byte register map
pub type TestImage = RegisterImage<REG_MAP_SIZE>;
pub type TestPending = PendingWrites<REG_MAP_SIZE>;
pub type TestStorage = SnapshotStorage<MutableRegisterPolicy, NoSignal>;

/// Policy that allows every write
pub struct AllowAllPolicy;

impl AccessPolicy for AllowAllPolicy {
    fn can_write(&self, _addr: u8) -> bool {
        true
    }
}

/// Policy that denies all writes
pub struct DenyAllPolicy;

impl AccessPolicy for DenyAllPolicy {
    fn can_write(&self, _addr: u8) -> bool {
        false
    }
}

/// Helper to create a default test storage
pub fn test_storage() -> TestStorage {
    SnapshotStorage::new(
        PeripheralConfig::default(),
        MutableRegisterPolicy::default(),
        NoSignal,
    )
    .unwrap()
}

/// Controller-side block read: pointer-set followed by a read request.
pub fn read_block<T: TransferCoordinator>(bus: &T, pointer: u8, out: &mut [u8]) -> usize {
    bus.on_receive([pointer]);
    bus.on_request(out)
}

#[derive(Debug)]
pub struct TestPinError;

impl embedded_hal::digital::Error for TestPinError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

/// Output pin that records its level in a shared cell (`true` = high).
pub struct TestPin<'a> {
    level: &'a Cell<bool>,
    fail: bool,
}

impl<'a> TestPin<'a> {
    pub fn new(level: &'a Cell<bool>) -> Self {
        Self { level, fail: false }
    }

    /// A pin whose every operation fails without changing the level.
    pub fn failing(level: &'a Cell<bool>) -> Self {
        Self { level, fail: true }
    }

    fn drive(&mut self, high: bool) -> Result<(), TestPinError> {
        if self.fail {
            return Err(TestPinError);
        }
        self.level.set(high);
        Ok(())
    }
}

impl ErrorType for TestPin<'_> {
    type Error = TestPinError;
}

impl OutputPin for TestPin<'_> {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.drive(false)
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.drive(true)
    }
}

/// Source whose status field counts started cycles.
#[derive(Debug, Default)]
pub struct CountingSource {
    /// Total field computations.
    pub calls: u32,
    /// Number of times the status field was computed.
    pub cycles: u8,
}

impl MeasurementSource for CountingSource {
    fn status(&mut self) -> u8 {
        self.calls += 1;
        self.cycles = self.cycles.wrapping_add(1);
        self.cycles
    }

    fn latitude(&mut self) -> u32 {
        self.calls += 1;
        self.calls
    }

    fn longitude(&mut self) -> i32 {
        self.calls += 1;
        -(self.calls as i32)
    }

    fn speed(&mut self) -> u16 {
        self.calls += 1;
        self.calls as u16
    }
}

/// Fixture for BusView tests with default policy.
pub struct TestBusFixture<RS: ReadySignal> {
    pub state: SyncState,
    pub policy: MutableRegisterPolicy,
    pub signal: RS,
    pub read_window: ReadWindow,
}

impl TestBusFixture<NoSignal> {
    pub fn new() -> Self {
        Self::with_signal(NoSignal)
    }
}

impl<'a> TestBusFixture<ActiveLowPin<TestPin<'a>>> {
    pub fn with_pin(pin: TestPin<'a>) -> Self {
        Self::with_signal(ActiveLowPin::new(pin))
    }
}

impl<RS: ReadySignal> TestBusFixture<RS> {
    pub fn with_signal(signal: RS) -> Self {
        Self {
            state: SyncState::new(DEFAULT_IDENTIFICATION),
            policy: MutableRegisterPolicy::default(),
            signal,
            read_window: ReadWindow::Truncate,
        }
    }

    pub fn view(&mut self) -> BusView<'_, MutableRegisterPolicy, RS> {
        BusView::new(
            &mut self.state,
            &self.policy,
            &mut self.signal,
            self.read_window,
        )
    }
}

/// Fixture for ProducerView tests.
pub struct TestProducerFixture<RS: ReadySignal> {
    pub state: SyncState,
    pub signal: RS,
}

impl TestProducerFixture<NoSignal> {
    pub fn new() -> Self {
        Self {
            state: SyncState::new(DEFAULT_IDENTIFICATION),
            signal: NoSignal,
        }
    }
}

impl<'a> TestProducerFixture<ActiveLowPin<TestPin<'a>>> {
    pub fn with_pin(pin: TestPin<'a>) -> Self {
        Self {
            state: SyncState::new(DEFAULT_IDENTIFICATION),
            signal: ActiveLowPin::new(pin),
        }
    }
}

impl<RS: ReadySignal> TestProducerFixture<RS> {
    pub fn view(&mut self) -> ProducerView<'_, RS> {
        ProducerView::new(&mut self.state, &mut self.signal)
    }
}
