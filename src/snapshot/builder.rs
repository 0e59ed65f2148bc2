use core::marker::PhantomData;

use embedded_hal::digital::OutputPin;

use crate::snapshot::{
    SnapshotError,
    config::{PeripheralConfig, ReadWindow},
    map::DEFAULT_IDENTIFICATION,
    policy::{AccessPolicy, MutableRegisterPolicy},
    signal::{ActiveLowPin, NoSignal, ReadySignal},
    storage::SnapshotStorage,
};

// Builder states
pub struct NeedIdentification;
pub struct NeedAccessPolicy;
pub struct NeedReadySignal;
pub struct Ready;

pub struct SnapshotStorageBuilder<AP, RS, State> {
    config: PeripheralConfig,
    access_policy: AP,
    signal: RS,
    _phantom: PhantomData<State>,
}

impl Default for SnapshotStorageBuilder<(), (), NeedIdentification> {
    fn default() -> Self {
        Self::new()
    }
}

// Start the builder
impl SnapshotStorageBuilder<(), (), NeedIdentification> {
    pub fn new() -> Self {
        SnapshotStorageBuilder {
            config: PeripheralConfig::default(),
            access_policy: (),
            signal: (),
            _phantom: PhantomData,
        }
    }

    /// Set the value of the read-only identification register.
    pub fn identification(self, id: u8) -> SnapshotStorageBuilder<(), (), NeedAccessPolicy> {
        SnapshotStorageBuilder {
            config: PeripheralConfig {
                identification: id,
                ..self.config
            },
            access_policy: (),
            signal: (),
            _phantom: PhantomData,
        }
    }

    /// Use the reference identification byte (0x0D).
    pub fn default_identification(self) -> SnapshotStorageBuilder<(), (), NeedAccessPolicy> {
        self.identification(DEFAULT_IDENTIFICATION)
    }
}

// Set access policy
impl SnapshotStorageBuilder<(), (), NeedAccessPolicy> {
    pub fn access_policy<AP: AccessPolicy>(
        self,
        policy: AP,
    ) -> SnapshotStorageBuilder<AP, (), NeedReadySignal> {
        SnapshotStorageBuilder {
            config: self.config,
            access_policy: policy,
            signal: (),
            _phantom: PhantomData,
        }
    }

    /// Only mode and configuration are writable
    pub fn default_access(self) -> SnapshotStorageBuilder<MutableRegisterPolicy, (), NeedReadySignal> {
        self.access_policy(MutableRegisterPolicy::default())
    }
}

// Set ready signal
impl<AP: AccessPolicy> SnapshotStorageBuilder<AP, (), NeedReadySignal> {
    pub fn ready_signal<RS: ReadySignal>(self, signal: RS) -> SnapshotStorageBuilder<AP, RS, Ready> {
        SnapshotStorageBuilder {
            config: self.config,
            access_policy: self.access_policy,
            signal,
            _phantom: PhantomData,
        }
    }

    /// Drive `pin` low while a snapshot awaits a read.
    pub fn ready_pin<P: OutputPin>(self, pin: P) -> SnapshotStorageBuilder<AP, ActiveLowPin<P>, Ready> {
        self.ready_signal(ActiveLowPin::new(pin))
    }

    /// No ready line is wired; controllers must poll with reads.
    pub fn no_signal(self) -> SnapshotStorageBuilder<AP, NoSignal, Ready> {
        self.ready_signal(NoSignal)
    }
}

// Optional settings and build
impl<AP, RS> SnapshotStorageBuilder<AP, RS, Ready>
where
    AP: AccessPolicy,
    RS: ReadySignal,
{
    /// Set the 7-bit address the transport answers on. Checked in [`Self::build`].
    pub fn bus_address(mut self, addr: u8) -> Self {
        self.config.bus_address = addr;
        self
    }

    pub fn read_window(mut self, window: ReadWindow) -> Self {
        self.config.read_window = window;
        self
    }

    /// Build the final SnapshotStorage instance
    ///
    /// # Errors
    /// [`SnapshotError::InvalidBusAddress`] if the bus address is not a 7-bit address.
    pub fn build(self) -> Result<SnapshotStorage<AP, RS>, SnapshotError> {
        SnapshotStorage::new(self.config, self.access_policy, self.signal)
    }
}
