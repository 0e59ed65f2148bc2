#![allow(unsafe_code)]

use core::cell::UnsafeCell;

use crate::snapshot::{
    SnapshotError,
    config::PeripheralConfig,
    handle::{BusHandle, ProducerHandle},
    policy::AccessPolicy,
    signal::ReadySignal,
    state::SyncState,
};

/// Shared peripheral state: both register images, pending writes, the read
/// pointer, the ready flag and the ready line.
///
/// Allocate once at start-up. The transport gets a [`BusHandle`] and the main
/// loop a [`ProducerHandle`]; each handle enters a critical section per
/// operation.
///
/// # Type Parameters
/// - `AP`: Access policy deciding which registers the controller may write
/// - `RS`: Ready signal driven on every ready-state change
pub struct SnapshotStorage<AP, RS>
where
    AP: AccessPolicy,
    RS: ReadySignal,
{
    pub(crate) state: UnsafeCell<SyncState>,
    pub(crate) access_policy: AP,
    pub(crate) signal: UnsafeCell<RS>,
    pub(crate) config: PeripheralConfig,
}

impl<AP, RS> core::fmt::Debug for SnapshotStorage<AP, RS>
where
    AP: AccessPolicy,
    RS: ReadySignal,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SnapshotStorage")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl<AP, RS> SnapshotStorage<AP, RS>
where
    AP: AccessPolicy,
    RS: ReadySignal,
{
    pub fn new(config: PeripheralConfig, policy: AP, mut signal: RS) -> Result<Self, SnapshotError> {
        config.validate()?;
        signal.drive(false);

        log::debug!(
            "peripheral at {:#04x}, id {:#04x}, {:?} reads",
            config.bus_address,
            config.identification,
            config.read_window
        );

        Ok(Self {
            state: UnsafeCell::new(SyncState::new(config.identification)),
            access_policy: policy,
            signal: UnsafeCell::new(signal),
            config,
        })
    }

    pub fn bus(&self) -> BusHandle<'_, AP, RS> {
        BusHandle::new(self)
    }

    pub fn producer(&self) -> ProducerHandle<'_, AP, RS> {
        ProducerHandle::new(self)
    }

    pub fn config(&self) -> &PeripheralConfig {
        &self.config
    }

    /// 7-bit address the transport should answer on.
    pub fn bus_address(&self) -> u8 {
        self.config.bus_address
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::{
        decoder::Decoded,
        map::{CONFIG, IDENTIFICATION, MODE},
        policy::MutableRegisterPolicy,
        signal::NoSignal,
        source::{FixedMeasurements, Measurements},
        test_support::{TestPin, read_block, test_storage},
        types::TransferCoordinator,
    };
    use core::cell::Cell;

    #[test]
    fn new_rejects_invalid_config() {
        let config = PeripheralConfig {
            bus_address: 0x00,
            ..PeripheralConfig::default()
        };
        let result = SnapshotStorage::new(config, MutableRegisterPolicy::default(), NoSignal);
        assert_eq!(result.err(), Some(SnapshotError::InvalidBusAddress));
    }

    #[test]
    fn new_parks_ready_line_high() {
        let level = Cell::new(false);
        let _storage = SnapshotStorage::new(
            PeripheralConfig::default(),
            MutableRegisterPolicy::default(),
            crate::snapshot::signal::ActiveLowPin::new(TestPin::new(&level)),
        )
        .unwrap();
        assert!(level.get());
    }

    #[test]
    fn full_write_commit_read_cycle() {
        let storage = test_storage();

        // 1. Controller writes mode + config in one transaction
        assert_eq!(storage.bus().on_receive([MODE, 0x05, 0x09]), Decoded::Staged(2));

        // 2. Producer commit absorbs the write instead of committing
        let fields = FixedMeasurements::REFERENCE.0;
        assert_eq!(storage.producer().try_commit(&fields), Ok(false));
        assert!(!storage.bus().is_ready());

        // 3. Next commit goes through
        assert_eq!(storage.producer().try_commit(&fields), Ok(true));
        assert!(storage.bus().is_ready());

        // 4. Block read returns the committed snapshot with the new registers
        let mut out = [0u8; 14];
        assert_eq!(read_block(&storage.bus(), 0, &mut out), 14);
        assert_eq!(out[MODE as usize], 0x05);
        assert_eq!(out[CONFIG as usize], 0x09);
        assert_eq!(out[IDENTIFICATION as usize], 0x0D);
        assert_eq!(
            storage.bus().with_view(|view| Measurements::load(view.exposed())),
            Ok(fields)
        );
        assert!(!storage.bus().is_ready());
    }
}
