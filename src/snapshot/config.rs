use crate::snapshot::{
    SnapshotError,
    map::{DEFAULT_BUS_ADDRESS, DEFAULT_IDENTIFICATION},
};

/// How many bytes a block read supplies for a non-zero read pointer.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ReadWindow {
    /// Supply bytes from the pointer to the end of the map.
    #[default]
    Truncate,
    /// Supply a full map, wrapping back to offset 0 after the last register.
    Wrap,
}

/// Static configuration of the peripheral.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeripheralConfig {
    /// 7-bit address the transport answers on.
    pub bus_address: u8,
    /// Value of the read-only identification register.
    pub identification: u8,
    pub read_window: ReadWindow,
}

impl Default for PeripheralConfig {
    fn default() -> Self {
        Self {
            bus_address: DEFAULT_BUS_ADDRESS,
            identification: DEFAULT_IDENTIFICATION,
            read_window: ReadWindow::default(),
        }
    }
}

impl PeripheralConfig {
    /// Checks the configuration before the peripheral is brought up.
    pub fn validate(&self) -> Result<(), SnapshotError> {
        if !(0x01..=0x7F).contains(&self.bus_address) {
            return Err(SnapshotError::InvalidBusAddress);
        }
        Ok(())
    }
}
