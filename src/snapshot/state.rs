use crate::snapshot::{
    image::RegisterImage,
    map::{IDENTIFICATION, REG_MAP_SIZE},
    pending::PendingWrites,
};

/// Register map image sized for the peripheral.
pub type MapImage = RegisterImage<REG_MAP_SIZE>;

/// Everything the bus handlers and the production cycle share.
pub(crate) struct SyncState {
    /// Written by the production cycle and by absorbed writes.
    pub(crate) staging: MapImage,
    /// Only replaced, in full, by the read handler.
    pub(crate) exposed: MapImage,
    pub(crate) pending: PendingWrites<REG_MAP_SIZE>,
    pub(crate) read_pointer: u8,
    /// A committed snapshot awaits a read.
    pub(crate) ready: bool,
}

impl SyncState {
    pub(crate) fn new(identification: u8) -> Self {
        let mut bytes = [0u8; REG_MAP_SIZE];
        bytes[IDENTIFICATION as usize] = identification;
        let staging = MapImage::from_bytes(bytes);
        let exposed = staging.clone();

        Self {
            staging,
            exposed,
            pending: PendingWrites::new(),
            read_pointer: 0,
            ready: false,
        }
    }
}
