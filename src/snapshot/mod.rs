pub mod builder;
pub mod config;
pub mod cycle;
pub mod decoder;
pub mod error;
pub mod handle;
pub mod helpers;
pub mod image;
pub mod map;
pub mod pending;
pub mod policy;
pub mod signal;
pub mod source;
pub(crate) mod state;
pub mod storage;
pub mod types;
pub mod view;

#[cfg(test)]
mod test_support;

pub use builder::SnapshotStorageBuilder;
pub use config::{PeripheralConfig, ReadWindow};
pub use cycle::{CyclePhase, CycleStats, ProductionCycle, StepOutcome};
pub use decoder::{Command, Decoded, WriteCommandDecoder};
pub use error::SnapshotError;
pub use handle::{BusHandle, ProducerHandle};
pub use image::RegisterImage;
pub use pending::PendingWrites;
pub use policy::{AccessPolicy, MutableRegisterPolicy};
pub use signal::{ActiveLowPin, NoSignal, ReadySignal};
pub use source::{FixedMeasurements, MeasurementSource, Measurements};
pub use state::MapImage;
pub use storage::SnapshotStorage;
pub use types::TransferCoordinator;
pub use view::{BusView, ProducerView};

pub mod prelude {
    pub use super::{
        AccessPolicy, ActiveLowPin, BusHandle, BusView, CyclePhase, Decoded, FixedMeasurements,
        MeasurementSource, Measurements, MutableRegisterPolicy, NoSignal, PeripheralConfig,
        ProducerHandle, ProducerView, ProductionCycle, ReadWindow, ReadySignal, RegisterImage,
        SnapshotError, SnapshotStorage, SnapshotStorageBuilder, StepOutcome, TransferCoordinator,
    };
}
