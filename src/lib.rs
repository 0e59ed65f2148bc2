//! A `no_std`, no-alloc register map for bus peripherals that publish
//! periodically refreshed measurements.
//!
//! The peripheral keeps a **staging** image that a background production cycle
//! fills field by field, and an **exposed** image that bus reads are served
//! from. A finished cycle is published to the exposed image in one bulk copy
//! at the start of the next read, so a controller never sees fields from two
//! different cycles.
//!
//! Writes from the controller do not touch either image directly. They are
//! recorded as pending writes and the production cycle, which checks for them
//! after every field, abandons the cycle in progress, applies them to staging
//! and starts over. A snapshot is therefore never marked ready with stale
//! writable registers.
//!
//! # Features
//!
//! - **Zero heap allocation** - All storage statically allocated
//! - **Double-buffered snapshots** - Reads never observe a half-produced cycle
//! - **Write preemption** - Pending writes restart the production cycle
//! - **Ready line** - Optional active-low "data ready" output pin
//! - **Explicit big-endian fields** - No byte reinterpretation of integers
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────┐                 ┌──────────────────────────┐
//! │  Production loop     │                 │  Bus transport (ISR)     │
//! │                      │                 │                          │
//! │  ProductionCycle     │   pending       │  on_receive()            │
//! │   step() per field   │◀────────────────│   pointer-set / write    │
//! │   absorb / commit    │   writes        │                          │
//! │        │             │                 │  on_request()            │
//! │        ▼             │   bulk copy     │   publish if ready       │
//! │     staging ─────────┼────────────────▶│   exposed ──▶ tx bytes   │
//! └──────────────────────┘                 └──────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use embedded_snapshot::prelude::*;
//!
//! let storage = SnapshotStorageBuilder::new()
//!     .default_identification()
//!     .default_access()
//!     .no_signal()
//!     .build()
//!     .unwrap();
//!
//! let mut cycle = ProductionCycle::new(FixedMeasurements::default());
//!
//! // Main loop: produce one snapshot, servicing the bus between fields
//! cycle.run_cycle(&storage.producer(), |_| {}).unwrap();
//!
//! // Transport callbacks: controller writes mode, then reads from offset 0
//! let bus = storage.bus();
//! bus.on_receive([0x0B, 0x05]);
//! bus.on_receive([0x00]);
//! let mut tx = [0u8; 14];
//! let len = bus.on_request(&mut tx);
//! assert_eq!(len, 14);
//! ```

#![deny(unsafe_code)]
#![no_std]

pub mod snapshot;

pub mod prelude {
    pub use crate::snapshot::prelude::*;
}
