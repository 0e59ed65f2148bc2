//! Controller example: a simulated bus master polling the peripheral
//!
//! This example demonstrates:
//! - Building the peripheral storage with the reference register map
//! - Running the production cycle one field at a time
//! - Servicing controller transactions between fields
//! - Decoding the big-endian block read on the controller side
//! - Mode/config writes preempting the cycle in progress

use embedded_snapshot::prelude::*;

/// Fake receiver that walks north-east a little every cycle.
struct DriftingFix {
    latitude: u32,
    longitude: i32,
    speed: u16,
}

impl MeasurementSource for DriftingFix {
    fn status(&mut self) -> u8 {
        0x01
    }

    fn latitude(&mut self) -> u32 {
        self.latitude += 3;
        self.latitude
    }

    fn longitude(&mut self) -> i32 {
        self.longitude += 5;
        self.longitude
    }

    fn speed(&mut self) -> u16 {
        self.speed = self.speed.wrapping_add(1);
        self.speed
    }
}

/// Controller-side view of the 14-byte map.
#[derive(Debug)]
struct Reading {
    status: u8,
    latitude: u32,
    longitude: i32,
    speed: u16,
    mode: u8,
    config: u8,
    id: u8,
}

impl Reading {
    fn decode(raw: &[u8; 14]) -> Self {
        Self {
            status: raw[0],
            latitude: u32::from_be_bytes([raw[1], raw[2], raw[3], raw[4]]),
            longitude: i32::from_be_bytes([raw[5], raw[6], raw[7], raw[8]]),
            speed: u16::from_be_bytes([raw[9], raw[10]]),
            mode: raw[11],
            config: raw[12],
            id: raw[13],
        }
    }
}

fn main() {
    println!("=== Controller Example ===\n");

    let storage = SnapshotStorageBuilder::new()
        .default_identification()
        .default_access()
        .no_signal()
        .build()
        .unwrap();
    println!("Peripheral answering on 0x{:02X}", storage.bus_address());

    let producer = storage.producer();
    let bus = storage.bus();
    let mut cycle = ProductionCycle::new(DriftingFix {
        latitude: 515_000_000,
        longitude: -1_270_000,
        speed: 0,
    });

    let mut test = 0u8;
    for tick in 0..24 {
        let outcome = cycle.step(&producer).unwrap();
        println!("tick {tick:2}: {outcome:?}");

        // Controller polls every third tick
        if tick % 3 == 2 {
            if !bus.is_ready() {
                println!("         no fresh snapshot yet");
                continue;
            }

            let mut raw = [0u8; 14];
            bus.on_receive([0x00]);
            let len = bus.on_request(&mut raw);
            assert_eq!(len, 14);
            println!("         {:?}", Reading::decode(&raw));

            // Write mode and config as one transaction
            bus.on_receive([0x0B, test, test.wrapping_add(1)]);
            println!("         wrote mode={test} config={}", test.wrapping_add(1));
            test = test.wrapping_add(1);
        }
    }

    let stats = cycle.stats();
    println!(
        "\nCommitted {} cycle(s), restarted {} time(s)",
        stats.committed, stats.restarted
    );
}
