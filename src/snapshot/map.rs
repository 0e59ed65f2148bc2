//! Register map layout shared by the peripheral and its controller.
//!
//! ```text
//! 0x00        status
//! 0x01..=0x04 latitude   u32, MSB first
//! 0x05..=0x08 longitude  i32, MSB first
//! 0x09..=0x0A speed      u16, MSB first
//! 0x0B        mode           (writable)
//! 0x0C        configuration  (writable)
//! 0x0D        identification (read-only)
//! ```

/// Number of addressable bytes in the register map.
pub const REG_MAP_SIZE: usize = 14;

/// Largest inbound payload retained by the decoder; extra bytes are drained.
pub const MAX_SENT_BYTES: usize = 3;

pub const STATUS: u8 = 0x00;
pub const LATITUDE: u8 = 0x01;
pub const LONGITUDE: u8 = 0x05;
pub const SPEED: u8 = 0x09;
pub const MODE: u8 = 0x0B;
pub const CONFIG: u8 = 0x0C;
pub const IDENTIFICATION: u8 = 0x0D;

/// Returns true for the registers the controller may ever write.
///
/// An [`AccessPolicy`](crate::snapshot::AccessPolicy) can only narrow this set.
pub const fn is_mutable(addr: u8) -> bool {
    matches!(addr, MODE | CONFIG)
}

/// Identification byte reported by the reference peripheral.
pub const DEFAULT_IDENTIFICATION: u8 = 0x0D;

/// Default 7-bit bus address of the peripheral.
pub const DEFAULT_BUS_ADDRESS: u8 = 0x29;

const _: () = assert!((IDENTIFICATION as usize) < REG_MAP_SIZE);

#[test]
fn layout_is_contiguous() {
    assert_eq!(LATITUDE as usize, STATUS as usize + 1);
    assert_eq!(LONGITUDE as usize, LATITUDE as usize + 4);
    assert_eq!(SPEED as usize, LONGITUDE as usize + 4);
    assert_eq!(MODE as usize, SPEED as usize + 2);
    assert_eq!(CONFIG as usize, MODE as usize + 1);
    assert_eq!(IDENTIFICATION as usize, CONFIG as usize + 1);
    assert_eq!(REG_MAP_SIZE, IDENTIFICATION as usize + 1);
}
