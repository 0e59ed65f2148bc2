use crate::snapshot::{
    SnapshotError,
    image::RegisterImage,
    map::{LATITUDE, LONGITUDE, SPEED, STATUS},
};

/// One cycle's worth of read-only measurement fields.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Measurements {
    pub status: u8,
    pub latitude: u32,
    pub longitude: i32,
    pub speed: u16,
}

impl Measurements {
    /// Writes all four fields into `image`, big-endian and contiguous from `STATUS`.
    pub fn store<const N: usize>(&self, image: &mut RegisterImage<N>) -> Result<(), SnapshotError> {
        image.set(STATUS, self.status)?;
        image.write_u32_be_at(LATITUDE, self.latitude)?;
        image.write_i32_be_at(LONGITUDE, self.longitude)?;
        image.write_u16_be_at(SPEED, self.speed)?;
        Ok(())
    }

    /// Reads the four fields back out of `image`.
    pub fn load<const N: usize>(image: &RegisterImage<N>) -> Result<Self, SnapshotError> {
        Ok(Self {
            status: image.get(STATUS)?,
            latitude: image.read_u32_be_at(LATITUDE)?,
            longitude: image.read_i32_be_at(LONGITUDE)?,
            speed: image.read_u16_be_at(SPEED)?,
        })
    }
}

/// Produces the measurement fields, one field per call.
///
/// The production cycle calls these in order and may abandon a cycle between
/// any two calls, so implementations must not rely on seeing a full sequence.
pub trait MeasurementSource {
    fn status(&mut self) -> u8;
    fn latitude(&mut self) -> u32;
    fn longitude(&mut self) -> i32;
    fn speed(&mut self) -> u16;
}

/// Source that always reports the same values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedMeasurements(pub Measurements);

impl FixedMeasurements {
    /// Values that fill registers 0x00..=0x0A with the bytes 0x00..=0x0A.
    pub const REFERENCE: Self = Self(Measurements {
        status: 0x00,
        latitude: 16_909_060,
        longitude: 84_281_096,
        speed: 2314,
    });
}

impl Default for FixedMeasurements {
    fn default() -> Self {
        Self::REFERENCE
    }
}

impl MeasurementSource for FixedMeasurements {
    fn status(&mut self) -> u8 {
        self.0.status
    }

    fn latitude(&mut self) -> u32 {
        self.0.latitude
    }

    fn longitude(&mut self) -> i32 {
        self.0.longitude
    }

    fn speed(&mut self) -> u16 {
        self.0.speed
    }
}
