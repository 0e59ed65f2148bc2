mod bus;
mod producer;

pub use bus::BusHandle;
pub use producer::ProducerHandle;
