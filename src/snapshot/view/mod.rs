mod bus;
mod producer;

pub use bus::BusView;
pub use producer::ProducerView;
