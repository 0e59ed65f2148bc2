use crate::snapshot::decoder::Decoded;

/// Bus event handlers invoked by the transport layer.
///
/// The transport calls these from its receive/request callbacks. They are
/// never invoked concurrently with each other.
pub trait TransferCoordinator {
    /// Called when the controller wrote bytes to the peripheral.
    ///
    /// `bytes` must yield the whole transaction; bytes past the retained
    /// payload length are consumed and discarded.
    fn on_receive<I>(&self, bytes: I) -> Decoded
    where
        I: IntoIterator<Item = u8>;

    /// Called when the controller reads; fills `tx` and returns the byte count.
    fn on_request(&self, tx: &mut [u8]) -> usize;
}
