use embedded_hal::digital::OutputPin;

/// Out-of-band "data ready" indicator.
///
/// Driven after every change of the ready state so a controller can poll the
/// line instead of issuing speculative reads.
pub trait ReadySignal {
    /// Reflects the ready state on the line.
    fn drive(&mut self, ready: bool);
}

/// No-op signal for peripherals without a ready line.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoSignal;

impl ReadySignal for NoSignal {
    fn drive(&mut self, _ready: bool) {}
}

/// Active-low ready line on a GPIO output: low while a snapshot awaits a read.
#[derive(Debug)]
pub struct ActiveLowPin<P: OutputPin> {
    pin: P,
}

impl<P: OutputPin> ActiveLowPin<P> {
    /// Wraps `pin` and parks it high (nothing to read yet).
    pub fn new(mut pin: P) -> Self {
        if pin.set_high().is_err() {
            log::warn!("ready line: failed to park pin high");
        }
        Self { pin }
    }

    /// Releases the underlying pin.
    pub fn into_inner(self) -> P {
        self.pin
    }
}

impl<P: OutputPin> ReadySignal for ActiveLowPin<P> {
    fn drive(&mut self, ready: bool) {
        let result = if ready {
            self.pin.set_low()
        } else {
            self.pin.set_high()
        };
        if result.is_err() {
            log::warn!("ready line: failed to drive pin (ready={ready})");
        }
    }
}
