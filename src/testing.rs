use embedded_hal::adc::{Channel, OneShot};
use embedded_hal_mock::adc::MockAdc;

/// ADC whose conversions are never ready on the first attempt: every
/// read of a new value returns `WouldBlock` once before yielding it.
pub struct SlowAdc {
    values: Vec<u16>,
    ready: bool,
    pub attempts: usize,
}

impl SlowAdc {
    pub fn new(values: &[u16]) -> Self {
        Self {
            values: values.iter().rev().copied().collect(),
            ready: false,
            attempts: 0,
        }
    }

    pub fn remaining(&self) -> usize {
        self.values.len()
    }
}

impl<Pin> OneShot<MockAdc, u16, Pin> for SlowAdc
where
    Pin: Channel<MockAdc>,
{
    type Error = ();

    fn read(&mut self, _pin: &mut Pin) -> nb::Result<u16, Self::Error> {
        self.attempts += 1;

        if !self.ready {
            self.ready = true;
            return Err(nb::Error::WouldBlock);
        }

        self.ready = false;
        self.values.pop().ok_or(nb::Error::Other(()))
    }
}
