//! Side button

use debouncr::{debounce_2, Debouncer, Edge, Repeat2};
use embassy_nrf::gpio::{AnyPin, Input, Output};
use embassy_time::{Duration, Timer};

pub struct Button<'a> {
    /// Button detection pin (high/low)
    pin_button: Input<'a, AnyPin>,
    /// Button enable pin
    pin_enable: Output<'a, AnyPin>,
    debouncer: Debouncer<u8, Repeat2>,
}

impl<'a> Button<'a> {
    pub fn new(pin_button: Input<'a, AnyPin>, pin_enable: Output<'a, AnyPin>) -> Self {
        Self {
            pin_button,
            pin_enable,
            debouncer: debounce_2(false),
        }
    }

    /// Poll the button, returning `true` on a debounced press
    pub async fn pressed(&mut self) -> bool {
        self.pin_enable.set_high();
        // The button needs a short time to give stable outputs
        Timer::after(Duration::from_nanos(1)).await;

        let edge = self.debouncer.update(self.pin_button.is_high());

        // Button consumes around 34µA when P0.15 is left high.
        self.pin_enable.set_low();

        edge == Some(Edge::Rising)
    }
}
