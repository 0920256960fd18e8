//! Battery measurement
//!
//! Samples the battery voltage divider on P0.31 and the charge indication
//! pin. Conversion to a charge level happens in the library's `BatteryStatus`.

use embassy_nrf::{
    gpio::{AnyPin, Input},
    saadc::Saadc,
};

/// One raw battery reading
#[derive(Debug, Clone, Copy, defmt::Format)]
pub struct BatterySample {
    /// 12-bit SAADC value
    pub raw: i16,
    pub charging: bool,
}

pub struct BatteryMonitor<'a> {
    /// ADC instance for battery voltage measurement
    saadc: Saadc<'a, 1>,
    /// Charge indication pin:
    /// high = battery, low = charging
    pin_charge_indication: Input<'a, AnyPin>,
}

impl<'a> BatteryMonitor<'a> {
    pub fn new(saadc: Saadc<'a, 1>, pin_charge_indication: Input<'a, AnyPin>) -> Self {
        Self {
            saadc,
            pin_charge_indication,
        }
    }

    /// Take a reading from the hardware
    pub async fn sample(&mut self) -> BatterySample {
        let mut buf = [0; 1];
        self.saadc.sample(&mut buf).await;
        BatterySample {
            raw: buf[0],
            charging: self.pin_charge_indication.is_low(),
        }
    }
}
