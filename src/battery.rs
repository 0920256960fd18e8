//! Battery status
//!
//! Voltage conversion and charge curve based upon
//! https://wiki.pine64.org/wiki/PineTime.

use core::fmt;

/// Upper bound of the 12-bit SAADC
const ADC_MAX: i16 = 4095;

#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatteryError {
    /// No valid measurement has been taken yet
    NotSampled,
    /// ADC reading outside the 12-bit range
    InvalidMeasurement,
}

impl fmt::Display for BatteryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BatteryError::NotSampled => f.write_str("battery not sampled"),
            BatteryError::InvalidMeasurement => f.write_str("invalid battery measurement"),
        }
    }
}

/// Source of the battery charge level.
pub trait BatteryProvider {
    /// Battery charge in percent (0–100)
    fn percent(&mut self) -> Result<u8, BatteryError>;
}

impl<P: BatteryProvider + ?Sized> BatteryProvider for &mut P {
    fn percent(&mut self) -> Result<u8, BatteryError> {
        (**self).percent()
    }
}

/// Query the provider, falling back to 0 when it fails.
pub fn battery_percent_or_default<P: BatteryProvider + ?Sized>(provider: &mut P) -> u8 {
    match provider.percent() {
        Ok(percent) if percent > 100 => {
            log_warn!("Battery reported {}%, clamping to 100", percent);
            100
        }
        Ok(percent) => percent,
        Err(err) => {
            log_error!("Failed to get battery information ({})", err);
            0
        }
    }
}

/// Convert a SAADC sample into the battery voltage in millivolts.
pub fn millivolts_from_adc(raw_measurement: i16) -> Result<u16, BatteryError> {
    if !(0..=ADC_MAX).contains(&raw_measurement) {
        return Err(BatteryError::InvalidMeasurement);
    }
    // Voltage divider halves the battery voltage, reference is 3.3 V over 4096 steps.
    // Keep as 32 bit for multiplication.
    let adc_val = raw_measurement as u32;
    Ok((adc_val * 2000 / 1241) as u16)
}

/// Estimate the charge from the battery voltage.
///
/// Fixed data points with linear interpolation in between.
pub fn percent_from_millivolts(voltage: u16) -> u8 {
    (match voltage {
        0..=3449 => 0,
        3450..=3699 => (voltage - 3450) / 5,
        3700..=4199 => 50 + (voltage - 3700) / 10,
        _ => 100,
    }) as u8
}

/// Last measured battery state.
///
/// The firmware samples the ADC in its own task and feeds the readings in
/// with [`BatteryStatus::update`]; the renderer reads the cached value.
#[derive(Debug, Default, Clone, Copy)]
pub struct BatteryStatus {
    /// Battery voltage in millivolts, `None` until the first valid sample
    voltage: Option<u16>,
    /// Charging state
    charging: bool,
}

impl BatteryStatus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a new measurement. Returns whether the values changed.
    ///
    /// An invalid sample leaves the stored voltage untouched.
    pub fn update(&mut self, raw_measurement: i16, charging: bool) -> Result<bool, BatteryError> {
        let mut changed = false;

        if charging != self.charging {
            self.charging = charging;
            changed = true;
        }

        let voltage = millivolts_from_adc(raw_measurement)?;
        if self.voltage != Some(voltage) {
            self.voltage = Some(voltage);
            changed = true;
        }

        Ok(changed)
    }

    /// Whether the watch is currently charging.
    pub fn is_charging(&self) -> bool {
        self.charging
    }

    /// Last battery voltage in millivolts.
    pub fn voltage(&self) -> Option<u16> {
        self.voltage
    }
}

impl BatteryProvider for BatteryStatus {
    fn percent(&mut self) -> Result<u8, BatteryError> {
        self.voltage
            .map(percent_from_millivolts)
            .ok_or(BatteryError::NotSampled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(Result<u8, BatteryError>);

    impl BatteryProvider for Fixed {
        fn percent(&mut self) -> Result<u8, BatteryError> {
            self.0
        }
    }

    #[test]
    fn failure_falls_back_to_zero() {
        assert_eq!(battery_percent_or_default(&mut Fixed(Err(BatteryError::NotSampled))), 0);
        assert_eq!(
            battery_percent_or_default(&mut Fixed(Err(BatteryError::InvalidMeasurement))),
            0
        );
    }

    #[test]
    fn readings_pass_through_and_clamp() {
        assert_eq!(battery_percent_or_default(&mut Fixed(Ok(64))), 64);
        assert_eq!(battery_percent_or_default(&mut Fixed(Ok(100))), 100);
        assert_eq!(battery_percent_or_default(&mut Fixed(Ok(180))), 100);
    }

    #[test]
    fn adc_conversion() {
        assert_eq!(millivolts_from_adc(0), Ok(0));
        assert_eq!(millivolts_from_adc(1241), Ok(2000));
        assert_eq!(millivolts_from_adc(4095), Ok(6599));
        assert_eq!(millivolts_from_adc(-1), Err(BatteryError::InvalidMeasurement));
        assert_eq!(millivolts_from_adc(4096), Err(BatteryError::InvalidMeasurement));
    }

    #[test]
    fn charge_curve() {
        assert_eq!(percent_from_millivolts(3000), 0);
        assert_eq!(percent_from_millivolts(3449), 0);
        assert_eq!(percent_from_millivolts(3450), 0);
        assert_eq!(percent_from_millivolts(3575), 25);
        assert_eq!(percent_from_millivolts(3700), 50);
        assert_eq!(percent_from_millivolts(3950), 75);
        assert_eq!(percent_from_millivolts(4199), 99);
        assert_eq!(percent_from_millivolts(4200), 100);
        assert_eq!(percent_from_millivolts(u16::MAX), 100);
    }

    #[test]
    fn status_tracks_changes() {
        let mut status = BatteryStatus::new();
        assert_eq!(status.percent(), Err(BatteryError::NotSampled));

        // 2358 raw is 3800 mV
        assert_eq!(status.update(2358, false), Ok(true));
        assert_eq!(status.voltage(), Some(3800));
        assert_eq!(status.percent(), Ok(60));
        assert_eq!(status.update(2358, false), Ok(false));

        assert_eq!(status.update(2358, true), Ok(true));
        assert!(status.is_charging());

        // Invalid reading keeps the last voltage
        assert_eq!(status.update(5000, true), Err(BatteryError::InvalidMeasurement));
        assert_eq!(status.voltage(), Some(3800));
    }
}
