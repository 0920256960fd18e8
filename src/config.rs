//! Watch face configuration

use embedded_graphics::pixelcolor::Rgb888;

/// Capacity of the rendered text in bytes
pub const TEXT_BUF_SIZE: usize = 256;

/// Redraw period while the watch is active
pub const ACTIVE_TICK_SECS: u64 = 1;

/// Redraw period in ambient (low-power) mode
pub const AMBIENT_TICK_SECS: u64 = 60;

/// UTC+1
pub const DEFAULT_TIMEZONE_OFFSET_SECS: i32 = 1 * 3_600;

/// Text colors for the three lines of the watch face.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Date line
    pub header: Rgb888,
    /// Clock line
    pub body: Rgb888,
    /// Battery line, unused in ambient mode
    pub footer: Rgb888,
}

pub const ACTIVE_PALETTE: Palette = Palette {
    header: Rgb888::new(0x8e, 0x8e, 0x8e),
    body: Rgb888::new(0xff, 0xff, 0xff),
    footer: Rgb888::new(0x4c, 0xaf, 0x50),
};

pub const AMBIENT_PALETTE: Palette = Palette {
    header: Rgb888::new(0x1c, 0x1c, 0x1c),
    body: Rgb888::new(0x5a, 0x5a, 0x5a),
    footer: Rgb888::new(0x1c, 0x1c, 0x1c),
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WatchConfig {
    /// Offset of local time from UTC
    pub timezone_offset_secs: i32,
    pub active: Palette,
    pub ambient: Palette,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            timezone_offset_secs: DEFAULT_TIMEZONE_OFFSET_SECS,
            active: ACTIVE_PALETTE,
            ambient: AMBIENT_PALETTE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn active_lines_have_distinct_colors() {
        let p = ACTIVE_PALETTE;
        assert_ne!(p.header, p.body);
        assert_ne!(p.body, p.footer);
        assert_ne!(p.header, p.footer);
    }
}
