//! UI definitions module

use core::fmt;

use crate::{
    config::{ACTIVE_TICK_SECS, AMBIENT_TICK_SECS},
    text::DisplayText,
    time::TimeSnapshot,
};

mod default_watchface;

pub use default_watchface::{format_watch_text, DefaultWatchface, WatchRenderer};

pub trait WatchFace {
    /// Format the watch face for a tick
    fn render(&mut self, snapshot: &TimeSnapshot, mode: RenderMode) -> DisplayText;
}

/// Display mode of the watch
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    #[default]
    Active,
    /// Low-power mode with reduced content
    Ambient,
}

impl RenderMode {
    pub fn from_ambient(ambient: bool) -> Self {
        if ambient {
            RenderMode::Ambient
        } else {
            RenderMode::Active
        }
    }

    pub fn is_ambient(self) -> bool {
        self == RenderMode::Ambient
    }

    /// Seconds between two ticks in this mode
    pub fn tick_period_secs(self) -> u64 {
        match self {
            RenderMode::Active => ACTIVE_TICK_SECS,
            RenderMode::Ambient => AMBIENT_TICK_SECS,
        }
    }

    /// Seconds from `snapshot` to the next tick boundary of this mode.
    ///
    /// Ambient ticks land on the start of a minute, active ticks on the next second.
    pub fn secs_until_next_tick(self, snapshot: &TimeSnapshot) -> u64 {
        let period = self.tick_period_secs();
        period - u64::from(snapshot.second()) % period
    }
}

/// Whether a tick at `snapshot` changes what is shown since the frame at `prev`.
///
/// Ambient frames only show the minute, so they are compared by minute, not by
/// second. A late wake-up that skips the first second of a minute still redraws.
pub fn should_render(
    prev: Option<&TimeSnapshot>,
    snapshot: &TimeSnapshot,
    mode: RenderMode,
) -> bool {
    let Some(prev) = prev else {
        return true;
    };
    match mode {
        RenderMode::Active => prev != snapshot,
        RenderMode::Ambient => {
            (prev.hour24(), prev.minute(), prev.day(), prev.month())
                != (snapshot.hour24(), snapshot.minute(), snapshot.day(), snapshot.month())
        }
    }
}

#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceError {
    /// The host did not provide a window
    Unavailable,
    /// The display could not be initialized
    InitFailed,
}

impl fmt::Display for SurfaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SurfaceError::Unavailable => f.write_str("output surface unavailable"),
            SurfaceError::InitFailed => f.write_str("output surface initialization failed"),
        }
    }
}

/// Element the watch face text is shown on.
pub trait OutputSurface {
    /// Replace the whole text of the surface
    fn set_text(&mut self, text: &str);
}

impl<S: OutputSurface + ?Sized> OutputSurface for &mut S {
    fn set_text(&mut self, text: &str) {
        (**self).set_text(text)
    }
}

/// State carried between ticks: the bound surface and the last known mode.
#[derive(Debug)]
pub struct RenderContext<S> {
    surface: Option<S>,
    mode: RenderMode,
}

impl<S> Default for RenderContext<S> {
    fn default() -> Self {
        Self::unbound()
    }
}

impl<S: OutputSurface> RenderContext<S> {
    pub fn new(surface: S) -> Self {
        Self {
            surface: Some(surface),
            mode: RenderMode::Active,
        }
    }

    /// Push text to the surface. Returns `false` if no surface is bound.
    pub fn show(&mut self, text: &DisplayText) -> bool {
        match self.surface.as_mut() {
            Some(surface) => {
                surface.set_text(text.as_str());
                true
            }
            None => false,
        }
    }
}

impl<S> RenderContext<S> {
    /// Context without a surface, rendering only produces text
    pub fn unbound() -> Self {
        Self {
            surface: None,
            mode: RenderMode::Active,
        }
    }

    pub fn bind(&mut self, surface: S) {
        self.surface = Some(surface);
    }

    /// Detach the surface, handing it back to the caller
    pub fn release(&mut self) -> Option<S> {
        self.surface.take()
    }

    pub fn is_bound(&self) -> bool {
        self.surface.is_some()
    }

    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    pub fn surface_mut(&mut self) -> Option<&mut S> {
        self.surface.as_mut()
    }

    pub fn mode(&self) -> RenderMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: RenderMode) {
        self.mode = mode;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(h: u8, m: u8, s: u8) -> TimeSnapshot {
        TimeSnapshot::new(h, m, s, 31, 12, 6).unwrap()
    }

    #[test]
    fn first_frame_always_renders() {
        assert!(should_render(None, &at(10, 0, 30), RenderMode::Active));
        assert!(should_render(None, &at(10, 0, 30), RenderMode::Ambient));
    }

    #[test]
    fn ambient_redraws_when_the_first_second_of_a_minute_is_skipped() {
        let mut shown = Some(at(10, 0, 59));
        let mut frames = 0;
        // Wake-ups at :58 and :59, then a late one that lands on :01
        for snapshot in [at(10, 0, 58), at(10, 0, 59), at(10, 1, 1), at(10, 1, 30)] {
            if should_render(shown.as_ref(), &snapshot, RenderMode::Ambient) {
                shown = Some(snapshot);
                frames += 1;
            }
        }
        assert_eq!(frames, 1);
        assert_eq!(shown.map(|s| s.minute()), Some(1));
    }

    #[test]
    fn ambient_redraws_across_midnight() {
        let before = at(23, 59, 10);
        let after = TimeSnapshot::new(0, 0, 2, 1, 1, 0).unwrap();
        assert!(should_render(Some(&before), &after, RenderMode::Ambient));
    }

    #[test]
    fn active_skips_repeated_seconds_only() {
        let shown = at(10, 0, 5);
        assert!(!should_render(Some(&shown), &at(10, 0, 5), RenderMode::Active));
        assert!(should_render(Some(&shown), &at(10, 0, 7), RenderMode::Active));
    }

    #[test]
    fn next_tick_is_aligned_to_the_mode_period() {
        assert_eq!(RenderMode::Active.secs_until_next_tick(&at(10, 0, 42)), 1);
        assert_eq!(RenderMode::Ambient.secs_until_next_tick(&at(10, 0, 0)), 60);
        assert_eq!(RenderMode::Ambient.secs_until_next_tick(&at(10, 0, 1)), 59);
        assert_eq!(RenderMode::Ambient.secs_until_next_tick(&at(10, 0, 59)), 1);
    }
}
