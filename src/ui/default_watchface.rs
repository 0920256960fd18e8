//! Default watchface
//!
//! Three centered lines: date, clock and battery charge. Ambient mode drops
//! the seconds and the battery line.

use core::fmt::{self, Write};

use super::{OutputSurface, RenderContext, RenderMode, WatchFace};
use crate::{
    battery::{battery_percent_or_default, BatteryProvider},
    config::{Palette, WatchConfig},
    locale::{month_abbrev, weekday_abbrev, Translate, Untranslated},
    markup::{write_line, FontFace, LineStyle, LINE_BREAK},
    text::DisplayText,
    time::TimeSnapshot,
};

const HEADER_FONT_SIZE: u8 = 34;
const BODY_FONT_SIZE: u8 = 70;
const FOOTER_FONT_SIZE: u8 = 30;

/// Basic default watchface
pub struct DefaultWatchface<B, L = Untranslated> {
    battery: B,
    locale: L,
    config: WatchConfig,
}

/// The renderer the watch app drives on each tick.
pub type WatchRenderer<B, L = Untranslated> = DefaultWatchface<B, L>;

impl<B: BatteryProvider> DefaultWatchface<B> {
    /// Create new watchface with untranslated names and the default configuration
    pub fn new(battery: B) -> Self {
        Self::with_locale(battery, Untranslated, WatchConfig::default())
    }
}

impl<B: BatteryProvider, L: Translate> DefaultWatchface<B, L> {
    pub fn with_locale(battery: B, locale: L, config: WatchConfig) -> Self {
        Self {
            battery,
            locale,
            config,
        }
    }

    pub fn battery_mut(&mut self) -> &mut B {
        &mut self.battery
    }

    pub fn locale_mut(&mut self) -> &mut L {
        &mut self.locale
    }

    pub fn config(&self) -> &WatchConfig {
        &self.config
    }

    /// Render and replace the text of the surface bound to `ctx`.
    ///
    /// Without a bound surface the text is still produced and returned.
    pub fn render_into<S: OutputSurface>(
        &mut self,
        ctx: &mut RenderContext<S>,
        snapshot: &TimeSnapshot,
        mode: RenderMode,
    ) -> DisplayText {
        let text = self.render(snapshot, mode);
        ctx.set_mode(mode);
        if !ctx.show(&text) {
            log_debug!("No output surface, skipping display update");
        }
        text
    }
}

impl<B: BatteryProvider, L: Translate> WatchFace for DefaultWatchface<B, L> {
    fn render(&mut self, snapshot: &TimeSnapshot, mode: RenderMode) -> DisplayText {
        // Ambient mode shows no battery, so don't wake the provider
        let battery = match mode {
            RenderMode::Active => battery_percent_or_default(&mut self.battery),
            RenderMode::Ambient => 0,
        };
        let palette = match mode {
            RenderMode::Active => &self.config.active,
            RenderMode::Ambient => &self.config.ambient,
        };
        format_watch_text(snapshot, mode, battery, &self.locale, palette)
    }
}

/// Format the watch face text for a snapshot.
///
/// `battery` is only shown in [`RenderMode::Active`].
pub fn format_watch_text<L: Translate + ?Sized>(
    snapshot: &TimeSnapshot,
    mode: RenderMode,
    battery: u8,
    locale: &L,
    palette: &Palette,
) -> DisplayText {
    let mut text = DisplayText::new();
    // DisplayText absorbs overflow, so writing cannot fail
    let _ = write_watch_text(&mut text, snapshot, mode, battery, locale, palette);
    if text.is_truncated() {
        log_warn!("Watch text truncated to {} bytes", text.len());
    }
    text
}

fn write_watch_text<L: Translate + ?Sized>(
    out: &mut DisplayText,
    snapshot: &TimeSnapshot,
    mode: RenderMode,
    battery: u8,
    locale: &L,
    palette: &Palette,
) -> fmt::Result {
    let day_name = locale.translate(weekday_abbrev(snapshot.day_of_week()));
    let month_name = locale.translate(month_abbrev(snapshot.month()));

    let header = LineStyle::new(FontFace::Sans, HEADER_FONT_SIZE, palette.header);
    let body = LineStyle::new(FontFace::Mono, BODY_FONT_SIZE, palette.body);
    let footer = LineStyle::new(FontFace::Sans, FOOTER_FONT_SIZE, palette.footer);

    write_line(
        out,
        header,
        format_args!("{} {} {}", day_name, snapshot.day(), month_name),
    )?;
    out.write_str(LINE_BREAK)?;

    match mode {
        RenderMode::Active => {
            write_line(
                out,
                body,
                format_args!(
                    "{:02}:{:02}:{:02}",
                    snapshot.hour24(),
                    snapshot.minute(),
                    snapshot.second()
                ),
            )?;
            out.write_str(LINE_BREAK)?;
            write_line(out, footer, format_args!("{}%", battery))
        }
        RenderMode::Ambient => write_line(
            out,
            body,
            format_args!("{:02}:{:02}", snapshot.hour24(), snapshot.minute()),
        ),
    }
}
