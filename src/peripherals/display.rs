//! LCD label
//!
//! Draws the watch face markup onto the ST7789, one centered line per
//! markup line, inside the middle half of the screen.

use display_interface_spi::SPIInterface;
use embassy_nrf::{
    gpio::{AnyPin, Output},
    peripherals::SPI2,
    spim::Spim,
};
use embassy_time::Delay;
use embedded_graphics::{
    mono_font::{MonoFont, MonoTextStyle},
    pixelcolor::Rgb565,
    prelude::*,
    primitives::Rectangle,
    text::{Alignment, Baseline, Text, TextStyleBuilder},
};
use mipidsi::{models::ST7789, Builder, Orientation};
use profont::{PROFONT_14_POINT, PROFONT_18_POINT, PROFONT_24_POINT};

use pinetime_watchface::{markup, OutputSurface, SurfaceError};

const LCD_W: u16 = 240;
const LCD_H: u16 = 240;

/// Gap between two lines in pixels
const LINE_SPACING: i32 = 6;

const BACKGROUND: Rgb565 = Rgb565::BLACK;

/// Label area: full width, half the height, a quarter down from the top
const LABEL_AREA: Rectangle = Rectangle::new(
    Point::new(0, LCD_H as i32 / 4),
    Size::new(LCD_W as u32, LCD_H as u32 / 2),
);

type Lcd = mipidsi::Display<
    SPIInterface<Spim<'static, SPI2>, Output<'static, AnyPin>, Output<'static, AnyPin>>,
    ST7789,
    Output<'static, AnyPin>,
>;

pub struct LcdLabel {
    lcd: Lcd,
}

impl LcdLabel {
    /// Initialize the display and clear it
    pub fn init(
        spim: Spim<'static, SPI2>,
        cs: Output<'static, AnyPin>,
        dc: Output<'static, AnyPin>,
        rst: Output<'static, AnyPin>,
    ) -> Result<Self, SurfaceError> {
        let lcd = Builder::st7789(SPIInterface::new(spim, dc, cs))
            .with_display_size(LCD_W, LCD_H)
            .with_orientation(Orientation::Portrait(false))
            .init(&mut Delay, Some(rst))
            .map_err(|_| SurfaceError::InitFailed)?;

        let mut label = Self { lcd };
        label
            .lcd
            .clear(BACKGROUND)
            .map_err(|_| SurfaceError::InitFailed)?;
        Ok(label)
    }
}

impl OutputSurface for LcdLabel {
    fn set_text(&mut self, text: &str) {
        if self.lcd.fill_solid(&LABEL_AREA, BACKGROUND).is_err() {
            defmt::warn!("Failed to clear label area");
            return;
        }

        let text_style = TextStyleBuilder::new()
            .alignment(Alignment::Center)
            .baseline(Baseline::Top)
            .build();
        let center_x = LCD_W as i32 / 2;
        let mut y = LABEL_AREA.top_left.y;

        for line in markup::lines(text) {
            let font = font_for_size(line.style.size);
            let color = Rgb565::from(line.style.color);
            let character_style = MonoTextStyle::new(font, color);

            let drawn = Text::with_text_style(
                line.text,
                Point::new(center_x, y),
                character_style,
                text_style,
            )
            .draw(&mut self.lcd);
            if drawn.is_err() {
                defmt::warn!("Failed to draw label line");
                return;
            }
            y += font.character_size.height as i32 + LINE_SPACING;
        }
    }
}

/// Closest ProFont for a markup font size
fn font_for_size(size: u8) -> &'static MonoFont<'static> {
    match size {
        0..=31 => &PROFONT_14_POINT,
        32..=47 => &PROFONT_18_POINT,
        _ => &PROFONT_24_POINT,
    }
}
