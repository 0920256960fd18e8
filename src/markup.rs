//! Label markup
//!
//! The watch face text is a small markup language understood by the label:
//!
//! ```text
//! <font=Sans font_size=34 color=#8e8e8e><align=center>Sat 31 Dec</align></font><br/>
//! <font=Mono font_size=70 color=#ffffff><align=center>23:59:59</align></font>
//! ```
//!
//! [`write_line`] produces one such line, [`lines`] reads them back for
//! surfaces that draw the text themselves.

use core::fmt::{self, Write};

use embedded_graphics::pixelcolor::{Rgb888, RgbColor};

pub const LINE_BREAK: &str = "<br/>";

const ALIGN_OPEN: &str = "<align=center>";
const ALIGN_CLOSE: &str = "</align>";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontFace {
    /// Proportional face for date and battery
    Sans,
    /// Fixed-width face for the clock digits
    Mono,
}

impl FontFace {
    pub fn name(self) -> &'static str {
        match self {
            FontFace::Sans => "Sans",
            FontFace::Mono => "Mono",
        }
    }

    fn from_name(name: &str) -> Option<Self> {
        match name {
            "Sans" => Some(FontFace::Sans),
            "Mono" => Some(FontFace::Mono),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineStyle {
    pub face: FontFace,
    pub size: u8,
    pub color: Rgb888,
}

impl LineStyle {
    pub const fn new(face: FontFace, size: u8, color: Rgb888) -> Self {
        Self { face, size, color }
    }
}

impl Default for LineStyle {
    fn default() -> Self {
        Self::new(FontFace::Sans, 34, Rgb888::WHITE)
    }
}

/// Write one centered line of text in the given style.
pub fn write_line<W: Write>(out: &mut W, style: LineStyle, text: fmt::Arguments<'_>) -> fmt::Result {
    write!(
        out,
        "<font={} font_size={} color=#{:02x}{:02x}{:02x}>{}{}{}</font>",
        style.face.name(),
        style.size,
        style.color.r(),
        style.color.g(),
        style.color.b(),
        ALIGN_OPEN,
        text,
        ALIGN_CLOSE,
    )
}

/// A parsed line of markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkupLine<'a> {
    pub style: LineStyle,
    pub text: &'a str,
}

/// Iterate over the lines of a markup text.
///
/// Truncated markup is accepted: missing attributes use the
/// [`LineStyle::default`] values and text ends at the next tag or at the end
/// of the input.
pub fn lines(markup: &str) -> impl Iterator<Item = MarkupLine<'_>> {
    markup
        .split(LINE_BREAK)
        .filter(|segment| !segment.is_empty())
        .map(parse_line)
}

fn parse_line(segment: &str) -> MarkupLine<'_> {
    let mut style = LineStyle::default();

    // Attributes of the opening font tag
    if let Some(rest) = segment.strip_prefix("<font=") {
        let tag = rest.split('>').next().unwrap_or("");
        let mut attrs = tag.split(' ');
        if let Some(face) = attrs.next().and_then(FontFace::from_name) {
            style.face = face;
        }
        for attr in attrs {
            if let Some(size) = attr.strip_prefix("font_size=") {
                if let Ok(size) = size.parse() {
                    style.size = size;
                }
            } else if let Some(color) = attr.strip_prefix("color=#") {
                if let Some(color) = parse_color(color) {
                    style.color = color;
                }
            }
        }
    }

    let text = match segment.find(ALIGN_OPEN) {
        Some(start) => {
            let body = &segment[start + ALIGN_OPEN.len()..];
            body.split('<').next().unwrap_or("")
        }
        // No alignment tag: text follows the font tag
        None => segment
            .rsplit('>')
            .next()
            .map(|tail| tail.split('<').next().unwrap_or(""))
            .unwrap_or(""),
    };

    MarkupLine { style, text }
}

fn parse_color(hex: &str) -> Option<Rgb888> {
    let hex = hex.get(..6)?;
    let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
    Some(Rgb888::new(channel(0)?, channel(2)?, channel(4)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::DisplayText;

    #[test]
    fn writes_a_styled_line() {
        let mut out = DisplayText::new();
        let style = LineStyle::new(FontFace::Mono, 70, Rgb888::new(0x8e, 0x8e, 0x8e));
        write_line(&mut out, style, format_args!("{:02}:{:02}", 9, 3)).unwrap();
        assert_eq!(
            out.as_str(),
            "<font=Mono font_size=70 color=#8e8e8e><align=center>09:03</align></font>"
        );
    }

    #[test]
    fn parses_written_lines() {
        let mut out = DisplayText::new();
        let header = LineStyle::new(FontFace::Sans, 34, Rgb888::new(0x12, 0xab, 0xef));
        let body = LineStyle::new(FontFace::Mono, 70, Rgb888::WHITE);
        write_line(&mut out, header, format_args!("Sun 3 Mar")).unwrap();
        out.write_str(LINE_BREAK).unwrap();
        write_line(&mut out, body, format_args!("12:34")).unwrap();

        let parsed: Vec<_> = lines(out.as_str()).collect();
        assert_eq!(
            parsed,
            vec![
                MarkupLine { style: header, text: "Sun 3 Mar" },
                MarkupLine { style: body, text: "12:34" },
            ]
        );
    }

    #[test]
    fn tolerates_truncated_markup() {
        let parsed: Vec<_> =
            lines("<font=Sans font_size=30 color=#4caf50><align=center>10").collect();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].text, "10");
        assert_eq!(parsed[0].style.size, 30);

        // Cut inside the opening tag
        let parsed: Vec<_> = lines("<font=Mono font_size=7").collect();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].style.face, FontFace::Mono);
        assert_eq!(parsed[0].style.color, Rgb888::WHITE);
    }

    #[test]
    fn plain_text_is_a_default_line() {
        let parsed: Vec<_> = lines("hello").collect();
        assert_eq!(parsed, vec![MarkupLine { style: LineStyle::default(), text: "hello" }]);
    }

    #[test]
    fn bad_colors_are_ignored() {
        assert_eq!(parse_color("zz0000"), None);
        assert_eq!(parse_color("12"), None);
        assert_eq!(parse_color("102030"), Some(Rgb888::new(0x10, 0x20, 0x30)));
    }
}
