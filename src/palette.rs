// Copyright (c) 2026 rezky_nightky

//! Display-attribute tags as handed over by the board renderer.
//!
//! A tag is a space separated word list such as `"bold red reverse"` or
//! `"grey54"`. The cascade treats the text as opaque (it only searches it for
//! `red`/`blue` when pulsing), but the terminal needs real colors, so every tag
//! is parsed into a [`CellStyle`] exactly once when it is created.

use std::fmt;
use std::sync::Arc;

use crossterm::style::Color;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CellStyle {
    pub fg: Option<Color>,
    pub bg: Option<Color>,
    pub bold: bool,
    pub reverse: bool,
}

struct TagInner {
    text: Box<str>,
    style: CellStyle,
}

/// Cheaply clonable style tag. Equality is by tag text.
#[derive(Clone)]
pub struct StyleTag(Arc<TagInner>);

impl StyleTag {
    pub fn new(text: &str) -> Self {
        Self(Arc::new(TagInner {
            text: text.into(),
            style: parse_style(text),
        }))
    }

    pub fn as_str(&self) -> &str {
        &self.0.text
    }

    pub fn style(&self) -> CellStyle {
        self.0.style
    }

    /// Case-insensitive substring test on the tag text.
    pub fn mentions(&self, word: &str) -> bool {
        self.0
            .text
            .to_ascii_lowercase()
            .contains(&word.to_ascii_lowercase())
    }
}

impl PartialEq for StyleTag {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0) || self.0.text == other.0.text
    }
}

impl Eq for StyleTag {}

impl fmt::Debug for StyleTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("StyleTag").field(&self.as_str()).finish()
    }
}

fn dist2(r0: u8, g0: u8, b0: u8, r1: u8, g1: u8, b1: u8) -> i32 {
    let dr = (r0 as i32) - (r1 as i32);
    let dg = (g0 as i32) - (g1 as i32);
    let db = (b0 as i32) - (b1 as i32);
    (dr * dr) + (dg * dg) + (db * db)
}

fn rgb_to_ansi256(r: u8, g: u8, b: u8) -> u8 {
    const CUBE_LEVELS: [u8; 6] = [0, 95, 135, 175, 215, 255];

    let r6 = ((r as u16 * 5) + 127) / 255;
    let g6 = ((g as u16 * 5) + 127) / 255;
    let b6 = ((b as u16 * 5) + 127) / 255;
    let cube_idx = 16 + (36 * r6 as u8) + (6 * g6 as u8) + (b6 as u8);
    let cube_dist = dist2(
        r,
        g,
        b,
        CUBE_LEVELS[r6 as usize],
        CUBE_LEVELS[g6 as usize],
        CUBE_LEVELS[b6 as usize],
    );

    let avg = ((r as u16 + g as u16 + b as u16) / 3) as u8;
    let (gray_idx, v) = match avg {
        0..=7 => (16, 0),
        239..=255 => (231, 255),
        _ => {
            let step = (avg - 8) / 10;
            (232 + step, 8 + 10 * step)
        }
    };

    if dist2(r, g, b, v, v, v) < cube_dist {
        gray_idx
    } else {
        cube_idx
    }
}

fn named_color(word: &str) -> Option<Color> {
    let c = match word {
        "black" => Color::Black,
        "red" => Color::DarkRed,
        "green" => Color::DarkGreen,
        "yellow" => Color::DarkYellow,
        "blue" => Color::DarkBlue,
        "magenta" => Color::DarkMagenta,
        "cyan" => Color::DarkCyan,
        "white" => Color::Grey,
        "bright_black" => Color::DarkGrey,
        "bright_red" => Color::Red,
        "bright_green" => Color::Green,
        "bright_yellow" => Color::Yellow,
        "bright_blue" => Color::Blue,
        "bright_magenta" => Color::Magenta,
        "bright_cyan" => Color::Cyan,
        "bright_white" => Color::White,
        _ => return grey_level(word),
    };
    Some(c)
}

fn grey_level(word: &str) -> Option<Color> {
    let pct: u16 = word
        .strip_prefix("grey")
        .or_else(|| word.strip_prefix("gray"))?
        .parse()
        .ok()?;
    if pct > 100 {
        return None;
    }
    let v = ((pct * 255 + 50) / 100) as u8;
    Some(Color::AnsiValue(rgb_to_ansi256(v, v, v)))
}

/// Parses a tag's words. Unknown words are ignored.
pub fn parse_style(text: &str) -> CellStyle {
    let mut style = CellStyle::default();
    let mut words = text.split_whitespace().map(str::to_ascii_lowercase);
    while let Some(word) = words.next() {
        match word.as_str() {
            "bold" => style.bold = true,
            "reverse" => style.reverse = true,
            "on" => {
                if let Some(bg) = words.next().as_deref().and_then(named_color) {
                    style.bg = Some(bg);
                }
            }
            w => {
                if let Some(fg) = named_color(w) {
                    style.fg = Some(fg);
                }
            }
        }
    }
    style
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_renderer_mark_styles() {
        let s = parse_style("bold red reverse");
        assert_eq!(s.fg, Some(Color::DarkRed));
        assert!(s.bold);
        assert!(s.reverse);
        assert_eq!(s.bg, None);

        let s = parse_style("bold bright_blue");
        assert_eq!(s.fg, Some(Color::Blue));
        assert!(!s.reverse);
    }

    #[test]
    fn grey_levels_land_on_the_grey_ramp() {
        for word in ["grey30", "grey42", "grey54", "grey66"] {
            match parse_style(word).fg {
                Some(Color::AnsiValue(v)) => assert!((232..=255).contains(&v), "{word} -> {v}"),
                other => panic!("{word} -> {other:?}"),
            }
        }
        assert_eq!(parse_style("grey0").fg, Some(Color::AnsiValue(16)));
        assert_eq!(parse_style("gray100").fg, Some(Color::AnsiValue(231)));
        assert_eq!(parse_style("grey101").fg, None);
    }

    #[test]
    fn background_and_unknown_words() {
        let s = parse_style("italic yellow on black");
        assert_eq!(s.fg, Some(Color::DarkYellow));
        assert_eq!(s.bg, Some(Color::Black));
        assert_eq!(parse_style("sparkly"), CellStyle::default());
    }

    #[test]
    fn tag_mentions_is_case_insensitive() {
        let tag = StyleTag::new("Bold RED");
        assert!(tag.mentions("red"));
        assert!(!tag.mentions("blue"));
        assert_eq!(tag, StyleTag::new("Bold RED"));
        assert_ne!(tag, StyleTag::new("bold red"));
    }
}
