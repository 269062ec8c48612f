// Copyright (c) 2026 rezky_nightky

//! The static text the cascade starts from: rows of glyphs plus a parallel
//! per-glyph style matrix.

use crate::frozen::BoardGeometry;
use crate::palette::StyleTag;

#[derive(Clone, Debug, Default)]
pub struct Scene {
    rows: Vec<String>,
    styles: Vec<Vec<Option<StyleTag>>>,
}

/// One visible (non-whitespace) glyph of a scene.
#[derive(Clone, Copy, Debug)]
pub struct Glyph<'a> {
    pub x: usize,
    pub y: usize,
    pub ch: char,
    pub style: Option<&'a StyleTag>,
}

impl Scene {
    /// `styles` is indexed `[row][column]` by char position. Missing rows or
    /// columns read as unstyled.
    pub fn new(rows: Vec<String>, styles: Vec<Vec<Option<StyleTag>>>) -> Self {
        Self { rows, styles }
    }

    pub fn unstyled<I, S>(rows: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            rows: rows.into_iter().map(Into::into).collect(),
            styles: Vec::new(),
        }
    }

    pub fn rows(&self) -> &[String] {
        &self.rows
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn width(&self) -> usize {
        self.rows
            .iter()
            .map(|r| r.chars().count())
            .max()
            .unwrap_or(0)
    }

    pub fn style_at(&self, x: usize, y: usize) -> Option<&StyleTag> {
        self.styles.get(y)?.get(x)?.as_ref()
    }

    /// Visible glyphs in row-major scan order.
    pub fn glyphs(&self) -> impl Iterator<Item = Glyph<'_>> + '_ {
        self.rows.iter().enumerate().flat_map(move |(y, row)| {
            row.chars()
                .enumerate()
                .filter(|(_, ch)| !ch.is_whitespace())
                .map(move |(x, ch)| Glyph {
                    x,
                    y,
                    ch,
                    style: self.style_at(x, y),
                })
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Mark {
    #[default]
    Empty,
    Cross,
    Naught,
}

impl Mark {
    fn label(self) -> &'static str {
        match self {
            Mark::Empty => "",
            Mark::Cross => "X",
            Mark::Naught => "O",
        }
    }
}

const CROSS_ART: [&str; 7] = [
    "███           ███",
    "████         ████",
    "  ████     ████  ",
    "     ███████     ",
    "  ████     ████  ",
    "████         ████",
    "███           ███",
];

const NAUGHT_ART: [&str; 7] = [
    "    █████████    ",
    "  ███       ███  ",
    " ██           ██ ",
    "██             ██",
    " ██           ██ ",
    "  ███       ███  ",
    "    █████████    ",
];

#[derive(Default)]
struct SceneBuilder {
    rows: Vec<String>,
    styles: Vec<Vec<Option<StyleTag>>>,
    row: String,
    row_styles: Vec<Option<StyleTag>>,
}

impl SceneBuilder {
    fn push(&mut self, text: &str, style: Option<&StyleTag>) {
        for ch in text.chars() {
            self.row.push(ch);
            self.row_styles.push(style.cloned());
        }
    }

    fn end_row(&mut self) {
        self.rows.push(std::mem::take(&mut self.row));
        self.styles.push(std::mem::take(&mut self.row_styles));
    }

    fn finish(mut self) -> Scene {
        if !self.row.is_empty() {
            self.end_row();
        }
        Scene::new(self.rows, self.styles)
    }
}

/// Renders a finished 3x3 board: column header, double-line borders, row
/// labels and the 17x7 mark art. Cells listed in `winning` get `reverse`.
///
/// The art is fixed at 17x7, so `geom` should keep the default cell size; the
/// other constants only move the board around.
pub fn board_scene(geom: &BoardGeometry, marks: &[Mark; 9], winning: &[usize]) -> Scene {
    let cw = geom.cell_width;
    let label_pad = " ".repeat(geom.row_label_width);
    let styles = [
        StyleTag::new("bold red"),
        StyleTag::new("bold red reverse"),
        StyleTag::new("bold blue"),
        StyleTag::new("bold blue reverse"),
    ];
    let mut b = SceneBuilder::default();

    for _ in 1..geom.header_height.saturating_sub(geom.border) {
        b.end_row();
    }
    b.push(&label_pad, None);
    b.push(" ", None);
    for (col, label) in ["A", "B", "C"].iter().enumerate() {
        let pad = (cw - 1) / 2;
        b.push(&" ".repeat(pad), None);
        b.push(label, None);
        b.push(&" ".repeat(cw - pad - 1), None);
        if col < 2 {
            b.push(" ", None);
        }
    }
    b.end_row();

    let rule = |left: char, mid: char, right: char| {
        let bar = "═".repeat(cw);
        format!("{left}{bar}{mid}{bar}{mid}{bar}{right}")
    };

    b.push(&label_pad, None);
    b.push(&rule('╔', '╦', '╗'), None);
    b.end_row();

    for row in 0..3 {
        for line in 0..geom.cell_height {
            if line == geom.cell_height / 2 {
                let label = format!("{:^width$}", row + 1, width = geom.row_label_width);
                b.push(&label, None);
            } else {
                b.push(&label_pad, None);
            }
            b.push("║", None);
            for col in 0..3 {
                let idx = row * 3 + col;
                let won = winning.contains(&idx);
                let (art, style) = match marks[idx] {
                    Mark::Cross => (CROSS_ART.get(line), &styles[usize::from(won)]),
                    Mark::Naught => (NAUGHT_ART.get(line), &styles[2 + usize::from(won)]),
                    Mark::Empty => (None, &styles[0]),
                };
                match art {
                    Some(text) => b.push(text, Some(style)),
                    None => b.push(&" ".repeat(cw), None),
                }
                b.push("║", None);
            }
            b.end_row();
        }

        b.push(&label_pad, None);
        if row < 2 {
            b.push(&rule('╠', '╬', '╣'), None);
        } else {
            b.push(&rule('╚', '╩', '╝'), None);
        }
        b.end_row();
    }

    b.end_row();
    let status = StyleTag::new("bold yellow");
    let winner = winning.first().map(|&i| marks[i]).unwrap_or_default();
    match winner {
        Mark::Empty => b.push("It's a tie!", Some(&status)),
        m => b.push(&format!("Player {} wins!", m.label()), Some(&status)),
    }
    b.end_row();

    b.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn glyphs_skip_whitespace_in_scan_order() {
        let scene = Scene::unstyled(["a b", "", " c"]);
        let got: Vec<(usize, usize, char)> = scene.glyphs().map(|g| (g.x, g.y, g.ch)).collect();
        assert_eq!(got, vec![(0, 0, 'a'), (2, 0, 'b'), (1, 2, 'c')]);
    }

    #[test]
    fn short_style_rows_read_as_unstyled() {
        let red = StyleTag::new("red");
        let scene = Scene::new(vec!["xy".into(), "z".into()], vec![vec![Some(red.clone())]]);
        let styles: Vec<Option<&StyleTag>> = scene.glyphs().map(|g| g.style).collect();
        assert_eq!(styles, vec![Some(&red), None, None]);
    }

    #[test]
    fn board_scene_places_art_inside_cell_bounds() {
        let geom = BoardGeometry::default();
        let mut marks = [Mark::Empty; 9];
        marks[4] = Mark::Cross;
        marks[0] = Mark::Naught;
        let scene = board_scene(&geom, &marks, &[4]);

        // header + top border + 3 * (7 rows + rule) + blank + status
        assert_eq!(scene.height(), 2 + 3 * 8 + 2);
        assert_eq!(scene.width(), 3 + 1 + 3 * 18);

        let r = geom.cell_bounds(4);
        for g in scene.glyphs().filter(|g| g.ch == '█') {
            let inside = (r.x1..r.x2).contains(&g.x) && (r.y1..r.y2).contains(&g.y);
            let style = g.style.map(StyleTag::as_str);
            if inside {
                assert_eq!(style, Some("bold red reverse"));
            } else {
                assert_eq!(style, Some("bold blue"));
            }
        }
        assert!(scene.rows().last().unwrap().contains("Player X wins!"));
    }
}
