use anyhow::bail;
use std::fmt;
use std::str::FromStr;

const GREEN_BACKGROUND: &str = "\x1B[48;2;0;255;0m";
const WHITE_BACKGROUND: &str = "\x1B[48;2;255;255;255m";
const RESET: &str = "\x1B[0m";

/// How a cell is drawn. Every glyph is two columns wide so cells come out
/// roughly square.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Glyphs {
    Ascii,
    Squares,
    #[default]
    Color,
}

impl Glyphs {
    pub const ALL: [Glyphs; 3] = [Glyphs::Ascii, Glyphs::Squares, Glyphs::Color];

    pub fn name(self) -> &'static str {
        match self {
            Glyphs::Ascii => "ascii",
            Glyphs::Squares => "squares",
            Glyphs::Color => "color",
        }
    }

    pub fn cell(self, alive: bool) -> String {
        match (self, alive) {
            (Glyphs::Ascii, true) => "* ".to_string(),
            (Glyphs::Ascii, false) => "  ".to_string(),
            (Glyphs::Squares, true) => "■ ".to_string(),
            (Glyphs::Squares, false) => "□ ".to_string(),
            (Glyphs::Color, true) => format!("{GREEN_BACKGROUND}  {RESET}"),
            (Glyphs::Color, false) => format!("{WHITE_BACKGROUND}  {RESET}"),
        }
    }

    pub fn render_row(self, row: &[bool]) -> String {
        row.iter().map(|&alive| self.cell(alive)).collect()
    }
}

impl fmt::Display for Glyphs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Glyphs {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ascii" => Ok(Glyphs::Ascii),
            "squares" => Ok(Glyphs::Squares),
            "color" | "colour" => Ok(Glyphs::Color),
            _ => bail!("unknown glyphs {:?}, expected ascii, squares or color", s),
        }
    }
}
