use crate::Loc;
use anyhow::bail;
use std::fmt;
use std::str::FromStr;

/// Small well-known seeds. Cells are `(row, col)` offsets from the
/// pattern's top-left corner.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Pattern {
    Block,
    Blinker,
    Toad,
    Beacon,
    Glider,
}

impl Pattern {
    pub const ALL: [Pattern; 5] = [
        Pattern::Block,
        Pattern::Blinker,
        Pattern::Toad,
        Pattern::Beacon,
        Pattern::Glider,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Pattern::Block => "block",
            Pattern::Blinker => "blinker",
            Pattern::Toad => "toad",
            Pattern::Beacon => "beacon",
            Pattern::Glider => "glider",
        }
    }

    pub fn cells(self) -> &'static [(usize, usize)] {
        match self {
            Pattern::Block => &[(0, 0), (0, 1), (1, 0), (1, 1)],
            Pattern::Blinker => &[(0, 0), (0, 1), (0, 2)],
            Pattern::Toad => &[(0, 1), (0, 2), (0, 3), (1, 0), (1, 1), (1, 2)],
            Pattern::Beacon => &[
                (0, 0),
                (0, 1),
                (1, 0),
                (1, 1),
                (2, 2),
                (2, 3),
                (3, 2),
                (3, 3),
            ],
            // Heads down and to the right.
            Pattern::Glider => &[(0, 1), (1, 2), (2, 0), (2, 1), (2, 2)],
        }
    }

    pub fn height(self) -> usize {
        self.cells().iter().map(|&(row, _)| row + 1).max().unwrap_or(0)
    }

    pub fn width(self) -> usize {
        self.cells().iter().map(|&(_, col)| col + 1).max().unwrap_or(0)
    }

    /// Top-left corner that centers the pattern on a `rows` x `cols` grid.
    pub fn centered_origin(self, rows: usize, cols: usize) -> Loc {
        Loc::new(
            rows.saturating_sub(self.height()) / 2,
            cols.saturating_sub(self.width()) / 2,
        )
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Pattern {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.to_ascii_lowercase();
        match Pattern::ALL.iter().find(|pattern| pattern.name() == name) {
            Some(&pattern) => Ok(pattern),
            None => {
                let names: Vec<&str> = Pattern::ALL.iter().map(|pattern| pattern.name()).collect();
                bail!("unknown pattern {:?}, expected one of: {}", s, names.join(", "))
            }
        }
    }
}
