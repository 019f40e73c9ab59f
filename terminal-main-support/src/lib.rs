#![deny(clippy::all)]
#![forbid(unsafe_code)]

mod glyphs;
mod wait;

pub use glyphs::Glyphs;
pub use wait::{FixedCadence, NoWait, WaitPolicy};

use anyhow::Context;
use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::terminal::{Clear, ClearType};
use life_grid::{Grid, step, step_par};
use std::io::{self, Stdout, Write};

/// Receives every generation the animation produces.
pub trait DisplaySink {
    fn render(&mut self, generation: u64, grid: &Grid) -> anyhow::Result<()>;
}

/// Shows `grid` and then `generations` more generations of it, waiting after
/// each frame. Returns the last generation.
pub fn animate<D, W>(
    grid: Grid,
    generations: u64,
    parallel: bool,
    sink: &mut D,
    wait: &mut W,
) -> anyhow::Result<Grid>
where
    D: DisplaySink + ?Sized,
    W: WaitPolicy + ?Sized,
{
    let evolve: fn(&Grid) -> Grid = if parallel { step_par } else { step };
    let mut grid = grid;
    let mut extinct = grid.is_all_dead();

    sink.render(0, &grid)?;
    wait.wait();

    for generation in 1..=generations {
        grid = evolve(&grid);
        log::debug!(
            "generation {}: {} live cells",
            generation,
            grid.live_count()
        );
        log::trace!("generation {}:\n{}", generation, grid);
        if !extinct && grid.is_all_dead() {
            log::info!("population died out at generation {}", generation);
            extinct = true;
        }

        sink.render(generation, &grid)?;
        wait.wait();
    }

    Ok(grid)
}

/// Draws each generation as text, optionally clearing the screen first.
pub struct TerminalSink<W: Write> {
    out: W,
    glyphs: Glyphs,
    clear_screen: bool,
}

impl TerminalSink<Stdout> {
    pub fn stdout(glyphs: Glyphs) -> Self {
        Self::new(io::stdout(), glyphs)
    }
}

impl<W: Write> TerminalSink<W> {
    pub fn new(out: W, glyphs: Glyphs) -> Self {
        Self {
            out,
            glyphs,
            clear_screen: true,
        }
    }

    pub fn with_clear_screen(mut self, clear_screen: bool) -> Self {
        self.clear_screen = clear_screen;
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> DisplaySink for TerminalSink<W> {
    fn render(&mut self, generation: u64, grid: &Grid) -> anyhow::Result<()> {
        if self.clear_screen {
            queue!(self.out, Clear(ClearType::All), MoveTo(0, 0))
                .context("failed to clear terminal")?;
        }

        writeln!(
            self.out,
            "Generation {} ({} alive)",
            generation,
            grid.live_count()
        )
        .context("failed to write frame")?;
        for row in grid.rows_iter() {
            writeln!(self.out, "{}", self.glyphs.render_row(row))
                .context("failed to write frame")?;
        }
        self.out.flush().context("failed to flush terminal")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::bail;
    use life_grid::{Loc, Pattern};
    use std::io;

    #[derive(Default)]
    struct RecordingSink {
        frames: Vec<(u64, Grid)>,
    }

    impl DisplaySink for RecordingSink {
        fn render(&mut self, generation: u64, grid: &Grid) -> anyhow::Result<()> {
            self.frames.push((generation, grid.clone()));
            Ok(())
        }
    }

    struct FailingSink {
        fail_at: u64,
    }

    impl DisplaySink for FailingSink {
        fn render(&mut self, generation: u64, _grid: &Grid) -> anyhow::Result<()> {
            if generation == self.fail_at {
                bail!("display gone");
            }
            Ok(())
        }
    }

    #[derive(Default)]
    struct CountingWait {
        waits: usize,
    }

    impl WaitPolicy for CountingWait {
        fn wait(&mut self) {
            self.waits += 1;
        }
    }

    fn blinker() -> Grid {
        Grid::with_pattern(5, 5, Pattern::Blinker, Loc::new(2, 1))
    }

    #[test]
    fn animate_renders_every_generation() {
        let mut sink = RecordingSink::default();
        let mut wait = CountingWait::default();

        let last = animate(blinker(), 4, false, &mut sink, &mut wait).unwrap();

        assert_eq!(sink.frames.len(), 5);
        assert_eq!(wait.waits, 5);
        for (index, (generation, _)) in sink.frames.iter().enumerate() {
            assert_eq!(*generation, index as u64);
        }
        for pair in sink.frames.windows(2) {
            assert_eq!(pair[1].1, step(&pair[0].1));
        }
        assert_eq!(sink.frames[2].1, blinker());
        assert_eq!(sink.frames[4].1, last);
        assert_eq!(last, blinker());
    }

    #[test]
    fn animate_parallel_matches_serial() {
        let start = Grid::with_pattern(9, 9, Pattern::Glider, Loc::new(0, 0));

        let mut serial_sink = RecordingSink::default();
        let mut parallel_sink = RecordingSink::default();

        animate(start.clone(), 8, false, &mut serial_sink, &mut NoWait).unwrap();
        animate(start, 8, true, &mut parallel_sink, &mut NoWait).unwrap();

        assert_eq!(serial_sink.frames, parallel_sink.frames);
    }

    #[test]
    fn animate_with_no_generations_shows_start() {
        let mut sink = RecordingSink::default();

        let last = animate(blinker(), 0, false, &mut sink, &mut NoWait).unwrap();

        assert_eq!(sink.frames, vec![(0, blinker())]);
        assert_eq!(last, blinker());
    }

    #[test]
    fn animate_stops_on_render_error() {
        let mut wait = CountingWait::default();

        let error = animate(blinker(), 10, false, &mut FailingSink { fail_at: 2 }, &mut wait)
            .unwrap_err();

        assert_eq!(error.to_string(), "display gone");
        assert_eq!(wait.waits, 2);
    }

    #[test]
    fn terminal_sink_writes_plain_frame() {
        let mut sink = TerminalSink::new(Vec::new(), Glyphs::Ascii).with_clear_screen(false);
        let grid = Grid::parse(".*\n**").unwrap();

        sink.render(3, &grid).unwrap();

        let output = String::from_utf8(sink.into_inner()).unwrap();
        assert_eq!(output, "Generation 3 (3 alive)\n  * \n* * \n");
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn terminal_sink_write_error_has_context() {
        let mut sink = TerminalSink::new(BrokenPipe, Glyphs::Ascii).with_clear_screen(false);

        let error = sink.render(0, &Grid::dead(2, 2)).unwrap_err();

        assert_eq!(error.to_string(), "failed to write frame");
        assert_eq!(error.root_cause().to_string(), "pipe closed");
    }

    #[test]
    fn terminal_sink_clears_before_frame() {
        let mut sink = TerminalSink::new(Vec::new(), Glyphs::Squares);

        sink.render(0, &Grid::dead(1, 2)).unwrap();

        let output = String::from_utf8(sink.into_inner()).unwrap();
        assert!(output.starts_with("\x1B[2J"));
        assert!(output.ends_with("Generation 0 (0 alive)\n□ □ \n"));
    }
}
