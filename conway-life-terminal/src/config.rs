use anyhow::{Context, bail, ensure};
use life_grid::{Grid, Pattern, Random, RandomCells};
use std::str::FromStr;
use std::time::Duration;
use terminal_main_support::Glyphs;

pub const USAGE: &str = "\
Usage: conway-life-terminal [OPTIONS]

Options:
  --rows N           grid rows [default: 20]
  --cols N           grid columns [default: 20]
  --generations N    generations to run after the first [default: 100]
  --delay-ms N       milliseconds between frames [default: 500]
  --density P        chance a random cell starts alive, 0 to 1 [default: 0.5]
  --seed N           seed for a reproducible random start
  --pattern NAME     random, block, blinker, toad, beacon or glider [default: random]
  --glyphs NAME      ascii, squares or color [default: color]
  --parallel         compute each generation on all cores
  --no-clear         print frames one after another instead of redrawing
  -h, --help         print this help
";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Start {
    Random,
    Pattern(Pattern),
}

impl FromStr for Start {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("random") {
            Ok(Start::Random)
        } else {
            s.parse().map(Start::Pattern)
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub rows: usize,
    pub cols: usize,
    pub generations: u64,
    pub delay: Duration,
    pub density: f64,
    pub seed: Option<u64>,
    pub start: Start,
    pub glyphs: Glyphs,
    pub parallel: bool,
    pub clear_screen: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rows: 20,
            cols: 20,
            generations: 100,
            delay: Duration::from_millis(500),
            density: 0.5,
            seed: None,
            start: Start::Random,
            glyphs: Glyphs::default(),
            parallel: false,
            clear_screen: true,
        }
    }
}

#[derive(Debug, PartialEq)]
pub enum Command {
    Run(Config),
    Help,
}

impl Config {
    pub fn from_args<I>(args: I) -> anyhow::Result<Command>
    where
        I: IntoIterator<Item = String>,
    {
        let mut config = Config::default();
        let mut args = args.into_iter();

        while let Some(flag) = args.next() {
            match flag.as_str() {
                "--rows" => config.rows = parse_value(&flag, args.next())?,
                "--cols" => config.cols = parse_value(&flag, args.next())?,
                "--generations" => config.generations = parse_value(&flag, args.next())?,
                "--delay-ms" => {
                    config.delay = Duration::from_millis(parse_value(&flag, args.next())?)
                }
                "--density" => config.density = parse_value(&flag, args.next())?,
                "--seed" => config.seed = Some(parse_value(&flag, args.next())?),
                "--pattern" => config.start = parse_value(&flag, args.next())?,
                "--glyphs" => config.glyphs = parse_value(&flag, args.next())?,
                "--parallel" => config.parallel = true,
                "--no-clear" => config.clear_screen = false,
                "-h" | "--help" => return Ok(Command::Help),
                other => bail!("unknown argument {:?}, see --help", other),
            }
        }

        config.validate()?;
        Ok(Command::Run(config))
    }

    fn validate(&self) -> anyhow::Result<()> {
        ensure!(self.rows > 0, "--rows must be at least 1");
        ensure!(self.cols > 0, "--cols must be at least 1");
        ensure!(
            (0.0..=1.0).contains(&self.density),
            "--density must be between 0 and 1, got {}",
            self.density
        );
        Ok(())
    }

    pub fn initial_grid(&self) -> Grid {
        match self.start {
            Start::Random => {
                let rand = self.seed.map_or_else(Random::new, Random::from_seed);
                Grid::seeded(
                    self.rows,
                    self.cols,
                    &mut RandomCells::new(rand, self.density),
                )
            }
            Start::Pattern(pattern) => Grid::with_pattern(
                self.rows,
                self.cols,
                pattern,
                pattern.centered_origin(self.rows, self.cols),
            ),
        }
    }
}

fn parse_value<T>(flag: &str, value: Option<String>) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: Into<anyhow::Error>,
{
    let value = value.with_context(|| format!("missing value for {flag}"))?;
    let parsed: anyhow::Result<T> = value.parse().map_err(Into::into);
    parsed.with_context(|| format!("invalid value {value:?} for {flag}"))
}
