#![deny(clippy::all)]
#![forbid(unsafe_code)]

mod config;

use config::{Command, Config, USAGE};
use std::env;
use terminal_main_support::{FixedCadence, TerminalSink, animate};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = match Config::from_args(env::args().skip(1))? {
        Command::Run(config) => config,
        Command::Help => {
            print!("{USAGE}");
            return Ok(());
        }
    };
    log::info!("starting with {:?}", config);

    let grid = config.initial_grid();
    let mut sink = TerminalSink::stdout(config.glyphs).with_clear_screen(config.clear_screen);
    let mut wait = FixedCadence::new(config.delay);
    let last = animate(
        grid,
        config.generations,
        config.parallel,
        &mut sink,
        &mut wait,
    )?;

    log::info!(
        "finished {} generations with {} live cells",
        config.generations,
        last.live_count()
    );
    Ok(())
}
