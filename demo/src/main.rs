//! Terminal pathfinding visualizer.
//!
//! Run: cargo run --bin pathviz [config.json]
//!
//! Logging goes to stderr and is controlled by `RUST_LOG`; redirect it when
//! enabling it, e.g. `RUST_LOG=debug cargo run 2> pathviz.log`.

mod app;
mod config;
mod term;

use std::time::{Duration, Instant};

use app::{Control, Visualizer};
use config::Config;
use term::Terminal;

/// Longest the loop waits for input while no step is due.
const IDLE_POLL: Duration = Duration::from_millis(250);

fn run(term: &mut Terminal, vis: &mut Visualizer) -> Result<(), Box<dyn std::error::Error>> {
    term.draw(vis)?;
    loop {
        let timeout = vis
            .next_tick_in(Instant::now())
            .map_or(IDLE_POLL, |d| d.min(IDLE_POLL));

        let mut dirty = false;
        if let Some(msg) = term.poll(timeout)? {
            if vis.update(msg) == Control::Quit {
                return Ok(());
            }
            dirty = true;
        }
        if vis.tick(Instant::now())? {
            dirty = true;
        }
        if dirty {
            term.draw(vis)?;
        }
    }
}

fn main() {
    env_logger::init();

    let config = match std::env::args().nth(1) {
        Some(path) => match Config::load(&path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error: {e}");
                std::process::exit(2);
            }
        },
        None => Config::default(),
    };

    let mut vis = Visualizer::new(config);
    let result = Terminal::init()
        .map_err(Box::<dyn std::error::Error>::from)
        .and_then(|mut term| {
            let res = run(&mut term, &mut vis);
            term.close();
            res
        });

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
