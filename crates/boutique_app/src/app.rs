use std::io::{self, BufRead, Write};
use std::path::Path;
use std::sync::mpsc;
use std::thread;

use anyhow::Context;
use boutique_core::{update, AppState, Msg};
use boutique_logging::{boutique_info, boutique_warn};

use crate::commands::{self, Input};
use crate::config::{self, AppConfig};
use crate::effects::EffectRunner;
use crate::logging;
use crate::render;

enum Inbound {
    Msg(Msg),
    Quit,
}

pub fn run_app() -> anyhow::Result<()> {
    let (config, config_error) = match config::load(Path::new(config::CONFIG_FILENAME)) {
        Ok(config) => (config, None),
        Err(err) => (AppConfig::default(), Some(err)),
    };
    logging::initialize(config.log_destination, config.level());
    if let Some(err) = config_error {
        boutique_warn!("Using default configuration: {}", err);
    }
    boutique_info!(
        "Starting boutique against {} (page size {})",
        config.catalog.base_url,
        config.page_size
    );

    let (msg_tx, msg_rx) = mpsc::channel::<Inbound>();
    let engine_tx = msg_tx.clone();
    let runner = EffectRunner::new(config.catalog.to_settings(), move |msg| {
        engine_tx.send(Inbound::Msg(msg)).is_ok()
    })
    .context("failed to start the catalog engine")?;

    spawn_input_thread(msg_tx);
    println!("{}", commands::HELP);

    let mut driver = Driver {
        state: AppState::with_page_size(config.page_size),
        runner,
    };
    driver.dispatch(Msg::Started);
    driver.render();

    while let Ok(first) = msg_rx.recv() {
        let mut inbox = vec![first];
        inbox.extend(msg_rx.try_iter());

        let mut dirty = false;
        let mut quit = false;
        for inbound in inbox {
            match inbound {
                Inbound::Msg(msg) => dirty |= driver.dispatch(msg),
                Inbound::Quit => {
                    quit = true;
                    break;
                }
            }
        }
        if dirty {
            driver.render();
        }
        if quit {
            break;
        }
    }

    boutique_info!("Boutique shutting down");
    Ok(())
}

struct Driver {
    state: AppState,
    runner: EffectRunner,
}

impl Driver {
    /// Runs one message through the core and hands its effects to the engine.
    /// Returns whether the view changed.
    fn dispatch(&mut self, msg: Msg) -> bool {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        let was_dirty = state.consume_dirty();
        self.state = state;
        self.runner.enqueue(effects);
        was_dirty
    }

    fn render(&self) {
        let text = render::render(&self.state.view());
        if let Err(err) = write_screen(&mut io::stdout().lock(), &text) {
            boutique_warn!("Failed to write to stdout: {}", err);
        }
    }
}

fn write_screen(out: &mut impl Write, text: &str) -> io::Result<()> {
    writeln!(out, "\n{text}")?;
    write!(out, "> ")?;
    out.flush()
}

fn spawn_input_thread(msg_tx: mpsc::Sender<Inbound>) {
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let line = match line {
                Ok(line) => line,
                Err(err) => {
                    boutique_warn!("Failed to read input: {}", err);
                    break;
                }
            };
            let inbound = match commands::parse_line(&line) {
                Ok(Input::Msg(msg)) => Inbound::Msg(msg),
                Ok(Input::Help) => {
                    println!("{}", commands::HELP);
                    continue;
                }
                Ok(Input::Quit) => break,
                Err(err) => {
                    println!("{err}");
                    continue;
                }
            };
            if msg_tx.send(inbound).is_err() {
                return;
            }
        }
        let _ = msg_tx.send(Inbound::Quit);
    });
}
