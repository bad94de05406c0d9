//! Asteroids Redux headless runner
//!
//! Plays one autopilot session with the fixed-step loop and prints the final
//! snapshot as JSON. Usage: `asteroids-redux [settings.json] [--ticks N]`

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::error::Error;

    use asteroids_redux::Settings;
    use asteroids_redux::consts::*;
    use asteroids_redux::sim::{GameEvent, GameState, TickInput, tick};

    /// Five minutes of play
    const DEFAULT_TICK_LIMIT: u64 = 60 * 60 * 5;
    /// Upgrade menus ignore input this long after opening
    const CHOICE_DEBOUNCE: f32 = 0.5;

    struct Args {
        settings_path: Option<String>,
        tick_limit: u64,
    }

    fn parse_args() -> Result<Args, Box<dyn Error>> {
        let mut args = Args {
            settings_path: None,
            tick_limit: DEFAULT_TICK_LIMIT,
        };
        let mut iter = std::env::args().skip(1);
        while let Some(arg) = iter.next() {
            if arg == "--ticks" {
                let value = iter.next().ok_or("--ticks needs a value")?;
                args.tick_limit = value.parse()?;
            } else {
                args.settings_path = Some(arg);
            }
        }
        Ok(args)
    }

    /// Aim at the nearest asteroid, chase it when it's far, always fire
    fn autopilot(state: &GameState) -> TickInput {
        let ship = &state.world.ship;
        let nearest = state
            .world
            .asteroids
            .iter()
            .filter(|a| a.active)
            .map(|a| a.position - ship.position)
            .min_by(|a, b| {
                a.length_squared()
                    .partial_cmp(&b.length_squared())
                    .unwrap_or(std::cmp::Ordering::Equal)
            });

        TickInput {
            target_angle: nearest.map(|d| d.y.atan2(d.x)),
            thrust: nearest.is_some_and(|d| d.length() > 400.0),
            fire: true,
        }
    }

    /// Frame loop with an accumulator, stepping the simulation at `SIM_DT`
    struct Runner {
        state: GameState,
        accumulator: f32,
    }

    impl Runner {
        fn update(&mut self, frame_dt: f32) {
            self.accumulator += frame_dt.min(0.1);

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                let input = autopilot(&self.state);
                tick(&mut self.state, &input, SIM_DT);
                self.accumulator -= SIM_DT;
                substeps += 1;

                if self.state.is_paused() && self.state.progression.choice_open_time() >= CHOICE_DEBOUNCE {
                    // Always take the first card
                    if let Err(err) = self.state.choose_upgrade(0) {
                        log::warn!("Autopilot could not pick an upgrade: {}", err);
                    }
                }
            }

            for event in self.state.drain_events() {
                match event {
                    GameEvent::LevelUp { level } => log::info!("Reached level {}", level),
                    GameEvent::UpgradeApplied { id, level } => {
                        log::info!("Picked {:?} (level {})", id, level)
                    }
                    other => log::trace!("{:?}", other),
                }
            }
        }
    }

    pub fn run() -> Result<(), Box<dyn Error>> {
        let args = parse_args()?;
        let settings = match &args.settings_path {
            Some(path) => Settings::load(path)?,
            None => Settings::default(),
        };

        let mut runner = Runner {
            state: GameState::new(settings)?,
            accumulator: 0.0,
        };

        // Slightly uneven frames, like a real display
        let frames = [1.0 / 60.0, 1.0 / 55.0, 1.0 / 65.0];
        let mut frame = 0;
        while !runner.state.is_over() && runner.state.time_ticks < args.tick_limit {
            runner.update(frames[frame % frames.len()]);
            frame += 1;
        }

        let snapshot = runner.state.snapshot();
        log::info!(
            "Session finished after {} ticks: score {}, level {}",
            snapshot.tick,
            snapshot.score,
            snapshot.player.level
        );
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Asteroids Redux (headless) starting...");

    if let Err(err) = native::run() {
        log::error!("{}", err);
        eprintln!("error: {}", err);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The library is driven by a host frontend on the web; nothing to run here
}
