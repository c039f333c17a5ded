//! Stick Hero headless driver
//!
//! Runs an autoplay bot against the simulation core and logs what happens.
//! Usage: `stick-hero [seed] [games] [tuning.json]`

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use rand::Rng;
    use rand_pcg::Pcg32;

    use stick_hero::consts::DEFAULT_SEED;
    use stick_hero::sim::RngState;
    use stick_hero::{GameEvent, GamePhase, GameSession, SessionConfig, Tuning};

    /// Frame time the driver feeds the core
    const FRAME_DT: f32 = 1.0 / 60.0;
    /// Bot aim error, in pixels either side of the platform center
    const BOT_AIM_ERROR: f32 = 30.0;
    /// Safety net so a stuck bot cannot spin forever
    const MAX_FRAMES_PER_GAME: u32 = 60 * 60 * 10;

    struct Bot {
        rng: Pcg32,
        target_length: Option<f32>,
    }

    impl Bot {
        fn new(seed: u64) -> Self {
            Self {
                rng: RngState::new(seed, 99).to_rng(),
                target_length: None,
            }
        }

        /// Feed input for the current frame
        fn act(&mut self, session: &mut GameSession) {
            match session.phase() {
                GamePhase::Ready => {
                    let [.., current, next] = session.platforms() else {
                        return;
                    };
                    let center = next.x() + next.width() / 2.0;
                    let error = self.rng.random_range(-BOT_AIM_ERROR..=BOT_AIM_ERROR);
                    self.target_length = Some(center - current.right() + error);
                    session.on_press_start();
                }
                GamePhase::GrowingStick => {
                    let length = session.stick().map(|s| s.length).unwrap_or(0.0);
                    if self.target_length.is_some_and(|target| length >= target) {
                        session.on_press_end();
                    }
                }
                _ => {}
            }
        }
    }

    fn parse_args() -> Result<(u64, u32, Option<Tuning>), String> {
        let args: Vec<String> = std::env::args().skip(1).collect();
        let seed = match args.first() {
            Some(s) => s.parse().map_err(|e| format!("bad seed {s:?}: {e}"))?,
            None => DEFAULT_SEED,
        };
        let games = match args.get(1) {
            Some(s) => s.parse().map_err(|e| format!("bad game count {s:?}: {e}"))?,
            None => 3,
        };
        let tuning = match args.get(2) {
            Some(path) => {
                let json = std::fs::read_to_string(path).map_err(|e| format!("{path}: {e}"))?;
                Some(Tuning::from_json(&json).map_err(|e| format!("{path}: {e}"))?)
            }
            None => None,
        };
        Ok((seed, games, tuning))
    }

    pub fn run() {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

        let (seed, games, tuning) = match parse_args() {
            Ok(parsed) => parsed,
            Err(err) => {
                log::error!("{err}");
                std::process::exit(2);
            }
        };

        let config = SessionConfig {
            seed,
            tuning: tuning.unwrap_or_default(),
            ..Default::default()
        };
        let mut session = match GameSession::with_config(config) {
            Ok(session) => session,
            Err(err) => {
                log::error!("Invalid tuning: {err}");
                std::process::exit(2);
            }
        };
        let mut bot = Bot::new(seed);
        let mut best = 0;

        log::info!("Running {games} game(s) with seed {seed}");
        for game in 1..=games {
            let mut frames = 0;
            while session.phase() != GamePhase::GameOver && frames < MAX_FRAMES_PER_GAME {
                bot.act(&mut session);
                session.update(FRAME_DT);
                frames += 1;

                for event in session.drain_events() {
                    match event {
                        GameEvent::HeroLanded { x, score } => {
                            log::debug!("Game {game}: landed at {x:.1}, score {score}")
                        }
                        GameEvent::HeroFell { x } => log::debug!("Game {game}: fell at {x:.1}"),
                        _ => {}
                    }
                }
            }

            best = best.max(session.score());
            log::info!(
                "Game {game}: score {} after {:.1}s simulated",
                session.score(),
                frames as f32 * FRAME_DT
            );
            session.on_restart_requested();
        }
        log::info!("Best score: {best}");
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    native::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The web front end drives the core directly; nothing to do here.
}
