//! Pivot Platformer entry point
//!
//! Headless runner: plays the level on autopilot with a fixed-timestep
//! accumulator and logs what happens.
//!
//! Usage: `pivot-platformer [settings.json] [--seconds N] [--seed S]`

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();

    let args = Args::parse(std::env::args().skip(1));
    log::info!("Pivot Platformer (headless) starting, seed {}", args.seed);

    let settings = pivot_platformer::Settings::load(args.settings.as_deref());
    let mut game = Game::new(settings, args.seed);

    // Simulated display frames at ~50 Hz with some jitter
    let frames = (args.seconds * 50.0) as u32;
    for frame in 0..frames {
        let jitter = if frame % 7 == 0 { 0.006 } else { 0.0 };
        game.update(0.02 + jitter);
    }

    game.summary();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // No browser front end yet; the library is driven by the host page
}

#[cfg(not(target_arch = "wasm32"))]
struct Args {
    settings: Option<std::path::PathBuf>,
    seconds: f32,
    seed: u64,
}

#[cfg(not(target_arch = "wasm32"))]
impl Args {
    fn parse(mut args: impl Iterator<Item = String>) -> Self {
        let mut parsed = Self {
            settings: None,
            seconds: 20.0,
            seed: 12345,
        };
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--seconds" => match args.next().and_then(|v| v.parse().ok()) {
                    Some(seconds) => parsed.seconds = seconds,
                    None => log::warn!("--seconds expects a number, keeping {}", parsed.seconds),
                },
                "--seed" => match args.next().and_then(|v| v.parse().ok()) {
                    Some(seed) => parsed.seed = seed,
                    None => log::warn!("--seed expects an integer, keeping {}", parsed.seed),
                },
                path => parsed.settings = Some(path.into()),
            }
        }
        parsed
    }
}

/// Game instance holding all state
#[cfg(not(target_arch = "wasm32"))]
struct Game {
    state: pivot_platformer::sim::LevelState,
    pilot: pivot_platformer::sim::Autopilot,
    accumulator: f32,
    // Track transitions for logging
    was_grounded: bool,
    was_victory: bool,
    turns_started: u32,
}

#[cfg(not(target_arch = "wasm32"))]
impl Game {
    fn new(settings: pivot_platformer::Settings, seed: u64) -> Self {
        use pivot_platformer::sim::{Autopilot, ColliderTag, ContactEvent, LevelState};

        let mut state = LevelState::new(settings);
        // Spawn resting on a platform
        state.apply_contact(&ContactEvent::Begin(ColliderTag::Platform));

        Self {
            state,
            pilot: Autopilot::new(seed),
            accumulator: 0.0,
            was_grounded: true,
            was_victory: false,
            turns_started: 0,
        }
    }

    /// Run simulation ticks
    fn update(&mut self, dt: f32) {
        use pivot_platformer::consts::*;
        use pivot_platformer::sim::tick;

        let dt = dt.min(0.1);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            let input = self.pilot.next_input(&self.state);
            let was_rotating = self.state.stage.is_rotating();
            tick(&mut self.state, &input, SIM_DT);
            self.accumulator -= SIM_DT;
            substeps += 1;

            if !was_rotating && self.state.stage.is_rotating() {
                self.turns_started += 1;
            }
            self.pretend_physics();
            self.log_transitions();
        }
    }

    /// Stand-in for a collision backend: the player loses footing when
    /// walking off the stage and lands again back under the pivot.
    fn pretend_physics(&mut self) {
        use pivot_platformer::sim::{ColliderTag, ContactEvent};

        let pos = self.state.player.position();
        let on_platform = self.state.player.on_platform();
        if on_platform && pos.x.abs() > 6.0 {
            self.state.apply_contact(&ContactEvent::End(ColliderTag::Platform));
        } else if !on_platform && pos.y < -4.0 {
            self.state.player.body_mut().velocity = glam::Vec2::ZERO;
            self.state.player.body_mut().position = pivot_platformer::sim::DEFAULT_SPAWN;
            self.state.apply_contact(&ContactEvent::Begin(ColliderTag::Platform));
        } else if on_platform {
            // Resting contact cancels gravity
            let body = self.state.player.body_mut();
            body.velocity.y = body.velocity.y.max(0.0);
            body.position.y = body.position.y.max(pivot_platformer::sim::DEFAULT_SPAWN.y);
        }

        if self.turns_started == 12 && !self.state.victory() {
            self.state.enter_trigger(&ColliderTag::Player);
        }
    }

    fn log_transitions(&mut self) {
        let grounded = self.state.player.on_platform();
        if grounded != self.was_grounded {
            log::info!(
                "tick {}: player {}",
                self.state.time_ticks,
                if grounded { "landed" } else { "left the platform" }
            );
            self.was_grounded = grounded;
        }

        let victory = self.state.victory();
        if victory && !self.was_victory {
            log::info!("tick {}: VICTORY", self.state.time_ticks);
        }
        self.was_victory = victory;
    }

    fn summary(&self) {
        use pivot_platformer::normalize_degrees;

        println!("ticks:          {}", self.state.time_ticks);
        println!("turns started:  {}", self.turns_started);
        println!(
            "stage angle:    {:.1}° ({:.1}° normalized)",
            self.state.stage.orientation(),
            normalize_degrees(self.state.stage.orientation())
        );
        println!(
            "player angle:   {:.1}° ({:.1}° normalized)",
            self.state.player_rotator.orientation(),
            normalize_degrees(self.state.player_rotator.orientation())
        );
        println!("player at:      {:?}", self.state.player.position());
        println!("victory:        {}", self.state.victory());
    }
}
