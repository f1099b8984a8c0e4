//! Bouncy Ball entry point
//!
//! Runs the game headless: the window, GPU and mixer belong to the host
//! application, so this binary drives the simulation with scripted input,
//! batches sprites and queues sounds the way a host frame loop would, and
//! prints a summary.
//!
//! Usage: `bouncy-ball [frames] [seed]`

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use bouncy_ball::audio::{AudioManager, AudioSink};
    use bouncy_ball::consts::*;
    use bouncy_ball::renderer::{SpriteBatch, draw_game};
    use bouncy_ball::sim::{BlockKind, FrameInput, GameEvent, GamePhase, GameState, load_levels, tick};
    use bouncy_ball::{Settings, Tuning};

    env_logger::init();
    log::info!("Bouncy Ball (headless) starting...");

    let mut args = std::env::args().skip(1);
    let frames: u64 = args.next().and_then(|a| a.parse().ok()).unwrap_or(600);
    let seed: u64 = args.next().and_then(|a| a.parse().ok()).unwrap_or(0x5EED);

    let tuning = Tuning::load("tuning.json");
    let settings = Settings::load(Settings::FILE_NAME);

    let layouts = match load_levels(LEVEL_DIR, LEVEL_COUNT, SCREEN_WIDTH, SCREEN_HEIGHT) {
        Ok(layouts) => layouts,
        Err(e) => {
            log::error!("Failed to load levels: {}", e);
            std::process::exit(1);
        }
    };
    let mut state = match GameState::new(layouts, tuning, seed) {
        Ok(state) => state,
        Err(e) => {
            log::error!("Failed to start game: {}", e);
            std::process::exit(1);
        }
    };
    state.set_particle_limit(settings.max_particles());
    log::info!("Game initialized with seed: {}", seed);

    let mut audio = AudioManager::from_settings(&settings);
    let mut batch = SpriteBatch::new();
    let dt = (1.0f32 / 60.0).min(MAX_FRAME_DT);
    let mut sounds = 0usize;
    let mut sprites = 0usize;

    for frame in 0..frames {
        // Steer toward the nearest intact goal
        let ball_x = state.level.ball.center().x;
        let target = state
            .level
            .blocks
            .iter()
            .filter(|b| b.kind == BlockKind::Goal && !b.destroyed)
            .map(|b| b.aabb().center().x)
            .min_by(|a, b| (a - ball_x).abs().total_cmp(&(b - ball_x).abs()));
        let input = FrameInput {
            left: target.is_some_and(|x| x < ball_x - 4.0),
            right: target.is_some_and(|x| x > ball_x + 4.0),
            reset: false,
            confirm: frame == 0 || state.phase == GamePhase::Win,
        };

        tick(&mut state, &input, dt);

        for event in state.drain_events() {
            match event {
                GameEvent::Sound(cue) => audio.play(cue),
                other => log::info!("frame {}: {:?}", frame, other),
            }
        }
        sounds += audio.drain().len();

        batch.clear();
        draw_game(&state, &mut batch);
        sprites += batch.len();
    }

    println!(
        "{} frames: level {}/{}, {:?}, deaths {}, {} sounds queued, {} sprites submitted",
        frames,
        state.level_index + 1,
        state.max_level(),
        state.phase,
        state.deaths,
        sounds,
        sprites,
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The web host drives `bouncy_ball::sim::tick` directly
}
