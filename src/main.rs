mod ui;

use std::io::{self, Stdout};
use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{bail, Context, Result};
use crossterm::event::{
    self, Event, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
    PushKeyboardEnhancementFlags,
};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::{cursor, ExecutableCommand};
use dino::gesture::{self, GestureReceiver};
use dino::input::{InputSampler, KeyAction};
use dino::utils::{persistence, version_line};
use dino::{GameConfig, Session, TickOutcome, FRAME_MS, LOG_FILE};
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::{backend::CrosstermBackend, Terminal};
use ui::runner_scene::{render_runner_scene, GestureStatus};

type Term = Terminal<CrosstermBackend<Stdout>>;

#[derive(Debug, Default)]
struct Options {
    seed: Option<u64>,
    gesture_pipe: Option<PathBuf>,
    config: Option<PathBuf>,
    no_clouds: bool,
}

fn print_help() {
    println!("Dino - Terminal Dinosaur Runner\n");
    println!("Usage: dino [options]\n");
    println!("Options:");
    println!("  --seed <n>            Seed the obstacle/cloud RNG");
    println!("  --gesture-pipe <path> Read gesture labels (one per line) from a pipe");
    println!("  --config <path>       Load config from <path> instead of ~/.dino/config.json");
    println!("  --no-clouds           Disable background clouds");
    println!("  --version             Show version information");
    println!("  --help                Show this help message");
    println!("\nControls: Space/Up jump (and restart), q/Esc quit.");
}

fn parse_args(args: &[String]) -> Result<Options> {
    let mut options = Options::default();
    let mut iter = args.iter().skip(1);

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--version" | "-v" => {
                println!("{}", version_line());
                std::process::exit(0);
            }
            "--help" | "-h" => {
                print_help();
                std::process::exit(0);
            }
            "--seed" => {
                let value = iter.next().context("--seed needs a value")?;
                let seed = value
                    .parse()
                    .with_context(|| format!("invalid seed: {}", value))?;
                options.seed = Some(seed);
            }
            "--gesture-pipe" => {
                let path = iter.next().context("--gesture-pipe needs a path")?;
                options.gesture_pipe = Some(PathBuf::from(path));
            }
            "--config" => {
                let path = iter.next().context("--config needs a path")?;
                options.config = Some(PathBuf::from(path));
            }
            "--no-clouds" => options.no_clouds = true,
            other => bail!("unknown argument: {}\nRun 'dino --help' for usage.", other),
        }
    }
    Ok(options)
}

/// Log to ~/.dino/dino.log. The terminal belongs to the game, so nothing
/// goes to stderr; without a log file the game just runs unlogged.
fn init_logging() {
    let Ok(file) = persistence::open_append(LOG_FILE) else {
        return;
    };
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_secs()
        .target(env_logger::Target::Pipe(Box::new(file)))
        .try_init();
}

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let options = parse_args(&args)?;

    init_logging();
    log::info!("starting {}", version_line());

    let mut config = match &options.config {
        Some(path) => GameConfig::load_from(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => GameConfig::load_default_location().context("loading ~/.dino/config.json")?,
    };
    if options.no_clouds {
        config.clouds_enabled = false;
    }

    let mut rng = match options.seed {
        Some(seed) => {
            log::info!("using seed {}", seed);
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_entropy(),
    };

    let gesture = match options.gesture_pipe {
        Some(path) => {
            let (tx, rx) = gesture::gesture_channel();
            gesture::spawn_pipe_reader(path, tx).context("starting gesture feed")?;
            Some(rx)
        }
        None => None,
    };

    // The session clock is milliseconds since this instant.
    let clock = Instant::now();
    let mut session = Session::new(&config, 0).context("invalid game config")?;

    enable_raw_mode().context("enabling raw mode")?;
    let mut stdout = io::stdout();
    // Key release/repeat reporting where the terminal supports it.
    let keyboard_enhanced = stdout
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    let result = run(&mut session, &mut rng, gesture, clock);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = stdout.execute(PopKeyboardEnhancementFlags);
    }
    let _ = stdout.execute(cursor::Show);
    let _ = stdout.execute(LeaveAlternateScreen);
    let _ = disable_raw_mode();

    log::info!(
        "exiting with score {} (high {})",
        session.score(),
        session.high_score()
    );
    result
}

fn run(
    session: &mut Session,
    rng: &mut StdRng,
    gesture: Option<GestureReceiver>,
    clock: Instant,
) -> Result<()> {
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    stdout.execute(cursor::Hide)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    terminal.clear()?;

    game_loop(&mut terminal, session, rng, gesture, clock)
}

/// Session clock reading: milliseconds since `clock`, saturating.
fn elapsed_ms(clock: Instant) -> u64 {
    u64::try_from(clock.elapsed().as_millis()).unwrap_or(u64::MAX)
}

fn game_loop(
    terminal: &mut Term,
    session: &mut Session,
    rng: &mut StdRng,
    mut gesture: Option<GestureReceiver>,
    clock: Instant,
) -> Result<()> {
    let frame_duration = Duration::from_millis(FRAME_MS);
    let mut sampler = InputSampler::new();
    let mut next_frame = Instant::now();

    loop {
        // 1. Drain pending key events without blocking
        while event::poll(Duration::ZERO)? {
            if let Event::Key(key) = event::read()? {
                if sampler.handle_key(&key) == KeyAction::Quit {
                    return Ok(());
                }
            }
        }

        // 2. Latest gesture verdict
        let gesture_active = gesture.as_mut().map(|g| g.sample()).unwrap_or(false);
        let status = match &gesture {
            None => GestureStatus::Off,
            Some(g) if !g.is_connected() => GestureStatus::Disconnected,
            Some(_) if gesture_active => GestureStatus::OpenPalm,
            Some(_) => GestureStatus::Released,
        };

        // 3. Tick
        let input = sampler.sample(gesture_active);
        let now_ms = elapsed_ms(clock);
        if let TickOutcome::Collided {
            score,
            new_high_score: true,
        } = session.tick(now_ms, input, rng)
        {
            log::info!("new high score: {}", score);
        }

        // 4. Draw
        terminal.draw(|frame| {
            let area = frame.size();
            render_runner_scene(frame, area, session, status);
        })?;

        // 5. Sleep to the next frame deadline
        next_frame += frame_duration;
        let now = Instant::now();
        if next_frame > now {
            thread::sleep(next_frame - now);
        } else {
            // Fell behind; don't try to catch up with a burst of ticks.
            next_frame = now;
        }
    }
}
