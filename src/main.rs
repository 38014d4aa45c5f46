//! Kill The Frog entry point
//!
//! Native terminal front-end: reads keys and mouse clicks, steps the sim at a
//! fixed rate, plays audio cues and draws each frame.

use std::io::{BufWriter, Write, stdout};
use std::path::Path;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use crossterm::{
    ExecutableCommand, cursor,
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    terminal,
};
use glam::Vec2;

use kill_the_frog::audio::{AudioManager, play_events};
use kill_the_frog::platform::{Command, FrameClock, map_event};
use kill_the_frog::renderer::{Renderer, TerminalRenderer, Viewport};
use kill_the_frog::sim::{FrameSnapshot, GameEvent, GameState, PlayerAction, TickInput, tick};
use kill_the_frog::{HighScoreFile, ScorePersistence, Settings};

/// Render/poll cadence (the sim runs on its own fixed step)
const FRAME: Duration = Duration::from_millis(16);

/// Game instance holding all state
struct Game {
    state: GameState,
    input: TickInput,
    clock: FrameClock,
    scores: HighScoreFile,
    /// The store accepted the last finished session's score
    new_high_score: bool,
    audio: AudioManager<std::io::Stdout>,
}

impl Game {
    fn new(settings: &Settings) -> Self {
        let seed = settings.seed.unwrap_or_else(wall_clock_seed);
        log::info!("Game initialized with seed: {seed}");

        let mut audio = AudioManager::stdout();
        audio.set_master_volume(settings.master_volume);
        audio.set_muted(settings.muted);

        Self {
            state: GameState::new(&settings.session_config(), seed),
            input: TickInput::default(),
            clock: FrameClock::new(settings.sim_dt()),
            scores: HighScoreFile::open(settings.high_score_path()),
            new_high_score: false,
            audio,
        }
    }

    /// Run however many fixed steps the wall clock owes us
    fn update(&mut self, now: Instant) {
        let steps = self.clock.advance_to(now);
        for _ in 0..steps {
            tick(&mut self.state, &self.input, self.clock.step());
            self.input.clear();
            self.handle_events();
        }
    }

    fn handle_events(&mut self) {
        let events = self.state.drain_events();
        if events.is_empty() {
            return;
        }
        play_events(&events, &mut self.audio);
        for event in &events {
            match *event {
                GameEvent::SessionStarted => {
                    log::info!("Session started");
                    self.new_high_score = false;
                }
                GameEvent::WaveAdvanced { wave } => log::info!("Wave {wave}"),
                GameEvent::SessionEnded { score, reason } => {
                    log::info!("Session ended ({reason:?}) with score {score}");
                    self.new_high_score = self.scores.try_set_new_high_score(score);
                }
                _ => {}
            }
        }
    }

    fn frame(&self) -> FrameSnapshot {
        let mut frame = self.state.snapshot(self.scores.high_score());
        frame.new_high_score = self.new_high_score;
        frame
    }
}

fn wall_clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    log::info!("Kill The Frog starting...");

    let settings = Settings::from_env();
    let mut game = Game::new(&settings);

    let args: Vec<String> = std::env::args().skip(1).collect();
    if let Some(i) = args.iter().position(|arg| arg == "--save-config") {
        match args.get(i + 1) {
            Some(path) => settings.save_to(Path::new(path)),
            None => eprintln!("--save-config needs a file path"),
        }
        return Ok(());
    }
    if args.iter().any(|arg| arg == "--reset-high-score") {
        game.scores.reset();
        println!("High score reset ({})", game.scores.path().display());
        return Ok(());
    }

    let mut out = BufWriter::new(stdout());

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;
    out.execute(EnableMouseCapture)?;

    // Blocking reads live on their own thread so the loop never stalls
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break;
            }
        }
    });

    let result = run(&mut out, &mut game, &settings, &rx);

    // Always restore the terminal
    let _ = out.execute(DisableMouseCapture);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}

fn run<W: Write>(
    out: &mut W,
    game: &mut Game,
    settings: &Settings,
    rx: &mpsc::Receiver<Event>,
) -> std::io::Result<()> {
    let (cols, rows) = terminal::size()?;
    let area = Vec2::new(settings.area_width, settings.area_height);
    let mut renderer = TerminalRenderer::new(out, Viewport::new(cols, rows, area));
    let mut frame = game.frame();

    loop {
        let frame_start = Instant::now();

        while let Ok(ev) = rx.try_recv() {
            if let Event::Resize(cols, rows) = ev {
                renderer.resize(cols, rows);
                continue;
            }
            match map_event(&ev, renderer.viewport()) {
                Some(Command::Quit) => return Ok(()),
                Some(Command::Start) => game.input.start = true,
                Some(Command::Action(PlayerAction::Click(point))) => game
                    .input
                    .push(PlayerAction::Click(renderer.snap_click(point, &frame))),
                Some(Command::Action(action)) => game.input.push(action),
                None => {}
            }
        }

        game.update(frame_start);
        frame = game.frame();
        renderer.render(&frame)?;

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            thread::sleep(FRAME - elapsed);
        }
    }
}
