mod display;

use std::io::{stdout, BufWriter, Write};
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};

use character_states::autopilot::Autopilot;
use character_states::input::KeyTracker;
use character_states::input_macro::InputMacro;
use character_states::{
    build, init_logging, Controller, History, InputSnapshot, MachineConfig, MachineKind,
};

const FRAME: Duration = Duration::from_millis(33); // ≈30 FPS

/// Drive a character with one of four state-machine designs
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Controller to start with (TAB cycles at runtime)
    #[arg(short, long, value_enum, default_value_t = MachineKind::Pda)]
    machine: MachineKind,

    /// TOML file overriding gravity, jump force, speed and friends
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Feed seeded random input instead of the keyboard
    #[arg(long, value_name = "SEED")]
    autoplay: Option<u64>,

    /// Enable verbose logging (written to stderr; redirect it to a file)
    #[arg(short, long)]
    verbose: bool,
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs until the player quits.
///
/// Input precedence each frame: a running macro replay, then the
/// autopilot, then the held keyboard keys.  While a replay is running but
/// has nothing due this frame, no keys are held.
fn game_loop<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    config: &MachineConfig,
    start: MachineKind,
    mut autopilot: Option<Autopilot>,
) -> std::io::Result<()> {
    let mut kind = start;
    let mut machine: Box<dyn Controller> = build(kind, config);
    let mut keys = KeyTracker::new();
    let mut input_macro = InputMacro::new();
    let mut history = History::new();
    let mut frame: u64 = 0;

    loop {
        let frame_start = Instant::now();
        frame += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(event) = rx.try_recv() {
            let Event::Key(KeyEvent {
                code,
                kind: event_kind,
                modifiers,
                ..
            }) = event
            else {
                continue;
            };
            keys.observe(code, event_kind, frame);
            if event_kind != KeyEventKind::Press {
                continue;
            }
            match code {
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return Ok(()),
                KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                    return Ok(());
                }
                KeyCode::Char('r') | KeyCode::Char('R') => {
                    input_macro.record(keys.snapshot(frame));
                }
                KeyCode::Char('e') | KeyCode::Char('E') => input_macro.start(),
                KeyCode::Char('p') | KeyCode::Char('P') => input_macro.toggle_pause(),
                KeyCode::Char('c') | KeyCode::Char('C') => input_macro.clear(),
                KeyCode::Char('z') | KeyCode::Char('Z') => input_macro.faster(),
                KeyCode::Char('x') | KeyCode::Char('X') => input_macro.slower(),
                KeyCode::Char('u') | KeyCode::Char('U') => {
                    history.undo(&mut machine);
                }
                KeyCode::Char('y') | KeyCode::Char('Y') => {
                    history.redo(&mut machine);
                }
                KeyCode::Tab => {
                    kind = kind.next();
                    machine = build(kind, config);
                    keys.clear();
                    history.clear();
                    log::info!("switched to {} controller", kind);
                }
                _ => {}
            }
        }

        // ── One simulation tick ───────────────────────────────────────────────
        let input = if let Some(replayed) = input_macro.poll() {
            replayed
        } else if input_macro.is_executing() {
            InputSnapshot::IDLE
        } else if let Some(pilot) = autopilot.as_mut() {
            pilot.next_input()
        } else {
            keys.snapshot(frame)
        };
        history.commit(&*machine, &input);
        machine.frame(&input);

        display::render(out, &*machine, &input_macro)?;

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            thread::sleep(FRAME - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let config = match &args.config {
        Some(path) => MachineConfig::load(path)
            .with_context(|| format!("loading machine config {}", path.display()))?,
        None => MachineConfig::default(),
    };
    let autopilot = args.autoplay.map(|seed| {
        log::info!("autoplay with seed {}", seed);
        Autopilot::new(seed)
    });

    let mut out = BufWriter::new(stdout());

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release events; terminals without support fall back to
    // the hold window in `KeyTracker`.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Blocking event reads on their own thread so the loop never waits on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break; // receiver dropped → program exiting
            }
        }
    });

    let result = game_loop(&mut out, &rx, &config, args.machine, autopilot);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result.context("terminal I/O failed")
}
