//! TUI effects boundary: event loop, terminal lifecycle, workers.
//!
//! This is the only module with side effects. It wires the pure
//! layers (state, update, layout, view) to the real terminal via
//! crossterm and ratatui.
//!
//! Architecture: producer threads feed a single mpsc channel. A
//! reader thread forwards terminal events; each contact form
//! submission spawns a short-lived worker that posts from off the
//! event loop and reports its outcome back over the same channel.
//! The loop itself blocks on the channel with a timeout tracking the
//! next timer deadline, so typewriter steps fire on schedule without
//! busy polling.

use std::io;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind, MouseButton,
    MouseEvent, MouseEventKind,
};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use crate::relay::{FormRelay, HttpRelay};
use crate::types::ContactFields;

use super::state::{App, AppEvent};
use super::update;
use super::view::{self, HitMap};

/// Idle tick when no timer is pending.
const IDLE_TICK: Duration = Duration::from_millis(250);

// ============================================================================
// TERMINAL LIFECYCLE
// ============================================================================

/// Set up the terminal for TUI mode.
fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    io::stdout().execute(EnterAlternateScreen)?;
    io::stdout().execute(EnableMouseCapture)?;
    let backend = CrosstermBackend::new(io::stdout());
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore the terminal to normal mode.
fn restore_terminal() -> io::Result<()> {
    io::stdout().execute(DisableMouseCapture)?;
    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

/// Install a panic hook that restores the terminal before printing
/// the panic.
fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal();
        original_hook(panic_info);
    }));
}

// ============================================================================
// BACKGROUND THREADS
// ============================================================================

/// Spawn a thread that reads crossterm events and forwards the ones
/// the app consumes.
fn spawn_event_reader(tx: mpsc::Sender<AppEvent>) {
    thread::spawn(move || loop {
        let forwarded = match event::read() {
            Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                tx.send(AppEvent::Key(key))
            }
            Ok(Event::Mouse(mouse)) if is_click(&mouse) => tx.send(AppEvent::Click(mouse)),
            Ok(Event::Resize(_, _)) => tx.send(AppEvent::Resize),
            Ok(_) => Ok(()),
            Err(_) => break,
        };
        if forwarded.is_err() {
            break; // receiver dropped, TUI is shutting down
        }
    });
}

fn is_click(mouse: &MouseEvent) -> bool {
    matches!(mouse.kind, MouseEventKind::Down(MouseButton::Left))
}

/// Spawn a worker that posts one submission and reports the outcome.
fn spawn_submitter(endpoint: String, fields: ContactFields, tx: mpsc::Sender<AppEvent>) {
    thread::spawn(move || {
        let relay = HttpRelay::new();
        let outcome = relay.post(&endpoint, &fields);
        // Best-effort: if the receiver is gone the TUI already quit.
        let _ = tx.send(AppEvent::FormResult(outcome));
    });
}

// ============================================================================
// EVENT LOOP
// ============================================================================

/// Run the TUI until the user quits.
pub fn run(mut app: App) -> io::Result<()> {
    install_panic_hook();
    let mut terminal = setup_terminal()?;

    let (tx, rx) = mpsc::channel::<AppEvent>();
    spawn_event_reader(tx.clone());

    let started = Instant::now();
    let mut hits = HitMap::default();

    loop {
        let now = started.elapsed();

        // Timers first: due typewriter steps mutate the page the
        // frame below will draw.
        while let Some(timer) = app.timers.pop_due(now) {
            update::handle_timer(&mut app, timer, now);
        }

        // Viewport geometry feeds the reveal observer.
        let size = terminal.size()?;
        app.viewport_height = size.height.saturating_sub(2) as usize;
        update::clamp_scroll(&mut app);
        update::refresh_reveals(&mut app, now);

        // Hand any freshly accepted submission to a worker.
        if let Some((endpoint, fields)) = app.pending_submit.take() {
            spawn_submitter(endpoint, fields, tx.clone());
        }

        terminal.draw(|frame| {
            hits = view::render(&app, frame);
        })?;

        if app.should_quit {
            break;
        }

        // Sleep until the next timer or the next external event.
        let timeout = match app.timers.next_due() {
            Some(due) => due.saturating_sub(started.elapsed()).min(IDLE_TICK),
            None => IDLE_TICK,
        };

        match rx.recv_timeout(timeout) {
            Ok(AppEvent::Key(key)) => {
                let now = started.elapsed();
                if let Some(action) = update::map_key(key, app.is_editing()) {
                    update::apply(&mut app, action, now);
                }
            }
            Ok(AppEvent::Click(mouse)) => {
                let now = started.elapsed();
                let target = hits.resolve(mouse.column, mouse.row);
                update::apply_click(&mut app, target, now);
            }
            Ok(AppEvent::Resize) => {
                // Geometry is recomputed at the top of the loop.
            }
            Ok(AppEvent::FormResult(outcome)) => {
                update::handle_form_result(&mut app, &outcome);
            }
            Err(mpsc::RecvTimeoutError::Timeout) => {
                // Fall through; due timers drain next iteration.
            }
            Err(mpsc::RecvTimeoutError::Disconnected) => break,
        }
    }

    restore_terminal()?;
    Ok(())
}
