//! Async event loop.
//!
//! The loop waits on whichever comes first: the next input event or the
//! app's next wakeup (an animation frame or a close deadline). Input comes
//! from an mpsc channel so tests can feed it directly; [`run`] fills that
//! channel from a blocking crossterm reader thread.
//!
//! The app clock is read through `tokio::time`, so a paused test runtime
//! advances close timers deterministically.

use std::thread;
use std::time::Instant;

use tokio::sync::mpsc;

use crate::app::{App, AppError};
use crate::event::input::InputEvent;

/// Input channel capacity.
const INPUT_BUFFER: usize = 64;

fn clock() -> Instant {
    tokio::time::Instant::now().into_std()
}

async fn sleep_until(wake: Option<Instant>) {
    match wake {
        Some(at) => tokio::time::sleep_until(tokio::time::Instant::from_std(at)).await,
        None => std::future::pending().await,
    }
}

/// Update, render and present one cycle.
fn cycle(app: &mut App) -> Result<(), AppError> {
    let now = clock();
    let closed = app.update(now);
    if !closed.is_empty() {
        tracing::debug!(?closed, "zones closed");
    }
    app.render(now);
    app.present()
}

/// Drive `app` until it quits or `input` is closed.
pub async fn run_loop(app: &mut App, mut input: mpsc::Receiver<InputEvent>) -> Result<(), AppError> {
    cycle(app)?;
    while !app.should_quit() {
        let wake = app.next_wakeup(clock());
        tokio::select! {
            event = input.recv() => match event {
                Some(event) => app.handle_input(event, clock()),
                None => {
                    tracing::debug!("input closed");
                    break;
                }
            },
            _ = sleep_until(wake) => {}
        }
        cycle(app)?;
    }
    Ok(())
}

/// Forward terminal events into `tx` until reading fails or the receiver
/// is gone.
fn spawn_reader(tx: mpsc::Sender<InputEvent>) -> thread::JoinHandle<()> {
    thread::spawn(move || loop {
        let event = match crossterm::event::read() {
            Ok(event) => InputEvent::from(event),
            Err(err) => {
                tracing::warn!(error = %err, "terminal input failed");
                return;
            }
        };
        if event == InputEvent::Ignored {
            continue;
        }
        if tx.blocking_send(event).is_err() {
            return;
        }
    })
}

/// Run `app` on the terminal until it quits.
///
/// The terminal is restored even when the loop fails.
pub fn run(mut app: App) -> Result<(), AppError> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()?;
    let (tx, rx) = mpsc::channel(INPUT_BUFFER);
    // The reader blocks in `read()`; it exits on the first event after the
    // receiver is dropped.
    let _reader = spawn_reader(tx);

    app.enter_terminal()?;
    let result = runtime.block_on(run_loop(&mut app, rx));
    app.leave_terminal()?;
    result
}

// ===========================================================================
// Tests
// ===========================================================================
