//! Terminal driver for the kitchen timer.

use rb_core::{KitchenTimer, TickOutcome};

use std::io::Write;
use std::time::Duration;

use log::debug;
use serde_json::{Value, json};

const TICK: Duration = Duration::from_secs(1);
const BELL: &str = "\x07";

/// Count `timer` down to zero, redrawing the display every second.
///
/// Ctrl-C pauses the timer and returns early. On completion the terminal
/// bell rings once per second for `finished_cue`.
pub async fn countdown(timer: &mut KitchenTimer, finished_cue: Duration) -> Value {
    let mut ticker = tokio::time::interval(TICK);
    // The first tick completes immediately
    ticker.tick().await;

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    redraw(timer);

    loop {
        tokio::select! {
            _ = ticker.tick() => match timer.tick() {
                TickOutcome::Running { .. } => redraw(timer),
                TickOutcome::Finished => {
                    redraw(timer);
                    eprintln!();
                    ring(finished_cue).await;
                    timer.acknowledge_finished();
                    return json!({ "status": "finished" });
                }
                TickOutcome::Idle => return status(timer, "idle"),
            },
            _ = &mut ctrl_c => {
                timer.pause();
                eprintln!();
                debug!("Timer paused at {}", timer.display());
                return status(timer, "paused");
            }
        }
    }
}

fn status(timer: &KitchenTimer, status: &str) -> Value {
    json!({
        "status": status,
        "remaining": timer.display(),
        "remaining_secs": timer.remaining_secs(),
    })
}

fn redraw(timer: &KitchenTimer) {
    let mut err = std::io::stderr();
    let _ = write!(err, "\r{}", timer.display());
    let _ = err.flush();
}

async fn ring(cue: Duration) {
    let rings = cue.as_secs().max(1);
    for _ in 0..rings {
        eprint!("{BELL}");
        tokio::time::sleep(TICK).await;
    }
}
