//! Event polling for the TUI
//!
//! The loop runs on one thread. It waits for terminal input only until the
//! next chart frame is due, so animation ticks and key presses interleave
//! without a reader thread.

use crossterm::event::{self, Event as CrosstermEvent, KeyEvent, KeyEventKind};
use std::time::{Duration, Instant};

use crate::chart::{FrameTick, TimerQueue};

/// How long to block when no frame is pending
pub const IDLE_POLL: Duration = Duration::from_millis(250);

/// Events the handler acts on
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Key(KeyEvent),
    Resize(u16, u16),
    /// A chart frame came due
    Frame(FrameTick),
}

/// Time to wait for input before the next timer fires
pub fn poll_timeout(timers: &TimerQueue, now: Instant) -> Duration {
    timers
        .time_until_next(now)
        .map(|wait| wait.min(IDLE_POLL))
        .unwrap_or(IDLE_POLL)
}

/// Wait for the next batch of events
///
/// Returns terminal input if any arrived before the deadline, then every
/// timer that is due.
pub fn next_events(timers: &mut TimerQueue) -> std::io::Result<Vec<Event>> {
    let mut events = Vec::new();

    if event::poll(poll_timeout(timers, Instant::now()))? {
        match event::read()? {
            // Windows reports releases too
            CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => {
                events.push(Event::Key(key));
            }
            CrosstermEvent::Resize(width, height) => events.push(Event::Resize(width, height)),
            _ => {}
        }
    }

    events.extend(timers.pop_due(Instant::now()).into_iter().map(Event::Frame));
    Ok(events)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_poll_timeout_idle() {
        let timers = TimerQueue::new();
        assert_eq!(poll_timeout(&timers, Instant::now()), IDLE_POLL);
    }

    #[test]
    fn test_poll_timeout_waits_for_next_frame() {
        let mut timers = TimerQueue::new();
        let now = Instant::now();
        timers.schedule_at(now + Duration::from_millis(8), FrameTick { session: 1, frame: 1 });

        let timeout = poll_timeout(&timers, now);
        assert!(timeout <= Duration::from_millis(8));
    }

    #[test]
    fn test_poll_timeout_overdue_is_zero() {
        let mut timers = TimerQueue::new();
        let now = Instant::now();
        timers.schedule_at(now, FrameTick { session: 1, frame: 1 });

        let later = now + Duration::from_millis(5);
        assert_eq!(poll_timeout(&timers, later), Duration::ZERO);
    }
}
