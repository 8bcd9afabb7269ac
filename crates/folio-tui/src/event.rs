use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind, MouseEventKind};

/// Event handler for terminal events
pub struct EventHandler {
    tick_rate: Duration,
    frame_rate: Duration,
}

impl EventHandler {
    pub fn new(tick_rate_ms: u64) -> Self {
        Self {
            tick_rate: Duration::from_millis(tick_rate_ms),
            frame_rate: Duration::from_millis(16),
        }
    }

    /// Poll interval used while the page is animating
    pub fn with_frame_interval(mut self, interval: Duration) -> Self {
        self.frame_rate = interval.max(Duration::from_millis(1));
        self
    }

    /// Poll for the next event. `animating` shortens the wait so frames
    /// are delivered at animation rate.
    pub fn next(&self, animating: bool) -> Result<Option<AppEvent>> {
        let timeout = if animating {
            self.frame_rate
        } else {
            self.tick_rate
        };

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    // Only handle key press events, ignore release events
                    // (crossterm 0.27+ sends release events on some systems)
                    if key.kind == KeyEventKind::Press {
                        Ok(Some(AppEvent::Key(key)))
                    } else {
                        Ok(None)
                    }
                }
                Event::Mouse(mouse) => match mouse.kind {
                    MouseEventKind::ScrollDown => Ok(Some(AppEvent::Scroll(3))),
                    MouseEventKind::ScrollUp => Ok(Some(AppEvent::Scroll(-3))),
                    _ => Ok(None),
                },
                Event::Resize(w, h) => Ok(Some(AppEvent::Resize(w, h))),
                _ => Ok(None),
            }
        } else {
            Ok(Some(AppEvent::Tick))
        }
    }
}

/// Application events
#[derive(Debug)]
pub enum AppEvent {
    /// A key was pressed
    Key(KeyEvent),
    /// Mouse wheel, in rows
    Scroll(i32),
    /// Terminal was resized
    Resize(u16, u16),
    /// Tick event for periodic updates and animation frames
    Tick,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_interval() {
        let handler = EventHandler::new(100).with_frame_interval(Duration::from_millis(20));
        assert_eq!(handler.frame_rate, Duration::from_millis(20));
        assert_eq!(handler.tick_rate, Duration::from_millis(100));

        let handler = EventHandler::new(100).with_frame_interval(Duration::ZERO);
        assert_eq!(handler.frame_rate, Duration::from_millis(1));
    }
}
