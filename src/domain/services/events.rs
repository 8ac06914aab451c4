#[cfg(test)]
#[path = "events_test.rs"]
mod tests;

use anyhow::Result;
use crossterm::event::Event as CrosstermEvent;
use crossterm::event::EventStream;
use crossterm::event::KeyEventKind;
use crossterm::event::MouseEventKind;
use futures::StreamExt;
use tokio::sync::mpsc;
use tokio::time;
use tui_textarea::Input;
use tui_textarea::Key;

use crate::domain::models::Event;

pub struct EventsService {
    crossterm_events: EventStream,
    events: mpsc::UnboundedReceiver<Event>,
}

impl EventsService {
    pub fn new(events: mpsc::UnboundedReceiver<Event>) -> EventsService {
        return EventsService {
            crossterm_events: EventStream::new(),
            events,
        };
    }

    fn handle_crossterm(&self, event: CrosstermEvent) -> Option<Event> {
        match event {
            CrosstermEvent::Paste(text) => {
                return Some(Event::KeyboardPaste(text));
            }
            CrosstermEvent::Mouse(mouseevent) => match mouseevent.kind {
                MouseEventKind::ScrollUp => {
                    return Some(Event::UIScrollUp());
                }
                MouseEventKind::ScrollDown => {
                    return Some(Event::UIScrollDown());
                }
                _ => {
                    return None;
                }
            },
            CrosstermEvent::Key(keyevent) => {
                // Windows reports releases as well as presses.
                if keyevent.kind == KeyEventKind::Release {
                    return None;
                }

                return Some(EventsService::handle_key(keyevent.into()));
            }
            _ => return None,
        }
    }

    fn handle_key(input: Input) -> Event {
        match input {
            Input { key: Key::Down, .. } => {
                return Event::UIScrollDown();
            }
            Input { key: Key::Up, .. } => {
                return Event::UIScrollUp();
            }
            Input {
                key: Key::PageDown, ..
            } => {
                return Event::UIScrollPageDown();
            }
            Input {
                key: Key::PageUp, ..
            } => {
                return Event::UIScrollPageUp();
            }
            Input {
                key: Key::Char('d'),
                ctrl: true,
                ..
            } => {
                return Event::UIScrollPageDown();
            }
            Input {
                key: Key::Char('u'),
                ctrl: true,
                ..
            } => {
                return Event::UIScrollPageUp();
            }
            Input {
                key: Key::Char('c'),
                ctrl: true,
                ..
            } => {
                return Event::KeyboardCTRLC();
            }
            Input {
                key: Key::Char('l'),
                ctrl: true,
                ..
            } => {
                return Event::KeyboardCTRLL();
            }
            Input {
                key: Key::Char('y'),
                ctrl: true,
                ..
            } => {
                return Event::KeyboardCTRLY();
            }
            Input {
                key: Key::Enter, ..
            } => {
                return Event::KeyboardEnter();
            }
            Input {
                key: Key::F(number @ 1..=2),
                ..
            } => {
                return Event::KeyboardQuickAsk(usize::from(number - 1));
            }
            input => {
                return Event::KeyboardCharInput(input);
            }
        }
    }

    pub async fn next(&mut self) -> Result<Event> {
        loop {
            let evt = tokio::select! {
                event = self.events.recv() => event,
                event = self.crossterm_events.next() => match event {
                    Some(Ok(input)) => self.handle_crossterm(input),
                    Some(Err(_)) => None,
                    None => None
                },
                _ = time::sleep(time::Duration::from_millis(500)) => Some(Event::UITick())
            };

            if let Some(event) = evt {
                return Ok(event);
            }
        }
    }
}
