use std::io;

use anyhow::Result;
use crossterm::cursor;
use crossterm::event::DisableBracketedPaste;
use crossterm::event::DisableMouseCapture;
use crossterm::event::EnableBracketedPaste;
use crossterm::event::EnableMouseCapture;
use crossterm::terminal::disable_raw_mode;
use crossterm::terminal::enable_raw_mode;
use crossterm::terminal::EnterAlternateScreen;
use crossterm::terminal::LeaveAlternateScreen;
use ratatui::backend::CrosstermBackend;
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;
use ratatui::widgets::Scrollbar;
use ratatui::widgets::ScrollbarOrientation;
use ratatui::widgets::Wrap;
use ratatui::Terminal;
use tokio::sync::mpsc;
use tui_textarea::Input;
use tui_textarea::Key;

use crate::domain::models::Action;
use crate::domain::models::Endpoint;
use crate::domain::models::Event;
use crate::domain::models::Loading;
use crate::domain::models::SlashCommand;
use crate::domain::models::TextArea;
use crate::domain::services::clipboard::SystemClipboard;
use crate::domain::services::events::EventsService;
use crate::domain::services::AppState;
use crate::domain::services::Submission;
use crate::domain::services::QUICK_ASKS;

const COMMANDS_HINT: &str =
    "Commands: /clear /copy /quit | Keys: Enter send, F1/F2 quick ask, Ctrl+L clear, Ctrl+Y copy reply, Ctrl+C quit";

fn empty_conversation<'a>() -> Paragraph<'a> {
    return Paragraph::new(vec![
        Line::from(Span::styled(
            "Start with a question ✨",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("Try: What is Amazon S3? or Explain VPC peering"),
        Line::from(""),
        Line::from(
            QUICK_ASKS
                .iter()
                .enumerate()
                .map(|(idx, (label, _))| return format!("F{} {label}", idx + 1))
                .collect::<Vec<String>>()
                .join("   "),
        ),
        Line::from("Type /help for commands."),
    ])
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true });
}

fn status<'a>(app_state: &AppState) -> Paragraph<'a> {
    let colour = if app_state.loading {
        Color::Yellow
    } else if app_state.connected {
        Color::Green
    } else {
        Color::Red
    };

    let mut lines = vec![Line::from(Span::styled(
        app_state.status_line(),
        Style::default().fg(colour),
    ))];

    if !app_state.error.is_empty() {
        lines.push(Line::from(Span::styled(
            format!("Error: {}", app_state.error),
            Style::default().fg(Color::Red),
        )));
    } else if let Some(notice) = &app_state.notice {
        lines.push(Line::from(notice.to_string()));
    }

    return Paragraph::new(lines);
}

fn type_text(textarea: &mut tui_textarea::TextArea, text: &str) {
    for char in text.chars() {
        let key = if char == '\n' {
            Key::Enter
        } else {
            Key::Char(char)
        };

        textarea.input(Input {
            key,
            ctrl: false,
            alt: false,
        });
    }
}

async fn start_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app_state: &mut AppState,
    tx: mpsc::UnboundedSender<Action>,
    events: &mut EventsService,
) -> Result<()> {
    let mut textarea = TextArea::default();
    let mut loading = Loading::default();
    let clipboard = SystemClipboard::default();

    loop {
        terminal.draw(|frame| {
            let layout = Layout::default()
                .direction(Direction::Vertical)
                .constraints(vec![
                    Constraint::Min(1),
                    Constraint::Length(2),
                    Constraint::Max(4),
                ])
                .split(frame.size());

            if layout[0].width != app_state.last_known_width
                || layout[0].height != app_state.last_known_height
            {
                app_state.set_rect(layout[0]);
            }

            if app_state.bubble_list.is_empty() {
                frame.render_widget(empty_conversation(), layout[0]);
            } else {
                app_state
                    .bubble_list
                    .render(frame, layout[0], app_state.scroll.position);
                frame.render_stateful_widget(
                    Scrollbar::default().orientation(ScrollbarOrientation::VerticalRight),
                    layout[0].inner(&Margin {
                        vertical: 1,
                        horizontal: 0,
                    }),
                    &mut app_state.scroll.scrollbar_state,
                );
            }

            frame.render_widget(status(app_state), layout[1]);

            if app_state.loading {
                loading.render(frame, layout[2]);
            } else {
                frame.render_widget(textarea.widget(), layout[2]);
            }
        })?;

        match events.next().await? {
            Event::BackendReply(res) => {
                app_state.resolve(res);
            }
            Event::KeyboardCTRLC() => {
                break;
            }
            Event::KeyboardCTRLL() => {
                app_state.clear();
            }
            Event::KeyboardCTRLY() => {
                app_state.copy_last_reply(&clipboard);
            }
            Event::KeyboardEnter() => {
                if let Some(command) = SlashCommand::parse(&app_state.input) {
                    if command.is_quit() {
                        break;
                    }

                    if command.is_clear() {
                        app_state.clear();
                    } else if command.is_copy() {
                        app_state.copy_last_reply(&clipboard);
                    } else if command.is_help() {
                        app_state.set_notice(COMMANDS_HINT);
                    }

                    textarea = TextArea::default();
                    app_state.set_input("");
                    continue;
                }

                if let Submission::Pending(request) = app_state.begin_submit(None) {
                    textarea = TextArea::default();
                    tx.send(Action::BackendRequest(request))?;
                }
            }
            Event::KeyboardQuickAsk(index) => {
                if let Submission::Pending(request) = app_state.quick_ask(index) {
                    textarea = TextArea::default();
                    tx.send(Action::BackendRequest(request))?;
                }
            }
            Event::KeyboardCharInput(input) => {
                if app_state.composer_focused {
                    textarea.input(input);
                    app_state.set_input(&textarea.lines().join("\n"));
                }
            }
            Event::KeyboardPaste(text) => {
                if app_state.composer_focused {
                    type_text(&mut textarea, &text);
                    app_state.set_input(&textarea.lines().join("\n"));
                }
            }
            Event::UIScrollDown() => {
                app_state.scroll.down();
            }
            Event::UIScrollUp() => {
                app_state.scroll.up();
            }
            Event::UIScrollPageDown() => {
                app_state.scroll.down_page();
            }
            Event::UIScrollPageUp() => {
                app_state.scroll.up_page();
            }
            Event::UITick() => {
                loading.tick();
            }
        }
    }

    return Ok(());
}

pub fn destruct_terminal_for_panic() {
    let _ = disable_raw_mode();
    let _ = crossterm::execute!(
        io::stdout(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableBracketedPaste
    );
    let _ = crossterm::execute!(io::stdout(), cursor::Show);
}

pub async fn start(
    tx: mpsc::UnboundedSender<Action>,
    rx: mpsc::UnboundedReceiver<Event>,
    endpoint: Endpoint,
) -> Result<()> {
    let stdout = io::stdout();
    let mut stdout = stdout.lock();

    enable_raw_mode()?;
    crossterm::execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableBracketedPaste
    )?;
    let term_backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(term_backend)?;
    let mut app_state = AppState::new(endpoint);
    let mut events = EventsService::new(rx);

    let res = start_loop(&mut terminal, &mut app_state, tx, &mut events).await;

    disable_raw_mode()?;
    crossterm::execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableBracketedPaste
    )?;
    terminal.show_cursor()?;

    return res;
}
