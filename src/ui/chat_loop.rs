//! Terminal setup and the interactive event loop.
//!
//! One tick: draw, poll input for 50ms, then drain any finished completion
//! from the channel. The gateway call runs on a spawned task; its only
//! contact with the loop is the `Result` it sends back. Submission is gated
//! while a call is in flight, so at most one result can ever be pending.

use std::{error::Error, io, time::Duration};

use ratatui::crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers, MouseEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;

use crate::api::{GeminiClient, GenerationError};
use crate::commands::{process_input, CommandResult};
use crate::core::app::App;
use crate::ui::renderer::ui;

pub async fn run_chat(client: GeminiClient) -> Result<(), Box<dyn Error>> {
    let mut app = App::new(client.model().to_string());

    // Setup terminal only after successful client creation
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Channel carrying the outcome of the in-flight completion back to the loop
    let (tx, mut rx) = mpsc::unbounded_channel::<Result<String, GenerationError>>();

    let result = loop {
        terminal.draw(|f| ui(f, &app))?;

        // Transcript viewport: full height minus input box and title line
        let term_size = terminal.size().unwrap_or_default();
        let available_height = term_size.height.saturating_sub(3).saturating_sub(1);
        let term_width = term_size.width;

        if event::poll(Duration::from_millis(50))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                    KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                        // Always honored, even mid-call; the task is abandoned
                        break Ok(());
                    }
                    KeyCode::Enter => {
                        if app.awaiting_completion {
                            continue;
                        }
                        let input_text = app.input.trim().to_string();
                        if input_text.is_empty() {
                            continue;
                        }
                        app.input.clear();

                        match process_input(&mut app, &input_text) {
                            CommandResult::Continue => {}
                            CommandResult::ProcessAsMessage(text) => {
                                app.begin_exchange(text.clone());

                                let tx = tx.clone();
                                let client = client.clone();
                                tokio::spawn(async move {
                                    let result = client.generate(&text).await;
                                    let _ = tx.send(result);
                                });
                            }
                        }
                        app.update_scroll_position(term_width, available_height);
                    }
                    KeyCode::Char(c) => {
                        app.input.push(c);
                    }
                    KeyCode::Backspace => {
                        app.input.pop();
                    }
                    KeyCode::Up => {
                        app.scroll_up(1, term_width, available_height);
                    }
                    KeyCode::Down => {
                        app.scroll_down(1, term_width, available_height);
                    }
                    _ => {}
                },
                Event::Mouse(mouse) => match mouse.kind {
                    MouseEventKind::ScrollUp => {
                        app.scroll_up(3, term_width, available_height);
                    }
                    MouseEventKind::ScrollDown => {
                        app.scroll_down(3, term_width, available_height);
                    }
                    _ => {}
                },
                _ => {}
            }
        }

        // Fold a finished completion back into the session
        while let Ok(completion) = rx.try_recv() {
            app.complete_exchange(completion);
            app.update_scroll_position(term_width, available_height);
        }
    };

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}
