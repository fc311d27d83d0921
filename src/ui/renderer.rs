use crate::core::app::App;
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

pub fn ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(f.area());

    let lines = app.build_display_lines();

    // Calculate scroll position using wrapped line count
    let available_height = chunks[0].height.saturating_sub(1); // Account for title
    let total_wrapped_lines = app.calculate_wrapped_line_count(chunks[0].width);

    // Always use the app's scroll_offset, but ensure it's within bounds
    let max_offset = total_wrapped_lines.saturating_sub(available_height);
    let scroll_offset = app.scroll_offset.min(max_offset);

    let title = format!(
        "Gemcha v{} ({}) - ask anything, powered by Google Gemini",
        env!("CARGO_PKG_VERSION"),
        app.model
    );

    let transcript_paragraph = Paragraph::new(lines)
        .block(Block::default().title(title))
        .wrap(Wrap { trim: true })
        .scroll((scroll_offset, 0));

    f.render_widget(transcript_paragraph, chunks[0]);

    let input_style = if app.awaiting_completion {
        Style::default()
    } else {
        Style::default().fg(Color::Cyan)
    };

    let input_title = if app.awaiting_completion {
        "Waiting for Gemini (Up/Down/Mouse to scroll, Ctrl+C to quit)"
    } else {
        "Type your message (Enter to send, /help for help, Ctrl+C to quit)"
    };

    // Show a pulse indicator at the right edge of the input box while a
    // completion is in flight.
    let input_text = if app.awaiting_completion {
        // Pulse animation, two cycles per second
        let elapsed = app.pulse_start.elapsed().as_millis() as f32 / 1000.0;
        let pulse_phase = (elapsed * 2.0) % 2.0;
        let pulse_intensity = if pulse_phase < 1.0 {
            pulse_phase
        } else {
            2.0 - pulse_phase
        };

        let symbol = if pulse_intensity < 0.33 {
            '○'
        } else if pulse_intensity < 0.66 {
            '◐'
        } else {
            '●'
        };

        // Build a string exactly inner_width characters long with the
        // indicator always at the last position before the border padding.
        let inner_width = chunks[1].width.saturating_sub(2) as usize;
        let mut result = vec![' '; inner_width];

        let input_chars: Vec<char> = app.input.chars().collect();
        let max_input_len = inner_width.saturating_sub(3);

        for (i, &ch) in input_chars.iter().take(max_input_len).enumerate() {
            result[i] = ch;
        }

        // If input was too long, add ellipsis
        if input_chars.len() > max_input_len && max_input_len >= 3 {
            result[max_input_len - 3] = '.';
            result[max_input_len - 2] = '.';
            result[max_input_len - 1] = '.';
        }

        if inner_width > 1 {
            result[inner_width - 2] = symbol;
        }

        result.into_iter().collect()
    } else {
        app.input.clone()
    };

    let input = Paragraph::new(input_text.as_str())
        .style(input_style)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Reset))
                .title(input_title),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(input, chunks[1]);

    // Set cursor position (limit to avoid overlapping with the indicator)
    let max_cursor_pos = if app.awaiting_completion {
        chunks[1].width.saturating_sub(6)
    } else {
        chunks[1].width.saturating_sub(2)
    };
    let cursor_x = (app.input.chars().count() as u16 + 1).min(max_cursor_pos);
    f.set_cursor_position((chunks[1].x + cursor_x, chunks[1].y + 1));
}
