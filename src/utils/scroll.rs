use crate::core::app::Notice;
use crate::core::transcript::{Role, Transcript, Turn};
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

/// Handles all scroll-related calculations and line building
pub struct ScrollCalculator;

impl ScrollCalculator {
    /// Build display lines for the transcript, the notice slot, and the
    /// thinking indicator.
    pub fn build_display_lines(
        transcript: &Transcript,
        notice: Option<&Notice>,
        thinking: bool,
    ) -> Vec<Line<'static>> {
        let mut lines = Vec::new();

        for turn in transcript.turns() {
            Self::add_turn_lines(&mut lines, turn);
        }

        if let Some(notice) = notice {
            let style = match notice {
                Notice::Info(_) => Style::default().fg(Color::DarkGray),
                Notice::Error(_) => Style::default().fg(Color::Red),
            };
            lines.push(Line::from(Span::styled(notice.text().to_string(), style)));
            lines.push(Line::from(""));
        }

        if thinking {
            lines.push(Line::from(Span::styled(
                "Gemini is thinking...",
                Style::default().fg(Color::DarkGray),
            )));
            lines.push(Line::from(""));
        }

        lines
    }

    /// Add lines for a single turn to the lines vector
    fn add_turn_lines(lines: &mut Vec<Line<'static>>, turn: &Turn) {
        match turn.role {
            Role::User => {
                // User turns: cyan with "You:" prefix
                lines.push(Line::from(vec![
                    Span::styled(
                        "You: ",
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(turn.content.clone(), Style::default().fg(Color::Cyan)),
                ]));
                lines.push(Line::from("")); // Empty line for spacing
            }
            Role::Assistant => {
                // Assistant turns: no prefix, content in white/default color.
                // Split content into lines for proper wrapping.
                for content_line in turn.content.lines() {
                    if content_line.trim().is_empty() {
                        lines.push(Line::from(""));
                    } else {
                        lines.push(Line::from(Span::styled(
                            content_line.to_string(),
                            Style::default().fg(Color::White),
                        )));
                    }
                }
                lines.push(Line::from("")); // Empty line for spacing
            }
        }
    }

    /// Calculate how many wrapped lines the given lines will take
    pub fn calculate_wrapped_line_count(lines: &[Line], terminal_width: u16) -> u16 {
        let mut total_wrapped_lines = 0u16;

        for line in lines {
            let line_text = line.to_string();
            // Trim whitespace to match ratatui's Wrap { trim: true } behavior
            let trimmed_text = line_text.trim();

            if trimmed_text.is_empty() || terminal_width == 0 {
                total_wrapped_lines = total_wrapped_lines.saturating_add(1);
            } else {
                let wrapped_count = Self::calculate_word_wrapped_lines(trimmed_text, terminal_width);
                total_wrapped_lines = total_wrapped_lines.saturating_add(wrapped_count);
            }
        }

        total_wrapped_lines
    }

    /// Calculate how many lines a single text string will wrap to
    fn calculate_word_wrapped_lines(text: &str, terminal_width: u16) -> u16 {
        let mut current_line_len = 0;
        let mut line_count = 1u16;

        for word in text.split_whitespace() {
            let word_len = word.chars().count();

            // Start new line if adding this word would exceed width
            if current_line_len > 0 && current_line_len + 1 + word_len > terminal_width as usize {
                line_count = line_count.saturating_add(1);
                current_line_len = word_len;
            } else {
                if current_line_len > 0 {
                    current_line_len += 1; // Add space
                }
                current_line_len += word_len;
            }
        }

        line_count
    }
}
