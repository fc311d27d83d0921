//! Runtime state for one chat session.
//!
//! The `App` owns the transcript, the input buffer, the notice slot, and the
//! scroll state, and is touched only by the event loop. A completion is in
//! flight exactly while `awaiting_completion` is set; submission is gated on
//! it, so at most one call can ever be outstanding.

use std::time::Instant;

use crate::api::GenerationError;
use crate::core::transcript::{Transcript, Turn};
use crate::utils::scroll::ScrollCalculator;

/// App-authored feedback rendered beneath the transcript but never part of
/// it: command results, gateway errors, help text. One slot, replaced or
/// cleared by the next action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Info(String),
    Error(String),
}

impl Notice {
    pub fn text(&self) -> &str {
        match self {
            Notice::Info(text) | Notice::Error(text) => text,
        }
    }
}

pub struct App {
    pub transcript: Transcript,
    pub input: String,
    pub notice: Option<Notice>,
    pub awaiting_completion: bool,
    pub pulse_start: Instant,
    pub scroll_offset: u16,
    pub auto_scroll: bool,
    pub model: String,
}

impl App {
    pub fn new(model: String) -> Self {
        App {
            transcript: Transcript::new(),
            input: String::new(),
            notice: None,
            awaiting_completion: false,
            pulse_start: Instant::now(),
            scroll_offset: 0,
            auto_scroll: true,
            model,
        }
    }

    pub fn set_info(&mut self, text: impl Into<String>) {
        self.notice = Some(Notice::Info(text.into()));
    }

    pub fn set_error(&mut self, text: impl Into<String>) {
        self.notice = Some(Notice::Error(text.into()));
    }

    pub fn clear_notice(&mut self) {
        self.notice = None;
    }

    /// Record the user turn and enter `awaiting_completion`. The caller
    /// spawns the gateway call with the same prompt.
    pub fn begin_exchange(&mut self, prompt: String) {
        self.transcript.push(Turn::user(prompt));
        self.notice = None;
        self.awaiting_completion = true;
        self.pulse_start = Instant::now();
        self.auto_scroll = true;
    }

    /// Fold a finished gateway call back into the session and return to
    /// idle. Success appends the assistant turn; failure leaves the
    /// transcript with the user turn only and surfaces the error inline.
    pub fn complete_exchange(&mut self, result: Result<String, GenerationError>) {
        match result {
            Ok(text) => self.transcript.push(Turn::assistant(text)),
            Err(e) => self.set_error(format!("Gemini error: {e}")),
        }
        self.awaiting_completion = false;
    }

    pub fn clear_transcript(&mut self) {
        self.transcript.clear();
        self.scroll_offset = 0;
        self.auto_scroll = true;
    }

    pub fn build_display_lines(&self) -> Vec<ratatui::text::Line<'static>> {
        ScrollCalculator::build_display_lines(
            &self.transcript,
            self.notice.as_ref(),
            self.awaiting_completion,
        )
    }

    pub fn calculate_wrapped_line_count(&self, terminal_width: u16) -> u16 {
        let lines = self.build_display_lines();
        ScrollCalculator::calculate_wrapped_line_count(&lines, terminal_width)
    }

    pub fn calculate_max_scroll_offset(&self, terminal_width: u16, available_height: u16) -> u16 {
        let total_wrapped_lines = self.calculate_wrapped_line_count(terminal_width);
        total_wrapped_lines.saturating_sub(available_height)
    }

    /// Snap to the bottom of the transcript when auto-scroll is on.
    pub fn update_scroll_position(&mut self, terminal_width: u16, available_height: u16) {
        if self.auto_scroll {
            self.scroll_offset = self.calculate_max_scroll_offset(terminal_width, available_height);
        }
    }

    pub fn scroll_up(&mut self, lines: u16, terminal_width: u16, available_height: u16) {
        self.auto_scroll = false;
        self.scroll_offset = self.scroll_offset.saturating_sub(lines);
        if self.scroll_offset >= self.calculate_max_scroll_offset(terminal_width, available_height)
        {
            self.auto_scroll = true;
        }
    }

    pub fn scroll_down(&mut self, lines: u16, terminal_width: u16, available_height: u16) {
        let max_scroll = self.calculate_max_scroll_offset(terminal_width, available_height);
        self.scroll_offset = self.scroll_offset.saturating_add(lines).min(max_scroll);
        if self.scroll_offset >= max_scroll {
            self.auto_scroll = true;
        } else {
            self.auto_scroll = false;
        }
    }
}
