//! Slash commands typed into the input box: `/help`, `/clear`, `/save`.
//!
//! Input that starts with `/` but matches no command falls through to the
//! model as an ordinary message.

use std::fs;

use chrono::{DateTime, Local};

use crate::core::app::App;

pub enum CommandResult {
    Continue,
    ProcessAsMessage(String),
}

const HELP_TEXT: &str = "Commands: /help  /clear  /save [filename]  \
    Keys: Enter send, Up/Down/Mouse scroll, Ctrl+C quit";

pub fn process_input(app: &mut App, input: &str) -> CommandResult {
    let trimmed = input.trim();
    if !trimmed.starts_with('/') {
        return CommandResult::ProcessAsMessage(input.to_string());
    }

    let parts: Vec<&str> = trimmed.split_whitespace().collect();
    match parts[0].to_ascii_lowercase().as_str() {
        "/help" => {
            app.set_info(HELP_TEXT);
            CommandResult::Continue
        }
        "/clear" => {
            app.clear_transcript();
            app.set_info("Chat history cleared.");
            CommandResult::Continue
        }
        "/save" => {
            save_transcript(app, parts.get(1).copied());
            CommandResult::Continue
        }
        // Not a known command, send it to the model as-is
        _ => CommandResult::ProcessAsMessage(input.to_string()),
    }
}

/// Write the transcript to a text file. With no filename the name embeds
/// the current local time to the second.
fn save_transcript(app: &mut App, filename: Option<&str>) {
    if app.transcript.is_empty() {
        app.set_error("Nothing to save yet. Start chatting to export history.");
        return;
    }

    let filename = match filename {
        Some(name) => name.to_string(),
        None => export_filename(Local::now()),
    };

    match fs::write(&filename, app.transcript.to_plain_text()) {
        Ok(()) => {
            tracing::info!(file = %filename, turns = app.transcript.len(), "chat log saved");
            app.set_info(format!("Chat log saved to {filename}"));
        }
        Err(e) => {
            app.set_error(format!("Failed to save chat log: {e}"));
        }
    }
}

pub fn export_filename(now: DateTime<Local>) -> String {
    format!("chat_history_{}.txt", now.format("%Y-%m-%d_%H-%M-%S"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::app::Notice;
    use chrono::TimeZone;

    fn app_with_exchange() -> App {
        let mut app = App::new("test-model".to_string());
        app.begin_exchange("Hello".to_string());
        app.complete_exchange(Ok("Hi there".to_string()));
        app
    }

    #[test]
    fn export_filename_embeds_timestamp_to_the_second() {
        let now = Local.with_ymd_and_hms(2026, 8, 30, 13, 5, 9).unwrap();
        assert_eq!(export_filename(now), "chat_history_2026-08-30_13-05-09.txt");
    }

    #[test]
    fn save_writes_one_line_per_turn() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("log.txt");
        let mut app = app_with_exchange();

        let result = process_input(&mut app, &format!("/save {}", path.display()));
        assert!(matches!(result, CommandResult::Continue));

        let body = fs::read_to_string(&path).unwrap();
        assert_eq!(body, "User: Hello\nAssistant: Hi there");
        match &app.notice {
            Some(Notice::Info(text)) => assert!(text.contains("saved")),
            other => panic!("expected info notice, got {other:?}"),
        }
    }

    #[test]
    fn save_with_empty_transcript_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("log.txt");
        let mut app = App::new("test-model".to_string());

        process_input(&mut app, &format!("/save {}", path.display()));
        assert!(!path.exists());
        assert!(matches!(app.notice, Some(Notice::Error(_))));
    }

    #[test]
    fn save_failure_surfaces_an_error_notice() {
        let mut app = app_with_exchange();
        process_input(&mut app, "/save no/such/dir/log.txt");
        assert!(matches!(app.notice, Some(Notice::Error(_))));
    }

    #[test]
    fn clear_empties_the_transcript() {
        let mut app = app_with_exchange();
        let result = process_input(&mut app, "/clear");
        assert!(matches!(result, CommandResult::Continue));
        assert!(app.transcript.is_empty());
        assert!(matches!(app.notice, Some(Notice::Info(_))));
    }

    #[test]
    fn command_names_match_case_insensitively() {
        let mut app = app_with_exchange();
        process_input(&mut app, "/CLEAR");
        assert!(app.transcript.is_empty());
    }

    #[test]
    fn help_sets_an_info_notice() {
        let mut app = App::new("test-model".to_string());
        process_input(&mut app, "/help");
        match &app.notice {
            Some(Notice::Info(text)) => assert!(text.contains("/save")),
            other => panic!("expected info notice, got {other:?}"),
        }
    }

    #[test]
    fn unknown_slash_input_falls_through_as_a_message() {
        let mut app = App::new("test-model".to_string());
        match process_input(&mut app, "/whatisthis") {
            CommandResult::ProcessAsMessage(text) => assert_eq!(text, "/whatisthis"),
            CommandResult::Continue => panic!("unknown command should fall through"),
        }
    }

    #[test]
    fn plain_text_input_is_a_message() {
        let mut app = App::new("test-model".to_string());
        match process_input(&mut app, "hello there") {
            CommandResult::ProcessAsMessage(text) => assert_eq!(text, "hello there"),
            CommandResult::Continue => panic!("plain input should be a message"),
        }
    }
}
