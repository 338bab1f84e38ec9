use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::time::Instant;
use tokio::task::JoinHandle;

use crate::capture::{classify, Classification, Kind};
use crate::config::AppConfig;
use crate::modules::{default_modules, Module};
use crate::voice::{self, VoiceError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Capture,
    Preview,
    Modules,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Popup {
    None,
    Help,
}

/// In-memory tallies for the "Today's Overview" box. Reset on every launch.
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionStats {
    pub captured: usize,
    pub accepted_tasks: usize,
    pub accepted_events: usize,
    pub accepted_notes: usize,
}

pub struct App {
    pub section: Section,
    pub popup: Popup,

    // Capture box
    pub input_buffer: String,
    pub recording: bool,

    // Pending classification. Single slot: replaced by the next capture,
    // cleared on accept or reject.
    pub pending: Option<Classification>,

    // Module cards (bottom grid)
    pub modules: Vec<Module>,
    pub selected_module: usize,

    pub config: AppConfig,
    pub stats: SessionStats,

    // Status message (shown in info line, auto-clears after timeout)
    pub status_message: Option<String>,
    pub status_message_time: Option<Instant>,

    // In-flight voice recognition session, at most one
    voice_task: Option<JoinHandle<Result<String, VoiceError>>>,
}

impl App {
    pub fn new() -> Self {
        let config = AppConfig::load().unwrap_or_default();
        Self::with_config(config)
    }

    pub fn with_config(config: AppConfig) -> Self {
        Self {
            section: Section::Capture,
            popup: Popup::None,

            input_buffer: String::new(),
            recording: false,

            pending: None,

            modules: default_modules(),
            selected_module: 0,

            config,
            stats: SessionStats::default(),

            status_message: None,
            status_message_time: None,

            voice_task: None,
        }
    }

    /// Set a status message (auto-clears after 3 seconds)
    fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some(msg.into());
        self.status_message_time = Some(Instant::now());
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        // Handle popups first
        if self.popup != Popup::None {
            return self.handle_popup_key(key);
        }

        // Global keys
        match key.code {
            KeyCode::F(1) => {
                self.popup = Popup::Help;
                return Ok(());
            }
            KeyCode::Tab => {
                self.section = self.next_section();
                return Ok(());
            }
            KeyCode::BackTab => {
                self.section = self.prev_section();
                return Ok(());
            }
            _ => {}
        }

        match self.section {
            Section::Capture => self.handle_capture_key(key),
            Section::Preview => self.handle_preview_key(key),
            Section::Modules => self.handle_modules_key(key),
        }
    }

    fn next_section(&self) -> Section {
        match self.section {
            Section::Capture if self.pending.is_some() => Section::Preview,
            Section::Capture => Section::Modules,
            Section::Preview => Section::Modules,
            Section::Modules => Section::Capture,
        }
    }

    fn prev_section(&self) -> Section {
        match self.section {
            Section::Capture => Section::Modules,
            Section::Preview => Section::Capture,
            Section::Modules if self.pending.is_some() => Section::Preview,
            Section::Modules => Section::Capture,
        }
    }

    fn handle_popup_key(&mut self, key: KeyEvent) -> Result<()> {
        match self.popup {
            Popup::Help => {
                if matches!(
                    key.code,
                    KeyCode::Esc | KeyCode::F(1) | KeyCode::Enter | KeyCode::Char('q')
                ) {
                    self.popup = Popup::None;
                }
                Ok(())
            }
            Popup::None => Ok(()),
        }
    }

    fn handle_capture_key(&mut self, key: KeyEvent) -> Result<()> {
        // Ctrl+R toggles the voice session
        if key.code == KeyCode::Char('r') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.toggle_voice();
            return Ok(());
        }

        match key.code {
            KeyCode::Esc => {
                if self.recording {
                    self.cancel_voice();
                } else {
                    self.input_buffer.clear();
                }
            }
            KeyCode::Enter => {
                let text = self.input_buffer.clone();
                if self.submit_capture(&text, false) {
                    self.input_buffer.clear();
                }
            }
            KeyCode::Backspace => {
                self.input_buffer.pop();
            }
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.input_buffer.clear();
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.input_buffer.push(c);
            }
            _ => {}
        }
        Ok(())
    }

    fn handle_preview_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Char('y') | KeyCode::Enter => self.accept_pending(),
            KeyCode::Char('n') | KeyCode::Char('d') | KeyCode::Esc => self.reject_pending(),
            KeyCode::Char('e') => self.edit_pending_external()?,
            KeyCode::Char('?') => self.popup = Popup::Help,
            _ => {}
        }
        Ok(())
    }

    fn handle_modules_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Left | KeyCode::Char('h') => {
                if !self.modules.is_empty() {
                    self.selected_module = self
                        .selected_module
                        .checked_sub(1)
                        .unwrap_or(self.modules.len() - 1);
                }
            }
            KeyCode::Right | KeyCode::Char('l') => {
                if !self.modules.is_empty() {
                    self.selected_module = (self.selected_module + 1) % self.modules.len();
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') => self.open_module(),
            KeyCode::Char('?') => self.popup = Popup::Help,
            _ => {}
        }
        Ok(())
    }

    /// Submit one capture. Returns false (and does nothing) for
    /// empty/whitespace-only input.
    pub fn submit_capture(&mut self, text: &str, was_voice: bool) -> bool {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return false;
        }

        let record = classify(trimmed);
        tracing::debug!(
            id = %record.id,
            kind = record.kind.label(),
            was_voice,
            "classified capture"
        );

        self.pending = Some(record);
        self.stats.captured += 1;
        self.section = Section::Preview;
        true
    }

    /// Accept the pending classification: bump counters, notify, clear.
    /// There is no storage behind the modules yet, so accepting only logs.
    pub fn accept_pending(&mut self) {
        if let Some(record) = self.pending.take() {
            tracing::info!(
                id = %record.id,
                kind = record.kind.label(),
                title = %record.title,
                "accepted capture"
            );

            match record.kind {
                Kind::Task => self.stats.accepted_tasks += 1,
                Kind::Event => self.stats.accepted_events += 1,
                Kind::Note | Kind::Custom => self.stats.accepted_notes += 1,
            }

            let mut destination = "Inbox";
            if let Some(module) = self
                .modules
                .iter_mut()
                .find(|m| m.kind == Some(record.kind))
            {
                module.count += 1;
                destination = module.title;
            }

            if self.config.notifications {
                let _ = crate::notify(
                    "Added successfully",
                    &format!("\"{}\" has been added to {}", record.title, destination),
                );
            }

            self.set_status(format!("Added \"{}\" to {}", record.title, destination));
            self.section = Section::Capture;
        }
    }

    /// Discard the pending classification
    pub fn reject_pending(&mut self) {
        if self.pending.take().is_some() {
            self.set_status("Discarded");
            self.section = Section::Capture;
        }
    }

    /// Edit the pending record in an external editor (opens a new terminal
    /// window so the TUI stays intact). The record round-trips through a
    /// temp TOML file; a failed parse leaves it unchanged.
    fn edit_pending_external(&mut self) -> Result<()> {
        let Some(record) = self.pending.clone() else {
            return Ok(());
        };

        let path = std::env::temp_dir().join(format!("braintwo-{}.toml", record.id));
        std::fs::write(&path, toml::to_string_pretty(&record)?)?;

        let editor = std::env::var("EDITOR").unwrap_or_else(|_| "vi".to_string());
        let edit_cmd_string = format!("{} '{}'", editor, path.display());
        let edit_cmd: &str = &edit_cmd_string;
        let title = "Edit capture";

        // Try common terminal emulators (foot is the default on Omarchy)
        let terminals = [
            ("foot", vec!["--title", title, "-W", "80x24", "-e", "sh", "-c", edit_cmd]),
            ("kitty", vec!["--title", title, "-e", "sh", "-c", edit_cmd]),
            ("alacritty", vec!["--title", title, "-e", "sh", "-c", edit_cmd]),
            ("gnome-terminal", vec!["--title", title, "--geometry=80x24", "--", "sh", "-c", edit_cmd]),
            ("xterm", vec!["-title", title, "-geometry", "80x24", "-e", "sh", "-c", edit_cmd]),
        ];

        let mut spawned = false;
        for (term, args) in &terminals {
            if let Ok(mut child) = std::process::Command::new(term).args(args).spawn() {
                let _ = child.wait();
                spawned = true;
                break;
            }
        }

        if spawned {
            match std::fs::read_to_string(&path) {
                Ok(content) => match toml::from_str::<Classification>(&content) {
                    Ok(edited) => {
                        tracing::info!(id = %edited.id, "capture edited externally");
                        self.pending = Some(edited);
                        self.set_status("Capture updated");
                    }
                    Err(e) => {
                        self.set_status(format!("Edit discarded (bad TOML): {}", e));
                    }
                },
                Err(e) => {
                    self.set_status(format!("Cannot read edited file: {}", e));
                }
            }
        } else {
            self.set_status("No terminal emulator found (tried foot, kitty, alacritty, gnome-terminal, xterm)");
        }

        let _ = std::fs::remove_file(&path);
        Ok(())
    }

    /// Open the selected module card. The screens behind the cards are not
    /// built yet, so this only logs, matching the stub click handlers.
    fn open_module(&mut self) {
        if let Some(module) = self.modules.get(self.selected_module) {
            tracing::info!(module = module.title, "navigate to module");
            self.set_status(format!("{} isn't wired up yet", module.title));
        }
    }

    /// Toggle the voice capture session on/off
    pub fn toggle_voice(&mut self) {
        if self.recording {
            self.cancel_voice();
            return;
        }

        if !voice::is_supported(&self.config) {
            tracing::warn!("voice capture requested but no voice_command configured");
            self.set_status("Voice not supported: set voice_command in config.toml");
            return;
        }

        // is_supported guarantees the command is present
        if let Some(command) = self.config.voice_command.clone() {
            self.voice_task = Some(tokio::spawn(voice::run_session(command)));
            self.recording = true;
        }
    }

    fn cancel_voice(&mut self) {
        if let Some(task) = self.voice_task.take() {
            task.abort();
        }
        self.recording = false;
        self.set_status("Recording cancelled");
    }

    pub async fn tick(&mut self) -> Result<()> {
        // Clear status message after 3 seconds
        if let Some(time) = self.status_message_time {
            if time.elapsed().as_secs() >= 3 {
                self.status_message = None;
                self.status_message_time = None;
            }
        }

        // Pick up a finished voice session. This is the only async boundary:
        // the session runs fire-and-forget and we observe its result here.
        let finished = self
            .voice_task
            .as_ref()
            .map(|t| t.is_finished())
            .unwrap_or(false);

        if finished {
            if let Some(task) = self.voice_task.take() {
                self.recording = false;
                match task.await {
                    Ok(Ok(transcript)) => {
                        self.submit_capture(&transcript, true);
                    }
                    Ok(Err(e)) => {
                        tracing::warn!("voice session failed: {}", e);
                        self.set_status(format!("Voice error: {}", e));
                    }
                    Err(e) if e.is_cancelled() => {}
                    Err(e) => {
                        tracing::warn!("voice task panicked: {}", e);
                        self.set_status("Voice capture failed");
                    }
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::Priority;

    fn quiet_app() -> App {
        App::with_config(AppConfig {
            notifications: false,
            ..AppConfig::default()
        })
    }

    #[test]
    fn whitespace_only_input_never_submits() {
        let mut app = quiet_app();
        assert!(!app.submit_capture("   \t ", false));
        assert!(app.pending.is_none());
        assert_eq!(app.stats.captured, 0);
        assert_eq!(app.section, Section::Capture);
    }

    #[test]
    fn submission_sets_pending_with_trimmed_original_text() {
        let mut app = quiet_app();
        assert!(app.submit_capture("  remind me to stretch  ", false));

        let pending = app.pending.as_ref().expect("pending set");
        assert_eq!(pending.original_text, "remind me to stretch");
        assert_eq!(pending.kind, Kind::Task);
        assert_eq!(pending.priority, Some(Priority::Medium));
        assert_eq!(app.stats.captured, 1);
        assert_eq!(app.section, Section::Preview);
    }

    #[test]
    fn accept_clears_pending_and_bumps_the_matching_card() {
        let mut app = quiet_app();
        let tasks_before = app
            .modules
            .iter()
            .find(|m| m.kind == Some(Kind::Task))
            .map(|m| m.count)
            .unwrap();

        app.submit_capture("todo: water the plants", false);
        app.accept_pending();

        assert!(app.pending.is_none());
        assert_eq!(app.stats.accepted_tasks, 1);
        assert_eq!(app.section, Section::Capture);

        let tasks_after = app
            .modules
            .iter()
            .find(|m| m.kind == Some(Kind::Task))
            .map(|m| m.count)
            .unwrap();
        assert_eq!(tasks_after, tasks_before + 1);
    }

    #[test]
    fn reject_clears_pending() {
        let mut app = quiet_app();
        app.submit_capture("a stray thought", false);
        app.reject_pending();

        assert!(app.pending.is_none());
        assert_eq!(app.section, Section::Capture);
        // Captured tally stays; nothing was accepted
        assert_eq!(app.stats.captured, 1);
        assert_eq!(app.stats.accepted_notes, 0);
    }

    #[test]
    fn next_capture_replaces_pending() {
        let mut app = quiet_app();
        app.submit_capture("first thought", false);
        let first_id = app.pending.as_ref().unwrap().id;

        app.submit_capture("meeting with Sam", false);
        let pending = app.pending.as_ref().unwrap();
        assert_ne!(pending.id, first_id);
        assert_eq!(pending.kind, Kind::Event);
        assert_eq!(app.stats.captured, 2);
    }

    #[test]
    fn voice_toggle_without_command_reports_unsupported() {
        let mut app = quiet_app();
        app.toggle_voice();

        assert!(!app.recording);
        assert!(app
            .status_message
            .as_deref()
            .is_some_and(|m| m.contains("Voice not supported")));
    }

    #[test]
    fn tab_skips_preview_when_nothing_is_pending() {
        let app = quiet_app();
        assert_eq!(app.next_section(), Section::Modules);

        let mut with_pending = quiet_app();
        with_pending.submit_capture("todo: something", false);
        with_pending.section = Section::Capture;
        assert_eq!(with_pending.next_section(), Section::Preview);
    }
}
