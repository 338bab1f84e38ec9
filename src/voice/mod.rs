//! One-shot speech-to-text sessions.
//!
//! Voice capture is delegated to an external command (`voice_command` in the
//! config), e.g. a whisper CLI wrapper that records from the microphone and
//! prints the transcript on stdout. One session per toggle, never continuous.

use std::time::Duration;
use thiserror::Error;
use tokio::process::Command;
use tokio::time::timeout;

use crate::config::AppConfig;

/// How long a single recognition session may run before we give up
pub const SESSION_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Error)]
pub enum VoiceError {
    #[error("voice not supported: set voice_command in config.toml")]
    Unsupported,
    #[error("could not launch '{command}': {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },
    #[error("speech-to-text failed: {0}")]
    Failed(String),
    #[error("speech-to-text produced no transcript")]
    EmptyTranscript,
    #[error("speech-to-text timed out after {}s", SESSION_TIMEOUT.as_secs())]
    TimedOut,
}

/// Whether voice capture is available with the current config
pub fn is_supported(config: &AppConfig) -> bool {
    config
        .voice_command
        .as_deref()
        .is_some_and(|c| !c.trim().is_empty())
}

/// Run one recognition session using the configured command.
pub async fn capture(config: &AppConfig) -> Result<String, VoiceError> {
    let command_line = config
        .voice_command
        .clone()
        .filter(|c| !c.trim().is_empty())
        .ok_or(VoiceError::Unsupported)?;
    run_session(command_line).await
}

/// Run one recognition session: spawn the command, wait for it to finish
/// (bounded by [`SESSION_TIMEOUT`]), and return the trimmed stdout transcript.
pub async fn run_session(command_line: String) -> Result<String, VoiceError> {
    let mut parts = command_line.split_whitespace();
    let program = parts.next().ok_or(VoiceError::Unsupported)?;
    let args: Vec<&str> = parts.collect();

    tracing::debug!(command = %command_line, "starting speech-to-text session");

    let result = timeout(SESSION_TIMEOUT, Command::new(program).args(&args).output()).await;

    match result {
        Ok(Ok(output)) => {
            if !output.status.success() {
                let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
                let detail = if stderr.is_empty() {
                    format!("exit status {}", output.status)
                } else {
                    stderr
                };
                return Err(VoiceError::Failed(detail));
            }

            let transcript = String::from_utf8_lossy(&output.stdout).trim().to_string();
            if transcript.is_empty() {
                Err(VoiceError::EmptyTranscript)
            } else {
                Ok(transcript)
            }
        }
        Ok(Err(e)) => Err(VoiceError::Spawn {
            command: program.to_string(),
            source: e,
        }),
        Err(_) => Err(VoiceError::TimedOut),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_without_a_configured_command() {
        let config = AppConfig::default();
        assert!(!is_supported(&config));

        let blank = AppConfig {
            voice_command: Some("   ".to_string()),
            ..AppConfig::default()
        };
        assert!(!is_supported(&blank));
    }

    #[test]
    fn supported_with_a_configured_command() {
        let config = AppConfig {
            voice_command: Some("whisper-mic --once".to_string()),
            ..AppConfig::default()
        };
        assert!(is_supported(&config));
    }

    #[tokio::test]
    async fn capture_without_command_reports_unsupported() {
        let err = capture(&AppConfig::default()).await.unwrap_err();
        assert!(matches!(err, VoiceError::Unsupported));
    }

    #[tokio::test]
    async fn session_returns_trimmed_stdout() {
        let transcript = run_session("echo  remind me to stretch ".to_string())
            .await
            .unwrap();
        assert_eq!(transcript, "remind me to stretch");
    }

    #[tokio::test]
    async fn missing_program_is_a_spawn_error() {
        let err = run_session("definitely-not-a-real-stt-binary".to_string())
            .await
            .unwrap_err();
        assert!(matches!(err, VoiceError::Spawn { .. }));
    }

    #[tokio::test]
    async fn silent_command_is_an_empty_transcript() {
        let err = run_session("true".to_string()).await.unwrap_err();
        assert!(matches!(err, VoiceError::EmptyTranscript));
    }
}
