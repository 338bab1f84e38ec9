//! Rule-based capture classifier.
//!
//! A handful of keyword checks, first match wins: task keywords beat event
//! keywords, everything else falls through to a note. Total over any input.

use regex::Regex;
use std::sync::OnceLock;
use uuid::Uuid;

use super::{Classification, Kind, Priority};

const TASK_KEYWORDS: &[&str] = &["remind", "todo", "task", "need to"];
const EVENT_KEYWORDS: &[&str] = &["meeting", "appointment", "call", "event"];
const URGENT_KEYWORDS: &[&str] = &["urgent", "important"];

const EVENT_DESCRIPTION: &str = "Detected calendar event";

// Confidence is keyword signal strength, not a measured probability. Floor of
// 0.7 so a bare note still reads as a plausible guess, 0.05 per matched kind
// keyword, capped at 1.0.
const CONFIDENCE_FLOOR: f64 = 0.7;
const CONFIDENCE_PER_HIT: f64 = 0.05;

/// Leading phrases stripped from task titles ("remind me to call mom" -> "call mom")
fn task_prefix() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)^(remind me to|todo:?|task:?|i need to)\s*").expect("static pattern")
    })
}

fn count_hits(lower: &str, keywords: &[&str]) -> usize {
    keywords.iter().filter(|k| lower.contains(*k)).count()
}

fn confidence(kind_hits: usize) -> f64 {
    (CONFIDENCE_FLOOR + kind_hits as f64 * CONFIDENCE_PER_HIT).min(1.0)
}

/// Classify one captured text into a task, event, or note.
pub fn classify(text: &str) -> Classification {
    let trimmed = text.trim();
    let lower = trimmed.to_lowercase();

    let task_hits = count_hits(&lower, TASK_KEYWORDS);
    let event_hits = count_hits(&lower, EVENT_KEYWORDS);

    let (kind, title, description, priority, hits) = if task_hits > 0 {
        let stripped = task_prefix().replace(trimmed, "").trim().to_string();
        // "todo:" on its own strips to nothing; keep the raw text then
        let title = if stripped.is_empty() {
            trimmed.to_string()
        } else {
            stripped
        };

        let priority = if URGENT_KEYWORDS.iter().any(|k| lower.contains(k)) {
            Priority::High
        } else if lower.contains("later") {
            Priority::Low
        } else {
            Priority::Medium
        };

        (Kind::Task, title, None, Some(priority), task_hits)
    } else if event_hits > 0 {
        (
            Kind::Event,
            trimmed.to_string(),
            Some(EVENT_DESCRIPTION.to_string()),
            None,
            event_hits,
        )
    } else {
        (Kind::Note, trimmed.to_string(), None, None, 0)
    };

    Classification {
        id: Uuid::new_v4(),
        original_text: trimmed.to_string(),
        kind,
        title,
        description,
        priority,
        due_date: None,
        confidence: confidence(hits),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urgent_todo_is_high_priority_task() {
        let c = classify("todo: file the taxes, urgent");
        assert_eq!(c.kind, Kind::Task);
        assert_eq!(c.priority, Some(Priority::High));
        assert_eq!(c.title, "file the taxes, urgent");
    }

    #[test]
    fn later_todo_is_low_priority() {
        let c = classify("todo clean out the garage later");
        assert_eq!(c.kind, Kind::Task);
        assert_eq!(c.priority, Some(Priority::Low));
    }

    #[test]
    fn plain_task_defaults_to_medium_priority() {
        let c = classify("i need to renew my passport");
        assert_eq!(c.kind, Kind::Task);
        assert_eq!(c.priority, Some(Priority::Medium));
        assert_eq!(c.title, "renew my passport");
    }

    #[test]
    fn leading_phrase_is_stripped_case_insensitively() {
        let c = classify("Remind me to water the plants");
        assert_eq!(c.title, "water the plants");

        let c = classify("TODO: buy milk");
        assert_eq!(c.title, "buy milk");
    }

    #[test]
    fn prefix_only_input_keeps_original_as_title() {
        let c = classify("todo:");
        assert_eq!(c.kind, Kind::Task);
        assert_eq!(c.title, "todo:");
    }

    #[test]
    fn meeting_without_task_keywords_is_an_event() {
        let c = classify("meeting with Sam on Friday at 3pm");
        assert_eq!(c.kind, Kind::Event);
        assert_eq!(c.title, "meeting with Sam on Friday at 3pm");
        assert_eq!(c.description.as_deref(), Some("Detected calendar event"));
        assert_eq!(c.priority, None);
    }

    #[test]
    fn call_counts_as_an_event_keyword() {
        let c = classify("call mom this weekend");
        assert_eq!(c.kind, Kind::Event);
    }

    #[test]
    fn task_rule_wins_over_event_rule() {
        // Contains both "todo" and "meeting"; task keywords are checked first
        let c = classify("todo: schedule the quarterly meeting");
        assert_eq!(c.kind, Kind::Task);
    }

    #[test]
    fn everything_else_falls_through_to_note() {
        let c = classify("the sky was pink over the harbor tonight");
        assert_eq!(c.kind, Kind::Note);
        assert_eq!(c.title, c.original_text);
        assert_eq!(c.description, None);
        assert_eq!(c.priority, None);
        assert_eq!(c.due_date, None);
    }

    #[test]
    fn original_text_is_the_trimmed_input() {
        let c = classify("  hello world  ");
        assert_eq!(c.original_text, "hello world");
    }

    #[test]
    fn confidence_stays_within_bounds() {
        let samples = [
            "the sky was pink",
            "todo task remind me i need to do everything urgent",
            "meeting appointment call event",
            "x",
        ];
        for s in samples {
            let c = classify(s);
            assert!(
                (0.7..=1.0).contains(&c.confidence),
                "confidence {} out of range for {:?}",
                c.confidence,
                s
            );
        }
    }

    #[test]
    fn more_keyword_hits_mean_more_confidence() {
        let strong = classify("todo: remind me about that task");
        let weak = classify("random shower thought");
        assert!(strong.confidence > weak.confidence);
    }
}
