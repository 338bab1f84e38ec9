//! Static module card descriptors shown in the quick-access grid.
//!
//! The cards are navigation entry points only; nothing is implemented behind
//! them yet. Counts are seeded with placeholder values and bumped in-memory
//! when a capture of the matching kind is accepted.

use crate::capture::Kind;

/// Which theme accent slot a card is drawn with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accent {
    Primary,
    Secondary,
    Tertiary,
}

#[derive(Debug, Clone)]
pub struct Module {
    pub title: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub count: usize,
    pub accent: Accent,
    /// Which classification kind lands in this module on accept
    pub kind: Option<Kind>,
}

pub fn default_modules() -> Vec<Module> {
    vec![
        Module {
            title: "Tasks",
            description: "Your to-dos and action items",
            icon: "󰄲",
            count: 12,
            accent: Accent::Primary,
            kind: Some(Kind::Task),
        },
        Module {
            title: "Calendar",
            description: "Events and appointments",
            icon: "󰃭",
            count: 5,
            accent: Accent::Secondary,
            kind: Some(Kind::Event),
        },
        Module {
            title: "Notes",
            description: "Thoughts and ideas",
            icon: "󰎞",
            count: 28,
            accent: Accent::Tertiary,
            kind: Some(Kind::Note),
        },
        Module {
            title: "Habit Tracker",
            description: "Daily routines and progress",
            icon: "󰃀",
            count: 3,
            accent: Accent::Secondary,
            kind: None,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_classifiable_kind_has_a_home() {
        let modules = default_modules();
        for kind in [Kind::Task, Kind::Event, Kind::Note] {
            assert!(
                modules.iter().any(|m| m.kind == Some(kind)),
                "no module card accepts {:?}",
                kind
            );
        }
    }
}
