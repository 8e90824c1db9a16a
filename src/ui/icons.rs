//! Outcome icon mapping.
//!
//! Each build outcome maps to a display icon (a glyph plus a style). The
//! mapping is an explicit table validated for completeness, never a raw
//! positional index into an array.

use ratatui::style::{Modifier, Style};
use thiserror::Error;

use crate::builds::BuildOutcome;
use crate::ui::theme::theme;

/// A single outcome's display icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutcomeIcon {
    /// The glyph drawn in the table's Result column.
    pub glyph: &'static str,
    /// How the glyph is styled.
    pub style: Style,
}

/// Errors found when validating an outcome→icon mapping.
#[derive(Debug, Error)]
pub enum IconSetError {
    /// An outcome has no icon mapped.
    #[error("no icon mapped for build outcome {0:?}")]
    Missing(BuildOutcome),
    /// An outcome is mapped more than once.
    #[error("duplicate icon mapping for build outcome {0:?}")]
    Duplicate(BuildOutcome),
}

/// Outcome → icon mapping.
///
/// [`OutcomeIcons::new`] checks the mapping for completeness over every
/// [`BuildOutcome`] variant; lookups on a mapping built that way never fail.
/// [`OutcomeIcons::partial`] skips the check so callers with reduced icon
/// sets get a per-record rejection from the consuming view instead of an
/// out-of-bounds access.
#[derive(Debug, Clone)]
pub struct OutcomeIcons {
    entries: Vec<(BuildOutcome, OutcomeIcon)>,
}

impl OutcomeIcons {
    /// Build a mapping, requiring exactly one icon per outcome variant.
    pub fn new(entries: Vec<(BuildOutcome, OutcomeIcon)>) -> Result<Self, IconSetError> {
        let icons = Self { entries };
        icons.validate()?;
        Ok(icons)
    }

    /// Build a possibly-incomplete mapping, skipping the completeness check.
    pub fn partial(entries: Vec<(BuildOutcome, OutcomeIcon)>) -> Self {
        Self { entries }
    }

    /// The default theme-colored icon set. Complete by construction.
    pub fn standard() -> Self {
        let t = theme();
        Self {
            entries: vec![
                (
                    BuildOutcome::Success,
                    OutcomeIcon {
                        glyph: "✔",
                        style: Style::default().fg(t.success).add_modifier(Modifier::BOLD),
                    },
                ),
                (
                    BuildOutcome::Failure,
                    OutcomeIcon {
                        glyph: "✘",
                        style: Style::default().fg(t.error).add_modifier(Modifier::BOLD),
                    },
                ),
                (
                    BuildOutcome::Canceled,
                    OutcomeIcon {
                        glyph: "⊘",
                        style: Style::default().fg(t.warning),
                    },
                ),
            ],
        }
    }

    /// Look up the icon for an outcome.
    pub fn get(&self, outcome: BuildOutcome) -> Option<OutcomeIcon> {
        self.entries
            .iter()
            .find(|(o, _)| *o == outcome)
            .map(|(_, icon)| *icon)
    }

    /// Check the mapping for completeness and duplicates.
    pub fn validate(&self) -> Result<(), IconSetError> {
        for (i, (outcome, _)) in self.entries.iter().enumerate() {
            if self.entries[..i].iter().any(|(o, _)| o == outcome) {
                return Err(IconSetError::Duplicate(*outcome));
            }
        }
        for outcome in BuildOutcome::ALL {
            if self.get(outcome).is_none() {
                return Err(IconSetError::Missing(outcome));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_set_is_complete() {
        let icons = OutcomeIcons::standard();
        assert!(icons.validate().is_ok());
        for outcome in BuildOutcome::ALL {
            assert!(icons.get(outcome).is_some());
        }
    }

    #[test]
    fn test_new_rejects_missing_outcome() {
        let entries = vec![(
            BuildOutcome::Success,
            OutcomeIcon {
                glyph: "✔",
                style: Style::default(),
            },
        )];
        let err = OutcomeIcons::new(entries).unwrap_err();
        assert!(matches!(err, IconSetError::Missing(_)));
    }

    #[test]
    fn test_new_rejects_duplicate_outcome() {
        let icon = OutcomeIcon {
            glyph: "✔",
            style: Style::default(),
        };
        let entries = vec![
            (BuildOutcome::Success, icon),
            (BuildOutcome::Success, icon),
            (BuildOutcome::Failure, icon),
            (BuildOutcome::Canceled, icon),
        ];
        let err = OutcomeIcons::new(entries).unwrap_err();
        assert!(matches!(err, IconSetError::Duplicate(BuildOutcome::Success)));
    }

    #[test]
    fn test_partial_skips_validation() {
        let icons = OutcomeIcons::partial(vec![]);
        assert!(icons.get(BuildOutcome::Success).is_none());
        assert!(icons.validate().is_err());
    }
}
