#![forbid(unsafe_code)]

//! Outcomes of wiring and render passes.
//!
//! Per-field and per-pair failures never abort a pass; they are logged and
//! collected here so callers can inspect partial results.

use crate::error::WiringError;
use crate::reflect::MarkerKind;

/// What happened to one marked field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldStatus {
    /// A "bind text" field was populated and registered under `key`.
    Registered { key: String },
    /// An "inject registry" field received the registry.
    Injected,
    /// The field was left as it was.
    Failed(WiringError),
}

/// Outcome for one marked field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldOutcome {
    pub field: &'static str,
    pub marker: MarkerKind,
    pub status: FieldStatus,
}

impl FieldOutcome {
    #[must_use]
    pub fn is_ok(&self) -> bool {
        !matches!(self.status, FieldStatus::Failed(_))
    }
}

/// Result of rendering one registered pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderOutcome {
    /// The text setter ran with the resolved text.
    Rendered,
    /// The key resolved to no text; the setter was not called.
    Missing,
    /// The object exposes none of the configured text setters.
    NoSetter,
    /// The setter returned an error.
    Failed,
}

/// Tally of a render pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderReport {
    pub rendered: usize,
    pub missing: usize,
    pub without_setter: usize,
    pub failed: usize,
}

impl RenderReport {
    pub fn record(&mut self, outcome: RenderOutcome) {
        match outcome {
            RenderOutcome::Rendered => self.rendered += 1,
            RenderOutcome::Missing => self.missing += 1,
            RenderOutcome::NoSetter => self.without_setter += 1,
            RenderOutcome::Failed => self.failed += 1,
        }
    }

    /// Number of pairs visited.
    #[must_use]
    pub fn total(&self) -> usize {
        self.rendered + self.missing + self.without_setter + self.failed
    }
}

/// Result of [`ComponentRegistry::auto_wire`](crate::ComponentRegistry::auto_wire).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WiringReport {
    /// One entry per marked field, "bind text" fields first.
    pub outcomes: Vec<FieldOutcome>,
    /// The render pass that closed the wiring.
    pub render: RenderReport,
}

impl WiringReport {
    /// Keys registered by this pass, in registration order.
    #[must_use]
    pub fn registered_keys(&self) -> Vec<&str> {
        self.outcomes
            .iter()
            .filter_map(|outcome| match &outcome.status {
                FieldStatus::Registered { key } => Some(key.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn failures(&self) -> impl Iterator<Item = &FieldOutcome> {
        self.outcomes.iter().filter(|outcome| !outcome.is_ok())
    }

    /// Whether every marked field was wired.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.outcomes.iter().all(FieldOutcome::is_ok)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_report_tallies() {
        let mut report = RenderReport::default();
        for outcome in [
            RenderOutcome::Rendered,
            RenderOutcome::Rendered,
            RenderOutcome::Missing,
            RenderOutcome::NoSetter,
            RenderOutcome::Failed,
        ] {
            report.record(outcome);
        }
        assert_eq!(report.rendered, 2);
        assert_eq!(report.total(), 5);
    }

    #[test]
    fn wiring_report_summaries() {
        let report = WiringReport {
            outcomes: vec![
                FieldOutcome {
                    field: "title",
                    marker: MarkerKind::BindText,
                    status: FieldStatus::Registered { key: "main.title".into() },
                },
                FieldOutcome {
                    field: "icon",
                    marker: MarkerKind::BindText,
                    status: FieldStatus::Failed(WiringError::NoDefaultConstructor { type_name: "Icon" }),
                },
                FieldOutcome {
                    field: "registry",
                    marker: MarkerKind::InjectRegistry,
                    status: FieldStatus::Injected,
                },
            ],
            render: RenderReport::default(),
        };
        assert_eq!(report.registered_keys(), vec!["main.title"]);
        assert_eq!(report.failures().count(), 1);
        assert!(!report.is_complete());
    }
}
