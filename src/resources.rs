use crate::error::Result;

/// Icon and label collaborator.
///
/// The translator only composes icon paths as `<theme>/<icon file>`; what the
/// names resolve to is owned by the rendering side. Every method has a plain
/// passthrough default so implementations override only what they theme.
pub trait Resources {
    /// Base path of the current icon theme.
    fn theme(&self) -> &str {
        "themes/classic"
    }

    fn workstep_label(&self, name: &str) -> String {
        name.to_string()
    }

    fn link_label(&self, name: &str) -> String {
        name.to_string()
    }

    fn phase_label(&self, name: &str) -> String {
        name.to_string()
    }

    fn lane_label(&self, name: &str) -> String {
        name.to_string()
    }

    /// Resolve the display text of an annotation note. May fail; note
    /// extraction falls back to the raw text when it does.
    fn annotation_text(&self, raw: &str) -> Result<String> {
        Ok(raw.to_string())
    }

    /// Icon file for a workstep, keyed by its atomic type.
    fn workstep_icon(&self, workstep_type: &str) -> String {
        format!("{}.svg", workstep_type.to_ascii_lowercase())
    }

    /// Icon file for a connector, keyed by its connector type.
    fn connector_icon(&self, connector_type: &str) -> String {
        format!("{}.svg", connector_type.to_ascii_lowercase())
    }

    /// Icon file for a link marker, keyed by its link type.
    fn link_icon(&self, link_type: &str) -> String {
        format!("{}.svg", link_type.to_ascii_lowercase())
    }

    fn loop_icon(&self) -> String {
        "loop.svg".to_string()
    }

    fn rollback_icon(&self) -> String {
        "rollback.svg".to_string()
    }
}

/// Theme-less passthrough used when nothing is injected.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultResources;

impl Resources for DefaultResources {}

/// Fallback id generation for elements whose raw data carries no id.
///
/// Injected so tests can supply a deterministic generator; production use
/// keeps the random default, which makes synthesized ids unstable across
/// loads when raw ids are absent.
pub trait IdSource {
    /// A fresh id with no separator characters.
    fn next_id(&self) -> String;
}

/// Random v4 UUIDs in simple (dash-less) format.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidIds;

impl IdSource for UuidIds {
    fn next_id(&self) -> String {
        uuid::Uuid::new_v4().simple().to_string()
    }
}
