use crate::model::{Bounds, ConnectorType, Point, Size};
use std::fmt::Display;

/// Display-ready data shared by every drawable shape.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeData {
    /// Synthesized shape id, stable for the lifetime of one load.
    pub id: String,
    /// Name the element carried in the document.
    pub original_name: String,
    pub position: Point,
    pub size: Size,
    /// Whether this shape marks a rollback point.
    pub rollback_point: bool,
    /// Loop marker icon path, when the element loops.
    pub loop_icon: Option<String>,
    /// Rollback marker icon path, when this is a rollback point.
    pub rollback_icon: Option<String>,
    pub display_name: String,
}

/// A workstep shape: atomic, inline block, nested, external, message
/// publisher/subscriber, or start/end block.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkstepShape {
    pub data: ShapeData,
    /// Atomic type discriminant from the document, when present.
    pub workstep_type: Option<String>,
    /// Themed icon path.
    pub icon: String,
    /// Resolved label. Suppressed for START and END atomic types.
    pub label: Option<String>,
}

/// A branching/merging connector shape.
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectorShape {
    pub data: ShapeData,
    /// Normalized connector classification with its exclusivity flag.
    pub connector_type: Option<ConnectorType>,
    pub icon: String,
    /// Resolved label, for non-exclusive decision splits only.
    pub label: Option<String>,
}

/// Presentation kind of a note.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteKind {
    Annotation,
    Sticky,
}

/// Resolved attachment of a note to the shape it comments on.
#[derive(Debug, Clone, PartialEq)]
pub struct NoteAttachment {
    /// Shape id of the connected shape.
    pub target: String,
    /// Waypoints from the note to the connected shape.
    pub points: Vec<Point>,
}

/// An annotation note shape.
#[derive(Debug, Clone, PartialEq)]
pub struct NoteShape {
    pub data: ShapeData,
    /// Resolved annotation text, or the raw text when resolution failed.
    pub text: String,
    pub kind: NoteKind,
    /// Fill color, for sticky notes only.
    pub fill_color: Option<String>,
    /// Attachment geometry, when the note connects to a shape that exists.
    pub attachment: Option<NoteAttachment>,
}

/// Classification of a link between two shapes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkType {
    /// Plain sequence flow, no marker.
    Flow,
    DecisionSplit,
    Compensation,
    Timeout,
    /// Forced marker for links leaving a shape whose default flag is off.
    Diamond,
    /// Declared type the translator does not classify.
    Other(String),
}

impl LinkType {
    pub(crate) fn from_raw(raw: Option<&str>) -> Self {
        match raw {
            None => Self::Flow,
            Some("DECISIONSPLIT") => Self::DecisionSplit,
            Some("COMPENSATION") => Self::Compensation,
            Some("TIMEOUT") => Self::Timeout,
            Some(other) => Self::Other(other.to_string()),
        }
    }

    /// Whether connections of this type carry a label and marker icon.
    pub fn is_decorated(&self) -> bool {
        matches!(
            self,
            Self::DecisionSplit | Self::Compensation | Self::Timeout | Self::Diamond
        )
    }
}

impl Display for LinkType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Flow => write!(f, "FLOW"),
            Self::DecisionSplit => write!(f, "DECISIONSPLIT"),
            Self::Compensation => write!(f, "COMPENSATION"),
            Self::Timeout => write!(f, "TIMEOUT"),
            Self::Diamond => write!(f, "DIAMOND"),
            Self::Other(raw) => write!(f, "{raw}"),
        }
    }
}

/// Placed label of a decorated connection.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkLabel {
    pub text: String,
    pub bounds: Bounds,
}

/// Drawable geometry of one link between two shapes.
///
/// Endpoints are shape ids; an endpoint is `None` when the link names a
/// shape the document never defines.
#[derive(Debug, Clone, PartialEq)]
pub struct Connection {
    pub source: Option<String>,
    pub target: Option<String>,
    pub points: Vec<Point>,
    pub link_type: LinkType,
    pub label: Option<LinkLabel>,
    pub icon: Option<String>,
    /// Set when the link fans out of a decision split.
    pub split: bool,
}

/// A phase band, positioned at the origin.
#[derive(Debug, Clone, PartialEq)]
pub struct Phase {
    pub label: String,
    pub position: Point,
    pub size: Size,
}

/// An organizational pool with its stacked lanes.
#[derive(Debug, Clone, PartialEq)]
pub struct Pool {
    pub id: String,
    pub name: String,
    pub lanes: Vec<Lane>,
}

/// One lane band inside a pool.
#[derive(Debug, Clone, PartialEq)]
pub struct Lane {
    pub id: String,
    pub label: String,
    pub size: Size,
    /// Accumulated height of the lanes above this one in the same pool.
    pub y_offset: f64,
}
