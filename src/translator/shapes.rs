use crate::{
    api::{ConnectorShape, NoteAttachment, NoteKind, NoteShape, ShapeData, WorkstepShape},
    model::{ConnectorType, Point, Size},
    translator::{Category, NormalizedShape, Translator},
};
use log::warn;

// Atomic types whose shapes render without a label.
const UNLABELED_TYPES: [&str; 2] = ["START", "END"];

// Fill used by sticky notes that do not pick their own color.
const STICKY_FILL: &str = "#FFF2A8";

impl Translator {
    // Per-call view over one normalized element. Never cached.
    fn common(&self, shape: &NormalizedShape) -> ShapeData {
        let data = &shape.data;
        let rollback_point = data.flag("rollbackPoint");
        ShapeData {
            id: shape.shape_id.clone(),
            original_name: shape.name.clone(),
            position: Point::new(
                data.number("x").unwrap_or(0.0),
                data.number("y").unwrap_or(0.0),
            ),
            size: Size::new(
                data.number("width").unwrap_or(0.0),
                data.number("height").unwrap_or(0.0),
            ),
            rollback_point,
            loop_icon: data
                .flag("loop")
                .then(|| self.icon_path(&self.resources.loop_icon())),
            rollback_icon: rollback_point.then(|| self.icon_path(&self.resources.rollback_icon())),
            display_name: shape.name.clone(),
        }
    }

    pub(crate) fn icon_path(&self, icon: &str) -> String {
        format!("{}/{}", self.resources.theme(), icon)
    }

    fn workstep_shapes(&self, category: Category, fallback_type: &str) -> Vec<WorkstepShape> {
        self.index
            .category(category)
            .map(|shape| {
                let workstep_type = shape.data.attr("type").map(str::to_string);
                let icon_key = workstep_type.as_deref().unwrap_or(fallback_type);
                WorkstepShape {
                    data: self.common(shape),
                    icon: self.icon_path(&self.resources.workstep_icon(icon_key)),
                    label: Some(self.resources.workstep_label(&shape.name)),
                    workstep_type,
                }
            })
            .collect()
    }

    /// Atomic worksteps. START and END atomics keep their icon but render
    /// without a label.
    pub fn atomic_shapes(&self) -> Vec<WorkstepShape> {
        self.workstep_shapes(Category::Atomic, "ACTIVITY")
            .into_iter()
            .map(|mut shape| {
                if shape
                    .workstep_type
                    .as_deref()
                    .is_some_and(|ty| UNLABELED_TYPES.contains(&ty))
                {
                    shape.label = None;
                }
                shape
            })
            .collect()
    }

    pub fn inline_block_shapes(&self) -> Vec<WorkstepShape> {
        self.workstep_shapes(Category::InlineBlock, "INLINEBLOCK")
    }

    pub fn nested_shapes(&self) -> Vec<WorkstepShape> {
        self.workstep_shapes(Category::Nested, "NESTED")
    }

    pub fn external_shapes(&self) -> Vec<WorkstepShape> {
        self.workstep_shapes(Category::External, "EXTERNAL")
    }

    pub fn message_publisher_shapes(&self) -> Vec<WorkstepShape> {
        self.workstep_shapes(Category::MessagePublisher, "MESSAGEPUBLISHER")
    }

    pub fn message_subscriber_shapes(&self) -> Vec<WorkstepShape> {
        self.workstep_shapes(Category::MessageSubscriber, "MESSAGESUBSCRIBER")
    }

    pub fn start_blocks(&self) -> Vec<WorkstepShape> {
        self.workstep_shapes(Category::StartBlock, "START")
    }

    pub fn end_blocks(&self) -> Vec<WorkstepShape> {
        self.workstep_shapes(Category::EndBlock, "END")
    }

    /// Connector shapes with their normalized type and exclusivity flag.
    /// Only non-exclusive decision splits carry a label.
    pub fn connector_shapes(&self) -> Vec<ConnectorShape> {
        self.index
            .category(Category::Connector)
            .map(|shape| {
                let connector_type = shape
                    .data
                    .get("ConnectorType")
                    .and_then(ConnectorType::from_value);
                let icon_key = connector_type
                    .as_ref()
                    .map(|ct| ct.kind.as_str())
                    .unwrap_or("CONNECTOR");
                let label = connector_type
                    .as_ref()
                    .is_some_and(|ct| ct.kind == "DECISIONSPLIT" && !ct.exclusive)
                    .then(|| self.resources.workstep_label(&shape.name));
                ConnectorShape {
                    data: self.common(shape),
                    icon: self.icon_path(&self.resources.connector_icon(icon_key)),
                    connector_type,
                    label,
                }
            })
            .collect()
    }

    /// Annotation notes. Failed annotation lookups fall back to the raw
    /// text instead of failing the extraction, and a note connected to a
    /// shape the document never defines simply loses its attachment.
    pub fn note_shapes(&self) -> Vec<NoteShape> {
        self.index
            .category(Category::Note)
            .map(|shape| {
                let raw = shape.data.text().unwrap_or_default();
                let text = match self.resources.annotation_text(raw) {
                    Ok(text) => text,
                    Err(err) => {
                        warn!(r#"annotation text for "{}" unresolved, using raw text: {err}"#, shape.name);
                        raw.to_string()
                    }
                };
                let kind = match shape.data.attr("shape") {
                    Some("STICKY") => NoteKind::Sticky,
                    _ => NoteKind::Annotation,
                };
                let fill_color = (kind == NoteKind::Sticky)
                    .then(|| shape.data.attr("color").unwrap_or(STICKY_FILL).to_string());
                let data = self.common(shape);
                let attachment = shape.data.attr("connectTo").and_then(|target| {
                    let found = self.index.find(target);
                    if found.is_none() {
                        warn!(r#"note "{}" connects to unknown shape "{target}""#, shape.name);
                    }
                    found.map(|resolved| NoteAttachment {
                        target: resolved.shape_id.clone(),
                        points: vec![
                            data.position,
                            Point::new(
                                resolved.data.number("x").unwrap_or(0.0),
                                resolved.data.number("y").unwrap_or(0.0),
                            ),
                        ],
                    })
                });
                NoteShape {
                    data,
                    text,
                    kind,
                    fill_color,
                    attachment,
                }
            })
            .collect()
    }
}
