use crate::{
    api::{Lane, Phase, Pool},
    error::{Error, Result},
    model::{Point, Size, Value},
    translator::Translator,
};

/// Fixed height of every phase band.
pub const PHASE_HEIGHT: f64 = 35.0;
/// Fixed width of every lane band.
pub const LANE_WIDTH: f64 = 800.0;

impl Translator {
    /// Phase bands. Widths come from a pixel-suffixed string field; every
    /// phase is positioned at the origin independently.
    pub fn phases(&self) -> Result<Vec<Phase>> {
        self.process
            .get("Phases")
            .and_then(|phases| phases.get("Phase"))
            .map(Value::as_sequence)
            .unwrap_or_default()
            .into_iter()
            .map(|phase| {
                let raw = phase.attr("width").unwrap_or_default();
                let width = parse_px(raw).ok_or_else(|| Error::InvalidValue {
                    field: "Phase.width".into(),
                    value: raw.into(),
                })?;
                Ok(Phase {
                    label: self
                        .resources
                        .phase_label(phase.attr("name").unwrap_or_default()),
                    position: Point::default(),
                    size: Size::new(width, PHASE_HEIGHT),
                })
            })
            .collect()
    }

    /// Pools with their lanes stacked top-down. The vertical offset is the
    /// running total of the prior lane heights, reset for each pool.
    pub fn pools(&self) -> Vec<Pool> {
        self.index
            .pools()
            .iter()
            .map(|pool| {
                let mut offset = 0.0;
                let lanes = pool
                    .lanes
                    .iter()
                    .map(|lane| {
                        let height = lane
                            .data
                            .get("Graphics")
                            .and_then(|graphics| graphics.number("height"))
                            .unwrap_or(0.0);
                        let laid_out = Lane {
                            id: lane.shape_id.clone(),
                            label: self.resources.lane_label(&lane.name),
                            size: Size::new(LANE_WIDTH, height),
                            y_offset: offset,
                        };
                        offset += height;
                        laid_out
                    })
                    .collect();
                Pool {
                    id: pool.shape_id.clone(),
                    name: pool.name.clone(),
                    lanes,
                }
            })
            .collect()
    }
}

// parseInt-like: leading integer digits, trailing unit ignored.
fn parse_px(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    let end = trimmed
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(trimmed.len());
    trimmed[..end].parse().ok()
}
