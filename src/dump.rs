use crate::anchor::{AnchorAxis, Span, interior_width_at};
use crate::config::RenderConfig;
use crate::geometry::{Bounds, Point};
use crate::session::Session;
use crate::text_metrics::measure_label_width;
use crate::theme::Theme;
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionDump {
    pub width: f64,
    pub height: f64,
    pub label_text: String,
    pub label_width: f64,
    pub shapes: Vec<ShapeDump>,
    pub in_progress: Option<Vec<[f64; 2]>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeDump {
    pub id: usize,
    pub points: Vec<[f64; 2]>,
    pub bounds: Bounds,
    pub area: f64,
    pub anchor: [f64; 2],
    pub axis: AnchorAxis,
    pub center: [f64; 2],
    pub span: Option<Span>,
    pub anchor_inside: bool,
    /// Whether the label fits the interior width at the anchor's height.
    pub label_fits: bool,
}

fn pair(point: Point) -> [f64; 2] {
    [point.x, point.y]
}

impl SessionDump {
    pub fn from_session(session: &Session, theme: &Theme, config: &RenderConfig) -> Self {
        let label_width = measure_label_width(
            session.label_text(),
            theme.font_size,
            &theme.font_family,
            &theme.font_weight,
        );

        let shapes = session
            .shapes()
            .iter()
            .map(|shape| {
                let anchor = shape.anchor.point;
                let room = interior_width_at(shape.polygon.points(), anchor);
                ShapeDump {
                    id: shape.id,
                    points: shape.polygon.points().iter().copied().map(pair).collect(),
                    bounds: shape.polygon.bounds(),
                    area: shape.polygon.area(),
                    anchor: pair(anchor),
                    axis: shape.anchor.axis,
                    center: pair(shape.anchor.center),
                    span: shape.anchor.span,
                    anchor_inside: shape.polygon.contains(anchor),
                    label_fits: room.is_some_and(|width| label_width <= width),
                }
            })
            .collect();

        SessionDump {
            width: config.width,
            height: config.height,
            label_text: session.label_text().to_string(),
            label_width,
            shapes,
            in_progress: session
                .in_progress()
                .map(|points| points.iter().copied().map(pair).collect()),
        }
    }
}

pub fn write_session_dump(
    path: &Path,
    session: &Session,
    theme: &Theme,
    config: &RenderConfig,
) -> anyhow::Result<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    let dump = SessionDump::from_session(session, theme, config);
    serde_json::to_writer_pretty(writer, &dump)?;
    Ok(())
}
