use crate::config::RenderConfig;
use crate::geometry::{Point, Polygon};
use crate::session::Session;
use crate::theme::Theme;
use anyhow::Result;
use std::path::Path;

/// Draws every finished shape with its label, then the path being drawn.
pub fn render_svg(session: &Session, theme: &Theme, config: &RenderConfig) -> String {
    let mut svg = String::new();
    let width = config.width;
    let height = config.height;

    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\">",
    ));
    svg.push_str(&format!(
        "<rect width=\"100%\" height=\"100%\" fill=\"{}\"/>",
        theme.background
    ));

    for shape in session.shapes() {
        svg.push_str(&render_polygon(&shape.polygon, theme));
        if config.show_label_point {
            svg.push_str(&render_anchor_marker(shape.anchor.point, theme));
        }
        svg.push_str(&render_label_text(shape.anchor.point, session.label_text(), theme));
    }

    if let Some(points) = session.in_progress() {
        svg.push_str(&render_in_progress(points, theme));
    }

    svg.push_str("</svg>");
    svg
}

pub fn render_polygon(polygon: &Polygon, theme: &Theme) -> String {
    format!(
        "<path d=\"{}\" fill=\"{}\" stroke=\"{}\" stroke-width=\"{}\" stroke-linejoin=\"round\"/>",
        points_to_path(polygon.points(), true),
        theme.fill_color,
        theme.stroke_color,
        theme.stroke_width
    )
}

pub fn render_anchor_marker(point: Point, theme: &Theme) -> String {
    format!(
        "<circle cx=\"{:.2}\" cy=\"{:.2}\" r=\"{}\" fill=\"{}\" stroke=\"{}\" stroke-width=\"{}\"/>",
        point.x,
        point.y,
        theme.label_point_radius,
        theme.label_point_color,
        theme.label_point_outline,
        theme.label_point_outline_width
    )
}

/// Centered label: an outline pass under a fill pass. Empty text draws
/// nothing.
pub fn render_label_text(point: Point, text: &str, theme: &Theme) -> String {
    if text.is_empty() {
        return String::new();
    }
    let escaped = escape_xml(text);
    let common = format!(
        "x=\"{:.2}\" y=\"{:.2}\" text-anchor=\"middle\" dominant-baseline=\"central\" font-family=\"{}\" font-size=\"{}\" font-weight=\"{}\"",
        point.x,
        point.y,
        escape_xml(&theme.font_family),
        theme.font_size,
        theme.font_weight
    );
    format!(
        "<text {common} fill=\"none\" stroke=\"{}\" stroke-width=\"{}\" stroke-linejoin=\"round\">{escaped}</text><text {common} fill=\"{}\">{escaped}</text>",
        theme.label_outline_color, theme.label_outline_width, theme.label_color
    )
}

fn render_in_progress(points: &[Point], theme: &Theme) -> String {
    let mut out = String::new();
    if points.len() > 1 {
        out.push_str(&format!(
            "<path d=\"{}\" fill=\"none\" stroke=\"{}\" stroke-width=\"{}\" stroke-linejoin=\"round\"/>",
            points_to_path(points, false),
            theme.stroke_color,
            theme.stroke_width
        ));
        let start = points[0];
        out.push_str(&format!(
            "<circle cx=\"{:.2}\" cy=\"{:.2}\" r=\"{}\" fill=\"{}\"/>",
            start.x, start.y, theme.start_marker_radius, theme.stroke_color
        ));
    }
    out
}

fn points_to_path(points: &[Point], closed: bool) -> String {
    let Some(first) = points.first() else {
        return String::new();
    };
    let mut d = format!("M {:.2} {:.2}", first.x, first.y);
    for point in &points[1..] {
        d.push_str(&format!(" L {:.2} {:.2}", point.x, point.y));
    }
    if closed {
        d.push_str(" Z");
    }
    d
}

pub fn write_output_svg(svg: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, svg)?;
        }
        None => {
            print!("{}", svg);
        }
    }
    Ok(())
}

#[cfg(feature = "png")]
pub fn write_output_png(svg: &str, output: &Path, render_cfg: &RenderConfig, theme: &Theme) -> Result<()> {
    let mut opt = usvg::Options::default();
    if let Some(family) = theme.font_family.split(',').next() {
        opt.font_family = family.trim().trim_matches('"').to_string();
    }
    opt.default_size = usvg::Size::from_wh(render_cfg.width as f32, render_cfg.height as f32)
        .ok_or_else(|| anyhow::anyhow!("Invalid canvas size"))?;
    opt.fontdb_mut().load_system_fonts();

    let tree = usvg::Tree::from_str(svg, &opt)?;
    let size = tree.size().to_int_size();
    let mut pixmap = resvg::tiny_skia::Pixmap::new(size.width(), size.height())
        .ok_or_else(|| anyhow::anyhow!("Failed to allocate pixmap"))?;

    let mut pixmap_mut = pixmap.as_mut();
    resvg::render(&tree, resvg::tiny_skia::Transform::default(), &mut pixmap_mut);
    pixmap.save_png(output)?;
    Ok(())
}

#[cfg(not(feature = "png"))]
pub fn write_output_png(_svg: &str, _output: &Path, _render_cfg: &RenderConfig, _theme: &Theme) -> Result<()> {
    Err(anyhow::anyhow!("PNG output requires the 'png' feature"))
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
