pub mod anchor;
pub mod capture;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod dump;
pub mod geometry;
pub mod log;
pub mod render;
pub mod script;
pub mod session;
pub mod text_metrics;
pub mod theme;

pub use anchor::{
    AnchorAxis, AnchorPlacement, compute_label_anchor, place_label, place_polygon_label,
};
#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{CaptureConfig, Config, RenderConfig};
pub use geometry::{Point, Polygon};
pub use render::render_svg;
pub use script::parse_script;
pub use session::{EventOutcome, InputEvent, LabeledShape, Session};
pub use theme::Theme;

/// Everything needed to turn a sketch script into an SVG.
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    pub config: Config,
    /// Label text in effect before the script's first `text` event.
    pub label_text: String,
}

impl RenderOptions {
    pub fn classic() -> Self {
        Self::default()
    }

    pub fn modern() -> Self {
        let mut options = Self::default();
        options.config.theme = Theme::modern();
        options
    }
}

/// Parses `script`, applies any inline init directive on top of `config`,
/// and replays the events into a fresh session.
pub fn replay_script(script: &str, config: Config, label_text: &str) -> anyhow::Result<(Session, Config)> {
    let parsed = parse_script(script)?;
    let config = match parsed.init_config {
        Some(init) => crate::config::merge_config(config, init)?,
        None => config,
    };
    config.validate()?;

    let mut session = Session::new(config.capture.clone()).with_label_text(label_text);
    session.apply_all(parsed.events);
    Ok((session, config))
}

pub fn render_with_options(script: &str, options: RenderOptions) -> anyhow::Result<String> {
    let (session, config) = replay_script(script, options.config, &options.label_text)?;
    Ok(render_svg(&session, &config.theme, &config.render))
}
