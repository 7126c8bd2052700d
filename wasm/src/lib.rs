use freehand_label::{
    Config, EventOutcome, InputEvent, Point, RenderOptions, Session, render_svg,
    render_with_options,
};
use serde::Deserialize;
use wasm_bindgen::prelude::*;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SketchRenderOptions {
    theme: Option<String>,
    label_text: Option<String>,
    width: Option<f64>,
    height: Option<f64>,
    close_threshold: Option<f64>,
    show_label_point: Option<bool>,
}

fn build_render_options(options: SketchRenderOptions) -> RenderOptions {
    let mut render_options = if options.theme.as_deref() == Some("modern") {
        RenderOptions::modern()
    } else {
        RenderOptions::classic()
    };

    if let Some(text) = options.label_text {
        render_options.label_text = text;
    }
    let config = &mut render_options.config;
    if let Some(width) = options.width {
        config.render.width = width;
    }
    if let Some(height) = options.height {
        config.render.height = height;
    }
    if let Some(threshold) = options.close_threshold {
        config.capture.close_threshold = threshold;
    }
    if let Some(show) = options.show_label_point {
        config.render.show_label_point = show;
    }

    render_options
}

fn parse_options(options_json: Option<String>) -> Result<SketchRenderOptions, JsValue> {
    match options_json {
        Some(raw) => serde_json::from_str(&raw).map_err(|error| JsValue::from_str(&error.to_string())),
        None => Ok(SketchRenderOptions::default()),
    }
}

/// Replays a sketch script and returns the SVG.
#[wasm_bindgen]
pub fn render_sketch_svg(script: &str, options_json: Option<String>) -> Result<String, JsValue> {
    let render_options = build_render_options(parse_options(options_json)?);
    render_with_options(script, render_options).map_err(|error| JsValue::from_str(&error.to_string()))
}

/// Live drawing session driven by browser pointer and input events.
#[wasm_bindgen]
pub struct SketchSession {
    session: Session,
    config: Config,
}

#[wasm_bindgen]
impl SketchSession {
    #[wasm_bindgen(constructor)]
    pub fn new(options_json: Option<String>) -> Result<SketchSession, JsValue> {
        let options = build_render_options(parse_options(options_json)?);
        options
            .config
            .validate()
            .map_err(|error| JsValue::from_str(&error.to_string()))?;
        let session = Session::new(options.config.capture.clone()).with_label_text(options.label_text);
        Ok(SketchSession {
            session,
            config: options.config,
        })
    }

    #[wasm_bindgen(js_name = pointerDown)]
    pub fn pointer_down(&mut self, x: f64, y: f64) {
        self.session.apply(InputEvent::PointerDown(Point::new(x, y)));
    }

    #[wasm_bindgen(js_name = pointerMove)]
    pub fn pointer_move(&mut self, x: f64, y: f64) -> bool {
        self.session.apply(InputEvent::PointerMove(Point::new(x, y))) != EventOutcome::Ignored
    }

    /// Returns true when the release closed a new shape.
    #[wasm_bindgen(js_name = pointerUp)]
    pub fn pointer_up(&mut self) -> bool {
        matches!(
            self.session.apply(InputEvent::PointerUp),
            EventOutcome::ShapeClosed { .. }
        )
    }

    #[wasm_bindgen(js_name = pointerCancel)]
    pub fn pointer_cancel(&mut self) {
        self.session.apply(InputEvent::PointerCancel);
    }

    #[wasm_bindgen(js_name = setText)]
    pub fn set_text(&mut self, value: String) {
        self.session.apply(InputEvent::TextChanged { value });
    }

    pub fn reset(&mut self) {
        self.session.apply(InputEvent::Reset);
    }

    #[wasm_bindgen(js_name = shapeCount)]
    pub fn shape_count(&self) -> usize {
        self.session.shapes().len()
    }

    #[wasm_bindgen(js_name = renderSvg)]
    pub fn render_svg(&self) -> String {
        render_svg(&self.session, &self.config.theme, &self.config.render)
    }
}
