use crate::config::load_config;
use crate::dump::write_session_dump;
use crate::render::{render_svg, write_output_png, write_output_svg};
use crate::replay_script;
use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::io::{self, Read};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(
    name = "fhlabel",
    version,
    about = "Replay a freehand sketch script and render labeled polygons"
)]
pub struct Args {
    /// Sketch script or JSON5 event list, '-' for stdin
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Output file (svg/png). Defaults to stdout for SVG if omitted.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short = 'e', long = "outputFormat", value_enum, default_value = "svg")]
    pub output_format: OutputFormat,

    /// Config file (JSON5)
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Canvas width
    #[arg(short = 'w', long = "width")]
    pub width: Option<f64>,

    /// Canvas height
    #[arg(short = 'H', long = "height")]
    pub height: Option<f64>,

    /// Label text before the script's first `text` event
    #[arg(short = 't', long = "text", default_value = "")]
    pub text: String,

    /// Draw a marker at every label anchor
    #[arg(long = "show-anchor")]
    pub show_anchor: bool,

    /// Also write a JSON dump of shapes and anchors
    #[arg(long = "dump")]
    pub dump: Option<PathBuf>,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum OutputFormat {
    Svg,
    Png,
}

pub fn run() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let mut base_config = load_config(args.config.as_deref())?;
    if let Some(width) = args.width {
        base_config.render.width = width;
    }
    if let Some(height) = args.height {
        base_config.render.height = height;
    }
    if args.show_anchor {
        base_config.render.show_label_point = true;
    }

    let input = read_input(args.input.as_deref())?;
    let (session, config) = replay_script(&input, base_config, &args.text)?;

    if let Some(path) = args.dump.as_deref() {
        write_session_dump(path, &session, &config.theme, &config.render)?;
    }

    let svg = render_svg(&session, &config.theme, &config.render);
    match args.output_format {
        OutputFormat::Svg => {
            write_output_svg(&svg, args.output.as_deref())?;
        }
        OutputFormat::Png => {
            let output = ensure_output(&args.output, "png")?;
            write_output_png(&svg, &output, &config.render, &config.theme)?;
        }
    }
    Ok(())
}

#[cfg(feature = "tracing")]
fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .try_init();
}

#[cfg(not(feature = "tracing"))]
fn init_tracing() {}

fn read_input(path: Option<&Path>) -> Result<String> {
    if let Some(path) = path
        && path != Path::new("-")
    {
        return Ok(std::fs::read_to_string(path)?);
    }
    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}

fn ensure_output(output: &Option<PathBuf>, ext: &str) -> Result<PathBuf> {
    if let Some(path) = output {
        return Ok(path.clone());
    }
    Err(anyhow::anyhow!("Output path required for {} output", ext))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_short_flags() {
        let args = Args::try_parse_from([
            "fhlabel", "-i", "room.sketch", "-o", "room.png", "-e", "png", "-w", "640", "-t", "Hall",
            "--show-anchor",
        ])
        .unwrap();
        assert_eq!(args.input.as_deref(), Some(Path::new("room.sketch")));
        assert!(matches!(args.output_format, OutputFormat::Png));
        assert_eq!(args.width, Some(640.0));
        assert_eq!(args.height, None);
        assert_eq!(args.text, "Hall");
        assert!(args.show_anchor);
    }

    #[test]
    fn png_needs_output_path() {
        assert!(ensure_output(&None, "png").is_err());
        assert_eq!(
            ensure_output(&Some(PathBuf::from("a.png")), "png").unwrap(),
            PathBuf::from("a.png")
        );
    }
}
