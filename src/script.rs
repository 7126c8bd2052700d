//! Sketch scripts: a replayable record of pointer and text events.
//!
//! ```text
//! %%{init: {"closeThreshold": 60}}%%
//! text Kitchen
//! down 10 10
//! move 110 10
//! move 60, 90
//! move 12 14
//! up
//! ```
//!
//! Input whose first token is `[` (after whitespace and `//` or `/* */`
//! comments) is read as a JSON5 array of tagged events instead.

use crate::config::ConfigFile;
use crate::geometry::Point;
use crate::session::InputEvent;
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

static INIT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^%%\{\s*init\s*:\s*(\{.*\})\s*\}%%$").unwrap());
static COMMAND_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?P<cmd>[A-Za-z]+)(?:\s+(?P<rest>.*))?$").unwrap());
static SEPARATOR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*,\s*|\s+").unwrap());

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("line {line}: unknown command '{command}'")]
    UnknownCommand { line: usize, command: String },
    #[error("line {line}: {message}")]
    Invalid { line: usize, message: String },
    #[error("invalid event list: {0}")]
    Json(#[from] json5::Error),
}

#[derive(Debug, Default)]
pub struct ParsedScript {
    pub events: Vec<InputEvent>,
    /// Inline configuration from a `%%{init: ...}%%` line.
    pub init_config: Option<ConfigFile>,
}

pub fn parse_script(input: &str) -> Result<ParsedScript, ScriptError> {
    if skip_leading_comments(input).starts_with('[') {
        let events: Vec<InputEvent> = json5::from_str(input)?;
        return Ok(ParsedScript {
            events,
            init_config: None,
        });
    }

    let mut parsed = ParsedScript::default();
    for (idx, raw_line) in input.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if let Some(caps) = INIT_RE.captures(line) {
            if parsed.init_config.is_some() {
                return Err(invalid(line_no, "only one init directive is allowed"));
            }
            let config = ConfigFile::parse(&caps[1])
                .map_err(|err| invalid(line_no, format!("bad init directive: {err}")))?;
            parsed.init_config = Some(config);
            continue;
        }

        let Some(caps) = COMMAND_RE.captures(line) else {
            return Err(invalid(line_no, format!("cannot parse '{line}'")));
        };
        let command = caps["cmd"].to_ascii_lowercase();
        let rest = caps.name("rest").map_or("", |m| m.as_str());

        let event = match command.as_str() {
            "down" => InputEvent::PointerDown(parse_point(rest, line_no)?),
            "move" => InputEvent::PointerMove(parse_point(rest, line_no)?),
            "up" => no_args(InputEvent::PointerUp, rest, line_no)?,
            "cancel" => no_args(InputEvent::PointerCancel, rest, line_no)?,
            "reset" => no_args(InputEvent::Reset, rest, line_no)?,
            "text" => InputEvent::TextChanged {
                value: unquote(rest).to_string(),
            },
            _ => {
                return Err(ScriptError::UnknownCommand {
                    line: line_no,
                    command: caps["cmd"].to_string(),
                });
            }
        };
        parsed.events.push(event);
    }
    Ok(parsed)
}

/// Skips whitespace and JSON5 comments at the start of `input`.
fn skip_leading_comments(input: &str) -> &str {
    let mut rest = input.trim_start();
    loop {
        if let Some(after) = rest.strip_prefix("//") {
            rest = after.split_once('\n').map_or("", |(_, tail)| tail);
        } else if let Some(after) = rest.strip_prefix("/*") {
            // An unterminated block comment leaves nothing to inspect.
            rest = after.split_once("*/").map_or("", |(_, tail)| tail);
        } else {
            return rest;
        }
        rest = rest.trim_start();
    }
}

fn parse_point(rest: &str, line: usize) -> Result<Point, ScriptError> {
    let parts: Vec<&str> = SEPARATOR_RE
        .split(rest.trim())
        .filter(|part| !part.is_empty())
        .collect();
    let [x, y] = parts.as_slice() else {
        return Err(invalid(line, format!("expected 'x y', got '{rest}'")));
    };
    Ok(Point::new(parse_coord(x, line)?, parse_coord(y, line)?))
}

fn parse_coord(token: &str, line: usize) -> Result<f64, ScriptError> {
    match token.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(invalid(line, format!("invalid coordinate '{token}'"))),
    }
}

fn no_args(event: InputEvent, rest: &str, line: usize) -> Result<InputEvent, ScriptError> {
    if rest.trim().is_empty() {
        Ok(event)
    } else {
        Err(invalid(line, format!("unexpected arguments '{rest}'")))
    }
}

fn unquote(text: &str) -> &str {
    text.strip_prefix('"')
        .and_then(|inner| inner.strip_suffix('"'))
        .unwrap_or(text)
}

fn invalid(line: usize, message: impl Into<String>) -> ScriptError {
    ScriptError::Invalid {
        line,
        message: message.into(),
    }
}
