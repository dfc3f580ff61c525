//! Marker-delimited mock/live regions in generated source files.
//!
//! Generated service files carry two kinds of regions:
//!
//! ```text
//! // DUMMY_START
//! return await getDummyUser(id);
//! // DUMMY_END
//! // LIVE_START
//! // return await httpClient(path);
//! // LIVE_END
//! ```
//!
//! The four marker tokens are a wire format shared with files generated
//! earlier; they must match the trimmed line exactly.
//!
//! Lines are split on `\n` only and joined back with `\n`, so carriage returns
//! and a trailing newline survive untouched.

use std::fmt;

use tracing::debug;

use crate::domain::error::DomainError;

pub const MOCK_START: &str = "// DUMMY_START";
pub const MOCK_END: &str = "// DUMMY_END";
pub const LIVE_START: &str = "// LIVE_START";
pub const LIVE_END: &str = "// LIVE_END";

const COMMENT: &str = "//";

/// Which implementation a region holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegionTag {
    Mock,
    Live,
}

impl RegionTag {
    fn start(self) -> &'static str {
        match self {
            Self::Mock => MOCK_START,
            Self::Live => LIVE_START,
        }
    }

    fn end(self) -> &'static str {
        match self {
            Self::Mock => MOCK_END,
            Self::Live => LIVE_END,
        }
    }
}

impl fmt::Display for RegionTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mock => write!(f, "mock"),
            Self::Live => write!(f, "live"),
        }
    }
}

/// A marker-bounded span, 1-based and inclusive of both marker lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub tag: RegionTag,
    pub start_line: usize,
    pub end_line: usize,
}

/// Target state of a transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SwitchMode {
    /// Mock code active, live code commented out.
    Mock,
    /// Live code active, mock code commented out.
    Live,
    /// Mock regions removed, live code uncommented, markers removed.
    Strip,
}

impl fmt::Display for SwitchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mock => write!(f, "mock"),
            Self::Live => write!(f, "live"),
            Self::Strip => write!(f, "strip"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Marker {
    Start(RegionTag),
    End(RegionTag),
}

fn marker(line: &str) -> Option<Marker> {
    match line.trim() {
        MOCK_START => Some(Marker::Start(RegionTag::Mock)),
        MOCK_END => Some(Marker::End(RegionTag::Mock)),
        LIVE_START => Some(Marker::Start(RegionTag::Live)),
        LIVE_END => Some(Marker::End(RegionTag::Live)),
        _ => None,
    }
}

/// One classified input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Line<'a> {
    Marker(Marker, &'a str),
    Inside(RegionTag, &'a str),
    Outside(&'a str),
}

/// Classify every line, rejecting unbalanced or nested markers.
fn scan(text: &str) -> Result<Vec<Line<'_>>, DomainError> {
    let mut open: Option<(RegionTag, usize)> = None;
    let mut lines = Vec::new();

    for (index, raw) in text.split('\n').enumerate() {
        let number = index + 1;
        let line = match (marker(raw), open) {
            (Some(Marker::Start(tag)), None) => {
                open = Some((tag, number));
                Line::Marker(Marker::Start(tag), raw)
            }
            (Some(Marker::Start(tag)), Some((current, since))) => {
                return Err(DomainError::MalformedMarkers {
                    line: number,
                    reason: format!(
                        "{} inside the {current} region opened at line {since}",
                        tag.start()
                    ),
                });
            }
            (Some(Marker::End(tag)), Some((current, _))) if tag == current => {
                open = None;
                Line::Marker(Marker::End(tag), raw)
            }
            (Some(Marker::End(tag)), _) => {
                return Err(DomainError::MalformedMarkers {
                    line: number,
                    reason: format!("{} without a matching {}", tag.end(), tag.start()),
                });
            }
            (None, Some((tag, _))) => Line::Inside(tag, raw),
            (None, None) => Line::Outside(raw),
        };
        lines.push(line);
    }

    if let Some((tag, since)) = open {
        return Err(DomainError::MalformedMarkers {
            line: since,
            reason: format!("{} is never closed by {}", tag.start(), tag.end()),
        });
    }
    Ok(lines)
}

/// List the regions of `text`.
pub fn regions(text: &str) -> Result<Vec<Region>, DomainError> {
    let mut found = Vec::new();
    let mut start = 0;
    for (index, line) in scan(text)?.into_iter().enumerate() {
        match line {
            Line::Marker(Marker::Start(_), _) => start = index + 1,
            Line::Marker(Marker::End(tag), _) => found.push(Region {
                tag,
                start_line: start,
                end_line: index + 1,
            }),
            _ => {}
        }
    }
    Ok(found)
}

/// Uncomment mock regions, comment out live regions.
pub fn activate_mock(text: &str) -> Result<String, DomainError> {
    transform(text, SwitchMode::Mock)
}

/// Uncomment live regions, comment out mock regions.
pub fn activate_live(text: &str) -> Result<String, DomainError> {
    transform(text, SwitchMode::Live)
}

/// Remove mock regions and all markers, keeping live code uncommented.
pub fn strip(text: &str) -> Result<String, DomainError> {
    transform(text, SwitchMode::Strip)
}

/// Rewrite `text` into `mode`.
///
/// `Mock` and `Live` never change the line count. `Strip` drops mock regions
/// and marker lines and swallows at most one blank line directly after each
/// removed mock block or live end marker.
pub fn transform(text: &str, mode: SwitchMode) -> Result<String, DomainError> {
    let lines = scan(text)?;
    let mut out: Vec<String> = Vec::with_capacity(lines.len());

    match mode {
        SwitchMode::Mock | SwitchMode::Live => {
            let active = if mode == SwitchMode::Mock {
                RegionTag::Mock
            } else {
                RegionTag::Live
            };
            for line in lines {
                out.push(match line {
                    Line::Marker(_, text) | Line::Outside(text) => text.to_string(),
                    Line::Inside(tag, text) if tag == active => uncomment(text),
                    Line::Inside(_, text) => comment_out(text),
                });
            }
        }
        SwitchMode::Strip => {
            let mut skip_blank = false;
            for line in lines {
                match line {
                    Line::Marker(Marker::Start(RegionTag::Mock) | Marker::End(RegionTag::Live), _) => {
                        skip_blank = true;
                    }
                    Line::Marker(..) | Line::Inside(RegionTag::Mock, _) => {}
                    Line::Inside(RegionTag::Live, text) => out.push(uncomment(text)),
                    Line::Outside(text) if skip_blank && text.trim().is_empty() => {
                        skip_blank = false;
                    }
                    Line::Outside(text) => {
                        skip_blank = false;
                        out.push(text.to_string());
                    }
                }
            }
        }
    }

    debug!(%mode, lines = out.len(), "markers transformed");
    Ok(out.join("\n"))
}

fn split_indent(line: &str) -> (&str, &str) {
    let body = line.trim_start();
    (&line[..line.len() - body.len()], body)
}

/// Strip one comment token and at most one following space.
pub fn uncomment(line: &str) -> String {
    let (indent, body) = split_indent(line);
    match body.strip_prefix(COMMENT) {
        Some(rest) => {
            let rest = rest.strip_prefix(' ').unwrap_or(rest);
            format!("{indent}{rest}")
        }
        None => line.to_string(),
    }
}

/// Prefix a comment token after the indentation; blank and already
/// commented lines are left alone.
pub fn comment_out(line: &str) -> String {
    let (indent, body) = split_indent(line);
    if body.trim().is_empty() || body.starts_with(COMMENT) {
        line.to_string()
    } else {
        format!("{indent}{COMMENT} {body}")
    }
}
