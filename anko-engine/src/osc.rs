//! OSC payload parsing
//!
//! Operating system commands carry free-form payloads with their own
//! micro-grammars: `index;spec` pairs for the color table, `params;uri`
//! for hyperlinks, `targets;data` for the clipboard. Malformed pieces
//! are dropped rather than failing the whole payload wherever the
//! grammar allows partial success.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use crate::color::{parse_color_spec, Rgb};

/// URIs longer than this are truncated, matching iTerm2's 2 MiB cap.
pub const MAX_URL_LENGTH: usize = 2 * 1024 * 1024;

/// Parse an OSC 4 payload: `idx;spec[;idx;spec]...`. Malformed pairs
/// are skipped; the result is empty if nothing parsed.
pub fn parse_color_table(payload: &str) -> Vec<(usize, Rgb)> {
    let parts: Vec<&str> = payload.split(';').collect();
    let mut entries = Vec::new();
    let mut i = 0;
    while i + 1 < parts.len() {
        if let (Ok(index), Some(color)) = (parts[i].parse::<usize>(), parse_color_spec(parts[i + 1]))
        {
            entries.push((index, color));
        }
        i += 2;
    }
    entries
}

/// Parse an OSC 10/11/12 payload: `spec[;spec[;spec]]`. Every slot is
/// kept so consecutive commands can consume successive colors; invalid
/// specs become `None`.
pub fn parse_color_list(payload: &str) -> Vec<Option<Rgb>> {
    payload.split(';').map(parse_color_spec).collect()
}

/// A parsed OSC 52 payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClipboardOp {
    /// The application asked for the clipboard contents (`data == "?"`).
    Query,
    /// Replace the clipboard contents.
    Set(String),
}

/// Parse an OSC 52 payload: `targets;data` with base64-encoded data.
pub fn parse_clipboard(payload: &str) -> Option<ClipboardOp> {
    let (_targets, data) = payload.split_once(';')?;
    if data == "?" {
        return Some(ClipboardOp::Query);
    }
    let decoded = STANDARD.decode(data).ok()?;
    Some(ClipboardOp::Set(String::from_utf8_lossy(&decoded).into_owned()))
}

/// Parse an OSC 8 payload: `params;uri` where params are `:`-separated
/// `key=value` pairs. Only the `id` parameter is meaningful. Returns
/// `(id, uri)`; an empty uri ends the current hyperlink.
pub fn parse_hyperlink(payload: &str) -> Option<(String, String)> {
    if payload == ";" {
        return Some((String::new(), String::new()));
    }
    let (params, uri) = payload.split_once(';')?;
    let uri: String = uri.chars().take(MAX_URL_LENGTH).collect();
    let mut id = String::new();
    for part in params.split(':') {
        if let Some(value) = part.strip_prefix("id=") {
            id = value.to_string();
        }
    }
    Some((id, uri))
}
