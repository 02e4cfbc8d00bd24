//! Line protocol for the `surface-input-probe` binary.
//!
//! Each non-blank input line is one JSON command:
//!
//! ```text
//! {"op":"raw","kind":"pointerdown","event":{"type":"pointer","button":1,"position":{"coords":"page","page_x":120,"page_y":80}}}
//! {"op":"set_enabled","value":false}
//! {"op":"reset"}
//! ```
//!
//! Every published event is written back as one JSON line, e.g.
//! `{"type":"pointerdown","x":70,"y":60}`.

use serde::Deserialize;
use surface_input_core::{RawEvent, RawEventKind, SurfaceEvent};
use thiserror::Error;

/// One decoded input line.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum ProbeCommand {
    /// Deliver `event` to the listeners registered for `kind`.
    Raw { kind: RawEventKind, event: RawEvent },
    /// Call `set_enabled(value)` on the component.
    SetEnabled { value: bool },
    /// Call `reset()` on the component.
    Reset,
}

/// Error type for the probe line protocol.
#[derive(Debug, Error)]
pub enum ProbeError {
    /// The line is not a valid command.
    #[error("line {line}: {source}")]
    Decode {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    /// A published event could not be encoded.
    #[error("failed to encode published event: {0}")]
    Encode(#[source] serde_json::Error),
}

/// Decodes one input line.  `line_no` is 1-based and only used for errors.
///
/// Returns `Ok(None)` for blank lines.
///
/// # Errors
///
/// Returns [`ProbeError::Decode`] when the line is not a valid command.
pub fn decode_line(line_no: usize, line: &str) -> Result<Option<ProbeCommand>, ProbeError> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    serde_json::from_str(trimmed)
        .map(Some)
        .map_err(|source| ProbeError::Decode {
            line: line_no,
            source,
        })
}

/// Encodes a published event as a single JSON line (without the newline).
///
/// # Errors
///
/// Returns [`ProbeError::Encode`] if serialization fails.
pub fn encode_event(event: &SurfaceEvent) -> Result<String, ProbeError> {
    serde_json::to_string(event).map_err(ProbeError::Encode)
}
