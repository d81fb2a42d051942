//! Track snapshot type and the parser for the automation channel's
//! delimited response.

use thiserror::Error;

/// Field separator in the automation response.  A rare glyph so it never
/// collides with real track metadata.
pub const SENTINEL: char = '⎖';

/// Number of fields in a well-formed response:
/// state, title, artist, album, artwork url, duration, position.
pub const FIELD_COUNT: usize = 7;

/// One parsed read of the player's current track/playback state.
/// Produced fresh on every refresh cycle; never stored long-term.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackSnapshot {
    pub playing: bool,
    pub title: String,
    pub artist: String,
    pub album: String,
    pub artwork_url: String,
    /// Elapsed position as a fraction of total duration, clamped to [0, 1].
    pub position_ratio: f64,
}

/// Transport verbs accepted by the player's automation interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportCommand {
    Play,
    Pause,
    NextTrack,
    PreviousTrack,
}

impl TransportCommand {
    /// The literal AppleScript verb sent to the player.
    pub fn verb(self) -> &'static str {
        match self {
            TransportCommand::Play => "play",
            TransportCommand::Pause => "pause",
            TransportCommand::NextTrack => "next track",
            TransportCommand::PreviousTrack => "previous track",
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ParseError {
    /// The response split into the wrong number of fields.  Callers treat
    /// this the same as the player being unavailable.
    #[error("malformed player response: expected {FIELD_COUNT} fields, got {fields}")]
    MalformedResponse { fields: usize },
}

/// Parse the raw automation response into a snapshot.
///
/// `Ok(None)` means the player is not running (the channel's defined
/// "unavailable" signal is an empty response).  Field order is
/// `[state, title, artist, album, artwork_url, duration, position]`.
///
/// Unit contract: `duration` arrives in milliseconds, `position` in
/// seconds, since the player reports them in different native units; the
/// ratio is `position / (duration / 1000)`.  A zero duration must yield
/// `0.0`, never NaN or infinity.
pub fn parse_snapshot(raw: &str) -> Result<Option<TrackSnapshot>, ParseError> {
    // osascript terminates output with a newline; drop it before splitting.
    let raw = raw.trim_end_matches(['\n', '\r']);
    if raw.is_empty() {
        return Ok(None);
    }

    // AppleScript coerces the property list to text as "a, ⎖, b, ⎖, c",
    // leaving a ", " artifact on each side of every separator.  Strip it
    // from the field edges rather than matching the full ", ⎖, " token so
    // artifact-free responses parse identically.
    let fields: Vec<&str> = raw
        .split(SENTINEL)
        .map(|f| f.trim_matches([',', ' ']))
        .collect();

    if fields.len() != FIELD_COUNT {
        return Err(ParseError::MalformedResponse {
            fields: fields.len(),
        });
    }

    let duration_ms = parse_number(fields[5]);
    let position_secs = parse_number(fields[6]);

    Ok(Some(TrackSnapshot {
        playing: fields[0] == "playing",
        title: fields[1].to_string(),
        artist: fields[2].to_string(),
        album: fields[3].to_string(),
        artwork_url: fields[4].to_string(),
        position_ratio: position_ratio(duration_ms, position_secs),
    }))
}

/// `position / (duration / 1000)` with the non-finite guard and clamp.
pub fn position_ratio(duration_ms: f64, position_secs: f64) -> f64 {
    let ratio = position_secs / (duration_ms / 1000.0);
    if ratio.is_finite() {
        ratio.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// Lenient numeric field parse.  AppleScript emits decimal commas under
/// some locales; anything unparseable behaves as 0.
fn parse_number(field: &str) -> f64 {
    let trimmed = field.trim();
    trimmed
        .parse::<f64>()
        .or_else(|_| trimmed.replace(',', ".").parse::<f64>())
        .unwrap_or(0.0)
}
