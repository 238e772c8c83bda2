//! The song-details response envelope: `{ "songs": [ { ... } ] }`.

use serde::Deserialize;

use crate::error::AttemptError;
use crate::track::TrackMetadata;

#[derive(Debug, Deserialize)]
pub(crate) struct SongsEnvelope {
    /// A missing or null `songs` key reads as an empty list.
    #[serde(default)]
    pub(crate) songs: Option<Vec<SongEntry>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SongEntry {
    #[serde(default)]
    pub(crate) title: String,
    #[serde(default)]
    pub(crate) artist: String,
    #[serde(default)]
    pub(crate) album: Option<String>,
    #[serde(default)]
    pub(crate) url: String,
    #[serde(default)]
    pub(crate) thumbnail: Option<String>,
}

/// Parses a response body and returns its first song.
pub(crate) fn first_song(body: &[u8]) -> Result<TrackMetadata, AttemptError> {
    let envelope: SongsEnvelope = serde_json::from_slice(body).map_err(AttemptError::Parse)?;
    let first = envelope
        .songs
        .unwrap_or_default()
        .into_iter()
        .next()
        .ok_or(AttemptError::NoResults)?;
    TrackMetadata::new(first.title, first.artist, first.album, first.url, first.thumbnail)
        .ok_or(AttemptError::IncompleteEntry)
}
