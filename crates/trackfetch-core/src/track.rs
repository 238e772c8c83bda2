//! Resolved track metadata.

/// Metadata of the track a link resolved to.
///
/// Immutable once built; a new lookup produces a new value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackMetadata {
    title: String,
    artist: String,
    album: Option<String>,
    source_url: String,
    thumbnail_url: Option<String>,
}

impl TrackMetadata {
    /// Builds metadata, returning `None` when title, artist or source url is
    /// blank. Blank album or thumbnail values become `None`.
    pub fn new(
        title: impl Into<String>,
        artist: impl Into<String>,
        album: Option<String>,
        source_url: impl Into<String>,
        thumbnail_url: Option<String>,
    ) -> Option<Self> {
        let title = title.into();
        let artist = artist.into();
        let source_url = source_url.into();
        if title.trim().is_empty() || artist.trim().is_empty() || source_url.trim().is_empty() {
            return None;
        }
        Some(Self {
            title,
            artist,
            album: non_blank(album),
            source_url,
            thumbnail_url: non_blank(thumbnail_url),
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn artist(&self) -> &str {
        &self.artist
    }

    pub fn album(&self) -> Option<&str> {
        self.album.as_deref()
    }

    /// Key handed to the download endpoints.
    pub fn source_url(&self) -> &str {
        &self.source_url
    }

    pub fn thumbnail_url(&self) -> Option<&str> {
        self.thumbnail_url.as_deref()
    }

    /// `"<artist> - <title>"`, the default name of the saved file.
    pub fn display_name(&self) -> String {
        format!("{} - {}", self.artist, self.title)
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
