/*
    spotify-search-rs | Rust CLI tool to search your Liked Songs with metadata filters.
    Copyright (C) 2026  Israel Alberto Roldan Vega

    This program is free software: you can redistribute it and/or modify
    it under the terms of the GNU Affero General Public License as published
    by the Free Software Foundation, either version 3 of the License, or
    (at your option) any later version.

    This program is distributed in the hope that it will be useful,
    but WITHOUT ANY WARRANTY; without even the implied warranty of
    MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
    GNU Affero General Public License for more details.

    You should have received a copy of the GNU Affero General Public License
    along with this program.  If not, see <https://www.gnu.org/licenses/>.
*/

use serde::{Deserialize, Serialize};
use std::fmt;

/// One catalog entry. Every metadata field except the service identifier
/// may be absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Song {
    pub id: String,
    pub title: Option<String>,
    pub artist: Option<String>,
    pub album: Option<String>,
    pub track_number: Option<u32>,
}

impl Song {
    /// Looks up a metadata field by name (case-insensitive) and returns the
    /// string form of its value. Absent fields and unknown names yield
    /// `None`, which the filter engine treats as "never matches".
    pub fn field(&self, name: &str) -> Option<String> {
        match name.to_lowercase().as_str() {
            "id" => Some(self.id.clone()),
            "title" => self.title.clone(),
            "artist" => self.artist.clone(),
            "album" => self.album.clone(),
            "tracknumber" | "track_number" => self.track_number.map(|n| n.to_string()),
            _ => None,
        }
    }
}

impl fmt::Display for Song {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let title = self.title.as_deref().unwrap_or("<empty>");
        let artist = self.artist.as_deref().unwrap_or("<empty>");
        let album = self.album.as_deref().unwrap_or("<empty>");

        write!(f, "{} -- {} -- {} ({})", title, artist, album, self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn song() -> Song {
        Song {
            id: "a1b2c3".to_string(),
            title: Some("Don't Stop Me Now".to_string()),
            artist: Some("Queen".to_string()),
            album: Some("Jazz".to_string()),
            track_number: Some(12),
        }
    }

    #[test]
    fn test_field_lookup_is_case_insensitive() {
        let song = song();

        assert_eq!(song.field("artist"), Some("Queen".to_string()));
        assert_eq!(song.field("Artist"), Some("Queen".to_string()));
        assert_eq!(song.field("ARTIST"), Some("Queen".to_string()));
    }

    #[test]
    fn test_field_lookup_track_number_string_form() {
        let song = song();

        assert_eq!(song.field("trackNumber"), Some("12".to_string()));
        assert_eq!(song.field("track_number"), Some("12".to_string()));
    }

    #[test]
    fn test_field_lookup_absent_and_unknown() {
        let song = Song {
            id: "a1b2c3".to_string(),
            title: None,
            artist: None,
            album: None,
            track_number: None,
        };

        assert_eq!(song.field("title"), None);
        assert_eq!(song.field("genre"), None);
        // The identifier is the one field the service always assigns.
        assert_eq!(song.field("id"), Some("a1b2c3".to_string()));
    }

    #[test]
    fn test_display_full_record() {
        let display = format!("{}", song());

        assert_eq!(display, "Don't Stop Me Now -- Queen -- Jazz (a1b2c3)");
    }

    #[test]
    fn test_display_uses_empty_placeholder() {
        let song = Song {
            id: "a1b2c3".to_string(),
            title: None,
            artist: Some("Queen".to_string()),
            album: None,
            track_number: None,
        };

        let display = format!("{}", song);

        assert_eq!(display, "<empty> -- Queen -- <empty> (a1b2c3)");
    }
}
