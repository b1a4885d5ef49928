use crate::models::Song;
use async_trait::async_trait;
use futures::stream::TryStreamExt;
use log::debug;
use rspotify::{model::FullTrack, prelude::*, AuthCodeSpotify};
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LibraryError {
    #[error("Spotify API error: {0}")]
    Spotify(#[from] rspotify::ClientError),
}

/// Source of the user's song catalog.
///
/// The search pipeline depends on this trait rather than on the Spotify
/// client, so the filtering path can be exercised against an in-memory
/// catalog.
#[async_trait]
pub trait SongSource {
    /// Fetches the full catalog into memory, preserving service order.
    async fn songs(&self) -> Result<Vec<Song>, LibraryError>;
}

/// The user's "Liked Songs" (Saved Tracks) library.
pub struct SpotifyLibrary {
    spotify: Arc<AuthCodeSpotify>,
}

impl SpotifyLibrary {
    pub fn new(spotify: AuthCodeSpotify) -> Self {
        Self {
            spotify: Arc::new(spotify),
        }
    }
}

#[async_trait]
impl SongSource for SpotifyLibrary {
    async fn songs(&self) -> Result<Vec<Song>, LibraryError> {
        let mut songs = Vec::new();
        let mut stream = self.spotify.current_user_saved_tracks(None);

        while let Some(item) = stream.try_next().await? {
            songs.push(song_from_track(&item.track));
        }

        debug!("Fetched {} songs from Liked Songs", songs.len());
        Ok(songs)
    }
}

fn song_from_track(track: &FullTrack) -> Song {
    let artists = track
        .artists
        .iter()
        .map(|a| a.name.as_str())
        .collect::<Vec<&str>>()
        .join(", ");

    Song {
        id: track
            .id
            .as_ref()
            .map(|id| id.to_string())
            .unwrap_or_else(|| "unknown".to_string()),
        title: non_empty(track.name.clone()),
        // Local files report a track number of 0, which means "none".
        track_number: (track.track_number > 0).then_some(track.track_number),
        artist: non_empty(artists),
        album: non_empty(track.album.name.clone()),
    }
}

// Spotify reports missing metadata as empty strings; the filter engine
// models it as an absent field.
fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{filter_songs, FilterSpec, MatchMode};

    struct InMemoryLibrary {
        songs: Vec<Song>,
    }

    #[async_trait]
    impl SongSource for InMemoryLibrary {
        async fn songs(&self) -> Result<Vec<Song>, LibraryError> {
            Ok(self.songs.clone())
        }
    }

    fn song(id: &str, artist: &str) -> Song {
        Song {
            id: id.to_string(),
            title: None,
            artist: Some(artist.to_string()),
            album: None,
            track_number: None,
        }
    }

    #[tokio::test]
    async fn test_source_feeds_the_filter_pipeline() {
        let library = InMemoryLibrary {
            songs: vec![song("1", "Queen"), song("2", "ABBA"), song("3", "Queen")],
        };

        let songs = library.songs().await.unwrap();
        let include = FilterSpec::parse(["artist:queen"]).unwrap();

        let results = filter_songs(
            songs,
            &include,
            MatchMode::Any,
            &FilterSpec::new(),
            MatchMode::Any,
        );

        let ids: Vec<&str> = results.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3"]);
    }

    #[test]
    fn test_non_empty_maps_blank_to_absent() {
        assert_eq!(non_empty(String::new()), None);
        assert_eq!(non_empty("Jazz".to_string()), Some("Jazz".to_string()));
    }
}
