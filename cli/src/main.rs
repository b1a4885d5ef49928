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

use anyhow::Context;
use clap::{ArgAction, Parser};
use dotenvy::dotenv;
use log::info;
use search_core::{
    filter_songs, get_spotify_client, FilterError, FilterSpec, MatchMode, Song, SongSource,
    SpotifyLibrary,
};
use std::fs::File;
use std::io::{self, Write};
use std::process;

const LOG_FILE: &str = "spotify-search.log";

#[derive(Parser)]
#[command(name = "spotify-search")]
#[command(version)]
#[command(about = "Search your Spotify library for songs matching metadata filters", long_about = None)]
struct Cli {
    /// Write the log to spotify-search.log instead of stderr
    #[arg(short = 'l', long)]
    log: bool,

    /// Increase log verbosity (repeatable)
    #[arg(short = 'v', long, action = ArgAction::Count)]
    verbose: u8,

    /// Decrease log verbosity (repeatable)
    #[arg(short = 'q', long, action = ArgAction::Count)]
    quiet: u8,

    /// Metadata filter songs must match (FIELD:VALUE[,VALUE...]). Repeatable;
    /// by default songs can match any filter criteria.
    #[arg(short = 'f', long = "include-filter", value_name = "FILTER")]
    include_filter: Vec<String>,

    /// Songs must match all include filter criteria to be included
    #[arg(long)]
    all_includes: bool,

    /// Metadata filter for songs to leave out (FIELD:VALUE[,VALUE...]). Repeatable.
    #[arg(short = 'F', long = "exclude-filter", value_name = "FILTER")]
    exclude_filter: Vec<String>,

    /// Songs must match all exclude filter criteria to be excluded
    #[arg(long)]
    all_excludes: bool,

    /// Display results without asking for confirmation
    #[arg(short = 'y', long)]
    yes: bool,
}

#[tokio::main]
async fn main() {
    if dotenv().is_err() {
        // Silently ignore
    }

    let cli = Cli::parse();

    if let Err(e) = init_logging(i16::from(cli.verbose) - i16::from(cli.quiet), cli.log) {
        eprintln!("Failed to set up logging: {:#}", e);
        process::exit(1);
    }

    // Bad filter syntax aborts before any network traffic happens.
    let (include, exclude) = match build_specs(&cli) {
        Ok(specs) => specs,
        Err(e) => {
            eprintln!("{}", e);
            process::exit(2);
        }
    };
    let include_mode = MatchMode::from_all_flag(cli.all_includes);
    let exclude_mode = MatchMode::from_all_flag(cli.all_excludes);

    info!("Logging in to Spotify");
    let spotify = match get_spotify_client().await {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Failed to authenticate client: {}", e);
            process::exit(1);
        }
    };

    let library = SpotifyLibrary::new(spotify);

    info!("Fetching Liked Songs");
    let songs = match library.songs().await {
        Ok(songs) => songs,
        Err(e) => {
            eprintln!("Failed to fetch library: {}", e);
            process::exit(1);
        }
    };

    let mut results = filter_songs(songs, &include, include_mode, &exclude, exclude_mode);
    sort_results(&mut results);

    if results.is_empty() {
        info!("No songs found matching query");
    } else if should_display(&results, cli.yes) {
        display_results(&results);
    }

    info!("All done!");
}

fn build_specs(cli: &Cli) -> Result<(FilterSpec, FilterSpec), FilterError> {
    let include = FilterSpec::parse(&cli.include_filter)?;
    let exclude = FilterSpec::parse(&cli.exclude_filter)?;
    Ok((include, exclude))
}

/// Default level comes from the verbose/quiet balance; RUST_LOG overrides it.
fn init_logging(verbosity: i16, log_to_file: bool) -> anyhow::Result<()> {
    let default_level = match verbosity {
        i16::MIN..=-2 => "error",
        -1 => "warn",
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level));

    if log_to_file {
        let file = File::create(LOG_FILE)
            .with_context(|| format!("failed to create log file '{}'", LOG_FILE))?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }

    builder.init();
    Ok(())
}

/// Display order for results: artist, then album, then track number.
/// Absent fields sort before present ones.
fn sort_results(results: &mut [Song]) {
    results.sort_by(|a, b| {
        (a.artist.as_deref(), a.album.as_deref(), a.track_number).cmp(&(
            b.artist.as_deref(),
            b.album.as_deref(),
            b.track_number,
        ))
    });
}

fn should_display(results: &[Song], yes: bool) -> bool {
    if yes {
        return true;
    }

    match confirm(results.len()) {
        Ok(confirmed) => confirmed,
        Err(e) => {
            eprintln!("Failed to read confirmation: {:#}", e);
            process::exit(1);
        }
    }
}

fn confirm(total: usize) -> anyhow::Result<bool> {
    print!("\nDisplay {} results? (y/n) ", total);
    io::stdout().flush().context("failed to flush prompt")?;

    let mut answer = String::new();
    io::stdin()
        .read_line(&mut answer)
        .context("failed to read answer")?;

    Ok(matches!(answer.trim(), "y" | "Y"))
}

fn display_results(results: &[Song]) {
    let total = results.len();
    let pad = total.to_string().len();

    for (i, song) in results.iter().enumerate() {
        println!("{:>pad$}/{} {}", i + 1, total, song);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn song(id: &str, artist: Option<&str>, album: Option<&str>, track: Option<u32>) -> Song {
        Song {
            id: id.to_string(),
            title: None,
            artist: artist.map(str::to_string),
            album: album.map(str::to_string),
            track_number: track,
        }
    }

    #[test]
    fn test_sort_by_artist_album_track() {
        let mut results = vec![
            song("4", Some("Queen"), Some("Jazz"), Some(2)),
            song("1", None, None, None),
            song("3", Some("Queen"), Some("Jazz"), Some(1)),
            song("2", Some("ABBA"), Some("Arrival"), Some(1)),
        ];

        sort_results(&mut results);

        let ids: Vec<&str> = results.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3", "4"]);
    }
}
