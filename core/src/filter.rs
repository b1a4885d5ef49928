use std::collections::BTreeMap;

use thiserror::Error;

use crate::models::Song;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FilterError {
    #[error("Malformed filter '{0}': expected FIELD:VALUE[,VALUE...]")]
    MalformedFilter(String),
}

/// How the field predicates of one specification combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    /// A song matches if at least one field predicate matches.
    Any,
    /// A song matches only if every field predicate matches.
    All,
}

impl MatchMode {
    /// Maps the CLI's `--all-includes`/`--all-excludes` flags onto a mode.
    pub fn from_all_flag(all: bool) -> Self {
        if all {
            MatchMode::All
        } else {
            MatchMode::Any
        }
    }
}

/// A set of field predicates built from raw `FIELD:VALUE[,VALUE...]` strings.
///
/// Field names and accepted values are lowercased once at construction, so
/// matching never normalizes per song. Raw strings naming the same field
/// merge into a single accepted-value list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSpec {
    fields: BTreeMap<String, Vec<String>>,
}

impl FilterSpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a specification by accumulating raw filter strings in order.
    /// Fails on the first malformed string, before anything is matched.
    pub fn parse<I, S>(raw_filters: I) -> Result<Self, FilterError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut spec = Self::new();
        for raw in raw_filters {
            spec.add(raw.as_ref())?;
        }
        Ok(spec)
    }

    /// Adds one raw filter string. The part before the first `:` names the
    /// field; the rest splits on `,` into accepted literal values.
    pub fn add(&mut self, raw: &str) -> Result<(), FilterError> {
        let (field, values) = raw
            .split_once(':')
            .ok_or_else(|| FilterError::MalformedFilter(raw.to_string()))?;

        if field.is_empty() {
            return Err(FilterError::MalformedFilter(raw.to_string()));
        }

        let accepted = self.fields.entry(field.to_lowercase()).or_default();
        accepted.extend(values.split(',').map(str::to_lowercase));
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Evaluates the specification against one song. An empty specification
    /// matches every song, in both modes: no filters means no constraint.
    pub fn matches(&self, song: &Song, mode: MatchMode) -> bool {
        if self.fields.is_empty() {
            return true;
        }

        let mut predicates = self
            .fields
            .iter()
            .map(|(field, accepted)| field_matches(song, field, accepted));

        match mode {
            MatchMode::Any => predicates.any(|matched| matched),
            MatchMode::All => predicates.all(|matched| matched),
        }
    }
}

/// A song lacking the field never matches the field's predicate. Accepted
/// values are already lowercase, so the comparison handles case folding.
fn field_matches(song: &Song, field: &str, accepted: &[String]) -> bool {
    match song.field(field) {
        Some(value) => accepted.iter().any(|a| value.eq_ignore_ascii_case(a)),
        None => false,
    }
}

/// Returns the songs passing the include specification but not the exclude
/// specification, preserving the input order. Pure: songs pass through
/// without being copied or mutated.
///
/// An empty exclude specification excludes nothing. Vacuous truth only
/// applies on the include side, where "no filters" must keep everything.
pub fn filter_songs(
    songs: Vec<Song>,
    include: &FilterSpec,
    include_mode: MatchMode,
    exclude: &FilterSpec,
    exclude_mode: MatchMode,
) -> Vec<Song> {
    songs
        .into_iter()
        .filter(|song| {
            let excluded = !exclude.is_empty() && exclude.matches(song, exclude_mode);
            include.matches(song, include_mode) && !excluded
        })
        .collect()
}
