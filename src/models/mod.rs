use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Genre identifier assigned by the upstream catalog
pub type GenreId = u32;

/// A user-entered title resolved to a catalog entry and its genre tags
///
/// Built once per resolution attempt and discarded after aggregation; the
/// final response never refers back to the titles the user typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogMatch {
    pub id: u64,
    pub genre_ids: Vec<GenreId>,
}

/// Occurrence counts of genre ids across all resolved input titles
///
/// Keys absent from the map read as zero. The ordered map keeps the derived
/// discovery query deterministic for identical inputs regardless of the
/// order titles were resolved in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenreSignal {
    counts: BTreeMap<GenreId, u32>,
}

impl GenreSignal {
    /// Records one occurrence of a genre
    pub fn observe(&mut self, genre: GenreId) {
        *self.counts.entry(genre).or_insert(0) += 1;
    }

    /// Occurrence count for a genre; zero when absent
    pub fn count(&self, genre: GenreId) -> u32 {
        self.counts.get(&genre).copied().unwrap_or(0)
    }

    /// True when no resolved title contributed any genre
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Genres whose count meets the threshold, ascending by id
    pub fn qualifying_genres(&self, min_count: u32) -> Vec<GenreId> {
        self.counts
            .iter()
            .filter(|&(_, &count)| count >= min_count)
            .map(|(&genre, _)| genre)
            .collect()
    }
}

/// A recommended movie as returned to the client
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecommendationItem {
    pub id: u64,
    pub title: String,
    pub poster_path: Option<String>,
    pub overview: String,
    pub release_date: Option<String>,
    pub vote_average: f64,
}

/// Response body for the recommendation endpoint
///
/// An empty list is a legitimate success, distinct from a validation error.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecommendationResponse {
    pub recommendations: Vec<RecommendationItem>,
}

// ============================================================================
// TMDB API Types
// ============================================================================

/// One page of results from a TMDB list endpoint
///
/// Pagination metadata (`page`, `total_pages`, ...) is ignored; only the
/// first page is ever requested.
#[derive(Debug, Deserialize)]
pub struct TmdbPage<T> {
    pub results: Vec<T>,
}

/// Movie entry from TMDB `/search/movie`
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbSearchMovie {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub genre_ids: Vec<GenreId>,
}

impl From<TmdbSearchMovie> for CatalogMatch {
    fn from(movie: TmdbSearchMovie) -> Self {
        CatalogMatch {
            id: movie.id,
            genre_ids: movie.genre_ids,
        }
    }
}

/// Movie entry from TMDB `/discover/movie`
///
/// `overview` is nullable upstream, so it decodes as an option and flattens
/// to an empty string on the way out.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbDiscoverMovie {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub vote_average: f64,
}

impl From<TmdbDiscoverMovie> for RecommendationItem {
    fn from(movie: TmdbDiscoverMovie) -> Self {
        RecommendationItem {
            id: movie.id,
            title: movie.title,
            poster_path: movie.poster_path,
            overview: movie.overview.unwrap_or_default(),
            // TMDB reports unreleased titles with an empty-string date
            release_date: movie.release_date.filter(|date| !date.is_empty()),
            vote_average: movie.vote_average,
        }
    }
}
