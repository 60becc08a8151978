use crate::{
    error::AppResult,
    models::{CatalogMatch, GenreId, RecommendationItem},
};

pub mod tmdb;

/// Upstream movie catalog abstraction
///
/// The single seam between the recommendation pipeline and the third-party
/// catalog service. Production wires in the TMDB provider; tests substitute
/// a scripted stand-in.
#[async_trait::async_trait]
pub trait CatalogProvider: Send + Sync {
    /// Search the catalog for a free-text movie title
    ///
    /// Returns candidate matches in upstream relevance order. Callers treat
    /// the first entry as authoritative.
    async fn search_movies(&self, query: &str) -> AppResult<Vec<CatalogMatch>>;

    /// List movies carrying the given genres, most popular first
    ///
    /// Single page only; callers cap the result length themselves.
    async fn discover_by_genres(
        &self,
        genre_ids: &[GenreId],
    ) -> AppResult<Vec<RecommendationItem>>;
}

#[cfg(test)]
mockall::mock! {
    /// Scripted catalog for service unit tests
    pub Catalog {}

    #[async_trait::async_trait]
    impl CatalogProvider for Catalog {
        async fn search_movies(&self, query: &str) -> AppResult<Vec<CatalogMatch>>;
        async fn discover_by_genres(
            &self,
            genre_ids: &[GenreId],
        ) -> AppResult<Vec<RecommendationItem>>;
    }
}
