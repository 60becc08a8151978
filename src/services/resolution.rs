use crate::models::CatalogMatch;
use crate::services::providers::CatalogProvider;

/// Resolves one user-entered title to its catalog match
///
/// Infallible by contract: an upstream failure (timeout, DNS, non-2xx) or a
/// title with no search hits both degrade to `None`, so a single bad title
/// never aborts the batch it arrived in. The first search hit is taken as
/// authoritative since the upstream orders results by relevance.
pub async fn resolve_title(catalog: &dyn CatalogProvider, title: &str) -> Option<CatalogMatch> {
    match catalog.search_movies(title).await {
        Ok(matches) => match matches.into_iter().next() {
            Some(found) => {
                tracing::info!(title = %title, genres = ?found.genre_ids, "Resolved title");
                Some(found)
            }
            None => {
                tracing::warn!(title = %title, "No catalog match for title");
                None
            }
        },
        Err(error) => {
            tracing::warn!(
                title = %title,
                error = %error,
                "Title resolution failed; contributing no genres"
            );
            None
        }
    }
}
