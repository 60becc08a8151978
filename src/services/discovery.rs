use crate::error::AppResult;
use crate::models::{GenreId, RecommendationItem};
use crate::services::providers::CatalogProvider;

/// Upper bound on the number of recommendations returned to the client
pub const MAX_RECOMMENDATIONS: usize = 10;

/// Runs the genre-filtered discovery lookup and shapes the result
///
/// Issues a single popularity-ranked query for the qualifying genres and
/// keeps the first page's leading entries in upstream order. Results are not
/// deduplicated against the user's own input titles.
pub async fn discover(
    catalog: &dyn CatalogProvider,
    genre_ids: &[GenreId],
) -> AppResult<Vec<RecommendationItem>> {
    let mut items = catalog.discover_by_genres(genre_ids).await?;
    items.truncate(MAX_RECOMMENDATIONS);

    tracing::debug!(count = items.len(), "Discovery results shaped");

    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::services::providers::MockCatalog;

    fn item(id: u64) -> RecommendationItem {
        RecommendationItem {
            id,
            title: format!("Movie {}", id),
            poster_path: None,
            overview: String::new(),
            release_date: None,
            vote_average: 7.0,
        }
    }

    #[tokio::test]
    async fn test_results_capped_at_ten() {
        let mut catalog = MockCatalog::new();
        catalog
            .expect_discover_by_genres()
            .times(1)
            .returning(|_| Ok((0..20).map(item).collect()));

        let items = discover(&catalog, &[28]).await.expect("should succeed");

        assert_eq!(items.len(), MAX_RECOMMENDATIONS);
        assert_eq!(items[0].id, 0);
        assert_eq!(items[9].id, 9);
    }

    #[tokio::test]
    async fn test_short_pages_pass_through_in_order() {
        let mut catalog = MockCatalog::new();
        catalog
            .expect_discover_by_genres()
            .times(1)
            .returning(|_| Ok(vec![item(3), item(1), item(2)]));

        let items = discover(&catalog, &[28]).await.expect("should succeed");

        let ids: Vec<u64> = items.iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[tokio::test]
    async fn test_genre_ids_passed_to_catalog() {
        let mut catalog = MockCatalog::new();
        catalog
            .expect_discover_by_genres()
            .withf(|ids| ids == [1, 2, 3])
            .times(1)
            .returning(|_| Ok(vec![]));

        let items = discover(&catalog, &[1, 2, 3]).await.expect("should succeed");
        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn test_upstream_failure_propagates() {
        let mut catalog = MockCatalog::new();
        catalog
            .expect_discover_by_genres()
            .times(1)
            .returning(|_| Err(AppError::ExternalApi("status 503".to_string())));

        let err = discover(&catalog, &[28]).await.unwrap_err();
        assert!(matches!(err, AppError::ExternalApi(_)));
    }
}
