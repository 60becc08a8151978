use std::sync::Arc;

use crate::error::{AppError, AppResult};
use crate::models::{CatalogMatch, RecommendationResponse};
use crate::services::{discovery, genres, providers::CatalogProvider, resolution};

/// Generates movie recommendations from a list of user-supplied titles
///
/// Resolves each title against the catalog in parallel, aggregates the genres
/// of the resolved matches, and runs a popularity-ranked discovery query over
/// the qualifying genres. Titles that fail to resolve contribute nothing; the
/// request only fails outright when the input is invalid or the discovery
/// lookup itself fails.
pub async fn recommend(
    catalog: Arc<dyn CatalogProvider>,
    movies: Vec<String>,
) -> AppResult<RecommendationResponse> {
    let titles: Vec<String> = movies
        .into_iter()
        .map(|title| title.trim().to_string())
        .filter(|title| !title.is_empty())
        .collect();

    if titles.is_empty() {
        return Err(AppError::InvalidInput(
            "Please provide an array of movie titles".to_string(),
        ));
    }

    tracing::info!(
        title_count = titles.len(),
        "Processing recommendation request"
    );

    // Spawn parallel resolution tasks for each title
    let mut tasks = Vec::new();
    for title in titles {
        let catalog = Arc::clone(&catalog);
        let task =
            tokio::spawn(async move { resolution::resolve_title(catalog.as_ref(), &title).await });
        tasks.push(task);
    }

    // Collect results; every task is awaited even when an earlier one fails
    let mut matches: Vec<CatalogMatch> = Vec::new();
    let mut join_failures = Vec::new();

    for task in tasks {
        match task.await {
            Ok(Some(catalog_match)) => matches.push(catalog_match),
            Ok(None) => {}
            Err(e) => {
                tracing::error!(error = %e, "Title resolution task failed");
                join_failures.push(e.to_string());
            }
        }
    }

    if let Some(reason) = join_failures.first() {
        return Err(AppError::Internal(format!(
            "Title resolution task failed: {}",
            reason
        )));
    }

    let signal = genres::aggregate(&matches);

    if signal.is_empty() {
        tracing::warn!("No input titles resolved to genre data");
        return Ok(RecommendationResponse {
            recommendations: vec![],
        });
    }

    let genre_ids = genres::qualifying_genres(&signal);

    tracing::info!(
        resolved_count = matches.len(),
        genre_count = genre_ids.len(),
        "Aggregated genre signal"
    );

    let recommendations = discovery::discover(catalog.as_ref(), &genre_ids).await?;

    tracing::info!(count = recommendations.len(), "Recommendations assembled");

    Ok(RecommendationResponse { recommendations })
}
