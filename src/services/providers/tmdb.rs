use crate::{
    error::AppResult,
    models::{
        CatalogMatch, GenreId, RecommendationItem, TmdbDiscoverMovie, TmdbPage, TmdbSearchMovie,
    },
    net::HttpClient,
    services::providers::CatalogProvider,
};

/// TMDB catalog provider
///
/// Uses TMDB v3: `/search/movie` for title resolution and `/discover/movie`
/// for genre-filtered, popularity-ranked discovery. Every call authenticates
/// with the `api_key` query parameter.
#[derive(Clone)]
pub struct TmdbProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
}

impl TmdbProvider {
    pub fn new(http_client: HttpClient, api_key: String, api_url: String) -> Self {
        Self {
            http_client,
            api_key,
            api_url,
        }
    }
}

#[async_trait::async_trait]
impl CatalogProvider for TmdbProvider {
    async fn search_movies(&self, query: &str) -> AppResult<Vec<CatalogMatch>> {
        let url = format!("{}/search/movie", self.api_url);

        let page: TmdbPage<TmdbSearchMovie> = self
            .http_client
            .get_json(&url, &[("api_key", self.api_key.as_str()), ("query", query)])
            .await?;

        tracing::debug!(
            query = %query,
            results = page.results.len(),
            provider = "tmdb",
            "Title search completed"
        );

        Ok(page.results.into_iter().map(CatalogMatch::from).collect())
    }

    async fn discover_by_genres(
        &self,
        genre_ids: &[GenreId],
    ) -> AppResult<Vec<RecommendationItem>> {
        let with_genres = genre_ids
            .iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>()
            .join(",");

        let url = format!("{}/discover/movie", self.api_url);

        let page: TmdbPage<TmdbDiscoverMovie> = self
            .http_client
            .get_json(
                &url,
                &[
                    ("api_key", self.api_key.as_str()),
                    ("with_genres", with_genres.as_str()),
                    ("sort_by", "popularity.desc"),
                    ("page", "1"),
                ],
            )
            .await?;

        tracing::debug!(
            with_genres = %with_genres,
            results = page.results.len(),
            provider = "tmdb",
            "Discovery query completed"
        );

        Ok(page
            .results
            .into_iter()
            .map(RecommendationItem::from)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use std::net::IpAddr;
    use std::time::Duration;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_provider(base_url: String) -> TmdbProvider {
        let servers = vec![IpAddr::from([8, 8, 8, 8])];
        let http_client =
            HttpClient::new(&servers, Duration::from_secs(5)).expect("client should build");
        TmdbProvider::new(http_client, "test_key".to_string(), base_url)
    }

    #[tokio::test]
    async fn test_search_movies_sends_key_and_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search/movie"))
            .and(query_param("api_key", "test_key"))
            .and(query_param("query", "Inception"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "page": 1,
                "results": [
                    {"id": 27205, "title": "Inception", "genre_ids": [28, 878]},
                    {"id": 64956, "title": "Inception: The Cobol Job", "genre_ids": [16]}
                ],
                "total_pages": 1,
                "total_results": 2
            })))
            .mount(&server)
            .await;

        let provider = test_provider(server.uri());
        let matches = provider
            .search_movies("Inception")
            .await
            .expect("search should succeed");

        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].id, 27205);
        assert_eq!(matches[0].genre_ids, vec![28, 878]);
    }

    #[tokio::test]
    async fn test_search_movies_empty_results() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search/movie"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "page": 1,
                "results": [],
                "total_pages": 0,
                "total_results": 0
            })))
            .mount(&server)
            .await;

        let provider = test_provider(server.uri());
        let matches = provider
            .search_movies("zzzzzz no such movie")
            .await
            .expect("search should succeed");

        assert!(matches.is_empty());
    }

    #[tokio::test]
    async fn test_discover_sends_joined_genres_and_sort() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/discover/movie"))
            .and(query_param("api_key", "test_key"))
            .and(query_param("with_genres", "28,878"))
            .and(query_param("sort_by", "popularity.desc"))
            .and(query_param("page", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "page": 1,
                "results": [
                    {
                        "id": 603,
                        "title": "The Matrix",
                        "poster_path": "/matrix.jpg",
                        "overview": "A hacker learns the truth.",
                        "release_date": "1999-03-30",
                        "vote_average": 8.2
                    }
                ],
                "total_pages": 1,
                "total_results": 1
            })))
            .mount(&server)
            .await;

        let provider = test_provider(server.uri());
        let items = provider
            .discover_by_genres(&[28, 878])
            .await
            .expect("discover should succeed");

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, 603);
        assert_eq!(items[0].title, "The Matrix");
        assert_eq!(items[0].release_date.as_deref(), Some("1999-03-30"));
    }

    #[tokio::test]
    async fn test_error_status_surfaces_as_external_api() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search/movie"))
            .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
                "status_message": "Invalid API key"
            })))
            .mount(&server)
            .await;

        let provider = test_provider(server.uri());
        let err = provider.search_movies("Inception").await.unwrap_err();

        match err {
            AppError::ExternalApi(msg) => assert!(msg.contains("401")),
            other => panic!("expected ExternalApi, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_malformed_body_surfaces_as_external_api() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/discover/movie"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let provider = test_provider(server.uri());
        let err = provider.discover_by_genres(&[28]).await.unwrap_err();

        assert!(matches!(err, AppError::ExternalApi(_)));
    }
}
