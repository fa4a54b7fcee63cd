/// TVMaze catalog source
///
/// Public API, no key required. Endpoints used:
/// 1. Listing: /shows?page=0
/// 2. Details: /shows/{id}
/// 3. Search: /search/shows?q={query}
/// 4. Cast: /shows/{id}/cast
/// 5. People: /people/{id} and /people/{id}/castcredits?embed=show
use crate::{
    error::{AppError, AppResult},
    models::{
        tvmaze::{TvMazeCastCredit, TvMazeCastEntry, TvMazePerson, TvMazeSearchHit, TvMazeShow},
        CastMember, Movie, Person,
    },
    services::providers::CatalogSource,
};
use reqwest::Client as HttpClient;
use serde::de::DeserializeOwned;
use std::time::Duration;

#[derive(Clone)]
pub struct TvMazeProvider {
    http_client: HttpClient,
    api_url: String,
}

impl TvMazeProvider {
    /// Creates a provider whose requests give up after `timeout`
    pub fn new(api_url: String, timeout: Duration) -> AppResult<Self> {
        let http_client = HttpClient::builder()
            .timeout(timeout)
            .user_agent(concat!("cinescope/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http_client,
            api_url: api_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_url, path)
    }

    /// GETs `path` and decodes the JSON body, failing on any non-2xx status
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> AppResult<T> {
        let url = self.url(path);

        let response = self.http_client.get(&url).query(query).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "TVMaze API returned status {} for {}: {}",
                status, path, body
            )));
        }

        let response_text = response.text().await?;

        serde_json::from_str(&response_text).map_err(|e| {
            tracing::error!(
                error = %e,
                path = %path,
                "Failed to deserialize TVMaze response"
            );
            tracing::debug!(response = %response_text, "Raw TVMaze API response");
            AppError::ExternalApi(format!("Failed to parse TVMaze response: {}", e))
        })
    }
}

#[async_trait::async_trait]
impl CatalogSource for TvMazeProvider {
    async fn fetch_shows(&self) -> AppResult<Vec<Movie>> {
        let shows: Vec<TvMazeShow> = self.get_json("/shows", &[("page", "0")]).await?;

        tracing::info!(
            shows = shows.len(),
            provider = "tvmaze",
            "Show listing fetched"
        );

        Ok(shows.into_iter().map(Movie::from).collect())
    }

    async fn fetch_show(&self, id: u64) -> AppResult<Movie> {
        let show: TvMazeShow = self.get_json(&format!("/shows/{}", id), &[]).await?;
        Ok(Movie::from(show))
    }

    async fn search_shows(&self, query: &str) -> AppResult<Vec<Movie>> {
        let hits: Vec<TvMazeSearchHit> = self.get_json("/search/shows", &[("q", query)]).await?;

        tracing::info!(
            query = %query,
            results = hits.len(),
            provider = "tvmaze",
            "Show search completed"
        );

        Ok(hits.into_iter().map(|hit| Movie::from(hit.show)).collect())
    }

    async fn fetch_cast(&self, show_id: u64) -> AppResult<Vec<CastMember>> {
        let entries: Vec<TvMazeCastEntry> = self
            .get_json(&format!("/shows/{}/cast", show_id), &[])
            .await?;

        Ok(entries.into_iter().map(CastMember::from).collect())
    }

    async fn fetch_person(&self, person_id: u64) -> AppResult<Person> {
        let person: TvMazePerson = self
            .get_json(&format!("/people/{}", person_id), &[])
            .await?;

        Ok(Person::from(person))
    }

    async fn fetch_person_credits(&self, person_id: u64) -> AppResult<Vec<Movie>> {
        let credits: Vec<TvMazeCastCredit> = self
            .get_json(
                &format!("/people/{}/castcredits", person_id),
                &[("embed", "show")],
            )
            .await?;

        Ok(credits.into_iter().map(Movie::from).collect())
    }

    fn name(&self) -> &'static str {
        "tvmaze"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CatalogOrigin, NO_DESCRIPTION, PLACEHOLDER_IMAGE};
    use crate::services::{fallback, CatalogAdapter};
    use std::sync::Arc;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serves the same canned response to every connection, returning the
    /// base URL of the server
    async fn serve_canned(status: &'static str, body: String) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            loop {
                let Ok((mut socket, _)) = listener.accept().await else {
                    break;
                };
                let body = body.clone();
                tokio::spawn(async move {
                    let mut request = Vec::new();
                    let mut buf = [0u8; 1024];
                    while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                        match socket.read(&mut buf).await {
                            Ok(0) | Err(_) => return,
                            Ok(n) => request.extend_from_slice(&buf[..n]),
                        }
                    }
                    let response = format!(
                        "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                        status,
                        body.len(),
                        body
                    );
                    let _ = socket.write_all(response.as_bytes()).await;
                    let _ = socket.shutdown().await;
                });
            }
        });

        format!("http://{}", addr)
    }

    fn provider_for(api_url: String) -> TvMazeProvider {
        TvMazeProvider::new(api_url, Duration::from_secs(5)).unwrap()
    }

    fn create_test_provider() -> TvMazeProvider {
        TvMazeProvider::new("http://test.local/".to_string(), Duration::from_secs(1)).unwrap()
    }

    #[test]
    fn test_url_strips_trailing_slash() {
        let provider = create_test_provider();
        assert_eq!(provider.url("/shows/1"), "http://test.local/shows/1");
    }

    #[test]
    fn test_provider_name() {
        assert_eq!(create_test_provider().name(), "tvmaze");
    }

    #[test]
    fn test_search_hit_deserialization() {
        let json = r#"[{
            "score": 0.9,
            "show": {"id": 139, "name": "Girls", "genres": ["Drama", "Romance"], "rating": {"average": 6.5}}
        }]"#;

        let hits: Vec<TvMazeSearchHit> = serde_json::from_str(json).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].show.name, "Girls");
    }

    #[tokio::test]
    async fn test_unreachable_host_is_transport_error() {
        let provider =
            TvMazeProvider::new("http://127.0.0.1:9".to_string(), Duration::from_millis(200))
                .unwrap();
        let err = provider.fetch_shows().await.unwrap_err();
        assert!(err.is_transport());
    }

    #[tokio::test]
    async fn test_unavailable_service_is_transport_error() {
        let api_url =
            serve_canned("503 Service Unavailable", r#"{"error":"down"}"#.to_string()).await;

        let err = provider_for(api_url.clone()).fetch_shows().await.unwrap_err();
        assert!(err.is_transport());

        let adapter = CatalogAdapter::new(Arc::new(provider_for(api_url)), 20);
        let ids: Vec<u64> = adapter.load_catalog().await.iter().map(|m| m.id).collect();
        let sample_ids: Vec<u64> = fallback::sample_movies().iter().map(|m| m.id).collect();

        assert_eq!(ids.len(), 3);
        assert_eq!(ids, sample_ids);
        assert_eq!(adapter.catalog_origin(), Some(CatalogOrigin::Fallback));
    }

    #[tokio::test]
    async fn test_listing_is_mapped_and_capped() {
        let shows: Vec<serde_json::Value> = (1..=5)
            .map(|id| {
                let summary = (id == 1).then_some("<p>A <b>quiet</b> town.</p>");
                serde_json::json!({
                    "id": id,
                    "name": format!("Show {}", id),
                    "genres": ["Drama"],
                    "rating": {"average": null},
                    "image": null,
                    "summary": summary,
                    "premiered": "2010-04-01"
                })
            })
            .collect();
        let api_url = serve_canned("200 OK", serde_json::Value::Array(shows).to_string()).await;

        let adapter = CatalogAdapter::new(Arc::new(provider_for(api_url)), 3);
        let movies = adapter.load_catalog().await;

        assert_eq!(movies.len(), 3);
        assert_eq!(
            movies.iter().map(|m| m.id).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
        assert_eq!(movies[0].overview, "A quiet town.");
        assert_eq!(movies[1].overview, NO_DESCRIPTION);
        assert_eq!(movies[0].poster_path, PLACEHOLDER_IMAGE);
        assert_eq!(movies[0].vote_average, 7.0);
        assert_eq!(adapter.catalog_origin(), Some(CatalogOrigin::Live));
    }
}
