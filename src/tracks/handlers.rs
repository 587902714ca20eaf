use axum::{
    Json,
    extract::{RawQuery, State},
    http::Uri,
    response::{IntoResponse, Redirect, Response},
};

use crate::{
    app_state::AppState,
    extractor::Track,
    request::{QueryFilters, normalize},
    tracks::dtos::{ApiError, ErrorResponse},
};

/// List one page of the catalog.
///
/// Serves `/latest`, `/best`, `/downloads` and `/plays`, each optionally
/// followed by `key/value` filter pairs (`license`, `mood`, `genre`).
#[utoipa::path(
    get,
    path = "/{sort}/{filters}",
    tag = "tracks",
    params(
        ("sort" = String, Path, description = "One of latest, best, downloads, plays"),
        ("filters" = String, Path, description = "Optional key/value pairs, e.g. genre/acoustic/mood/calm"),
        QueryFilters
    ),
    responses(
        (status = 200, description = "Tracks on the requested page", body = [Track]),
        (status = 400, description = "Malformed filter path", body = ErrorResponse),
        (status = 502, description = "Catalog unreachable or unrecognised", body = ErrorResponse)
    )
)]
pub async fn list_tracks(
    State(state): State<AppState>,
    uri: Uri,
    RawQuery(query): RawQuery,
) -> Result<Response, ApiError> {
    let query = QueryFilters::from_query(query.as_deref());
    let filters = normalize(uri.path(), &query)?;
    let tracks = state.catalog.tracks(&filters).await?;
    Ok(Json(tracks.as_slice()).into_response())
}

pub async fn redirect_homepage(State(state): State<AppState>) -> Redirect {
    Redirect::temporary(&state.homepage_url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        cache::TtlCache,
        fetcher::{MockPageSource, PageResponse},
        scrape::CatalogService,
    };
    use axum::{
        Router,
        body::{Body, to_bytes},
        http::{Request, StatusCode, header::LOCATION},
        routing::get,
    };
    use std::{sync::Arc, time::Duration};
    use tower::ServiceExt;
    use url::Url;

    const LISTING: &str = r#"<div class="audio-item"><div class="audio-wrapper"><div class="pure-u-1-3"></div><div class="pure-u-2-3"><b>Aube</b></div></div></div>"#;

    fn create_test_app(source: MockPageSource) -> Router {
        let catalog = CatalogService::new(
            Arc::new(source),
            TtlCache::new(Duration::from_secs(60)),
            Url::parse("http://catalog.test/index.php").unwrap(),
        );
        let state = AppState::new(catalog, "https://example.com/project");

        Router::new()
            .route("/", get(redirect_homepage))
            .route("/latest", get(list_tracks))
            .route("/latest/{*filters}", get(list_tracks))
            .with_state(state)
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().method("GET").uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_list_tracks_returns_json_array() {
        let mut source = MockPageSource::new();
        source
            .expect_fetch_page()
            .withf(|url: &str| url.ends_with("sort=posted&license=cc-byncnd&mood=calm&tag=indie&page=1"))
            .times(1)
            .returning(|url| Ok(PageResponse::from_html(Url::parse(url).unwrap(), LISTING)));
        let app = create_test_app(source);

        let response = app
            .oneshot(get_request("/latest/license/cc-byncnd/genre/indie/mood/calm"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let tracks: Vec<Track> = serde_json::from_slice(&body).unwrap();
        assert_eq!(tracks.len(), 1);
        assert_eq!(tracks[0].title, "Aube");
    }

    #[tokio::test]
    async fn test_repeated_query_keys_keep_first_value() {
        let mut source = MockPageSource::new();
        source
            .expect_fetch_page()
            .withf(|url: &str| url.ends_with("sort=posted&tag=a&page=2"))
            .times(1)
            .returning(|url| Ok(PageResponse::from_html(Url::parse(url).unwrap(), LISTING)));
        let app = create_test_app(source);

        let response = app
            .oneshot(get_request("/latest?page=2&page=5&genre=a&genre=b"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_bad_filter_path_is_rejected_without_fetching() {
        let mut source = MockPageSource::new();
        source.expect_fetch_page().never();
        let app = create_test_app(source);

        for uri in ["/latest/1/2/3", "/latest/garbage/cc-by"] {
            let response = app.clone().oneshot(get_request(uri)).await.unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{uri}");
        }
    }

    #[tokio::test]
    async fn test_home_redirects() {
        let app = create_test_app(MockPageSource::new());

        let response = app.oneshot(get_request("/")).await.unwrap();
        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(
            response.headers().get(LOCATION).unwrap(),
            "https://example.com/project"
        );
    }
}
