use fanart_client::{
    with_query_param, with_request_interceptor, ArtworkKind, Context, FanartClient, FanartError,
    FieldError, Image, RequestOption, TransportError,
};
use serde_json::json;
use std::time::Duration;
use url::Url;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const FIGHT_CLUB: &str = include_str!("fixtures/movie_550.json");

/// Point requests at the mock server instead of webservice.fanart.tv.
fn redirect_to(server: &MockServer) -> RequestOption {
    let target = Url::parse(&server.uri()).expect("mock server uri");
    with_request_interceptor(move |request| {
        let url = request.url_mut();
        url.set_host(target.host_str()).expect("mock server host");
        url.set_port(target.port()).expect("mock server port");
    })
}

fn find_image<'a>(images: &'a [Image], id: &str) -> &'a Image {
    images
        .iter()
        .find(|image| image.id().as_deref() == Ok(id))
        .unwrap_or_else(|| panic!("image with ID {id:?} not found"))
}

#[tokio::test]
async fn test_get_movie() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v3/movies/550"))
        .and(query_param("api_key", "fanart-api-key"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(FIGHT_CLUB, "application/json"))
        .expect(1)
        .mount(&server)
        .await;

    let client = FanartClient::new("fanart-api-key").unwrap();
    let movie = client
        .get_movie(&Context::background(), "550", &[redirect_to(&server)])
        .await
        .unwrap();

    assert_eq!(movie.name().unwrap(), "Fight Club");
    assert_eq!(movie.tmdb_id().unwrap(), "550");
    assert_eq!(movie.imdb_id().unwrap(), "tt0137523");

    let poster = find_image(&movie.movie_poster().unwrap(), "50065").clone();
    assert_eq!(poster.likes().unwrap(), "15");
    assert_eq!(poster.lang().unwrap(), "en");
    assert_eq!(
        poster.url().unwrap(),
        "http://assets.fanart.tv/fanart/movies/550/movieposter/fight-club-522a5477c7bd3.jpg"
    );

    let disc = find_image(&movie.movie_disc().unwrap(), "25893").clone();
    assert_eq!(disc.disc().unwrap(), "1");
    assert_eq!(disc.disc_type().unwrap(), "bluray");

    let expected = [
        (ArtworkKind::HdMovieLogo, "12657", "504c0530d5f93.png", "en", "8"),
        (ArtworkKind::MovieDisc, "25893", "512e9ac9bf96d.png", "en", "8"),
        (ArtworkKind::HdMovieClearArt, "150127", "5721041e01e28.png", "es", "7"),
        (ArtworkKind::MovieLogo, "430", "4f15e30ca6244.png", "en", "6"),
        (ArtworkKind::MovieBackground, "119633", "55e2393686745.jpg", "", "5"),
        (ArtworkKind::MovieThumb, "37711", "51b0f879f12e2.jpg", "en", "5"),
        (ArtworkKind::MovieArt, "4863", "4fd32550b72bf.png", "en", "4"),
        (ArtworkKind::MovieBanner, "202300", "59901d2e28aa1.jpg", "en", "4"),
        (ArtworkKind::MovieSquare, "452731", "683c539c1f2ea.jpg", "en", "2"),
    ];
    for (kind, id, file, lang, likes) in expected {
        let url = format!(
            "http://assets.fanart.tv/fanart/movies/550/{}/fight-club-{file}",
            kind.field_name()
        );
        let images = movie.images(kind).unwrap();
        let image = find_image(&images, id);
        assert_eq!(image.url().unwrap(), url, "{kind:?} {id}");
        assert_eq!(image.lang().unwrap(), lang, "{kind:?} {id}");
        assert_eq!(image.likes().unwrap(), likes, "{kind:?} {id}");
    }
}

#[tokio::test]
async fn test_every_artwork_category_decodes() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v3/movies/550"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(FIGHT_CLUB, "application/json"))
        .mount(&server)
        .await;

    let client = FanartClient::new("fanart-api-key").unwrap();
    let movie = client
        .get_movie(&Context::background(), "550", &[redirect_to(&server)])
        .await
        .unwrap();

    for kind in ArtworkKind::ALL {
        let images = movie.images(kind).unwrap();
        assert!(!images.is_empty(), "no images for {kind:?}");
        for image in &images {
            assert!(image.id().is_ok(), "{kind:?} image without id");
            assert!(image.url().is_ok(), "{kind:?} image without url");
        }
    }
}

#[tokio::test]
async fn test_get_movie_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v3/movies/00000000"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "status": "error",
            "error message": "Not found"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = FanartClient::new("fanart-api-key").unwrap();
    let result = client
        .get_movie(&Context::background(), "00000000", &[redirect_to(&server)])
        .await;

    match result.unwrap_err() {
        FanartError::HttpStatus(err) => {
            assert_eq!(err.status_code, 404);
            assert!(err.is_not_found());
        }
        other => panic!("expected HttpStatus error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_get_movie_rejects_html() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v3/movies/550"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw("<html>maintenance</html>", "text/html"),
        )
        .mount(&server)
        .await;

    let client = FanartClient::new("fanart-api-key").unwrap();
    let result = client
        .get_movie(&Context::background(), "550", &[redirect_to(&server)])
        .await;

    assert!(matches!(
        result.unwrap_err(),
        FanartError::ContentType { .. }
    ));
}

#[tokio::test]
async fn test_get_movie_truncated_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v3/movies/550"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(&FIGHT_CLUB[..FIGHT_CLUB.len() / 2], "application/json"),
        )
        .mount(&server)
        .await;

    let client = FanartClient::new("fanart-api-key").unwrap();
    let result = client
        .get_movie(&Context::background(), "550", &[redirect_to(&server)])
        .await;

    assert!(matches!(result.unwrap_err(), FanartError::Decode(_)));
}

#[tokio::test]
async fn test_caller_params_and_client_key_are_sent() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v3/movies/tt0137523"))
        .and(query_param("foo", "a"))
        .and(query_param("foo", "b"))
        .and(query_param("api_key", "fanart-api-key"))
        .and(header("client-key", "fanart-client-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "name": "Fight Club" })))
        .expect(1)
        .mount(&server)
        .await;

    let client = FanartClient::builder()
        .api_key("fanart-api-key")
        .client_key("fanart-client-key")
        .build()
        .unwrap();

    let movie = client
        .get_movie(
            &Context::background(),
            "tt0137523",
            &[
                with_query_param("foo", "a"),
                with_query_param("foo", "b"),
                redirect_to(&server),
            ],
        )
        .await
        .unwrap();

    assert_eq!(movie.name().unwrap(), "Fight Club");
    assert!(matches!(
        movie.tmdb_id(),
        Err(FieldError::NotFound { .. })
    ));
}

#[tokio::test]
async fn test_deadline_cuts_off_slow_response() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v3/movies/550"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(FIGHT_CLUB, "application/json")
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let client = FanartClient::new("fanart-api-key").unwrap();
    let ctx = Context::background().with_timeout(Duration::from_millis(100));
    let result = client
        .get_movie(&ctx, "550", &[redirect_to(&server)])
        .await;

    assert!(matches!(
        result.unwrap_err(),
        FanartError::Transport(TransportError::DeadlineExceeded)
    ));
}
