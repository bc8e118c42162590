//! Integration tests for echoiheart

use echoiheart::{Error, IHeartClient, IHeartExtension, StreamPolicy, DEFAULT_GENRES_KEY};
use echosource::{
    ClientError, EchoMediaItem, ExtensionClient, HomeFeedClient, MemorySettings, Playable,
    SearchFeedClient, Settings, Shelf, SourceType, Track, TrackClient,
};
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const GENRE_PATH: &str = "/api/v2/content/genre/";
const STATION_PATH: &str = "/api/v2/content/liveStations/";
const SEARCH_PATH: &str = "/api/v1/catalog/searchStation/";

fn extension(server: &MockServer) -> IHeartExtension {
    let client = IHeartClient::builder()
        .api_base(server.uri())
        .build()
        .unwrap();
    IHeartExtension::with_client(client)
}

fn with_default_genres(extension: &IHeartExtension, value: bool) {
    let settings = Arc::new(MemorySettings::new());
    settings.put_bool(DEFAULT_GENRES_KEY, value);
    extension.set_settings(settings);
}

/// Unwraps the extension error carried by a host error
fn iheart_error(err: ClientError) -> Error {
    match err {
        ClientError::Extension(inner) => *inner.downcast::<Error>().unwrap(),
        other => panic!("unexpected error: {other:?}"),
    }
}

fn tracks(shelves: &[Shelf]) -> Vec<&Track> {
    shelves
        .iter()
        .filter_map(Shelf::as_item)
        .filter_map(EchoMediaItem::as_track)
        .collect()
}

fn mock_station_json(id: i64, name: &str, streams: serde_json::Value) -> serde_json::Value {
    json!({
        "id": id,
        "name": name,
        "description": format!("{} description", name),
        "logo": format!("https://img.example.com/{}.png", id),
        "callLetters": "WXYZ",
        "streams": streams
    })
}

async fn mount_genres(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path(GENRE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "hits": [
                {"id": 3, "name": "Rock", "sort": 1},
                {"id": 1, "name": "Pop", "sort": 2},
                {"id": 7, "name": "Jazz", "sort": 3}
            ]
        })))
        .mount(server)
        .await;
}

// ============================================================================
// Home feed
// ============================================================================

#[tokio::test]
async fn test_home_tabs_from_curated_genres() {
    let mock_server = MockServer::start().await;
    mount_genres(&mock_server).await;

    let extension = extension(&mock_server);
    let tabs = extension.get_home_tabs().await.unwrap();

    let ids: Vec<&str> = tabs.iter().map(|t| t.id.as_str()).collect();
    let titles: Vec<&str> = tabs.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(ids, vec!["3", "1", "7"]);
    assert_eq!(titles, vec!["Rock", "Pop", "Jazz"]);
}

#[tokio::test]
async fn test_home_tabs_from_station_genres() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(GENRE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"hits": []})))
        .expect(0)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path(STATION_PATH))
        .and(query_param("limit", "5000"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "hits": [
                {"id": 10, "genres": [{"id": 5, "name": "Country"}, {"id": 2, "name": "News"}]},
                {"id": 11, "genres": [{"id": 2, "name": "News & Talk"}]},
                {"id": 12},
                {"id": 13, "genres": [{"id": 9, "name": "Oldies"}, {"id": 5, "name": "Country"}]}
            ]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let extension = extension(&mock_server);
    with_default_genres(&extension, false);

    let tabs = extension.get_home_tabs().await.unwrap();
    let pairs: Vec<(&str, &str)> = tabs
        .iter()
        .map(|t| (t.id.as_str(), t.title.as_str()))
        .collect();
    assert_eq!(pairs, vec![("5", "Country"), ("2", "News"), ("9", "Oldies")]);
}

#[tokio::test]
async fn test_home_feed_categories_are_deferred() {
    let mock_server = MockServer::start().await;
    mount_genres(&mock_server).await;

    Mock::given(method("GET"))
        .and(path(STATION_PATH))
        .and(query_param("genreId", "7"))
        .and(query_param("limit", "5000"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "hits": [mock_station_json(
                42,
                "Smooth Jazz",
                json!({"secure_shoutcast_stream": "https://stream.example.com/jazz"})
            )]
        })))
        .expect(2)
        .mount(&mock_server)
        .await;

    let extension = extension(&mock_server);
    let feed = extension.get_home_feed(None).unwrap();

    // Nothing is fetched until the feed is loaded
    let requests = mock_server.received_requests().await.unwrap();
    assert!(requests.is_empty());

    let shelves = feed.load_all().await.unwrap();
    assert_eq!(shelves.len(), 3);
    let jazz = shelves[2].as_category().unwrap();
    assert_eq!(jazz.id, "7");
    assert_eq!(jazz.title, "Jazz");

    // Each load goes back to the network
    let category_feed = jazz.feed.as_ref().unwrap();
    for _ in 0..2 {
        let stations = category_feed.load_all().await.unwrap();
        let tracks = tracks(&stations);
        assert_eq!(tracks.len(), 1);
        assert_eq!(tracks[0].id, "42");
        assert_eq!(tracks[0].title, "Smooth Jazz");
    }
}

#[tokio::test]
async fn test_home_feed_reads_genre_setting_when_loaded() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(GENRE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"hits": []})))
        .expect(0)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path(STATION_PATH))
        .and(query_param("limit", "5000"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "hits": [{"id": 10, "genres": [{"id": 5, "name": "Country"}]}]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let extension = extension(&mock_server);
    let feed = extension.get_home_feed(None).unwrap();

    // Switched after the feed was built, before it is displayed
    with_default_genres(&extension, false);

    let shelves = feed.load_all().await.unwrap();
    assert_eq!(shelves.len(), 1);
    let category = shelves[0].as_category().unwrap();
    assert_eq!((category.id.as_str(), category.title.as_str()), ("5", "Country"));
}

#[tokio::test]
async fn test_genre_feed_maps_stations() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(STATION_PATH))
        .and(query_param("genreId", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "hits": [
                mock_station_json(1, "Rock One", json!({
                    "secure_hls_stream": "https://stream.example.com/one.m3u8",
                    "secure_pls_stream": "https://stream.example.com/one.pls"
                })),
                mock_station_json(2, "Rock Two", json!({"secure_hls_stream": ""}))
            ]
        })))
        .mount(&mock_server)
        .await;

    let extension = extension(&mock_server);
    let tab = echosource::Tab::new("3", "Rock");
    let shelves = extension
        .get_home_feed(Some(&tab))
        .unwrap()
        .load_all()
        .await
        .unwrap();
    let tracks = tracks(&shelves);
    assert_eq!(tracks.len(), 2);

    let one = tracks[0];
    assert_eq!(one.subtitle.as_deref(), Some("Rock One description"));
    assert_eq!(
        one.cover.as_ref().map(|c| c.url()),
        Some("https://img.example.com/1.png")
    );
    let titles: Vec<&str> = one
        .streamables
        .iter()
        .filter_map(|s| s.title.as_deref())
        .collect();
    assert_eq!(titles, vec!["PLS", "HLS"]);
    assert_eq!(one.playable, Playable::Yes);

    let two = tracks[1];
    assert!(two.streamables.is_empty());
    assert_eq!(
        two.playable,
        Playable::No("No Supported Streams Found".to_string())
    );
}

#[tokio::test]
async fn test_legacy_policy_keeps_hls_first() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(STATION_PATH))
        .and(query_param("genreId", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "hits": [mock_station_json(1, "Rock One", json!({
                "secure_hls_stream": "https://stream.example.com/one.m3u8",
                "secure_shoutcast_stream": "",
                "secure_pls_stream": "https://stream.example.com/one.pls"
            }))]
        })))
        .mount(&mock_server)
        .await;

    let extension = extension(&mock_server).with_policy(StreamPolicy::legacy());
    let shelves = extension
        .get_home_feed(Some(&echosource::Tab::new("3", "Rock")))
        .unwrap()
        .load_all()
        .await
        .unwrap();
    let track = tracks(&shelves)[0];

    let ids: Vec<&str> = track.streamables.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(
        ids,
        vec![
            "https://stream.example.com/one.m3u8",
            "",
            "https://stream.example.com/one.pls"
        ]
    );
}

#[tokio::test]
async fn test_home_tabs_transport_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(GENRE_PATH))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let extension = extension(&mock_server);
    let err = iheart_error(extension.get_home_tabs().await.unwrap_err());
    assert!(matches!(err, Error::Http(_)));
}

// ============================================================================
// Search
// ============================================================================

#[tokio::test]
async fn test_search_fetches_station_details() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .and(query_param("keywords", "\"jazz\""))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "stations": [{"id": 7, "score": 12.5}],
            "artists": []
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path(format!("{}7", STATION_PATH)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "hits": [mock_station_json(
                7,
                "Jazz 24",
                json!({"secure_hls_stream": "https://stream.example.com/jazz.m3u8"})
            )]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let extension = extension(&mock_server);
    let shelves = extension
        .search_feed("jazz", None)
        .unwrap()
        .load_all()
        .await
        .unwrap();

    let tracks = tracks(&shelves);
    assert_eq!(tracks.len(), 1);
    assert_eq!(tracks[0].id, "7");
    assert_eq!(tracks[0].title, "Jazz 24");
    assert_eq!(tracks[0].streamables.len(), 1);
}

#[tokio::test]
async fn test_search_keeps_hit_order() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .and(query_param("keywords", "\"rock fm\""))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "stations": [{"id": 9}, {"id": 3}]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    for (id, name) in [(9, "Rock FM Nine"), (3, "Rock FM Three")] {
        Mock::given(method("GET"))
            .and(path(format!("{}{}", STATION_PATH, id)))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "hits": [mock_station_json(
                    id,
                    name,
                    json!({"secure_shoutcast_stream": format!("https://stream.example.com/{}", id)})
                )]
            })))
            .expect(1)
            .mount(&mock_server)
            .await;
    }

    let extension = extension(&mock_server);
    let shelves = extension
        .search_feed("rock fm", None)
        .unwrap()
        .load_all()
        .await
        .unwrap();

    let ids: Vec<&str> = tracks(&shelves).iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, vec!["9", "3"]);

    // Details are fetched one hit after the other, in search order
    let requests = mock_server.received_requests().await.unwrap();
    let paths: Vec<&str> = requests.iter().map(|r| r.url.path()).collect();
    assert_eq!(
        paths,
        vec![
            SEARCH_PATH,
            "/api/v2/content/liveStations/9",
            "/api/v2/content/liveStations/3"
        ]
    );
    assert_eq!(requests[0].url.query(), Some("keywords=%22rock+fm%22"));
}

#[tokio::test]
async fn test_search_malformed_payload() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("{"))
        .mount(&mock_server)
        .await;

    let extension = extension(&mock_server);
    let err = extension
        .search_feed("jazz", None)
        .unwrap()
        .load_all()
        .await
        .unwrap_err();

    assert!(err.to_string().contains('{'));
    match iheart_error(err) {
        Error::Parse { payload, .. } => assert_eq!(payload, "{"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_search_station_without_details() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "stations": [{"id": 8}]
        })))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path(format!("{}8", STATION_PATH)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"hits": []})))
        .mount(&mock_server)
        .await;

    let extension = extension(&mock_server);
    let err = extension
        .search_feed("nothing", None)
        .unwrap()
        .load_all()
        .await
        .unwrap_err();
    assert!(matches!(iheart_error(err), Error::StationNotFound(8)));
}

// ============================================================================
// Stream resolution
// ============================================================================

fn pls_streamable(url: String) -> echosource::Streamable {
    let mut extras = std::collections::BTreeMap::new();
    extras.insert("type".to_string(), "pls".to_string());
    echosource::Streamable::server(url, 0, "PLS", extras)
}

#[tokio::test]
async fn test_resolve_pls_stream() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/streams/station.pls"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            "[playlist]\nNumberOfEntries=1\nFile1=https://edge.example.com/live.mp3\nTitle1=Station\n",
        ))
        .mount(&mock_server)
        .await;

    let extension = extension(&mock_server);
    let streamable = pls_streamable(format!("{}/streams/station.pls", mock_server.uri()));
    let media = extension
        .load_streamable_media(&streamable, false)
        .await
        .unwrap();

    let source = &media.sources()[0];
    assert_eq!(source.url, "https://edge.example.com/live.mp3");
    assert_eq!(source.source_type, SourceType::Progressive);
    assert!(source.is_live);
}

#[tokio::test]
async fn test_resolve_pls_without_entry() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/streams/broken.pls"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[playlist]\nTitle1=Station\n"))
        .mount(&mock_server)
        .await;

    let extension = extension(&mock_server);
    let streamable = pls_streamable(format!("{}/streams/broken.pls", mock_server.uri()));
    let media = extension
        .load_streamable_media(&streamable, false)
        .await
        .unwrap();
    assert_eq!(media.sources()[0].url, "");
}

#[tokio::test]
async fn test_resolve_pls_transport_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/streams/gone.pls"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let extension = extension(&mock_server);
    let streamable = pls_streamable(format!("{}/streams/gone.pls", mock_server.uri()));
    let err = extension
        .load_streamable_media(&streamable, false)
        .await
        .unwrap_err();
    assert!(matches!(iheart_error(err), Error::Http(_)));
}

#[tokio::test]
async fn test_station_stream_end_to_end() {
    let mock_server = MockServer::start().await;
    let pls_url = format!("{}/streams/rock.pls", mock_server.uri());

    Mock::given(method("GET"))
        .and(path(STATION_PATH))
        .and(query_param("genreId", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "hits": [mock_station_json(1, "Rock One", json!({
                "secure_hls_stream": "https://stream.example.com/one.m3u8",
                "secure_pls_stream": pls_url
            }))]
        })))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/streams/rock.pls"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string("[playlist]\nFile1=https://edge.example.com/rock\n"),
        )
        .mount(&mock_server)
        .await;

    let extension = extension(&mock_server);
    let shelves = extension
        .get_home_feed(Some(&echosource::Tab::new("3", "Rock")))
        .unwrap()
        .load_all()
        .await
        .unwrap();
    let track = tracks(&shelves)[0].clone();

    let pls = extension
        .load_streamable_media(&track.streamables[0], false)
        .await
        .unwrap();
    assert_eq!(pls.sources()[0].url, "https://edge.example.com/rock");
    assert_eq!(pls.sources()[0].source_type, SourceType::Progressive);

    let hls = extension
        .load_streamable_media(&track.streamables[1], false)
        .await
        .unwrap();
    assert_eq!(hls.sources()[0].url, "https://stream.example.com/one.m3u8");
    assert_eq!(hls.sources()[0].source_type, SourceType::Hls);
}
