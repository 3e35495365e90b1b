use httpmock::prelude::*;
use shounen_vs::{AnimeInfo, CharacterSource, JikanClient, JikanOptions, VsError};
use std::time::Duration;

fn entry(id: u64, name: &str, image: Option<&str>, role: &str) -> serde_json::Value {
    let images = match image {
        Some(url) => serde_json::json!({ "jpg": { "image_url": url }, "webp": { "image_url": url } }),
        None => serde_json::json!({ "jpg": { "image_url": null } }),
    };
    serde_json::json!({
        "character": { "mal_id": id, "name": name, "images": images },
        "role": role,
        "voice_actors": []
    })
}

fn anime(server: &MockServer, id: u32, name: &str) -> AnimeInfo {
    AnimeInfo::new(id, name, server.url(format!("/anime/{}/characters", id)))
}

#[tokio::test]
async fn test_fetch_returns_min_of_valid_and_limit() {
    let server = MockServer::start();

    // 40 valid records interleaved with 10 invalid ones
    let mut data = Vec::new();
    for i in 1..=40u64 {
        data.push(entry(i, &format!("Pirate {}", i), Some("https://cdn.example.com/p.jpg"), "Supporting"));
        if i % 4 == 0 {
            data.push(entry(1000 + i, "", Some("https://cdn.example.com/p.jpg"), "Main"));
        }
    }
    assert_eq!(data.len(), 50);

    let api_mock = server.mock(|when, then| {
        when.method(GET).path("/anime/21/characters");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({ "data": data }));
    });

    let client = JikanClient::new(JikanOptions::default()).unwrap();
    let characters = client
        .fetch_characters(&anime(&server, 21, "One Piece"))
        .await
        .unwrap();

    api_mock.assert();
    assert_eq!(characters.len(), 30);
    assert_eq!(characters[0].id(), 1);
    assert_eq!(characters[29].id(), 30);
    assert!(characters
        .iter()
        .all(|c| !c.name().trim().is_empty() && c.image_url().starts_with("https://")));
}

#[tokio::test]
async fn test_fetch_keeps_all_when_below_limit() {
    let server = MockServer::start();
    let body = serde_json::json!({
        "data": [
            entry(5, "Kurosaki, Ichigo", Some("https://cdn.example.com/5.jpg"), "Main"),
            entry(6, "Kuchiki, Rukia", None, "Main"),
            entry(7, "Abarai, Renji", Some("ftp://cdn.example.com/7.jpg"), "Supporting"),
            entry(8, "Inoue, Orihime", Some("http://cdn.example.com/8.jpg"), "Supporting")
        ]
    });

    server.mock(|when, then| {
        when.method(GET).path("/anime/269/characters");
        then.status(200).json_body(body);
    });

    let client = JikanClient::new(JikanOptions::default()).unwrap();
    let characters = client
        .fetch_characters(&anime(&server, 269, "Bleach"))
        .await
        .unwrap();

    let ids: Vec<u64> = characters.iter().map(|c| c.id()).collect();
    assert_eq!(ids, vec![5, 8]);
    assert!(characters.iter().all(|c| c.anime() == "Bleach"));
}

#[tokio::test]
async fn test_fetch_main_only() {
    let server = MockServer::start();
    let body = serde_json::json!({
        "data": [
            entry(17, "Uzumaki, Naruto", Some("https://cdn.example.com/17.jpg"), "Main"),
            entry(85, "Hatake, Kakashi", Some("https://cdn.example.com/85.jpg"), "Supporting"),
            entry(13, "Uchiha, Sasuke", Some("https://cdn.example.com/13.jpg"), "Main")
        ]
    });

    server.mock(|when, then| {
        when.method(GET).path("/anime/20/characters");
        then.status(200).json_body(body);
    });

    let client = JikanClient::new(JikanOptions {
        main_only: true,
        ..JikanOptions::default()
    })
    .unwrap();
    let characters = client
        .fetch_characters(&anime(&server, 20, "Naruto"))
        .await
        .unwrap();

    let ids: Vec<u64> = characters.iter().map(|c| c.id()).collect();
    assert_eq!(ids, vec![17, 13]);
}

#[tokio::test]
async fn test_fetch_empty_result() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/anime/20/characters");
        then.status(200).json_body(serde_json::json!({ "data": [
            entry(1, "   ", Some("https://cdn.example.com/1.jpg"), "Main"),
            entry(2, "No Picture", None, "Main")
        ] }));
    });

    let client = JikanClient::new(JikanOptions::default()).unwrap();
    let err = client
        .fetch_characters(&anime(&server, 20, "Naruto"))
        .await
        .unwrap_err();

    assert!(matches!(err, VsError::EmptyResultError { ref anime } if anime == "Naruto"));
}

#[tokio::test]
async fn test_fetch_non_success_status() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET).path("/anime/21/characters");
        then.status(429).body("Too Many Requests");
    });

    let client = JikanClient::new(JikanOptions::default()).unwrap();
    let err = client
        .fetch_characters(&anime(&server, 21, "One Piece"))
        .await
        .unwrap_err();

    api_mock.assert();
    assert!(matches!(err, VsError::FetchError { status: 429, ref anime } if anime == "One Piece"));
}

#[tokio::test]
async fn test_fetch_unexpected_shape() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/anime/21/characters");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({ "pagination": { "has_next_page": false } }));
    });

    let client = JikanClient::new(JikanOptions::default()).unwrap();
    let err = client
        .fetch_characters(&anime(&server, 21, "One Piece"))
        .await
        .unwrap_err();

    assert!(matches!(err, VsError::ParseError { .. }));
}

#[tokio::test]
async fn test_fetch_times_out_when_configured() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/anime/21/characters");
        then.status(200)
            .delay(Duration::from_secs(2))
            .json_body(serde_json::json!({ "data": [] }));
    });

    let client = JikanClient::new(JikanOptions {
        timeout: Some(Duration::from_millis(200)),
        ..JikanOptions::default()
    })
    .unwrap();
    let err = client
        .fetch_characters(&anime(&server, 21, "One Piece"))
        .await
        .unwrap_err();

    match err {
        VsError::Request(e) => assert!(e.is_timeout()),
        other => panic!("expected request timeout, got {:?}", other),
    }
}
