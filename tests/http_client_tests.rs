#![cfg(feature = "std")]

use artillery_client::{
    ApiRequest, CommandSink, Coordinate, HttpGameClient, StateSource, Target, Unit,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

type Log = Arc<Mutex<Vec<String>>>;

/// Minimal HTTP/1.1 server: one canned reply per `"METHOD /path"`, 404
/// otherwise. Every request line and body is recorded.
async fn serve(routes: &[(&str, u16, &str)]) -> (String, Log) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let routes: Arc<HashMap<String, (u16, String)>> = Arc::new(
        routes
            .iter()
            .map(|(key, status, body)| (key.to_string(), (*status, body.to_string())))
            .collect(),
    );
    let log: Log = Arc::default();
    let seen = log.clone();
    tokio::spawn(async move {
        loop {
            let Ok((stream, _)) = listener.accept().await else { break };
            let routes = routes.clone();
            let seen = seen.clone();
            tokio::spawn(async move {
                let _ = answer(stream, &routes, &seen).await;
            });
        }
    });
    (format!("http://{}", addr), log)
}

async fn answer(
    mut stream: TcpStream,
    routes: &HashMap<String, (u16, String)>,
    seen: &Log,
) -> std::io::Result<()> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    let header_end = loop {
        let n = stream.read(&mut chunk).await?;
        if n == 0 {
            return Ok(());
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };
    let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
    let length = head
        .lines()
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.trim().parse::<usize>().ok())
        .unwrap_or(0);
    while buf.len() < header_end + length {
        let n = stream.read(&mut chunk).await?;
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }
    let body = String::from_utf8_lossy(&buf[header_end..]).to_string();

    let mut request_line = head.lines().next().unwrap_or("").split_whitespace();
    let key = format!(
        "{} {}",
        request_line.next().unwrap_or(""),
        request_line.next().unwrap_or("")
    );
    seen.lock().unwrap().push(format!("{} {}", key, body).trim_end().to_string());

    let (status, reply) = routes
        .get(&key)
        .cloned()
        .unwrap_or((404, String::from("not found")));
    let response = format!(
        "HTTP/1.1 {} X\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        reply.len(),
        reply
    );
    stream.write_all(response.as_bytes()).await?;
    stream.shutdown().await
}

const GAME: (&str, u16, &str) = ("GET /game", 200, r#"{"map_radius": 50.0, "base_radius": {"F32": 5.0}}"#);

#[tokio::test]
async fn snapshot_is_built_from_three_gets() {
    let (url, log) = serve(&[
        GAME,
        (
            "GET /units",
            200,
            r#"{"positions": {"Coordinates": [{"x": 1.0, "y": 2.0}]}, "destinations": {"Coordinates": [{"x": 3.0, "y": 4.0}]}}"#,
        ),
        ("GET /targets", 200, r#"{"targets": "[{\"x\": -5.0, \"y\": 0.0}]"}"#),
    ])
    .await;

    let mut client = HttpGameClient::new(&url, Some(Duration::from_secs(5))).unwrap();
    let snapshot = client.fetch_snapshot().await.unwrap();
    assert_eq!(snapshot.game.map_radius, 50.0);
    assert_eq!(snapshot.game.base_radius, 5.0);
    assert_eq!(
        snapshot.units,
        vec![Unit::heading(Coordinate::new(1.0, 2.0), Coordinate::new(3.0, 4.0))]
    );
    assert_eq!(snapshot.targets, vec![Target { x: -5.0, y: 0.0 }]);
    assert_eq!(
        *log.lock().unwrap(),
        vec!["GET /game", "GET /units", "GET /targets"]
    );
}

#[tokio::test]
async fn commands_carry_json_body() {
    let (url, log) = serve(&[("POST /units/1", 200, r#"{"ok": true}"#)]).await;
    let mut client = HttpGameClient::new(&format!("{}/", url), None).unwrap();

    let response = client
        .submit(ApiRequest::SetDestination { index: 1, to: Coordinate::new(3.5, -2.0) })
        .await
        .unwrap();
    assert_eq!(response.status, 200);
    assert_eq!(response.json().unwrap(), serde_json::json!({"ok": true}));

    let seen = log.lock().unwrap();
    let (method, rest) = seen[0].split_once(' ').unwrap();
    assert_eq!(method, "POST");
    let (path, body) = rest.split_once(' ').unwrap();
    assert_eq!(path, "/units/1");
    let body: serde_json::Value = serde_json::from_str(body).unwrap();
    assert_eq!(body, serde_json::json!({"x": 3.5, "y": -2.0}));
}

#[tokio::test]
async fn delete_sends_no_body() {
    let (url, log) = serve(&[("DELETE /targets", 200, "null")]).await;
    let mut client = HttpGameClient::new(&url, None).unwrap();
    client.submit(ApiRequest::ClearTargets).await.unwrap();
    assert_eq!(*log.lock().unwrap(), vec!["DELETE /targets"]);
}

#[tokio::test]
async fn error_status_is_an_error() {
    let (url, _log) = serve(&[("POST /game/run", 500, r#"{"detail": "boom"}"#)]).await;
    let mut client = HttpGameClient::new(&url, None).unwrap();
    let err = client.submit(ApiRequest::RunTurn).await.unwrap_err();
    let message = format!("{:#}", err);
    assert!(message.contains("500"), "{}", message);
    assert!(message.contains("boom"), "{}", message);
}

#[tokio::test]
async fn failed_fetch_stops_the_snapshot() {
    let (url, log) = serve(&[GAME]).await;
    let mut client = HttpGameClient::new(&url, None).unwrap();
    let err = client.fetch_snapshot().await.unwrap_err();
    assert!(format!("{:#}", err).contains("404"));
    assert_eq!(*log.lock().unwrap(), vec!["GET /game", "GET /units"]);
}

#[tokio::test]
async fn malformed_reply_is_an_error() {
    let (url, _log) = serve(&[("GET /game", 200, r#"{"base_radius": 5.0}"#)]).await;
    let mut client = HttpGameClient::new(&url, None).unwrap();
    let err = client.fetch_snapshot().await.unwrap_err();
    assert!(err.to_string().contains("map_radius"), "{}", err);
}

#[tokio::test]
async fn unreachable_server_is_an_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let url = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);
    let mut client = HttpGameClient::new(&url, Some(Duration::from_secs(2))).unwrap();
    assert!(client.submit(ApiRequest::RunTurn).await.is_err());
}
