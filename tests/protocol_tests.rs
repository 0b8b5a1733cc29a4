#![cfg(feature = "std")]

use artillery_client::{ApiRequest, Coordinate, Method, Outcome, ServerResponse};

#[test]
fn request_table() {
    let at = Coordinate::new(3.5, -2.0);
    let cases = [
        (ApiRequest::FetchGame, Method::Get, "/game", None),
        (ApiRequest::FetchUnits, Method::Get, "/units", None),
        (ApiRequest::FetchTargets, Method::Get, "/targets", None),
        (ApiRequest::AddUnit(at), Method::Post, "/units", Some(at)),
        (ApiRequest::DeleteUnit(2), Method::Delete, "/units/2", None),
        (
            ApiRequest::SetDestination { index: 0, to: at },
            Method::Post,
            "/units/0",
            Some(at),
        ),
        (ApiRequest::AddTarget(at), Method::Post, "/targets", Some(at)),
        (ApiRequest::ClearTargets, Method::Delete, "/targets", None),
        (ApiRequest::RunTurn, Method::Post, "/game/run", None),
    ];
    for (request, method, path, body) in cases {
        assert_eq!(request.method(), method, "{:?}", request);
        assert_eq!(request.path(), path, "{:?}", request);
        assert_eq!(request.body(), body, "{:?}", request);
    }
}

#[test]
fn request_display() {
    assert_eq!(ApiRequest::DeleteUnit(7).to_string(), "DELETE /units/7");
    assert_eq!(ApiRequest::RunTurn.to_string(), "POST /game/run");
}

#[test]
fn body_serializes_as_x_and_y() {
    let body = ApiRequest::AddTarget(Coordinate::new(1.0, 2.5)).body().unwrap();
    let value = serde_json::to_value(body).unwrap();
    assert_eq!(value, serde_json::json!({"x": 1.0, "y": 2.5}));
}

#[test]
fn json_bodies_are_pretty_printed() {
    let response = ServerResponse::new(200, r#"{"ok":true}"#);
    assert_eq!(response.pretty_lines(), vec!["{", "  \"ok\": true", "}"]);
}

#[test]
fn other_bodies_are_shown_as_is() {
    let response = ServerResponse::new(201, "created\nunit 3");
    assert_eq!(response.pretty_lines(), vec!["created", "unit 3"]);
    assert!(response.json().is_err());
}

#[test]
fn outcome_lines() {
    let sent = Outcome::Response(ServerResponse::new(200, "null"));
    assert_eq!(sent.lines(), vec!["status 200", "null"]);

    let rejected = Outcome::Rejected(String::from("x must be a number"));
    assert_eq!(rejected.lines(), vec!["not sent: x must be a number"]);
}
