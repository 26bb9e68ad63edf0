//! End-to-end request handling over real TCP connections.

use std::sync::Arc;
use std::time::Duration;

use mueller_server::sound::{Silent, SoundCue};
use mueller_server::{Registrar, RouteTable};

mod common;

fn students_only() -> RouteTable {
    let mut registrar = Registrar::new();
    registrar
        .route("GET", "/students")
        .cable("usbc")
        .adapter("to-usba")
        .cable("usba")
        .power_supply(60, "usbc")
        .finalize(|| "GET request received: students".to_string())
        .unwrap();
    registrar.into_table()
}

fn with_bodies() -> RouteTable {
    let mut registrar = Registrar::new();
    registrar
        .route("GET", "/students")
        .cable("usbc")
        .power_supply(60, "usbc")
        .finalize(|| "GET request received: students".to_string())
        .unwrap();
    registrar
        .route("POST", "/gallery")
        .cable("usbc")
        .sound("applause.mp3")
        .curate()
        .finalize(|| "Grüße aus der Galerie ⚡".to_string())
        .unwrap();
    registrar
        .route("PUT", "/empty")
        .cable("usba")
        .finalize(String::new)
        .unwrap();
    registrar.into_table()
}

#[tokio::test]
async fn registered_route_round_trip() {
    let (addr, shutdown) = common::start_server(with_bodies(), Arc::new(Silent)).await;

    for (request, expected) in [
        ("GET /students HTTP/1.1\r\nHost: localhost\r\n\r\n", "GET request received: students"),
        ("POST /gallery HTTP/1.1\r\n\r\n", "Grüße aus der Galerie ⚡"),
        ("PUT /empty\r\n", ""),
    ] {
        let response = common::parse_response(&common::send_raw(addr, request.as_bytes()).await);
        assert_eq!(response.status, 200, "{request}");
        assert_eq!(response.reason, "OK");
        assert_eq!(response.header("Content-Type"), Some("text/plain"));
        assert_eq!(
            response.header("Content-Length"),
            Some(expected.len().to_string().as_str())
        );
        assert_eq!(response.body, expected);
    }

    shutdown.trigger();
}

#[tokio::test]
async fn exact_wire_format() {
    let (addr, shutdown) = common::start_server(students_only(), Arc::new(Silent)).await;

    let raw = common::send_raw(addr, b"GET /students HTTP/1.1\r\n\r\n").await;
    assert_eq!(
        raw,
        b"HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\nContent-Length: 30\r\n\r\nGET request received: students"
    );

    shutdown.trigger();
}

#[tokio::test]
async fn unknown_route_is_404() {
    let (addr, shutdown) = common::start_server(students_only(), Arc::new(Silent)).await;

    for request in [
        "GET /missing HTTP/1.1\r\n\r\n",
        "GET /missing",
        "POST /students HTTP/1.1\r\n\r\n",
        "get /students HTTP/1.1\r\n\r\n",
    ] {
        let response = common::parse_response(&common::send_raw(addr, request.as_bytes()).await);
        assert_eq!(response.status, 404, "{request}");
        assert_eq!(response.reason, "Not Found");
        assert_eq!(response.header("Content-Length"), Some("9"));
        assert_eq!(response.body, "Not Found");
    }

    shutdown.trigger();
}

#[tokio::test]
async fn malformed_request_is_dropped_silently() {
    let (addr, shutdown) = common::start_server(students_only(), Arc::new(Silent)).await;

    for request in ["GET\r\n\r\n", "\r\n", "   "] {
        let raw = common::send_raw(addr, request.as_bytes()).await;
        assert!(raw.is_empty(), "got a response to {request:?}");
    }

    // The server is still healthy afterwards.
    let response = common::parse_response(&common::send_raw(addr, b"GET /students\r\n").await);
    assert_eq!(response.status, 200);

    shutdown.trigger();
}

#[tokio::test]
async fn sound_cues_follow_responses() {
    let (sink, mut cues) = common::RecordingSink::new();
    let (addr, shutdown) = common::start_server(with_bodies(), sink).await;

    common::send_raw(addr, b"GET /students HTTP/1.1\r\n\r\n").await;
    assert_eq!(
        common::next_cue(&mut cues).await,
        SoundCue::MethodDefault("GET".into())
    );

    common::send_raw(addr, b"POST /gallery HTTP/1.1\r\n\r\n").await;
    assert_eq!(
        common::next_cue(&mut cues).await,
        SoundCue::Route("applause.mp3".into())
    );

    common::send_raw(addr, b"DELETE /nothing HTTP/1.1\r\n\r\n").await;
    assert_eq!(common::next_cue(&mut cues).await, SoundCue::NotFound);

    // Malformed requests cue nothing.
    common::send_raw(addr, b"GET\r\n").await;
    assert!(
        tokio::time::timeout(Duration::from_millis(100), cues.recv())
            .await
            .is_err()
    );

    shutdown.trigger();
}

#[tokio::test]
async fn concurrent_connections_are_independent() {
    let (addr, shutdown) = common::start_server(students_only(), Arc::new(Silent)).await;

    // A client that connects and never sends anything must not block others.
    let _stalled = tokio::net::TcpStream::connect(addr).await.unwrap();

    let mut tasks = Vec::new();
    for i in 0..20 {
        tasks.push(tokio::spawn(async move {
            let request = if i % 2 == 0 {
                "GET /students HTTP/1.1\r\n\r\n"
            } else {
                "GET /missing HTTP/1.1\r\n\r\n"
            };
            let response = common::parse_response(&common::send_raw(addr, request.as_bytes()).await);
            (i, response.status)
        }));
    }

    for task in tasks {
        let (i, status) = task.await.unwrap();
        assert_eq!(status, if i % 2 == 0 { 200 } else { 404 });
    }

    shutdown.trigger();
}

#[tokio::test]
async fn shutdown_stops_accepting() {
    let (addr, shutdown) = common::start_server(students_only(), Arc::new(Silent)).await;
    let response = common::parse_response(&common::send_raw(addr, b"GET /students\r\n").await);
    assert_eq!(response.status, 200);

    shutdown.trigger();
    tokio::time::sleep(Duration::from_millis(100)).await;

    // The listener is dropped with the accept loop.
    assert!(tokio::net::TcpStream::connect(addr).await.is_err());
}
