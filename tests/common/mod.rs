//! Shared utilities for integration testing.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::sync::mpsc;

use mueller_server::config::ListenerConfig;
use mueller_server::net::listener::Listener;
use mueller_server::sound::{SoundCue, SoundSink};
use mueller_server::{Dispatcher, RouteTable, Shutdown};

/// A sound sink that forwards every cue to a channel.
pub struct RecordingSink {
    tx: mpsc::UnboundedSender<SoundCue>,
}

impl RecordingSink {
    pub fn new() -> (Arc<Self>, mpsc::UnboundedReceiver<SoundCue>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Arc::new(Self { tx }), rx)
    }
}

impl SoundSink for RecordingSink {
    fn play(&self, cue: SoundCue) {
        let _ = self.tx.send(cue);
    }
}

/// Serve `routes` on an ephemeral loopback port.
pub async fn start_server(routes: RouteTable, sounds: Arc<dyn SoundSink>) -> (SocketAddr, Shutdown) {
    let config = ListenerConfig {
        bind_address: "127.0.0.1:0".to_string(),
        ..ListenerConfig::default()
    };
    let listener = Listener::bind(&config).await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let signal = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = Dispatcher::new(routes, sounds).serve(listener, signal).await;
    });

    (addr, shutdown)
}

/// Send raw bytes and read until the server closes the connection.
pub async fn send_raw(addr: SocketAddr, request: &[u8]) -> Vec<u8> {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream.write_all(request).await.unwrap();

    let mut response = Vec::new();
    tokio::time::timeout(Duration::from_secs(5), stream.read_to_end(&mut response))
        .await
        .expect("server did not close the connection")
        .unwrap();
    response
}

/// A parsed response: status code, headers in order, body.
#[derive(Debug)]
pub struct RawResponse {
    pub status: u16,
    pub reason: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl RawResponse {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

pub fn parse_response(raw: &[u8]) -> RawResponse {
    let text = String::from_utf8(raw.to_vec()).unwrap();
    let (head, body) = text.split_once("\r\n\r\n").expect("no header terminator");
    let mut lines = head.split("\r\n");

    let status_line = lines.next().unwrap();
    let mut parts = status_line.splitn(3, ' ');
    assert_eq!(parts.next(), Some("HTTP/1.1"));
    let status = parts.next().unwrap().parse().unwrap();
    let reason = parts.next().unwrap_or_default().to_string();

    let headers = lines
        .map(|line| {
            let (k, v) = line.split_once(": ").unwrap();
            (k.to_string(), v.to_string())
        })
        .collect();

    RawResponse {
        status,
        reason,
        headers,
        body: body.to_string(),
    }
}

/// Wait for the next sound cue.
pub async fn next_cue(rx: &mut mpsc::UnboundedReceiver<SoundCue>) -> SoundCue {
    tokio::time::timeout(Duration::from_secs(5), rx.recv())
        .await
        .expect("no sound cue")
        .expect("sink dropped")
}
