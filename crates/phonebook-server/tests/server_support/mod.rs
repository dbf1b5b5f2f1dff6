#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;

use phonebook_model::{NewPhoneRecord, PhoneValidator};
use phonebook_query::{PhoneStore, SqliteStore};
use phonebook_server::{build_router, AppState};
use tokio::io::{AsyncReadExt, AsyncWriteExt};

pub const UGANDA_VALID: &str = "(256) 775069443";
pub const MOROCCO_INVALID: &str = "(212) 123";

/// In-memory store with `rows` phones: odd ids valid Uganda, even ids
/// invalid Morocco.
pub fn fixture_store(rows: u64) -> SqliteStore {
    let store = SqliteStore::open_in_memory().expect("open memory db");
    store.migrate().expect("schema");
    store.seed_countries().expect("countries");
    for i in 1..=rows {
        let input = if i % 2 == 1 {
            NewPhoneRecord::parse("Uganda", UGANDA_VALID, None)
        } else {
            NewPhoneRecord::parse("Morocco", MOROCCO_INVALID, Some("cust-7"))
        }
        .expect("parse");
        store
            .create(&input.into_validated(PhoneValidator::standard()))
            .expect("insert");
    }
    store
}

pub async fn spawn_with_state(state: AppState) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral");
    let addr = listener.local_addr().expect("local addr");
    let app = build_router(state);
    tokio::spawn(async move { axum::serve(listener, app).await.expect("serve app") });
    addr
}

pub async fn spawn_app(rows: u64) -> (SocketAddr, AppState) {
    let state = AppState::new(Arc::new(fixture_store(rows)));
    let addr = spawn_with_state(state.clone()).await;
    (addr, state)
}

pub async fn send_raw(
    addr: SocketAddr,
    path: &str,
    headers: &[(&str, &str)],
) -> (u16, String, String) {
    send_raw_with_method(addr, "GET", path, headers, None).await
}

pub async fn send_json(
    addr: SocketAddr,
    method: &str,
    path: &str,
    body: &str,
) -> (u16, String, String) {
    send_raw_with_method(addr, method, path, &[], Some(("application/json", body))).await
}

pub async fn send_form(addr: SocketAddr, path: &str, body: &str) -> (u16, String, String) {
    send_raw_with_method(
        addr,
        "POST",
        path,
        &[],
        Some(("application/x-www-form-urlencoded", body)),
    )
    .await
}

pub async fn send_raw_with_method(
    addr: SocketAddr,
    method: &str,
    path: &str,
    headers: &[(&str, &str)],
    body: Option<(&str, &str)>,
) -> (u16, String, String) {
    let mut stream = tokio::net::TcpStream::connect(addr)
        .await
        .expect("connect server");
    let mut req = format!("{method} {path} HTTP/1.1\r\nHost: {addr}\r\nConnection: close\r\n");
    if let Some((content_type, payload)) = body {
        req.push_str(&format!("Content-Type: {content_type}\r\n"));
        req.push_str(&format!("Content-Length: {}\r\n", payload.len()));
    }
    for (k, v) in headers {
        req.push_str(&format!("{k}: {v}\r\n"));
    }
    req.push_str("\r\n");
    if let Some((_, payload)) = body {
        req.push_str(payload);
    }
    stream
        .write_all(req.as_bytes())
        .await
        .expect("write request");
    let mut response = String::new();
    stream
        .read_to_string(&mut response)
        .await
        .expect("read response");
    let (head, body) = response
        .split_once("\r\n\r\n")
        .expect("http response must have separator");
    let status = head
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .and_then(|s| s.parse::<u16>().ok())
        .expect("http status");
    (status, head.to_string(), body.to_string())
}

pub fn header_value<'a>(head: &'a str, name: &str) -> Option<&'a str> {
    head.lines().skip(1).find_map(|line| {
        let (k, v) = line.split_once(':')?;
        k.trim().eq_ignore_ascii_case(name).then(|| v.trim())
    })
}

pub fn json_body(body: &str) -> serde_json::Value {
    serde_json::from_str(body).expect("json body")
}
