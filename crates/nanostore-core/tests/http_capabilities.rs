//! HTTP capability implementations against a local stand-in server.

mod common;

use std::time::Duration;

use common::overlay_server::{self, ServerOptions};
use nanostore_core::capability::{
    ContentResolver, HttpContentResolver, HttpPresenceProbe, HttpStoragePublisher, PresenceCheck,
    StoragePublisher, PRESENCE_ABSENT, PRESENCE_FOUND,
};
use nanostore_core::checksum::sha256_bytes;
use nanostore_core::http::{self, TransportOptions};
use nanostore_core::publish::{PublishRequest, SelectedFile};
use nanostore_core::registry::ResolverEndpoint;
use nanostore_core::retrieve::ContentRef;
use nanostore_core::retry::TransportError;

#[test]
fn resolve_skips_failing_host_and_returns_content() {
    let body: Vec<u8> = (0u8..17).collect();
    let (base, log) = overlay_server::start(ServerOptions {
        body: body.clone(),
        content_type: "image/png",
        advertise: true,
    });

    let resolver = HttpContentResolver::new(TransportOptions::default());
    let payload = resolver
        .resolve(
            &ContentRef::parse("uhrp://abc123").unwrap(),
            &ResolverEndpoint::parse(&base).unwrap(),
        )
        .expect("resolve");

    assert_eq!(payload.media_type, "image/png");
    assert_eq!(payload.data, body);

    let log = log.lock().unwrap();
    let (method, path, lookup_body) = &log[0];
    assert_eq!((method.as_str(), path.as_str()), ("POST", "/lookup"));
    let json: serde_json::Value = serde_json::from_slice(lookup_body).unwrap();
    assert_eq!(json["provider"], "UHRP");
    assert_eq!(json["query"]["UHRPUrl"], "uhrp://abc123");
    let paths: Vec<&str> = log.iter().map(|(_, p, _)| p.as_str()).collect();
    assert_eq!(paths, ["/lookup", "/missing", "/content"]);
}

#[test]
fn resolve_fails_when_nothing_advertised() {
    let (base, _log) = overlay_server::start(ServerOptions {
        advertise: false,
        ..ServerOptions::default()
    });
    let resolver = HttpContentResolver::new(TransportOptions::default());
    let err = resolver
        .resolve(
            &ContentRef::parse("uhrp://nothing").unwrap(),
            &ResolverEndpoint::parse(&base).unwrap(),
        )
        .unwrap_err();
    assert!(format!("{:#}", err).contains("no host advertises"));
}

#[test]
fn publish_requests_ticket_then_puts_bytes() {
    let (base, log) = overlay_server::start(ServerOptions::default());
    let publisher = HttpStoragePublisher::new(TransportOptions::default());
    let request = PublishRequest::new(
        SelectedFile {
            name: "note.txt".to_string(),
            media_type: "text/plain".to_string(),
            data: b"hello nanostore".to_vec(),
        },
        45,
    )
    .unwrap();

    let receipt = publisher
        .publish(&request, &ResolverEndpoint::parse(&base).unwrap())
        .expect("publish");

    assert_eq!(receipt.public_url, format!("{}/cdn/1", base));
    assert_eq!(receipt.locator(), "uhrp://uploaded");
    assert_eq!(receipt.size, 15);
    assert_eq!(receipt.sha256, sha256_bytes(b"hello nanostore"));

    let log = log.lock().unwrap();
    assert_eq!(log.len(), 2);
    let ticket: serde_json::Value = serde_json::from_slice(&log[0].2).unwrap();
    assert_eq!(ticket, serde_json::json!({"fileSize": 15, "retentionPeriod": 45}));
    assert_eq!((log[1].0.as_str(), log[1].1.as_str()), ("PUT", "/put"));
    assert_eq!(log[1].2, b"hello nanostore");
}

#[test]
fn put_does_not_follow_redirects() {
    let (base, log) = overlay_server::start(ServerOptions::default());
    let err = http::put(
        &format!("{}/moved", base),
        b"payload",
        "text/plain",
        &TransportOptions::default(),
    )
    .unwrap_err();

    assert!(matches!(err, TransportError::Http(307)), "got {}", err);
    let log = log.lock().unwrap();
    assert_eq!(log.len(), 1);
    assert_eq!((log[0].0.as_str(), log[0].1.as_str()), ("PUT", "/moved"));
}

#[test]
fn presence_probe_found_and_absent() {
    let (base, _log) = overlay_server::start(ServerOptions::default());
    let timeout = Duration::from_secs(2);

    let up = HttpPresenceProbe::new(format!("{}/status", base), timeout);
    assert_eq!(up.check_presence().unwrap(), PRESENCE_FOUND);

    let wrong_path = HttpPresenceProbe::new(format!("{}/nope", base), timeout);
    assert_eq!(wrong_path.check_presence().unwrap(), PRESENCE_ABSENT);

    let down = HttpPresenceProbe::new(overlay_server::dead_url(), timeout);
    assert_eq!(down.check_presence().unwrap(), PRESENCE_ABSENT);
}
