use std::time::Duration;

use foxdeli::error::{ConnectionErrorKind, FoxdeliError};
use foxdeli::transport::http::translate_transport_error;
use foxdeli::transport::{ReqwestTransport, RequestTransport};
use reqwest::{Method, Request};
use tokio::net::TcpListener;

async fn send_and_translate(url: &str) -> FoxdeliError {
    let transport = ReqwestTransport::with_timeout(Duration::from_secs(10)).unwrap();
    let request = Request::new(Method::GET, url.parse().unwrap());
    let err = transport.send(request).await.unwrap_err();
    translate_transport_error(err)
}

#[tokio::test]
async fn unresolvable_host_is_host_unreachable() {
    let err = send_and_translate("http://nonexistent.invalid/v1/order").await;

    match err {
        FoxdeliError::Connection { kind, message, .. } => {
            assert_eq!(kind, ConnectionErrorKind::HostUnreachable);
            assert_eq!(message, ConnectionErrorKind::HostUnreachable.hint());
        }
        other => panic!("expected Connection, got {other:?}"),
    }
}

#[tokio::test]
async fn dropped_connection_is_connection_shutdown() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        while let Ok((socket, _)) = listener.accept().await {
            drop(socket);
        }
    });

    let err = send_and_translate(&format!("http://{addr}/v1/order")).await;

    assert!(
        matches!(
            err,
            FoxdeliError::Connection {
                kind: ConnectionErrorKind::ConnectionShutdown,
                ..
            }
        ),
        "{err:?}"
    );
}
