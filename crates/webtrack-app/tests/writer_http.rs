//! 라이터 ↔ HTTP 엔드포인트 통합 테스트.
//!
//! 실제 reqwest 전송을 mockito 서버에 붙여 핸드셰이크, flush, 실패 처리를 검증한다.

use assert_matches::assert_matches;
use mockito::Matcher;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use webtrack_core::config::WebApiConfig;
use webtrack_core::error::CoreError;
use webtrack_core::models::indicator::Indicator;
use webtrack_core::models::run::{Hyperparams, RunInfo};
use webtrack_network::writer::{MetricWriter, WriterState};

const TRACK_PATH: &str = "/api/v1/track";

fn config_for(server: &mockito::ServerGuard) -> WebApiConfig {
    WebApiConfig {
        timeout_ms: 2_000,
        ..WebApiConfig::with_url(format!("{}{TRACK_PATH}", server.url()))
    }
}

fn step_indicators(loss: f64, acc: f64) -> HashMap<String, Indicator> {
    HashMap::from([
        ("loss".to_string(), Indicator::scalar("loss", [loss])),
        ("acc".to_string(), Indicator::scalar("acc", [acc])),
    ])
}

#[tokio::test]
async fn handshake_then_flush() {
    let mut server = mockito::Server::new_async().await;

    let handshake_mock = server
        .mock("POST", TRACK_PATH)
        .match_header("content-type", "application/json; charset=utf-8")
        .match_body(Matcher::JsonString(
            r#"{"run_uuid":"abc","name":"run1","comment":"test","params":{"lr":0.01}}"#
                .to_string(),
        ))
        .with_status(200)
        .with_body(r#"{"success":true}"#)
        .expect(1)
        .create_async()
        .await;

    let track_mock = server
        .mock("POST", TRACK_PATH)
        .match_body(Matcher::JsonString(
            r#"{"run_uuid":"abc","track":{
                "acc":{"step":[0.0,1.0],"value":[0.1,0.2]},
                "loss":{"step":[0.0,1.0],"value":[2.0,1.5]}
            }}"#
            .to_string(),
        ))
        .with_status(200)
        .with_body(r#"{"success":true}"#)
        .expect(1)
        .create_async()
        .await;

    let mut writer = MetricWriter::new(&config_for(&server)).unwrap();
    writer.set_info(RunInfo::new("abc", "run1", "test"));
    writer.set_hyperparams(Hyperparams::from([(
        "lr".to_string(),
        serde_json::json!(0.01),
    )]));

    writer.start().await.unwrap();
    assert_eq!(writer.state(), WriterState::Started);

    writer.write(0, &step_indicators(2.0, 0.1)).await;
    writer.write(1, &step_indicators(1.5, 0.2)).await;
    assert_eq!(writer.flush().await.unwrap(), 4);

    handshake_mock.assert_async().await;
    track_mock.assert_async().await;
}

#[tokio::test]
async fn server_error_drops_batch_without_retry() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", TRACK_PATH)
        .with_status(500)
        .with_body("Internal Server Error")
        .expect(1)
        .create_async()
        .await;

    let mut writer = MetricWriter::new(&config_for(&server)).unwrap();
    writer.write(0, &step_indicators(2.0, 0.1)).await;

    let result = writer.flush().await;
    assert_matches!(result, Err(CoreError::Http { status: 500, .. }));
    assert_eq!(writer.pending_samples(), 0);

    let stats = writer.stats();
    assert_eq!(stats.batches_dropped, 1);
    assert_eq!(stats.batches_sent, 0);
    mock.assert_async().await;
}

#[tokio::test]
async fn remote_rejection_is_reported() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", TRACK_PATH)
        .with_status(200)
        .with_body(r#"{"success":false,"error":"invalid_run","message":"run not registered"}"#)
        .create_async()
        .await;

    let mut writer = MetricWriter::new(&config_for(&server)).unwrap();
    writer.write(0, &step_indicators(2.0, 0.1)).await;

    let err = writer.flush().await.unwrap_err();
    assert_eq!(err.to_string(), "WEB API error invalid_run : run not registered");
    assert!(!err.is_transport());
    mock.assert_async().await;
}

#[tokio::test]
async fn disabled_writer_sends_nothing() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let config = WebApiConfig {
        url: None,
        frequency_secs: 0,
        ..config_for(&server)
    };
    let mut writer = MetricWriter::new(&config).unwrap();
    writer.set_info(RunInfo::new("abc", "run1", "test"));
    writer.start().await.unwrap();
    for step in 0..50 {
        writer.write(step, &step_indicators(1.0, 0.5)).await;
    }
    writer.flush().await.unwrap();

    assert_eq!(writer.state(), WriterState::Disabled);
    mock.assert_async().await;
}

#[tokio::test]
async fn unreachable_endpoint_never_panics() {
    let config = WebApiConfig {
        timeout_ms: 500,
        frequency_secs: 0,
        ..WebApiConfig::with_url("http://127.0.0.1:1/api")
    };
    let mut writer = MetricWriter::new(&config).unwrap();

    assert!(writer.start().await.is_err());
    writer.write(0, &step_indicators(1.0, 0.5)).await;
    assert!(writer.flush().await.is_err());
    assert_eq!(writer.pending_samples(), 0);
}

#[tokio::test]
async fn stalled_endpoint_fails_within_timeout() {
    // 연결만 받고 응답하지 않는 엔드포인트
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });

    let config = WebApiConfig {
        timeout_ms: 300,
        ..WebApiConfig::with_url(format!("http://{addr}{TRACK_PATH}"))
    };
    let mut writer = MetricWriter::new(&config).unwrap();
    writer.write(0, &step_indicators(1.0, 0.5)).await;
    assert_eq!(writer.pending_samples(), 2);

    let started = Instant::now();
    let result = writer.flush().await;
    assert!(started.elapsed() < Duration::from_secs(1));
    assert_matches!(result, Err(CoreError::Network(_)));
    assert_eq!(writer.pending_samples(), 0);
    assert_eq!(writer.stats().batches_dropped, 1);

    server.abort();
}
