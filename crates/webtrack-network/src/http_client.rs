//! HTTP 메트릭 API 클라이언트.
//!
//! `MetricsApi` 포트 구현. 페이로드를 JSON으로 직렬화해 설정된 URL로
//! POST 한 번을 보내고, 응답 본문을 `{success, error, message}` envelope으로
//! 해석한다. 재시도는 없다.

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use serde::Serialize;
use std::time::Duration;
use tracing::debug;
use webtrack_core::config::WebApiConfig;
use webtrack_core::error::CoreError;
use webtrack_core::models::track::{ApiResponse, Handshake, TrackBatch};
use webtrack_core::ports::api_client::MetricsApi;

const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// reqwest 기반 `MetricsApi` 구현
pub struct HttpMetricsApi {
    client: reqwest::Client,
    url: String,
}

impl HttpMetricsApi {
    /// 새 HTTP 클라이언트 생성
    ///
    /// 연결은 재사용하지 않는다 (호스트당 유휴 연결 0).
    pub fn new(url: &str, timeout: Duration, verify_connection: bool) -> Result<Self, CoreError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .pool_max_idle_per_host(0)
            .danger_accept_invalid_certs(!verify_connection)
            .build()
            .map_err(|e| CoreError::Network(format!("HTTP 클라이언트 빌드 실패: {e}")))?;

        Ok(Self {
            client,
            url: url.to_string(),
        })
    }

    /// 설정에서 생성. URL이 없으면 `None`.
    pub fn from_config(config: &WebApiConfig) -> Result<Option<Self>, CoreError> {
        match &config.url {
            Some(url) => Self::new(url, config.timeout(), config.verify_connection).map(Some),
            None => Ok(None),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// JSON 본문 POST 후 envelope 확인
    ///
    /// 본문을 바이트로 넘기므로 Content-Length는 reqwest가 정확히 채운다.
    async fn post_json<T: Serialize + ?Sized>(&self, payload: &T) -> Result<(), CoreError> {
        let body = serde_json::to_vec(payload)?;
        debug!("WEB API POST: {} bytes → {}", body.len(), self.url);

        let resp = self
            .client
            .post(&self.url)
            .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
            .body(body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    CoreError::Network(format!("요청 타임아웃: {e}"))
                } else {
                    CoreError::Network(e.to_string())
                }
            })?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_else(|e| {
                debug!("응답 본문 읽기 실패: {e}");
                String::new()
            });
            return Err(CoreError::Http {
                status: status.as_u16(),
                body: text,
            });
        }

        let text = resp
            .text()
            .await
            .map_err(|e| CoreError::Network(format!("응답 본문 읽기 실패: {e}")))?;

        let envelope: ApiResponse = serde_json::from_str(&text)
            .map_err(|e| CoreError::InvalidResponse(format!("{e}: {text}")))?;

        envelope.into_result()
    }
}

#[async_trait]
impl MetricsApi for HttpMetricsApi {
    async fn send_handshake(&self, handshake: &Handshake) -> Result<(), CoreError> {
        debug!("핸드셰이크 전송: run_uuid={:?}", handshake.run_uuid);
        self.post_json(handshake).await
    }

    async fn send_track(&self, batch: &TrackBatch) -> Result<(), CoreError> {
        debug!(
            "트랙 전송: {} 시리즈, {} 포인트",
            batch.track.len(),
            batch.point_count()
        );
        self.post_json(batch).await
    }
}
