//! 웹 API 전송 설정 구조체.
//!
//! 엔드포인트 URL, 전송 주기, TLS 검증 여부 등 라이터 생성 시 한 번 읽는
//! 설정을 정의한다. 바이너리에서는 `config` crate로 파일/환경변수에서 로드.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

use crate::error::CoreError;

/// 시리즈당 전송할 최대 (step, value) 쌍 개수
pub const MAX_BUFFER_SIZE: usize = 1024;

/// 웹 API 설정
///
/// `url`이 없으면 라이터 전체가 no-op으로 동작한다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebApiConfig {
    /// 메트릭을 POST할 엔드포인트 URL
    #[serde(default)]
    pub url: Option<String>,
    /// 전송 주기 (초)
    #[serde(rename = "frequency", default = "default_frequency_secs")]
    pub frequency_secs: u64,
    /// TLS 인증서 검증 여부
    #[serde(default = "default_true")]
    pub verify_connection: bool,
    /// 요청 타임아웃 (밀리초)
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// 시리즈당 최대 전송 포인트 수
    #[serde(default = "default_max_buffer_size")]
    pub max_buffer_size: usize,
}

impl Default for WebApiConfig {
    fn default() -> Self {
        Self {
            url: None,
            frequency_secs: default_frequency_secs(),
            verify_connection: true,
            timeout_ms: default_timeout_ms(),
            max_buffer_size: default_max_buffer_size(),
        }
    }
}

impl WebApiConfig {
    /// 지정된 URL로 활성화된 설정 생성
    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            ..Self::default()
        }
    }

    /// 전송 활성화 여부 (URL 설정 여부)
    pub fn is_enabled(&self) -> bool {
        self.url.is_some()
    }

    /// 전송 주기
    pub fn frequency(&self) -> Duration {
        Duration::from_secs(self.frequency_secs)
    }

    /// 요청 타임아웃
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// 설정값 검증
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.max_buffer_size == 0 {
            return Err(CoreError::Validation {
                field: "max_buffer_size".to_string(),
                message: "1 이상이어야 합니다".to_string(),
            });
        }
        if self.timeout_ms == 0 {
            return Err(CoreError::Validation {
                field: "timeout_ms".to_string(),
                message: "1 이상이어야 합니다".to_string(),
            });
        }
        if let Some(url) = &self.url {
            validate_endpoint_url(url)?;
        }
        Ok(())
    }
}

/// 엔드포인트 URL 파싱 검증: http(s) 스킴과 호스트 필수
fn validate_endpoint_url(raw: &str) -> Result<(), CoreError> {
    let invalid = |message: String| CoreError::Validation {
        field: "url".to_string(),
        message,
    };

    let parsed = Url::parse(raw).map_err(|e| invalid(format!("URL 파싱 실패 ({e}): {raw}")))?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(invalid(format!("http(s) URL이 아닙니다: {raw}")));
    }
    if parsed.host_str().map_or(true, str::is_empty) {
        return Err(invalid(format!("호스트가 없습니다: {raw}")));
    }
    Ok(())
}

fn default_true() -> bool {
    true
}

fn default_frequency_secs() -> u64 {
    60
}

fn default_timeout_ms() -> u64 {
    5_000
}

fn default_max_buffer_size() -> usize {
    MAX_BUFFER_SIZE
}
