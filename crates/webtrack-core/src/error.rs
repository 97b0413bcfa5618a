//! webtrack 핵심 에러 타입.
//!
//! 전송 실패는 절대 학습 루프를 중단시키지 않는다. 어댑터는 이 타입으로
//! 실패를 돌려주고, 라이터가 경고 한 번으로 기록한 뒤 배치를 버린다.

use thiserror::Error;

/// 코어 레이어 에러.
#[derive(Debug, Error)]
pub enum CoreError {
    /// JSON 직렬화/역직렬화 실패
    #[error("직렬화 에러: {0}")]
    Serialization(#[from] serde_json::Error),

    /// 필드 유효성 검증 실패
    #[error("유효성 검증 실패 ({field}): {message}")]
    Validation {
        /// 검증 실패한 필드명
        field: String,
        /// 실패 사유
        message: String,
    },

    /// 네트워크 에러 (연결 실패, TLS 실패, 타임아웃)
    #[error("WEB API 연결 실패: {0}")]
    Network(String),

    /// 2xx가 아닌 HTTP 응답
    #[error("WEB API 전송 실패 ({status}): {body}")]
    Http {
        /// HTTP 상태 코드
        status: u16,
        /// 응답 본문 (읽을 수 없으면 빈 문자열)
        body: String,
    },

    /// 응답 본문이 `{success, error, message}` 형식이 아님
    #[error("WEB API 응답 파싱 실패: {0}")]
    InvalidResponse(String),

    /// 서버가 `success=false`로 응답
    #[error("WEB API error {error} : {message}")]
    Remote {
        /// 서버 에러 코드
        error: String,
        /// 서버 에러 메시지
        message: String,
    },
}

impl CoreError {
    /// 전송 계층 실패 여부 (원격 서버가 명시적으로 거부한 경우 제외)
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            CoreError::Network(_) | CoreError::Http { .. } | CoreError::InvalidResponse(_)
        )
    }
}
