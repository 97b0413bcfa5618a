//! 메트릭 API 클라이언트 포트.
//!
//! 구현: `webtrack-network` crate (reqwest)

use async_trait::async_trait;

use crate::error::CoreError;
use crate::models::track::{Handshake, TrackBatch};

/// 원격 모니터링 엔드포인트 클라이언트
///
/// 두 메서드 모두 단일 POST 한 번으로 끝나며 재시도하지 않는다.
#[async_trait]
pub trait MetricsApi: Send + Sync {
    /// 런 식별 정보와 하이퍼파라미터 전송
    async fn send_handshake(&self, handshake: &Handshake) -> Result<(), CoreError>;

    /// 다운샘플링된 메트릭 배치 전송
    async fn send_track(&self, batch: &TrackBatch) -> Result<(), CoreError>;
}
