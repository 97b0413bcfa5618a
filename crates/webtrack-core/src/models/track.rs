//! 전송 페이로드 모델.
//!
//! 핸드셰이크, 트랙(메트릭) 배치, 서버 응답 envelope.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::CoreError;
use crate::models::run::{Hyperparams, RunInfo};

/// 시리즈의 (step, value) 샘플 하나
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub step: u64,
    pub value: f64,
}

impl Sample {
    pub fn new(step: u64, value: f64) -> Self {
        Self { step, value }
    }
}

/// 다운샘플링된 시리즈: 평균 과정에서 step이 소수가 될 수 있어 f64로 전송
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeriesPayload {
    pub step: Vec<f64>,
    pub value: Vec<f64>,
}

impl SeriesPayload {
    pub fn len(&self) -> usize {
        self.value.len()
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }
}

/// 세션 시작 시 전송하는 핸드셰이크
///
/// `set_info` 없이 시작하면 식별 필드는 `null`로 나간다.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Handshake {
    pub run_uuid: Option<String>,
    pub name: Option<String>,
    pub comment: Option<String>,
    pub params: Hyperparams,
}

impl Handshake {
    pub fn new(run: Option<&RunInfo>, params: Option<&Hyperparams>) -> Self {
        Self {
            run_uuid: run.map(|r| r.run_uuid.clone()),
            name: run.map(|r| r.name.clone()),
            comment: run.map(|r| r.comment.clone()),
            params: params.cloned().unwrap_or_default(),
        }
    }
}

/// 주기적 flush 시 전송하는 트랙 배치
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackBatch {
    pub run_uuid: Option<String>,
    pub track: BTreeMap<String, SeriesPayload>,
}

impl TrackBatch {
    /// 배치에 포함된 총 포인트 수
    pub fn point_count(&self) -> usize {
        self.track.values().map(SeriesPayload::len).sum()
    }
}

/// 서버 응답 envelope `{success, error?, message?}`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ApiResponse {
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ApiResponse {
    /// `success=false`이면 `CoreError::Remote`로 변환
    pub fn into_result(self) -> Result<(), CoreError> {
        if self.success {
            return Ok(());
        }
        Err(CoreError::Remote {
            error: self.error.unwrap_or_else(|| "None".to_string()),
            message: self.message.unwrap_or_else(|| "None".to_string()),
        })
    }
}
