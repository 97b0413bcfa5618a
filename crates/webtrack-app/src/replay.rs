//! 메트릭 로그 재전송.
//!
//! JSON Lines 형식 `{"step": 3, "indicators": {"loss": {...}}}`를 한 줄씩 읽어
//! 학습 루프처럼 라이터에 기록한다.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::io::BufRead;
use tracing::debug;
use webtrack_core::models::indicator::Indicator;
use webtrack_core::models::run::Hyperparams;
use webtrack_network::writer::MetricWriter;

/// 로그 한 줄
#[derive(Debug, Deserialize)]
struct ReplayLine {
    step: u64,
    #[serde(default)]
    indicators: HashMap<String, Indicator>,
}

/// 재전송 결과 요약
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    /// 처리한 스텝 수
    pub steps: usize,
    /// 마지막 스텝
    pub last_step: Option<u64>,
}

/// `reader`의 모든 줄을 라이터에 기록
///
/// 빈 줄은 건너뛰고, 형식이 잘못된 줄은 줄 번호와 함께 에러를 반환한다.
pub async fn run<R: BufRead>(writer: &mut MetricWriter, reader: R) -> Result<ReplaySummary> {
    let mut summary = ReplaySummary::default();

    for (index, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("{}번째 줄 읽기 실패", index + 1))?;
        if line.trim().is_empty() {
            continue;
        }

        let parsed: ReplayLine = serde_json::from_str(&line)
            .with_context(|| format!("{}번째 줄 파싱 실패", index + 1))?;

        writer.write(parsed.step, &parsed.indicators).await;
        summary.steps += 1;
        summary.last_step = Some(parsed.step);
    }

    debug!("재전송 완료: {} 스텝", summary.steps);
    Ok(summary)
}

/// `key=value` 목록을 하이퍼파라미터로 변환
///
/// 값은 JSON으로 해석되면 그 값, 아니면 문자열로 저장한다.
pub fn parse_params(pairs: &[String]) -> Result<Hyperparams> {
    let mut params = Hyperparams::new();
    for pair in pairs {
        let (key, raw) = pair
            .split_once('=')
            .with_context(|| format!("key=value 형식이 아닙니다: {pair}"))?;
        let value = serde_json::from_str(raw)
            .unwrap_or_else(|_| serde_json::Value::String(raw.to_string()));
        params.insert(key.trim().to_string(), value);
    }
    Ok(params)
}
