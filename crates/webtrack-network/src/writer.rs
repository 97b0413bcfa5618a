//! 메트릭 라이터.
//!
//! 학습 루프가 스텝마다 호출하는 진입점. 출력 대상 숫자형 인디케이터의
//! 평균을 시리즈 버퍼에 쌓고, 주기가 지나면 시리즈별로 다운샘플링해 전송한다.
//!
//! 모든 작업은 호출자의 태스크에서 인라인으로 수행되며 POST 왕복 동안
//! 호출자가 대기한다. `&mut self`로 `write`/`flush`가 직렬화된다.
//! 전송 실패는 경고 한 번으로 기록되고 배치는 버려진다 (재시도 없음).

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tracing::{debug, info, warn};
use webtrack_core::config::WebApiConfig;
use webtrack_core::error::CoreError;
use webtrack_core::models::indicator::Indicator;
use webtrack_core::models::run::{Hyperparams, RunInfo};
use webtrack_core::models::track::{Handshake, TrackBatch};
use webtrack_core::ports::api_client::MetricsApi;
use webtrack_core::ports::clock::{Clock, SystemClock};

use crate::downsample::downsample;
use crate::flush_scheduler::FlushScheduler;
use crate::http_client::HttpMetricsApi;
use crate::series_buffer::SeriesBuffer;

/// 라이터 상태
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriterState {
    /// URL 미설정: 모든 작업이 no-op
    Disabled,
    /// URL 설정됨, 핸드셰이크 전
    Armed,
    /// 핸드셰이크 전송됨
    Started,
}

/// 라이터 통계
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriterStats {
    /// 버퍼에 대기 중인 샘플 수
    pub pending_samples: usize,
    /// 지금까지 생성된 시리즈 수
    pub series_count: usize,
    /// 전송 성공한 트랙 배치 수
    pub batches_sent: u64,
    /// 전송 실패로 버려진 트랙 배치 수
    pub batches_dropped: u64,
}

/// 웹 API 메트릭 라이터
pub struct MetricWriter {
    /// `None`이면 비활성 상태
    api: Option<Arc<dyn MetricsApi>>,
    clock: Arc<dyn Clock>,
    buffer: SeriesBuffer,
    scheduler: FlushScheduler,
    max_buffer_size: usize,
    run: Option<RunInfo>,
    hyperparams: Option<Hyperparams>,
    started: bool,
    batches_sent: u64,
    batches_dropped: u64,
}

impl MetricWriter {
    /// 설정으로 라이터 생성 (HTTP 전송, 시스템 시계)
    pub fn new(config: &WebApiConfig) -> Result<Self, CoreError> {
        config.validate()?;
        let api = HttpMetricsApi::from_config(config)?
            .map(|api| Arc::new(api) as Arc<dyn MetricsApi>);
        Ok(Self::with_api(config, api, Arc::new(SystemClock)))
    }

    /// 전송 어댑터와 시계를 직접 주입
    ///
    /// 설정에 URL이 없으면 `api`가 있어도 비활성 상태가 된다.
    pub fn with_api(
        config: &WebApiConfig,
        api: Option<Arc<dyn MetricsApi>>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let api = api.filter(|_| config.is_enabled());
        let scheduler = FlushScheduler::new(clock.now(), config.frequency());

        Self {
            api,
            clock,
            buffer: SeriesBuffer::new(),
            scheduler,
            max_buffer_size: config.max_buffer_size.max(1),
            run: None,
            hyperparams: None,
            started: false,
            batches_sent: 0,
            batches_dropped: 0,
        }
    }

    pub fn state(&self) -> WriterState {
        match (&self.api, self.started) {
            (None, _) => WriterState::Disabled,
            (Some(_), false) => WriterState::Armed,
            (Some(_), true) => WriterState::Started,
        }
    }

    /// 런 식별 정보 설정
    pub fn set_info(&mut self, run: RunInfo) {
        self.run = Some(run);
    }

    /// 하이퍼파라미터 설정
    pub fn set_hyperparams(&mut self, hyperparams: Hyperparams) {
        self.hyperparams = Some(hyperparams);
    }

    /// 핸드셰이크 전송 및 flush 시계 재설정
    ///
    /// 다시 호출하면 핸드셰이크를 다시 보낸다.
    pub async fn start(&mut self) -> Result<(), CoreError> {
        let Some(api) = self.api.clone() else {
            return Ok(());
        };

        let handshake = Handshake::new(self.run.as_ref(), self.hyperparams.as_ref());
        self.scheduler.reset(self.clock.now());
        self.started = true;
        info!(
            "WEB API 세션 시작: run_uuid={:?}, params={}, flush 주기={:?}",
            handshake.run_uuid,
            handshake.params.len(),
            self.scheduler.frequency()
        );

        let result = api.send_handshake(&handshake).await;
        if let Err(e) = &result {
            warn!("WEB API 핸드셰이크 전송 실패: {e}");
        }
        result
    }

    /// 스텝 하나의 인디케이터 기록
    ///
    /// 출력 대상이고 비어 있지 않은 숫자형 인디케이터만 버퍼에 추가한다.
    /// 평균이 NaN/Inf인 값은 버린다.
    /// 주기가 지났으면 그 자리에서 flush하며, 실패는 경고로만 남는다.
    pub async fn write(&mut self, step: u64, indicators: &HashMap<String, Indicator>) {
        if self.api.is_none() {
            return;
        }

        for indicator in indicators.values() {
            if !indicator.is_print() {
                continue;
            }
            let Some(view) = indicator.numeric() else {
                continue;
            };
            // JSON에는 NaN/Inf 표현이 없어 null로 바뀌므로 버퍼에 넣지 않는다
            if !view.mean.is_finite() {
                debug!("유한하지 않은 값 제외: {} step={step} ({})", view.mean_key, view.mean);
                continue;
            }
            self.buffer.append(&view.mean_key, step, view.mean);
        }

        if self.scheduler.poll(self.clock.now()) {
            // 실패는 flush 안에서 이미 경고로 기록됨
            let _ = self.flush().await;
        }
    }

    /// 버퍼를 비우고 시리즈별로 다운샘플링해 전송
    ///
    /// 전송 실패 시에도 버퍼는 비워진다. 성공 시 전송한 포인트 수 반환.
    pub async fn flush(&mut self) -> Result<usize, CoreError> {
        let Some(api) = self.api.clone() else {
            return Ok(0);
        };

        let drained = self.buffer.drain();
        let mut track = BTreeMap::new();
        for (key, samples) in drained {
            let out = downsample(&samples, self.max_buffer_size);
            if out.passes > 0 {
                debug!(
                    "시리즈 다운샘플링: {key} {} → {} ({}회)",
                    samples.len(),
                    out.series.len(),
                    out.passes
                );
            }
            track.insert(key, out.series);
        }

        let batch = TrackBatch {
            run_uuid: self.run.as_ref().map(|r| r.run_uuid.clone()),
            track,
        };
        let points = batch.point_count();

        match api.send_track(&batch).await {
            Ok(()) => {
                self.batches_sent += 1;
                debug!("트랙 배치 전송 성공: {} 시리즈, {points} 포인트", batch.track.len());
                Ok(points)
            }
            Err(e) => {
                self.batches_dropped += 1;
                warn!(
                    "트랙 배치 전송 실패, {} 시리즈 {points} 포인트 폐기: {e}",
                    batch.track.len()
                );
                Err(e)
            }
        }
    }

    /// 대기 중인 샘플 수
    pub fn pending_samples(&self) -> usize {
        self.buffer.pending_samples()
    }

    /// 지금까지 생성된 시리즈 키
    pub fn series_keys(&self) -> Vec<String> {
        self.buffer.keys()
    }

    pub fn stats(&self) -> WriterStats {
        WriterStats {
            pending_samples: self.buffer.pending_samples(),
            series_count: self.buffer.keys().len(),
            batches_sent: self.batches_sent,
            batches_dropped: self.batches_dropped,
        }
    }
}
