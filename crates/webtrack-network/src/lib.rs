//! # webtrack-network
//!
//! 학습 루프에서 나온 스칼라 메트릭을 모아 원격 모니터링 엔드포인트로
//! 전송한다. 시리즈 버퍼, 쌍 평균 다운샘플링, 시간 기반 flush 스케줄러,
//! reqwest 기반 HTTP 전송을 포함한다.
//!
//! ## 사용 예시
//!
//! ```rust,ignore
//! use webtrack_core::config::WebApiConfig;
//! use webtrack_network::writer::MetricWriter;
//!
//! let mut writer = MetricWriter::new(&WebApiConfig::with_url("http://localhost:5000/api"))?;
//! writer.start().await?;
//! writer.write(step, &indicators).await;
//! ```

pub mod downsample;
pub mod flush_scheduler;
pub mod http_client;
pub mod series_buffer;
pub mod writer;
