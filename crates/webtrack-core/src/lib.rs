//! # webtrack-core
//!
//! webtrack 도메인 모델, 포트(trait) 정의, 에러 타입.
//! 모든 크레이트가 공유하는 핵심 타입과 인터페이스를 제공한다.
//!
//! ## 구조
//!
//! - [`models`]: 런 정보, 인디케이터, 전송 페이로드 (serde Serialize/Deserialize)
//! - [`ports`]: Hexagonal Architecture 포트 인터페이스 (async_trait)
//! - [`error`]: 핵심 에러 타입 (thiserror)
//! - [`config`]: 웹 API 전송 설정 구조체

pub mod config;
pub mod error;
pub mod models;
pub mod ports;
