//! webtrack 도메인 모델.
//!
//! 학습 루프와 원격 엔드포인트 사이에서 오가는 데이터 구조체를 정의한다.

pub mod indicator;
pub mod run;
pub mod track;
