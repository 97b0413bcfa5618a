//! 런(실험 실행) 식별 정보와 하이퍼파라미터.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 하이퍼파라미터 (이름 → 스칼라/문자열 값)
pub type Hyperparams = BTreeMap<String, serde_json::Value>;

/// 런 식별 정보. 세션 시작 시 한 번 설정된다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunInfo {
    /// 런 고유 ID
    pub run_uuid: String,
    /// 사람이 읽는 이름
    pub name: String,
    /// 자유 형식 코멘트
    pub comment: String,
}

impl RunInfo {
    pub fn new(
        run_uuid: impl Into<String>,
        name: impl Into<String>,
        comment: impl Into<String>,
    ) -> Self {
        Self {
            run_uuid: run_uuid.into(),
            name: name.into(),
            comment: comment.into(),
        }
    }
}
