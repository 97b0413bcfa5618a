//! 시리즈 버퍼.
//!
//! 시리즈 키 → (step, value) 샘플 목록. flush마다 비워지지만 키 자체는
//! 프로세스 수명 동안 유지된다. 중복 제거나 step 순서 검증은 하지 않는다.

use std::collections::{BTreeMap, HashMap};
use webtrack_core::models::track::Sample;

/// 시리즈별 샘플 누적 버퍼
#[derive(Debug, Default)]
pub struct SeriesBuffer {
    series: HashMap<String, Vec<Sample>>,
}

impl SeriesBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// 샘플 추가 (시리즈가 없으면 생성)
    pub fn append(&mut self, key: &str, step: u64, value: f64) {
        self.series
            .entry(key.to_string())
            .or_default()
            .push(Sample::new(step, value));
    }

    /// 모든 시리즈의 현재 내용을 반환하고 비운다
    ///
    /// 샘플이 없는 시리즈는 결과에서 빠진다.
    pub fn drain(&mut self) -> BTreeMap<String, Vec<Sample>> {
        self.series
            .iter_mut()
            .filter(|(_, samples)| !samples.is_empty())
            .map(|(key, samples)| (key.clone(), std::mem::take(samples)))
            .collect()
    }

    /// 대기 중인 샘플 총 개수
    pub fn pending_samples(&self) -> usize {
        self.series.values().map(Vec::len).sum()
    }

    /// 지금까지 생성된 시리즈 키 (정렬)
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.series.keys().cloned().collect();
        keys.sort();
        keys
    }

    pub fn is_empty(&self) -> bool {
        self.pending_samples() == 0
    }
}
