//! 쌍 평균 다운샘플러.
//!
//! 시리즈 길이가 최대값을 넘는 동안 인접한 두 포인트를 평균 내어 절반으로
//! 줄인다. 홀수 길이면 마지막 포인트를 복제해 짝을 맞춘다.
//! step과 value 모두 f64로 평균하므로 결과 step은 소수가 될 수 있다.

use webtrack_core::models::track::{Sample, SeriesPayload};

/// 다운샘플링 결과
#[derive(Debug, Clone, PartialEq)]
pub struct Downsampled {
    pub series: SeriesPayload,
    /// 수행한 절반 줄이기 횟수
    pub passes: u32,
}

/// `samples`를 `max_len` 이하가 될 때까지 절반씩 줄인다.
///
/// 길이가 `max_len` 이하면 그대로 반환한다. `max_len`이 0이면 1로 취급.
pub fn downsample(samples: &[Sample], max_len: usize) -> Downsampled {
    let max_len = max_len.max(1);
    let mut step: Vec<f64> = samples.iter().map(|s| s.step as f64).collect();
    let mut value: Vec<f64> = samples.iter().map(|s| s.value).collect();
    let mut passes = 0;

    while value.len() > max_len {
        if value.len() % 2 == 1 {
            pad_last(&mut step);
            pad_last(&mut value);
        }
        step = halve(&step);
        value = halve(&value);
        passes += 1;
    }

    Downsampled {
        series: SeriesPayload { step, value },
        passes,
    }
}

/// 마지막 원소 복제
fn pad_last(xs: &mut Vec<f64>) {
    if let Some(&last) = xs.last() {
        xs.push(last);
    }
}

/// 짝수 길이 슬라이스를 인접 쌍 평균으로 절반 축소
fn halve(xs: &[f64]) -> Vec<f64> {
    xs.chunks_exact(2).map(|p| (p[0] + p[1]) / 2.0).collect()
}
