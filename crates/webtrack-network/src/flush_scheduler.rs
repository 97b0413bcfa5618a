//! flush 스케줄러.
//!
//! 백그라운드 타이머 없이 수집 호출마다 경과 시간을 확인한다.
//! `write`가 호출되지 않으면 시간이 얼마나 지나도 flush하지 않는다.

use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct FlushScheduler {
    last_committed: Instant,
    frequency: Duration,
}

impl FlushScheduler {
    pub fn new(now: Instant, frequency: Duration) -> Self {
        Self {
            last_committed: now,
            frequency,
        }
    }

    /// 기준 시각 재설정
    pub fn reset(&mut self, now: Instant) {
        self.last_committed = now;
    }

    /// 마지막 flush 이후 경과 시간
    pub fn elapsed(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.last_committed)
    }

    /// 경과 시간이 주기를 초과했는지
    pub fn is_due(&self, now: Instant) -> bool {
        self.elapsed(now) > self.frequency
    }

    /// flush가 필요하면 기준 시각을 `now`로 옮기고 `true` 반환
    pub fn poll(&mut self, now: Instant) -> bool {
        if !self.is_due(now) {
            return false;
        }
        self.last_committed = now;
        true
    }

    pub fn frequency(&self) -> Duration {
        self.frequency
    }
}
