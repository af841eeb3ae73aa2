//! # Clock Abstraction Module
//!
//! 현재 시각 제공을 trait 뒤로 추상화하는 모듈입니다.
//! 토큰 만료, 세션 만료, 계정 잠금 해제 등 모든 시간 판정이
//! 주입된 시계를 통해 이루어지므로, 테스트에서 시간을 결정적으로
//! 제어할 수 있습니다.
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use crate::core::clock::{Clock, SystemClock, ManualClock};
//!
//! // 운영 환경
//! let clock: Arc<dyn Clock> = Arc::new(SystemClock);
//!
//! // 테스트 환경
//! let manual = Arc::new(ManualClock::new(Utc::now()));
//! manual.advance(chrono::Duration::minutes(16)); // 토큰 만료 재현
//! ```

use std::sync::Mutex;

use chrono::{DateTime, Duration, Utc};

/// 현재 시각을 제공하는 trait
///
/// 모든 만료/잠금 판정의 유일한 시간 소스입니다.
/// 구현체는 단조성을 보장할 필요는 없으며, 호출 시점의 현재 시각만
/// 반환하면 됩니다.
pub trait Clock: Send + Sync {
    /// 현재 UTC 시각을 반환합니다.
    fn now(&self) -> DateTime<Utc>;
}

/// 운영 환경용 실제 시계
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// 테스트용 수동 제어 시계
///
/// 설정된 시각을 그대로 반환하며, `set`/`advance`로 시간을 임의로
/// 이동시킬 수 있습니다. 내부 뮤텍스가 오염되는 경우는 테스트 스레드
/// 패닉뿐이므로 오염 시 마지막 값을 그대로 사용합니다.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    /// 지정된 시각으로 고정된 시계를 생성합니다.
    pub fn new(now: DateTime<Utc>) -> Self {
        Self { now: Mutex::new(now) }
    }

    /// 시계를 특정 시각으로 설정합니다.
    pub fn set(&self, now: DateTime<Utc>) {
        *self.now.lock().unwrap_or_else(|e| e.into_inner()) = now;
    }

    /// 시계를 지정된 시간만큼 앞으로 이동시킵니다.
    pub fn advance(&self, by: Duration) {
        let mut guard = self.now.lock().unwrap_or_else(|e| e.into_inner());
        *guard += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_is_frozen() {
        let start = Utc::now();
        let clock = ManualClock::new(start);

        assert_eq!(clock.now(), start);
        assert_eq!(clock.now(), start);
    }

    #[test]
    fn test_manual_clock_advance() {
        let start = Utc::now();
        let clock = ManualClock::new(start);

        clock.advance(Duration::minutes(15));

        assert_eq!(clock.now(), start + Duration::minutes(15));
    }

    #[test]
    fn test_manual_clock_set() {
        let start = Utc::now();
        let clock = ManualClock::new(start);
        let later = start + Duration::days(7);

        clock.set(later);

        assert_eq!(clock.now(), later);
    }

    #[test]
    fn test_system_clock_is_current() {
        let before = Utc::now();
        let now = SystemClock.now();
        let after = Utc::now();

        assert!(now >= before && now <= after);
    }
}
