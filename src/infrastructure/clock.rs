use chrono::Utc;

use crate::application::ports::Clock;

/// Wall clock backed by the system time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_clock_is_recent() {
        // 2023-11-14, well before any build of this crate
        assert!(SystemClock.now_millis() > 1_700_000_000_000);
    }
}
