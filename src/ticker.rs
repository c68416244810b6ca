use std::time::Duration;

/// Event-loop tick in milliseconds; bounds how late a toast expiry or a
/// debounced filter commit can fire
pub const DEFAULT_TICK_MS: u64 = 100;

/// Get tick duration
pub fn tick_duration() -> Duration {
    Duration::from_millis(DEFAULT_TICK_MS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_duration() {
        let duration = tick_duration();
        assert_eq!(duration, Duration::from_millis(100));
    }
}
