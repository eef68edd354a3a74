mod tests {
    use embassy_time::{Duration, Instant};
    use lcc_light_fader::{MIN_TRANSMIT_INTERVAL, RateLimiter, may_transmit};

    #[test]
    fn test_may_transmit() {
        let floor = Duration::from_millis(10);
        assert!(may_transmit(Instant::from_millis(0), None, floor));
        assert!(!may_transmit(
            Instant::from_millis(109),
            Some(Instant::from_millis(100)),
            floor
        ));
        assert!(may_transmit(
            Instant::from_millis(110),
            Some(Instant::from_millis(100)),
            floor
        ));
        // clock behind the last round
        assert!(!may_transmit(
            Instant::from_millis(90),
            Some(Instant::from_millis(100)),
            floor
        ));
    }

    #[test]
    fn test_rate_limiter() {
        let mut limiter = RateLimiter::new(MIN_TRANSMIT_INTERVAL);
        assert_eq!(limiter.min_interval(), Duration::from_millis(10));
        assert!(limiter.permits(Instant::from_millis(3)));

        limiter.record(Instant::from_millis(3));
        assert_eq!(limiter.last_round(), Some(Instant::from_millis(3)));
        assert!(!limiter.permits(Instant::from_millis(12)));
        assert!(limiter.permits(Instant::from_millis(13)));
    }
}
