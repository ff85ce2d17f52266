//! Unit tests for cw-core primitives.

#[cfg(test)]
mod ids {
    use crate::{FieldId, PointIndex, SubscriptionId};

    #[test]
    fn index_roundtrip() {
        let id = PointIndex(42);
        assert_eq!(id.index(), 42);
        assert_eq!(PointIndex::try_from(42usize).unwrap(), id);
        assert_eq!(PointIndex::from_index(42), id);
    }

    #[test]
    fn ordering() {
        assert!(PointIndex(0) < PointIndex(1));
        assert!(SubscriptionId(100) > SubscriptionId(99));
    }

    #[test]
    fn invalid_sentinels_are_max() {
        assert_eq!(PointIndex::INVALID.0, u32::MAX);
        assert_eq!(PointIndex::default(), PointIndex::INVALID);
        assert_eq!(PointIndex::from_index(usize::MAX), PointIndex::INVALID);
    }

    #[test]
    fn display() {
        assert_eq!(PointIndex(7).to_string(), "PointIndex(7)");
        assert_eq!(FieldId::from("speed").to_string(), "speed");
    }
}

#[cfg(test)]
mod time {
    use crate::{SimClock, Tick, Timestamp};

    #[test]
    fn tick_arithmetic() {
        let t = Tick(10);
        assert_eq!(t + 5, Tick(15));
        assert_eq!(t.offset(3), Tick(13));
        assert_eq!(Tick(15) - Tick(10), 5u64);
    }

    #[test]
    fn clock_accumulates_dt() {
        let mut clock = SimClock::new();
        assert_eq!(clock.now(), Timestamp::ZERO);
        clock.advance(0.5);
        clock.advance(0.25);
        assert!((clock.now().secs() - 0.75).abs() < 1e-9);
        assert_eq!(clock.ticks(), Tick(2));
    }

    #[test]
    fn clock_ignores_negative_and_nan_steps() {
        let mut clock = SimClock::new();
        clock.advance(1.0);
        clock.advance(-3.0);
        clock.advance(f32::NAN);
        assert!((clock.now().secs() - 1.0).abs() < 1e-9);
        assert_eq!(clock.ticks(), Tick(3), "every call still counts as a tick");
    }

    #[test]
    fn timestamp_since_never_negative() {
        let a = Timestamp(4.0);
        let b = Timestamp(5.5);
        assert!((b.since(a) - 1.5).abs() < 1e-12);
        assert_eq!(a.since(b), 0.0);
    }
}

#[cfg(test)]
mod config {
    use crate::{CwError, FieldId, OverflowControl, SchedulingMode, TraversalConfig};

    #[test]
    fn defaults() {
        let cfg = TraversalConfig::default();
        assert_eq!(cfg.overflow, OverflowControl::Stop);
        assert_eq!(cfg.scheduling, SchedulingMode::PerFrame);
        assert!(cfg.speed_field.is_none());
        assert!(!cfg.checks_delay());
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn builder_methods_chain() {
        let cfg = TraversalConfig::default()
            .with_speed(-2.0)
            .with_delay_field("pause")
            .with_overflow(OverflowControl::PingPong)
            .with_adjust_by_total_length(true);
        assert_eq!(cfg.speed, -2.0);
        assert_eq!(cfg.delay_field, Some(FieldId::from("pause")));
        assert!(cfg.checks_delay());
        assert!(cfg.adjust_by_total_length);
    }

    #[test]
    fn overflow_parses_known_names() {
        assert_eq!("stop".parse::<OverflowControl>().unwrap(), OverflowControl::Stop);
        assert_eq!(" Cycle ".parse::<OverflowControl>().unwrap(), OverflowControl::Cycle);
        assert_eq!("ping-pong".parse::<OverflowControl>().unwrap(), OverflowControl::PingPong);
        assert_eq!(OverflowControl::PingPong.to_string(), "ping_pong");
    }

    #[test]
    fn overflow_rejects_unknown_name() {
        let err = "bounce".parse::<OverflowControl>().unwrap_err();
        assert!(matches!(err, CwError::Config(_)));
    }

    #[test]
    fn scheduling_parses() {
        assert_eq!("fixed".parse::<SchedulingMode>().unwrap(), SchedulingMode::PerFixedStep);
        assert_eq!(SchedulingMode::PerFrame.to_string(), "per_frame");
        assert!("sometimes".parse::<SchedulingMode>().is_err());
    }

    #[test]
    fn validate_rejects_bad_values() {
        let cfg = TraversalConfig::default().with_speed(f32::INFINITY);
        assert_eq!(
            cfg.validate(),
            Err(CwError::InvalidValue { what: "speed", value: f32::INFINITY })
        );
        assert!(TraversalConfig::default().with_delay(-1.0).validate().is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn config_json_uses_snake_case() {
        let json = r#"{ "speed": 3.0, "overflow": "ping_pong", "delay_field": "pause" }"#;
        let cfg: TraversalConfig = serde_json::from_str(json).unwrap();
        assert_eq!(cfg.speed, 3.0);
        assert_eq!(cfg.overflow, OverflowControl::PingPong);
        assert_eq!(cfg.delay_field, Some(FieldId::from("pause")));
        assert_eq!(cfg.scheduling, SchedulingMode::PerFrame, "missing fields use defaults");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn config_json_rejects_unknown_overflow() {
        let json = r#"{ "overflow": "bounce" }"#;
        assert!(serde_json::from_str::<TraversalConfig>(json).is_err());
    }
}
