//! Unit tests for psim-core primitives.

#[cfg(test)]
mod ids {
    use crate::{ActivityId, AgentId};

    #[test]
    fn index_roundtrip() {
        let id = AgentId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(AgentId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn activity_id_rejects_overflow() {
        assert!(ActivityId::try_from(70_000usize).is_err());
    }

    #[test]
    fn display() {
        assert_eq!(AgentId(7).to_string(), "AgentId(7)");
    }
}

#[cfg(test)]
mod time {
    use crate::{SimClock, SimConfig, TICKS_PER_DAY, Tick};

    #[test]
    fn slot_wraps_daily() {
        assert_eq!(Tick(0).slot(), 0);
        assert_eq!(Tick(95).slot(), 95);
        assert_eq!(Tick(96).slot(), 0);
        assert_eq!(Tick(100).slot(), 4);
    }

    #[test]
    fn labels_are_quarter_hours() {
        let clock = SimClock::new(900);
        assert_eq!(clock.label(Tick(0)), "00:00");
        assert_eq!(clock.label(Tick(1)), "00:15");
        assert_eq!(clock.label(Tick(33)), "08:15");
        assert_eq!(clock.label(Tick(95)), "23:45");
        assert_eq!(clock.label(Tick(96)), "00:00");
    }

    #[test]
    fn default_config_is_one_day() {
        let cfg = SimConfig::default();
        assert_eq!(cfg.total_ticks, TICKS_PER_DAY);
        assert_eq!(cfg.end_tick(), Tick(96));
    }

    #[test]
    fn clock_advances() {
        let mut clock = SimConfig::default().make_clock();
        clock.advance();
        clock.advance();
        assert_eq!(clock.current_tick, Tick(2));
        assert_eq!(clock.to_string(), "T2 (00:30)");
    }
}

#[cfg(test)]
mod rng {
    use rand_distr::{LogNormal, Normal, StandardNormal};

    use crate::{AgentId, AgentRng, SimRng};

    #[test]
    fn agent_rng_is_deterministic() {
        let mut a = AgentRng::new(7, AgentId(3));
        let mut b = AgentRng::new(7, AgentId(3));
        for _ in 0..10 {
            assert_eq!(a.sample(&StandardNormal), b.sample(&StandardNormal));
        }
    }

    #[test]
    fn different_agents_get_different_streams() {
        let mut a = AgentRng::new(7, AgentId(0));
        let mut b = AgentRng::new(7, AgentId(1));
        let xs: Vec<f64> = (0..5).map(|_| a.sample(&StandardNormal)).collect();
        let ys: Vec<f64> = (0..5).map(|_| b.sample(&StandardNormal)).collect();
        assert_ne!(xs, ys);
    }

    #[test]
    fn gen_bool_extremes() {
        let mut r = AgentRng::new(1, AgentId(0));
        assert!(!r.gen_bool(0.0));
        assert!(r.gen_bool(1.0));
        assert!(r.gen_bool(5.0), "p is clamped to 1");
    }

    #[test]
    fn normal_sample_mean_is_close() {
        let mut r = SimRng::new(11);
        let dist = Normal::new(50.0, 15.0).unwrap();
        let n = 20_000;
        let mean = (0..n).map(|_| r.sample(&dist)).sum::<f64>() / n as f64;
        assert!((mean - 50.0).abs() < 0.5, "mean {mean}");
    }

    #[test]
    fn log_normal_is_positive() {
        let mut r = SimRng::new(3);
        let dist = LogNormal::new(10.0, 1.0).unwrap();
        assert!((0..1000).all(|_| r.sample(&dist) > 0.0));
    }
}

#[cfg(test)]
mod vocab {
    use crate::{CoreError, LifePattern, MediaGroup, Tag};

    #[test]
    fn tag_parse_is_case_insensitive() {
        assert_eq!("gambling".parse::<Tag>().unwrap(), Tag::Gambling);
        assert_eq!(" RPG ".parse::<Tag>().unwrap(), Tag::Rpg);
    }

    #[test]
    fn unknown_tag_is_detected() {
        assert_eq!(
            "Cooking".parse::<Tag>(),
            Err(CoreError::UnknownTag("Cooking".into()))
        );
    }

    #[test]
    fn tag_indices_are_dense() {
        for (i, t) in Tag::ALL.iter().enumerate() {
            assert_eq!(t.index(), i);
        }
    }

    #[test]
    fn media_group_aliases() {
        assert_eq!("MEDIA".parse::<MediaGroup>().unwrap(), MediaGroup::Video);
        assert_eq!("study".parse::<MediaGroup>().unwrap(), MediaGroup::Book);
        assert!("RADIO".parse::<MediaGroup>().is_err());
        assert_eq!(MediaGroup::from_index(4), Some(MediaGroup::Comm));
        assert_eq!(MediaGroup::from_index(6), None);
    }

    #[test]
    fn life_pattern_by_id_or_name() {
        assert_eq!("1".parse::<LifePattern>().unwrap(), LifePattern::Student);
        assert_eq!("night_shift".parse::<LifePattern>().unwrap(), LifePattern::NightShift);
        assert!("4".parse::<LifePattern>().is_err());
    }

    #[test]
    fn weights_sum_to_one() {
        let s: f64 = LifePattern::WEIGHTS.iter().sum();
        assert!((s - 1.0).abs() < 1e-12);
    }
}
