//! Unit tests for psim-catalog.

#[cfg(test)]
mod builder_tests {
    use psim_core::{MediaGroup, Tag};

    use crate::{ActivityBuilder, CatalogError};

    #[test]
    fn fills_defaults() {
        let a = ActivityBuilder::new("X").category("GAME").build().unwrap();
        assert_eq!(a.name, "X");
        assert_eq!(a.media_group, MediaGroup::Game);
        assert_eq!(a.fun_reward, 0.0);
        assert_eq!(a.difficulty, 0.0);
        assert!(a.tags.is_empty());
        assert!(!a.ad_supported);
    }

    #[test]
    fn legacy_base_reward_becomes_fun() {
        let a = ActivityBuilder::new("X").media_group("LIFE").base_reward(12.0).build().unwrap();
        assert_eq!(a.fun_reward, 12.0);
        let b = ActivityBuilder::new("Y")
            .media_group("LIFE")
            .base_reward(12.0)
            .fun_reward(3.0)
            .build()
            .unwrap();
        assert_eq!(b.fun_reward, 3.0);
    }

    #[test]
    fn missing_columns_are_reported() {
        let b = ActivityBuilder::new("X").media_group("GAME").intensity(10.0);
        let missing = b.missing_columns();
        assert!(missing.contains(&"Fun_Reward"));
        assert!(missing.contains(&"Difficulty"));
        assert!(!missing.contains(&"Intensity"));
        assert!(!missing.contains(&"Media_Group"));
    }

    #[test]
    fn tags_field_splits_and_dedups() {
        let a = ActivityBuilder::new("X")
            .media_group("GAME")
            .tags_field("Gambling| Collection|Gambling|")
            .build()
            .unwrap();
        assert_eq!(a.tags, vec![Tag::Gambling, Tag::Collection]);
        assert!(a.has_tag(Tag::Gambling));
    }

    #[test]
    fn unknown_tag_is_an_error() {
        let r = ActivityBuilder::new("X").media_group("GAME").tag("Cooking").build();
        assert!(matches!(r, Err(CatalogError::Vocabulary(_))));
    }

    #[test]
    fn negative_intensity_rejected() {
        let r = ActivityBuilder::new("X").media_group("GAME").intensity(-1.0).build();
        assert!(matches!(r, Err(CatalogError::InvalidActivity { .. })));
    }

    #[test]
    fn group_is_required() {
        let r = ActivityBuilder::new("X").build();
        assert!(matches!(r, Err(CatalogError::InvalidActivity { .. })));
    }
}

#[cfg(test)]
mod catalog_tests {
    use psim_core::{ActivityId, MediaGroup};

    use crate::{ActivityBuilder, ActivityCatalog, CatalogError, default_catalog};

    #[test]
    fn empty_catalog_rejected() {
        assert!(matches!(ActivityCatalog::new(vec![]), Err(CatalogError::EmptyCatalog)));
    }

    #[test]
    fn duplicate_ids_rejected() {
        let a = ActivityBuilder::new("A").media_group("GAME").build().unwrap();
        let r = ActivityCatalog::new(vec![a.clone(), a]);
        assert!(matches!(r, Err(CatalogError::DuplicateId(id)) if id == "A"));
    }

    #[test]
    fn default_catalog_columns() {
        let cat = default_catalog().unwrap();
        assert_eq!(cat.len(), 11);
        assert_eq!(cat.intensity.len(), cat.len());
        let gacha = cat.find("ACT_GM_GACHA").unwrap();
        assert!(cat.gambling[gacha.index()]);
        assert_eq!(cat.gambling.iter().filter(|&&g| g).count(), 1);
        let ad = cat.find("ACT_GM_AD").unwrap();
        assert!(cat.ad_supported[ad.index()]);
        assert_eq!(cat.get(ActivityId(0)).id, "ACT_GM_PVP");
        assert_eq!(cat.in_group(MediaGroup::Game).count(), 4);
        assert_eq!(cat.media_group[cat.find("ACT_MD_SHORT").unwrap().index()], MediaGroup::Video);
        assert!(cat.find("NOPE").is_none());
    }
}

#[cfg(test)]
mod context_tests {
    use psim_core::{LifePattern, Tick};

    use crate::{CatalogError, ContextRow, ContextTable, default_context};

    fn row(slot: usize, pattern: Option<LifePattern>, stress: f64) -> ContextRow {
        ContextRow {
            slot,
            pattern,
            label: Some("TEST".into()),
            stress_mod: Some(stress),
            ad_eff: None,
        }
    }

    #[test]
    fn no_rows_is_fatal() {
        assert!(matches!(ContextTable::from_rows(vec![]), Err(CatalogError::EmptyContext)));
    }

    #[test]
    fn partial_table_is_padded() {
        let t = ContextTable::from_rows(vec![row(3, Some(LifePattern::Student), 1.7)]).unwrap();
        assert_eq!(t.at(Tick(3), LifePattern::Student).stress_mod, 1.7);
        assert_eq!(t.at(Tick(3), LifePattern::Student).ad_eff, 1.0);
        assert_eq!(t.at(Tick(3), LifePattern::OfficeWorker).stress_mod, 1.0);
        assert_eq!(t.at(Tick(50), LifePattern::Student).stress_mod, 1.0);
    }

    #[test]
    fn pattern_less_row_applies_to_all() {
        let t = ContextTable::from_rows(vec![row(10, None, 0.5)]).unwrap();
        for p in LifePattern::ALL {
            assert_eq!(t.at(Tick(10), p).stress_mod, 0.5);
        }
    }

    #[test]
    fn out_of_range_slots_dropped() {
        let t = ContextTable::from_rows(vec![row(200, None, 3.0)]).unwrap();
        assert_eq!(t, ContextTable::neutral());
    }

    #[test]
    fn non_positive_multiplier_rejected() {
        let r = ContextTable::from_rows(vec![row(0, None, 0.0)]);
        assert!(matches!(r, Err(CatalogError::InvalidContext(_))));
    }

    #[test]
    fn lookup_wraps_daily() {
        let t = default_context();
        assert_eq!(t.at(Tick(32), LifePattern::OfficeWorker), t.at(Tick(128), LifePattern::OfficeWorker));
    }

    #[test]
    fn default_schedules() {
        let t = default_context();
        // 08:00 office commute, student commute, night-shift commute home.
        assert_eq!(t.at(Tick(32), LifePattern::OfficeWorker).label, "COMMUTE_AM");
        assert_eq!(t.at(Tick(32), LifePattern::OfficeWorker).stress_mod, 1.5);
        assert_eq!(t.at(Tick(0), LifePattern::NightShift).label, "WORK_NIGHT");
        assert_eq!(t.at(Tick(40), LifePattern::NightShift).label, "SLEEP");
        assert_eq!(t.at(Tick(95), LifePattern::Student).label, "RELAX");
        assert!(t.slot(Tick(60)).iter().all(|c| c.stress_mod > 0.0 && c.ad_eff > 0.0));
    }
}

#[cfg(test)]
mod overlay_tests {
    use psim_core::MediaGroup;

    use crate::{CatalogOverlay, SERVER_DOWN_FUN, default_catalog};

    #[test]
    fn fresh_overlay_is_pristine() {
        let cat = default_catalog().unwrap();
        assert!(CatalogOverlay::new(&cat).is_pristine());
    }

    #[test]
    fn server_down_disables_group_only() {
        let cat = default_catalog().unwrap();
        let mut o = CatalogOverlay::new(&cat);
        o.server_down(MediaGroup::Game);
        for a in cat.ids() {
            let is_game = cat.media_group[a.index()] == MediaGroup::Game;
            assert_eq!(o.disabled[a.index()], is_game);
            if is_game {
                assert_eq!(o.fun_reward[a.index()], SERVER_DOWN_FUN);
            } else {
                assert_eq!(o.fun_reward[a.index()], cat.fun_reward[a.index()]);
            }
        }
        // Base is untouched.
        assert!(CatalogOverlay::new(&cat).is_pristine());
        assert!(!o.is_pristine());
    }

    #[test]
    fn hot_time_multiplies() {
        let cat = default_catalog().unwrap();
        let mut o = CatalogOverlay::new(&cat);
        o.hot_time(MediaGroup::Video, 2.0);
        let short = cat.find("ACT_MD_SHORT").unwrap().index();
        assert_eq!(o.fun_reward[short], 2.0 * cat.fun_reward[short]);
        assert_eq!(cat.fun_reward[short], 25.0);
    }
}

#[cfg(test)]
mod loader_tests {
    use std::io::Cursor;

    use psim_core::{LifePattern, MediaGroup, Tick};

    use crate::{
        CatalogError, EventKind, load_activities_reader, load_context_reader, load_events_reader,
    };

    #[test]
    fn legacy_catalog_without_new_columns() {
        let csv = "\
ID,Name,Category,Intensity,Base_Reward,Cost,Stress_Cost,Tags
ACT_GM_PVP,PVP,GAME,90,50.0,0,15.0,Competition|Skill
ACT_LF_REST,Rest,LIFE,5,1.0,0,-20.0,Relax
";
        let cat = load_activities_reader(Cursor::new(csv)).unwrap();
        assert_eq!(cat.len(), 2);
        assert_eq!(cat.fun_reward, vec![50.0, 1.0]);
        assert_eq!(cat.growth_reward, vec![0.0, 0.0]);
        assert_eq!(cat.difficulty, vec![0.0, 0.0]);
        assert_eq!(cat.media_group, vec![MediaGroup::Game, MediaGroup::Life]);
    }

    #[test]
    fn empty_tags_cell() {
        let csv = "ID,Media_Group,Tags\nA,GAME,\n";
        let cat = load_activities_reader(Cursor::new(csv)).unwrap();
        assert!(cat.tag_slots[0].is_empty());
    }

    #[test]
    fn unknown_media_group_fails() {
        let csv = "ID,Media_Group\nA,RADIO\n";
        assert!(matches!(
            load_activities_reader(Cursor::new(csv)),
            Err(CatalogError::Vocabulary(_))
        ));
    }

    #[test]
    fn header_only_catalog_is_empty() {
        let csv = "ID,Media_Group\n";
        assert!(matches!(
            load_activities_reader(Cursor::new(csv)),
            Err(CatalogError::EmptyCatalog)
        ));
    }

    #[test]
    fn context_with_patterns_and_alias() {
        let csv = "\
Time_Index,Pattern_ID,Context,Stress_Mod,Ad_Efficiency
0,0,SLEEP,0.5,0.1
0,student,SLEEP,0.6,0.2
";
        let t = load_context_reader(Cursor::new(csv)).unwrap();
        assert_eq!(t.at(Tick(0), LifePattern::OfficeWorker).ad_eff, 0.1);
        assert_eq!(t.at(Tick(0), LifePattern::Student).stress_mod, 0.6);
        assert_eq!(t.at(Tick(0), LifePattern::Freelancer).stress_mod, 1.0);
    }

    #[test]
    fn time_slot_table_without_pattern_column() {
        let csv = "\
Time_Index,Hour,Context,Stress_Mod,Ad_Efficiency
32,8,COMMUTE_AM,1.5,1.5
";
        let t = load_context_reader(Cursor::new(csv)).unwrap();
        for p in LifePattern::ALL {
            assert_eq!(t.at(Tick(32), p).label, "COMMUTE_AM");
        }
    }

    #[test]
    fn events_with_default_magnitudes() {
        let csv = "\
Tick,Type,Target,Value
10,SERVER_DOWN,GAME,
80,HOT_TIME,GAME,
80,viral_boost,MEDIA,0.4
";
        let s = load_events_reader(Cursor::new(csv)).unwrap();
        assert_eq!(s.len(), 3);
        assert_eq!(s.at(Tick(10))[0].kind, EventKind::ServerDown);
        let at80 = s.at(Tick(80));
        assert_eq!(at80[0].magnitude, 2.0);
        assert_eq!(at80[1].kind, EventKind::ViralBoost);
        assert_eq!(at80[1].target, MediaGroup::Video);
        assert_eq!(at80[1].magnitude, 0.4);
        assert!(s.at(Tick(11)).is_empty());
        assert_eq!(s.last_tick(), Some(Tick(80)));
    }

    #[test]
    fn bad_event_type_fails() {
        let csv = "Tick,Type,Target,Value\n1,METEOR,GAME,\n";
        assert!(matches!(
            load_events_reader(Cursor::new(csv)),
            Err(CatalogError::InvalidEvent(_))
        ));
    }
}

#[cfg(test)]
mod event_tests {
    use psim_core::{MediaGroup, Tick};

    use crate::{Event, EventKind, EventSchedule};

    #[test]
    fn annotation_text() {
        let e = Event::new(Tick(33), EventKind::HotTime, MediaGroup::Game);
        assert_eq!(e.annotation("08:15"), "08:15 HOT_TIME GAME x2");
        let d = Event::new(Tick(10), EventKind::ServerDown, MediaGroup::Game);
        assert_eq!(d.annotation("02:30"), "02:30 SERVER_DOWN GAME");
    }

    #[test]
    fn schedule_keeps_insertion_order() {
        let s = EventSchedule::new()
            .with(Event::new(Tick(5), EventKind::ViralBoost, MediaGroup::Comm))
            .with(Event::new(Tick(5), EventKind::HotTime, MediaGroup::Comm).with_magnitude(3.0));
        let at = s.at(Tick(5));
        assert_eq!(at.len(), 2);
        assert_eq!(at[0].kind, EventKind::ViralBoost);
        assert_eq!(at[1].magnitude, 3.0);
        assert_eq!(s.iter().count(), 2);
    }
}
