//! Unit tests for psim-model.

#[cfg(test)]
mod helpers {
    use psim_catalog::{ActivityBuilder, ActivityCatalog, SlotContext};
    use psim_core::LifePattern;

    pub fn catalog(rows: &[(&str, &str, f64, f64)]) -> ActivityCatalog {
        let acts = rows
            .iter()
            .map(|&(id, group, intensity, fun)| {
                ActivityBuilder::new(id)
                    .media_group(group)
                    .intensity(intensity)
                    .fun_reward(fun)
                    .build()
                    .unwrap()
            })
            .collect();
        ActivityCatalog::new(acts).unwrap()
    }

    pub fn neutral_slot() -> [SlotContext; LifePattern::COUNT] {
        std::array::from_fn(|_| SlotContext::neutral())
    }
}

// ── Matrix ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod matrix {
    use crate::{ActionMask, Matrix};

    #[test]
    fn rows_are_contiguous_slices() {
        let m = Matrix::from_vec(2, 3, vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(m.row(0), &[1, 2, 3]);
        assert_eq!(m.row(1), &[4, 5, 6]);
        assert_eq!(*m.get(1, 2), 6);
    }

    #[test]
    fn mask_counts() {
        let mut mask = ActionMask::new(3, 2, false);
        mask.set(0, 0, true);
        mask.set(1, 0, true);
        mask.set(1, 1, true);
        assert_eq!(mask.row_count(0), 1);
        assert_eq!(mask.row_count(1), 2);
        assert_eq!(mask.row_count(2), 0);
        assert_eq!(mask.column_counts(), vec![2, 1]);
        assert_eq!(mask.count_true(), 3);
    }

    #[test]
    #[should_panic]
    fn shape_mismatch_panics() {
        let _ = Matrix::from_vec(2, 2, vec![0.0; 3]);
    }
}

// ── Knapsack ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod knapsack {
    use crate::{Allocator, GreedyKnapsack, UtilityMatrix};

    fn row(utility: &[f64], intensity: &[f64], cap: u32) -> Vec<bool> {
        let mut out = vec![false; utility.len()];
        GreedyKnapsack::default().allocate_row(utility, intensity, cap, &mut out);
        out
    }

    #[test]
    fn higher_ratio_wins_when_both_do_not_fit() {
        // Ratios 10/90 and 8/15: the light activity ranks first, the heavy
        // one would then overflow.
        assert_eq!(row(&[10.0, 8.0], &[90.0, 15.0], 100), vec![false, true]);
    }

    #[test]
    fn stops_at_first_overflow() {
        // Ranked 0, 1, 2.  Taking 1 overflows, so 2 is rejected even though
        // it would fit on its own.
        assert_eq!(row(&[50.0, 54.0, 1.0], &[50.0, 60.0, 10.0], 100), vec![true, false, false]);
    }

    #[test]
    fn exact_fit_is_accepted() {
        assert_eq!(row(&[5.0, 5.0], &[40.0, 60.0], 100), vec![true, true]);
    }

    #[test]
    fn negative_utility_is_still_eligible() {
        assert_eq!(row(&[-3.0], &[10.0], 100), vec![true]);
    }

    #[test]
    fn non_finite_utilities_are_never_selected() {
        let out = row(&[f64::NEG_INFINITY, f64::NAN, 1.0], &[1.0, 1.0, 1.0], 100);
        assert_eq!(out, vec![false, false, true]);
    }

    #[test]
    fn zero_intensity_costs_nothing() {
        assert_eq!(row(&[1.0, 100.0], &[0.0, 100.0], 100), vec![true, true]);
    }

    #[test]
    fn exact_ties_keep_catalog_order() {
        // Same ratio; only one fits, so the earlier column must win.
        assert_eq!(row(&[6.0, 6.0], &[60.0, 60.0], 100), vec![true, false]);
    }

    #[test]
    fn zero_capacity_takes_only_free_actions() {
        assert_eq!(row(&[1.0, 1.0], &[0.0, 5.0], 0), vec![true, false]);
    }

    #[test]
    fn matrix_allocation_respects_each_capacity() {
        let intensity = [30.0, 30.0, 30.0];
        let utility = UtilityMatrix::from_vec(2, 3, vec![3.0, 2.0, 1.0, 1.0, 2.0, 3.0]);
        let mask = GreedyKnapsack::default().allocate(&utility, &intensity, &[60, 100]);
        assert_eq!(mask.row(0), &[true, true, false]);
        assert_eq!(mask.row(1), &[true, true, true]);
        for r in 0..mask.rows() {
            let used: f64 = mask.row(r).iter().zip(&intensity).filter(|(b, _)| **b).map(|(_, w)| w).sum();
            assert!(used <= [60.0, 100.0][r]);
        }
    }
}

// ── Utility ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod utility {
    use psim_agent::{AgentRngs, Population};
    use psim_catalog::{ActivityBuilder, ActivityCatalog, CatalogOverlay};
    use psim_core::{Big5, MediaGroup, Tag, Tick};

    use super::helpers::{catalog, neutral_slot};
    use crate::utility::fun_weight;
    use crate::{TickContext, UtilityModel, UtilityParams};

    fn quiet() -> UtilityModel {
        UtilityModel::new(UtilityParams { noise_sd: 0.0, ..Default::default() }).unwrap()
    }

    #[test]
    fn fun_weight_is_clamped() {
        let p = UtilityParams::default();
        assert_eq!(fun_weight(&p, 100.0), 0.1);
        assert_eq!(fun_weight(&p, 50.0), 0.5);
        assert_eq!(fun_weight(&p, 0.0), 1.0);
    }

    #[test]
    fn plain_activity_scores_fun_times_weight() {
        let cat = catalog(&[("A", "BOOK", 10.0, 20.0)]);
        let overlay = CatalogOverlay::new(&cat);
        let slot = neutral_slot();
        let ctx = TickContext::new(Tick(0), &overlay, &slot, None);

        let pop = Population::blank(1); // dopamine 50
        let mut rngs = AgentRngs::new(1, 0);
        let u = quiet().score(&pop, &ctx, &mut rngs);
        assert!((u.get(0, 0) - 10.0).abs() < 1e-9);
    }

    #[test]
    fn rage_bet_raises_gambling_utility() {
        let gacha = ActivityBuilder::new("G")
            .media_group("GAME")
            .intensity(40.0)
            .fun_reward(80.0)
            .tag("Gambling")
            .build()
            .unwrap();
        let cat = ActivityCatalog::new(vec![gacha]).unwrap();
        let overlay = CatalogOverlay::new(&cat);
        let slot = neutral_slot();
        let ctx = TickContext::new(Tick(0), &overlay, &slot, None);

        let mut pop = Population::blank(2);
        pop.gambler_fallacy = vec![1.5, 1.5];
        pop.fail_streak = vec![3, 0];

        let mut rngs = AgentRngs::new(2, 7);
        let u = quiet().score(&pop, &ctx, &mut rngs);
        assert!(u.get(0, 0) > u.get(1, 0));
        assert!((u.get(0, 0) - u.get(1, 0) - 3.0 * 1.5 * 50.0).abs() < 1e-9);
    }

    #[test]
    fn rage_bet_ignores_non_gambling_activities() {
        let cat = catalog(&[("A", "GAME", 10.0, 10.0)]);
        let overlay = CatalogOverlay::new(&cat);
        let slot = neutral_slot();
        let ctx = TickContext::new(Tick(0), &overlay, &slot, None);

        let mut pop = Population::blank(2);
        pop.fail_streak = vec![5, 0];
        let u = quiet().score(&pop, &ctx, &mut AgentRngs::new(2, 1));
        assert_eq!(u.get(0, 0), u.get(1, 0));
    }

    #[test]
    fn inertia_saturation_and_viral_terms() {
        let cat = catalog(&[("V", "VIDEO", 10.0, 0.0), ("G", "GAME", 10.0, 0.0)]);
        let overlay = CatalogOverlay::new(&cat);
        let slot = neutral_slot();
        let mut viral = [0.0; MediaGroup::COUNT];
        viral[MediaGroup::Game.index()] = 2.0;
        let ctx = TickContext::new(Tick(0), &overlay, &slot, Some(&viral));

        let mut pop = Population::blank(1);
        pop.current_media[0] = Some(MediaGroup::Video);
        pop.media_boredom[0][MediaGroup::Video.index()] = 1.0;
        pop.big5[0][Big5::EXTRAVERSION] = 0.5;

        let u = quiet().score(&pop, &ctx, &mut AgentRngs::new(1, 0));
        // Video: +10 inertia, -1.0 * 2.0 * 0.5 saturation.
        assert!((u.get(0, 0) - 9.0).abs() < 1e-9);
        // Game: 2.0 viral * 0.5 extraversion * 5.
        assert!((u.get(0, 1) - 5.0).abs() < 1e-9);
    }

    #[test]
    fn interest_match_multiplies_base() {
        let act = ActivityBuilder::new("R")
            .media_group("GAME")
            .fun_reward(10.0)
            .tag("RPG")
            .build()
            .unwrap();
        let cat = ActivityCatalog::new(vec![act]).unwrap();
        let overlay = CatalogOverlay::new(&cat);
        let slot = neutral_slot();
        let ctx = TickContext::new(Tick(0), &overlay, &slot, None);

        let mut pop = Population::blank(1);
        pop.interests[0][Tag::Rpg.index()] = 1.0;
        let u = quiet().score(&pop, &ctx, &mut AgentRngs::new(1, 0));
        // fun 10 * 0.5 weight * (1 + 1)
        assert!((u.get(0, 0) - 10.0).abs() < 1e-9);
    }

    #[test]
    fn difficulty_and_cost_pain() {
        let act = ActivityBuilder::new("H")
            .media_group("BOOK")
            .difficulty(60.0)
            .cost(1000.0)
            .stress_cost(10.0)
            .build()
            .unwrap();
        let cat = ActivityCatalog::new(vec![act]).unwrap();
        let overlay = CatalogOverlay::new(&cat);
        let slot = neutral_slot();
        let ctx = TickContext::new(Tick(0), &overlay, &slot, None);

        let mut pop = Population::blank(1);
        pop.intelligence[0] = 50.0;
        pop.stress[0] = 100.0;
        pop.loss_aversion[0] = 2.0;
        let u = quiet().score(&pop, &ctx, &mut AgentRngs::new(1, 0));
        // -(10 * 1.5) - (10 * 1.0 * 2.0 + 1000 * 0.001) * 2.0
        assert!((u.get(0, 0) - (-15.0 - 42.0)).abs() < 1e-9);
    }

    #[test]
    fn ad_efficiency_scales_ad_supported_fun_only() {
        let ad = ActivityBuilder::new("AD").media_group("GAME").fun_reward(10.0).ad_supported(true).build().unwrap();
        let plain = ActivityBuilder::new("P").media_group("GAME").fun_reward(10.0).build().unwrap();
        let cat = ActivityCatalog::new(vec![ad, plain]).unwrap();
        let overlay = CatalogOverlay::new(&cat);
        let mut slot = neutral_slot();
        for s in &mut slot {
            s.ad_eff = 3.0;
        }
        let ctx = TickContext::new(Tick(0), &overlay, &slot, None);

        let pop = Population::blank(1);
        let u = quiet().score(&pop, &ctx, &mut AgentRngs::new(1, 0));
        assert!((u.get(0, 0) - 15.0).abs() < 1e-9);
        assert!((u.get(0, 1) - 5.0).abs() < 1e-9);
    }

    #[test]
    fn disabled_activities_score_negative_infinity() {
        let cat = catalog(&[("G", "GAME", 10.0, 10.0), ("B", "BOOK", 10.0, 10.0)]);
        let mut overlay = CatalogOverlay::new(&cat);
        overlay.server_down(MediaGroup::Game);
        let slot = neutral_slot();
        let ctx = TickContext::new(Tick(0), &overlay, &slot, None);

        let model = UtilityModel::new(UtilityParams::default()).unwrap();
        let u = model.score(&Population::blank(3), &ctx, &mut AgentRngs::new(3, 0));
        for i in 0..3 {
            assert_eq!(*u.get(i, 0), f64::NEG_INFINITY);
            assert!(u.get(i, 1).is_finite());
        }
    }

    #[test]
    fn noise_is_reproducible_per_seed() {
        let cat = catalog(&[("A", "GAME", 10.0, 10.0), ("B", "BOOK", 10.0, 10.0)]);
        let overlay = CatalogOverlay::new(&cat);
        let slot = neutral_slot();
        let ctx = TickContext::new(Tick(0), &overlay, &slot, None);
        let pop = Population::blank(4);

        let model = UtilityModel::new(UtilityParams::default()).unwrap();
        let a = model.score(&pop, &ctx, &mut AgentRngs::new(4, 99));
        let b = model.score(&pop, &ctx, &mut AgentRngs::new(4, 99));
        let c = model.score(&pop, &ctx, &mut AgentRngs::new(4, 100));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn invalid_noise_sd_is_rejected() {
        for noise_sd in [-1.0, f64::INFINITY, f64::NAN] {
            let params = UtilityParams { noise_sd, ..Default::default() };
            assert!(UtilityModel::new(params).is_err(), "noise_sd {noise_sd}");
        }
        assert_eq!(quiet().params().noise_sd, 0.0);
    }
}
