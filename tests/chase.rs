mod tests {
    use smart_stairs_engine::color::Rgb;
    use smart_stairs_engine::effect::{
        CHASE_TICK, ChaseDirection, ChaseEffect, Effect, StepOutcome,
    };
    use smart_stairs_engine::state::StripState;

    const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };

    fn test_state() -> StripState<4> {
        let mut state = StripState::new();
        state.set_brightness(100);
        state.set_color(255, 255, 255);
        state
    }

    fn lit_indices(frame: &[Rgb]) -> Vec<usize> {
        frame
            .iter()
            .enumerate()
            .filter(|(_, led)| **led != BLACK)
            .map(|(index, _)| index)
            .collect()
    }

    fn step(state: &mut StripState<4>, effect: &mut ChaseEffect) -> (StepOutcome, Vec<usize>) {
        let (params, frame) = state.render_parts();
        let outcome = effect.step(params, frame);
        (outcome, lit_indices(frame))
    }

    #[test]
    fn test_toward_end_grows_prefix_one_pixel_per_step() {
        let mut state = test_state();
        let mut chase = ChaseEffect::new(ChaseDirection::TowardEnd);

        for count in 1..=4 {
            let (outcome, lit) = step(&mut state, &mut chase);
            assert_eq!(outcome, StepOutcome::Continue(CHASE_TICK));
            assert_eq!(lit, (0..count).collect::<Vec<_>>());
        }
    }

    #[test]
    fn test_toward_start_grows_suffix() {
        let mut state = test_state();
        let mut chase = ChaseEffect::new(ChaseDirection::TowardStart);

        let (_, lit) = step(&mut state, &mut chase);
        assert_eq!(lit, vec![3]);
        let (_, lit) = step(&mut state, &mut chase);
        assert_eq!(lit, vec![2, 3]);
    }

    #[test]
    fn test_retracts_in_reverse_and_finishes() {
        let mut state = test_state();
        let mut chase = ChaseEffect::new(ChaseDirection::TowardEnd);

        for _ in 0..4 {
            step(&mut state, &mut chase);
        }

        let (outcome, lit) = step(&mut state, &mut chase);
        assert_eq!(outcome, StepOutcome::Continue(CHASE_TICK));
        assert_eq!(lit, vec![0, 1, 2]);
        let (_, lit) = step(&mut state, &mut chase);
        assert_eq!(lit, vec![0, 1]);
        let (_, lit) = step(&mut state, &mut chase);
        assert_eq!(lit, vec![0]);

        let (outcome, lit) = step(&mut state, &mut chase);
        assert_eq!(outcome, StepOutcome::Finished);
        assert!(lit.is_empty());
    }

    #[test]
    fn test_cadence_ignores_configured_stairs_speed() {
        let mut state = test_state();
        state.set_stairs_speed(500);
        state.set_stairs_group_size(4);
        let mut chase = ChaseEffect::new(ChaseDirection::TowardEnd);

        let (outcome, lit) = step(&mut state, &mut chase);
        assert_eq!(outcome, StepOutcome::Continue(CHASE_TICK));
        assert_eq!(lit.len(), 1);
    }
}
