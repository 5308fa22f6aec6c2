mod tests {
    use embassy_time::Duration;
    use smart_stairs_engine::color::Rgb;
    use smart_stairs_engine::effect::{
        Effect, STAIRS_HOLD, StairsDirection, StairsEffect, StepOutcome,
    };
    use smart_stairs_engine::state::StripState;

    const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };

    fn test_state(speed_ms: u16, group: u16) -> StripState<10> {
        let mut state = StripState::new();
        state.set_brightness(100);
        state.set_color(255, 255, 255);
        state.set_stairs_speed(speed_ms);
        state.set_stairs_group_size(group);
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

    fn step(state: &mut StripState<10>, effect: &mut StairsEffect) -> (StepOutcome, Vec<usize>) {
        let (params, frame) = state.render_parts();
        let outcome = effect.step(params, frame);
        (outcome, lit_indices(frame))
    }

    #[test]
    fn test_from_start_turn_on_grows_prefix() {
        let mut state = test_state(20, 3);
        let mut stairs = StairsEffect::new(StairsDirection::FromStart);

        let (outcome, lit) = step(&mut state, &mut stairs);
        assert_eq!(outcome, StepOutcome::Continue(Duration::from_millis(20)));
        assert_eq!(lit, vec![0, 1, 2]);

        let (_, lit) = step(&mut state, &mut stairs);
        assert_eq!(lit, (0..6).collect::<Vec<_>>());
        let (_, lit) = step(&mut state, &mut stairs);
        assert_eq!(lit, (0..9).collect::<Vec<_>>());
    }

    #[test]
    fn test_hold_at_full_then_mirror_retract() {
        // Group 3 does not divide length 10: the lit count overshoots to a
        // whole group so the retract phase revisits 9, 6, 3, 0 exactly.
        let mut state = test_state(20, 3);
        let mut stairs = StairsEffect::new(StairsDirection::FromStart);

        for _ in 0..3 {
            step(&mut state, &mut stairs);
        }
        let (outcome, lit) = step(&mut state, &mut stairs);
        assert_eq!(outcome, StepOutcome::Continue(STAIRS_HOLD));
        assert_eq!(lit.len(), 10);

        let (outcome, lit) = step(&mut state, &mut stairs);
        assert_eq!(outcome, StepOutcome::Continue(Duration::from_millis(20)));
        assert_eq!(lit, (0..9).collect::<Vec<_>>());

        let (_, lit) = step(&mut state, &mut stairs);
        assert_eq!(lit, (0..6).collect::<Vec<_>>());
        let (_, lit) = step(&mut state, &mut stairs);
        assert_eq!(lit, (0..3).collect::<Vec<_>>());

        let (outcome, lit) = step(&mut state, &mut stairs);
        assert_eq!(outcome, StepOutcome::Finished);
        assert!(lit.is_empty());
    }

    #[test]
    fn test_from_end_grows_suffix() {
        let mut state = test_state(20, 3);
        let mut stairs = StairsEffect::new(StairsDirection::FromEnd);

        let (_, lit) = step(&mut state, &mut stairs);
        assert_eq!(lit, vec![7, 8, 9]);
        let (_, lit) = step(&mut state, &mut stairs);
        assert_eq!(lit, (4..10).collect::<Vec<_>>());
    }

    #[test]
    fn test_both_grows_from_both_ends_until_fronts_meet() {
        let mut state = test_state(20, 2);
        let mut stairs = StairsEffect::new(StairsDirection::Both);

        let (_, lit) = step(&mut state, &mut stairs);
        assert_eq!(lit, vec![0, 1, 8, 9]);

        let (_, lit) = step(&mut state, &mut stairs);
        assert_eq!(lit, vec![0, 1, 2, 3, 6, 7, 8, 9]);

        // Each front only covers half the strip before they meet.
        let (outcome, lit) = step(&mut state, &mut stairs);
        assert_eq!(outcome, StepOutcome::Continue(STAIRS_HOLD));
        assert_eq!(lit.len(), 10);

        let (_, lit) = step(&mut state, &mut stairs);
        assert_eq!(lit, vec![0, 1, 2, 3, 6, 7, 8, 9]);
        let (_, lit) = step(&mut state, &mut stairs);
        assert_eq!(lit, vec![0, 1, 8, 9]);

        let (outcome, lit) = step(&mut state, &mut stairs);
        assert_eq!(outcome, StepOutcome::Finished);
        assert!(lit.is_empty());
    }

    #[test]
    fn test_speed_change_applies_mid_run() {
        let mut state = test_state(20, 3);
        let mut stairs = StairsEffect::new(StairsDirection::FromStart);

        step(&mut state, &mut stairs);
        state.set_stairs_speed(100);
        let (outcome, _) = step(&mut state, &mut stairs);
        assert_eq!(outcome, StepOutcome::Continue(Duration::from_millis(100)));
    }

    #[test]
    fn test_group_covering_whole_strip_lights_in_one_step() {
        let mut state = test_state(20, 10);
        let mut stairs = StairsEffect::new(StairsDirection::FromStart);

        let (outcome, lit) = step(&mut state, &mut stairs);
        assert_eq!(outcome, StepOutcome::Continue(STAIRS_HOLD));
        assert_eq!(lit.len(), 10);

        let (outcome, _) = step(&mut state, &mut stairs);
        assert_eq!(outcome, StepOutcome::Finished);
    }
}
