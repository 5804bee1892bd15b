// tests/rofibot.rs
use glam::IVec2;
use rofibot_walk::{
    Action, Degree, DoubleRofibot, FIRST_ROBOT_ID, Morphology, Orientation, Origin, Pad, PadView, PlanError, Rofibot,
    SECOND_ROBOT_ID, Side, SingleRofibot, current_configuration, look_and_touch, reconnect,
};

/// A 5x5 pad with the robot starting in its centre facing north.
fn setup() -> Pad {
    Pad::rectangle(5, 5).unwrap()
}

fn centre(pad: &Pad) -> PadView<'_> {
    PadView::new(pad, Origin::new(2, 2, Orientation::N))
}

#[test]
fn test_single_start_pose() {
    let pad = setup();
    let view = PadView::new(&pad, Origin::new(0, 0, Orientation::N));
    let robot = SingleRofibot::new(FIRST_ROBOT_ID);
    assert_eq!(robot.fixed_position(), IVec2::ZERO);
    assert_eq!(robot.free_position(), IVec2::X);
    assert_eq!(robot.morphology(), Morphology::Single);

    let config = current_configuration(&robot, &view).unwrap();
    assert_eq!(
        config.to_string(),
        "M 20001 0 0 0\nE 20001 A +X E -Z B 0",
        "relative west is absolute east under a northward start"
    );
}

#[test]
fn test_reconfig_without_motion_emits_nothing() {
    let pad = setup();
    let view = centre(&pad);
    let mut robot = SingleRofibot::new(FIRST_ROBOT_ID);

    assert!(robot.compute_reconfig(&view, IVec2::X, &[]).unwrap().is_empty(), "already there");
    assert!(robot.compute_reconfig(&view, IVec2::ZERO, &[]).unwrap().is_empty(), "the fixed cell itself");
    assert!(robot.compute_reconfig(&view, IVec2::new(2, 2), &[]).unwrap().is_empty(), "not adjacent");
    assert_eq!(robot.stats().all.total(), 0);
}

#[test]
fn test_single_swings_to_side() {
    let pad = setup();
    let view = centre(&pad);
    let mut robot = SingleRofibot::new(FIRST_ROBOT_ID);

    let configs = robot.compute_reconfig(&view, IVec2::Y, &[]).unwrap();
    assert_eq!(configs.len(), 1, "a side step is a single rotation");
    assert_eq!(robot.free_position(), IVec2::Y);
    assert_eq!(robot.fixed_position(), IVec2::ZERO);
    assert_eq!(robot.alpha(), Degree::MinusNinety);
    assert_eq!(robot.stats().all.get(Action::RotateFixedAB90), 1);
    assert_eq!(robot.stats().non_concurrent.get(Action::RotateFixedAB90), 1);
}

#[test]
fn test_single_reconnect_then_reconfig_is_idle() {
    let pad = setup();
    let view = centre(&pad);
    let mut robot = SingleRofibot::new(FIRST_ROBOT_ID);

    let configs = reconnect(&mut robot, &view).unwrap();
    assert_eq!(configs.len(), 2, "both docks held, then only the new one");
    assert_eq!(configs[0].edges.len(), 2);
    assert_eq!(configs[1].edges.len(), 1);
    assert_eq!(robot.fixed_position(), IVec2::X);
    assert_eq!(robot.fixed_connector().side, Side::B);
    assert!(
        robot.compute_reconfig(&view, IVec2::ZERO, &[]).unwrap().is_empty(),
        "the old cell is where the free side already is"
    );
    assert_eq!(robot.stats().all.get(Action::AddEdge), 1);
    assert_eq!(robot.stats().all.get(Action::RemoveEdge), 1);
}

#[test]
fn test_touch_keeps_dock() {
    let pad = setup();
    let view = centre(&pad);
    let mut robot = SingleRofibot::new(FIRST_ROBOT_ID);

    let configs = look_and_touch(&mut robot, &view).unwrap();
    assert_eq!(configs.len(), 2);
    let touched: Vec<IVec2> = configs[0].pad_cells().collect();
    assert_eq!(touched, vec![IVec2::new(2, 2), IVec2::new(3, 2)]);
    let after: Vec<IVec2> = configs[1].pad_cells().collect();
    assert_eq!(after, vec![IVec2::new(2, 2)], "the touch is released again");
    assert_eq!(robot.fixed_position(), IVec2::ZERO);
}

#[test]
fn test_single_worst_direction_needs_reconnection() {
    let robot = SingleRofibot::new(FIRST_ROBOT_ID);
    assert_eq!(robot.worst_step_direction(), Orientation::W);
    assert!(robot.needs_reconnection(IVec2::NEG_X));
    assert!(!robot.needs_reconnection(IVec2::Y));
    assert!(!robot.needs_reconnection(IVec2::new(-2, 0)), "only neighbours count");
}

#[test]
fn test_single_two_step_maneuver() {
    // A 3x1 strip, robot docked in the middle with its free side to the east.
    let pad = Pad::rectangle(3, 1).unwrap();
    let view = PadView::new(&pad, Origin::new(1, 0, Orientation::N));
    let mut robot = SingleRofibot::new(FIRST_ROBOT_ID);

    let configs = robot.compute_reconfig(&view, IVec2::NEG_X, &[]).unwrap();
    assert_eq!(robot.free_position(), IVec2::NEG_X, "the maneuver must end on the target");
    assert_eq!(robot.fixed_position(), IVec2::ZERO, "the robot docks back where it started");
    assert_eq!(configs.len(), 6, "re-dock (2), twist (1), dock back (2), final swing (1)");
    assert_eq!(robot.stats().all.get(Action::AddEdge), 2);
    assert_eq!(robot.stats().non_concurrent.get(Action::RotateFreeAB90), 1);
}

#[test]
fn test_single_dead_end_is_unreachable() {
    // Nothing around the robot but the cell it wants to step into.
    let pad = Pad::rectangle(2, 1).unwrap();
    let view = PadView::new(&pad, Origin::new(1, 0, Orientation::N));
    let mut robot = SingleRofibot::new(FIRST_ROBOT_ID);

    let err = robot.compute_reconfig(&view, IVec2::NEG_X, &[]).unwrap_err();
    match err {
        PlanError::Unreachable {
            target,
            fixed_side,
            fixed_position,
            fixed_orientation,
        } => {
            assert_eq!(target, IVec2::new(0, 0));
            assert_eq!(fixed_side, Side::A);
            assert_eq!(fixed_position, IVec2::new(1, 0));
            assert_eq!(fixed_orientation, Orientation::E);
        }
        other => panic!("expected Unreachable, got {other:?}"),
    }
}

#[test]
fn test_double_swings_with_gamma() {
    let pad = setup();
    let view = centre(&pad);
    let mut robot = DoubleRofibot::new(FIRST_ROBOT_ID, SECOND_ROBOT_ID);
    assert_eq!(robot.free_position(), IVec2::X);

    let configs = robot.compute_reconfig(&view, IVec2::Y, &[]).unwrap();
    assert_eq!(configs.len(), 1);
    assert_eq!(robot.free_position(), IVec2::Y);
    assert_eq!(robot.gammas(), (Degree::Ninety, Degree::Zero));
    assert_eq!(robot.stats().all.get(Action::RotateGamma90), 1);
    assert_eq!(robot.stats().non_concurrent.get(Action::RotateGamma90), 1);

    robot.compute_reconfig(&view, IVec2::NEG_X, &[]).unwrap();
    assert_eq!(robot.free_position(), IVec2::NEG_X);
    assert_eq!(robot.gammas(), (Degree::OneEighty, Degree::Zero));
    assert_eq!(robot.stats().all.get(Action::RotateGamma90), 2);

    robot.compute_reconfig(&view, IVec2::X, &[]).unwrap();
    assert_eq!(robot.stats().all.get(Action::RotateGamma180), 1, "an about-turn is one half rotation");
}

#[test]
fn test_double_never_needs_reconnection() {
    let pad = setup();
    let view = centre(&pad);
    let mut robot = DoubleRofibot::new(FIRST_ROBOT_ID, SECOND_ROBOT_ID);
    for target in [IVec2::Y, IVec2::NEG_X, IVec2::NEG_Y, IVec2::X] {
        assert!(!robot.needs_reconnection(target));
        robot.compute_reconfig(&view, target, &[]).unwrap();
        assert_eq!(robot.free_position(), target);
    }
}

#[test]
fn test_double_reconnect_swaps_roles() {
    let pad = setup();
    let view = centre(&pad);
    let mut robot = DoubleRofibot::new(FIRST_ROBOT_ID, SECOND_ROBOT_ID);
    robot.compute_reconfig(&view, IVec2::Y, &[]).unwrap();

    let configs = reconnect(&mut robot, &view).unwrap();
    assert_eq!(configs.len(), 2);
    assert_eq!(robot.fixed_position(), IVec2::Y);
    assert_eq!(robot.free_position(), IVec2::ZERO);
    assert_eq!(robot.fixed_connector().id, SECOND_ROBOT_ID);
    assert!(
        robot.compute_reconfig(&view, IVec2::ZERO, &[]).unwrap().is_empty(),
        "the blue module already sits on the old cell"
    );

    robot.compute_reconfig(&view, IVec2::new(0, 2), &[]).unwrap();
    assert_eq!(robot.free_position(), IVec2::new(0, 2));
    assert_eq!(robot.gammas(), (Degree::Ninety, Degree::OneEighty));

    let modules = &configs[1].modules;
    assert_eq!(modules.len(), 2);
    assert!(configs[1].to_string().contains("E 20001 B -X S +X B 20002"), "rigid link between the modules");
}

#[test]
fn test_morphology_builds_fresh_robot() {
    for morphology in [Morphology::Single, Morphology::Double] {
        let robot = morphology.build();
        assert_eq!(robot.morphology(), morphology);
        assert_eq!(robot.fixed_position(), IVec2::ZERO);
        assert_eq!(robot.free_position(), IVec2::X);
        assert_eq!(robot.stats().all.total(), 0);
    }
}

#[test]
fn test_new_edge_matches_free_cell() {
    let pad = setup();
    let view = centre(&pad);
    let mut robots = [Morphology::Single.build(), Morphology::Double.build()];
    for robot in robots.iter_mut() {
        for target in [IVec2::Y, IVec2::X, IVec2::NEG_Y] {
            robot.compute_reconfig(&view, target, &[]).unwrap();
            robot.compute_new_edge().unwrap();
            let free = robot.free_position();
            assert!(
                robot.compute_reconfig(&view, free, &[]).unwrap().is_empty(),
                "{} robot must already face {free}",
                robot.morphology()
            );
        }
    }

    let single = SingleRofibot::new(FIRST_ROBOT_ID);
    let edge = single.compute_new_edge().unwrap();
    assert_eq!(edge.side, Side::B, "the unfixed half docks next");
    assert_eq!(edge.id, FIRST_ROBOT_ID);
}
