// tests/geometry.rs
use glam::IVec2;
use rofibot_walk::{
    BoundEdge, Bounds, Degree, Dock, DockingPose, NodeArena, Orientation, Origin, PlanError, Side,
    single_module_new_edge,
};

#[test]
fn test_orientation_turns() {
    for o in Orientation::ALL {
        assert_eq!(o.left().right(), o, "left then right is identity for {o}");
        assert_eq!(o.left().left(), o.opposite(), "two lefts make an about-turn for {o}");
        assert_eq!(o.turned(Degree::Ninety), o.left());
        assert_eq!(o.turned(Degree::MinusNinety), o.right());
        assert_eq!(o.turned(Degree::OneEighty), o.opposite());
        assert_eq!(o.turned(Degree::Zero), o);
        assert_eq!(o.step() + o.opposite().step(), IVec2::ZERO);
    }
    assert_eq!(Orientation::N.left(), Orientation::W, "left is counter-clockwise");
}

#[test]
fn test_direction_between_cells() {
    let c = IVec2::new(3, 4);
    assert_eq!(Orientation::between(c, IVec2::new(3, 5)), Some(Orientation::N));
    assert_eq!(Orientation::between(c, IVec2::new(2, 4)), Some(Orientation::W));
    assert_eq!(Orientation::between(c, c), None, "a cell is not its own neighbour");
    assert_eq!(Orientation::between(c, IVec2::new(4, 5)), None, "diagonals are not neighbours");
}

#[test]
fn test_degree_arithmetic() {
    assert_eq!(Degree::from_quarter_turns(-1), Degree::MinusNinety);
    assert_eq!(Degree::from_quarter_turns(5), Degree::Ninety);
    assert_eq!(Degree::from_quarter_turns(Degree::OneEighty.quarter_turns() + 1), Degree::MinusNinety);
    assert_eq!(Degree::Ninety.negated(), Degree::MinusNinety);
    assert_eq!(Degree::OneEighty.negated(), Degree::OneEighty);

    // Distances are modular: -90 and 180 are a quarter turn apart.
    assert_eq!(Degree::MinusNinety.distance(Degree::OneEighty), 90);
    assert_eq!(Degree::Ninety.distance(Degree::MinusNinety), 180);
    assert_eq!(Degree::Zero.distance(Degree::Zero), 0);
    assert_eq!(Degree::MinusNinety.to_string(), "-90");
}

#[test]
fn test_straight_module_docks_opposite_connector() {
    let pose = single_module_new_edge(Side::A, Dock::PlusX, Orientation::W, Degree::Zero, Degree::Zero, Degree::Zero)
        .unwrap();
    assert_eq!(
        pose,
        DockingPose {
            side: Side::B,
            dock: Dock::MinusX,
            orientation: Orientation::W
        },
        "an unbent module docks its other half through -X with the same orientation"
    );
}

#[test]
fn test_quarter_turn_twists_connector() {
    let pose = single_module_new_edge(Side::A, Dock::PlusX, Orientation::N, Degree::Ninety, Degree::Zero, Degree::Zero)
        .unwrap();
    assert_eq!(pose.dock, Dock::MinusX);
    assert_eq!(pose.orientation, Orientation::E);

    // Side B reads alpha and beta the other way round.
    let mirrored =
        single_module_new_edge(Side::B, Dock::PlusX, Orientation::N, Degree::Zero, Degree::Ninety, Degree::Zero)
            .unwrap();
    assert_eq!(mirrored.side, Side::A);
    assert_eq!(mirrored.orientation, Orientation::E);
}

#[test]
fn test_gamma_half_turn_keeps_dock() {
    let pose =
        single_module_new_edge(Side::A, Dock::PlusX, Orientation::N, Degree::Zero, Degree::Zero, Degree::OneEighty)
            .unwrap();
    assert_eq!(pose.dock, Dock::PlusX);
    assert_eq!(pose.orientation, Orientation::S, "same dock on both halves flips the orientation");
}

#[test]
fn test_undefined_geometry_is_reported() {
    let err = single_module_new_edge(Side::A, Dock::MinusZ, Orientation::N, Degree::Zero, Degree::Zero, Degree::Zero)
        .unwrap_err();
    assert!(
        matches!(err, PlanError::UnsupportedGeometry { side: Side::A, dock: Dock::MinusZ, .. }),
        "unexpected error {err:?}"
    );
}

#[test]
fn test_origin_transform() {
    let north = Origin::new(2, 3, Orientation::N);
    assert_eq!(north.to_absolute(IVec2::new(1, 0)), IVec2::new(3, 3));

    let east = Origin::new(2, 3, Orientation::E);
    assert_eq!(east.to_absolute(IVec2::new(1, 0)), IVec2::new(2, 2));
    assert_eq!(east.to_absolute(IVec2::new(0, 1)), IVec2::new(3, 3), "relative north is absolute east");

    let south = Origin::new(2, 3, Orientation::S);
    assert_eq!(south.to_absolute(IVec2::new(1, 1)), IVec2::new(1, 2));

    for direction in Orientation::ALL {
        let origin = Origin::new(0, 0, direction);
        for o in Orientation::ALL {
            assert_eq!(
                origin.to_relative_orientation(origin.to_absolute_orientation(o)),
                o,
                "orientation transform must invert for start {direction}"
            );
        }
    }
}

#[test]
fn test_bounds_are_set_once() {
    let mut bounds = Bounds::new();
    assert_eq!(bounds.max_y(), None);

    let edge = bounds.narrow(IVec2::new(0, 4), Orientation::N);
    assert_eq!(edge, BoundEdge::MaxY);
    assert_eq!(bounds.max_y(), Some(4));

    bounds.set(BoundEdge::MaxY, 7);
    assert_eq!(bounds.max_y(), Some(4), "a known edge keeps its first value");

    assert!(bounds.blocks(IVec2::new(9, 4), Orientation::N));
    assert!(!bounds.blocks(IVec2::new(9, 3), Orientation::N));
    assert!(!bounds.blocks(IVec2::new(9, 4), Orientation::E), "max x is still unknown");
    assert!(bounds.touches(BoundEdge::MaxY, IVec2::new(-2, 4)));
}

#[test]
fn test_node_arena_links() {
    let mut nodes = NodeArena::new();
    let root = nodes.detached(IVec2::ZERO);
    let child = nodes.child(root, Orientation::E);
    let grandchild = nodes.child(child, Orientation::N);

    assert_eq!(nodes.len(), 3);
    assert_eq!(nodes.cell(grandchild), IVec2::new(1, 1));
    assert_eq!(nodes.parent_cell(grandchild), Some(IVec2::new(1, 0)));
    assert_eq!(nodes.parent(root), None);
    assert_eq!(nodes.parent_or_self(root), root);
    assert_eq!(nodes.parent_or_self(child), root);
}
