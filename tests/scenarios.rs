// tests/scenarios.rs
use glam::IVec2;
use rofibot_walk::{
    Action, ActionStats, Algorithm, BacktrackStrategy, Configuration, DfsOrdering, DfsStrategy, Discard, Morphology,
    Orientation, Pad, PlanError, Planner, PlannerConfig, StartPose, StatisticsSink, TextStatisticsWriter,
    TextTraceWriter, WalkOutcome,
};
use std::collections::HashSet;

fn setup(morphology: Morphology, algorithm: Algorithm) -> Planner {
    Planner::new(PlannerConfig {
        morphology,
        algorithm,
        ..Default::default()
    })
}

/// Pad cells in the order the robot first reached them.
fn first_docks(outcome: &WalkOutcome) -> Vec<IVec2> {
    let mut order = Vec::new();
    for config in &outcome.trace {
        for cell in config.pad_cells() {
            if !order.contains(&cell) {
                order.push(cell);
            }
        }
    }
    order
}

#[test]
fn test_direct_walks_strip_in_order() {
    let pad = Pad::rectangle(1, 5).unwrap();
    let outcome = setup(Morphology::Single, Algorithm::Direct).plan(&pad).unwrap();

    let expected: Vec<IVec2> = (0..5).map(|y| IVec2::new(0, y)).collect();
    assert_eq!(first_docks(&outcome), expected, "the column is climbed one cell at a time");

    let stats = &outcome.stats.all;
    assert!(stats.get(Action::AddEdge) >= 4, "a single module must re-dock to advance");
    assert_eq!(stats.get(Action::AddEdge), stats.get(Action::RemoveEdge));
    assert_eq!(stats.get(Action::RotateGamma90), 0, "a single module never turns its gamma joint");
}

#[test]
fn test_double_dfs_covers_square() {
    let pad = Pad::rectangle(2, 2).unwrap();
    let outcome = setup(Morphology::Double, Algorithm::Dfs(DfsStrategy::default()))
        .plan(&pad)
        .unwrap();

    let expected: HashSet<IVec2> = pad.connectable_cells().collect();
    assert_eq!(outcome.docked_cells(), expected);
    assert_eq!(first_docks(&outcome)[0], IVec2::ZERO, "the walk starts docked at the start cell");
    for action in [Action::RotateFreeAB90, Action::RotateFixedAB90] {
        assert_eq!(outcome.stats.all.get(action), 0, "the double robot steps with its gamma joints");
    }
    assert!(outcome.stats.all.get(Action::RotateGamma90) > 0);
}

#[test]
fn test_walks_avoid_holes() {
    let pad: Pad = "ooooo\nooooo\nooooo\noo.oo\nooooo\nooooo\n".parse().unwrap();
    assert!(!pad.can_connect(IVec2::new(2, 2)));

    for algorithm in [
        Algorithm::DfsLook(DfsStrategy::default()),
        Algorithm::ShortestBacktrack(BacktrackStrategy::Scan),
    ] {
        let outcome = setup(Morphology::Single, algorithm).plan(&pad).unwrap();
        let docked = outcome.docked_cells();
        assert_eq!(docked.len(), 29, "{algorithm} must reach every cell but the hole");
        assert!(!docked.contains(&IVec2::new(2, 2)), "{algorithm} docked onto the hole");
    }
}

#[test]
fn test_disconnected_pad_is_rejected() {
    let pad: Pad = "oo.oo\n".parse().unwrap();
    let mut traces: Vec<Configuration> = Vec::new();
    let mut stats: Vec<ActionStats> = Vec::new();

    let err = setup(Morphology::Single, Algorithm::default())
        .plan_into(&pad, &mut traces, &mut stats)
        .unwrap_err();
    assert!(matches!(err, PlanError::PadNotConnected), "unexpected error {err:?}");
    assert!(traces.is_empty(), "a failed walk writes nothing");
    assert!(stats.is_empty());
}

#[test]
fn test_sweeps_require_rectangle() {
    let ring: Pad = "ooo\no.o\nooo\n".parse().unwrap();
    for algorithm in Algorithm::all_defaults() {
        let result = setup(Morphology::Double, algorithm).plan(&ring);
        if algorithm.requires_rectangle() {
            match result {
                Err(PlanError::RequiresRectangle { algorithm: name }) => assert_eq!(name, algorithm.name()),
                other => panic!("{algorithm} accepted a ring: {other:?}"),
            }
        } else {
            assert!(result.is_ok(), "{algorithm} should walk a ring");
        }
    }
}

#[test]
fn test_start_must_be_connectable() {
    let ring: Pad = "ooo\no.o\nooo\n".parse().unwrap();
    let planner = Planner::new(PlannerConfig {
        start: StartPose::new(1, 1, Orientation::E),
        ..Default::default()
    });
    assert!(matches!(planner.plan(&ring), Err(PlanError::StartNotOnPad { x: 1, y: 1 })));

    let outside = Planner::new(PlannerConfig {
        start: StartPose::new(7, 0, Orientation::N),
        ..Default::default()
    });
    assert!(matches!(outside.validate(&ring), Err(PlanError::StartNotOnPad { x: 7, y: 0 })));
}

#[test]
fn test_start_pose_is_honoured() {
    let pad = Pad::rectangle(4, 3).unwrap();
    let planner = Planner::new(PlannerConfig {
        start: StartPose::new(2, 1, Orientation::W),
        algorithm: Algorithm::ShortestBacktrackLook(BacktrackStrategy::Random),
        ..Default::default()
    });
    let outcome = planner.plan(&pad).unwrap();
    assert_eq!(first_docks(&outcome)[0], IVec2::new(2, 1));
    assert_eq!(outcome.docked_cells().len(), 12);
}

#[test]
fn test_same_seed_same_walk() {
    let pad = Pad::rectangle(5, 4).unwrap();
    let config = PlannerConfig {
        morphology: Morphology::Double,
        algorithm: Algorithm::Dfs(DfsStrategy::new(DfsOrdering::Random, true)),
        seed: 42,
        ..Default::default()
    };
    let first = Planner::new(config.clone()).plan(&pad).unwrap();
    let second = Planner::new(config).plan(&pad).unwrap();
    assert_eq!(first, second, "a seeded walk is reproducible");
}

#[test]
fn test_trace_text_format() {
    let pad = Pad::rectangle(2, 2).unwrap();
    let planner = Planner::new(PlannerConfig {
        morphology: Morphology::Double,
        algorithm: Algorithm::Direct,
        ..Default::default()
    });
    let mut writer = TextTraceWriter::new(Vec::new());
    let outcome = planner.plan_into(&pad, &mut writer, &mut Discard).unwrap();
    let text = String::from_utf8(writer.into_inner()).unwrap();

    let blocks = text.lines().filter(|line| *line == "C").count();
    assert_eq!(blocks, outcome.trace.len(), "one block per configuration");

    let pad_text = pad.configuration().unwrap().to_string();
    let first = format!("C\n{pad_text}\n{}\n\n", outcome.trace[0]);
    assert!(text.starts_with(&first), "unexpected trace text:\n{text}");
    assert!(text.contains("M 20001 "), "robot modules are listed");
    assert!(text.ends_with("\n\n"));
}

#[test]
fn test_statistics_text_format() {
    let mut stats = ActionStats::new();
    stats.record(Action::RotateFixedAB90);
    stats.record(Action::RotateFixedAB90);
    stats.record_all(Action::AddEdge);

    let mut writer = TextStatisticsWriter::new(Vec::new());
    writer.write_statistics(&stats).unwrap();
    let text = String::from_utf8(writer.into_inner()).unwrap();

    let expected = "All actions:\n\
        ROTATE_FREE_A_B_90: 0\n\
        ROTATE_FIXED_A_B_90: 2\n\
        ROTATE_FREE_A_B_180: 0\n\
        ROTATE_FIXED_A_B_180: 0\n\
        ROTATE_GAMMA_90: 0\n\
        ROTATE_GAMMA_180: 0\n\
        ADD_EDGE: 1\n\
        REMOVE_EDGE: 0\n\
        Cost: 24\n\
        \n\
        Non concurent actions:\n\
        ROTATE_FREE_A_B_90: 0\n\
        ROTATE_FIXED_A_B_90: 2\n\
        ROTATE_FREE_A_B_180: 0\n\
        ROTATE_FIXED_A_B_180: 0\n\
        ROTATE_GAMMA_90: 0\n\
        ROTATE_GAMMA_180: 0\n\
        ADD_EDGE: 0\n\
        REMOVE_EDGE: 0\n";
    assert_eq!(text, expected);
}

#[test]
fn test_outcome_serde_roundtrip() {
    let pad = Pad::rectangle(2, 2).unwrap();
    let config = PlannerConfig {
        morphology: Morphology::Double,
        algorithm: Algorithm::ZigZag,
        think_one_step_further: false,
        ..Default::default()
    };
    let json = serde_json::to_string(&config).unwrap();
    let restored: PlannerConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, config);

    let outcome = Planner::new(config).plan(&pad).unwrap();
    let json = serde_json::to_string(&outcome).unwrap();
    let restored: WalkOutcome = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, outcome);
}

#[test]
fn test_algorithms_by_name() {
    assert_eq!(Algorithm::from_names("direct", None).unwrap(), Algorithm::Direct);
    assert_eq!(Algorithm::from_names("DirectZigZag", None).unwrap(), Algorithm::DirectZigZag);
    assert_eq!(
        Algorithm::from_names("dfsLook", Some("random-rofibot-best-early")).unwrap(),
        Algorithm::DfsLook(DfsStrategy::new(DfsOrdering::RofibotBest, true))
    );
    assert_eq!(
        Algorithm::from_names("shortestBacktrackLook", None).unwrap(),
        Algorithm::ShortestBacktrackLook(BacktrackStrategy::Scan)
    );
    assert_eq!(
        Algorithm::from_names("dfswithbounds", Some("strict-early")).unwrap().to_string(),
        "dfsWithBounds (strict-early)"
    );

    assert!(matches!(Algorithm::from_names("spiral", None), Err(PlanError::UnknownAlgorithm(_))));
    assert!(matches!(
        Algorithm::from_names("zigzag", Some("strict")),
        Err(PlanError::UnknownStrategy { algorithm: "zigzag", .. })
    ));
    assert!(matches!(
        Algorithm::from_names("shortestBacktrack", Some("strict")),
        Err(PlanError::UnknownStrategy { .. })
    ));

    for algorithm in Algorithm::all_defaults() {
        assert_eq!(Algorithm::from_names(algorithm.name(), None).unwrap(), algorithm);
    }
}
