//! Entry point: validates a pad, runs one coverage walk and hands the result
//! to the sinks.
//!
//! ```no_run
//! use rofibot_walk::{Algorithm, Discard, Pad, Planner, PlannerConfig, TextTraceWriter};
//!
//! let pad: Pad = "ooo\no.o\nooo\n".parse()?;
//! let planner = Planner::new(PlannerConfig {
//!     algorithm: Algorithm::from_names("dfsLook", Some("strict"))?,
//!     ..Default::default()
//! });
//! let mut trace = TextTraceWriter::new(std::io::stdout());
//! planner.plan_into(&pad, &mut trace, &mut Discard)?;
//! # Ok::<(), rofibot_walk::PlanError>(())
//! ```

use crate::action::ActionStats;
use crate::backtrack::shortest_backtrack;
use crate::configuration::Configuration;
use crate::dfs::{DfsMode, dfs};
use crate::error::{PlanError, Result};
use crate::geometry::Orientation;
use crate::grid::Origin;
use crate::pad::{Pad, PadView};
use crate::rofibot::Morphology;
use crate::sink::{StatisticsSink, TraceSink};
use crate::strategy::{BacktrackStrategy, DfsStrategy};
use crate::sweep;
use crate::walk::Walk;
use glam::IVec2;
use log::info;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// A coverage algorithm together with its neighbour-ordering strategy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Algorithm {
    /// Column sweep from the south-west corner; rectangles only.
    Direct,
    /// Diagonal sweep from the south-west corner; rectangles only.
    ZigZag,
    /// Two-column bands walked in a zigzag; rectangles only.
    DirectZigZag,
    Dfs(DfsStrategy),
    /// DFS that stops probing past discovered pad edges; rectangles only.
    DfsWithBounds(DfsStrategy),
    /// DFS that touches neighbours before descending.
    DfsLook(DfsStrategy),
    /// Both of the above; rectangles only.
    DfsLookWithBounds(DfsStrategy),
    ShortestBacktrack(BacktrackStrategy),
    ShortestBacktrackLook(BacktrackStrategy),
}

impl Default for Algorithm {
    fn default() -> Self {
        Algorithm::Dfs(DfsStrategy::default())
    }
}

impl Algorithm {
    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::Direct => "direct",
            Algorithm::ZigZag => "zigzag",
            Algorithm::DirectZigZag => "directZigzag",
            Algorithm::Dfs(_) => "dfs",
            Algorithm::DfsWithBounds(_) => "dfsWithBounds",
            Algorithm::DfsLook(_) => "dfsLook",
            Algorithm::DfsLookWithBounds(_) => "dfsLookWithBounds",
            Algorithm::ShortestBacktrack(_) => "shortestBacktrack",
            Algorithm::ShortestBacktrackLook(_) => "shortestBacktrackLook",
        }
    }

    /// Algorithms that rely on the pad having no holes.
    pub fn requires_rectangle(&self) -> bool {
        matches!(
            self,
            Algorithm::Direct
                | Algorithm::ZigZag
                | Algorithm::DirectZigZag
                | Algorithm::DfsWithBounds(_)
                | Algorithm::DfsLookWithBounds(_)
        )
    }

    /// Resolves an algorithm and optional strategy by name, case-insensitively.
    /// A missing strategy picks the family default; the sweeps take none.
    pub fn from_names(name: &str, strategy: Option<&str>) -> Result<Self> {
        let depth_first = |wrap: fn(DfsStrategy) -> Algorithm| -> Result<Algorithm> {
            let parsed = strategy.map(str::parse::<DfsStrategy>).transpose()?;
            Ok(wrap(parsed.unwrap_or_default()))
        };
        let backtrack = |wrap: fn(BacktrackStrategy) -> Algorithm| -> Result<Algorithm> {
            let parsed = strategy.map(str::parse::<BacktrackStrategy>).transpose()?;
            Ok(wrap(parsed.unwrap_or_default()))
        };
        let sweep = |algorithm: Algorithm| -> Result<Algorithm> {
            match strategy {
                Some(s) => Err(PlanError::UnknownStrategy {
                    algorithm: algorithm.name(),
                    strategy: s.to_string(),
                }),
                None => Ok(algorithm),
            }
        };

        match name.to_ascii_lowercase().as_str() {
            "direct" => sweep(Algorithm::Direct),
            "zigzag" => sweep(Algorithm::ZigZag),
            "directzigzag" => sweep(Algorithm::DirectZigZag),
            "dfs" => depth_first(Algorithm::Dfs),
            "dfswithbounds" => depth_first(Algorithm::DfsWithBounds),
            "dfslook" => depth_first(Algorithm::DfsLook),
            "dfslookwithbounds" => depth_first(Algorithm::DfsLookWithBounds),
            "shortestbacktrack" => backtrack(Algorithm::ShortestBacktrack),
            "shortestbacktracklook" => backtrack(Algorithm::ShortestBacktrackLook),
            _ => Err(PlanError::UnknownAlgorithm(name.to_string())),
        }
    }

    /// Every algorithm with its default strategy.
    pub fn all_defaults() -> [Algorithm; 9] {
        [
            Algorithm::Direct,
            Algorithm::ZigZag,
            Algorithm::DirectZigZag,
            Algorithm::Dfs(DfsStrategy::default()),
            Algorithm::DfsWithBounds(DfsStrategy::default()),
            Algorithm::DfsLook(DfsStrategy::default()),
            Algorithm::DfsLookWithBounds(DfsStrategy::default()),
            Algorithm::ShortestBacktrack(BacktrackStrategy::default()),
            Algorithm::ShortestBacktrackLook(BacktrackStrategy::default()),
        ]
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Algorithm::Dfs(s)
            | Algorithm::DfsWithBounds(s)
            | Algorithm::DfsLook(s)
            | Algorithm::DfsLookWithBounds(s) => write!(f, "{} ({})", self.name(), s),
            Algorithm::ShortestBacktrack(s) | Algorithm::ShortestBacktrackLook(s) => {
                write!(f, "{} ({})", self.name(), s)
            }
            _ => f.write_str(self.name()),
        }
    }
}

/// Absolute start cell of the robot and the heading its relative frame is anchored to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartPose {
    pub x: i32,
    pub y: i32,
    pub orientation: Orientation,
}

impl StartPose {
    pub fn new(x: i32, y: i32, orientation: Orientation) -> Self {
        Self { x, y, orientation }
    }

    pub fn origin(&self) -> Origin {
        Origin::new(self.x, self.y, self.orientation)
    }
}

impl Default for StartPose {
    fn default() -> Self {
        Self::new(0, 0, Orientation::N)
    }
}

/// Everything a walk needs besides the pad.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannerConfig {
    pub morphology: Morphology,
    pub start: StartPose,
    pub algorithm: Algorithm,
    /// Let the robot pick joint angles that also suit the following move.
    pub think_one_step_further: bool,
    /// Seed of the walk's RNG; only the shuffling strategies consume it.
    pub seed: u64,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            morphology: Morphology::Single,
            start: StartPose::default(),
            algorithm: Algorithm::default(),
            think_one_step_further: true,
            seed: 0,
        }
    }
}

/// A finished walk: every emitted configuration and the robot's action tallies.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WalkOutcome {
    pub trace: Vec<Configuration>,
    pub stats: ActionStats,
}

impl WalkOutcome {
    /// Absolute pad cells the robot was ever docked to or touched.
    pub fn docked_cells(&self) -> HashSet<IVec2> {
        self.trace.iter().flat_map(Configuration::pad_cells).collect()
    }
}

pub struct Planner {
    config: PlannerConfig,
}

impl Planner {
    pub fn new(config: PlannerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Checks the pad against the configuration, in the order a caller would
    /// want to hear about problems.
    pub fn validate(&self, pad: &Pad) -> Result<()> {
        if !pad.is_connected() {
            return Err(PlanError::PadNotConnected);
        }
        if self.config.algorithm.requires_rectangle() && !pad.is_rectangle() {
            return Err(PlanError::RequiresRectangle {
                algorithm: self.config.algorithm.name(),
            });
        }
        let StartPose { x, y, .. } = self.config.start;
        if !pad.can_connect(IVec2::new(x, y)) {
            return Err(PlanError::StartNotOnPad { x, y });
        }
        Ok(())
    }

    /// Runs the configured walk over `pad`.
    ///
    /// Either the whole walk succeeds or an error is returned; nothing partial
    /// is kept.
    pub fn plan(&self, pad: &Pad) -> Result<WalkOutcome> {
        self.validate(pad)?;
        let config = &self.config;
        info!(
            "walking {}x{} pad with {} rofibot using {} from {:?}",
            pad.width(),
            pad.height(),
            config.morphology,
            config.algorithm,
            config.start
        );

        let view = PadView::new(pad, config.start.origin());
        let mut walk = Walk::new(view, config.morphology.build(), config.think_one_step_further, config.seed);
        match config.algorithm {
            Algorithm::Direct => sweep::direct(&mut walk)?,
            Algorithm::ZigZag => sweep::zigzag(&mut walk)?,
            Algorithm::DirectZigZag => sweep::direct_zigzag(&mut walk)?,
            Algorithm::Dfs(strategy) => dfs(&mut walk, strategy, DfsMode::default())?,
            Algorithm::DfsWithBounds(strategy) => dfs(
                &mut walk,
                strategy,
                DfsMode {
                    use_bounds: true,
                    look: false,
                },
            )?,
            Algorithm::DfsLook(strategy) => dfs(
                &mut walk,
                strategy,
                DfsMode {
                    use_bounds: false,
                    look: true,
                },
            )?,
            Algorithm::DfsLookWithBounds(strategy) => dfs(
                &mut walk,
                strategy,
                DfsMode {
                    use_bounds: true,
                    look: true,
                },
            )?,
            Algorithm::ShortestBacktrack(strategy) => shortest_backtrack(&mut walk, strategy, false)?,
            Algorithm::ShortestBacktrackLook(strategy) => shortest_backtrack(&mut walk, strategy, true)?,
        }

        let outcome = WalkOutcome {
            stats: *walk.robot.stats(),
            trace: walk.trace,
        };
        info!(
            "walk finished: {} configurations, {} actions ({} non-concurrent)",
            outcome.trace.len(),
            outcome.stats.all.total(),
            outcome.stats.non_concurrent.total()
        );
        Ok(outcome)
    }

    /// Runs [`plan`](Self::plan) and, only if it succeeds, writes the trace
    /// and the statistics to the sinks.
    pub fn plan_into(
        &self,
        pad: &Pad,
        traces: &mut dyn TraceSink,
        statistics: &mut dyn StatisticsSink,
    ) -> Result<WalkOutcome> {
        let pad_config = pad.configuration()?;
        let outcome = self.plan(pad)?;
        traces.write_trace(&pad_config, &outcome.trace)?;
        statistics.write_statistics(&outcome.stats)?;
        Ok(outcome)
    }
}
