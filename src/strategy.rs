//! Neighbour-ordering policies of the search walks.

use crate::error::PlanError;
use crate::geometry::Orientation;
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How the DFS family orders candidate directions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DfsOrdering {
    /// Fixed N, E, S, W priority.
    #[default]
    Strict,
    /// Shuffled.
    Random,
    /// Shuffled, with the robot's most expensive direction moved last.
    RofibotBest,
}

/// A DFS ordering plus whether the walk stops as soon as nothing on the
/// stack has an unexplored direction left.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DfsStrategy {
    pub ordering: DfsOrdering,
    pub early: bool,
}

impl DfsStrategy {
    pub const fn new(ordering: DfsOrdering, early: bool) -> Self {
        Self { ordering, early }
    }

    pub fn shuffles(&self) -> bool {
        self.ordering != DfsOrdering::Strict
    }

    pub fn prefers_cheap_steps(&self) -> bool {
        self.ordering == DfsOrdering::RofibotBest
    }

    /// Every combination, for exhaustive tests and tooling.
    pub const ALL: [DfsStrategy; 6] = [
        DfsStrategy::new(DfsOrdering::Strict, false),
        DfsStrategy::new(DfsOrdering::Random, false),
        DfsStrategy::new(DfsOrdering::RofibotBest, false),
        DfsStrategy::new(DfsOrdering::Strict, true),
        DfsStrategy::new(DfsOrdering::Random, true),
        DfsStrategy::new(DfsOrdering::RofibotBest, true),
    ];
}

impl fmt::Display for DfsStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self.ordering {
            DfsOrdering::Strict => "strict",
            DfsOrdering::Random => "random",
            DfsOrdering::RofibotBest => "rofibot-best",
        })?;
        if self.early {
            f.write_str("-early")?;
        }
        Ok(())
    }
}

impl FromStr for DfsStrategy {
    type Err = PlanError;

    fn from_str(s: &str) -> Result<Self, PlanError> {
        let lower = s.to_ascii_lowercase();
        let (base, early) = match lower.strip_suffix("-early") {
            Some(base) => (base, true),
            None => (lower.as_str(), false),
        };
        let ordering = match base {
            "strict" => DfsOrdering::Strict,
            "random" => DfsOrdering::Random,
            "rofibot-best" | "random-rofibot-best" => DfsOrdering::RofibotBest,
            _ => {
                return Err(PlanError::UnknownStrategy {
                    algorithm: "dfs",
                    strategy: s.to_string(),
                });
            }
        };
        Ok(Self { ordering, early })
    }
}

/// How ShortestBacktrack orders candidate directions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BacktrackStrategy {
    /// Row-parity sweep: south first, then east on even rows and west on odd ones.
    #[default]
    Scan,
    Random,
    /// Shuffled, with the robot's most expensive direction moved last.
    RandomRofibotBest,
}

impl BacktrackStrategy {
    pub const ALL: [BacktrackStrategy; 3] = [
        BacktrackStrategy::Scan,
        BacktrackStrategy::Random,
        BacktrackStrategy::RandomRofibotBest,
    ];
}

impl fmt::Display for BacktrackStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BacktrackStrategy::Scan => "scan",
            BacktrackStrategy::Random => "random",
            BacktrackStrategy::RandomRofibotBest => "random-rofibot-best",
        })
    }
}

impl FromStr for BacktrackStrategy {
    type Err = PlanError;

    fn from_str(s: &str) -> Result<Self, PlanError> {
        match s.to_ascii_lowercase().as_str() {
            "scan" => Ok(BacktrackStrategy::Scan),
            "random" => Ok(BacktrackStrategy::Random),
            "random-rofibot-best" | "rofibot-best" => Ok(BacktrackStrategy::RandomRofibotBest),
            _ => Err(PlanError::UnknownStrategy {
                algorithm: "shortestBacktrack",
                strategy: s.to_string(),
            }),
        }
    }
}

/// Moves `direction`, if present, to the end of `order`.
pub fn move_to_back(order: &mut Vec<Orientation>, direction: Orientation) {
    if let Some(i) = order.iter().position(|&d| d == direction) {
        let d = order.remove(i);
        order.push(d);
    }
}

/// Moves `direction`, if present, to the front of `order`.
pub fn move_to_front(order: &mut Vec<Orientation>, direction: Orientation) {
    if let Some(i) = order.iter().position(|&d| d == direction) {
        let d = order.remove(i);
        order.insert(0, d);
    }
}

pub fn shuffle<R: Rng + ?Sized>(order: &mut [Orientation], rng: &mut R) {
    order.shuffle(rng);
}
