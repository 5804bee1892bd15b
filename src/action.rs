//! Motion primitives and the counters that accumulate them during a walk.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A unit motion of a rofibot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Action {
    /// Rotate the free half's alpha or beta by 90 degrees.
    RotateFreeAB90,
    /// Rotate the docked half's alpha or beta by 90 degrees, swinging the rest of the robot with it.
    RotateFixedAB90,
    RotateFreeAB180,
    RotateFixedAB180,
    /// Rotate gamma, carrying the second module.
    RotateGamma90,
    RotateGamma180,
    AddEdge,
    RemoveEdge,
}

impl Action {
    pub const ALL: [Action; 8] = [
        Action::RotateFreeAB90,
        Action::RotateFixedAB90,
        Action::RotateFreeAB180,
        Action::RotateFixedAB180,
        Action::RotateGamma90,
        Action::RotateGamma180,
        Action::AddEdge,
        Action::RemoveEdge,
    ];

    /// Nominal energy consumption in joules.
    pub fn energy(self) -> f64 {
        match self {
            Action::RotateFreeAB90 => 5.5,
            Action::RotateFixedAB90 => 11.0,
            Action::RotateFreeAB180 => 10.0,
            Action::RotateFixedAB180 => 18.0,
            Action::RotateGamma90 => 20.0,
            Action::RotateGamma180 => 30.0,
            Action::AddEdge | Action::RemoveEdge => 2.0,
        }
    }

    /// Spread of [`energy`](Self::energy), in joules.
    pub fn uncertainty(self) -> f64 {
        match self {
            Action::RotateFreeAB90 | Action::RotateFreeAB180 => 1.0,
            Action::RotateFixedAB90 | Action::RotateFixedAB180 => 2.0,
            Action::RotateGamma90 | Action::RotateGamma180 => 3.0,
            Action::AddEdge | Action::RemoveEdge => 0.6,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Action::RotateFreeAB90 => "ROTATE_FREE_A_B_90",
            Action::RotateFixedAB90 => "ROTATE_FIXED_A_B_90",
            Action::RotateFreeAB180 => "ROTATE_FREE_A_B_180",
            Action::RotateFixedAB180 => "ROTATE_FIXED_A_B_180",
            Action::RotateGamma90 => "ROTATE_GAMMA_90",
            Action::RotateGamma180 => "ROTATE_GAMMA_180",
            Action::AddEdge => "ADD_EDGE",
            Action::RemoveEdge => "REMOVE_EDGE",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Count of each [`Action`] kind. Counts only ever grow.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionCounts {
    counts: [u64; 8],
}

impl ActionCounts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(&mut self, action: Action) {
        self.counts[action.index()] += 1;
    }

    pub fn get(&self, action: Action) -> u64 {
        self.counts[action.index()]
    }

    /// Every action kind with its count, in [`Action::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = (Action, u64)> + '_ {
        Action::ALL.into_iter().map(|a| (a, self.get(a)))
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Summed energy and its uncertainty.
    pub fn total_energy(&self) -> (f64, f64) {
        self.iter().fold((0.0, 0.0), |(cost, spread), (action, n)| {
            (cost + action.energy() * n as f64, spread + action.uncertainty() * n as f64)
        })
    }
}

/// The two counters kept by a rofibot: every motion, and the stricter
/// sequential decomposition used to bound execution time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionStats {
    pub all: ActionCounts,
    pub non_concurrent: ActionCounts,
}

impl ActionStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_all(&mut self, action: Action) {
        self.all.increment(action);
    }

    pub fn record_non_concurrent(&mut self, action: Action) {
        self.non_concurrent.increment(action);
    }

    /// Counts `action` on both counters.
    pub fn record(&mut self, action: Action) {
        self.record_all(action);
        self.record_non_concurrent(action);
    }
}
