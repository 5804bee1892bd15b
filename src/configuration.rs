//! Output records: modules, dock edges and configuration snapshots, plus the
//! numeric ids that name pad cells.

use crate::error::{PlanError, Result};
use crate::geometry::{Degree, Dock, Orientation, Side};
use glam::IVec2;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Numeric module identifier. Pad cells and robot modules share one id space.
pub type ModuleId = u32;

/// Largest pad extent expressible with two decimal digits per axis.
pub const MAX_PAD_EXTENT: i32 = 100;

const POSITION_ID_BASE: ModuleId = 10_000;

/// Id of the pad module at `position`: 0 for the origin cell, `1xxyy` otherwise.
pub fn position_id(position: IVec2) -> Result<ModuleId> {
    if !(0..MAX_PAD_EXTENT).contains(&position.x) || !(0..MAX_PAD_EXTENT).contains(&position.y) {
        return Err(PlanError::InvalidPad(format!(
            "cell ({}, {}) has no position id",
            position.x, position.y
        )));
    }
    if position == IVec2::ZERO {
        return Ok(0);
    }
    Ok(POSITION_ID_BASE + 100 * position.x as ModuleId + position.y as ModuleId)
}

/// Inverse of [`position_id`]; `None` for robot module ids.
pub fn position_from_id(id: ModuleId) -> Option<IVec2> {
    if id == 0 {
        return Some(IVec2::ZERO);
    }
    if !is_pad_id(id) {
        return None;
    }
    let digits = (id - POSITION_ID_BASE) as i32;
    Some(IVec2::new(digits / 100, digits % 100))
}

pub fn is_pad_id(id: ModuleId) -> bool {
    id == 0 || (POSITION_ID_BASE..2 * POSITION_ID_BASE).contains(&id)
}

/// A universal module and its three joint angles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Module {
    pub id: ModuleId,
    pub alpha: Degree,
    pub beta: Degree,
    pub gamma: Degree,
}

impl Module {
    pub fn new(id: ModuleId, alpha: Degree, beta: Degree, gamma: Degree) -> Self {
        Self {
            id,
            alpha,
            beta,
            gamma,
        }
    }
}

impl fmt::Display for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "M {} {} {} {}", self.id, self.alpha, self.beta, self.gamma)
    }
}

/// A connection between two module connectors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub id_left: ModuleId,
    pub side_left: Side,
    pub dock_left: Dock,
    pub orientation: Orientation,
    pub dock_right: Dock,
    pub side_right: Side,
    pub id_right: ModuleId,
}

impl Edge {
    pub fn new(
        id_left: ModuleId,
        side_left: Side,
        dock_left: Dock,
        orientation: Orientation,
        dock_right: Dock,
        side_right: Side,
        id_right: ModuleId,
    ) -> Self {
        Self {
            id_left,
            side_left,
            dock_left,
            orientation,
            dock_right,
            side_right,
            id_right,
        }
    }

    /// Edge docking a robot connector onto the pad module `pad_id`.
    ///
    /// Pad modules always offer side B, dock -Z.
    pub fn to_pad(id: ModuleId, side: Side, dock: Dock, orientation: Orientation, pad_id: ModuleId) -> Self {
        Self::new(id, side, dock, orientation, Dock::MinusZ, Side::B, pad_id)
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "E {} {} {} {} {} {} {}",
            self.id_left,
            self.side_left,
            self.dock_left,
            self.orientation,
            self.dock_right,
            self.side_right,
            self.id_right
        )
    }
}

/// One mechanical snapshot of the robot (or the pad).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Configuration {
    pub modules: Vec<Module>,
    pub edges: Vec<Edge>,
}

impl Configuration {
    pub fn new(modules: Vec<Module>, edges: Vec<Edge>) -> Self {
        Self { modules, edges }
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty() && self.edges.is_empty()
    }

    /// Copy of `self` with `extra` edges appended.
    pub fn with_edges(&self, extra: &[Edge]) -> Self {
        let mut edges = self.edges.clone();
        edges.extend_from_slice(extra);
        Self {
            modules: self.modules.clone(),
            edges,
        }
    }

    /// Pad cells docked by a robot module in this snapshot.
    pub fn pad_cells(&self) -> impl Iterator<Item = IVec2> + '_ {
        self.edges
            .iter()
            .filter(|e| !is_pad_id(e.id_left) && is_pad_id(e.id_right))
            .filter_map(|e| position_from_id(e.id_right))
    }
}

impl fmt::Display for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for line in self
            .modules
            .iter()
            .map(|m| m as &dyn fmt::Display)
            .chain(self.edges.iter().map(|e| e as &dyn fmt::Display))
        {
            if !first {
                writeln!(f)?;
            }
            write!(f, "{}", line)?;
            first = false;
        }
        Ok(())
    }
}
