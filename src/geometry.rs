//! Orientation, side, dock and joint-angle vocabulary plus the docking tables of a
//! universal module.

use crate::error::{PlanError, Result};
use glam::IVec2;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A cell coordinate on the pad grid.
pub type Cell = IVec2;

/// Cardinal direction on the pad.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    N,
    E,
    S,
    W,
}

impl Orientation {
    /// All directions in the strict priority order used by the walks.
    pub const ALL: [Orientation; 4] = [Orientation::N, Orientation::E, Orientation::S, Orientation::W];

    /// Direction after a quarter turn counter-clockwise.
    pub fn left(self) -> Self {
        match self {
            Orientation::N => Orientation::W,
            Orientation::W => Orientation::S,
            Orientation::S => Orientation::E,
            Orientation::E => Orientation::N,
        }
    }

    /// Direction after a quarter turn clockwise.
    pub fn right(self) -> Self {
        match self {
            Orientation::N => Orientation::E,
            Orientation::E => Orientation::S,
            Orientation::S => Orientation::W,
            Orientation::W => Orientation::N,
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Orientation::N => Orientation::S,
            Orientation::S => Orientation::N,
            Orientation::E => Orientation::W,
            Orientation::W => Orientation::E,
        }
    }

    /// Rotates counter-clockwise by `angle`.
    pub fn turned(self, angle: Degree) -> Self {
        match angle {
            Degree::Zero => self,
            Degree::Ninety => self.left(),
            Degree::OneEighty => self.opposite(),
            Degree::MinusNinety => self.right(),
        }
    }

    /// Unit step on the grid.
    pub fn step(self) -> IVec2 {
        match self {
            Orientation::N => IVec2::Y,
            Orientation::E => IVec2::X,
            Orientation::S => IVec2::NEG_Y,
            Orientation::W => IVec2::NEG_X,
        }
    }

    /// Direction from `from` to an edge-adjacent `to`, `None` when the cells are not neighbours.
    pub fn between(from: Cell, to: Cell) -> Option<Self> {
        Self::ALL.into_iter().find(|d| from + d.step() == to)
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Orientation::N => "N",
            Orientation::E => "E",
            Orientation::S => "S",
            Orientation::W => "W",
        };
        f.write_str(s)
    }
}

/// One of the two halves of a universal module.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    A,
    B,
}

impl Side {
    pub fn other(self) -> Self {
        match self {
            Side::A => Side::B,
            Side::B => Side::A,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Side::A => "A",
            Side::B => "B",
        })
    }
}

/// Connector of a module half.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dock {
    PlusX,
    MinusX,
    MinusZ,
}

impl fmt::Display for Dock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Dock::PlusX => "+X",
            Dock::MinusX => "-X",
            Dock::MinusZ => "-Z",
        })
    }
}

/// The only angles a joint may hold.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Degree {
    #[default]
    Zero,
    Ninety,
    MinusNinety,
    OneEighty,
}

impl Degree {
    pub fn value(self) -> i32 {
        match self {
            Degree::Zero => 0,
            Degree::Ninety => 90,
            Degree::MinusNinety => -90,
            Degree::OneEighty => 180,
        }
    }

    /// Counter-clockwise quarter turns in `0..4`.
    pub fn quarter_turns(self) -> i32 {
        match self {
            Degree::Zero => 0,
            Degree::Ninety => 1,
            Degree::OneEighty => 2,
            Degree::MinusNinety => 3,
        }
    }

    /// Normalizes any number of quarter turns into a joint angle.
    pub fn from_quarter_turns(turns: i32) -> Self {
        match turns.rem_euclid(4) {
            0 => Degree::Zero,
            1 => Degree::Ninety,
            2 => Degree::OneEighty,
            _ => Degree::MinusNinety,
        }
    }

    pub fn negated(self) -> Self {
        match self {
            Degree::Ninety => Degree::MinusNinety,
            Degree::MinusNinety => Degree::Ninety,
            other => other,
        }
    }

    /// Size of the shortest rotation between two angles: 0, 90 or 180.
    pub fn distance(self, other: Degree) -> u32 {
        match (self.quarter_turns() - other.quarter_turns()).rem_euclid(4) {
            0 => 0,
            2 => 180,
            _ => 90,
        }
    }
}

impl fmt::Display for Degree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

/// Free side, dock and orientation a single universal module would dock with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DockingPose {
    pub side: Side,
    pub dock: Dock,
    pub orientation: Orientation,
}

/// Computes how the free half of a universal module meets the pad.
///
/// `fixed_side` is docked through `fixed_dock` with `fixed_orientation`. The
/// tables are written from side A; side B swaps the roles of alpha and beta.
pub fn single_module_new_edge(
    fixed_side: Side,
    fixed_dock: Dock,
    fixed_orientation: Orientation,
    alpha: Degree,
    beta: Degree,
    gamma: Degree,
) -> Result<DockingPose> {
    let (near, far) = match fixed_side {
        Side::A => (alpha, beta),
        Side::B => (beta, alpha),
    };
    let unsupported = || PlanError::UnsupportedGeometry {
        side: fixed_side,
        dock: fixed_dock,
        alpha,
        beta,
        gamma,
    };

    let dock = free_dock(fixed_dock, near, far, gamma).ok_or_else(unsupported)?;
    let orientation = if dock == Dock::MinusZ || fixed_dock == Dock::MinusZ {
        z_orientation(fixed_orientation, near, far, gamma).ok_or_else(unsupported)?
    } else {
        // Only quarter turns of the joints twist the connector.
        let quarter = |angle: Degree| match angle {
            Degree::Ninety | Degree::MinusNinety => angle,
            _ => Degree::Zero,
        };
        let mut orientation = fixed_orientation.turned(match fixed_dock {
            Dock::PlusX => quarter(near).negated(),
            _ => quarter(near),
        });
        orientation = orientation.turned(match dock {
            Dock::PlusX => quarter(far),
            _ => quarter(far).negated(),
        });
        if dock == fixed_dock {
            orientation = orientation.opposite();
        }
        orientation
    };

    Ok(DockingPose {
        side: fixed_side.other(),
        dock,
        orientation,
    })
}

fn free_dock(fixed: Dock, near: Degree, far: Degree, gamma: Degree) -> Option<Dock> {
    use Degree::*;
    match (fixed, near, gamma, far) {
        (Dock::PlusX, _, Zero, _) => Some(Dock::MinusX),
        (Dock::PlusX, _, OneEighty, _) => Some(Dock::PlusX),
        (Dock::PlusX, _, Ninety, Ninety) | (Dock::PlusX, _, MinusNinety, MinusNinety) => Some(Dock::MinusZ),
        (Dock::MinusX, _, Zero, _) => Some(Dock::PlusX),
        (Dock::MinusX, _, OneEighty, _) => Some(Dock::MinusX),
        (Dock::MinusX, _, Ninety, MinusNinety) | (Dock::MinusX, _, MinusNinety, Ninety) => Some(Dock::MinusZ),
        (Dock::MinusZ, Ninety, Ninety, _) | (Dock::MinusZ, MinusNinety, MinusNinety, _) => Some(Dock::PlusX),
        (Dock::MinusZ, Ninety, MinusNinety, _) | (Dock::MinusZ, MinusNinety, Ninety, _) => Some(Dock::MinusX),
        (Dock::MinusZ, Ninety, Zero, Ninety)
        | (Dock::MinusZ, Ninety, OneEighty, MinusNinety)
        | (Dock::MinusZ, MinusNinety, Zero, MinusNinety)
        | (Dock::MinusZ, MinusNinety, OneEighty, Ninety) => Some(Dock::MinusZ),
        _ => None,
    }
}

fn z_orientation(fixed: Orientation, near: Degree, far: Degree, gamma: Degree) -> Option<Orientation> {
    use Degree::*;
    match (near, gamma, far) {
        (Ninety, Ninety, Zero) | (MinusNinety, Ninety, Zero) => Some(fixed.right()),
        (Ninety, MinusNinety, Zero) | (MinusNinety, MinusNinety, Zero) => Some(fixed.left()),
        (Ninety, Ninety | MinusNinety, Ninety) => Some(fixed),
        (Ninety, Ninety | MinusNinety, MinusNinety) => Some(fixed.opposite()),
        (MinusNinety, Ninety | MinusNinety, Ninety) => Some(fixed.opposite()),
        (MinusNinety, Ninety | MinusNinety, MinusNinety) => Some(fixed),
        (Ninety, Zero, Ninety) | (MinusNinety, Zero, MinusNinety) => Some(fixed.opposite()),
        (Ninety, OneEighty, MinusNinety) | (MinusNinety, OneEighty, Ninety) => Some(fixed),
        _ => None,
    }
}
