//! Error type shared by every planning operation.

use crate::geometry::{Degree, Dock, Orientation, Side};
use glam::IVec2;
use thiserror::Error;

/// Fatal planning failures.
///
/// Probing a cell that turns out not to be connectable is *not* an error; it is
/// how walks discover the pad. Everything here aborts the walk and no trace is
/// handed to the sinks.
#[derive(Error, Debug)]
pub enum PlanError {
    #[error("pad is not connected")]
    PadNotConnected,

    #[error("algorithm {algorithm} can walk only a rectangle pad without holes")]
    RequiresRectangle { algorithm: &'static str },

    #[error("start cell ({x}, {y}) is not connectable")]
    StartNotOnPad { x: i32, y: i32 },

    #[error("invalid pad: {0}")]
    InvalidPad(String),

    #[error(
        "no way to reach {target} when side {fixed_side} is fixed at {fixed_position} with orientation {fixed_orientation}"
    )]
    Unreachable {
        target: IVec2,
        fixed_side: Side,
        fixed_position: IVec2,
        fixed_orientation: Orientation,
    },

    #[error(
        "no docking geometry for side {side} dock {dock} with alpha {alpha}, beta {beta}, gamma {gamma}"
    )]
    UnsupportedGeometry {
        side: Side,
        dock: Dock,
        alpha: Degree,
        beta: Degree,
        gamma: Degree,
    },

    #[error("unknown algorithm `{0}`")]
    UnknownAlgorithm(String),

    #[error("strategy `{strategy}` is not available for algorithm {algorithm}")]
    UnknownStrategy {
        algorithm: &'static str,
        strategy: String,
    },

    #[error("output error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PlanError>;
