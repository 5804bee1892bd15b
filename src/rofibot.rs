//! The robot abstraction shared by both morphologies, and the reconnect /
//! touch helpers every walk uses to move it.
//!
//! Robots work in the walk's relative frame. Anything that reaches the output
//! (the dock edge to the pad) is converted through the [`PadView`]'s origin.

use crate::action::{Action, ActionStats};
use crate::configuration::{Configuration, Edge, ModuleId};
use crate::double::DoubleRofibot;
use crate::error::Result;
use crate::geometry::{Cell, Dock, Orientation, Side};
use crate::pad::PadView;
use crate::single::SingleRofibot;
use log::trace;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Id of the single-module robot, and of the blue module of the double robot.
pub const FIRST_ROBOT_ID: ModuleId = 20001;
/// Id of the red module of the double robot.
pub const SECOND_ROBOT_ID: ModuleId = 20002;

/// A robot connector docked (or about to dock) onto the pad, in relative orientation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connector {
    pub id: ModuleId,
    pub side: Side,
    pub dock: Dock,
    pub orientation: Orientation,
}

impl Connector {
    pub fn new(id: ModuleId, side: Side, dock: Dock, orientation: Orientation) -> Self {
        Self {
            id,
            side,
            dock,
            orientation,
        }
    }

    /// The edge joining this connector to the pad module under `cell`.
    pub fn to_pad(&self, pad: &PadView, cell: Cell) -> Result<Edge> {
        Ok(Edge::to_pad(
            self.id,
            self.side,
            self.dock,
            pad.origin.to_absolute_orientation(self.orientation),
            pad.position_id(cell)?,
        ))
    }
}

/// Robot shape.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Morphology {
    /// One universal module.
    #[default]
    Single,
    /// Two universal modules joined by a fixed edge.
    Double,
}

impl Morphology {
    /// A fresh robot docked at the relative origin.
    pub fn build(self) -> Box<dyn Rofibot> {
        match self {
            Morphology::Single => Box::new(SingleRofibot::new(FIRST_ROBOT_ID)),
            Morphology::Double => Box::new(DoubleRofibot::new(FIRST_ROBOT_ID, SECOND_ROBOT_ID)),
        }
    }
}

impl fmt::Display for Morphology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Morphology::Single => "single",
            Morphology::Double => "double",
        })
    }
}

/// A robot that occupies two edge-adjacent cells, one docked ("fixed") and
/// one "free", and walks by swinging the free cell around the fixed one.
pub trait Rofibot {
    fn morphology(&self) -> Morphology;

    /// Relative cell of the docked part.
    fn fixed_position(&self) -> Cell;

    /// Relative cell of the undocked part.
    fn free_position(&self) -> Cell;

    /// Connector currently docked to the pad.
    fn fixed_connector(&self) -> Connector;

    /// Connector that would dock the free cell with the current joint angles.
    fn compute_new_edge(&self) -> Result<Connector>;

    /// Makes `connector` the docked one. Called only by [`reconnect`].
    fn attach(&mut self, connector: Connector);

    /// Modules and internal edges, without the dock to the pad.
    fn configuration(&self) -> Configuration;

    /// Rotates joints until the free cell is `target`, returning every
    /// intermediate snapshot.
    ///
    /// `next` lists the directions the walk expects to take from `target`;
    /// when several angles reach `target` equally cheaply, the one that also
    /// serves `next` is preferred. A target equal to the fixed cell, or not
    /// adjacent to it, emits nothing.
    fn compute_reconfig(&mut self, pad: &PadView, target: Cell, next: &[Orientation]) -> Result<Vec<Configuration>>;

    /// Direction from the fixed cell that is most expensive to step into.
    fn worst_step_direction(&self) -> Orientation;

    /// True if reaching `target` from the fixed cell requires swapping the docked side.
    fn needs_reconnection(&self, target: Cell) -> bool;

    fn stats(&self) -> &ActionStats;

    fn stats_mut(&mut self) -> &mut ActionStats;
}

/// The robot's own configuration plus its dock to the pad.
pub fn current_configuration<R: Rofibot + ?Sized>(robot: &R, pad: &PadView) -> Result<Configuration> {
    let dock = robot.fixed_connector().to_pad(pad, robot.fixed_position())?;
    Ok(robot.configuration().with_edges(&[dock]))
}

/// Docks the free cell and releases the old dock; the free cell becomes fixed.
///
/// Emits two snapshots: both docks held, then only the new one.
pub fn reconnect<R: Rofibot + ?Sized>(robot: &mut R, pad: &PadView) -> Result<Vec<Configuration>> {
    let old_edge = robot.fixed_connector().to_pad(pad, robot.fixed_position())?;
    let connector = robot.compute_new_edge()?;
    robot.attach(connector);
    robot.stats_mut().record(Action::AddEdge);
    robot.stats_mut().record(Action::RemoveEdge);

    let new_edge = connector.to_pad(pad, robot.fixed_position())?;
    trace!("reconnect to {}", pad.absolute(robot.fixed_position()));
    let base = robot.configuration();
    Ok(vec![base.with_edges(&[old_edge, new_edge]), base.with_edges(&[new_edge])])
}

/// Docks the free cell and releases it again; the robot stays where it was.
pub fn look_and_touch<R: Rofibot + ?Sized>(robot: &mut R, pad: &PadView) -> Result<Vec<Configuration>> {
    let old_edge = robot.fixed_connector().to_pad(pad, robot.fixed_position())?;
    let connector = robot.compute_new_edge()?;
    robot.stats_mut().record(Action::AddEdge);
    robot.stats_mut().record(Action::RemoveEdge);

    let new_edge = connector.to_pad(pad, robot.free_position())?;
    trace!("touch {}", pad.absolute(robot.free_position()));
    let base = robot.configuration();
    Ok(vec![base.with_edges(&[old_edge, new_edge]), base.with_edges(&[old_edge])])
}
