//! State shared by every coverage algorithm during one walk.

use crate::configuration::Configuration;
use crate::error::Result;
use crate::geometry::{Cell, Orientation};
use crate::grid::{Bounds, NodeArena};
use crate::pad::PadView;
use crate::rofibot::{self, Rofibot};
use rand::SeedableRng;
use rand::rngs::StdRng;

/// One walk in progress: the robot, what it has learned about the pad and
/// the trace emitted so far.
pub struct Walk<'a> {
    pub pad: PadView<'a>,
    pub robot: Box<dyn Rofibot>,
    /// Pass lookahead hints to the robot when reconfiguring.
    pub think: bool,
    pub bounds: Bounds,
    pub nodes: NodeArena,
    pub trace: Vec<Configuration>,
    pub rng: StdRng,
}

impl<'a> Walk<'a> {
    pub fn new(pad: PadView<'a>, robot: Box<dyn Rofibot>, think: bool, seed: u64) -> Self {
        Self {
            pad,
            robot,
            think,
            bounds: Bounds::new(),
            nodes: NodeArena::new(),
            trace: Vec::new(),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn fixed(&self) -> Cell {
        self.robot.fixed_position()
    }

    pub fn free(&self) -> Cell {
        self.robot.free_position()
    }

    /// Whether the free cell can be docked.
    pub fn free_on_pad(&self) -> bool {
        self.pad.can_connect(self.free())
    }

    /// Records the current snapshot without moving.
    pub fn emit_current(&mut self) -> Result<()> {
        let config = rofibot::current_configuration(&*self.robot, &self.pad)?;
        self.trace.push(config);
        Ok(())
    }

    /// Swings the free cell onto `target`, hinting `next` when thinking ahead.
    pub fn reconfigure(&mut self, target: Cell, next: &[Orientation]) -> Result<()> {
        let next = if self.think { next } else { &[] };
        self.reconfigure_hinted(target, next)
    }

    pub fn reconfigure_blind(&mut self, target: Cell) -> Result<()> {
        self.reconfigure_hinted(target, &[])
    }

    /// Like [`reconfigure`](Self::reconfigure), but hints even without thinking ahead.
    pub fn reconfigure_hinted(&mut self, target: Cell, next: &[Orientation]) -> Result<()> {
        let configs = self.robot.compute_reconfig(&self.pad, target, next)?;
        self.trace.extend(configs);
        Ok(())
    }

    pub fn reconnect(&mut self) -> Result<()> {
        let configs = rofibot::reconnect(&mut *self.robot, &self.pad)?;
        self.trace.extend(configs);
        Ok(())
    }

    pub fn touch(&mut self) -> Result<()> {
        let configs = rofibot::look_and_touch(&mut *self.robot, &self.pad)?;
        self.trace.extend(configs);
        Ok(())
    }
}
