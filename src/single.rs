//! A rofibot made of one universal module.
//!
//! Side A sits on joint alpha and side B on joint beta; gamma never moves. The
//! free side swings around the docked one, except straight "through" the docked
//! connector's orientation, which the module's shape blocks. Those steps need a
//! two-step maneuver: re-dock on the free side, twist the old side, dock back.

use crate::action::{Action, ActionStats};
use crate::configuration::{Configuration, Module, ModuleId};
use crate::error::{PlanError, Result};
use crate::geometry::{Cell, Degree, Dock, Orientation, Side, single_module_new_edge};
use crate::pad::PadView;
use crate::rofibot::{Connector, Morphology, Rofibot, current_configuration, reconnect};
use glam::IVec2;
use log::error;

#[derive(Clone, Debug)]
pub struct SingleRofibot {
    id: ModuleId,
    a: Cell,
    b: Cell,
    fixed: Connector,
    alpha: Degree,
    beta: Degree,
    gamma: Degree,
    stats: ActionStats,
}

impl SingleRofibot {
    /// Side A docked at the relative origin by +X, side B one cell east.
    pub fn new(id: ModuleId) -> Self {
        Self {
            id,
            a: IVec2::ZERO,
            b: IVec2::X,
            fixed: Connector::new(id, Side::A, Dock::PlusX, Orientation::W),
            alpha: Degree::Zero,
            beta: Degree::Zero,
            gamma: Degree::Zero,
            stats: ActionStats::new(),
        }
    }

    pub fn alpha(&self) -> Degree {
        self.alpha
    }

    pub fn beta(&self) -> Degree {
        self.beta
    }

    fn joint(&self, side: Side) -> Degree {
        match side {
            Side::A => self.alpha,
            Side::B => self.beta,
        }
    }

    fn record_rotation(&mut self, fixed: bool, from: Degree, to: Degree, all: bool) {
        let action = match (fixed, from.distance(to)) {
            (_, 0) => return,
            (true, 180) => Action::RotateFixedAB180,
            (true, _) => Action::RotateFixedAB90,
            (false, 180) => Action::RotateFreeAB180,
            (false, _) => Action::RotateFreeAB90,
        };
        if all {
            self.stats.record_all(action);
        } else {
            self.stats.record_non_concurrent(action);
        }
    }

    /// Sets alpha; with side A docked this swings side B.
    fn set_alpha(&mut self, alpha: Degree) {
        let fixed = self.fixed.side == Side::A;
        self.record_rotation(fixed, self.alpha, alpha, true);
        self.alpha = alpha;
        if fixed {
            self.b = self.a + self.fixed.orientation.opposite().turned(alpha.negated()).step();
        }
    }

    /// Sets beta; with side B docked this swings side A.
    fn set_beta(&mut self, beta: Degree) {
        let fixed = self.fixed.side == Side::B;
        self.record_rotation(fixed, self.beta, beta, true);
        self.beta = beta;
        if fixed {
            self.a = self.b + self.fixed.orientation.turned(beta).step();
        }
    }

    fn set_joint(&mut self, side: Side, angle: Degree) {
        match side {
            Side::A => self.set_alpha(angle),
            Side::B => self.set_beta(angle),
        }
    }

    /// Counts the one motion a combined alpha/beta change costs when run
    /// sequentially: the most expensive of the two.
    fn record_non_concurrent(&mut self, alpha: Degree, beta: Degree) {
        let (fixed_diff, free_diff) = match self.fixed.side {
            Side::A => (self.alpha.distance(alpha), self.beta.distance(beta)),
            Side::B => (self.beta.distance(beta), self.alpha.distance(alpha)),
        };
        let action = if fixed_diff == 180 {
            Action::RotateFixedAB180
        } else if free_diff == 180 {
            Action::RotateFreeAB180
        } else if fixed_diff == 90 {
            Action::RotateFixedAB90
        } else if free_diff == 90 {
            Action::RotateFreeAB90
        } else {
            return;
        };
        self.stats.record_non_concurrent(action);
    }

    fn one_step(&mut self, pad: &PadView, alpha: Degree, beta: Degree) -> Result<Vec<Configuration>> {
        if self.alpha == alpha && self.beta == beta {
            return Ok(Vec::new());
        }
        self.record_non_concurrent(alpha, beta);
        self.set_alpha(alpha);
        self.set_beta(beta);
        Ok(vec![current_configuration(self, pad)?])
    }

    /// Rotates the docked side's joint alone.
    fn turn_fixed_joint(&mut self, pad: &PadView, angle: Degree) -> Result<Vec<Configuration>> {
        let side = self.fixed.side;
        let current = self.joint(side);
        if current == angle {
            return Ok(Vec::new());
        }
        self.record_rotation(true, current, angle, false);
        self.set_joint(side, angle);
        Ok(vec![current_configuration(self, pad)?])
    }

    /// Docks the free side, twists the previously docked side to `angle` and docks it back.
    fn turn_fixed_module(&mut self, pad: &PadView, side: Side, angle: Degree) -> Result<Vec<Configuration>> {
        let mut configs = reconnect(self, pad)?;
        let current = self.joint(side);
        self.set_joint(side, angle);
        self.record_rotation(false, current, angle, false);
        configs.push(current_configuration(self, pad)?);
        configs.extend(reconnect(self, pad)?);
        Ok(configs)
    }

    fn two_step(&mut self, pad: &PadView, target: Cell, next: &[Orientation]) -> Result<Vec<Configuration>> {
        let side = self.fixed.side;
        let angles = match self.joint(side) {
            Degree::Zero => [Degree::Zero, Degree::Ninety, Degree::MinusNinety],
            Degree::Ninety => [Degree::Ninety, Degree::Zero, Degree::MinusNinety],
            _ => [Degree::MinusNinety, Degree::Zero, Degree::Ninety],
        };

        let mut configs = Vec::new();
        for angle in angles {
            configs.extend(self.turn_fixed_joint(pad, angle)?);
            // The released side has to move, so never twist it back to where it was.
            let release = if angle == Degree::Zero {
                Degree::Ninety
            } else {
                Degree::Zero
            };
            if pad.can_connect(self.free_position()) {
                configs.extend(self.turn_fixed_module(pad, side, release)?);
                configs.extend(self.compute_reconfig(pad, target, next)?);
                return Ok(configs);
            }
        }

        error!(
            "no maneuver reaches {} with side {} docked at {}",
            pad.absolute(target),
            side,
            pad.absolute(self.fixed_position())
        );
        Err(PlanError::Unreachable {
            target: pad.absolute(target),
            fixed_side: side,
            fixed_position: pad.absolute(self.fixed_position()),
            fixed_orientation: pad.origin.to_absolute_orientation(self.fixed.orientation),
        })
    }
}

/// Picks the free joint's angle so the step after `direction` needs no
/// rotation of the docked joint. `left` is the angle that points the free
/// connector to the left of `direction`.
fn angle_for_next(current: Degree, direction: Orientation, next: &[Orientation], left: Degree) -> Degree {
    let Some(&first) = next.first() else {
        return current;
    };
    let l = direction.left();
    let r = direction.right();
    if next.len() > 1 {
        let pair = &next[..2];
        if pair.contains(&l) && pair.contains(&r) {
            return Degree::Zero;
        } else if pair.contains(&l) && pair.contains(&direction) {
            return left;
        } else if pair.contains(&r) && pair.contains(&direction) {
            return left.negated();
        }
    }

    let mut wanted = first;
    if wanted == direction.opposite() {
        // The way back is always open.
        match next.get(1) {
            Some(&second) => wanted = second,
            None => return current,
        }
    }

    if wanted == direction {
        if matches!(current, Degree::Ninety | Degree::MinusNinety) {
            current
        } else {
            Degree::Ninety
        }
    } else if wanted == l {
        if current == Degree::Zero || current == left {
            current
        } else {
            Degree::Zero
        }
    } else if wanted == r {
        if current == Degree::Zero || current == left.negated() {
            current
        } else {
            Degree::Zero
        }
    } else {
        current
    }
}

impl Rofibot for SingleRofibot {
    fn morphology(&self) -> Morphology {
        Morphology::Single
    }

    fn fixed_position(&self) -> Cell {
        match self.fixed.side {
            Side::A => self.a,
            Side::B => self.b,
        }
    }

    fn free_position(&self) -> Cell {
        match self.fixed.side {
            Side::A => self.b,
            Side::B => self.a,
        }
    }

    fn fixed_connector(&self) -> Connector {
        self.fixed
    }

    fn compute_new_edge(&self) -> Result<Connector> {
        let pose = single_module_new_edge(
            self.fixed.side,
            self.fixed.dock,
            self.fixed.orientation,
            self.alpha,
            self.beta,
            self.gamma,
        )?;
        Ok(Connector::new(self.id, pose.side, pose.dock, pose.orientation))
    }

    fn attach(&mut self, connector: Connector) {
        self.fixed = connector;
    }

    fn configuration(&self) -> Configuration {
        Configuration::new(vec![Module::new(self.id, self.alpha, self.beta, self.gamma)], Vec::new())
    }

    fn compute_reconfig(&mut self, pad: &PadView, target: Cell, next: &[Orientation]) -> Result<Vec<Configuration>> {
        let Some(direction) = Orientation::between(self.fixed_position(), target) else {
            return Ok(Vec::new());
        };
        let facing = self.fixed.orientation;
        match self.fixed.side {
            Side::A => {
                if facing == direction {
                    return self.two_step(pad, target, next);
                }
                let alpha = if facing == direction.opposite() {
                    Degree::Zero
                } else if facing == direction.left() {
                    Degree::MinusNinety
                } else {
                    Degree::Ninety
                };
                let beta = angle_for_next(self.beta, direction, next, Degree::Ninety);
                self.one_step(pad, alpha, beta)
            }
            Side::B => {
                if facing == direction.opposite() {
                    return self.two_step(pad, target, next);
                }
                let beta = if facing == direction {
                    Degree::Zero
                } else if facing == direction.left() {
                    Degree::MinusNinety
                } else {
                    Degree::Ninety
                };
                let alpha = angle_for_next(self.alpha, direction, next, Degree::MinusNinety);
                self.one_step(pad, alpha, beta)
            }
        }
    }

    fn worst_step_direction(&self) -> Orientation {
        match self.fixed.side {
            Side::A => self.fixed.orientation,
            Side::B => self.fixed.orientation.opposite(),
        }
    }

    fn needs_reconnection(&self, target: Cell) -> bool {
        Orientation::between(self.fixed_position(), target).is_some_and(|d| d == self.worst_step_direction())
    }

    fn stats(&self) -> &ActionStats {
        &self.stats
    }

    fn stats_mut(&mut self) -> &mut ActionStats {
        &mut self.stats
    }
}
