//! A rofibot made of two universal modules, "blue" and "red", joined rigidly
//! side B to side B. Each module docks by side A through -Z and only its gamma
//! joint moves, so the free module can swing into any neighbour in one rotation.

use crate::action::{Action, ActionStats};
use crate::configuration::{Configuration, Edge, Module, ModuleId};
use crate::error::Result;
use crate::geometry::{Cell, Degree, Dock, Orientation, Side};
use crate::pad::PadView;
use crate::rofibot::{Connector, Morphology, Rofibot, current_configuration};
use glam::IVec2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Part {
    Blue,
    Red,
}

#[derive(Clone, Debug)]
pub struct DoubleRofibot {
    blue_id: ModuleId,
    red_id: ModuleId,
    blue: Cell,
    red: Cell,
    blue_gamma: Degree,
    red_gamma: Degree,
    docked: Part,
    fixed: Connector,
    stats: ActionStats,
}

impl DoubleRofibot {
    /// Blue docked at the relative origin facing east, red one cell east.
    pub fn new(blue_id: ModuleId, red_id: ModuleId) -> Self {
        Self {
            blue_id,
            red_id,
            blue: IVec2::ZERO,
            red: IVec2::X,
            blue_gamma: Degree::Zero,
            red_gamma: Degree::Zero,
            docked: Part::Blue,
            fixed: Connector::new(blue_id, Side::A, Dock::MinusZ, Orientation::E),
            stats: ActionStats::new(),
        }
    }

    pub fn gammas(&self) -> (Degree, Degree) {
        (self.blue_gamma, self.red_gamma)
    }

    fn fixed_gamma(&self) -> Degree {
        match self.docked {
            Part::Blue => self.blue_gamma,
            Part::Red => self.red_gamma,
        }
    }

    fn free_gamma(&self) -> Degree {
        match self.docked {
            Part::Blue => self.red_gamma,
            Part::Red => self.blue_gamma,
        }
    }

    /// Direction from the docked module to the free one.
    fn current_direction(&self) -> Orientation {
        let (fixed, free) = match self.docked {
            Part::Blue => (self.blue, self.red),
            Part::Red => (self.red, self.blue),
        };
        Orientation::between(fixed, free).unwrap_or(self.fixed.orientation)
    }

    /// Sets the docked module's gamma and swings the free module with it.
    fn set_fixed_gamma(&mut self, gamma: Degree) {
        let action = match self.fixed_gamma().distance(gamma) {
            0 => None,
            180 => Some(Action::RotateGamma180),
            _ => Some(Action::RotateGamma90),
        };
        if let Some(action) = action {
            self.stats.record(action);
        }

        let reach = self.fixed.orientation.turned(gamma);
        match self.docked {
            Part::Blue => {
                self.blue_gamma = gamma;
                self.red = self.blue + reach.step();
            }
            Part::Red => {
                self.red_gamma = gamma;
                self.blue = self.red - reach.step();
            }
        }
    }
}

impl Rofibot for DoubleRofibot {
    fn morphology(&self) -> Morphology {
        Morphology::Double
    }

    fn fixed_position(&self) -> Cell {
        match self.docked {
            Part::Blue => self.blue,
            Part::Red => self.red,
        }
    }

    fn free_position(&self) -> Cell {
        match self.docked {
            Part::Blue => self.red,
            Part::Red => self.blue,
        }
    }

    fn fixed_connector(&self) -> Connector {
        self.fixed
    }

    fn compute_new_edge(&self) -> Result<Connector> {
        let id = match self.docked {
            Part::Blue => self.red_id,
            Part::Red => self.blue_id,
        };
        let orientation = self
            .fixed
            .orientation
            .turned(self.fixed_gamma())
            .turned(self.free_gamma().negated());
        Ok(Connector::new(id, Side::A, Dock::MinusZ, orientation))
    }

    fn attach(&mut self, connector: Connector) {
        self.docked = if connector.id == self.blue_id {
            Part::Blue
        } else {
            Part::Red
        };
        self.fixed = connector;
    }

    fn configuration(&self) -> Configuration {
        Configuration::new(
            vec![
                Module::new(self.blue_id, Degree::Zero, Degree::Zero, self.blue_gamma),
                Module::new(self.red_id, Degree::Zero, Degree::Zero, self.red_gamma),
            ],
            vec![Edge::new(
                self.blue_id,
                Side::B,
                Dock::MinusX,
                Orientation::S,
                Dock::PlusX,
                Side::B,
                self.red_id,
            )],
        )
    }

    /// Lookahead hints are ignored: every neighbour is one gamma rotation away.
    fn compute_reconfig(&mut self, pad: &PadView, target: Cell, _next: &[Orientation]) -> Result<Vec<Configuration>> {
        if target == self.free_position() || target == self.fixed_position() {
            return Ok(Vec::new());
        }
        let Some(direction) = Orientation::between(self.fixed_position(), target) else {
            return Ok(Vec::new());
        };
        let current = self.current_direction();
        let rotation = if direction == current {
            Degree::Zero
        } else if direction == current.opposite() {
            Degree::OneEighty
        } else if direction == current.left() {
            Degree::Ninety
        } else {
            Degree::MinusNinety
        };
        let gamma = Degree::from_quarter_turns(self.fixed_gamma().quarter_turns() + rotation.quarter_turns());
        self.set_fixed_gamma(gamma);
        Ok(vec![current_configuration(self, pad)?])
    }

    fn worst_step_direction(&self) -> Orientation {
        self.current_direction().opposite()
    }

    fn needs_reconnection(&self, _target: Cell) -> bool {
        false
    }

    fn stats(&self) -> &ActionStats {
        &self.stats
    }

    fn stats_mut(&mut self) -> &mut ActionStats {
        &mut self.stats
    }
}
