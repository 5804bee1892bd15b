//! The connector pad: a boolean grid of dockable cells.

use crate::configuration::{Configuration, Edge, MAX_PAD_EXTENT, Module, ModuleId, position_id};
use crate::error::{PlanError, Result};
use crate::geometry::{Cell, Degree, Dock, Orientation, Side};
use crate::grid::Origin;
use glam::IVec2;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;
use std::str::FromStr;

/// A `width` x `height` grid of connector points, some of which may be holes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pad {
    width: i32,
    height: i32,
    /// Row-major from `y = 0`: index `y * width + x`.
    cells: Vec<bool>,
}

impl Pad {
    /// Builds a pad from a row-major grid where `cells[y * width + x]` marks a connector.
    pub fn new(width: usize, height: usize, cells: Vec<bool>) -> Result<Self> {
        if cells.len() != width * height {
            return Err(PlanError::InvalidPad(format!(
                "expected {} cells for a {}x{} pad, got {}",
                width * height,
                width,
                height,
                cells.len()
            )));
        }
        if width > MAX_PAD_EXTENT as usize || height > MAX_PAD_EXTENT as usize {
            return Err(PlanError::InvalidPad(format!(
                "{}x{} exceeds the {}x{} addressable pad",
                width, height, MAX_PAD_EXTENT, MAX_PAD_EXTENT
            )));
        }
        Ok(Self {
            width: width as i32,
            height: height as i32,
            cells,
        })
    }

    /// Builds a pad from `columns[x][y]`.
    pub fn from_columns(columns: &[Vec<bool>]) -> Result<Self> {
        let width = columns.len();
        let height = columns.first().map_or(0, Vec::len);
        if columns.iter().any(|c| c.len() != height) {
            return Err(PlanError::InvalidPad("columns differ in height".into()));
        }
        let mut cells = vec![false; width * height];
        for (x, column) in columns.iter().enumerate() {
            for (y, &on) in column.iter().enumerate() {
                cells[y * width + x] = on;
            }
        }
        Self::new(width, height, cells)
    }

    /// A hole-free pad.
    pub fn rectangle(width: usize, height: usize) -> Result<Self> {
        Self::new(width, height, vec![true; width * height])
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    fn contains(&self, position: IVec2) -> bool {
        (0..self.width).contains(&position.x) && (0..self.height).contains(&position.y)
    }

    /// False outside the grid or on a hole.
    pub fn can_connect(&self, position: IVec2) -> bool {
        self.contains(position) && self.cells[(position.y * self.width + position.x) as usize]
    }

    /// Marks `position` as a hole (or a connector). Positions outside the grid are ignored.
    pub fn set(&mut self, position: IVec2, connectable: bool) {
        if self.contains(position) {
            self.cells[(position.y * self.width + position.x) as usize] = connectable;
        }
    }

    /// Every connectable cell, column by column.
    pub fn connectable_cells(&self) -> impl Iterator<Item = IVec2> + '_ {
        (0..self.width)
            .flat_map(move |x| (0..self.height).map(move |y| IVec2::new(x, y)))
            .filter(|&p| self.can_connect(p))
    }

    pub fn connectable_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    /// True when the pad has no holes.
    pub fn is_rectangle(&self) -> bool {
        self.cells.iter().all(|&c| c)
    }

    /// True when the connectable cells form a single 4-connected component.
    /// A pad without connectors counts as connected.
    pub fn is_connected(&self) -> bool {
        let Some(start) = self.connectable_cells().next() else {
            return true;
        };
        let mut seen = vec![false; self.cells.len()];
        let index = |p: IVec2| (p.y * self.width + p.x) as usize;
        seen[index(start)] = true;
        let mut queue = VecDeque::from([start]);
        let mut reached = 1;
        while let Some(p) = queue.pop_front() {
            for d in Orientation::ALL {
                let n = p + d.step();
                if self.can_connect(n) && !seen[index(n)] {
                    seen[index(n)] = true;
                    reached += 1;
                    queue.push_back(n);
                }
            }
        }
        reached == self.connectable_count()
    }

    /// The pad itself assembled from universal modules, one per connector,
    /// joined to their east and north neighbours.
    pub fn configuration(&self) -> Result<Configuration> {
        let mut modules = Vec::new();
        let mut edges = Vec::new();
        for p in self.connectable_cells() {
            let id = position_id(p)?;
            modules.push(Module::new(id, Degree::Zero, Degree::Zero, Degree::Ninety));
            let east = p + IVec2::X;
            if self.can_connect(east) {
                edges.push(Edge::new(
                    id,
                    Side::A,
                    Dock::PlusX,
                    Orientation::S,
                    Dock::MinusX,
                    Side::A,
                    position_id(east)?,
                ));
            }
            let north = p + IVec2::Y;
            if self.can_connect(north) {
                edges.push(Edge::new(
                    id,
                    Side::B,
                    Dock::MinusX,
                    Orientation::S,
                    Dock::PlusX,
                    Side::B,
                    position_id(north)?,
                ));
            }
        }
        Ok(Configuration::new(modules, edges))
    }
}

/// Renders the pad the way pad files are written: top row first, `o` for a
/// connector and `.` for a hole.
impl fmt::Display for Pad {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in (0..self.height).rev() {
            for x in 0..self.width {
                let c = if self.can_connect(IVec2::new(x, y)) { 'o' } else { '.' };
                write!(f, "{}", c)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Parses the pad-file layout: the last non-blank line is `y = 0`, `o` marks
/// a connector, anything else (including short lines) is a hole.
impl FromStr for Pad {
    type Err = PlanError;

    fn from_str(s: &str) -> Result<Self> {
        let mut lines: Vec<&str> = s.lines().map(str::trim_end).collect();
        while lines.last().is_some_and(|l| l.is_empty()) {
            lines.pop();
        }
        let height = lines.len();
        let width = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
        let mut cells = vec![false; width * height];
        for (row, line) in lines.iter().enumerate() {
            let y = height - row - 1;
            for (x, c) in line.chars().enumerate() {
                cells[y * width + x] = c == 'o';
            }
        }
        Self::new(width, height, cells)
    }
}

/// A pad seen through a walk's start pose: every query takes robot-relative cells.
#[derive(Clone, Copy, Debug)]
pub struct PadView<'a> {
    pub pad: &'a Pad,
    pub origin: Origin,
}

impl<'a> PadView<'a> {
    pub fn new(pad: &'a Pad, origin: Origin) -> Self {
        Self { pad, origin }
    }

    pub fn absolute(&self, relative: Cell) -> IVec2 {
        self.origin.to_absolute(relative)
    }

    pub fn can_connect(&self, relative: Cell) -> bool {
        self.pad.can_connect(self.absolute(relative))
    }

    /// Id of the pad module under a relative cell.
    pub fn position_id(&self, relative: Cell) -> Result<ModuleId> {
        position_id(self.absolute(relative))
    }
}
