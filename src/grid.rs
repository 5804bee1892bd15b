//! Grid utilities shared by the walks: inferred pad bounds, the start-pose
//! transform and the node arena used to rebuild backtrack paths.

use crate::geometry::{Cell, Orientation};
use glam::IVec2;
use log::{debug, trace};
use serde::{Deserialize, Serialize};

/// One side of the inferred pad rectangle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BoundEdge {
    MinX,
    MaxX,
    MinY,
    MaxY,
}

impl BoundEdge {
    /// The edge a walk runs into when stepping in `direction`.
    pub fn facing(direction: Orientation) -> Self {
        match direction {
            Orientation::N => BoundEdge::MaxY,
            Orientation::E => BoundEdge::MaxX,
            Orientation::S => BoundEdge::MinY,
            Orientation::W => BoundEdge::MinX,
        }
    }

    /// Coordinate of `cell` on this edge's axis.
    pub fn coordinate(self, cell: Cell) -> i32 {
        match self {
            BoundEdge::MinX | BoundEdge::MaxX => cell.x,
            BoundEdge::MinY | BoundEdge::MaxY => cell.y,
        }
    }

    pub const ALL: [BoundEdge; 4] = [BoundEdge::MinX, BoundEdge::MaxX, BoundEdge::MinY, BoundEdge::MaxY];
}

/// Known extent of a rectangular pad in the walk's relative frame.
///
/// Every field starts unknown and is set at most once. Later attempts to set a
/// known field keep the first value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bounds {
    min_x: Option<i32>,
    max_x: Option<i32>,
    min_y: Option<i32>,
    max_y: Option<i32>,
}

impl Bounds {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, edge: BoundEdge) -> Option<i32> {
        match edge {
            BoundEdge::MinX => self.min_x,
            BoundEdge::MaxX => self.max_x,
            BoundEdge::MinY => self.min_y,
            BoundEdge::MaxY => self.max_y,
        }
    }

    pub fn min_x(&self) -> Option<i32> {
        self.min_x
    }

    pub fn max_x(&self) -> Option<i32> {
        self.max_x
    }

    pub fn min_y(&self) -> Option<i32> {
        self.min_y
    }

    pub fn max_y(&self) -> Option<i32> {
        self.max_y
    }

    /// Records `value` for `edge` unless the edge is already known.
    pub fn set(&mut self, edge: BoundEdge, value: i32) {
        let slot = match edge {
            BoundEdge::MinX => &mut self.min_x,
            BoundEdge::MaxX => &mut self.max_x,
            BoundEdge::MinY => &mut self.min_y,
            BoundEdge::MaxY => &mut self.max_y,
        };
        match *slot {
            None => {
                debug!("pad edge {:?} discovered at {}", edge, value);
                *slot = Some(value);
            }
            Some(known) if known != value => {
                trace!("keeping {:?} = {}, ignoring {}", edge, known, value);
            }
            Some(_) => {}
        }
    }

    /// A probe from `from` towards `direction` failed: the edge in that
    /// direction lies at `from`'s coordinate.
    pub fn narrow(&mut self, from: Cell, direction: Orientation) -> BoundEdge {
        let edge = BoundEdge::facing(direction);
        self.set(edge, edge.coordinate(from));
        edge
    }

    /// True when `edge` is known and `cell` lies on it.
    pub fn touches(&self, edge: BoundEdge, cell: Cell) -> bool {
        self.get(edge) == Some(edge.coordinate(cell))
    }

    /// True when stepping from `cell` towards `direction` would leave the known rectangle.
    pub fn blocks(&self, cell: Cell, direction: Orientation) -> bool {
        self.touches(BoundEdge::facing(direction), cell)
    }
}

/// The start pose: absolute cell and heading the relative frame is anchored to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Origin {
    pub position: IVec2,
    pub direction: Orientation,
}

impl Origin {
    pub fn new(x: i32, y: i32, direction: Orientation) -> Self {
        Self {
            position: IVec2::new(x, y),
            direction,
        }
    }

    pub fn to_absolute(&self, relative: Cell) -> IVec2 {
        let IVec2 { x, y } = relative;
        self.position
            + match self.direction {
                Orientation::N => IVec2::new(x, y),
                Orientation::S => IVec2::new(-x, -y),
                Orientation::E => IVec2::new(y, -x),
                Orientation::W => IVec2::new(-y, x),
            }
    }

    /// Converts a relative module orientation into the pad's absolute frame.
    pub fn to_absolute_orientation(&self, relative: Orientation) -> Orientation {
        match self.direction {
            Orientation::N => relative.opposite(),
            Orientation::S => relative,
            Orientation::E => relative.left(),
            Orientation::W => relative.right(),
        }
    }

    pub fn to_relative_orientation(&self, absolute: Orientation) -> Orientation {
        match self.direction {
            Orientation::N => absolute.opposite(),
            Orientation::S => absolute,
            Orientation::E => absolute.right(),
            Orientation::W => absolute.left(),
        }
    }
}

/// Index of a [`Node`] inside a [`NodeArena`].
pub type NodeId = usize;

/// A visited or candidate cell with an optional back-link towards the walk's root.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Node {
    pub cell: Cell,
    pub parent: Option<NodeId>,
}

/// Append-only storage for walk nodes. Parent links only point at earlier
/// entries, so they always form a forest.
#[derive(Clone, Debug, Default)]
pub struct NodeArena {
    nodes: Vec<Node>,
}

impl NodeArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a node without a parent.
    pub fn detached(&mut self, cell: Cell) -> NodeId {
        self.nodes.push(Node { cell, parent: None });
        self.nodes.len() - 1
    }

    /// Adds the neighbour of `parent` in `direction`.
    pub fn child(&mut self, parent: NodeId, direction: Orientation) -> NodeId {
        let cell = self.cell(parent) + direction.step();
        self.nodes.push(Node {
            cell,
            parent: Some(parent),
        });
        self.nodes.len() - 1
    }

    pub fn cell(&self, id: NodeId) -> Cell {
        self.nodes[id].cell
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id].parent
    }

    pub fn parent_cell(&self, id: NodeId) -> Option<Cell> {
        self.parent(id).map(|p| self.cell(p))
    }

    pub fn parent_or_self(&self, id: NodeId) -> NodeId {
        self.parent(id).unwrap_or(id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
