//! Depth-first coverage with an explicit stack.
//!
//! Cells move from unknown to *seen* (touched while looking around, subtree not
//! yet searched) to *visited* (committed, or proven to add nothing new). The
//! bounds-aware variants also treat a known pad edge as closing a cell.

use crate::error::Result;
use crate::geometry::{Cell, Orientation};
use crate::grid::{BoundEdge, NodeId};
use crate::strategy::{DfsStrategy, move_to_back, move_to_front, shuffle};
use crate::walk::Walk;
use glam::IVec2;
use log::debug;
use std::collections::HashSet;

/// Which of the four DFS variants to run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DfsMode {
    pub use_bounds: bool,
    pub look: bool,
}

pub fn dfs(walk: &mut Walk, strategy: DfsStrategy, mode: DfsMode) -> Result<()> {
    DepthFirst {
        walk,
        strategy,
        use_bounds: mode.use_bounds,
        look: mode.look,
        visited: HashSet::new(),
        seen: HashSet::new(),
        first: true,
    }
    .run()
}

struct DepthFirst<'w, 'a> {
    walk: &'w mut Walk<'a>,
    strategy: DfsStrategy,
    use_bounds: bool,
    look: bool,
    visited: HashSet<Cell>,
    seen: HashSet<Cell>,
    first: bool,
}

impl DepthFirst<'_, '_> {
    fn run(&mut self) -> Result<()> {
        let root = self.walk.nodes.detached(IVec2::ZERO);
        let mut stack = vec![root];
        let mut backtrack = false;
        while let Some(u) = stack.pop() {
            let cell = self.walk.nodes.cell(u);
            self.visited.insert(cell);
            self.seen.remove(&cell);
            if self.look {
                self.close_seen_around(cell, None);
            }

            let next = self.next_directions(u);
            let successor = self.handle_node(u, &next, backtrack)?;

            if self.strategy.early {
                let mut pending = stack.clone();
                pending.push(u);
                if !self.has_unexplored(&pending) {
                    debug!("nothing left to explore, {} nodes still stacked", stack.len());
                    break;
                }
            }

            match successor {
                Some(v) => {
                    stack.push(u);
                    stack.push(v);
                    backtrack = false;
                }
                None => backtrack = true,
            }
        }
        Ok(())
    }

    fn known(&self, cell: Cell) -> bool {
        self.visited.contains(&cell) || self.seen.contains(&cell)
    }

    /// Unvisited neighbours not excluded by a known pad edge, in N, E, S, W order.
    fn open_directions(&self, cell: Cell) -> Vec<Orientation> {
        Orientation::ALL
            .into_iter()
            .filter(|&d| !(self.use_bounds && self.walk.bounds.blocks(cell, d)))
            .filter(|&d| !self.visited.contains(&(cell + d.step())))
            .collect()
    }

    /// Lookahead hints for `node`: its open directions (reversed when looking
    /// around, since the last one is taken) and then the way back.
    fn next_directions(&self, node: NodeId) -> Vec<Orientation> {
        let cell = self.walk.nodes.cell(node);
        let mut next = self.open_directions(cell);
        if self.look {
            next.reverse();
        }
        if let Some(back) = self
            .walk
            .nodes
            .parent_cell(node)
            .and_then(|parent| Orientation::between(cell, parent))
        {
            next.push(back);
        }
        next
    }

    fn has_unexplored(&self, nodes: &[NodeId]) -> bool {
        nodes.iter().any(|&n| self.next_directions(n).len() > 1)
            || nodes.first().is_some_and(|&n| !self.next_directions(n).is_empty())
    }

    fn is_closed(&self, cell: Cell) -> bool {
        Orientation::ALL.into_iter().all(|d| self.known(cell + d.step()))
    }

    /// `cell` lies on the known `edge` and its other three neighbours are known.
    fn closed_against(&self, cell: Cell, edge: BoundEdge) -> bool {
        self.walk.bounds.touches(edge, cell)
            && Orientation::ALL
                .into_iter()
                .filter(|&d| BoundEdge::facing(d) != edge)
                .all(|d| self.known(cell + d.step()))
    }

    fn closed_by_bounds(&self, cell: Cell) -> bool {
        self.use_bounds && BoundEdge::ALL.into_iter().any(|edge| self.closed_against(cell, edge))
    }

    /// Promotes seen neighbours of `cell` that can no longer lead anywhere new.
    /// A freshly discovered edge also closes every seen cell lying on it.
    fn close_seen_around(&mut self, cell: Cell, new_edge: Option<BoundEdge>) {
        let mut closed: Vec<Cell> = Orientation::ALL
            .into_iter()
            .map(|d| cell + d.step())
            .filter(|n| self.seen.contains(n) && (self.is_closed(*n) || self.closed_by_bounds(*n)))
            .collect();
        if let Some(edge) = new_edge
            && self.use_bounds
        {
            closed.extend(self.seen.iter().copied().filter(|&n| self.closed_against(n, edge)));
        }
        for n in closed {
            self.seen.remove(&n);
            self.visited.insert(n);
        }
    }

    fn check_seen(&mut self, cell: Cell) {
        if self.seen.contains(&cell) && (self.is_closed(cell) || self.closed_by_bounds(cell)) {
            self.seen.remove(&cell);
            self.visited.insert(cell);
        }
    }

    /// Moves the robot onto `u`. Returns whether the search may continue from it.
    fn go_to_node(&mut self, u: NodeId, next: &[Orientation], backtrack: bool) -> Result<bool> {
        if self.first {
            self.first = false;
            self.walk.emit_current()?;
            return Ok(true);
        }

        let cell = self.walk.nodes.cell(u);
        let already_fixed = self.walk.fixed() == cell;
        self.walk.reconfigure(cell, next)?;

        if !self.walk.pad.can_connect(cell) {
            if let Some(parent) = self.walk.nodes.parent_cell(u)
                && let Some(direction) = Orientation::between(parent, cell)
            {
                let edge = self.walk.bounds.narrow(parent, direction);
                if self.look {
                    self.close_seen_around(cell, Some(edge));
                }
            }
            return Ok(false);
        }

        // A leaf: only the way back remains.
        if next.len() <= 1 && !backtrack {
            if !already_fixed {
                let reconnect_now = match self.walk.nodes.parent(u) {
                    Some(parent) => {
                        let from = self.walk.nodes.cell(parent);
                        let parent_next = self.next_directions(parent);
                        (1..=2).contains(&parent_next.len())
                            && self.walk.robot.needs_reconnection(from + parent_next[0].step())
                    }
                    None => false,
                };
                if reconnect_now {
                    self.walk.reconnect()?;
                } else {
                    self.walk.touch()?;
                }
            }
            return Ok(false);
        }

        if !already_fixed {
            self.walk.reconnect()?;
        }
        Ok(true)
    }

    /// Direction the plain search descends into.
    fn successor_direction(&mut self, cell: Cell) -> Option<Orientation> {
        let mut order = self.open_directions(cell);
        if order.is_empty() {
            return None;
        }
        if self.strategy.shuffles() {
            shuffle(&mut order, &mut self.walk.rng);
        }
        if self.strategy.prefers_cheap_steps() {
            move_to_back(&mut order, self.walk.robot.worst_step_direction());
        }
        order.first().copied()
    }

    /// Orders the directions to peek at; the last one is where the search descends.
    fn order_looks(&mut self, cell: Cell, looks: &[Orientation]) -> Vec<Orientation> {
        let mut order: Vec<Orientation> = [Orientation::W, Orientation::S, Orientation::E, Orientation::N]
            .into_iter()
            .filter(|d| looks.contains(d))
            .collect();
        if order.len() <= 1 {
            return order;
        }
        if self.strategy.shuffles() {
            shuffle(&mut order, &mut self.walk.rng);
        }
        if self.strategy.prefers_cheap_steps() {
            move_to_back(&mut order, self.walk.robot.worst_step_direction());
            if let Some(ready) = Orientation::between(cell, self.walk.free()) {
                move_to_front(&mut order, ready);
            }
        }
        order
    }

    /// Peeks at every direction in `order` but the last.
    fn look_around(&mut self, cell: Cell, order: &[Orientation]) -> Result<()> {
        for (i, &direction) in order.iter().enumerate().take(order.len().saturating_sub(1)) {
            let neighbour = cell + direction.step();
            self.walk.reconfigure_blind(neighbour)?;
            if self.walk.free_on_pad() {
                let following = cell + order[i + 1].step();
                if self.walk.think && self.walk.robot.needs_reconnection(following) {
                    // Swing back from the neighbour so the next peek is cheap.
                    self.walk.reconnect()?;
                    self.walk.reconfigure_hinted(cell, &order[i..])?;
                    self.walk.reconnect()?;
                } else {
                    self.walk.touch()?;
                }
                self.seen.insert(neighbour);
                self.check_seen(neighbour);
                self.close_seen_around(neighbour, None);
            } else {
                self.visited.insert(neighbour);
                let edge = self.walk.bounds.narrow(cell, direction);
                self.close_seen_around(neighbour, Some(edge));
            }
        }
        Ok(())
    }

    fn handle_node(&mut self, u: NodeId, next: &[Orientation], backtrack: bool) -> Result<Option<NodeId>> {
        if !self.go_to_node(u, next, backtrack)? {
            return Ok(None);
        }

        let cell = self.walk.nodes.cell(u);
        let looks: Vec<Orientation> = next
            .iter()
            .copied()
            .filter(|&d| !self.known(cell + d.step()))
            .collect();
        let Some(successor) = self.successor_direction(cell) else {
            return Ok(None);
        };

        if looks.is_empty() || !self.look {
            return Ok(Some(self.walk.nodes.child(u, successor)));
        }
        if let [only] = looks[..] {
            return Ok(Some(self.walk.nodes.child(u, only)));
        }

        let order = self.order_looks(cell, &looks);
        self.look_around(cell, &order)?;
        let last = order.last().copied().unwrap_or(successor);
        Ok(Some(self.walk.nodes.child(u, last)))
    }
}
