//! Greedy coverage that, when stuck, walks back along visited cells to the
//! nearest one with an unexplored neighbour.

use crate::error::Result;
use crate::geometry::{Cell, Orientation};
use crate::strategy::{BacktrackStrategy, move_to_back, move_to_front, shuffle};
use crate::walk::Walk;
use glam::IVec2;
use log::{debug, trace};
use std::collections::{HashMap, HashSet, VecDeque};

pub fn shortest_backtrack(walk: &mut Walk, strategy: BacktrackStrategy, look: bool) -> Result<()> {
    ShortestBacktrack {
        walk,
        strategy,
        look,
        visited: HashSet::new(),
        empty: HashSet::new(),
        first: true,
    }
    .run()
}

struct ShortestBacktrack<'w, 'a> {
    walk: &'w mut Walk<'a>,
    strategy: BacktrackStrategy,
    look: bool,
    /// Cells on the pad that have been docked or touched.
    visited: HashSet<Cell>,
    /// Cells found to be outside the pad.
    empty: HashSet<Cell>,
    first: bool,
}

impl ShortestBacktrack<'_, '_> {
    fn run(&mut self) -> Result<()> {
        let mut current = IVec2::ZERO;
        loop {
            self.visited.insert(current);
            let next = self.next_directions(current);
            match self.handle(current, next)? {
                Some(target) => current = target,
                None => match self.backtrack_to_closest()? {
                    Some(target) => {
                        debug!("backtracked to {}, heading for {}", self.walk.fixed(), target);
                        current = target;
                    }
                    None => break,
                },
            }
        }
        Ok(())
    }

    fn unknown(&self, cell: Cell) -> bool {
        !self.visited.contains(&cell) && !self.empty.contains(&cell)
    }

    fn next_directions(&mut self, cell: Cell) -> Vec<Orientation> {
        let mut order: Vec<Orientation> = Orientation::ALL
            .into_iter()
            .filter(|&d| self.unknown(cell + d.step()))
            .collect();
        match self.strategy {
            BacktrackStrategy::Scan => {
                // Looking covers two rows per pass.
                let stride = if self.look { 4 } else { 2 };
                move_to_front(&mut order, Orientation::S);
                if cell.y.rem_euclid(stride) == 0 {
                    move_to_front(&mut order, Orientation::E);
                } else {
                    move_to_front(&mut order, Orientation::W);
                }
            }
            BacktrackStrategy::Random | BacktrackStrategy::RandomRofibotBest => {
                shuffle(&mut order, &mut self.walk.rng);
            }
        }
        if self.look {
            order.reverse();
        }
        order
    }

    fn has_unknown_neighbour(&self, cell: Cell) -> bool {
        Orientation::ALL.into_iter().any(|d| self.unknown(cell + d.step()))
    }

    /// Shortest path through visited cells from `start` to a cell with an
    /// unknown neighbour, both ends included.
    fn closest_open(&self, start: Cell) -> Option<Vec<Cell>> {
        if self.has_unknown_neighbour(start) {
            return Some(vec![start]);
        }
        let mut came_from: HashMap<Cell, Cell> = HashMap::new();
        let mut queue = VecDeque::from([start]);
        while let Some(cell) = queue.pop_front() {
            for d in Orientation::ALL {
                let neighbour = cell + d.step();
                if neighbour == start || !self.visited.contains(&neighbour) || came_from.contains_key(&neighbour) {
                    continue;
                }
                came_from.insert(neighbour, cell);
                if self.has_unknown_neighbour(neighbour) {
                    let mut path = vec![neighbour];
                    let mut at = neighbour;
                    while let Some(&previous) = came_from.get(&at) {
                        path.push(previous);
                        at = previous;
                    }
                    path.reverse();
                    return Some(path);
                }
                queue.push_back(neighbour);
            }
        }
        None
    }

    /// Walks the robot along the closest path, leaving it docked next to the
    /// path's end. Returns that end, or `None` once nothing is left.
    fn backtrack_to_closest(&mut self) -> Result<Option<Cell>> {
        let Some(path) = self.closest_open(self.walk.fixed()) else {
            return Ok(None);
        };
        for pair in path.windows(2) {
            let (step, ahead) = (pair[0], pair[1]);
            if step == self.walk.fixed() {
                continue;
            }
            let hint: Vec<Orientation> = Orientation::between(step, ahead).into_iter().collect();
            self.walk.reconfigure_hinted(step, &hint)?;
            self.walk.reconnect()?;
        }
        Ok(path.last().copied())
    }

    /// Moves the robot onto `cell`. Returns whether the walk may continue from it.
    fn go_to_node(&mut self, cell: Cell, next: &[Orientation]) -> Result<bool> {
        if self.first {
            self.first = false;
            self.walk.emit_current()?;
            return Ok(true);
        }

        let already_fixed = self.walk.fixed() == cell;
        self.walk.reconfigure(cell, next)?;

        if !self.walk.pad.can_connect(cell) {
            self.visited.remove(&cell);
            self.empty.insert(cell);
            return Ok(false);
        }

        if next.is_empty() {
            if !already_fixed {
                // Stay on whichever side is closer to the rest of the work.
                let from_here = self.closest_open(cell).map_or(0, |p| p.len());
                let from_fixed = self.closest_open(self.walk.fixed()).map_or(0, |p| p.len());
                trace!("dead end at {cell}: {from_here} vs {from_fixed} to the closest open cell");
                if from_here <= from_fixed {
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

    fn look_around(&mut self, cell: Cell, order: &[Orientation]) -> Result<()> {
        for (i, &direction) in order.iter().enumerate().take(order.len().saturating_sub(1)) {
            let neighbour = cell + direction.step();
            self.walk.reconfigure_blind(neighbour)?;
            if self.walk.free_on_pad() {
                let following = cell + order[i + 1].step();
                if self.walk.think && self.walk.robot.needs_reconnection(following) {
                    self.walk.reconnect()?;
                    self.walk.reconfigure_hinted(cell, &order[i..])?;
                    self.walk.reconnect()?;
                } else {
                    self.walk.touch()?;
                }
                self.visited.insert(neighbour);
            } else {
                self.empty.insert(neighbour);
            }
        }
        Ok(())
    }

    fn handle(&mut self, cell: Cell, mut next: Vec<Orientation>) -> Result<Option<Cell>> {
        if !self.go_to_node(cell, &next)? {
            return Ok(None);
        }
        match next[..] {
            [] => return Ok(None),
            [only] => return Ok(Some(cell + only.step())),
            _ => {}
        }
        if self.strategy == BacktrackStrategy::RandomRofibotBest {
            move_to_back(&mut next, self.walk.robot.worst_step_direction());
        }
        if self.look {
            self.look_around(cell, &next)?;
            Ok(next.last().map(|d| cell + d.step()))
        } else {
            Ok(next.first().map(|d| cell + d.step()))
        }
    }
}
