//! Random pads for experiments and property tests.
//!
//! Every generator takes the caller's RNG, so a seeded `StdRng` reproduces the
//! same pad.

use crate::error::{PlanError, Result};
use crate::geometry::{Cell, Orientation};
use crate::pad::Pad;
use glam::IVec2;
use rand::Rng;
use rand::distributions::{Distribution, WeightedIndex};
use rand::seq::{SliceRandom, index};
use std::collections::HashSet;

/// Attempts [`some_holes`] makes before giving up on a connected layout.
pub const MAX_HOLE_ATTEMPTS: usize = 1000;

pub fn rectangle(width: usize, height: usize) -> Result<Pad> {
    Pad::rectangle(width, height)
}

/// A rectangle with a single hole at a random cell. The result is not
/// guaranteed to be connected (think of a 3x1 strip).
pub fn one_hole<R: Rng + ?Sized>(width: usize, height: usize, rng: &mut R) -> Result<Pad> {
    let mut pad = Pad::rectangle(width, height)?;
    if width > 0 && height > 0 {
        let hole = IVec2::new(rng.gen_range(0..width) as i32, rng.gen_range(0..height) as i32);
        pad.set(hole, false);
    }
    Ok(pad)
}

/// A connected rectangle with between one and a quarter of its cells knocked
/// out. Returns `None` when no connected layout turned up within
/// [`MAX_HOLE_ATTEMPTS`] tries.
pub fn some_holes<R: Rng + ?Sized>(width: usize, height: usize, rng: &mut R) -> Result<Option<Pad>> {
    let total = width * height;
    if total < 2 {
        return Ok(None);
    }
    let holes = rng.gen_range(1..=(total / 4).max(1));
    for _ in 0..MAX_HOLE_ATTEMPTS {
        let mut cells = vec![true; total];
        for i in index::sample(rng, total, holes) {
            cells[i] = false;
        }
        let pad = Pad::new(width, height, cells)?;
        if pad.is_connected() {
            return Ok(Some(pad));
        }
    }
    log::debug!("no connected {width}x{height} pad with {holes} holes after {MAX_HOLE_ATTEMPTS} attempts");
    Ok(None)
}

/// A connected blob grown cell by cell inside a `width` x `height` box, leaving
/// at least a quarter of the box as holes (for boxes of four cells or more).
///
/// Each new cell sprouts from an existing one, picked with weight growing
/// with its age rank so younger cells are favoured and the blob stays stringy.
pub fn many_holes<R: Rng + ?Sized>(width: usize, height: usize, rng: &mut R) -> Result<Pad> {
    let total = width * height;
    if total == 0 {
        return Pad::rectangle(width, height);
    }
    let holes = rng.gen_range(total / 4..total);
    let wanted = total - holes;

    let mut cells: Vec<Cell> = vec![IVec2::ZERO];
    let mut taken: HashSet<Cell> = HashSet::from([IVec2::ZERO]);
    while cells.len() < wanted {
        let ranks = WeightedIndex::new(1..=cells.len()).map_err(|e| PlanError::InvalidPad(e.to_string()))?;
        let parent = cells[ranks.sample(rng)];
        let Some(&direction) = Orientation::ALL.choose(rng) else {
            continue;
        };
        let candidate = parent + direction.step();
        if taken.contains(&candidate) {
            continue;
        }
        let (min, max) = extent(&cells, candidate);
        let span = max - min + IVec2::ONE;
        if span.x as usize <= width && span.y as usize <= height {
            taken.insert(candidate);
            cells.push(candidate);
        }
    }

    let (min, _) = extent(&cells, cells[0]);
    let mut pad = Pad::new(width, height, vec![false; total])?;
    for cell in cells {
        pad.set(cell - min, true);
    }
    Ok(pad)
}

/// Bounding box of `cells` together with `extra`.
fn extent(cells: &[Cell], extra: Cell) -> (IVec2, IVec2) {
    cells
        .iter()
        .fold((extra, extra), |(min, max), &c| (min.min(c), max.max(c)))
}
