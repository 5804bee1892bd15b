//! Boustrophedon coverage of hole-free rectangles: Direct, DirectZigZag and ZigZag.
//!
//! All three first walk to the bottom-left corner, learning `min_x` and `min_y`
//! on the way, then sweep without ever backtracking. The remaining bounds are
//! discovered when a step fails to find a connector.

use crate::error::Result;
use crate::geometry::{Cell, Orientation};
use crate::grid::{BoundEdge, Bounds, NodeId};
use crate::walk::Walk;
use glam::IVec2;

use Orientation::{E, N, S, W};

/// Creates the neighbour of `from`, swings onto it and docks if it is on the pad.
fn advance(walk: &mut Walk, from: NodeId, direction: Orientation, next: &[Orientation]) -> Result<(NodeId, bool)> {
    let node = walk.nodes.child(from, direction);
    walk.reconfigure(walk.nodes.cell(node), next)?;
    if !walk.free_on_pad() {
        return Ok((node, false));
    }
    walk.reconnect()?;
    Ok((node, true))
}

/// Sets `edge` from the coordinate of the fixed cell.
fn bound_at_fixed(walk: &mut Walk, edge: BoundEdge) {
    let fixed = walk.fixed();
    walk.bounds.set(edge, edge.coordinate(fixed));
}

/// Staircases down and left until blocked, then runs straight to the corner.
pub fn go_to_corner(walk: &mut Walk, start: NodeId) -> Result<NodeId> {
    let mut node = start;
    let mut down = true;
    loop {
        let direction = if down { S } else { W };
        let (next, docked) = advance(walk, node, direction, &[S, W])?;
        if docked {
            node = next;
            down = !down;
            continue;
        }
        let corner = straight_to_corner(walk, node, !down)?;
        bound_at_fixed(walk, BoundEdge::MinX);
        bound_at_fixed(walk, BoundEdge::MinY);
        return Ok(corner);
    }
}

fn straight_to_corner(walk: &mut Walk, start: NodeId, down: bool) -> Result<NodeId> {
    let (direction, next): (_, &[Orientation]) = if down { (S, &[S, E]) } else { (W, &[W, N]) };
    let mut node = start;
    loop {
        let (step, docked) = advance(walk, node, direction, next)?;
        if !docked {
            return Ok(node);
        }
        node = step;
    }
}

/// Runs along the current column to its top (or bottom) edge.
fn straight_up_or_down(walk: &mut Walk, start: NodeId, up: bool) -> Result<NodeId> {
    let (direction, edge) = if up { (N, BoundEdge::MaxY) } else { (S, BoundEdge::MinY) };
    let mut node = start;
    loop {
        let cell = walk.nodes.cell(node);
        if walk.bounds.touches(edge, cell) {
            return Ok(node);
        }
        let target = cell + direction.step();
        let mut next = vec![direction];
        if walk.bounds.get(edge).is_none_or(|v| v == target.y) {
            next.push(E);
        }
        let (step, docked) = advance(walk, node, direction, &next)?;
        if !docked {
            bound_at_fixed(walk, edge);
            return Ok(node);
        }
        node = step;
    }
}

/// Column by column, alternating up and down.
pub fn direct(walk: &mut Walk) -> Result<()> {
    let root = walk.nodes.detached(IVec2::ZERO);
    walk.emit_current()?;
    let mut node = go_to_corner(walk, root)?;
    let mut up = true;
    loop {
        node = straight_up_or_down(walk, node, up)?;
        let target = walk.nodes.cell(node) + IVec2::X;
        let fixed_y = walk.fixed().y;
        let mut next = Vec::with_capacity(2);
        let still_on_edge = if up {
            next.push(S);
            walk.bounds.min_y() == Some(fixed_y)
        } else {
            next.push(N);
            walk.bounds.max_y() == Some(fixed_y)
        };
        if still_on_edge {
            next.push(E);
        }
        walk.reconfigure(target, &next)?;
        if !walk.free_on_pad() {
            bound_at_fixed(walk, BoundEdge::MaxX);
            break;
        }
        walk.reconnect()?;
        node = walk.nodes.detached(target);
        up = !up;
    }
    Ok(())
}

/// Step `i` of a two-column band: E, N, W, N, E, ... going up, S instead of N
/// going down. Returns the direction, the lookahead hints and whether the
/// target only needs a touch.
fn band_step(bounds: &Bounds, cell: Cell, up: bool, i: usize) -> (Orientation, Vec<Orientation>, bool) {
    let (forward, edge) = if up { (N, bounds.max_y()) } else { (S, bounds.min_y()) };
    match i % 4 {
        0 => {
            let mut next = vec![forward];
            if edge.is_none_or(|v| v == cell.y) {
                next.push(E);
            }
            (E, next, false)
        }
        1 => (forward, vec![W], false),
        2 => {
            if edge == Some(cell.y) {
                (W, Vec::new(), true)
            } else {
                (W, vec![forward], false)
            }
        }
        _ => (forward, vec![E], false),
    }
}

/// Covers one two-column band. Returns the last node and whether the walk
/// may continue east.
fn double_up_or_down(walk: &mut Walk, start: NodeId, up: bool) -> Result<(NodeId, bool)> {
    let edge = if up { BoundEdge::MaxY } else { BoundEdge::MinY };
    let mut node = start;
    let mut on_border = 0;
    let mut i = 0;
    loop {
        let cell = walk.nodes.cell(node);
        if walk.bounds.touches(edge, cell) {
            on_border += 1;
        }
        if on_border > 1 {
            return Ok((node, true));
        }

        let (direction, next, touch_only) = band_step(&walk.bounds, cell, up, i);
        let step = walk.nodes.child(node, direction);
        walk.reconfigure(walk.nodes.cell(step), &next)?;
        if walk.free_on_pad() {
            if touch_only {
                walk.touch()?;
                return Ok((node, true));
            }
            walk.reconnect()?;
            node = step;
        } else if direction == E {
            bound_at_fixed(walk, BoundEdge::MaxX);
            let end = straight_up_or_down(walk, node, up)?;
            return Ok((walk.nodes.parent_or_self(end), false));
        } else {
            bound_at_fixed(walk, edge);
            return Ok((node, true));
        }
        i += 1;
    }
}

/// Two columns at a time, zigzagging inside each band.
pub fn direct_zigzag(walk: &mut Walk) -> Result<()> {
    let root = walk.nodes.detached(IVec2::ZERO);
    walk.emit_current()?;
    let mut node = go_to_corner(walk, root)?;
    let mut up = true;
    loop {
        let (end, more) = double_up_or_down(walk, node, up)?;
        node = end;
        if !more {
            break;
        }
        up = !up;

        let cell = walk.nodes.cell(node);
        if walk.nodes.parent_cell(node) == Some(cell + IVec2::X) {
            let (step, docked) = advance(walk, node, E, &[E])?;
            if !docked {
                bound_at_fixed(walk, BoundEdge::MaxX);
                break;
            }
            node = step;
        }
        let next = if up { [E, N] } else { [E, S] };
        let (step, docked) = advance(walk, node, E, &next)?;
        if !docked {
            bound_at_fixed(walk, BoundEdge::MaxX);
            break;
        }
        node = step;
    }
    Ok(())
}

fn at_least(bound: Option<i32>, value: i32) -> bool {
    bound.is_some_and(|b| b >= value)
}

fn at_most(bound: Option<i32>, value: i32) -> bool {
    bound.is_some_and(|b| b <= value)
}

/// Hints for the diagonal sweeps. `forward` is east when going down and
/// north when going up.
fn zigzag_next(bounds: &Bounds, cell: Cell, down: bool, forward: bool) -> Vec<Orientation> {
    let (min_x, max_x, min_y, max_y) = (bounds.min_x(), bounds.max_x(), bounds.min_y(), bounds.max_y());
    match (down, forward) {
        (true, true) => {
            let bottom = at_least(min_y, cell.y);
            let right = at_most(max_x, cell.x);
            match (bottom, right) {
                (true, true) => vec![N],
                (true, false) => vec![E, N],
                (false, true) => vec![S, N],
                (false, false) => vec![S, E],
            }
        }
        (true, false) => {
            if at_most(max_x, cell.x) {
                vec![N]
            } else if at_least(min_y, cell.y) {
                vec![E, N]
            } else {
                vec![E]
            }
        }
        (false, true) => {
            let left = at_least(min_x, cell.x);
            let top = at_most(max_y, cell.y);
            match (left, top) {
                (true, true) => vec![E],
                (true, false) => vec![N, E],
                (false, true) => vec![W, E],
                (false, false) => vec![W, N],
            }
        }
        (false, false) => {
            if at_most(max_y, cell.y) {
                vec![E]
            } else if at_least(min_x, cell.x) {
                vec![N, E]
            } else {
                vec![N]
            }
        }
    }
}

fn in_top_right_corner(walk: &Walk) -> bool {
    match (walk.bounds.max_x(), walk.bounds.max_y()) {
        (Some(x), Some(y)) => {
            let corner = IVec2::new(x, y);
            walk.fixed() == corner || walk.free() == corner
        }
        _ => false,
    }
}

/// Alternating east and south steps along a diagonal.
fn zigzag_down(walk: &mut Walk, start: NodeId, east_first: bool) -> Result<(NodeId, bool)> {
    let mut node = start;
    let mut east = east_first;
    loop {
        let cell = walk.nodes.cell(node);
        let direction = if east {
            if at_most(walk.bounds.max_x(), cell.x) {
                break;
            }
            E
        } else {
            if at_least(walk.bounds.min_y(), cell.y) {
                break;
            }
            S
        };
        let step = walk.nodes.child(node, direction);
        let target = walk.nodes.cell(step);
        let next = zigzag_next(&walk.bounds, target, true, east);
        walk.reconfigure(target, &next)?;
        if !walk.free_on_pad() {
            if east {
                walk.bounds.set(BoundEdge::MaxX, target.x - 1);
            } else {
                walk.bounds.set(BoundEdge::MinY, target.y + 1);
            }
            break;
        }
        if !east
            && walk.bounds.max_x() == Some(target.x)
            && !walk.robot.needs_reconnection(target + IVec2::new(0, 2))
        {
            walk.touch()?;
        } else {
            walk.reconnect()?;
            node = step;
        }
        east = !east;
    }
    let corner = east && in_top_right_corner(walk);
    Ok((node, corner))
}

/// Alternating north and west steps along a diagonal.
fn zigzag_up(walk: &mut Walk, start: NodeId, north_first: bool) -> Result<(NodeId, bool)> {
    let mut node = start;
    let mut north = north_first;
    loop {
        let cell = walk.nodes.cell(node);
        let direction = if north {
            if at_most(walk.bounds.max_y(), cell.y) {
                break;
            }
            N
        } else {
            if at_least(walk.bounds.min_x(), cell.x) {
                break;
            }
            W
        };
        let step = walk.nodes.child(node, direction);
        let target = walk.nodes.cell(step);
        let next = zigzag_next(&walk.bounds, target, false, north);
        walk.reconfigure(target, &next)?;
        if !walk.free_on_pad() {
            if north {
                walk.bounds.set(BoundEdge::MaxY, target.y - 1);
            } else {
                walk.bounds.set(BoundEdge::MinX, target.x + 1);
            }
            break;
        }
        if !north
            && walk.bounds.max_y() == Some(target.y)
            && !walk.robot.needs_reconnection(target + IVec2::new(2, 0))
        {
            walk.touch()?;
        } else {
            walk.reconnect()?;
            node = step;
        }
        north = !north;
    }
    let corner = north && in_top_right_corner(walk);
    Ok((node, corner))
}

/// Checks the cell above first (it belongs to this diagonal), then runs down.
fn zigzag_down_whole(walk: &mut Walk, start: NodeId) -> Result<(NodeId, bool)> {
    let mut node = start;
    let cell = walk.nodes.cell(node);
    if walk.bounds.max_y().is_none_or(|m| m > cell.y) {
        let above = walk.nodes.child(node, N);
        let above_cell = walk.nodes.cell(above);
        walk.reconfigure_blind(above_cell)?;
        if walk.free_on_pad() {
            if walk.robot.needs_reconnection(above_cell + IVec2::new(1, -1)) {
                walk.reconnect()?;
                node = walk.nodes.child(above, S);
                walk.reconfigure(cell, &[E, N])?;
                walk.reconnect()?;
            } else {
                walk.touch()?;
                node = walk.nodes.child(above, S);
            }
        } else {
            bound_at_fixed(walk, BoundEdge::MaxY);
        }
    }
    zigzag_down(walk, node, true)
}

/// Checks the cell to the right first, then runs up.
fn zigzag_up_whole(walk: &mut Walk, start: NodeId) -> Result<(NodeId, bool)> {
    let mut node = start;
    let cell = walk.nodes.cell(node);
    if walk.bounds.max_x().is_none_or(|m| m > cell.x) {
        let right = walk.nodes.child(node, E);
        let right_cell = walk.nodes.cell(right);
        walk.reconfigure_blind(right_cell)?;
        if walk.free_on_pad() {
            if walk.robot.needs_reconnection(right_cell + IVec2::new(-1, 1)) {
                walk.reconnect()?;
                node = walk.nodes.child(right, W);
                walk.reconfigure(cell, &[N])?;
                walk.reconnect()?;
            } else {
                walk.touch()?;
                node = walk.nodes.child(right, W);
            }
        } else {
            bound_at_fixed(walk, BoundEdge::MaxX);
        }
    }
    zigzag_up(walk, node, true)
}

/// Moves from the end of a downward diagonal to the start of the next upward one.
fn prepare_for_going_up(walk: &mut Walk, start: NodeId) -> Result<(NodeId, bool)> {
    let mut node = start;
    let cell = walk.nodes.cell(node);
    if walk.bounds.max_x().is_none_or(|m| m > cell.x) {
        let (step, docked) = advance(walk, node, E, &[N, E])?;
        if docked {
            return Ok((step, false));
        }
        bound_at_fixed(walk, BoundEdge::MaxX);
    }

    // Arrived from above: one extra step up before the next diagonal.
    if walk.nodes.parent_cell(node).is_some_and(|p| p.x == cell.x) {
        let (step, docked) = advance(walk, node, N, &[N, W])?;
        if !docked {
            bound_at_fixed(walk, BoundEdge::MaxY);
            return Ok((node, true));
        }
        node = step;
    }

    let cell = walk.nodes.cell(node);
    if walk.bounds.max_y().is_some_and(|m| m <= cell.y) {
        return Ok((walk.nodes.parent_or_self(node), true));
    }
    let (step, docked) = advance(walk, node, N, &[N])?;
    if !docked {
        bound_at_fixed(walk, BoundEdge::MaxY);
        return Ok((node, true));
    }
    Ok((step, false))
}

/// Moves from the end of an upward diagonal to the start of the next downward one.
fn prepare_for_going_down(walk: &mut Walk, start: NodeId) -> Result<(NodeId, bool)> {
    let mut node = start;
    let cell = walk.nodes.cell(node);
    if walk.bounds.max_y().is_none_or(|m| m > cell.y) {
        let (step, docked) = advance(walk, node, N, &[N, E])?;
        if docked {
            return Ok((step, false));
        }
        bound_at_fixed(walk, BoundEdge::MaxY);
    }

    // Arrived from the right: one extra step right before the next diagonal.
    if walk.nodes.parent_cell(node).is_some_and(|p| p.y == cell.y) {
        let (step, docked) = advance(walk, node, E, &[E])?;
        if !docked {
            bound_at_fixed(walk, BoundEdge::MaxX);
            return Ok((node, true));
        }
        node = step;
    }

    let cell = walk.nodes.cell(node);
    if walk.bounds.max_x().is_some_and(|m| m <= cell.x) {
        return Ok((walk.nodes.parent_or_self(node), true));
    }
    let (step, docked) = advance(walk, node, E, &[E])?;
    if !docked {
        bound_at_fixed(walk, BoundEdge::MaxX);
        return Ok((node, true));
    }
    Ok((step, false))
}

/// Diagonal sweeps until the top-right corner is reached.
pub fn zigzag(walk: &mut Walk) -> Result<()> {
    let root = walk.nodes.detached(IVec2::ZERO);
    walk.emit_current()?;
    let mut node = go_to_corner(walk, root)?;
    let mut down = true;
    loop {
        let (end, corner) = if down {
            zigzag_down_whole(walk, node)?
        } else {
            zigzag_up_whole(walk, node)?
        };
        node = end;
        if corner {
            break;
        }
        let (end, corner) = if down {
            prepare_for_going_up(walk, node)?
        } else {
            prepare_for_going_down(walk, node)?
        };
        node = end;
        if corner {
            break;
        }
        down = !down;
    }
    Ok(())
}
