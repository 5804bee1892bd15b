//! # rofibot-walk
//!
//! Coverage planning for a modular robot walking a 2D connector pad.
//!
//! A rofibot (one universal module, or two joined rigidly) is docked to a pad
//! of connector points that may contain holes and whose size is not known in
//! advance. A walk moves it so that it docks onto, or at least touches, every
//! connectable cell, discovering holes and pad edges by probing. The result is
//! the ordered trace of mechanical [`Configuration`]s plus the tallies of
//! joint rotations and dock changes needed to execute it.
//!
//! Start with [`Planner`] and a [`PlannerConfig`]; pick one of the nine
//! [`Algorithm`]s. The [`sink`] module renders results in the text format
//! consumed by the RoFI tooling, and [`generator`] makes random pads.

pub mod action;
pub mod backtrack;
pub mod configuration;
pub mod dfs;
pub mod double;
pub mod error;
pub mod generator;
pub mod geometry;
pub mod grid;
pub mod pad;
pub mod planner;
pub mod rofibot;
pub mod single;
pub mod sink;
pub mod strategy;
pub mod sweep;
pub mod walk;

pub use action::*;
pub use configuration::*;
pub use double::*;
pub use error::*;
pub use geometry::*;
pub use grid::*;
pub use pad::*;
pub use planner::*;
pub use rofibot::{
    Connector, FIRST_ROBOT_ID, Morphology, Rofibot, SECOND_ROBOT_ID, current_configuration, look_and_touch,
    reconnect,
};
pub use single::*;
pub use sink::*;
pub use strategy::{BacktrackStrategy, DfsOrdering, DfsStrategy};
pub use walk::Walk;
