// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_pooled_grid --heading-base-level=0

//! Understory Pooled Grid: an adaptive grid of recycled views.
//!
//! This crate lays out a flat list of identified items into a grid whose column
//! count adapts to the available width, and keeps one pooled view per item:
//!
//! - [`BreakpointRule`]: column constraints (preferred count, minimum, preferred
//!   and maximum entry width) applied up to an area width ceiling.
//!   [`select_rule`] picks the rule for a width and [`BreakpointRule::plan`]
//!   resolves a [`ColumnPlan`].
//! - [`InstancePool`]: where views come from and go back to. [`VecPool`] is a
//!   factory-backed implementation with an optional reset hook.
//! - [`PooledGrid`]: matches items to views by identity across updates, assigns
//!   row-major slots, and eases each view toward its slot with
//!   [`smooth_damp`].
//!
//! The grid does not render or measure anything. Hosts implement [`EntryView`]
//! for their view type, report the available width, and call
//! [`PooledGrid::tick`] once per frame.
//!
//! ## Minimal example
//!
//! ```rust
//! use core::time::Duration;
//! use kurbo::{Point, Size};
//! use understory_pooled_grid::{
//!     BreakpointRule, EntryView, GridConfig, PooledGrid, VecPool,
//! };
//!
//! #[derive(Default)]
//! struct Card {
//!     title: String,
//!     at: Point,
//! }
//!
//! impl EntryView<u64, &'static str> for Card {
//!     fn bind(&mut self, _id: u64, item: &&'static str) {
//!         self.title = item.to_string();
//!     }
//!     fn set_size(&mut self, _size: Size) {}
//!     fn set_position(&mut self, position: Point) {
//!         self.at = position;
//!     }
//! }
//!
//! let mut grid = PooledGrid::new(GridConfig::default(), VecPool::new(Card::default));
//! grid.set_rules([BreakpointRule::new()
//!     .with_min_entry_width(150.0)
//!     .with_preferred_entry_width(200.0)
//!     .with_max_entry_width(300.0)]);
//! grid.set_available_width(600.0);
//! grid.set_items([(1, "one"), (2, "two"), (3, "three"), (4, "four")]);
//!
//! assert_eq!(grid.columns(), 3);
//! assert_eq!(grid.entry_size(), Size::new(200.0, 200.0));
//!
//! // The first tick after binding places views directly on their slots.
//! grid.tick(Duration::from_millis(16));
//! let (_, fourth) = grid.iter().nth(3).unwrap();
//! assert_eq!(fourth.title, "four");
//! assert_eq!(fourth.at, Point::new(0.0, -200.0));
//! ```

mod breakpoint;
mod grid;
mod pool;
mod smooth;

pub use breakpoint::{BreakpointRule, ColumnPlan, select_rule};
pub use grid::{EntryView, GridConfig, GridEntry, PooledGrid};
pub use pool::{InstancePool, VecPool};
pub use smooth::{SmoothedPoint, smooth_damp};
