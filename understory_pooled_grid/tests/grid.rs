// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tests for the `understory_pooled_grid` crate.
//!
//! These follow item sets through several updates and check which views are
//! reused, released, and acquired, and where the breakpoints land.

use std::cell::Cell;
use std::rc::Rc;

use core::time::Duration;

use kurbo::{Point, Size};
use understory_pooled_grid::{
    BreakpointRule, EntryView, GridConfig, InstancePool, PooledGrid, VecPool,
};

#[derive(Debug, Default)]
struct Tile {
    serial: u32,
    shown: Option<(u32, &'static str)>,
    binds: u32,
    position: Option<Point>,
}

impl EntryView<u32, &'static str> for Tile {
    fn bind(&mut self, id: u32, item: &&'static str) {
        self.shown = Some((id, *item));
        self.binds += 1;
    }

    fn set_size(&mut self, _size: Size) {}

    fn set_position(&mut self, position: Point) {
        self.position = Some(position);
    }
}

type Grid = PooledGrid<u32, &'static str, VecPool<Tile>>;

/// A grid whose pool stamps each new tile with a serial and counts resets.
fn grid(resets: Rc<Cell<u32>>) -> Grid {
    let mut next = 0;
    let pool = VecPool::new(move || {
        next += 1;
        Tile {
            serial: next,
            ..Tile::default()
        }
    })
    .with_reset(move |tile: &mut Tile| {
        resets.set(resets.get() + 1);
        tile.shown = None;
        tile.position = None;
    });
    let mut grid = PooledGrid::new(GridConfig::default(), pool);
    grid.set_rules([
        BreakpointRule::new()
            .named("narrow")
            .with_max_area_width(400.0)
            .with_preferred_columns(2),
        BreakpointRule::new()
            .named("wide")
            .with_min_entry_width(150.0)
            .with_preferred_entry_width(200.0)
            .with_max_entry_width(300.0),
    ]);
    grid.set_available_width(600.0);
    grid
}

fn serials(grid: &Grid) -> Vec<(u32, u32)> {
    grid.iter().map(|(e, tile)| (e.id(), tile.serial)).collect()
}

#[test]
fn identities_keep_their_views_across_updates() {
    let resets = Rc::new(Cell::new(0));
    let mut grid = grid(resets.clone());
    grid.set_items([(1, "a"), (2, "b"), (3, "c")]);
    assert_eq!(serials(&grid), [(1, 1), (2, 2), (3, 3)]);

    // Reorder, drop 2, add 4: 1 and 3 keep their tiles, 4 recycles 2's tile.
    grid.set_items([(3, "c"), (4, "d"), (1, "a")]);
    assert_eq!(serials(&grid), [(3, 3), (4, 2), (1, 1)]);
    assert_eq!(resets.get(), 1, "only the vanished tile is reset");
    assert_eq!(grid.pool().created_count(), 3);
    assert_eq!(grid.pool().idle_count(), 0);

    let (_, recycled) = grid.iter().nth(1).unwrap();
    assert_eq!(recycled.shown, Some((4, "d")));

    // Every entry is rebound, reused or not.
    assert!(grid.iter().all(|(e, tile)| tile.shown == Some((e.id(), *e.item()))));
    let (_, first) = grid.iter().next().unwrap();
    assert_eq!(first.binds, 2);
}

#[test]
fn duplicate_identities_get_distinct_views() {
    let resets = Rc::new(Cell::new(0));
    let mut grid = grid(resets.clone());
    grid.set_items([(7, "x")]);
    grid.set_items([(7, "x"), (7, "x again")]);
    assert_eq!(serials(&grid), [(7, 1), (7, 2)]);

    grid.set_items([(7, "x")]);
    assert_eq!(serials(&grid), [(7, 1)]);
    assert_eq!(resets.get(), 1, "the surplus duplicate is released");
}

#[test]
fn clearing_releases_everything() {
    let resets = Rc::new(Cell::new(0));
    let mut grid = grid(resets.clone());
    grid.set_items([(1, "a"), (2, "b")]);
    grid.set_items([]);
    assert!(grid.is_empty());
    assert_eq!(grid.rows(), 0);
    assert_eq!(grid.pool().idle_count(), 2);
    assert_eq!(resets.get(), 2);
}

#[test]
fn breakpoints_follow_the_width() {
    let mut grid = grid(Rc::default());
    grid.set_items([(1, "a"), (2, "b"), (3, "c"), (4, "d"), (5, "e")]);
    assert_eq!(grid.columns(), 3);
    assert_eq!(grid.rows(), 2);
    assert_eq!(grid.content_size(), Size::new(600.0, 400.0));

    grid.set_available_width(300.0);
    assert_eq!(grid.columns(), 2, "narrow rule applies below its ceiling");
    assert_eq!(grid.entry_size(), Size::new(150.0, 150.0));
    assert_eq!(grid.rows(), 3);
    let last = grid.entries().last().map(|e| (e.row(), e.column(), e.offset()));
    assert_eq!(last, Some((2, 0, Point::new(0.0, -300.0))));
}

#[test]
fn no_matching_rule_leaves_layout_alone() {
    let mut grid = grid(Rc::default());
    grid.set_items([(1, "a"), (2, "b")]);
    grid.set_rules([BreakpointRule::new()
        .with_max_area_width(100.0)
        .with_preferred_columns(1)]);
    assert_eq!(grid.columns(), 3);
    assert_eq!(grid.entry_size(), Size::new(200.0, 200.0));
}

#[test]
fn set_items_with_derives_identity() {
    let mut grid = grid(Rc::default());
    grid.set_items_with(["ant", "bee", "cat"], |name| u32::from(name.as_bytes()[0]));
    let ids: Vec<_> = grid.entries().map(|e| e.id()).collect();
    assert_eq!(ids, [97, 98, 99]);
}

#[test]
fn views_ease_after_relayout_and_jump_after_rebinding() {
    let mut grid = grid(Rc::default());
    grid.set_items([(1, "a"), (2, "b")]);
    let frame = Duration::from_millis(16);
    grid.tick(frame);
    let second = |grid: &Grid| grid.iter().nth(1).and_then(|(_, t)| t.position);
    assert_eq!(second(&grid), Some(Point::new(200.0, 0.0)));

    grid.set_available_width(300.0);
    grid.tick(frame);
    let eased = second(&grid).map_or(f64::NAN, |p| p.x);
    assert!(eased < 200.0 && eased > 150.0, "moving toward 150, got {eased}");

    for _ in 0..240 {
        grid.tick(frame);
    }
    let settled = second(&grid).map_or(f64::NAN, |p| p.x);
    assert!((settled - 150.0).abs() < 1e-3, "settles on the slot, got {settled}");

    grid.set_items([(2, "b"), (1, "a")]);
    grid.tick(frame);
    assert_eq!(grid.iter().next().and_then(|(_, t)| t.position), Some(Point::ZERO));
}

#[test]
fn pool_trait_default_activate_is_a_no_op() {
    let mut pool = VecPool::new(Tile::default);
    let mut tile = pool.acquire();
    pool.activate(&mut tile);
    assert_eq!(tile.binds, 0);
}
