// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The adaptive pooled grid.
//!
//! ## Usage
//!
//! 1) Configure breakpoint rules with [`PooledGrid::set_rules`].
//! 2) Report the available width with [`PooledGrid::set_available_width`] whenever
//!    it changes.
//! 3) Replace the item set with [`PooledGrid::set_items`]. Instances are matched
//!    by identity: surviving identities keep their view, vanished ones are
//!    released to the pool, and new ones are acquired.
//! 4) Call [`PooledGrid::tick`] every frame to move views toward their slots.
//!
//! Slots fill row-major in item order. Row offsets grow downward as negative y,
//! so slot `(row, column)` sits at `(column × width, −row × height)`.

use core::fmt;
use core::hash::Hash;
use core::time::Duration;

use hashbrown::{HashMap, HashSet};
use kurbo::{Point, Size};
use smallvec::SmallVec;

use crate::breakpoint::{BreakpointRule, select_rule};
use crate::pool::InstancePool;
use crate::smooth::SmoothedPoint;

/// A pooled view displaying one grid entry.
pub trait EntryView<K, T> {
    /// Show `item`, identified by `id`.
    fn bind(&mut self, id: K, item: &T);

    /// Resize to one entry.
    fn set_size(&mut self, size: Size);

    /// Move to a displayed position.
    fn set_position(&mut self, position: Point);
}

/// One item in the grid and its assigned slot.
#[derive(Clone, Debug, PartialEq)]
pub struct GridEntry<K, T> {
    id: K,
    item: T,
    row: u32,
    column: u32,
    offset: Point,
}

impl<K: Copy, T> GridEntry<K, T> {
    /// Stable identity.
    pub fn id(&self) -> K {
        self.id
    }

    /// The payload.
    pub fn item(&self) -> &T {
        &self.item
    }

    /// Slot row.
    pub fn row(&self) -> u32 {
        self.row
    }

    /// Slot column.
    pub fn column(&self) -> u32 {
        self.column
    }

    /// Target offset of the slot.
    pub fn offset(&self) -> Point {
        self.offset
    }
}

/// Grid tuning.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GridConfig {
    /// Entry shape; only its aspect ratio is used (default: 120×120).
    pub reference_entry_size: Size,
    /// Smoothing time toward a new slot, in seconds (default: 0.2).
    pub smooth_time: f64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            reference_entry_size: Size::new(120.0, 120.0),
            smooth_time: 0.2,
        }
    }
}

impl GridConfig {
    /// Set the reference entry size.
    #[must_use]
    pub fn with_reference_entry_size(mut self, size: Size) -> Self {
        self.reference_entry_size = size;
        self
    }

    /// Set the smoothing time.
    #[must_use]
    pub fn with_smooth_time(mut self, seconds: f64) -> Self {
        self.smooth_time = seconds;
        self
    }

    /// Height over width of an entry; 1 when the reference width is not positive.
    pub fn aspect_ratio(&self) -> f64 {
        let Size { width, height } = self.reference_entry_size;
        if width > 0.0 { height / width } else { 1.0 }
    }
}

struct Bound<K, T, V> {
    entry: GridEntry<K, T>,
    view: V,
    motion: SmoothedPoint,
    positioned: bool,
}

/// A grid of pooled views laid out by breakpoint rules.
pub struct PooledGrid<K, T, P: InstancePool> {
    config: GridConfig,
    rules: Vec<BreakpointRule>,
    pool: P,
    bound: Vec<Bound<K, T, P::Instance>>,
    available_width: f64,
    entry_size: Size,
    columns: u32,
    rows: u32,
}

impl<K: fmt::Debug, T, P: InstancePool + fmt::Debug> fmt::Debug for PooledGrid<K, T, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PooledGrid")
            .field("config", &self.config)
            .field("rules", &self.rules)
            .field("pool", &self.pool)
            .field("len", &self.bound.len())
            .field("available_width", &self.available_width)
            .field("entry_size", &self.entry_size)
            .field("columns", &self.columns)
            .field("rows", &self.rows)
            .finish_non_exhaustive()
    }
}

impl<K, T, P> PooledGrid<K, T, P>
where
    K: Copy + Eq + Hash + fmt::Debug,
    P: InstancePool,
    P::Instance: EntryView<K, T>,
{
    /// An empty grid with no rules and zero available width.
    pub fn new(config: GridConfig, pool: P) -> Self {
        Self {
            entry_size: config.reference_entry_size,
            config,
            rules: Vec::new(),
            pool,
            bound: Vec::new(),
            available_width: 0.0,
            columns: 1,
            rows: 0,
        }
    }

    /// Grid tuning.
    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    /// Breakpoint rules, in declaration order.
    pub fn rules(&self) -> &[BreakpointRule] {
        &self.rules
    }

    /// The instance pool.
    pub fn pool(&self) -> &P {
        &self.pool
    }

    /// The instance pool, mutably.
    pub fn pool_mut(&mut self) -> &mut P {
        &mut self.pool
    }

    /// Width the grid lays out into.
    pub fn available_width(&self) -> f64 {
        self.available_width
    }

    /// Size of one entry.
    pub fn entry_size(&self) -> Size {
        self.entry_size
    }

    /// Column count of the current layout.
    pub fn columns(&self) -> u32 {
        self.columns
    }

    /// Rows occupied by the current entries.
    pub fn rows(&self) -> u32 {
        self.rows
    }

    /// Extent of all occupied slots.
    pub fn content_size(&self) -> Size {
        Size::new(
            f64::from(self.columns) * self.entry_size.width,
            f64::from(self.rows) * self.entry_size.height,
        )
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.bound.len()
    }

    /// Returns `true` if the grid has no entries.
    pub fn is_empty(&self) -> bool {
        self.bound.is_empty()
    }

    /// Entries in slot order.
    pub fn entries(&self) -> impl Iterator<Item = &GridEntry<K, T>> {
        self.bound.iter().map(|b| &b.entry)
    }

    /// Entries paired with their bound views, in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (&GridEntry<K, T>, &P::Instance)> {
        self.bound.iter().map(|b| (&b.entry, &b.view))
    }

    /// Currently displayed position of the entry `id`.
    pub fn displayed_position(&self, id: K) -> Option<Point> {
        self.bound
            .iter()
            .find(|b| b.entry.id == id && b.positioned)
            .map(|b| b.motion.position())
    }

    /// Replace the breakpoint rules and lay out again.
    pub fn set_rules(&mut self, rules: impl IntoIterator<Item = BreakpointRule>) {
        self.rules = rules.into_iter().collect();
        self.recalculate_layout();
    }

    /// Set the width to lay out into.
    ///
    /// Non-finite or negative widths are rejected and return `false`.
    pub fn set_available_width(&mut self, width: f64) -> bool {
        if !width.is_finite() || width < 0.0 {
            log::warn!("rejecting available width {width}");
            return false;
        }
        self.available_width = width;
        self.recalculate_layout();
        true
    }

    /// Replace the item set, matching views by identity.
    ///
    /// Every entry is bound again, including reused ones, and jumps to its
    /// slot on the next tick. When an identity appears more than once, the
    /// first occurrence keeps the existing view.
    pub fn set_items(&mut self, items: impl IntoIterator<Item = (K, T)>) {
        let items: Vec<(K, T)> = items.into_iter().collect();
        let wanted: HashSet<K> = items.iter().map(|(id, _)| *id).collect();

        let mut reusable: HashMap<K, SmallVec<[P::Instance; 1]>> = HashMap::new();
        for bound in core::mem::take(&mut self.bound) {
            if wanted.contains(&bound.entry.id) {
                reusable.entry(bound.entry.id).or_default().push(bound.view);
            } else {
                self.pool.release(bound.view);
            }
        }

        let mut acquired = 0_usize;
        for (id, item) in items {
            let reused = reusable.get_mut(&id).and_then(|views| {
                if views.is_empty() {
                    None
                } else {
                    Some(views.remove(0))
                }
            });
            let mut view = match reused {
                Some(view) => view,
                None => {
                    acquired += 1;
                    let mut view = self.pool.acquire();
                    self.pool.activate(&mut view);
                    view
                }
            };
            view.bind(id, &item);
            self.bound.push(Bound {
                entry: GridEntry {
                    id,
                    item,
                    row: 0,
                    column: 0,
                    offset: Point::ZERO,
                },
                view,
                motion: SmoothedPoint::default(),
                positioned: false,
            });
        }

        for view in reusable.into_values().flatten() {
            self.pool.release(view);
        }
        log::debug!(
            "grid bound {} entries ({acquired} newly acquired)",
            self.bound.len()
        );
        self.recalculate_layout();
    }

    /// [`PooledGrid::set_items`] with identities derived from each item.
    pub fn set_items_with(
        &mut self,
        items: impl IntoIterator<Item = T>,
        mut id_fn: impl FnMut(&T) -> K,
    ) {
        self.set_items(items.into_iter().map(|item| (id_fn(&item), item)));
    }

    /// Resolve the layout for the current width and reassign slots.
    ///
    /// When no rule applies, or the resolved layout is degenerate, the previous
    /// column count and entry size are kept.
    pub fn recalculate_layout(&mut self) {
        let width = self.available_width;
        match select_rule(&self.rules, width) {
            None => log::debug!("no breakpoint rule applies to width {width}"),
            Some(rule) => {
                let plan = rule.plan(width);
                if plan.columns == 0 {
                    log::warn!(
                        "rule {:?} resolved zero columns for width {width}",
                        rule.name()
                    );
                } else {
                    let entry_width = width / f64::from(plan.columns);
                    let size = Size::new(entry_width, entry_width * self.config.aspect_ratio());
                    if valid_size(size) {
                        self.columns = plan.columns;
                        self.entry_size = size;
                        for bound in &mut self.bound {
                            bound.view.set_size(size);
                        }
                    } else {
                        log::warn!("rejecting entry size {size:?} for width {width}");
                    }
                }
            }
        }
        self.assign_slots();
    }

    /// Advance every view toward its slot.
    pub fn tick(&mut self, dt: Duration) {
        let dt = dt.as_secs_f64();
        let smooth_time = self.config.smooth_time;
        for bound in &mut self.bound {
            let target = bound.entry.offset;
            let position = if bound.positioned {
                bound.motion.step(target, smooth_time, dt)
            } else {
                bound.motion.jump_to(target);
                bound.positioned = true;
                target
            };
            bound.view.set_position(position);
        }
    }

    fn assign_slots(&mut self) {
        let Size { width, height } = self.entry_size;
        let columns = self.columns.max(1);
        let mut row = 0_u32;
        let mut column = 0_u32;
        for bound in &mut self.bound {
            let offset = Point::new(f64::from(column) * width, -f64::from(row) * height);
            if offset.is_finite() {
                bound.entry.row = row;
                bound.entry.column = column;
                bound.entry.offset = offset;
            } else {
                log::warn!("rejecting slot offset {offset:?} for {:?}", bound.entry.id);
            }
            column += 1;
            if column >= columns {
                column = 0;
                row += 1;
            }
        }
        self.rows = if column > 0 { row + 1 } else { row };
    }
}

fn valid_size(size: Size) -> bool {
    size.is_finite() && size.width > 0.0 && size.height > 0.0
}
