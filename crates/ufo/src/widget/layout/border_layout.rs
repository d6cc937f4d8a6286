//! Border layout with five regions.
//!
//! Children are assigned to the north, south, east, west or center region
//! by their layout constraint ([`Constraint::Region`] or a region name such
//! as `"north"`). The first child without a recognized region becomes the
//! center child.
//!
//! [`Constraint::Region`]: crate::widget::Constraint::Region

use ufo_core::{Dimension, Rect};

use super::traits::{ChildPlacement, LayoutManager, visible_children};
use crate::widget::{BorderRegion, WidgetId, WidgetTree};

/// Arranges children around a center region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BorderLayout {
    h_gap: i32,
    v_gap: i32,
}

#[derive(Debug, Default)]
struct Regions {
    north: Option<WidgetId>,
    south: Option<WidgetId>,
    east: Option<WidgetId>,
    west: Option<WidgetId>,
    center: Option<WidgetId>,
}

impl Regions {
    fn slot(&mut self, region: BorderRegion) -> &mut Option<WidgetId> {
        match region {
            BorderRegion::North => &mut self.north,
            BorderRegion::South => &mut self.south,
            BorderRegion::East => &mut self.east,
            BorderRegion::West => &mut self.west,
            BorderRegion::Center => &mut self.center,
        }
    }
}

impl BorderLayout {
    /// Create a border layout without gaps.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a border layout with horizontal and vertical gaps.
    pub fn with_gaps(h_gap: i32, v_gap: i32) -> Self {
        Self {
            h_gap: h_gap.max(0),
            v_gap: v_gap.max(0),
        }
    }

    /// Horizontal gap between west, center and east.
    pub fn h_gap(&self) -> i32 {
        self.h_gap
    }

    /// Vertical gap between north, the middle row and south.
    pub fn v_gap(&self) -> i32 {
        self.v_gap
    }

    fn regions(&self, tree: &WidgetTree, container: WidgetId) -> Regions {
        let mut regions = Regions::default();
        let mut center_claimed_by_default = false;
        for child in visible_children(tree, container) {
            let region = tree.constraint(child).and_then(|c| c.region());
            let region = match region {
                Some(region) => region,
                None if regions.center.is_none() && !center_claimed_by_default => {
                    center_claimed_by_default = true;
                    BorderRegion::Center
                }
                None => {
                    tracing::warn!(
                        target: "ufo::layout",
                        ?container,
                        ?child,
                        "border layout child without region left unpositioned"
                    );
                    continue;
                }
            };
            let slot = regions.slot(region);
            if slot.is_none() {
                *slot = Some(child);
            } else {
                tracing::warn!(
                    target: "ufo::layout",
                    ?container,
                    ?child,
                    ?region,
                    "border layout region already taken"
                );
            }
        }
        regions
    }
}

fn size_of(tree: &WidgetTree, widget: Option<WidgetId>) -> Dimension {
    widget.map_or(Dimension::ZERO, |w| tree.preferred_size(w))
}

impl LayoutManager for BorderLayout {
    fn preferred_layout_size(
        &self,
        tree: &WidgetTree,
        container: WidgetId,
        _max: Dimension,
    ) -> Dimension {
        let regions = self.regions(tree, container);
        let north = size_of(tree, regions.north);
        let south = size_of(tree, regions.south);
        let east = size_of(tree, regions.east);
        let west = size_of(tree, regions.west);
        let center = size_of(tree, regions.center);

        let mut middle_w = west.w + center.w + east.w;
        if regions.west.is_some() {
            middle_w += self.h_gap;
        }
        if regions.east.is_some() {
            middle_w += self.h_gap;
        }
        let mut h = north.h + south.h + west.h.max(center.h).max(east.h);
        if regions.north.is_some() {
            h += self.v_gap;
        }
        if regions.south.is_some() {
            h += self.v_gap;
        }
        let w = north.w.max(south.w).max(middle_w);

        Dimension::new(w, h).grow(tree.insets(container))
    }

    fn layout_container(&self, tree: &WidgetTree, container: WidgetId) -> Vec<ChildPlacement> {
        let regions = self.regions(tree, container);
        let inner = tree.inner_bounds(container);
        let mut top = inner.y;
        let mut bottom = inner.bottom();
        let mut left = inner.x;
        let mut right = inner.right();
        let mut placements = Vec::new();

        // Height-for-width when the preferred width does not fit.
        let row_height = |widget: WidgetId| {
            let preferred = tree.preferred_size(widget);
            if preferred.w > inner.w {
                tree.preferred_size_within(widget, Dimension::new(inner.w, Dimension::MAX.h))
                    .h
            } else {
                preferred.h
            }
        };

        if let Some(north) = regions.north {
            let h = row_height(north).min(bottom - top).max(0);
            placements.push(ChildPlacement::new(north, Rect::new(left, top, inner.w, h)));
            top += h + self.v_gap;
        }
        if let Some(south) = regions.south {
            let h = row_height(south).min((bottom - top).max(0));
            placements.push(ChildPlacement::new(
                south,
                Rect::new(left, bottom - h, inner.w, h),
            ));
            bottom -= h + self.v_gap;
        }

        let middle_h = (bottom - top).max(0);
        if let Some(west) = regions.west {
            let w = tree.preferred_size(west).w.min((right - left).max(0));
            placements.push(ChildPlacement::new(west, Rect::new(left, top, w, middle_h)));
            left += w + self.h_gap;
        }
        if let Some(east) = regions.east {
            let w = tree.preferred_size(east).w.min((right - left).max(0));
            placements.push(ChildPlacement::new(
                east,
                Rect::new(right - w, top, w, middle_h),
            ));
            right -= w + self.h_gap;
        }
        if let Some(center) = regions.center {
            placements.push(ChildPlacement::new(
                center,
                Rect::new(left, top, (right - left).max(0), middle_h),
            ));
        }
        placements
    }
}
