//! Flexbox
//!
//! Follows the CSS flex layout algorithm: flex base sizes, line collection,
//! resolving flexible lengths with min/max freezing, cross sizing with
//! stretch and baseline alignment, `align-content` for multi-line
//! containers, then main-axis distribution through auto margins and
//! `justify-content`. Every item is measured first and laid out for real
//! exactly once, at the end.

use std::ops::Range;
use std::rc::Rc;

use plume_core::{Edges, Point, Rect, Size};

use super::{fit_content, Axis, Flow, IntrinsicSizes, LayoutEngine, Sizing};
use crate::computed::ComputedStyle;
use crate::style::{AlignContent, AlignItems, FlexWrap, JustifyContent, Overflow};
use crate::tree::WidgetId;

const FIT_EPSILON: f32 = 0.01;

/// (start, end) of `edges` along the main axis
fn main_edges<T: Copy>(edges: &Edges<T>, row: bool) -> (T, T) {
    if row {
        (edges.left, edges.right)
    } else {
        (edges.top, edges.bottom)
    }
}

fn cross_edges<T: Copy>(edges: &Edges<T>, row: bool) -> (T, T) {
    if row {
        (edges.top, edges.bottom)
    } else {
        (edges.left, edges.right)
    }
}

#[derive(Debug)]
pub(super) struct FlexItem {
    id: WidgetId,
    style: Rc<ComputedStyle>,
    intrinsic: IntrinsicSizes,
    margin: Edges<f32>,
    margin_auto: Edges<bool>,
    grow: f32,
    shrink: f32,
    /// Flex base size (border box)
    basis: f32,
    hypothetical: f32,
    min_main: f32,
    max_main: f32,
    /// Main size being resolved, final once frozen
    target: f32,
    frozen: bool,
    /// Specified cross size, if any
    cross_definite: Option<f32>,
    cross: f32,
    /// Distance from the cross-start margin edge to the first baseline
    ascent: f32,
    align: AlignItems,
    main_pos: f32,
    cross_pos: f32,
}

impl FlexItem {
    fn main_margin(&self, row: bool) -> f32 {
        let (start, end) = main_edges(&self.margin, row);
        start + end
    }

    fn cross_margin(&self, row: bool) -> f32 {
        let (start, end) = cross_edges(&self.margin, row);
        start + end
    }

    fn outer_hypothetical(&self, row: bool) -> f32 {
        self.hypothetical + self.main_margin(row)
    }

    fn outer_cross(&self, row: bool) -> f32 {
        self.cross + self.cross_margin(row)
    }

    fn clamp_main(&self, value: f32) -> f32 {
        value.min(self.max_main).max(self.min_main)
    }
}

/// Collect items into lines; a single line when not wrapping or when the
/// main size is indefinite
fn collect_lines(
    items: &[FlexItem],
    row: bool,
    wrap: bool,
    main_size: Option<f32>,
    gap: f32,
) -> Vec<Range<usize>> {
    let available = match main_size {
        Some(size) if wrap => size,
        _ => return vec![0..items.len()],
    };
    let mut lines = Vec::new();
    let mut start = 0;
    let mut used = 0.0;
    for (i, item) in items.iter().enumerate() {
        let outer = item.outer_hypothetical(row);
        if i > start && used + gap + outer > available + FIT_EPSILON {
            lines.push(start..i);
            start = i;
            used = 0.0;
        }
        used += if i > start { gap + outer } else { outer };
    }
    lines.push(start..items.len());
    lines
}

/// Resolve the main sizes of one line, freezing items that hit min/max and
/// redistributing what they leave
pub(super) fn resolve_flexible_lengths(
    items: &mut [FlexItem],
    row: bool,
    available: Option<f32>,
    gap: f32,
) {
    let Some(available) = available else {
        for item in items.iter_mut() {
            item.target = item.hypothetical;
        }
        return;
    };
    let fixed = items.iter().map(|i| i.main_margin(row)).sum::<f32>()
        + gap * items.len().saturating_sub(1) as f32;
    let hypothetical: f32 = items.iter().map(|i| i.hypothetical).sum();
    let growing = hypothetical + fixed < available;

    for item in items.iter_mut() {
        let factor = if growing { item.grow } else { item.shrink };
        item.frozen = factor == 0.0
            || (growing && item.basis > item.hypothetical)
            || (!growing && item.basis < item.hypothetical);
        item.target = if item.frozen {
            item.hypothetical
        } else {
            item.basis
        };
    }

    let used = |items: &[FlexItem]| -> f32 {
        items
            .iter()
            .map(|i| if i.frozen { i.target } else { i.basis })
            .sum::<f32>()
            + fixed
    };
    let initial_free = available - used(items);

    while items.iter().any(|i| !i.frozen) {
        let mut free = available - used(items);
        let factors: f32 = items
            .iter()
            .filter(|i| !i.frozen)
            .map(|i| if growing { i.grow } else { i.shrink })
            .sum();
        if factors < 1.0 {
            let scaled = initial_free * factors;
            if scaled.abs() < free.abs() {
                free = scaled;
            }
        }

        if growing {
            for item in items.iter_mut().filter(|i| !i.frozen) {
                item.target = item.basis + free * item.grow / factors;
            }
        } else {
            let scaled_sum: f32 = items
                .iter()
                .filter(|i| !i.frozen)
                .map(|i| i.shrink * i.basis)
                .sum();
            for item in items.iter_mut().filter(|i| !i.frozen) {
                item.target = if scaled_sum > 0.0 {
                    item.basis + free * (item.shrink * item.basis) / scaled_sum
                } else {
                    item.basis
                };
            }
        }

        let violation: f32 = items
            .iter()
            .filter(|i| !i.frozen)
            .map(|i| i.clamp_main(i.target) - i.target)
            .sum();
        for item in items.iter_mut().filter(|i| !i.frozen) {
            let clamped = item.clamp_main(item.target);
            let freeze = if violation == 0.0 {
                true
            } else if violation > 0.0 {
                clamped > item.target
            } else {
                clamped < item.target
            };
            if freeze {
                item.target = clamped;
                item.frozen = true;
            }
        }
    }
}

/// Leading space and extra spacing between `count` items for `free` space
fn distribute_justify(justify: JustifyContent, free: f32, count: usize) -> (f32, f32) {
    let n = count as f32;
    match justify {
        JustifyContent::FlexStart => (0.0, 0.0),
        JustifyContent::FlexEnd => (free, 0.0),
        JustifyContent::Center => (free / 2.0, 0.0),
        JustifyContent::SpaceBetween if count > 1 && free > 0.0 => (0.0, free / (n - 1.0)),
        JustifyContent::SpaceBetween => (0.0, 0.0),
        JustifyContent::SpaceAround if free > 0.0 => (free / (2.0 * n), free / n),
        JustifyContent::SpaceEvenly if free > 0.0 => (free / (n + 1.0), free / (n + 1.0)),
        JustifyContent::SpaceAround | JustifyContent::SpaceEvenly => (free / 2.0, 0.0),
    }
}

/// Leading space, spacing and per-line growth for `align-content`
fn distribute_lines(align: AlignContent, free: f32, count: usize) -> (f32, f32, f32) {
    let n = count as f32;
    match align {
        AlignContent::Start => (0.0, 0.0, 0.0),
        AlignContent::End => (free, 0.0, 0.0),
        AlignContent::Center => (free / 2.0, 0.0, 0.0),
        AlignContent::Stretch if free > 0.0 => (0.0, 0.0, free / n),
        AlignContent::Stretch => (0.0, 0.0, 0.0),
        AlignContent::SpaceBetween if count > 1 && free > 0.0 => (0.0, free / (n - 1.0), 0.0),
        AlignContent::SpaceBetween => (0.0, 0.0, 0.0),
        AlignContent::SpaceAround if free > 0.0 => (free / (2.0 * n), free / n, 0.0),
        AlignContent::SpaceEvenly if free > 0.0 => (free / (n + 1.0), free / (n + 1.0), 0.0),
        AlignContent::SpaceAround | AlignContent::SpaceEvenly => (free / 2.0, 0.0, 0.0),
    }
}

impl LayoutEngine<'_> {
    pub(super) fn layout_flex(
        &mut self,
        id: WidgetId,
        style: &ComputedStyle,
        content: Rect,
        content_height: Option<f32>,
    ) -> Flow {
        let row = style.flex_direction.is_row();
        let cb = Size::new(content.width(), content_height.unwrap_or(f32::INFINITY));
        let (main_size, cross_size) = if row {
            (Some(content.width()), content_height)
        } else {
            (content_height, Some(content.width()))
        };
        let column_gap = style.column_gap.resolve(cb.width);
        let row_gap = style.row_gap.resolve(cb.height);
        let (main_gap, cross_gap) = if row {
            (column_gap, row_gap)
        } else {
            (row_gap, column_gap)
        };
        let wrap = style.flex_wrap == FlexWrap::Wrap;

        let children = self.flow_children(id, content.origin);
        if children.is_empty() {
            return Flow::default();
        }
        // A wrapping column can't know its line widths before breaking
        let single_line_hint = !wrap || main_size.is_none();
        let mut items: Vec<FlexItem> = children
            .iter()
            .map(|&child| self.flex_item(child, style, cb, single_line_hint))
            .collect();

        let lines = collect_lines(&items, row, wrap, main_size, main_gap);
        for line in &lines {
            resolve_flexible_lengths(&mut items[line.clone()], row, main_size, main_gap);
        }

        // Hypothetical cross sizes
        for item in items.iter_mut() {
            if row {
                let measured = self.measure(item.id, item.target, item.cross_definite, cb);
                item.cross = measured.height;
                item.ascent = item.margin.top + measured.baseline.unwrap_or(measured.height);
            } else {
                item.ascent = item.margin.left;
            }
        }

        let single_line = lines.len() == 1;
        let mut line_cross: Vec<f32> = lines
            .iter()
            .map(|line| {
                let line_items = &items[line.clone()];
                match cross_size {
                    Some(size) if single_line => size,
                    _ => {
                        let mut ascent: f32 = 0.0;
                        let mut descent: f32 = 0.0;
                        let mut largest: f32 = 0.0;
                        for item in line_items {
                            if row && item.align == AlignItems::Baseline {
                                ascent = ascent.max(item.ascent);
                                descent = descent.max(item.outer_cross(row) - item.ascent);
                            } else {
                                largest = largest.max(item.outer_cross(row));
                            }
                        }
                        largest.max(ascent + descent)
                    }
                }
            })
            .collect();
        let lines_total = line_cross.iter().sum::<f32>()
            + cross_gap * lines.len().saturating_sub(1) as f32;

        let (mut cross_cursor, line_spacing) = match cross_size {
            Some(size) if !single_line => {
                let (start, spacing, grow) =
                    distribute_lines(style.align_content, size - lines_total, lines.len());
                for c in line_cross.iter_mut() {
                    *c += grow;
                }
                (start, spacing)
            }
            _ => (0.0, 0.0),
        };

        let mut main_used_max: f32 = 0.0;
        for (line, &cross) in lines.iter().zip(&line_cross) {
            let line_items = &mut items[line.clone()];
            self.align_cross(line_items, row, cross, cross_cursor, cb);
            let used = position_main(line_items, style, row, main_size, main_gap);
            main_used_max = main_used_max.max(used);
            cross_cursor += cross + cross_gap + line_spacing;
        }

        for item in &items {
            let (x, y, width, height) = if row {
                (item.main_pos, item.cross_pos, item.target, item.cross)
            } else {
                (item.cross_pos, item.main_pos, item.cross, item.target)
            };
            let origin = Point::new(content.x() + x, content.y() + y);
            self.layout_box(item.id, origin, width, Some(height), cb);
        }

        let first = &items[lines[0].start];
        let baseline = self.nodes[first.id].baseline.map(|b| {
            let top = if row { first.cross_pos } else { first.main_pos };
            top + b
        });
        Flow {
            content_height: if row { lines_total } else { main_used_max },
            baseline,
        }
    }

    fn flex_item(
        &mut self,
        id: WidgetId,
        container: &ComputedStyle,
        cb: Size,
        single_line: bool,
    ) -> FlexItem {
        let row = container.flex_direction.is_row();
        let (main_axis, cross_axis) = if row {
            (Axis::Horizontal, Axis::Vertical)
        } else {
            (Axis::Vertical, Axis::Horizontal)
        };
        let style = self.style(id);
        let intrinsic = self.intrinsic(id);
        let margin = style.margin_px(cb.width);
        let margin_auto = style.margin_auto();
        let sizing = Sizing::new(&style, intrinsic, cb);
        let align = style.effective_align(container.align_items);

        let main_available = (main_axis.of(cb) - main_edges(&margin, row).0
            - main_edges(&margin, row).1)
            .max(0.0);
        let cross_available = (cross_axis.of(cb) - cross_edges(&margin, row).0
            - cross_edges(&margin, row).1)
            .max(0.0);
        let cross_definite = sizing.definite(cross_axis, cross_available);
        let (auto_start, auto_end) = cross_edges(&margin_auto, row);

        // Column items need their width before their height can be measured
        let cross = if row {
            0.0
        } else {
            cross_definite.unwrap_or_else(|| {
                let stretch = align == AlignItems::Stretch && !auto_start && !auto_end;
                let width = if stretch && single_line {
                    cross_available
                } else {
                    fit_content(&intrinsic.width, cross_available)
                };
                sizing.clamp(Axis::Horizontal, width, 0.0)
            })
        };

        let content_main = |engine: &mut Self| -> f32 {
            if row {
                intrinsic.width.preferred
            } else {
                engine.measure(id, cross, None, cb).height
            }
        };
        let basis = sizing
            .resolve(style.flex_basis, main_axis, main_available)
            .or_else(|| sizing.preferred(main_axis, main_available))
            .unwrap_or_else(|| content_main(self));

        // Automatic minimum: the content's min-content size, capped by the
        // specified size
        let automatic_min = if style.overflow == Overflow::Hidden {
            0.0
        } else {
            let content_min = if row {
                intrinsic.width.min
            } else {
                content_main(self)
            };
            match sizing.preferred(main_axis, main_available) {
                Some(specified) => content_min.min(specified),
                None => content_min,
            }
        };
        let min_main = sizing.min(main_axis, automatic_min);
        let max_main = sizing.max(main_axis).max(min_main);
        let hypothetical = basis.min(max_main).max(min_main);

        FlexItem {
            id,
            margin,
            margin_auto,
            grow: style.flex_grow,
            shrink: style.flex_shrink,
            basis,
            hypothetical,
            min_main,
            max_main,
            target: hypothetical,
            frozen: false,
            cross_definite,
            cross,
            ascent: 0.0,
            align,
            main_pos: 0.0,
            cross_pos: 0.0,
            intrinsic,
            style,
        }
    }

    /// Place items of one line across it; stretched items take the line's
    /// cross size
    fn align_cross(
        &mut self,
        items: &mut [FlexItem],
        row: bool,
        line_cross: f32,
        line_start: f32,
        cb: Size,
    ) {
        let cross_axis = if row { Axis::Vertical } else { Axis::Horizontal };
        let line_ascent = items
            .iter()
            .filter(|i| row && i.align == AlignItems::Baseline)
            .map(|i| i.ascent)
            .fold(0.0, f32::max);

        for item in items.iter_mut() {
            let (start, end) = cross_edges(&item.margin, row);
            let (auto_start, auto_end) = cross_edges(&item.margin_auto, row);
            let sizing = Sizing::new(&item.style, item.intrinsic, cb);

            if item.align == AlignItems::Stretch
                && item.cross_definite.is_none()
                && !auto_start
                && !auto_end
            {
                item.cross = sizing.clamp(cross_axis, (line_cross - start - end).max(0.0), 0.0);
            }

            let free = line_cross - item.outer_cross(row);
            let offset = if auto_start || auto_end {
                match (auto_start, auto_end) {
                    (true, true) => start + free.max(0.0) / 2.0,
                    (true, false) => start + free.max(0.0),
                    _ => start,
                }
            } else {
                match item.align {
                    AlignItems::Start | AlignItems::Stretch => start,
                    AlignItems::End => line_cross - item.cross - end,
                    AlignItems::Center => start + free / 2.0,
                    AlignItems::Baseline if row => line_ascent - item.ascent + start,
                    AlignItems::Baseline => start,
                }
            };
            item.cross_pos = line_start + offset;
        }
    }
}

/// Distribute main-axis free space of one line; returns the outer size used
fn position_main(
    items: &mut [FlexItem],
    container: &ComputedStyle,
    row: bool,
    main_size: Option<f32>,
    gap: f32,
) -> f32 {
    let count = items.len();
    let used = items
        .iter()
        .map(|i| i.target + i.main_margin(row))
        .sum::<f32>()
        + gap * count.saturating_sub(1) as f32;
    let available = main_size.unwrap_or(used);
    let mut free = available - used;

    // Auto margins absorb positive free space before justify-content
    let auto_count = items
        .iter()
        .map(|i| {
            let (start, end) = main_edges(&i.margin_auto, row);
            start as usize + end as usize
        })
        .sum::<usize>();
    let mut auto_share = 0.0;
    if auto_count > 0 && free > 0.0 {
        auto_share = free / auto_count as f32;
        free = 0.0;
    }

    let (leading, spacing) = distribute_justify(container.justify_content, free, count);
    let mut cursor = leading;
    for item in items.iter_mut() {
        let (start, end) = main_edges(&item.margin, row);
        let (auto_start, auto_end) = main_edges(&item.margin_auto, row);
        cursor += start + if auto_start { auto_share } else { 0.0 };
        item.main_pos = cursor;
        cursor += item.target + end + if auto_end { auto_share } else { 0.0 } + gap + spacing;
    }

    if container.flex_direction.is_reverse() {
        for item in items.iter_mut() {
            item.main_pos = available - item.main_pos - item.target;
        }
    }
    used
}
