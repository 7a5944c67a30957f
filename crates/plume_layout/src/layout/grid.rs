//! CSS Grid
//!
//! Track lists are expanded (`repeat()`, including `auto-fill`/`auto-fit`)
//! once the available space is known. Items are placed by named area,
//! explicit lines or auto-placement, growing implicit tracks as needed.
//! Tracks are then sized: fixed tracks first, content-sized tracks from
//! their items' contributions, and `fr` tracks share whatever is left.

use std::rc::Rc;

use plume_core::{Edges, Point, Rect, Size};
use tracing::warn;

use super::intrinsic::{intrinsic_margins, ContentSizes};
use super::{fit_content, Axis, Flow, LayoutEngine, Sizing};
use crate::computed::{ComputedStyle, TrackDef};
use crate::grid_template::{GridLine, GridPlacement, RepeatCount};
use crate::style::{AlignItems, GridAutoFlow};
use crate::tree::WidgetId;
use crate::values::{TrackBreadth, TrackSize};

/// Upper bound on tracks per axis. `repeat()` counts, line numbers and
/// spans are clamped so that the explicit and implicit grid stay inside it.
pub(crate) const MAX_TRACKS: usize = 1000;

/// A track list after `repeat()` expansion
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct ExpandedTracks {
    pub sizes: Vec<TrackSize>,
    /// Tracks generated by `auto-fit`, collapsed when no item lands in them
    pub auto_fit: Vec<bool>,
}

fn fixed_breadth(breadth: TrackBreadth, available: Option<f32>) -> Option<f32> {
    match breadth {
        TrackBreadth::Length(l) if l.is_fixed() => Some(l.px),
        TrackBreadth::Length(l) => available.map(|a| l.resolve(a)),
        _ => None,
    }
}

/// Size a track takes when counting automatic repetitions
fn repetition_size(track: &TrackSize, available: Option<f32>) -> f32 {
    fixed_breadth(track.max, available)
        .or_else(|| fixed_breadth(track.min, available))
        .unwrap_or(0.0)
}

/// Expand `repeat()` entries; automatic repetitions fill `available`
pub(crate) fn expand_tracks(defs: &[TrackDef], available: Option<f32>, gap: f32) -> ExpandedTracks {
    let mut others = 0.0;
    let mut other_count = 0usize;
    for def in defs {
        match def {
            TrackDef::Single(track) => {
                others += repetition_size(track, available);
                other_count += 1;
            }
            TrackDef::Repeat {
                count: RepeatCount::Count(n),
                tracks,
            } => {
                others += tracks
                    .iter()
                    .map(|t| repetition_size(t, available))
                    .sum::<f32>()
                    * explicit_repetitions(*n, tracks) as f32;
                other_count += tracks.len() * explicit_repetitions(*n, tracks);
            }
            TrackDef::Repeat { .. } => {}
        }
    }

    let mut out = ExpandedTracks::default();
    for def in defs {
        match def {
            TrackDef::Single(track) => {
                out.sizes.push(*track);
                out.auto_fit.push(false);
            }
            TrackDef::Repeat { count, tracks } => {
                let repetitions = match count {
                    RepeatCount::Count(n) => explicit_repetitions(*n, tracks),
                    RepeatCount::AutoFill | RepeatCount::AutoFit => {
                        auto_repetitions(tracks, available, gap, others, other_count)
                    }
                };
                let fit = *count == RepeatCount::AutoFit;
                for _ in 0..repetitions {
                    out.sizes.extend_from_slice(tracks);
                    out.auto_fit.extend(std::iter::repeat(fit).take(tracks.len()));
                }
            }
        }
    }
    if out.sizes.len() > MAX_TRACKS {
        warn!("{} grid tracks, keeping the first {}", out.sizes.len(), MAX_TRACKS);
        out.sizes.truncate(MAX_TRACKS);
        out.auto_fit.truncate(MAX_TRACKS);
    }
    out
}

/// `repeat(n, …)` count, limited so one repetition list stays within
/// [`MAX_TRACKS`]
fn explicit_repetitions(n: u32, tracks: &[TrackSize]) -> usize {
    let limit = MAX_TRACKS / tracks.len().max(1);
    let n = n as usize;
    if n > limit {
        warn!("repeat({}, …) exceeds the track limit, using {}", n, limit);
    }
    n.min(limit)
}

/// Span length in tracks, at least one and at most [`MAX_TRACKS`]
fn span_len(n: u32) -> usize {
    let n = n as usize;
    if n > MAX_TRACKS {
        warn!("grid span {} exceeds the track limit, using {}", n, MAX_TRACKS);
    }
    n.clamp(1, MAX_TRACKS)
}

/// Largest repetition count that fits; at least one
fn auto_repetitions(
    tracks: &[TrackSize],
    available: Option<f32>,
    gap: f32,
    others: f32,
    other_count: usize,
) -> usize {
    let Some(available) = available else {
        return 1;
    };
    let size: f32 = tracks.iter().map(|t| repetition_size(t, Some(available))).sum();
    if size <= 0.0 || tracks.is_empty() {
        return 1;
    }
    let total = |count: usize| {
        let tracks_total = other_count + count * tracks.len();
        others + count as f32 * size + gap * tracks_total.saturating_sub(1) as f32
    };
    let mut count = 1;
    while count < MAX_TRACKS && total(count + 1) <= available {
        count += 1;
    }
    count
}

/// Start track (0-based) and span along one axis
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Span {
    pub start: usize,
    pub len: usize,
}

impl Span {
    pub fn end(&self) -> usize {
        self.start + self.len
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum AxisPlacement {
    Definite(Span),
    Auto(usize),
}

impl AxisPlacement {
    fn span(&self) -> usize {
        match self {
            AxisPlacement::Definite(span) => span.len,
            AxisPlacement::Auto(len) => *len,
        }
    }
}

/// Resolve one axis of a placement against `explicit` tracks.
/// Negative lines count back from the end of the explicit grid; lines
/// before the start clamp to the first track. Every span ends within
/// [`MAX_TRACKS`].
fn resolve_placement(placement: GridPlacement, explicit: usize) -> AxisPlacement {
    let line = |l: i32| -> Option<usize> {
        match l {
            0 => None,
            l if l > 0 => Some((l as usize - 1).min(MAX_TRACKS - 1)),
            l => Some((explicit as i64 + 1 + l as i64).max(0) as usize),
        }
    };
    let definite = |start: usize, len: usize| {
        let start = start.min(MAX_TRACKS - 1);
        AxisPlacement::Definite(Span {
            start,
            len: len.clamp(1, MAX_TRACKS - start),
        })
    };

    match (placement.start, placement.end) {
        (GridLine::Line(a), GridLine::Line(b)) => match (line(a), line(b)) {
            (Some(a), Some(b)) if a != b => definite(a.min(b), a.max(b) - a.min(b)),
            (Some(a), _) => definite(a, 1),
            (None, Some(b)) => definite(b.saturating_sub(1), 1),
            (None, None) => AxisPlacement::Auto(1),
        },
        (GridLine::Line(a), GridLine::Span(n)) => {
            let n = span_len(n);
            line(a).map_or(AxisPlacement::Auto(n), |a| definite(a, n))
        }
        (GridLine::Line(a), GridLine::Auto) => {
            line(a).map_or(AxisPlacement::Auto(1), |a| definite(a, 1))
        }
        (GridLine::Span(n), GridLine::Line(b)) => {
            let n = span_len(n);
            line(b).map_or(AxisPlacement::Auto(n), |b| definite(b.saturating_sub(n), n))
        }
        (GridLine::Auto, GridLine::Line(b)) => {
            line(b).map_or(AxisPlacement::Auto(1), |b| definite(b.saturating_sub(1), 1))
        }
        (GridLine::Span(n), _) | (_, GridLine::Span(n)) => AxisPlacement::Auto(span_len(n)),
        (GridLine::Auto, GridLine::Auto) => AxisPlacement::Auto(1),
    }
}

/// Occupied cells, addressed by (major, minor) along the auto-flow
struct Occupancy {
    minor: usize,
    cells: Vec<bool>,
}

impl Occupancy {
    fn new(minor: usize) -> Self {
        Self {
            minor: minor.max(1),
            cells: Vec::new(),
        }
    }

    fn is_free(&self, major: Span, minor: Span) -> bool {
        if minor.end() > self.minor {
            return false;
        }
        (major.start..major.end()).all(|r| {
            (minor.start..minor.end())
                .all(|c| !self.cells.get(r * self.minor + c).copied().unwrap_or(false))
        })
    }

    fn fill(&mut self, major: Span, minor: Span) {
        let needed = major.end() * self.minor;
        if self.cells.len() < needed {
            self.cells.resize(needed, false);
        }
        for r in major.start..major.end() {
            for c in minor.start..minor.end().min(self.minor) {
                self.cells[r * self.minor + c] = true;
            }
        }
    }
}

#[derive(Debug)]
struct GridItem {
    id: WidgetId,
    style: Rc<ComputedStyle>,
    row: Span,
    column: Span,
}

/// Items placed on a grid with its explicit and implicit tracks
struct PlacedGrid {
    items: Vec<GridItem>,
    columns: Vec<TrackSize>,
    rows: Vec<TrackSize>,
    /// Collapsed `auto-fit` tracks
    columns_collapsed: Vec<bool>,
    rows_collapsed: Vec<bool>,
}

/// Place `items` (with per-item row and column placements) on the grid
fn place_items(
    placements: Vec<(WidgetId, Rc<ComputedStyle>, AxisPlacement, AxisPlacement)>,
    flow: GridAutoFlow,
    explicit_rows: usize,
    explicit_columns: usize,
) -> (Vec<GridItem>, usize, usize) {
    let row_flow = flow.is_row();
    let dense = flow.is_dense();
    // Work in (major, minor) coordinates along the flow
    let to_flow = |row: AxisPlacement, column: AxisPlacement| {
        if row_flow {
            (row, column)
        } else {
            (column, row)
        }
    };

    let mut minor_count = if row_flow {
        explicit_columns
    } else {
        explicit_rows
    }
    .max(1);
    for (_, _, row, column) in &placements {
        let (_, minor) = to_flow(*row, *column);
        minor_count = minor_count.max(match minor {
            AxisPlacement::Definite(span) => span.end(),
            AxisPlacement::Auto(len) => len,
        });
    }

    let mut occupancy = Occupancy::new(minor_count);
    let mut placed: Vec<Option<(Span, Span)>> = vec![None; placements.len()];

    // Fully definite items first
    for (i, (_, _, row, column)) in placements.iter().enumerate() {
        if let (AxisPlacement::Definite(major), AxisPlacement::Definite(minor)) =
            to_flow(*row, *column)
        {
            occupancy.fill(major, minor);
            placed[i] = Some((major, minor));
        }
    }

    // Items locked to a major line
    for (i, (_, _, row, column)) in placements.iter().enumerate() {
        if placed[i].is_some() {
            continue;
        }
        if let (AxisPlacement::Definite(major), minor) = to_flow(*row, *column) {
            let len = minor.span();
            let start = (0..=minor_count.saturating_sub(len))
                .find(|&c| occupancy.is_free(major, Span { start: c, len }))
                .unwrap_or(0);
            let minor = Span { start, len };
            occupancy.fill(major, minor);
            placed[i] = Some((major, minor));
        }
    }

    // Everything else follows the auto-placement cursor
    let (mut cursor_major, mut cursor_minor) = (0usize, 0usize);
    for (i, (_, _, row, column)) in placements.iter().enumerate() {
        if placed[i].is_some() {
            continue;
        }
        if dense {
            cursor_major = 0;
            cursor_minor = 0;
        }
        let (major, minor) = to_flow(*row, *column);
        let major_len = major.span();
        match minor {
            AxisPlacement::Definite(minor) => {
                if !dense && minor.start < cursor_minor {
                    cursor_major += 1;
                }
                while !occupancy.is_free(
                    Span {
                        start: cursor_major,
                        len: major_len,
                    },
                    minor,
                ) {
                    cursor_major += 1;
                }
                let major = Span {
                    start: cursor_major,
                    len: major_len,
                };
                occupancy.fill(major, minor);
                placed[i] = Some((major, minor));
                cursor_minor = minor.end();
            }
            AxisPlacement::Auto(len) => loop {
                if cursor_minor + len > minor_count {
                    cursor_major += 1;
                    cursor_minor = 0;
                    continue;
                }
                let major = Span {
                    start: cursor_major,
                    len: major_len,
                };
                let minor = Span {
                    start: cursor_minor,
                    len,
                };
                if occupancy.is_free(major, minor) {
                    occupancy.fill(major, minor);
                    placed[i] = Some((major, minor));
                    cursor_minor += len;
                    break;
                }
                cursor_minor += 1;
            },
        }
    }

    let mut rows = explicit_rows;
    let mut columns = explicit_columns;
    let items: Vec<GridItem> = placements
        .into_iter()
        .zip(placed)
        .filter_map(|((id, style, _, _), spans)| {
            let (major, minor) = spans?;
            let (row, column) = if row_flow {
                (major, minor)
            } else {
                (minor, major)
            };
            rows = rows.max(row.end());
            columns = columns.max(column.end());
            Some(GridItem {
                id,
                style,
                row,
                column,
            })
        })
        .collect();
    (items, rows, columns)
}

/// What an item asks of the tracks it spans, as outer sizes
#[derive(Clone, Copy, Debug)]
pub(crate) struct Contribution {
    pub span: Span,
    pub min: f32,
    pub max: f32,
}

#[derive(Clone, Copy, Debug)]
struct Track {
    min: TrackBreadth,
    max: TrackBreadth,
    base: f32,
    /// Growth limit; `None` is unbounded
    limit: Option<f32>,
    collapsed: bool,
}

impl Track {
    fn flex(&self) -> Option<f32> {
        match self.max {
            TrackBreadth::Fr(fr) if !self.collapsed => Some(fr.max(0.0)),
            _ => None,
        }
    }

    fn has_content_min(&self) -> bool {
        !matches!(self.min, TrackBreadth::Length(_))
    }

    fn has_content_max(&self) -> bool {
        matches!(
            self.max,
            TrackBreadth::Auto | TrackBreadth::MinContent | TrackBreadth::MaxContent
        )
    }
}

fn gap_total(collapsed: &[bool], gap: f32) -> f32 {
    let visible = collapsed.iter().filter(|c| !**c).count();
    gap * visible.saturating_sub(1) as f32
}

/// Size tracks along one axis. `available` is the content size on that axis
/// when definite.
pub(crate) fn size_tracks(
    sizes: &[TrackSize],
    collapsed: &[bool],
    contributions: &[Contribution],
    available: Option<f32>,
    gap: f32,
) -> Vec<f32> {
    let mut tracks: Vec<Track> = sizes
        .iter()
        .zip(collapsed)
        .map(|(size, &collapsed)| {
            let base = fixed_breadth(size.min, available).unwrap_or(0.0);
            Track {
                min: size.min,
                max: size.max,
                base,
                limit: fixed_breadth(size.max, available).map(|l| l.max(base)),
                collapsed,
            }
        })
        .collect();

    // Content-sized tracks, narrow spans first
    let mut contributions = contributions.to_vec();
    contributions.sort_by_key(|c| c.span.len);
    for c in &contributions {
        let range = c.span.start..c.span.end().min(tracks.len());
        if range.is_empty() {
            continue;
        }
        let spanned = &mut tracks[range];
        if spanned.len() == 1 {
            let track = &mut spanned[0];
            if track.has_content_min() {
                let wanted = match track.min {
                    TrackBreadth::MaxContent => c.max,
                    _ => c.min,
                };
                track.base = track.base.max(wanted);
            }
            if track.has_content_max() {
                let wanted = match track.max {
                    TrackBreadth::MinContent => c.min,
                    _ => c.max,
                };
                track.limit = Some(track.limit.map_or(wanted, |l| l.max(wanted)));
            }
            continue;
        }
        // Spanning items only matter when no flexible track is involved
        if spanned.iter().any(|t| t.flex().is_some()) {
            continue;
        }
        let gaps = gap * (spanned.len() - 1) as f32;
        let current: f32 = spanned.iter().map(|t| t.base).sum::<f32>() + gaps;
        let extra = c.min - current;
        if extra > 0.0 {
            let growable = spanned.iter().filter(|t| t.has_content_min()).count();
            if growable > 0 {
                let share = extra / growable as f32;
                for track in spanned.iter_mut().filter(|t| t.has_content_min()) {
                    track.base += share;
                }
            }
        }
        let limits: f32 = spanned
            .iter()
            .map(|t| t.limit.unwrap_or(t.base))
            .sum::<f32>()
            + gaps;
        let extra = c.max - limits;
        if extra > 0.0 {
            let growable = spanned.iter().filter(|t| t.has_content_max()).count();
            if growable > 0 {
                let share = extra / growable as f32;
                for track in spanned.iter_mut().filter(|t| t.has_content_max()) {
                    track.limit = Some(track.limit.unwrap_or(track.base) + share);
                }
            }
        }
    }

    for track in tracks.iter_mut() {
        if track.collapsed {
            track.base = 0.0;
            track.limit = Some(0.0);
            continue;
        }
        if track.flex().is_none() {
            track.limit = Some(track.limit.map_or(track.base, |l| l.max(track.base)));
        }
    }

    let gaps = gap_total(collapsed, gap);
    let has_flex = tracks.iter().any(|t| t.flex().is_some());

    // Grow content tracks towards their limits
    if let Some(available) = available {
        let mut free = available - tracks.iter().map(|t| t.base).sum::<f32>() - gaps;
        while free > 1e-4 {
            let growable: Vec<usize> = (0..tracks.len())
                .filter(|&i| {
                    let t = &tracks[i];
                    t.flex().is_none() && t.limit.is_some_and(|l| l > t.base + 1e-4)
                })
                .collect();
            if growable.is_empty() {
                break;
            }
            let share = free / growable.len() as f32;
            for i in growable {
                let track = &mut tracks[i];
                let limit = track.limit.unwrap_or(track.base);
                let grow = share.min(limit - track.base);
                track.base += grow;
                free -= grow;
            }
        }
    }

    if has_flex {
        let fr_size = match available {
            Some(available) => {
                let mut flexible: Vec<usize> =
                    (0..tracks.len()).filter(|&i| tracks[i].flex().is_some()).collect();
                loop {
                    let leftover = available
                        - gaps
                        - (0..tracks.len())
                            .filter(|i| !flexible.contains(i))
                            .map(|i| tracks[i].base)
                            .sum::<f32>();
                    let flex_sum: f32 = flexible
                        .iter()
                        .map(|&i| tracks[i].flex().unwrap_or(0.0))
                        .sum();
                    let fr = leftover.max(0.0) / flex_sum.max(1.0);
                    // A track whose base exceeds its share is treated as inflexible
                    let before = flexible.len();
                    flexible.retain(|&i| {
                        tracks[i].base <= fr * tracks[i].flex().unwrap_or(0.0) + 1e-4
                    });
                    if flexible.len() == before || flexible.is_empty() {
                        break fr;
                    }
                }
            }
            None => tracks
                .iter()
                .filter_map(|t| {
                    let flex = t.flex()?;
                    let content = t.limit.unwrap_or(t.base).max(t.base);
                    (flex > 0.0).then(|| content / flex.max(1.0))
                })
                .fold(0.0, f32::max),
        };
        for track in tracks.iter_mut() {
            if let Some(flex) = track.flex() {
                track.base = track.base.max(fr_size * flex);
            }
        }
    } else if let Some(available) = available {
        // Without fr tracks, auto tracks stretch into the free space
        let free = available - tracks.iter().map(|t| t.base).sum::<f32>() - gaps;
        let stretchable: Vec<usize> = (0..tracks.len())
            .filter(|&i| !tracks[i].collapsed && tracks[i].max == TrackBreadth::Auto)
            .collect();
        if free > 0.0 && !stretchable.is_empty() {
            let share = free / stretchable.len() as f32;
            for i in stretchable {
                tracks[i].base += share;
            }
        }
    }

    tracks.iter().map(|t| t.base).collect()
}

/// Start offset of each track; collapsed tracks take no gap
pub(crate) fn track_offsets(sizes: &[f32], collapsed: &[bool], gap: f32) -> Vec<f32> {
    let mut offsets = Vec::with_capacity(sizes.len());
    let mut cursor = 0.0;
    let mut any_visible = false;
    for (size, &collapsed) in sizes.iter().zip(collapsed) {
        if !collapsed && any_visible {
            cursor += gap;
        }
        offsets.push(cursor);
        cursor += size;
        any_visible |= !collapsed;
    }
    offsets
}

/// Offset and size of the area `span` covers
fn area(offsets: &[f32], sizes: &[f32], span: Span) -> (f32, f32) {
    let last = span.end().min(sizes.len()).saturating_sub(1);
    let start = offsets.get(span.start).copied().unwrap_or(0.0);
    let end = offsets.get(last).copied().unwrap_or(0.0) + sizes.get(last).copied().unwrap_or(0.0);
    (start, (end - start).max(0.0))
}

/// Offset of a box of `size` (plus `margin`) inside a cell of `cell`
fn align_in_cell(
    align: AlignItems,
    cell: f32,
    size: f32,
    margin: (f32, f32),
    auto: (bool, bool),
) -> f32 {
    let free = cell - size - margin.0 - margin.1;
    match auto {
        (true, true) => margin.0 + free.max(0.0) / 2.0,
        (true, false) => margin.0 + free.max(0.0),
        (false, true) => margin.0,
        (false, false) => match align {
            AlignItems::Start | AlignItems::Stretch | AlignItems::Baseline => margin.0,
            AlignItems::End => margin.0 + free,
            AlignItems::Center => margin.0 + free / 2.0,
        },
    }
}

impl LayoutEngine<'_> {
    /// Expand templates and place items; `available` sizes drive
    /// `auto-fill`/`auto-fit`
    fn place_grid(
        &self,
        style: &ComputedStyle,
        children: &[WidgetId],
        available: (Option<f32>, Option<f32>),
        gaps: (f32, f32),
    ) -> PlacedGrid {
        let (available_width, available_height) = available;
        let (column_gap, row_gap) = gaps;
        let template_columns =
            expand_tracks(&style.grid_template_columns, available_width, column_gap);
        let template_rows = expand_tracks(&style.grid_template_rows, available_height, row_gap);

        let areas = style.grid_template_areas.as_ref();
        let explicit_columns = template_columns
            .sizes
            .len()
            .max(areas.map_or(0, |a| a.columns()));
        let explicit_rows = template_rows.sizes.len().max(areas.map_or(0, |a| a.rows()));

        let placements = children
            .iter()
            .map(|&id| {
                let item_style = Rc::clone(&self.nodes[id].computed);
                let named = item_style.grid_area.as_deref().and_then(|name| {
                    let found = areas.and_then(|a| a.get(name));
                    if found.is_none() {
                        warn!(area = name, "unknown grid-area name; auto-placing");
                    }
                    found
                });
                let (row, column) = match named {
                    Some(area) => (
                        AxisPlacement::Definite(Span {
                            start: (area.row_start - 1).max(0) as usize,
                            len: (area.row_end - area.row_start).max(1) as usize,
                        }),
                        AxisPlacement::Definite(Span {
                            start: (area.column_start - 1).max(0) as usize,
                            len: (area.column_end - area.column_start).max(1) as usize,
                        }),
                    ),
                    None => (
                        resolve_placement(item_style.grid_row, explicit_rows),
                        resolve_placement(item_style.grid_column, explicit_columns),
                    ),
                };
                (id, item_style, row, column)
            })
            .collect();

        let (items, row_count, column_count) = place_items(
            placements,
            style.grid_auto_flow,
            explicit_rows,
            explicit_columns,
        );

        let finish = |template: ExpandedTracks, count: usize, auto: TrackSize, used: Vec<bool>| {
            let mut sizes = template.sizes;
            let mut auto_fit = template.auto_fit;
            sizes.resize(count, auto);
            auto_fit.resize(count, false);
            let collapsed: Vec<bool> = auto_fit
                .iter()
                .zip(used)
                .map(|(fit, used)| *fit && !used)
                .collect();
            (sizes, collapsed)
        };
        let mut columns_used = vec![false; column_count];
        let mut rows_used = vec![false; row_count];
        for item in &items {
            for c in item.column.start..item.column.end() {
                columns_used[c] = true;
            }
            for r in item.row.start..item.row.end() {
                rows_used[r] = true;
            }
        }
        let (columns, columns_collapsed) = finish(
            template_columns,
            column_count,
            style.grid_auto_columns,
            columns_used,
        );
        let (rows, rows_collapsed) =
            finish(template_rows, row_count, style.grid_auto_rows, rows_used);

        PlacedGrid {
            items,
            columns,
            rows,
            columns_collapsed,
            rows_collapsed,
        }
    }

    pub(super) fn grid_intrinsic(&self, id: WidgetId, style: &ComputedStyle) -> ContentSizes {
        let children = self.in_flow_children(id);
        let column_gap = style.column_gap.resolve(f32::INFINITY);
        let row_gap = style.row_gap.resolve(f32::INFINITY);
        let grid = self.place_grid(style, &children, (None, None), (column_gap, row_gap));

        let contributions = |min_content: bool| -> Vec<Contribution> {
            grid.items
                .iter()
                .map(|item| {
                    let sizes = self.nodes[item.id].intrinsic;
                    let margin = intrinsic_margins(&item.style).horizontal();
                    let min = sizes.width.min + margin;
                    Contribution {
                        span: item.column,
                        min,
                        max: if min_content {
                            min
                        } else {
                            sizes.width.preferred + margin
                        },
                    }
                })
                .collect()
        };
        let width = |min_content: bool| -> f32 {
            let sizes = size_tracks(
                &grid.columns,
                &grid.columns_collapsed,
                &contributions(min_content),
                None,
                column_gap,
            );
            sizes.iter().sum::<f32>() + gap_total(&grid.columns_collapsed, column_gap)
        };

        let row_contributions: Vec<Contribution> = grid
            .items
            .iter()
            .map(|item| {
                let height = self.nodes[item.id].intrinsic.height.preferred
                    + intrinsic_margins(&item.style).vertical();
                Contribution {
                    span: item.row,
                    min: height,
                    max: height,
                }
            })
            .collect();
        let rows = size_tracks(
            &grid.rows,
            &grid.rows_collapsed,
            &row_contributions,
            None,
            row_gap,
        );

        ContentSizes {
            min_width: width(true),
            max_width: width(false),
            height: rows.iter().sum::<f32>() + gap_total(&grid.rows_collapsed, row_gap),
        }
    }

    pub(super) fn layout_grid(
        &mut self,
        id: WidgetId,
        style: &ComputedStyle,
        content: Rect,
        content_height: Option<f32>,
    ) -> Flow {
        let cb = Size::new(content.width(), content_height.unwrap_or(f32::INFINITY));
        let column_gap = style.column_gap.resolve(cb.width);
        let row_gap = style.row_gap.resolve(cb.height);
        let children = self.flow_children(id, content.origin);
        let grid = self.place_grid(
            style,
            &children,
            (Some(content.width()), content_height),
            (column_gap, row_gap),
        );

        let column_contributions: Vec<Contribution> = grid
            .items
            .iter()
            .map(|item| {
                let sizes = self.nodes[item.id].intrinsic;
                let margin = item.style.margin_px(cb.width).horizontal();
                Contribution {
                    span: item.column,
                    min: sizes.width.min + margin,
                    max: sizes.width.preferred + margin,
                }
            })
            .collect();
        let columns = size_tracks(
            &grid.columns,
            &grid.columns_collapsed,
            &column_contributions,
            Some(content.width()),
            column_gap,
        );
        let column_offsets = track_offsets(&columns, &grid.columns_collapsed, column_gap);

        // Widths inside the column areas, then the heights they produce
        struct Sized {
            width: f32,
            height: f32,
            x: f32,
            area_width: f32,
            margin: Edges<f32>,
            height_definite: Option<f32>,
        }
        let mut sized = Vec::with_capacity(grid.items.len());
        let mut row_contributions = Vec::with_capacity(grid.items.len());
        for item in &grid.items {
            let (x, area_width) = area(&column_offsets, &columns, item.column);
            let area_cb = Size::new(area_width, f32::INFINITY);
            let margin = item.style.margin_px(area_width);
            let auto = item.style.margin_auto();
            let intrinsic = self.intrinsic(item.id);
            let sizing = Sizing::new(&item.style, intrinsic, area_cb);
            let available = (area_width - margin.horizontal()).max(0.0);
            let justify = item.style.effective_justify(style.justify_items);
            let width = match sizing.preferred(Axis::Horizontal, available) {
                Some(w) => w,
                None if justify == AlignItems::Stretch && !auto.left && !auto.right => available,
                None => fit_content(&intrinsic.width, available),
            };
            let width = sizing.clamp(Axis::Horizontal, width, 0.0);
            let height_definite = sizing.definite(Axis::Vertical, f32::INFINITY);
            let height = match height_definite {
                Some(h) => h,
                None => self.measure(item.id, width, None, area_cb).height,
            };
            row_contributions.push(Contribution {
                span: item.row,
                min: height + margin.vertical(),
                max: height + margin.vertical(),
            });
            let x = x + align_in_cell(
                justify,
                area_width,
                width,
                (margin.left, margin.right),
                (auto.left, auto.right),
            );
            sized.push(Sized {
                width,
                height,
                x,
                area_width,
                margin,
                height_definite,
            });
        }

        let rows = size_tracks(
            &grid.rows,
            &grid.rows_collapsed,
            &row_contributions,
            content_height,
            row_gap,
        );
        let row_offsets = track_offsets(&rows, &grid.rows_collapsed, row_gap);

        let mut baseline = None;
        for (item, s) in grid.items.iter().zip(&sized) {
            let (y, area_height) = area(&row_offsets, &rows, item.row);
            let auto = item.style.margin_auto();
            let align = item.style.effective_align(style.align_items);
            let area_cb = Size::new(s.area_width, area_height);
            let height = if s.height_definite.is_none()
                && align == AlignItems::Stretch
                && !auto.top
                && !auto.bottom
            {
                let sizing = Sizing::new(&item.style, self.intrinsic(item.id), area_cb);
                sizing.clamp(
                    Axis::Vertical,
                    (area_height - s.margin.vertical()).max(0.0),
                    0.0,
                )
            } else {
                s.height
            };
            let y = y + align_in_cell(
                align,
                area_height,
                height,
                (s.margin.top, s.margin.bottom),
                (auto.top, auto.bottom),
            );
            let origin = Point::new(content.x() + s.x, content.y() + y);
            self.layout_box(item.id, origin, s.width, Some(height), area_cb);
            if baseline.is_none() {
                baseline = self.nodes[item.id].baseline.map(|b| y + b);
            }
        }

        Flow {
            content_height: rows.iter().sum::<f32>() + gap_total(&grid.rows_collapsed, row_gap),
            baseline,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::values::LengthPercent;

    fn tracks(defs: &[TrackSize]) -> (Vec<TrackSize>, Vec<bool>) {
        (defs.to_vec(), vec![false; defs.len()])
    }

    #[test]
    fn test_fixed_and_fr_tracks_fill_the_content_box() {
        let (sizes, collapsed) =
            tracks(&[TrackSize::px(100.0), TrackSize::fr(1.0), TrackSize::fr(1.0)]);
        let resolved = size_tracks(&sizes, &collapsed, &[], Some(500.0), 0.0);
        assert_eq!(resolved, vec![100.0, 200.0, 200.0]);
    }

    #[test]
    fn test_percent_and_fr_with_gaps_sum_to_available() {
        let percent = TrackBreadth::Length(LengthPercent::percent(25.0));
        let (sizes, collapsed) = tracks(&[
            TrackSize {
                min: percent,
                max: percent,
            },
            TrackSize::fr(2.0),
            TrackSize::px(50.0),
            TrackSize::fr(1.0),
        ]);
        let resolved = size_tracks(&sizes, &collapsed, &[], Some(400.0), 10.0);
        let total: f32 = resolved.iter().sum::<f32>() + 30.0;
        assert!((total - 400.0).abs() < 1e-3);
        assert!((resolved[0] - 100.0).abs() < 1e-3);
        assert!((resolved[1] - 2.0 * resolved[3]).abs() < 1e-3);
    }

    #[test]
    fn test_fr_track_keeps_its_min_content() {
        let (sizes, collapsed) = tracks(&[TrackSize::fr(1.0), TrackSize::fr(1.0)]);
        let wide = Contribution {
            span: Span { start: 0, len: 1 },
            min: 150.0,
            max: 150.0,
        };
        let resolved = size_tracks(&sizes, &collapsed, &[wide], Some(200.0), 0.0);
        assert_eq!(resolved, vec![150.0, 50.0]);
    }

    #[test]
    fn test_auto_tracks_stretch_without_fr() {
        let (sizes, collapsed) = tracks(&[TrackSize::AUTO, TrackSize::px(40.0)]);
        let item = Contribution {
            span: Span { start: 0, len: 1 },
            min: 10.0,
            max: 30.0,
        };
        let resolved = size_tracks(&sizes, &collapsed, &[item], Some(100.0), 0.0);
        assert_eq!(resolved, vec![60.0, 40.0]);
    }

    #[test]
    fn test_auto_fill_counts_repetitions() {
        let defs = vec![TrackDef::Repeat {
            count: RepeatCount::AutoFill,
            tracks: vec![TrackSize::px(100.0)],
        }];
        let expanded = expand_tracks(&defs, Some(350.0), 10.0);
        assert_eq!(expanded.sizes.len(), 3);
        assert_eq!(expand_tracks(&defs, None, 10.0).sizes.len(), 1);
    }

    #[test]
    fn test_negative_lines_count_from_the_end() {
        let placement = GridPlacement::new(GridLine::Line(1), GridLine::Line(-1));
        assert_eq!(
            resolve_placement(placement, 3),
            AxisPlacement::Definite(Span { start: 0, len: 3 })
        );
        assert_eq!(
            resolve_placement(GridPlacement::span(2), 3),
            AxisPlacement::Auto(2)
        );
    }

    #[test]
    fn test_spans_and_lines_stay_within_track_limit() {
        assert_eq!(
            resolve_placement(GridPlacement::span(200_000), 2),
            AxisPlacement::Auto(MAX_TRACKS)
        );
        let far = GridPlacement::new(GridLine::Line(50_000), GridLine::Span(50_000));
        assert_eq!(
            resolve_placement(far, 2),
            AxisPlacement::Definite(Span {
                start: MAX_TRACKS - 1,
                len: 1
            })
        );
        let wide = GridPlacement::new(GridLine::Line(1), GridLine::Line(i32::MAX));
        match resolve_placement(wide, 2) {
            AxisPlacement::Definite(span) => assert!(span.end() <= MAX_TRACKS),
            other => panic!("expected a definite span, got {other:?}"),
        }
    }

    #[test]
    fn test_explicit_repeat_is_limited() {
        let defs = vec![
            TrackDef::Single(TrackSize::px(10.0)),
            TrackDef::Repeat {
                count: RepeatCount::Count(u32::MAX),
                tracks: vec![TrackSize::px(1.0), TrackSize::fr(1.0)],
            },
        ];
        let expanded = expand_tracks(&defs, Some(500.0), 0.0);
        assert_eq!(expanded.sizes.len(), MAX_TRACKS);
        assert_eq!(expanded.auto_fit.len(), MAX_TRACKS);
    }

    #[test]
    fn test_sparse_and_dense_auto_placement() {
        let mut ids: slotmap::SlotMap<WidgetId, ()> = slotmap::SlotMap::with_key();
        let style = Rc::new(ComputedStyle::initial(&plume_theme::ScaledTheme::default()));
        let mut placements = Vec::new();
        // A wide item that does not fit after the first, then a narrow one
        for span in [1, 3, 1] {
            placements.push((
                ids.insert(()),
                Rc::clone(&style),
                AxisPlacement::Auto(1),
                AxisPlacement::Auto(span),
            ));
        }

        let (items, rows, _) = place_items(placements.clone(), GridAutoFlow::Row, 0, 3);
        assert_eq!(rows, 3);
        assert_eq!(items[2].row.start, 2);

        let (items, rows, _) = place_items(placements, GridAutoFlow::RowDense, 0, 3);
        assert_eq!(rows, 2);
        assert_eq!((items[2].row.start, items[2].column.start), (0, 1));
    }

    #[test]
    fn test_collapsed_tracks_take_no_gap() {
        let offsets = track_offsets(&[50.0, 0.0, 50.0], &[false, true, false], 10.0);
        assert_eq!(offsets, vec![0.0, 50.0, 60.0]);
    }
}
