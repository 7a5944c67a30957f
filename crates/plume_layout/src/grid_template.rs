//! Grid template micro-syntax
//!
//! Parses the CSS subset accepted by `grid-template-columns/rows`,
//! `grid-template-areas` and `grid-row`/`grid-column`:
//!
//! ```text
//! 1fr 200px minmax(100px, 1fr) repeat(3, 1fr) repeat(auto-fill, 80px)
//! "header header" "sidebar main"
//! 2 / span 3
//! ```
//!
//! Parsing never fails as a whole. An unparsable track becomes `auto`, a
//! non-rectangular area is dropped, and each is reported via `tracing`.

use indexmap::IndexMap;
use nom::{
    branch::alt,
    bytes::complete::{tag, tag_no_case},
    character::complete::{char, i32 as parse_i32, multispace0, multispace1, u32 as parse_u32},
    combinator::{all_consuming, map, opt, value},
    error::{context, VerboseError, VerboseErrorKind},
    number::complete::float,
    sequence::{delimited, preceded, separated_pair},
    Finish, IResult,
};
use tracing::{debug, warn};

use crate::values::SizeValue;

/// Custom parser result type using VerboseError for better diagnostics
type ParseResult<'a, O> = IResult<&'a str, O, VerboseError<&'a str>>;

// ============================================================================
// Track lists
// ============================================================================

/// Repetition count of a `repeat()` entry
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RepeatCount {
    Count(u32),
    AutoFill,
    /// Like `AutoFill`, but empty repeated tracks collapse
    AutoFit,
}

/// One entry of a track list
#[derive(Clone, Debug, PartialEq)]
pub enum TrackEntry {
    Single(SizeValue),
    Repeat {
        count: RepeatCount,
        tracks: Vec<SizeValue>,
    },
}

/// Ordered track definitions for one grid axis
pub type TrackList = Vec<TrackEntry>;

/// Parse a track list, substituting `auto` for tokens that fail to parse
pub fn parse_track_list(source: &str) -> TrackList {
    let mut tracks = TrackList::new();
    for token in split_tokens(source) {
        if let Some(entry) = parse_repeat(token) {
            tracks.extend(entry);
            continue;
        }
        tracks.push(TrackEntry::Single(parse_track_or_auto(token)));
    }
    tracks
}

fn parse_track_or_auto(token: &str) -> SizeValue {
    match all_consuming(track)(token).finish() {
        Ok((_, size)) => size,
        Err(err) => {
            debug!("track parse error: {}", format_verbose_error(&err));
            warn!("unparsable grid track '{}', using auto", token);
            SizeValue::Auto
        }
    }
}

/// `repeat(count, tracks...)`. Returns `None` when `token` is not a repeat.
fn parse_repeat(token: &str) -> Option<Option<TrackEntry>> {
    let lower = token.to_ascii_lowercase();
    if !lower.starts_with("repeat(") {
        return None;
    }
    if !token.ends_with(')') {
        warn!("unterminated repeat() in grid template '{}'", token);
        return Some(Some(TrackEntry::Single(SizeValue::Auto)));
    }
    let inner = &token["repeat(".len()..token.len() - 1];
    let Some((count_src, tracks_src)) = split_once_top_level(inner, ',') else {
        warn!("repeat() without track list '{}', using auto", token);
        return Some(Some(TrackEntry::Single(SizeValue::Auto)));
    };

    let count = match all_consuming(delimited(multispace0, repeat_count, multispace0))(count_src)
        .finish()
    {
        Ok((_, RepeatCount::Count(0))) => {
            warn!("repeat() with a count of zero ignored");
            return Some(None);
        }
        Ok((_, count)) => count,
        Err(err) => {
            debug!("repeat count parse error: {}", format_verbose_error(&err));
            warn!("invalid repeat() count '{}', using auto", count_src.trim());
            return Some(Some(TrackEntry::Single(SizeValue::Auto)));
        }
    };

    let tracks: Vec<SizeValue> = split_tokens(tracks_src)
        .into_iter()
        .map(|t| {
            if t.to_ascii_lowercase().starts_with("repeat(") {
                warn!("nested repeat() in grid template, using auto");
                SizeValue::Auto
            } else {
                parse_track_or_auto(t)
            }
        })
        .collect();
    if tracks.is_empty() {
        warn!("repeat() with an empty track list ignored");
        return Some(None);
    }
    Some(Some(TrackEntry::Repeat { count, tracks }))
}

/// Split on whitespace outside parentheses
fn split_tokens(source: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut depth = 0usize;
    let mut start: Option<usize> = None;
    for (i, c) in source.char_indices() {
        match c {
            '(' => {
                depth += 1;
                start.get_or_insert(i);
            }
            ')' => {
                depth = depth.saturating_sub(1);
                start.get_or_insert(i);
            }
            c if c.is_whitespace() && depth == 0 => {
                if let Some(s) = start.take() {
                    tokens.push(&source[s..i]);
                }
            }
            _ => {
                start.get_or_insert(i);
            }
        }
    }
    if let Some(s) = start {
        tokens.push(&source[s..]);
    }
    tokens
}

fn split_once_top_level(source: &str, sep: char) -> Option<(&str, &str)> {
    let mut depth = 0usize;
    for (i, c) in source.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            c if c == sep && depth == 0 => return Some((&source[..i], &source[i + 1..])),
            _ => {}
        }
    }
    None
}

fn ws<'a, O, F>(inner: F) -> impl FnMut(&'a str) -> ParseResult<'a, O>
where
    F: FnMut(&'a str) -> ParseResult<'a, O>,
{
    delimited(multispace0, inner, multispace0)
}

fn track(input: &str) -> ParseResult<SizeValue> {
    context("grid track", alt((minmax, breadth)))(input)
}

fn minmax(input: &str) -> ParseResult<SizeValue> {
    context(
        "minmax()",
        map(
            delimited(
                tag_no_case("minmax("),
                separated_pair(ws(breadth), char(','), ws(breadth)),
                char(')'),
            ),
            |(min, max)| SizeValue::minmax(min, max),
        ),
    )(input)
}

fn breadth(input: &str) -> ParseResult<SizeValue> {
    context(
        "track breadth",
        alt((
            value(SizeValue::MinContent, tag_no_case("min-content")),
            value(SizeValue::MaxContent, tag_no_case("max-content")),
            value(SizeValue::FitContent, tag_no_case("fit-content")),
            value(SizeValue::Auto, tag_no_case("auto")),
            dimension,
        )),
    )(input)
}

fn dimension(input: &str) -> ParseResult<SizeValue> {
    let (input, number) = context("number", float)(input)?;
    let (input, unit) = opt(alt((tag_no_case("px"), tag_no_case("fr"), tag("%"))))(input)?;
    let size = match unit.map(|u| u.to_ascii_lowercase()) {
        Some(u) if u == "fr" => SizeValue::Fr(number),
        Some(u) if u == "%" => SizeValue::Percent(number),
        // Unitless numbers are pixels
        _ => SizeValue::Px(number),
    };
    Ok((input, size))
}

fn repeat_count(input: &str) -> ParseResult<RepeatCount> {
    context(
        "repeat count",
        alt((
            value(RepeatCount::AutoFill, tag_no_case("auto-fill")),
            value(RepeatCount::AutoFit, tag_no_case("auto-fit")),
            map(parse_u32, RepeatCount::Count),
        )),
    )(input)
}

/// Format a VerboseError into a human-readable message
fn format_verbose_error(err: &VerboseError<&str>) -> String {
    err.errors
        .iter()
        .map(|(rest, kind)| match kind {
            VerboseErrorKind::Context(ctx) => format!("in {} at '{}'", ctx, rest),
            VerboseErrorKind::Char(c) => format!("expected '{}' at '{}'", c, rest),
            VerboseErrorKind::Nom(ek) => format!("{:?} at '{}'", ek, rest),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

// ============================================================================
// Named areas
// ============================================================================

/// A named area as 1-based grid lines (end exclusive)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridArea {
    pub row_start: i32,
    pub row_end: i32,
    pub column_start: i32,
    pub column_end: i32,
}

/// Parsed `grid-template-areas`
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GridAreas {
    rows: usize,
    columns: usize,
    areas: IndexMap<String, GridArea>,
}

impl GridAreas {
    /// Parse one string per row. Cells are whitespace separated; a run of
    /// dots is an empty cell. Rows shorter than the widest row are padded
    /// with empty cells.
    pub fn parse<S: AsRef<str>>(rows: &[S]) -> Self {
        let cells: Vec<Vec<&str>> = rows
            .iter()
            .map(|r| r.as_ref().split_whitespace().collect())
            .collect();
        let columns = cells.iter().map(Vec::len).max().unwrap_or(0);
        if cells.iter().any(|r| r.len() != columns) {
            warn!("grid-template-areas rows have different lengths, padding with empty cells");
        }

        // Bounding box and cell count per name, in first-seen order
        let mut seen: IndexMap<&str, (GridArea, usize)> = IndexMap::new();
        for (r, row) in cells.iter().enumerate() {
            for (c, &name) in row.iter().enumerate() {
                if name.chars().all(|ch| ch == '.') {
                    continue;
                }
                let (r, c) = (r as i32 + 1, c as i32 + 1);
                seen.entry(name)
                    .and_modify(|(area, count)| {
                        area.row_start = area.row_start.min(r);
                        area.row_end = area.row_end.max(r + 1);
                        area.column_start = area.column_start.min(c);
                        area.column_end = area.column_end.max(c + 1);
                        *count += 1;
                    })
                    .or_insert((
                        GridArea {
                            row_start: r,
                            row_end: r + 1,
                            column_start: c,
                            column_end: c + 1,
                        },
                        1,
                    ));
            }
        }

        let mut areas = IndexMap::new();
        for (name, (area, count)) in seen {
            let expected =
                ((area.row_end - area.row_start) * (area.column_end - area.column_start)) as usize;
            if count != expected {
                warn!("grid area '{}' is not rectangular, ignoring it", name);
                continue;
            }
            areas.insert(name.to_string(), area);
        }

        Self {
            rows: cells.len(),
            columns,
            areas,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn get(&self, name: &str) -> Option<GridArea> {
        self.areas.get(name).copied()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.areas.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.areas.is_empty()
    }
}

// ============================================================================
// Item placement
// ============================================================================

/// One end of a grid item's placement on an axis
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GridLine {
    #[default]
    Auto,
    /// 1-based line number; negative numbers count from the explicit grid's end
    Line(i32),
    Span(u32),
}

/// `grid-row` / `grid-column`
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GridPlacement {
    pub start: GridLine,
    pub end: GridLine,
}

impl GridPlacement {
    pub const AUTO: GridPlacement = GridPlacement {
        start: GridLine::Auto,
        end: GridLine::Auto,
    };

    pub const fn new(start: GridLine, end: GridLine) -> Self {
        Self { start, end }
    }

    /// Start at `line`, spanning one track
    pub const fn line(line: i32) -> Self {
        Self::new(GridLine::Line(line), GridLine::Auto)
    }

    /// Auto placed, spanning `n` tracks
    pub const fn span(n: u32) -> Self {
        Self::new(GridLine::Auto, GridLine::Span(n))
    }

    /// Parse `"2"`, `"1 / 3"`, `"span 2"`, `"2 / span 3"` or `"auto"`.
    /// Invalid input yields [`GridPlacement::AUTO`].
    pub fn parse(source: &str) -> Self {
        match all_consuming(ws(placement))(source).finish() {
            Ok((_, placement)) => placement,
            Err(err) => {
                debug!("placement parse error: {}", format_verbose_error(&err));
                warn!("unparsable grid placement '{}', using auto", source);
                GridPlacement::AUTO
            }
        }
    }
}

fn placement(input: &str) -> ParseResult<GridPlacement> {
    let (input, start) = grid_line(input)?;
    let (input, end) = opt(preceded(ws(char('/')), grid_line))(input)?;
    Ok((input, GridPlacement::new(start, end.unwrap_or(GridLine::Auto))))
}

fn grid_line(input: &str) -> ParseResult<GridLine> {
    context(
        "grid line",
        alt((
            value(GridLine::Auto, tag_no_case("auto")),
            map(
                preceded(tag_no_case("span"), preceded(multispace1, parse_u32)),
                |n| GridLine::Span(n.max(1)),
            ),
            map(parse_i32, GridLine::Line),
        )),
    )(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mixed_track_list() {
        let tracks = parse_track_list("1fr 200px minmax(100px, 1fr) repeat(3, 1fr) 25%");
        assert_eq!(
            tracks,
            vec![
                TrackEntry::Single(SizeValue::Fr(1.0)),
                TrackEntry::Single(SizeValue::Px(200.0)),
                TrackEntry::Single(SizeValue::minmax(100.0, SizeValue::Fr(1.0))),
                TrackEntry::Repeat {
                    count: RepeatCount::Count(3),
                    tracks: vec![SizeValue::Fr(1.0)],
                },
                TrackEntry::Single(SizeValue::Percent(25.0)),
            ]
        );
    }

    #[test]
    fn test_auto_repeat_and_keywords() {
        let tracks = parse_track_list("repeat(auto-fit, minmax(80px, 1fr)) auto max-content");
        assert_eq!(tracks.len(), 3);
        assert!(matches!(
            tracks[0],
            TrackEntry::Repeat {
                count: RepeatCount::AutoFit,
                ..
            }
        ));
        assert_eq!(tracks[1], TrackEntry::Single(SizeValue::Auto));
        assert_eq!(tracks[2], TrackEntry::Single(SizeValue::MaxContent));
    }

    #[test]
    fn test_bad_token_falls_back_to_auto() {
        let tracks = parse_track_list("100px wide 1fr minmax(10px)");
        assert_eq!(
            tracks,
            vec![
                TrackEntry::Single(SizeValue::Px(100.0)),
                TrackEntry::Single(SizeValue::Auto),
                TrackEntry::Single(SizeValue::Fr(1.0)),
                TrackEntry::Single(SizeValue::Auto),
            ]
        );
    }

    #[test]
    fn test_zero_repeat_is_dropped() {
        assert!(parse_track_list("repeat(0, 10px)").is_empty());
    }

    #[test]
    fn test_template_areas() {
        let areas = GridAreas::parse(&["header header", "sidebar main", ". main"]);
        assert_eq!(areas.rows(), 3);
        assert_eq!(areas.columns(), 2);
        assert_eq!(
            areas.get("header"),
            Some(GridArea {
                row_start: 1,
                row_end: 2,
                column_start: 1,
                column_end: 3,
            })
        );
        assert_eq!(
            areas.get("main"),
            Some(GridArea {
                row_start: 2,
                row_end: 4,
                column_start: 2,
                column_end: 3,
            })
        );
        assert_eq!(areas.names().collect::<Vec<_>>(), vec!["header", "sidebar", "main"]);
    }

    #[test]
    fn test_non_rectangular_area_is_ignored() {
        let areas = GridAreas::parse(&["a a", "a b"]);
        assert_eq!(areas.get("a"), None);
        assert!(areas.get("b").is_some());
    }

    #[test]
    fn test_placement_syntax() {
        assert_eq!(GridPlacement::parse("2"), GridPlacement::line(2));
        assert_eq!(
            GridPlacement::parse("1 / 3"),
            GridPlacement::new(GridLine::Line(1), GridLine::Line(3))
        );
        assert_eq!(
            GridPlacement::parse("span 2"),
            GridPlacement::new(GridLine::Span(2), GridLine::Auto)
        );
        assert_eq!(
            GridPlacement::parse(" 2 / span 3 "),
            GridPlacement::new(GridLine::Line(2), GridLine::Span(3))
        );
        assert_eq!(
            GridPlacement::parse("-1"),
            GridPlacement::line(-1)
        );
        assert_eq!(GridPlacement::parse("one / two"), GridPlacement::AUTO);
    }
}
