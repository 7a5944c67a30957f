//! Widget styles
//!
//! Provides [`WidgetStyle`], the cascading property bag attached to every
//! node of the widget tree.
//!
//! Every property is an `Option`: `None` means "not set here" and lets the
//! cascade (pseudo-state merge, inheritance, defaults) decide. Setting a
//! property to its default value is still an explicit override.
//!
//! # Example
//!
//! ```rust
//! use plume_layout::WidgetStyle;
//! use plume_theme::{ColorToken, SpacingToken};
//!
//! let style = WidgetStyle::new()
//!     .flex_row()
//!     .gap(SpacingToken::Space2)
//!     .padding(SpacingToken::Space3)
//!     .background(ColorToken::Surface)
//!     .hover(WidgetStyle::new().background(ColorToken::ControlBgHover));
//!
//! assert!(style.hover.is_some());
//! ```

use plume_core::{Color, Edges, Point, Transform2D};
use plume_paint::ImageId;
use plume_theme::{FontFamilyToken, FontWeight, ShadowToken};

use crate::grid_template::{parse_track_list, GridAreas, GridPlacement, TrackList};
use crate::values::{ColorValue, OpacityValue, SizeValue, SpacingValue};

// ============================================================================
// Keyword enums
// ============================================================================

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Display {
    #[default]
    Block,
    Inline,
    InlineBlock,
    Flex,
    Grid,
    None,
}

impl Display {
    pub fn is_inline_level(self) -> bool {
        matches!(self, Display::Inline | Display::InlineBlock)
    }

    /// The block-level equivalent used for flex/grid items and absolutely
    /// positioned boxes
    pub fn blockified(self) -> Self {
        if self.is_inline_level() {
            Display::Block
        } else {
            self
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Position {
    #[default]
    Static,
    Relative,
    Absolute,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BoxSizing {
    #[default]
    ContentBox,
    BorderBox,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FlexDirection {
    #[default]
    Row,
    RowReverse,
    Column,
    ColumnReverse,
}

impl FlexDirection {
    pub fn is_row(self) -> bool {
        matches!(self, FlexDirection::Row | FlexDirection::RowReverse)
    }

    pub fn is_reverse(self) -> bool {
        matches!(self, FlexDirection::RowReverse | FlexDirection::ColumnReverse)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FlexWrap {
    #[default]
    NoWrap,
    Wrap,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum JustifyContent {
    #[default]
    FlexStart,
    FlexEnd,
    Center,
    SpaceBetween,
    SpaceAround,
    SpaceEvenly,
}

/// Item alignment, shared by `align-items/self` and `justify-items/self`
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AlignItems {
    Start,
    End,
    Center,
    #[default]
    Stretch,
    Baseline,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AlignContent {
    Start,
    End,
    Center,
    #[default]
    Stretch,
    SpaceBetween,
    SpaceAround,
    SpaceEvenly,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
    Justify,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum VerticalAlign {
    Top,
    Middle,
    Bottom,
    #[default]
    Baseline,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GridAutoFlow {
    #[default]
    Row,
    Column,
    RowDense,
    ColumnDense,
}

impl GridAutoFlow {
    pub fn is_row(self) -> bool {
        matches!(self, GridAutoFlow::Row | GridAutoFlow::RowDense)
    }

    pub fn is_dense(self) -> bool {
        matches!(self, GridAutoFlow::RowDense | GridAutoFlow::ColumnDense)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Overflow {
    #[default]
    Visible,
    Hidden,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Visibility {
    #[default]
    Visible,
    Hidden,
}

// ============================================================================
// Compound values
// ============================================================================

/// Font family: a theme family or a concrete family name
#[derive(Clone, Debug, PartialEq)]
pub enum FontFamilyValue {
    Token(FontFamilyToken),
    Name(String),
    Inherit,
}

/// One border or outline side. Unset fields fall back to the shared default.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BorderSide {
    pub width: Option<SpacingValue>,
    pub color: Option<ColorValue>,
}

impl BorderSide {
    pub fn new(width: impl Into<SpacingValue>, color: impl Into<ColorValue>) -> Self {
        Self {
            width: Some(width.into()),
            color: Some(color.into()),
        }
    }

    fn merge(&mut self, other: &BorderSide) {
        merge_option(&mut self.width, &other.width);
        merge_option(&mut self.color, &other.color);
    }
}

/// Border: a shared default side layered under optional per-side overrides
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Border {
    pub all: BorderSide,
    pub sides: Edges<BorderSide>,
}

impl Border {
    fn merge(&mut self, other: &Border) {
        self.all.merge(&other.all);
        self.sides.top.merge(&other.sides.top);
        self.sides.right.merge(&other.sides.right);
        self.sides.bottom.merge(&other.sides.bottom);
        self.sides.left.merge(&other.sides.left);
    }
}

/// Outline ring drawn outside the border box
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Outline {
    pub all: BorderSide,
    pub sides: Edges<BorderSide>,
    pub offset: Option<SpacingValue>,
}

impl Outline {
    fn merge(&mut self, other: &Outline) {
        self.all.merge(&other.all);
        self.sides.top.merge(&other.sides.top);
        self.sides.right.merge(&other.sides.right);
        self.sides.bottom.merge(&other.sides.bottom);
        self.sides.left.merge(&other.sides.left);
        merge_option(&mut self.offset, &other.offset);
    }
}

/// Per-corner radii
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CornerValues {
    pub top_left: SpacingValue,
    pub top_right: SpacingValue,
    pub bottom_right: SpacingValue,
    pub bottom_left: SpacingValue,
}

impl CornerValues {
    pub fn uniform(radius: impl Into<SpacingValue>) -> Self {
        let r = radius.into();
        Self {
            top_left: r.clone(),
            top_right: r.clone(),
            bottom_right: r.clone(),
            bottom_left: r,
        }
    }
}

/// A gradient color stop with an unresolved color
#[derive(Clone, Debug, PartialEq)]
pub struct ColorStop {
    pub offset: f32,
    pub color: ColorValue,
}

impl ColorStop {
    pub fn new(offset: f32, color: impl Into<ColorValue>) -> Self {
        Self {
            offset,
            color: color.into(),
        }
    }
}

/// One background layer. Layers are listed top-most first.
#[derive(Clone, Debug, PartialEq)]
pub enum BackgroundLayer {
    Color(ColorValue),
    /// Angle in degrees, 0 pointing up
    LinearGradient { angle: f32, stops: Vec<ColorStop> },
    /// Center in unit coordinates of the padding box
    RadialGradient {
        center: Point,
        radius: f32,
        stops: Vec<ColorStop>,
    },
    ConicGradient {
        center: Point,
        angle: f32,
        stops: Vec<ColorStop>,
    },
    Image { image: ImageId, tint: ColorValue },
}

/// A box shadow
#[derive(Clone, Debug, PartialEq)]
pub enum ShadowValue {
    Token(ShadowToken),
    Custom {
        offset_x: f32,
        offset_y: f32,
        blur: f32,
        spread: f32,
        color: ColorValue,
    },
}

// ============================================================================
// WidgetStyle
// ============================================================================

/// Cascading style of one widget
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WidgetStyle {
    // Display and positioning
    pub display: Option<Display>,
    pub position: Option<Position>,
    pub inset: Edges<Option<SpacingValue>>,
    pub box_sizing: Option<BoxSizing>,

    // Box model
    pub margin: Edges<Option<SpacingValue>>,
    pub padding: Edges<Option<SpacingValue>>,
    pub border: Border,
    pub border_radius: Option<CornerValues>,
    pub outline: Outline,

    // Sizing
    pub width: Option<SizeValue>,
    pub height: Option<SizeValue>,
    pub min_width: Option<SizeValue>,
    pub min_height: Option<SizeValue>,
    pub max_width: Option<SizeValue>,
    pub max_height: Option<SizeValue>,

    // Flex container / item
    pub flex_direction: Option<FlexDirection>,
    pub flex_wrap: Option<FlexWrap>,
    pub flex_grow: Option<f32>,
    pub flex_shrink: Option<f32>,
    pub flex_basis: Option<SizeValue>,
    pub row_gap: Option<SpacingValue>,
    pub column_gap: Option<SpacingValue>,
    pub justify_content: Option<JustifyContent>,
    pub align_items: Option<AlignItems>,
    pub align_self: Option<AlignItems>,
    pub align_content: Option<AlignContent>,

    // Grid container / item
    pub grid_template_columns: Option<TrackList>,
    pub grid_template_rows: Option<TrackList>,
    pub grid_template_areas: Option<GridAreas>,
    pub grid_auto_columns: Option<SizeValue>,
    pub grid_auto_rows: Option<SizeValue>,
    pub grid_auto_flow: Option<GridAutoFlow>,
    pub grid_area: Option<String>,
    pub grid_row: Option<GridPlacement>,
    pub grid_column: Option<GridPlacement>,
    pub justify_items: Option<AlignItems>,
    pub justify_self: Option<AlignItems>,

    // Typography (inherited when unset)
    pub font_family: Option<FontFamilyValue>,
    pub font_size: Option<SizeValue>,
    pub font_weight: Option<FontWeight>,
    /// Multiplier of the font size
    pub line_height: Option<f32>,
    pub color: Option<ColorValue>,
    pub text_align: Option<TextAlign>,
    pub vertical_align: Option<VerticalAlign>,

    // Visual
    pub background: Option<Vec<BackgroundLayer>>,
    pub box_shadow: Option<Vec<ShadowValue>>,
    pub opacity: Option<OpacityValue>,
    /// Applied about the border-box center; translation in logical pixels
    pub transform: Option<Transform2D>,
    pub overflow: Option<Overflow>,
    pub visibility: Option<Visibility>,

    // Pseudo-state overrides
    pub hover: Option<Box<WidgetStyle>>,
    pub active: Option<Box<WidgetStyle>>,
    pub focus: Option<Box<WidgetStyle>>,
    pub disabled: Option<Box<WidgetStyle>>,
}

/// Interaction state of a widget, selecting which pseudo-state styles apply
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WidgetState {
    pub hovered: bool,
    pub active: bool,
    pub focused: bool,
    pub disabled: bool,
}

fn merge_option<T: Clone>(target: &mut Option<T>, source: &Option<T>) {
    if source.is_some() {
        target.clone_from(source);
    }
}

fn merge_edges<T: Clone>(target: &mut Edges<Option<T>>, source: &Edges<Option<T>>) {
    merge_option(&mut target.top, &source.top);
    merge_option(&mut target.right, &source.right);
    merge_option(&mut target.bottom, &source.bottom);
    merge_option(&mut target.left, &source.left);
}

fn merge_state(target: &mut Option<Box<WidgetStyle>>, source: &Option<Box<WidgetStyle>>) {
    if let Some(source) = source {
        match target {
            Some(target) => target.merge(source),
            None => *target = Some(source.clone()),
        }
    }
}

fn uniform_sides(value: SpacingValue) -> Edges<Option<SpacingValue>> {
    symmetric_sides(value.clone(), value)
}

fn symmetric_sides(
    vertical: SpacingValue,
    horizontal: SpacingValue,
) -> Edges<Option<SpacingValue>> {
    Edges {
        top: Some(vertical.clone()),
        right: Some(horizontal.clone()),
        bottom: Some(vertical),
        left: Some(horizontal),
    }
}

macro_rules! merge_fields {
    ($target:ident, $source:ident, $($field:ident),* $(,)?) => {
        $( merge_option(&mut $target.$field, &$source.$field); )*
    };
}

impl WidgetStyle {
    /// Create a new empty style
    pub fn new() -> Self {
        Self::default()
    }

    /// Overlay every property set in `other` onto `self`.
    ///
    /// Pseudo-state sub-styles merge recursively.
    pub fn merge(&mut self, other: &WidgetStyle) {
        merge_fields!(
            self,
            other,
            display,
            position,
            box_sizing,
            border_radius,
            width,
            height,
            min_width,
            min_height,
            max_width,
            max_height,
            flex_direction,
            flex_wrap,
            flex_grow,
            flex_shrink,
            flex_basis,
            row_gap,
            column_gap,
            justify_content,
            align_items,
            align_self,
            align_content,
            grid_template_columns,
            grid_template_rows,
            grid_template_areas,
            grid_auto_columns,
            grid_auto_rows,
            grid_auto_flow,
            grid_area,
            grid_row,
            grid_column,
            justify_items,
            justify_self,
            font_family,
            font_size,
            font_weight,
            line_height,
            color,
            text_align,
            vertical_align,
            background,
            box_shadow,
            opacity,
            transform,
            overflow,
            visibility,
        );
        merge_edges(&mut self.inset, &other.inset);
        merge_edges(&mut self.margin, &other.margin);
        merge_edges(&mut self.padding, &other.padding);
        self.border.merge(&other.border);
        self.outline.merge(&other.outline);
        merge_state(&mut self.hover, &other.hover);
        merge_state(&mut self.active, &other.active);
        merge_state(&mut self.focus, &other.focus);
        merge_state(&mut self.disabled, &other.disabled);
    }

    /// Return a new style with `other` merged over `self`
    pub fn merged(&self, other: &WidgetStyle) -> WidgetStyle {
        let mut result = self.clone();
        result.merge(other);
        result
    }

    /// The effective style for `state`: the base properties with the
    /// matching pseudo-state styles cascaded on top in the order hover,
    /// focus, active, disabled. The result carries no sub-styles.
    pub fn resolve_state(&self, state: WidgetState) -> WidgetStyle {
        let mut current = self.clone();
        current.hover = None;
        current.active = None;
        current.focus = None;
        current.disabled = None;

        let layers = [
            (state.hovered, &self.hover),
            (state.focused, &self.focus),
            (state.active, &self.active),
            (state.disabled, &self.disabled),
        ];
        for (on, layer) in layers {
            if let (true, Some(layer)) = (on, layer) {
                let mut layer = layer.as_ref().clone();
                layer.hover = None;
                layer.active = None;
                layer.focus = None;
                layer.disabled = None;
                current.merge(&layer);
            }
        }
        current
    }

    // =========================================================================
    // Display & position
    // =========================================================================

    pub fn display(mut self, display: Display) -> Self {
        self.display = Some(display);
        self
    }

    pub fn block(self) -> Self {
        self.display(Display::Block)
    }

    pub fn inline(self) -> Self {
        self.display(Display::Inline)
    }

    pub fn inline_block(self) -> Self {
        self.display(Display::InlineBlock)
    }

    pub fn hidden(self) -> Self {
        self.display(Display::None)
    }

    pub fn position(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }

    pub fn absolute(self) -> Self {
        self.position(Position::Absolute)
    }

    pub fn relative(self) -> Self {
        self.position(Position::Relative)
    }

    pub fn top(mut self, value: impl Into<SpacingValue>) -> Self {
        self.inset.top = Some(value.into());
        self
    }

    pub fn right(mut self, value: impl Into<SpacingValue>) -> Self {
        self.inset.right = Some(value.into());
        self
    }

    pub fn bottom(mut self, value: impl Into<SpacingValue>) -> Self {
        self.inset.bottom = Some(value.into());
        self
    }

    pub fn left(mut self, value: impl Into<SpacingValue>) -> Self {
        self.inset.left = Some(value.into());
        self
    }

    pub fn box_sizing(mut self, box_sizing: BoxSizing) -> Self {
        self.box_sizing = Some(box_sizing);
        self
    }

    pub fn border_box(self) -> Self {
        self.box_sizing(BoxSizing::BorderBox)
    }

    // =========================================================================
    // Box model
    // =========================================================================

    pub fn padding(mut self, value: impl Into<SpacingValue>) -> Self {
        self.padding = uniform_sides(value.into());
        self
    }

    /// Vertical and horizontal padding
    pub fn padding_xy(mut self, x: impl Into<SpacingValue>, y: impl Into<SpacingValue>) -> Self {
        self.padding = symmetric_sides(y.into(), x.into());
        self
    }

    pub fn padding_top(mut self, value: impl Into<SpacingValue>) -> Self {
        self.padding.top = Some(value.into());
        self
    }

    pub fn padding_right(mut self, value: impl Into<SpacingValue>) -> Self {
        self.padding.right = Some(value.into());
        self
    }

    pub fn padding_bottom(mut self, value: impl Into<SpacingValue>) -> Self {
        self.padding.bottom = Some(value.into());
        self
    }

    pub fn padding_left(mut self, value: impl Into<SpacingValue>) -> Self {
        self.padding.left = Some(value.into());
        self
    }

    pub fn margin(mut self, value: impl Into<SpacingValue>) -> Self {
        self.margin = uniform_sides(value.into());
        self
    }

    pub fn margin_xy(mut self, x: impl Into<SpacingValue>, y: impl Into<SpacingValue>) -> Self {
        self.margin = symmetric_sides(y.into(), x.into());
        self
    }

    pub fn margin_top(mut self, value: impl Into<SpacingValue>) -> Self {
        self.margin.top = Some(value.into());
        self
    }

    pub fn margin_right(mut self, value: impl Into<SpacingValue>) -> Self {
        self.margin.right = Some(value.into());
        self
    }

    pub fn margin_bottom(mut self, value: impl Into<SpacingValue>) -> Self {
        self.margin.bottom = Some(value.into());
        self
    }

    pub fn margin_left(mut self, value: impl Into<SpacingValue>) -> Self {
        self.margin.left = Some(value.into());
        self
    }

    /// `margin: 0 auto`
    pub fn margin_x_auto(mut self) -> Self {
        self.margin.left = Some(SpacingValue::Auto);
        self.margin.right = Some(SpacingValue::Auto);
        self
    }

    /// Border on every side
    pub fn border(mut self, width: impl Into<SpacingValue>, color: impl Into<ColorValue>) -> Self {
        self.border.all = BorderSide::new(width, color);
        self
    }

    pub fn border_width(mut self, width: impl Into<SpacingValue>) -> Self {
        self.border.all.width = Some(width.into());
        self
    }

    pub fn border_color(mut self, color: impl Into<ColorValue>) -> Self {
        self.border.all.color = Some(color.into());
        self
    }

    pub fn border_top(
        mut self,
        width: impl Into<SpacingValue>,
        color: impl Into<ColorValue>,
    ) -> Self {
        self.border.sides.top = BorderSide::new(width, color);
        self
    }

    pub fn border_right(
        mut self,
        width: impl Into<SpacingValue>,
        color: impl Into<ColorValue>,
    ) -> Self {
        self.border.sides.right = BorderSide::new(width, color);
        self
    }

    pub fn border_bottom(
        mut self,
        width: impl Into<SpacingValue>,
        color: impl Into<ColorValue>,
    ) -> Self {
        self.border.sides.bottom = BorderSide::new(width, color);
        self
    }

    pub fn border_left(
        mut self,
        width: impl Into<SpacingValue>,
        color: impl Into<ColorValue>,
    ) -> Self {
        self.border.sides.left = BorderSide::new(width, color);
        self
    }

    pub fn rounded(mut self, radius: impl Into<SpacingValue>) -> Self {
        self.border_radius = Some(CornerValues::uniform(radius));
        self
    }

    pub fn rounded_corners(mut self, corners: CornerValues) -> Self {
        self.border_radius = Some(corners);
        self
    }

    pub fn outline(mut self, width: impl Into<SpacingValue>, color: impl Into<ColorValue>) -> Self {
        self.outline.all = BorderSide::new(width, color);
        self
    }

    pub fn outline_offset(mut self, offset: impl Into<SpacingValue>) -> Self {
        self.outline.offset = Some(offset.into());
        self
    }

    // =========================================================================
    // Sizing
    // =========================================================================

    pub fn width(mut self, value: impl Into<SizeValue>) -> Self {
        self.width = Some(value.into());
        self
    }

    pub fn height(mut self, value: impl Into<SizeValue>) -> Self {
        self.height = Some(value.into());
        self
    }

    pub fn size(self, width: impl Into<SizeValue>, height: impl Into<SizeValue>) -> Self {
        self.width(width).height(height)
    }

    pub fn width_percent(self, percent: f32) -> Self {
        self.width(SizeValue::Percent(percent))
    }

    pub fn height_percent(self, percent: f32) -> Self {
        self.height(SizeValue::Percent(percent))
    }

    pub fn min_width(mut self, value: impl Into<SizeValue>) -> Self {
        self.min_width = Some(value.into());
        self
    }

    pub fn min_height(mut self, value: impl Into<SizeValue>) -> Self {
        self.min_height = Some(value.into());
        self
    }

    pub fn max_width(mut self, value: impl Into<SizeValue>) -> Self {
        self.max_width = Some(value.into());
        self
    }

    pub fn max_height(mut self, value: impl Into<SizeValue>) -> Self {
        self.max_height = Some(value.into());
        self
    }

    // =========================================================================
    // Flex
    // =========================================================================

    /// `display: flex; flex-direction: row`
    pub fn flex_row(mut self) -> Self {
        self.display = Some(Display::Flex);
        self.flex_direction = Some(FlexDirection::Row);
        self
    }

    /// `display: flex; flex-direction: column`
    pub fn flex_col(mut self) -> Self {
        self.display = Some(Display::Flex);
        self.flex_direction = Some(FlexDirection::Column);
        self
    }

    pub fn flex_direction(mut self, direction: FlexDirection) -> Self {
        self.flex_direction = Some(direction);
        self
    }

    pub fn flex_wrap(mut self) -> Self {
        self.flex_wrap = Some(FlexWrap::Wrap);
        self
    }

    pub fn flex_grow(mut self, grow: f32) -> Self {
        self.flex_grow = Some(grow);
        self
    }

    pub fn flex_shrink(mut self, shrink: f32) -> Self {
        self.flex_shrink = Some(shrink);
        self
    }

    pub fn flex_basis(mut self, basis: impl Into<SizeValue>) -> Self {
        self.flex_basis = Some(basis.into());
        self
    }

    /// `flex: 1 1 0`
    pub fn flex_1(self) -> Self {
        self.flex_grow(1.0).flex_shrink(1.0).flex_basis(0.0)
    }

    /// Row and column gap
    pub fn gap(mut self, gap: impl Into<SpacingValue>) -> Self {
        let g = gap.into();
        self.row_gap = Some(g.clone());
        self.column_gap = Some(g);
        self
    }

    pub fn row_gap(mut self, gap: impl Into<SpacingValue>) -> Self {
        self.row_gap = Some(gap.into());
        self
    }

    pub fn column_gap(mut self, gap: impl Into<SpacingValue>) -> Self {
        self.column_gap = Some(gap.into());
        self
    }

    pub fn justify_content(mut self, justify: JustifyContent) -> Self {
        self.justify_content = Some(justify);
        self
    }

    pub fn align_items(mut self, align: AlignItems) -> Self {
        self.align_items = Some(align);
        self
    }

    pub fn align_self(mut self, align: AlignItems) -> Self {
        self.align_self = Some(align);
        self
    }

    pub fn align_content(mut self, align: AlignContent) -> Self {
        self.align_content = Some(align);
        self
    }

    /// Center children on both axes
    pub fn items_center(self) -> Self {
        self.align_items(AlignItems::Center)
            .justify_content(JustifyContent::Center)
    }

    // =========================================================================
    // Grid
    // =========================================================================

    /// `display: grid`
    pub fn grid(self) -> Self {
        self.display(Display::Grid)
    }

    /// Parse and set `grid-template-columns`
    pub fn grid_template_columns(mut self, template: &str) -> Self {
        self.grid_template_columns = Some(parse_track_list(template));
        self
    }

    /// Parse and set `grid-template-rows`
    pub fn grid_template_rows(mut self, template: &str) -> Self {
        self.grid_template_rows = Some(parse_track_list(template));
        self
    }

    pub fn grid_template_areas<S: AsRef<str>>(mut self, rows: &[S]) -> Self {
        self.grid_template_areas = Some(GridAreas::parse(rows));
        self
    }

    pub fn grid_auto_rows(mut self, size: impl Into<SizeValue>) -> Self {
        self.grid_auto_rows = Some(size.into());
        self
    }

    pub fn grid_auto_columns(mut self, size: impl Into<SizeValue>) -> Self {
        self.grid_auto_columns = Some(size.into());
        self
    }

    pub fn grid_auto_flow(mut self, flow: GridAutoFlow) -> Self {
        self.grid_auto_flow = Some(flow);
        self
    }

    pub fn grid_area(mut self, name: impl Into<String>) -> Self {
        self.grid_area = Some(name.into());
        self
    }

    /// Parse and set `grid-row`, e.g. `"1 / span 2"`
    pub fn grid_row(mut self, placement: &str) -> Self {
        self.grid_row = Some(GridPlacement::parse(placement));
        self
    }

    /// Parse and set `grid-column`, e.g. `"2 / 4"`
    pub fn grid_column(mut self, placement: &str) -> Self {
        self.grid_column = Some(GridPlacement::parse(placement));
        self
    }

    pub fn justify_items(mut self, align: AlignItems) -> Self {
        self.justify_items = Some(align);
        self
    }

    pub fn justify_self(mut self, align: AlignItems) -> Self {
        self.justify_self = Some(align);
        self
    }

    // =========================================================================
    // Typography
    // =========================================================================

    pub fn font_family(mut self, family: FontFamilyToken) -> Self {
        self.font_family = Some(FontFamilyValue::Token(family));
        self
    }

    pub fn font_name(mut self, name: impl Into<String>) -> Self {
        self.font_family = Some(FontFamilyValue::Name(name.into()));
        self
    }

    pub fn font_size(mut self, size: impl Into<SizeValue>) -> Self {
        self.font_size = Some(size.into());
        self
    }

    pub fn font_weight(mut self, weight: FontWeight) -> Self {
        self.font_weight = Some(weight);
        self
    }

    pub fn line_height(mut self, multiplier: f32) -> Self {
        self.line_height = Some(multiplier);
        self
    }

    pub fn text_color(mut self, color: impl Into<ColorValue>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn text_align(mut self, align: TextAlign) -> Self {
        self.text_align = Some(align);
        self
    }

    pub fn vertical_align(mut self, align: VerticalAlign) -> Self {
        self.vertical_align = Some(align);
        self
    }

    // =========================================================================
    // Visual
    // =========================================================================

    /// Single solid background
    pub fn background(mut self, color: impl Into<ColorValue>) -> Self {
        self.background = Some(vec![BackgroundLayer::Color(color.into())]);
        self
    }

    pub fn bg(self, color: Color) -> Self {
        self.background(color)
    }

    /// Replace the background with `layers`, top-most first
    pub fn background_layers(mut self, layers: Vec<BackgroundLayer>) -> Self {
        self.background = Some(layers);
        self
    }

    pub fn linear_gradient(mut self, angle: f32, stops: Vec<ColorStop>) -> Self {
        self.background = Some(vec![BackgroundLayer::LinearGradient { angle, stops }]);
        self
    }

    pub fn shadow(mut self, shadow: ShadowValue) -> Self {
        self.box_shadow = Some(vec![shadow]);
        self
    }

    pub fn shadow_token(self, token: ShadowToken) -> Self {
        self.shadow(ShadowValue::Token(token))
    }

    pub fn opacity(mut self, opacity: impl Into<OpacityValue>) -> Self {
        self.opacity = Some(opacity.into());
        self
    }

    pub fn transform(mut self, transform: Transform2D) -> Self {
        self.transform = Some(transform);
        self
    }

    pub fn overflow_hidden(mut self) -> Self {
        self.overflow = Some(Overflow::Hidden);
        self
    }

    pub fn visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = Some(visibility);
        self
    }

    // =========================================================================
    // Pseudo-states
    // =========================================================================

    pub fn hover(mut self, style: WidgetStyle) -> Self {
        self.hover = Some(Box::new(style));
        self
    }

    pub fn active(mut self, style: WidgetStyle) -> Self {
        self.active = Some(Box::new(style));
        self
    }

    pub fn focus(mut self, style: WidgetStyle) -> Self {
        self.focus = Some(Box::new(style));
        self
    }

    pub fn disabled(mut self, style: WidgetStyle) -> Self {
        self.disabled = Some(Box::new(style));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plume_theme::{ColorToken, OpacityToken, SpacingToken};

    #[test]
    fn test_merge_only_overwrites_set_fields() {
        let mut base = WidgetStyle::new().width(100.0).opacity(0.5).padding(4.0);
        let overlay = WidgetStyle::new().opacity(1.0).padding_left(8.0);
        base.merge(&overlay);

        assert_eq!(base.width, Some(SizeValue::Px(100.0)));
        // Setting the default value still overrides
        assert_eq!(base.opacity, Some(OpacityValue::Value(1.0)));
        assert_eq!(base.padding.top, Some(SpacingValue::Px(4.0)));
        assert_eq!(base.padding.left, Some(SpacingValue::Px(8.0)));
    }

    #[test]
    fn test_border_sides_layer_over_shared_default() {
        let mut style = WidgetStyle::new().border(1.0, ColorToken::Border);
        style.merge(&WidgetStyle::new().border_bottom(3.0, ColorToken::Accent));
        assert_eq!(style.border.all.width, Some(SpacingValue::Px(1.0)));
        assert_eq!(style.border.sides.bottom.width, Some(SpacingValue::Px(3.0)));
        assert_eq!(style.border.sides.top, BorderSide::default());
    }

    #[test]
    fn test_state_cascade_order() {
        let style = WidgetStyle::new()
            .background(ColorToken::ControlBg)
            .hover(WidgetStyle::new().background(ColorToken::ControlBgHover).opacity(0.9))
            .active(WidgetStyle::new().background(ColorToken::ControlBgActive))
            .disabled(WidgetStyle::new().opacity(OpacityToken::Disabled));

        let idle = style.resolve_state(WidgetState::default());
        assert_eq!(
            idle.background,
            Some(vec![BackgroundLayer::Color(ColorToken::ControlBg.into())])
        );
        assert!(idle.hover.is_none());

        let pressed = style.resolve_state(WidgetState {
            hovered: true,
            active: true,
            ..Default::default()
        });
        assert_eq!(
            pressed.background,
            Some(vec![BackgroundLayer::Color(ColorToken::ControlBgActive.into())])
        );
        assert_eq!(pressed.opacity, Some(OpacityValue::Value(0.9)));

        let disabled = style.resolve_state(WidgetState {
            hovered: true,
            disabled: true,
            ..Default::default()
        });
        assert_eq!(disabled.opacity, Some(OpacityToken::Disabled.into()));
    }

    #[test]
    fn test_state_styles_merge_recursively() {
        let mut a = WidgetStyle::new().hover(WidgetStyle::new().opacity(0.5));
        let b = WidgetStyle::new().hover(WidgetStyle::new().gap(SpacingToken::Space1));
        a.merge(&b);
        let hover = a.hover.as_deref().cloned().unwrap_or_default();
        assert_eq!(hover.opacity, Some(OpacityValue::Value(0.5)));
        assert_eq!(hover.row_gap, Some(SpacingValue::Token(SpacingToken::Space1)));
    }
}
