//! Resolved styles
//!
//! [`ComputedStyle`] is the theme-independent snapshot produced by
//! [`WidgetStyle::compute`]. Layout and paint read only this type.

use plume_core::{Color, CornerRadius, Edges, Point, Transform2D};
use plume_paint::{GradientStop, GradientStops, ImageId};
use plume_theme::{FontFamilyToken, FontWeight, ScaledTheme, Shadow};

use crate::grid_template::{GridAreas, GridPlacement, RepeatCount, TrackEntry, TrackList};
use crate::style::*;
use crate::values::{LengthAuto, LengthPercent, SizeSpec, SizeValue, SpacingValue, TrackSize};

/// A resolved grid track list entry; `repeat()` is expanded during layout
/// once the available space is known
#[derive(Clone, Debug, PartialEq)]
pub enum TrackDef {
    Single(TrackSize),
    Repeat {
        count: RepeatCount,
        tracks: Vec<TrackSize>,
    },
}

/// A resolved background layer
#[derive(Clone, Debug, PartialEq)]
pub enum ComputedBackground {
    Color(Color),
    LinearGradient {
        angle: f32,
        stops: GradientStops,
    },
    RadialGradient {
        center: Point,
        radius: f32,
        stops: GradientStops,
    },
    ConicGradient {
        center: Point,
        angle: f32,
        stops: GradientStops,
    },
    Image {
        image: ImageId,
        tint: Color,
    },
}

/// Fully resolved style of one widget
#[derive(Clone, Debug, PartialEq)]
pub struct ComputedStyle {
    pub display: Display,
    pub position: Position,
    pub inset: Edges<LengthAuto>,
    pub box_sizing: BoxSizing,

    pub margin: Edges<LengthAuto>,
    pub padding: Edges<LengthPercent>,
    pub border_widths: Edges<f32>,
    pub border_colors: Edges<Color>,
    pub border_radius: CornerRadius,
    pub outline_widths: Edges<f32>,
    pub outline_colors: Edges<Color>,
    pub outline_offset: f32,

    pub width: SizeSpec,
    pub height: SizeSpec,
    /// `Auto` is the automatic minimum
    pub min_width: SizeSpec,
    pub min_height: SizeSpec,
    /// `Auto` means no maximum
    pub max_width: SizeSpec,
    pub max_height: SizeSpec,

    pub flex_direction: FlexDirection,
    pub flex_wrap: FlexWrap,
    pub flex_grow: f32,
    pub flex_shrink: f32,
    pub flex_basis: SizeSpec,
    pub row_gap: LengthPercent,
    pub column_gap: LengthPercent,
    pub justify_content: JustifyContent,
    pub align_items: AlignItems,
    pub align_self: Option<AlignItems>,
    pub align_content: AlignContent,

    pub grid_template_columns: Vec<TrackDef>,
    pub grid_template_rows: Vec<TrackDef>,
    pub grid_template_areas: Option<GridAreas>,
    pub grid_auto_columns: TrackSize,
    pub grid_auto_rows: TrackSize,
    pub grid_auto_flow: GridAutoFlow,
    pub grid_area: Option<String>,
    pub grid_row: GridPlacement,
    pub grid_column: GridPlacement,
    pub justify_items: AlignItems,
    pub justify_self: Option<AlignItems>,

    pub font_family: String,
    pub font_size: f32,
    pub font_weight: FontWeight,
    /// Multiplier of `font_size`
    pub line_height: f32,
    pub color: Color,
    pub text_align: TextAlign,
    pub vertical_align: VerticalAlign,

    /// Bottom-most solid color, painted as the widget quad's fill
    pub background_color: Color,
    /// Remaining layers, bottom-most first
    pub background_layers: Vec<ComputedBackground>,
    pub box_shadows: Vec<Shadow>,
    pub opacity: f32,
    pub transform: Transform2D,
    pub overflow: Overflow,
    pub visibility: Visibility,
}

impl ComputedStyle {
    /// Root defaults: every inherited property taken from the theme
    pub fn initial(theme: &ScaledTheme) -> Self {
        Self {
            display: Display::Block,
            position: Position::Static,
            inset: Edges::all(LengthAuto::Auto),
            box_sizing: BoxSizing::ContentBox,
            margin: Edges::all(LengthAuto::ZERO),
            padding: Edges::all(LengthPercent::ZERO),
            border_widths: Edges::ZERO,
            border_colors: Edges::all(Color::TRANSPARENT),
            border_radius: CornerRadius::ZERO,
            outline_widths: Edges::ZERO,
            outline_colors: Edges::all(Color::TRANSPARENT),
            outline_offset: 0.0,
            width: SizeSpec::Auto,
            height: SizeSpec::Auto,
            min_width: SizeSpec::Auto,
            min_height: SizeSpec::Auto,
            max_width: SizeSpec::Auto,
            max_height: SizeSpec::Auto,
            flex_direction: FlexDirection::Row,
            flex_wrap: FlexWrap::NoWrap,
            flex_grow: 0.0,
            flex_shrink: 1.0,
            flex_basis: SizeSpec::Auto,
            row_gap: LengthPercent::ZERO,
            column_gap: LengthPercent::ZERO,
            justify_content: JustifyContent::FlexStart,
            align_items: AlignItems::Stretch,
            align_self: None,
            align_content: AlignContent::Stretch,
            grid_template_columns: Vec::new(),
            grid_template_rows: Vec::new(),
            grid_template_areas: None,
            grid_auto_columns: TrackSize::AUTO,
            grid_auto_rows: TrackSize::AUTO,
            grid_auto_flow: GridAutoFlow::Row,
            grid_area: None,
            grid_row: GridPlacement::AUTO,
            grid_column: GridPlacement::AUTO,
            justify_items: AlignItems::Stretch,
            justify_self: None,
            font_family: theme.font_family(FontFamilyToken::Sans).to_string(),
            font_size: theme.base_font_size(),
            font_weight: theme.default_font_weight(),
            line_height: theme.line_height(),
            color: theme.color(plume_theme::ColorToken::TextPrimary),
            text_align: TextAlign::Left,
            vertical_align: VerticalAlign::Baseline,
            background_color: Color::TRANSPARENT,
            background_layers: Vec::new(),
            box_shadows: Vec::new(),
            opacity: 1.0,
            transform: Transform2D::IDENTITY,
            overflow: Overflow::Visible,
            visibility: Visibility::Visible,
        }
    }

    pub fn is_absolute(&self) -> bool {
        self.position == Position::Absolute
    }

    /// Takes part in its parent's layout
    pub fn is_in_flow(&self) -> bool {
        self.display != Display::None && !self.is_absolute()
    }

    /// Padding in pixels; percentages resolve against the containing block
    /// width
    pub fn padding_px(&self, cb_width: f32) -> Edges<f32> {
        self.padding.map(|p| p.resolve(cb_width).max(0.0))
    }

    /// Margins in pixels with `auto` treated as zero
    pub fn margin_px(&self, cb_width: f32) -> Edges<f32> {
        self.margin.map(|m| m.resolve_or_zero(cb_width))
    }

    pub fn margin_auto(&self) -> Edges<bool> {
        self.margin.map(|m| m.is_auto())
    }

    /// Padding plus border widths
    pub fn padding_border(&self, cb_width: f32) -> Edges<f32> {
        self.padding_px(cb_width) + self.border_widths
    }

    /// Line box height in pixels
    pub fn line_height_px(&self) -> f32 {
        self.font_size * self.line_height
    }

    pub fn effective_align(&self, container: AlignItems) -> AlignItems {
        self.align_self.unwrap_or(container)
    }

    pub fn effective_justify(&self, container: AlignItems) -> AlignItems {
        self.justify_self.unwrap_or(container)
    }
}

/// Resolve border or outline sides: each per-side override falls back to the
/// shared default, a missing color to the text color
fn resolve_sides(
    theme: &ScaledTheme,
    all: &BorderSide,
    sides: &Edges<BorderSide>,
    inherited: (Edges<f32>, Edges<Color>),
    current_color: Color,
) -> (Edges<f32>, Edges<Color>) {
    let side = |side: &BorderSide, inherited_width: f32, inherited_color: Color| {
        let width = side
            .width
            .as_ref()
            .or(all.width.as_ref())
            .map_or(0.0, |w| w.resolve_px(theme, inherited_width));
        let color = side
            .color
            .as_ref()
            .or(all.color.as_ref())
            .map_or(current_color, |c| c.resolve(theme, inherited_color));
        (width, color)
    };
    let (widths, colors) = inherited;
    let top = side(&sides.top, widths.top, colors.top);
    let right = side(&sides.right, widths.right, colors.right);
    let bottom = side(&sides.bottom, widths.bottom, colors.bottom);
    let left = side(&sides.left, widths.left, colors.left);
    (
        Edges::new(top.0, right.0, bottom.0, left.0),
        Edges::new(top.1, right.1, bottom.1, left.1),
    )
}

fn resolve_stops(
    theme: &ScaledTheme,
    stops: &[ColorStop],
    current_color: Color,
) -> GradientStops {
    stops
        .iter()
        .map(|s| GradientStop::new(s.offset.clamp(0.0, 1.0), s.color.resolve(theme, current_color)))
        .collect()
}

fn resolve_tracks(theme: &ScaledTheme, list: &TrackList) -> Vec<TrackDef> {
    list.iter()
        .map(|entry| match entry {
            TrackEntry::Single(size) => TrackDef::Single(size.resolve_track(theme)),
            TrackEntry::Repeat { count, tracks } => TrackDef::Repeat {
                count: *count,
                tracks: tracks.iter().map(|t| t.resolve_track(theme)).collect(),
            },
        })
        .collect()
}

impl WidgetStyle {
    /// Resolve every property against `theme`.
    ///
    /// `parent` supplies inherited properties and the values taken by the
    /// `inherit` keyword; the root passes `None`. Pseudo-state sub-styles are
    /// ignored here: callers resolve them first with
    /// [`WidgetStyle::resolve_state`]. Resolution is total: unknown named
    /// colors become fallback gray and percentages stay symbolic until
    /// layout.
    pub fn compute(&self, theme: &ScaledTheme, parent: Option<&ComputedStyle>) -> ComputedStyle {
        let initial;
        let parent = match parent {
            Some(p) => p,
            None => {
                initial = ComputedStyle::initial(theme);
                &initial
            }
        };

        // Inherited typography first: `currentColor`-style defaults below
        // depend on the resolved text color.
        let color = self
            .color
            .as_ref()
            .map_or(parent.color, |c| c.resolve(theme, parent.color));
        let font_size = self.font_size.as_ref().map_or(parent.font_size, |s| {
            match s {
                SizeValue::Percent(p) => parent.font_size * p / 100.0,
                SizeValue::Token(token) => theme.size(*token),
                other => {
                    let inherited = SizeSpec::Length(LengthPercent::px(parent.font_size));
                    match other.resolve(theme, inherited) {
                        SizeSpec::Length(l) => l.resolve(parent.font_size),
                        _ => parent.font_size,
                    }
                }
            }
        });
        let font_family = match &self.font_family {
            Some(FontFamilyValue::Token(token)) => theme.font_family(*token).to_string(),
            Some(FontFamilyValue::Name(name)) => name.clone(),
            Some(FontFamilyValue::Inherit) | None => parent.font_family.clone(),
        };

        let spacing_edges = |edges: &Edges<Option<SpacingValue>>,
                             inherited: Edges<LengthAuto>,
                             default: LengthAuto| {
            Edges::new(
                edges.top.as_ref().map_or(default, |v| v.resolve(theme, inherited.top)),
                edges.right.as_ref().map_or(default, |v| v.resolve(theme, inherited.right)),
                edges.bottom.as_ref().map_or(default, |v| v.resolve(theme, inherited.bottom)),
                edges.left.as_ref().map_or(default, |v| v.resolve(theme, inherited.left)),
            )
        };
        let size = |value: &Option<SizeValue>, inherited: SizeSpec| {
            value
                .as_ref()
                .map_or(SizeSpec::Auto, |v| v.resolve(theme, inherited))
        };

        let margin = spacing_edges(&self.margin, parent.margin, LengthAuto::ZERO);
        let padding = spacing_edges(
            &self.padding,
            parent.padding.map(LengthAuto::Length),
            LengthAuto::ZERO,
        )
        .map(|p| match p {
            LengthAuto::Auto => LengthPercent::ZERO,
            LengthAuto::Length(l) => l,
        });
        let inset = spacing_edges(&self.inset, parent.inset, LengthAuto::Auto);

        let (border_widths, border_colors) = resolve_sides(
            theme,
            &self.border.all,
            &self.border.sides,
            (parent.border_widths, parent.border_colors),
            color,
        );
        let (outline_widths, outline_colors) = resolve_sides(
            theme,
            &self.outline.all,
            &self.outline.sides,
            (parent.outline_widths, parent.outline_colors),
            color,
        );

        let border_radius = self.border_radius.as_ref().map_or(CornerRadius::ZERO, |r| {
            let p = parent.border_radius;
            CornerRadius::new(
                r.top_left.resolve_px(theme, p.top_left),
                r.top_right.resolve_px(theme, p.top_right),
                r.bottom_right.resolve_px(theme, p.bottom_right),
                r.bottom_left.resolve_px(theme, p.bottom_left),
            )
        });

        let gap = |value: &Option<SpacingValue>, inherited: LengthPercent| {
            value
                .as_ref()
                .map_or(LengthPercent::ZERO, |v| v.resolve_length(theme, inherited))
        };

        // Background: the bottom-most solid color fills the widget quad
        let mut background_color = Color::TRANSPARENT;
        let mut background_layers = Vec::new();
        if let Some(layers) = &self.background {
            for (i, layer) in layers.iter().enumerate().rev() {
                let bottom = i == layers.len() - 1;
                let computed = match layer {
                    BackgroundLayer::Color(c) => {
                        let c = c.resolve(theme, parent.background_color);
                        if bottom {
                            background_color = c;
                            continue;
                        }
                        ComputedBackground::Color(c)
                    }
                    BackgroundLayer::LinearGradient { angle, stops } => {
                        ComputedBackground::LinearGradient {
                            angle: *angle,
                            stops: resolve_stops(theme, stops, color),
                        }
                    }
                    BackgroundLayer::RadialGradient {
                        center,
                        radius,
                        stops,
                    } => ComputedBackground::RadialGradient {
                        center: *center,
                        radius: *radius,
                        stops: resolve_stops(theme, stops, color),
                    },
                    BackgroundLayer::ConicGradient {
                        center,
                        angle,
                        stops,
                    } => ComputedBackground::ConicGradient {
                        center: *center,
                        angle: *angle,
                        stops: resolve_stops(theme, stops, color),
                    },
                    BackgroundLayer::Image { image, tint } => ComputedBackground::Image {
                        image: *image,
                        tint: tint.resolve(theme, Color::WHITE),
                    },
                };
                background_layers.push(computed);
            }
        }

        let box_shadows = self
            .box_shadow
            .as_ref()
            .map(|shadows| {
                shadows
                    .iter()
                    .map(|s| match s {
                        ShadowValue::Token(token) => theme.shadow(*token),
                        ShadowValue::Custom {
                            offset_x,
                            offset_y,
                            blur,
                            spread,
                            color: shadow_color,
                        } => Shadow::new(
                            theme.scale(*offset_x),
                            theme.scale(*offset_y),
                            theme.scale(*blur),
                            theme.scale(*spread),
                            shadow_color.resolve(theme, color),
                        ),
                    })
                    .filter(Shadow::is_visible)
                    .collect()
            })
            .unwrap_or_default();

        let transform = self.transform.map_or(Transform2D::IDENTITY, |t| {
            let mut t = t;
            t.elements[4] = theme.scale(t.elements[4]);
            t.elements[5] = theme.scale(t.elements[5]);
            t
        });

        let position = self.position.unwrap_or_default();
        let mut display = self.display.unwrap_or_default();
        if matches!(parent.display, Display::Flex | Display::Grid)
            || position == Position::Absolute
        {
            display = display.blockified();
        }

        ComputedStyle {
            display,
            position,
            inset,
            box_sizing: self.box_sizing.unwrap_or_default(),

            margin,
            padding,
            border_widths,
            border_colors,
            border_radius,
            outline_widths,
            outline_colors,
            outline_offset: self
                .outline
                .offset
                .as_ref()
                .map_or(0.0, |o| {
                    o.resolve_length(theme, LengthPercent::px(parent.outline_offset))
                        .px
                }),

            width: size(&self.width, parent.width),
            height: size(&self.height, parent.height),
            min_width: size(&self.min_width, parent.min_width),
            min_height: size(&self.min_height, parent.min_height),
            max_width: size(&self.max_width, parent.max_width),
            max_height: size(&self.max_height, parent.max_height),

            flex_direction: self.flex_direction.unwrap_or_default(),
            flex_wrap: self.flex_wrap.unwrap_or_default(),
            flex_grow: self.flex_grow.unwrap_or(0.0).max(0.0),
            flex_shrink: self.flex_shrink.unwrap_or(1.0).max(0.0),
            flex_basis: size(&self.flex_basis, parent.flex_basis),
            row_gap: gap(&self.row_gap, parent.row_gap),
            column_gap: gap(&self.column_gap, parent.column_gap),
            justify_content: self.justify_content.unwrap_or_default(),
            align_items: self.align_items.unwrap_or_default(),
            align_self: self.align_self,
            align_content: self.align_content.unwrap_or_default(),

            grid_template_columns: self
                .grid_template_columns
                .as_ref()
                .map(|t| resolve_tracks(theme, t))
                .unwrap_or_default(),
            grid_template_rows: self
                .grid_template_rows
                .as_ref()
                .map(|t| resolve_tracks(theme, t))
                .unwrap_or_default(),
            grid_template_areas: self.grid_template_areas.clone(),
            grid_auto_columns: self
                .grid_auto_columns
                .as_ref()
                .map_or(TrackSize::AUTO, |s| s.resolve_track(theme)),
            grid_auto_rows: self
                .grid_auto_rows
                .as_ref()
                .map_or(TrackSize::AUTO, |s| s.resolve_track(theme)),
            grid_auto_flow: self.grid_auto_flow.unwrap_or_default(),
            grid_area: self.grid_area.clone(),
            grid_row: self.grid_row.unwrap_or_default(),
            grid_column: self.grid_column.unwrap_or_default(),
            justify_items: self.justify_items.unwrap_or_default(),
            justify_self: self.justify_self,

            font_family,
            font_size,
            font_weight: self.font_weight.unwrap_or(parent.font_weight),
            line_height: self
                .line_height
                .filter(|l| l.is_finite() && *l > 0.0)
                .unwrap_or(parent.line_height),
            color,
            text_align: self.text_align.unwrap_or(parent.text_align),
            vertical_align: self.vertical_align.unwrap_or_default(),

            background_color,
            background_layers,
            box_shadows,
            opacity: self.opacity.map_or(1.0, |o| o.resolve(theme)),
            transform,
            overflow: self.overflow.unwrap_or_default(),
            visibility: self.visibility.unwrap_or(parent.visibility),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plume_theme::{ColorToken, FontSizeToken, RadiusToken, SizeToken, SpacingToken};

    #[test]
    fn test_compute_is_idempotent() {
        let theme = ScaledTheme::default();
        let style = WidgetStyle::new()
            .flex_row()
            .padding(SpacingToken::Space2)
            .width_percent(50.0)
            .border(1.0, ColorToken::Border)
            .rounded(RadiusToken::Md)
            .grid_template_columns("100px 1fr repeat(2, minmax(10px, 1fr))")
            .background(ColorToken::Surface);
        let parent = WidgetStyle::new().text_color(Color::RED).compute(&theme, None);

        let a = style.compute(&theme, Some(&parent));
        let b = style.compute(&theme, Some(&parent));
        assert_eq!(a, b);
    }

    #[test]
    fn test_typography_inherits() {
        let theme = ScaledTheme::default();
        let parent = WidgetStyle::new()
            .text_color(Color::RED)
            .font_size(SizeToken::Text(FontSizeToken::Xl))
            .text_align(TextAlign::Center)
            .compute(&theme, None);
        let child = WidgetStyle::new().compute(&theme, Some(&parent));
        assert_eq!(child.color, Color::RED);
        assert_eq!(child.font_size, parent.font_size);
        assert_eq!(child.text_align, TextAlign::Center);

        let half = WidgetStyle::new()
            .font_size(SizeValue::Percent(50.0))
            .compute(&theme, Some(&parent));
        assert_eq!(half.font_size, parent.font_size * 0.5);
    }

    #[test]
    fn test_non_inherited_properties_reset() {
        let theme = ScaledTheme::default();
        let parent = WidgetStyle::new().padding(10.0).opacity(0.5).compute(&theme, None);
        let child = WidgetStyle::new().compute(&theme, Some(&parent));
        assert_eq!(child.padding.top, LengthPercent::ZERO);
        assert_eq!(child.opacity, 1.0);

        let inherit = WidgetStyle::new()
            .padding(SpacingValue::Inherit)
            .compute(&theme, Some(&parent));
        assert_eq!(inherit.padding.top, LengthPercent::px(10.0));
    }

    #[test]
    fn test_flex_and_grid_items_are_blockified() {
        let theme = ScaledTheme::default();
        let block = WidgetStyle::new().compute(&theme, None);
        let inline = WidgetStyle::new().display(Display::Inline);
        assert_eq!(inline.compute(&theme, Some(&block)).display, Display::Inline);

        for container in [Display::Flex, Display::Grid] {
            let parent = WidgetStyle::new().display(container).compute(&theme, None);
            assert_eq!(inline.compute(&theme, Some(&parent)).display, Display::Block);
            let inline_block = WidgetStyle::new().display(Display::InlineBlock);
            assert_eq!(inline_block.compute(&theme, Some(&parent)).display, Display::Block);
            let nested = WidgetStyle::new().display(Display::Flex);
            assert_eq!(nested.compute(&theme, Some(&parent)).display, Display::Flex);
        }

        let absolute = WidgetStyle::new()
            .display(Display::Inline)
            .position(Position::Absolute);
        assert_eq!(absolute.compute(&theme, Some(&block)).display, Display::Block);
    }

    #[test]
    fn test_border_sides_fall_back_to_shared_default() {
        let theme = ScaledTheme::default();
        let style = WidgetStyle::new()
            .border(1.0, Color::BLACK)
            .border_left(4.0, Color::RED)
            .compute(&theme, None);
        assert_eq!(style.border_widths, Edges::new(1.0, 1.0, 1.0, 4.0));
        assert_eq!(style.border_colors.top, Color::BLACK);
        assert_eq!(style.border_colors.left, Color::RED);
    }

    #[test]
    fn test_literal_pixels_scale_with_theme() {
        let mut theme = ScaledTheme::default();
        theme.set_scale_factor(2.0);
        let style = WidgetStyle::new().width(50.0).padding(3.0).compute(&theme, None);
        assert_eq!(style.width, SizeSpec::Length(LengthPercent::px(100.0)));
        assert_eq!(style.padding_px(0.0), Edges::all(6.0));
    }

    #[test]
    fn test_hover_background_changes_nothing_else() {
        let theme = ScaledTheme::default();
        let style = WidgetStyle::new()
            .padding(6.0)
            .border(1.0, ColorToken::Border)
            .background(ColorToken::ControlBg)
            .hover(WidgetStyle::new().background(ColorToken::ControlBgHover));

        let idle = style
            .resolve_state(WidgetState::default())
            .compute(&theme, None);
        let hovered = style
            .resolve_state(WidgetState {
                hovered: true,
                ..Default::default()
            })
            .compute(&theme, None);

        assert_ne!(idle.background_color, hovered.background_color);
        let mut expected = idle.clone();
        expected.background_color = hovered.background_color;
        assert_eq!(expected, hovered);
    }

    #[test]
    fn test_background_layers_split_fill_and_overlays() {
        let theme = ScaledTheme::default();
        let style = WidgetStyle::new()
            .background_layers(vec![
                BackgroundLayer::LinearGradient {
                    angle: 90.0,
                    stops: vec![
                        ColorStop::new(0.0, Color::BLACK),
                        ColorStop::new(1.0, Color::WHITE),
                    ],
                },
                BackgroundLayer::Color(Color::BLUE.into()),
            ])
            .compute(&theme, None);
        assert_eq!(style.background_color, Color::BLUE);
        assert_eq!(style.background_layers.len(), 1);
        assert!(matches!(
            style.background_layers[0],
            ComputedBackground::LinearGradient { .. }
        ));
    }
}
