//! Plume Layout Engine
//!
//! A retained widget tree with CSS-like styling and layout.
//!
//! # Features
//!
//! - **Styles**: [`WidgetStyle`] with optional fields, theme tokens and
//!   hover/active/focus/disabled sub-styles, resolved to [`ComputedStyle`]
//! - **Layout**: block, inline/inline-block line boxes, flexbox and grid,
//!   plus relative and absolute positioning
//! - **Render blocks**: batch mutations and resolve once with [`RenderBlock`]
//! - **Events**: hit testing with rounded corners, capture/target/bubble
//!   routing and interaction state tracking
//! - **Painting**: the tree paints itself into any [`plume_paint::PaintSurface`]
//!
//! # Example
//!
//! ```rust
//! use plume_core::Size;
//! use plume_layout::{EstimatedTextMeasurer, RenderBlock, WidgetStyle, WidgetTree};
//! use plume_theme::ScaledTheme;
//!
//! let theme = ScaledTheme::default();
//! let mut tree = WidgetTree::new();
//! tree.set_viewport(Size::new(300.0, 100.0));
//!
//! let mut block = RenderBlock::new(&mut tree);
//! block.begin().unwrap();
//! let row = block.insert(WidgetStyle::new().flex_row().width(300.0).gap(10.0));
//! block.set_root(row);
//! for _ in 0..3 {
//!     let cell = block.insert(WidgetStyle::new().flex_grow(1.0).min_width(0.0));
//!     block.add_child(row, cell);
//! }
//! block.end(&theme, &EstimatedTextMeasurer).unwrap();
//!
//! let first = block.children(row)[0];
//! let width = block.bounds(first).unwrap().width();
//! assert!((width - 280.0 / 3.0).abs() < 1e-3);
//! ```

pub mod computed;
pub mod dirty;
pub mod event;
pub mod grid_template;
pub mod layout;
pub mod paint;
pub mod render_block;
pub mod style;
pub mod text_measure;
pub mod tree;
pub mod values;
pub mod widget;

pub use computed::{ComputedBackground, ComputedStyle, TrackDef};
pub use dirty::DirtyTracker;
pub use event::{EventContext, EventPhase, TreeOp};
pub use grid_template::{GridArea, GridAreas, GridLine, GridPlacement, RepeatCount};
pub use layout::{AxisSizes, IntrinsicSizes};
pub use render_block::{RenderBlock, RenderBlockError, RenderBlockState};
pub use style::{
    AlignContent, AlignItems, BackgroundLayer, Border, BorderSide, BoxSizing, ColorStop,
    CornerValues, Display, FlexDirection, FlexWrap, FontFamilyValue, GridAutoFlow,
    JustifyContent, Outline, Overflow, Position, ShadowValue, TextAlign, VerticalAlign,
    Visibility, WidgetState, WidgetStyle,
};
pub use text_measure::{EstimatedTextMeasurer, PositionedGlyph, TextMeasurer, TextMetrics};
pub use tree::{NodeStats, ResolveStats, WidgetId, WidgetTree};
pub use values::{
    ColorValue, LengthAuto, LengthPercent, OpacityValue, SizeSpec, SizeValue, SpacingValue,
    TrackBreadth, TrackSize,
};
pub use widget::{AsAny, ContentPaint, EventTarget, Measurable, Paintable, Widget};
