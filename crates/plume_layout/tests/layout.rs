//! Layout behaviour per display mode and positioning scheme

use plume_core::{Rect, Size};
use plume_layout::{
    AlignContent, AlignItems, EstimatedTextMeasurer, FlexDirection, GridAutoFlow, VerticalAlign,
    WidgetId, WidgetStyle, WidgetTree,
};
use plume_theme::ScaledTheme;

const EPSILON: f32 = 1e-3;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn tree_with_root(style: WidgetStyle) -> (WidgetTree, WidgetId) {
    let mut tree = WidgetTree::new();
    tree.set_viewport(Size::new(800.0, 600.0));
    let root = tree.insert(style);
    tree.set_root(root);
    (tree, root)
}

fn add(tree: &mut WidgetTree, parent: WidgetId, style: WidgetStyle) -> WidgetId {
    let id = tree.insert(style);
    assert!(tree.add_child(parent, id));
    id
}

fn resolve(tree: &mut WidgetTree) {
    tree.resolve(&ScaledTheme::default(), &EstimatedTextMeasurer);
}

fn bounds(tree: &WidgetTree, id: WidgetId) -> Rect {
    tree.bounds(id).unwrap()
}

// ============================================================================
// Block
// ============================================================================

#[test]
fn block_children_stack_and_fill() {
    let (mut tree, root) = tree_with_root(WidgetStyle::new().padding(10.0));
    let a = add(&mut tree, root, WidgetStyle::new().height(30.0).margin_bottom(5.0));
    let b = add(&mut tree, root, WidgetStyle::new().height(20.0).margin_top(5.0));
    resolve(&mut tree);

    assert_eq!(bounds(&tree, a), Rect::new(10.0, 10.0, 780.0, 30.0));
    // Margins add up, they do not collapse
    assert_eq!(bounds(&tree, b).y(), 50.0);
    assert_eq!(bounds(&tree, root).height(), 80.0);
}

#[test]
fn auto_margins_center_a_block() {
    let (mut tree, root) = tree_with_root(WidgetStyle::new().width(400.0));
    let child = add(&mut tree, root, WidgetStyle::new().width(100.0).margin_x_auto());
    resolve(&mut tree);
    assert_eq!(bounds(&tree, child).x(), 150.0);
}

#[test]
fn percentages_resolve_against_the_containing_block() {
    let (mut tree, root) = tree_with_root(WidgetStyle::new().width(400.0).height(200.0));
    let child = add(
        &mut tree,
        root,
        WidgetStyle::new().width_percent(25.0).height_percent(50.0),
    );
    resolve(&mut tree);
    assert_eq!(bounds(&tree, child).size, Size::new(100.0, 100.0));
}

#[test]
fn min_width_wins_over_max_width() {
    let (mut tree, root) = tree_with_root(WidgetStyle::new());
    let child = add(
        &mut tree,
        root,
        WidgetStyle::new().width(50.0).min_width(120.0).max_width(80.0),
    );
    resolve(&mut tree);
    assert_eq!(bounds(&tree, child).width(), 120.0);
}

#[test]
fn border_box_sizing_includes_padding() {
    let (mut tree, root) = tree_with_root(WidgetStyle::new());
    let child = add(
        &mut tree,
        root,
        WidgetStyle::new().width(100.0).padding(10.0).border_box(),
    );
    resolve(&mut tree);
    assert_eq!(bounds(&tree, child).width(), 100.0);
    assert_eq!(tree.content_box(child).unwrap().width(), 80.0);
}

#[test]
fn display_none_takes_no_space() {
    let (mut tree, root) = tree_with_root(WidgetStyle::new());
    let hidden = add(&mut tree, root, WidgetStyle::new().height(40.0).hidden());
    let shown = add(&mut tree, root, WidgetStyle::new().height(10.0));
    resolve(&mut tree);
    assert_eq!(bounds(&tree, hidden).size, Size::ZERO);
    assert_eq!(bounds(&tree, shown).y(), 0.0);
}

// ============================================================================
// Inline
// ============================================================================

#[test]
fn inline_blocks_wrap_onto_new_lines() {
    let (mut tree, root) = tree_with_root(WidgetStyle::new().width(200.0));
    let items: Vec<WidgetId> = (0..3)
        .map(|_| {
            add(
                &mut tree,
                root,
                WidgetStyle::new().inline_block().width(80.0).height(20.0),
            )
        })
        .collect();
    resolve(&mut tree);

    assert_eq!(bounds(&tree, items[1]).x(), 80.0);
    assert_eq!(bounds(&tree, items[2]).x(), 0.0);
    assert_eq!(bounds(&tree, items[2]).y(), 20.0);
    assert_eq!(bounds(&tree, root).height(), 40.0);
}

#[test]
fn inline_boxes_ignore_width_and_vertical_margins() {
    let (mut tree, root) = tree_with_root(WidgetStyle::new().width(300.0));
    let inline = add(
        &mut tree,
        root,
        WidgetStyle::new()
            .inline()
            .width(120.0)
            .margin(10.0)
            .padding(4.0),
    );
    resolve(&mut tree);

    let b = bounds(&tree, inline);
    assert_eq!(b.width(), 8.0);
    assert_eq!(b.x(), 10.0);
    assert_eq!(b.y(), 0.0);
}

#[test]
fn vertical_align_positions_within_the_line() {
    let (mut tree, root) = tree_with_root(WidgetStyle::new().width(300.0));
    let tall = add(
        &mut tree,
        root,
        WidgetStyle::new().inline_block().size(20.0, 60.0),
    );
    let middle = add(
        &mut tree,
        root,
        WidgetStyle::new()
            .inline_block()
            .size(20.0, 20.0)
            .vertical_align(VerticalAlign::Middle),
    );
    let bottom = add(
        &mut tree,
        root,
        WidgetStyle::new()
            .inline_block()
            .size(20.0, 10.0)
            .vertical_align(VerticalAlign::Bottom),
    );
    resolve(&mut tree);

    assert_eq!(bounds(&tree, tall).y(), 0.0);
    assert_eq!(bounds(&tree, middle).y(), 20.0);
    assert_eq!(bounds(&tree, bottom).y(), 50.0);
}

// ============================================================================
// Flex
// ============================================================================

#[test]
fn flex_column_stacks_with_gaps() {
    let (mut tree, col) = tree_with_root(WidgetStyle::new().flex_col().gap(8.0).width(100.0));
    let a = add(&mut tree, col, WidgetStyle::new().height(10.0));
    let b = add(&mut tree, col, WidgetStyle::new().height(20.0));
    resolve(&mut tree);

    assert_eq!(bounds(&tree, a).width(), 100.0);
    assert_eq!(bounds(&tree, b).y(), 18.0);
    assert_eq!(bounds(&tree, col).height(), 38.0);
}

#[test]
fn align_items_center_and_align_self_override() {
    let (mut tree, row) = tree_with_root(
        WidgetStyle::new()
            .flex_row()
            .height(100.0)
            .align_items(AlignItems::Center),
    );
    let centered = add(&mut tree, row, WidgetStyle::new().size(10.0, 20.0));
    let end = add(
        &mut tree,
        row,
        WidgetStyle::new().size(10.0, 20.0).align_self(AlignItems::End),
    );
    resolve(&mut tree);

    assert_eq!(bounds(&tree, centered).y(), 40.0);
    assert_eq!(bounds(&tree, end).y(), 80.0);
}

#[test]
fn auto_margin_pushes_items_apart() {
    let (mut tree, row) = tree_with_root(WidgetStyle::new().flex_row().width(300.0));
    let left = add(&mut tree, row, WidgetStyle::new().size(50.0, 10.0));
    let right = add(
        &mut tree,
        row,
        WidgetStyle::new()
            .size(50.0, 10.0)
            .margin_left(plume_layout::SpacingValue::Auto),
    );
    resolve(&mut tree);

    assert_eq!(bounds(&tree, left).x(), 0.0);
    assert_eq!(bounds(&tree, right).max_x(), 300.0);
}

#[test]
fn row_reverse_mirrors_positions() {
    let (mut tree, row) = tree_with_root(
        WidgetStyle::new()
            .flex_row()
            .flex_direction(FlexDirection::RowReverse)
            .width(300.0),
    );
    let first = add(&mut tree, row, WidgetStyle::new().size(50.0, 10.0));
    let second = add(&mut tree, row, WidgetStyle::new().size(60.0, 10.0));
    resolve(&mut tree);

    assert_eq!(bounds(&tree, first).max_x(), 300.0);
    assert_eq!(bounds(&tree, second).max_x(), 250.0);
}

#[test]
fn wrapped_lines_follow_align_content() {
    let (mut tree, row) = tree_with_root(
        WidgetStyle::new()
            .flex_row()
            .flex_wrap()
            .size(100.0, 100.0)
            .align_content(AlignContent::End),
    );
    let items: Vec<WidgetId> = (0..3)
        .map(|_| add(&mut tree, row, WidgetStyle::new().size(40.0, 10.0)))
        .collect();
    resolve(&mut tree);

    assert_eq!(bounds(&tree, items[0]).y(), 80.0);
    assert_eq!(bounds(&tree, items[2]).y(), 90.0);
    assert_eq!(bounds(&tree, items[2]).x(), 0.0);
}

#[test]
fn max_width_freezes_a_growing_item() {
    let (mut tree, row) = tree_with_root(WidgetStyle::new().flex_row().width(300.0));
    let capped = add(
        &mut tree,
        row,
        WidgetStyle::new().flex_grow(1.0).max_width(50.0),
    );
    let free = add(&mut tree, row, WidgetStyle::new().flex_grow(1.0));
    resolve(&mut tree);

    assert_eq!(bounds(&tree, capped).width(), 50.0);
    assert!(approx(bounds(&tree, free).width(), 250.0));
}

// ============================================================================
// Grid
// ============================================================================

#[test]
fn named_areas_place_items() {
    let (mut tree, grid) = tree_with_root(
        WidgetStyle::new()
            .grid()
            .width(300.0)
            .grid_template_columns("100px 1fr")
            .grid_template_rows("40px 1fr 30px")
            .height(200.0)
            .grid_template_areas(&["header header", "nav main", "footer footer"]),
    );
    let main = add(&mut tree, grid, WidgetStyle::new().grid_area("main"));
    let header = add(&mut tree, grid, WidgetStyle::new().grid_area("header"));
    let footer = add(&mut tree, grid, WidgetStyle::new().grid_area("footer"));
    resolve(&mut tree);

    assert_eq!(bounds(&tree, header), Rect::new(0.0, 0.0, 300.0, 40.0));
    assert_eq!(bounds(&tree, main), Rect::new(100.0, 40.0, 200.0, 130.0));
    assert_eq!(bounds(&tree, footer), Rect::new(0.0, 170.0, 300.0, 30.0));
}

#[test]
fn explicit_lines_and_spans() {
    let (mut tree, grid) = tree_with_root(
        WidgetStyle::new()
            .grid()
            .width(300.0)
            .grid_template_columns("repeat(3, 1fr)")
            .grid_auto_rows(25.0),
    );
    let wide = add(&mut tree, grid, WidgetStyle::new().grid_column("1 / -1"));
    let spanned = add(
        &mut tree,
        grid,
        WidgetStyle::new().grid_column("span 2").grid_row("2"),
    );
    let auto = add(&mut tree, grid, WidgetStyle::new());
    resolve(&mut tree);

    assert_eq!(bounds(&tree, wide), Rect::new(0.0, 0.0, 300.0, 25.0));
    assert_eq!(bounds(&tree, spanned), Rect::new(0.0, 25.0, 200.0, 25.0));
    assert_eq!(bounds(&tree, auto), Rect::new(200.0, 25.0, 100.0, 25.0));
}

#[test]
fn column_flow_fills_rows_first() {
    let (mut tree, grid) = tree_with_root(
        WidgetStyle::new()
            .grid()
            .width(200.0)
            .grid_template_rows("20px 20px")
            .grid_auto_columns(50.0)
            .grid_auto_flow(GridAutoFlow::Column),
    );
    let items: Vec<WidgetId> = (0..3)
        .map(|_| add(&mut tree, grid, WidgetStyle::new()))
        .collect();
    resolve(&mut tree);

    assert_eq!(bounds(&tree, items[1]).y(), 20.0);
    assert_eq!(bounds(&tree, items[2]).x(), 50.0);
    assert_eq!(bounds(&tree, items[2]).y(), 0.0);
}

#[test]
fn items_align_inside_their_cells() {
    let (mut tree, grid) = tree_with_root(
        WidgetStyle::new()
            .grid()
            .width(200.0)
            .grid_template_columns("100px 100px")
            .grid_template_rows("100px")
            .justify_items(AlignItems::Center)
            .align_items(AlignItems::End),
    );
    let item = add(&mut tree, grid, WidgetStyle::new().size(20.0, 10.0));
    let start = add(
        &mut tree,
        grid,
        WidgetStyle::new()
            .size(20.0, 10.0)
            .justify_self(AlignItems::Start)
            .align_self(AlignItems::Start),
    );
    resolve(&mut tree);

    assert_eq!(bounds(&tree, item), Rect::new(40.0, 90.0, 20.0, 10.0));
    assert_eq!(bounds(&tree, start), Rect::new(100.0, 0.0, 20.0, 10.0));
}

#[test]
fn auto_fit_collapses_unused_tracks() {
    let (mut tree, grid) = tree_with_root(
        WidgetStyle::new()
            .grid()
            .width(400.0)
            .grid_template_columns("repeat(auto-fit, minmax(100px, 1fr))"),
    );
    let items: Vec<WidgetId> = (0..2)
        .map(|_| add(&mut tree, grid, WidgetStyle::new().height(10.0)))
        .collect();
    resolve(&mut tree);

    assert_eq!(bounds(&tree, items[0]).width(), 200.0);
    assert_eq!(bounds(&tree, items[1]).x(), 200.0);
}

// ============================================================================
// Positioning
// ============================================================================

#[test]
fn absolute_children_leave_the_flow() {
    let (mut tree, root) = tree_with_root(
        WidgetStyle::new()
            .size(300.0, 200.0)
            .border(5.0, plume_core::Color::BLACK),
    );
    let pinned = add(
        &mut tree,
        root,
        WidgetStyle::new()
            .absolute()
            .right(10.0)
            .bottom(20.0)
            .size(50.0, 40.0),
    );
    let stretched = add(
        &mut tree,
        root,
        WidgetStyle::new()
            .absolute()
            .left(0.0)
            .right(0.0)
            .top(0.0)
            .height(10.0),
    );
    let flow = add(&mut tree, root, WidgetStyle::new().height(10.0));
    resolve(&mut tree);

    // Padding box starts inside the border
    assert_eq!(bounds(&tree, pinned), Rect::new(245.0, 145.0, 50.0, 40.0));
    assert_eq!(bounds(&tree, stretched), Rect::new(5.0, 5.0, 300.0, 10.0));
    assert_eq!(bounds(&tree, flow).y(), 5.0);
}

#[test]
fn hidden_absolute_child_collapses_at_padding_box() {
    let (mut tree, root) = tree_with_root(
        WidgetStyle::new()
            .size(100.0, 100.0)
            .border(4.0, plume_core::Color::BLACK),
    );
    let hidden = add(
        &mut tree,
        root,
        WidgetStyle::new().absolute().hidden().left(30.0).size(20.0, 20.0),
    );
    let inner = add(&mut tree, hidden, WidgetStyle::new().size(10.0, 10.0));
    let shown = add(
        &mut tree,
        root,
        WidgetStyle::new().absolute().left(30.0).top(2.0).size(20.0, 20.0),
    );
    resolve(&mut tree);

    let collapsed = Rect::new(4.0, 4.0, 0.0, 0.0);
    assert_eq!(bounds(&tree, hidden), collapsed);
    assert_eq!(bounds(&tree, inner), collapsed);
    assert_eq!(bounds(&tree, shown), Rect::new(34.0, 6.0, 20.0, 20.0));
}

#[test]
fn relative_offsets_shift_the_subtree() {
    let (mut tree, root) = tree_with_root(WidgetStyle::new());
    let shifted = add(
        &mut tree,
        root,
        WidgetStyle::new().relative().left(15.0).top(5.0).height(20.0),
    );
    let inner = add(&mut tree, shifted, WidgetStyle::new().height(10.0));
    let next = add(&mut tree, root, WidgetStyle::new().height(10.0));
    resolve(&mut tree);

    assert_eq!(bounds(&tree, shifted).origin.x, 15.0);
    assert_eq!(bounds(&tree, inner).y(), 5.0);
    // Siblings are laid out as if nothing moved
    assert_eq!(bounds(&tree, next).y(), 20.0);
}

#[test]
fn restyle_only_relayouts() {
    let (mut tree, root) = tree_with_root(WidgetStyle::new());
    let child = add(&mut tree, root, WidgetStyle::new().height(10.0));
    resolve(&mut tree);
    tree.update_style(child, |s| *s = s.clone().height(30.0));
    resolve(&mut tree);
    assert_eq!(bounds(&tree, root).height(), 30.0);
    assert_eq!(tree.stats(child).unwrap().style_passes, 2);
    assert_eq!(tree.stats(root).unwrap().style_passes, 1);
}
