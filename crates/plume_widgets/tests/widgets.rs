//! Widgets composed into a tree, resolved and painted end to end

use plume_core::{event_types, Event, Size};
use plume_layout::{
    Display, PositionedGlyph, RenderBlock, RenderBlockError, TextMeasurer, TextMetrics, WidgetId,
    WidgetStyle, WidgetTree,
};
use plume_paint::PaintContext;
use plume_theme::ScaledTheme;
use plume_widgets::{Button, Container, Panel, TabContainer, Text};

const EPSILON: f32 = 1e-3;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

/// Every glyph advances 12px at 20px, scaled linearly with the font size
struct FixedAdvance;

impl TextMeasurer for FixedAdvance {
    fn measure(&self, text: &str, _font_family: &str, font_size: f32) -> TextMetrics {
        let advance = 0.6 * font_size;
        let glyphs: Vec<PositionedGlyph> = text
            .chars()
            .enumerate()
            .map(|(i, ch)| PositionedGlyph {
                ch,
                x: i as f32 * advance,
                advance,
            })
            .collect();
        TextMetrics {
            width: glyphs.len() as f32 * advance,
            ascender: 0.8 * font_size,
            descender: -0.2 * font_size,
            line_gap: 0.0,
            glyphs,
        }
    }
}

fn painted_texts(tree: &WidgetTree) -> Vec<String> {
    let mut cx = PaintContext::new();
    tree.paint(&mut cx, &FixedAdvance);
    cx.texts().map(|run| run.text.clone()).collect()
}

#[test]
fn block_text_fills_parent_but_reports_intrinsic_width() {
    let mut tree = WidgetTree::new();
    tree.set_viewport(Size::new(800.0, 600.0));
    let root = Container::insert(&mut tree, WidgetStyle::new().width(300.0));
    tree.set_root(root);
    let text = Text::insert(
        &mut tree,
        "Hi",
        WidgetStyle::new().block().font_size(20.0).padding(8.0),
    );
    tree.add_child(root, text);
    tree.resolve(&ScaledTheme::default(), &FixedAdvance);

    let intrinsic = tree.intrinsic_sizes(text).unwrap();
    assert!(approx(intrinsic.width.preferred, 24.0 + 16.0));
    assert!(approx(tree.bounds(text).unwrap().width(), 300.0));
}

#[test]
fn inline_labels_share_a_baseline() {
    let mut tree = WidgetTree::new();
    tree.set_viewport(Size::new(800.0, 600.0));
    let root = Container::insert(&mut tree, WidgetStyle::new().width(400.0));
    tree.set_root(root);
    let small = Text::insert(&mut tree, "small", WidgetStyle::new().inline().font_size(10.0));
    let large = Text::insert(&mut tree, "large", WidgetStyle::new().inline().font_size(30.0));
    tree.add_child(root, small);
    tree.add_child(root, large);
    tree.resolve(&ScaledTheme::default(), &FixedAdvance);

    let a = tree.baseline(small).unwrap();
    let b = tree.baseline(large).unwrap();
    assert!(approx(a, b), "baselines {a} and {b}");
}

struct Editor {
    tree: WidgetTree,
    panel: WidgetId,
    tabs: WidgetId,
    bake: WidgetId,
}

fn build_editor() -> Editor {
    let theme = ScaledTheme::default();
    let mut tree = WidgetTree::new();
    tree.set_viewport(Size::new(320.0, 240.0));

    let mut block = RenderBlock::new(&mut tree);
    block.begin().unwrap();
    let panel = Panel::build(&mut block, "Properties", WidgetStyle::new().size(320.0, 240.0));
    block.set_root(panel);

    let tabs = TabContainer::build(&mut block, WidgetStyle::new().flex_1());
    Panel::add_content(&mut block, panel, tabs);
    let object = TabContainer::add_tab(&mut block, tabs, "Object", WidgetStyle::new()).unwrap();
    let render = TabContainer::add_tab(&mut block, tabs, "Render", WidgetStyle::new()).unwrap();

    let name = Text::insert(&mut block, "Cube", WidgetStyle::new());
    block.add_child(object, name);
    let bake = Button::new("Bake").insert(&mut block, WidgetStyle::new());
    block.add_child(render, bake);

    let stats = block.end(&theme, &FixedAdvance).unwrap();
    assert!(stats.laid_out > 0);

    let mut cx = PaintContext::new();
    block.render(&mut cx, &FixedAdvance).unwrap();
    assert!(cx.is_balanced());
    drop(block);

    Editor {
        tree,
        panel,
        tabs,
        bake,
    }
}

#[test]
fn hidden_pages_are_not_painted() {
    let editor = build_editor();
    let texts = painted_texts(&editor.tree);
    assert_eq!(texts, vec!["Properties", "Object", "Render", "Cube"]);
    assert!(editor.tree.bounds(editor.bake).unwrap().size.is_empty());
}

#[test]
fn switching_tabs_shows_the_other_page() {
    let mut editor = build_editor();
    let tree = &mut editor.tree;

    let render_tab = tree.widget::<TabContainer>(editor.tabs).unwrap().tabs()[1];
    let at = tree.bounds(render_tab).unwrap().center();
    tree.dispatch_event(&Event::pointer(event_types::POINTER_DOWN, at.x, at.y));
    tree.dispatch_event(&Event::pointer(event_types::POINTER_UP, at.x, at.y));
    tree.resolve(&ScaledTheme::default(), &FixedAdvance);

    let texts = painted_texts(tree);
    assert_eq!(texts, vec!["Properties", "Object", "Render", "Bake"]);

    let bake = tree.bounds(editor.bake).unwrap();
    assert!(approx(bake.height(), 28.0));
    let body = tree.widget::<Panel>(editor.panel).unwrap().body();
    assert!(tree.is_ancestor(body, editor.bake));

    let pages = tree.widget::<TabContainer>(editor.tabs).unwrap().pages().to_vec();
    assert_eq!(tree.computed_style(pages[0]).unwrap().display, Display::None);
}

#[test]
fn mutation_after_end_requires_a_new_block() {
    let theme = ScaledTheme::default();
    let mut editor = build_editor();
    let mut block = RenderBlock::new(&mut editor.tree);
    block.begin().unwrap();
    block.end(&theme, &FixedAdvance).unwrap();

    TabContainer::select(&mut block, editor.tabs, 1);
    let mut cx = PaintContext::new();
    assert_eq!(
        block.render(&mut cx, &FixedAdvance),
        Err(RenderBlockError::NotResolved)
    );

    block.begin().unwrap();
    block.end(&theme, &FixedAdvance).unwrap();
    assert!(block.render(&mut cx, &FixedAdvance).is_ok());
    assert!(cx.texts().any(|run| run.text == "Bake"));
}
