//! Frames rendered from live editor state.

use kurbo::{Point, Size};
use storeplan_core::elements::{EndCap, Gondola};
use storeplan_core::{
    Bounds, ElementDraft, ElementKind, InputEvent, Interaction, Modifiers, PointerButton, SceneStore,
};
use storeplan_render::{DrawCommand, GridStyle, RecordingSurface, RenderContext, ScenePainter};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn render(store: &SceneStore, interaction: &Interaction, grid: GridStyle) -> RecordingSurface {
    let snapshot = store.snapshot();
    let ctx = RenderContext::new(&snapshot, Size::new(640.0, 480.0))
        .with_config(store.config())
        .with_grid(grid)
        .with_marquee(interaction.selection_box().bounds())
        .with_guides(interaction.guides())
        .with_document_bounds(Some(Bounds::new(0.0, 0.0, 1200.0, 800.0)));
    let mut surface = RecordingSurface::new();
    ScenePainter::new().paint(&mut surface, &ctx).unwrap();
    surface
}

#[test]
fn drag_shows_guides_until_release() {
    init_logging();
    let mut store = SceneStore::default();
    store.toggle_snap_to_grid();
    let gondola = store.add_element(ElementDraft::new(
        ElementKind::Gondola(Gondola::default()),
        Bounds::new(0.0, 0.0, 200.0, 50.0),
    ));
    store.add_element(ElementDraft::new(
        ElementKind::EndCap(EndCap {
            attached_to: Some(gondola),
            ..EndCap::default()
        }),
        Bounds::new(300.0, 200.0, 60.0, 50.0),
    ));
    let mut interaction = Interaction::new(&store);

    interaction.handle_event(
        &mut store,
        InputEvent::PointerDown {
            position: Point::new(10.0, 10.0),
            button: PointerButton::Primary,
            modifiers: Modifiers::NONE,
        },
    );
    interaction.handle_event(
        &mut store,
        InputEvent::PointerMove {
            position: Point::new(312.0, 10.0),
            modifiers: Modifiers::NONE,
        },
    );
    // the left edge lands 2 units from the end cap's and snaps onto it
    assert_eq!(interaction.guides().len(), 1);
    assert_eq!(store.element(gondola).unwrap().bounds.x, 300.0);

    let during = render(&store, &interaction, GridStyle::Lines);
    let dashed_during = count_dashed(&during);

    interaction.handle_event(
        &mut store,
        InputEvent::PointerUp {
            position: Point::new(312.0, 10.0),
            button: PointerButton::Primary,
            modifiers: Modifiers::NONE,
        },
    );
    let after = render(&store, &interaction, GridStyle::Lines);

    // selection outline plus the guide, then only the outline
    assert_eq!(dashed_during, 2);
    assert_eq!(count_dashed(&after), 1);
}

#[test]
fn marquee_in_progress_is_painted() {
    init_logging();
    let mut store = SceneStore::default();
    let mut interaction = Interaction::new(&store);
    interaction.pointer_down(&mut store, Point::new(400.0, 300.0), PointerButton::Primary, Modifiers::NONE);
    interaction.pointer_move(&mut store, Point::new(500.0, 380.0), Modifiers::NONE);

    let surface = render(&store, &interaction, GridStyle::Dots);
    let marquee = surface.commands().iter().rev().find_map(|c| match c {
        DrawCommand::Fill { path, .. } => Some(kurbo::Shape::bounding_box(path)),
        _ => None,
    });
    assert_eq!(marquee, Some(kurbo::Rect::new(400.0, 300.0, 500.0, 380.0)));
}

fn count_dashed(surface: &RecordingSurface) -> usize {
    surface
        .commands()
        .iter()
        .filter(|c| matches!(c, DrawCommand::Stroke { stroke, .. } if !stroke.dash_pattern.is_empty()))
        .count()
}
