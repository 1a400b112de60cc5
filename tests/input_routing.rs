use coreverse_canvas::{
    BoundingBox, Document, EditorState, History, PointerEvent, Router, Shape, ToolKind,
};
use egui::{pos2, vec2, Color32};

fn setup() -> (Router, EditorState, Document, History) {
    (
        Router::new(),
        EditorState::default(),
        Document::new(),
        History::new(),
    )
}

#[test]
fn freehand_records_every_move_event() {
    let (mut router, mut state, mut document, mut history) = setup();
    state.color = Color32::RED;
    state.stroke_width = 5;

    router.pointer_down(pos2(1.0, 1.0), &mut state, &document);
    for i in 2..=4 {
        router.pointer_move(pos2(i as f32, i as f32), &state, &mut document);
    }
    // Still in progress: nothing committed yet.
    assert!(document.is_empty());
    assert!(router.in_progress().is_some());

    router.pointer_up(&state, &mut document, &mut history);
    assert!(router.in_progress().is_none());
    assert_eq!(document.len(), 1);
    assert_eq!(history.len(), 1);

    let Some(Shape::Freehand {
        points,
        color,
        width,
        eraser,
    }) = document.shapes().first()
    else {
        panic!("expected a freehand stroke");
    };
    assert_eq!(points.len(), 4);
    assert_eq!(*color, Color32::RED);
    assert_eq!(*width, 5);
    assert!(!eraser);
}

#[test]
fn single_point_stroke_is_retained() {
    let (mut router, mut state, mut document, mut history) = setup();
    router.pointer_down(pos2(30.0, 30.0), &mut state, &document);
    router.pointer_up(&state, &mut document, &mut history);

    assert_eq!(document.len(), 1);
    let Some(Shape::Freehand { points, .. }) = document.shapes().first() else {
        panic!("expected a freehand stroke");
    };
    assert_eq!(points.len(), 1);
}

#[test]
fn eraser_strokes_carry_the_eraser_flag() {
    let (mut router, mut state, mut document, mut history) = setup();
    state.set_tool(ToolKind::Eraser);
    router.pointer_down(pos2(0.0, 0.0), &mut state, &document);
    router.pointer_move(pos2(5.0, 5.0), &state, &mut document);
    router.pointer_up(&state, &mut document, &mut history);

    let Some(Shape::Freehand { eraser, .. }) = document.shapes().first() else {
        panic!("expected a freehand stroke");
    };
    assert!(*eraser);
}

#[test]
fn pointer_up_without_action_is_a_noop() {
    let (mut router, state, mut document, mut history) = setup();
    router.pointer_up(&state, &mut document, &mut history);
    assert!(document.is_empty());
    assert!(history.is_empty());
}

#[test]
fn rectangle_tracks_drag_direction() {
    let (mut router, mut state, mut document, mut history) = setup();
    state.set_tool(ToolKind::Rectangle);

    router.pointer_down(pos2(10.0, 10.0), &mut state, &document);
    router.pointer_move(pos2(4.0, 6.0), &state, &mut document);
    let Some(Shape::Rectangle { bounds, .. }) = router.in_progress() else {
        panic!("expected a rectangle in progress");
    };
    // Dragging up-left keeps the anchor and goes negative.
    assert_eq!(bounds.origin, pos2(10.0, 10.0));
    assert_eq!(bounds.size, vec2(-6.0, -4.0));

    router.pointer_up(&state, &mut document, &mut history);
    let Some(Shape::Rectangle { bounds, .. }) = document.shapes().first() else {
        panic!("expected a committed rectangle");
    };
    assert_eq!(bounds.normalized().min, pos2(4.0, 6.0));
    assert_eq!(bounds.normalized().max, pos2(10.0, 10.0));
}

#[test]
fn zero_size_box_is_discarded() {
    let (mut router, mut state, mut document, mut history) = setup();
    state.set_tool(ToolKind::Ellipse);
    router.pointer_down(pos2(50.0, 50.0), &mut state, &document);
    router.pointer_up(&state, &mut document, &mut history);

    assert!(document.is_empty());
    assert!(history.is_empty());
}

#[test]
fn move_tool_applies_sum_of_deltas() {
    let (mut router, mut state, mut document, mut history) = setup();
    document.add_shape(Shape::Rectangle {
        bounds: BoundingBox::new(pos2(10.0, 10.0), vec2(20.0, 10.0)),
        color: Color32::BLACK,
        width: 2,
    });
    history.push(document.snapshot());
    state.set_tool(ToolKind::Move);

    router.pointer_down(pos2(15.0, 12.0), &mut state, &document);
    assert_eq!(state.selected, Some(0));

    // Two consecutive move events: the shape must travel by the sum of the
    // frame deltas, not to the final absolute pointer position.
    router.pointer_move(pos2(18.0, 14.0), &state, &mut document); // +(3, 2)
    router.pointer_move(pos2(20.0, 13.0), &state, &mut document); // +(2, -1)
    router.pointer_up(&state, &mut document, &mut history);

    let Some(Shape::Rectangle { bounds, .. }) = document.shapes().first() else {
        panic!("expected a rectangle");
    };
    assert_eq!(bounds.origin, pos2(15.0, 11.0));
    assert_eq!(history.len(), 2);
}

#[test]
fn move_on_empty_space_selects_nothing() {
    let (mut router, mut state, mut document, mut history) = setup();
    state.set_tool(ToolKind::Move);
    router.pointer_down(pos2(200.0, 200.0), &mut state, &document);
    assert_eq!(state.selected, None);
    router.pointer_move(pos2(210.0, 210.0), &state, &mut document);
    router.pointer_up(&state, &mut document, &mut history);
    assert!(history.is_empty());
}

#[test]
fn text_tool_stages_a_draft() {
    let (mut router, mut state, document, _) = setup();
    state.set_tool(ToolKind::Text);
    let draft = router
        .pointer_down(pos2(40.0, 40.0), &mut state, &document)
        .expect("text tool stages a draft");
    assert_eq!(draft.pos, pos2(40.0, 40.0));
    assert!(draft.content.is_empty());
    // The draft is not in the document until confirmed.
    assert!(document.is_empty());
}

#[test]
fn blank_text_commit_is_rejected() {
    let (mut router, mut state, mut document, mut history) = setup();
    state.set_tool(ToolKind::Text);
    for content in ["", "   "] {
        let mut draft = router
            .pointer_down(pos2(40.0, 40.0), &mut state, &document)
            .expect("text tool stages a draft");
        draft.content = content.to_owned();
        assert!(!router.commit_text(draft, &state, &mut document, &mut history));
    }
    assert!(document.is_empty());
    assert!(history.is_empty());
}

#[test]
fn text_commit_adds_shape_and_snapshot() {
    let (mut router, mut state, mut document, mut history) = setup();
    state.set_tool(ToolKind::Text);
    state.color = Color32::BLUE;
    let mut draft = router
        .pointer_down(pos2(40.0, 40.0), &mut state, &document)
        .expect("text tool stages a draft");
    draft.content = "mitochondria".to_owned();
    draft.bold = true;
    assert!(router.commit_text(draft, &state, &mut document, &mut history));

    assert_eq!(history.len(), 1);
    let Some(Shape::Text {
        content,
        color,
        bold,
        ..
    }) = document.shapes().first()
    else {
        panic!("expected a text shape");
    };
    assert_eq!(content, "mitochondria");
    assert_eq!(*color, Color32::BLUE);
    assert!(*bold);
}

#[test]
fn handle_dispatches_pointer_events() {
    let (mut router, mut state, mut document, mut history) = setup();
    router.handle(
        PointerEvent::Down(pos2(0.0, 0.0)),
        &mut state,
        &mut document,
        &mut history,
    );
    router.handle(
        PointerEvent::Move(pos2(10.0, 0.0)),
        &mut state,
        &mut document,
        &mut history,
    );
    router.handle(PointerEvent::Up, &mut state, &mut document, &mut history);
    assert_eq!(document.len(), 1);
}
