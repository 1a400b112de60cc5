use coreverse_canvas::{Document, EditorState, History, Router};
use egui::pos2;

// Commit a pencil stroke through the router, the way the canvas would.
fn commit_stroke(
    router: &mut Router,
    state: &mut EditorState,
    document: &mut Document,
    history: &mut History,
    y: f32,
) {
    router.pointer_down(pos2(0.0, y), state, document);
    router.pointer_move(pos2(10.0, y), state, document);
    router.pointer_move(pos2(20.0, y), state, document);
    router.pointer_up(state, document, history);
}

#[test]
fn undo_redo_inverse_law() {
    let mut router = Router::new();
    let mut state = EditorState::default();
    let mut document = Document::new();
    let mut history = History::new();

    for i in 0..4 {
        commit_stroke(&mut router, &mut state, &mut document, &mut history, i as f32 * 10.0);
    }
    assert_eq!(document.len(), 4);
    let full = document.snapshot();

    // Undoing once per commit walks all the way back to the empty canvas.
    let mut undone = 0;
    while let Some(snapshot) = history.undo() {
        let shapes = snapshot.to_vec();
        document.replace(shapes);
        undone += 1;
    }
    assert_eq!(undone, 4);
    assert!(document.is_empty());
    assert!(!history.can_undo());

    // Redoing the same number of times restores the exact store.
    for _ in 0..4 {
        let snapshot = history.redo().expect("redo available");
        let shapes = snapshot.to_vec();
        document.replace(shapes);
    }
    assert_eq!(document.snapshot(), full);
    assert!(!history.can_redo());
}

#[test]
fn undo_past_the_beginning_is_a_noop() {
    let mut history = History::new();
    assert!(history.undo().is_none());

    let mut router = Router::new();
    let mut state = EditorState::default();
    let mut document = Document::new();
    commit_stroke(&mut router, &mut state, &mut document, &mut history, 0.0);

    assert!(history.undo().is_some());
    assert!(history.undo().is_none());
    assert!(history.undo().is_none());
}

#[test]
fn branch_truncation_makes_redo_a_noop() {
    let mut router = Router::new();
    let mut state = EditorState::default();
    let mut document = Document::new();
    let mut history = History::new();

    commit_stroke(&mut router, &mut state, &mut document, &mut history, 0.0);
    commit_stroke(&mut router, &mut state, &mut document, &mut history, 10.0);

    let snapshot = history.undo().expect("undo available").to_vec();
    document.replace(snapshot);
    assert_eq!(document.len(), 1);
    assert!(history.can_redo());

    // Committing on the undone state discards the future branch.
    commit_stroke(&mut router, &mut state, &mut document, &mut history, 99.0);
    assert!(!history.can_redo());
    assert!(history.redo().is_none());
    assert_eq!(document.len(), 2);
}

#[test]
fn clear_pushes_an_empty_snapshot_reachable_by_undo() {
    let mut router = Router::new();
    let mut state = EditorState::default();
    let mut document = Document::new();
    let mut history = History::new();

    commit_stroke(&mut router, &mut state, &mut document, &mut history, 0.0);
    commit_stroke(&mut router, &mut state, &mut document, &mut history, 10.0);
    let before_clear = document.snapshot();

    // Clearing is itself an edit: an empty snapshot on top of the stack.
    document.clear();
    history.push(Vec::new());
    assert!(document.is_empty());

    let snapshot = history.undo().expect("undo available").to_vec();
    document.replace(snapshot);
    assert_eq!(document.snapshot(), before_clear);
}

#[test]
fn move_records_one_snapshot_per_drag() {
    use coreverse_canvas::{BoundingBox, Shape, ToolKind};
    use egui::{vec2, Color32};

    let mut router = Router::new();
    let mut state = EditorState::default();
    let mut document = Document::new();
    let mut history = History::new();

    commit_stroke(&mut router, &mut state, &mut document, &mut history, 0.0);
    document.add_shape(Shape::Rectangle {
        bounds: BoundingBox::new(pos2(100.0, 100.0), vec2(50.0, 40.0)),
        color: Color32::BLACK,
        width: 2,
    });
    history.push(document.snapshot());

    state.set_tool(ToolKind::Move);
    router.pointer_down(pos2(120.0, 110.0), &mut state, &document);
    router.pointer_move(pos2(130.0, 110.0), &state, &mut document);
    router.pointer_move(pos2(135.0, 115.0), &state, &mut document);
    router.pointer_up(&state, &mut document, &mut history);
    assert_eq!(history.len(), 3);

    // Undo restores the pre-drag position; no shape was added or removed.
    let snapshot = history.undo().expect("undo available").to_vec();
    document.replace(snapshot);
    assert_eq!(document.len(), 2);
    let Some(Shape::Rectangle { bounds, .. }) = document.shapes().last() else {
        panic!("expected a rectangle on top");
    };
    assert_eq!(bounds.origin, pos2(100.0, 100.0));
}
