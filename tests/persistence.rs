use canvas_paint::state::{Autosave, DraftStore, PersistenceError};
use canvas_paint::{PaintEngine, Rgba8, StrokeMode};
use egui::Pos2;
use std::path::PathBuf;

fn temp_dir() -> PathBuf {
    std::env::temp_dir().join(format!("canvas_paint_test_{}", uuid::Uuid::new_v4()))
}

fn sketched_engine() -> PaintEngine {
    let mut engine = PaintEngine::with_size(32.0, 24.0);
    engine.start_stroke(Pos2::new(4.0, 4.0), Rgba8::opaque(0, 0, 200), 3.0, StrokeMode::Paint);
    engine.extend_stroke(Pos2::new(28.0, 20.0));
    engine.end_stroke();
    engine
}

#[test]
fn test_draft_save_load_delete() {
    let dir = temp_dir();
    let store = DraftStore::new(&dir);
    let engine = sketched_engine();

    assert!(store.save(engine.surface(), "Sunset", "sky, orange").unwrap());
    assert!(store.exists());

    let draft = store.load().unwrap().expect("draft present");
    assert_eq!(draft.meta.title, "Sunset");
    assert_eq!(draft.meta.tags, "sky, orange");
    assert_eq!((draft.meta.canvas_width, draft.meta.canvas_height), (32.0, 24.0));
    assert_eq!(draft.image.as_raw().as_slice(), engine.surface().as_bytes());

    let mut restored = PaintEngine::with_size(32.0, 24.0);
    restored.restore_image(&draft.image);
    assert_eq!(restored.surface().as_bytes(), engine.surface().as_bytes());

    store.delete().unwrap();
    assert!(!store.exists());
    assert!(store.load().unwrap().is_none());
    // Deleting twice is fine.
    store.delete().unwrap();

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn test_blank_canvas_is_not_saved() {
    let dir = temp_dir();
    let store = DraftStore::new(&dir);
    let engine = PaintEngine::with_size(10.0, 10.0);

    assert!(!store.save(engine.surface(), "", "").unwrap());
    assert!(!store.exists());

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn test_missing_image_is_invalid_draft() {
    let dir = temp_dir();
    let store = DraftStore::with_name(&dir, "broken");
    let engine = sketched_engine();
    store.save(engine.surface(), "t", "").unwrap();
    std::fs::remove_file(dir.join("broken.png")).unwrap();

    assert!(matches!(store.load(), Err(PersistenceError::InvalidDraft(_))));

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn test_autosave_waits_for_quiet_period() {
    let mut autosave = Autosave::new(2.0);
    assert!(!autosave.is_pending());
    assert!(!autosave.take_due(100.0));

    autosave.mark_dirty(10.0);
    assert!(autosave.is_pending());
    assert!(!autosave.take_due(11.0));

    // Another edit restarts the timer.
    autosave.mark_dirty(11.5);
    assert!(!autosave.take_due(13.0));
    assert!(autosave.take_due(13.5));

    // Fires once per quiet period.
    assert!(!autosave.is_pending());
    assert!(!autosave.take_due(20.0));
}

#[test]
fn test_cancelled_autosave_does_not_resave_deleted_draft() {
    let dir = temp_dir();
    let store = DraftStore::new(&dir);
    let engine = sketched_engine();
    let mut autosave = Autosave::new(2.0);

    // Drawn and saved, then edited again and exported before the quiet period ended.
    store.save(engine.surface(), "", "").unwrap();
    autosave.mark_dirty(10.0);
    store.delete().unwrap();
    autosave.cancel();

    assert!(!autosave.is_pending());
    assert!(!autosave.take_due(12.5));
    assert!(!store.exists());

    // Later edits schedule saves again.
    autosave.mark_dirty(20.0);
    assert!(autosave.take_due(22.0));

    let _ = std::fs::remove_dir_all(&dir);
}
