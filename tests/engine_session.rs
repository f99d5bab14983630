use canvas_paint::export::decode_png;
use canvas_paint::input::route_event;
use canvas_paint::{EngineConfig, FillOutcome, InputEvent, PaintEngine, PaintEvent, Rgba8, StrokeMode, Tool};
use egui::Pos2;
use image::{Rgba, RgbaImage};
use std::cell::RefCell;
use std::rc::Rc;

fn recorded_events(engine: &PaintEngine) -> Rc<RefCell<Vec<PaintEvent>>> {
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    engine.subscribe(Box::new(move |event: &PaintEvent| {
        sink.borrow_mut().push(event.clone());
    }));
    events
}

#[test]
fn test_stroke_lifecycle_emits_events_in_order() {
    let mut engine = PaintEngine::with_size(20.0, 20.0);
    let events = recorded_events(&engine);

    engine.start_stroke(Pos2::new(2.0, 2.0), Rgba8::BLACK, 2.0, StrokeMode::Paint);
    assert!(engine.state().is_drawing());
    engine.extend_stroke(Pos2::new(10.0, 10.0));
    engine.end_stroke();
    assert!(engine.state().is_idle());

    assert_eq!(
        *events.borrow(),
        vec![
            PaintEvent::StateChanged { old: "Idle", new: "Drawing" },
            PaintEvent::StrokeStarted { mode: StrokeMode::Paint },
            PaintEvent::StateChanged { old: "Drawing", new: "Idle" },
            PaintEvent::SnapshotCaptured { depth: 2 },
            PaintEvent::StrokeCompleted { mode: StrokeMode::Paint, points: 2 },
        ]
    );
}

#[test]
fn test_extend_and_end_without_stroke_are_noops() {
    let mut engine = PaintEngine::with_size(20.0, 20.0);
    let revision = engine.revision();

    assert!(!engine.extend_stroke(Pos2::new(5.0, 5.0)));
    assert!(engine.end_stroke().is_none());
    assert_eq!(engine.revision(), revision);
    assert!(engine.surface().is_blank());
}

#[test]
fn test_new_stroke_commits_the_previous_one() {
    let mut engine = PaintEngine::with_size(20.0, 20.0);

    engine.start_stroke(Pos2::new(2.0, 2.0), Rgba8::BLACK, 2.0, StrokeMode::Paint);
    engine.start_stroke(Pos2::new(15.0, 15.0), Rgba8::BLACK, 2.0, StrokeMode::Paint);
    engine.end_stroke();

    assert_eq!(engine.history().undo_stack().len(), 3);
}

#[test]
fn test_clear_empties_surface_and_is_undoable() {
    let mut engine = PaintEngine::with_size(20.0, 20.0);
    let events = recorded_events(&engine);
    engine.fill_at(Pos2::new(5.0, 5.0), Rgba8::BLACK);

    engine.clear();

    assert!(engine.surface().is_blank());
    assert!(events.borrow().contains(&PaintEvent::Cleared));
    assert!(engine.undo());
    assert_eq!(engine.surface().painted_pixel_count(), 400);
}

#[test]
fn test_surface_events_mark_modifications() {
    let mut engine = PaintEngine::with_size(20.0, 20.0);
    let events = recorded_events(&engine);

    engine.fill_at(Pos2::new(5.0, 5.0), Rgba8::BLACK);
    engine.undo();

    let modifying = events.borrow().iter().filter(|e| e.modifies_surface()).count();
    assert_eq!(modifying, 2);
}

#[test]
fn test_export_image_round_trips_pixels() {
    let mut engine = PaintEngine::with_size(16.0, 8.0);
    engine.start_stroke(Pos2::new(1.0, 1.0), Rgba8::opaque(200, 10, 10), 3.0, StrokeMode::Paint);
    engine.extend_stroke(Pos2::new(14.0, 6.0));
    engine.end_stroke();

    let png = engine.export_image().expect("png encoding");
    let decoded = decode_png(&png).expect("png decoding");

    assert_eq!(decoded.dimensions(), (16, 8));
    assert_eq!(decoded.as_raw().as_slice(), engine.surface().as_bytes());
}

#[test]
fn test_composite_without_template_uses_fallback_size() {
    let engine = PaintEngine::with_size(60.0, 40.0);

    let png = engine.export_composite(None).expect("composite");
    let image = decode_png(&png).expect("png decoding");

    assert_eq!(image.dimensions(), (600, 400));
    assert_eq!(image.get_pixel(0, 0), &Rgba([255, 255, 255, 255]));
}

#[test]
fn test_composite_layers_drawing_over_template() {
    let mut engine = PaintEngine::with_size(30.0, 20.0);
    let template = RgbaImage::from_pixel(30, 20, Rgba([0, 0, 255, 255]));
    engine.start_stroke(Pos2::new(5.5, 5.5), Rgba8::opaque(255, 0, 0), 3.0, StrokeMode::Paint);
    engine.end_stroke();

    let png = engine.export_composite(Some(&template)).expect("composite");
    let image = decode_png(&png).expect("png decoding");

    assert_eq!(image.dimensions(), (30, 20));
    assert_eq!(image.get_pixel(5, 5), &Rgba([255, 0, 0, 255]));
    assert_eq!(image.get_pixel(25, 15), &Rgba([0, 0, 255, 255]));
}

#[test]
fn test_resize_preserves_content() {
    let mut engine = PaintEngine::with_size(10.0, 10.0);
    let events = recorded_events(&engine);
    engine.fill_at(Pos2::new(1.0, 1.0), Rgba8::BLACK);

    engine.resize(10.0, 10.0, 2.0);

    assert_eq!((engine.surface().width(), engine.surface().height()), (20, 20));
    assert_eq!(engine.surface().painted_pixel_count(), 400);
    assert!(events.borrow().contains(&PaintEvent::Resized { width: 20, height: 20 }));
}

#[test]
fn test_restore_image_stretches_to_surface() {
    let mut engine = PaintEngine::with_size(10.0, 10.0);
    let saved = RgbaImage::from_pixel(5, 5, Rgba([255, 0, 0, 255]));

    engine.restore_image(&saved);

    assert_eq!(engine.surface().painted_pixel_count(), 100);
    let corner = engine.surface().pixel(9, 9).expect("inside surface");
    assert!(corner.r > 250 && corner.g < 5 && corner.a > 250);
    assert!(engine.can_undo());
    assert!(engine.undo());
    assert!(engine.surface().is_blank());
}

#[test]
fn test_router_drives_pen_and_bucket() {
    let mut engine = PaintEngine::with_size(20.0, 20.0);

    assert!(route_event(&InputEvent::PointerDown { position: Pos2::new(2.0, 2.0) }, &mut engine));
    assert!(route_event(&InputEvent::PointerMove { position: Pos2::new(8.0, 2.0) }, &mut engine));
    assert!(route_event(&InputEvent::PointerUp { position: Pos2::new(8.0, 2.0) }, &mut engine));
    assert_eq!(engine.surface().pixel(5, 2), Some(Rgba8::BLACK));

    engine.settings_mut().tool = Tool::Fill;
    engine.settings_mut().color = Rgba8::opaque(0, 255, 0);
    assert!(route_event(&InputEvent::PointerDown { position: Pos2::new(15.0, 15.0) }, &mut engine));
    assert!(!route_event(&InputEvent::PointerUp { position: Pos2::new(15.0, 15.0) }, &mut engine));
    assert_eq!(engine.surface().pixel(15, 15), Some(Rgba8::opaque(0, 255, 0)));
    assert_eq!(engine.surface().pixel(5, 2), Some(Rgba8::BLACK));
}

#[test]
fn test_selecting_color_returns_to_pen() {
    let mut engine = PaintEngine::with_size(20.0, 20.0);
    engine.settings_mut().tool = Tool::Eraser;

    engine.settings_mut().select_color(Rgba8::opaque(1, 2, 3));

    assert_eq!(engine.settings().tool, Tool::Pen);
    assert_eq!(engine.fill_at(Pos2::new(1.0, 1.0), Rgba8::opaque(1, 2, 3)), FillOutcome::Filled { pixels: 400 });
}

#[test]
fn test_brush_size_steps_stay_in_bounds() {
    let mut engine = PaintEngine::with_size(20.0, 20.0);
    engine.set_brush_size(1.0);
    engine.decrease_brush_size();
    assert_eq!(engine.settings().brush_size, 1.0);

    engine.set_brush_size(50.0);
    engine.increase_brush_size();
    assert_eq!(engine.settings().brush_size, 50.0);

    engine.set_brush_size(f32::NAN);
    assert_eq!(engine.settings().brush_size, 50.0);
}

#[test]
fn test_invalid_config_falls_back_to_defaults() {
    let config = EngineConfig {
        min_brush_size: 10.0,
        max_brush_size: 5.0,
        ..EngineConfig::default()
    };
    assert!(config.validate().is_err());

    let mut engine = PaintEngine::new(20.0, 20.0, 1.0, config);

    assert_eq!(engine.config(), &EngineConfig::default());
    assert!(engine.start_stroke(Pos2::new(10.0, 10.0), Rgba8::BLACK, 7.0, StrokeMode::Paint));
    assert_eq!(engine.end_stroke().map(|s| s.width()), Some(7.0));
}

#[test]
fn test_subscribers_are_registered_on_the_bus() {
    let engine = PaintEngine::with_size(10.0, 10.0);
    assert_eq!(engine.event_bus().handler_count(), 0);

    let _events = recorded_events(&engine);
    let _more = recorded_events(&engine);

    assert_eq!(engine.event_bus().handler_count(), 2);
}
