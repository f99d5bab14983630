use crate::config::AppConfig;
use crate::engine::PaintEngine;
use crate::event::PaintEvent;
use crate::export;
use crate::input::InputHandler;
use crate::panels::{central_panel, tools_panel};
use crate::state::{Autosave, DraftStore};
use crate::texture_manager::TextureManager;
use crate::tools::ToolSettings;
use crate::util::time;
use image::RgbaImage;
use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

const TOOL_SETTINGS_KEY: &str = "tool_settings";

/// The host application: one canvas over a template picture, driven by egui pointer input.
pub struct PaintApp {
    pub(crate) config: AppConfig,
    pub(crate) engine: PaintEngine,
    pub(crate) input: InputHandler,
    pub(crate) textures: TextureManager,
    pub(crate) template: Option<RgbaImage>,
    pub(crate) drafts: Option<DraftStore>,
    pub(crate) autosave: Autosave,
    /// Set by the engine's event handler when the surface changes
    surface_changed: Rc<Cell<bool>>,
    pub(crate) title: String,
    pub(crate) tags: String,
    pub(crate) status: Option<String>,
}

impl PaintApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>, config: AppConfig) -> Self {
        let template = config
            .template_path
            .as_ref()
            .and_then(|path| match export::load_template(path) {
                Ok(template) => Some(template),
                Err(e) => {
                    log::warn!("Template {} not loaded: {}", path.display(), e);
                    None
                }
            });

        let [width, height] = match &template {
            Some(t) => [t.width() as f32, t.height() as f32],
            None => config.canvas_size,
        };
        let dpr = cc.egui_ctx.pixels_per_point();
        let mut engine = PaintEngine::new(width, height, dpr, config.engine.clone());

        let stored_settings = cc
            .storage
            .and_then(|storage| eframe::get_value::<ToolSettings>(storage, TOOL_SETTINGS_KEY));
        if let Some(settings) = stored_settings {
            log::info!("Restored tool settings: {:?}", settings);
            *engine.settings_mut() = settings;
            let size = engine.settings().brush_size;
            engine.set_brush_size(size);
        }

        let surface_changed = Rc::new(Cell::new(false));
        let flag = Rc::clone(&surface_changed);
        engine.subscribe(Box::new(move |event: &PaintEvent| {
            if event.modifies_surface() {
                flag.set(true);
            }
        }));

        let mut textures = TextureManager::new();
        if let Some(Err(e)) = template.as_ref().map(|t| textures.set_template(&cc.egui_ctx, t)) {
            log::warn!("Template texture not created: {}", e);
        }

        let mut app = Self {
            autosave: Autosave::new(config.engine.autosave_delay_secs),
            drafts: config.draft_dir.clone().map(DraftStore::new),
            config,
            engine,
            input: InputHandler::new(),
            textures,
            template,
            surface_changed,
            title: String::new(),
            tags: String::new(),
            status: None,
        };
        app.restore_draft();
        app
    }

    /// Loads the saved draft, if any, onto the canvas.
    pub(crate) fn restore_draft(&mut self) {
        let Some(drafts) = &self.drafts else {
            return;
        };
        match drafts.load() {
            Ok(Some(draft)) => {
                self.engine.restore_image(&draft.image);
                self.title = draft.meta.title;
                self.tags = draft.meta.tags;
                // Restoring is not a new edit.
                self.surface_changed.set(false);
                self.status = Some("Your previous drawing has been restored".to_owned());
            }
            Ok(None) => log::debug!("No draft to restore"),
            Err(e) => log::warn!("Draft could not be restored: {}", e),
        }
    }

    /// Removes the saved draft and any autosave still pending for it.
    fn discard_draft(&mut self) {
        self.autosave.cancel();
        self.surface_changed.set(false);
        if let Some(Err(e)) = self.drafts.as_ref().map(DraftStore::delete) {
            log::warn!("Draft not removed: {}", e);
        }
    }

    /// Clears the canvas and forgets the draft.
    pub(crate) fn clear_canvas(&mut self) {
        self.engine.clear();
        self.discard_draft();
    }

    /// Writes the composited picture to the configured export path.
    pub(crate) fn export(&mut self) {
        let path = self.config.export_path.clone();
        let result = self
            .engine
            .export_composite(self.template.as_ref())
            .and_then(|png| export::write_png(&path, &png));

        let status = match result {
            Ok(()) => {
                self.discard_draft();
                format!("Exported to {}", path.display())
            }
            Err(e) => {
                log::error!("Export failed: {}", e);
                format!("Export failed: {e}")
            }
        };
        self.status = Some(status);
    }

    fn run_autosave(&mut self, ctx: &egui::Context) {
        let now = time::current_time_secs();
        if self.surface_changed.replace(false) {
            self.autosave.mark_dirty(now);
        }

        if self.autosave.take_due(now) {
            if let Some(drafts) = &self.drafts {
                match drafts.save(self.engine.surface(), &self.title, &self.tags) {
                    Ok(true) => log::debug!("Autosaved draft"),
                    Ok(false) => {}
                    Err(e) => log::warn!("Autosave failed: {}", e),
                }
            }
        } else if self.autosave.is_pending() {
            ctx.request_repaint_after(Duration::from_secs_f64(self.autosave.delay_secs()));
        }
    }

    /// Follows changes of the display scale factor.
    fn sync_pixel_ratio(&mut self, ctx: &egui::Context) {
        let dpr = ctx.pixels_per_point();
        let surface = self.engine.surface();
        if (surface.device_pixel_ratio() - dpr).abs() > f32::EPSILON {
            let logical = surface.logical_size();
            log::info!("Pixel ratio changed to {}, resizing canvas", dpr);
            self.engine.resize(logical.x, logical.y, dpr);
        }
    }

    fn handle_shortcuts(&mut self, ctx: &egui::Context) {
        let (undo, redo) = ctx.input(|i| {
            let command = i.modifiers.command;
            (
                command && !i.modifiers.shift && i.key_pressed(egui::Key::Z),
                command && (i.key_pressed(egui::Key::Y) || (i.modifiers.shift && i.key_pressed(egui::Key::Z))),
            )
        });
        if undo {
            self.engine.undo();
        }
        if redo {
            self.engine.redo();
        }
    }
}

impl eframe::App for PaintApp {
    /// Called by the framework to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, TOOL_SETTINGS_KEY, self.engine.settings());
    }

    /// Called each time the UI needs repainting.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.sync_pixel_ratio(ctx);
        self.handle_shortcuts(ctx);

        tools_panel(self, ctx);
        central_panel(self, ctx);

        self.run_autosave(ctx);
    }
}
