use std::path::Path;

use egui::{Pos2, Vec2};
use log::{debug, info, warn};

use crate::command::{CommandHistory, CommandResult};
use crate::config::CanvasConfig;
use crate::document::Document;
use crate::element::{Element, ElementId, ElementType};
use crate::event::{CanvasEvent, EventBus, EventHandler};
use crate::input::{InputEvent, InputSource};
use crate::persistence::{self, PersistenceResult};
use crate::renderer::{RenderSurface, Renderer};
use crate::tools::{Mode, Tool, ToolContext, ToolType};
use crate::viewport::Viewport;

/// The interactive drawing surface.
///
/// Owns the document, view, history, selection and the gesture in progress.
/// Every mutation goes through `&mut self`, so all of it happens on whichever
/// thread drives the canvas.
#[derive(Debug)]
pub struct Canvas {
    document: Document,
    viewport: Viewport,
    history: CommandHistory,
    renderer: Renderer,
    event_bus: EventBus,
    config: CanvasConfig,
    mode: Mode,
    current_color: String,
    line_width: f32,
    screen_size: Vec2,
    selected: Option<ElementId>,
    /// The running gesture and the input family that started it
    gesture: Option<(ToolType, InputSource)>,
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new()
    }
}

impl Canvas {
    pub fn new() -> Self {
        Self::with_config(CanvasConfig::default())
    }

    pub fn with_config(config: CanvasConfig) -> Self {
        Self {
            document: Document::new(),
            viewport: Viewport::default(),
            history: CommandHistory::new(),
            renderer: Renderer::new(),
            event_bus: EventBus::new(),
            mode: config.default_mode,
            current_color: config.default_color.clone(),
            line_width: config.line_width,
            config,
            screen_size: Vec2::ZERO,
            selected: None,
            gesture: None,
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn history(&self) -> &CommandHistory {
        &self.history
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    pub fn config(&self) -> &CanvasConfig {
        &self.config
    }

    pub fn subscribe(&self, handler: Box<dyn EventHandler>) {
        self.event_bus.subscribe(handler);
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Switch modes. Leaving select mode drops the selection.
    pub fn set_mode(&mut self, mode: Mode) {
        if mode != Mode::Select {
            self.clear_selection();
        }
        if mode != self.mode {
            let old = self.mode;
            self.mode = mode;
            info!("Mode changed from {} to {}", old.name(), mode.name());
            self.event_bus.emit(CanvasEvent::ModeChanged { old, new: mode });
        }
    }

    pub fn current_color(&self) -> &str {
        &self.current_color
    }

    pub fn set_color(&mut self, color: &str) {
        self.current_color = color.to_owned();
    }

    pub fn line_width(&self) -> f32 {
        self.line_width
    }

    pub fn set_line_width(&mut self, line_width: f32) {
        self.line_width = line_width;
    }

    pub fn screen_size(&self) -> Vec2 {
        self.screen_size
    }

    /// Track the drawing surface size used for culling
    pub fn resize_surface(&mut self, size: Vec2) {
        if size == self.screen_size {
            return;
        }
        self.screen_size = size;
        self.renderer.request_redraw();
        self.event_bus.emit(CanvasEvent::SurfaceResized { size });
    }

    pub fn selected(&self) -> Option<ElementId> {
        self.selected
    }

    fn clear_selection(&mut self) {
        let Some(id) = self.selected.take() else {
            return;
        };
        if let Some(element) = self.document.element_mut(id) {
            element.set_selected(false);
        }
        self.renderer.request_redraw();
        self.event_bus.emit(CanvasEvent::SelectionChanged(None));
    }

    /// Elements currently intersecting the screen, in z-order
    pub fn visible_elements(&self) -> impl Iterator<Item = &ElementType> + '_ {
        self.document.visible(&self.viewport, self.screen_size)
    }

    pub fn is_gesture_active(&self) -> bool {
        self.gesture.is_some()
    }

    pub fn active_tool_name(&self) -> Option<&'static str> {
        self.gesture.as_ref().map(|(tool, _)| tool.name())
    }

    pub fn handle_event(&mut self, event: InputEvent) {
        let (pos, source) = (event.position(), event.source());
        match event {
            InputEvent::PointerDown { .. } => self.pointer_down(pos, source),
            InputEvent::PointerMove { .. } => self.pointer_move(pos, source),
            InputEvent::PointerUp { .. } => self.pointer_up(pos, source),
        }
    }

    /// Start the gesture of the current mode
    pub fn pointer_down(&mut self, pos: Pos2, source: InputSource) {
        if self.gesture.is_some() {
            debug!("Ignoring pointer down at {:?}, a gesture is already running", pos);
            return;
        }
        let mode = self.mode;
        if let Some(tool) = self.with_tool_context(|ctx| ToolType::begin(mode, pos, ctx)) {
            debug!("Gesture {} started", tool.name());
            self.gesture = Some((tool, source));
        }
    }

    pub fn pointer_move(&mut self, pos: Pos2, source: InputSource) {
        let Some((mut tool, started_by)) = self.gesture.take() else {
            return;
        };
        if started_by == source {
            self.with_tool_context(|ctx| tool.on_pointer_move(pos, ctx));
        }
        self.gesture = Some((tool, started_by));
    }

    /// Finish the running gesture and record what it did
    pub fn pointer_up(&mut self, pos: Pos2, source: InputSource) {
        match self.gesture.take() {
            Some((tool, started_by)) if started_by == source => {
                let name = tool.name();
                let command = self.with_tool_context(|ctx| tool.on_pointer_up(pos, ctx));
                debug!("Gesture {} finished", name);
                if let Some(command) = command {
                    self.history.record(command, &mut self.document);
                    self.emit_history_changed();
                }
            }
            other => self.gesture = other,
        }
    }

    fn with_tool_context<R>(&mut self, f: impl FnOnce(&mut ToolContext<'_>) -> R) -> R {
        let mut ctx = ToolContext {
            document: &mut self.document,
            viewport: &mut self.viewport,
            renderer: &mut self.renderer,
            selected: &mut self.selected,
            screen_size: self.screen_size,
            color: &self.current_color,
            line_width: self.line_width,
            events: Vec::new(),
        };
        let result = f(&mut ctx);
        for event in ctx.events {
            self.event_bus.emit(event);
        }
        result
    }

    /// Undo the last recorded action.
    ///
    /// Returns false if there was none, or while a gesture is running since the
    /// gesture's entry is recorded against the current document.
    pub fn undo(&mut self) -> CommandResult<bool> {
        if let Some(name) = self.active_tool_name() {
            debug!("Ignoring undo while gesture {} is running", name);
            return Ok(false);
        }
        let undone = self.history.undo(&mut self.document)?;
        if undone {
            self.after_history_step();
        }
        Ok(undone)
    }

    /// Redo the next undone action. Returns false if there was none or a
    /// gesture is running.
    pub fn redo(&mut self) -> CommandResult<bool> {
        if let Some(name) = self.active_tool_name() {
            debug!("Ignoring redo while gesture {} is running", name);
            return Ok(false);
        }
        let redone = self.history.redo(&mut self.document)?;
        if redone {
            self.after_history_step();
        }
        Ok(redone)
    }

    fn after_history_step(&mut self) {
        // The selected element may have been detached
        if let Some(id) = self.selected {
            if self.document.element(id).is_none() {
                self.clear_selection();
            }
        }
        self.renderer.request_redraw();
        self.event_bus.emit(CanvasEvent::ElementsChanged);
        self.emit_history_changed();
    }

    fn emit_history_changed(&self) {
        self.event_bus.emit(CanvasEvent::HistoryChanged {
            position: self.history.position(),
            len: self.history.len(),
        });
    }

    /// Draw pending changes. Returns true if the whole surface was redrawn.
    pub fn render(&mut self, surface: &mut dyn RenderSurface) -> bool {
        let preview = self.gesture.as_ref().and_then(|(tool, _)| tool.preview());
        self.renderer
            .render(surface, &self.document, &self.viewport, self.screen_size, preview)
    }

    /// Clear and redraw everything, for hosts that repaint every frame
    pub fn render_all(&mut self, surface: &mut dyn RenderSurface) {
        let preview = self.gesture.as_ref().and_then(|(tool, _)| tool.preview());
        self.renderer
            .render_all(surface, &self.document, &self.viewport, self.screen_size, preview);
    }

    /// Serialize the live elements to the JSON save format
    pub fn save_json(&self) -> PersistenceResult<String> {
        let json = persistence::to_json(self.document.elements())?;
        self.event_bus.emit(CanvasEvent::Saved {
            count: self.document.len(),
        });
        Ok(json)
    }

    /// Replace the drawing with the parsed input and reset the session.
    ///
    /// Nothing changes unless the whole input parses.
    pub fn load_json(&mut self, json: &str) -> PersistenceResult<()> {
        let elements = persistence::from_json(json)?;
        self.reset_with(elements);
        Ok(())
    }

    pub fn save_to_path(&self, path: &Path) -> PersistenceResult<()> {
        persistence::save_to_path(path, self.document.elements())?;
        self.event_bus.emit(CanvasEvent::Saved {
            count: self.document.len(),
        });
        Ok(())
    }

    pub fn load_from_path(&mut self, path: &Path) -> PersistenceResult<()> {
        let elements = persistence::load_from_path(path)?;
        self.reset_with(elements);
        Ok(())
    }

    fn reset_with(&mut self, elements: Vec<ElementType>) {
        if let Some((tool, _)) = self.gesture.take() {
            warn!("Dropping gesture {} because a drawing was loaded", tool.name());
        }
        let count = elements.len();
        self.document.replace_all(elements);
        self.viewport.reset();
        self.history.clear();
        self.selected = None;
        self.current_color = self.config.default_color.clone();
        let mode = self.config.default_mode;
        self.set_mode(mode);
        self.renderer.request_redraw();

        info!("Loaded {} elements", count);
        self.event_bus.emit(CanvasEvent::Loaded { count });
        self.event_bus.emit(CanvasEvent::ViewChanged {
            offset: self.viewport.offset,
            zoom: self.viewport.zoom,
        });
        self.emit_history_changed();
    }
}
