use egui::{Context, PointerButton, Pos2, Rect, Response, TouchId, TouchPhase};

/// The input family an event came from.
///
/// A gesture only listens to moves and ups from the family that started it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputSource {
    Mouse,
    Touch,
}

/// Pointer events in canvas-relative screen coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    PointerDown { pos: Pos2, source: InputSource },
    PointerMove { pos: Pos2, source: InputSource },
    PointerUp { pos: Pos2, source: InputSource },
}

impl InputEvent {
    pub fn position(&self) -> Pos2 {
        match self {
            InputEvent::PointerDown { pos, .. }
            | InputEvent::PointerMove { pos, .. }
            | InputEvent::PointerUp { pos, .. } => *pos,
        }
    }

    pub fn source(&self) -> InputSource {
        match self {
            InputEvent::PointerDown { source, .. }
            | InputEvent::PointerMove { source, .. }
            | InputEvent::PointerUp { source, .. } => *source,
        }
    }
}

/// Handles converting raw egui input into canvas `InputEvent`s
#[derive(Debug)]
pub struct InputHandler {
    last_pointer_pos: Option<Pos2>,
    active_touch: Option<TouchId>,
    canvas_rect: Rect,
}

impl InputHandler {
    pub fn new(canvas_rect: Rect) -> Self {
        Self {
            last_pointer_pos: None,
            active_touch: None,
            canvas_rect,
        }
    }

    /// Update the canvas rectangle (e.g. if window is resized)
    pub fn set_canvas_rect(&mut self, rect: Rect) {
        self.canvas_rect = rect;
    }

    pub fn canvas_rect(&self) -> Rect {
        self.canvas_rect
    }

    /// Translate a window position into canvas coordinates
    fn to_canvas(&self, pos: Pos2) -> Pos2 {
        pos - self.canvas_rect.min.to_vec2()
    }

    /// Process raw egui input and generate canvas events.
    ///
    /// Gestures only start while `response` has the pointer, so presses on
    /// popups and windows above the canvas are left to them.
    pub fn process_input(&mut self, ctx: &Context, response: &Response) -> Vec<InputEvent> {
        let mut events = Vec::new();
        let over_canvas = response.contains_pointer();

        ctx.input(|input| {
            let source = InputSource::Mouse;
            let hover = input.pointer.hover_pos();

            if over_canvas && input.pointer.button_pressed(PointerButton::Primary) {
                if let Some(pos) = hover.filter(|pos| self.canvas_rect.contains(*pos)) {
                    events.push(InputEvent::PointerDown { pos: self.to_canvas(pos), source });
                }
            }

            if let Some(pos) = hover {
                if Some(pos) != self.last_pointer_pos {
                    events.push(InputEvent::PointerMove { pos: self.to_canvas(pos), source });
                }
                self.last_pointer_pos = Some(pos);
            }

            if input.pointer.button_released(PointerButton::Primary) {
                if let Some(pos) = hover.or(self.last_pointer_pos) {
                    events.push(InputEvent::PointerUp { pos: self.to_canvas(pos), source });
                }
            }

            for event in &input.raw.events {
                if let egui::Event::Touch { id, phase, pos: window_pos, .. } = event {
                    let source = InputSource::Touch;
                    let pos = self.to_canvas(*window_pos);
                    match phase {
                        TouchPhase::Start
                            if self.active_touch.is_none()
                                && over_canvas
                                && self.canvas_rect.contains(*window_pos) =>
                        {
                            self.active_touch = Some(*id);
                            events.push(InputEvent::PointerDown { pos, source });
                        }
                        TouchPhase::Move if self.active_touch == Some(*id) => {
                            events.push(InputEvent::PointerMove { pos, source });
                        }
                        TouchPhase::End | TouchPhase::Cancel if self.active_touch == Some(*id) => {
                            self.active_touch = None;
                            events.push(InputEvent::PointerUp { pos, source });
                        }
                        _ => {}
                    }
                }
            }
        });

        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::{Event, Modifiers, RawInput, pos2, vec2};

    /// One frame with a full-window canvas and a popup over its top-left corner
    fn run_frame(ctx: &Context, handler: &mut InputHandler, events: Vec<Event>) -> Vec<InputEvent> {
        let raw = RawInput {
            screen_rect: Some(Rect::from_min_size(Pos2::ZERO, vec2(400.0, 300.0))),
            events,
            ..Default::default()
        };
        let mut produced = Vec::new();
        let _ = ctx.run(raw, |ctx| {
            egui::CentralPanel::default()
                .frame(egui::Frame::none())
                .show(ctx, |ui| {
                    let (response, _painter) =
                        ui.allocate_painter(ui.available_size(), egui::Sense::click_and_drag());
                    handler.set_canvas_rect(response.rect);
                    produced = handler.process_input(ctx, &response);
                });
            egui::Area::new(egui::Id::new("popup"))
                .order(egui::Order::Foreground)
                .fixed_pos(Pos2::ZERO)
                .show(ctx, |ui| {
                    ui.allocate_exact_size(vec2(100.0, 100.0), egui::Sense::click());
                });
        });
        produced
    }

    /// Hover at `pos` for a couple of frames, then press there
    fn press_at(pos: Pos2) -> Vec<InputEvent> {
        let ctx = Context::default();
        let mut handler = InputHandler::new(Rect::NOTHING);
        for _ in 0..2 {
            run_frame(&ctx, &mut handler, vec![Event::PointerMoved(pos)]);
        }
        let press = Event::PointerButton {
            pos,
            button: PointerButton::Primary,
            pressed: true,
            modifiers: Modifiers::NONE,
        };
        run_frame(&ctx, &mut handler, vec![Event::PointerMoved(pos), press])
    }

    fn has_down(events: &[InputEvent]) -> bool {
        events.iter().any(|event| matches!(event, InputEvent::PointerDown { .. }))
    }

    #[test]
    fn test_press_on_canvas_starts_pointer_down() {
        let events = press_at(pos2(200.0, 150.0));
        assert!(events.contains(&InputEvent::PointerDown {
            pos: pos2(200.0, 150.0),
            source: InputSource::Mouse,
        }));
    }

    #[test]
    fn test_press_on_popup_is_left_alone() {
        let events = press_at(pos2(50.0, 50.0));
        assert!(!has_down(&events));
    }
}
