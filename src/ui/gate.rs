// The gate window: translates egui input into widget events, feeds the
// controller, and paints the widget state back each frame

use std::sync::mpsc::{self, Sender};
use std::time::{Duration, Instant};

use eframe::egui;

use store::UserStore;

use crate::config::AppContext;
use crate::gate::{GateController, Phase, SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::widget::{self, Button, Color, InputEvent, KeyInput, Point, PointerButton, TextInput};

/// Target pacing of roughly 30 frames per second, which keeps the
/// countdown display current without repainting continuously
const FRAME_INTERVAL: Duration = Duration::from_millis(33);

const WINDOW_TITLE: &str = "User Login";

/// Create & run the gate window to completion, returning whether the
/// session ended authenticated
/// The window is fully torn down before this returns, so the caller can
/// hand control to another process without resource contention
pub fn run(app_ctx: &AppContext) -> Result<bool, eframe::Error> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([SCREEN_WIDTH, SCREEN_HEIGHT])
            .with_resizable(false),
        centered: true,
        ..Default::default()
    };

    // The outcome comes back over a channel, as run_native consumes the app
    let (tx, rx) = mpsc::channel();
    let store = app_ctx.store.clone();

    tracing::info!("opening gate window");
    eframe::run_native(
        WINDOW_TITLE,
        options,
        Box::new(move |_cc| Box::new(GateApp::new(store, tx))),
    )?;

    // Nothing received means the session never reported, which only
    // happens if the window died early; treat as not authenticated
    Ok(rx.try_recv().unwrap_or(false))
}

struct GateApp {
    controller: GateController,
    store: UserStore,
    outcome: Sender<bool>,
    reported: bool,
}

impl GateApp {
    fn new(store: UserStore, outcome: Sender<bool>) -> Self {
        Self {
            controller: GateController::new(),
            store,
            outcome,
            reported: false,
        }
    }

    /// Drain this frame's input events into the controller
    fn dispatch_input(&mut self, ctx: &egui::Context, now: Instant) {
        let events = ctx.input(|i| i.events.clone());
        for event in &events {
            match event {
                // Text arrives as whole strings; the widgets consume characters
                egui::Event::Text(text) => {
                    for c in text.chars() {
                        self.controller.handle_event(
                            &InputEvent::Key(KeyInput::Char(c)),
                            &self.store,
                            now,
                        );
                    }
                }
                _ => {
                    if let Some(ev) = translate(event) {
                        self.controller.handle_event(&ev, &self.store, now);
                    }
                }
            }
        }

        if ctx.input(|i| i.viewport().close_requested()) {
            self.controller
                .handle_event(&InputEvent::CloseRequested, &self.store, now);
        }
    }

    fn draw(&self, ctx: &egui::Context, now: Instant) {
        let frame = egui::Frame::none().fill(to_color32(widget::BACKGROUND));
        egui::CentralPanel::default().frame(frame).show(ctx, |ui| {
            let painter = ui.painter();
            let font = egui::FontId::proportional(24.0);
            let small = egui::FontId::proportional(18.0);

            painter.text(
                egui::pos2(SCREEN_WIDTH / 2.0, 100.0),
                egui::Align2::CENTER_TOP,
                WINDOW_TITLE,
                egui::FontId::proportional(32.0),
                to_color32(widget::TEXT),
            );

            draw_input(painter, &self.controller.username, &font);
            draw_input(painter, &self.controller.password, &font);
            draw_button(painter, &self.controller.login, &font);
            draw_button(painter, &self.controller.register, &font);

            let state = &self.controller.state;
            if !state.message.is_empty() {
                painter.text(
                    egui::pos2(SCREEN_WIDTH / 2.0, 340.0),
                    egui::Align2::CENTER_TOP,
                    &state.message,
                    small.clone(),
                    to_color32(state.message_color),
                );
            }

            // Remaining whole seconds shown while the countdown runs
            if self.controller.phase() == Phase::ClosingCountdown {
                if let Some(remaining) = self.controller.remaining_secs(now) {
                    if remaining > 0 {
                        painter.text(
                            egui::pos2(SCREEN_WIDTH / 2.0, 450.0),
                            egui::Align2::CENTER_TOP,
                            format!("window closes in {} s", remaining),
                            small,
                            to_color32(widget::TEXT),
                        );
                    }
                }
            }
        });
    }
}

impl eframe::App for GateApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();

        self.dispatch_input(ctx, now);

        let pointer = ctx
            .input(|i| i.pointer.hover_pos())
            .map(|p| Point::new(p.x, p.y));
        self.controller.tick(now, pointer);

        if self.controller.is_terminated() && !self.reported {
            self.reported = true;
            let _ = self.outcome.send(self.controller.terminal_success());
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }

        self.draw(ctx, now);
        ctx.request_repaint_after(FRAME_INTERVAL);
    }
}

/// Map an egui event onto the widget event type, where one applies
fn translate(event: &egui::Event) -> Option<InputEvent> {
    match event {
        egui::Event::PointerButton {
            pos,
            button,
            pressed: true,
            ..
        } => Some(InputEvent::PointerPressed {
            pos: Point::new(pos.x, pos.y),
            button: match button {
                egui::PointerButton::Primary => PointerButton::Primary,
                _ => PointerButton::Secondary,
            },
        }),
        egui::Event::Key {
            key: egui::Key::Enter,
            pressed: true,
            ..
        } => Some(InputEvent::Key(KeyInput::Enter)),
        egui::Event::Key {
            key: egui::Key::Backspace,
            pressed: true,
            ..
        } => Some(InputEvent::Key(KeyInput::Backspace)),
        _ => None,
    }
}

fn to_color32(c: Color) -> egui::Color32 {
    egui::Color32::from_rgb(c.r, c.g, c.b)
}

fn to_rect(r: widget::Rect) -> egui::Rect {
    egui::Rect::from_min_size(egui::pos2(r.x, r.y), egui::vec2(r.w, r.h))
}

/// Rendering is a pure read of widget state
fn draw_input(painter: &egui::Painter, input: &TextInput, font: &egui::FontId) {
    let rect = to_rect(input.bounds);
    painter.rect_filled(rect, egui::Rounding::same(5.0), to_color32(widget::INPUT_BG));
    painter.rect_stroke(
        rect,
        egui::Rounding::same(5.0),
        egui::Stroke::new(2.0, to_color32(input.border)),
    );

    let anchor = rect.left_top() + egui::vec2(10.0, 10.0);
    if input.shows_placeholder() {
        painter.text(
            anchor,
            egui::Align2::LEFT_TOP,
            &input.placeholder,
            font.clone(),
            to_color32(widget::PLACEHOLDER),
        );
    } else {
        painter.text(
            anchor,
            egui::Align2::LEFT_TOP,
            input.display_text(),
            font.clone(),
            to_color32(widget::TEXT),
        );
    }
}

fn draw_button(painter: &egui::Painter, button: &Button, font: &egui::FontId) {
    let rect = to_rect(button.bounds);
    let fill = if button.hovered {
        widget::BUTTON_HOVER
    } else {
        widget::BUTTON
    };
    painter.rect_filled(rect, egui::Rounding::same(8.0), to_color32(fill));
    painter.text(
        rect.center(),
        egui::Align2::CENTER_CENTER,
        &button.label,
        font.clone(),
        to_color32(widget::BUTTON_TEXT),
    );
}
