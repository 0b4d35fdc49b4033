// The credential-gate state machine
// Owns the widgets, routes events to them, drives message and countdown
// state from auth results, and decides when the window should close

use std::time::{Duration, Instant};

use store::{AuthResult, CredentialStore};

use crate::widget::{self, Button, Color, InputEvent, Point, Rect, TextInput};

/// Window size, shared with the frontend
pub const SCREEN_WIDTH: f32 = 800.0;
pub const SCREEN_HEIGHT: f32 = 600.0;

/// Grace period the success message stays on screen before the window closes
pub const CLOSE_GRACE: Duration = Duration::from_secs(10);

/// Where the session currently is
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Collecting input, nothing on screen yet
    Editing,
    /// A store call is in flight
    /// The call is synchronous, so this is never observed across frames
    AwaitingResult,
    /// A failed attempt's message is on screen; input continues as in Editing
    ShowingMessage,
    /// The latest result succeeded; the window closes once the deadline passes
    ClosingCountdown,
    /// Absorbing; no further events are processed
    Terminated,
}

/// Message, countdown and outcome state, read by the render step
#[derive(Clone, Debug)]
pub struct GateState {
    pub message: String,
    pub message_color: Color,
    pub close_deadline: Option<Instant>,
    pub terminal_success: bool,
    last_succeeded: Option<bool>,
}

impl GateState {
    fn new() -> Self {
        Self {
            message: String::new(),
            message_color: widget::TEXT,
            close_deadline: None,
            terminal_success: false,
            last_succeeded: None,
        }
    }
}

/// Which store operation a submit intent maps to
enum Request {
    Login,
    Register,
}

/// Holds the widgets and session state for one gate window
pub struct GateController {
    pub username: TextInput,
    pub password: TextInput,
    pub login: Button,
    pub register: Button,
    pub state: GateState,
    phase: Phase,
}

impl GateController {
    /// Lay out the widgets in a centered column
    pub fn new() -> Self {
        let centre = SCREEN_WIDTH / 2.0;
        Self {
            username: TextInput::new(Rect::new(centre - 150.0, 200.0, 300.0, 50.0), "Username", false),
            password: TextInput::new(Rect::new(centre - 150.0, 280.0, 300.0, 50.0), "Password", true),
            login: Button::new(Rect::new(centre - 160.0, 380.0, 150.0, 50.0), "Log In"),
            register: Button::new(Rect::new(centre + 10.0, 380.0, 150.0, 50.0), "Register"),
            state: GateState::new(),
            phase: Phase::Editing,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_terminated(&self) -> bool {
        self.phase == Phase::Terminated
    }

    pub fn terminal_success(&self) -> bool {
        self.state.terminal_success
    }

    /// Route one event through the widgets, invoking the store on a submit
    /// intent (Enter on the password field, or an activated button)
    pub fn handle_event(&mut self, event: &InputEvent, store: &dyn CredentialStore, now: Instant) {
        if self.phase == Phase::Terminated {
            return;
        }

        if let InputEvent::CloseRequested = event {
            tracing::info!("window close requested");
            self.terminate();
            return;
        }

        self.username.handle_event(event);
        if self.password.handle_event(event) {
            tracing::info!(username = %self.username.text, "submit from password field");
            self.submit(Request::Login, store, now);
        }

        if self.login.handle_event(event) {
            tracing::info!(username = %self.username.text, "login button pressed");
            self.submit(Request::Login, store, now);
        }
        if self.register.handle_event(event) {
            tracing::info!(username = %self.username.text, "register button pressed");
            self.submit(Request::Register, store, now);
        }
    }

    /// Per-frame upkeep: hover state, and the countdown check
    /// Driven by wall-clock deadlines so it is robust to frame-rate variation
    pub fn tick(&mut self, now: Instant, pointer: Option<Point>) {
        if self.phase == Phase::Terminated {
            return;
        }

        self.login.check_hover(pointer);
        self.register.check_hover(pointer);

        if let Some(deadline) = self.state.close_deadline {
            if now >= deadline {
                tracing::info!("grace period elapsed, closing window");
                self.terminate();
            }
        }
    }

    /// Whole seconds left on the countdown, None when no deadline is armed
    pub fn remaining_secs(&self, now: Instant) -> Option<u64> {
        self.state
            .close_deadline
            .map(|d| d.saturating_duration_since(now).as_secs())
    }

    fn submit(&mut self, request: Request, store: &dyn CredentialStore, now: Instant) {
        self.phase = Phase::AwaitingResult;
        let result = match request {
            Request::Login => store.try_login(&self.username.text, &self.password.text),
            Request::Register => store.try_register(&self.username.text, &self.password.text),
        };
        self.apply_result(&result, now);
    }

    /// Update message and countdown state from a fresh result
    fn apply_result(&mut self, result: &AuthResult, now: Instant) {
        self.state.message = result.message.clone();
        self.state.message_color = if result.succeeded {
            widget::SUCCESS
        } else {
            widget::ERROR
        };
        self.state.last_succeeded = Some(result.succeeded);
        self.phase = Phase::ShowingMessage;

        if result.succeeded {
            // A fresh success re-arms the deadline; it only ever moves forward
            self.state.close_deadline = Some(now + CLOSE_GRACE);
            self.phase = Phase::ClosingCountdown;
        } else {
            // The deadline is live only while the latest result is a success
            self.state.close_deadline = None;
        }
    }

    fn terminate(&mut self) {
        self.state.terminal_success = self.state.last_succeeded.unwrap_or(false);
        self.phase = Phase::Terminated;
        tracing::info!(
            authenticated = self.state.terminal_success,
            "gate session ended"
        );
    }
}

impl Default for GateController {
    fn default() -> Self {
        Self::new()
    }
}
