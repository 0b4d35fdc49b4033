// Widgets making up the gate window, driven by discrete input events
// Kept free of the GUI toolkit so their behaviour can be tested directly

/// RGB colour as used by widget and message state
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

// Window palette
pub const BACKGROUND: Color = Color::new(230, 240, 255);
pub const INPUT_BG: Color = Color::new(255, 255, 255);
pub const INPUT_BORDER: Color = Color::new(200, 200, 200);
pub const INPUT_BORDER_ACTIVE: Color = Color::new(70, 130, 180);
pub const BUTTON: Color = Color::new(70, 130, 180);
pub const BUTTON_HOVER: Color = Color::new(100, 149, 237);
pub const BUTTON_TEXT: Color = Color::new(255, 255, 255);
pub const PLACEHOLDER: Color = Color::new(150, 150, 150);
pub const TEXT: Color = Color::new(25, 25, 112);
pub const ERROR: Color = Color::new(220, 20, 60);
pub const SUCCESS: Color = Color::new(50, 205, 50);

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle, position plus size
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x < self.x + self.w && p.y >= self.y && p.y < self.y + self.h
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyInput {
    Enter,
    Backspace,
    Char(char),
}

/// A discrete event from the windowing boundary
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    PointerPressed { pos: Point, button: PointerButton },
    Key(KeyInput),
    CloseRequested,
}

/// Single-line text entry field
/// When masked, the rendered surface never contains the raw characters
#[derive(Clone, Debug)]
pub struct TextInput {
    pub bounds: Rect,
    pub text: String,
    pub placeholder: String,
    pub masked: bool,
    pub focused: bool,
    pub border: Color,
}

impl TextInput {
    pub fn new(bounds: Rect, placeholder: &str, masked: bool) -> Self {
        Self {
            bounds,
            text: String::new(),
            placeholder: String::from(placeholder),
            masked,
            focused: false,
            border: INPUT_BORDER,
        }
    }

    /// Feed one event into the field, returning true on a submit intent
    /// A pointer press focuses the field iff it lands inside the bounds,
    /// so clicking elsewhere defocuses
    pub fn handle_event(&mut self, event: &InputEvent) -> bool {
        match event {
            InputEvent::PointerPressed { pos, .. } => {
                self.focused = self.bounds.contains(*pos);
                self.border = if self.focused {
                    INPUT_BORDER_ACTIVE
                } else {
                    INPUT_BORDER
                };
            }
            InputEvent::Key(key) if self.focused => match key {
                // Enter signals submission without touching the text
                KeyInput::Enter => return true,
                // Backspace on an empty field is a no-op
                KeyInput::Backspace => {
                    self.text.pop();
                }
                KeyInput::Char(c) if !c.is_control() => self.text.push(*c),
                KeyInput::Char(_) => (),
            },
            _ => (),
        }
        false
    }

    /// Text as it should appear on screen, one substitute glyph per
    /// character when masked
    pub fn display_text(&self) -> String {
        if self.masked {
            "*".repeat(self.text.chars().count())
        } else {
            self.text.clone()
        }
    }

    /// The placeholder is shown while the field is empty and unfocused
    pub fn shows_placeholder(&self) -> bool {
        self.text.is_empty() && !self.focused
    }
}

/// Clickable button
#[derive(Clone, Debug)]
pub struct Button {
    pub bounds: Rect,
    pub label: String,
    pub hovered: bool,
}

impl Button {
    pub fn new(bounds: Rect, label: &str) -> Self {
        Self {
            bounds,
            label: String::from(label),
            hovered: false,
        }
    }

    /// Recompute hover from the pointer position
    /// Called once per frame before drawing, so the hover colour is current
    pub fn check_hover(&mut self, pos: Option<Point>) -> bool {
        self.hovered = pos.is_some_and(|p| self.bounds.contains(p));
        self.hovered
    }

    /// True iff a primary press lands while the button is hovered
    /// This is the button's only way of signalling activation
    pub fn handle_event(&self, event: &InputEvent) -> bool {
        matches!(
            event,
            InputEvent::PointerPressed {
                button: PointerButton::Primary,
                ..
            }
        ) && self.hovered
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> TextInput {
        TextInput::new(Rect::new(100.0, 100.0, 300.0, 50.0), "Username", false)
    }

    fn press(x: f32, y: f32) -> InputEvent {
        InputEvent::PointerPressed {
            pos: Point::new(x, y),
            button: PointerButton::Primary,
        }
    }

    #[test]
    fn click_inside_focuses() {
        let mut field = input();
        field.handle_event(&press(150.0, 120.0));
        assert!(field.focused);
        assert_eq!(field.border, INPUT_BORDER_ACTIVE);
    }

    #[test]
    fn click_outside_defocuses() {
        let mut field = input();
        field.handle_event(&press(150.0, 120.0));
        field.handle_event(&press(10.0, 10.0));
        assert!(!field.focused);
        assert_eq!(field.border, INPUT_BORDER);
    }

    #[test]
    fn append_and_backspace_track_length() {
        let mut field = input();
        field.handle_event(&press(150.0, 120.0));
        for c in "alice".chars() {
            field.handle_event(&InputEvent::Key(KeyInput::Char(c)));
        }
        assert_eq!(field.text, "alice");

        field.handle_event(&InputEvent::Key(KeyInput::Backspace));
        field.handle_event(&InputEvent::Key(KeyInput::Backspace));
        assert_eq!(field.text, "ali");
    }

    #[test]
    fn backspace_on_empty_is_noop() {
        let mut field = input();
        field.handle_event(&press(150.0, 120.0));
        field.handle_event(&InputEvent::Key(KeyInput::Backspace));
        assert_eq!(field.text, "");
    }

    #[test]
    fn keys_ignored_while_unfocused() {
        let mut field = input();
        field.handle_event(&InputEvent::Key(KeyInput::Char('a')));
        assert_eq!(field.text, "");
        assert!(!field.handle_event(&InputEvent::Key(KeyInput::Enter)));
    }

    #[test]
    fn enter_signals_submit_without_mutating() {
        let mut field = input();
        field.handle_event(&press(150.0, 120.0));
        field.handle_event(&InputEvent::Key(KeyInput::Char('a')));
        assert!(field.handle_event(&InputEvent::Key(KeyInput::Enter)));
        assert_eq!(field.text, "a");
    }

    #[test]
    fn masked_display_hides_characters() {
        let mut field = TextInput::new(Rect::new(0.0, 0.0, 100.0, 20.0), "Password", true);
        field.handle_event(&press(10.0, 10.0));
        for c in "secret".chars() {
            field.handle_event(&InputEvent::Key(KeyInput::Char(c)));
        }
        assert_eq!(field.display_text(), "******");
        assert!(!field.display_text().contains("secret"));
    }

    #[test]
    fn masked_glyph_count_matches_length() {
        let mut field = TextInput::new(Rect::new(0.0, 0.0, 100.0, 20.0), "Password", true);
        field.handle_event(&press(10.0, 10.0));
        for (i, c) in "hunter2".chars().enumerate() {
            field.handle_event(&InputEvent::Key(KeyInput::Char(c)));
            assert_eq!(field.display_text().chars().count(), i + 1);
        }
    }

    #[test]
    fn placeholder_shown_only_while_empty_and_unfocused() {
        let mut field = input();
        assert!(field.shows_placeholder());
        field.handle_event(&press(150.0, 120.0));
        assert!(!field.shows_placeholder());
        field.handle_event(&press(10.0, 10.0));
        assert!(field.shows_placeholder());
        field.handle_event(&press(150.0, 120.0));
        field.handle_event(&InputEvent::Key(KeyInput::Char('a')));
        field.handle_event(&press(10.0, 10.0));
        assert!(!field.shows_placeholder());
    }

    #[test]
    fn button_hover_follows_pointer() {
        let mut button = Button::new(Rect::new(0.0, 0.0, 150.0, 50.0), "Log In");
        assert!(button.check_hover(Some(Point::new(10.0, 10.0))));
        assert!(!button.check_hover(Some(Point::new(200.0, 10.0))));
        assert!(!button.check_hover(None));
    }

    #[test]
    fn button_activates_only_while_hovered() {
        let mut button = Button::new(Rect::new(0.0, 0.0, 150.0, 50.0), "Log In");
        assert!(!button.handle_event(&press(10.0, 10.0)));
        button.check_hover(Some(Point::new(10.0, 10.0)));
        assert!(button.handle_event(&press(10.0, 10.0)));
    }

    #[test]
    fn button_ignores_secondary_press() {
        let mut button = Button::new(Rect::new(0.0, 0.0, 150.0, 50.0), "Log In");
        button.check_hover(Some(Point::new(10.0, 10.0)));
        let event = InputEvent::PointerPressed {
            pos: Point::new(10.0, 10.0),
            button: PointerButton::Secondary,
        };
        assert!(!button.handle_event(&event));
    }
}
