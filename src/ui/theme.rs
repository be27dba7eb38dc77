use ratatui::style::{Color, Style};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Theme {
    pub text: Style,
}

impl Default for Theme {
    /// Green on the terminal's own background.
    fn default() -> Self {
        Theme {
            text: Style::default().fg(Color::Green),
        }
    }
}
