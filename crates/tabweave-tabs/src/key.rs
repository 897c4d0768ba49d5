//! Keyboard handling for the tab list

/// Keys the tab list reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    ArrowLeft,
    ArrowUp,
    ArrowRight,
    ArrowDown,
    Home,
    End,
    Escape,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Previous,
    Next,
}

/// What a key press asks the tab list to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    /// Move focus into the tab's panel
    FocusPanel,
    /// Move focus one tab over, or to the first/last tab when `complete`
    Move { direction: Direction, complete: bool },
    /// Drop focus from the tab list
    Blur,
}

impl Key {
    /// From a legacy `keyCode`/`which` value
    pub fn from_code(code: u32) -> Self {
        match code {
            13 => Key::Enter,
            27 => Key::Escape,
            35 => Key::End,
            36 => Key::Home,
            37 => Key::ArrowLeft,
            38 => Key::ArrowUp,
            39 => Key::ArrowRight,
            40 => Key::ArrowDown,
            _ => Key::Other,
        }
    }

    /// From a `KeyboardEvent.key` name, including the old IE/Edge spellings
    pub fn from_name(name: &str) -> Self {
        match name {
            "Enter" | "Return" => Key::Enter,
            "Escape" | "Esc" => Key::Escape,
            "End" => Key::End,
            "Home" => Key::Home,
            "ArrowLeft" | "Left" => Key::ArrowLeft,
            "ArrowUp" | "Up" => Key::ArrowUp,
            "ArrowRight" | "Right" => Key::ArrowRight,
            "ArrowDown" | "Down" => Key::ArrowDown,
            _ => Key::Other,
        }
    }

    pub fn command(self) -> Option<KeyCommand> {
        let step = |direction| KeyCommand::Move {
            direction,
            complete: false,
        };
        match self {
            Key::Enter => Some(KeyCommand::FocusPanel),
            Key::ArrowLeft | Key::ArrowUp => Some(step(Direction::Previous)),
            Key::ArrowRight | Key::ArrowDown => Some(step(Direction::Next)),
            Key::Home => Some(KeyCommand::Move {
                direction: Direction::Previous,
                complete: true,
            }),
            Key::End => Some(KeyCommand::Move {
                direction: Direction::Next,
                complete: true,
            }),
            Key::Escape => Some(KeyCommand::Blur),
            Key::Other => None,
        }
    }
}
