/// Palette tag attached to a task. Tasks store it as its raw index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskColor {
    Red,
    Amber,
    Emerald,
    Sky,
}

impl TaskColor {
    /// Map a raw color tag to a palette entry; anything outside 0..=3 shows as red
    pub fn from_index(index: u8) -> Self {
        match index {
            1 => Self::Amber,
            2 => Self::Emerald,
            3 => Self::Sky,
            _ => Self::Red,
        }
    }

    pub fn index(&self) -> u8 {
        match self {
            Self::Red => 0,
            Self::Amber => 1,
            Self::Emerald => 2,
            Self::Sky => 3,
        }
    }

    /// Next color in the picker, wrapping around
    pub fn next(&self) -> Self {
        Self::from_index((self.index() + 1) % 4)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Red => "red",
            Self::Amber => "amber",
            Self::Emerald => "emerald",
            Self::Sky => "sky",
        }
    }

    pub fn all() -> &'static [TaskColor] {
        &[Self::Red, Self::Amber, Self::Emerald, Self::Sky]
    }
}

impl Default for TaskColor {
    fn default() -> Self {
        Self::Red
    }
}

/// UI mode for the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiMode {
    Normal,
    AddingTask,
    RenamingTask,
    /// Quick-adjust panel open for the selected task
    Adjusting,
}

impl UiMode {
    /// True while a text field owns the keyboard
    pub fn has_text_focus(&self) -> bool {
        matches!(self, Self::AddingTask | Self::RenamingTask)
    }
}
