use super::enums::TaskColor;
use serde::{Deserialize, Deserializer, Serialize};

/// A named, color-tagged task. Its elapsed time lives in the store's parallel
/// accumulator list, addressed by the same position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub name: String,
    /// Raw color tag as chosen or loaded; see [`Task::palette`]
    #[serde(default, deserialize_with = "lenient_color")]
    pub color: u8,
}

/// Accept any JSON value as a color tag; anything that is not an integer in
/// `0..=255` becomes 0 instead of failing the whole task list
fn lenient_color<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value
        .as_i64()
        .and_then(|raw| u8::try_from(raw).ok())
        .unwrap_or(0))
}

impl Task {
    /// Build a task from user input. Returns `None` when the name is blank.
    pub fn new(name: &str, color: u8) -> Option<Self> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        Some(Self {
            name: name.to_string(),
            color,
        })
    }

    pub fn palette(&self) -> TaskColor {
        TaskColor::from_index(self.color)
    }
}

/// Read-only row handed to the presentation layer
#[derive(Debug, Clone, PartialEq)]
pub struct TaskView {
    pub position: usize,
    pub name: String,
    pub color: TaskColor,
    pub elapsed: f64,
    pub active: bool,
}
