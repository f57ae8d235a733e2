pub mod enums;
pub mod format;
pub mod task;

pub use enums::{TaskColor, UiMode};
pub use format::{adjustment_label, format_time, QUICK_ADJUSTMENTS};
pub use task::{Task, TaskView};
