use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Main layout structure
pub struct MainLayout {
    pub keybindings_area: Rect,
    pub total_area: Rect,
    pub list_area: Rect,
    pub adjust_area: Option<Rect>,
}

/// Create the main layout
/// - Top bar: keybindings (1 row)
/// - Total: aggregate timer (3 rows)
/// - Main area: task list, with the quick-adjust panel below it when open
pub fn create_layout(area: Rect, show_adjust: bool) -> MainLayout {
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Keybindings bar
            Constraint::Length(3), // Total timer
            Constraint::Min(0),    // Tasks
        ])
        .split(area);

    let (list_area, adjust_area) = if show_adjust {
        let split = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(4)])
            .split(main_chunks[2]);
        (split[0], Some(split[1]))
    } else {
        (main_chunks[2], None)
    };

    MainLayout {
        keybindings_area: main_chunks[0],
        total_area: main_chunks[1],
        list_area,
        adjust_area,
    }
}

/// Create a centered modal area (for the task input form)
pub fn create_modal_area(area: Rect) -> Rect {
    let vertical_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(30),
            Constraint::Length(9),
            Constraint::Percentage(30),
        ])
        .split(area);

    let horizontal_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(20),
            Constraint::Percentage(60),
            Constraint::Percentage(20),
        ])
        .split(vertical_chunks[1]);

    horizontal_chunks[1]
}
