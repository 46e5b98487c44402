use ratatui::layout::{Constraint, Direction, Flex, Layout, Rect};

/// History screen: record list (left), selected record (right), status bar (bottom)
pub struct HistoryLayout {
    pub list_area: Rect,
    pub detail_area: Rect,
    pub status_area: Rect,
}

impl HistoryLayout {
    pub fn new(area: Rect) -> Self {
        let vertical_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(3),    // Main area (at least 3 rows)
                Constraint::Length(1), // Status bar (1 row)
            ])
            .split(area);

        let horizontal_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(45), // Record list
                Constraint::Percentage(55), // Selected record
            ])
            .split(vertical_chunks[0]);

        Self {
            list_area: horizontal_chunks[0],
            detail_area: horizontal_chunks[1],
            status_area: vertical_chunks[1],
        }
    }
}

/// Chat screen: transcript, optional quick questions, input line, status bar
pub struct ChatLayout {
    pub transcript_area: Rect,
    pub suggestions_area: Option<Rect>,
    pub input_area: Rect,
    pub status_area: Rect,
}

impl ChatLayout {
    pub fn new(area: Rect, suggestion_count: usize) -> Self {
        // Heading line plus one row per question, plus borders
        let suggestions_height = if suggestion_count > 0 { suggestion_count as u16 + 3 } else { 0 };

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(3),
                Constraint::Length(suggestions_height),
                Constraint::Length(3), // Input box with borders
                Constraint::Length(1),
            ])
            .split(area);

        Self {
            transcript_area: chunks[0],
            suggestions_area: (suggestions_height > 0).then_some(chunks[1]),
            input_area: chunks[2],
            status_area: chunks[3],
        }
    }
}

/// Centered popup of the given size, clipped to `area`
pub fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height.min(area.height))])
        .flex(Flex::Center)
        .areas(area);
    let [popup] = Layout::horizontal([Constraint::Length(width.min(area.width))])
        .flex(Flex::Center)
        .areas(row);
    popup
}
