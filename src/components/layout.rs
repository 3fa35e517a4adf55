//! Layout calculations for the question bank screen

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Areas of the question bank screen
pub struct BankLayout {
    pub header: Rect,
    pub tabs: Rect,
    pub banner: Option<Rect>,
    pub stats: Rect,
    pub controls: Option<Rect>,
    pub bank_table: Rect,
    pub active_table: Rect,
    pub status: Rect,
    pub help: Rect,
}

/// Calculate centered popup area
pub fn centered_popup(area: Rect, width: u16, height: u16) -> Rect {
    let popup_x = area.x + (area.width.saturating_sub(width)) / 2;
    let popup_y = area.y + (area.height.saturating_sub(height)) / 2;

    Rect::new(
        popup_x,
        popup_y,
        width.min(area.width),
        height.min(area.height),
    )
}

/// Calculate the bank screen layout
///
/// `show_banner` reserves the current-round line, `show_controls` the
/// select-all / activate row (hidden when the bank is empty).
pub fn calculate_bank_layout(area: Rect, show_banner: bool, show_controls: bool) -> BankLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(if show_banner { 1 } else { 0 }),
            Constraint::Length(3),
            Constraint::Length(if show_controls { 3 } else { 0 }),
            Constraint::Min(6),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(area);

    // Bank table above the active table
    let tables = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(chunks[5]);

    BankLayout {
        header: chunks[0],
        tabs: chunks[1],
        banner: show_banner.then_some(chunks[2]),
        stats: chunks[3],
        controls: show_controls.then_some(chunks[4]),
        bank_table: tables[0],
        active_table: tables[1],
        status: chunks[6],
        help: chunks[7],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_popup_fits_area() {
        let area = Rect::new(0, 0, 100, 40);
        let popup = centered_popup(area, 60, 10);
        assert_eq!(popup, Rect::new(20, 15, 60, 10));

        let small = centered_popup(Rect::new(0, 0, 30, 5), 60, 10);
        assert_eq!(small.width, 30);
        assert_eq!(small.height, 5);
    }

    #[test]
    fn test_optional_rows() {
        let area = Rect::new(0, 0, 120, 40);
        let full = calculate_bank_layout(area, true, true);
        assert!(full.banner.is_some());
        assert!(full.controls.is_some());

        let bare = calculate_bank_layout(area, false, false);
        assert!(bare.banner.is_none());
        assert!(bare.controls.is_none());
        assert!(bare.bank_table.height > full.bank_table.height);
        assert_eq!(bare.help.y, 39);
    }
}
