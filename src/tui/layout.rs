//! Layout definitions for the TUI
//!
//! Defines the overall layout structure: sidebar, main panel, status bar.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Layout regions for the TUI
pub struct AppLayout {
    /// Sidebar area (tenant, view switcher, session)
    pub sidebar: Rect,
    /// Main content area
    pub main: Rect,
    /// Status bar at the bottom
    pub status_bar: Rect,
}

impl AppLayout {
    /// Calculate layout from available area
    pub fn new(area: Rect) -> Self {
        let vertical = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(3),    // Main area
                Constraint::Length(1), // Status bar
            ])
            .split(area);

        let horizontal = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(26), // Sidebar (fixed width)
                Constraint::Min(40),    // Main content
            ])
            .split(vertical[0]);

        Self {
            sidebar: horizontal[0],
            main: horizontal[1],
            status_bar: vertical[1],
        }
    }
}

/// Layout for the sidebar
pub struct SidebarLayout {
    /// Tenant header
    pub header: Rect,
    /// View switcher area
    pub view_switcher: Rect,
    /// Logged-in user and period
    pub session: Rect,
}

impl SidebarLayout {
    pub fn new(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4), // Header
                Constraint::Min(7),    // Views
                Constraint::Length(5), // Session
            ])
            .split(area);

        Self {
            header: chunks[0],
            view_switcher: chunks[1],
            session: chunks[2],
        }
    }
}

/// Layout for a main panel with a one-line header box
pub struct MainPanelLayout {
    /// Header area (title, period, filters)
    pub header: Rect,
    /// Content area
    pub content: Rect,
}

impl MainPanelLayout {
    pub fn new(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(3),    // Content
            ])
            .split(area);

        Self {
            header: chunks[0],
            content: chunks[1],
        }
    }
}

/// Layout for the overview view
pub struct OverviewLayout {
    /// Row of KPI tiles
    pub kpis: Rect,
    /// Budget vs. actual chart
    pub chart: Option<Rect>,
    /// Category breakdown
    pub breakdown: Option<Rect>,
    /// Savings goal gauges
    pub goals: Option<Rect>,
}

impl OverviewLayout {
    /// Sections that are switched off take no space
    pub fn new(area: Rect, show_chart: bool, show_breakdown: bool, show_goals: bool) -> Self {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(5), Constraint::Min(0)])
            .split(area);

        let mut panels = Vec::new();
        if show_chart {
            panels.push(0);
        }
        if show_breakdown {
            panels.push(1);
        }
        if show_goals {
            panels.push(2);
        }

        let mut layout = Self {
            kpis: rows[0],
            chart: None,
            breakdown: None,
            goals: None,
        };
        if panels.is_empty() {
            return layout;
        }

        let constraints = vec![Constraint::Ratio(1, panels.len() as u32); panels.len()];
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(rows[1]);

        for (slot, panel) in panels.into_iter().enumerate() {
            match panel {
                0 => layout.chart = Some(chunks[slot]),
                1 => layout.breakdown = Some(chunks[slot]),
                _ => layout.goals = Some(chunks[slot]),
            }
        }
        layout
    }
}

/// Create a centered rect for dialogs
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// Create a fixed-size centered rect for dialogs
pub fn centered_rect_fixed(width: u16, height: u16, r: Rect) -> Rect {
    let x = r.x + (r.width.saturating_sub(width)) / 2;
    let y = r.y + (r.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(r.width), height.min(r.height))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overview_hides_disabled_sections() {
        let area = Rect::new(0, 0, 100, 40);
        let layout = OverviewLayout::new(area, true, false, true);
        assert!(layout.chart.is_some());
        assert!(layout.breakdown.is_none());
        assert!(layout.goals.is_some());
        assert_eq!(layout.kpis.height, 5);

        let bare = OverviewLayout::new(area, false, false, false);
        assert!(bare.chart.is_none() && bare.breakdown.is_none() && bare.goals.is_none());
    }

    #[test]
    fn test_centered_rect_fixed_clamps() {
        let rect = centered_rect_fixed(80, 30, Rect::new(0, 0, 40, 10));
        assert_eq!(rect, Rect::new(0, 0, 40, 10));
    }
}
