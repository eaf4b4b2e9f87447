//! Frame rendering for the interactive display.
//!
//! The whole frame is painted in one `terminal.draw` pass per cycle, so a
//! refresh never shows a partially updated table.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::Paragraph;

use crate::fmt;

use super::state::AppState;

/// Renders the summary block, highlighted header and as many cache rows as
/// the tracked geometry allows.
pub fn render(frame: &mut Frame, state: &AppState) {
    let chunks = Layout::vertical([
        Constraint::Length(6), // 5 summary lines + separator / truncation notice
        Constraint::Length(1), // header
        Constraint::Min(0),    // cache rows
    ])
    .split(frame.area());

    let mut summary: Vec<Line> = fmt::summary_lines(&state.summary)
        .into_iter()
        .map(Line::from)
        .collect();
    if state.nodes.truncated() {
        summary.push(Line::styled(
            format!(" (showing first {} caches)", state.nodes.live()),
            Style::default().fg(Color::Yellow),
        ));
    }
    frame.render_widget(Paragraph::new(summary), chunks[0]);

    let header = Paragraph::new(fmt::header_line())
        .style(Style::default().add_modifier(Modifier::REVERSED));
    frame.render_widget(header, chunks[1]);

    let visible = state.geometry.available_rows().min(state.nodes.live());
    let rows: Vec<Line> = state.nodes.caches()[..visible]
        .iter()
        .map(|c| Line::from(fmt::cache_line(c)))
        .collect();
    frame.render_widget(Paragraph::new(rows), chunks[2]);
}
