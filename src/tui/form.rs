use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

use iiccrc::panel::{slot_title, Panel, EMPTY_MARKER, RESULT_PLACEHOLDER};

const TITLE_WIDTH: u16 = 22;
const LABEL_WIDTH: u16 = 52;

fn label_style(label: &str) -> Style {
    if label.starts_with("Error") {
        Style::default().fg(Color::Red)
    } else if label == EMPTY_MARKER {
        Style::default().fg(Color::DarkGray)
    } else if label.len() > RESULT_PLACEHOLDER.len() {
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    }
}

pub fn render(frame: &mut Frame, area: Rect, panel: &Panel, focused: usize) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title("CRC Calculation Tool");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Length(1); panel.len()])
        .split(inner);

    for (i, (slot, row)) in panel.slots().iter().zip(rows.iter()).enumerate() {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(TITLE_WIDTH),
                Constraint::Min(10),
                Constraint::Length(LABEL_WIDTH),
            ])
            .split(*row);

        let title = Paragraph::new(slot_title(i)).alignment(Alignment::Right);
        frame.render_widget(title, cols[0]);

        let is_focused = i == focused;
        let text = if is_focused {
            format!(" {}_", slot.text)
        } else {
            format!(" {}", slot.text)
        };
        let input_style = if is_focused {
            Style::default().fg(Color::Cyan).bg(Color::DarkGray).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        frame.render_widget(Paragraph::new(text).style(input_style), cols[1]);

        let label = Paragraph::new(format!(" {}", slot.label)).style(label_style(&slot.label));
        frame.render_widget(label, cols[2]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_styles() {
        assert_eq!(label_style("Error: no"), Style::default().fg(Color::Red));
        assert_eq!(label_style("NULL"), Style::default().fg(Color::DarkGray));
        assert_eq!(label_style("CRC16: "), Style::default());
        assert_eq!(
            label_style("CRC16: BFD2"),
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
        );
    }
}
