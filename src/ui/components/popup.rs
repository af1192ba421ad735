use tui::{
    backend::Backend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::Spans,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// A blocking message shown over the current screen until any key is pressed.
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub title: String,
    pub message: String,
    pub is_error: bool,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            title: "Done".to_string(),
            message: message.into(),
            is_error: false,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            title: "Error".to_string(),
            message: message.into(),
            is_error: true,
        }
    }
}

pub fn render_notice<B: Backend>(frame: &mut Frame<B>, notice: &Notice) {
    let border = if notice.is_error { Color::Red } else { Color::Green };

    let popup = Paragraph::new(vec![
        Spans::from(""),
        Spans::from(notice.message.as_str()),
        Spans::from(""),
        Spans::from("Press any key"),
    ])
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true })
    .block(
        Block::default()
            .title(notice.title.as_str())
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border)),
    )
    .style(Style::default().fg(Color::White).bg(Color::Black));

    let area = centered_rect(50, 25, frame.size());
    frame.render_widget(Clear, area);
    frame.render_widget(popup, area);
}

pub fn render_confirmation<B: Backend>(frame: &mut Frame<B>, question: &str) {
    let popup = Paragraph::new(vec![
        Spans::from(""),
        Spans::from(question),
        Spans::from(""),
        Spans::from("<Y> Yes  <N> No"),
    ])
    .alignment(Alignment::Center)
    .block(Block::default().title("Confirm Delete").borders(Borders::ALL))
    .style(Style::default().fg(Color::White).bg(Color::Black));

    let area = centered_rect(50, 20, frame.size());
    frame.render_widget(Clear, area);
    frame.render_widget(popup, area);
}

// Carves a box of the given width and height percentages out of the middle of `r`.
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
