use crossterm::event::KeyCode;
use tui::{
    backend::Backend,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Span, Spans},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

/// Applies a key press to the text of the field being edited.
pub fn edit_text(value: &mut String, key: KeyCode) {
    match key {
        KeyCode::Char(c) => value.push(c),
        KeyCode::Backspace => {
            value.pop();
        }
        _ => {}
    }
}

/// Renders a labelled field list, highlighting the current field and
/// showing a cursor on it while it is being edited.
#[allow(clippy::too_many_arguments)]
pub fn render_fields<B: Backend>(
    f: &mut Frame<B>,
    area: Rect,
    title: &str,
    names: &[&str],
    values: &[String],
    current: usize,
    editing: bool,
    focused: bool,
) {
    let items: Vec<ListItem> = names
        .iter()
        .zip(values.iter())
        .enumerate()
        .map(|(i, (name, value))| {
            let is_current = focused && i == current;
            let content = if is_current && editing {
                Spans::from(vec![
                    Span::styled(format!("{}: ", name), Style::default().fg(Color::Yellow)),
                    Span::styled(
                        format!("{}|", value),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                ])
            } else {
                let style = if is_current {
                    Style::default().fg(Color::Yellow)
                } else {
                    Style::default()
                };

                Spans::from(vec![
                    Span::styled(format!("{}: ", name), style),
                    Span::raw(value.clone()),
                ])
            };

            ListItem::new(content)
        })
        .collect();

    let border_style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };

    let form_list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(title.to_string()),
    );

    f.render_widget(form_list, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edits_text_with_chars_and_backspace() {
        let mut value = String::from("Ad");

        edit_text(&mut value, KeyCode::Char('a'));
        assert_eq!(value, "Ada");

        edit_text(&mut value, KeyCode::Backspace);
        edit_text(&mut value, KeyCode::Left);
        assert_eq!(value, "Ad");
    }
}
