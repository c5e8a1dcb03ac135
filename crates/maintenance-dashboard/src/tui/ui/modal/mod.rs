/*
[INPUT]:  Modal state, fields, and key events
[OUTPUT]: Modal rendering output and modal action results
[POS]:    TUI UI modal module root
[UPDATE]: When adding modal field kinds or forms
[UPDATE]: 2026-10-09 Show the text cursor in the focused input
*/

mod create_machine;
mod create_task;

pub(in crate::tui) use create_machine::CreateMachineModal;
pub(in crate::tui) use create_task::CreateTaskModal;

use crossterm::event::KeyCode;
use ratatui::layout::{Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::tui::runtime::border_style;

pub(in crate::tui) struct Modal {
    pub(super) title: String,
    pub(super) focus_index: usize,
    pub(super) fields: Vec<Field>,
    pub(super) hint: Option<String>,
}

pub(in crate::tui) enum Field {
    TextInput { label: String, value: String },
    Button { label: String, action: ModalAction },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(in crate::tui) enum ModalAction {
    Submit,
    Cancel,
    None,
}

pub(in crate::tui) fn draw_modal(frame: &mut ratatui::Frame, area: Rect, modal: &Modal) {
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style())
        .title(modal.title.as_str());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut cursor = None;
    let mut lines: Vec<Line> = Vec::with_capacity(modal.fields.len() + 2);
    for (index, field) in modal.fields.iter().enumerate() {
        let focused = index == modal.focus_index;
        let content = match field {
            Field::TextInput { label, value } => {
                let prefix = format!("{label}: ");
                if focused {
                    let x = inner.x + (prefix.width() + value.width()) as u16;
                    let x = x.min(inner.right().saturating_sub(1));
                    cursor = Some(Position::new(x, inner.y + index as u16));
                }
                format!("{prefix}{value}")
            }
            Field::Button { label, .. } => format!("[{label}]"),
        };
        let style = if focused {
            Style::default().add_modifier(Modifier::REVERSED)
        } else {
            Style::default()
        };
        lines.push(Line::from(Span::styled(content, style)));
    }

    if let Some(hint) = &modal.hint {
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            hint.as_str(),
            Style::default().fg(Color::DarkGray),
        )));
    }

    frame.render_widget(Paragraph::new(lines), inner);
    if let Some(position) = cursor {
        frame.set_cursor_position(position);
    }
}

pub(in crate::tui) fn handle_modal_key(modal: &mut Modal, key: KeyCode) -> ModalAction {
    match key {
        KeyCode::Esc => ModalAction::Cancel,
        KeyCode::Tab | KeyCode::Down => {
            if !modal.fields.is_empty() {
                modal.focus_index = (modal.focus_index + 1) % modal.fields.len();
            }
            ModalAction::None
        }
        KeyCode::BackTab | KeyCode::Up => {
            if !modal.fields.is_empty() {
                modal.focus_index =
                    (modal.focus_index + modal.fields.len() - 1) % modal.fields.len();
            }
            ModalAction::None
        }
        KeyCode::Backspace => {
            if let Some(Field::TextInput { value, .. }) = modal.fields.get_mut(modal.focus_index) {
                value.pop();
            }
            ModalAction::None
        }
        KeyCode::Char(ch) => {
            if let Some(Field::TextInput { value, .. }) = modal.fields.get_mut(modal.focus_index) {
                value.push(ch);
            }
            ModalAction::None
        }
        KeyCode::Enter => match modal.fields.get(modal.focus_index) {
            Some(Field::Button { action, .. }) => *action,
            // Enter in a text field advances to the next field
            Some(Field::TextInput { .. }) => {
                modal.focus_index = (modal.focus_index + 1) % modal.fields.len();
                ModalAction::None
            }
            None => ModalAction::None,
        },
        _ => ModalAction::None,
    }
}

/// Text value of the field at `index`, empty when it is not a text input
pub(super) fn text_at(modal: &Modal, index: usize) -> String {
    match modal.fields.get(index) {
        Some(Field::TextInput { value, .. }) => value.clone(),
        _ => String::new(),
    }
}

pub(super) fn text_input(label: &str, value: &str) -> Field {
    Field::TextInput {
        label: label.to_string(),
        value: value.to_string(),
    }
}

pub(super) fn form_buttons() -> [Field; 2] {
    [
        Field::Button {
            label: String::from("Create"),
            action: ModalAction::Submit,
        },
        Field::Button {
            label: String::from("Cancel"),
            action: ModalAction::Cancel,
        },
    ]
}
