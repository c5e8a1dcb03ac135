/*
[INPUT]:  TaskDraft from dashboard state, selected machine name, key events
[OUTPUT]: Task form modal and the draft it edits
[POS]:    TUI UI modal - create task form
[UPDATE]: When task form fields change
*/

use crossterm::event::KeyCode;

use maintenance_dashboard::dashboard::TaskDraft;

use super::{Field, Modal, ModalAction, form_buttons, handle_modal_key, text_at, text_input};

pub(in crate::tui) struct CreateTaskModal {
    machine_name: String,
    draft: TaskDraft,
    focus_index: usize,
    pending: bool,
}

impl CreateTaskModal {
    pub(in crate::tui) fn new(machine_name: String, draft: TaskDraft) -> Self {
        Self {
            machine_name,
            draft,
            focus_index: 0,
            pending: false,
        }
    }

    pub(in crate::tui) fn to_modal(&self) -> Modal {
        let mut fields: Vec<Field> = vec![
            text_input("Title", &self.draft.title),
            text_input("Description", &self.draft.description),
            text_input("Due (YYYY-MM-DDTHH:MM)", &self.draft.due_date),
        ];
        fields.extend(form_buttons());

        Modal {
            title: format!("Add Task for {}", self.machine_name),
            focus_index: self.focus_index,
            fields,
            hint: Some(if self.pending {
                String::from("Creating...")
            } else {
                String::from("Title and due date are required. Due is local time.")
            }),
        }
    }

    pub(in crate::tui) fn handle_key(&mut self, key: KeyCode) -> ModalAction {
        let mut modal = self.to_modal();
        let action = handle_modal_key(&mut modal, key);
        self.apply_modal_state(&modal);
        action
    }

    pub(in crate::tui) fn draft(&self) -> &TaskDraft {
        &self.draft
    }

    pub(in crate::tui) fn is_pending(&self) -> bool {
        self.pending
    }

    pub(in crate::tui) fn set_pending(&mut self, pending: bool) {
        self.pending = pending;
    }

    fn apply_modal_state(&mut self, modal: &Modal) {
        self.focus_index = modal.focus_index;
        self.draft = TaskDraft {
            title: text_at(modal, 0),
            description: text_at(modal, 1),
            due_date: text_at(modal, 2),
        };
    }
}
