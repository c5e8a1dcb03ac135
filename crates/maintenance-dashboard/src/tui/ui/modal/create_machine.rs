/*
[INPUT]:  MachineDraft from dashboard state, key events
[OUTPUT]: Machine form modal and the draft it edits
[POS]:    TUI UI modal - create machine form
[UPDATE]: When machine form fields change
*/

use crossterm::event::KeyCode;

use maintenance_dashboard::dashboard::MachineDraft;

use super::{Field, Modal, ModalAction, form_buttons, handle_modal_key, text_at, text_input};

pub(in crate::tui) struct CreateMachineModal {
    draft: MachineDraft,
    focus_index: usize,
    pending: bool,
}

impl CreateMachineModal {
    pub(in crate::tui) fn new(draft: MachineDraft) -> Self {
        Self {
            draft,
            focus_index: 0,
            pending: false,
        }
    }

    pub(in crate::tui) fn to_modal(&self) -> Modal {
        let mut fields: Vec<Field> = vec![
            text_input("Name", &self.draft.name),
            text_input("Location", &self.draft.location),
            text_input("Description", &self.draft.description),
        ];
        fields.extend(form_buttons());

        Modal {
            title: String::from("Create Machine"),
            focus_index: self.focus_index,
            fields,
            hint: Some(if self.pending {
                String::from("Creating...")
            } else {
                String::from("Name is required. [Tab] next field  [Esc] cancel")
            }),
        }
    }

    pub(in crate::tui) fn handle_key(&mut self, key: KeyCode) -> ModalAction {
        let mut modal = self.to_modal();
        let action = handle_modal_key(&mut modal, key);
        self.apply_modal_state(&modal);
        action
    }

    pub(in crate::tui) fn draft(&self) -> &MachineDraft {
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
        self.draft = MachineDraft {
            name: text_at(modal, 0),
            location: text_at(modal, 1),
            description: text_at(modal, 2),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fields_map_to_draft() {
        let mut modal = CreateMachineModal::new(MachineDraft::default());
        for ch in "Lathe 1".chars() {
            modal.handle_key(KeyCode::Char(ch));
        }
        modal.handle_key(KeyCode::Tab);
        for ch in "Bay 3".chars() {
            modal.handle_key(KeyCode::Char(ch));
        }

        assert_eq!(modal.draft().name, "Lathe 1");
        assert_eq!(modal.draft().location, "Bay 3");
        assert_eq!(modal.draft().description, "");
    }

    #[test]
    fn test_prefilled_from_existing_draft() {
        let modal = CreateMachineModal::new(MachineDraft::named("Press"));
        assert_eq!(text_at(&modal.to_modal(), 0), "Press");
    }

    #[test]
    fn test_create_button_submits() {
        let mut modal = CreateMachineModal::new(MachineDraft::named("Press"));
        for _ in 0..3 {
            modal.handle_key(KeyCode::Tab);
        }
        assert_eq!(modal.handle_key(KeyCode::Enter), ModalAction::Submit);
    }
}
