//! Personal notes: a two-mode text area (display / edit), in memory only.

use crate::core::content::NOTES_PLACEHOLDER;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotesEditor {
    pub text: String,
    pub editing: bool,
}

impl NotesEditor {
    /// Label of the single mode toggle.
    pub fn toggle_label(&self) -> &'static str {
        if self.editing {
            "Save Notes"
        } else {
            "Edit Notes"
        }
    }

    /// Flip between display and edit mode. Entering edit mode with no notes
    /// seeds the placeholder so the user starts from something.
    pub fn toggle(&mut self) {
        if !self.editing && self.text.is_empty() {
            self.text = NOTES_PLACEHOLDER.to_string();
        }
        self.editing = !self.editing;
    }

    pub fn insert(&mut self, c: char) {
        if self.editing {
            self.text.push(c);
        }
    }

    pub fn insert_str(&mut self, s: &str) {
        if self.editing {
            self.text.push_str(s);
        }
    }

    pub fn backspace(&mut self) {
        if self.editing {
            self.text.pop();
        }
    }

    /// Replace the whole text (edit mode only).
    pub fn set_text(&mut self, text: String) {
        if self.editing {
            self.text = text;
        }
    }

    /// What display mode shows: the notes, or the dimmed placeholder if empty.
    pub fn display_text(&self) -> (&str, bool) {
        if self.text.is_empty() {
            (NOTES_PLACEHOLDER, true)
        } else {
            (&self.text, false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_edit_seeds_placeholder() {
        let mut notes = NotesEditor::default();
        assert_eq!(notes.toggle_label(), "Edit Notes");
        notes.toggle();
        assert!(notes.editing);
        assert_eq!(notes.text, NOTES_PLACEHOLDER);
        assert_eq!(notes.toggle_label(), "Save Notes");
    }

    #[test]
    fn test_placeholder_seeded_only_once() {
        let mut notes = NotesEditor::default();
        notes.toggle();
        notes.set_text("mine".to_string());
        notes.toggle();
        notes.toggle();
        assert_eq!(notes.text, "mine");
    }

    #[test]
    fn test_leaving_edit_mode_preserves_typed_text() {
        let mut notes = NotesEditor::default();
        notes.toggle();
        notes.set_text(String::new());
        notes.insert_str("Breathe");
        notes.insert('!');
        notes.backspace();
        notes.toggle();
        assert!(!notes.editing);
        assert_eq!(notes.text, "Breathe");
        assert_eq!(notes.display_text(), ("Breathe", false));
    }

    #[test]
    fn test_input_ignored_in_display_mode() {
        let mut notes = NotesEditor::default();
        notes.insert('x');
        notes.set_text("y".to_string());
        assert!(notes.text.is_empty());
        assert_eq!(notes.display_text(), (NOTES_PLACEHOLDER, true));
    }
}
