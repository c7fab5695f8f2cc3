//! Between-session tasks. Three fixed items, toggled independently.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChecklistKey {
    PracticeMindfulness,
    TimeManagement,
    CommunicationSkills,
}

impl ChecklistKey {
    pub const ALL: [ChecklistKey; 3] = [
        ChecklistKey::PracticeMindfulness,
        ChecklistKey::TimeManagement,
        ChecklistKey::CommunicationSkills,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            ChecklistKey::PracticeMindfulness => "practice-mindfulness",
            ChecklistKey::TimeManagement => "time-management",
            ChecklistKey::CommunicationSkills => "communication-skills",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ChecklistKey::PracticeMindfulness => "Practice mindfulness techniques",
            ChecklistKey::TimeManagement => "Implement time management strategies",
            ChecklistKey::CommunicationSkills => "Work on communication skills",
        }
    }

    pub fn benefits(&self) -> &'static str {
        match self {
            ChecklistKey::PracticeMindfulness => {
                "Enhance focus and reduce stress. Improve emotional regulation. Boost overall well-being."
            }
            ChecklistKey::TimeManagement => {
                "Increase productivity and efficiency. Reduce stress and overwhelm. Achieve better work-life balance."
            }
            ChecklistKey::CommunicationSkills => {
                "Enhance personal and professional relationships. Resolve conflicts more effectively. Boost confidence in social situations."
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChecklistItem {
    pub key: ChecklistKey,
    pub completed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Checklist {
    items: [ChecklistItem; 3],
}

impl Default for Checklist {
    fn default() -> Self {
        Self {
            items: ChecklistKey::ALL.map(|key| ChecklistItem {
                key,
                completed: false,
            }),
        }
    }
}

impl Checklist {
    /// Items in insertion order.
    pub fn items(&self) -> &[ChecklistItem] {
        &self.items
    }

    pub fn is_completed(&self, key: ChecklistKey) -> bool {
        self.items
            .iter()
            .any(|item| item.key == key && item.completed)
    }

    /// Flip one item and return its new state.
    pub fn toggle(&mut self, key: ChecklistKey) -> bool {
        let mut now = false;
        for item in self.items.iter_mut().filter(|item| item.key == key) {
            item.completed = !item.completed;
            now = item.completed;
        }
        now
    }

    pub fn completed_count(&self) -> usize {
        self.items.iter().filter(|item| item.completed).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_unchecked_in_order() {
        let list = Checklist::default();
        let keys: Vec<_> = list.items().iter().map(|i| i.key).collect();
        assert_eq!(keys, ChecklistKey::ALL.to_vec());
        assert_eq!(list.completed_count(), 0);
    }

    #[test]
    fn test_double_toggle_restores() {
        let mut list = Checklist::default();
        assert!(list.toggle(ChecklistKey::TimeManagement));
        assert!(!list.toggle(ChecklistKey::TimeManagement));
        assert_eq!(list, Checklist::default());
    }

    #[test]
    fn test_items_are_independent() {
        let mut list = Checklist::default();
        list.toggle(ChecklistKey::PracticeMindfulness);
        assert!(list.is_completed(ChecklistKey::PracticeMindfulness));
        assert!(!list.is_completed(ChecklistKey::TimeManagement));
        assert!(!list.is_completed(ChecklistKey::CommunicationSkills));

        list.toggle(ChecklistKey::CommunicationSkills);
        list.toggle(ChecklistKey::PracticeMindfulness);
        assert!(!list.is_completed(ChecklistKey::PracticeMindfulness));
        assert!(list.is_completed(ChecklistKey::CommunicationSkills));
        assert_eq!(list.completed_count(), 1);
    }
}
