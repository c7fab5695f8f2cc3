//! # Session History
//!
//! Mocked record of past sessions plus the view state over it: sort order,
//! how many rows are visible, which row is expanded, and which detail tab is
//! selected (shared by every row).

use chrono::{Days, NaiveDate};

/// Rows shown before "View More" is used.
pub const COLLAPSED_VISIBLE: usize = 5;

/// A past advisory conversation. Read-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub id: u32,
    pub date: NaiveDate,
    pub topic: String,
    pub advisor_notes: String,
    pub advisor: String,
}

/// The fixed seed list, dated backwards from `today` (most recent first).
pub fn seed_sessions(today: NaiveDate) -> Vec<Session> {
    const SEED: [(&str, &str, &str); 6] = [
        (
            "Stress Management",
            "User showed progress in stress management techniques.",
            "Marcus",
        ),
        (
            "Work-Life Balance",
            "Discussed strategies for improving work-life balance.",
            "Sarah",
        ),
        ("Goal Setting", "Set SMART goals for the next month.", "Marcus"),
        (
            "Performance Anxiety",
            "Explored techniques to manage performance anxiety.",
            "Sarah",
        ),
        (
            "Communication Skills",
            "Practiced active listening and assertive communication.",
            "Marcus",
        ),
        (
            "Time Management",
            "Introduced prioritization techniques and time-blocking method.",
            "Sarah",
        ),
    ];

    SEED.iter()
        .enumerate()
        .map(|(i, (topic, notes, advisor))| Session {
            id: i as u32 + 1,
            date: today
                .checked_sub_days(Days::new(i as u64))
                .unwrap_or(today),
            topic: topic.to_string(),
            advisor_notes: notes.to_string(),
            advisor: advisor.to_string(),
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Ascending,
    #[default]
    Descending,
}

impl SortOrder {
    pub fn toggled(self) -> Self {
        match self {
            SortOrder::Ascending => SortOrder::Descending,
            SortOrder::Descending => SortOrder::Ascending,
        }
    }
}

/// Detail tabs of an expanded session, in strip order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Overview,
    Transcript,
    LevelUp,
    YourNotes,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::Overview, Tab::Transcript, Tab::LevelUp, Tab::YourNotes];

    pub fn id(&self) -> &'static str {
        match self {
            Tab::Overview => "overview",
            Tab::Transcript => "transcript",
            Tab::LevelUp => "level-up",
            Tab::YourNotes => "your-notes",
        }
    }

    pub fn from_id(id: &str) -> Option<Tab> {
        Tab::ALL.into_iter().find(|t| t.id() == id)
    }

    pub fn index(&self) -> usize {
        Tab::ALL.iter().position(|t| t == self).unwrap_or(0)
    }

    pub fn next(&self) -> Tab {
        Tab::ALL[(self.index() + 1) % Tab::ALL.len()]
    }

    pub fn prev(&self) -> Tab {
        Tab::ALL[(self.index() + Tab::ALL.len() - 1) % Tab::ALL.len()]
    }
}

#[derive(Debug, Clone)]
pub struct HistoryView {
    sessions: Vec<Session>,
    pub sort_order: SortOrder,
    pub visible: usize,
    pub expanded: Option<u32>,
    pub selected_tab: Tab,
}

impl HistoryView {
    pub fn new(sessions: Vec<Session>) -> Self {
        let visible = sessions.len().min(COLLAPSED_VISIBLE);
        Self {
            sessions,
            sort_order: SortOrder::default(),
            visible,
            expanded: None,
            selected_tab: Tab::default(),
        }
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// All sessions in the current sort order.
    pub fn sorted(&self) -> Vec<&Session> {
        let mut sorted: Vec<&Session> = self.sessions.iter().collect();
        match self.sort_order {
            SortOrder::Ascending => sorted.sort_by_key(|s| s.date),
            SortOrder::Descending => sorted.sort_by(|a, b| b.date.cmp(&a.date)),
        }
        sorted
    }

    /// The rows currently on screen: sorted, then truncated to `visible`.
    pub fn visible_sessions(&self) -> Vec<&Session> {
        let mut sorted = self.sorted();
        sorted.truncate(self.visible);
        sorted
    }

    pub fn toggle_sort(&mut self) {
        self.sort_order = self.sort_order.toggled();
    }

    pub fn set_sort(&mut self, order: SortOrder) {
        self.sort_order = order;
    }

    /// Whether the "View More / Show Less" control is offered at all.
    pub fn can_expand_list(&self) -> bool {
        self.sessions.len() > COLLAPSED_VISIBLE
    }

    pub fn is_showing_all(&self) -> bool {
        self.visible == self.sessions.len()
    }

    pub fn toggle_visible(&mut self) {
        self.visible = if self.is_showing_all() {
            COLLAPSED_VISIBLE.min(self.sessions.len())
        } else {
            self.sessions.len()
        };
    }

    /// Expand `id`, or collapse it if it is already the expanded row.
    /// Unknown ids collapse everything.
    pub fn toggle_expanded(&mut self, id: u32) {
        self.expanded = if self.expanded == Some(id) || self.get(id).is_none() {
            None
        } else {
            Some(id)
        };
    }

    pub fn expanded_session(&self) -> Option<&Session> {
        self.expanded.and_then(|id| self.get(id))
    }

    pub fn get(&self, id: u32) -> Option<&Session> {
        self.sessions.iter().find(|s| s.id == id)
    }

    pub fn select_tab(&mut self, tab: Tab) {
        self.selected_tab = tab;
    }
}
