//! # Static Copy
//!
//! Every piece of fixed text the dashboard shows, keyed by enum rather than
//! matched on strings at render time. Layout code asks for content here and
//! decides how to draw it.

use crate::core::history::{Session, Tab};
use crate::core::setup::{Avatar, Topic};

/// Counselor card shown on the avatar stage.
pub struct AvatarProfile {
    pub avatar: Avatar,
    pub name: &'static str,
    pub description: &'static str,
    pub specialty: &'static str,
}

pub fn avatar_profile(avatar: Avatar) -> AvatarProfile {
    match avatar {
        Avatar::Male => AvatarProfile {
            avatar,
            name: "Marcus",
            description: "Empathetic and solution-focused counselor with 10+ years of experience.",
            specialty: "Specializes in solution-focused therapy, helping clients overcome challenges and achieve their goals efficiently.",
        },
        Avatar::Female => AvatarProfile {
            avatar,
            name: "Sarah",
            description: "Compassionate therapist specializing in cognitive-behavioral techniques.",
            specialty: "Expert in cognitive-behavioral techniques, guiding clients to reshape thought patterns and behaviors for improved mental well-being.",
        },
    }
}

const GENERIC_TOPIC_DESCRIPTION: &str =
    "Explore this topic to improve your mental well-being and personal growth.";

pub fn topic_description(topic: Topic) -> &'static str {
    match topic {
        Topic::StressManagement => {
            "Learn techniques to effectively manage and reduce stress in your daily life."
        }
        Topic::ConfidenceBuilding => {
            "Develop strategies to boost your self-confidence and self-esteem."
        }
        Topic::GoalSetting => {
            "Learn how to set and achieve meaningful personal and professional goals."
        }
        Topic::WorkLifeBalance => {
            "Discover methods to maintain a healthy balance between your work and personal life."
        }
        Topic::TimeManagement => {
            "Master techniques to manage your time more efficiently and productively."
        }
        Topic::CommunicationSkills => {
            "Improve your ability to communicate effectively in various situations."
        }
        Topic::PerformanceAnxiety => {
            "Learn strategies to overcome anxiety related to performance in work or personal situations."
        }
        Topic::HandlingRejection => {
            "Develop resilience and coping mechanisms for dealing with rejection."
        }
        Topic::DecisionMaking => "Enhance your ability to make confident and effective decisions.",
    }
}

/// Description for a free-form topic label, falling back to generic copy.
pub fn topic_description_for(label: &str) -> &'static str {
    Topic::from_label(label)
        .map(topic_description)
        .unwrap_or(GENERIC_TOPIC_DESCRIPTION)
}

pub const NOTES_PLACEHOLDER: &str = "No notes added yet. Here are some virtual notes:\n\n\
• Discussed progress on time management techniques\n\
• Client showed improvement in stress reduction exercises\n\
• Set goal to practice mindfulness for 10 minutes daily\n\
• Explored strategies for better work-life balance";

const OVERVIEW_POINTS: [&str; 4] = [
    "During this session, we explored various strategies to address the client's concerns.",
    "We identified key areas for improvement and set actionable goals for the coming week.",
    "The client showed good engagement and openness to trying new approaches.",
    "We agreed to follow up on progress in our next session and adjust our plan as needed.",
];

const OVERVIEW_FALLBACK_ADVISOR: &str = "Sarah";
const OVERVIEW_MINUTES: u8 = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyMoment {
    pub timestamp: &'static str,
    pub title: &'static str,
    pub summary: &'static str,
}

const KEY_MOMENTS: [KeyMoment; 3] = [
    KeyMoment {
        timestamp: "2:15",
        title: "Discussion about Morning Routine",
        summary: "Identified key elements of an effective morning routine",
    },
    KeyMoment {
        timestamp: "5:30",
        title: "Time Management Techniques",
        summary: "Explored various methods for better time management",
    },
    KeyMoment {
        timestamp: "8:45",
        title: "Setting Boundaries",
        summary: "Strategies for maintaining work-life boundaries",
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speaker {
    You,
    Homeowner,
}

impl Speaker {
    pub fn label(&self) -> &'static str {
        match self {
            Speaker::You => "You",
            Speaker::Homeowner => "Homeowner",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TranscriptLine {
    pub speaker: Speaker,
    pub text: &'static str,
}

const TRANSCRIPT: [TranscriptLine; 5] = [
    TranscriptLine {
        speaker: Speaker::You,
        text: "Hello, this is Jessica from Premier Real Estate Solutions. Am I speaking with Mr. Anderson?",
    },
    TranscriptLine {
        speaker: Speaker::Homeowner,
        text: "Yes, this is Robert Anderson speaking.",
    },
    TranscriptLine {
        speaker: Speaker::You,
        text: "Great to connect with you, Mr. Anderson. I noticed your property on Oak Street and wanted to discuss some exciting opportunities in today's market. Would now be a good time to chat?",
    },
    TranscriptLine {
        speaker: Speaker::Homeowner,
        text: "Yes, I have a few minutes. What kind of opportunities are you referring to?",
    },
    TranscriptLine {
        speaker: Speaker::You,
        text: "What's your timeline for selling the property?",
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelUpItem {
    pub id: u32,
    pub problem: &'static str,
    pub solution: &'static str,
    pub completed: bool,
}

pub const LEVEL_UP_RECOMMENDATION: &str = "weekly sessions for the next month";

const LEVEL_UP_ITEMS: [LevelUpItem; 3] = [
    LevelUpItem {
        id: 1,
        problem: "Procrastination",
        solution: "Implement the Pomodoro Technique: 25 minutes of focused work, followed by a 5-minute break. This helps break tasks into manageable chunks and improves productivity.",
        completed: false,
    },
    LevelUpItem {
        id: 2,
        problem: "Negative self-talk",
        solution: "Practice daily positive affirmations and challenge negative thoughts. Keep a journal to track and reframe negative self-talk patterns into more constructive and supportive inner dialogues.",
        completed: false,
    },
    LevelUpItem {
        id: 3,
        problem: "Irregular sleep schedule",
        solution: "Establish a consistent bedtime and wake-up time, even on weekends. Create a relaxing bedtime routine and avoid screens for at least an hour before sleep to improve sleep quality and overall well-being.",
        completed: false,
    },
];

pub fn level_up_items() -> &'static [LevelUpItem] {
    &LEVEL_UP_ITEMS
}

/// Content of one detail tab, resolved for the expanded session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TabContent<'a> {
    Overview {
        headline: String,
        advisor_notes: &'a str,
        points: &'static [&'static str],
    },
    Transcript {
        key_moments: &'static [KeyMoment],
        lines: &'static [TranscriptLine],
    },
    LevelUp {
        recommendation: &'static str,
        items: &'static [LevelUpItem],
    },
    /// Notes are live state, drawn from the notes editor by the caller.
    Notes,
}

/// Pure lookup: only the overview reads the session.
pub fn tab_content(tab: Tab, session: Option<&Session>) -> TabContent<'_> {
    match tab {
        Tab::Overview => {
            let advisor = session
                .map(|s| s.advisor.as_str())
                .unwrap_or(OVERVIEW_FALLBACK_ADVISOR);
            TabContent::Overview {
                headline: format!("{OVERVIEW_MINUTES} minutes with {advisor}"),
                advisor_notes: session.map(|s| s.advisor_notes.as_str()).unwrap_or(""),
                points: &OVERVIEW_POINTS,
            }
        }
        Tab::Transcript => TabContent::Transcript {
            key_moments: &KEY_MOMENTS,
            lines: &TRANSCRIPT,
        },
        Tab::LevelUp => TabContent::LevelUp {
            recommendation: LEVEL_UP_RECOMMENDATION,
            items: &LEVEL_UP_ITEMS,
        },
        Tab::YourNotes => TabContent::Notes,
    }
}
