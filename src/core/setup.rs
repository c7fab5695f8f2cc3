//! # Session Setup Flow
//!
//! The three-stage wizard that precedes a live session:
//!
//! ```text
//! SelectingAvatar ──select──▶ ChoosingTopic ──choose──▶ ConfiguringSession ──start──▶ ActiveSession
//!        ▲                         │  ▲                        │
//!        └──────────back───────────┘  └──────────back──────────┘
//!        ▲                                                     │
//!        └──────────────────────── exit (clears setup) ────────┘
//! ```
//!
//! Stage changes go through a short fade: `select_avatar`, `choose_topic` and
//! `back` return a [`Transition`] token and the displayed stage only moves once
//! `complete_transition` is called with that token. While a transition is
//! pending every other transition request is refused.

use serde::{Deserialize, Serialize};

/// The counselor persona the user speaks with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Avatar {
    Male,
    Female,
}

impl Avatar {
    pub const ALL: [Avatar; 2] = [Avatar::Male, Avatar::Female];

    pub fn id(&self) -> &'static str {
        match self {
            Avatar::Male => "male",
            Avatar::Female => "female",
        }
    }

    /// Display name of the counselor behind this avatar.
    pub fn advisor_name(&self) -> &'static str {
        match self {
            Avatar::Male => "Marcus",
            Avatar::Female => "Sarah",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopicCategory {
    PersonalGrowth,
    ProfessionalDevelopment,
    MentalWellness,
}

impl TopicCategory {
    pub const ALL: [TopicCategory; 3] = [
        TopicCategory::PersonalGrowth,
        TopicCategory::ProfessionalDevelopment,
        TopicCategory::MentalWellness,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            TopicCategory::PersonalGrowth => "Personal Growth",
            TopicCategory::ProfessionalDevelopment => "Professional Development",
            TopicCategory::MentalWellness => "Mental Wellness",
        }
    }

    pub fn topics(&self) -> [Topic; 3] {
        match self {
            TopicCategory::PersonalGrowth => [
                Topic::StressManagement,
                Topic::ConfidenceBuilding,
                Topic::GoalSetting,
            ],
            TopicCategory::ProfessionalDevelopment => [
                Topic::WorkLifeBalance,
                Topic::TimeManagement,
                Topic::CommunicationSkills,
            ],
            TopicCategory::MentalWellness => [
                Topic::PerformanceAnxiety,
                Topic::HandlingRejection,
                Topic::DecisionMaking,
            ],
        }
    }
}

/// One entry of the fixed nine-item topic taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topic {
    StressManagement,
    ConfidenceBuilding,
    GoalSetting,
    WorkLifeBalance,
    TimeManagement,
    CommunicationSkills,
    PerformanceAnxiety,
    HandlingRejection,
    DecisionMaking,
}

impl Topic {
    /// All topics in taxonomy order (category by category).
    pub const ALL: [Topic; 9] = [
        Topic::StressManagement,
        Topic::ConfidenceBuilding,
        Topic::GoalSetting,
        Topic::WorkLifeBalance,
        Topic::TimeManagement,
        Topic::CommunicationSkills,
        Topic::PerformanceAnxiety,
        Topic::HandlingRejection,
        Topic::DecisionMaking,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Topic::StressManagement => "Stress Management",
            Topic::ConfidenceBuilding => "Confidence Building",
            Topic::GoalSetting => "Goal Setting",
            Topic::WorkLifeBalance => "Work-Life Balance",
            Topic::TimeManagement => "Time Management",
            Topic::CommunicationSkills => "Communication Skills",
            Topic::PerformanceAnxiety => "Performance Anxiety",
            Topic::HandlingRejection => "Handling Rejection",
            Topic::DecisionMaking => "Decision Making",
        }
    }

    pub fn category(&self) -> TopicCategory {
        match self {
            Topic::StressManagement | Topic::ConfidenceBuilding | Topic::GoalSetting => {
                TopicCategory::PersonalGrowth
            }
            Topic::WorkLifeBalance | Topic::TimeManagement | Topic::CommunicationSkills => {
                TopicCategory::ProfessionalDevelopment
            }
            Topic::PerformanceAnxiety | Topic::HandlingRejection | Topic::DecisionMaking => {
                TopicCategory::MentalWellness
            }
        }
    }

    pub fn from_label(label: &str) -> Option<Topic> {
        Topic::ALL.into_iter().find(|t| t.label() == label)
    }
}

/// Avatar and topic chosen so far. Both must be set before a session can start.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionSetup {
    pub avatar: Option<Avatar>,
    pub topic: Option<Topic>,
}

impl SessionSetup {
    pub fn is_complete(&self) -> bool {
        self.avatar.is_some() && self.topic.is_some()
    }

    pub fn clear(&mut self) {
        *self = SessionSetup::default();
    }
}

/// Displayed stage of the setup card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    SelectingAvatar,
    ChoosingTopic,
    ConfiguringSession,
}

impl Stage {
    /// 1-based step number shown in headings.
    pub fn number(&self) -> u8 {
        match self {
            Stage::SelectingAvatar => 1,
            Stage::ChoosingTopic => 2,
            Stage::ConfiguringSession => 3,
        }
    }

    pub fn prev(&self) -> Option<Stage> {
        match self {
            Stage::SelectingAvatar => None,
            Stage::ChoosingTopic => Some(Stage::SelectingAvatar),
            Stage::ConfiguringSession => Some(Stage::ChoosingTopic),
        }
    }
}

/// Session length in minutes, always within `[MIN, MAX]` and a multiple of `STEP`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SessionDuration(u8);

impl SessionDuration {
    pub const MIN: u8 = 5;
    pub const MAX: u8 = 60;
    pub const STEP: u8 = 5;
    pub const DEFAULT: u8 = 30;

    /// Snap an arbitrary minute count down to the step grid, then clamp.
    pub fn new(minutes: u32) -> Self {
        let snapped = minutes - minutes % Self::STEP as u32;
        let clamped = snapped.clamp(Self::MIN as u32, Self::MAX as u32);
        Self(clamped as u8)
    }

    pub fn minutes(&self) -> u8 {
        self.0
    }

    pub fn increment(&mut self) {
        self.0 = (self.0 + Self::STEP).min(Self::MAX);
    }

    pub fn decrement(&mut self) {
        self.0 = self.0.saturating_sub(Self::STEP).max(Self::MIN);
    }
}

impl Default for SessionDuration {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

/// A session that has been started from a complete setup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveSession {
    pub avatar: Avatar,
    pub topic: Topic,
    pub duration: SessionDuration,
}

/// A pending stage change. The id guards against stale timer callbacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub id: u64,
    pub target: Stage,
}

#[derive(Debug, Clone)]
pub struct SetupFlow {
    stage: Stage,
    pub setup: SessionSetup,
    pub duration: SessionDuration,
    transition: Option<Transition>,
    next_transition_id: u64,
}

impl SetupFlow {
    pub fn new(duration: SessionDuration) -> Self {
        Self {
            stage: Stage::SelectingAvatar,
            setup: SessionSetup::default(),
            duration,
            transition: None,
            next_transition_id: 1,
        }
    }

    /// The stage currently on screen. Does not move while a transition is pending.
    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn is_transitioning(&self) -> bool {
        self.transition.is_some()
    }

    pub fn pending_transition(&self) -> Option<Transition> {
        self.transition
    }

    fn begin(&mut self, target: Stage) -> Option<Transition> {
        if self.transition.is_some() {
            return None;
        }
        let transition = Transition {
            id: self.next_transition_id,
            target,
        };
        self.next_transition_id += 1;
        self.transition = Some(transition);
        Some(transition)
    }

    /// Stage 1 → 2. Stores the avatar immediately; the stage follows after the fade.
    pub fn select_avatar(&mut self, avatar: Avatar) -> Option<Transition> {
        if self.stage != Stage::SelectingAvatar || self.is_transitioning() {
            return None;
        }
        self.setup.avatar = Some(avatar);
        self.begin(Stage::ChoosingTopic)
    }

    /// Stage 2 → 3. Requires an avatar to have been stored.
    pub fn choose_topic(&mut self, topic: Topic) -> Option<Transition> {
        if self.stage != Stage::ChoosingTopic
            || self.is_transitioning()
            || self.setup.avatar.is_none()
        {
            return None;
        }
        self.setup.topic = Some(topic);
        self.begin(Stage::ConfiguringSession)
    }

    /// One stage backward, keeping whatever was chosen.
    pub fn back(&mut self) -> Option<Transition> {
        if self.is_transitioning() {
            return None;
        }
        let prev = self.stage.prev()?;
        self.begin(prev)
    }

    /// Leave the flow from stage 2 or 3: back to stage 1 with an empty setup.
    /// Cancels a pending fade. Returns false when there is nothing to exit.
    pub fn exit(&mut self) -> bool {
        if self.stage == Stage::SelectingAvatar && self.transition.is_none() {
            return false;
        }
        self.stage = Stage::SelectingAvatar;
        self.setup.clear();
        self.transition = None;
        true
    }

    /// Apply the pending transition if `id` matches it.
    pub fn complete_transition(&mut self, id: u64) -> bool {
        match self.transition {
            Some(t) if t.id == id => {
                self.stage = t.target;
                self.transition = None;
                true
            }
            _ => false,
        }
    }

    /// Stage 3 → active session. Refused unless the setup is complete.
    /// The displayed stage returns to 1; the setup itself is kept.
    pub fn start(&mut self) -> Option<ActiveSession> {
        if self.stage != Stage::ConfiguringSession || self.is_transitioning() {
            return None;
        }
        let (Some(avatar), Some(topic)) = (self.setup.avatar, self.setup.topic) else {
            return None;
        };
        self.stage = Stage::SelectingAvatar;
        Some(ActiveSession {
            avatar,
            topic,
            duration: self.duration,
        })
    }
}
