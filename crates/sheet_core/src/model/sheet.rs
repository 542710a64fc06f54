//! Topic / sub-topic / question records.
//!
//! # Responsibility
//! - Define the canonical tree shape observed by every snapshot consumer.
//! - Provide read helpers (lookup, index resolution, progress).
//!
//! # Invariants
//! - `id` is assigned at creation and never changes across mutations.
//! - Child sequences hold no duplicate ids and keep last-mutated order.
//! - Children are shared through `Arc`, so an unchanged subtree keeps its
//!   identity from one snapshot to the next.

use crate::model::ids::{generate_id, EntityId, QuestionId, SubTopicId, TopicId};
use crate::model::progress::Progress;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use std::sync::Arc;

/// Question difficulty tier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    /// Warm-up level.
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Stable lowercase label, identical to the wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }
}

impl Display for Difficulty {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rejected difficulty label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseDifficultyError(pub String);

impl Display for ParseDifficultyError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unsupported difficulty `{}`; expected easy|medium|hard",
            self.0
        )
    }
}

impl Error for ParseDifficultyError {}

impl FromStr for Difficulty {
    type Err = ParseDifficultyError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Self::Easy),
            "medium" => Ok(Self::Medium),
            "hard" => Ok(Self::Hard),
            _ => Err(ParseDifficultyError(value.to_string())),
        }
    }
}

/// Leaf record: one trackable practice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    pub title: String,
    pub difficulty: Difficulty,
    /// Free-form URI text; never validated by core.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default)]
    pub completed: bool,
}

impl Question {
    /// Materializes a draft under a freshly generated id.
    pub fn from_draft(draft: QuestionDraft) -> Self {
        Self::with_id(generate_id(), draft)
    }

    /// Materializes a draft under a caller-provided id.
    ///
    /// Used by seed/import paths; uniqueness stays the caller's concern.
    pub fn with_id(id: QuestionId, draft: QuestionDraft) -> Self {
        Self {
            id,
            title: draft.title,
            difficulty: draft.difficulty,
            link: draft.link,
            completed: draft.completed,
        }
    }

    pub fn progress(&self) -> Progress {
        Progress::leaf(self.completed)
    }
}

/// Input for a new question: every field except the id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionDraft {
    pub title: String,
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub completed: bool,
}

impl QuestionDraft {
    /// Creates an open draft without link.
    pub fn new(title: impl Into<String>, difficulty: Difficulty) -> Self {
        Self {
            title: title.into(),
            difficulty,
            link: None,
            completed: false,
        }
    }

    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }

    pub fn completed(mut self, completed: bool) -> Self {
        self.completed = completed;
        self
    }
}

/// Partial question update. `None` fields keep the current value.
///
/// `link` is doubly optional: `Some(None)` clears the link.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionPatch {
    pub title: Option<String>,
    pub difficulty: Option<Difficulty>,
    pub link: Option<Option<String>>,
    pub completed: Option<bool>,
}

impl QuestionPatch {
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = Some(difficulty);
        self
    }

    pub fn link(mut self, link: Option<String>) -> Self {
        self.link = Some(link);
        self
    }

    pub fn completed(mut self, completed: bool) -> Self {
        self.completed = Some(completed);
        self
    }

    /// Returns whether applying this patch would change nothing.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.difficulty.is_none()
            && self.link.is_none()
            && self.completed.is_none()
    }

    /// Merges supplied fields into `question`; `id` is never touched.
    pub fn apply_to(&self, question: &mut Question) {
        if let Some(title) = &self.title {
            question.title = title.clone();
        }
        if let Some(difficulty) = self.difficulty {
            question.difficulty = difficulty;
        }
        if let Some(link) = &self.link {
            question.link = link.clone();
        }
        if let Some(completed) = self.completed {
            question.completed = completed;
        }
    }
}

/// Mid-level grouping of ordered questions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubTopic {
    pub id: SubTopicId,
    pub title: String,
    #[serde(default)]
    pub questions: Vec<Arc<Question>>,
}

impl SubTopic {
    /// Creates an empty sub-topic with a generated id.
    pub fn new(title: impl Into<String>) -> Self {
        Self::with_id(generate_id(), title)
    }

    pub fn with_id(id: SubTopicId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            questions: Vec::new(),
        }
    }

    pub fn question(&self, question_id: QuestionId) -> Option<&Question> {
        self.questions
            .iter()
            .find(|question| question.id == question_id)
            .map(Arc::as_ref)
    }

    pub fn question_index(&self, question_id: QuestionId) -> Option<usize> {
        self.questions
            .iter()
            .position(|question| question.id == question_id)
    }

    pub fn progress(&self) -> Progress {
        self.questions.iter().map(|question| question.progress()).sum()
    }
}

/// Root-level grouping of ordered sub-topics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    pub id: TopicId,
    pub title: String,
    #[serde(default)]
    pub sub_topics: Vec<Arc<SubTopic>>,
}

impl Topic {
    /// Creates an empty topic with a generated id.
    pub fn new(title: impl Into<String>) -> Self {
        Self::with_id(generate_id(), title)
    }

    pub fn with_id(id: TopicId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            sub_topics: Vec::new(),
        }
    }

    pub fn sub_topic(&self, sub_topic_id: SubTopicId) -> Option<&SubTopic> {
        self.sub_topics
            .iter()
            .find(|sub_topic| sub_topic.id == sub_topic_id)
            .map(Arc::as_ref)
    }

    pub fn sub_topic_index(&self, sub_topic_id: SubTopicId) -> Option<usize> {
        self.sub_topics
            .iter()
            .position(|sub_topic| sub_topic.id == sub_topic_id)
    }

    pub fn question_count(&self) -> usize {
        self.sub_topics
            .iter()
            .map(|sub_topic| sub_topic.questions.len())
            .sum()
    }

    pub fn progress(&self) -> Progress {
        self.sub_topics
            .iter()
            .map(|sub_topic| sub_topic.progress())
            .sum()
    }
}

/// Complete topic tree as observed by one snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sheet {
    #[serde(default)]
    pub topics: Vec<Arc<Topic>>,
}

impl Sheet {
    pub fn new(topics: Vec<Topic>) -> Self {
        Self {
            topics: topics.into_iter().map(Arc::new).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.topics.is_empty()
    }

    pub fn topic(&self, topic_id: TopicId) -> Option<&Topic> {
        self.topics
            .iter()
            .find(|topic| topic.id == topic_id)
            .map(Arc::as_ref)
    }

    pub fn topic_index(&self, topic_id: TopicId) -> Option<usize> {
        self.topics.iter().position(|topic| topic.id == topic_id)
    }

    /// Resolves a sub-topic through its owning topic.
    pub fn sub_topic(&self, topic_id: TopicId, sub_topic_id: SubTopicId) -> Option<&SubTopic> {
        self.topic(topic_id)?.sub_topic(sub_topic_id)
    }

    /// Resolves a question through its full path.
    pub fn question(
        &self,
        topic_id: TopicId,
        sub_topic_id: SubTopicId,
        question_id: QuestionId,
    ) -> Option<&Question> {
        self.sub_topic(topic_id, sub_topic_id)?
            .question(question_id)
    }

    pub fn question_count(&self) -> usize {
        self.topics.iter().map(|topic| topic.question_count()).sum()
    }

    /// Returns the first id that appears twice anywhere in the tree.
    pub fn duplicate_id(&self) -> Option<EntityId> {
        let mut seen = HashSet::new();
        for topic in &self.topics {
            if !seen.insert(topic.id) {
                return Some(topic.id);
            }
            for sub_topic in &topic.sub_topics {
                if !seen.insert(sub_topic.id) {
                    return Some(sub_topic.id);
                }
                for question in &sub_topic.questions {
                    if !seen.insert(question.id) {
                        return Some(question.id);
                    }
                }
            }
        }
        None
    }

    pub fn progress(&self) -> Progress {
        self.topics.iter().map(|topic| topic.progress()).sum()
    }
}
