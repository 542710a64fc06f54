//! Sheet use-case service.
//!
//! # Responsibility
//! - Validate caller input above the store (titles, links, indices).
//! - Turn the store's silent no-ops into typed errors for UI callers.
//! - Resolve drag-and-drop (`active`, `over`) id pairs into index moves.
//!
//! # Invariants
//! - Titles reaching the store are trimmed and non-empty.
//! - Links reaching the store are trimmed; blank links become `None`.
//! - A failed call leaves the store unchanged.

use crate::model::ids::{QuestionId, SubTopicId, TopicId};
use crate::model::sheet::{QuestionDraft, QuestionPatch, Sheet};
use crate::ordering::in_bounds;
use crate::store::sheet_store::SheetStore;
use crate::store::subscription::SubscriptionId;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

/// Errors from sheet service operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SheetServiceError {
    /// Title is blank after trim.
    InvalidTitle,
    /// Topic does not exist.
    TopicNotFound(TopicId),
    /// Sub-topic does not exist under the topic.
    SubTopicNotFound {
        topic_id: TopicId,
        sub_topic_id: SubTopicId,
    },
    /// Question does not exist under the sub-topic.
    QuestionNotFound {
        topic_id: TopicId,
        sub_topic_id: SubTopicId,
        question_id: QuestionId,
    },
    /// Reorder index does not address an element.
    IndexOutOfRange { from: usize, to: usize, len: usize },
}

impl Display for SheetServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidTitle => write!(f, "title must not be blank"),
            Self::TopicNotFound(id) => write!(f, "topic not found: {id}"),
            Self::SubTopicNotFound {
                topic_id,
                sub_topic_id,
            } => write!(f, "sub-topic not found: {sub_topic_id} in topic {topic_id}"),
            Self::QuestionNotFound {
                topic_id,
                sub_topic_id,
                question_id,
            } => write!(
                f,
                "question not found: {question_id} in sub-topic {sub_topic_id} of topic {topic_id}"
            ),
            Self::IndexOutOfRange { from, to, len } => {
                write!(f, "move {from} -> {to} is out of range for {len} items")
            }
        }
    }
}

impl Error for SheetServiceError {}

/// Validating facade over `SheetStore`.
#[derive(Debug, Default)]
pub struct SheetService {
    store: SheetStore,
}

impl SheetService {
    pub fn new(store: SheetStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &SheetStore {
        &self.store
    }

    /// Registers a snapshot listener on the underlying store.
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&Arc<Sheet>) + Send + 'static,
    {
        self.store.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.store.unsubscribe(id)
    }

    pub fn into_store(self) -> SheetStore {
        self.store
    }

    pub fn snapshot(&self) -> Arc<Sheet> {
        self.store.snapshot()
    }

    pub fn create_topic(&mut self, title: &str) -> Result<TopicId, SheetServiceError> {
        let title = normalize_title(title)?;
        Ok(self.store.add_topic(title))
    }

    pub fn rename_topic(
        &mut self,
        topic_id: TopicId,
        title: &str,
    ) -> Result<(), SheetServiceError> {
        let title = normalize_title(title)?;
        self.ensure_topic(topic_id)?;
        self.store.update_topic(topic_id, title);
        Ok(())
    }

    pub fn delete_topic(&mut self, topic_id: TopicId) -> Result<(), SheetServiceError> {
        self.ensure_topic(topic_id)?;
        self.store.delete_topic(topic_id);
        Ok(())
    }

    pub fn move_topic(&mut self, from: usize, to: usize) -> Result<(), SheetServiceError> {
        ensure_indices(from, to, self.store.topics().len())?;
        self.store.reorder_topics(from, to);
        Ok(())
    }

    /// Moves topic `active` onto the slot currently held by `over`.
    pub fn move_topic_onto(
        &mut self,
        active: TopicId,
        over: TopicId,
    ) -> Result<(), SheetServiceError> {
        let sheet = self.store.sheet();
        let from = sheet
            .topic_index(active)
            .ok_or(SheetServiceError::TopicNotFound(active))?;
        let to = sheet
            .topic_index(over)
            .ok_or(SheetServiceError::TopicNotFound(over))?;
        if from != to {
            self.store.reorder_topics(from, to);
        }
        Ok(())
    }

    pub fn create_sub_topic(
        &mut self,
        topic_id: TopicId,
        title: &str,
    ) -> Result<SubTopicId, SheetServiceError> {
        let title = normalize_title(title)?;
        self.store
            .add_sub_topic(topic_id, title)
            .ok_or(SheetServiceError::TopicNotFound(topic_id))
    }

    pub fn rename_sub_topic(
        &mut self,
        topic_id: TopicId,
        sub_topic_id: SubTopicId,
        title: &str,
    ) -> Result<(), SheetServiceError> {
        let title = normalize_title(title)?;
        self.ensure_sub_topic(topic_id, sub_topic_id)?;
        self.store.update_sub_topic(topic_id, sub_topic_id, title);
        Ok(())
    }

    pub fn delete_sub_topic(
        &mut self,
        topic_id: TopicId,
        sub_topic_id: SubTopicId,
    ) -> Result<(), SheetServiceError> {
        self.ensure_sub_topic(topic_id, sub_topic_id)?;
        self.store.delete_sub_topic(topic_id, sub_topic_id);
        Ok(())
    }

    pub fn move_sub_topic(
        &mut self,
        topic_id: TopicId,
        from: usize,
        to: usize,
    ) -> Result<(), SheetServiceError> {
        let len = self
            .store
            .sheet()
            .topic(topic_id)
            .ok_or(SheetServiceError::TopicNotFound(topic_id))?
            .sub_topics
            .len();
        ensure_indices(from, to, len)?;
        self.store.reorder_sub_topics(topic_id, from, to);
        Ok(())
    }

    pub fn move_sub_topic_onto(
        &mut self,
        topic_id: TopicId,
        active: SubTopicId,
        over: SubTopicId,
    ) -> Result<(), SheetServiceError> {
        let topic = self
            .store
            .sheet()
            .topic(topic_id)
            .ok_or(SheetServiceError::TopicNotFound(topic_id))?;
        let resolve = |sub_topic_id| {
            topic
                .sub_topic_index(sub_topic_id)
                .ok_or(SheetServiceError::SubTopicNotFound {
                    topic_id,
                    sub_topic_id,
                })
        };
        let from = resolve(active)?;
        let to = resolve(over)?;
        if from != to {
            self.store.reorder_sub_topics(topic_id, from, to);
        }
        Ok(())
    }

    /// Adds a question after normalizing its title and link.
    pub fn create_question(
        &mut self,
        topic_id: TopicId,
        sub_topic_id: SubTopicId,
        draft: QuestionDraft,
    ) -> Result<QuestionId, SheetServiceError> {
        let draft = QuestionDraft {
            title: normalize_title(&draft.title)?,
            link: normalize_link(draft.link.as_deref()),
            ..draft
        };
        self.ensure_sub_topic(topic_id, sub_topic_id)?;
        self.store
            .add_question(topic_id, sub_topic_id, draft)
            .ok_or(SheetServiceError::SubTopicNotFound {
                topic_id,
                sub_topic_id,
            })
    }

    /// Applies a partial edit; a supplied title must not be blank.
    pub fn edit_question(
        &mut self,
        topic_id: TopicId,
        sub_topic_id: SubTopicId,
        question_id: QuestionId,
        patch: QuestionPatch,
    ) -> Result<(), SheetServiceError> {
        let title = patch.title.as_deref().map(normalize_title).transpose()?;
        let link = patch
            .link
            .as_ref()
            .map(|link| normalize_link(link.as_deref()));
        let patch = QuestionPatch {
            title,
            link,
            ..patch
        };
        self.ensure_question(topic_id, sub_topic_id, question_id)?;
        self.store
            .update_question(topic_id, sub_topic_id, question_id, patch);
        Ok(())
    }

    pub fn delete_question(
        &mut self,
        topic_id: TopicId,
        sub_topic_id: SubTopicId,
        question_id: QuestionId,
    ) -> Result<(), SheetServiceError> {
        self.ensure_question(topic_id, sub_topic_id, question_id)?;
        self.store
            .delete_question(topic_id, sub_topic_id, question_id);
        Ok(())
    }

    /// Flips completion and returns the new flag.
    pub fn toggle_question(
        &mut self,
        topic_id: TopicId,
        sub_topic_id: SubTopicId,
        question_id: QuestionId,
    ) -> Result<bool, SheetServiceError> {
        self.ensure_question(topic_id, sub_topic_id, question_id)?;
        self.store
            .toggle_question(topic_id, sub_topic_id, question_id);
        Ok(self
            .store
            .sheet()
            .question(topic_id, sub_topic_id, question_id)
            .is_some_and(|question| question.completed))
    }

    pub fn move_question(
        &mut self,
        topic_id: TopicId,
        sub_topic_id: SubTopicId,
        from: usize,
        to: usize,
    ) -> Result<(), SheetServiceError> {
        let len = self
            .store
            .sheet()
            .sub_topic(topic_id, sub_topic_id)
            .ok_or_else(|| self.missing_sub_topic(topic_id, sub_topic_id))?
            .questions
            .len();
        ensure_indices(from, to, len)?;
        self.store
            .reorder_questions(topic_id, sub_topic_id, from, to);
        Ok(())
    }

    pub fn move_question_onto(
        &mut self,
        topic_id: TopicId,
        sub_topic_id: SubTopicId,
        active: QuestionId,
        over: QuestionId,
    ) -> Result<(), SheetServiceError> {
        let sub_topic = self
            .store
            .sheet()
            .sub_topic(topic_id, sub_topic_id)
            .ok_or_else(|| self.missing_sub_topic(topic_id, sub_topic_id))?;
        let resolve = |question_id| {
            sub_topic
                .question_index(question_id)
                .ok_or(SheetServiceError::QuestionNotFound {
                    topic_id,
                    sub_topic_id,
                    question_id,
                })
        };
        let from = resolve(active)?;
        let to = resolve(over)?;
        if from != to {
            self.store
                .reorder_questions(topic_id, sub_topic_id, from, to);
        }
        Ok(())
    }

    fn ensure_topic(&self, topic_id: TopicId) -> Result<(), SheetServiceError> {
        self.store
            .sheet()
            .topic(topic_id)
            .map(|_| ())
            .ok_or(SheetServiceError::TopicNotFound(topic_id))
    }

    fn ensure_sub_topic(
        &self,
        topic_id: TopicId,
        sub_topic_id: SubTopicId,
    ) -> Result<(), SheetServiceError> {
        self.store
            .sheet()
            .sub_topic(topic_id, sub_topic_id)
            .map(|_| ())
            .ok_or_else(|| self.missing_sub_topic(topic_id, sub_topic_id))
    }

    fn ensure_question(
        &self,
        topic_id: TopicId,
        sub_topic_id: SubTopicId,
        question_id: QuestionId,
    ) -> Result<(), SheetServiceError> {
        self.ensure_sub_topic(topic_id, sub_topic_id)?;
        self.store
            .sheet()
            .question(topic_id, sub_topic_id, question_id)
            .map(|_| ())
            .ok_or(SheetServiceError::QuestionNotFound {
                topic_id,
                sub_topic_id,
                question_id,
            })
    }

    /// Reports the highest missing level of a sub-topic path.
    fn missing_sub_topic(&self, topic_id: TopicId, sub_topic_id: SubTopicId) -> SheetServiceError {
        if self.store.sheet().topic(topic_id).is_none() {
            return SheetServiceError::TopicNotFound(topic_id);
        }
        SheetServiceError::SubTopicNotFound {
            topic_id,
            sub_topic_id,
        }
    }
}

/// Trims a title; blank input is rejected.
pub fn normalize_title(value: &str) -> Result<String, SheetServiceError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(SheetServiceError::InvalidTitle);
    }
    Ok(trimmed.to_string())
}

/// Trims a link; blank input means no link.
pub fn normalize_link(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|link| !link.is_empty())
        .map(str::to_string)
}

fn ensure_indices(from: usize, to: usize, len: usize) -> Result<(), SheetServiceError> {
    if in_bounds(len, from, to) {
        return Ok(());
    }
    Err(SheetServiceError::IndexOutOfRange { from, to, len })
}
