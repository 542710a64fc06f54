//! Sheet store: owned topic tree with copy-on-write mutations.
//!
//! # Responsibility
//! - Hold the current `Arc<Sheet>` snapshot and its revision counter.
//! - Apply topic / sub-topic / question CRUD and reordering.
//! - Notify subscribers after each applied mutation.
//!
//! # Invariants
//! - Paths are resolved against the current snapshot before any write, so
//!   an unresolved path never clones or replaces a node.
//! - Writes go through `Arc::make_mut` along root -> target only; sibling
//!   subtrees keep pointer identity.
//! - Unknown ids and out-of-range indices are silent no-ops: no error, no
//!   revision bump, no notification.
//! - Every id in the held tree is unique; `with_sheet` rejects trees that
//!   repeat one.
//! - Titles and links are stored verbatim; validation belongs to
//!   `service::sheet_service`.

use crate::config::SheetConfig;
use crate::model::ids::{EntityId, QuestionId, SubTopicId, TopicId};
use crate::model::progress::Progress;
use crate::model::sheet::{Question, QuestionDraft, QuestionPatch, Sheet, SubTopic, Topic};
use crate::ordering::{array_move, in_bounds};
use crate::store::seed::default_sheet;
use crate::store::subscription::{Subscribers, SubscriptionId};
use log::{debug, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

/// Errors from building a store around an existing tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SheetStoreError {
    /// The same id appears more than once in the tree.
    DuplicateId(EntityId),
}

impl Display for SheetStoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateId(id) => write!(f, "sheet contains duplicate id: {id}"),
        }
    }
}

impl Error for SheetStoreError {}

/// Single owner of the topic tree.
#[derive(Debug, Default)]
pub struct SheetStore {
    sheet: Arc<Sheet>,
    revision: u64,
    subscribers: Subscribers,
}

impl SheetStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that starts from `sheet`.
    ///
    /// # Errors
    /// - `DuplicateId` when any topic, sub-topic or question id repeats.
    pub fn with_sheet(sheet: Sheet) -> Result<Self, SheetStoreError> {
        if let Some(id) = sheet.duplicate_id() {
            warn!("event=store_init module=store status=error reason=duplicate_id id={id}");
            return Err(SheetStoreError::DuplicateId(id));
        }
        Ok(Self::from_unique(sheet))
    }

    /// Creates a store holding the built-in starter sheet.
    pub fn seeded() -> Self {
        // Seed ids come fresh from `generate_id`.
        Self::from_unique(default_sheet())
    }

    fn from_unique(sheet: Sheet) -> Self {
        Self {
            sheet: Arc::new(sheet),
            revision: 0,
            subscribers: Subscribers::new(),
        }
    }

    /// Creates a store according to runtime configuration.
    pub fn from_config(config: &SheetConfig) -> Self {
        let store = if config.seed {
            Self::seeded()
        } else {
            Self::new()
        };
        info!(
            "event=store_init module=store status=ok seeded={} topics={} questions={}",
            config.seed,
            store.sheet.topics.len(),
            store.sheet.question_count()
        );
        store
    }

    /// Returns the current snapshot. Later mutations never alter it.
    pub fn snapshot(&self) -> Arc<Sheet> {
        Arc::clone(&self.sheet)
    }

    pub fn sheet(&self) -> &Sheet {
        &self.sheet
    }

    pub fn topics(&self) -> &[Arc<Topic>] {
        &self.sheet.topics
    }

    /// Number of applied mutations since construction.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Overall progress across every topic.
    pub fn progress(&self) -> Progress {
        self.sheet.progress()
    }

    /// Registers a listener that receives every new snapshot.
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&Arc<Sheet>) + Send + 'static,
    {
        self.subscribers.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscribers.unsubscribe(id)
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Appends a new empty topic at the end of the root sequence.
    pub fn add_topic(&mut self, title: impl Into<String>) -> TopicId {
        let topic = Topic::new(title);
        let topic_id = topic.id;
        self.topics_mut().push(Arc::new(topic));
        self.publish("topic_add");
        topic_id
    }

    /// Replaces the title of one topic.
    pub fn update_topic(&mut self, topic_id: TopicId, title: impl Into<String>) -> bool {
        let Some(ti) = self.sheet.topic_index(topic_id) else {
            return self.skip("topic_update", "topic_not_found");
        };
        self.topic_mut(ti).title = title.into();
        self.publish("topic_update")
    }

    /// Removes one topic with all of its sub-topics and questions.
    pub fn delete_topic(&mut self, topic_id: TopicId) -> bool {
        let Some(ti) = self.sheet.topic_index(topic_id) else {
            return self.skip("topic_delete", "topic_not_found");
        };
        self.topics_mut().remove(ti);
        self.publish("topic_delete")
    }

    /// Moves the topic at `from` to position `to`.
    pub fn reorder_topics(&mut self, from: usize, to: usize) -> bool {
        if !in_bounds(self.sheet.topics.len(), from, to) {
            return self.reject_indices("topic_reorder", from, to, self.sheet.topics.len());
        }
        if from == to {
            return true;
        }
        array_move(self.topics_mut(), from, to);
        self.publish("topic_reorder")
    }

    /// Appends a new empty sub-topic to one topic.
    pub fn add_sub_topic(
        &mut self,
        topic_id: TopicId,
        title: impl Into<String>,
    ) -> Option<SubTopicId> {
        let Some(ti) = self.sheet.topic_index(topic_id) else {
            self.skip("sub_topic_add", "topic_not_found");
            return None;
        };
        let sub_topic = SubTopic::new(title);
        let sub_topic_id = sub_topic.id;
        self.topic_mut(ti).sub_topics.push(Arc::new(sub_topic));
        self.publish("sub_topic_add");
        Some(sub_topic_id)
    }

    pub fn update_sub_topic(
        &mut self,
        topic_id: TopicId,
        sub_topic_id: SubTopicId,
        title: impl Into<String>,
    ) -> bool {
        let Some((ti, si)) = self.locate_sub_topic(topic_id, sub_topic_id) else {
            return self.skip("sub_topic_update", "path_not_found");
        };
        self.sub_topic_mut(ti, si).title = title.into();
        self.publish("sub_topic_update")
    }

    /// Removes one sub-topic with all of its questions.
    pub fn delete_sub_topic(&mut self, topic_id: TopicId, sub_topic_id: SubTopicId) -> bool {
        let Some((ti, si)) = self.locate_sub_topic(topic_id, sub_topic_id) else {
            return self.skip("sub_topic_delete", "path_not_found");
        };
        self.topic_mut(ti).sub_topics.remove(si);
        self.publish("sub_topic_delete")
    }

    pub fn reorder_sub_topics(&mut self, topic_id: TopicId, from: usize, to: usize) -> bool {
        let Some(ti) = self.sheet.topic_index(topic_id) else {
            return self.skip("sub_topic_reorder", "topic_not_found");
        };
        let len = self.sheet.topics[ti].sub_topics.len();
        if !in_bounds(len, from, to) {
            return self.reject_indices("sub_topic_reorder", from, to, len);
        }
        if from == to {
            return true;
        }
        array_move(&mut self.topic_mut(ti).sub_topics, from, to);
        self.publish("sub_topic_reorder")
    }

    /// Appends a question built from `draft` under a fresh id.
    pub fn add_question(
        &mut self,
        topic_id: TopicId,
        sub_topic_id: SubTopicId,
        draft: QuestionDraft,
    ) -> Option<QuestionId> {
        let Some((ti, si)) = self.locate_sub_topic(topic_id, sub_topic_id) else {
            self.skip("question_add", "path_not_found");
            return None;
        };
        let question = Question::from_draft(draft);
        let question_id = question.id;
        self.sub_topic_mut(ti, si)
            .questions
            .push(Arc::new(question));
        self.publish("question_add");
        Some(question_id)
    }

    /// Merges `patch` into one question; omitted fields are preserved.
    pub fn update_question(
        &mut self,
        topic_id: TopicId,
        sub_topic_id: SubTopicId,
        question_id: QuestionId,
        patch: QuestionPatch,
    ) -> bool {
        let Some((ti, si, qi)) = self.locate_question(topic_id, sub_topic_id, question_id) else {
            return self.skip("question_update", "path_not_found");
        };
        patch.apply_to(self.question_mut(ti, si, qi));
        self.publish("question_update")
    }

    pub fn delete_question(
        &mut self,
        topic_id: TopicId,
        sub_topic_id: SubTopicId,
        question_id: QuestionId,
    ) -> bool {
        let Some((ti, si, qi)) = self.locate_question(topic_id, sub_topic_id, question_id) else {
            return self.skip("question_delete", "path_not_found");
        };
        self.sub_topic_mut(ti, si).questions.remove(qi);
        self.publish("question_delete")
    }

    /// Flips the completion flag of one question.
    pub fn toggle_question(
        &mut self,
        topic_id: TopicId,
        sub_topic_id: SubTopicId,
        question_id: QuestionId,
    ) -> bool {
        let Some((ti, si, qi)) = self.locate_question(topic_id, sub_topic_id, question_id) else {
            return self.skip("question_toggle", "path_not_found");
        };
        let question = self.question_mut(ti, si, qi);
        question.completed = !question.completed;
        self.publish("question_toggle")
    }

    pub fn reorder_questions(
        &mut self,
        topic_id: TopicId,
        sub_topic_id: SubTopicId,
        from: usize,
        to: usize,
    ) -> bool {
        let Some((ti, si)) = self.locate_sub_topic(topic_id, sub_topic_id) else {
            return self.skip("question_reorder", "path_not_found");
        };
        let len = self.sheet.topics[ti].sub_topics[si].questions.len();
        if !in_bounds(len, from, to) {
            return self.reject_indices("question_reorder", from, to, len);
        }
        if from == to {
            return true;
        }
        array_move(&mut self.sub_topic_mut(ti, si).questions, from, to);
        self.publish("question_reorder")
    }

    fn locate_sub_topic(
        &self,
        topic_id: TopicId,
        sub_topic_id: SubTopicId,
    ) -> Option<(usize, usize)> {
        let ti = self.sheet.topic_index(topic_id)?;
        let si = self.sheet.topics[ti].sub_topic_index(sub_topic_id)?;
        Some((ti, si))
    }

    fn locate_question(
        &self,
        topic_id: TopicId,
        sub_topic_id: SubTopicId,
        question_id: QuestionId,
    ) -> Option<(usize, usize, usize)> {
        let (ti, si) = self.locate_sub_topic(topic_id, sub_topic_id)?;
        let qi = self.sheet.topics[ti].sub_topics[si].question_index(question_id)?;
        Some((ti, si, qi))
    }

    fn topics_mut(&mut self) -> &mut Vec<Arc<Topic>> {
        &mut Arc::make_mut(&mut self.sheet).topics
    }

    fn topic_mut(&mut self, ti: usize) -> &mut Topic {
        Arc::make_mut(&mut self.topics_mut()[ti])
    }

    fn sub_topic_mut(&mut self, ti: usize, si: usize) -> &mut SubTopic {
        Arc::make_mut(&mut self.topic_mut(ti).sub_topics[si])
    }

    fn question_mut(&mut self, ti: usize, si: usize, qi: usize) -> &mut Question {
        Arc::make_mut(&mut self.sub_topic_mut(ti, si).questions[qi])
    }

    fn publish(&mut self, event: &'static str) -> bool {
        self.revision += 1;
        debug!(
            "event={} module=store status=ok revision={}",
            event, self.revision
        );
        let snapshot = Arc::clone(&self.sheet);
        self.subscribers.notify(&snapshot);
        true
    }

    fn skip(&self, event: &'static str, reason: &'static str) -> bool {
        debug!(
            "event={} module=store status=noop reason={}",
            event, reason
        );
        false
    }

    fn reject_indices(&self, event: &'static str, from: usize, to: usize, len: usize) -> bool {
        warn!(
            "event={} module=store status=noop reason=index_out_of_range from={} to={} len={}",
            event, from, to, len
        );
        false
    }
}
