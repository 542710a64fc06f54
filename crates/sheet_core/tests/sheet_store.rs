use sheet_core::{
    generate_id, Difficulty, Progress, Question, QuestionDraft, QuestionId, QuestionPatch, Sheet,
    SheetConfig, SheetStore, SheetStoreError, SubTopic, SubTopicId, Topic, TopicId,
};
use std::sync::{Arc, Mutex};

type ArraysFixture = (SheetStore, TopicId, SubTopicId, QuestionId);

fn titles(store: &SheetStore) -> Vec<String> {
    store
        .topics()
        .iter()
        .map(|topic| topic.title.clone())
        .collect()
}

/// One topic "Arrays" / one sub-topic "Basics" / one open question "Two Sum".
fn arrays_store() -> ArraysFixture {
    let mut store = SheetStore::new();
    let topic_id = store.add_topic("Arrays");
    let sub_topic_id = store.add_sub_topic(topic_id, "Basics").unwrap();
    let question_id = store
        .add_question(
            topic_id,
            sub_topic_id,
            QuestionDraft::new("Two Sum", Difficulty::Easy),
        )
        .unwrap();
    (store, topic_id, sub_topic_id, question_id)
}

#[test]
fn toggle_completes_single_question_topic() {
    let (mut store, topic_id, sub_topic_id, question_id) = arrays_store();

    assert!(store.toggle_question(topic_id, sub_topic_id, question_id));

    let sheet = store.snapshot();
    assert!(sheet
        .question(topic_id, sub_topic_id, question_id)
        .unwrap()
        .completed);
    let topic = sheet.topic(topic_id).unwrap();
    assert_eq!(topic.progress().percent(), 100);
    assert!(topic.progress().is_complete());
}

#[test]
fn toggle_twice_restores_flag() {
    let (mut store, topic_id, sub_topic_id, question_id) = arrays_store();
    let before = store.snapshot();

    store.toggle_question(topic_id, sub_topic_id, question_id);
    store.toggle_question(topic_id, sub_topic_id, question_id);

    assert_eq!(*store.snapshot(), *before);
    assert_eq!(store.revision(), 5);
}

#[test]
fn add_sub_topic_appends_empty_section() {
    let (mut store, topic_id, sub_topic_id, _) = arrays_store();

    let new_id = store.add_sub_topic(topic_id, "New Section").unwrap();

    let topic = store.sheet().topic(topic_id).unwrap();
    assert_eq!(topic.sub_topics.len(), 2);
    assert_eq!(topic.sub_topics[0].id, sub_topic_id);
    assert_eq!(topic.sub_topics[1].id, new_id);
    assert_eq!(topic.sub_topics[1].title, "New Section");
    assert!(topic.sub_topics[1].questions.is_empty());
}

#[test]
fn add_topic_appends_at_end() {
    let mut store = SheetStore::new();
    store.add_topic("A");
    store.add_topic("B");
    let id = store.add_topic("C");

    assert_eq!(titles(&store), vec!["A", "B", "C"]);
    let last = store.topics().last().unwrap();
    assert_eq!(last.id, id);
    assert!(last.sub_topics.is_empty());
}

#[test]
fn reorder_topics_moves_first_to_last() {
    let mut store = SheetStore::new();
    for title in ["A", "B", "C"] {
        store.add_topic(title);
    }

    assert!(store.reorder_topics(0, 2));
    assert_eq!(titles(&store), vec!["B", "C", "A"]);

    assert!(store.reorder_topics(2, 0));
    assert_eq!(titles(&store), vec!["A", "B", "C"]);
}

#[test]
fn reorder_out_of_range_is_noop() {
    let mut store = SheetStore::seeded();
    let before = store.snapshot();
    let topic = &before.topics[0];
    let sub_topic = &topic.sub_topics[0];

    assert!(!store.reorder_topics(0, before.topics.len()));
    assert!(!store.reorder_sub_topics(topic.id, 5, 0));
    assert!(!store.reorder_questions(topic.id, sub_topic.id, 0, 3));
    assert!(!store.reorder_sub_topics(generate_id(), 0, 1));

    assert!(Arc::ptr_eq(&before, &store.snapshot()));
    assert_eq!(store.revision(), 0);
}

#[test]
fn reorder_sub_topics_and_questions_within_parent() {
    let mut store = SheetStore::seeded();
    let sheet = store.snapshot();
    let topic = &sheet.topics[0];
    let sub_topic = &topic.sub_topics[0];

    assert!(store.reorder_sub_topics(topic.id, 1, 0));
    assert!(store.reorder_questions(topic.id, sub_topic.id, 0, 2));

    let after = store.sheet().topic(topic.id).unwrap();
    assert_eq!(after.sub_topics[0].title, "Advanced Hashing");
    let questions = after.sub_topics[1]
        .questions
        .iter()
        .map(|question| question.title.as_str())
        .collect::<Vec<_>>();
    assert_eq!(
        questions,
        vec!["Contains Duplicate", "Valid Anagram", "Two Sum"]
    );
}

#[test]
fn update_question_preserves_untouched_fields() {
    let mut store = SheetStore::new();
    let topic_id = store.add_topic("T");
    let sub_topic_id = store.add_sub_topic(topic_id, "S").unwrap();
    let question_id = store
        .add_question(topic_id, sub_topic_id, QuestionDraft::new("X", Difficulty::Easy))
        .unwrap();

    assert!(store.update_question(
        topic_id,
        sub_topic_id,
        question_id,
        QuestionPatch::default().difficulty(Difficulty::Hard),
    ));

    let question = store
        .sheet()
        .question(topic_id, sub_topic_id, question_id)
        .unwrap()
        .clone();
    assert_eq!(question.id, question_id);
    assert_eq!(question.title, "X");
    assert_eq!(question.difficulty, Difficulty::Hard);
    assert_eq!(question.link, None);
    assert!(!question.completed);
}

#[test]
fn delete_unknown_sub_topic_leaves_tree_unchanged() {
    let mut store = SheetStore::seeded();
    let before = store.snapshot();
    let topic_id = before.topics[1].id;

    assert!(!store.delete_sub_topic(topic_id, generate_id()));

    assert_eq!(*store.snapshot(), *before);
    assert!(Arc::ptr_eq(&before, &store.snapshot()));
}

#[test]
fn unknown_ids_are_silent_noops_at_every_level() {
    let (mut store, topic_id, sub_topic_id, question_id) = arrays_store();
    let before = store.snapshot();
    let revision = store.revision();
    let ghost = generate_id();

    assert!(!store.update_topic(ghost, "x"));
    assert!(!store.delete_topic(ghost));
    assert_eq!(store.add_sub_topic(ghost, "x"), None);
    assert!(!store.update_sub_topic(topic_id, ghost, "x"));
    assert!(!store.update_sub_topic(ghost, sub_topic_id, "x"));
    assert_eq!(
        store.add_question(topic_id, ghost, QuestionDraft::new("x", Difficulty::Easy)),
        None
    );
    assert!(!store.update_question(topic_id, sub_topic_id, ghost, QuestionPatch::default()));
    assert!(!store.delete_question(ghost, sub_topic_id, question_id));
    assert!(!store.toggle_question(topic_id, ghost, question_id));
    assert!(!store.reorder_questions(topic_id, ghost, 0, 0));

    assert!(Arc::ptr_eq(&before, &store.snapshot()));
    assert_eq!(store.revision(), revision);
}

#[test]
fn sub_topic_scoped_to_its_topic() {
    let mut store = SheetStore::seeded();
    let sheet = store.snapshot();
    let first_topic = sheet.topics[0].id;
    let foreign_sub_topic = sheet.topics[1].sub_topics[0].id;

    assert!(!store.delete_sub_topic(first_topic, foreign_sub_topic));
    assert!(!store.update_sub_topic(first_topic, foreign_sub_topic, "moved"));
    assert_eq!(*store.snapshot(), *sheet);
}

#[test]
fn delete_topic_cascades_and_spares_siblings() {
    let mut store = SheetStore::seeded();
    let before = store.snapshot();
    let doomed = Arc::clone(&before.topics[2]);
    let total_before = before.question_count();

    assert!(store.delete_topic(doomed.id));

    let after = store.snapshot();
    assert_eq!(after.topics.len(), before.topics.len() - 1);
    assert!(after.topic(doomed.id).is_none());
    assert_eq!(
        after.question_count(),
        total_before - doomed.question_count()
    );
    for topic in after.topics.iter() {
        let original = before.topic(topic.id).unwrap();
        assert_eq!(topic.as_ref(), original);
    }
    assert!(Arc::ptr_eq(&before.topics[0], &after.topics[0]));
    assert!(Arc::ptr_eq(&before.topics[3], &after.topics[2]));
}

#[test]
fn delete_sub_topic_removes_its_questions() {
    let mut store = SheetStore::seeded();
    let sheet = store.snapshot();
    let topic = &sheet.topics[0];
    let doomed = &topic.sub_topics[0];

    assert!(store.delete_sub_topic(topic.id, doomed.id));

    let after = store.sheet().topic(topic.id).unwrap();
    assert_eq!(after.sub_topics.len(), 1);
    assert_eq!(after.question_count(), 2);
    assert!(store
        .sheet()
        .question(topic.id, doomed.id, doomed.questions[0].id)
        .is_none());
}

#[test]
fn delete_question_removes_only_target() {
    let (mut store, topic_id, sub_topic_id, question_id) = arrays_store();
    let keep = store
        .add_question(topic_id, sub_topic_id, QuestionDraft::new("Keep", Difficulty::Medium))
        .unwrap();

    assert!(store.delete_question(topic_id, sub_topic_id, question_id));

    let sub_topic = store.sheet().sub_topic(topic_id, sub_topic_id).unwrap();
    assert_eq!(sub_topic.questions.len(), 1);
    assert_eq!(sub_topic.questions[0].id, keep);
}

#[test]
fn rename_changes_title_only() {
    let (mut store, topic_id, sub_topic_id, _) = arrays_store();
    let before = store.snapshot();

    assert!(store.update_topic(topic_id, "Arrays II"));
    assert!(store.update_sub_topic(topic_id, sub_topic_id, "Warmup"));

    let topic = store.sheet().topic(topic_id).unwrap();
    assert_eq!(topic.title, "Arrays II");
    assert_eq!(topic.sub_topics[0].title, "Warmup");
    assert_eq!(topic.sub_topics[0].id, sub_topic_id);
    assert_eq!(
        topic.sub_topics[0].questions,
        before.topics[0].sub_topics[0].questions
    );
}

#[test]
fn progress_agrees_across_levels() {
    let mut store = SheetStore::seeded();
    let sheet = store.snapshot();
    let topic = &sheet.topics[3];
    let sub_topic = &topic.sub_topics[1];
    store.toggle_question(topic.id, sub_topic.id, sub_topic.questions[1].id);
    store.delete_question(topic.id, topic.sub_topics[0].id, topic.sub_topics[0].questions[0].id);

    let sheet = store.snapshot();
    let mut overall = Progress::default();
    for topic in &sheet.topics {
        let from_sub_topics: Progress = topic.sub_topics.iter().map(|s| s.progress()).sum();
        let from_questions: Progress = topic
            .sub_topics
            .iter()
            .flat_map(|s| s.questions.iter())
            .map(|q| Progress::leaf(q.completed))
            .sum();
        assert_eq!(topic.progress(), from_sub_topics);
        assert_eq!(topic.progress(), from_questions);
        overall = overall + topic.progress();
    }
    assert_eq!(store.progress(), overall);
    assert_eq!(overall, Progress::new(4, 16));
}

#[test]
fn outstanding_snapshot_is_not_affected_by_later_mutations() {
    let (mut store, topic_id, sub_topic_id, question_id) = arrays_store();
    let held = store.snapshot();

    store.toggle_question(topic_id, sub_topic_id, question_id);
    store.update_topic(topic_id, "Renamed");
    store.add_topic("Another");

    assert_eq!(held.topics.len(), 1);
    assert_eq!(held.topics[0].title, "Arrays");
    assert!(!held.topics[0].sub_topics[0].questions[0].completed);
}

#[test]
fn subscribers_receive_each_applied_snapshot() {
    let mut store = SheetStore::new();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let id = store.subscribe(move |sheet| sink.lock().unwrap().push(sheet.topics.len()));

    let topic_id = store.add_topic("A");
    store.add_topic("B");
    store.delete_topic(generate_id());
    store.delete_topic(topic_id);
    assert!(store.unsubscribe(id));
    store.add_topic("C");

    assert_eq!(*seen.lock().unwrap(), vec![1, 2, 1]);
    assert_eq!(store.subscriber_count(), 0);
    assert_eq!(store.revision(), 4);
}

#[test]
fn subscriber_snapshot_matches_store_state() {
    let mut store = SheetStore::seeded();
    let last = Arc::new(Mutex::new(None));
    let sink = Arc::clone(&last);
    store.subscribe(move |sheet| *sink.lock().unwrap() = Some(Arc::clone(sheet)));

    store.reorder_topics(3, 0);

    let published = last.lock().unwrap().clone().unwrap();
    assert!(Arc::ptr_eq(&published, &store.snapshot()));
    assert_eq!(published.topics[0].title, "Dynamic Programming");
}

#[test]
fn store_can_start_from_existing_sheet() {
    let mut topic = Topic::new("Graphs");
    topic.sub_topics.push(Arc::new(SubTopic::new("BFS")));
    let store = SheetStore::with_sheet(Sheet::new(vec![topic.clone()])).unwrap();

    assert_eq!(store.topics().len(), 1);
    assert_eq!(store.topics()[0].as_ref(), &topic);
}

#[test]
fn store_rejects_sheet_with_duplicate_topic_ids() {
    let id = generate_id();
    let sheet = Sheet::new(vec![
        Topic::with_id(id, "Arrays"),
        Topic::with_id(id, "Strings"),
    ]);

    let err = SheetStore::with_sheet(sheet).unwrap_err();
    assert_eq!(err, SheetStoreError::DuplicateId(id));
    assert!(err.to_string().contains(&id.to_string()));
}

#[test]
fn store_rejects_question_id_repeated_across_sub_topics() {
    let question_id = generate_id();
    let mut topic = Topic::new("Arrays");
    for title in ["Basics", "Two Pointers"] {
        let mut sub_topic = SubTopic::new(title);
        sub_topic.questions.push(Arc::new(Question::with_id(
            question_id,
            QuestionDraft::new("Two Sum", Difficulty::Easy),
        )));
        topic.sub_topics.push(Arc::new(sub_topic));
    }

    let err = SheetStore::with_sheet(Sheet::new(vec![topic])).unwrap_err();
    assert_eq!(err, SheetStoreError::DuplicateId(question_id));
}

#[test]
fn from_config_honors_seed_flag() {
    let seeded = SheetStore::from_config(&SheetConfig::default());
    assert_eq!(seeded.topics().len(), 4);

    let config = SheetConfig {
        seed: false,
        ..SheetConfig::default()
    };
    let empty = SheetStore::from_config(&config);
    assert!(empty.sheet().is_empty());
    assert_eq!(empty.progress(), Progress::default());
}
