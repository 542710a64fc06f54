//! Built-in starter sheet shown on first launch.

use crate::model::sheet::{Difficulty, Question, QuestionDraft, Sheet, SubTopic, Topic};
use std::sync::Arc;

type SeedQuestion = (&'static str, Difficulty, bool);

const TWO_SUM_LINK: &str = "https://leetcode.com/problems/two-sum";

const SEED: &[(&str, &[(&str, &[SeedQuestion])])] = &[
    (
        "Arrays & Hashing",
        &[
            (
                "Basic Array Operations",
                &[
                    ("Two Sum", Difficulty::Easy, false),
                    ("Contains Duplicate", Difficulty::Easy, true),
                    ("Valid Anagram", Difficulty::Easy, false),
                ],
            ),
            (
                "Advanced Hashing",
                &[
                    ("Group Anagrams", Difficulty::Medium, false),
                    ("Top K Frequent Elements", Difficulty::Medium, true),
                ],
            ),
        ],
    ),
    (
        "Linked Lists",
        &[(
            "Singly Linked List",
            &[
                ("Reverse Linked List", Difficulty::Easy, false),
                ("Merge Two Sorted Lists", Difficulty::Easy, false),
            ],
        )],
    ),
    (
        "Binary Trees",
        &[
            (
                "Tree Traversals",
                &[
                    ("Inorder Traversal", Difficulty::Easy, false),
                    ("Level Order Traversal", Difficulty::Medium, false),
                    ("Maximum Depth", Difficulty::Easy, true),
                ],
            ),
            (
                "BST Operations",
                &[
                    ("Validate BST", Difficulty::Medium, false),
                    ("Lowest Common Ancestor", Difficulty::Medium, false),
                ],
            ),
        ],
    ),
    (
        "Dynamic Programming",
        &[
            (
                "1D DP",
                &[
                    ("Climbing Stairs", Difficulty::Easy, true),
                    ("House Robber", Difficulty::Medium, false),
                    ("Longest Increasing Subsequence", Difficulty::Medium, false),
                ],
            ),
            (
                "2D DP",
                &[
                    ("Unique Paths", Difficulty::Medium, false),
                    ("Edit Distance", Difficulty::Hard, false),
                ],
            ),
        ],
    ),
];

/// Builds the starter sheet with freshly generated ids.
pub fn default_sheet() -> Sheet {
    let topics = SEED
        .iter()
        .map(|(topic_title, sub_topics)| {
            let mut topic = Topic::new(*topic_title);
            topic.sub_topics = sub_topics
                .iter()
                .map(|(sub_topic_title, questions)| {
                    let mut sub_topic = SubTopic::new(*sub_topic_title);
                    sub_topic.questions = questions
                        .iter()
                        .map(|seed| Arc::new(Question::from_draft(seed_draft(seed))))
                        .collect();
                    Arc::new(sub_topic)
                })
                .collect();
            topic
        })
        .collect();
    Sheet::new(topics)
}

fn seed_draft(&(title, difficulty, completed): &SeedQuestion) -> QuestionDraft {
    let draft = QuestionDraft::new(title, difficulty).completed(completed);
    if title == "Two Sum" {
        return draft.with_link(TWO_SUM_LINK);
    }
    draft
}
