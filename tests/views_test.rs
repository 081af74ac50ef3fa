//! Join view and question aggregate integration tests
//!
//! These run against the example data set, which gives every view users
//! with and without joined rows.

mod helpers;

use kahoot_store::database::schema::tables;
use kahoot_store::models::{KahootQuestion, QuestionKind};
use serial_test::serial;

use helpers::*;

#[tokio::test]
#[serial]
async fn test_seed_loads_every_table() {
    let test_db = TestDatabase::new().await;

    let summary = test_db.db.seed().await.expect("seed");
    assert_eq!(summary.users, 3);
    assert_eq!(summary.kahoots, 4);
    assert_eq!(summary.slides, 4);

    for (table, expected) in [
        (tables::SUBSCRIPTIONS, summary.subscriptions),
        (tables::USERS, summary.users),
        (tables::KAHOOT_OWNERS, summary.kahoot_owners),
        (tables::GROUP_MEMBERS, summary.group_members),
        (tables::WRITTEN_ANSWERS, summary.written_answers),
        (tables::TRUE_FALSE_QUESTIONS, summary.true_false_questions),
    ] {
        assert_eq!(test_db.count_records(table).await, expected as i64, "{table}");
    }

    // usernames are unique, so a second load is rejected
    assert!(test_db.db.seed().await.is_err());
}

#[tokio::test]
#[serial]
async fn test_owned_kahoots_view_keeps_users_without_kahoots() {
    let test_db = TestDatabase::new().await;
    test_db.db.seed().await.expect("seed");

    let rows = test_db.db.views.users_with_owned_kahoots().await.expect("view");
    let pairs: Vec<(i32, Option<i32>)> = rows.iter().map(|row| (row.user_id, row.kahoot_id)).collect();
    assert_eq!(pairs, vec![(1, Some(1)), (1, Some(2)), (2, Some(1)), (3, None)]);

    let lonely = &rows[3];
    assert_eq!(lonely.username, "user5");
    assert_eq!(lonely.title, None);
    assert_eq!(lonely.is_private, None);
    assert_eq!(rows[0].title.as_deref(), Some("My first kahoot"));
    assert_eq!(rows[0].is_private, Some(false));
}

#[tokio::test]
#[serial]
async fn test_join_views_are_order_deterministic() {
    let test_db = TestDatabase::new().await;
    test_db.db.seed().await.expect("seed");
    let views = &test_db.db.views;

    assert_eq!(
        views.users_with_owned_kahoots().await.expect("first"),
        views.users_with_owned_kahoots().await.expect("second")
    );
    assert_eq!(
        views.users_with_favorite_kahoots().await.expect("first"),
        views.users_with_favorite_kahoots().await.expect("second")
    );

    let groups = views.users_with_groups().await.expect("first");
    assert_eq!(groups, views.users_with_groups().await.expect("second"));
    let user_ids: Vec<i32> = groups.iter().map(|row| row.user_id).collect();
    let mut sorted = user_ids.clone();
    sorted.sort();
    assert_eq!(user_ids, sorted);
    assert_eq!(groups[0].group_name.as_deref(), Some("Teachers"));
}

#[tokio::test]
#[serial]
async fn test_deleted_user_leaves_orphaned_favorite_out_of_view() {
    let test_db = TestDatabase::new().await;
    let db = &test_db.db;
    db.seed().await.expect("seed");

    db.users.delete_by_username("jane_smith").await.expect("delete");

    let rows = db.views.users_with_favorite_kahoots().await.expect("view");
    assert!(rows.iter().all(|row| row.username != "jane_smith"));
    // the junction row itself survives with a null user
    let orphans = db
        .favorites
        .list()
        .await
        .expect("favorites")
        .into_iter()
        .filter(|favorite| favorite.users_id.is_none())
        .count();
    assert_eq!(orphans, 1);
}

#[tokio::test]
#[serial]
async fn test_kahoot_questions_are_tagged_and_ordered_by_kind() {
    let test_db = TestDatabase::new().await;
    test_db.db.seed().await.expect("seed");

    let questions = test_db.db.views.kahoot_questions(1).await.expect("questions");
    let kinds: Vec<QuestionKind> = questions.iter().map(KahootQuestion::kind).collect();
    assert_eq!(
        kinds,
        vec![
            QuestionKind::TrueFalse,
            QuestionKind::TrueFalse,
            QuestionKind::Written,
            QuestionKind::Written,
            QuestionKind::Slide,
            QuestionKind::Slide,
            QuestionKind::Slide,
            QuestionKind::Slide,
        ]
    );
    assert_eq!(questions[0].question(), Some("The earth is flat"));
    assert_eq!(questions[2].question(), Some("What is 2+2?"));
    assert_eq!(questions[4].question(), Some("Intro slide"));
    assert_eq!(questions[6].question(), None);

    let value = serde_json::to_value(&questions).expect("serialize");
    assert_eq!(value[4]["type"], "slide");
    assert_eq!(value[4]["question"], "Intro slide");

    assert!(test_db.db.views.kahoot_questions(99).await.expect("empty").is_empty());
}

#[tokio::test]
#[serial]
async fn test_report_bundles_all_views() {
    let test_db = TestDatabase::new().await;
    test_db.db.seed().await.expect("seed");

    let report = test_db.db.report().await.expect("report");
    assert_eq!(report.owned_kahoots.len(), 4);
    assert_eq!(report.favorite_kahoots.len(), 4);
    assert_eq!(report.groups.len(), 4);

    let json = serde_json::to_value(&report).expect("serialize");
    assert!(json["groups"].is_array());
}
