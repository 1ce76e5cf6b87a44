//! `ReviewService` over in-memory and on-disk stores.

use std::collections::BTreeMap;

use pretty_assertions::assert_eq;
use rand::SeedableRng;
use rand::rngs::StdRng;
use revq_config::RevqConfig;
use revq_core::columns::ColumnKey;
use revq_core::enums::{EvaluationAction, Tier};
use revq_core::table::Table;
use revq_engine::{
    AnswerSheet, AttributeRange, EditableFilter, EngineError, Ledger, RangeFilter, ReviewService,
    Submission,
};
use revq_store::{JsonlStore, MemoryStore, TableStore};

fn config() -> RevqConfig {
    let mut config = RevqConfig::default();
    config.reviewers = BTreeMap::from([
        ("r1".to_string(), "Reviewer One".to_string()),
        ("r2".to_string(), "Reviewer Two".to_string()),
    ]);
    config
}

fn articles() -> Table {
    let mut t = Table::new(["Title", "Abstract", "Year", "Citations"]).unwrap();
    for (title, year, citations) in [("A", "2020", "5"), ("B", "2019", "10"), ("C", "2021", "1")] {
        t.push_row(vec![
            Some(title.to_string()),
            Some(format!("About {title}")),
            Some(year.to_string()),
            Some(citations.to_string()),
        ])
        .unwrap();
    }
    t
}

fn answers(service: &ReviewService<MemoryStore>, values: &[&str]) -> Submission {
    let values: Vec<String> = values.iter().map(|v| (*v).to_string()).collect();
    Submission::Answers(AnswerSheet::from_ordered(service.aspects(), &values).unwrap())
}

async fn open(results: MemoryStore) -> ReviewService<MemoryStore> {
    let catalog_store = MemoryStore::new().with_table("2023", articles());
    ReviewService::open(&config(), &catalog_store, results).await.unwrap()
}

#[tokio::test]
async fn queue_submit_and_priority_handoff() {
    let mut service = open(MemoryStore::new()).await;
    let mut rng = StdRng::seed_from_u64(1);

    let r1 = service.authenticate("r1", "reviewer one").unwrap();
    let shown = service.present(&r1, &mut rng).unwrap().unwrap();
    assert_eq!(shown.article.title, "C");
    assert_eq!(shown.tier, Some(Tier::Fallback));
    assert_eq!(shown.aspects.len(), 3);

    let submission = answers(&service, &["4", "3", "5"]);
    let resp = service.submit(&r1, "C", &submission).await.unwrap();
    assert_eq!(resp.action, EvaluationAction::Submitted);
    assert_eq!(resp.answers[0].value, "4 - High");
    assert!(resp.evaluated_at.is_some());

    let stored = service.results_store().table("results").unwrap();
    assert!(stored.has_column("r1/Aspect 1"));
    assert!(stored.has_column("r1/EvaluationDate"));

    let r2 = service.authenticate("r2", "Reviewer Two").unwrap();
    let shown = service.present(&r2, &mut rng).unwrap().unwrap();
    assert_eq!(shown.article.title, "C");
    assert_eq!(shown.tier, Some(Tier::Priority));
}

#[tokio::test]
async fn failed_commit_keeps_previous_state() {
    let mut service = open(MemoryStore::new()).await;
    let r1 = service.authenticate("r1", "Reviewer One").unwrap();
    service.submit(&r1, "C", &Submission::Skip).await.unwrap();
    let before_ledger = service.ledger().clone();
    let before_table = service.results_store().table("results").unwrap();

    service.results_store().set_fail_saves(true);
    let submission = answers(&service, &["1", "1", "1"]);
    let err = service.submit(&r1, "A", &submission).await.unwrap_err();
    assert!(matches!(err, EngineError::Store(_)), "got {err}");
    assert_eq!(service.ledger(), &before_ledger);
    assert_eq!(service.results_store().table("results").unwrap(), before_table);

    // A stays in the queue once the store recovers.
    service.results_store().set_fail_saves(false);
    let mut rng = StdRng::seed_from_u64(1);
    let shown = service.present(&r1, &mut rng).unwrap().unwrap();
    assert_eq!(shown.article.title, "A");
}

#[tokio::test]
async fn resume_prefills_and_keeps_timestamp() {
    let mut service = open(MemoryStore::new()).await;
    let mut session = service.authenticate("r1", "Reviewer One").unwrap();

    let submission = answers(&service, &["2", "2", "2"]);
    let first = service.submit(&session, "B", &submission).await.unwrap();

    session.resume("B");
    let mut rng = StdRng::seed_from_u64(1);
    let shown = service.present(&session, &mut rng).unwrap().unwrap();
    assert_eq!(shown.tier, None);
    assert_eq!(shown.evaluated_at, first.evaluated_at);
    assert_eq!(shown.aspects[0].preselected.as_deref(), Some("2 - Low"));

    let submission = answers(&service, &["5", "5", "5"]);
    let second = service.submit(&session, "B", &submission).await.unwrap();
    assert_eq!(second.evaluated_at, first.evaluated_at);
    assert_eq!(
        service.ledger().get("B", &ColumnKey::answer("r1", "Aspect 3")),
        Some("5 - Very high")
    );

    let titles = service.editable(&session, &EditableFilter::default());
    assert_eq!(titles, vec!["B"]);
}

#[tokio::test]
async fn skipped_articles_can_be_listed_and_answered_later() {
    let mut service = open(MemoryStore::new()).await;
    let mut session = service.authenticate("r1", "Reviewer One").unwrap();
    service.submit(&session, "C", &Submission::Skip).await.unwrap();
    let submission = answers(&service, &["3", "3", "3"]);
    service.submit(&session, "A", &submission).await.unwrap();

    let filter = EditableFilter {
        skipped_only: true,
        day: None,
    };
    assert_eq!(service.editable(&session, &filter), vec!["C"]);

    session.resume("C");
    let mut rng = StdRng::seed_from_u64(1);
    let shown = service.present(&session, &mut rng).unwrap().unwrap();
    assert_eq!(shown.aspects[0].stored.as_deref(), Some("SKIPPED"));
    assert_eq!(shown.aspects[0].preselected, None);
}

#[tokio::test]
async fn ranges_narrow_the_queue() {
    let service = open(MemoryStore::new()).await;
    let mut session = service.authenticate("r1", "Reviewer One").unwrap();
    session.set_range("Year", AttributeRange::new(2019, 2020));

    let mut rng = StdRng::seed_from_u64(1);
    let shown = service.present(&session, &mut rng).unwrap().unwrap();
    assert_eq!(shown.article.title, "A");

    let summary = service.summary(&session.ranges);
    assert_eq!(summary.total, 3);
    assert_eq!(summary.filtered, 2);
    assert_eq!(summary.bounds[0].attribute, "Year");
    assert_eq!((summary.bounds[0].min, summary.bounds[0].max), (2019, 2021));

    let nothing = RangeFilter::from([("Year".to_string(), AttributeRange::new(1990, 1999))]);
    let empty = session.clone().with_ranges(nothing);
    assert!(service.present(&empty, &mut rng).unwrap().is_none());
}

#[tokio::test]
async fn bad_credentials_are_rejected() {
    let service = open(MemoryStore::new()).await;
    assert!(matches!(
        service.authenticate("r1", "Reviewer Two"),
        Err(EngineError::InvalidCredentials { .. })
    ));
    assert!(service.authenticate("r3", "Anyone").is_err());
}

#[tokio::test]
async fn unknown_titles_are_rejected() {
    let mut service = open(MemoryStore::new()).await;
    let session = service.authenticate("r1", "Reviewer One").unwrap();
    let err = service.submit(&session, "Z", &Submission::Skip).await.unwrap_err();
    assert!(matches!(err, EngineError::UnknownArticle { .. }));
    assert_eq!(service.results_store().save_count(), 0);
}

#[tokio::test]
async fn titles_that_left_the_catalog_resolve_from_the_ledger() {
    let mut results = Table::new(["Title", "Abstract", "r2/Aspect 1"]).unwrap();
    results
        .push_row(vec![
            Some("Retracted".to_string()),
            Some("Gone from the sources".to_string()),
            Some("SKIPPED".to_string()),
        ])
        .unwrap();
    let service = open(MemoryStore::new().with_table("results", results)).await;

    let article = service.resolve_article("Retracted").unwrap();
    assert_eq!(article.abstract_text, "Gone from the sources");
    assert!(article.attributes.is_empty());
    // Not in the catalog, so never offered by the queue.
    let session = service.authenticate("r1", "Reviewer One").unwrap();
    let mut rng = StdRng::seed_from_u64(1);
    let shown = service.present(&session, &mut rng).unwrap().unwrap();
    assert_eq!(shown.tier, Some(Tier::Fallback));
}

#[tokio::test]
async fn missing_catalog_columns_halt_the_session() {
    let mut bad = Table::new(["Title", "Year"]).unwrap();
    bad.push_row(vec![Some("A".to_string()), Some("2020".to_string())])
        .unwrap();
    let catalog_store = MemoryStore::new().with_table("2023", bad);

    let err = ReviewService::open(&config(), &catalog_store, MemoryStore::new())
        .await
        .err()
        .unwrap();
    match err {
        EngineError::MissingColumns { columns } => assert_eq!(columns, vec!["Abstract", "Citations"]),
        other => panic!("unexpected: {other}"),
    }
}

#[tokio::test]
async fn unreadable_results_table_halts_the_session() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("results.jsonl"), "not json\n").unwrap();
    let catalog_store = MemoryStore::new().with_table("2023", articles());

    let err = ReviewService::open(&config(), &catalog_store, JsonlStore::new(dir.path()))
        .await
        .err()
        .unwrap();
    assert!(matches!(err, EngineError::Store(_)), "got {err}");
}

#[tokio::test]
async fn committed_ledger_roundtrips_through_jsonl() {
    let dir = tempfile::tempdir().unwrap();
    let catalog_store = MemoryStore::new().with_table("2023", articles());
    let mut service = ReviewService::open(&config(), &catalog_store, JsonlStore::new(dir.path()))
        .await
        .unwrap();

    let r1 = service.authenticate("r1", "Reviewer One").unwrap();
    let r2 = service.authenticate("r2", "Reviewer Two").unwrap();
    service.submit(&r1, "C", &Submission::Skip).await.unwrap();
    let sheet = AnswerSheet::from_ordered(
        service.aspects(),
        &["1".to_string(), "2".to_string(), "3".to_string()],
    )
    .unwrap();
    service.submit(&r2, "C", &Submission::Answers(sheet)).await.unwrap();

    let store = JsonlStore::new(dir.path());
    let loaded = store.load("results").await.unwrap();
    let ledger = Ledger::from_table(&loaded).unwrap();
    assert_eq!(&ledger, service.ledger());
    store.save("results", &ledger.to_table().unwrap()).await.unwrap();
    assert!(store.load("results").await.unwrap().equivalent(&loaded));

    // A fresh session sees the same history.
    let reopened = ReviewService::open(&config(), &catalog_store, JsonlStore::new(dir.path()))
        .await
        .unwrap();
    assert_eq!(reopened.ledger().reviewed_by("r2").len(), 1);
}
