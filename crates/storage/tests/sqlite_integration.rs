use chrono::Duration;
use decifra_core::model::{Language, MainLanguage, Profile, ResultRecord, Topic, UserId};
use decifra_core::time::fixed_now;
use storage::repository::{ProfileRepository, ResultRepository, Storage};
use storage::seed::{SeedPlan, seed_sample_data};
use storage::sqlite::SqliteRepository;

async fn connect(name: &str) -> SqliteRepository {
    let url = format!("sqlite:file:{name}?mode=memory&cache=shared");
    let repo = SqliteRepository::connect(&url).await.expect("connect");
    repo.migrate().await.expect("migrate");
    repo
}

fn record(user_id: UserId, topic: Topic, score: u32, minutes: i64) -> ResultRecord {
    ResultRecord {
        user_id,
        topic,
        score,
        accuracy: 67,
        total_questions: 3,
        recorded_at: fixed_now() + Duration::minutes(minutes),
    }
}

#[tokio::test]
async fn results_roundtrip_newest_first() {
    let repo = connect("memdb_results").await;
    let user = UserId::random();
    let other = UserId::random();

    let first = repo
        .append_result(&record(user, Topic::Language(Language::Java), 200, 0))
        .await
        .unwrap();
    repo.append_result(&record(other, Topic::Random, 500, 1))
        .await
        .unwrap();
    let latest = repo
        .append_result(&record(user, Topic::Random, 100, 10))
        .await
        .unwrap();
    assert!(latest.value() > first.value());

    let rows = repo.list_results(user, 10).await.unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].id, latest);
    assert_eq!(rows[0].record.topic, Topic::Random);
    assert_eq!(rows[1].record, record(user, Topic::Language(Language::Java), 200, 0));

    let limited = repo.list_results(user, 1).await.unwrap();
    assert_eq!(limited.len(), 1);
    assert_eq!(limited[0].id, latest);
}

#[tokio::test]
async fn profile_upsert_keeps_creation_time() {
    let repo = connect("memdb_profiles").await;
    let user = UserId::random();
    assert!(repo.get_profile(user).await.unwrap().is_none());

    let created = Profile::new(user, "Ana", MainLanguage::Python, fixed_now()).unwrap();
    repo.upsert_profile(&created).await.unwrap();

    let renamed = Profile::new(
        user,
        "",
        MainLanguage::CSharp,
        fixed_now() + Duration::days(1),
    )
    .unwrap();
    repo.upsert_profile(&renamed).await.unwrap();

    let fetched = repo.get_profile(user).await.unwrap().unwrap();
    assert_eq!(fetched.display_name(), "Desenvolvedor");
    assert_eq!(fetched.main_language(), MainLanguage::CSharp);
    assert_eq!(fetched.created_at(), fixed_now());
}

#[tokio::test]
async fn migrations_are_idempotent() {
    let repo = connect("memdb_migrate_twice").await;
    repo.migrate().await.expect("second migrate");
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM schema_migrations")
        .fetch_one(repo.pool())
        .await
        .unwrap();
    assert_eq!(count, 1);
}

#[tokio::test]
async fn seeding_through_sqlite_storage() {
    let storage = Storage::sqlite("sqlite:file:memdb_seed?mode=memory&cache=shared")
        .await
        .expect("storage");
    let plan = SeedPlan {
        user_id: None,
        display_name: "Dev".into(),
        main_language: MainLanguage::Go,
        results: 3,
        now: fixed_now(),
    };
    let report = seed_sample_data(&storage, &plan).await.unwrap();
    let rows = storage.results.list_results(report.user_id, 10).await.unwrap();
    assert_eq!(rows.len(), 3);
    assert!(rows[0].record.recorded_at > rows[2].record.recorded_at);
}
