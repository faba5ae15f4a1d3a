use std::sync::Arc;

use chrono::Duration;
use decifra_core::model::{
    Identity, Language, MainLanguage, Profile, Question, QuizOutcome, ResultId, ResultRecord,
    Topic, UserId,
};
use decifra_core::time::fixed_now;
use storage::bank::StaticQuestionBank;
use storage::repository::{
    InMemoryRepository, ProfileRepository, ResultRepository, ResultRow, Storage, StorageError,
};

use super::test_harness::{
    ViewKind, setup_view_harness, setup_view_harness_with_bank, setup_view_harness_with_storage,
};

fn results_view(topic: &str, score: u32, total: u32) -> ViewKind {
    ViewKind::Results {
        topic: topic.to_string(),
        score,
        total,
    }
}

#[tokio::test(flavor = "current_thread")]
async fn home_view_smoke_lists_tracks_with_counts() {
    let mut harness = setup_view_harness(ViewKind::Home, Identity::Anonymous);
    harness.rebuild();
    let html = harness.render();

    for title in ["Java", "Python", "SQL", "JavaScript", "Modo Rápido"] {
        assert!(html.contains(title), "missing {title} in {html}");
    }
    assert!(html.contains("4 questões"), "missing sql count in {html}");
    assert!(html.contains("19 questões"), "missing quick mode count in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_renders_first_question() {
    let question = Question::new(
        "Qual é o resultado?",
        Some("int x = 5;\nSystem.out.println(++x * 2);".to_string()),
        vec!["10".into(), "12".into(), "11".into()],
        1,
    )
    .unwrap();
    let bank = Arc::new(StaticQuestionBank::from_pools([(Language::Java, vec![question])]));
    let mut harness = setup_view_harness_with_bank(
        ViewKind::Quiz("java".to_string()),
        Identity::Anonymous,
        bank,
    );
    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();

    assert!(html.contains("Questão 1 de 1"), "missing position in {html}");
    assert!(html.contains("Qual é o resultado?"), "missing prompt in {html}");
    assert!(html.contains("++x * 2"), "missing snippet in {html}");
    assert!(html.contains("30s"), "missing countdown in {html}");
    assert!(html.contains("0 pts"), "missing score in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_reports_empty_question_set() {
    let bank = Arc::new(StaticQuestionBank::from_pools(Vec::<(Language, Vec<Question>)>::new()));
    let mut harness = setup_view_harness_with_bank(
        ViewKind::Quiz("cobol".to_string()),
        Identity::Anonymous,
        bank,
    );
    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();

    assert!(
        html.contains("Não foi possível iniciar o quiz"),
        "missing error in {html}"
    );
    assert!(html.contains("Voltar ao Início"), "missing home link in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn results_view_smoke_renders_breakdown() {
    let mut harness = setup_view_harness(results_view("java", 200, 3), Identity::Anonymous);
    harness.rebuild();
    let html = harness.render();

    assert!(html.contains("Bom trabalho!"), "missing message in {html}");
    assert!(html.contains("★☆☆"), "missing stars in {html}");
    assert!(html.contains("200 pontos"), "missing score in {html}");
    assert!(html.contains("67%"), "missing accuracy in {html}");
    assert!(html.contains("Tentar Novamente"), "missing retry in {html}");
    assert!(html.contains("Voltar ao Início"), "missing home in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn results_view_records_a_fresh_outcome_once() {
    let user = UserId::random();
    let mut harness = setup_view_harness(results_view("python", 300, 4), Identity::User(user));
    let outcome = QuizOutcome::from_score(Topic::Language(Language::Python), 300, 4, 100);
    harness.ctx.stash_outcome(outcome);

    harness.rebuild();
    harness.drive_async().await;
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("Resultado salvo no seu perfil!"), "missing saved in {html}");

    let rows = harness.storage.results.list_results(user, 10).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].record.score, 300);
    assert_eq!(rows[0].record.accuracy, 75);
    assert!(harness.ctx.take_pending_outcome().is_none());
}

#[tokio::test(flavor = "current_thread")]
async fn results_view_revisit_does_not_record() {
    let user = UserId::random();
    let mut harness = setup_view_harness(results_view("sql", 400, 4), Identity::User(user));

    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();
    assert!(!html.contains("Resultado salvo"), "unexpected save in {html}");

    let rows = harness.storage.results.list_results(user, 10).await.unwrap();
    assert!(rows.is_empty());
}

#[tokio::test(flavor = "current_thread")]
async fn results_view_anonymous_shows_sign_in_hint() {
    let mut harness = setup_view_harness(results_view("random", 100, 2), Identity::Anonymous);
    harness
        .ctx
        .stash_outcome(QuizOutcome::from_score(Topic::Random, 100, 2, 100));

    harness.rebuild();
    harness.drive_async().await;
    harness.drive_async().await;
    let html = harness.render();
    assert!(
        html.contains("Entre com seu usuário para salvar"),
        "missing hint in {html}"
    );
}

struct FailingResultRepo;

#[async_trait::async_trait]
impl ResultRepository for FailingResultRepo {
    async fn append_result(&self, _record: &ResultRecord) -> Result<ResultId, StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }

    async fn list_results(
        &self,
        _user_id: UserId,
        _limit: u32,
    ) -> Result<Vec<ResultRow>, StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }
}

fn failing_storage() -> Storage {
    Storage {
        results: Arc::new(FailingResultRepo),
        profiles: Arc::new(InMemoryRepository::new()),
    }
}

#[tokio::test(flavor = "current_thread")]
async fn results_view_reports_save_failure() {
    let user = UserId::random();
    let mut harness = setup_view_harness_with_storage(
        results_view("java", 500, 5),
        Identity::User(user),
        failing_storage(),
    );
    harness
        .ctx
        .stash_outcome(QuizOutcome::from_score(Topic::Language(Language::Java), 500, 5, 100));

    harness.rebuild();
    harness.drive_async().await;
    harness.drive_async().await;
    let html = harness.render();
    assert!(
        html.contains("Não foi possível salvar o resultado."),
        "missing failure notice in {html}"
    );
    assert!(html.contains("Excelente!"), "missing message in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn profile_view_reports_load_failure() {
    let mut harness = setup_view_harness_with_storage(
        ViewKind::Profile,
        Identity::User(UserId::random()),
        failing_storage(),
    );
    harness.rebuild();
    harness.drive_async().await;
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("Algo deu errado"), "missing error in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn profile_view_anonymous_shows_hint() {
    let mut harness = setup_view_harness(ViewKind::Profile, Identity::Anonymous);
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Entre com seu usuário"), "missing hint in {html}");
    assert!(!html.contains("Histórico"), "unexpected history in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn profile_view_smoke_renders_stats_and_history() {
    let user = UserId::random();
    let mut harness = setup_view_harness(ViewKind::Profile, Identity::User(user));
    let now = fixed_now();

    let profile = Profile::new(user, "Ana", MainLanguage::Python, now).unwrap();
    harness.storage.profiles.upsert_profile(&profile).await.unwrap();
    for (score, accuracy, minutes) in [(200, 50, 0), (400, 100, 10)] {
        let record = ResultRecord {
            user_id: user,
            topic: Topic::Language(Language::Java),
            score,
            accuracy,
            total_questions: 4,
            recorded_at: now + Duration::minutes(minutes),
        };
        harness.storage.results.append_result(&record).await.unwrap();
    }

    harness.rebuild();
    harness.drive_async().await;
    harness.drive_async().await;
    let html = harness.render();

    assert!(html.contains("Ana"), "missing name in {html}");
    assert!(html.contains("Python"), "missing language in {html}");
    assert!(html.contains("Melhor pontuação"), "missing stats in {html}");
    assert!(html.contains("75%"), "missing average accuracy in {html}");
    let newest = html.find("400 pts").expect("newest row");
    let oldest = html.find("200 pts").expect("oldest row");
    assert!(newest < oldest, "history not newest first: {html}");
}
