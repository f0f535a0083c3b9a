//! Integration tests for glint-core
//!
//! These tests exercise the full fetch → aggregate → generate → append
//! pipeline, including HTTP-level gateway behavior against a mock provider
//! server and per-household failure isolation.

use glint_core::test_utils::{MockProviderServer, MockReply};
use glint_core::{
    Database, GeminiBackend, GenClient, InsightJob, LedgerStore, NewInsight, OpenAiBackend,
    TextGenerator, INSIGHT_SOURCE_SCHEDULED,
};

/// Seed a database with one household: a 500 monthly limit, an income of
/// 1000 and an older expense of 300.
fn scenario_db() -> Database {
    let db = Database::in_memory().unwrap();
    db.upsert_household("h1", 500.0).unwrap();
    db.insert_transaction("h1", "2024-05-02", "Salary", "Work", "income", Some(1000.0))
        .unwrap();
    db.insert_transaction(
        "h1",
        "2024-05-01",
        "Groceries",
        "Food",
        "expense",
        Some(300.0),
    )
    .unwrap();
    db
}

// =============================================================================
// Gateway Integration Tests (real HTTP against the mock provider)
// =============================================================================

#[tokio::test]
async fn test_gemini_happy_path() {
    let server = MockProviderServer::start().await;
    server.set_reply(MockReply::Text("Spend less on coffee.".to_string()));

    let backend = GeminiBackend::with_base_url("secret-key", "text-bison-001", &server.url());
    let text = backend.generate("prompt text").await.unwrap();
    assert_eq!(text, "Spend less on coffee.");

    // Request body carries the prompt and the fixed token bound
    let requests = server.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0]["prompt"]["text"], "prompt text");
    assert_eq!(requests[0]["maxOutputTokens"], 400);

    // Access key travels as a query parameter
    let queries = server.queries();
    assert_eq!(queries[0], "key=secret-key");
}

#[tokio::test]
async fn test_gemini_missing_candidates_yields_empty_text() {
    let server = MockProviderServer::start().await;
    server.set_reply(MockReply::MissingFields);

    let backend = GeminiBackend::with_base_url("k", "text-bison-001", &server.url());
    let text = backend.generate("prompt").await.unwrap();
    assert_eq!(text, "");
}

#[tokio::test]
async fn test_gemini_garbage_body_yields_empty_text() {
    let server = MockProviderServer::start().await;
    server.set_reply(MockReply::Garbage);

    let backend = GeminiBackend::with_base_url("k", "text-bison-001", &server.url());
    let text = backend.generate("prompt").await.unwrap();
    assert_eq!(text, "");
}

#[tokio::test]
async fn test_gemini_transport_failure_propagates() {
    // Nothing is listening here
    let backend = GeminiBackend::with_base_url("k", "text-bison-001", "http://127.0.0.1:1");
    assert!(backend.generate("prompt").await.is_err());
}

#[tokio::test]
async fn test_openai_happy_path() {
    let server = MockProviderServer::start().await;
    server.set_reply(MockReply::Text("Budget is on track.".to_string()));

    let backend = OpenAiBackend::with_base_url("sk-secret", &server.url());
    let text = backend.generate("prompt text").await.unwrap();
    assert_eq!(text, "Budget is on track.");

    let requests = server.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0]["model"], "gpt-3.5-turbo");
    assert_eq!(requests[0]["messages"][0]["role"], "user");
    assert_eq!(requests[0]["messages"][0]["content"], "prompt text");
    assert_eq!(requests[0]["max_tokens"], 400);

    // Bearer-token authentication
    assert_eq!(server.auth_headers()[0], "Bearer sk-secret");
}

#[tokio::test]
async fn test_openai_error_body_yields_empty_text() {
    let server = MockProviderServer::start().await;
    server.set_reply(MockReply::MissingFields);

    let backend = OpenAiBackend::with_base_url("sk", &server.url());
    let text = backend.generate("prompt").await.unwrap();
    assert_eq!(text, "");
}

// =============================================================================
// End-to-End Job Tests
// =============================================================================

#[tokio::test]
async fn test_end_to_end_scenario() {
    let db = scenario_db();
    let server = MockProviderServer::start().await;
    server.set_reply(MockReply::Text("Great month.".to_string()));

    let client = GenClient::Gemini(GeminiBackend::with_base_url(
        "k",
        "text-bison-001",
        &server.url(),
    ));
    let report = InsightJob::new(&db, client).run().await.unwrap();
    assert_eq!(report.succeeded(), 1);

    // The provider saw the exact prompt contract: limit, totals, then the
    // listing ordered newest-first exactly as the query returned it.
    let prompt = server.requests()[0]["prompt"]["text"]
        .as_str()
        .unwrap()
        .to_string();
    let expected = "You are a helpful financial assistant. Household monthlyLimit: 500\n\
                    Total income: 1000\n\
                    Total expenses: 300\n\
                    Recent:\n\
                    2024-05-02 | Salary | Work | income | 1000\n\
                    2024-05-01 | Groceries | Food | expense | 300\n\
                    Provide: 1) short summary; 2) 3 suggestions; 3) projection for next month.";
    assert_eq!(prompt, expected);

    // The generated text landed in the household's insight log
    let insights = db.list_insights("h1", 10).unwrap();
    assert_eq!(insights.len(), 1);
    assert_eq!(insights[0].text, "Great month.");
    assert_eq!(insights[0].source, INSIGHT_SOURCE_SCHEDULED);
}

#[tokio::test]
async fn test_malformed_response_still_appends_one_insight() {
    let db = scenario_db();
    let server = MockProviderServer::start().await;
    server.set_reply(MockReply::MissingFields);

    let client = GenClient::Gemini(GeminiBackend::with_base_url(
        "k",
        "text-bison-001",
        &server.url(),
    ));
    let report = InsightJob::new(&db, client).run().await.unwrap();
    assert_eq!(report.succeeded(), 1);

    let insights = db.list_insights("h1", 10).unwrap();
    assert_eq!(insights.len(), 1);
    assert_eq!(insights[0].text, "");
}

#[tokio::test]
async fn test_transaction_window_caps_at_twenty_most_recent() {
    let db = Database::in_memory().unwrap();
    db.upsert_household("h1", 0.0).unwrap();
    for day in 1..=25 {
        db.insert_transaction(
            "h1",
            &format!("2024-03-{:02}", day),
            "Purchase",
            "Misc",
            "expense",
            Some(1.0),
        )
        .unwrap();
    }

    let server = MockProviderServer::start().await;
    let client = GenClient::Gemini(GeminiBackend::with_base_url(
        "k",
        "text-bison-001",
        &server.url(),
    ));
    InsightJob::new(&db, client).run().await.unwrap();

    let prompt = server.requests()[0]["prompt"]["text"]
        .as_str()
        .unwrap()
        .to_string();
    let listing_lines = prompt
        .lines()
        .filter(|l| l.starts_with("2024-03-"))
        .collect::<Vec<_>>();
    assert_eq!(listing_lines.len(), 20);
    // Most recent first; the five oldest days fell outside the window
    assert!(listing_lines[0].starts_with("2024-03-25"));
    assert!(listing_lines[19].starts_with("2024-03-06"));
}

#[tokio::test]
async fn test_zero_transaction_household_still_generates() {
    let db = Database::in_memory().unwrap();
    db.upsert_household("quiet", 100.0).unwrap();

    let server = MockProviderServer::start().await;
    let client = GenClient::Gemini(GeminiBackend::with_base_url(
        "k",
        "text-bison-001",
        &server.url(),
    ));
    let report = InsightJob::new(&db, client).run().await.unwrap();
    assert_eq!(report.succeeded(), 1);

    let prompt = server.requests()[0]["prompt"]["text"]
        .as_str()
        .unwrap()
        .to_string();
    assert!(prompt.contains("Total income: 0\n"));
    assert!(prompt.contains("Total expenses: 0\n"));
    assert!(prompt.contains("Recent:\n\nProvide:"));
}

// =============================================================================
// Failure Isolation Tests
// =============================================================================

/// Store wrapper that injects failures for chosen households
struct FlakyStore {
    inner: Database,
    fail_fetch_for: Option<String>,
    fail_append_for: Option<String>,
}

impl LedgerStore for FlakyStore {
    fn list_households(&self) -> glint_core::Result<Vec<glint_core::Household>> {
        self.inner.list_households()
    }

    fn recent_transactions(
        &self,
        household_id: &str,
        limit: usize,
    ) -> glint_core::Result<Vec<glint_core::Transaction>> {
        if self.fail_fetch_for.as_deref() == Some(household_id) {
            return Err(glint_core::Error::InvalidData(
                "injected fetch failure".to_string(),
            ));
        }
        self.inner.recent_transactions(household_id, limit)
    }

    fn append_insight(&self, household_id: &str, insight: &NewInsight) -> glint_core::Result<i64> {
        if self.fail_append_for.as_deref() == Some(household_id) {
            return Err(glint_core::Error::InvalidData(
                "injected write failure".to_string(),
            ));
        }
        self.inner.append_insight(household_id, insight)
    }
}

#[tokio::test]
async fn test_fetch_failure_for_one_household_does_not_block_the_next() {
    let db = Database::in_memory().unwrap();
    db.upsert_household("a", 0.0).unwrap();
    db.upsert_household("b", 0.0).unwrap();

    let store = FlakyStore {
        inner: db.clone(),
        fail_fetch_for: Some("a".to_string()),
        fail_append_for: None,
    };

    let report = InsightJob::new(&store, GenClient::mock()).run().await.unwrap();
    assert_eq!(report.succeeded(), 1);
    assert_eq!(report.failed(), 1);

    // Zero insights for the failed household, exactly one for the other
    assert_eq!(db.count_insights("a").unwrap(), 0);
    assert_eq!(db.count_insights("b").unwrap(), 1);
}

#[tokio::test]
async fn test_write_failure_for_one_household_does_not_abort_the_batch() {
    let db = Database::in_memory().unwrap();
    db.upsert_household("a", 0.0).unwrap();
    db.upsert_household("b", 0.0).unwrap();

    let store = FlakyStore {
        inner: db.clone(),
        fail_fetch_for: None,
        fail_append_for: Some("a".to_string()),
    };

    let report = InsightJob::new(&store, GenClient::mock()).run().await.unwrap();
    assert_eq!(report.failed(), 1);

    let failed = report
        .outcomes
        .iter()
        .find(|o| o.household_id == "a")
        .unwrap();
    assert!(failed.result.is_err());

    assert_eq!(db.count_insights("a").unwrap(), 0);
    assert_eq!(db.count_insights("b").unwrap(), 1);
}

#[tokio::test]
async fn test_transport_failure_leaves_no_partial_insight() {
    let db = scenario_db();

    // Provider endpoint with nothing listening: transport error per household
    let client = GenClient::Gemini(GeminiBackend::with_base_url(
        "k",
        "text-bison-001",
        "http://127.0.0.1:1",
    ));
    let report = InsightJob::new(&db, client).run().await.unwrap();
    assert_eq!(report.succeeded(), 0);
    assert_eq!(report.failed(), 1);
    assert_eq!(db.count_all_insights().unwrap(), 0);
}
