//! Daily insight job orchestration
//!
//! One run: list every household, and for each one sequentially fetch its
//! recent transactions, build a prompt, generate text, and append the
//! result to that household's insight log. Each household is an independent
//! unit of work with its own error boundary; one household's failure never
//! blocks another's processing. The run itself is stateless: there is no
//! partial retry, the next scheduled invocation starts fresh.

use tracing::{error, info};

use crate::ai::{GenClient, TextGenerator};
use crate::config::ProviderConfig;
use crate::digest::{self, TRANSACTION_WINDOW};
use crate::error::Result;
use crate::models::{Household, NewInsight};
use crate::store::LedgerStore;

/// Outcome of one household's processing within a run
#[derive(Debug)]
pub struct HouseholdOutcome {
    pub household_id: String,
    /// Insight id on success, rendered error on failure
    pub result: std::result::Result<i64, String>,
}

/// Summary of one job run
#[derive(Debug, Default)]
pub struct JobReport {
    pub outcomes: Vec<HouseholdOutcome>,
}

impl JobReport {
    /// Number of households that got an insight this run
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.result.is_ok()).count()
    }

    /// Number of households that failed this run
    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }
}

/// The unit of work triggered by a scheduler
pub struct InsightJob<'a> {
    store: &'a dyn LedgerStore,
    client: GenClient,
}

impl<'a> InsightJob<'a> {
    pub fn new(store: &'a dyn LedgerStore, client: GenClient) -> Self {
        Self { store, client }
    }

    /// Run the job over every household
    ///
    /// Only a failure to list households aborts the batch; everything
    /// inside the per-household sequence is caught and recorded.
    pub async fn run(&self) -> Result<JobReport> {
        let households = self.store.list_households()?;
        info!(
            households = households.len(),
            model = self.client.model(),
            "Starting insight job"
        );

        let mut report = JobReport::default();
        for household in &households {
            let result = match self.process_household(household).await {
                Ok(insight_id) => {
                    info!(household = %household.id, insight_id, "Stored insight");
                    Ok(insight_id)
                }
                Err(e) => {
                    error!(household = %household.id, "Insight generation failed: {}", e);
                    Err(e.to_string())
                }
            };
            report.outcomes.push(HouseholdOutcome {
                household_id: household.id.clone(),
                result,
            });
        }

        info!(
            succeeded = report.succeeded(),
            failed = report.failed(),
            "Insight job finished"
        );
        Ok(report)
    }

    /// Process one household: fetch, aggregate, generate, append
    ///
    /// Strictly sequential within the household; the insight write never
    /// happens before generation completes, and no partial insight is
    /// written on failure.
    async fn process_household(&self, household: &Household) -> Result<i64> {
        let transactions = self
            .store
            .recent_transactions(&household.id, TRANSACTION_WINDOW)?;
        let prompt = digest::build_prompt(household, &transactions);
        let text = self.client.generate(&prompt).await?;
        self.store
            .append_insight(&household.id, &NewInsight::scheduled(text))
    }
}

/// Run the daily job with credentials resolved from configuration
///
/// When no provider credential is configured the job logs and returns
/// `Ok(None)` without touching the store; this is a startup precondition,
/// not an error.
pub async fn run_daily_job(
    store: &dyn LedgerStore,
    config: &ProviderConfig,
) -> Result<Option<JobReport>> {
    let Some(client) = GenClient::from_config(config) else {
        info!("No generation provider configured (Gemini or OpenAI). Skipping.");
        return Ok(None);
    };

    let report = InsightJob::new(store, client).run().await?;
    Ok(Some(report))
}
