use crate::aggregate::ResultAggregator;
use crate::config::{ProjectionOptions, ProjectionRequest};
use crate::error::{ProjectionError, Result};
use crate::model::{Account, CashFlowItem, Diagnostic, ExplicitAccount, ProjectionResult};
use crate::resolver::resolve_chains;
use crate::simulation_state::SimulationState;

#[cfg(feature = "parallel")]
use rayon::iter::{IntoParallelRefIterator, ParallelIterator};

/// Project the combined items forward `years` years
pub fn project(
    years: i32,
    explicit_accounts: &[ExplicitAccount],
    assets: &[Account],
    liabilities: &[Account],
    cash_flows: &[CashFlowItem],
) -> Result<ProjectionResult> {
    project_with_options(
        years,
        explicit_accounts,
        assets,
        liabilities,
        cash_flows,
        &ProjectionOptions::default(),
    )
}

/// Project with explicit options
///
/// Income/expense chains are resolved once up front. Each year then runs
/// three phases in order: a provisional projection of every account, the
/// re-derivation of balance-linked cash flows from that provisional view, and
/// the final commit that produces the year record.
pub fn project_with_options(
    years: i32,
    explicit_accounts: &[ExplicitAccount],
    assets: &[Account],
    liabilities: &[Account],
    cash_flows: &[CashFlowItem],
    options: &ProjectionOptions,
) -> Result<ProjectionResult> {
    let years = u32::try_from(years).map_err(|_| ProjectionError::NegativeYears(years))?;

    let chains = resolve_chains(cash_flows);
    let mut state =
        SimulationState::build(explicit_accounts, assets, liabilities, cash_flows, &chains)?;

    let mut diagnostics: Vec<Diagnostic> = chains
        .issues
        .into_iter()
        .map(Diagnostic::Linkage)
        .collect();
    diagnostics.append(&mut state.diagnostics);

    if options.strict_linkage
        && let Some(issue) = diagnostics.iter().find_map(Diagnostic::linkage_issue)
    {
        return Err(ProjectionError::UnresolvableLinkage(issue.clone()));
    }

    for diagnostic in &diagnostics {
        match diagnostic {
            Diagnostic::Linkage(_) => tracing::warn!("{diagnostic}"),
            Diagnostic::ShadowedExplicitAccount { .. } => tracing::debug!("{diagnostic}"),
        }
    }

    tracing::debug!(
        years,
        accounts = state.accounts.len(),
        "starting projection"
    );

    let mut aggregator = ResultAggregator::with_capacity(years as usize);
    for year in 1..=years {
        let starting_value = state.previous_total;

        let scratch = state.provisional_balances();
        state.relink(&scratch);
        let committed = state.commit();

        aggregator.push(year, starting_value, committed, state.totals);
    }

    Ok(aggregator.finish(state.totals, diagnostics))
}

/// Run independent requests, in parallel when the `parallel` feature is on
///
/// Each request gets its own working state; results keep the input order.
pub fn project_batch(requests: &[ProjectionRequest]) -> Vec<Result<ProjectionResult>> {
    #[cfg(feature = "parallel")]
    {
        requests.par_iter().map(ProjectionRequest::run).collect()
    }
    #[cfg(not(feature = "parallel"))]
    {
        requests.iter().map(ProjectionRequest::run).collect()
    }
}
