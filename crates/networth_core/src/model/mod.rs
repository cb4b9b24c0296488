mod accounts;
mod cash_flows;
mod ids;
mod results;

pub use accounts::{Account, AccountKind, ChangeDirection, ExplicitAccount, ItemKind};
pub use cash_flows::{CashFlowItem, Frequency, LinkCadence, Linkage};
pub use ids::ItemId;
pub use results::{AccountValue, Diagnostic, ProjectionResult, YearRecord};
