pub mod capitalfund;
pub mod ezmoney;
pub mod fhtrust;
pub mod nomura;

use crate::config::{FundConfig, ProviderKind};
use crate::errors::ApiError;
use crate::structs::HoldingSet;

pub const USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/* Fetch today's holdings for one fund from its provider. Each provider
maps its own response columns onto Holding before anything reaches the
diff; the core never sees raw rows. */
pub async fn fetch_holdings(
    client: &reqwest::Client,
    fund: &FundConfig,
) -> Result<HoldingSet, ApiError> {
    match &fund.provider {
        ProviderKind::Ezmoney { fund_code } => ezmoney::fetch(client, fund_code).await,
        ProviderKind::CapitalFund { fund_id } => capitalfund::fetch(client, fund_id).await,
        ProviderKind::Nomura { fund_id } => nomura::fetch(client, fund_id).await,
        ProviderKind::Fhtrust { etf_id } => fhtrust::fetch(client, etf_id).await,
    }
}
