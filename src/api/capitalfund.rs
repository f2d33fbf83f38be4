use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::ApiError;
use crate::parsing::{shares_from_value, value_to_text, weight_from_value};
use crate::structs::{Holding, HoldingId, HoldingSet};

const ENDPOINT: &str = "https://www.capitalfund.com.tw/CFWeb/api/etf/buyback";
const REFERER: &str = "https://www.capitalfund.com.tw/";

#[derive(Serialize)]
struct BuybackRequest<'a> {
    #[serde(rename = "fundId")]
    fund_id: &'a str,
    date: Option<String>,
}

#[derive(Deserialize)]
struct BuybackResponse {
    data: Option<BuybackData>,
}

#[derive(Deserialize)]
struct BuybackData {
    #[serde(default)]
    stocks: Vec<StockRow>,
}

/* stocNo sometimes arrives as a JSON number; flattening through Value
keeps "0050"-style codes intact when it is a string. */
#[derive(Deserialize)]
struct StockRow {
    #[serde(rename = "stocNo", default)]
    code: Value,
    #[serde(rename = "stocName", default)]
    name: String,
    #[serde(rename = "shareFormat", default)]
    shares: Value,
    #[serde(default)]
    weight: Value,
}

pub async fn fetch(client: &reqwest::Client, fund_id: &str) -> Result<HoldingSet, ApiError> {
    let response: BuybackResponse = client
        .post(ENDPOINT)
        .header(reqwest::header::USER_AGENT, super::USER_AGENT)
        .header(reqwest::header::REFERER, REFERER)
        .json(&BuybackRequest { fund_id, date: None })
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;

    let stocks = response
        .data
        .map(|d| d.stocks)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ApiError::UnexpectedShape("empty stocks list".to_string()))?;

    let holdings = stocks
        .into_iter()
        .map(|row| Holding {
            id: HoldingId::new(&value_to_text(&row.code)),
            name: row.name.trim().to_string(),
            shares: shares_from_value(&row.shares),
            weight: weight_from_value(&row.weight),
        })
        .collect();
    Ok(holdings)
}
