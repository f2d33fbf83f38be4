use regex::Regex;
use serde::Deserialize;
use serde_json::Value;

use crate::errors::ApiError;
use crate::parsing::{shares_from_value, weight_from_value};
use crate::structs::{Holding, HoldingId, HoldingSet};

const ENDPOINT: &str = "https://www.ezmoney.com.tw/ETF/Fund/Info";

/* The fund page embeds the full asset breakdown as HTML-escaped JSON in
the data-content attribute of the DataAsset div. Stocks are the group
with AssetCode "ST". */
#[derive(Deserialize)]
struct AssetGroup {
    #[serde(rename = "AssetCode")]
    asset_code: String,
    #[serde(rename = "Details", default)]
    details: Vec<AssetDetail>,
}

#[derive(Deserialize)]
struct AssetDetail {
    #[serde(rename = "DetailCode")]
    code: String,
    #[serde(rename = "DetailName", default)]
    name: String,
    #[serde(rename = "Share", default)]
    share: Value,
    #[serde(rename = "NavRate", default)]
    nav_rate: Value,
}

pub async fn fetch(client: &reqwest::Client, fund_code: &str) -> Result<HoldingSet, ApiError> {
    let url = format!("{ENDPOINT}?fundCode={fund_code}");
    let body = client
        .get(&url)
        .header(reqwest::header::USER_AGENT, super::USER_AGENT)
        .send()
        .await?
        .error_for_status()?
        .text()
        .await?;

    let raw = extract_data_content(&body).ok_or_else(|| {
        ApiError::UnexpectedShape("no DataAsset block in fund page".to_string())
    })?;
    let groups: Vec<AssetGroup> =
        serde_json::from_str(&raw).map_err(|e| ApiError::DeserializationError(e.to_string()))?;

    let stocks = groups
        .into_iter()
        .find(|g| g.asset_code == "ST")
        .ok_or_else(|| ApiError::UnexpectedShape("no ST asset group".to_string()))?;

    let holdings = stocks
        .details
        .into_iter()
        .map(|d| Holding {
            id: HoldingId::new(&d.code),
            name: d.name.trim().to_string(),
            shares: shares_from_value(&d.share),
            weight: weight_from_value(&d.nav_rate),
        })
        .collect();
    Ok(holdings)
}

fn extract_data_content(html: &str) -> Option<String> {
    let pattern = Regex::new(r#"id="DataAsset"[^>]*data-content="([^"]*)""#).ok()?;
    let captured = pattern.captures(html)?.get(1)?.as_str();
    return Some(unescape_entities(captured));
}

/* Only the handful of entities the attribute encoding actually
produces. &amp; goes last so double-escaped text decodes once. */
fn unescape_entities(text: &str) -> String {
    return text
        .replace("&quot;", "\"")
        .replace("&#34;", "\"")
        .replace("&#39;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&");
}
