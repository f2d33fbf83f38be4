use chrono::Local;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::ApiError;
use crate::parsing::{shares_from_value, value_to_text, weight_from_value};
use crate::structs::{Holding, HoldingId, HoldingSet};

const ENDPOINT: &str = "https://www.nomurafunds.com.tw/API/ETFAPI/api/Fund/GetFundAssets";
const ORIGIN: &str = "https://www.nomurafunds.com.tw";

/* Response is a list of labeled tables; rows are positional arrays
matched against the Columns list. The stock table is titled 股票. */
const STOCK_TABLE_TITLE: &str = "股票";

/* The column names this provider has been observed to use. The first
matching name wins, per field. */
const CODE_COLUMNS: [&str; 2] = ["股票代號", "證券代號"];
const NAME_COLUMNS: [&str; 2] = ["股票名稱", "證券名稱"];
const SHARES_COLUMNS: [&str; 3] = ["股數", "持有股數", "持股股數"];
const WEIGHT_COLUMNS: [&str; 2] = ["權重", "權重(%)"];

#[derive(Serialize)]
struct AssetsRequest<'a> {
    #[serde(rename = "FundID")]
    fund_id: &'a str,
    #[serde(rename = "SearchDate")]
    search_date: String,
}

#[derive(Deserialize)]
struct AssetsResponse {
    #[serde(rename = "Entries")]
    entries: Option<Entries>,
}

#[derive(Deserialize)]
struct Entries {
    #[serde(rename = "Data")]
    data: Option<EntriesData>,
}

#[derive(Deserialize)]
struct EntriesData {
    #[serde(rename = "Table", default)]
    tables: Vec<AssetTable>,
}

#[derive(Deserialize)]
struct AssetTable {
    #[serde(rename = "TableTitle", default)]
    title: String,
    #[serde(rename = "Columns", default)]
    columns: Vec<ColumnDef>,
    #[serde(rename = "Rows", default)]
    rows: Vec<Vec<Value>>,
}

#[derive(Deserialize)]
struct ColumnDef {
    #[serde(rename = "Name", default)]
    name: String,
}

pub async fn fetch(client: &reqwest::Client, fund_id: &str) -> Result<HoldingSet, ApiError> {
    let request = AssetsRequest {
        fund_id,
        search_date: Local::now().format("%Y-%m-%d").to_string(),
    };
    let response: AssetsResponse = client
        .post(ENDPOINT)
        .header(reqwest::header::USER_AGENT, super::USER_AGENT)
        .header(reqwest::header::REFERER, format!("{ORIGIN}/"))
        .header(reqwest::header::ORIGIN, ORIGIN)
        .json(&request)
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;

    let tables = response
        .entries
        .and_then(|e| e.data)
        .map(|d| d.tables)
        .ok_or_else(|| ApiError::UnexpectedShape("no asset tables".to_string()))?;
    let stock_table = tables
        .into_iter()
        .find(|t| t.title == STOCK_TABLE_TITLE)
        .ok_or_else(|| {
            ApiError::UnexpectedShape("no stock table (holiday or no data?)".to_string())
        })?;

    return table_to_holdings(&stock_table);
}

fn table_to_holdings(table: &AssetTable) -> Result<HoldingSet, ApiError> {
    let code_idx = find_column(table, &CODE_COLUMNS)
        .ok_or_else(|| ApiError::UnexpectedShape("no security code column".to_string()))?;
    let name_idx = find_column(table, &NAME_COLUMNS);
    let shares_idx = find_column(table, &SHARES_COLUMNS)
        .ok_or_else(|| ApiError::UnexpectedShape("no shares column".to_string()))?;
    let weight_idx = find_column(table, &WEIGHT_COLUMNS);

    let mut holdings = HoldingSet::new();
    for row in &table.rows {
        let code = cell_text(row, code_idx);
        if code.trim().is_empty() {
            continue;
        }
        holdings.insert(Holding {
            id: HoldingId::new(&code),
            name: name_idx
                .map(|i| cell_text(row, i).trim().to_string())
                .unwrap_or_default(),
            shares: shares_from_value(row.get(shares_idx).unwrap_or(&Value::Null)),
            weight: weight_idx.and_then(|i| weight_from_value(row.get(i).unwrap_or(&Value::Null))),
        });
    }
    Ok(holdings)
}

fn find_column(table: &AssetTable, candidates: &[&str]) -> Option<usize> {
    for candidate in candidates {
        if let Some(idx) = table.columns.iter().position(|c| c.name == *candidate) {
            return Some(idx);
        }
    }
    return None;
}

fn cell_text(row: &[Value], idx: usize) -> String {
    return value_to_text(row.get(idx).unwrap_or(&Value::Null));
}
