use std::io::Cursor;

use calamine::{Reader, Xlsx};
use chrono::Local;

use crate::errors::ApiError;
use crate::parsing::{parse_shares, parse_weight};
use crate::structs::{Holding, HoldingId, HoldingSet};

const ENDPOINT: &str = "https://www.fhtrust.com.tw/api/assetsExcel";

/* The holdings workbook carries a preamble above the real table; the
header row is wherever 證券名稱 turns up. Everything below it is a
holding until the trailing summary and footnote lines. */
const NAME_HEADER: &str = "證券名稱";
const CODE_COLUMNS: [&str; 2] = ["證券代號", "股票代號"];
const SHARES_COLUMNS: [&str; 3] = ["持股股數", "持有股數", "股數"];
const WEIGHT_COLUMNS: [&str; 2] = ["權重(%)", "權重"];
const SUMMARY_MARKERS: [&str; 3] = ["合計", "備註", "註"];
/* Observed layout when no shares column name matches: code, name,
shares. */
const FALLBACK_SHARES_COLUMN: usize = 2;

pub async fn fetch(client: &reqwest::Client, etf_id: &str) -> Result<HoldingSet, ApiError> {
    let today = Local::now().format("%Y%m%d");
    let url = format!("{ENDPOINT}/{etf_id}/{today}");
    let bytes = client
        .get(&url)
        .header(reqwest::header::USER_AGENT, super::USER_AGENT)
        .send()
        .await?
        .error_for_status()?
        .bytes()
        .await?;

    let grid = read_first_sheet(&bytes)?;
    return grid_to_holdings(&grid);
}

fn read_first_sheet(bytes: &[u8]) -> Result<Vec<Vec<String>>, ApiError> {
    let mut workbook = Xlsx::new(Cursor::new(bytes))
        .map_err(|e| ApiError::DeserializationError(e.to_string()))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| ApiError::UnexpectedShape("workbook has no sheets".to_string()))?
        .map_err(|e| ApiError::DeserializationError(e.to_string()))?;

    let grid = range
        .rows()
        .map(|row| row.iter().map(|cell| cell.to_string()).collect())
        .collect();
    Ok(grid)
}

fn grid_to_holdings(grid: &[Vec<String>]) -> Result<HoldingSet, ApiError> {
    let header_idx = grid
        .iter()
        .position(|row| row.iter().any(|c| c.trim() == NAME_HEADER))
        .ok_or_else(|| {
            ApiError::UnexpectedShape(format!("no {NAME_HEADER} header row in workbook"))
        })?;
    let header = &grid[header_idx];

    let name_idx = header
        .iter()
        .position(|c| c.trim() == NAME_HEADER)
        .ok_or_else(|| ApiError::UnexpectedShape("header row lost its name column".to_string()))?;
    let code_idx = find_column(header, &CODE_COLUMNS);
    let shares_idx = find_column(header, &SHARES_COLUMNS).unwrap_or(FALLBACK_SHARES_COLUMN);
    let weight_idx = find_column(header, &WEIGHT_COLUMNS);

    let mut holdings = HoldingSet::new();
    for row in &grid[header_idx + 1..] {
        if row.iter().all(|c| c.trim().is_empty()) {
            continue;
        }
        let first = row.first().map(|c| c.trim()).unwrap_or("");
        if SUMMARY_MARKERS.iter().any(|m| first.contains(m)) {
            continue;
        }

        let name = cell(row, name_idx);
        // Sheets without a code column key on the security name.
        let key = code_idx
            .map(|i| cell(row, i))
            .filter(|k| !k.trim().is_empty())
            .unwrap_or_else(|| name.clone());
        if key.trim().is_empty() {
            continue;
        }

        holdings.insert(Holding {
            id: HoldingId::new(&key),
            name: name.trim().to_string(),
            shares: parse_shares(&cell(row, shares_idx)),
            weight: weight_idx.and_then(|i| parse_weight(&cell(row, i))),
        });
    }
    Ok(holdings)
}

fn find_column(header: &[String], candidates: &[&str]) -> Option<usize> {
    for candidate in candidates {
        if let Some(idx) = header.iter().position(|c| c.trim() == *candidate) {
            return Some(idx);
        }
    }
    return None;
}

fn cell(row: &[String], idx: usize) -> String {
    return row.get(idx).cloned().unwrap_or_default();
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    fn grid(rows: &[&[&str]]) -> Vec<Vec<String>> {
        rows.iter()
            .map(|r| r.iter().map(|c| c.to_string()).collect())
            .collect()
    }

    #[test]
    fn header_is_located_below_the_preamble() {
        let grid = grid(&[
            &["復華投信", "", "", ""],
            &["基金持股明細", "", "", ""],
            &["證券代號", "證券名稱", "持股股數", "權重(%)"],
            &["2330", "台積電", "1,000,000", "47.2"],
            &["0050", "元大台灣50", "500", "1.1"],
            &["合計", "", "1,000,500", ""],
            &["註：本資料僅供參考", "", "", ""],
        ]);
        let holdings = grid_to_holdings(&grid).unwrap();

        assert_eq!(holdings.len(), 2);
        let tsmc = holdings.get(&HoldingId::new("2330")).unwrap();
        assert_eq!(tsmc.name, "台積電");
        assert_eq!(tsmc.shares, dec!(1000000));
        assert_eq!(tsmc.weight, Some(dec!(47.2)));
        assert!(holdings.get(&HoldingId::new("0050")).is_some());
    }

    #[test]
    fn sheet_without_code_column_keys_on_the_name() {
        let grid = grid(&[
            &["證券名稱", "面額", "持股股數"],
            &["台泥一", "10", "4,200"],
        ]);
        let holdings = grid_to_holdings(&grid).unwrap();

        assert_eq!(
            holdings.get(&HoldingId::new("台泥一")).unwrap().shares,
            dec!(4200)
        );
    }

    #[test]
    fn unknown_shares_header_falls_back_to_third_column() {
        let grid = grid(&[
            &["證券代號", "證券名稱", "庫存數"],
            &["1101", "台泥", "42"],
        ]);
        let holdings = grid_to_holdings(&grid).unwrap();

        assert_eq!(
            holdings.get(&HoldingId::new("1101")).unwrap().shares,
            dec!(42)
        );
    }

    #[test]
    fn workbook_without_header_row_is_a_shape_error() {
        let grid = grid(&[&["whatever", "else"]]);
        assert!(grid_to_holdings(&grid).is_err());
    }
}
