use chrono::{DateTime, Local};
use rust_decimal::Decimal;

use crate::functions::movements;
use crate::structs::{Change, ChangeKind, HoldingSet};

/* Renders one fund's daily report as a self-contained HTML page: a
badged card per movement, then the full current holdings table sorted
by weight. A first run (or a quiet day) renders a placeholder message
instead of cards; no special-casing upstream. */
pub fn render(
    fund_name: &str,
    current: &HoldingSet,
    changes: &[Change],
    generated_at: DateTime<Local>,
) -> String {
    let mut cards = String::new();
    let moved = movements(changes);
    if moved.is_empty() {
        cards.push_str(r#"<div class="empty-msg">No holding changes today (or no prior data to compare against)</div>"#);
    } else {
        for change in moved {
            cards.push_str(&change_card(change));
        }
    }

    let mut table_rows = String::new();
    for holding in current.sorted_by_weight() {
        let weight = holding
            .weight
            .map(|w| format!("{w}%"))
            .unwrap_or_else(|| "-".to_string());
        table_rows.push_str(&format!(
            r#"<tr>
  <td><span class="code-badge">{code}</span> {name}</td>
  <td class="text-right">{shares}</td>
  <td class="text-right">{weight}</td>
</tr>
"#,
            code = escape(holding.id.as_str()),
            name = escape(&holding.name),
            shares = format_shares(holding.shares),
            weight = escape(&weight),
        ));
    }

    return format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>{fund} - holdings report</title>
<style>
  body {{ font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, Arial, sans-serif; background-color: #f8f9fa; color: #333; margin: 0; padding: 20px; }}
  .container {{ max-width: 800px; margin: 0 auto; background: #fff; padding: 20px; border-radius: 10px; box-shadow: 0 4px 6px rgba(0,0,0,0.1); }}
  h1 {{ text-align: center; color: #2c3e50; font-size: 22px; margin-bottom: 5px; }}
  .date {{ text-align: center; color: #7f8c8d; font-size: 13px; margin-bottom: 30px; }}
  h2 {{ font-size: 18px; border-left: 5px solid #3498db; padding-left: 10px; margin-top: 30px; margin-bottom: 15px; color: #2c3e50; }}
  .card {{ border: 1px solid #eee; border-radius: 8px; padding: 12px 15px; margin-bottom: 10px; display: flex; justify-content: space-between; align-items: center; background: #fff; }}
  .badge {{ padding: 4px 8px; border-radius: 4px; font-size: 12px; font-weight: bold; color: #fff; min-width: 50px; text-align: center; }}
  .badge-new {{ background-color: #e74c3c; }}
  .badge-increased {{ background-color: #e67e22; }}
  .badge-reduced {{ background-color: #2ecc71; }}
  .badge-exited {{ background-color: #27ae60; }}
  .stock-info {{ display: flex; flex-direction: column; }}
  .stock-name {{ font-weight: 600; font-size: 16px; }}
  .stock-code {{ font-size: 12px; color: #999; }}
  .change-msg {{ font-size: 13px; font-weight: 500; text-align: right; margin-top: 4px; }}
  .empty-msg {{ text-align: center; color: #bbb; padding: 15px; font-style: italic; background: #f9f9f9; border-radius: 5px; }}
  table {{ width: 100%; border-collapse: collapse; margin-top: 10px; }}
  th, td {{ padding: 12px 8px; border-bottom: 1px solid #eee; font-size: 14px; }}
  th {{ background-color: #f8f9fa; color: #666; font-weight: 600; text-align: left; }}
  tr:last-child td {{ border-bottom: none; }}
  .text-right {{ text-align: right; font-family: 'SF Mono', Consolas, 'Courier New', monospace; }}
  .code-badge {{ background: #eee; color: #555; padding: 2px 6px; border-radius: 4px; font-size: 12px; margin-right: 5px; }}
  footer {{ margin-top: 40px; text-align: center; font-size: 12px; color: #ccc; border-top: 1px solid #eee; padding-top: 10px; }}
</style>
</head>
<body>
<div class="container">
  <h1>{fund} daily holdings report</h1>
  <div class="date">Updated: {date}</div>
  <h2>Today's holding changes</h2>
  <div id="changes-list">
{cards}  </div>
  <h2>Current holdings ({count} positions)</h2>
  <table>
    <thead><tr><th>Security</th><th class="text-right">Shares held</th><th class="text-right">Weight</th></tr></thead>
    <tbody>
{rows}    </tbody>
  </table>
  <footer>Generated by etfwatch</footer>
</div>
</body>
</html>
"#,
        fund = escape(fund_name),
        date = generated_at.format("%Y-%m-%d %H:%M:%S"),
        cards = cards,
        count = current.len(),
        rows = table_rows,
    );
}

fn change_card(change: &Change) -> String {
    let badge_class = match change.kind {
        ChangeKind::New => "badge-new",
        ChangeKind::Increased => "badge-increased",
        ChangeKind::Decreased => "badge-reduced",
        ChangeKind::Exited => "badge-exited",
        ChangeKind::Unchanged => "",
    };
    let message = match change.kind {
        ChangeKind::New => format!("Bought {} shares", format_shares(change.current_shares)),
        ChangeKind::Increased => format!("+{} shares", format_shares(change.delta)),
        ChangeKind::Decreased => format!("-{} shares", format_shares(change.delta.abs())),
        ChangeKind::Exited => "Position fully sold".to_string(),
        ChangeKind::Unchanged => String::new(),
    };

    return format!(
        r#"<div class="card">
  <div class="stock-info"><span class="stock-name">{name}</span><span class="stock-code">{code}</span></div>
  <div style="text-align: right;"><span class="badge {badge_class}">{label}</span><div class="change-msg">{message}</div></div>
</div>
"#,
        name = escape(&change.name),
        code = escape(change.id.as_str()),
        badge_class = badge_class,
        label = change.kind.label(),
        message = escape(&message),
    );
}

/* "2500000" -> "2,500,000"; fractional parts pass through untouched. */
pub fn format_shares(shares: Decimal) -> String {
    let text = shares.normalize().to_string();
    let (number, fraction) = match text.split_once('.') {
        Some((n, f)) => (n, Some(f)),
        None => (text.as_str(), None),
    };
    let (sign, digits) = match number.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", number),
    };

    let mut grouped = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    match fraction {
        Some(f) => format!("{sign}{grouped}.{f}"),
        None => format!("{sign}{grouped}"),
    }
}

fn escape(text: &str) -> String {
    return text
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;");
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use crate::functions::reconcile;
    use crate::structs::{Holding, HoldingId};

    use super::*;

    fn sample() -> HoldingSet {
        vec![
            Holding {
                id: HoldingId::new("NVDA"),
                name: "NVIDIA".to_string(),
                shares: dec!(2500000),
                weight: Some(dec!(12.5)),
            },
            Holding {
                id: HoldingId::new("AAPL"),
                name: "Apple".to_string(),
                shares: dec!(1000),
                weight: Some(dec!(3.1)),
            },
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn thousands_grouping() {
        assert_eq!(format_shares(dec!(2500000)), "2,500,000");
        assert_eq!(format_shares(dec!(-1234)), "-1,234");
        assert_eq!(format_shares(dec!(12.5)), "12.5");
        assert_eq!(format_shares(dec!(999)), "999");
    }

    #[test]
    fn first_run_report_renders_all_new_cards() {
        let current = sample();
        let changes = reconcile(&current, None);
        let html = render("Test Fund", &current, &changes, Local::now());

        assert!(html.contains("NVIDIA"));
        assert!(html.contains("badge-new"));
        assert!(html.contains("2 positions"));
        assert!(!html.contains("empty-msg"));
    }

    #[test]
    fn quiet_day_renders_placeholder() {
        let current = sample();
        let changes = reconcile(&current, Some(&current));
        let html = render("Test Fund", &current, &changes, Local::now());

        assert!(html.contains("empty-msg"));
        assert!(!html.contains("badge-new"));
    }

    #[test]
    fn markup_in_names_is_escaped() {
        let current: HoldingSet = vec![Holding {
            id: HoldingId::new("X"),
            name: "<script>alert(1)</script>".to_string(),
            shares: dec!(1),
            weight: None,
        }]
        .into_iter()
        .collect();
        let changes = reconcile(&current, None);
        let html = render("Fund", &current, &changes, Local::now());

        assert!(!html.contains("<script>alert"));
        assert!(html.contains("&lt;script&gt;"));
    }
}
