use std::env;
use std::path::PathBuf;

/* Which upstream endpoint a fund's holdings come from, with the
provider-specific query identifier. Each variant maps onto one module
under src/api. */
#[derive(Debug, Clone)]
pub enum ProviderKind {
    /* ezmoney.com.tw fund page; holdings are embedded in a JSON
    attribute of the page. */
    Ezmoney { fund_code: &'static str },
    /* capitalfund.com.tw buyback API, POST with a fund id. */
    CapitalFund { fund_id: &'static str },
    /* nomurafunds.com.tw assets API, POST with a fund id and date. */
    Nomura { fund_id: &'static str },
    /* fhtrust.com.tw daily holdings workbook, GET by ETF id and date. */
    Fhtrust { etf_id: &'static str },
}

/* One watched fund. The tag names the snapshot file, archive directory
and report file for that fund. */
#[derive(Debug, Clone)]
pub struct FundConfig {
    pub tag: &'static str,
    pub name: &'static str,
    pub provider: ProviderKind,
}

/* The watched funds. Adding one is adding a line here (and, for a new
provider, a module under src/api). */
pub fn watched_funds() -> Vec<FundConfig> {
    return vec![
        FundConfig {
            tag: "981a",
            name: "UPAMC FANG+ ETF",
            provider: ProviderKind::Ezmoney { fund_code: "49YTW" },
        },
        FundConfig {
            tag: "982a",
            name: "Capital ETF 00982A",
            provider: ProviderKind::CapitalFund { fund_id: "399" },
        },
        FundConfig {
            tag: "985a",
            name: "Nomura ETF 00985A",
            provider: ProviderKind::Nomura { fund_id: "00985A" },
        },
        FundConfig {
            tag: "991a",
            name: "Fuh Hwa ETF23",
            provider: ProviderKind::Fhtrust { etf_id: "ETF23" },
        },
    ];
}

/* Snapshots, archives and reports land here. Overridable so runs in CI
or tests can point somewhere disposable. */
pub fn data_dir() -> PathBuf {
    return env::var("ETFWATCH_DATA_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("."));
}
