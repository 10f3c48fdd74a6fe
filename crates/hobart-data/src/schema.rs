//! Column vocabulary shared by every stage.
//!
//! Raw snapshots arrive with provider-specific headers; the coercion
//! step in [`crate::tables`] renames everything into this vocabulary so
//! downstream stages can reference columns by constant instead of by
//! string literal.

/// Issue-level security identifier (one share class, one id).
pub const ISSUE_ID: &str = "issue_id";
/// Issuer-level identifier; one issuer may have several issues.
pub const ISSUER_ID: &str = "issuer_id";
/// Month-end observation date.
pub const DATE: &str = "date";
/// Calendar year of the observation.
pub const YEAR: &str = "year";
/// Calendar month of the observation, 1-12.
pub const MONTH: &str = "month";

/// Total monthly return, dividends included.
pub const RET: &str = "ret";
/// Price-only monthly return, dividends excluded.
pub const RET_NODIV: &str = "ret_nodiv";
/// Month-end price; negative values mark a bid/ask-midpoint estimate.
pub const PRICE: &str = "price";
/// Shares outstanding, in thousands.
pub const SHARES_OUT: &str = "shares_out";
/// Listing-venue code.
pub const VENUE: &str = "venue";
/// Security-type code.
pub const SEC_TYPE: &str = "sec_type";
/// Delisting-month return, when the issue left the sample.
pub const DELIST_RET: &str = "delist_ret";
/// Delisting reason code; non-null marks a delisting row.
pub const DELIST_CODE: &str = "delist_code";

/// Issuer market value, millions.
pub const MKT_VAL: &str = "mkt_val";
/// Previous-period issuer market value, the value-weight basis.
pub const LAG_MKT_VAL: &str = "lag_mkt_val";
/// Cumulative t-12..t-2 log return used to rank momentum portfolios.
pub const RANK_RET: &str = "rank_ret";

/// Ordinal bucket from a decile sort.
pub const DECILE: &str = "decile";
/// Value-weighted portfolio return.
pub const VW_RET: &str = "vw_ret";
/// Equal-weighted portfolio return.
pub const EW_RET: &str = "ew_ret";

/// Bond identifier in the treasury panel.
pub const BOND_ID: &str = "bond_id";
/// Face value outstanding for a bond-month, the value-weight basis.
pub const FACE_OUT: &str = "face_out";
/// 30-day riskless return.
pub const RF_30D: &str = "rf_30d";
/// 90-day riskless return.
pub const RF_90D: &str = "rf_90d";

/// Fiscal year of an annual fundamentals row.
pub const FISCAL_YEAR: &str = "fiscal_year";
/// Shareholders' equity.
pub const SHE: &str = "she";
/// Preferred stock, redemption value.
pub const PREF_REDEEM: &str = "pref_redeem";
/// Preferred stock, liquidation value.
pub const PREF_LIQ: &str = "pref_liq";
/// Preferred stock, par value.
pub const PREF_PAR: &str = "pref_par";
/// Deferred taxes and investment tax credit.
pub const DEFERRED_TAXES: &str = "deferred_taxes";
/// Derived book equity.
pub const BOOK_EQUITY: &str = "book_equity";
/// Book-to-market ratio.
pub const BTM: &str = "btm";
/// July-June holding year a formation row applies to.
pub const PORT_YEAR: &str = "port_year";
/// Within-holding-year value weight.
pub const PORT_WEIGHT: &str = "port_weight";

/// Well-known listing-venue codes.
pub mod venue {
    /// New York Stock Exchange; the default reference universe for
    /// breakpoints.
    pub const NYSE: i32 = 1;
    /// American Stock Exchange.
    pub const AMEX: i32 = 2;
    /// Nasdaq.
    pub const NASDAQ: i32 = 3;
    /// NYSE, when-issued trading.
    pub const NYSE_WHEN_ISSUED: i32 = 31;
    /// AMEX, when-issued trading.
    pub const AMEX_WHEN_ISSUED: i32 = 32;
    /// Nasdaq, when-issued trading.
    pub const NASDAQ_WHEN_ISSUED: i32 = 33;
}

/// Well-known security-type codes.
pub mod sec_type {
    /// Ordinary common share, no special status.
    pub const COMMON: i32 = 10;
    /// Ordinary common share, no further definition needed.
    pub const COMMON_PLAIN: i32 = 11;
}
