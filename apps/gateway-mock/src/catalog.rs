//! Canned response payloads.
//!
//! Typed builders for every read-only gateway endpoint. Field names and
//! constant values mirror the real Client Portal API responses so that
//! client deserializers exercise their production code paths. Nothing
//! here holds state: output is a pure function of the request
//! parameters and the supplied clock reading.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ledger::Order;

/// Contract id used by every fixed sample (AAPL on the real gateway).
pub const SAMPLE_CONID: i64 = 265_598;

/// Response for the tickle heartbeat.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TickleResponse {
    /// Nested auth status block.
    pub iserver: TickleIserver,
    /// Session token; the mock uses the current unix time.
    pub session: String,
}

/// The `iserver` block of a tickle response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TickleIserver {
    /// Auth status block.
    #[serde(rename = "authStatus")]
    pub auth_status: TickleAuthStatus,
}

/// The `authStatus` block of a tickle response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TickleAuthStatus {
    /// Always true; the mock models no auth failure.
    pub authenticated: bool,
}

/// Response for the auth status endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthStatusResponse {
    /// Always true.
    pub authenticated: bool,
    /// Always false; no competing session is modeled.
    pub competing: bool,
    /// Always true.
    pub connected: bool,
    /// Always empty.
    pub message: String,
    /// Placeholder MAC address.
    #[serde(rename = "MAC")]
    pub mac: String,
}

/// Acknowledgment for the reauthenticate endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReauthenticateResponse {
    /// Always `"triggered"`.
    pub message: String,
}

/// One row of the live-orders listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LiveOrder {
    /// Account code.
    pub acct: String,
    /// Contract id + exchange.
    pub conidex: String,
    /// Contract id.
    pub conid: i64,
    /// Order id.
    #[serde(rename = "orderId")]
    pub order_id: String,
    /// Cash currency.
    #[serde(rename = "cashCcy")]
    pub cash_ccy: String,
    /// Size and fills summary.
    #[serde(rename = "sizeAndFills")]
    pub size_and_fills: String,
    /// Human-readable order description.
    #[serde(rename = "orderDesc")]
    pub order_desc: String,
    /// Primary description line.
    pub description1: String,
    /// Ticker symbol.
    pub ticker: String,
    /// Security type.
    #[serde(rename = "secType")]
    pub sec_type: String,
    /// Listing exchange.
    #[serde(rename = "listingExchange")]
    pub listing_exchange: String,
    /// Unfilled quantity.
    #[serde(rename = "remainingQuantity")]
    pub remaining_quantity: f64,
    /// Filled quantity.
    #[serde(rename = "filledQuantity")]
    pub filled_quantity: f64,
    /// Total order size.
    #[serde(rename = "totalSize")]
    pub total_size: f64,
    /// Company name.
    #[serde(rename = "companyName")]
    pub company_name: String,
    /// Order status string.
    pub status: String,
    /// Client order reference.
    pub order_ref: String,
    /// BUY or SELL.
    pub side: String,
    /// Order price.
    pub price: f64,
    /// UI background color hint.
    #[serde(rename = "bgColor")]
    pub bg_color: String,
    /// UI foreground color hint.
    #[serde(rename = "fgColor")]
    pub fg_color: String,
}

/// Response for the live-orders listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LiveOrdersResponse {
    /// Orders: the fixed sample followed by ledger snapshots.
    pub orders: Vec<LiveOrder>,
    /// Always true.
    pub snapshot: bool,
}

/// One portfolio position.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionRecord {
    /// Account the position belongs to.
    pub acct_id: String,
    /// Contract id.
    pub conid: i64,
    /// Contract description.
    pub contract_desc: String,
    /// Position size.
    pub position: f64,
    /// Market price.
    pub mkt_price: f64,
    /// Market value.
    pub mkt_value: f64,
    /// Currency.
    pub currency: String,
    /// Average cost.
    pub avg_cost: f64,
    /// Average price.
    pub avg_price: f64,
    /// Realized P&L.
    pub realized_pnl: f64,
    /// Unrealized P&L.
    pub unrealized_pnl: f64,
    /// Exchanges.
    pub exchs: String,
    /// Option expiry; null for stock.
    pub expiry: Option<String>,
    /// Put or call flag; null for stock.
    pub put_or_call: Option<String>,
    /// Contract multiplier; null for stock.
    pub multiplier: Option<f64>,
    /// Option strike.
    pub strike: f64,
    /// Exercise style; null for stock.
    pub exercise_style: Option<String>,
    /// Contract/exchange map.
    pub con_exch_map: Vec<String>,
    /// Asset class.
    pub asset_class: String,
    /// Underlying contract id.
    pub und_conid: i64,
}

/// Account summary record; string-typed like the real gateway.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountSummary {
    /// Account code.
    pub accountcode: String,
    /// Account readiness flag.
    pub accountready: String,
    /// Account type.
    pub accounttype: String,
    /// Cushion.
    pub cushion: String,
    /// Remaining day trades; -1 means unlimited.
    pub daytradesremaining: String,
    /// Net liquidation value.
    pub netliquidation: String,
    /// Net liquidation currency.
    #[serde(rename = "netliquidation-c")]
    pub netliquidation_c: String,
    /// Total cash value.
    pub totalcashvalue: String,
    /// Total cash currency.
    #[serde(rename = "totalcashvalue-c")]
    pub totalcashvalue_c: String,
    /// Equity.
    pub equity: String,
    /// Previous day equity with loan value.
    pub previousdayequitywithloanvalue: String,
}

/// One market-data snapshot record.
///
/// The numeric keys are the Client Portal tick field ids; clients look
/// them up by number, so the wire names must stay numeric.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotRecord {
    /// Contract id.
    pub conid: i64,
    /// Contract id as requested.
    #[serde(rename = "conidEx")]
    pub conid_ex: String,
    /// Field 31: last price.
    #[serde(rename = "31")]
    pub last_price: String,
    /// Field 84: bid.
    #[serde(rename = "84")]
    pub bid: String,
    /// Field 86: ask.
    #[serde(rename = "86")]
    pub ask: String,
    /// Field 87: volume.
    #[serde(rename = "87")]
    pub volume: String,
    /// Field 70: day high.
    #[serde(rename = "70")]
    pub high: String,
    /// Field 71: day low.
    #[serde(rename = "71")]
    pub low: String,
    /// Field 7295: open.
    #[serde(rename = "7295")]
    pub open: String,
    /// Field 7296: close.
    #[serde(rename = "7296")]
    pub close: String,
    /// Snapshot timestamp, epoch milliseconds.
    #[serde(rename = "_updated")]
    pub updated: i64,
}

/// One historical bar.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryBar {
    /// Bar timestamp, epoch milliseconds.
    pub t: i64,
    /// Open.
    pub o: f64,
    /// Close.
    pub c: f64,
    /// High.
    pub h: f64,
    /// Low.
    pub l: f64,
    /// Volume.
    pub v: i64,
}

/// Response for the historical data endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryResponse {
    /// Server id.
    pub server_id: String,
    /// Symbol.
    pub symbol: String,
    /// Display text.
    pub text: String,
    /// Price factor.
    pub price_factor: i64,
    /// Series start time.
    pub start_time: String,
    /// Period high.
    pub high: String,
    /// Period low.
    pub low: String,
    /// Requested time period.
    pub time_period: String,
    /// Bar length in seconds.
    pub bar_length: i64,
    /// Market data availability code.
    pub md_availability: String,
    /// Market data delay in minutes.
    pub mkt_data_delay: i64,
    /// Whether bars include outside regular trading hours.
    pub outside_rth: bool,
    /// Trading day duration in minutes.
    pub trading_day_duration: i64,
    /// Volume factor.
    pub volume_factor: i64,
    /// Price display rule.
    pub price_display_rule: i64,
    /// Price display value.
    pub price_display_value: String,
    /// Whether prices can be negative.
    pub negative_capable: bool,
    /// Message version.
    pub message_version: i64,
    /// The bars.
    pub data: Vec<HistoryBar>,
    /// Number of bars.
    pub points: i64,
    /// Server travel time in ms.
    pub travel_time: i64,
}

/// One contract search result.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractDescriptor {
    /// Contract id.
    pub conid: i64,
    /// Company header line.
    pub company_header: String,
    /// Company name.
    pub company_name: String,
    /// Requested symbol, upper-cased.
    pub symbol: String,
    /// Description.
    pub description: String,
    /// Restriction flag; always null here.
    pub restricted: Option<String>,
    /// Futures-on-options months; always null here.
    pub fop: Option<String>,
    /// Option months; always null here.
    pub opt: Option<String>,
    /// Warrant months; always null here.
    pub war: Option<String>,
    /// Tradable sections.
    pub sections: Vec<ContractSection>,
}

/// One tradable section of a contract search result.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractSection {
    /// Security type.
    pub sec_type: String,
    /// Contract months.
    pub months: String,
    /// Exchange.
    pub exchange: String,
    /// Leg security type; always null here.
    pub leg_sec_type: Option<String>,
}

/// Build the tickle heartbeat response.
#[must_use]
pub fn tickle(now: DateTime<Utc>) -> TickleResponse {
    TickleResponse {
        iserver: TickleIserver {
            auth_status: TickleAuthStatus {
                authenticated: true,
            },
        },
        session: now.timestamp().to_string(),
    }
}

/// Build the auth status response. Always authenticated and connected.
#[must_use]
pub fn auth_status() -> AuthStatusResponse {
    AuthStatusResponse {
        authenticated: true,
        competing: false,
        connected: true,
        message: String::new(),
        mac: "00:00:00:00:00:00".to_string(),
    }
}

/// Build the reauthenticate acknowledgment.
#[must_use]
pub fn reauthenticate() -> ReauthenticateResponse {
    ReauthenticateResponse {
        message: "triggered".to_string(),
    }
}

/// Build the account listing: a single mock account.
#[must_use]
pub fn accounts(account_id: &str) -> Vec<String> {
    vec![account_id.to_string()]
}

/// Build the live-orders listing.
///
/// Starts with the fixed sample row the real gateway's test fixtures
/// expect, then appends one row per ledger order so that placed orders
/// are visible with their current status.
#[must_use]
pub fn live_orders(account_id: &str, placed: &[Order]) -> LiveOrdersResponse {
    let mut orders = vec![sample_live_order(account_id)];

    orders.extend(placed.iter().map(|order| LiveOrder {
        acct: order.account.clone(),
        order_id: order.id.clone(),
        status: order.status.to_string(),
        order_ref: String::new(),
        ..sample_live_order(account_id)
    }));

    LiveOrdersResponse {
        orders,
        snapshot: true,
    }
}

fn sample_live_order(account_id: &str) -> LiveOrder {
    LiveOrder {
        acct: account_id.to_string(),
        conidex: SAMPLE_CONID.to_string(),
        conid: SAMPLE_CONID,
        order_id: "1001".to_string(),
        cash_ccy: "USD".to_string(),
        size_and_fills: "100".to_string(),
        order_desc: "Bought 100".to_string(),
        description1: "AAPL".to_string(),
        ticker: "AAPL".to_string(),
        sec_type: "STK".to_string(),
        listing_exchange: "NASDAQ".to_string(),
        remaining_quantity: 100.0,
        filled_quantity: 0.0,
        total_size: 100.0,
        company_name: "APPLE INC".to_string(),
        status: "Submitted".to_string(),
        order_ref: "QuickTrade".to_string(),
        side: "BUY".to_string(),
        price: 150.00,
        bg_color: "#FFFFFF".to_string(),
        fg_color: "#000000".to_string(),
    }
}

/// Build the positions listing: one fixed synthetic AAPL position.
#[must_use]
pub fn positions(account_id: &str) -> Vec<PositionRecord> {
    vec![PositionRecord {
        acct_id: account_id.to_string(),
        conid: SAMPLE_CONID,
        contract_desc: "AAPL".to_string(),
        position: 100.0,
        mkt_price: 150.00,
        mkt_value: 15000.00,
        currency: "USD".to_string(),
        avg_cost: 145.00,
        avg_price: 145.00,
        realized_pnl: 0.00,
        unrealized_pnl: 500.00,
        exchs: "NASDAQ".to_string(),
        expiry: None,
        put_or_call: None,
        multiplier: None,
        strike: 0.0,
        exercise_style: None,
        con_exch_map: vec![],
        asset_class: "STK".to_string(),
        und_conid: 0,
    }]
}

/// Build the account summary with the account id echoed back.
#[must_use]
pub fn account_summary(account_id: &str) -> AccountSummary {
    AccountSummary {
        accountcode: account_id.to_string(),
        accountready: "true".to_string(),
        accounttype: "DEMO".to_string(),
        cushion: "1".to_string(),
        daytradesremaining: "-1".to_string(),
        netliquidation: "100000.00".to_string(),
        netliquidation_c: "USD".to_string(),
        totalcashvalue: "85000.00".to_string(),
        totalcashvalue_c: "USD".to_string(),
        equity: "100000.00".to_string(),
        previousdayequitywithloanvalue: "99500.00".to_string(),
    }
}

/// Build snapshot records for a comma-separated conid list.
///
/// Empty and non-numeric segments are skipped rather than failing the
/// whole request; a test harness sending a sloppy list still gets the
/// records it can use.
#[must_use]
pub fn snapshot(conids: &str, now: DateTime<Utc>) -> Vec<SnapshotRecord> {
    conids
        .split(',')
        .filter_map(|raw| raw.trim().parse::<i64>().ok().map(|conid| (conid, raw)))
        .map(|(conid, raw)| SnapshotRecord {
            conid,
            conid_ex: raw.to_string(),
            last_price: "150.00".to_string(),
            bid: "149.50".to_string(),
            ask: "150.50".to_string(),
            volume: "1000000".to_string(),
            high: "152.00".to_string(),
            low: "148.00".to_string(),
            open: "150.00".to_string(),
            close: "150.00".to_string(),
            updated: now.timestamp_millis(),
        })
        .collect()
}

/// Build the fixed two-bar historical series, ignoring the requested
/// range and period.
#[must_use]
pub fn history(now: DateTime<Utc>) -> HistoryResponse {
    let now_secs = now.timestamp();

    HistoryResponse {
        server_id: "1".to_string(),
        symbol: "AAPL".to_string(),
        text: "APPLE INC".to_string(),
        price_factor: 1,
        start_time: "20240101-00:00:00".to_string(),
        high: "152.00".to_string(),
        low: "148.00".to_string(),
        time_period: "1d".to_string(),
        bar_length: 300,
        md_availability: "S".to_string(),
        mkt_data_delay: 0,
        outside_rth: false,
        trading_day_duration: 390,
        volume_factor: 1,
        price_display_rule: 1,
        price_display_value: "2".to_string(),
        negative_capable: false,
        message_version: 2,
        data: vec![
            HistoryBar {
                t: (now_secs - 86_400) * 1000,
                o: 148.0,
                c: 150.0,
                h: 152.0,
                l: 148.0,
                v: 1_000_000,
            },
            HistoryBar {
                t: now_secs * 1000,
                o: 150.0,
                c: 150.5,
                h: 151.0,
                l: 149.5,
                v: 800_000,
            },
        ],
        points: 2,
        travel_time: 10,
    }
}

/// Build the contract search result with the symbol upper-cased.
#[must_use]
pub fn contract_search(symbol: &str) -> Vec<ContractDescriptor> {
    vec![ContractDescriptor {
        conid: SAMPLE_CONID,
        company_header: "Apple Inc - Common Stock".to_string(),
        company_name: "APPLE INC".to_string(),
        symbol: symbol.to_uppercase(),
        description: "APPLE INC".to_string(),
        restricted: None,
        fop: None,
        opt: None,
        war: None,
        sections: vec![ContractSection {
            sec_type: "STK".to_string(),
            months: String::new(),
            exchange: "NASDAQ".to_string(),
            leg_sec_type: None,
        }],
    }]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::OrderLedger;
    use serde_json::json;

    #[test]
    fn tickle_reports_authenticated() {
        let now = Utc::now();
        let resp = tickle(now);

        assert!(resp.iserver.auth_status.authenticated);
        assert_eq!(resp.session, now.timestamp().to_string());

        let value = serde_json::to_value(&resp).unwrap();
        assert_eq!(value["iserver"]["authStatus"]["authenticated"], true);
    }

    #[test]
    fn auth_status_shape() {
        let value = serde_json::to_value(auth_status()).unwrap();

        assert_eq!(value["authenticated"], true);
        assert_eq!(value["competing"], false);
        assert_eq!(value["connected"], true);
        assert_eq!(value["MAC"], "00:00:00:00:00:00");
    }

    #[test]
    fn accounts_is_single_element() {
        assert_eq!(accounts("DU123456"), vec!["DU123456".to_string()]);
    }

    #[test]
    fn snapshot_skips_empty_segments() {
        let records = snapshot("1,,3", Utc::now());

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].conid, 1);
        assert_eq!(records[1].conid, 3);
    }

    #[test]
    fn snapshot_skips_non_numeric_segments() {
        let records = snapshot("265598,garbage,8314", Utc::now());

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].conid, 265_598);
        assert_eq!(records[1].conid, 8314);
    }

    #[test]
    fn snapshot_empty_input_yields_no_records() {
        assert!(snapshot("", Utc::now()).is_empty());
    }

    #[test]
    fn snapshot_uses_numeric_field_names() {
        let value = serde_json::to_value(snapshot("265598", Utc::now())).unwrap();
        let record = &value[0];

        assert_eq!(record["31"], "150.00");
        assert_eq!(record["84"], "149.50");
        assert_eq!(record["86"], "150.50");
        assert!(record["_updated"].is_i64());
    }

    #[test]
    fn snapshots_differ_only_in_timestamp() {
        let first = &snapshot("265598", Utc::now())[0];
        let later = Utc::now() + chrono::Duration::milliseconds(5);
        let second = &snapshot("265598", later)[0];

        assert!(second.updated > first.updated);
        assert_eq!(first.last_price, second.last_price);
        assert_eq!(first.conid, second.conid);
    }

    #[test]
    fn history_has_two_bars_a_day_apart() {
        let resp = history(Utc::now());

        assert_eq!(resp.points, 2);
        assert_eq!(resp.data.len(), 2);
        assert_eq!(resp.data[1].t - resp.data[0].t, 86_400 * 1000);
    }

    #[test]
    fn contract_search_uppercases_symbol() {
        let results = contract_search("aapl");

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].symbol, "AAPL");
        assert_eq!(results[0].sections[0].sec_type, "STK");
    }

    #[test]
    fn account_summary_echoes_account() {
        let summary = account_summary("DU999999");

        assert_eq!(summary.accountcode, "DU999999");

        let value = serde_json::to_value(&summary).unwrap();
        assert_eq!(value["netliquidation-c"], "USD");
    }

    #[test]
    fn positions_serialize_null_option_fields() {
        let value = serde_json::to_value(positions("DU123456")).unwrap();
        let record = &value[0];

        assert_eq!(record["acctId"], "DU123456");
        assert_eq!(record["conid"], SAMPLE_CONID);
        assert!(record["expiry"].is_null());
        assert!(record["putOrCall"].is_null());
    }

    #[test]
    fn live_orders_appends_ledger_snapshots() {
        let ledger = OrderLedger::new();
        let (id, _) = ledger.place("DU123456", json!({"side": "BUY"}));
        ledger.modify(&id, json!({"side": "BUY", "qty": 200}));

        let resp = live_orders("DU123456", &ledger.list());

        assert!(resp.snapshot);
        assert_eq!(resp.orders.len(), 2);
        assert_eq!(resp.orders[0].order_id, "1001");
        assert_eq!(resp.orders[1].order_id, id);
        assert_eq!(resp.orders[1].status, "Modified");
    }
}
