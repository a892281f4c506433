//! Quota bookkeeping extracted from response headers

use std::sync::Mutex;

use chrono::Utc;
use permid_domain::constants::{HEADER_QUOTA_DAILY, HEADER_QUOTA_USED, HTTP_DATE_FORMAT};
use permid_domain::{Table, UsageSample};
use serde_json::Value;
use tracing::debug;

use crate::ports::RawResponse;

/// Append-only sequence of quota samples.
///
/// One sample is recorded per successful call whose response carried at
/// least one quota header; sample order is call order. Samples are never
/// mutated or removed for the lifetime of the ledger.
#[derive(Debug, Default)]
pub struct UsageLedger {
    samples: Mutex<Vec<UsageSample>>,
}

impl UsageLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a sample when the response carries a quota header.
    ///
    /// Does nothing when both quota headers are absent. The timestamp is
    /// the response `Date` header when present, otherwise the current
    /// UTC time as an HTTP-date.
    pub fn record(&self, response: &RawResponse) {
        let quota_daily = response.header(HEADER_QUOTA_DAILY).map(str::to_owned);
        let quota_used = response.header(HEADER_QUOTA_USED).map(str::to_owned);
        if quota_daily.is_none() && quota_used.is_none() {
            return;
        }

        let time = response
            .header("date")
            .map(str::to_owned)
            .unwrap_or_else(|| Utc::now().format(HTTP_DATE_FORMAT).to_string());

        debug!(%time, ?quota_daily, ?quota_used, "recorded quota sample");
        if let Ok(mut samples) = self.samples.lock() {
            samples.push(UsageSample { time, quota_daily, quota_used });
        }
    }

    /// Number of recorded samples.
    pub fn len(&self) -> usize {
        self.samples.lock().map(|samples| samples.len()).unwrap_or(0)
    }

    /// True when no sample has been recorded.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot of the recorded samples, in call order.
    pub fn samples(&self) -> Vec<UsageSample> {
        self.samples.lock().map(|samples| samples.clone()).unwrap_or_default()
    }

    /// Render the ledger as a table with columns `Time`, `Quota Daily`,
    /// and `Quota Used`; a single all-"None" row when empty.
    pub fn report(&self) -> Table {
        let mut table = Table::new(vec![
            "Time".to_string(),
            "Quota Daily".to_string(),
            "Quota Used".to_string(),
        ]);

        let samples = self.samples();
        if samples.is_empty() {
            table.push_row(vec![none_cell(), none_cell(), none_cell()]);
            return table;
        }

        for sample in samples {
            table.push_row(vec![
                Value::String(sample.time),
                optional_cell(sample.quota_daily),
                optional_cell(sample.quota_used),
            ]);
        }
        table
    }
}

fn none_cell() -> Value {
    Value::String("None".to_string())
}

fn optional_cell(value: Option<String>) -> Value {
    value.map(Value::String).unwrap_or_else(none_cell)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    fn response_with(headers: &[(&str, &str)]) -> RawResponse {
        RawResponse {
            status: 200,
            reason: "OK".to_string(),
            headers: headers
                .iter()
                .map(|(name, value)| (name.to_ascii_lowercase(), (*value).to_string()))
                .collect::<BTreeMap<_, _>>(),
            body: String::new(),
        }
    }

    #[test]
    fn records_nothing_without_quota_headers() {
        let ledger = UsageLedger::new();
        ledger.record(&response_with(&[("content-type", "application/json")]));
        assert!(ledger.is_empty());
    }

    #[test]
    fn records_one_sample_per_quota_response() {
        let ledger = UsageLedger::new();
        ledger.record(&response_with(&[
            ("x-permid-quota-daily", "5000"),
            ("x-permid-quota-used", "17"),
            ("date", "Tue, 04 Aug 2026 10:00:00 GMT"),
        ]));
        ledger.record(&response_with(&[("x-permid-quota-used", "18")]));

        let samples = ledger.samples();
        assert_eq!(samples.len(), 2);
        assert_eq!(samples[0].time, "Tue, 04 Aug 2026 10:00:00 GMT");
        assert_eq!(samples[0].quota_daily.as_deref(), Some("5000"));
        assert_eq!(samples[1].quota_daily, None);
        assert_eq!(samples[1].quota_used.as_deref(), Some("18"));
    }

    #[test]
    fn fallback_timestamp_is_an_http_date() {
        let ledger = UsageLedger::new();
        ledger.record(&response_with(&[("x-permid-quota-daily", "5000")]));

        let samples = ledger.samples();
        assert!(samples[0].time.ends_with("GMT"));
    }

    #[test]
    fn empty_report_has_placeholder_row() {
        let report = UsageLedger::new().report();
        assert_eq!(report.columns(), ["Time", "Quota Daily", "Quota Used"]);
        assert_eq!(report.len(), 1);
        assert_eq!(report.get(0, "Time"), Some(&Value::String("None".to_string())));
    }

    #[test]
    fn report_rows_follow_call_order() {
        let ledger = UsageLedger::new();
        ledger.record(&response_with(&[
            ("x-permid-quota-used", "1"),
            ("date", "Mon, 03 Aug 2026 09:00:00 GMT"),
        ]));
        ledger.record(&response_with(&[
            ("x-permid-quota-used", "2"),
            ("date", "Mon, 03 Aug 2026 09:00:05 GMT"),
        ]));

        let report = ledger.report();
        assert_eq!(report.len(), 2);
        assert_eq!(report.get(0, "Quota Used"), Some(&Value::String("1".to_string())));
        assert_eq!(report.get(1, "Quota Used"), Some(&Value::String("2".to_string())));
    }
}
