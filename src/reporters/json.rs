//! JSON reporter
//!
//! Outputs the full HealthReport as pretty-printed JSON.
//! This is the persisted artifact format; other tools read it back.

use crate::models::HealthReport;
use anyhow::Result;

/// Render report as JSON
pub fn render(report: &HealthReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporters::tests::test_report;

    #[test]
    fn test_json_render_shape() {
        let report = test_report();
        let json_str = render(&report).expect("render JSON");
        let parsed: serde_json::Value = serde_json::from_str(&json_str).expect("parse JSON");

        assert!(parsed["timestamp"].is_string());
        assert_eq!(parsed["overall"]["status"], "critical");
        assert_eq!(parsed["packages"]["@x/a"]["score"], 0);
        assert_eq!(
            parsed["dependencies"]["graph"]["@x/a"],
            serde_json::json!(["@x/b"])
        );
        assert_eq!(
            parsed["dependencies"]["cycles"],
            serde_json::json!([["@x/a", "@x/b"]])
        );
        assert_eq!(parsed["dependencies"]["cyclesTruncated"], false);
        assert_eq!(parsed["dependencies"]["drift"][0]["dependency"], "typescript");
        assert_eq!(parsed["config"]["score"], 100);
        assert_eq!(parsed["performance"]["buildTimes"]["@x/a"], 41000);
        assert_eq!(parsed["recommendations"][0]["type"], "package");
    }

    #[test]
    fn test_json_round_trips() {
        let report = test_report();
        let json_str = render(&report).expect("render JSON");
        let back: HealthReport = serde_json::from_str(&json_str).expect("deserialize report");
        assert_eq!(back, report);
    }
}
