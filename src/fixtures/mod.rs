// Fixture loading for mock data.
// Ships an embedded default; a JSON file with the same schema can replace it.

pub mod types;

use std::fs;
use std::path::Path;

use tracing::info;

use crate::error::{PujiError, Result};
use crate::state::navigation::RiskKind;

pub use types::*;

/// Fixture data compiled into the binary.
const DEFAULT_FIXTURES: &str = include_str!("../../fixtures/default.json");

/// Load fixtures from `path`, or the embedded default when `None`.
pub fn load(path: Option<&Path>) -> Result<Fixtures> {
    match path {
        Some(path) => {
            let contents = fs::read_to_string(path)?;
            let fixtures = from_json(&contents)?;
            info!(path = %path.display(), "loaded fixtures");
            Ok(fixtures)
        }
        None => from_json(DEFAULT_FIXTURES),
    }
}

/// Parse and validate fixture JSON.
pub fn from_json(json: &str) -> Result<Fixtures> {
    let fixtures: Fixtures = serde_json::from_str(json)?;
    validate(&fixtures)?;
    Ok(fixtures)
}

/// Check the cross-field rules serde cannot express.
pub fn validate(fixtures: &Fixtures) -> Result<()> {
    for kind in RiskKind::ALL {
        let count = fixtures.risks.iter().filter(|r| r.kind == kind).count();
        if count != 1 {
            return Err(PujiError::Fixture(format!(
                "expected one {:?} risk profile, found {}",
                kind, count
            )));
        }
    }

    for risk in &fixtures.risks {
        if risk.gauge_percent > 100 || risk.score > 100 {
            return Err(PujiError::Fixture(format!(
                "{:?} risk values must be 0-100",
                risk.kind
            )));
        }
        if let Some(factor) = risk
            .factors
            .iter()
            .find(|f| f.current > 100 || f.reference > 100)
        {
            return Err(PujiError::Fixture(format!(
                "{:?} factor '{}' must be 0-100",
                risk.kind, factor.subject
            )));
        }
    }

    if fixtures.home.health_score > 100 {
        return Err(PujiError::Fixture("health score must be 0-100".to_string()));
    }

    if let Some(organ) = fixtures.organs.iter().find(|o| o.range().is_none()) {
        return Err(PujiError::Fixture(format!(
            "organ '{}' has malformed time range '{}'",
            organ.name, organ.time
        )));
    }

    if fixtures.metrics.is_empty() {
        return Err(PujiError::Fixture(
            "at least one metric series is required".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn at(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_embedded_default_is_valid() {
        let fixtures = load(None).unwrap();
        for kind in RiskKind::ALL {
            assert!(fixtures.risk(kind).is_some());
        }
        assert_eq!(fixtures.report.trend.len(), 7);
    }

    #[test]
    fn test_report_tally() {
        let fixtures = load(None).unwrap();
        let tally = fixtures.report.tally();
        assert_eq!(tally.healthy, 5);
        assert_eq!(tally.sub_health, 1);
        assert_eq!(tally.risk, 1);
    }

    #[test]
    fn test_risk_factor_split() {
        let fixtures = load(None).unwrap();
        let heart = fixtures.risk(RiskKind::Heart).unwrap();
        assert_eq!(heart.high_factors().count(), 4);
        assert_eq!(heart.normal_factors().count(), 2);
        assert!(heart.is_elevated());

        let tumor = fixtures.risk(RiskKind::Tumor).unwrap();
        assert_eq!(tumor.high_factors().count(), 0);
        assert!(!tumor.is_elevated());
    }

    #[test]
    fn test_current_shichen() {
        let fixtures = load(None).unwrap();
        assert_eq!(fixtures.current_shichen(at(2, 0)).unwrap().name, "Liver");
        assert_eq!(fixtures.current_shichen(at(12, 30)).unwrap().name, "Heart");
        assert!(fixtures.current_shichen(at(22, 0)).is_none());
    }

    #[test]
    fn test_shichen_range_wraps_midnight() {
        let organ = OrganStatus {
            name: "Gallbladder".to_string(),
            time: "23:00-01:00".to_string(),
            status: HealthStatus::Healthy,
            description: String::new(),
        };
        assert!(organ.contains(at(23, 30)));
        assert!(organ.contains(at(0, 15)));
        assert!(!organ.contains(at(1, 0)));
        assert!(!organ.contains(at(12, 0)));
    }

    #[test]
    fn test_metric_falls_back_to_first_series() {
        let fixtures = load(None).unwrap();
        let lipid = fixtures.metric(MetricKind::Lipid).unwrap();
        assert_eq!(lipid.id, fixtures.metrics[0].id);
        assert_eq!(
            fixtures.metric(MetricKind::Glucose).unwrap().id,
            MetricKind::Glucose
        );
    }

    #[test]
    fn test_load_override_file() {
        let mut fixtures = load(None).unwrap();
        fixtures.home.health_score = 77;

        let mut file = NamedTempFile::new().unwrap();
        file.write_all(serde_json::to_string(&fixtures).unwrap().as_bytes())
            .unwrap();

        let loaded = load(Some(file.path())).unwrap();
        assert_eq!(loaded.home.health_score, 77);
    }

    #[test]
    fn test_missing_risk_kind_fails_validation() {
        let mut fixtures = load(None).unwrap();
        fixtures.risks.retain(|r| r.kind != RiskKind::Brain);

        let err = validate(&fixtures).unwrap_err();
        assert!(matches!(err, PujiError::Fixture(_)));
    }

    #[test]
    fn test_malformed_organ_time_fails_validation() {
        let mut fixtures = load(None).unwrap();
        fixtures.organs[0].time = "noon".to_string();
        assert!(validate(&fixtures).is_err());
    }

    #[test]
    fn test_malformed_json_is_json_error() {
        let err = from_json("{ not json").unwrap_err();
        assert!(matches!(err, PujiError::Json(_)));
    }
}
