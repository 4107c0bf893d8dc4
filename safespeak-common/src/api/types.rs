//! Request/response bodies of the phrase and verification services
//!
//! The verification contract is the one served by the verification backend:
//! `{ "Prediction": "REAL"|"FAKE", "Feature*PlotURL": "...", ... }`.
//! Fields outside the known set are kept in [`VerificationResult::extra`].

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Body returned by `GET /get-phrase`
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PhraseResponse {
    #[serde(default)]
    pub phrase: Option<String>,
}

impl PhraseResponse {
    /// Trimmed phrase, `None` when absent or blank
    pub fn into_phrase(self) -> Option<String> {
        self.phrase
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
    }
}

/// Binary classification returned by the verification service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Verdict {
    /// Recording judged authentic
    Real,
    /// Recording judged synthetically generated
    Fake,
}

impl Verdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Real => "REAL",
            Verdict::Fake => "FAKE",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Diagnostic plots the verification service may attach, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlotKind {
    Distribution,
    Importance,
    Statistics,
}

impl PlotKind {
    /// Fixed rendering order
    pub const ALL: [PlotKind; 3] = [
        PlotKind::Distribution,
        PlotKind::Importance,
        PlotKind::Statistics,
    ];
}

/// Parsed body of a successful `POST /verify-audio`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationResult {
    #[serde(rename = "Prediction")]
    pub verdict: Verdict,

    #[serde(
        rename = "FeatureDistributionPlotURL",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub distribution_plot: Option<String>,

    #[serde(
        rename = "FeatureImportancePlotURL",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub importance_plot: Option<String>,

    #[serde(
        rename = "FeatureStatsPlotURL",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub stats_plot: Option<String>,

    /// Unknown fields, passed through to rendering untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl VerificationResult {
    /// Result with a verdict and no plots
    pub fn new(verdict: Verdict) -> Self {
        Self {
            verdict,
            distribution_plot: None,
            importance_plot: None,
            stats_plot: None,
            extra: Map::new(),
        }
    }

    /// Locator for `kind`; empty strings count as absent
    pub fn plot(&self, kind: PlotKind) -> Option<&str> {
        let locator = match kind {
            PlotKind::Distribution => self.distribution_plot.as_deref(),
            PlotKind::Importance => self.importance_plot.as_deref(),
            PlotKind::Statistics => self.stats_plot.as_deref(),
        };
        locator.filter(|l| !l.trim().is_empty())
    }

    /// Plots present in this result, in display order
    pub fn present_plots(&self) -> Vec<(PlotKind, &str)> {
        PlotKind::ALL
            .iter()
            .filter_map(|kind| self.plot(*kind).map(|locator| (*kind, locator)))
            .collect()
    }

    /// True when `locator` is one of this result's plot locators
    pub fn has_plot_locator(&self, locator: &str) -> bool {
        self.present_plots().iter().any(|(_, l)| *l == locator)
    }
}

/// Health check response, per the health endpoint convention
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub module: String,
    pub version: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_full_backend_body() {
        let body = json!({
            "Prediction": "REAL",
            "FeatureDistributionPlotURL": "http://host/static/plots/Model_Plots.png",
            "FeatureImportancePlotURL": "http://host/static/plots/Feature_Importance.png",
            "FeatureStatsPlotURL": "http://host/static/plots/Feature_Statistics.png",
        });

        let result: VerificationResult = serde_json::from_value(body).unwrap();
        assert_eq!(result.verdict, Verdict::Real);
        assert_eq!(result.present_plots().len(), 3);
        assert!(result.extra.is_empty());
    }

    #[test]
    fn test_unknown_fields_are_passed_through() {
        let body = json!({
            "Prediction": "FAKE",
            "FeatureDistributionPlotURL": "a.png",
            "confidence": 0.93,
            "model": "transformer",
        });

        let result: VerificationResult = serde_json::from_value(body).unwrap();
        assert_eq!(result.verdict, Verdict::Fake);
        assert_eq!(result.extra.len(), 2);
        assert_eq!(result.extra["confidence"], json!(0.93));
        assert_eq!(result.extra["model"], json!("transformer"));
        assert!(!result.extra.contains_key("FeatureDistributionPlotURL"));
    }

    #[test]
    fn test_missing_verdict_is_rejected() {
        let body = json!({ "FeatureDistributionPlotURL": "a.png" });
        assert!(serde_json::from_value::<VerificationResult>(body).is_err());
    }

    #[test]
    fn test_unrecognised_verdict_is_rejected() {
        let body = json!({ "Prediction": "MAYBE" });
        assert!(serde_json::from_value::<VerificationResult>(body).is_err());
    }

    #[test]
    fn test_empty_locator_counts_as_absent() {
        let mut result = VerificationResult::new(Verdict::Fake);
        result.distribution_plot = Some("a.png".to_string());
        result.importance_plot = Some(String::new());

        let plots = result.present_plots();
        assert_eq!(plots, vec![(PlotKind::Distribution, "a.png")]);
        assert!(result.has_plot_locator("a.png"));
        assert!(!result.has_plot_locator(""));
    }

    #[test]
    fn test_phrase_response_trims_and_rejects_blank() {
        let phrase: PhraseResponse =
            serde_json::from_value(json!({ "phrase": "  Blue skies at noon \n" })).unwrap();
        assert_eq!(phrase.into_phrase().as_deref(), Some("Blue skies at noon"));

        let blank: PhraseResponse = serde_json::from_value(json!({ "phrase": "   " })).unwrap();
        assert_eq!(blank.into_phrase(), None);

        let missing: PhraseResponse = serde_json::from_value(json!({ "error": "boom" })).unwrap();
        assert_eq!(missing.into_phrase(), None);
    }
}
