//! Logit post-processing and the immutable analysis result.

use std::fmt;

use chrono::{DateTime, Utc};
use log::warn;
use serde::Serialize;

use super::labels::LabelSet;
use super::utils::sigmoid;

/// Immutable snapshot of one toxicity analysis.
///
/// `scores` maps each label to a probability in [0, 1], in label-registry
/// order. Created once per `analyze` call and never mutated afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct ToxicityScore {
    message: String,
    scores: Vec<(String, f64)>,
    computed_at: DateTime<Utc>,
}

impl ToxicityScore {
    /// Packages a finished analysis, timestamped with the current time.
    pub fn of(message: impl Into<String>, scores: Vec<(String, f64)>) -> Self {
        Self::with_timestamp(message, scores, Utc::now())
    }

    /// Like [`ToxicityScore::of`] with an explicitly supplied timestamp.
    pub fn with_timestamp(
        message: impl Into<String>,
        scores: Vec<(String, f64)>,
        computed_at: DateTime<Utc>,
    ) -> Self {
        Self {
            message: message.into(),
            scores,
            computed_at,
        }
    }

    /// The original input text.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// All scores in label-registry order.
    pub fn scores(&self) -> &[(String, f64)] {
        &self.scores
    }

    pub fn computed_at(&self) -> DateTime<Utc> {
        self.computed_at
    }

    /// Probability for a single label, if the model produced one for it.
    pub fn score_of(&self, label: &str) -> Option<f64> {
        self.scores
            .iter()
            .find(|(name, _)| name.as_str() == label)
            .map(|(_, value)| *value)
    }

    // ---------- Convenience accessors for the reference labels ----------

    pub fn toxicity(&self) -> Option<f64> {
        self.score_of("toxicity")
    }

    pub fn severe_toxicity(&self) -> Option<f64> {
        self.score_of("severe_toxicity")
    }

    pub fn obscene(&self) -> Option<f64> {
        self.score_of("obscene")
    }

    pub fn threat(&self) -> Option<f64> {
        self.score_of("threat")
    }

    pub fn insult(&self) -> Option<f64> {
        self.score_of("insult")
    }

    pub fn identity_attack(&self) -> Option<f64> {
        self.score_of("identity_attack")
    }

    pub fn sexual_explicit(&self) -> Option<f64> {
        self.score_of("sexual_explicit")
    }

    pub fn male(&self) -> Option<f64> {
        self.score_of("male")
    }

    pub fn female(&self) -> Option<f64> {
        self.score_of("female")
    }

    pub fn homosexual_gay_or_lesbian(&self) -> Option<f64> {
        self.score_of("homosexual_gay_or_lesbian")
    }

    pub fn christian(&self) -> Option<f64> {
        self.score_of("christian")
    }

    pub fn jewish(&self) -> Option<f64> {
        self.score_of("jewish")
    }

    pub fn muslim(&self) -> Option<f64> {
        self.score_of("muslim")
    }

    pub fn black(&self) -> Option<f64> {
        self.score_of("black")
    }

    pub fn white(&self) -> Option<f64> {
        self.score_of("white")
    }

    pub fn psychiatric_or_mental_illness(&self) -> Option<f64> {
        self.score_of("psychiatric_or_mental_illness")
    }
}

impl fmt::Display for ToxicityScore {
    // Prints the message length, not the message: scores routinely end up in
    // logs and the analyzed text may be abusive.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ToxicityScore {{ len: {}, scores: {:?}, at: {} }}",
            self.message.len(),
            self.scores,
            self.computed_at
        )
    }
}

/// Converts raw logits into calibrated probabilities and zips them with the
/// label registry, in registry order.
///
/// A logit row shorter than the label set drops the trailing labels; the
/// mismatch is logged but not an error.
pub(crate) fn compose(text: &str, logits: &[f32], labels: &LabelSet) -> ToxicityScore {
    let count = logits.len().min(labels.len());
    if count < labels.len() {
        warn!(
            "model produced {} logits for {} labels; trailing labels omitted",
            logits.len(),
            labels.len()
        );
    }

    let scores = logits[..count]
        .iter()
        .enumerate()
        .map(|(i, &logit)| (labels[i].to_string(), sigmoid(logit)))
        .collect();

    ToxicityScore::of(text, scores)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::collections::HashMap;

    fn label_set(names: &[&str]) -> LabelSet {
        let id2label: HashMap<String, String> = names
            .iter()
            .enumerate()
            .map(|(i, name)| (i.to_string(), name.to_string()))
            .collect();
        LabelSet::from_id2label(&id2label).unwrap()
    }

    #[test]
    fn compose_round_trips_the_message() {
        let labels = label_set(&["toxicity"]);
        let score = compose("hello there", &[0.3], &labels);
        assert_eq!(score.message(), "hello there");
    }

    #[test]
    fn compose_applies_sigmoid_per_channel() {
        let labels = label_set(&["a", "b", "c"]);
        let score = compose("x", &[0.0, 2.0, -2.0], &labels);

        let values: Vec<f64> = score.scores().iter().map(|(_, v)| *v).collect();
        assert!((values[0] - 0.5).abs() < 1e-4);
        assert!((values[1] - 0.8808).abs() < 1e-4);
        assert!((values[2] - 0.1192).abs() < 1e-4);
    }

    #[test]
    fn compose_preserves_registry_order() {
        let labels = label_set(&["toxicity", "severe_toxicity", "obscene", "threat"]);
        let score = compose("x", &[1.0, -1.0, 0.5, -0.5], &labels);

        let names: Vec<&str> = score.scores().iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, ["toxicity", "severe_toxicity", "obscene", "threat"]);
    }

    #[test]
    fn short_logit_row_truncates_to_leading_labels() {
        let labels = label_set(&["a", "b", "c", "d", "e"]);
        let score = compose("x", &[0.1, 0.2, 0.3], &labels);

        assert_eq!(score.scores().len(), 3);
        let names: Vec<&str> = score.scores().iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, ["a", "b", "c"]);
        assert_eq!(score.score_of("d"), None);
    }

    #[test]
    fn extra_logits_beyond_labels_are_dropped() {
        let labels = label_set(&["a", "b"]);
        let score = compose("x", &[0.1, 0.2, 9.9], &labels);
        assert_eq!(score.scores().len(), 2);
    }

    #[test]
    fn all_scores_stay_in_unit_interval() {
        let labels = label_set(&["a", "b", "c", "d"]);
        let score = compose("x", &[-40.0, -0.7, 0.7, 40.0], &labels);
        for (label, value) in score.scores() {
            assert!((0.0..=1.0).contains(value), "{label} = {value}");
        }
    }

    #[test]
    fn compose_is_deterministic_up_to_timestamp() {
        let labels = label_set(&["a", "b"]);
        let first = compose("same text", &[0.25, -3.0], &labels);
        let second = compose("same text", &[0.25, -3.0], &labels);

        assert_eq!(first.message(), second.message());
        assert_eq!(first.scores(), second.scores());
    }

    #[test]
    fn explicit_timestamp_is_kept() {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let score = ToxicityScore::with_timestamp("m", vec![("toxicity".into(), 0.9)], at);
        assert_eq!(score.computed_at(), at);
    }

    #[test]
    fn convenience_accessors_look_up_by_name() {
        let score = ToxicityScore::of(
            "m",
            vec![
                ("toxicity".into(), 0.9),
                ("severe_toxicity".into(), 0.2),
                ("insult".into(), 0.7),
            ],
        );
        assert_eq!(score.toxicity(), Some(0.9));
        assert_eq!(score.severe_toxicity(), Some(0.2));
        assert_eq!(score.insult(), Some(0.7));
        assert_eq!(score.threat(), None);
        assert_eq!(score.score_of("not_a_label"), None);
    }

    #[test]
    fn display_reports_length_not_content() {
        let score = ToxicityScore::of("some private text", vec![("toxicity".into(), 0.5)]);
        let rendered = score.to_string();
        assert!(rendered.contains("len: 17"));
        assert!(!rendered.contains("some private text"));
    }
}
