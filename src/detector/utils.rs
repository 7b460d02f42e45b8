/// Logistic sigmoid, mapping one raw logit into (0, 1).
///
/// Each output channel is an independent binary logit, so this is applied
/// per channel with no normalization across labels.
pub(crate) fn sigmoid(logit: f32) -> f64 {
    1.0 / (1.0 + (-f64::from(logit)).exp())
}
