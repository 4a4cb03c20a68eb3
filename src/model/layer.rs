use serde::{Deserialize, Serialize};

/// An edge that crosses layers against the configured policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerViolation {
    pub from: String,
    pub to: String,
    pub from_layer: String,
    pub to_layer: String,
    pub message: String,
}

impl LayerViolation {
    pub fn new(
        from: String,
        to: String,
        from_layer: String,
        to_layer: String,
        allowed: &[String],
    ) -> Self {
        let allowed_str = if allowed.is_empty() {
            "no other layers".to_string()
        } else {
            allowed.join(", ")
        };

        let message = format!(
            "{} ({}) must not depend on {} ({}); {} may only depend on {}",
            from, from_layer, to, to_layer, from_layer, allowed_str
        );

        Self {
            from,
            to,
            from_layer,
            to_layer,
            message,
        }
    }
}
