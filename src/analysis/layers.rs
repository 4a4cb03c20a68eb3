use crate::analysis::DependencyGraph;
use crate::config::LayerPolicy;
use crate::model::LayerViolation;

/// Assigns modules to layers by path.
///
/// A layer's explicit patterns win; otherwise the deepest directory segment
/// named after a layer decides. Modules matching neither are unclassified.
pub struct LayerClassifier<'a> {
    policy: &'a LayerPolicy,
}

impl<'a> LayerClassifier<'a> {
    pub fn new(policy: &'a LayerPolicy) -> Self {
        Self { policy }
    }

    pub fn classify(&self, path: &str) -> Option<&'a str> {
        let by_pattern = self.policy.layers.iter().find(|(_, rule)| {
            rule.patterns
                .iter()
                .any(|pattern| !pattern.is_empty() && path.contains(pattern.as_str()))
        });
        if let Some((name, _)) = by_pattern {
            return Some(name.as_str());
        }

        let (dir, _) = path.rsplit_once('/')?;
        dir.split('/').rev().find_map(|segment| {
            self.policy
                .layers
                .get_key_value(segment)
                .map(|(name, _)| name.as_str())
        })
    }
}

pub fn detect_layer_violations(graph: &DependencyGraph, policy: &LayerPolicy) -> Vec<LayerViolation> {
    if policy.is_empty() {
        return Vec::new();
    }

    for (layer, rule) in &policy.layers {
        for allowed in &rule.allow {
            if !policy.layers.contains_key(allowed) {
                tracing::warn!(layer = %layer, allowed = %allowed, "layer policy references an undefined layer");
            }
        }
    }

    let classifier = LayerClassifier::new(policy);
    let mut violations = Vec::new();

    for (from, to) in graph.unique_edges() {
        let (Some(from_layer), Some(to_layer)) = (classifier.classify(from), classifier.classify(to))
        else {
            continue;
        };

        if policy.allows(from_layer, to_layer) {
            continue;
        }

        let allowed = policy
            .layers
            .get(from_layer)
            .map(|rule| rule.allow.as_slice())
            .unwrap_or_default();

        violations.push(LayerViolation::new(
            from.to_string(),
            to.to_string(),
            from_layer.to_string(),
            to_layer.to_string(),
            allowed,
        ));
    }

    violations
}
