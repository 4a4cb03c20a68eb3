use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;

pub const CONFIG_FILE_NAME: &str = ".modmap.toml";

/// Outgoing dependency count above which a module counts as highly coupled.
pub const DEFAULT_HIGH_DEPENDENCY_COUNT: usize = 5;
/// Coupling score at or above which a module is reported as highly coupled.
pub const DEFAULT_HIGH_COUPLING: f64 = 70.0;
/// Cohesion score strictly below which a group is reported as low cohesion.
pub const DEFAULT_LOW_COHESION: f64 = 50.0;
/// Cohesion reported when there is nothing to compare (zero or one module).
pub const NEUTRAL_COHESION: f64 = 50.0;
/// Upper bound of every score.
pub const MAX_SCORE: f64 = 100.0;
/// Cycles longer than this many modules are high severity.
pub const DEFAULT_LONG_CYCLE: usize = 3;
pub const DEFAULT_MAX_CYCLES: usize = 100;
pub const DEFAULT_MAX_CYCLE_DEPTH: usize = 256;
pub const DEFAULT_MAX_GRAPH_EDGES: usize = 50;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub thresholds: Thresholds,
    pub scan: ScanSettings,
    pub resolution: ResolutionSettings,
    pub layers: LayerPolicy,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Thresholds {
    pub high_dependency_count: usize,
    pub high_coupling: f64,
    pub low_cohesion: f64,
    pub long_cycle: usize,
    pub max_cycles: usize,
    pub max_cycle_depth: usize,
    pub max_graph_edges: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScanSettings {
    /// File extensions (without the dot) treated as source files.
    pub extensions: Vec<String>,
    /// Substring patterns; any path containing one is skipped.
    pub exclude: Vec<String>,
    pub max_depth: Option<usize>,
}

/// Extension handling for relative import specifiers.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolutionSettings {
    /// Tried first when a specifier has no usable extension.
    pub primary_extensions: Vec<String>,
    /// Appended after the primary extensions failed.
    pub fallback_extensions: Vec<String>,
    /// Extensions written in specifiers that may stand in for a primary one
    /// (`./util.js` importing `util.ts`).
    pub substitute_extensions: Vec<String>,
    pub index_files: bool,
}

/// Allowed dependencies per architectural layer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayerPolicy {
    pub layers: BTreeMap<String, LayerRule>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayerRule {
    /// Layers this layer may depend on.
    pub allow: Vec<String>,
    /// Path substrings that place a module in this layer, in addition to a
    /// directory segment named after the layer.
    pub patterns: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RawConfig {
    thresholds: Option<RawThresholds>,
    scan: Option<RawScan>,
    resolution: Option<RawResolution>,
    layers: Option<BTreeMap<String, RawLayer>>,
}

#[derive(Debug, Deserialize)]
struct RawThresholds {
    high_dependency_count: Option<usize>,
    high_coupling: Option<f64>,
    low_cohesion: Option<f64>,
    long_cycle: Option<usize>,
    max_cycles: Option<usize>,
    max_cycle_depth: Option<usize>,
    max_graph_edges: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct RawScan {
    extensions: Option<Vec<String>>,
    exclude: Option<Vec<String>>,
    max_depth: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct RawResolution {
    primary_extensions: Option<Vec<String>>,
    fallback_extensions: Option<Vec<String>>,
    substitute_extensions: Option<Vec<String>>,
    index_files: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct RawLayer {
    #[serde(default)]
    allow: Vec<String>,
    #[serde(default)]
    patterns: Vec<String>,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            high_dependency_count: DEFAULT_HIGH_DEPENDENCY_COUNT,
            high_coupling: DEFAULT_HIGH_COUPLING,
            low_cohesion: DEFAULT_LOW_COHESION,
            long_cycle: DEFAULT_LONG_CYCLE,
            max_cycles: DEFAULT_MAX_CYCLES,
            max_cycle_depth: DEFAULT_MAX_CYCLE_DEPTH,
            max_graph_edges: DEFAULT_MAX_GRAPH_EDGES,
        }
    }
}

impl Default for ScanSettings {
    fn default() -> Self {
        Self {
            extensions: strings(&["ts", "tsx", "js", "jsx", "mjs", "cjs"]),
            exclude: strings(&["node_modules", "dist", "build", ".git", "coverage"]),
            max_depth: None,
        }
    }
}

impl Default for ResolutionSettings {
    fn default() -> Self {
        Self {
            primary_extensions: strings(&["ts", "tsx"]),
            fallback_extensions: strings(&["js", "jsx"]),
            substitute_extensions: strings(&["js", "jsx", "mjs", "cjs"]),
            index_files: true,
        }
    }
}

impl LayerPolicy {
    /// Build a policy from a plain `layer -> allowed layers` map.
    pub fn from_allowed<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: IntoIterator,
        V::Item: Into<String>,
    {
        let layers = entries
            .into_iter()
            .map(|(name, allow)| {
                (
                    name.into(),
                    LayerRule {
                        allow: allow.into_iter().map(Into::into).collect(),
                        patterns: Vec::new(),
                    },
                )
            })
            .collect();
        Self { layers }
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn allows(&self, from_layer: &str, to_layer: &str) -> bool {
        from_layer == to_layer
            || self
                .layers
                .get(from_layer)
                .is_some_and(|rule| rule.allow.iter().any(|l| l == to_layer))
    }
}

impl Config {
    pub fn load(project_path: &Path) -> Result<Self, ConfigError> {
        let config_path = project_path.join(CONFIG_FILE_NAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&config_path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig = toml::from_str(content)?;

        let defaults = Thresholds::default();
        let thresholds = match raw.thresholds {
            Some(t) => Thresholds {
                high_dependency_count: t
                    .high_dependency_count
                    .unwrap_or(defaults.high_dependency_count),
                high_coupling: t.high_coupling.unwrap_or(defaults.high_coupling),
                low_cohesion: t.low_cohesion.unwrap_or(defaults.low_cohesion),
                long_cycle: t.long_cycle.unwrap_or(defaults.long_cycle),
                max_cycles: t.max_cycles.unwrap_or(defaults.max_cycles),
                max_cycle_depth: t.max_cycle_depth.unwrap_or(defaults.max_cycle_depth),
                max_graph_edges: t.max_graph_edges.unwrap_or(defaults.max_graph_edges),
            },
            None => defaults,
        };

        let scan_defaults = ScanSettings::default();
        let scan = match raw.scan {
            Some(s) => ScanSettings {
                extensions: s.extensions.unwrap_or(scan_defaults.extensions),
                exclude: s.exclude.unwrap_or(scan_defaults.exclude),
                max_depth: s.max_depth,
            },
            None => scan_defaults,
        };

        let resolution_defaults = ResolutionSettings::default();
        let resolution = match raw.resolution {
            Some(r) => ResolutionSettings {
                primary_extensions: r
                    .primary_extensions
                    .unwrap_or(resolution_defaults.primary_extensions),
                fallback_extensions: r
                    .fallback_extensions
                    .unwrap_or(resolution_defaults.fallback_extensions),
                substitute_extensions: r
                    .substitute_extensions
                    .unwrap_or(resolution_defaults.substitute_extensions),
                index_files: r.index_files.unwrap_or(resolution_defaults.index_files),
            },
            None => resolution_defaults,
        };

        let layers = LayerPolicy {
            layers: raw
                .layers
                .unwrap_or_default()
                .into_iter()
                .map(|(name, l)| {
                    (
                        name,
                        LayerRule {
                            allow: l.allow,
                            patterns: l.patterns,
                        },
                    )
                })
                .collect(),
        };

        Ok(Self {
            thresholds,
            scan,
            resolution,
            layers,
        })
    }
}

/// Starter `.modmap.toml` written by `modmap init`.
pub fn generate_config_template() -> String {
    format!(
        r#"# modmap configuration

[thresholds]
# Outgoing internal dependencies before a module counts as highly coupled
high_dependency_count = {high_dependency}
# Coupling score (0-100) at or above which a module is flagged
high_coupling = {high_coupling:.1}
# Cohesion score (0-100) below which a directory is flagged
low_cohesion = {low_cohesion:.1}
# Cycles with more modules than this are high severity
long_cycle = {long_cycle}
# Stop collecting cycles after this many
max_cycles = {max_cycles}
# Edges drawn in the mermaid graph
max_graph_edges = {max_edges}

[scan]
extensions = ["ts", "tsx", "js", "jsx", "mjs", "cjs"]
exclude = ["node_modules", "dist", "build", ".git", "coverage"]

[resolution]
# "./util.js" may resolve to "util.ts"
primary_extensions = ["ts", "tsx"]
fallback_extensions = ["js", "jsx"]
substitute_extensions = ["js", "jsx", "mjs", "cjs"]
index_files = true

# Layers are matched by directory name (or by the optional patterns).
# Each layer lists the layers it may depend on.
#
# [layers.presentation]
# allow = ["business"]
#
# [layers.business]
# allow = ["data"]
#
# [layers.data]
# allow = []
# patterns = ["src/db/"]
"#,
        high_dependency = DEFAULT_HIGH_DEPENDENCY_COUNT,
        high_coupling = DEFAULT_HIGH_COUPLING,
        low_cohesion = DEFAULT_LOW_COHESION,
        long_cycle = DEFAULT_LONG_CYCLE,
        max_cycles = DEFAULT_MAX_CYCLES,
        max_edges = DEFAULT_MAX_GRAPH_EDGES,
    )
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
