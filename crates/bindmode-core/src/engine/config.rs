use crate::core::chem::PerceptionParams;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ConfigError {
    #[error("Parameter '{key}' must be a positive, finite number (got {value})")]
    NonPositive { key: &'static str, value: f64 },
    #[error("Parameter '{key}' must lie in ({min}, {max}] degrees (got {value})")]
    OutOfRange {
        key: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
    #[error("Parameter '{key}' expects a number (got '{value}')")]
    NotNumeric { key: String, value: String },
    #[error("Parameter '{key}' expects true or false (got '{value}')")]
    NotBoolean { key: String, value: String },
    #[error("Unknown parameter: {0}")]
    UnknownParameter(String),
    #[error("Invalid configuration TOML: {0}")]
    Toml(String),
}

/// Names of every recognized configuration parameter.
pub const PARAMETER_NAMES: &[&str] = &[
    "hydrogen_bond_dist_cutoff",
    "hydrogen_bond_angle_cutoff",
    "hydrophobic_dist_cutoff",
    "salt_bridge_dist_cutoff",
    "pi_pi_interacting_dist_cutoff",
    "pi_stacking_angle_tolerance",
    "t_stacking_angle_tolerance",
    "cation_pi_dist_cutoff",
    "cation_pi_angle_tolerance",
    "metal_coordination_dist_cutoff",
    "close_contacts_dist_cutoff",
    "bond_tolerance",
    "ring_planarity_tolerance",
    "require_explicit_hydrogens",
];

const REQUIRE_EXPLICIT_HYDROGENS: &str = "require_explicit_hydrogens";

/// Geometric criteria for every interaction category, plus perception tolerances.
///
/// Distances are in Angstroms and angles in degrees. A value is immutable once built;
/// use [`AnalysisConfigBuilder`] to derive a modified copy.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisConfig {
    pub hydrogen_bond_dist_cutoff: f64,
    /// Largest allowed deviation of the donor-H-acceptor angle from linear.
    pub hydrogen_bond_angle_cutoff: f64,
    pub hydrophobic_dist_cutoff: f64,
    pub salt_bridge_dist_cutoff: f64,
    pub pi_pi_interacting_dist_cutoff: f64,
    pub pi_stacking_angle_tolerance: f64,
    pub t_stacking_angle_tolerance: f64,
    pub cation_pi_dist_cutoff: f64,
    pub cation_pi_angle_tolerance: f64,
    pub metal_coordination_dist_cutoff: f64,
    pub close_contacts_dist_cutoff: f64,
    pub bond_tolerance: f64,
    pub ring_planarity_tolerance: f64,
    /// When set, donors without explicit hydrogens never form hydrogen bonds.
    pub require_explicit_hydrogens: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            hydrogen_bond_dist_cutoff: 4.0,
            hydrogen_bond_angle_cutoff: 40.0,
            hydrophobic_dist_cutoff: 4.0,
            salt_bridge_dist_cutoff: 5.5,
            pi_pi_interacting_dist_cutoff: 7.5,
            pi_stacking_angle_tolerance: 30.0,
            t_stacking_angle_tolerance: 30.0,
            cation_pi_dist_cutoff: 6.0,
            cation_pi_angle_tolerance: 30.0,
            metal_coordination_dist_cutoff: 3.5,
            close_contacts_dist_cutoff: 2.5,
            bond_tolerance: 0.45,
            ring_planarity_tolerance: 0.1,
            require_explicit_hydrogens: false,
        }
    }
}

impl AnalysisConfig {
    pub fn builder() -> AnalysisConfigBuilder {
        AnalysisConfigBuilder::new()
    }

    /// Parses a flat TOML table of parameters on top of the defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let table: toml::Table =
            toml::from_str(content).map_err(|e| ConfigError::Toml(e.to_string()))?;
        let mut builder = AnalysisConfigBuilder::new();
        for (key, value) in &table {
            builder = match value {
                toml::Value::Float(v) => builder.set_number(key, *v)?,
                toml::Value::Integer(v) => builder.set_number(key, *v as f64)?,
                toml::Value::Boolean(v) => builder.set_flag(key, *v)?,
                toml::Value::String(v) => builder.set(key, v)?,
                other => {
                    return Err(ConfigError::NotNumeric {
                        key: key.clone(),
                        value: other.to_string(),
                    });
                }
            };
        }
        builder.build()
    }

    /// Applies textual `key = value` pairs on top of the defaults.
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        AnalysisConfigBuilder::from_config(Self::default())
            .set_all(pairs)?
            .build()
    }

    /// The largest distance any classifier queries, used as the index cell size.
    pub fn max_cutoff(&self) -> f64 {
        [
            self.hydrogen_bond_dist_cutoff,
            self.hydrophobic_dist_cutoff,
            self.salt_bridge_dist_cutoff,
            self.pi_pi_interacting_dist_cutoff,
            self.cation_pi_dist_cutoff,
            self.metal_coordination_dist_cutoff,
            self.close_contacts_dist_cutoff,
        ]
        .into_iter()
        .fold(0.0, f64::max)
    }

    pub fn perception(&self) -> PerceptionParams {
        PerceptionParams {
            bond_tolerance: self.bond_tolerance,
            ring_planarity_tolerance: self.ring_planarity_tolerance,
        }
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string(self).map_err(|e| ConfigError::Toml(e.to_string()))
    }

    fn number_mut(&mut self, key: &str) -> Option<&mut f64> {
        match key {
            "hydrogen_bond_dist_cutoff" => Some(&mut self.hydrogen_bond_dist_cutoff),
            "hydrogen_bond_angle_cutoff" => Some(&mut self.hydrogen_bond_angle_cutoff),
            "hydrophobic_dist_cutoff" => Some(&mut self.hydrophobic_dist_cutoff),
            "salt_bridge_dist_cutoff" => Some(&mut self.salt_bridge_dist_cutoff),
            "pi_pi_interacting_dist_cutoff" => Some(&mut self.pi_pi_interacting_dist_cutoff),
            "pi_stacking_angle_tolerance" => Some(&mut self.pi_stacking_angle_tolerance),
            "t_stacking_angle_tolerance" => Some(&mut self.t_stacking_angle_tolerance),
            "cation_pi_dist_cutoff" => Some(&mut self.cation_pi_dist_cutoff),
            "cation_pi_angle_tolerance" => Some(&mut self.cation_pi_angle_tolerance),
            "metal_coordination_dist_cutoff" => Some(&mut self.metal_coordination_dist_cutoff),
            "close_contacts_dist_cutoff" => Some(&mut self.close_contacts_dist_cutoff),
            "bond_tolerance" => Some(&mut self.bond_tolerance),
            "ring_planarity_tolerance" => Some(&mut self.ring_planarity_tolerance),
            _ => None,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("hydrogen_bond_dist_cutoff", self.hydrogen_bond_dist_cutoff),
            ("hydrophobic_dist_cutoff", self.hydrophobic_dist_cutoff),
            ("salt_bridge_dist_cutoff", self.salt_bridge_dist_cutoff),
            ("pi_pi_interacting_dist_cutoff", self.pi_pi_interacting_dist_cutoff),
            ("cation_pi_dist_cutoff", self.cation_pi_dist_cutoff),
            ("metal_coordination_dist_cutoff", self.metal_coordination_dist_cutoff),
            ("close_contacts_dist_cutoff", self.close_contacts_dist_cutoff),
            ("bond_tolerance", self.bond_tolerance),
            ("ring_planarity_tolerance", self.ring_planarity_tolerance),
            ("hydrogen_bond_angle_cutoff", self.hydrogen_bond_angle_cutoff),
            ("pi_stacking_angle_tolerance", self.pi_stacking_angle_tolerance),
            ("t_stacking_angle_tolerance", self.t_stacking_angle_tolerance),
            ("cation_pi_angle_tolerance", self.cation_pi_angle_tolerance),
        ];
        for (key, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::NonPositive { key, value });
            }
        }

        let angles = [
            ("hydrogen_bond_angle_cutoff", self.hydrogen_bond_angle_cutoff, 180.0),
            ("pi_stacking_angle_tolerance", self.pi_stacking_angle_tolerance, 90.0),
            ("t_stacking_angle_tolerance", self.t_stacking_angle_tolerance, 90.0),
            ("cation_pi_angle_tolerance", self.cation_pi_angle_tolerance, 90.0),
        ];
        for (key, value, max) in angles {
            if value > max {
                return Err(ConfigError::OutOfRange {
                    key,
                    value,
                    min: 0.0,
                    max,
                });
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct AnalysisConfigBuilder {
    config: AnalysisConfig,
}

impl AnalysisConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from an existing configuration instead of the defaults.
    pub fn from_config(config: AnalysisConfig) -> Self {
        Self { config }
    }

    pub fn hydrogen_bond_dist_cutoff(mut self, value: f64) -> Self {
        self.config.hydrogen_bond_dist_cutoff = value;
        self
    }
    pub fn hydrogen_bond_angle_cutoff(mut self, value: f64) -> Self {
        self.config.hydrogen_bond_angle_cutoff = value;
        self
    }
    pub fn hydrophobic_dist_cutoff(mut self, value: f64) -> Self {
        self.config.hydrophobic_dist_cutoff = value;
        self
    }
    pub fn salt_bridge_dist_cutoff(mut self, value: f64) -> Self {
        self.config.salt_bridge_dist_cutoff = value;
        self
    }
    pub fn pi_pi_interacting_dist_cutoff(mut self, value: f64) -> Self {
        self.config.pi_pi_interacting_dist_cutoff = value;
        self
    }
    pub fn pi_stacking_angle_tolerance(mut self, value: f64) -> Self {
        self.config.pi_stacking_angle_tolerance = value;
        self
    }
    pub fn t_stacking_angle_tolerance(mut self, value: f64) -> Self {
        self.config.t_stacking_angle_tolerance = value;
        self
    }
    pub fn cation_pi_dist_cutoff(mut self, value: f64) -> Self {
        self.config.cation_pi_dist_cutoff = value;
        self
    }
    pub fn cation_pi_angle_tolerance(mut self, value: f64) -> Self {
        self.config.cation_pi_angle_tolerance = value;
        self
    }
    pub fn metal_coordination_dist_cutoff(mut self, value: f64) -> Self {
        self.config.metal_coordination_dist_cutoff = value;
        self
    }
    pub fn close_contacts_dist_cutoff(mut self, value: f64) -> Self {
        self.config.close_contacts_dist_cutoff = value;
        self
    }
    pub fn bond_tolerance(mut self, value: f64) -> Self {
        self.config.bond_tolerance = value;
        self
    }
    pub fn ring_planarity_tolerance(mut self, value: f64) -> Self {
        self.config.ring_planarity_tolerance = value;
        self
    }
    pub fn require_explicit_hydrogens(mut self, value: bool) -> Self {
        self.config.require_explicit_hydrogens = value;
        self
    }

    /// Sets a numeric parameter by name.
    pub fn set_number(mut self, key: &str, value: f64) -> Result<Self, ConfigError> {
        if key == REQUIRE_EXPLICIT_HYDROGENS {
            return Err(ConfigError::NotBoolean {
                key: key.to_string(),
                value: value.to_string(),
            });
        }
        let slot = self
            .config
            .number_mut(key)
            .ok_or_else(|| ConfigError::UnknownParameter(key.to_string()))?;
        *slot = value;
        Ok(self)
    }

    /// Sets a boolean parameter by name.
    pub fn set_flag(mut self, key: &str, value: bool) -> Result<Self, ConfigError> {
        if key == REQUIRE_EXPLICIT_HYDROGENS {
            self.config.require_explicit_hydrogens = value;
            Ok(self)
        } else if self.config.number_mut(key).is_some() {
            Err(ConfigError::NotNumeric {
                key: key.to_string(),
                value: value.to_string(),
            })
        } else {
            Err(ConfigError::UnknownParameter(key.to_string()))
        }
    }

    /// Sets any parameter from its textual value.
    pub fn set(self, key: &str, value: &str) -> Result<Self, ConfigError> {
        let key = key.trim();
        let value = value.trim();
        if key == REQUIRE_EXPLICIT_HYDROGENS {
            let flag = value.parse::<bool>().map_err(|_| ConfigError::NotBoolean {
                key: key.to_string(),
                value: value.to_string(),
            })?;
            return self.set_flag(key, flag);
        }
        if !PARAMETER_NAMES.contains(&key) {
            return Err(ConfigError::UnknownParameter(key.to_string()));
        }
        let number = value.parse::<f64>().map_err(|_| ConfigError::NotNumeric {
            key: key.to_string(),
            value: value.to_string(),
        })?;
        self.set_number(key, number)
    }

    pub fn set_all<I, K, V>(self, pairs: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        pairs
            .into_iter()
            .try_fold(self, |builder, (key, value)| builder.set(key.as_ref(), value.as_ref()))
    }

    pub fn build(self) -> Result<AnalysisConfig, ConfigError> {
        self.config.validate()?;
        Ok(self.config)
    }
}
