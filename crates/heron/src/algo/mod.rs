pub mod fruchterman_reingold;

use crate::error::{Error, Result};
use crate::geom::EPSILON;
use serde::{Deserialize, Serialize};

/// Default number of simulation steps.
pub const ITERATIONS: usize = 300;
/// Default multiplicative temperature decay applied after every step.
pub const COOLING: f64 = 0.95;
/// Default step cap for the first iteration.
pub const INITIAL_TEMPERATURE: f64 = 0.1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct FruchtermanReingoldOptions {
    /// Number of steps. The run always completes all of them unless
    /// `convergence_threshold` is set.
    pub iterations: usize,
    /// Temperature multiplier applied once per step, in `(0, 1]`.
    pub cooling: f64,
    /// Maximum displacement length applied to any node during the first step.
    pub initial_temperature: f64,
    /// Added to every distance so coincident nodes never divide by zero.
    pub epsilon: f64,
    /// Opt-in early exit: stop after the first step whose summed applied displacement falls
    /// below this value. `None` keeps the fixed-iteration behavior.
    pub convergence_threshold: Option<f64>,
}

impl Default for FruchtermanReingoldOptions {
    fn default() -> Self {
        Self {
            iterations: ITERATIONS,
            cooling: COOLING,
            initial_temperature: INITIAL_TEMPERATURE,
            epsilon: EPSILON,
            convergence_threshold: None,
        }
    }
}

impl FruchtermanReingoldOptions {
    pub fn validate(&self) -> Result<()> {
        if !(self.cooling.is_finite() && self.cooling > 0.0 && self.cooling <= 1.0) {
            return Err(invalid("cooling", self.cooling));
        }
        if !(self.initial_temperature.is_finite() && self.initial_temperature >= 0.0) {
            return Err(invalid("initialTemperature", self.initial_temperature));
        }
        if !(self.epsilon.is_finite() && self.epsilon > 0.0) {
            return Err(invalid("epsilon", self.epsilon));
        }
        if let Some(t) = self.convergence_threshold {
            if !(t.is_finite() && t >= 0.0) {
                return Err(invalid("convergenceThreshold", t));
            }
        }
        Ok(())
    }
}

fn invalid(name: &'static str, value: f64) -> Error {
    Error::InvalidOption {
        name,
        value: value.to_string(),
    }
}
