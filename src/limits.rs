use serde::{Deserialize, Serialize};

use crate::error::RenderError;

/// Per degree-of-freedom kinematic bounds.
///
/// Every field is an explicit `Option` so "not provided" stays distinct from
/// a limit that is legitimately zero.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Limits {
    #[serde(default)]
    pub min_position: Option<Vec<f64>>,
    #[serde(default)]
    pub max_position: Option<Vec<f64>>,
    #[serde(default)]
    pub max_velocity: Option<Vec<f64>>,
    /// Defaults to `-max_velocity` when absent.
    #[serde(default)]
    pub min_velocity: Option<Vec<f64>>,
    #[serde(default)]
    pub max_acceleration: Option<Vec<f64>>,
    /// Defaults to `-max_acceleration` when absent.
    #[serde(default)]
    pub min_acceleration: Option<Vec<f64>>,
    /// Symmetric: the floor is always `-max_jerk`.
    #[serde(default)]
    pub max_jerk: Option<Vec<f64>>,
}

impl Limits {
    /// Creates limits with the always-required arrays set.
    pub fn new(max_velocity: Vec<f64>, max_acceleration: Vec<f64>) -> Self {
        Self {
            max_velocity: Some(max_velocity),
            max_acceleration: Some(max_acceleration),
            ..Self::default()
        }
    }

    pub fn with_max_jerk(mut self, max_jerk: Vec<f64>) -> Self {
        self.max_jerk = Some(max_jerk);
        self
    }

    pub fn with_position(mut self, min_position: Vec<f64>, max_position: Vec<f64>) -> Self {
        self.min_position = Some(min_position);
        self.max_position = Some(max_position);
        self
    }

    /// Checks every array against `dofs`. `max_jerk` is only required when
    /// jerk is going to be plotted.
    pub fn validate(&self, dofs: usize, require_jerk: bool) -> Result<(), RenderError> {
        required("max_velocity", &self.max_velocity, dofs)?;
        required("max_acceleration", &self.max_acceleration, dofs)?;
        if require_jerk {
            required("max_jerk", &self.max_jerk, dofs)?;
        } else {
            optional("max_jerk", &self.max_jerk, dofs)?;
        }
        optional("min_position", &self.min_position, dofs)?;
        optional("max_position", &self.max_position, dofs)?;
        optional("min_velocity", &self.min_velocity, dofs)?;
        optional("min_acceleration", &self.min_acceleration, dofs)?;
        Ok(())
    }

    pub fn min_position(&self, dof: usize) -> Option<f64> {
        at(&self.min_position, dof)
    }

    pub fn max_position(&self, dof: usize) -> Option<f64> {
        at(&self.max_position, dof)
    }

    pub fn max_velocity(&self, dof: usize) -> Option<f64> {
        at(&self.max_velocity, dof)
    }

    pub fn min_velocity(&self, dof: usize) -> Option<f64> {
        at(&self.min_velocity, dof).or_else(|| self.max_velocity(dof).map(|v| -v))
    }

    pub fn max_acceleration(&self, dof: usize) -> Option<f64> {
        at(&self.max_acceleration, dof)
    }

    pub fn min_acceleration(&self, dof: usize) -> Option<f64> {
        at(&self.min_acceleration, dof).or_else(|| self.max_acceleration(dof).map(|a| -a))
    }

    pub fn max_jerk(&self, dof: usize) -> Option<f64> {
        at(&self.max_jerk, dof)
    }

    pub fn min_jerk(&self, dof: usize) -> Option<f64> {
        self.max_jerk(dof).map(|j| -j)
    }
}

fn at(values: &Option<Vec<f64>>, dof: usize) -> Option<f64> {
    values.as_ref().and_then(|v| v.get(dof).copied())
}

fn required(field: &'static str, values: &Option<Vec<f64>>, dofs: usize) -> Result<(), RenderError> {
    match values {
        Some(v) if v.len() == dofs => Ok(()),
        other => Err(RenderError::MissingLimits {
            field,
            expected: dofs,
            found: other.as_ref().map(Vec::len),
        }),
    }
}

fn optional(field: &'static str, values: &Option<Vec<f64>>, dofs: usize) -> Result<(), RenderError> {
    match values {
        None => Ok(()),
        Some(_) => required(field, values, dofs),
    }
}
