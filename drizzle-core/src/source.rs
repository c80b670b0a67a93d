//! Arrival sources
//!
//! A [`Source`] is one named arrival process: a tick window within the
//! repeating cycle, a count model (distribution or formula), and a scale.

use rand::rngs::SmallRng;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::dist::{Dist, Sampler};
use crate::error::{Error, Result};
use crate::formula::Formula;

/// One configured arrival process.
///
/// Exactly one of `count` and `formula` must be set; this is checked at
/// system initialization.
#[derive(Debug, Clone, Default, Deserialize, Serialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct Source {
    /// First cycle-relative tick at which this source is active.
    /// Sampled once at the start of every cycle. Defaults to 0.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<Dist>,

    /// First cycle-relative tick (exclusive) at which this source is no
    /// longer active. Sampled once at the start of every cycle.
    /// Defaults to the cycle width.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<Dist>,

    /// Distribution for the per-tick count.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<Dist>,

    /// Formula for the per-tick count, evaluated with `t` and `r` bound.
    /// Formula-assigned variables persist for the life of the run.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formula: Option<String>,

    /// Multiplier for the raw count. Defaults to 1; forced to 0 when
    /// `disabled`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<f64>,

    /// Keep negative counts instead of clamping them to zero. Clamping
    /// happens after scaling.
    #[serde(default)]
    pub allow_negatives: bool,

    /// A disabled source contributes nothing regardless of its model.
    #[serde(default)]
    pub disabled: bool,

    #[serde(skip)]
    state: Option<Runtime>,
}

/// Built per-source state; absent until [`Source::init`].
#[derive(Debug, Clone)]
struct Runtime {
    from: Option<Sampler>,
    to: Option<Sampler>,
    model: Model,
    scale: f64,
    // Current cycle's window [lo, hi). Zero-width until the first cycle
    // boundary samples it.
    lo: i64,
    hi: i64,
}

#[derive(Debug, Clone)]
enum Model {
    Draw(Sampler),
    Eval(Formula),
}

impl Source {
    /// Validate the configuration and build the samplers and formula.
    pub(crate) fn init(&mut self, name: &str) -> Result<()> {
        let wrap = |err: Error| match err {
            Error::Config(msg) => Error::Config(format!("in '{name}': {msg}")),
            other => other,
        };

        let from = self.from.as_ref().map(Dist::build).transpose().map_err(wrap)?;
        let to = self.to.as_ref().map(Dist::build).transpose().map_err(wrap)?;

        let model = match (&self.count, &self.formula) {
            (Some(dist), None) => Model::Draw(dist.build().map_err(wrap)?),
            (None, Some(src)) => Model::Eval(Formula::compile(src).map_err(wrap)?),
            (None, None) => {
                return Err(Error::Config(format!(
                    "in '{name}': source defines neither a count distribution nor a formula"
                )))
            }
            (Some(_), Some(_)) => {
                return Err(Error::Config(format!(
                    "in '{name}': source defines both a count distribution and a formula"
                )))
            }
        };

        let scale = if self.disabled { 0.0 } else { self.scale.unwrap_or(1.0) };

        self.state = Some(Runtime { from, to, model, scale, lo: 0, hi: 0 });
        Ok(())
    }

    /// Re-sample the window bounds at a cycle boundary. The bounds hold
    /// for the entire cycle even though the count varies tick to tick.
    pub(crate) fn reset(&mut self, cycle_width: i64, rng: &mut SmallRng) {
        if let Some(state) = &mut self.state {
            state.lo = state.from.as_ref().map_or(0, |s| s.sample(rng) as i64);
            state.hi = state.to.as_ref().map_or(cycle_width, |s| s.sample(rng) as i64);
        }
    }

    /// Whether the cycle-relative tick `r` falls in this source's window.
    pub(crate) fn active(&self, r: i64) -> bool {
        match &self.state {
            Some(state) => state.lo <= r && r < state.hi,
            None => false,
        }
    }

    /// Per-tick count: raw sample times scale, clamped to zero when
    /// negative unless `allow_negatives`.
    pub(crate) fn count(&mut self, t: i64, r: i64, rng: &mut SmallRng) -> Result<i64> {
        let state = self
            .state
            .as_mut()
            .ok_or_else(|| Error::Config("source not initialized".to_string()))?;

        let raw = match &mut state.model {
            Model::Draw(sampler) => sampler.sample(rng),
            Model::Eval(formula) => formula.eval(t, r)?,
        };

        let scaled = state.scale * raw;
        if scaled < 0.0 && !self.allow_negatives {
            return Ok(0);
        }
        Ok(scaled as i64)
    }
}
