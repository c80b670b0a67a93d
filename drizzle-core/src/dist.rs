//! Distribution specifications for arrival-count models
//!
//! A [`Dist`] is the deserialized form of one distribution in a
//! configuration file: a `scale` multiplier plus exactly one family field.
//! [`Dist::build`] validates it and turns it into a [`Sampler`], a
//! closed sum over the supported families with the `rand_distr` parameter
//! objects already constructed. Modeling the families as a closed set means
//! a malformed configuration is rejected once, at startup, rather than at
//! first use mid-run.
//!
//! Sampling takes the shared RNG by `&mut`; every distribution in a system
//! draws from the one `SmallRng` owned by the [`System`](crate::System), in
//! deterministic source order.

use rand::distr::weighted::WeightedIndex;
use rand::distr::Bernoulli;
use rand::rngs::SmallRng;
use rand::Rng;
use rand_distr::{
    Beta, Binomial, ChiSquared, Distribution as RandDistribution, Exp, FisherF, Gamma, Gumbel,
    LogNormal, Normal, Pareto, Poisson, StudentT, Triangular, Uniform, Weibull,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;

use crate::error::{Error, Result};

/// Alpha-stable distribution parameters.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct AlphaStableParams {
    /// Stability, in (0, 2].
    pub alpha: f64,
    /// Skewness, in [-1, 1].
    pub beta: f64,
    /// Scale, > 0.
    pub c: f64,
    /// Location.
    pub mu: f64,
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct BernoulliParams {
    /// Success probability, in [0, 1]. Samples are 0 or 1.
    pub p: f64,
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct BetaParams {
    pub alpha: f64,
    pub beta: f64,
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct BinomialParams {
    /// Number of trials.
    pub n: u64,
    /// Success probability per trial.
    pub p: f64,
}

/// Categorical distribution: samples the index of one of the weights.
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct CategoricalParams {
    /// Relative, non-negative weights; samples are indices `0..len`.
    pub weights: Vec<f64>,
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct ChiSquaredParams {
    /// Degrees of freedom.
    pub k: f64,
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct ExponentialParams {
    /// Rate parameter (events per unit).
    pub rate: f64,
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct FParams {
    /// Numerator degrees of freedom.
    pub d1: f64,
    /// Denominator degrees of freedom.
    pub d2: f64,
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct GammaParams {
    /// Shape.
    pub alpha: f64,
    /// Rate (inverse scale).
    pub beta: f64,
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct GumbelRightParams {
    /// Location.
    pub mu: f64,
    /// Scale, > 0.
    pub beta: f64,
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct InverseGammaParams {
    /// Shape.
    pub alpha: f64,
    /// Scale.
    pub beta: f64,
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct LaplaceParams {
    /// Location.
    pub mu: f64,
    /// Diversity, > 0.
    pub scale: f64,
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct LogNormalParams {
    /// Mean of the underlying normal.
    pub mu: f64,
    /// Standard deviation of the underlying normal.
    pub sigma: f64,
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct NormalParams {
    pub mu: f64,
    pub sigma: f64,
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct ParetoParams {
    /// Minimum value (scale), > 0.
    pub xm: f64,
    /// Tail index (shape), > 0.
    pub alpha: f64,
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct PoissonParams {
    /// Mean number of events per tick.
    pub lambda: f64,
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct StudentsTParams {
    /// Location.
    pub mu: f64,
    /// Scale, > 0.
    pub sigma: f64,
    /// Degrees of freedom.
    pub nu: f64,
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct TriangleParams {
    /// Lower bound.
    pub a: f64,
    /// Upper bound.
    pub b: f64,
    /// Mode, in [a, b].
    pub c: f64,
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct UniformParams {
    /// Lower bound (inclusive).
    pub min: f64,
    /// Upper bound (exclusive).
    pub max: f64,
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct WeibullParams {
    /// Shape.
    pub k: f64,
    /// Scale.
    pub lambda: f64,
}

/// One distribution in a configuration file.
///
/// Exactly one family field must be populated; [`Dist::validate`] enforces
/// this. `scale` (default 1) is multiplied into every sample.
#[derive(Debug, Clone, Default, Deserialize, Serialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct Dist {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<f64>,

    /// Degenerate distribution: every sample is this value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constant: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alpha_stable: Option<AlphaStableParams>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bernoulli: Option<BernoulliParams>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub beta: Option<BetaParams>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub binomial: Option<BinomialParams>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categorical: Option<CategoricalParams>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chi_squared: Option<ChiSquaredParams>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exponential: Option<ExponentialParams>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub f: Option<FParams>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gamma: Option<GammaParams>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gumbel_right: Option<GumbelRightParams>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inverse_gamma: Option<InverseGammaParams>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub laplace: Option<LaplaceParams>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_normal: Option<LogNormalParams>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub normal: Option<NormalParams>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pareto: Option<ParetoParams>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poisson: Option<PoissonParams>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub students_t: Option<StudentsTParams>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub triangle: Option<TriangleParams>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uniform: Option<UniformParams>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weibull: Option<WeibullParams>,
}

impl Dist {
    fn family_count(&self) -> usize {
        [
            self.constant.is_some(),
            self.alpha_stable.is_some(),
            self.bernoulli.is_some(),
            self.beta.is_some(),
            self.binomial.is_some(),
            self.categorical.is_some(),
            self.chi_squared.is_some(),
            self.exponential.is_some(),
            self.f.is_some(),
            self.gamma.is_some(),
            self.gumbel_right.is_some(),
            self.inverse_gamma.is_some(),
            self.laplace.is_some(),
            self.log_normal.is_some(),
            self.normal.is_some(),
            self.pareto.is_some(),
            self.poisson.is_some(),
            self.students_t.is_some(),
            self.triangle.is_some(),
            self.uniform.is_some(),
            self.weibull.is_some(),
        ]
        .iter()
        .filter(|populated| **populated)
        .count()
    }

    /// Ensure that exactly one distribution family is populated.
    pub fn validate(&self) -> Result<()> {
        let n = self.family_count();
        if n != 1 {
            return Err(Error::Config(format!(
                "found {n} distribution families, expected exactly one"
            )));
        }
        Ok(())
    }

    /// Validate and construct a ready-to-sample [`Sampler`].
    pub fn build(&self) -> Result<Sampler> {
        self.validate()?;

        let kind = if let Some(value) = self.constant {
            SamplerKind::Constant(value)
        } else if let Some(p) = &self.alpha_stable {
            SamplerKind::AlphaStable(AlphaStable::new(p)?)
        } else if let Some(p) = &self.bernoulli {
            SamplerKind::Bernoulli(Bernoulli::new(p.p).map_err(|e| bad("bernoulli", e))?)
        } else if let Some(p) = &self.beta {
            SamplerKind::Beta(Beta::new(p.alpha, p.beta).map_err(|e| bad("beta", e))?)
        } else if let Some(p) = &self.binomial {
            SamplerKind::Binomial(Binomial::new(p.n, p.p).map_err(|e| bad("binomial", e))?)
        } else if let Some(p) = &self.categorical {
            SamplerKind::Categorical(
                WeightedIndex::new(p.weights.iter().copied())
                    .map_err(|e| bad("categorical", e))?,
            )
        } else if let Some(p) = &self.chi_squared {
            SamplerKind::ChiSquared(ChiSquared::new(p.k).map_err(|e| bad("chi_squared", e))?)
        } else if let Some(p) = &self.exponential {
            SamplerKind::Exponential(Exp::new(p.rate).map_err(|e| bad("exponential", e))?)
        } else if let Some(p) = &self.f {
            SamplerKind::F(FisherF::new(p.d1, p.d2).map_err(|e| bad("f", e))?)
        } else if let Some(p) = &self.gamma {
            if !(p.beta > 0.0) {
                return Err(bad("gamma", "rate must be > 0"));
            }
            SamplerKind::Gamma(Gamma::new(p.alpha, 1.0 / p.beta).map_err(|e| bad("gamma", e))?)
        } else if let Some(p) = &self.gumbel_right {
            SamplerKind::GumbelRight(Gumbel::new(p.mu, p.beta).map_err(|e| bad("gumbel_right", e))?)
        } else if let Some(p) = &self.inverse_gamma {
            SamplerKind::InverseGamma(InverseGamma::new(p)?)
        } else if let Some(p) = &self.laplace {
            SamplerKind::Laplace(Laplace::new(p)?)
        } else if let Some(p) = &self.log_normal {
            SamplerKind::LogNormal(LogNormal::new(p.mu, p.sigma).map_err(|e| bad("log_normal", e))?)
        } else if let Some(p) = &self.normal {
            SamplerKind::Normal(Normal::new(p.mu, p.sigma).map_err(|e| bad("normal", e))?)
        } else if let Some(p) = &self.pareto {
            SamplerKind::Pareto(Pareto::new(p.xm, p.alpha).map_err(|e| bad("pareto", e))?)
        } else if let Some(p) = &self.poisson {
            SamplerKind::Poisson(Poisson::new(p.lambda).map_err(|e| bad("poisson", e))?)
        } else if let Some(p) = &self.students_t {
            SamplerKind::StudentsT(StudentsT::new(p)?)
        } else if let Some(p) = &self.triangle {
            SamplerKind::Triangle(Triangular::new(p.a, p.b, p.c).map_err(|e| bad("triangle", e))?)
        } else if let Some(p) = &self.uniform {
            SamplerKind::Uniform(Uniform::new(p.min, p.max).map_err(|e| bad("uniform", e))?)
        } else if let Some(p) = &self.weibull {
            SamplerKind::Weibull(Weibull::new(p.lambda, p.k).map_err(|e| bad("weibull", e))?)
        } else {
            return Err(Error::Config("no distribution family populated".to_string()));
        };

        Ok(Sampler { scale: self.scale.unwrap_or(1.0), kind })
    }
}

fn bad(family: &str, err: impl fmt::Display) -> Error {
    Error::Config(format!("invalid {family} distribution: {err}"))
}

/// A validated, ready-to-sample distribution.
#[derive(Debug, Clone)]
pub struct Sampler {
    scale: f64,
    kind: SamplerKind,
}

#[derive(Debug, Clone)]
enum SamplerKind {
    Constant(f64),
    AlphaStable(AlphaStable),
    Bernoulli(Bernoulli),
    Beta(Beta<f64>),
    Binomial(Binomial),
    Categorical(WeightedIndex<f64>),
    ChiSquared(ChiSquared<f64>),
    Exponential(Exp<f64>),
    F(FisherF<f64>),
    Gamma(Gamma<f64>),
    GumbelRight(Gumbel<f64>),
    InverseGamma(InverseGamma),
    Laplace(Laplace),
    LogNormal(LogNormal<f64>),
    Normal(Normal<f64>),
    Pareto(Pareto<f64>),
    Poisson(Poisson<f64>),
    StudentsT(StudentsT),
    Triangle(Triangular<f64>),
    Uniform(Uniform<f64>),
    Weibull(Weibull<f64>),
}

impl Sampler {
    /// Draw one sample, with the configured `scale` applied.
    pub fn sample(&self, rng: &mut SmallRng) -> f64 {
        let raw = match &self.kind {
            SamplerKind::Constant(value) => *value,
            SamplerKind::AlphaStable(d) => d.draw(rng),
            SamplerKind::Bernoulli(d) => {
                if d.sample(rng) {
                    1.0
                } else {
                    0.0
                }
            }
            SamplerKind::Beta(d) => d.sample(rng),
            SamplerKind::Binomial(d) => d.sample(rng) as f64,
            SamplerKind::Categorical(d) => d.sample(rng) as f64,
            SamplerKind::ChiSquared(d) => d.sample(rng),
            SamplerKind::Exponential(d) => d.sample(rng),
            SamplerKind::F(d) => d.sample(rng),
            SamplerKind::Gamma(d) => d.sample(rng),
            SamplerKind::GumbelRight(d) => d.sample(rng),
            SamplerKind::InverseGamma(d) => d.draw(rng),
            SamplerKind::Laplace(d) => d.draw(rng),
            SamplerKind::LogNormal(d) => d.sample(rng),
            SamplerKind::Normal(d) => d.sample(rng),
            SamplerKind::Pareto(d) => d.sample(rng),
            SamplerKind::Poisson(d) => d.sample(rng),
            SamplerKind::StudentsT(d) => d.draw(rng),
            SamplerKind::Triangle(d) => d.sample(rng),
            SamplerKind::Uniform(d) => d.sample(rng),
            SamplerKind::Weibull(d) => d.sample(rng),
        };
        self.scale * raw
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }
}

/// A uniform draw on (0, 1), clamped away from both endpoints so that
/// logarithms and divisions stay finite.
fn unit_open(rng: &mut SmallRng) -> f64 {
    rng.random::<f64>().clamp(f64::MIN_POSITIVE, 1.0 - f64::EPSILON)
}

/// Alpha-stable sampler using the Chambers-Mallows-Stuck method.
#[derive(Debug, Clone, Copy)]
struct AlphaStable {
    alpha: f64,
    beta: f64,
    c: f64,
    mu: f64,
}

impl AlphaStable {
    fn new(p: &AlphaStableParams) -> Result<Self> {
        if !(p.alpha > 0.0 && p.alpha <= 2.0) {
            return Err(bad("alpha_stable", "alpha must be in (0, 2]"));
        }
        if !(-1.0..=1.0).contains(&p.beta) {
            return Err(bad("alpha_stable", "beta must be in [-1, 1]"));
        }
        if !(p.c > 0.0) {
            return Err(bad("alpha_stable", "c must be > 0"));
        }
        Ok(Self { alpha: p.alpha, beta: p.beta, c: p.c, mu: p.mu })
    }

    fn draw(&self, rng: &mut SmallRng) -> f64 {
        let half_pi = PI / 2.0;
        // U uniform on (-pi/2, pi/2), W standard exponential.
        let u = PI * (unit_open(rng) - 0.5);
        let w = -unit_open(rng).ln();

        if (self.alpha - 1.0).abs() < 1e-12 {
            let xi = half_pi + self.beta * u;
            let x = (xi * u.tan() - self.beta * ((half_pi * w * u.cos()) / xi).ln()) / half_pi;
            self.c * x + self.mu + (2.0 / PI) * self.beta * self.c * self.c.ln()
        } else {
            let zeta = -self.beta * (half_pi * self.alpha).tan();
            let xi = (-zeta).atan() / self.alpha;
            let x = (1.0 + zeta * zeta).powf(1.0 / (2.0 * self.alpha))
                * (self.alpha * (u + xi)).sin()
                / u.cos().powf(1.0 / self.alpha)
                * ((u - self.alpha * (u + xi)).cos() / w).powf((1.0 - self.alpha) / self.alpha);
            self.c * x + self.mu
        }
    }
}

/// Inverse-gamma sampler: the reciprocal of a unit-scale gamma draw,
/// scaled by beta.
#[derive(Debug, Clone)]
struct InverseGamma {
    beta: f64,
    gamma: Gamma<f64>,
}

impl InverseGamma {
    fn new(p: &InverseGammaParams) -> Result<Self> {
        if !(p.beta > 0.0) {
            return Err(bad("inverse_gamma", "beta must be > 0"));
        }
        let gamma = Gamma::new(p.alpha, 1.0).map_err(|e| bad("inverse_gamma", e))?;
        Ok(Self { beta: p.beta, gamma })
    }

    fn draw(&self, rng: &mut SmallRng) -> f64 {
        let g = self.gamma.sample(rng).max(f64::MIN_POSITIVE);
        self.beta / g
    }
}

/// Laplace sampler via the inverse CDF.
#[derive(Debug, Clone, Copy)]
struct Laplace {
    mu: f64,
    scale: f64,
}

impl Laplace {
    fn new(p: &LaplaceParams) -> Result<Self> {
        if !(p.scale > 0.0) {
            return Err(bad("laplace", "scale must be > 0"));
        }
        Ok(Self { mu: p.mu, scale: p.scale })
    }

    fn draw(&self, rng: &mut SmallRng) -> f64 {
        let u = rng.random::<f64>() - 0.5;
        let v = (1.0 - 2.0 * u.abs()).max(f64::MIN_POSITIVE);
        self.mu - self.scale * u.signum() * v.ln()
    }
}

/// Location-scale Student's t.
#[derive(Debug, Clone)]
struct StudentsT {
    mu: f64,
    sigma: f64,
    t: StudentT<f64>,
}

impl StudentsT {
    fn new(p: &StudentsTParams) -> Result<Self> {
        if !(p.sigma > 0.0) {
            return Err(bad("students_t", "sigma must be > 0"));
        }
        let t = StudentT::new(p.nu).map_err(|e| bad("students_t", e))?;
        Ok(Self { mu: p.mu, sigma: p.sigma, t })
    }

    fn draw(&self, rng: &mut SmallRng) -> f64 {
        self.mu + self.sigma * self.t.sample(rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn rng(seed: u64) -> SmallRng {
        SmallRng::seed_from_u64(seed)
    }

    #[test]
    fn validate_requires_exactly_one_family() {
        let empty = Dist::default();
        assert!(empty.validate().is_err());

        let one = Dist { poisson: Some(PoissonParams { lambda: 5.0 }), ..Default::default() };
        assert!(one.validate().is_ok());

        let two = Dist {
            poisson: Some(PoissonParams { lambda: 5.0 }),
            normal: Some(NormalParams { mu: 0.0, sigma: 1.0 }),
            ..Default::default()
        };
        assert!(two.validate().is_err());
    }

    #[test]
    fn build_rejects_unpopulated_dist() {
        assert!(Dist::default().build().is_err());
    }

    #[test]
    fn unknown_family_key_rejected() {
        let err = serde_json::from_str::<Dist>(r#"{"zeta": {"s": 2.0}}"#);
        assert!(err.is_err());
    }

    #[test]
    fn constant_applies_scale() {
        let dist = Dist { scale: Some(2.5), constant: Some(4.0), ..Default::default() };
        let sampler = dist.build().unwrap();
        let mut rng = rng(1);
        assert_eq!(sampler.sample(&mut rng), 10.0);
    }

    #[test]
    fn poisson_from_json_samples_near_lambda() {
        let dist: Dist = serde_json::from_str(r#"{"poisson": {"lambda": 5.0}}"#).unwrap();
        let sampler = dist.build().unwrap();
        let mut rng = rng(42);

        let n = 10_000;
        let mean: f64 = (0..n).map(|_| sampler.sample(&mut rng)).sum::<f64>() / n as f64;
        assert!((mean - 5.0).abs() < 0.2, "mean {} not close to lambda 5", mean);
    }

    #[test]
    fn bernoulli_samples_zero_or_one() {
        let dist = Dist { bernoulli: Some(BernoulliParams { p: 0.5 }), ..Default::default() };
        let sampler = dist.build().unwrap();
        let mut rng = rng(7);
        for _ in 0..100 {
            let x = sampler.sample(&mut rng);
            assert!(x == 0.0 || x == 1.0, "sample {} not a Bernoulli outcome", x);
        }
    }

    #[test]
    fn categorical_samples_valid_indices() {
        let dist = Dist {
            categorical: Some(CategoricalParams { weights: vec![1.0, 2.0, 3.0] }),
            ..Default::default()
        };
        let sampler = dist.build().unwrap();
        let mut rng = rng(11);
        for _ in 0..200 {
            let x = sampler.sample(&mut rng);
            assert!(x == 0.0 || x == 1.0 || x == 2.0, "index {} out of range", x);
        }
    }

    #[test]
    fn uniform_stays_in_range() {
        let dist = Dist {
            uniform: Some(UniformParams { min: 10.0, max: 20.0 }),
            ..Default::default()
        };
        let sampler = dist.build().unwrap();
        let mut rng = rng(3);
        for _ in 0..1000 {
            let x = sampler.sample(&mut rng);
            assert!((10.0..20.0).contains(&x), "sample {} out of range", x);
        }
    }

    #[test]
    fn inverse_gamma_positive() {
        let dist = Dist {
            inverse_gamma: Some(InverseGammaParams { alpha: 3.0, beta: 2.0 }),
            ..Default::default()
        };
        let sampler = dist.build().unwrap();
        let mut rng = rng(5);
        for _ in 0..1000 {
            assert!(sampler.sample(&mut rng) > 0.0);
        }
    }

    #[test]
    fn laplace_centers_on_mu() {
        let dist = Dist {
            laplace: Some(LaplaceParams { mu: 100.0, scale: 1.0 }),
            ..Default::default()
        };
        let sampler = dist.build().unwrap();
        let mut rng = rng(13);
        let n = 10_000;
        let mean: f64 = (0..n).map(|_| sampler.sample(&mut rng)).sum::<f64>() / n as f64;
        assert!((mean - 100.0).abs() < 0.5, "mean {} not close to mu 100", mean);
    }

    #[test]
    fn alpha_stable_gaussian_case_is_finite_and_centered() {
        // alpha = 2 is the Gaussian member of the family.
        let dist = Dist {
            alpha_stable: Some(AlphaStableParams { alpha: 2.0, beta: 0.0, c: 1.0, mu: 10.0 }),
            ..Default::default()
        };
        let sampler = dist.build().unwrap();
        let mut rng = rng(17);
        let n = 10_000;
        let samples: Vec<f64> = (0..n).map(|_| sampler.sample(&mut rng)).collect();
        assert!(samples.iter().all(|x| x.is_finite()));
        let mean: f64 = samples.iter().sum::<f64>() / n as f64;
        assert!((mean - 10.0).abs() < 0.5, "mean {} not close to mu 10", mean);
    }

    #[test]
    fn invalid_parameters_rejected() {
        let bad_uniform = Dist {
            uniform: Some(UniformParams { min: 5.0, max: 5.0 }),
            ..Default::default()
        };
        assert!(bad_uniform.build().is_err());

        let bad_gamma = Dist {
            gamma: Some(GammaParams { alpha: 1.0, beta: 0.0 }),
            ..Default::default()
        };
        assert!(bad_gamma.build().is_err());

        let bad_stable = Dist {
            alpha_stable: Some(AlphaStableParams { alpha: 2.5, beta: 0.0, c: 1.0, mu: 0.0 }),
            ..Default::default()
        };
        assert!(bad_stable.build().is_err());
    }

    #[test]
    fn fixed_seed_reproduces_samples() {
        let dist: Dist =
            serde_yaml::from_str("normal:\n  mu: 0.0\n  sigma: 1.0\n").unwrap();
        let sampler = dist.build().unwrap();

        let mut a = rng(99);
        let mut b = rng(99);
        for _ in 0..50 {
            assert_eq!(sampler.sample(&mut a), sampler.sample(&mut b));
        }
    }
}
