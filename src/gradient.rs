//! Gradient functions.
//!
//! A gradient maps a normalized line position in `[0, 1]` to a progress value
//! in `[0, 1]`. It shapes how fast blend weight falls off across a block.

use std::fmt;

use crate::error::{BlendError, Result};

/// Input clamp margin. Keeps `0 ^ negative` and friends out of evaluation.
pub const EPSILON: f64 = 1e-5;

/// A gradient function selected by the project config.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Gradient {
    /// `f(x) = x`, the default.
    #[default]
    LinearUnity,
    /// `f(x) = sum(coef_i * x ^ exp_i)`.
    Polynomial(Polynomial),
}

impl Gradient {
    /// Build the custom polynomial gradient from config term lists.
    ///
    /// Empty lists gain a single zero term and the shorter list is padded
    /// with zeros so both have equal length.
    pub fn custom(coefficients: &[f64], exponents: &[f64]) -> Result<Self> {
        let (coefs, exps) = pad_terms(coefficients, exponents);
        Ok(Gradient::Polynomial(Polynomial::new(coefs, exps)?))
    }

    /// Evaluate the gradient at `x`. The result is always in `[0, 1]`.
    pub fn eval(&self, x: f64) -> f64 {
        let x = clamp_input(x);
        let y = match self {
            Gradient::LinearUnity => x,
            Gradient::Polynomial(poly) => poly.eval_raw(x),
        };
        // Opposing overflowing terms (inf - inf) have no meaningful value.
        if y.is_nan() {
            return 0.0;
        }
        y.clamp(0.0, 1.0)
    }

    /// Short label used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Gradient::LinearUnity => "default",
            Gradient::Polynomial(_) => "custom",
        }
    }
}

impl fmt::Display for Gradient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gradient::LinearUnity => write!(f, "f(x) = x"),
            Gradient::Polynomial(poly) => poly.fmt(f),
        }
    }
}

/// Single variable polynomial with arbitrary real exponents.
#[derive(Debug, Clone, PartialEq)]
pub struct Polynomial {
    coefficients: Vec<f64>,
    exponents: Vec<f64>,
}

impl Polynomial {
    /// Create a polynomial from matching term lists.
    pub fn new(coefficients: Vec<f64>, exponents: Vec<f64>) -> Result<Self> {
        if coefficients.is_empty() {
            return Err(BlendError::Gradient {
                message: "coefficients need to be non-empty".to_string(),
            });
        }
        if exponents.is_empty() {
            return Err(BlendError::Gradient {
                message: "exponents need to be non-empty".to_string(),
            });
        }
        if coefficients.len() != exponents.len() {
            return Err(BlendError::Gradient {
                message: format!(
                    "coefficients and exponents need the same length (coefficients: {}, exponents: {})",
                    coefficients.len(),
                    exponents.len()
                ),
            });
        }

        Ok(Self {
            coefficients,
            exponents,
        })
    }

    pub fn term_count(&self) -> usize {
        self.coefficients.len()
    }

    /// Zero-coefficient terms contribute nothing, even where `x ^ exp`
    /// overflows.
    fn eval_raw(&self, x: f64) -> f64 {
        self.coefficients
            .iter()
            .zip(&self.exponents)
            .filter(|(coef, _)| **coef != 0.0)
            .map(|(coef, exp)| coef * x.powf(*exp))
            .sum()
    }
}

impl fmt::Display for Polynomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "f(x) =")?;
        let last = self.term_count() - 1;
        for (i, (coef, exp)) in self.coefficients.iter().zip(&self.exponents).enumerate() {
            let sep = if i == last { "" } else { " +" };
            write!(f, "\n  {:?} * (x ^ {:?}){}", coef, exp, sep)?;
        }
        Ok(())
    }
}

/// Pad coefficient and exponent lists to equal, non-zero length.
pub fn pad_terms(coefficients: &[f64], exponents: &[f64]) -> (Vec<f64>, Vec<f64>) {
    let mut coefs = coefficients.to_vec();
    let mut exps = exponents.to_vec();

    if coefs.is_empty() {
        coefs.push(0.0);
    }
    if exps.is_empty() {
        exps.push(0.0);
    }

    let len = coefs.len().max(exps.len());
    coefs.resize(len, 0.0);
    exps.resize(len, 0.0);

    (coefs, exps)
}

fn clamp_input(x: f64) -> f64 {
    if x.is_nan() {
        return EPSILON;
    }
    x.clamp(EPSILON, 1.0 - EPSILON)
}
