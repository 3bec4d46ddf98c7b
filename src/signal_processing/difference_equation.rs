use crate::codec::Sample;
use crate::error::{FiltfiltError, Result};

use super::history::HistoryRing;

/// Coefficients of a linear difference equation
///
/// ```text
/// a[0] y[t] = b[0] x[t] + b[1] x[t-1] + ... - a[1] y[t-1] - a[2] y[t-2] - ...
/// ```
///
/// `a` is the denominator (AR, feedback) and `b` the numerator (FIR,
/// feed-forward). Both are validated on construction and immutable afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Coefficients {
    a: Vec<f64>,
    b: Vec<f64>,
}

impl Coefficients {
    /// Create a validated coefficient set
    ///
    /// # Errors
    /// - `Config` if `a` is empty
    /// - `NoFirCoefficients` if `b` is empty
    /// - `NonFiniteCoefficient` if any value is NaN or infinite
    /// - `ZeroLeadingDenominator` if `a[0] == 0`
    pub fn new(a: Vec<f64>, b: Vec<f64>) -> Result<Self> {
        if a.is_empty() {
            return Err(FiltfiltError::Config(
                "denominator must contain at least a[0]".to_string(),
            ));
        }
        if b.is_empty() {
            return Err(FiltfiltError::NoFirCoefficients);
        }
        check_finite("a", &a)?;
        check_finite("b", &b)?;
        if a[0] == 0.0 {
            return Err(FiltfiltError::ZeroLeadingDenominator);
        }
        Ok(Self { a, b })
    }

    /// Pure FIR filter (`a = [1.0]`)
    pub fn fir(b: Vec<f64>) -> Result<Self> {
        Self::new(vec![1.0], b)
    }

    pub fn a(&self) -> &[f64] {
        &self.a
    }

    pub fn b(&self) -> &[f64] {
        &self.b
    }

    /// AR order `na` (length of `a`, including `a[0]`)
    pub fn na(&self) -> usize {
        self.a.len()
    }

    /// FIR order `nb`
    pub fn nb(&self) -> usize {
        self.b.len()
    }

    /// Feed one input sample through a channel's history and return the output
    ///
    /// The output is narrowed to the sample type before it is stored, so the
    /// feedback path sees exactly what gets written.
    pub fn step<T: Sample>(&self, history: &mut ChannelHistory<T>, x: T) -> T {
        history.input.push(x);

        let feed_forward: f64 = self
            .b
            .iter()
            .zip(history.input.recent())
            .map(|(b, x)| b * x.to_f64())
            .sum();
        let feedback: f64 = self.a[1..]
            .iter()
            .zip(history.output.recent())
            .map(|(a, y)| a * y.to_f64())
            .sum();

        let y = T::from_f64((feed_forward - feedback) / self.a[0]);
        history.output.push(y);
        y
    }
}

fn check_finite(name: &'static str, values: &[f64]) -> Result<()> {
    match values.iter().position(|v| !v.is_finite()) {
        Some(index) => Err(FiltfiltError::NonFiniteCoefficient {
            name,
            index,
            value: values[index],
        }),
        None => Ok(()),
    }
}

/// Per-channel recursion state: last `nb` inputs and last `na` outputs
pub struct ChannelHistory<T> {
    input: HistoryRing<T>,
    output: HistoryRing<T>,
}

impl<T: Sample> ChannelHistory<T> {
    pub fn new(coefficients: &Coefficients) -> Self {
        Self {
            input: HistoryRing::new(coefficients.nb()),
            output: HistoryRing::new(coefficients.na()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn run(coefficients: &Coefficients, input: &[f64]) -> Vec<f64> {
        let mut history = ChannelHistory::new(coefficients);
        input
            .iter()
            .map(|&x| coefficients.step(&mut history, x))
            .collect()
    }

    #[test]
    fn test_moving_average() {
        let c = Coefficients::fir(vec![0.5, 0.5]).unwrap();
        assert_eq!(run(&c, &[1.0, 2.0, 3.0, 4.0]), vec![0.5, 1.5, 2.5, 3.5]);
    }

    #[test]
    fn test_first_order_feedback() {
        // y[t] = x[t] + 0.5 y[t-1]
        let c = Coefficients::new(vec![1.0, -0.5], vec![1.0]).unwrap();
        let out = run(&c, &[1.0, 0.0, 0.0, 0.0]);
        for (y, expected) in out.iter().zip([1.0, 0.5, 0.25, 0.125]) {
            assert_abs_diff_eq!(*y, expected, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_leading_denominator_scales_output() {
        let c = Coefficients::new(vec![2.0], vec![1.0]).unwrap();
        assert_eq!(run(&c, &[4.0, -2.0]), vec![2.0, -1.0]);
    }

    #[test]
    fn test_second_order_matches_direct_recurrence() {
        let a = vec![1.0, -0.6, 0.2];
        let b = vec![0.3, 0.2, 0.1];
        let c = Coefficients::new(a.clone(), b.clone()).unwrap();
        let input = [1.0, -1.0, 0.5, 2.0, 0.0, 0.0, 3.0];

        let out = run(&c, &input);

        let at = |v: &[f64], i: isize| if i < 0 { 0.0 } else { v[i as usize] };
        let mut expected: Vec<f64> = Vec::new();
        for t in 0..input.len() as isize {
            let mut y = 0.0;
            for (r, br) in b.iter().enumerate() {
                y += br * at(&input, t - r as isize);
            }
            for (r, ar) in a.iter().enumerate().skip(1) {
                y -= ar * at(&expected, t - r as isize);
            }
            expected.push(y / a[0]);
        }

        for (y, e) in out.iter().zip(&expected) {
            assert_abs_diff_eq!(*y, *e, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_pure_fir_ignores_previous_outputs() {
        let c = Coefficients::fir(vec![1.0, 1.0]).unwrap();
        let mut history = ChannelHistory::new(&c);
        assert_eq!(c.step(&mut history, 100.0f64), 100.0);
        // Only the input history matters: 0 + 100
        assert_eq!(c.step(&mut history, 0.0), 100.0);
        assert_eq!(c.step(&mut history, 0.0), 0.0);
    }

    #[test]
    fn test_narrow_feedback_uses_stored_width() {
        let c = Coefficients::new(vec![1.0, -1.0], vec![0.1]).unwrap();
        let mut history = ChannelHistory::new(&c);
        let mut y = 0.0f32;
        for _ in 0..3 {
            y = c.step(&mut history, 1.0f32);
        }
        let mut expected = 0.0f32;
        for _ in 0..3 {
            expected = (0.1f64 + expected as f64) as f32;
        }
        assert_eq!(y, expected);
    }

    #[test]
    fn test_rejects_invalid_coefficients() {
        assert!(matches!(
            Coefficients::new(vec![0.0], vec![1.0]),
            Err(FiltfiltError::ZeroLeadingDenominator)
        ));
        assert!(matches!(
            Coefficients::new(vec![1.0], vec![]),
            Err(FiltfiltError::NoFirCoefficients)
        ));
        assert!(matches!(
            Coefficients::new(vec![], vec![1.0]),
            Err(FiltfiltError::Config(_))
        ));
        assert!(matches!(
            Coefficients::new(vec![1.0, f64::NAN], vec![1.0]),
            Err(FiltfiltError::NonFiniteCoefficient { name: "a", index: 1, .. })
        ));
    }
}
