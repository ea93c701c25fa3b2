//! Coefficient sets and their flat list encoding.
//!
//! A [`CoefficientSet`] is the direct-form transfer function shared by the
//! synthesizer and the filter engine:
//!
//! ```text
//! y[n] = a0*x[n] + a1*x[n-1] + ... + aN*x[n-N]
//!                + b1*y[n-1] + ... + bN*y[n-N]
//! ```
//!
//! Note the feedback terms are *added*; the synthesizer already folds the
//! sign into `b`.
//!
//! Between components the set travels as a flat list of numbers. `a0` is
//! always first, followed by the pole pairs in one of two layouts:
//!
//! | Order | Layout |
//! |-------|--------|
//! | [`CoefficientOrder::Alternating`] | `a0, a1, b1, a2, b2, ..., aN, bN` |
//! | [`CoefficientOrder::Grouped`] | `a0, a1, ..., aN, b1, ..., bN` |

use alloc::format;
use alloc::vec;
use alloc::vec::Vec;
use core::fmt;
use core::str::FromStr;

use crate::error::CoefficientError;

/// Serialization layout of the pole pairs in a coefficient list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum CoefficientOrder {
    /// `a0, a1, b1, a2, b2, ...` (historically "aabab").
    #[default]
    Alternating,
    /// `a0, a1..aN, b1..bN` (historically "aaabb").
    Grouped,
}

impl CoefficientOrder {
    /// Canonical lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Alternating => "alternating",
            Self::Grouped => "grouped",
        }
    }
}

impl fmt::Display for CoefficientOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string names no known [`CoefficientOrder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOrderError;

impl fmt::Display for ParseOrderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("expected one of: alternating, aabab, grouped, aaabb")
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ParseOrderError {}

impl FromStr for CoefficientOrder {
    type Err = ParseOrderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "alternating" | "aabab" | "abab" => Ok(Self::Alternating),
            "grouped" | "aaabb" | "aabb" => Ok(Self::Grouped),
            _ => Err(ParseOrderError),
        }
    }
}

/// Feedforward (`a`) and feedback (`b`) coefficients of a direct-form IIR filter.
///
/// Invariants: `a.len() == b.len() == poles + 1` and `b[0] == 0.0`.
#[derive(Debug, Clone, PartialEq)]
pub struct CoefficientSet {
    a: Vec<f64>,
    b: Vec<f64>,
}

impl CoefficientSet {
    /// A zero-pole set with unity gain (`y = x`).
    pub fn passthrough() -> Self {
        Self {
            a: vec![1.0],
            b: vec![0.0],
        }
    }

    /// Builds a set from raw vectors that already satisfy the invariants.
    pub(crate) fn from_raw(a: Vec<f64>, b: Vec<f64>) -> Self {
        debug_assert_eq!(a.len(), b.len());
        debug_assert!(!a.is_empty());
        Self { a, b }
    }

    /// Decodes a flat coefficient list.
    ///
    /// `values[0]` is always `a0`; the remaining values are split into
    /// `values.len() / 2` pole pairs according to `order`. The update is
    /// all-or-nothing: any non-finite member, an empty list, or an even
    /// length (one coefficient left without a partner) rejects the list.
    pub fn from_list(values: &[f64], order: CoefficientOrder) -> Result<Self, CoefficientError> {
        if values.is_empty() {
            return Err(CoefficientError::Empty);
        }
        if let Some(index) = values.iter().position(|v| !v.is_finite()) {
            return Err(CoefficientError::NonFinite { index });
        }
        if values.len() % 2 == 0 {
            return Err(CoefficientError::UnpairedCoefficient { len: values.len() });
        }

        let poles = values.len() / 2;
        let mut a = vec![0.0; poles + 1];
        let mut b = vec![0.0; poles + 1];
        a[0] = values[0];

        for p in 1..=poles {
            let (ai, bi) = match order {
                CoefficientOrder::Alternating => (2 * p - 1, 2 * p),
                CoefficientOrder::Grouped => (p, poles + p),
            };
            a[p] = values[ai];
            b[p] = values[bi];
        }

        Ok(Self { a, b })
    }

    /// Encodes the set as a flat list of `2 * poles + 1` values.
    pub fn to_list(&self, order: CoefficientOrder) -> Vec<f64> {
        let poles = self.poles();
        let mut list = vec![0.0; 2 * poles + 1];
        list[0] = self.a[0];

        for p in 1..=poles {
            match order {
                CoefficientOrder::Alternating => {
                    list[2 * p - 1] = self.a[p];
                    list[2 * p] = self.b[p];
                }
                CoefficientOrder::Grouped => {
                    list[p] = self.a[p];
                    list[poles + p] = self.b[p];
                }
            }
        }

        list
    }

    /// Keeps only the first `max_poles` pole pairs.
    pub fn truncated(mut self, max_poles: usize) -> Self {
        self.a.truncate(max_poles + 1);
        self.b.truncate(max_poles + 1);
        self
    }

    /// Filter order.
    #[inline]
    pub fn poles(&self) -> usize {
        self.a.len() - 1
    }

    /// Direct gain term.
    #[inline]
    pub fn a0(&self) -> f64 {
        self.a[0]
    }

    /// Feedforward coefficients, `a[0]` is the direct term.
    #[inline]
    pub fn a(&self) -> &[f64] {
        &self.a
    }

    /// Feedback coefficients, `b[0]` is always zero.
    #[inline]
    pub fn b(&self) -> &[f64] {
        &self.b
    }

    /// Gain at DC: `sum(a) / (1 - sum(b))`.
    pub fn dc_gain(&self) -> f64 {
        let sa: f64 = self.a.iter().sum();
        let sb: f64 = self.b.iter().sum();
        sa / (1.0 - sb)
    }

    /// Gain at Nyquist, the same ratio with alternating signs.
    pub fn nyquist_gain(&self) -> f64 {
        let (sa, sb) = alternating_sums(&self.a, &self.b);
        sa / (1.0 - sb)
    }
}

impl Default for CoefficientSet {
    fn default() -> Self {
        Self::passthrough()
    }
}

/// `(sum a[i]*(-1)^i, sum b[i]*(-1)^i)`.
pub(crate) fn alternating_sums(a: &[f64], b: &[f64]) -> (f64, f64) {
    a.iter()
        .zip(b)
        .enumerate()
        .fold((0.0, 0.0), |(sa, sb), (i, (&ai, &bi))| {
            if i % 2 == 0 {
                (sa + ai, sb + bi)
            } else {
                (sa - ai, sb - bi)
            }
        })
}

/// Diagnostic layout:
///
/// ```text
/// a[00] =  1.234567890123457e-02
/// a[01] =  2.469135780246914e-02   b[01] =  1.454243586251585e+00
/// ```
impl fmt::Display for CoefficientSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "a[00] = {}", Sci(self.a[0]))?;
        for p in 1..=self.poles() {
            write!(
                f,
                "\na[{p:02}] = {}   b[{p:02}] = {}",
                Sci(self.a[p]),
                Sci(self.b[p])
            )?;
        }
        Ok(())
    }
}

/// Scientific notation with a blank sign slot and a two-digit signed exponent.
pub(crate) struct Sci(pub f64);

impl fmt::Display for Sci {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let v = self.0;
        if !v.is_finite() {
            return write!(f, " {v}");
        }
        let sign = if v.is_sign_negative() && v != 0.0 { '-' } else { ' ' };
        let text = format!("{:.15e}", v.abs());
        let (mantissa, exponent) = text.split_once('e').unwrap_or((text.as_str(), "0"));
        let exp: i32 = exponent.parse().unwrap_or(0);
        let exp_sign = if exp < 0 { '-' } else { '+' };
        write!(f, "{sign}{mantissa}e{exp_sign}{:02}", exp.abs())
    }
}

/// Parses a whitespace- and/or comma-separated list of numbers.
///
/// The first token that is not a number rejects the whole list.
///
/// ```rust
/// use cheby_core::parse_coefficient_list;
///
/// let values = parse_coefficient_list("0.25, 0.5 0.1,0.25").unwrap();
/// assert_eq!(values, vec![0.25, 0.5, 0.1, 0.25]);
/// assert!(parse_coefficient_list("0.25 high 0.1").is_err());
/// ```
pub fn parse_coefficient_list(text: &str) -> Result<Vec<f64>, CoefficientError> {
    text.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|token| !token.is_empty())
        .enumerate()
        .map(|(index, token)| {
            token
                .parse::<f64>()
                .map_err(|_| CoefficientError::NonNumeric { index })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    fn two_pole() -> CoefficientSet {
        CoefficientSet::from_raw(vec![0.1, 0.2, 0.3], vec![0.0, 0.4, -0.5])
    }

    #[test]
    fn alternating_layout() {
        let list = two_pole().to_list(CoefficientOrder::Alternating);
        assert_eq!(list, vec![0.1, 0.2, 0.4, 0.3, -0.5]);
    }

    #[test]
    fn grouped_layout() {
        let list = two_pole().to_list(CoefficientOrder::Grouped);
        assert_eq!(list, vec![0.1, 0.2, 0.3, 0.4, -0.5]);
    }

    #[test]
    fn from_list_reads_each_layout() {
        let alt = [0.1, 0.2, 0.4, 0.3, -0.5];
        let grp = [0.1, 0.2, 0.3, 0.4, -0.5];
        let alt = CoefficientSet::from_list(&alt, CoefficientOrder::Alternating).unwrap();
        let grp = CoefficientSet::from_list(&grp, CoefficientOrder::Grouped).unwrap();
        assert_eq!(alt, two_pole());
        assert_eq!(grp, two_pole());
    }

    #[test]
    fn a0_consumes_the_first_slot() {
        // 5 values -> a0 + 2 pairs, never 2 pairs + a dangling value.
        let values = [1.0, 2.0, 3.0, 4.0, 5.0];
        let set = CoefficientSet::from_list(&values, CoefficientOrder::Alternating).unwrap();
        assert_eq!(set.poles(), 2);
        assert_eq!(set.a0(), 1.0);
        assert_eq!(set.b()[0], 0.0);

        let single = CoefficientSet::from_list(&[0.5], CoefficientOrder::Grouped).unwrap();
        assert_eq!(single.poles(), 0);
        assert_eq!(single.a(), &[0.5]);
    }

    #[test]
    fn even_length_is_rejected() {
        assert_eq!(
            CoefficientSet::from_list(&[1.0, 2.0, 3.0, 4.0], CoefficientOrder::Alternating),
            Err(CoefficientError::UnpairedCoefficient { len: 4 })
        );
    }

    #[test]
    fn empty_and_non_finite_are_rejected() {
        assert_eq!(
            CoefficientSet::from_list(&[], CoefficientOrder::Alternating),
            Err(CoefficientError::Empty)
        );
        assert_eq!(
            CoefficientSet::from_list(&[1.0, f64::NAN, 0.0], CoefficientOrder::Alternating),
            Err(CoefficientError::NonFinite { index: 1 })
        );
    }

    #[test]
    fn truncation_keeps_leading_pairs() {
        let set = two_pole().truncated(1);
        assert_eq!(set.a(), &[0.1, 0.2]);
        assert_eq!(set.b(), &[0.0, 0.4]);
    }

    #[test]
    fn parse_list_separators() {
        assert_eq!(
            parse_coefficient_list(" 1,2\t3\n-4.5e-1 ").unwrap(),
            vec![1.0, 2.0, 3.0, -0.45]
        );
        assert_eq!(parse_coefficient_list("").unwrap(), Vec::<f64>::new());
        assert_eq!(
            parse_coefficient_list("1 2 x 3"),
            Err(CoefficientError::NonNumeric { index: 2 })
        );
    }

    #[test]
    fn order_from_str_accepts_legacy_names() {
        assert_eq!("aabab".parse::<CoefficientOrder>(), Ok(CoefficientOrder::Alternating));
        assert_eq!("AAABB".parse::<CoefficientOrder>(), Ok(CoefficientOrder::Grouped));
        assert_eq!("grouped".parse::<CoefficientOrder>(), Ok(CoefficientOrder::Grouped));
        assert_eq!("ab".parse::<CoefficientOrder>(), Err(ParseOrderError));
    }

    #[test]
    fn sci_format_matches_printf_style() {
        assert_eq!(Sci(0.0123).to_string(), " 1.230000000000000e-02");
        assert_eq!(Sci(-250.0).to_string(), "-2.500000000000000e+02");
        assert_eq!(Sci(1.0).to_string(), " 1.000000000000000e+00");
    }

    #[test]
    fn diagnostic_layout() {
        let text = two_pole().to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "a[00] =  1.000000000000000e-01");
        assert!(lines[1].starts_with("a[01] =  2.000000000000000e-01   b[01] =  4.0"));
        assert!(lines[2].contains("b[02] = -5.000000000000000e-01"));
    }

    #[test]
    fn gains() {
        let set = two_pole();
        // sum a = 0.6, sum b = -0.1
        assert!((set.dc_gain() - 0.6 / 1.1).abs() < 1e-12);
        // alt a = 0.1 - 0.2 + 0.3 = 0.2, alt b = 0 - 0.4 - 0.5 = -0.9
        assert!((set.nyquist_gain() - 0.2 / 1.9).abs() < 1e-12);
    }
}
