//! Typed validation of captured raw text.

use std::fmt::Debug;
use std::str::FromStr;

use kitbag_core::bug;

/// Converts a captured raw string into a typed value.
///
/// Validators are cheap stateless values. They must be default-constructible
/// so callers can fetch a value without spelling out the validator's
/// configuration.
pub trait Validator: Default {
    type Output;

    /// `None` when the raw text does not parse or violates the configured
    /// rules.
    fn validate(&self, raw: &str) -> Option<Self::Output>;
}

/// Integer validator with optional inclusive bounds.
#[derive(Debug, Clone, Copy)]
pub struct IntValidator<T> {
    bounds: Option<(T, T)>,
}

impl<T: PartialOrd + Debug> IntValidator<T> {
    pub fn new() -> Self {
        Self { bounds: None }
    }

    /// Restricts accepted values to `[min, max]`; inverted bounds are a
    /// caller bug.
    pub fn bounded(min: T, max: T) -> Self {
        if min > max {
            bug!("validator bounds are inverted: [{min:?}, {max:?}]");
        }
        Self {
            bounds: Some((min, max)),
        }
    }
}

impl<T> Default for IntValidator<T> {
    fn default() -> Self {
        Self { bounds: None }
    }
}

impl<T: FromStr + PartialOrd + Copy> Validator for IntValidator<T> {
    type Output = T;

    fn validate(&self, raw: &str) -> Option<T> {
        let value = raw.parse::<T>().ok()?;
        if let Some((min, max)) = self.bounds {
            if value < min || value > max {
                return None;
            }
        }
        Some(value)
    }
}

/// Floating-point validator accepting only finite values, with optional
/// inclusive bounds.
#[derive(Debug, Clone, Copy)]
pub struct FloatValidator<T> {
    bounds: Option<(T, T)>,
}

impl<T> Default for FloatValidator<T> {
    fn default() -> Self {
        Self { bounds: None }
    }
}

macro_rules! impl_float_validator {
    ($($ty:ty),*) => {$(
        impl FloatValidator<$ty> {
            pub fn new() -> Self {
                Self { bounds: None }
            }

            /// Restricts accepted values to `[min, max]`. Non-finite or
            /// inverted bounds are caller bugs.
            pub fn bounded(min: $ty, max: $ty) -> Self {
                if !min.is_finite() || !max.is_finite() {
                    bug!("float validator bounds must be finite, got [{min}, {max}]");
                }
                if min > max {
                    bug!("validator bounds are inverted: [{min}, {max}]");
                }
                Self { bounds: Some((min, max)) }
            }
        }

        impl Validator for FloatValidator<$ty> {
            type Output = $ty;

            fn validate(&self, raw: &str) -> Option<$ty> {
                let value = raw.parse::<$ty>().ok()?;
                if !value.is_finite() {
                    return None;
                }
                if let Some((min, max)) = self.bounds {
                    if value < min || value > max {
                        return None;
                    }
                }
                Some(value)
            }
        }
    )*};
}

impl_float_validator!(f32, f64);

/// Accepts exactly `true` and `false`, case-insensitively.
#[derive(Debug, Clone, Copy, Default)]
pub struct BoolValidator;

impl Validator for BoolValidator {
    type Output = bool;

    fn validate(&self, raw: &str) -> Option<bool> {
        if raw.eq_ignore_ascii_case("true") {
            Some(true)
        } else if raw.eq_ignore_ascii_case("false") {
            Some(false)
        } else {
            None
        }
    }
}

/// Identity validator copying the raw text.
#[derive(Debug, Clone, Copy, Default)]
pub struct StringValidator;

impl Validator for StringValidator {
    type Output = String;

    fn validate(&self, raw: &str) -> Option<String> {
        Some(raw.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn int_validator_parses_and_bounds() {
        let open = IntValidator::<i32>::default();
        assert_eq!(open.validate("114514"), Some(114514));
        assert_eq!(open.validate("-3"), Some(-3));
        assert_eq!(open.validate("nope"), None);
        assert_eq!(open.validate("1.5"), None);

        let bounded = IntValidator::bounded(0i32, 10);
        assert_eq!(bounded.validate("10"), Some(10));
        assert_eq!(bounded.validate("11"), None);
        assert_eq!(bounded.validate("-1"), None);
    }

    #[test]
    fn float_validator_rejects_non_finite() {
        let open = FloatValidator::<f32>::default();
        assert_eq!(open.validate("114.0"), Some(114.0));
        assert_eq!(open.validate("inf"), None);
        assert_eq!(open.validate("NaN"), None);

        let bounded = FloatValidator::<f32>::bounded(-1.0, 1.0);
        assert_eq!(bounded.validate("0.5"), Some(0.5));
        assert_eq!(bounded.validate("114.0"), None);
    }

    #[test]
    fn bool_validator_is_case_insensitive_and_strict() {
        let validator = BoolValidator;
        assert_eq!(validator.validate("true"), Some(true));
        assert_eq!(validator.validate("FALSE"), Some(false));
        assert_eq!(validator.validate("1"), None);
        assert_eq!(validator.validate("yes"), None);
    }

    #[test]
    fn string_validator_copies_verbatim() {
        assert_eq!(StringValidator.validate("  as is "), Some("  as is ".to_owned()));
    }
}
