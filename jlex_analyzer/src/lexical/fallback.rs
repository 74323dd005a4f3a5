//! Kind assignment for lexemes the table does not know

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FallbackKind {
    IntVal,
    DoubleVal,
    Var,
}

impl FallbackKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FallbackKind::IntVal => "intVal",
            FallbackKind::DoubleVal => "doubleVal",
            FallbackKind::Var => "var",
        }
    }
}

/// Integer first, then float, then identifier.
///
/// Integers follow `i64` parsing (optional sign, decimal digits only);
/// out-of-range integers therefore land in `doubleVal`. Floats that overflow
/// to infinity, such as `1e400`, are still `doubleVal`. The spelled-out
/// forms `inf`, `infinity` and `NaN` are identifiers.
pub fn classify_unmatched(text: &str) -> FallbackKind {
    if text.parse::<i64>().is_ok() {
        return FallbackKind::IntVal;
    }

    if is_float_spelling(text) && text.parse::<f64>().is_ok() {
        FallbackKind::DoubleVal
    } else {
        FallbackKind::Var
    }
}

/// The only letters a numeric float literal may contain are exponent markers
fn is_float_spelling(text: &str) -> bool {
    text.chars()
        .all(|c| !c.is_ascii_alphabetic() || c == 'e' || c == 'E')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integers() {
        for text in ["0", "3", "42", "-7", "+12", "007"] {
            assert_eq!(classify_unmatched(text), FallbackKind::IntVal, "{text}");
        }
    }

    #[test]
    fn test_doubles() {
        for text in [
            "3.14",
            "1e10",
            "2.5E-3",
            ".5",
            "5.",
            "-0.0",
            "99999999999999999999",
            "1e400",
            "-1E999",
        ] {
            assert_eq!(classify_unmatched(text), FallbackKind::DoubleVal, "{text}");
        }
    }

    #[test]
    fn test_identifiers() {
        for text in ["x", "x1", "count_2", "5L", "3.14f", "0x1F", "1_000", "inf", "-infinity", "NaN", "e", "//"] {
            assert_eq!(classify_unmatched(text), FallbackKind::Var, "{text}");
        }
    }

    #[test]
    fn test_labels() {
        assert_eq!(FallbackKind::IntVal.as_str(), "intVal");
        assert_eq!(FallbackKind::DoubleVal.as_str(), "doubleVal");
        assert_eq!(FallbackKind::Var.as_str(), "var");
    }
}
