//! Pure metric derivation: Halstead formulas, cyclomatic density and the
//! maintainability index. Every function here is total — degenerate inputs
//! (zero operators, zero lines) produce defined values, never NaN.

use crate::core::{HalsteadCounts, HalsteadMetrics};

/// Derive the full Halstead metric set from raw operator/operand counts.
pub fn derive_halstead(operators: HalsteadCounts, operands: HalsteadCounts) -> HalsteadMetrics {
    let length = operators.total + operands.total;
    let vocabulary = operators.distinct + operands.distinct;
    let volume = if vocabulary == 0 {
        0.0
    } else {
        f64::from(length) * f64::from(vocabulary).log2()
    };
    let difficulty = if operands.distinct == 0 {
        0.0
    } else {
        (f64::from(operators.distinct) / 2.0)
            * (f64::from(operands.total) / f64::from(operands.distinct))
    };
    let effort = difficulty * volume;

    HalsteadMetrics {
        operators,
        operands,
        length,
        vocabulary,
        volume,
        difficulty,
        effort,
        bugs: volume / 3000.0,
        time: effort / 18.0,
    }
}

/// Branches per logical line, as a percentage. A scope with no logical
/// lines reports its cyclomatic value unchanged.
pub fn cyclomatic_density(cyclomatic: u32, logical_lines: u32) -> f64 {
    if logical_lines == 0 {
        f64::from(cyclomatic)
    } else {
        f64::from(cyclomatic) / f64::from(logical_lines) * 100.0
    }
}

/// Maintainability index on the 0..=171 scale, from per-function means.
///
/// The comment bonus is applied only when the front end supplied a comment
/// percentage; the engine never guesses one because comments are not AST
/// nodes.
pub fn maintainability_index(
    mean_effort: f64,
    mean_cyclomatic: f64,
    mean_logical_lines: f64,
    comment_percent: Option<f64>,
) -> f64 {
    let mut index = 171.0
        - 3.42 * ln_or_zero(mean_effort)
        - 0.23 * ln_or_zero(mean_cyclomatic)
        - 16.2 * ln_or_zero(mean_logical_lines);

    if let Some(percent) = comment_percent {
        index += 50.0 * (2.4 * percent).sqrt().sin();
    }

    index.clamp(0.0, 171.0)
}

fn ln_or_zero(value: f64) -> f64 {
    if value > 0.0 {
        value.ln()
    } else {
        0.0
    }
}

/// Arithmetic mean, defined as zero for an empty population.
pub fn mean(sum: f64, count: usize) -> f64 {
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(total: u32, distinct: u32) -> HalsteadCounts {
        HalsteadCounts {
            total,
            distinct,
            identifiers: (0..distinct).map(|i| format!("id{i}")).collect(),
        }
    }

    #[test]
    fn halstead_zero_vocabulary_is_all_zero() {
        let h = derive_halstead(counts(0, 0), counts(0, 0));
        assert_eq!(h.length, 0);
        assert_eq!(h.vocabulary, 0);
        assert_eq!(h.volume, 0.0);
        assert_eq!(h.difficulty, 0.0);
        assert_eq!(h.effort, 0.0);
        assert_eq!(h.bugs, 0.0);
        assert_eq!(h.time, 0.0);
    }

    #[test]
    fn halstead_zero_operands_has_zero_difficulty() {
        let h = derive_halstead(counts(3, 2), counts(0, 0));
        assert_eq!(h.difficulty, 0.0);
        assert_eq!(h.effort, 0.0);
        assert!(h.volume > 0.0);
    }

    #[test]
    fn halstead_known_values() {
        // 2 operators / 2 distinct, 3 operands / 3 distinct:
        // N = 5, n = 5, V = 5 * log2(5), D = 1
        let h = derive_halstead(counts(2, 2), counts(3, 3));
        assert_eq!(h.length, 5);
        assert_eq!(h.vocabulary, 5);
        assert!((h.volume - 11.60964047443681).abs() < 1e-12);
        assert_eq!(h.difficulty, 1.0);
        assert!((h.effort - 11.60964047443681).abs() < 1e-12);
    }

    #[test]
    fn density_with_zero_lines_reports_cyclomatic() {
        assert_eq!(cyclomatic_density(3, 0), 3.0);
        assert_eq!(cyclomatic_density(2, 4), 50.0);
    }

    #[test]
    fn maintainability_of_empty_module_is_ceiling() {
        assert_eq!(maintainability_index(0.0, 1.0, 0.0, None), 171.0);
    }

    #[test]
    fn maintainability_known_value() {
        // Mean effort/cyclomatic/lloc of a two-function module with one
        // if/else and one for loop.
        let mi = maintainability_index(374.7133081440434, 2.0, 4.0, None);
        assert!((mi - 128.11513611920358).abs() < 1e-9);
    }

    #[test]
    fn comment_bonus_raises_the_index() {
        let bare = maintainability_index(100.0, 2.0, 5.0, None);
        let commented = maintainability_index(100.0, 2.0, 5.0, Some(30.0));
        assert!(commented > bare);
    }

    #[test]
    fn mean_of_empty_population_is_zero() {
        assert_eq!(mean(0.0, 0), 0.0);
        assert_eq!(mean(9.0, 3), 3.0);
    }
}
