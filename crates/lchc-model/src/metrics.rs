//! Evaluation metrics for the held-out validation split.

use crate::error::{ModelError, Result};

/// Fraction of predictions matching the true class.
pub fn accuracy_score(y_true: &[usize], y_pred: &[usize]) -> Result<f64> {
    check_lengths(y_true.len(), y_pred.len())?;
    let hits = y_true.iter().zip(y_pred).filter(|(t, p)| t == p).count();
    Ok(hits as f64 / y_true.len() as f64)
}

/// Mean absolute error.
pub fn mean_absolute_error(y_true: &[f64], y_pred: &[f64]) -> Result<f64> {
    check_lengths(y_true.len(), y_pred.len())?;
    let sum: f64 = y_true.iter().zip(y_pred).map(|(t, p)| (t - p).abs()).sum();
    Ok(sum / y_true.len() as f64)
}

/// Root mean squared error.
pub fn root_mean_squared_error(y_true: &[f64], y_pred: &[f64]) -> Result<f64> {
    check_lengths(y_true.len(), y_pred.len())?;
    let sum: f64 = y_true
        .iter()
        .zip(y_pred)
        .map(|(t, p)| (t - p).powi(2))
        .sum();
    Ok((sum / y_true.len() as f64).sqrt())
}

/// Coefficient of determination.
///
/// Defined as `1 - SS_res / SS_tot`; a constant target makes the score
/// degenerate, in which case 0 is returned.
pub fn r2_score(y_true: &[f64], y_pred: &[f64]) -> Result<f64> {
    check_lengths(y_true.len(), y_pred.len())?;
    let mean = y_true.iter().sum::<f64>() / y_true.len() as f64;
    let ss_tot: f64 = y_true.iter().map(|t| (t - mean).powi(2)).sum();
    let ss_res: f64 = y_true
        .iter()
        .zip(y_pred)
        .map(|(t, p)| (t - p).powi(2))
        .sum();
    if ss_tot == 0.0 {
        return Ok(0.0);
    }
    Ok(1.0 - ss_res / ss_tot)
}

fn check_lengths(truth: usize, preds: usize) -> Result<()> {
    if truth == 0 {
        return Err(ModelError::EmptyInput);
    }
    if truth != preds {
        return Err(ModelError::LengthMismatch {
            rows: truth,
            targets: preds,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accuracy() {
        let acc = accuracy_score(&[0, 1, 1, 0], &[0, 1, 0, 0]).unwrap();
        assert!((acc - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_mae_and_rmse() {
        let y_true = [1.0, 2.0, 3.0];
        let y_pred = [1.0, 3.0, 5.0];
        assert!((mean_absolute_error(&y_true, &y_pred).unwrap() - 1.0).abs() < 1e-12);
        let rmse = root_mean_squared_error(&y_true, &y_pred).unwrap();
        assert!((rmse - (5.0f64 / 3.0).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_r2_perfect_and_mean() {
        let y_true = [1.0, 2.0, 3.0];
        assert!((r2_score(&y_true, &y_true).unwrap() - 1.0).abs() < 1e-12);
        // Predicting the mean scores exactly zero.
        let mean = [2.0, 2.0, 2.0];
        assert!(r2_score(&y_true, &mean).unwrap().abs() < 1e-12);
    }

    #[test]
    fn test_r2_constant_target_is_zero() {
        assert_eq!(r2_score(&[5.0, 5.0], &[5.0, 4.0]).unwrap(), 0.0);
    }

    #[test]
    fn test_empty_rejected() {
        assert!(matches!(
            accuracy_score(&[], &[]),
            Err(ModelError::EmptyInput)
        ));
    }
}
