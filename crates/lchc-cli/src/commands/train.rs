//! Train Command Implementation
//!
//! Runs the full offline pipeline: load and clean the project CSV, join
//! the curated materials table, fit the preprocessing and both models,
//! report held-out metrics, and write the model bundle.

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;
use tracing::info;

use lchc_artifacts::{BundleManifest, BundleWriter, ModelBundle, ValidationMetrics};
use lchc_data::{
    hstack_features, take, take_rows, train_test_split, Dataset, DesignMatrix, MaterialsRef,
};
use lchc_model::{
    accuracy_score, mean_absolute_error, r2_score, root_mean_squared_error, CostRegressor,
    ForestConfig, GradientBoostingConfig, GradientBoostingRegressor, MinMaxScaler, OneHotEncoder,
    RandomForestClassifier, RandomForestRegressor, VotingRegressor,
};

/// Train models from CSV data and write a bundle
///
/// # Example
///
/// ```bash
/// lchc train \
///     --data data.csv \
///     --materials materials_curated.csv \
///     --model-dir lchc_models
/// ```
#[derive(Args, Debug, Clone)]
pub struct TrainCommand {
    /// Path to the project dataset CSV
    #[arg(long, env = "LCHC_DATA_PATH")]
    pub data: PathBuf,

    /// Path to the curated materials CSV
    #[arg(long, env = "LCHC_MATERIALS_PATH")]
    pub materials: PathBuf,

    /// Directory to write the model bundle into
    #[arg(long, short = 'd', default_value = "lchc_models", env = "LCHC_MODEL_DIR")]
    pub model_dir: PathBuf,

    /// Fraction of rows held out for validation
    #[arg(long, default_value = "0.2")]
    pub test_ratio: f64,

    /// Seed for the split and the tree ensembles
    #[arg(long, default_value = "42")]
    pub seed: u64,
}

impl TrainCommand {
    /// Run the training pipeline.
    pub async fn run(&self) -> Result<()> {
        info!(
            data = %self.data.display(),
            materials = %self.materials.display(),
            "Starting training"
        );

        let dataset = Dataset::from_csv(&self.data).context("loading project dataset")?;
        let materials =
            MaterialsRef::from_csv(&self.materials).context("loading materials reference")?;
        let matrix =
            DesignMatrix::build(&dataset, &materials).context("assembling design matrix")?;

        // Preprocessing is fit on the full dataset so inference sees the
        // same feature ranges and category sets regardless of the split.
        let scaler = MinMaxScaler::fit(matrix.x_num())?;
        let x_num = scaler.transform(matrix.x_num())?;
        let encoder = OneHotEncoder::fit(matrix.x_cat())?;
        let x_cat = encoder.transform(matrix.x_cat())?;
        let features = hstack_features(&x_num, &x_cat)?;

        let (train_rows, test_rows) = train_test_split(matrix.len(), self.test_ratio, self.seed)?;
        let x_train = take_rows(&features, &train_rows);
        let x_test = take_rows(&features, &test_rows);
        let y_material_train = take(matrix.y_material(), &train_rows);
        let y_material_test = take(matrix.y_material(), &test_rows);
        let y_cost_train = take(matrix.y_log_cost(), &train_rows);
        let y_cost_test = take(matrix.y_log_cost(), &test_rows);

        info!(
            train_samples = train_rows.len(),
            test_samples = test_rows.len(),
            features = features.ncols(),
            classes = matrix.material_map().len(),
            "Fitting models"
        );

        let classifier = RandomForestClassifier::fit(
            &x_train,
            &y_material_train,
            &ForestConfig::classifier(self.seed),
        )?;

        let forest =
            RandomForestRegressor::fit(&x_train, &y_cost_train, &ForestConfig::regressor(self.seed))?;
        let boosting = GradientBoostingRegressor::fit(
            &x_train,
            &y_cost_train,
            &GradientBoostingConfig {
                seed: self.seed,
                ..GradientBoostingConfig::default()
            },
        )?;
        let regressor = VotingRegressor::new(vec![
            ("rf".to_string(), CostRegressor::Forest(forest)),
            ("gbr".to_string(), CostRegressor::Boosting(boosting)),
        ])?;

        let metrics = validate(
            &classifier,
            &regressor,
            &x_test,
            &y_material_test,
            &y_cost_test,
        )?;
        info!(
            accuracy = metrics.accuracy,
            mae_usd = metrics.mae,
            rmse_usd = metrics.rmse,
            r2 = metrics.r2,
            "Held-out validation"
        );

        let bundle = ModelBundle {
            classifier,
            regressor,
            scaler,
            encoder,
            material_map: matrix.material_map().clone(),
        };
        let manifest = BundleManifest::new(train_rows.len(), test_rows.len(), Some(metrics));
        BundleWriter::new(&self.model_dir)
            .write(&bundle, &manifest)
            .context("writing model bundle")?;

        info!(model_dir = %self.model_dir.display(), "Training complete");
        Ok(())
    }
}

/// Score both models on the held-out rows. Cost metrics are reported on
/// the USD scale, so predictions and targets are mapped back from log1p
/// before scoring.
fn validate(
    classifier: &RandomForestClassifier,
    regressor: &VotingRegressor,
    x_test: &ndarray::Array2<f64>,
    y_material_test: &[usize],
    y_cost_test: &[f64],
) -> Result<ValidationMetrics> {
    let class_pred = classifier.predict(x_test)?;
    let accuracy = accuracy_score(y_material_test, &class_pred)?;

    let cost_pred: Vec<f64> = regressor
        .predict(x_test)?
        .into_iter()
        .map(f64::exp_m1)
        .collect();
    let cost_true: Vec<f64> = y_cost_test.iter().map(|&v| v.exp_m1()).collect();

    Ok(ValidationMetrics {
        accuracy,
        mae: mean_absolute_error(&cost_true, &cost_pred)?,
        rmse: root_mean_squared_error(&cost_true, &cost_pred)?,
        r2: r2_score(&cost_true, &cost_pred)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_fixtures(dir: &std::path::Path) -> (PathBuf, PathBuf) {
        let data = dir.join("data.csv");
        let mut f = std::fs::File::create(&data).unwrap();
        writeln!(f, "building_size_m2,location,budget_level,material_combo,est_cost_usd").unwrap();
        for i in 0..20 {
            let size = 30.0 + 10.0 * i as f64;
            let (combo, location) = if i % 2 == 0 {
                ("all_timber", "rural")
            } else {
                ("all_concrete", "urban")
            };
            let budget = if i < 10 { "low" } else { "medium" };
            let cost = size * 400.0;
            writeln!(f, "{size},{location},{budget},{combo},{cost}").unwrap();
        }
        drop(f);

        let materials = dir.join("materials_curated.csv");
        let mut f = std::fs::File::create(&materials).unwrap();
        writeln!(f, "std_category,gwp_kgco2e_per_kg,density_kg_per_m3,build_speed").unwrap();
        writeln!(f, "timber,0.45,600,0.9").unwrap();
        writeln!(f, "concrete,0.15,2400,0.5").unwrap();
        drop(f);

        (data, materials)
    }

    #[tokio::test]
    async fn test_train_writes_a_loadable_bundle() {
        let dir = tempfile::tempdir().unwrap();
        let (data, materials) = write_fixtures(dir.path());
        let model_dir = dir.path().join("models");

        let cmd = TrainCommand {
            data,
            materials,
            model_dir: model_dir.clone(),
            test_ratio: 0.2,
            seed: 42,
        };
        cmd.run().await.unwrap();

        let reader = lchc_artifacts::BundleReader::new(&model_dir);
        let manifest = reader.read_manifest().unwrap();
        assert_eq!(manifest.train_samples, 16);
        assert_eq!(manifest.test_samples, 4);
        assert!(manifest.metrics.is_some());

        let bundle = reader.read().unwrap();
        assert_eq!(bundle.material_map.len(), 2);
        assert_eq!(bundle.regressor.member_names(), vec!["rf", "gbr"]);
    }

    #[tokio::test]
    async fn test_train_fails_cleanly_on_missing_data() {
        let dir = tempfile::tempdir().unwrap();
        let (_, materials) = write_fixtures(dir.path());

        let cmd = TrainCommand {
            data: dir.path().join("absent.csv"),
            materials,
            model_dir: dir.path().join("models"),
            test_ratio: 0.2,
            seed: 42,
        };
        let err = cmd.run().await.unwrap_err();
        assert!(err.to_string().contains("loading project dataset"));
    }
}
