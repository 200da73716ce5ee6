use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, ValueEnum};
use dpda_core::ModelSpec;
use dpda_exp::{to_canonical_json_bytes, ExperimentConfig};
use log::info;
use serde::Serialize;

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelKind {
    Uniform,
    PublicPrivate,
}

/// Options shared by every experiment subcommand.
#[derive(Args, Debug)]
pub struct ExperimentArgs {
    /// YAML experiment configuration; built-in defaults when omitted.
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Preference model, overriding the configuration file.
    #[arg(long, value_enum)]
    pub model: Option<ModelKind>,
    /// Public score weight for the public-private model.
    #[arg(long)]
    pub lambda: Option<f64>,
    /// Master seed, overriding the configuration file.
    #[arg(long)]
    pub seed: Option<u64>,
    /// Output directory for JSON and CSV artefacts.
    #[arg(long, default_value = "out")]
    pub out: PathBuf,
}

impl ExperimentArgs {
    pub fn load(&self) -> Result<ExperimentConfig, Box<dyn Error>> {
        let mut config = match &self.config {
            Some(path) => ExperimentConfig::from_yaml(&fs::read_to_string(path)?)?,
            None => ExperimentConfig::default(),
        };
        config.model = resolve_model(config.model, self.model, self.lambda)?;
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        config.validate()?;
        fs::create_dir_all(&self.out)?;
        Ok(config)
    }
}

/// Applies command-line overrides to the configured model. A bare `--lambda`
/// switches to the public-private model.
pub fn resolve_model(
    configured: ModelSpec,
    kind: Option<ModelKind>,
    lambda: Option<f64>,
) -> Result<ModelSpec, Box<dyn Error>> {
    let configured_lambda = match configured {
        ModelSpec::PublicPrivate { lambda } => Some(lambda),
        ModelSpec::Uniform => None,
    };
    let model = match (kind, lambda) {
        (Some(ModelKind::Uniform), Some(_)) => {
            return Err("--lambda only applies to the public-private model".into())
        }
        (Some(ModelKind::Uniform), None) => ModelSpec::Uniform,
        (Some(ModelKind::PublicPrivate), lambda) => ModelSpec::PublicPrivate {
            lambda: lambda.or(configured_lambda).unwrap_or(1.0),
        },
        (None, Some(lambda)) => ModelSpec::PublicPrivate { lambda },
        (None, None) => configured,
    };
    model.validate()?;
    Ok(model)
}

pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), Box<dyn Error>> {
    fs::write(path, to_canonical_json_bytes(value)?)?;
    info!("wrote {}", path.display());
    Ok(())
}

pub fn write_csv<T: Serialize>(path: &Path, rows: &[T]) -> Result<(), Box<dyn Error>> {
    let mut writer = csv::Writer::from_path(path)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    info!("wrote {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_lambda_selects_public_private() {
        let model = resolve_model(ModelSpec::Uniform, None, Some(0.3)).unwrap();
        assert_eq!(model, ModelSpec::PublicPrivate { lambda: 0.3 });
    }

    #[test]
    fn public_private_keeps_configured_lambda() {
        let model = resolve_model(
            ModelSpec::PublicPrivate { lambda: 0.6 },
            Some(ModelKind::PublicPrivate),
            None,
        )
        .unwrap();
        assert_eq!(model, ModelSpec::PublicPrivate { lambda: 0.6 });
    }

    #[test]
    fn uniform_with_lambda_is_rejected() {
        assert!(resolve_model(ModelSpec::Uniform, Some(ModelKind::Uniform), Some(0.5)).is_err());
    }

    #[test]
    fn out_of_range_override_is_rejected() {
        assert!(resolve_model(ModelSpec::Uniform, None, Some(1.5)).is_err());
    }
}
