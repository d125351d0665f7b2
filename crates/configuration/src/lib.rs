use config::{Environment, File, FileFormat};

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use error::ConfigError;
pub use settings::{AnalysisSettings, RollingSettings};

/// Loads the analysis settings from the optional `psf.toml` file and `PSF_*`
/// environment variables.
///
/// Environment variables win over the file, and the file wins over the built-in
/// defaults. Nested keys use a double underscore, e.g. `PSF_ROLLING__YEARS=3`.
pub fn load_config() -> Result<AnalysisSettings, ConfigError> {
    let builder = with_defaults(config::Config::builder())?
        // Tells the builder to look for a file named `psf.toml`, if there is one.
        .add_source(File::with_name("psf").required(false))
        .add_source(
            Environment::with_prefix("PSF")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

    finish(builder)
}

/// Loads the analysis settings from a TOML document over the built-in defaults.
pub fn load_config_from_str(toml: &str) -> Result<AnalysisSettings, ConfigError> {
    let builder = with_defaults(config::Config::builder())?
        .add_source(File::from_str(toml, FileFormat::Toml));

    finish(builder)
}

fn with_defaults(
    builder: config::ConfigBuilder<config::builder::DefaultState>,
) -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
    let defaults = AnalysisSettings::default();
    Ok(builder
        .set_default("periodicity", defaults.periodicity.as_str())?
        .set_default("risk_free_rate", defaults.risk_free_rate)?
        .set_default("rolling.years", i64::from(defaults.rolling.years))?
        .set_default("rolling.mode", defaults.rolling.mode.as_str())?)
}

fn finish(
    builder: config::ConfigBuilder<config::builder::DefaultState>,
) -> Result<AnalysisSettings, ConfigError> {
    // Attempt to deserialize the entire configuration into our `AnalysisSettings` struct
    let settings = builder.build()?.try_deserialize::<AnalysisSettings>()?;
    settings.validate()?;

    tracing::debug!(?settings, "Loaded analysis settings");
    Ok(settings)
}
