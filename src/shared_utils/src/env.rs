use secrecy::SecretString;
use thiserror::Error;

/// An environment variable required by the application is not set.
#[derive(Debug, Error)]
#[error("Missing environment variable: {0}")]
pub struct MissingEnvVarError(pub String);

/// Reads an environment variable, returning a structured error if it's missing.
///
/// A variable that is set but blank (only whitespace) counts as missing, so an
/// empty `APCA_API_KEY_ID=` line in a `.env` file is reported instead of being
/// sent to the provider.
///
/// # Arguments
/// * `name` - The name of the environment variable to read.
pub fn get_env_var(name: &str) -> Result<String, MissingEnvVarError> {
    get_optional_env_var(name).ok_or_else(|| MissingEnvVarError(name.to_string()))
}

/// Reads an environment variable, treating unset and blank values as `None`.
pub fn get_optional_env_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Reads a credential from the environment straight into a [`SecretString`].
pub fn get_secret_env_var(name: &str) -> Result<SecretString, MissingEnvVarError> {
    get_env_var(name).map(|v| SecretString::new(v.into()))
}
