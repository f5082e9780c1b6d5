use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("Invalid --set format: '{0}'. Expected KEY=VALUE.")]
    MissingSeparator(String),

    #[error("Empty key in --set value '{0}'.")]
    EmptyKey(String),

    #[error("Empty value for key '{0}'.")]
    EmptyValue(String),
}

/// Splits a `-S KEY=VALUE` override at its first `=`.
///
/// The key is trimmed; the value is trimmed and must not be empty, so paths and sheet
/// names may themselves contain `=`.
pub fn parse_key_value(pair: &str) -> Result<(&str, &str), ParseError> {
    let (key, value) = pair
        .split_once('=')
        .ok_or_else(|| ParseError::MissingSeparator(pair.to_string()))?;
    let (key, value) = (key.trim(), value.trim());
    if key.is_empty() {
        return Err(ParseError::EmptyKey(pair.to_string()));
    }
    if value.is_empty() {
        return Err(ParseError::EmptyValue(key.to_string()));
    }
    Ok((key, value))
}
