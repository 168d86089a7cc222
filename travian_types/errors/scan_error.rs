use thiserror::Error;

/// Errors raised while turning raw HTML into domain state. Each variant
/// names the page the scanner could not make sense of, so the executor's
/// log line points straight at the broken selector.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("failed to parse dorf1 page: {0}")]
    Dorf1Parse(String),

    #[error("failed to parse dorf2 page: {0}")]
    Dorf2Parse(String),

    #[error("failed to parse hero page: {0}")]
    HeroParse(String),

    #[error("failed to parse hero inventory page: {0}")]
    HeroInventoryParse(String),

    #[error("unrecognized tribe marker in dorf2 page")]
    UnknownTribe,

    #[error("expected element not found: {0}")]
    MissingElement(&'static str),
}
