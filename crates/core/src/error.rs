#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Unsupported Carta Porte version: {0}")]
    UnsupportedVersion(String),

    #[error("Rule set already registered for version {0}")]
    DuplicateRuleSet(String),
}
