use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QuestError {
    #[error("io error: {0}")]
    Io(String),
    #[error("config parse error: {0}")]
    ConfigParse(String),
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error("cli error: {0}")]
    Cli(String),
    #[error("process error: {0}")]
    Process(String),
    #[error("render error: {0}")]
    Render(String),
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("invalid transition: {0}")]
    InvalidTransition(String),
}

impl QuestError {
    /// Contract faults are programmer errors, everything else comes from the host.
    pub fn is_contract_fault(&self) -> bool {
        matches!(self, Self::InvalidArgument(_) | Self::InvalidTransition(_))
    }
}
