use thiserror::Error;

#[derive(Debug, Error)]
pub enum AgentError {
    #[error("population size must be at least 1")]
    EmptyPopulation,

    #[error("invalid genesis parameters: {0}")]
    Params(String),
}

pub type AgentResult<T> = Result<T, AgentError>;
