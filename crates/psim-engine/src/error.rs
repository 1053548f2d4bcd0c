use psim_agent::AgentError;
use psim_catalog::CatalogError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error("population is empty; nothing to simulate")]
    EmptyPopulation,

    #[error("activity catalog is empty; nothing to choose from")]
    EmptyCatalog,

    #[error("{what} length {got} does not match agent count {expected}")]
    AgentCountMismatch {
        expected: usize,
        got:      usize,
        what:     &'static str,
    },

    #[error("population error: {0}")]
    Agent(#[from] AgentError),

    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),
}

pub type SimResult<T> = Result<T, SimError>;
