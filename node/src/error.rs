use tally_types::ElectionError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NodeError {
    #[error("election error: {0}")]
    Election(#[from] ElectionError),

    #[error("config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("audit encoding error: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("authority dropped the reply channel")]
    ChannelClosed,

    #[error("node is shutting down")]
    ShuttingDown,

    #[error("authority task failed: {0}")]
    Task(String),
}
