use std::fmt;

use trawl_search::CompileError;

#[derive(Debug)]
pub enum ClientError {
    Compile(CompileError),
    Transport(String),
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientError::Compile(e) => write!(f, "compile error: {e}"),
            ClientError::Transport(msg) => write!(f, "transport error: {msg}"),
        }
    }
}

impl std::error::Error for ClientError {}

impl From<CompileError> for ClientError {
    fn from(e: CompileError) -> Self {
        ClientError::Compile(e)
    }
}
