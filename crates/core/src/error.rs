//! Error types for the resource- and render-facing edges of the game.
//!
//! Simulation state changes never fail; only texture loading and drawing do.

use thiserror::Error;

/// A texture could not be loaded. Fatal to session startup.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("could not load texture '{path}': {reason}")]
pub struct ResourceError {
    pub path: String,
    pub reason: String,
}

impl ResourceError {
    pub fn new(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

/// A renderer call failed mid-frame.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("render failed: {reason}")]
pub struct RenderError {
    pub reason: String,
}

impl RenderError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Errors surfaced by scene construction and the game loop.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error(transparent)]
    Resource(#[from] ResourceError),

    /// The scene was built outside a tokio runtime, so the pipe spawner has
    /// nowhere to run.
    #[error("no tokio runtime to run the pipe spawner on")]
    NoRuntime,

    /// A paint pass failed; the loop stops producing frames.
    #[error("could not draw {what}")]
    Render {
        what: &'static str,
        #[source]
        source: RenderError,
    },
}

impl GameError {
    pub(crate) fn render(what: &'static str) -> impl FnOnce(RenderError) -> GameError {
        move |source| GameError::Render { what, source }
    }
}

pub type GameResult<T> = Result<T, GameError>;
