use async_trait::async_trait;
use thiserror::Error;

use crate::matching::{AnswerOption, Question};

/// Maps free-typed visitor text onto one of a question's canonical option
/// values. Implementations may consult a remote language model; the
/// conversation service re-validates whatever comes back against the
/// canonical option set and never trusts it blindly.
#[async_trait]
pub trait OptionResolver: Send + Sync {
    /// `Ok(None)` means the text could not be mapped; the caller re-asks.
    async fn resolve(
        &self,
        question: &Question,
        text: &str,
    ) -> Result<Option<String>, ResolveError>;
}

/// Failures while consulting a resolver backend.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("resolver transport failed: {0}")]
    Transport(String),
    #[error("resolver returned a malformed payload: {0}")]
    Malformed(String),
}

/// Literal matching against option values and labels. Covers button taps and
/// visitors who type a label verbatim.
pub fn match_option<'a>(question: &'a Question, text: &str) -> Option<&'a AnswerOption> {
    let needle = text.trim();
    question
        .options
        .iter()
        .find(|option| option.value.eq_ignore_ascii_case(needle) || option.label == needle)
}

/// Resolver that only performs literal matching. Used when no remote
/// collaborator is configured, and by the CLI demo.
#[derive(Debug, Default, Clone, Copy)]
pub struct ExactMatchResolver;

#[async_trait]
impl OptionResolver for ExactMatchResolver {
    async fn resolve(
        &self,
        question: &Question,
        text: &str,
    ) -> Result<Option<String>, ResolveError> {
        Ok(match_option(question, text).map(|option| option.value.clone()))
    }
}
