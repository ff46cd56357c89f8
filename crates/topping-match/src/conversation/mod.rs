//! Conversation layer wrapping the decision engine: session storage, the
//! chat state machine, free-text resolution, and the HTTP router.

pub mod gemini;
pub mod resolver;
pub mod router;
pub mod service;
pub mod session;

#[cfg(test)]
mod tests;

pub use gemini::GeminiResolver;
pub use resolver::{match_option, ExactMatchResolver, OptionResolver, ResolveError};
pub use router::chat_router;
pub use service::{
    BotReply, ConversationError, ConversationOpening, ConversationService, OptionView, QuestionView,
};
pub use session::{ConversationPhase, SessionId, SessionRecord, SessionStore, StoreError};
