use async_trait::async_trait;

/// One interaction with the user. A fresh request is passed on every
/// call, so implementations hold no per-invocation state.
#[derive(Clone, Debug)]
pub struct PromptRequest<'a> {
    pub title: &'a str,
    pub message: &'a str,
    pub confirm_label: &'a str,
    pub has_cancel: bool,
    pub input: PromptInput,
    /// Annotation shown when the previous attempt was rejected.
    pub error: Option<String>,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PromptInput {
    None,
    Password,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PromptOutcome {
    /// Carries the input field's text; empty for plain confirmations.
    Confirmed(String),
    Cancelled,
    /// Show the prompt again instead of dismissing it.
    Retry,
}

#[async_trait]
pub trait ConfirmationPrompt: Send {
    async fn ask(&mut self, request: PromptRequest<'_>) -> PromptOutcome;
}
