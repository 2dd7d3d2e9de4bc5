//! OpenAI-compatible client plumbing
//!
//! Builds `async_openai` clients from a credential and maps session messages
//! onto the chat completions wire types.

use crate::api::chat::ChatModel;
use crate::config::{ApiConfig, ChatConfig};
use crate::credential::Credential;
use crate::error::{ChatdocError, Result};
use crate::session::{Message, Role};
use async_openai::{Client, config::OpenAIConfig};
use async_openai::types::{
    ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
    ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
    CreateChatCompletionRequest, CreateChatCompletionRequestArgs,
};

/// Create a client for the hosted API or a compatible local endpoint
pub fn build_client(credential: &Credential, api: &ApiConfig) -> Client<OpenAIConfig> {
    let config = OpenAIConfig::new().with_api_key(credential.expose());
    let config = match &api.base_url {
        Some(base_url) => config.with_api_base(base_url),
        None => config,
    };
    Client::with_config(config)
}

fn to_request_message(message: &Message) -> Result<ChatCompletionRequestMessage> {
    let content = message.content.as_str();
    let request = match message.role {
        Role::System => ChatCompletionRequestSystemMessageArgs::default()
            .content(content)
            .build()?
            .into(),
        Role::User => ChatCompletionRequestUserMessageArgs::default()
            .content(content)
            .build()?
            .into(),
        Role::Assistant => ChatCompletionRequestAssistantMessageArgs::default()
            .content(content)
            .build()?
            .into(),
    };
    Ok(request)
}

/// Sampling temperature for every completion; answers are deterministic
pub const CHAT_TEMPERATURE: f32 = 0.0;

/// Chat model backed by the chat completions endpoint
pub struct OpenAIChat {
    client: Client<OpenAIConfig>,
    model: String,
}

impl OpenAIChat {
    pub fn new(credential: &Credential, api: &ApiConfig, chat: &ChatConfig) -> Self {
        Self {
            client: build_client(credential, api),
            model: chat.model.clone(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn build_request(&self, messages: &[Message]) -> Result<CreateChatCompletionRequest> {
        let messages = messages
            .iter()
            .map(to_request_message)
            .collect::<Result<Vec<_>>>()?;

        Ok(CreateChatCompletionRequestArgs::default()
            .model(self.model.as_str())
            .messages(messages)
            .temperature(CHAT_TEMPERATURE)
            .build()?)
    }
}

impl ChatModel for OpenAIChat {
    async fn complete(&self, messages: &[Message]) -> Result<Message> {
        let request = self.build_request(messages)?;
        let response = self.client.chat().create(request).await?;

        let content = response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| {
                log::error!("No content in chat response from {}", self.model);
                ChatdocError::Llm("No content in response".to_string())
            })?;

        Ok(Message::assistant(content))
    }
}
