use async_openai::{
    config::OpenAIConfig,
    error::OpenAIError,
    types::{
        ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
        ChatCompletionRequestToolMessageArgs, ChatCompletionRequestUserMessageArgs,
        ChatCompletionResponseMessage, ChatCompletionTool, ChatCompletionToolArgs,
        ChatCompletionToolType, CreateChatCompletionRequestArgs, FunctionObjectArgs,
        ResponseFormat, ResponseFormatJsonSchema,
    },
    Client,
};
use serde::Deserialize;
use serde_json::{json, Value};

const MODEL: &str = "gpt-4o-mini";

pub struct OpenaiClient {
    client: Client<OpenAIConfig>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ExtractToolArguments {
    extracted_info: String,
}

impl OpenaiClient {
    pub fn new(api_key: String, api_base: Option<String>) -> Self {
        let mut config = OpenAIConfig::new().with_api_key(api_key);
        if let Some(api_base) = api_base {
            config = config.with_api_base(api_base);
        }

        OpenaiClient {
            client: Client::with_config(config),
        }
    }

    /// Runs the free-text extraction conversation: the model may invoke the
    /// `extract_information` tool once, in which case its own extraction is
    /// fed back for one final text turn. At most two chat calls are made.
    /// Returns the final text plus the token total across both calls.
    pub async fn extract_with_tool(&self, prompt: &str) -> Result<(String, u32), OpenAIError> {
        let tool = extract_information_tool()?;

        let mut messages: Vec<ChatCompletionRequestMessage> =
            vec![ChatCompletionRequestUserMessageArgs::default()
                .content(prompt)
                .build()?
                .into()];

        let (message, mut total_tokens) = self.chat_step(messages.clone(), tool.clone()).await?;

        let tool_calls = message.tool_calls.unwrap_or_default();
        let final_text = match tool_calls.first() {
            None => message.content.unwrap_or_default(),
            Some(call) => {
                let extracted = serde_json::from_str::<ExtractToolArguments>(
                    &call.function.arguments,
                )
                .map(|args| args.extracted_info)
                .unwrap_or_else(|_| call.function.arguments.clone());

                messages.push(
                    ChatCompletionRequestAssistantMessageArgs::default()
                        .tool_calls(tool_calls.clone())
                        .build()?
                        .into(),
                );
                messages.push(
                    ChatCompletionRequestToolMessageArgs::default()
                        .content(extracted.clone())
                        .tool_call_id(call.id.clone())
                        .build()?
                        .into(),
                );

                let (second, tokens) = self.chat_step(messages, tool).await?;
                total_tokens += tokens;
                second.content.unwrap_or(extracted)
            }
        };

        log::info!("Extracted information: {}", final_text);
        Ok((final_text, total_tokens))
    }

    /// Issues one schema-constrained call and returns the raw JSON text the
    /// model produced, plus the token total.
    pub async fn extract_with_schema(
        &self,
        prompt: &str,
        schema_name: &str,
        schema: Value,
    ) -> Result<(String, u32), OpenAIError> {
        let request = CreateChatCompletionRequestArgs::default()
            .model(MODEL)
            .messages([ChatCompletionRequestUserMessageArgs::default()
                .content(prompt)
                .build()?
                .into()])
            .response_format(ResponseFormat::JsonSchema {
                json_schema: ResponseFormatJsonSchema {
                    description: None,
                    name: schema_name.to_string(),
                    schema: Some(schema),
                    strict: Some(true),
                },
            })
            .build()?;

        let response = self.client.chat().create(request).await?;
        let total_tokens = response
            .usage
            .as_ref()
            .map(|usage| usage.total_tokens)
            .unwrap_or(0);
        log::info!("Usage: {} tokens", total_tokens);

        let content = response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| {
                OpenAIError::InvalidArgument("no content in model response".to_string())
            })?;

        Ok((content, total_tokens))
    }

    async fn chat_step(
        &self,
        messages: Vec<ChatCompletionRequestMessage>,
        tool: ChatCompletionTool,
    ) -> Result<(ChatCompletionResponseMessage, u32), OpenAIError> {
        let request = CreateChatCompletionRequestArgs::default()
            .model(MODEL)
            .messages(messages)
            .tools(vec![tool])
            .build()?;

        let response = self.client.chat().create(request).await?;
        let tokens = response
            .usage
            .as_ref()
            .map(|usage| usage.total_tokens)
            .unwrap_or(0);

        let message = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| {
                OpenAIError::InvalidArgument("no choices in model response".to_string())
            })?
            .message;

        Ok((message, tokens))
    }
}

fn extract_information_tool() -> Result<ChatCompletionTool, OpenAIError> {
    ChatCompletionToolArgs::default()
        .r#type(ChatCompletionToolType::Function)
        .function(
            FunctionObjectArgs::default()
                .name("extract_information")
                .description(
                    "Extract specific information from the provided HTML based on the user's request",
                )
                .parameters(json!({
                    "type": "object",
                    "properties": {
                        "extractedInfo": {
                            "type": "string",
                            "description": "The extracted information from the HTML content"
                        }
                    },
                    "required": ["extractedInfo"]
                }))
                .build()?,
        )
        .build()
}
