//! Request/response types of the OpenAI-compatible *chat/completions* shape,
//! shared by the DeepSeek, OpenRouter and OpenAI endpoints.

use serde::{Deserialize, Serialize};

use incluia_core::message::ChatMessage;

#[derive(Debug, Serialize, Clone)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ApiMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
}

impl ChatCompletionRequest {
    pub fn new(model: String, messages: Vec<ApiMessage>) -> Self {
        Self {
            model,
            messages,
            temperature: None,
        }
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }
}

/// One chat turn on the wire.
///
/// `content` is a JSON value rather than a plain string because the vision
/// path sends the OpenAI multi-part form (`[{type: "text"}, {type:
/// "image_url"}]`) through the same request type.
#[derive(Debug, Serialize, Clone)]
pub struct ApiMessage {
    pub role: String,
    pub content: serde_json::Value,
}

impl From<&ChatMessage> for ApiMessage {
    fn from(value: &ChatMessage) -> Self {
        Self {
            role: value.role.to_string(),
            content: serde_json::Value::String(value.content.clone()),
        }
    }
}

impl ApiMessage {
    /// Build the user turn of a vision request: prompt text plus the image
    /// as a base64 data URL.
    pub fn vision_user_turn(prompt: &str, image_base64: &str, mime_type: &str) -> Self {
        Self {
            role: "user".to_owned(),
            content: serde_json::json!([
                { "type": "text", "text": prompt },
                {
                    "type": "image_url",
                    "image_url": { "url": format!("data:{mime_type};base64,{image_base64}") }
                }
            ]),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
pub struct ResponseMessage {
    #[serde(default)]
    pub content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use incluia_core::message::ChatMessage;

    #[test]
    fn request_serializes_plain_content_as_string() {
        let messages = vec![ApiMessage::from(&ChatMessage::user("Olá"))];
        let request = ChatCompletionRequest::new("deepseek-chat".into(), messages);
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["messages"][0]["content"], "Olá");
        assert!(json.get("temperature").is_none());
    }

    #[test]
    fn vision_turn_carries_a_data_url() {
        let turn = ApiMessage::vision_user_turn("Transcreva o laudo", "QUJD", "image/png");
        let json = serde_json::to_value(&turn).unwrap();
        assert_eq!(
            json["content"][1]["image_url"]["url"],
            "data:image/png;base64,QUJD"
        );
    }
}
