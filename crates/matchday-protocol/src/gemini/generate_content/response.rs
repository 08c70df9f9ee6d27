use serde::{Deserialize, Serialize};

use crate::gemini::generate_content::types::{Candidate, PromptFeedback, UsageMetadata};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub candidates: Vec<Candidate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt_feedback: Option<PromptFeedback>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage_metadata: Option<UsageMetadata>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_id: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenated text fragments of the first candidate's content.
    /// Empty when the response carried no candidates or no text parts.
    pub fn primary_text(&self) -> String {
        let Some(candidate) = self.candidates.first() else {
            return String::new();
        };
        candidate
            .content
            .parts
            .iter()
            .filter_map(|part| part.text.as_deref())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primary_text_joins_all_parts_of_first_candidate() {
        let json = r#"{
            "candidates": [
                {
                    "content": {
                        "parts": [
                            {"text": "Cenário tático do dia:\n"},
                            {"text": "Equilíbrio ligeiro."}
                        ],
                        "role": "model"
                    },
                    "finishReason": "STOP",
                    "index": 0
                },
                {
                    "content": {"parts": [{"text": "ignored"}], "role": "model"}
                }
            ],
            "usageMetadata": {"promptTokenCount": 42, "totalTokenCount": 60},
            "modelVersion": "gemini-1.5-flash"
        }"#;
        let resp: GenerateContentResponse = serde_json::from_str(json).unwrap();
        assert_eq!(
            resp.primary_text(),
            "Cenário tático do dia:\nEquilíbrio ligeiro."
        );
        assert_eq!(resp.usage_metadata.unwrap().prompt_token_count, Some(42));
    }

    #[test]
    fn primary_text_is_empty_without_candidates() {
        let resp: GenerateContentResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(resp.primary_text(), "");
    }

    #[test]
    fn parts_without_text_are_skipped() {
        let json = r#"{
            "candidates": [
                {"content": {"parts": [{"thought": true}, {"text": "1-0"}], "role": "model"}}
            ]
        }"#;
        let resp: GenerateContentResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.primary_text(), "1-0");
    }
}
