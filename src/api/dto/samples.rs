/*
 * Responsibility
 * - samples の request/response DTO
 * - wordCount は入力ではなく content から導出する (dto では受けない)
 */
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

const TITLE_MAX_CHARS: usize = 200;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSampleRequest {
    pub title: String,
    pub content: String,
}

impl CreateSampleRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.title.trim().is_empty() {
            return Err("title is required");
        }
        if self.title.chars().count() > TITLE_MAX_CHARS {
            return Err("title must be <= 200 chars");
        }
        if self.content.trim().is_empty() {
            return Err("content is required");
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSampleRequest {
    pub title: Option<String>,
    pub content: Option<String>,
}

impl UpdateSampleRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if let Some(title) = &self.title {
            if title.trim().is_empty() {
                return Err("title cannot be empty");
            }
            if title.chars().count() > TITLE_MAX_CHARS {
                return Err("title must be <= 200 chars");
            }
        }
        if let Some(content) = &self.content
            && content.trim().is_empty()
        {
            return Err("content cannot be empty");
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SampleResponse {
    /// 公開 ID (sqids)。内部の bigint は出さない
    pub id: String,
    pub title: String,
    pub content: String,
    pub word_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_rejects_blank_title_and_content() {
        let blank_title = CreateSampleRequest {
            title: "   ".into(),
            content: "words".into(),
        };
        assert!(blank_title.validate().is_err());

        let blank_content = CreateSampleRequest {
            title: "t".into(),
            content: "".into(),
        };
        assert!(blank_content.validate().is_err());
    }

    #[test]
    fn update_with_no_fields_is_valid() {
        let req = UpdateSampleRequest {
            title: None,
            content: None,
        };
        assert!(req.validate().is_ok());
    }

    #[test]
    fn update_rejects_an_overlong_title() {
        let req = UpdateSampleRequest {
            title: Some("x".repeat(201)),
            content: None,
        };
        assert!(req.validate().is_err());
    }
}
