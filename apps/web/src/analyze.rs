use serde::Serialize;
use serde_json::Value;

use crate::console;
use crate::pipeline::ALERT_ANALYSIS_FAILED;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalyzeRequest {
    pub name: String,
}

impl AnalyzeRequest {
    /// Trims the raw input; `None` when nothing is left to search for.
    pub fn from_input(raw: &str) -> Option<Self> {
        let name = raw.trim();
        if name.is_empty() {
            return None;
        }
        Some(Self {
            name: name.to_string(),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnalyzeResponse {
    pub status: Option<String>,
    pub slug: Option<String>,
    pub message: Option<String>,
}

impl AnalyzeResponse {
    /// Parses a response body without ever failing. Each field is read on its
    /// own: a field that is missing or not a string counts as absent without
    /// affecting the others. Empty or non-JSON bodies read as the default.
    pub fn parse(raw: &str) -> Self {
        if raw.trim().is_empty() {
            return Self::default();
        }
        match serde_json::from_str::<Value>(raw) {
            Ok(value) => Self::from_value(&value),
            Err(error) => {
                console::error(&format!("Не удалось распарсить ответ: {error}; body: {raw}"));
                Self::default()
            }
        }
    }

    fn from_value(value: &Value) -> Self {
        let field = |name: &str| value.get(name).and_then(Value::as_str).map(str::to_string);
        Self {
            status: field("status"),
            slug: field("slug"),
            message: field("message"),
        }
    }

    pub fn card_exists(&self) -> bool {
        self.status.as_deref() == Some("exists")
    }

    fn is_ready(&self) -> bool {
        matches!(self.status.as_deref(), Some("exists" | "created"))
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref().filter(|message| !message.is_empty())
    }
}

/// Status and raw body of a settled request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub status: u16,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Redirect(String),
    Rejected(String),
}

/// Decides where a reply leads: the company page on HTTP 200 with a ready
/// card, otherwise a rejection carrying the server message or a default.
pub fn resolve(status: u16, body: &AnalyzeResponse, company_path: &str) -> Outcome {
    if status == 200 && body.is_ready() {
        if let Some(slug) = body.slug.as_deref().filter(|slug| !slug.is_empty()) {
            return Outcome::Redirect(format!("{company_path}{slug}"));
        }
    }
    Outcome::Rejected(body.message().unwrap_or(ALERT_ANALYSIS_FAILED).to_string())
}

#[cfg(test)]
mod tests {
    use super::{resolve, AnalyzeRequest, AnalyzeResponse, Outcome};

    fn body(raw: &str) -> AnalyzeResponse {
        AnalyzeResponse::parse(raw)
    }

    #[test]
    fn input_is_trimmed_and_blank_input_rejected() {
        assert_eq!(
            AnalyzeRequest::from_input("  Acme Corp \n"),
            Some(AnalyzeRequest {
                name: "Acme Corp".to_string()
            })
        );
        assert_eq!(AnalyzeRequest::from_input("   \t"), None);
        assert_eq!(AnalyzeRequest::from_input(""), None);
    }

    #[test]
    fn request_serializes_as_name_object() {
        let request = AnalyzeRequest {
            name: "Яндекс".to_string(),
        };
        assert_eq!(
            serde_json::to_string(&request).unwrap(),
            r#"{"name":"Яндекс"}"#
        );
    }

    #[test]
    fn malformed_bodies_read_as_empty() {
        assert_eq!(body(""), AnalyzeResponse::default());
        assert_eq!(body("<html>502</html>"), AnalyzeResponse::default());
        assert_eq!(body("[1, 2]"), AnalyzeResponse::default());
        assert_eq!(body("\"created\""), AnalyzeResponse::default());
    }

    #[test]
    fn mistyped_field_is_dropped_alone() {
        let parsed = body(r#"{"status":"error","message":"Сервис недоступен","slug":42}"#);
        assert_eq!(parsed.status.as_deref(), Some("error"));
        assert_eq!(parsed.slug, None);
        assert_eq!(
            resolve(200, &parsed, "/company/"),
            Outcome::Rejected("Сервис недоступен".to_string())
        );

        let parsed = body(r#"{"status":5,"message":"Лимит запросов"}"#);
        assert_eq!(parsed.status, None);
        assert_eq!(parsed.message.as_deref(), Some("Лимит запросов"));
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let parsed = body(r#"{"status":"created","slug":"acme","iai":7.1}"#);
        assert_eq!(parsed.slug.as_deref(), Some("acme"));
        assert!(!parsed.card_exists());
    }

    #[test]
    fn created_and_exists_redirect_to_company_page() {
        assert_eq!(
            resolve(200, &body(r#"{"status":"created","slug":"acme"}"#), "/company/"),
            Outcome::Redirect("/company/acme".to_string())
        );
        assert_eq!(
            resolve(200, &body(r#"{"status":"exists","slug":"x-5"}"#), "/company/"),
            Outcome::Redirect("/company/x-5".to_string())
        );
    }

    #[test]
    fn business_errors_carry_the_server_message() {
        assert_eq!(
            resolve(
                200,
                &body(r#"{"status":"error","message":"Компания не найдена"}"#),
                "/company/"
            ),
            Outcome::Rejected("Компания не найдена".to_string())
        );
        assert_eq!(
            resolve(
                400,
                &body(r#"{"status":"error","message":"Название не должно быть пустым"}"#),
                "/company/"
            ),
            Outcome::Rejected("Название не должно быть пустым".to_string())
        );
    }

    #[test]
    fn non_200_with_ready_status_is_still_rejected() {
        assert_eq!(
            resolve(500, &body(r#"{"status":"created","slug":"acme"}"#), "/company/"),
            Outcome::Rejected("Ошибка анализа".to_string())
        );
    }

    #[test]
    fn missing_slug_or_message_falls_back_to_default_alert() {
        assert_eq!(
            resolve(200, &body(r#"{"status":"created"}"#), "/company/"),
            Outcome::Rejected("Ошибка анализа".to_string())
        );
        assert_eq!(
            resolve(200, &body(r#"{"status":"error","message":""}"#), "/company/"),
            Outcome::Rejected("Ошибка анализа".to_string())
        );
        assert_eq!(
            resolve(200, &AnalyzeResponse::default(), "/company/"),
            Outcome::Rejected("Ошибка анализа".to_string())
        );
    }
}
