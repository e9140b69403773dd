//! OpenAI: 5-token chat completion.

use futures::future::{BoxFuture, FutureExt};
use serde_json::json;

use super::*;

const PATH: &str = "/v1/chat/completions";

pub fn validate<'a>(
    ctx: &'a ProbeContext,
    key: &'a str,
) -> BoxFuture<'a, Result<ProbeOutcome, ProbeError>> {
    probe(ctx, key).boxed()
}

async fn probe(ctx: &ProbeContext, key: &str) -> Result<ProbeOutcome, ProbeError> {
    let resp = ctx
        .client()
        .post(ctx.url(&ctx.endpoints().openai, PATH))
        .bearer_auth(key)
        .json(&json!({
            "model": "gpt-3.5-turbo",
            "messages": say_hi(),
            "max_tokens": 5,
        }))
        .send()
        .await?;

    let status = resp.status();
    let organization = resp
        .headers()
        .get("openai-organization")
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .unwrap_or("N/A")
        .to_string();
    let body = read_json(resp).await?;

    if !status.is_success() {
        let code = status.as_u16();
        let kind = match code {
            401 => ResultType::Invalid,
            429 => ResultType::RateLimited,
            402 => ResultType::InsufficientCredits,
            _ => ResultType::Error,
        };
        let msg = message_from(&[&body["error"]["message"], &body["error"], &body]);
        return Ok(ProbeOutcome::rejected(code, kind, msg));
    }

    Ok(ProbeOutcome::valid(
        "API key is valid",
        details(json!({
            "model": body["model"],
            "usage": body["usage"],
            "organization": organization,
        })),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validators::testing::context_for;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_invalid_key() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(PATH))
            .and(header("authorization", "Bearer sk-bad"))
            .respond_with(
                ResponseTemplate::new(401)
                    .set_body_json(json!({"error": {"message": "Invalid API key"}})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let outcome = validate(&context_for(&server), "sk-bad").await.unwrap();
        assert!(!outcome.success());
        assert_eq!(outcome.status(), 401);
        assert_eq!(outcome.kind(), ResultType::Invalid);
        assert_eq!(outcome.message(), "Invalid API key");
        assert!(outcome.details().is_none());
    }

    #[tokio::test]
    async fn test_payment_required_is_insufficient_credits() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(PATH))
            .respond_with(ResponseTemplate::new(402).set_body_json(json!({"error": {"code": "billing"}})))
            .mount(&server)
            .await;

        let outcome = validate(&context_for(&server), "sk-x").await.unwrap();
        assert_eq!(outcome.kind(), ResultType::InsufficientCredits);
        assert_eq!(outcome.message(), r#"{"code":"billing"}"#);
    }

    #[tokio::test]
    async fn test_valid_key_reports_model_and_org() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(PATH))
            .and(body_json(json!({
                "model": "gpt-3.5-turbo",
                "messages": [{"role": "user", "content": "Say hi"}],
                "max_tokens": 5,
            })))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("openai-organization", "org-acme")
                    .set_body_json(json!({
                        "model": "gpt-3.5-turbo-0125",
                        "usage": {"prompt_tokens": 9, "completion_tokens": 2, "total_tokens": 11},
                    })),
            )
            .mount(&server)
            .await;

        let outcome = validate(&context_for(&server), "sk-good").await.unwrap();
        assert!(outcome.success());
        assert_eq!(outcome.message(), "API key is valid");
        let details = outcome.details().unwrap();
        assert_eq!(details["model"], "gpt-3.5-turbo-0125");
        assert_eq!(details["usage"]["total_tokens"], 11);
        assert_eq!(details["organization"], "org-acme");
    }

    #[tokio::test]
    async fn test_missing_org_header() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"model": "m"})))
            .mount(&server)
            .await;

        let outcome = validate(&context_for(&server), "sk-good").await.unwrap();
        assert_eq!(outcome.details().unwrap()["organization"], "N/A");
    }

    #[tokio::test]
    async fn test_non_json_body_is_probe_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(502).set_body_string("<html>502</html>"))
            .mount(&server)
            .await;

        let err = validate(&context_for(&server), "sk-x").await.unwrap_err();
        assert!(matches!(err, ProbeError::Body(_)));
    }
}
