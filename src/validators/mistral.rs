//! Mistral AI: OpenAI-compatible chat completion.

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
        .post(ctx.url(&ctx.endpoints().mistral, PATH))
        .bearer_auth(key)
        .json(&json!({
            "model": "mistral-small-latest",
            "messages": say_hi(),
            "max_tokens": 5,
        }))
        .send()
        .await?;

    let status = resp.status();
    let body = read_json(resp).await?;

    if !status.is_success() {
        let code = status.as_u16();
        let kind = match code {
            401 => ResultType::Invalid,
            429 => ResultType::RateLimited,
            _ => ResultType::Error,
        };
        // Mistral puts the reason at the top level ({"message": ...}).
        let msg = message_from(&[&body["error"]["message"], &body["message"], &body]);
        return Ok(ProbeOutcome::rejected(code, kind, msg));
    }

    Ok(ProbeOutcome::valid(
        "API key is valid",
        details(json!({ "model": body["model"], "usage": body["usage"] })),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validators::testing::context_for;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_top_level_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(PATH))
            .and(header("authorization", "Bearer m-key"))
            .respond_with(
                ResponseTemplate::new(401)
                    .set_body_json(json!({"message": "Unauthorized", "request_id": "abc"})),
            )
            .mount(&server)
            .await;

        let outcome = validate(&context_for(&server), "m-key").await.unwrap();
        assert_eq!(outcome.kind(), ResultType::Invalid);
        assert_eq!(outcome.message(), "Unauthorized");
    }

    #[tokio::test]
    async fn test_rate_limited() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(PATH))
            .respond_with(
                ResponseTemplate::new(429).set_body_json(json!({"message": "Requests rate limit exceeded"})),
            )
            .mount(&server)
            .await;

        let outcome = validate(&context_for(&server), "m-key").await.unwrap();
        assert_eq!(outcome.status(), 429);
        assert_eq!(outcome.kind(), ResultType::RateLimited);
        assert_eq!(outcome.message(), "Requests rate limit exceeded");
    }

    #[tokio::test]
    async fn test_valid() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(PATH))
            .and(body_json(json!({
                "model": "mistral-small-latest",
                "messages": [{"role": "user", "content": "Say hi"}],
                "max_tokens": 5,
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "model": "mistral-small-latest",
                "usage": {"prompt_tokens": 6, "completion_tokens": 5, "total_tokens": 11},
            })))
            .expect(1)
            .mount(&server)
            .await;

        let outcome = validate(&context_for(&server), "m-key").await.unwrap();
        assert!(outcome.success());
        assert_eq!(outcome.details().unwrap()["model"], "mistral-small-latest");
    }
}
