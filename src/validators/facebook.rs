//! Facebook Graph: `/me` with the token as `access_token`.
//!
//! Graph reports failures in the body, so the HTTP status is not
//! consulted: any `error` member is a rejection, reported as 400.

use futures::future::{BoxFuture, FutureExt};
use serde_json::json;

use super::*;

const PATH: &str = "/v19.0/me";

/// OAuthException code for an expired or revoked session.
const EXPIRED_TOKEN_CODE: i64 = 190;

pub fn validate<'a>(
    ctx: &'a ProbeContext,
    key: &'a str,
) -> BoxFuture<'a, Result<ProbeOutcome, ProbeError>> {
    probe(ctx, key).boxed()
}

async fn probe(ctx: &ProbeContext, key: &str) -> Result<ProbeOutcome, ProbeError> {
    let resp = ctx
        .client()
        .get(ctx.url(&ctx.endpoints().facebook, PATH))
        .query(&[("access_token", key)])
        .send()
        .await?;

    let body = read_json(resp).await?;

    if let Some(error) = present(&body["error"]) {
        let kind = if error["code"].as_i64() == Some(EXPIRED_TOKEN_CODE) {
            ResultType::Expired
        } else {
            ResultType::Invalid
        };
        return Ok(ProbeOutcome::rejected(400, kind, message_from(&[&error["message"], error])));
    }

    Ok(ProbeOutcome::valid(
        "Access token is valid",
        details(json!({ "name": body["name"], "id": body["id"] })),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validators::testing::context_for;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn respond(status: u16, body: serde_json::Value) -> ProbeOutcome {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(PATH))
            .and(query_param("access_token", "EAAB"))
            .respond_with(ResponseTemplate::new(status).set_body_json(body))
            .expect(1)
            .mount(&server)
            .await;
        validate(&context_for(&server), "EAAB").await.unwrap()
    }

    #[tokio::test]
    async fn test_code_190_is_expired() {
        let outcome = respond(
            400,
            json!({"error": {"message": "Session has expired", "type": "OAuthException", "code": 190}}),
        )
        .await;
        assert_eq!(outcome.kind(), ResultType::Expired);
        assert_eq!(outcome.status(), 400);
        assert_eq!(outcome.message(), "Session has expired");
    }

    #[tokio::test]
    async fn test_other_codes_are_invalid() {
        let outcome = respond(
            403,
            json!({"error": {"message": "Invalid OAuth access token", "code": 2500}}),
        )
        .await;
        assert_eq!(outcome.kind(), ResultType::Invalid);
        assert_eq!(outcome.status(), 400);
    }

    #[tokio::test]
    async fn test_valid() {
        let outcome = respond(200, json!({"name": "Ada Lovelace", "id": "10001"})).await;
        assert!(outcome.success());
        assert_eq!(outcome.message(), "Access token is valid");
        assert_eq!(outcome.details().unwrap()["name"], "Ada Lovelace");
    }
}
