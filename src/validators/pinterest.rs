//! Pinterest: v5 user account.

use futures::future::{BoxFuture, FutureExt};
use serde_json::json;

use super::*;

const PATH: &str = "/v5/user_account";

pub fn validate<'a>(
    ctx: &'a ProbeContext,
    key: &'a str,
) -> BoxFuture<'a, Result<ProbeOutcome, ProbeError>> {
    probe(ctx, key).boxed()
}

async fn probe(ctx: &ProbeContext, key: &str) -> Result<ProbeOutcome, ProbeError> {
    let resp = ctx
        .client()
        .get(ctx.url(&ctx.endpoints().pinterest, PATH))
        .bearer_auth(key)
        .send()
        .await?;

    let status = resp.status();
    let body = read_json(resp).await?;

    if !status.is_success() {
        return Ok(ProbeOutcome::rejected(
            status.as_u16(),
            ResultType::Invalid,
            message_from(&[&body["message"], &body]),
        ));
    }

    Ok(ProbeOutcome::valid(
        "Access token is valid",
        details(json!({
            "username": body["username"],
            "account_type": body["account_type"],
        })),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validators::testing::context_for;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_valid() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "username": "pinner",
                "account_type": "BUSINESS",
            })))
            .mount(&server)
            .await;

        let outcome = validate(&context_for(&server), "pina_x").await.unwrap();
        let details = outcome.details().unwrap();
        assert_eq!(details["username"], "pinner");
        assert_eq!(details["account_type"], "BUSINESS");
    }

    #[tokio::test]
    async fn test_rate_limit_still_reported_invalid() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(PATH))
            .respond_with(ResponseTemplate::new(429).set_body_json(json!({"code": 8, "message": "Rate limit exceeded"})))
            .mount(&server)
            .await;

        let outcome = validate(&context_for(&server), "pina_x").await.unwrap();
        assert_eq!(outcome.kind(), ResultType::Invalid);
        assert_eq!(outcome.status(), 429);
        assert_eq!(outcome.message(), "Rate limit exceeded");
    }
}
