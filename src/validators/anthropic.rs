//! Anthropic Claude: 5-token message on the cheapest model.

use futures::future::{BoxFuture, FutureExt};
use serde_json::json;

use super::*;

const PATH: &str = "/v1/messages";
const API_VERSION: &str = "2023-06-01";

pub fn validate<'a>(
    ctx: &'a ProbeContext,
    key: &'a str,
) -> BoxFuture<'a, Result<ProbeOutcome, ProbeError>> {
    probe(ctx, key).boxed()
}

async fn probe(ctx: &ProbeContext, key: &str) -> Result<ProbeOutcome, ProbeError> {
    let resp = ctx
        .client()
        .post(ctx.url(&ctx.endpoints().anthropic, PATH))
        .header("x-api-key", key)
        .header("anthropic-version", API_VERSION)
        .json(&json!({
            "model": "claude-3-5-haiku-20241022",
            "max_tokens": 5,
            "messages": say_hi(),
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
        let msg = message_from(&[&body["error"]["message"], &body["error"], &body]);
        return Ok(ProbeOutcome::rejected(code, kind, msg));
    }

    Ok(ProbeOutcome::valid(
        "API key is valid",
        details(json!({ "model": body["model"], "usage": body["usage"] })),
    ))
}
