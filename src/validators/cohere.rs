//! Cohere: v2 chat.

use futures::future::{BoxFuture, FutureExt};
use serde_json::json;

use super::*;

const PATH: &str = "/v2/chat";
const MODEL: &str = "command-r";

pub fn validate<'a>(
    ctx: &'a ProbeContext,
    key: &'a str,
) -> BoxFuture<'a, Result<ProbeOutcome, ProbeError>> {
    probe(ctx, key).boxed()
}

async fn probe(ctx: &ProbeContext, key: &str) -> Result<ProbeOutcome, ProbeError> {
    let resp = ctx
        .client()
        .post(ctx.url(&ctx.endpoints().cohere, PATH))
        .bearer_auth(key)
        .json(&json!({
            "model": MODEL,
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
        return Ok(ProbeOutcome::rejected(code, kind, message_from(&[&body["message"], &body])));
    }

    // v2 chat does not always echo the model back.
    Ok(ProbeOutcome::valid(
        "API key is valid",
        details(json!({ "model": or_default(&body["model"], MODEL) })),
    ))
}
