//! DeepSeek: OpenAI-compatible API.

use futures::future::{BoxFuture, FutureExt};
use serde_json::json;

use super::*;

const PATH: &str = "/chat/completions";

pub fn validate<'a>(
    ctx: &'a ProbeContext,
    key: &'a str,
) -> BoxFuture<'a, Result<ProbeOutcome, ProbeError>> {
    probe(ctx, key).boxed()
}

async fn probe(ctx: &ProbeContext, key: &str) -> Result<ProbeOutcome, ProbeError> {
    let resp = ctx
        .client()
        .post(ctx.url(&ctx.endpoints().deepseek, PATH))
        .bearer_auth(key)
        .json(&json!({
            "model": "deepseek-chat",
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
        let msg = message_from(&[&body["error"]["message"], &body["message"], &body]);
        return Ok(ProbeOutcome::rejected(code, kind, msg));
    }

    Ok(ProbeOutcome::valid(
        "API key is valid",
        details(json!({ "model": body["model"], "usage": body["usage"] })),
    ))
}
