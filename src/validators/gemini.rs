//! Google Gemini: generateContent with a 5-token cap. The key travels
//! as the `key` query parameter.

use futures::future::{BoxFuture, FutureExt};
use serde_json::json;

use super::*;

const MODEL: &str = "gemini-2.0-flash";
const PATH: &str = "/v1beta/models/gemini-2.0-flash:generateContent";

pub fn validate<'a>(
    ctx: &'a ProbeContext,
    key: &'a str,
) -> BoxFuture<'a, Result<ProbeOutcome, ProbeError>> {
    probe(ctx, key).boxed()
}

async fn probe(ctx: &ProbeContext, key: &str) -> Result<ProbeOutcome, ProbeError> {
    let resp = ctx
        .client()
        .post(ctx.url(&ctx.endpoints().gemini, PATH))
        .query(&[("key", key)])
        .json(&json!({
            "contents": [{"parts": [{"text": "Say hi"}]}],
            "generationConfig": {"maxOutputTokens": 5},
        }))
        .send()
        .await?;

    let status = resp.status();
    let body = read_json(resp).await?;

    if !status.is_success() {
        let code = status.as_u16();
        // Google answers a malformed/unknown key with 400, and a key whose
        // project lacks the Generative Language API with 403.
        let kind = match code {
            400 => ResultType::Invalid,
            429 => ResultType::RateLimited,
            403 => ResultType::ApiDisabled,
            _ => ResultType::Error,
        };
        let msg = message_from(&[&body["error"]["message"], &body["error"], &body]);
        return Ok(ProbeOutcome::rejected(code, kind, msg));
    }

    let candidates = body["candidates"].as_array().map_or(0, Vec::len);
    Ok(ProbeOutcome::valid(
        "API key is valid",
        details(json!({ "model": MODEL, "candidates": candidates })),
    ))
}
