//! fal.ai: submits a tiny 256x256 flux/schnell job to the queue.
//! Uses `Authorization: Key <key>` rather than bearer auth.

use futures::future::{BoxFuture, FutureExt};
use reqwest::header::AUTHORIZATION;
use serde_json::json;

use super::*;

const PATH: &str = "/fal-ai/flux/schnell";

pub fn validate<'a>(
    ctx: &'a ProbeContext,
    key: &'a str,
) -> BoxFuture<'a, Result<ProbeOutcome, ProbeError>> {
    probe(ctx, key).boxed()
}

async fn probe(ctx: &ProbeContext, key: &str) -> Result<ProbeOutcome, ProbeError> {
    let resp = ctx
        .client()
        .post(ctx.url(&ctx.endpoints().fal, PATH))
        .header(AUTHORIZATION, format!("Key {key}"))
        .json(&json!({
            "prompt": "test",
            "image_size": {"width": 256, "height": 256},
            "num_images": 1,
        }))
        .send()
        .await?;

    let status = resp.status();
    let body = read_json(resp).await?;

    if !status.is_success() {
        let code = status.as_u16();
        let kind = match code {
            401 => ResultType::Invalid,
            403 => ResultType::Forbidden,
            _ => ResultType::Error,
        };
        return Ok(ProbeOutcome::rejected(
            code,
            kind,
            message_from(&[&body["detail"], &body["message"], &body]),
        ));
    }

    Ok(ProbeOutcome::valid(
        "API key is valid - job submitted successfully",
        details(json!({
            "request_id": or_default(&body["request_id"], "Accepted"),
            "status": or_default(&body["status"], "IN_QUEUE"),
        })),
    ))
}
