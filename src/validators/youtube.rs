//! YouTube Data API v3: one most-popular video. Costs one quota unit.

use futures::future::{BoxFuture, FutureExt};
use serde_json::json;

use super::*;

const PATH: &str = "/youtube/v3/videos";

pub fn validate<'a>(
    ctx: &'a ProbeContext,
    key: &'a str,
) -> BoxFuture<'a, Result<ProbeOutcome, ProbeError>> {
    probe(ctx, key).boxed()
}

async fn probe(ctx: &ProbeContext, key: &str) -> Result<ProbeOutcome, ProbeError> {
    let resp = ctx
        .client()
        .get(ctx.url(&ctx.endpoints().youtube, PATH))
        .query(&[
            ("part", "snippet"),
            ("chart", "mostPopular"),
            ("maxResults", "1"),
            ("key", key),
        ])
        .send()
        .await?;

    let status = resp.status();
    let body = read_json(resp).await?;

    if !status.is_success() {
        let code = status.as_u16();
        let kind = match code {
            400 => ResultType::Invalid,
            403 => ResultType::QuotaExceeded,
            _ => ResultType::Error,
        };
        let msg = message_from(&[&body["error"]["message"], &body["error"], &body]);
        return Ok(ProbeOutcome::rejected(code, kind, msg));
    }

    Ok(ProbeOutcome::valid(
        "API key is valid",
        details(json!({
            "totalResults": or_default(&body["pageInfo"]["totalResults"], 0),
            "sampleVideo": or_default(&body["items"][0]["snippet"]["title"], "N/A"),
        })),
    ))
}
