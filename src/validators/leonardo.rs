//! Leonardo.ai: account lookup (`/me`), no generation credits spent.

use futures::future::{BoxFuture, FutureExt};
use serde_json::json;

use super::*;

const PATH: &str = "/api/rest/v1/me";

pub fn validate<'a>(
    ctx: &'a ProbeContext,
    key: &'a str,
) -> BoxFuture<'a, Result<ProbeOutcome, ProbeError>> {
    probe(ctx, key).boxed()
}

async fn probe(ctx: &ProbeContext, key: &str) -> Result<ProbeOutcome, ProbeError> {
    let resp = ctx
        .client()
        .get(ctx.url(&ctx.endpoints().leonardo, PATH))
        .bearer_auth(key)
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
            message_from(&[&body["error"], &body["message"], &body]),
        ));
    }

    let info = present(&body["user_details"][0]).unwrap_or(&body);
    Ok(ProbeOutcome::valid(
        "API key is valid",
        details(json!({
            "username": or_default(&info["user"]["username"], "N/A"),
            "tokenRenewalDate": or_default(&info["tokenRenewalDate"], "N/A"),
            "apiConcurrencySlots": or_default(&info["apiConcurrencySlots"], "N/A"),
        })),
    ))
}
