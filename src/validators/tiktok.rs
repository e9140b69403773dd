//! TikTok: v2 user info.
//!
//! TikTok wraps every response in an `error` object whose `code` is `"ok"`
//! on success, so only other codes count as a rejection.

use futures::future::{BoxFuture, FutureExt};
use serde_json::{json, Value};

use super::*;

const PATH: &str = "/v2/user/info/";
const FIELDS: &str = "display_name,avatar_url";

pub fn validate<'a>(
    ctx: &'a ProbeContext,
    key: &'a str,
) -> BoxFuture<'a, Result<ProbeOutcome, ProbeError>> {
    probe(ctx, key).boxed()
}

async fn probe(ctx: &ProbeContext, key: &str) -> Result<ProbeOutcome, ProbeError> {
    // Comma kept literal in the query string.
    let url = format!("{}?fields={}", ctx.url(&ctx.endpoints().tiktok, PATH), FIELDS);
    let resp = ctx.client().get(url).bearer_auth(key).send().await?;

    let status = resp.status();
    let body = read_json(resp).await?;

    if !status.is_success() || is_error_code(&body["error"]["code"]) {
        return Ok(ProbeOutcome::rejected(
            status.as_u16(),
            ResultType::Invalid,
            message_from(&[&body["error"]["message"], &body]),
        ));
    }

    Ok(ProbeOutcome::valid(
        "Access token is valid",
        details(json!({
            "display_name": or_default(&body["data"]["user"]["display_name"], "N/A"),
        })),
    ))
}

// "ok" is TikTok's success code; it must not be read as a rejection.
fn is_error_code(code: &Value) -> bool {
    match present(code) {
        Some(Value::String(s)) => s != "ok",
        Some(_) => true,
        None => false,
    }
}
