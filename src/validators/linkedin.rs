//! LinkedIn: OpenID Connect `userinfo`.

use futures::future::{BoxFuture, FutureExt};
use serde_json::{json, Value};

use super::*;

const PATH: &str = "/v2/userinfo";

pub fn validate<'a>(
    ctx: &'a ProbeContext,
    key: &'a str,
) -> BoxFuture<'a, Result<ProbeOutcome, ProbeError>> {
    probe(ctx, key).boxed()
}

async fn probe(ctx: &ProbeContext, key: &str) -> Result<ProbeOutcome, ProbeError> {
    let resp = ctx
        .client()
        .get(ctx.url(&ctx.endpoints().linkedin, PATH))
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
        details(json!({ "name": display_name(&body), "email": body["email"] })),
    ))
}

/// `name`, else "given family" from whichever parts exist.
fn display_name(body: &Value) -> Value {
    if let Some(name) = present(&body["name"]) {
        return name.clone();
    }
    let parts: Vec<&str> = ["given_name", "family_name"]
        .iter()
        .filter_map(|field| body[*field].as_str())
        .filter(|s| !s.is_empty())
        .collect();
    if parts.is_empty() {
        Value::Null
    } else {
        Value::String(parts.join(" "))
    }
}
