//! Stripe: balance lookup. Works for secret and restricted keys with
//! balance read access.

use futures::future::{BoxFuture, FutureExt};
use serde_json::{json, Value};

use super::*;

const PATH: &str = "/v1/balance";

pub fn validate<'a>(
    ctx: &'a ProbeContext,
    key: &'a str,
) -> BoxFuture<'a, Result<ProbeOutcome, ProbeError>> {
    probe(ctx, key).boxed()
}

async fn probe(ctx: &ProbeContext, key: &str) -> Result<ProbeOutcome, ProbeError> {
    let resp = ctx
        .client()
        .get(ctx.url(&ctx.endpoints().stripe, PATH))
        .bearer_auth(key)
        .send()
        .await?;

    let status = resp.status();
    let body = read_json(resp).await?;

    if !status.is_success() {
        let msg = message_from(&[&body["error"]["message"], &body["error"], &body]);
        return Ok(ProbeOutcome::rejected(status.as_u16(), ResultType::Invalid, msg));
    }

    let test_mode = is_test_key(key);
    let (mode, label) = if test_mode { ("test", "Test Mode") } else { ("live", "Live Mode") };
    Ok(ProbeOutcome::valid(
        format!("API key is valid ({label})"),
        details(json!({
            "mode": mode,
            "livemode": body["livemode"],
            "balance": format_balance(&body["available"]),
        })),
    ))
}

fn is_test_key(key: &str) -> bool {
    key.starts_with("sk_test_") || key.starts_with("rk_test_")
}

/// `"12.34 USD, 5.00 EUR"` from the minor-unit amounts, or `"0.00"`.
fn format_balance(available: &Value) -> String {
    let entries: Vec<String> = available
        .as_array()
        .map(|funds| {
            funds
                .iter()
                .map(|b| {
                    let amount = b["amount"].as_f64().unwrap_or(0.0) / 100.0;
                    let currency = b["currency"].as_str().unwrap_or_default().to_uppercase();
                    format!("{amount:.2} {currency}")
                })
                .collect()
        })
        .unwrap_or_default();

    if entries.is_empty() {
        "0.00".to_string()
    } else {
        entries.join(", ")
    }
}
