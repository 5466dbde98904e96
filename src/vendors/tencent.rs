//! Tencent Cloud Machine Translation (TMT `TextTranslate`)
//!
//! Requests are signed with TC3-HMAC-SHA256:
//!
//! 1. canonical request over `content-type`, `host` and `x-tc-action`
//! 2. string to sign with the `date/service/tc3_request` scope
//! 3. key chain `TC3<secret>` -> date -> service -> `tc3_request`

use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::{DateTime, Utc};
use serde_json::{json, Value};

use super::{signing, TranslateRequest, VendorError};
use crate::config::TencentCredentials;
use crate::http::{HttpClient, HttpRequest, HttpResponse};
use crate::models::{language, Vendor};

pub const HOST: &str = "tmt.tencentcloudapi.com";
pub const SERVICE: &str = "tmt";
pub const VERSION: &str = "2018-03-21";
pub const ACTION: &str = "TextTranslate";
pub const REGION: &str = "ap-beijing";
pub const ALGORITHM: &str = "TC3-HMAC-SHA256";
const CONTENT_TYPE: &str = "application/json; charset=utf-8";
const SIGNED_HEADERS: &str = "content-type;host;x-tc-action";

/// Placeholder id shipped in sample configs
const PLACEHOLDER_ID: &str = "test_id";

/// Return `(secret_id, secret_key)`.
///
/// Accepts a combined `id|key` in `secret_id` and base64-wrapped values.
pub fn resolve_credentials(creds: &TencentCredentials) -> Result<(String, String), VendorError> {
    let mut secret_id = creds.secret_id.trim().to_string();
    let mut secret_key = creds.secret_key.trim().to_string();

    if let Some((id, key)) = secret_id.split_once('|') {
        let (id, key) = (id.trim().to_string(), key.trim().to_string());
        secret_id = id;
        secret_key = key;
    }

    let secret_id = decode_if_base64(&secret_id);
    let secret_key = decode_if_base64(&secret_key);

    let mut missing = Vec::new();
    if secret_id.is_empty() || secret_id == PLACEHOLDER_ID {
        missing.push("secret_id");
    }
    if secret_key.is_empty() {
        missing.push("secret_key");
    }
    if !missing.is_empty() {
        return Err(VendorError::incomplete(Vendor::Tencent, &missing));
    }

    Ok((secret_id, secret_key))
}

/// Decode `value` when it is base64 of a printable ASCII string
fn decode_if_base64(value: &str) -> String {
    STANDARD
        .decode(value)
        .ok()
        .and_then(|bytes| String::from_utf8(bytes).ok())
        .filter(|decoded| !decoded.is_empty() && decoded.chars().all(|c| c.is_ascii_graphic()))
        .unwrap_or_else(|| value.to_string())
}

/// JSON body of a `TextTranslate` call
pub fn build_payload(request: &TranslateRequest<'_>) -> String {
    json!({
        "SourceText": request.text,
        "Source": language::vendor_code(Vendor::Tencent, request.source_language),
        "Target": language::vendor_code(Vendor::Tencent, request.target_language),
        "ProjectId": 0,
    })
    .to_string()
}

/// `Authorization` header value for `payload` signed at `now`
pub fn authorization(secret_id: &str, secret_key: &str, payload: &str, now: DateTime<Utc>) -> String {
    let timestamp = now.timestamp();
    let date = now.format("%Y-%m-%d").to_string();

    let canonical_headers = format!(
        "content-type:{CONTENT_TYPE}\nhost:{HOST}\nx-tc-action:{}\n",
        ACTION.to_lowercase()
    );
    let canonical_request = format!(
        "POST\n/\n\n{canonical_headers}\n{SIGNED_HEADERS}\n{}",
        signing::sha256_hex(payload.as_bytes())
    );

    let credential_scope = format!("{date}/{SERVICE}/tc3_request");
    let string_to_sign = format!(
        "{ALGORITHM}\n{timestamp}\n{credential_scope}\n{}",
        signing::sha256_hex(canonical_request.as_bytes())
    );

    let secret_date = signing::hmac_sha256(format!("TC3{secret_key}").as_bytes(), date.as_bytes());
    let secret_service = signing::hmac_sha256(&secret_date, SERVICE.as_bytes());
    let secret_signing = signing::hmac_sha256(&secret_service, b"tc3_request");
    let signature = hex::encode(signing::hmac_sha256(
        &secret_signing,
        string_to_sign.as_bytes(),
    ));

    format!(
        "{ALGORITHM} Credential={secret_id}/{credential_scope}, SignedHeaders={SIGNED_HEADERS}, Signature={signature}"
    )
}

pub fn build_request(
    secret_id: &str,
    secret_key: &str,
    request: &TranslateRequest<'_>,
) -> HttpRequest {
    let payload = build_payload(request);

    HttpRequest::post(format!("https://{HOST}/"))
        .header(
            "Authorization",
            authorization(secret_id, secret_key, &payload, request.now),
        )
        .header("Content-Type", CONTENT_TYPE)
        .header("Host", HOST)
        .header("X-TC-Action", ACTION)
        .header("X-TC-Timestamp", request.now.timestamp().to_string())
        .header("X-TC-Version", VERSION)
        .header("X-TC-Region", REGION)
        .body(payload)
}

pub fn parse_response(response: &HttpResponse) -> Result<String, VendorError> {
    let value: Value = match serde_json::from_str(&response.body) {
        Ok(v) => v,
        Err(_) if !response.is_success() => return Err(VendorError::Http(response.status_code)),
        Err(e) => return Err(VendorError::Decode(e.to_string())),
    };

    let body = value.get("Response").ok_or(if response.is_success() {
        VendorError::UnexpectedResponse
    } else {
        VendorError::Http(response.status_code)
    })?;

    if let Some(error) = body.get("Error") {
        return Err(VendorError::Api {
            code: error["Code"].as_str().unwrap_or("Unknown").to_string(),
            message: error["Message"].as_str().unwrap_or("unknown error").to_string(),
        });
    }

    if !response.is_success() {
        return Err(VendorError::Http(response.status_code));
    }

    body.get("TargetText")
        .and_then(Value::as_str)
        .map(|s| s.to_string())
        .ok_or(VendorError::UnexpectedResponse)
}

pub async fn translate(
    client: &HttpClient,
    creds: &TencentCredentials,
    request: &TranslateRequest<'_>,
) -> Result<String, VendorError> {
    let (secret_id, secret_key) = resolve_credentials(creds)?;

    let response = client
        .send(build_request(&secret_id, &secret_key, request))
        .await
        .map_err(VendorError::from_transport)?;

    parse_response(&response)
}
