//! Volcano Engine machine translation (`TranslateText`, version 2020-06-01)

use chrono::{DateTime, Utc};
use serde_json::{json, Map, Value};

use super::{signing, TranslateRequest, VendorError};
use crate::config::VolcanoCredentials;
use crate::http::{HttpClient, HttpRequest, HttpResponse};
use crate::models::{language, Vendor};

pub const HOST: &str = "translate.volcengineapi.com";
pub const ACTION: &str = "TranslateText";
pub const VERSION: &str = "2020-06-01";
pub const REGION: &str = "cn-north-1";
pub const SERVICE: &str = "translate";
const ALGORITHM: &str = "HMAC-SHA256";
const CONTENT_TYPE: &str = "application/json";
const SIGNED_HEADERS: &str = "content-type;host;x-content-sha256;x-date";

/// Return `(access_key, secret_key)`.
///
/// Falls back to an `ak:sk` pair in `api_key` when the split fields are empty.
pub fn resolve_credentials(creds: &VolcanoCredentials) -> Result<(String, String), VendorError> {
    let access_key = creds.access_key.trim();
    let secret_key = creds.secret_key.trim();
    if !access_key.is_empty() && !secret_key.is_empty() {
        return Ok((access_key.to_string(), secret_key.to_string()));
    }

    if let Some((ak, sk)) = creds.api_key.trim().split_once(':') {
        let (ak, sk) = (ak.trim(), sk.trim());
        if !ak.is_empty() && !sk.is_empty() {
            return Ok((ak.to_string(), sk.to_string()));
        }
    }

    let mut missing = Vec::new();
    if access_key.is_empty() {
        missing.push("access_key");
    }
    if secret_key.is_empty() {
        missing.push("secret_key");
    }
    Err(VendorError::incomplete(Vendor::Volcano, &missing))
}

/// JSON body; an `auto` source is left out so the service detects it
pub fn build_payload(request: &TranslateRequest<'_>) -> String {
    let mut body = Map::new();
    let source = language::vendor_code(Vendor::Volcano, request.source_language);
    if source != "auto" {
        body.insert("SourceLanguage".to_string(), json!(source));
    }
    body.insert(
        "TargetLanguage".to_string(),
        json!(language::vendor_code(Vendor::Volcano, request.target_language)),
    );
    body.insert("TextList".to_string(), json!([request.text]));
    Value::Object(body).to_string()
}

/// Hex signature over the canonical request
pub fn signature(secret_key: &str, x_date: &str, body_hash: &str) -> String {
    let short_date = &x_date[..8];

    let canonical_request = format!(
        "POST\n/\nAction={ACTION}&Version={VERSION}\n\
         content-type:{CONTENT_TYPE}\nhost:{HOST}\nx-content-sha256:{body_hash}\nx-date:{x_date}\n\n\
         {SIGNED_HEADERS}\n{body_hash}"
    );

    let scope = credential_scope(short_date);
    let string_to_sign = format!(
        "{ALGORITHM}\n{x_date}\n{scope}\n{}",
        signing::sha256_hex(canonical_request.as_bytes())
    );

    let k_date = signing::hmac_sha256(secret_key.as_bytes(), short_date.as_bytes());
    let k_region = signing::hmac_sha256(&k_date, REGION.as_bytes());
    let k_service = signing::hmac_sha256(&k_region, SERVICE.as_bytes());
    let k_signing = signing::hmac_sha256(&k_service, b"request");

    hex::encode(signing::hmac_sha256(&k_signing, string_to_sign.as_bytes()))
}

fn credential_scope(short_date: &str) -> String {
    format!("{short_date}/{REGION}/{SERVICE}/request")
}

fn x_date(now: DateTime<Utc>) -> String {
    now.format("%Y%m%dT%H%M%SZ").to_string()
}

pub fn build_request(
    access_key: &str,
    secret_key: &str,
    request: &TranslateRequest<'_>,
) -> HttpRequest {
    let payload = build_payload(request);
    let body_hash = signing::sha256_hex(payload.as_bytes());
    let x_date = x_date(request.now);
    let signature = signature(secret_key, &x_date, &body_hash);

    let authorization = format!(
        "{ALGORITHM} Credential={access_key}/{}, SignedHeaders={SIGNED_HEADERS}, Signature={signature}",
        credential_scope(&x_date[..8])
    );

    HttpRequest::post(format!("https://{HOST}/"))
        .query("Action", ACTION)
        .query("Version", VERSION)
        .header("Authorization", authorization)
        .header("Content-Type", CONTENT_TYPE)
        .header("Host", HOST)
        .header("X-Date", x_date)
        .header("X-Content-Sha256", body_hash)
        .body(payload)
}

pub fn parse_response(response: &HttpResponse) -> Result<String, VendorError> {
    let value: Value = match serde_json::from_str(&response.body) {
        Ok(v) => v,
        Err(_) if !response.is_success() => return Err(VendorError::Http(response.status_code)),
        Err(e) => return Err(VendorError::Decode(e.to_string())),
    };

    if let Some(error) = value
        .get("ResponseMetadata")
        .and_then(|meta| meta.get("Error"))
    {
        return Err(VendorError::Api {
            code: error["Code"].as_str().unwrap_or("Unknown").to_string(),
            message: error["Message"].as_str().unwrap_or("unknown error").to_string(),
        });
    }

    if !response.is_success() {
        return Err(VendorError::Http(response.status_code));
    }

    value
        .get("TranslationList")
        .and_then(Value::as_array)
        .and_then(|list| list.first())
        .and_then(|item| item["Translation"].as_str())
        .map(|s| s.to_string())
        .ok_or(VendorError::UnexpectedResponse)
}

pub async fn translate(
    client: &HttpClient,
    creds: &VolcanoCredentials,
    request: &TranslateRequest<'_>,
) -> Result<String, VendorError> {
    let (access_key, secret_key) = resolve_credentials(creds)?;

    let response = client
        .send(build_request(&access_key, &secret_key, request))
        .await
        .map_err(VendorError::from_transport)?;

    parse_response(&response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::collections::BTreeMap;

    fn response(status_code: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status_code,
            headers: BTreeMap::new(),
            body: body.to_string(),
            duration_ms: 1,
        }
    }

    fn fixed_request(source: &'static str) -> TranslateRequest<'static> {
        TranslateRequest {
            text: "Hello",
            source_language: source,
            target_language: "zh-cn",
            now: Utc.timestamp_opt(1_700_000_000, 0).unwrap(),
        }
    }

    #[test]
    fn test_payload_omits_auto_source() {
        assert_eq!(
            build_payload(&fixed_request("en")),
            r#"{"SourceLanguage":"en","TargetLanguage":"zh","TextList":["Hello"]}"#
        );
        assert_eq!(
            build_payload(&fixed_request("auto")),
            r#"{"TargetLanguage":"zh","TextList":["Hello"]}"#
        );
    }

    #[test]
    fn test_signed_request() {
        let http = build_request("AKLTtest", "c2VjcmV0", &fixed_request("en"));

        assert_eq!(http.headers["X-Date"], "20231114T221320Z");
        assert_eq!(
            http.headers["X-Content-Sha256"],
            "b08c28e1bfa5ee67ee37f6a8f29ea7356c93e41ff27843099eae02d63e9ed131"
        );
        assert_eq!(
            http.headers["Authorization"],
            "HMAC-SHA256 Credential=AKLTtest/20231114/cn-north-1/translate/request, \
             SignedHeaders=content-type;host;x-content-sha256;x-date, \
             Signature=4459bb0b78e1951dff2344461f9f570658faf1707a4ef72e9849a259fdd5de40"
        );
        assert_eq!(
            http.full_url().unwrap().as_str(),
            "https://translate.volcengineapi.com/?Action=TranslateText&Version=2020-06-01"
        );
    }

    #[test]
    fn test_api_key_pair_fallback() {
        let creds = VolcanoCredentials {
            enabled: true,
            access_key: String::new(),
            secret_key: String::new(),
            api_key: "AKLTpair:secretpair".to_string(),
        };
        let (ak, sk) = resolve_credentials(&creds).unwrap();
        assert_eq!(ak, "AKLTpair");
        assert_eq!(sk, "secretpair");
    }

    #[test]
    fn test_missing_credentials() {
        let creds = VolcanoCredentials {
            enabled: true,
            access_key: "AKLTonly".to_string(),
            secret_key: String::new(),
            api_key: "no-separator".to_string(),
        };
        let err = resolve_credentials(&creds).unwrap_err();
        assert_eq!(
            err,
            VendorError::IncompleteConfig {
                vendor: Vendor::Volcano,
                missing: "secret_key".to_string()
            }
        );
    }

    #[test]
    fn test_parse_success() {
        let body = r#"{"TranslationList":[{"Translation":"你好","DetectedSourceLanguage":"en"}],"ResponseMetadata":{"RequestId":"x"}}"#;
        assert_eq!(parse_response(&response(200, body)).unwrap(), "你好");
    }

    #[test]
    fn test_parse_metadata_error() {
        let body = r#"{"ResponseMetadata":{"RequestId":"x","Error":{"Code":"SignatureDoesNotMatch","Message":"signature mismatch"}}}"#;
        let err = parse_response(&response(401, body)).unwrap_err();
        assert_eq!(err.to_string(), "SignatureDoesNotMatch: signature mismatch");
    }

    #[test]
    fn test_parse_empty_list() {
        let body = r#"{"TranslationList":[],"ResponseMetadata":{}}"#;
        assert_eq!(
            parse_response(&response(200, body)).unwrap_err(),
            VendorError::UnexpectedResponse
        );
    }
}
