//! Baidu Translate (general text translation API)

use rand::Rng;
use serde_json::Value;
use tracing::debug;

use super::{signing, TranslateRequest, VendorError};
use crate::config::BaiduCredentials;
use crate::http::{HttpClient, HttpRequest, HttpResponse};
use crate::models::{language, Vendor};

pub const ENDPOINT: &str = "https://fanyi-api.baidu.com/api/trans/vip/translate";

/// Return `(app_id, secret_key)` or the list of missing fields
pub fn resolve_credentials(creds: &BaiduCredentials) -> Result<(String, String), VendorError> {
    let app_id = creds.app_id.trim();
    let secret = creds.secret_key.trim();

    let mut missing = Vec::new();
    if app_id.is_empty() {
        missing.push("app_id");
    }
    if secret.is_empty() {
        missing.push("secret_key");
    }
    if !missing.is_empty() {
        return Err(VendorError::incomplete(Vendor::Baidu, &missing));
    }

    Ok((app_id.to_string(), secret.to_string()))
}

/// `md5(appid + q + salt + secret)`
pub fn sign(app_id: &str, text: &str, salt: &str, secret: &str) -> String {
    signing::md5_hex(&format!("{app_id}{text}{salt}{secret}"))
}

pub fn build_request(
    app_id: &str,
    secret: &str,
    request: &TranslateRequest<'_>,
    salt: &str,
) -> HttpRequest {
    let from = language::vendor_code(Vendor::Baidu, request.source_language);
    let to = language::vendor_code(Vendor::Baidu, request.target_language);

    HttpRequest::get(ENDPOINT)
        .query("q", request.text)
        .query("from", from)
        .query("to", to)
        .query("appid", app_id)
        .query("salt", salt)
        .query("sign", sign(app_id, request.text, salt, secret))
}

/// Readable message for a Baidu `error_code`
pub fn error_message(code: &str) -> String {
    let message = match code {
        "52001" => "request timed out",
        "52002" => "system error",
        "52003" => "unauthorized user (check APP ID)",
        "54000" => "required parameter is empty",
        "54001" => "signature error",
        "54003" => "access frequency limited",
        "54004" => "insufficient account balance",
        "54005" => "long query requests too frequent",
        "58000" => "client IP not allowed",
        "58001" => "translation direction not supported",
        "58002" => "service is currently closed",
        "90107" => "certification not passed or not in effect",
        _ => return format!("unknown error code {code}"),
    };
    message.to_string()
}

/// Extract the translation, joining one `dst` per source line
pub fn parse_response(response: &HttpResponse) -> Result<String, VendorError> {
    if !response.is_success() {
        return Err(VendorError::Http(response.status_code));
    }

    let value: Value =
        serde_json::from_str(&response.body).map_err(|e| VendorError::Decode(e.to_string()))?;

    if let Some(code) = value.get("error_code") {
        let code = match code {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        // 52000 is Baidu's success code
        if code != "52000" {
            return Err(VendorError::Api {
                message: error_message(&code),
                code,
            });
        }
    }

    let lines: Vec<&str> = value
        .get("trans_result")
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(|i| i["dst"].as_str()).collect())
        .unwrap_or_default();

    if lines.is_empty() {
        return Err(VendorError::UnexpectedResponse);
    }

    Ok(lines.join("\n"))
}

pub async fn translate(
    client: &HttpClient,
    creds: &BaiduCredentials,
    request: &TranslateRequest<'_>,
) -> Result<String, VendorError> {
    let (app_id, secret) = resolve_credentials(creds)?;
    let salt = rand::rng().random_range(32768..65536u32).to_string();

    debug!("Baidu request with salt {}", salt);
    let response = client
        .send(build_request(&app_id, &secret, request, &salt))
        .await
        .map_err(VendorError::from_transport)?;

    parse_response(&response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn response(status_code: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status_code,
            headers: BTreeMap::new(),
            body: body.to_string(),
            duration_ms: 1,
        }
    }

    #[test]
    fn test_sign_matches_documented_example() {
        // Example from the Baidu Translate API documentation
        assert_eq!(
            sign("2015063000000001", "apple", "1435660288", "12345678"),
            "f89f9594663708c1605f3d736d01d2d4"
        );
    }

    #[test]
    fn test_build_request_maps_languages() {
        let request = TranslateRequest::new("Hello", "en", "zh-tw");
        let http = build_request("appid", "secret", &request, "12345");
        let url = http.full_url().unwrap();
        let pairs: BTreeMap<String, String> = url.query_pairs().into_owned().collect();

        assert_eq!(pairs["from"], "en");
        assert_eq!(pairs["to"], "cht");
        assert_eq!(pairs["salt"], "12345");
        assert_eq!(pairs["sign"], sign("appid", "Hello", "12345", "secret"));
    }

    #[test]
    fn test_missing_credentials() {
        let creds = BaiduCredentials {
            enabled: true,
            app_id: "  ".to_string(),
            secret_key: String::new(),
        };
        let err = resolve_credentials(&creds).unwrap_err();
        assert!(err.to_string().contains("configuration incomplete"));
        assert!(err.to_string().contains("app_id, secret_key"));
    }

    #[test]
    fn test_parse_success_multi_line() {
        let body = r#"{"from":"en","to":"zh","trans_result":[{"src":"Hello","dst":"你好"},{"src":"World","dst":"世界"}]}"#;
        assert_eq!(parse_response(&response(200, body)).unwrap(), "你好\n世界");
    }

    #[test]
    fn test_parse_error_code() {
        let body = r#"{"error_code":"54001","error_msg":"Invalid Sign"}"#;
        let err = parse_response(&response(200, body)).unwrap_err();
        assert_eq!(
            err,
            VendorError::Api {
                code: "54001".to_string(),
                message: "signature error".to_string()
            }
        );
    }

    #[test]
    fn test_parse_numeric_unknown_error_code() {
        let body = r#"{"error_code":12345}"#;
        let err = parse_response(&response(200, body)).unwrap_err();
        assert_eq!(err.to_string(), "12345: unknown error code 12345");
    }

    #[test]
    fn test_parse_http_and_decode_errors() {
        assert_eq!(
            parse_response(&response(502, "")).unwrap_err(),
            VendorError::Http(502)
        );
        assert!(matches!(
            parse_response(&response(200, "<html>")).unwrap_err(),
            VendorError::Decode(_)
        ));
        assert_eq!(
            parse_response(&response(200, "{}")).unwrap_err(),
            VendorError::UnexpectedResponse
        );
    }
}
