//! Language code handling
//!
//! The CLI speaks one set of codes; each vendor expects its own.

use super::Vendor;

/// Language codes accepted on the command line and in config files
pub const SUPPORTED_LANGUAGES: &[(&str, &str)] = &[
    ("auto", "Auto detect"),
    ("en", "English"),
    ("zh", "Chinese"),
    ("zh-cn", "Chinese (Simplified)"),
    ("zh-tw", "Chinese (Traditional)"),
    ("ja", "Japanese"),
    ("ko", "Korean"),
    ("fr", "French"),
    ("de", "German"),
    ("es", "Spanish"),
    ("ru", "Russian"),
    ("it", "Italian"),
    ("pt", "Portuguese"),
];

/// Lowercase and unify separators (`zh_CN` -> `zh-cn`)
pub fn normalize(code: &str) -> String {
    code.trim().to_lowercase().replace('_', "-")
}

pub fn is_supported(code: &str) -> bool {
    let code = normalize(code);
    SUPPORTED_LANGUAGES.iter().any(|(c, _)| *c == code)
}

/// English name of a supported code
pub fn display_name(code: &str) -> Option<&'static str> {
    let code = normalize(code);
    SUPPORTED_LANGUAGES
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, name)| *name)
}

/// True when both codes name the same language (`zh` and `zh-cn` included)
pub fn same_language(a: &str, b: &str) -> bool {
    fn canonical(code: &str) -> String {
        match normalize(code).as_str() {
            "zh" => "zh-cn".to_string(),
            other => other.to_string(),
        }
    }
    canonical(a) == canonical(b)
}

/// Map a canonical code to the vendor's own code. Unknown codes become `auto`.
pub fn vendor_code(vendor: Vendor, code: &str) -> &'static str {
    let code = normalize(code);
    if !is_supported(&code) {
        return "auto";
    }

    match (vendor, code.as_str()) {
        (_, "auto") => "auto",
        (_, "en") => "en",
        (_, "zh") | (_, "zh-cn") => "zh",
        (Vendor::Baidu, "zh-tw") => "cht",
        (Vendor::Volcano, "zh-tw") => "zh-Hant",
        (Vendor::Tencent, "zh-tw") => "zh-TW",
        (Vendor::Baidu, "ja") => "jp",
        (_, "ja") => "ja",
        (Vendor::Baidu, "ko") => "kor",
        (_, "ko") => "ko",
        (Vendor::Baidu, "fr") => "fra",
        (_, "fr") => "fr",
        (_, "de") => "de",
        (Vendor::Baidu, "es") => "spa",
        (_, "es") => "es",
        (_, "ru") => "ru",
        (_, "it") => "it",
        (_, "pt") => "pt",
        _ => "auto",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_baidu_codes() {
        assert_eq!(vendor_code(Vendor::Baidu, "zh-cn"), "zh");
        assert_eq!(vendor_code(Vendor::Baidu, "zh-tw"), "cht");
        assert_eq!(vendor_code(Vendor::Baidu, "ja"), "jp");
        assert_eq!(vendor_code(Vendor::Baidu, "ko"), "kor");
    }

    #[test]
    fn test_traditional_chinese_per_vendor() {
        assert_eq!(vendor_code(Vendor::Volcano, "zh-tw"), "zh-Hant");
        assert_eq!(vendor_code(Vendor::Tencent, "zh-tw"), "zh-TW");
    }

    #[test]
    fn test_unknown_code_maps_to_auto() {
        assert_eq!(vendor_code(Vendor::Tencent, "klingon"), "auto");
        assert_eq!(vendor_code(Vendor::Volcano, ""), "auto");
    }

    #[test]
    fn test_same_language() {
        assert!(same_language("en", "EN"));
        assert!(same_language("zh", "zh_CN"));
        assert!(!same_language("zh-cn", "zh-tw"));
        assert!(!same_language("auto", "en"));
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize(" zh_CN "), "zh-cn");
        assert!(is_supported("ZH_TW"));
        assert!(!is_supported("xx"));
    }
}
