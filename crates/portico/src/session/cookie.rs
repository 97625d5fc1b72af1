use axum::http::{HeaderMap, header::COOKIE};

/// Find a cookie value in a `Cookie` header string.
pub fn cookie_value<'a>(cookie_header: &'a str, cookie_name: &str) -> Option<&'a str> {
    cookie_header.split(';').map(str::trim).find_map(|pair| {
        let (name, value) = pair.split_once('=')?;
        if name.trim() == cookie_name {
            Some(value.trim())
        } else {
            None
        }
    })
}

/// Find a cookie value across all `Cookie` headers of a request.
pub fn request_cookie<'a>(headers: &'a HeaderMap, cookie_name: &str) -> Option<&'a str> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find_map(|header| cookie_value(header, cookie_name))
}

/// `Set-Cookie` value storing `value` for `max_age_secs`.
pub fn set_cookie(name: &str, value: &str, max_age_secs: i64) -> String {
    format!("{name}={value}; Path=/; Max-Age={max_age_secs}")
}

/// `Set-Cookie` value removing the cookie.
pub fn clear_cookie(name: &str) -> String {
    format!("{name}=; Path=/; Max-Age=0")
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_cookie_value_finds_named_pair() {
        let header = "language=fr; isAuthenticated=true;other=1";
        assert_eq!(cookie_value(header, "isAuthenticated"), Some("true"));
        assert_eq!(cookie_value(header, "language"), Some("fr"));
        assert_eq!(cookie_value(header, "other"), Some("1"));
        assert_eq!(cookie_value(header, "missing"), None);
    }

    #[test]
    fn test_cookie_name_must_match_exactly() {
        assert_eq!(cookie_value("xisAuthenticated=true", "isAuthenticated"), None);
    }

    #[test]
    fn test_request_cookie_scans_multiple_headers() {
        let mut headers = HeaderMap::new();
        headers.append(COOKIE, HeaderValue::from_static("a=1"));
        headers.append(COOKIE, HeaderValue::from_static("isAuthenticated=true"));
        assert_eq!(request_cookie(&headers, "isAuthenticated"), Some("true"));
    }

    #[test]
    fn test_set_and_clear_cookie_format() {
        assert_eq!(
            set_cookie("isAuthenticated", "true", 604800),
            "isAuthenticated=true; Path=/; Max-Age=604800"
        );
        assert_eq!(clear_cookie("language"), "language=; Path=/; Max-Age=0");
    }
}
