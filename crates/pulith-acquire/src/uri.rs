use url::Url;

/// Remove `user:password@` from a URI before it is shown to anyone.
pub fn strip_credentials(uri: &str) -> String {
    match Url::parse(uri) {
        Ok(mut url) if url.has_host() => {
            if url.username().is_empty() && url.password().is_none() {
                return uri.to_string();
            }
            // Both setters only fail for URLs without a host.
            let _ = url.set_username("");
            let _ = url.set_password(None);
            url.to_string()
        }
        _ => strip_userinfo(uri),
    }
}

fn strip_userinfo(uri: &str) -> String {
    let Some(scheme_end) = uri.find("://").map(|i| i + 3) else {
        return uri.to_string();
    };
    let rest = &uri[scheme_end..];
    let authority_end = rest.find('/').unwrap_or(rest.len());
    match rest[..authority_end].rfind('@') {
        Some(at) => format!("{}{}", &uri[..scheme_end], &rest[at + 1..]),
        None => uri.to_string(),
    }
}
