//! URL decomposition primitives: network location, path, query and fragment stripping.
//!
//! Parsing goes through `url::Url` when possible. Inputs the parser rejects
//! (scheme-less or otherwise malformed) are split by hand so these helpers
//! stay total.

use url::Url;

/// Network location of `url`: `host`, or `host:port` whenever the URL spells
/// out a port, including the scheme's default one.
pub fn domain(url: &str) -> String {
    match Url::parse(url) {
        Ok(parsed) => {
            let host = parsed.host_str().unwrap_or_default();
            let (netloc, _) = split_netloc(url);
            match parsed.port().or_else(|| explicit_port(strip_userinfo(netloc))) {
                Some(port) => format!("{host}:{port}"),
                None => host.to_string(),
            }
        }
        Err(_) => {
            let (netloc, _) = split_netloc(url);
            strip_userinfo(netloc).to_string()
        }
    }
}

/// Host part of `url` with any port removed.
pub fn host(url: &str) -> String {
    match Url::parse(url) {
        Ok(parsed) => parsed.host_str().unwrap_or_default().to_string(),
        Err(_) => {
            let (netloc, _) = split_netloc(url);
            strip_port(strip_userinfo(netloc)).to_string()
        }
    }
}

/// Path component of `url` (still percent-encoded).
pub fn path(url: &str) -> String {
    match Url::parse(url) {
        Ok(parsed) => parsed.path().to_string(),
        Err(_) => {
            let (_, rest) = split_netloc(url);
            without_fragment(without_query(rest)).to_string()
        }
    }
}

/// `s` with everything from the first `?` removed.
pub fn without_query(s: &str) -> &str {
    s.split_once('?').map_or(s, |(head, _)| head)
}

/// `s` with everything from the first `#` removed.
pub fn without_fragment(s: &str) -> &str {
    s.split_once('#').map_or(s, |(head, _)| head)
}

/// Splits `url` into (netloc, remainder). Without a `scheme://` or `//` prefix
/// the whole input is treated as a path.
fn split_netloc(url: &str) -> (&str, &str) {
    let after_scheme = match url.find("://") {
        Some(i) => &url[i + 3..],
        None => match url.strip_prefix("//") {
            Some(rest) => rest,
            None => return ("", url),
        },
    };
    let end = after_scheme
        .find(|c: char| c == '/' || c == '?' || c == '#')
        .unwrap_or(after_scheme.len());
    after_scheme.split_at(end)
}

fn strip_userinfo(netloc: &str) -> &str {
    netloc.rsplit_once('@').map_or(netloc, |(_, hostport)| hostport)
}

/// Port written in a raw `host:port`. `Url` drops it when it is the default.
fn explicit_port(hostport: &str) -> Option<u16> {
    let (_, port) = hostport.rsplit_once(':')?;
    if port.is_empty() || !port.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    port.parse().ok()
}

fn strip_port(hostport: &str) -> &str {
    match hostport.rsplit_once(':') {
        Some((h, port)) if !port.is_empty() && port.bytes().all(|b| b.is_ascii_digit()) => h,
        _ => hostport,
    }
}
