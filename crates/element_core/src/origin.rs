//! Same-origin validation for discovered stylesheet base paths.
//!
//! The stylesheet loader discovers its base path by inspecting link elements
//! already present in the document. Any markup-injection foothold lets an
//! attacker plant such a link, so a discovered path must prove it resolves
//! inside the document's own origin before it is trusted. Relative paths are
//! same-origin by construction; absolute and protocol-relative URLs must match
//! scheme, host, and effective port exactly.

/// A parsed `scheme://host:port` origin tuple.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Origin {
    /// Lowercase URL scheme.
    pub scheme: String,
    /// Lowercase host, brackets stripped for IPv6 literals.
    pub host: String,
    /// Effective port, with scheme defaults applied.
    pub port: u16,
}

fn default_port(scheme: &str) -> Option<u16> {
    match scheme {
        "http" | "ws" => Some(80),
        "https" | "wss" => Some(443),
        _ => None,
    }
}

/// Splits `authority` into host and optional explicit port.
///
/// Userinfo (`user:pass@`) is stripped. IPv6 literals keep their port
/// separator outside the closing bracket.
fn split_authority(authority: &str) -> Option<(String, Option<u16>)> {
    let hostport = match authority.rfind('@') {
        Some(at) => &authority[at + 1..],
        None => authority,
    };
    if hostport.is_empty() {
        return None;
    }

    if let Some(rest) = hostport.strip_prefix('[') {
        let close = rest.find(']')?;
        let host = rest[..close].to_ascii_lowercase();
        let tail = &rest[close + 1..];
        if tail.is_empty() {
            return Some((host, None));
        }
        let port = tail.strip_prefix(':')?.parse::<u16>().ok()?;
        return Some((host, Some(port)));
    }

    match hostport.find(':') {
        Some(colon) => {
            let host = hostport[..colon].to_ascii_lowercase();
            if host.is_empty() {
                return None;
            }
            let port = hostport[colon + 1..].parse::<u16>().ok()?;
            Some((host, Some(port)))
        }
        None => Some((hostport.to_ascii_lowercase(), None)),
    }
}

impl Origin {
    /// Parses an origin string of the form `scheme://host[:port]`, as produced
    /// by the browser's `location.origin`.
    pub fn parse(raw: &str) -> Option<Self> {
        let (scheme, rest) = raw.split_once("://")?;
        let scheme = scheme.to_ascii_lowercase();
        if scheme.is_empty() || !scheme.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'+' || b == b'-' || b == b'.') {
            return None;
        }
        // location.origin never carries a path, but tolerate a trailing slash.
        let authority = rest.trim_end_matches('/');
        let (host, explicit_port) = split_authority(authority)?;
        let port = explicit_port.or_else(|| default_port(&scheme))?;
        Some(Self { scheme, host, port })
    }
}

/// Strips the two leading separators that introduce an authority.
///
/// Browsers treat `\` as `/` in special schemes, so `//`, `/\`, `\/`, and
/// `\\` all mark a protocol-relative URL.
fn strip_authority_prefix(href: &str) -> Option<&str> {
    let bytes = href.as_bytes();
    if bytes.len() >= 2
        && (bytes[0] == b'/' || bytes[0] == b'\\')
        && (bytes[1] == b'/' || bytes[1] == b'\\')
    {
        Some(&href[2..])
    } else {
        None
    }
}

/// Extracts the authority section of an absolute or protocol-relative URL.
///
/// Browsers treat `\` as `/` in special schemes, so both terminate the
/// authority here.
fn authority_of(after_slashes: &str) -> &str {
    let end = after_slashes
        .find(['/', '\\', '?', '#'])
        .unwrap_or(after_slashes.len());
    &after_slashes[..end]
}

/// Classifies `href` against the document origin.
///
/// Returns `true` when a request for `href` would stay inside
/// `document_origin`: relative references, same-origin absolute URLs, and
/// protocol-relative URLs on the same host and effective port. Anything else
/// — foreign origins, opaque schemes like `data:` or `javascript:`, and
/// unparsable input — returns `false`.
pub fn is_same_origin(href: &str, document_origin: &Origin) -> bool {
    let href = href.trim();

    // Protocol-relative: inherits the document scheme, so only the authority
    // needs to match.
    if let Some(rest) = strip_authority_prefix(href) {
        return match split_authority(authority_of(rest)) {
            Some((host, explicit_port)) => {
                let port = explicit_port.or_else(|| default_port(&document_origin.scheme));
                host == document_origin.host && port == Some(document_origin.port)
            }
            None => false,
        };
    }

    // Absolute URL with an explicit scheme.
    if let Some((scheme, rest)) = href.split_once(':') {
        let scheme_ok = !scheme.is_empty()
            && scheme.as_bytes()[0].is_ascii_alphabetic()
            && scheme
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b == b'+' || b == b'-' || b == b'.');
        if scheme_ok {
            let scheme = scheme.to_ascii_lowercase();
            let Some(rest) = strip_authority_prefix(rest) else {
                // Opaque scheme (data:, javascript:, mailto:) — never trusted.
                return false;
            };
            if scheme != document_origin.scheme {
                return false;
            }
            return match split_authority(authority_of(rest)) {
                Some((host, explicit_port)) => {
                    let port = explicit_port.or_else(|| default_port(&scheme));
                    host == document_origin.host && port == Some(document_origin.port)
                }
                None => false,
            };
        }
    }

    // Relative reference: resolves against the document itself.
    true
}

/// Returns whether `href` is a relative reference, i.e. carries neither a
/// scheme nor an authority and therefore resolves inside the document origin
/// no matter what that origin is.
pub fn is_relative_reference(href: &str) -> bool {
    let href = href.trim();
    if strip_authority_prefix(href).is_some() {
        return false;
    }
    match href.split_once(':') {
        Some((scheme, _)) => {
            !(!scheme.is_empty()
                && scheme.as_bytes()[0].is_ascii_alphabetic()
                && scheme
                    .bytes()
                    .all(|b| b.is_ascii_alphanumeric() || b == b'+' || b == b'-' || b == b'.'))
        }
        None => true,
    }
}
