//! Validating flag values for the non-scalar resolver options.

use std::collections::HashMap;
use url::Url;

use super::errors::ConfigError;
use super::flags::FlagValue;
use crate::env::expand_env;
use crate::federation::parse_federations_flag;
use crate::validators::is_dns1123_label;

/// Cluster domain suffix, stored in canonical trailing-dot form.
pub struct ClusterDomainValue<'a>(pub &'a mut String);

impl FlagValue for ClusterDomainValue<'_> {
    fn set(&mut self, raw: &str) -> Result<(), ConfigError> {
        let domain = raw.strip_suffix('.').unwrap_or(raw);

        for label in domain.split('.') {
            let errs = is_dns1123_label(label);
            if !errs.is_empty() {
                return Err(ConfigError::InvalidDomainLabel {
                    label: label.to_string(),
                    reasons: errs.join("; "),
                });
            }
        }

        *self.0 = format!("{domain}.");
        Ok(())
    }

    fn current(&self) -> String {
        self.0.clone()
    }

    fn type_name(&self) -> &'static str {
        "string"
    }
}

/// Control-plane URL. Environment references are expanded for validation
/// only; the unexpanded text is what gets stored.
///
/// An empty value clears the URL.
pub struct ControlPlaneUrlValue<'a>(pub &'a mut String);

impl FlagValue for ControlPlaneUrlValue<'_> {
    fn set(&mut self, raw: &str) -> Result<(), ConfigError> {
        if raw.is_empty() {
            self.0.clear();
            return Ok(());
        }

        let expanded = expand_env(raw);
        let host = authority_host(&expanded)?;

        match Url::parse(&expanded) {
            Ok(_) => {}
            // the url crate refuses `scheme://:port`, the host check above does not
            Err(url::ParseError::EmptyHost) if is_port_only(host) => {}
            Err(url::ParseError::EmptyHost) => return Err(ConfigError::UrlIncomplete),
            Err(_) => return Err(ConfigError::UrlParseFailure),
        }

        *self.0 = raw.to_string();
        Ok(())
    }

    fn current(&self) -> String {
        self.0.clone()
    }

    fn type_name(&self) -> &'static str {
        "string"
    }
}

/// Returns the `host[:port]` part of the authority exactly as written.
///
/// The text must be `<scheme>://<authority>`; the host may carry the port,
/// so `http://:80` has host `:80` while `http://:` is rejected.
fn authority_host(url: &str) -> Result<&str, ConfigError> {
    if url.trim() != url || url.chars().any(|c| c.is_ascii_control()) {
        return Err(ConfigError::UrlParseFailure);
    }

    let (scheme, rest) = url.split_once(':').ok_or(ConfigError::UrlIncomplete)?;
    if !is_scheme(scheme) {
        return Err(ConfigError::UrlIncomplete);
    }
    let rest = rest.strip_prefix("//").ok_or(ConfigError::UrlIncomplete)?;

    let authority = rest
        .split(['/', '?', '#'])
        .next()
        .unwrap_or_default();
    if authority.contains(['\\', ' ']) {
        return Err(ConfigError::UrlParseFailure);
    }

    let host = authority
        .rsplit_once('@')
        .map_or(authority, |(_, host)| host);
    if host.is_empty() || host == ":" {
        return Err(ConfigError::UrlIncomplete);
    }
    if host.starts_with(':') && !is_port_only(host) {
        return Err(ConfigError::UrlParseFailure);
    }

    Ok(host)
}

fn is_scheme(scheme: &str) -> bool {
    let mut chars = scheme.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

fn is_port_only(host: &str) -> bool {
    host.strip_prefix(':')
        .is_some_and(|port| !port.is_empty() && port.bytes().all(|b| b.is_ascii_digit()))
}

/// Federation name to domain mapping. Repeated `set` calls accumulate.
pub struct FederationsValue<'a>(pub &'a mut HashMap<String, String>);

impl FlagValue for FederationsValue<'_> {
    fn set(&mut self, raw: &str) -> Result<(), ConfigError> {
        parse_federations_flag(raw, self.0)?;
        Ok(())
    }

    fn current(&self) -> String {
        self.0
            .iter()
            .map(|(name, domain)| format!("{name}={domain}"))
            .collect::<Vec<_>>()
            .join(",")
    }

    fn type_name(&self) -> &'static str {
        "[]string"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::federation::FederationError;

    #[test]
    fn test_domain_appends_trailing_dot() {
        let mut domain = String::new();
        let mut value = ClusterDomainValue(&mut domain);
        value.set("a.b.c").unwrap();
        assert_eq!(value.current(), "a.b.c.");
        value.set("cluster.local.").unwrap();
        assert_eq!(value.current(), "cluster.local.");
        assert_eq!(value.type_name(), "string");
    }

    #[test]
    fn test_domain_failure_keeps_previous_value() {
        let mut domain = String::from("cluster.local.");
        let mut value = ClusterDomainValue(&mut domain);

        let err = value.set("good.Bad.com").unwrap_err();
        match err {
            ConfigError::InvalidDomainLabel { label, reasons } => {
                assert_eq!(label, "Bad");
                assert!(reasons.contains("RFC 1123 label"));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(domain, "cluster.local.");
    }

    #[test]
    fn test_domain_double_trailing_dot() {
        let mut domain = String::new();
        assert!(ClusterDomainValue(&mut domain).set("a.b..").is_err());
        assert!(ClusterDomainValue(&mut domain).set("a..b").is_err());
        assert!(ClusterDomainValue(&mut domain).set(".").is_err());
    }

    #[test]
    fn test_url_error_kinds() {
        let mut url = String::new();
        let mut value = ControlPlaneUrlValue(&mut url);
        assert!(matches!(value.set("nohost"), Err(ConfigError::UrlIncomplete)));
        assert!(matches!(value.set("http://"), Err(ConfigError::UrlIncomplete)));
        assert!(matches!(value.set("localhost:8080"), Err(ConfigError::UrlIncomplete)));
        assert!(matches!(value.set("http://[::1"), Err(ConfigError::UrlParseFailure)));
        assert!(matches!(value.set("http://host:99999"), Err(ConfigError::UrlParseFailure)));
        assert!(matches!(value.set("http:host"), Err(ConfigError::UrlIncomplete)));
        assert!(matches!(value.set("http:/host"), Err(ConfigError::UrlIncomplete)));
        assert!(matches!(value.set("http://:"), Err(ConfigError::UrlIncomplete)));
        assert!(matches!(value.set("http://user@"), Err(ConfigError::UrlIncomplete)));
        assert!(matches!(value.set(" http://host"), Err(ConfigError::UrlParseFailure)));
        assert!(matches!(value.set("http://host "), Err(ConfigError::UrlParseFailure)));
        assert!(matches!(value.set("http://ho\\st"), Err(ConfigError::UrlParseFailure)));
        assert!(matches!(value.set("http://:abc"), Err(ConfigError::UrlParseFailure)));
        assert_eq!(value.current(), "");
    }

    #[test]
    fn test_url_error_messages_are_opaque() {
        let mut url = String::new();
        let err = ControlPlaneUrlValue(&mut url).set("http://[::1").unwrap_err();
        assert_eq!(err.to_string(), "failed to parse control-plane URL");
        let err = ControlPlaneUrlValue(&mut url).set("nohost").unwrap_err();
        assert_eq!(err.to_string(), "invalid control-plane URL specified");
    }

    #[test]
    fn test_url_host_may_be_port_only() {
        let mut url = String::new();
        ControlPlaneUrlValue(&mut url).set("http://:80").unwrap();
        assert_eq!(url, "http://:80");
        ControlPlaneUrlValue(&mut url).set("https://admin@[::1]:6443/api").unwrap();
        assert_eq!(url, "https://admin@[::1]:6443/api");
    }

    #[test]
    fn test_url_empty_clears() {
        let mut url = String::from("https://10.0.0.1:6443");
        ControlPlaneUrlValue(&mut url).set("").unwrap();
        assert!(url.is_empty());
    }

    #[test]
    fn test_federations_forward_errors_unchanged() {
        let mut map = HashMap::new();
        let mut value = FederationsValue(&mut map);
        let err = value.set("f1").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Federation(FederationError::InvalidFormat(_))
        ));
        assert_eq!(
            err.to_string(),
            FederationError::InvalidFormat("f1".to_string()).to_string()
        );
        assert_eq!(value.type_name(), "[]string");
        assert_eq!(value.current(), "");
    }
}
