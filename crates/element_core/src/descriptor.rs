//! Static per-component-type configuration.

/// Declarative metadata a component type states once at definition time.
///
/// Instances are `'static` and shared by every element of the type; the
/// engine never mutates them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComponentSpec {
    /// Unique lowercase hyphenated tag the type is registered under.
    pub tag: &'static str,
    /// Attribute names that trigger reactivity; changes to any other
    /// attribute are invisible to the component.
    pub watched_attributes: &'static [&'static str],
    /// Companion stylesheet id, or `None` for unstyled structural components.
    pub style_id: Option<&'static str>,
    /// Apply CSS layout containment to the host element on first connect.
    pub containment: bool,
}

impl ComponentSpec {
    /// Returns whether `name` is one of the watched attributes.
    pub fn watches(&self, name: &str) -> bool {
        self.watched_attributes.iter().any(|w| *w == name)
    }

    /// Returns whether `tag` conforms to the custom-tag policy: non-empty,
    /// lowercase ASCII alphanumerics and hyphens, starts with a letter, and
    /// contains at least one hyphen.
    pub fn is_valid_tag(tag: &str) -> bool {
        let bytes = tag.as_bytes();
        if bytes.is_empty() || !bytes[0].is_ascii_lowercase() {
            return false;
        }
        if !tag.contains('-') {
            return false;
        }
        bytes
            .iter()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || *b == b'-')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SPEC: ComponentSpec = ComponentSpec {
        tag: "ui-badge",
        watched_attributes: &["variant", "label"],
        style_id: Some("badge"),
        containment: false,
    };

    #[test]
    fn watches_only_declared_attributes() {
        assert!(SPEC.watches("variant"));
        assert!(SPEC.watches("label"));
        assert!(!SPEC.watches("class"));
        assert!(!SPEC.watches(""));
    }

    #[test]
    fn tag_policy_accepts_hyphenated_lowercase() {
        assert!(ComponentSpec::is_valid_tag("ui-badge"));
        assert!(ComponentSpec::is_valid_tag("x-a1-b2"));
    }

    #[test]
    fn tag_policy_rejects_malformed_tags() {
        assert!(!ComponentSpec::is_valid_tag(""));
        assert!(!ComponentSpec::is_valid_tag("badge"));
        assert!(!ComponentSpec::is_valid_tag("UI-Badge"));
        assert!(!ComponentSpec::is_valid_tag("9-badge"));
        assert!(!ComponentSpec::is_valid_tag("ui badge"));
    }
}
