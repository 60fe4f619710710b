//! Namespace classification against the tracked vocabularies
//!
//! Predicates and classes deliberately use different marker sets: classes also
//! count `w3id.org` and FOAF vocabularies as domain-specific, predicates do not.

use serde::{Deserialize, Serialize};

/// Markers that make a predicate namespace domain-specific.
pub const PREDICATE_DOMAIN_MARKERS: &[&str] = &["odissei", "dataverse"];

/// Markers that make a class namespace domain-specific.
pub const CLASS_DOMAIN_MARKERS: &[&str] = &["odissei", "dataverse", "w3id.org", "foaf"];

/// Vocabulary group a namespace belongs to
///
/// # Examples
///
/// ```
/// use odissei_schema::vocabulary::{classify_group, NamespaceGroup};
///
/// assert_eq!(
///     classify_group("https://portal.odissei.nl/schema/provenance#"),
///     NamespaceGroup::Odissei
/// );
/// assert_eq!(NamespaceGroup::Dataverse.as_str(), "dataverse");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NamespaceGroup {
    Odissei,
    Dataverse,
    Other,
}

impl NamespaceGroup {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Odissei => "odissei",
            Self::Dataverse => "dataverse",
            Self::Other => "other",
        }
    }
}

impl std::fmt::Display for NamespaceGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which side of the schema a term came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TermKind {
    Class,
    Predicate,
}

impl TermKind {
    /// Marker set used for this kind of term
    #[must_use]
    pub const fn markers(&self) -> &'static [&'static str] {
        match self {
            Self::Class => CLASS_DOMAIN_MARKERS,
            Self::Predicate => PREDICATE_DOMAIN_MARKERS,
        }
    }

    pub fn is_domain_specific(&self, namespace: &str) -> bool {
        is_domain_specific(namespace, self.markers())
    }
}

/// True iff the lower-cased namespace contains any of `markers`.
pub fn is_domain_specific(namespace: &str, markers: &[&str]) -> bool {
    let lowered = namespace.to_lowercase();
    markers.iter().any(|marker| lowered.contains(marker))
}

pub fn is_domain_specific_predicate(namespace: &str) -> bool {
    is_domain_specific(namespace, PREDICATE_DOMAIN_MARKERS)
}

pub fn is_domain_specific_class(namespace: &str) -> bool {
    is_domain_specific(namespace, CLASS_DOMAIN_MARKERS)
}

/// Group of a namespace, case-insensitive. `odissei` wins over `dataverse`.
pub fn classify_group(namespace: &str) -> NamespaceGroup {
    let lowered = namespace.to_lowercase();
    if lowered.contains("odissei") {
        NamespaceGroup::Odissei
    } else if lowered.contains("dataverse") {
        NamespaceGroup::Dataverse
    } else {
        NamespaceGroup::Other
    }
}
