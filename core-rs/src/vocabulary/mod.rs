//! Domain vocabulary classification
//!
//! - classifier: marker-substring matching of namespaces against the tracked
//!   ODISSEI / Dataverse vocabularies

pub mod classifier;

pub use classifier::{
    classify_group, is_domain_specific, is_domain_specific_class, is_domain_specific_predicate,
    NamespaceGroup, TermKind, CLASS_DOMAIN_MARKERS, PREDICATE_DOMAIN_MARKERS,
};
