//! Property-based tests using proptest
//!
//! These tests check the resource policy truth table and tag parsing
//! against randomized resource types and flag combinations.

use heat_resource_fetcher::resource::{
    AttributeSource, DescribePolicy, ResourceKind, GLUE_KINDS, SUPPORTED_KINDS,
};
use proptest::prelude::*;

/// Any of the recognized kinds with a dedicated lookup
fn arb_supported_kind() -> impl Strategy<Value = ResourceKind> {
    prop::sample::select(SUPPORTED_KINDS.to_vec())
}

fn arb_glue_kind() -> impl Strategy<Value = ResourceKind> {
    prop::sample::select(GLUE_KINDS.to_vec())
}

/// Heat-looking tags that are none of the recognized ones
fn arb_unsupported_kind() -> impl Strategy<Value = ResourceKind> {
    "OS::(Heat|Cinder|Custom|Swift)::[A-Z][A-Za-z]{0,15}".prop_map(|tag| ResourceKind::from_tag(&tag))
}

fn arb_policy() -> impl Strategy<Value = DescribePolicy> {
    (any::<bool>(), any::<bool>()).prop_map(|(ignore, include)| DescribePolicy {
        ignore_heat_resources: ignore,
        include_unsupported_resources: include,
    })
}

proptest! {
    /// Recognized kinds always get a dedicated lookup
    #[test]
    fn supported_kinds_always_looked_up(kind in arb_supported_kind(), policy in arb_policy()) {
        let source = AttributeSource::for_kind(&kind, policy);
        prop_assert_eq!(source, AttributeSource::Lookup(kind.lookup().unwrap()));
    }

    /// Glue resources follow the ignore flag only
    #[test]
    fn glue_kinds_follow_ignore_flag(kind in arb_glue_kind(), policy in arb_policy()) {
        let source = AttributeSource::for_kind(&kind, policy);
        if policy.ignore_heat_resources {
            prop_assert_eq!(source, AttributeSource::Omit);
        } else {
            prop_assert_eq!(source, AttributeSource::Raw);
        }
    }

    /// Other kinds follow the include flag only
    #[test]
    fn unsupported_kinds_follow_include_flag(kind in arb_unsupported_kind(), policy in arb_policy()) {
        prop_assume!(matches!(kind, ResourceKind::Unsupported(_)));
        let source = AttributeSource::for_kind(&kind, policy);
        if policy.include_unsupported_resources {
            prop_assert_eq!(source, AttributeSource::Raw);
        } else {
            prop_assert_eq!(source, AttributeSource::Omit);
        }
    }

    /// Parsing never loses the original tag
    #[test]
    fn tag_round_trip(tag in "[A-Za-z:]{0,40}") {
        let kind = ResourceKind::from_tag(&tag);
        prop_assert_eq!(kind.as_tag(), tag.as_str());
    }

    /// Raw attributes are never chosen for a kind that has a lookup
    #[test]
    fn raw_only_without_lookup(tag in "OS::Neutron::[A-Za-z]{1,20}", policy in arb_policy()) {
        let kind = ResourceKind::from_tag(&tag);
        if AttributeSource::for_kind(&kind, policy) == AttributeSource::Raw {
            prop_assert!(kind.lookup().is_none());
        }
    }
}
