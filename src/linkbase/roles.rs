//! Standard XBRL role and arc-role URIs the engine needs to recognise.

/// The link role shared by label, reference and footnote links.
pub const DEFAULT_LINK_ROLE: &str = "http://www.xbrl.org/2003/role/link";

/// Placeholder arc role for nodes built without an incident arc.
pub const UNKNOWN_ARC_ROLE: &str = "unknown";

pub const PARENT_CHILD: &str = "http://www.xbrl.org/2003/arcrole/parent-child";
pub const SUMMATION_ITEM: &str = "http://www.xbrl.org/2003/arcrole/summation-item";
pub const CONCEPT_LABEL: &str = "http://www.xbrl.org/2003/arcrole/concept-label";
pub const CONCEPT_REFERENCE: &str = "http://www.xbrl.org/2003/arcrole/concept-reference";
pub const FACT_FOOTNOTE: &str = "http://www.xbrl.org/2003/arcrole/fact-footnote";

pub const ALL: &str = "http://xbrl.org/int/dim/arcrole/all";
pub const NOT_ALL: &str = "http://xbrl.org/int/dim/arcrole/notAll";
pub const HYPERCUBE_DIMENSION: &str = "http://xbrl.org/int/dim/arcrole/hypercube-dimension";
pub const DIMENSION_DOMAIN: &str = "http://xbrl.org/int/dim/arcrole/dimension-domain";
pub const DOMAIN_MEMBER: &str = "http://xbrl.org/int/dim/arcrole/domain-member";
pub const DIMENSION_DEFAULT: &str = "http://xbrl.org/int/dim/arcrole/dimension-default";

pub const STANDARD_LABEL: &str = "http://www.xbrl.org/2003/role/label";
pub const TERSE_LABEL: &str = "http://www.xbrl.org/2003/role/terseLabel";
pub const TOTAL_LABEL: &str = "http://www.xbrl.org/2003/role/totalLabel";
