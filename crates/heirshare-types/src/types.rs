use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::collections::BTreeMap;
use std::fmt;

// -------------------------------------------------------------------------------------------------
// Identifiers
// -------------------------------------------------------------------------------------------------

/// Opaque, caller-assigned identity of an heir. Stable for the lifetime of a session.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HeirId(String);

impl HeirId {
    /// Wraps an existing identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generates a fresh random identifier (UUID v4).
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// Borrow the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the identifier is the empty string (i.e. not yet assigned).
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for HeirId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for HeirId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for HeirId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl Borrow<str> for HeirId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Identity of a donation rule.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleId(String);

impl RuleId {
    /// Wraps an existing identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generates a fresh random identifier (UUID v4).
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// Borrow the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RuleId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

// -------------------------------------------------------------------------------------------------
// Kinship
// -------------------------------------------------------------------------------------------------

/// Kinship of a top-level heir to the decedent.
///
/// Great-grandparent tags are named after the grandparent they descend from:
/// `PaternalGrandfatherFather` is the father's father's father (`PGF_F` on the wire).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Relationship {
    /// Husband or wife of the decedent
    Spouse,
    /// Child of the decedent (also used for descendants entered under another heir)
    Child,
    /// Mother or father of the decedent
    Parent,
    /// Father's father
    PaternalGrandfather,
    /// Father's mother
    PaternalGrandmother,
    /// Mother's father
    MaternalGrandfather,
    /// Mother's mother
    MaternalGrandmother,
    /// Father's father's father
    #[serde(rename = "PGF_F")]
    PaternalGrandfatherFather,
    /// Father's father's mother
    #[serde(rename = "PGF_M")]
    PaternalGrandfatherMother,
    /// Father's mother's father
    #[serde(rename = "PGM_F")]
    PaternalGrandmotherFather,
    /// Father's mother's mother
    #[serde(rename = "PGM_M")]
    PaternalGrandmotherMother,
    /// Mother's father's father
    #[serde(rename = "MGF_F")]
    MaternalGrandfatherFather,
    /// Mother's father's mother
    #[serde(rename = "MGF_M")]
    MaternalGrandfatherMother,
    /// Mother's mother's father
    #[serde(rename = "MGM_F")]
    MaternalGrandmotherFather,
    /// Mother's mother's mother
    #[serde(rename = "MGM_M")]
    MaternalGrandmotherMother,
}

impl Relationship {
    /// The eight great-grandparent slots in wire order (paternal side first).
    pub const GREAT_GRANDPARENTS: [Relationship; 8] = [
        Relationship::PaternalGrandfatherFather,
        Relationship::PaternalGrandfatherMother,
        Relationship::PaternalGrandmotherFather,
        Relationship::PaternalGrandmotherMother,
        Relationship::MaternalGrandfatherFather,
        Relationship::MaternalGrandfatherMother,
        Relationship::MaternalGrandmotherFather,
        Relationship::MaternalGrandmotherMother,
    ];

    /// The four grandparent slots (paternal side first).
    pub const GRANDPARENTS: [Relationship; 4] = [
        Relationship::PaternalGrandfather,
        Relationship::PaternalGrandmother,
        Relationship::MaternalGrandfather,
        Relationship::MaternalGrandmother,
    ];

    /// Whether at most one top-level heir may carry this relationship.
    ///
    /// Children and parents are the only repeatable tags (parents are capped at two
    /// by the forest validation instead).
    pub fn is_single_slot(&self) -> bool {
        !matches!(self, Relationship::Child | Relationship::Parent)
    }
}

// -------------------------------------------------------------------------------------------------
// Fractions
// -------------------------------------------------------------------------------------------------

/// An exact rational share of the estate.
///
/// Equality is structural: `1/2` and `2/4` are different values until simplified.
/// Arithmetic lives in `heirshare-calculator`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fraction {
    /// Signed numerator; the sign of the fraction lives here once simplified
    pub numerator: i64,
    /// Denominator; strictly positive once simplified
    pub denominator: i64,
}

impl Fraction {
    /// Canonical zero, `0/1`.
    pub const ZERO: Fraction = Fraction::new(0, 1);
    /// One half.
    pub const HALF: Fraction = Fraction::new(1, 2);
    /// The whole estate, `1/1`.
    pub const ONE: Fraction = Fraction::new(1, 1);

    /// Builds a fraction without validating or reducing it.
    pub const fn new(numerator: i64, denominator: i64) -> Self {
        Self { numerator, denominator }
    }

    /// `true` when the numerator is zero, regardless of the denominator.
    pub fn is_zero(&self) -> bool {
        self.numerator == 0
    }

    /// `true` for a strictly positive value with a valid denominator.
    pub fn is_positive(&self) -> bool {
        self.denominator > 0 && self.numerator > 0
    }
}

impl Default for Fraction {
    fn default() -> Self {
        Self::ZERO
    }
}

impl fmt::Display for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}

/// Mapping from heir id to share. Ordered so that reports are deterministic.
pub type ShareMap = BTreeMap<HeirId, Fraction>;

// -------------------------------------------------------------------------------------------------
// Heirs
// -------------------------------------------------------------------------------------------------

/// An heir as supplied by the caller, in nested form.
///
/// `descendants` are the heir's own children and only matter for the right of
/// representation. The core converts this into an arena before calculating.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Heir {
    /// Unique identity; generated when left empty
    #[serde(default)]
    pub id: HeirId,
    /// Display name, never used in calculation
    pub name: String,
    /// Kinship tag
    pub relationship: Relationship,
    /// Whether the heir survived the decedent
    pub is_alive: bool,
    /// Whether the heir accepts the inheritance; always `false` for a dead heir
    pub accepts_inheritance: bool,
    /// Spouse only: take the separate half before the orders run
    #[serde(default)]
    pub request_separate_half: bool,
    /// The heir's own children, used for representation
    #[serde(default)]
    pub descendants: Vec<Heir>,
}

impl Heir {
    /// A living heir who accepts the inheritance.
    pub fn new(id: impl Into<HeirId>, name: impl Into<String>, relationship: Relationship) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            relationship,
            is_alive: true,
            accepts_inheritance: true,
            request_separate_half: false,
            descendants: Vec::new(),
        }
    }

    /// Marks the heir as predeceased. A dead heir cannot accept.
    pub fn deceased(mut self) -> Self {
        self.is_alive = false;
        self.accepts_inheritance = false;
        self
    }

    /// Marks a living heir as renouncing the inheritance.
    pub fn renouncing(mut self) -> Self {
        self.accepts_inheritance = false;
        self
    }

    /// Requests the spouse's separate half.
    pub fn with_separate_half(mut self) -> Self {
        self.request_separate_half = true;
        self
    }

    /// Attaches the heir's own children.
    pub fn with_descendants(mut self, descendants: Vec<Heir>) -> Self {
        self.descendants = descendants;
        self
    }
}

// -------------------------------------------------------------------------------------------------
// Redistribution
// -------------------------------------------------------------------------------------------------

/// A contractual transfer of part of a donor's statutory share to another heir.
///
/// `portion_of_share` is relative to the donor's own initial share, not to the estate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DonationRule {
    /// Rule identity
    pub id: RuleId,
    /// Heir giving away part of their share
    pub donor_id: HeirId,
    /// Heir receiving it
    pub recipient_id: HeirId,
    /// Fraction of the donor's initial share transferred to this recipient
    pub portion_of_share: Fraction,
}

impl DonationRule {
    /// Builds a rule with a generated id.
    pub fn new(
        donor_id: impl Into<HeirId>,
        recipient_id: impl Into<HeirId>,
        portion_of_share: Fraction,
    ) -> Self {
        Self {
            id: RuleId::generate(),
            donor_id: donor_id.into(),
            recipient_id: recipient_id.into(),
            portion_of_share,
        }
    }
}

/// Category of a redistribution warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningKind {
    /// The donor's rules do not add up to exactly their whole share
    DonorIncompleteAllocation,
}

/// A recoverable problem found while applying donation rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RedistributionWarning {
    /// Warning category
    #[serde(rename = "type")]
    pub kind: WarningKind,
    /// Donor the warning is about
    pub donor_id: HeirId,
    /// Donor display name
    pub donor_name: String,
    /// Sum of the donor's portions, simplified
    pub allocated: Fraction,
    /// Human readable explanation
    pub message: String,
}
