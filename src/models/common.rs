use serde::{ Deserialize, Serialize };

/// Implements the string tag surface shared by the state enums: `ALL`,
/// `as_str`, `Display` and `FromStr`. Tags must match the serde renames.
macro_rules! string_tags {
    ($name:ident { $($variant:ident => $tag:literal),+ $(,)? }) => {
        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $tag),+
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.pad(self.as_str())
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = $crate::errors::ParcelflowError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let wanted = s.trim().to_lowercase().replace('_', "-");
                $name::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str() == wanted)
                    .ok_or_else(|| $crate::errors::ParcelflowError::InvalidInput(
                        format!("unknown {} '{}'", stringify!($name), s)
                    ))
            }
        }
    };
}

pub(crate) use string_tags;

/// Coarse stage of a property's lifetime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LifecyclePhase {
    Intake,
    Feasibility,
    Entitlement,
    Construction,
    Servicing,
    Closed,
}

string_tags!(LifecyclePhase {
    Intake => "intake",
    Feasibility => "feasibility",
    Entitlement => "entitlement",
    Construction => "construction",
    Servicing => "servicing",
    Closed => "closed",
});

impl LifecyclePhase {
    /// Position along the forward path. `Closed` ranks last so closing a
    /// property never reads as a regression.
    pub fn ordinal(&self) -> u8 {
        match self {
            LifecyclePhase::Intake => 0,
            LifecyclePhase::Feasibility => 1,
            LifecyclePhase::Entitlement => 2,
            LifecyclePhase::Construction => 3,
            LifecyclePhase::Servicing => 4,
            LifecyclePhase::Closed => 5,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            LifecyclePhase::Intake => "Intake",
            LifecyclePhase::Feasibility => "Feasibility",
            LifecyclePhase::Entitlement => "Entitlement",
            LifecyclePhase::Construction => "Construction",
            LifecyclePhase::Servicing => "Servicing",
            LifecyclePhase::Closed => "Closed",
        }
    }
}

/// Operational status of a property, independent of its lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PropertyStatus {
    Active,
    Paused,
    OnHold,
    Closed,
}

string_tags!(PropertyStatus {
    Active => "active",
    Paused => "paused",
    OnHold => "on-hold",
    Closed => "closed",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ApprovalState {
    Pending,
    Approved,
    Rejected,
    NeedsRevision,
}

string_tags!(ApprovalState {
    Pending => "pending",
    Approved => "approved",
    Rejected => "rejected",
    NeedsRevision => "needs-revision",
});

/// Fine-grained entitlement sub-state tracking permit correspondence
/// with a jurisdiction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EntitlementStatus {
    Planning,
    PreSubmittalQa,
    Submitted,
    UnderReview,
    CorrectionsReceived,
    CorrectionsAssigned,
    AddressingCorrections,
    CorrectionsQa,
    Resubmitted,
    Approved,
    Rejected,
    OnHold,
}

string_tags!(EntitlementStatus {
    Planning => "planning",
    PreSubmittalQa => "pre-submittal-qa",
    Submitted => "submitted",
    UnderReview => "under-review",
    CorrectionsReceived => "corrections-received",
    CorrectionsAssigned => "corrections-assigned",
    AddressingCorrections => "addressing-corrections",
    CorrectionsQa => "corrections-qa",
    Resubmitted => "resubmitted",
    Approved => "approved",
    Rejected => "rejected",
    OnHold => "on-hold",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PropertyType {
    Subdivision,
    MultiFamilyRehab,
    LandBanking,
    AdaptiveReuse,
}

string_tags!(PropertyType {
    Subdivision => "subdivision",
    MultiFamilyRehab => "multi-family-rehab",
    LandBanking => "land-banking",
    AdaptiveReuse => "adaptive-reuse",
});

impl PropertyType {
    pub fn label(&self) -> &'static str {
        match self {
            PropertyType::Subdivision => "Subdivision",
            PropertyType::MultiFamilyRehab => "Multi-Family Rehab",
            PropertyType::LandBanking => "Land Banking",
            PropertyType::AdaptiveReuse => "Adaptive Reuse",
        }
    }
}
