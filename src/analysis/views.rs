//! Which entitlement workflow views can be opened for a given state.
//!
//! This is a pure reachability rule, not a state machine: the same status
//! and letter always give the same set, and navigation walks a fixed tab
//! order filtered by that set.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::models::common::{ string_tags, EntitlementStatus };
use crate::models::correction::{ CorrectionItemStatus, CorrectionLetter };

/// Tabs of the entitlement detail screen, declared in tab order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ViewMode {
    Overview,
    Triage,
    Assignment,
    Progress,
    Qa,
    Resubmittal,
}

string_tags!(ViewMode {
    Overview => "overview",
    Triage => "triage",
    Assignment => "assignment",
    Progress => "progress",
    Qa => "qa",
    Resubmittal => "resubmittal",
});

pub type ViewSet = BTreeSet<ViewMode>;

/// Views unlocked by `status`. Each rule adds to the set independently.
pub fn available_views(status: EntitlementStatus, letter: Option<&CorrectionLetter>) -> ViewSet {
    let mut views = ViewSet::new();
    views.insert(ViewMode::Overview);

    let letter = match letter {
        Some(letter) => letter,
        None => return views,
    };

    use EntitlementStatus::*;

    if status == CorrectionsReceived {
        views.insert(ViewMode::Triage);
    }

    if matches!(status, CorrectionsAssigned | AddressingCorrections | CorrectionsQa) {
        views.insert(ViewMode::Assignment);
        views.insert(ViewMode::Progress);
    }

    if matches!(status, AddressingCorrections | CorrectionsQa) {
        views.insert(ViewMode::Progress);
    }

    let has_submissions = letter.items
        .iter()
        .any(|item| item.status == CorrectionItemStatus::ConsultantSubmitted);
    if status == CorrectionsQa || has_submissions {
        views.insert(ViewMode::Qa);
    }

    if matches!(status, CorrectionsQa | Resubmitted) {
        views.insert(ViewMode::Resubmittal);
    }

    views
}

/// First available view after `current` in tab order
pub fn next_view(current: ViewMode, available: &ViewSet) -> Option<ViewMode> {
    ViewMode::ALL
        .iter()
        .copied()
        .find(|view| *view > current && available.contains(view))
}

/// Last available view before `current` in tab order
pub fn previous_view(current: ViewMode, available: &ViewSet) -> Option<ViewMode> {
    ViewMode::ALL
        .iter()
        .rev()
        .copied()
        .find(|view| *view < current && available.contains(view))
}

/// Switch to `requested` when it is available, otherwise stay put
pub fn select_view(current: ViewMode, requested: ViewMode, available: &ViewSet) -> ViewMode {
    if available.contains(&requested) { requested } else { current }
}
