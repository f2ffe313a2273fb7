#[cfg(test)]
mod tests {
    use log::debug;

    use crate::analysis::corrections::*;
    use crate::config::Thresholds;
    use crate::models::correction::{
        CorrectionDiscipline,
        CorrectionItem,
        CorrectionItemStatus,
        CorrectionSeverity,
    };
    use crate::tests::support::{ days_from_now, item, letter, letter_with_progress, now, setup };

    fn ids(items: &[CorrectionItem]) -> Vec<&str> {
        items
            .iter()
            .map(|i| i.id.as_str())
            .collect()
    }

    #[test]
    fn test_percent_complete() {
        setup();
        assert_eq!(percent_complete(&letter_with_progress(10, 3)), 30);
        assert_eq!(percent_complete(&letter_with_progress(0, 0)), 0);
        assert_eq!(percent_complete(&letter_with_progress(3, 2)), 67);
        assert_eq!(percent_complete(&letter_with_progress(3, 1)), 33);
        assert_eq!(percent_complete(&letter_with_progress(8, 1)), 13);
        assert_eq!(percent_complete(&letter_with_progress(4, 4)), 100);
    }

    #[test]
    fn test_percent_complete_never_decreases() {
        let mut letter = letter_with_progress(7, 0);
        let mut last = percent_complete(&letter);
        for i in 0..letter.items.len() {
            letter.items[i].status = CorrectionItemStatus::Completed;
            let percent = percent_complete(&letter);
            debug!("{} of 7 completed -> {}%", i + 1, percent);
            assert!(percent >= last);
            last = percent;
        }
        assert_eq!(last, 100);
    }

    #[test]
    fn test_counts_are_derived_from_items() {
        let mut letter = letter_with_progress(5, 2);
        letter.items[4].status = CorrectionItemStatus::NotStarted;

        assert_eq!(letter.total_items(), 5);
        assert_eq!(letter.items_completed(), 2);
        assert_eq!(letter.items_in_progress(), 2);
        assert_eq!(letter.items_not_started(), 1);
        assert!(!letter.is_complete());
    }

    #[test]
    fn test_overdue_item_is_at_risk() {
        setup();
        let thresholds = Thresholds::default();
        let overdue = item("C-01", CorrectionSeverity::Minor, CorrectionItemStatus::InProgress, Some(-2));
        assert!(is_item_at_risk(&overdue, now(), &thresholds));

        let mut done = overdue.clone();
        done.status = CorrectionItemStatus::Completed;
        assert!(!is_item_at_risk(&done, now(), &thresholds));

        let undated = item("C-02", CorrectionSeverity::Critical, CorrectionItemStatus::NotStarted, None);
        assert!(!is_item_at_risk(&undated, now(), &thresholds));

        let urgent = item("C-03", CorrectionSeverity::Minor, CorrectionItemStatus::NotStarted, Some(2));
        assert!(is_item_at_risk(&urgent, now(), &thresholds));
    }

    #[test]
    fn test_stale_item_is_at_risk() {
        let thresholds = Thresholds::default();
        let mut stale = item("C-01", CorrectionSeverity::Major, CorrectionItemStatus::InProgress, Some(4));
        stale.updated_at = days_from_now(-4);
        assert!(is_item_at_risk(&stale, now(), &thresholds));

        let fresh = item("C-02", CorrectionSeverity::Major, CorrectionItemStatus::InProgress, Some(4));
        assert!(!is_item_at_risk(&fresh, now(), &thresholds));

        let mut distant = item("C-03", CorrectionSeverity::Major, CorrectionItemStatus::InProgress, Some(6));
        distant.updated_at = days_from_now(-10);
        assert!(!is_item_at_risk(&distant, now(), &thresholds));
    }

    #[test]
    fn test_letter_at_risk() {
        let thresholds = Thresholds::default();
        let calm = || item("C-01", CorrectionSeverity::Minor, CorrectionItemStatus::InProgress, Some(10));

        let mut overdue = letter(vec![calm()]);
        overdue.response_due_date = Some(days_from_now(-1));
        assert!(is_letter_at_risk(&overdue, now(), &thresholds));

        let mut due_soon = letter(vec![calm()]);
        due_soon.response_due_date = Some(days_from_now(2));
        assert!(is_letter_at_risk(&due_soon, now(), &thresholds));

        let mut finished = letter_with_progress(3, 3);
        finished.response_due_date = Some(days_from_now(2));
        assert!(!is_letter_at_risk(&finished, now(), &thresholds));

        let mut relaxed = letter(vec![calm()]);
        relaxed.response_due_date = Some(days_from_now(10));
        assert!(!is_letter_at_risk(&relaxed, now(), &thresholds));

        let risky = item("C-02", CorrectionSeverity::Minor, CorrectionItemStatus::NotStarted, Some(-1));
        let mut with_risky_item = letter(vec![calm(), risky.clone()]);
        with_risky_item.response_due_date = Some(days_from_now(10));
        assert!(is_letter_at_risk(&with_risky_item, now(), &thresholds));

        // no response date: item risk alone decides
        let undated = letter(vec![calm(), risky]);
        assert!(is_letter_at_risk(&undated, now(), &thresholds));
        assert!(!is_letter_at_risk(&letter(vec![calm()]), now(), &thresholds));
    }

    #[test]
    fn test_sort_by_priority() {
        setup();
        let thresholds = Thresholds::default();
        let items = vec![
            item("C", CorrectionSeverity::Major, CorrectionItemStatus::InProgress, Some(6)),
            item("B", CorrectionSeverity::Critical, CorrectionItemStatus::InProgress, Some(10)),
            item("E", CorrectionSeverity::Critical, CorrectionItemStatus::NotStarted, None),
            item("A", CorrectionSeverity::Minor, CorrectionItemStatus::InProgress, Some(-1)),
            item("D", CorrectionSeverity::Critical, CorrectionItemStatus::InProgress, Some(8))
        ];

        let sorted = sort_by_priority(&items, now(), &thresholds);
        assert_eq!(ids(&sorted), vec!["A", "D", "B", "E", "C"]);
        // input untouched
        assert_eq!(ids(&items), vec!["C", "B", "E", "A", "D"]);
    }

    #[test]
    fn test_sort_is_idempotent_and_puts_risk_first() {
        let thresholds = Thresholds::default();
        let mut items = Vec::new();
        for (n, due) in [Some(-3), Some(12), None, Some(1), Some(9), Some(-1), Some(4)].into_iter().enumerate() {
            let severity = CorrectionSeverity::ALL[n % 3];
            items.push(item(&format!("C-{:02}", n), severity, CorrectionItemStatus::InProgress, due));
        }

        let once = sort_by_priority(&items, now(), &thresholds);
        let twice = sort_by_priority(&once, now(), &thresholds);
        assert_eq!(once, twice);

        let risks: Vec<bool> = once
            .iter()
            .map(|i| is_item_at_risk(i, now(), &thresholds))
            .collect();
        let first_calm = risks.iter().position(|r| !r).unwrap_or(risks.len());
        assert!(risks[first_calm..].iter().all(|r| !r));
        assert_eq!(first_calm, 3);
    }

    #[test]
    fn test_breakdown_and_grouping() {
        let mut items = vec![
            item("1", CorrectionSeverity::Minor, CorrectionItemStatus::NotStarted, None),
            item("2", CorrectionSeverity::Minor, CorrectionItemStatus::ConsultantSubmitted, None),
            item("3", CorrectionSeverity::Major, CorrectionItemStatus::ConsultantSubmitted, None),
            item("4", CorrectionSeverity::Major, CorrectionItemStatus::Completed, None)
        ];
        items[1].discipline = CorrectionDiscipline::Structural;
        items[2].estimated_effort_hours = Some(6.5);
        items[3].estimated_effort_hours = Some(2.0);
        let letter = letter(items);

        let breakdown = status_breakdown(&letter);
        assert_eq!(breakdown.get(CorrectionItemStatus::ConsultantSubmitted), 2);
        assert_eq!(breakdown.not_started, 1);
        assert_eq!(breakdown.completed, 1);
        assert_eq!(breakdown.total(), 4);

        let by_status = group_items_by_status(&letter.items);
        assert_eq!(by_status.len(), CorrectionItemStatus::ALL.len());
        assert_eq!(by_status[&CorrectionItemStatus::ConsultantSubmitted].len(), 2);
        assert!(by_status[&CorrectionItemStatus::InternalReview].is_empty());

        let by_discipline = group_items_by_discipline(&letter.items);
        assert_eq!(by_discipline.len(), 2);
        assert_eq!(by_discipline[&CorrectionDiscipline::Civil].len(), 3);

        assert!((total_effort_hours(&letter.items) - 8.5).abs() < 1e-9);
    }

    #[test]
    fn test_summarize_letter() {
        let thresholds = Thresholds::default();
        let mut letter = letter_with_progress(4, 1);
        letter.items[3].due_date = Some(days_from_now(-2));
        letter.round_number = 2;

        let summary = summarize_letter(&letter, now(), &thresholds);
        assert_eq!(summary.round_number, 2);
        assert_eq!(summary.total_items, 4);
        assert_eq!(summary.items_completed, 1);
        assert_eq!(summary.items_in_progress, 3);
        assert_eq!(summary.percent_complete, 25);
        assert_eq!(summary.at_risk_items, 1);
        assert!(summary.at_risk);
    }
}
