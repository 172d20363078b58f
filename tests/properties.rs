// Property-based tests for the payable-days rules and the monetary split.
// CI: 256 cases (default). Soak: PROPTEST_CASES=10000 cargo test --release

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;

use vr_engine::calculation::{BusinessCalendar, calculate_benefit_totals, calculate_payable_days};
use vr_engine::config::RulesConfig;
use vr_engine::models::{Competency, WorkerRecord};
use vr_engine::reconciliation::{exclude_leave_of_absence, exclude_overseas};
use vr_engine::sources::NotedWorker;

fn config_256() -> ProptestConfig {
    ProptestConfig {
        cases: std::env::var("PROPTEST_CASES")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(256),
        failure_persistence: None,
        ..ProptestConfig::default()
    }
}

/// Any month of 2024-2026.
fn arb_competency() -> impl Strategy<Value = Competency> {
    (1u32..=12, 2024i32..=2026).prop_map(|(month, year)| Competency::new(month, year).unwrap())
}

/// A day inside `competency`, or a day of the month before.
fn arb_date_near(competency: Competency) -> impl Strategy<Value = NaiveDate> {
    let first = competency.first_day();
    (-31i64..competency.days_in_month() as i64)
        .prop_map(move |offset| first + chrono::Duration::days(offset))
}

fn arb_worker() -> impl Strategy<Value = (Competency, WorkerRecord)> {
    arb_competency().prop_flat_map(|competency| {
        (
            prop_oneof![Just("PR"), Just("SP"), Just("RJ")],
            prop::option::of(0u32..=31),
            0u32..=40,
            prop::option::of(arb_date_near(competency)),
            prop::option::of(arb_date_near(competency)),
            prop::option::of(prop_oneof![Just("OK"), Just(" ok "), Just("NÃO")]),
        )
            .prop_map(
                move |(state, standard_days, leave_days, admission, termination, notice)| {
                    let mut record =
                        WorkerRecord::new(1, &format!("SIND {} - TESTE", state), "ANALISTA");
                    record.state_code = Some(state.to_string());
                    record.standard_days = standard_days;
                    record.leave_days = leave_days;
                    record.admission_date = admission;
                    record.termination_date = termination;
                    record.notice_status = notice.map(str::to_string);
                    (competency, record)
                },
            )
    })
}

fn arb_rate() -> impl Strategy<Value = Decimal> {
    (0i64..=100_000).prop_map(|cents| Decimal::new(cents, 2))
}

proptest! {
    #![proptest_config(config_256())]

    #[test]
    fn payable_days_never_exceed_the_month((competency, record) in arb_worker()) {
        let calendar = BusinessCalendar::national();
        let result = calculate_payable_days(&record, competency, &calendar, &RulesConfig::default());

        if let Some(days) = result.payable_days {
            let ceiling = record
                .standard_days
                .unwrap_or(0)
                .max(calendar.business_days_in_month(competency));
            prop_assert!(days <= ceiling, "{} > {}", days, ceiling);
        }
    }

    #[test]
    fn baseline_only_pr_worker_is_clamped(
        standard_days in 0u32..=31,
        leave_days in 0u32..=40,
        competency in arb_competency(),
    ) {
        let mut record = WorkerRecord::new(1, "SITEPD PR - X", "ANALISTA");
        record.state_code = Some("PR".to_string());
        record.standard_days = Some(standard_days);
        record.leave_days = leave_days;

        let result = calculate_payable_days(
            &record,
            competency,
            &BusinessCalendar::national(),
            &RulesConfig::default(),
        );
        prop_assert_eq!(result.payable_days, Some(standard_days.saturating_sub(leave_days)));
    }

    #[test]
    fn null_baseline_stays_null_without_overrides(
        leave_days in 0u32..=40,
        competency in arb_competency(),
    ) {
        let mut record = WorkerRecord::new(1, "SITEPD PR - X", "ANALISTA");
        record.state_code = Some("PR".to_string());
        record.leave_days = leave_days;

        let result = calculate_payable_days(
            &record,
            competency,
            &BusinessCalendar::national(),
            &RulesConfig::default(),
        );
        prop_assert_eq!(result.payable_days, None);
    }

    #[test]
    fn monetary_split_is_exact(days in 0u32..=31, rate in arb_rate()) {
        let totals = calculate_benefit_totals(Some(days), Some(rate), &RulesConfig::default())
            .expect("both inputs present");

        prop_assert_eq!(totals.total_value, Decimal::from(days) * rate);
        prop_assert_eq!(totals.employer_cost + totals.employee_discount, totals.total_value);
        prop_assert_eq!(totals.employer_cost, totals.total_value * Decimal::new(8, 1));
        prop_assert_eq!(totals.employee_discount, totals.total_value * Decimal::new(2, 1));
    }

    #[test]
    fn leave_of_absence_never_survives(
        ids in prop::collection::vec(1u64..50, 0..30),
        on_leave in prop::collection::vec(1u64..50, 0..15),
    ) {
        let mut unique = ids.clone();
        unique.sort_unstable();
        unique.dedup();
        let records: Vec<WorkerRecord> = unique
            .iter()
            .map(|id| WorkerRecord::new(*id, "SINDPD SP - X", "ANALISTA"))
            .collect();
        let listed: Vec<NotedWorker> = on_leave
            .iter()
            .map(|id| NotedWorker { worker_id: *id, note: None })
            .collect();

        let outcome = exclude_leave_of_absence(records, &listed);
        prop_assert!(outcome.kept.iter().all(|r| !on_leave.contains(&r.worker_id)));
        prop_assert_eq!(outcome.kept.len() + outcome.excluded.len(), unique.len());
    }

    #[test]
    fn overseas_kept_iff_returned(
        ids in prop::collection::btree_set(1u64..50, 0..30),
        abroad in prop::collection::btree_map(1u64..50, any::<bool>(), 0..15),
    ) {
        let records: Vec<WorkerRecord> = ids
            .iter()
            .map(|id| WorkerRecord::new(*id, "SINDPD SP - X", "ANALISTA"))
            .collect();
        let listed: Vec<NotedWorker> = abroad
            .iter()
            .map(|(id, returned)| NotedWorker {
                worker_id: *id,
                note: Some(if *returned { "Retornou em 02/05" } else { "Expatriado" }.to_string()),
            })
            .collect();

        let outcome = exclude_overseas(records, &listed, "retornou");
        for id in &ids {
            let kept = outcome.kept.iter().any(|r| r.worker_id == *id);
            let expected = abroad.get(id).is_none_or(|returned| *returned);
            prop_assert_eq!(kept, expected, "worker {}", id);
        }
    }
}
