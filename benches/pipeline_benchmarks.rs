//! Performance benchmarks for the VR benefit engine.
//!
//! Targets, for a generated workforce:
//! - Single worker payable days: < 10μs mean
//! - Pipeline over 1,000 workers: < 10ms mean
//! - Pipeline over 30,000 workers: < 300ms mean
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use chrono::NaiveDate;
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use rust_decimal::Decimal;

use vr_engine::calculation::{BusinessCalendar, calculate_payable_days};
use vr_engine::config::{PipelineConfig, RulesConfig};
use vr_engine::models::{Competency, WorkerRecord};
use vr_engine::pipeline::run_pipeline;
use vr_engine::sources::{
    ActiveWorker, AdmissionEntry, LeaveDaysEntry, NotedWorker, SourceTables, StateRateEntry,
    StateWorkdaysEntry, TerminationEntry,
};

const UNIONS: [(&str, &str, i64, u32); 4] = [
    ("SINDPD SP - SIND.TRAB.EM PROC DADOS", "São Paulo", 3750, 22),
    ("SITEPD PR - SIND DOS TRAB EM EMPR PRIVADAS", "Paraná", 3500, 22),
    ("SINDPD RJ - SINDICATO PROFISSIONAIS DE PROC DADOS", "Rio de Janeiro", 3500, 21),
    ("SINDPPD RS - SINDICATO DOS TRAB. EM PROC. DE DADOS", "Rio Grande do Sul", 3500, 21),
];

/// Builds extracts for `size` workers with a realistic mix of events.
fn create_workforce(size: u64) -> SourceTables {
    let date = |day: u32| NaiveDate::from_ymd_opt(2025, 5, day);
    let mut tables = SourceTables {
        state_rates: UNIONS
            .iter()
            .map(|(_, name, cents, _)| StateRateEntry {
                state_name: name.to_string(),
                daily_rate: Decimal::new(*cents, 2),
            })
            .collect(),
        state_workdays: UNIONS
            .iter()
            .map(|(union, _, _, days)| StateWorkdaysEntry {
                union: union.to_string(),
                standard_days: *days,
            })
            .collect(),
        ..SourceTables::default()
    };

    for id in 1..=size {
        let (union, ..) = UNIONS[(id % 4) as usize];
        let job_title = if id % 97 == 0 { "DIRETOR" } else { "ANALISTA" };
        tables.active_workers.push(ActiveWorker {
            worker_id: id,
            union: union.to_string(),
            job_title: job_title.to_string(),
        });
        if id % 7 == 0 {
            tables.leave_days.push(LeaveDaysEntry {
                worker_id: id,
                leave_days: (id % 15) as u32,
            });
        }
        if id % 23 == 0 {
            tables.terminations.push(TerminationEntry {
                worker_id: id,
                termination_date: date((id % 28) as u32 + 1),
                notice_status: Some(if id % 2 == 0 { "OK" } else { "NÃO" }.to_string()),
            });
        }
        if id % 31 == 0 {
            tables.admissions.push(AdmissionEntry {
                worker_id: id,
                admission_date: date((id % 28) as u32 + 1),
            });
        }
        if id % 211 == 0 {
            tables.leave_of_absence.push(NotedWorker {
                worker_id: id,
                note: Some("retorno 20/05".to_string()),
            });
        }
        if id % 307 == 0 {
            tables.overseas.push(NotedWorker {
                worker_id: id,
                note: None,
            });
        }
    }
    tables
}

/// Benchmark: payable days for one worker.
///
/// Target: < 10μs mean
fn bench_single_worker(c: &mut Criterion) {
    let competency = Competency::new(5, 2025).unwrap();
    let calendar = BusinessCalendar::national();
    let rules = RulesConfig::default();
    let mut record = WorkerRecord::new(1, "SITEPD PR - X", "ANALISTA");
    record.state_code = Some("PR".to_string());
    record.standard_days = Some(22);
    record.leave_days = 3;
    record.termination_date = NaiveDate::from_ymd_opt(2025, 5, 20);

    c.bench_function("single_worker_payable_days", |b| {
        b.iter(|| {
            black_box(calculate_payable_days(
                black_box(&record),
                competency,
                &calendar,
                &rules,
            ))
        })
    });
}

/// Benchmark: full pipeline at several workforce sizes.
fn bench_pipeline_scaling(c: &mut Criterion) {
    let config = PipelineConfig::default();
    let competency = Competency::new(5, 2025).unwrap();

    let mut group = c.benchmark_group("pipeline");
    group.sample_size(10);

    for size in [1_000u64, 10_000, 30_000] {
        let tables = create_workforce(size);
        group.throughput(Throughput::Elements(size));
        group.bench_with_input(BenchmarkId::new("workers", size), &tables, |b, tables| {
            b.iter(|| black_box(run_pipeline(tables, &config, competency).unwrap()))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_single_worker, bench_pipeline_scaling);
criterion_main!(benches);
