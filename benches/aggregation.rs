use chrono::NaiveDate;
use criterion::{Criterion, criterion_group, criterion_main};
use firetrack::{
    filters::ProjectFilter,
    stats,
    types::{ManagerName, ProjectCategory, ProjectRecord},
};
use std::hint::black_box;

const MANAGERS: [&str; 5] = ["Alice", "Bob", "Carla", "Dev", "Emma"];

fn create_test_projects(count: usize) -> Vec<ProjectRecord> {
    let base_date = NaiveDate::from_ymd_opt(2022, 1, 1).unwrap();

    (0..count)
        .map(|i| {
            let booked = base_date + chrono::Duration::days((i % 700) as i64);
            let mut project = ProjectRecord::new(i.to_string());
            project.pm_name = Some(ManagerName::new(MANAGERS[i % MANAGERS.len()]));
            project.contract_amount = Some(10_000.0 + (i as f64) * 125.0);
            project.margin_start = Some(18.0 + (i % 7) as f64);
            project.margin_end = Some(20.0 + (i % 5) as f64);
            project.booked = Some(booked);
            // Every fourth project is still open
            if i % 4 != 0 {
                project.closed = Some(booked + chrono::Duration::days(14 + (i % 90) as i64));
            }
            project.project_type = Some(if i % 3 == 0 { "Retrofit" } else { "Prime" }.to_string());
            project
        })
        .collect()
}

fn benchmark_global_stats(c: &mut Criterion) {
    let mut group = c.benchmark_group("global_stats");

    for count in [100, 10_000] {
        let projects = create_test_projects(count);
        group.bench_function(format!("aggregate_{count}_projects"), |b| {
            b.iter(|| {
                let _result = stats::aggregate(black_box(&projects), None);
            });
        });
    }

    group.finish();
}

fn benchmark_manager_stats(c: &mut Criterion) {
    let mut group = c.benchmark_group("manager_stats");
    let projects = create_test_projects(10_000);

    group.bench_function("aggregate_single_manager", |b| {
        b.iter(|| {
            let _result = stats::aggregate(black_box(&projects), Some(black_box("Carla")));
        });
    });

    group.bench_function("aggregate_by_manager", |b| {
        b.iter(|| {
            let _result = stats::aggregate_by_manager(black_box(&projects));
        });
    });

    group.finish();
}

fn benchmark_filtering(c: &mut Criterion) {
    let projects = create_test_projects(10_000);
    let filter = ProjectFilter::new()
        .with_category(ProjectCategory::Retrofit)
        .with_booked_since(NaiveDate::from_ymd_opt(2023, 1, 1).unwrap());

    c.bench_function("filter_retrofit_since_2023", |b| {
        b.iter(|| {
            let _result = filter.apply(black_box(&projects));
        });
    });
}

criterion_group!(
    benches,
    benchmark_global_stats,
    benchmark_manager_stats,
    benchmark_filtering
);
criterion_main!(benches);
