//! Performance benchmarks for the employment credit engine.
//!
//! This benchmark suite covers:
//! - A single pipeline run with a three-year schedule
//! - Schedules of increasing length
//! - A single request through the HTTP router
//! - A batch of 100 requests through the HTTP router
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use employment_credit::api::{AppState, create_router};
use employment_credit::calculation::{run_clawback_schedule, run_credit_calculation};
use employment_credit::config::ConfigLoader;
use employment_credit::models::{
    ClawbackMethod, ClawbackOptions, CompanySize, CreditRequest, FollowUpYear, HeadcountInputs,
    Region,
};

use axum::{body::Body, http::Request};
use tower::ServiceExt;

/// Loads the shipped configuration.
fn load_config() -> ConfigLoader {
    ConfigLoader::load("./config/integrated_employment").expect("Failed to load config")
}

/// Creates follow-up years losing one employee per year from a base of 60.
fn create_follow_up_years(count: u32) -> Vec<FollowUpYear> {
    (1..=count)
        .map(|year_index| FollowUpYear {
            year_index,
            headcount_total: 60u32.saturating_sub(year_index),
            headcount_youth: None,
        })
        .collect()
}

fn create_credit_request(method: ClawbackMethod) -> CreditRequest {
    CreditRequest {
        company_size: CompanySize::SmallAndMedium,
        region: Region::Metro,
        tax_year: Some(2024),
        headcounts: HeadcountInputs {
            prev_total: 50,
            curr_total: 60,
            prev_youth: 10,
            curr_youth: 14,
            converted_regular: 2,
            returned_from_parental_leave: 1,
        },
        tax_before_credit: Some(120_000_000),
        industry: None,
        clawback: ClawbackOptions {
            method,
            tiered_thresholds: None,
            follow_up_years: Some(create_follow_up_years(3)),
        },
    }
}

fn request_body(index: usize) -> String {
    let method = ["proportional", "all_or_nothing", "tiered"][index % 3];
    serde_json::json!({
        "company_size": if index % 2 == 0 { "sme" } else { "mid_size" },
        "region": if index % 4 < 2 { "metro" } else { "non_metro" },
        "tax_year": 2024,
        "headcounts": {
            "prev_total": 50,
            "curr_total": 60 + (index % 10),
            "prev_youth": 10,
            "curr_youth": 14
        },
        "tax_before_credit": 120_000_000,
        "clawback": {
            "method": method,
            "follow_up_years": [
                { "year_index": 1, "headcount_total": 57 },
                { "year_index": 2, "headcount_total": 58 },
                { "year_index": 3, "headcount_total": 60 }
            ]
        }
    })
    .to_string()
}

/// Benchmark: One pipeline run per recapture method.
fn bench_pipeline(c: &mut Criterion) {
    let config = load_config();
    let params = config.get_policy(2024).expect("2024 policy");

    let mut group = c.benchmark_group("pipeline");
    for method in [
        ClawbackMethod::Proportional,
        ClawbackMethod::AllOrNothing,
        ClawbackMethod::Tiered,
    ] {
        let request = create_credit_request(method);
        group.bench_with_input(BenchmarkId::new("method", method), &request, |b, request| {
            b.iter(|| black_box(run_credit_calculation(black_box(request), params)))
        });
    }
    group.finish();
}

/// Benchmark: Schedule length scaling.
fn bench_schedule_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("schedule");

    for year_count in [1u32, 3, 10, 50].iter() {
        let years = create_follow_up_years(*year_count);
        group.throughput(Throughput::Elements(u64::from(*year_count)));
        group.bench_with_input(BenchmarkId::new("years", year_count), &years, |b, years| {
            b.iter(|| {
                black_box(run_clawback_schedule(
                    black_box(years),
                    8_400_000,
                    60,
                    *year_count,
                    ClawbackMethod::Proportional,
                    None,
                    1,
                ))
            })
        });
    }

    group.finish();
}

/// Benchmark: A single request through the router.
fn bench_single_request(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let router = create_router(AppState::new(load_config()));
    let body = request_body(0);

    c.bench_function("single_request", |b| {
        b.to_async(&rt).iter(|| async {
            let router = router.clone();
            let response = router
                .oneshot(
                    Request::builder()
                        .method("POST")
                        .uri("/calculate")
                        .header("Content-Type", "application/json")
                        .body(Body::from(body.clone()))
                        .unwrap(),
                )
                .await
                .unwrap();
            black_box(response)
        })
    });
}

/// Benchmark: Batch of 100 requests.
fn bench_batch_100(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let state = AppState::new(load_config());
    let requests: Vec<String> = (0..100).map(request_body).collect();

    let mut group = c.benchmark_group("batch_processing");
    group.throughput(Throughput::Elements(100));

    group.bench_function("batch_100", |b| {
        b.to_async(&rt).iter(|| async {
            let mut results = Vec::with_capacity(100);
            for body in &requests {
                let router = create_router(state.clone());
                let response = router
                    .oneshot(
                        Request::builder()
                            .method("POST")
                            .uri("/calculate")
                            .header("Content-Type", "application/json")
                            .body(Body::from(body.clone()))
                            .unwrap(),
                    )
                    .await
                    .unwrap();
                results.push(response);
            }
            black_box(results)
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_pipeline,
    bench_schedule_scaling,
    bench_single_request,
    bench_batch_100,
);
criterion_main!(benches);
