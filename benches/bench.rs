// Criterion benchmarks for TinDog Algo

use chrono::{NaiveDate, NaiveTime};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use tindog_algo::core::{
    availability::compute_available_slots,
    distance::{calculate_bounding_box, haversine_distance},
    matching::score_compatibility,
    triage::score_triage,
    Matcher,
};
use tindog_algo::models::{
    ActivityLevel, BookedInterval, DayRule, DogGender, DogProfile, DogSize, GeoPoint,
    TriageAnswer, TriageResponse, WeeklySchedule,
};

fn create_candidate(id: usize, lat: f64, lon: f64) -> DogProfile {
    DogProfile {
        dog_id: id.to_string(),
        name: format!("Dog {}", id),
        owner_id: format!("owner_{}", id),
        size: match id % 5 {
            0 => DogSize::Toy,
            1 => DogSize::Small,
            2 => DogSize::Medium,
            3 => DogSize::Large,
            _ => DogSize::Giant,
        },
        birth_date: NaiveDate::from_ymd_opt(2017 + (id % 7) as i32, 1, 1).unwrap(),
        activity_level: match id % 4 {
            0 => ActivityLevel::Low,
            1 => ActivityLevel::Moderate,
            2 => ActivityLevel::High,
            _ => ActivityLevel::VeryHigh,
        },
        temperament: vec!["friendly".to_string(), "playful".to_string()],
        gender: if id % 2 == 0 {
            DogGender::Female
        } else {
            DogGender::Male
        },
        owner_location: Some(GeoPoint {
            latitude: lat,
            longitude: lon,
        }),
        is_active: true,
    }
}

fn as_of() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
}

fn bench_haversine_distance(c: &mut Criterion) {
    let milan = GeoPoint {
        latitude: 45.4642,
        longitude: 9.1900,
    };
    let bergamo = GeoPoint {
        latitude: 45.6983,
        longitude: 9.6773,
    };

    c.bench_function("haversine_distance", |b| {
        b.iter(|| haversine_distance(black_box(&milan), black_box(&bergamo)));
    });
}

fn bench_bounding_box(c: &mut Criterion) {
    let milan = GeoPoint {
        latitude: 45.4642,
        longitude: 9.1900,
    };

    c.bench_function("bounding_box_calculation", |b| {
        b.iter(|| calculate_bounding_box(black_box(&milan), black_box(50.0)));
    });
}

fn bench_available_slots(c: &mut Criterion) {
    let schedule = WeeklySchedule::new(vec![DayRule {
        day_of_week: 1,
        start_time: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
        end_time: NaiveTime::from_hms_opt(20, 0, 0).unwrap(),
        is_available: true,
    }]);
    let monday = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();

    let bookings: Vec<BookedInterval> = (0..12)
        .map(|i| BookedInterval {
            start: monday
                .and_time(NaiveTime::from_hms_opt(8 + i, 0, 0).unwrap())
                .and_utc(),
            duration_minutes: 30,
        })
        .collect();

    c.bench_function("compute_available_slots_busy_day", |b| {
        b.iter(|| {
            compute_available_slots(
                black_box(&schedule),
                black_box(&bookings),
                black_box(monday),
                black_box(30),
            )
        });
    });
}

fn bench_compatibility_score(c: &mut Criterion) {
    let a = create_candidate(1, 45.4642, 9.1900);
    let b_profile = create_candidate(2, 45.4700, 9.2000);

    c.bench_function("score_compatibility", |b| {
        b.iter(|| {
            score_compatibility(
                black_box(&a),
                black_box(&b_profile),
                black_box(as_of()),
            )
        });
    });
}

fn bench_find_matches(c: &mut Criterion) {
    let matcher = Matcher::with_default_weights();
    let subject = create_candidate(0, 45.4642, 9.1900);

    let mut group = c.benchmark_group("find_matches");
    for size in [100usize, 500, 1000] {
        let candidates: Vec<DogProfile> = (1..=size)
            .map(|i| {
                create_candidate(
                    i,
                    45.4642 + (i as f64 % 100.0) * 0.005,
                    9.1900 + (i as f64 % 100.0) * 0.005,
                )
            })
            .collect();

        group.bench_with_input(BenchmarkId::from_parameter(size), &candidates, |b, cands| {
            b.iter(|| {
                matcher.find_matches(
                    black_box(&subject),
                    black_box(cands.clone()),
                    black_box(&[]),
                    black_box(as_of()),
                    black_box(20),
                )
            });
        });
    }
    group.finish();
}

fn bench_triage_score(c: &mut Criterion) {
    let responses = vec![
        TriageResponse {
            question_id: "breathing_difficulty".to_string(),
            answer: TriageAnswer::Bool(false),
        },
        TriageResponse {
            question_id: "severe_bleeding".to_string(),
            answer: TriageAnswer::Bool(false),
        },
        TriageResponse {
            question_id: "is_alert".to_string(),
            answer: TriageAnswer::Bool(true),
        },
        TriageResponse {
            question_id: "pain_level".to_string(),
            answer: TriageAnswer::Value(4),
        },
        TriageResponse {
            question_id: "symptom_duration".to_string(),
            answer: TriageAnswer::Value(1),
        },
    ];

    c.bench_function("score_triage", |b| {
        b.iter(|| score_triage(black_box(&responses)));
    });
}

criterion_group!(
    benches,
    bench_haversine_distance,
    bench_bounding_box,
    bench_available_slots,
    bench_compatibility_score,
    bench_find_matches,
    bench_triage_score
);
criterion_main!(benches);
