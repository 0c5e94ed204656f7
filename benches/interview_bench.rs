//! Benchmarks for answer extraction, scoring and full interviews
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use raredex::conditions::{
    analyze_text, best_match, rank_conditions, ConditionCategory, ConditionTable, Vocabulary,
};
use raredex::config::InterviewConfig;
use raredex::interview::{extract, script, Interviewer, NoDelay, Phase};
use std::sync::Arc;

fn bench_extraction(c: &mut Criterion) {
    let mut group = c.benchmark_group("extraction");

    for text in ["25", "I'm in my 40s", "mid-thirties", "a teenager", "not sure"] {
        group.bench_function(format!("age_{}", text), |b| {
            b.iter(|| extract::extract_age(black_box(text)))
        });
    }

    let table = ConditionTable::standard();
    let vocabulary = Vocabulary::from_table(&table);
    let prompt = &script::prompts(Phase::GeneralScreening)[0];
    group.bench_function("symptoms_sentence", |b| {
        b.iter(|| {
            extract::extract_symptoms(
                black_box("lately it's mostly joint pain and some easy bruising, plus fatigue"),
                prompt,
                &vocabulary,
            )
        })
    });

    group.finish();
}

fn bench_scoring(c: &mut Criterion) {
    let mut group = c.benchmark_group("scoring");
    let table = ConditionTable::standard();
    let vocabulary = Vocabulary::from_table(&table);
    let collected = vec!["fatigue", "joint pain", "flexible joints", "dizziness"];

    group.bench_function("best_match_rare", |b| {
        let candidates = table.by_category(ConditionCategory::Rare);
        b.iter(|| best_match(black_box(&collected), &candidates))
    });

    group.bench_function("rank_all", |b| {
        let candidates = table.all();
        b.iter(|| rank_conditions(black_box(&collected), &candidates))
    });

    group.bench_function("analyze_text", |b| {
        b.iter(|| {
            analyze_text(
                black_box("Constant fatigue, joint pain and easy bruising for months, sometimes dizziness."),
                &table,
                &vocabulary,
            )
        })
    });

    group.finish();
}

fn bench_interview(c: &mut Criterion) {
    let mut group = c.benchmark_group("interview");
    let rt = tokio::runtime::Runtime::new().unwrap();
    let interviewer = Interviewer::new(InterviewConfig::default()).with_delay(Arc::new(NoDelay));

    let answers = [
        "I'm around 15", "girl", "yes", "flexible joints", "no", "no", "no", "yes", "yes", "no",
        "no", "no",
    ];

    group.bench_function("full_rare_path", |b| {
        b.iter(|| {
            rt.block_on(async {
                let mut session = interviewer.start();
                for answer in answers {
                    interviewer.respond(&mut session, black_box(answer)).await.unwrap();
                }
                session
            })
        })
    });

    group.finish();
}

criterion_group!(benches, bench_extraction, bench_scoring, bench_interview);
criterion_main!(benches);
