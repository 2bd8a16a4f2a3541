//! Edit pipeline benchmarks.
//!
//! Measures the pure merge + diff path and a full edit command against
//! address books of increasing size (the uniqueness check is a linear scan).
//!
//! # Running
//!
//! ```bash
//! cargo bench --bench edit_merge
//! # With a custom filter:
//! cargo bench --bench edit_merge -- execute
//! ```

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};

use modbook::{AddressBook, EditCommand, Index};
use modbook_core::{
    ContactRecord, EditDescriptor, Email, ModuleCode, ModuleRolePair, Name, Phone, RoleType, Tag,
    describe_changes, merge,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn person(i: usize) -> ContactRecord {
    let roles = ["CS1101S", "MA1521", "ST2334"]
        .iter()
        .take(i % 3 + 1)
        .map(|c| ModuleRolePair::new(ModuleCode::new(c).expect("code"), RoleType::Student))
        .collect();
    ContactRecord::new(Name::new(&format!("Person {i}")).expect("name"))
        .with_phone(Some(Phone::new(&format!("8{i:07}")).expect("phone")))
        .with_email(Some(Email::new(&format!("p{i}@example.com")).expect("email")))
        .with_tags([Tag::new("friends").expect("tag")].into_iter().collect())
        .with_roles(roles)
}

fn make_book(n: usize) -> AddressBook {
    let mut book = AddressBook::new();
    for i in 0..n {
        book.add(person(i));
    }
    book
}

fn descriptor() -> EditDescriptor {
    EditDescriptor::builder()
        .phone(Phone::new("99999999").expect("phone"))
        .tags([Tag::new("cs").expect("tag")])
        .role_edit("+CS2103T-TA".parse().expect("op"))
        .build()
}

// ---------------------------------------------------------------------------
// Benchmark: merge + diff (micro, no store)
// ---------------------------------------------------------------------------

fn bench_merge_and_diff(c: &mut Criterion) {
    let original = person(1);
    let descriptor = descriptor();

    c.bench_function("merge/merge_and_describe", |b| {
        b.iter(|| {
            let edited = merge(&original, &descriptor).expect("merge");
            describe_changes(&original, &edited)
        });
    });
}

// ---------------------------------------------------------------------------
// Benchmark: full edit command
// ---------------------------------------------------------------------------

fn bench_execute(c: &mut Criterion) {
    let mut group = c.benchmark_group("execute");

    for &n in &[10_usize, 1_000, 10_000] {
        let book = make_book(n);
        let command =
            EditCommand::new(Index::from_one_based(n / 2 + 1), descriptor()).expect("command");

        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::new("persons", n), &n, |b, _| {
            b.iter_batched(
                || book.clone(),
                |mut book| command.execute(&mut book).expect("edit"),
                criterion::BatchSize::LargeInput,
            );
        });
    }

    group.finish();
}

// ---------------------------------------------------------------------------
// Registration
// ---------------------------------------------------------------------------

criterion_group!(benches, bench_merge_and_diff, bench_execute);
criterion_main!(benches);
