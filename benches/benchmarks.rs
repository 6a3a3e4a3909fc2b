use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use json_users::{User, UserStore};
use std::hint::black_box;
use std::path::PathBuf;
use std::time::Duration;

fn bench_path(name: &str, size: usize) -> PathBuf {
    std::env::temp_dir().join(format!("json_users_bench_{}_{}.json", name, size))
}

fn user(i: usize) -> User {
    User {
        id: i as i64 + 1,
        name: format!("user{i}"),
        kind: "Reader".into(),
        age: 30,
        email: format!("user{i}@example.com"),
        phone: 55_663_214,
        city: "Dublin".into(),
    }
}

fn filled(name: &str, size: usize, pretty: bool) -> (UserStore, PathBuf) {
    let path = bench_path(name, size);
    let _ = std::fs::remove_file(&path);
    let store = UserStore::builder(&path).pretty(pretty).build().unwrap();
    store.extend((0..size).map(user)).unwrap();
    (store, path)
}

// Every create/remove rewrites the whole file, so cost grows with the store.
fn bench_create_remove(c: &mut Criterion) {
    let mut group = c.benchmark_group("create_remove");
    group.sample_size(30);
    for size in [10, 100, 1000] {
        group.bench_with_input(BenchmarkId::new("pretty", size), &size, |b, &size| {
            let (store, path) = filled("cr", size, true);
            b.iter(|| {
                let created = store.create(user(size)).unwrap();
                black_box(store.remove(created.id).unwrap());
            });
            let _ = std::fs::remove_file(&path);
        });
    }
}

fn bench_get(c: &mut Criterion) {
    let mut group = c.benchmark_group("get");
    for size in [100, 1000, 10_000] {
        group.bench_with_input(BenchmarkId::new("last", size), &size, |b, &size| {
            let (store, path) = filled("get", size, true);
            let last = size as i64;
            b.iter(|| black_box(store.get(last)));
            let _ = std::fs::remove_file(&path);
        });
    }
}

fn bench_flush(c: &mut Criterion) {
    let mut group = c.benchmark_group("flush");
    group.sample_size(50);
    group.measurement_time(Duration::from_secs(8));
    for size in [100, 1000, 10_000] {
        for pretty in [true, false] {
            let label = if pretty { "pretty" } else { "compact" };
            group.bench_with_input(BenchmarkId::new(label, size), &size, |b, &size| {
                let (store, path) = filled("flush", size, pretty);
                b.iter(|| store.flush().unwrap());
                let _ = std::fs::remove_file(&path);
            });
        }
    }
}

fn bench_open(c: &mut Criterion) {
    let mut group = c.benchmark_group("open");
    for size in [100, 1000, 10_000] {
        group.bench_with_input(BenchmarkId::new("pretty", size), &size, |b, &size| {
            let (_, path) = filled("open", size, true);
            b.iter(|| black_box(UserStore::open(&path).unwrap().len()));
            let _ = std::fs::remove_file(&path);
        });
    }
}

criterion_group!(benches, bench_create_remove, bench_get, bench_flush, bench_open);
criterion_main!(benches);
