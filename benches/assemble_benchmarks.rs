use criterion::{black_box, criterion_group, criterion_main, Criterion};
use dnsgraph::{Entity, GraphAssembler, GraphRow, Relationship, RelationshipRollup, DomainRow};

fn make_rows(n: usize) -> Vec<GraphRow> {
    (0..n)
        .map(|i| {
            let domain = Entity::new(format!("{}", i % 100), "DnsName")
                .with_property("name", format!("d{}.com", i % 100));
            let host = Entity::new(format!("{}", 1000 + i % 500), "Hostname")
                .with_property("name", format!("h{}.net", i % 500));
            GraphRow::new(domain, Relationship::new("RESOLVES_TO"), host)
        })
        .collect()
}

fn make_domain_rows(n: usize) -> Vec<DomainRow> {
    (0..n)
        .map(|i| {
            let mut row = DomainRow::new(format!("d{}.com", i));
            for j in 0..20 {
                row = row.with_adjacent(
                    Entity::new(format!("{}", i * 100 + j), "CommandRun")
                        .with_property("key", format!("run-{}", j % 5)),
                );
            }
            row
        })
        .collect()
}

fn bench_assemble(c: &mut Criterion) {
    let rows = make_rows(10_000);
    c.bench_function("assemble_10k_rows", |b| {
        b.iter(|| {
            GraphAssembler::new()
                .assemble(black_box(rows.clone()), None)
                .unwrap()
        })
    });
}

fn bench_rollup(c: &mut Criterion) {
    let rows = make_domain_rows(1_000);
    c.bench_function("rollup_1k_domains", |b| {
        b.iter(|| {
            RelationshipRollup::new()
                .summarize(black_box(rows.clone()), None)
                .unwrap()
        })
    });
}

criterion_group!(benches, bench_assemble, bench_rollup);
criterion_main!(benches);
