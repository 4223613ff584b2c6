#![allow(dead_code)]

use criterion::{criterion_group, criterion_main, Criterion};
use injecd::{injecd, spawn_container, InstantiateErrorKind};
use std::sync::Arc;

fn criterion_benchmark(c: &mut Criterion) {
    c.bench_function("resolve_instance", |b| {
        struct A;

        let tag = injecd::<Arc<A>>();
        let container = spawn_container();
        container.register_instance(&tag, Arc::new(A));

        b.iter(|| container.resolve(&tag).unwrap());
    })
    .bench_function("resolve_transient_single", |b| {
        struct A;

        let tag = injecd::<A>();
        let container = spawn_container();
        container.register_factory(&tag, || Ok::<_, InstantiateErrorKind>(A));

        b.iter(|| container.resolve(&tag).unwrap());
    })
    .bench_function("resolve_transient_many", |b| {
        struct A(B, C);
        struct B(i32);
        struct C(CA);
        struct CA(CAA);
        struct CAA;

        let a = injecd::<A>();
        let b_tag = injecd::<B>();
        let c_tag = injecd::<C>();
        let ca = injecd::<CA>();
        let caa = injecd::<CAA>();

        let container = spawn_container();
        container
            .register_factory(&caa, || Ok::<_, InstantiateErrorKind>(CAA))
            .register_factory(&ca, move || Ok::<_, InstantiateErrorKind>(CA(caa.resolve_required()?)))
            .register_factory(&c_tag, move || Ok::<_, InstantiateErrorKind>(C(ca.resolve_required()?)))
            .register_factory(&b_tag, || Ok::<_, InstantiateErrorKind>(B(2)))
            .register_factory(&a, move || Ok::<_, InstantiateErrorKind>(A(b_tag.resolve_required()?, c_tag.resolve_required()?)));

        b.iter(|| container.resolve(&a).unwrap());
    })
    .bench_function("resolve_singleton", |b| {
        struct A;

        let tag = injecd::<Arc<A>>();
        let container = spawn_container();
        container.register_factory_singleton(&tag, || Ok::<_, InstantiateErrorKind>(Arc::new(A)));

        b.iter(|| container.resolve(&tag).unwrap());
    })
    .bench_function("resolve_unregistered_optional", |b| {
        let tag = injecd::<u8>();
        let container = spawn_container();

        b.iter(|| container.resolve_factory(|| tag.resolve_optional()).unwrap());
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
