use std::hint::black_box;
use std::sync::Arc;

use criterion::{criterion_group, criterion_main, Criterion};
use ente_provider::{Component, ComponentFactory, ComponentType, Entity, Provider};

const LOGGER: ComponentType = ComponentType::new("Logger");
static LOGGER_TYPES: [ComponentType; 1] = [LOGGER];

struct Course;

struct Logger {
    entity: Entity<Course>,
}

impl Component<Course> for Logger {
    fn entity(&self) -> &Entity<Course> {
        &self.entity
    }

    fn component_types(&self) -> &[ComponentType] {
        &LOGGER_TYPES
    }
}

fn logger_factory(count: usize) -> Arc<ComponentFactory<Course>> {
    Arc::new(ComponentFactory::new().attach(LOGGER, move |entity: &Entity<Course>| {
        Ok((0..count)
            .map(|_| {
                Arc::new(Logger {
                    entity: entity.clone(),
                }) as Arc<dyn Component<Course>>
            })
            .collect())
    }))
}

fn bench_components_of_type(c: &mut Criterion) {
    let factory = logger_factory(64);

    let mut group = c.benchmark_group("Provider");

    group.bench_function("Cached (64 components)", |b| {
        let provider = Provider::new(Arc::new(Course), factory.clone());
        provider.components_of_type(&LOGGER).unwrap();
        b.iter(|| black_box(provider.components_of_type(&LOGGER).unwrap()));
    });

    // Build and validation on a fresh provider each time.
    group.bench_function("Cold (64 components)", |b| {
        b.iter(|| {
            let provider = Provider::new(Arc::new(Course), factory.clone());
            black_box(provider.components_of_type(&LOGGER).unwrap())
        });
    });

    group.finish();
}

criterion_group!(benches, bench_components_of_type);
criterion_main!(benches);
