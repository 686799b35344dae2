use criterion::{criterion_group, criterion_main, Criterion};
use kiln_schema::{parse_context_str, DeploymentContext};
use std::hint::black_box;

const TEMPLATE: &str = r"---
apiVersion: apps/v1
kind: Deployment
metadata:
  name: bench-app
spec:
  selector:
    matchLabels:
      project: bench
  template:
    metadata:
      labels:
        pre_defined: foobar
    spec:
      containers:
      - name: app
        env:
        - name: Foo
          value: Bar
---
kind: Service
metadata:
  name: bench-app
spec:
  ports:
  - port: 80
";

fn context() -> DeploymentContext {
    parse_context_str(
        r#"
revision = "1a6f551a2ffa6d88e15eef5461384da0bfb1c194"
tag = "v123"
release_id = 7
deploy_id = 123
image = "registry.example.com/bench@sha256:5f1d7c7381b2e45ca73216d7b06004fdb0908ed7bb8786b62f2cdfa5035fde2c"
project = { id = 1, name = "bench" }
role = { id = 2, name = "app" }
deploy_group = { id = 3, name = "pod1" }
"#,
    )
    .unwrap()
}

fn bench_synthesize(c: &mut Criterion) {
    let ctx = context();
    c.bench_function("synthesize_deployment", |b| {
        b.iter(|| kiln_core::synthesize(black_box(TEMPLATE), black_box(&ctx)).unwrap());
    });
}

fn bench_synthesize_to_yaml(c: &mut Criterion) {
    let ctx = context();
    c.bench_function("synthesize_deployment_to_yaml", |b| {
        b.iter(|| {
            kiln_core::synthesize(black_box(TEMPLATE), black_box(&ctx))
                .unwrap()
                .to_yaml()
                .unwrap()
        });
    });
}

fn bench_parse_template(c: &mut Criterion) {
    c.bench_function("parse_template_two_sections", |b| {
        b.iter(|| kiln_schema::parse_template(black_box(TEMPLATE)).unwrap());
    });
}

criterion_group!(
    benches,
    bench_synthesize,
    bench_synthesize_to_yaml,
    bench_parse_template
);
criterion_main!(benches);
