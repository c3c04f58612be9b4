use criterion::{criterion_group, criterion_main, Criterion};
use quadsubdiv::{Point2f, Rect, Subdivision};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

pub fn criterion_benchmark(c: &mut Criterion) {
  let mut rng = SmallRng::seed_from_u64(0xdeadbeef);
  let mut sub = Subdivision::new();
  sub.init(Rect::new(0, 0, 1000, 1000)).unwrap();
  for _ in 0..1000 {
    let x: f32 = rng.gen_range(0.0..1000.0);
    let y: f32 = rng.gen_range(0.0..1000.0);
    sub.insert(Point2f::new(x, y)).unwrap();
  }

  c.bench_function("locate(1e3 vertices)", |b| {
    b.iter(|| {
      let x: f32 = rng.gen_range(0.0..1000.0);
      let y: f32 = rng.gen_range(0.0..1000.0);
      sub.locate(Point2f::new(x, y))
    })
  });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
