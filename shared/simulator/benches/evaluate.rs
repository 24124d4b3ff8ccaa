use criterion::{black_box, criterion_group, criterion_main, Criterion};
use royale_simulator::bullet::Projectile;
use royale_simulator::collision::Obstacle;
use royale_simulator::constants::Constants;
use royale_simulator::order::UnitOrder;
use royale_simulator::simulation::Simulator;
use royale_simulator::unit::Unit;
use royale_simulator::vec::{vec2, Vec2Extras};
use royale_simulator::zone::Zone;

fn crowded() -> (Vec<Projectile>, Vec<Obstacle>) {
    let bullets = (0..20)
        .map(|i| {
            let position = vec2(12.0, 0.0).rotated(i as f64 * 0.31);
            let mut bullet = Projectile::new(i, 0, position, -position.normalize() * 30.0, 1.0);
            bullet.shooter_id = 100;
            bullet
        })
        .collect();
    let obstacles = (0..50)
        .map(|i| Obstacle::new(i, vec2(4.0 + i as f64 * 0.7, 0.0).rotated(i as f64 * 1.3), 1.0))
        .collect();
    (bullets, obstacles)
}

fn criterion_benchmark(c: &mut Criterion) {
    let sim = Simulator::new(Constants::default());
    let unit = Unit::new(0, vec2(0.0, 0.0), sim.constants());
    let zone = Zone::fixed(vec2(0.0, 0.0), 100.0);
    let (bullets, obstacles) = crowded();
    let order = UnitOrder::new(vec2(10.0, 2.0), vec2(0.0, 1.0), None);

    c.bench_function("evaluate", |b| {
        b.iter(|| {
            let mut scratch = bullets.clone();
            sim.evaluate(
                black_box(&unit),
                black_box(&order),
                &mut scratch,
                &obstacles,
                &zone,
                0,
            )
        })
    });
}

pub fn criterion_config() -> Criterion {
    Criterion::default()
        .sample_size(50)
        .measurement_time(core::time::Duration::from_secs(5))
}

criterion_group!(name = benches;
                 config = criterion_config();
                 targets = criterion_benchmark);
criterion_main!(benches);
