// Criterion benchmarks for MentorBee discovery

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use mentorbee::core::{
    DiscoverySession, GestureTracker, MatchPolicy, Point, RandomDecider, SessionConfig,
    SwipeEvent,
};
use mentorbee::models::{Candidate, Conversation, Role};

fn create_candidate(id: usize) -> Candidate {
    Candidate {
        id: id.to_string(),
        name: format!("Candidate {}", id),
        role: if id % 2 == 0 { Role::Mentor } else { Role::Mentee },
        category: "technology".to_string(),
        university: "Example University".to_string(),
        major: "Computer Science".to_string(),
        year: (id % 4) as u8 + 1,
        images: vec![format!("https://i.pravatar.cc/300?img={}", id % 70)],
        bio: String::new(),
        interests: vec!["Rust".to_string()],
        will_match: id % 7 == 0,
    }
}

fn bench_gesture_tracking(c: &mut Criterion) {
    c.bench_function("gesture_100_samples", |b| {
        b.iter(|| {
            let mut tracker = GestureTracker::default();
            tracker.start(Point::new(0.0, 0.0));
            for i in 0..100 {
                tracker.update(black_box(Point::new(i as f64 * 1.5, 2.0)));
            }
            black_box(tracker.hint());
            tracker.end()
        });
    });
}

fn bench_session(c: &mut Criterion) {
    let mut group = c.benchmark_group("session");

    for count in [10, 100, 1000].iter() {
        let candidates: Vec<Candidate> = (0..*count).map(create_candidate).collect();

        group.bench_with_input(BenchmarkId::new("swipe_through", count), count, |b, _| {
            b.iter(|| {
                let mut session = DiscoverySession::new(
                    SessionConfig::default(),
                    MatchPolicy::new(RandomDecider::seeded(7, 0.3)),
                );
                session.load("technology", candidates.clone());
                let mut sink: Vec<Conversation> = Vec::new();

                while !session.is_exhausted() {
                    session.pointer_down(Point::new(0.0, 0.0));
                    session.pointer_move(Point::new(140.0, 3.0));
                    session.pointer_up();
                    if let SwipeEvent::Matched { .. } = session.settle(&mut sink) {
                        session.acknowledge_match();
                    }
                }
                black_box(sink.len())
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_gesture_tracking, bench_session);

criterion_main!(benches);
