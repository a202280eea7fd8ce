use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::distributions::Alphanumeric;
use rand::Rng;
use smsz_core::AnimationConfig;
use smsz_gateway::MemoryGateway;
use smsz_session::SessionController;
use std::sync::Arc;

fn bench_session_cycle(c: &mut Criterion) {
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .unwrap();
    let texts: Vec<String> = (0..100)
        .map(|_| {
            rand::thread_rng()
                .sample_iter(&Alphanumeric)
                .take(160)
                .map(char::from)
                .collect()
        })
        .collect();

    c.bench_function("session_compress_decompress_100", |b| {
        b.iter(|| {
            rt.block_on(async {
                let gw = Arc::new(MemoryGateway::new().with_compressed_size(64));
                let session = SessionController::new(gw, AnimationConfig::default());
                for text in &texts {
                    black_box(session.compress(text).await);
                    black_box(session.decompress().await);
                }
            })
        })
    });

    c.bench_function("session_empty_input_1000", |b| {
        b.iter(|| {
            rt.block_on(async {
                let session = SessionController::new(Arc::new(MemoryGateway::new()), AnimationConfig::default());
                for _ in 0..1000 {
                    black_box(session.compress("   ").await);
                }
            })
        })
    });
}

criterion_group!(benches, bench_session_cycle);
criterion_main!(benches);
