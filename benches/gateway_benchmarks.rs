//! Performance benchmarks for promptgate
//!
//! Measures the per-request cost of every protective layer a prompt
//! passes through: admission, cache fingerprinting and lookups, credential
//! cryptography, and deadline tracking.

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;
use std::time::Duration;
use tokio::runtime::Runtime;

use promptgate::core::response_cache::CacheKey;
use promptgate::{
    CredentialVault, EncryptionSecret, PromptMessage, PromptRequest, ProviderKind,
    ProviderResponse, RateLimiter, RateLimits, ResponseCache, TimeoutGuard, Usage,
};

fn sample_request(prompt: &str) -> PromptRequest {
    PromptRequest {
        request_id: None,
        model: "gpt-4o".to_string(),
        messages: vec![
            PromptMessage::system("You are a helpful assistant."),
            PromptMessage::user(prompt),
        ],
        temperature: Some(0.2),
        max_tokens: Some(256),
        stream: false,
    }
}

fn sample_response(content: &str) -> ProviderResponse {
    ProviderResponse {
        id: "resp-bench".to_string(),
        model: "gpt-4o".to_string(),
        created: 1_700_000_000,
        content: content.to_string(),
        usage: Some(Usage::new(64, 128)),
    }
}

/// Benchmark cache lookups and stores across capacities
fn bench_cache_operations(c: &mut Criterion) {
    let mut group = c.benchmark_group("cache_operations");

    for cache_size in [100, 1000, 10000].iter() {
        group.bench_with_input(
            BenchmarkId::new("cache_hit", cache_size),
            cache_size,
            |b, &size| {
                let cache = ResponseCache::new(size, Duration::from_secs(3600)).unwrap();
                let request = sample_request("benchmark prompt");
                cache.set(
                    ProviderKind::OpenAi,
                    "ws-bench",
                    &request,
                    &sample_response("cached answer"),
                );

                b.iter(|| black_box(cache.get(ProviderKind::OpenAi, "ws-bench", &request)));
            },
        );

        group.bench_with_input(
            BenchmarkId::new("cache_set", cache_size),
            cache_size,
            |b, &size| {
                let cache = ResponseCache::new(size, Duration::from_secs(3600)).unwrap();
                let response = sample_response("fresh answer");
                let mut counter = 0u64;

                // Distinct prompts per iteration, so stores keep evicting
                // once the cache fills
                b.iter(|| {
                    counter += 1;
                    let request = sample_request(&format!("benchmark prompt {}", counter));
                    cache.set(ProviderKind::OpenAi, "ws-bench", &request, &response);
                    black_box(())
                });
            },
        );
    }

    group.finish();
}

/// Benchmark request fingerprinting
fn bench_fingerprint(c: &mut Criterion) {
    let mut group = c.benchmark_group("fingerprint");
    group.throughput(Throughput::Elements(1));

    let request = sample_request("How do fixed windows compare to sliding windows?");

    group.bench_function("for_request", |b| {
        b.iter(|| {
            black_box(CacheKey::for_request(
                ProviderKind::OpenAi,
                "ws-bench",
                &request,
            ))
        });
    });

    // Identical prompts from different workspaces must hash independently
    let mut counter = 0u64;
    group.bench_function("for_request_distinct_workspaces", |b| {
        b.iter(|| {
            counter += 1;
            let workspace_id = format!("ws-{}", counter % 1000);
            black_box(CacheKey::for_request(
                ProviderKind::OpenAi,
                &workspace_id,
                &request,
            ))
        });
    });

    group.finish();
}

/// Benchmark admission decisions
fn bench_rate_limiter(c: &mut Criterion) {
    let mut group = c.benchmark_group("rate_limiter");
    group.throughput(Throughput::Elements(1));

    // Limits far above what the loop can consume, so every call is allowed
    let limits = RateLimits::new(u32::MAX, u32::MAX, u32::MAX);

    group.bench_function("check_and_record_hot_workspace", |b| {
        let limiter = RateLimiter::new();

        b.iter(|| black_box(limiter.check_and_record("ws-hot", &limits)));
    });

    group.bench_function("check_and_record_spread_workspaces", |b| {
        let limiter = RateLimiter::new();
        let mut counter = 0u64;

        b.iter(|| {
            counter += 1;
            let key = format!("ws-{}", counter % 500);
            black_box(limiter.check_and_record(&key, &limits))
        });
    });

    group.bench_function("check_only", |b| {
        let limiter = RateLimiter::new();
        limiter.record("ws-readonly");

        b.iter(|| black_box(limiter.check("ws-readonly", &limits)));
    });

    group.finish();
}

/// Benchmark credential cryptography
fn bench_vault(c: &mut Criterion) {
    let secret =
        EncryptionSecret::new("benchmark-secret-0123456789abcdefghij").expect("valid secret");

    // Key derivation is deliberately slow; keep the sample count down
    let mut derivation = c.benchmark_group("vault_derivation");
    derivation.sample_size(10);
    derivation.bench_function("derive_cipher_key", |b| {
        b.iter(|| black_box(CredentialVault::new(&secret).unwrap()));
    });
    derivation.finish();

    let mut group = c.benchmark_group("vault_operations");
    group.throughput(Throughput::Elements(1));

    let vault = CredentialVault::new(&secret).expect("vault from secret");
    let plaintext = "sk-benchmark-api-key-0123456789";
    let encrypted = vault.encrypt_api_key(plaintext).expect("encrypts");

    group.bench_function("encrypt_api_key", |b| {
        b.iter(|| black_box(vault.encrypt_api_key(plaintext).unwrap()));
    });

    group.bench_function("decrypt_api_key", |b| {
        b.iter(|| black_box(vault.decrypt_api_key(&encrypted).unwrap()));
    });

    group.finish();
}

/// Benchmark deadline tracking overhead on calls that never time out
fn bench_timeout_guard(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let mut group = c.benchmark_group("timeout_guard");
    group.throughput(Throughput::Elements(1));

    group.bench_function("with_timeout_ready_future", |b| {
        let guard = TimeoutGuard::new();

        b.iter(|| {
            rt.block_on(async {
                black_box(
                    guard
                        .with_timeout("bench", Duration::from_secs(1), |_cancel| async { Ok(42) })
                        .await
                        .unwrap(),
                )
            })
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_cache_operations,
    bench_fingerprint,
    bench_rate_limiter,
    bench_vault,
    bench_timeout_guard
);

criterion_main!(benches);
