// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Criterion benchmarks for content digests and HTML sanitising in the
// emailstamp-security crate.

use criterion::{Criterion, black_box, criterion_group, criterion_main};

use emailstamp_core::Message;
use emailstamp_security::{compute_digest, escape_html, sanitize_html};

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

/// Benchmark the content digest at various body sizes.
///
/// Sizes: 1 KiB, 10 KiB, 100 KiB -- from a short note to a long newsletter.
fn bench_content_digest(c: &mut Criterion) {
    let sizes: &[(&str, usize)] = &[
        ("1 KiB", 1024),
        ("10 KiB", 10 * 1024),
        ("100 KiB", 100 * 1024),
    ];

    let mut group = c.benchmark_group("content_digest_sha256");
    for &(label, size) in sizes {
        let message = Message::new("Quarterly report", "x".repeat(size));
        group.bench_function(label, |b| {
            b.iter(|| {
                let digest = compute_digest(black_box(&message));
                black_box(digest);
            });
        });
    }
    group.finish();
}

/// Benchmark escaping and sanitising a markup-heavy fragment.
fn bench_html_cleaning(c: &mut Criterion) {
    let fragment = r#"<p onclick="x()">Hello <b>there</b><script>steal()</script> & <a href="javascript:void(0)">bye</a></p>"#
        .repeat(64);

    c.bench_function("escape_html (fragment x64)", |b| {
        b.iter(|| black_box(escape_html(black_box(&fragment))));
    });
    c.bench_function("sanitize_html (fragment x64)", |b| {
        b.iter(|| black_box(sanitize_html(black_box(&fragment))));
    });
}

criterion_group!(benches, bench_content_digest, bench_html_cleaning);
criterion_main!(benches);
