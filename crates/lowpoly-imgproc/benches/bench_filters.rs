use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use lowpoly_image::Image;
use lowpoly_imgproc::{
    filter::{blur, BlurMode, DEFAULT_BOX_PASSES},
    parallel::ExecutionStrategy,
};

fn bench_filters(c: &mut Criterion) {
    let mut group = c.benchmark_group("Gaussian Blur");

    for (width, height) in [(256, 224), (512, 448), (1024, 896)].iter() {
        for sigma in [0.8, 1.5, 3.0].iter() {
            group.throughput(criterion::Throughput::Elements((*width * *height) as u64));

            let parameter_string = format!("{}x{}x{}", width, height, sigma);

            // input image
            let image_data = (0..width * height * 3).map(|i| (i % 256) as u8).collect();
            let image = Image::<u8, 3>::new([*width, *height].into(), image_data).unwrap();

            group.bench_with_input(
                BenchmarkId::new("gaussian_blur_exact", &parameter_string),
                &image,
                |b, i| {
                    b.iter(|| {
                        black_box(blur(
                            i,
                            *sigma,
                            BlurMode::Exact,
                            ExecutionStrategy::Auto,
                        ))
                    })
                },
            );

            group.bench_with_input(
                BenchmarkId::new("gaussian_blur_exact_serial", &parameter_string),
                &image,
                |b, i| {
                    b.iter(|| {
                        black_box(blur(
                            i,
                            *sigma,
                            BlurMode::Exact,
                            ExecutionStrategy::Serial,
                        ))
                    })
                },
            );

            group.bench_with_input(
                BenchmarkId::new("gaussian_blur_box_approximation", &parameter_string),
                &image,
                |b, i| {
                    b.iter(|| {
                        black_box(blur(
                            i,
                            *sigma,
                            BlurMode::BoxApproximation {
                                passes: DEFAULT_BOX_PASSES,
                            },
                            ExecutionStrategy::Auto,
                        ))
                    })
                },
            );
        }
    }
    group.finish();
}

criterion_group!(benches, bench_filters);
criterion_main!(benches);
