use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};
use gitstories_balancer::{Balancer, BalancerOptions};
use gitstories_core::{FolderId, Tree, point};
use std::hint::black_box;
use std::time::Duration;

/// `folders` folders spread over a few levels, each holding `files_per_folder` files.
fn build_tree(folders: usize, files_per_folder: usize) -> Tree {
    let mut t = Tree::new("root", point(640.0, 360.0)).expect("root");
    let mut parents: Vec<FolderId> = vec![t.root()];
    for i in 0..folders {
        let parent = parents[i / 4];
        let dir = t.create_folder(parent, &format!("d{i}")).expect("folder");
        for j in 0..files_per_folder {
            t.create_file(dir, &format!("f{j}.rs")).expect("file");
        }
        parents.push(dir);
    }
    t
}

fn bench_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("balancer_tick");
    group.measurement_time(Duration::from_secs(5));

    for &(folders, files) in &[(8usize, 4usize), (32, 8), (64, 16)] {
        let tree = build_tree(folders, files);
        let id = BenchmarkId::from_parameter(tree.len());
        group.bench_with_input(id, &tree, |b, tree| {
            let mut balancer = Balancer::new(BalancerOptions::default()).expect("balancer");
            b.iter_batched(
                || tree.clone(),
                |mut t| {
                    let stats = balancer.tick(&mut t).expect("tick");
                    black_box(stats)
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

criterion_group!(benches, bench_tick);
criterion_main!(benches);
