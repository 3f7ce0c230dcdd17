use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use courseware_api::app::tree::{filter_problems, Subject, TreeWalker};
use courseware_api::context::RequestContext;
use courseware_core::{category, ContentNode, Course, CourseKey};
use courseware_infra::InMemoryContentStore;

/// Course with `chapters` chapters, each holding `fanout` sequentials of
/// `fanout` problems.
fn build_course(chapters: usize, fanout: usize) -> (InMemoryContentStore, Course) {
    let key: CourseKey = "course-v1:bench+Tree+2024".parse().unwrap();
    let mut course = Course::new(key.clone());
    let mut blocks = Vec::new();

    for c in 0..chapters {
        let mut chapter = ContentNode::new(key.make_usage_key(category::CHAPTER, format!("ch{c}")).unwrap());
        for s in 0..fanout {
            let mut sequential =
                ContentNode::new(key.make_usage_key(category::SEQUENTIAL, format!("seq{c}_{s}")).unwrap());
            sequential.graded = true;
            for p in 0..fanout {
                let problem =
                    ContentNode::new(key.make_usage_key(category::PROBLEM, format!("p{c}_{s}_{p}")).unwrap());
                sequential.children.push(problem.location.clone());
                blocks.push(problem);
            }
            chapter.children.push(sequential.location.clone());
            blocks.push(sequential);
        }
        course.root.children.push(chapter.location.clone());
        blocks.push(chapter);
    }

    let store = InMemoryContentStore::new();
    store.insert_course(course.clone(), blocks).unwrap();
    (store, course)
}

fn bench_walk(c: &mut Criterion) {
    let ctx = RequestContext::new("http://bench.local/api");
    let mut group = c.benchmark_group("tree_walk");

    for fanout in [4usize, 8, 16] {
        let (store, course) = build_course(10, fanout);
        let blocks = 10 * (1 + fanout + fanout * fanout);
        group.throughput(Throughput::Elements(blocks as u64));

        group.bench_with_input(BenchmarkId::new("full_depth", fanout), &fanout, |b, _| {
            let walker = TreeWalker::new(&store, &ctx);
            b.iter(|| walker.walk(black_box(Subject::Course(&course)), 32).unwrap())
        });

        group.bench_with_input(BenchmarkId::new("filter_problems", fanout), &fanout, |b, _| {
            b.iter(|| filter_problems(&store, black_box(&course.root)).unwrap())
        });
    }

    group.finish();
}

criterion_group!(benches, bench_walk);
criterion_main!(benches);
