use bn_core::{Action, Language};
use bn_smart::{detect, ProcessRequest, SmartProcessor};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::seq::SliceRandom;

const STATEMENTS: &[&str] = &[
    "var total=items.reduce((a,b)=>a+b,0);",
    "if(user&&user.active){render(user)}else{login()}",
    "for(let i=0;i<rows.length;i++){rows[i].id=i}",
    "const fmt=function(v){return v.toFixed(2)};",
    "export function sum(a,b){return a+b}",
];

fn generate_minified(size_kb: usize) -> String {
    let mut rng = rand::thread_rng();
    let mut code = String::with_capacity(size_kb * 1024);
    while code.len() < size_kb * 1024 {
        code.push_str(STATEMENTS.choose(&mut rng).copied().unwrap_or_default());
    }
    code
}

fn bench_detect(c: &mut Criterion) {
    for &size in &[1, 10, 100] {
        let min = generate_minified(size);
        let pretty = bn_codec::js::beautify(&min, 2).unwrap_or_default();
        c.bench_function(&format!("detect_minified_{size}kb"), |b| {
            b.iter(|| black_box(detect(black_box(&min), Language::Js)))
        });
        c.bench_function(&format!("detect_pretty_{size}kb"), |b| {
            b.iter(|| black_box(detect(black_box(&pretty), Language::Js)))
        });
    }
}

fn bench_workflow(c: &mut Criterion) {
    let processor = SmartProcessor::default();
    let code = generate_minified(10);
    let payload = r#"[{"find":"total","replace":"sum"},{"find":"rows","replace":"lines"}]"#;

    for action in [Action::Read, Action::Edit, Action::Write] {
        let req = ProcessRequest::new(&code, Language::Js)
            .action(action)
            .modifications(Some(payload));
        c.bench_function(&format!("smart_process_{action}_10kb"), |b| {
            b.iter(|| black_box(processor.process(black_box(&req))))
        });
    }
}

criterion_group!(benches, bench_detect, bench_workflow);
criterion_main!(benches);
