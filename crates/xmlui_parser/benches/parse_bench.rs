use criterion::{black_box, criterion_group, criterion_main, Criterion};
use xmlui_parser::Parser;

// A medium-size code-behind script with various constructs
const SCRIPT_SOURCE: &str = r#"
import { formatDate, clamp as limit } from "./helpers";

var count = 0;
var items = [];
var selected = { id: null, label: "" };

function increment(step) {
    count = limit(count + (step ?? 1), 0, 100);
}

function loadItems({ page, pageSize }, ...filters) {
    const offset = page * pageSize;
    let result = [];
    for (let i = offset; i < offset + pageSize; i++) {
        const item = { id: i, label: `Item ${i}`, created: formatDate(Date.now()) };
        if (filters.every(f => f(item))) {
            result.push(item);
        }
    }
    return result;
}

function select(id) {
    const [first, , ...others] = items.filter(item => item.id === id);
    selected = first ? { ...first } : { id: null, label: "" };
    switch (others.length) {
        case 0:
            break;
        default:
            console.warn("duplicate ids", others.length);
    }
}

function summary() {
    try {
        const total = items.reduce((acc, { value }) => acc + value, 0);
        return total > 1000 ? "large" : total > 100 ? "medium" : "small";
    } catch (e) {
        return "unknown";
    } finally {
        count++;
    }
}
"#;

const EXPRESSIONS: &[&str] = &[
    "a + b * c - d / e",
    "user?.profile?.name ?? 'anonymous'",
    "items.filter(x => x.active).map(({ id, name }) => ({ id, label: name }))",
    "count > 0 && !loading ? `${count} items` : 'empty'",
    "[first, ...rest].concat(other[0]?.children ?? [])",
];

fn bench_parse_script(c: &mut Criterion) {
    c.bench_function("parse_script_statements", |b| {
        b.iter(|| {
            let mut parser = Parser::new(black_box(SCRIPT_SOURCE));
            parser.parse_statements()
        })
    });
}

fn bench_parse_expressions(c: &mut Criterion) {
    c.bench_function("parse_binding_expressions", |b| {
        b.iter(|| {
            for source in EXPRESSIONS {
                let mut parser = Parser::new(black_box(source));
                let _ = parser.parse_expr();
            }
        })
    });
}

fn bench_parse_deeply_nested(c: &mut Criterion) {
    let source = format!("{}x{}", "(".repeat(50), ")".repeat(50));
    c.bench_function("parse_nested_parens", |b| {
        b.iter(|| {
            let mut parser = Parser::new(black_box(&source));
            parser.parse_expr()
        })
    });
}

criterion_group!(
    benches,
    bench_parse_script,
    bench_parse_expressions,
    bench_parse_deeply_nested
);
criterion_main!(benches);
