use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use xmlui_compiler::{Compiler, SourceFile};
use xmlui_markup::parse_markup;
use xmlui_options::FrontEndOptions;
use xmlui_transform::{parse_property_value, transform_to_component_def};

// A page with bindings, helper tags and a code-behind script
const PAGE_SOURCE: &str = r#"
<App layout="vertical" var.filter="">
  <!-- header -->
  <AppHeader title="Orders ({orders.length})" />
  <script>
    var orders = [];
    var selected = null;

    function select(order) {
      selected = order;
    }

    function total() {
      return orders.reduce((sum, o) => sum + o.amount, 0);
    }
  </script>
  <HStack>
    <TextBox placeholder="Search..." onDidChange="v => filter = v" />
    <Button label="Clear" enabled="{filter.length > 0}" onClick="filter = ''" />
  </HStack>
  <Table data="{orders.filter(o => o.name.includes(filter))}">
    <prop name="columns">
      <item><field name="title" value="Name" /><field name="bind" value="name" /></item>
      <item><field name="title" value="Amount" /><field name="bind" value="amount" /></item>
    </prop>
    <event name="rowClick">select($item)</event>
  </Table>
  <Text>Total: {total()} items, selected: {selected?.name ?? 'none'}</Text>
  <Text><![CDATA[<b>raw</b>]]></Text>
</App>
"#;

const VALUES: &[&str] = &[
    "plain text",
    "{count}",
    "Hello, {user.firstName} {user.lastName}!",
    "{items.filter(x => x.done).length} of {items.length} done",
    "escaped \\{braces} and {a ? '}' : \"{\"}",
];

fn bench_parse_markup(c: &mut Criterion) {
    c.bench_function("parse_markup_page", |b| {
        b.iter(|| parse_markup(black_box(PAGE_SOURCE)))
    });
}

fn bench_transform(c: &mut Criterion) {
    let nodes = parse_markup(PAGE_SOURCE).expect("page parses");
    c.bench_function("transform_page", |b| {
        b.iter(|| transform_to_component_def(black_box(&nodes)))
    });
}

fn bench_property_values(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_property_value");
    for (i, value) in VALUES.iter().enumerate() {
        group.bench_with_input(BenchmarkId::from_parameter(i), value, |b, value| {
            b.iter(|| parse_property_value(black_box(value)))
        });
    }
    group.finish();
}

fn bench_check_files(c: &mut Criterion) {
    let sources: Vec<SourceFile> = (0..32)
        .map(|i| SourceFile::new(format!("page{}.xmlui", i), PAGE_SOURCE))
        .collect();
    let compiler = Compiler::without_imports(FrontEndOptions::default());
    c.bench_function("check_32_pages", |b| {
        b.iter(|| compiler.check_files(black_box(&sources)))
    });
}

criterion_group!(
    benches,
    bench_parse_markup,
    bench_transform,
    bench_property_values,
    bench_check_files
);
criterion_main!(benches);
