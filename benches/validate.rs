#[macro_use]
extern crate bencher;

use bencher::Bencher;

fn graphql_parse_document(bench: &mut Bencher) {
    use graphql_validator::ast::*;
    bench.iter(|| {
        let ctx = ASTContext::new();
        Document::parse(&ctx, QUERY).ok();
    });
}

fn graphql_parse_schema(bench: &mut Bencher) {
    use graphql_validator::ast::ASTContext;
    use graphql_validator::schema::*;
    bench.iter(|| {
        let ctx = ASTContext::new();
        Schema::parse(&ctx, SCHEMA).ok();
    });
}

fn graphql_validate_all_rules(bench: &mut Bencher) {
    use graphql_validator::{ast::*, schema::*, validate::*};
    let ctx = ASTContext::new();
    let schema = Schema::parse(&ctx, SCHEMA).unwrap();
    let document = Document::parse(&ctx, QUERY).unwrap();
    let validator = Validator::new(schema);
    bench.iter(|| validator.validate::<AllRules>(&ctx, document));
}

fn graphql_validate_required_arguments(bench: &mut Bencher) {
    use graphql_validator::{ast::*, schema::*, validate::*};
    let ctx = ASTContext::new();
    let schema = Schema::parse(&ctx, SCHEMA).unwrap();
    let document = Document::parse(&ctx, QUERY).unwrap();
    let validator = Validator::new(schema);
    let mut rule = rules::ProvidedNonNullArguments;
    bench.iter(|| validator.validate_with(&ctx, document, &mut rule));
}

fn graphql_parse_everything_and_validate(bench: &mut Bencher) {
    use graphql_validator::{ast::*, schema::*, validate::*};
    bench.iter(|| {
        let ctx = ASTContext::new();
        let schema = Schema::parse(&ctx, SCHEMA).unwrap();
        let document = Document::parse(&ctx, QUERY).unwrap();
        Validator::new(schema)
            .validate::<AllRules>(&ctx, document)
            .is_valid()
    });
}

benchmark_group!(
    validate,
    graphql_parse_document,
    graphql_parse_schema,
    graphql_validate_all_rules,
    graphql_validate_required_arguments,
    graphql_parse_everything_and_validate
);

benchmark_main!(validate);

static QUERY: &str = include_str!("../fixture/kitchen_sink.graphql");
static SCHEMA: &str = include_str!("../fixture/schema.graphql");
