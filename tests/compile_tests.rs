use jsonwhere::{Arg, FieldWhitelist, JsonQuery};

fn compile(json: &str) -> (String, Vec<Arg>) {
    let mut q = JsonQuery::new(FieldWhitelist::allow_all());
    q.parse(json).unwrap();
    q.to_sql()
}

#[test]
fn test_empty_document_matches_all() {
    let (sql, args) = compile("{}");
    assert_eq!(sql, "");
    assert!(args.is_empty());
}

#[test]
fn test_implicit_eq_string() {
    let (sql, args) = compile(r#"{"name": "ben"}"#);
    assert_eq!(sql, "name = ?");
    assert_eq!(args, vec![Arg::Str("ben".into())]);
}

#[test]
fn test_implicit_eq_integer() {
    let (sql, args) = compile(r#"{"age": 21}"#);
    assert_eq!(sql, "age = ?");
    assert_eq!(args, vec![Arg::Int(21)]);
}

#[test]
fn test_explicit_eq_matches_implicit() {
    assert_eq!(compile(r#"{"name": "ben"}"#), compile(r#"{"name": {"$eq": "ben"}}"#));
    assert_eq!(compile(r#"{"age": 21}"#), compile(r#"{"age": {"$eq": 21}}"#));
    assert_eq!(compile(r#"{"score": 9.5}"#), compile(r#"{"score": {"$eq": 9.5}}"#));
}

#[test]
fn test_binary_comparisons() {
    assert_eq!(compile(r#"{"age": {"$gt": 21}}"#), ("age > ?".into(), vec![Arg::Int(21)]));
    assert_eq!(compile(r#"{"age": {"$gte": 21}}"#), ("age >= ?".into(), vec![Arg::Int(21)]));
    assert_eq!(compile(r#"{"age": {"$lt": 21}}"#), ("age < ?".into(), vec![Arg::Int(21)]));
    assert_eq!(compile(r#"{"age": {"$lte": 21}}"#), ("age <= ?".into(), vec![Arg::Int(21)]));
    assert_eq!(compile(r#"{"age": {"$ne": 21}}"#), ("age <> ?".into(), vec![Arg::Int(21)]));
}

#[test]
fn test_string_operand_for_comparison() {
    let (sql, args) = compile(r#"{"name": {"$gt": "ben"}}"#);
    assert_eq!(sql, "name > ?");
    assert_eq!(args, vec![Arg::Str("ben".into())]);
}

#[test]
fn test_multiple_fields_are_a_conjunction() {
    let (sql, args) = compile(r#"{"name": "ben", "age": 21, "reg_num": 3000}"#);
    assert_eq!(sql, "name = ? AND age = ? AND reg_num = ?");
    assert_eq!(
        args,
        vec![Arg::Str("ben".into()), Arg::Int(21), Arg::Int(3000)]
    );
}

#[test]
fn test_multiple_operators_in_one_object() {
    let (sql, args) = compile(r#"{"age": {"$gt": 18, "$lt": 30}}"#);
    assert_eq!(sql, "age > ? AND age < ?");
    assert_eq!(args, vec![Arg::Int(18), Arg::Int(30)]);
}

#[test]
fn test_in_operator() {
    let (sql, args) = compile(r#"{"age": {"$in": [21, 23]}}"#);
    assert_eq!(sql, "age IN (?,?)");
    assert_eq!(args, vec![Arg::Int(21), Arg::Int(23)]);
}

#[test]
fn test_nin_operator() {
    let (sql, args) = compile(r#"{"age": {"$nin": [21, 23]}}"#);
    assert_eq!(sql, "age NOT IN (?,?)");
    assert_eq!(args, vec![Arg::Int(21), Arg::Int(23)]);
}

#[test]
fn test_in_preserves_element_order() {
    let (_, args) = compile(r#"{"name": {"$in": ["zen", "ben", "ken"]}}"#);
    assert_eq!(
        args,
        vec![
            Arg::Str("zen".into()),
            Arg::Str("ben".into()),
            Arg::Str("ken".into())
        ]
    );
}

#[test]
fn test_starts_with() {
    let (sql, args) = compile(r#"{"name": {"$sw": "be"}}"#);
    assert_eq!(sql, "name LIKE ?");
    assert_eq!(args, vec![Arg::Str("be%".into())]);
}

#[test]
fn test_ends_with() {
    let (sql, args) = compile(r#"{"name": {"$ew": "en"}}"#);
    assert_eq!(sql, "name LIKE ?");
    assert_eq!(args, vec![Arg::Str("%en".into())]);
}

#[test]
fn test_contains() {
    let (sql, args) = compile(r#"{"address": {"$ct": "reet"}}"#);
    assert_eq!(sql, "address LIKE ?");
    assert_eq!(args, vec![Arg::Str("%reet%".into())]);
}

#[test]
fn test_not_negates_eq() {
    let (sql, args) = compile(r#"{"name": {"$not": {"$eq": "ben"}}}"#);
    assert_eq!(sql, "NOT name = ?");
    assert_eq!(args, vec![Arg::Str("ben".into())]);
}

#[test]
fn test_not_negates_in() {
    let (sql, args) = compile(r#"{"age": {"$not": {"$in": [21, 23]}}}"#);
    assert_eq!(sql, "NOT age IN (?,?)");
    assert_eq!(args, vec![Arg::Int(21), Arg::Int(23)]);
}

#[test]
fn test_nested_not_reasserts_negation() {
    // $not inside $not does not cancel out; negation is set, not toggled
    let (sql, args) = compile(r#"{"name": {"$not": {"$not": {"$eq": "ben"}}}}"#);
    assert_eq!(sql, "NOT name = ?");
    assert_eq!(args, vec![Arg::Str("ben".into())]);
}

#[test]
fn test_negation_does_not_leak_to_siblings() {
    let (sql, args) = compile(r#"{"name": {"$not": {"$eq": "ben"}}, "age": 21}"#);
    assert_eq!(sql, "NOT name = ? AND age = ?");
    assert_eq!(args, vec![Arg::Str("ben".into()), Arg::Int(21)]);
}

#[test]
fn test_and_of_two_documents() {
    let (sql, args) = compile(r#"{"$and": [{"name": "ben"}, {"age": 21}]}"#);
    assert_eq!(sql, "name = ? AND age = ?");
    assert_eq!(args, vec![Arg::Str("ben".into()), Arg::Int(21)]);
}

#[test]
fn test_or_of_two_documents() {
    let (sql, args) = compile(r#"{"$or": [{"name": "ken"}, {"name": "gen"}]}"#);
    assert_eq!(sql, "(name = ? OR name = ?)");
    assert_eq!(args, vec![Arg::Str("ken".into()), Arg::Str("gen".into())]);
}

#[test]
fn test_or_member_with_multiple_fields_stays_atomic() {
    let (sql, args) = compile(r#"{"$or": [{"name": "ben", "age": 21}, {"name": "ken"}]}"#);
    assert_eq!(sql, "((name = ? AND age = ?) OR name = ?)");
    assert_eq!(
        args,
        vec![Arg::Str("ben".into()), Arg::Int(21), Arg::Str("ken".into())]
    );
}

#[test]
fn test_single_member_or_passes_through() {
    let (sql, args) = compile(r#"{"$or": [{"name": "ben"}]}"#);
    assert_eq!(sql, "name = ?");
    assert_eq!(args, vec![Arg::Str("ben".into())]);
}

#[test]
fn test_nor_is_and_of_negations() {
    let (sql, args) = compile(r#"{"$nor": [{"name": "ken"}, {"name": "ben"}]}"#);
    assert_eq!(sql, "NOT name = ? AND NOT name = ?");
    assert_eq!(args, vec![Arg::Str("ken".into()), Arg::Str("ben".into())]);
}

#[test]
fn test_logical_operator_beside_plain_field() {
    let (sql, args) = compile(r#"{"$or": [{"name": "ken"}, {"name": "gen"}], "age": 21}"#);
    assert_eq!(sql, "(name = ? OR name = ?) AND age = ?");
    assert_eq!(
        args,
        vec![Arg::Str("ken".into()), Arg::Str("gen".into()), Arg::Int(21)]
    );
}

#[test]
fn test_nested_logical_operators() {
    let (sql, args) =
        compile(r#"{"$and": [{"$or": [{"name": "ken"}, {"name": "gen"}]}, {"age": 21}]}"#);
    assert_eq!(sql, "(name = ? OR name = ?) AND age = ?");
    assert_eq!(
        args,
        vec![Arg::Str("ken".into()), Arg::Str("gen".into()), Arg::Int(21)]
    );
}

#[test]
fn test_empty_logical_groups_compile_to_nothing() {
    assert_eq!(compile(r#"{"$and": []}"#), ("".into(), vec![]));
    assert_eq!(compile(r#"{"$or": []}"#), ("".into(), vec![]));
    assert_eq!(compile(r#"{"$and": [{}]}"#), ("".into(), vec![]));
}

#[test]
fn test_whitelisted_fields_pass() {
    let mut q = JsonQuery::new(FieldWhitelist::new(["name", "age"]));
    q.parse(r#"{"name": "ben", "age": {"$gt": 18}}"#).unwrap();
    let (sql, args) = q.to_sql();
    assert_eq!(sql, "name = ? AND age > ?");
    assert_eq!(args, vec![Arg::Str("ben".into()), Arg::Int(18)]);
}

#[test]
fn test_identical_input_renders_identically() {
    let doc = r#"{"$or": [{"name": "ben", "age": 21}, {"reg_num": {"$in": [1, 2]}}]}"#;
    assert_eq!(compile(doc), compile(doc));
}

#[test]
fn test_float_arguments() {
    let (sql, args) = compile(r#"{"score": {"$gte": 9.5}}"#);
    assert_eq!(sql, "score >= ?");
    assert_eq!(args, vec![Arg::Float(9.5)]);
}
