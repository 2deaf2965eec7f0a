use crate::ngtsc::typecheck::src::type_emitter::{can_emit_type, TypeEmitter};
use ts::{TextSpan, TypeKeyword, TypeNode, TypeReference};

fn accept_all(_: &TypeReference) -> bool {
    true
}

#[test]
fn keywords_and_literals_are_always_emittable() {
    assert!(can_emit_type(
        &TypeNode::keyword(TypeKeyword::String),
        &accept_all
    ));
    assert!(can_emit_type(
        &TypeNode::literal("'abc'", Some(TextSpan::new(5, 5))),
        &accept_all
    ));
}

#[test]
fn import_types_are_never_emittable() {
    let import_type = TypeNode::import_type("./hidden", "Hidden");
    assert!(!can_emit_type(&import_type, &accept_all));

    // A sibling without the import() reference is emittable.
    let sibling = TypeNode::reference("Visible");
    assert!(can_emit_type(&sibling, &accept_all));

    // Nested inside type arguments it still poisons the whole type.
    let wrapped = TypeNode::reference_with_args("Array", vec![TypeNode::import_type("./h", "H")]);
    assert!(!can_emit_type(&wrapped, &accept_all));
}

#[test]
fn predicate_rejection_blocks_emission_feasibility() {
    let ty = TypeNode::reference_with_args("Array", vec![TypeNode::reference("Secret")]);
    let reject_secret = |r: &TypeReference| r.name != "Secret";
    assert!(!can_emit_type(&ty, &reject_secret));
    assert!(can_emit_type(&TypeNode::reference("Array"), &reject_secret));
}

#[test]
fn feasible_types_emit_successfully() {
    // Property: can_emit_type == true implies emit_type succeeds with a
    // translator consistent with the predicate.
    let ty = TypeNode::reference_with_args(
        "Map",
        vec![
            TypeNode::keyword(TypeKeyword::String),
            TypeNode::reference("Item"),
        ],
    );
    assert!(can_emit_type(&ty, &accept_all));

    let translator = |r: &TypeReference| Some(format!("i0.{}", r.name));
    let emitter = TypeEmitter::new(&translator);
    let emitted = emitter.emit_type(&ty).unwrap();
    assert_eq!(emitted.to_string(), "i0.Map<string, i0.Item>");
}

#[test]
fn infeasible_types_fail_emission_cleanly() {
    let translator = |_: &TypeReference| None;
    let emitter = TypeEmitter::new(&translator);
    assert!(emitter.emit_type(&TypeNode::reference("Anything")).is_err());
    assert!(emitter
        .emit_type(&TypeNode::import_type("./x", "X"))
        .is_err());
}

#[test]
fn emission_clears_literal_positions_and_preserves_text() {
    let ty = TypeNode::reference_with_args(
        "Tagged",
        vec![TypeNode::literal("'kind'", Some(TextSpan::new(42, 6)))],
    );
    let translator = |r: &TypeReference| Some(r.name.clone());
    let emitter = TypeEmitter::new(&translator);
    let emitted = emitter.emit_type(&ty).unwrap();

    match &emitted {
        TypeNode::Reference(r) => match &r.type_args[0] {
            TypeNode::Literal(lit) => {
                assert_eq!(lit.text, "'kind'");
                assert_eq!(lit.position, None);
            }
            other => panic!("expected literal, got {:?}", other),
        },
        other => panic!("expected reference, got {:?}", other),
    }
    // The input tree is untouched.
    match &ty {
        TypeNode::Reference(r) => match &r.type_args[0] {
            TypeNode::Literal(lit) => assert_eq!(lit.position, Some(TextSpan::new(42, 6))),
            _ => unreachable!(),
        },
        _ => unreachable!(),
    }
}

#[test]
fn emission_is_idempotent() {
    let ty = TypeNode::reference_with_args("List", vec![TypeNode::reference("Item")]);
    let translator = |r: &TypeReference| Some(r.name.clone());
    let emitter = TypeEmitter::new(&translator);
    let once = emitter.emit_type(&ty).unwrap();
    let twice = emitter.emit_type(&once).unwrap();
    assert_eq!(once, twice);
}
