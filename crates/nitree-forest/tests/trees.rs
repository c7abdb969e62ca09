use std::sync::Arc;

use nitree_canonical::{digest_of, hash_text, DigestAlg, HashSpec, Ni};
use nitree_forest::{
    grow, grow_json, ArrayMode, CountingSaltSource, ForestError, GrowResult, Revealed,
    RevealedNode, TreeGrower, Value,
};
use serde_json::json;

const HELLO: &str = "ni:///sha-256;185f8db32271fe25f561a6fc938b2e264306ec304eda518007d1764826381969";
const WORLD: &str = "ni:///sha-256;78ae647dc5544d227130a0682a51e30bc7777fbb6d8a8f17007463a3ecd1d524";

fn no_salt() -> HashSpec {
    HashSpec::from_alg(DigestAlg::Sha256)
}

fn ni(s: &str) -> Ni {
    Ni::parse(s).unwrap()
}

fn text_node(name: &str, text: &str) -> RevealedNode {
    RevealedNode::new(ni(name), Revealed::Text(text.into()))
}

#[test]
fn string_without_salt() {
    let tree = grow(&"Hello World!".into(), &no_salt()).unwrap();
    assert_eq!(tree.revealed, Revealed::Text("Hello World!".into()));
    assert_eq!(tree.root, hash_text("Hello World!", &no_salt()));
}

#[test]
fn salted_strings() {
    let spec = HashSpec::default();
    for text in ["Hello World", "", "öäÜß", "🐣🌠", "\n", " \twhite\u{2000}sp\u{202f}ace\n"] {
        let tree = grow(&text.into(), &spec).unwrap();
        let Revealed::Salted { name, text: revealed } = &tree.revealed else {
            panic!("expected a salted leaf for {text:?}");
        };
        assert_eq!(revealed, text);
        assert_eq!(
            digest_of(name.as_str()).unwrap(),
            hex_sha256(text.as_bytes())
        );
        assert_eq!(
            digest_of(tree.root.as_str()).unwrap(),
            hex_sha256(name.as_str().as_bytes())
        );
        assert!(name.salt().is_some());
    }
}

#[test]
fn salted_roots_differ_between_calls() {
    let spec = HashSpec::default();
    let a = grow(&"secret".into(), &spec).unwrap();
    let b = grow(&"secret".into(), &spec).unwrap();
    assert_ne!(a.root, b.root);
}

#[test]
fn unordered_vector() {
    let value = Value::Unordered(vec!["Hello".into(), "World".into()]);
    let expected = GrowResult {
        root: ni("ni:///sha-256;3e11ba5abe0b6cede3b05e94baa6974b0f1ebb0f9cb8fbf7702ff8858ba20604"),
        revealed: Revealed::Unordered(vec![text_node(HELLO, "Hello"), text_node(WORLD, "World")]),
    };
    assert_eq!(grow(&value, &no_salt()).unwrap(), expected);

    let swapped = Value::Unordered(vec!["World".into(), "Hello".into()]);
    assert_eq!(grow(&swapped, &no_salt()).unwrap(), expected);
}

#[test]
fn ordered_vector() {
    let value = Value::Ordered(vec!["World".into(), "Hello".into()]);
    let expected = GrowResult {
        root: ni("ni:///sha-256;90e76f6a65242adbc4a7f405f2bff524bf7296a5d9ddadb8b9ac6d510d6f06f7"),
        revealed: Revealed::Ordered(vec![text_node(WORLD, "World"), text_node(HELLO, "Hello")]),
    };
    assert_eq!(grow(&value, &no_salt()).unwrap(), expected);

    let swapped = Value::Ordered(vec!["Hello".into(), "World".into()]);
    assert_ne!(grow(&swapped, &no_salt()).unwrap().root, expected.root);
}

#[test]
fn mapping_equals_its_entry_pairs() {
    let mapping = Value::Mapping(vec![
        ("Hello".into(), "World".into()),
        ("a".into(), "B".into()),
    ]);
    let pairs = mapping.clone().into_entry_pairs();
    let tree = grow(&mapping, &no_salt()).unwrap();
    assert_eq!(tree, grow(&pairs, &no_salt()).unwrap());
    assert_eq!(
        tree.root.as_str(),
        "ni:///sha-256;83f43fe81ade0f034a8058a6140e0cfb84f719eddcc983764554cbee309c9083"
    );
}

#[test]
fn mapping_ignores_entry_order() {
    let a = Value::Mapping(vec![("x".into(), "1".into()), ("y".into(), "2".into())]);
    let b = Value::Mapping(vec![("y".into(), "2".into()), ("x".into(), "1".into())]);
    assert_eq!(grow(&a, &no_salt()).unwrap(), grow(&b, &no_salt()).unwrap());
}

#[test]
fn mapping_distinguishes_key_from_value() {
    let a = Value::Mapping(vec![("x".into(), "y".into())]);
    let b = Value::Mapping(vec![("y".into(), "x".into())]);
    assert_ne!(grow(&a, &no_salt()).unwrap().root, grow(&b, &no_salt()).unwrap().root);
}

#[test]
fn empty_sequences_name_like_empty_text() {
    let empty = grow(&"".into(), &no_salt()).unwrap().root;
    for value in [Value::Ordered(vec![]), Value::Unordered(vec![]), Value::Mapping(vec![])] {
        let tree = grow(&value, &no_salt()).unwrap();
        assert_eq!(tree.root, empty);
    }
    assert_eq!(
        grow(&Value::Ordered(vec![]), &no_salt()).unwrap().revealed,
        Revealed::Ordered(vec![])
    );
    assert_eq!(
        grow(&Value::Unordered(vec![]), &no_salt()).unwrap().revealed,
        Revealed::Unordered(vec![])
    );
}

#[test]
fn empty_sequences_are_never_salted() {
    let salted = HashSpec::default();
    assert!(salted.salt_leaves());
    for value in [Value::Ordered(vec![]), Value::Unordered(vec![]), Value::Mapping(vec![])] {
        let tree = grow(&value, &salted).unwrap();
        assert_eq!(tree.root, hash_text("", &no_salt()));
        assert_eq!(tree.root.query(), None);
    }
    let nested = grow(&Value::Ordered(vec![Value::Unordered(vec![])]), &salted).unwrap();
    let children = nested.revealed.children().unwrap();
    assert_eq!(children[0].ni, hash_text("", &no_salt()));
    assert_eq!(children[0].content, Revealed::Unordered(vec![]));
}

#[test]
fn growing_is_idempotent_without_salt() {
    let value = Value::Mapping(vec![(
        "list".into(),
        Value::Unordered(vec!["b".into(), Value::Ordered(vec!["c".into(), "a".into()])]),
    )]);
    assert_eq!(grow(&value, &no_salt()).unwrap(), grow(&value, &no_salt()).unwrap());
}

#[test]
fn changing_a_leaf_changes_the_root() {
    let a = Value::Ordered(vec![Value::Unordered(vec!["x".into(), "y".into()]), "z".into()]);
    let b = Value::Ordered(vec![Value::Unordered(vec!["x".into(), "Y".into()]), "z".into()]);
    assert_ne!(grow(&a, &no_salt()).unwrap().root, grow(&b, &no_salt()).unwrap().root);
}

#[test]
fn authority_appears_in_every_name() {
    let spec = no_salt().with_authority("example.com").unwrap();
    let tree = grow(&Value::Ordered(vec!["a".into(), "b".into()]), &spec).unwrap();
    assert_eq!(tree.root.authority(), "example.com");
    for child in tree.revealed.children().unwrap() {
        assert_eq!(child.ni.authority(), "example.com");
    }
}

#[test]
fn deterministic_salt_source_reproduces_trees() {
    let spec = no_salt().with_salt_leaves(true);
    let value = Value::Unordered(vec!["a".into(), "b".into()]);
    let grow_with_fresh_source = || {
        TreeGrower::with_salt_source(spec.clone(), Arc::new(CountingSaltSource::new("t")))
            .unwrap()
            .grow(&value)
            .unwrap()
    };
    assert_eq!(grow_with_fresh_source(), grow_with_fresh_source());
}

#[test]
fn json_documents_are_grown() {
    let tree = grow_json(&json!({"Hello": "World", "a": "B"}), ArrayMode::default(), &no_salt())
        .unwrap();
    assert_eq!(
        tree.root.as_str(),
        "ni:///sha-256;83f43fe81ade0f034a8058a6140e0cfb84f719eddcc983764554cbee309c9083"
    );

    let tree = grow_json(&json!(["World", "Hello"]), ArrayMode::Ordered, &no_salt()).unwrap();
    assert_eq!(
        tree.root.as_str(),
        "ni:///sha-256;90e76f6a65242adbc4a7f405f2bff524bf7296a5d9ddadb8b9ac6d510d6f06f7"
    );
}

#[test]
fn json_scalars_are_invalid_input() {
    let err = grow_json(&json!({"n": 3}), ArrayMode::default(), &no_salt()).unwrap_err();
    assert!(matches!(err, ForestError::InvalidInput { ref kind, .. } if kind == "number"));
}

#[test]
fn revealed_tree_survives_json_storage() {
    let tree = grow(
        &Value::Mapping(vec![("k".into(), Value::Ordered(vec!["v".into()]))]),
        &HashSpec::default(),
    )
    .unwrap();
    let stored = serde_json::to_string(&tree).unwrap();
    let loaded: GrowResult = serde_json::from_str(&stored).unwrap();
    assert_eq!(loaded, tree);
}

fn hex_sha256(bytes: &[u8]) -> String {
    hex::encode(DigestAlg::Sha256.hash(bytes))
}
