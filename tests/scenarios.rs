//! End-to-end scenarios over the public API.

use jsontree::{
    compare, parse, parse_with_opts, print, print_unformatted, Error, InputBound, KeyCase, Kind,
    Node, ParseOptions,
};

#[test]
fn detach_then_replace_in_parsed_array() {
    let mut root = parse(r#"{"a":[1,2,3]}"#).expect("parse");
    let list = root.get_mut("a").expect("member a");

    let detached = list.detach(1).expect("detach index 1");
    assert_eq!(detached.as_f64(), Some(2.0));
    assert_eq!(print_unformatted(&root).expect("print"), r#"{"a":[1,3]}"#);

    let list = root.get_mut("a").expect("member a");
    list.insert(1, Node::number(0)).expect("insert placeholder");
    list.replace(1, Node::bool(true)).expect("replace index 1");

    assert_eq!(print_unformatted(&root).expect("print"), r#"{"a":[1,true,3]}"#);
}

#[test]
fn numeric_equality_ignores_spelling() {
    let a = parse(r#"{"x":1}"#).expect("parse");
    let b = parse(r#"{"x":1.0}"#).expect("parse");
    assert!(compare(&a, &b, KeyCase::Sensitive));
}

#[test]
fn string_reference_to_stack_buffer_outlives_its_object() {
    let buffer = [b'h', b'i', b'!'];
    let text = std::str::from_utf8(&buffer).expect("ascii");
    {
        let mut object = Node::object();
        object
            .add_to_object("greeting", Node::string_ref(text))
            .expect("attach reference");
        assert!(object.get("greeting").is_some_and(Node::is_reference));
        assert_eq!(object.to_string(), r#"{"greeting":"hi!"}"#);
    }
    assert_eq!(text, "hi!");
}

#[test]
fn deleting_a_reference_leaves_its_target_intact() {
    let target = parse(r#"{"shared":[1,2,{"deep":"value"}]}"#).expect("parse");
    let mut holder = Node::array();
    holder
        .add_reference_to_array(&target)
        .expect("attach reference");
    holder.add_reference_to_array(&target).expect("attach twice");
    assert_eq!(holder.len(), 2);

    holder.delete(0).expect("delete first reference");
    drop(holder);

    assert_eq!(
        print_unformatted(&target).expect("target still prints"),
        r#"{"shared":[1,2,{"deep":"value"}]}"#
    );
}

#[test]
fn reference_containers_reject_mutation() {
    let target = parse("[1,2]").expect("parse");
    let mut alias = Node::reference(&target);
    assert_eq!(alias.add_to_array(Node::null()), Err(Error::BorrowedMembers));
    assert_eq!(alias.detach(0).unwrap_err(), Error::BorrowedMembers);
    assert_eq!(target.len(), 2);
}

#[test]
fn detached_subtree_drops_without_touching_siblings() {
    let mut root = parse(r#"{"keep":[1],"drop":{"x":[true,false]},"tail":"t"}"#).expect("parse");
    let detached = root
        .detach_by_key("drop", KeyCase::Sensitive)
        .expect("detach");
    assert_eq!(detached.key(), Some("drop"));
    drop(detached);

    assert_eq!(
        print_unformatted(&root).expect("print"),
        r#"{"keep":[1],"tail":"t"}"#
    );
}

#[test]
fn detach_by_identity_survives_sibling_edits() {
    let mut root = parse("[10,20,30]").expect("parse");
    let id = root.get_index(2).expect("third").id();
    root.insert(0, Node::string("front")).expect("insert");
    root.delete(1).expect("delete 10");

    let detached = root.detach_by_id(id).expect("still attached");
    assert_eq!(detached.as_f64(), Some(30.0));
    assert_eq!(root.detach_by_id(id).unwrap_err(), Error::NodeNotFound);
}

#[test]
fn duplicates_are_independent_of_their_source() {
    let label = String::from("borrowed");
    let mut source = Node::object();
    source
        .add_to_object("label", Node::string_ref(&label))
        .expect("attach");
    source.add_array("items").expect("add array");

    let mut copy = source.duplicate(true).expect("duplicate");
    assert!(compare(&source, &copy, KeyCase::Sensitive));
    assert!(!copy.get("label").is_some_and(Node::is_reference));

    copy.get_mut("items")
        .expect("items")
        .add_to_array(Node::number(1))
        .expect("push");
    copy.get_mut("label")
        .expect("label")
        .set_string("changed")
        .expect("set");

    assert_eq!(source.to_string(), r#"{"label":"borrowed","items":[]}"#);
    assert_eq!(copy.to_string(), r#"{"label":"changed","items":[1]}"#);
    drop(source);
    assert_eq!(copy.get("label").and_then(Node::as_str), Some("changed"));
}

#[test]
fn shallow_duplicate_keeps_kind_only() {
    let source = parse(r#"{"k":[1,2]}"#).expect("parse");
    let shallow = source.duplicate(false).expect("duplicate");
    assert_eq!(shallow.kind(), Kind::Object);
    assert!(shallow.is_empty());
}

#[test]
fn all_four_parse_modes() {
    let bounds = [InputBound::Length, InputBound::NulTerminated];
    for bound in bounds {
        let lenient = ParseOptions {
            bound,
            ..ParseOptions::default()
        };
        let parsed = parse_with_opts(b"[1] tail\0", &lenient).expect("lenient parse");
        assert_eq!(parsed.end, 3);

        let strict = ParseOptions {
            bound,
            require_termination: true,
            ..ParseOptions::default()
        };
        let err = parse_with_opts(b"[1] tail\0", &strict).unwrap_err();
        assert_eq!(err.offset(), Some(4));
        let parsed = parse_with_opts(b"[1] \n", &strict).expect("strict parse");
        assert_eq!(parsed.end, 5);
    }
}

#[test]
fn aggregate_constructors_print_as_arrays() {
    assert_eq!(Node::int_array(&[1, -2, 3]).to_string(), "[1,-2,3]");
    assert_eq!(Node::double_array(&[0.5, 2.0]).to_string(), "[0.5,2]");
    assert_eq!(
        Node::string_array(&["a", "b\"c"]).to_string(),
        r#"["a","b\"c"]"#
    );
}

#[test]
fn pretty_print_of_built_tree() {
    let mut root = Node::object();
    root.add_string("name", "jsontree").expect("add");
    let nested = root.add_object("nested").expect("add");
    nested.add_true("ok").expect("add");
    root.add_to_object("list", Node::int_array(&[1, 2]))
        .expect("add");

    let expected = "{\n\t\"name\":\t\"jsontree\",\n\t\"nested\":\t{\n\t\t\"ok\":\ttrue\n\t},\n\t\"list\":\t[1, 2]\n}";
    assert_eq!(print(&root).expect("print"), expected);
}

#[test]
fn deep_tree_drops_without_overflow() {
    let mut root = Node::array();
    for _ in 0..100_000 {
        let mut outer = Node::array();
        outer.add_to_array(root).expect("push");
        root = outer;
    }
    assert!(matches!(
        print_unformatted(&root),
        Err(Error::NestingLimit { .. })
    ));
    drop(root);
}
