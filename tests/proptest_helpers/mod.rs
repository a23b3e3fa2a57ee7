#![allow(dead_code)]

use jsontree::Node;
use proptest::prelude::*;
use proptest::strategy::BoxedStrategy;
use proptest::test_runner::{Config as ProptestConfig, FileFailurePersistence};

pub fn proptest_config() -> ProptestConfig {
    let cases = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(64);

    let mut config = ProptestConfig::with_failure_persistence(FileFailurePersistence::WithSource(
        "proptest-regressions",
    ));
    config.cases = cases;
    config.max_shrink_iters = 1024;
    config
}

/// A cloneable description of a JSON tree, turned into a [`Node`] on demand.
#[derive(Clone, Debug)]
pub enum Tree {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
    Array(Vec<Tree>),
    Object(Vec<(String, Tree)>),
}

impl Tree {
    pub fn to_node(&self) -> Node<'static> {
        match self {
            Tree::Null => Node::null(),
            Tree::Bool(value) => Node::bool(*value),
            Tree::Number(value) => Node::number(*value),
            Tree::Text(text) => Node::string(text),
            Tree::Array(items) => {
                let mut array = Node::array();
                for item in items {
                    array
                        .add_to_array(item.to_node())
                        .expect("array accepts members");
                }
                array
            }
            Tree::Object(members) => {
                let mut object = Node::object();
                for (key, item) in members {
                    object
                        .add_to_object(key, item.to_node())
                        .expect("object accepts members");
                }
                object
            }
        }
    }
}

pub fn arb_number() -> BoxedStrategy<f64> {
    prop_oneof![
        (-1_000_000i64..1_000_000).prop_map(|v| v as f64),
        prop::num::f64::POSITIVE
            | prop::num::f64::NEGATIVE
            | prop::num::f64::NORMAL
            | prop::num::f64::SUBNORMAL
            | prop::num::f64::ZERO,
    ]
    .boxed()
}

/// Strings biased towards bytes the printer has to escape.
pub fn arb_text() -> BoxedStrategy<String> {
    prop_oneof![
        any::<String>(),
        proptest::string::string_regex(r#"[\x00-\x1f"\\/*a-z ]{0,12}"#)
            .expect("valid escape-heavy regex"),
    ]
    .boxed()
}

/// Object keys drawn often from a tiny alphabet so that repeats are common.
pub fn arb_key() -> BoxedStrategy<String> {
    prop_oneof![
        2 => proptest::string::string_regex("[aA]").expect("valid key regex"),
        3 => arb_text(),
    ]
    .boxed()
}

/// Trees of bounded depth and size. Objects may repeat keys.
pub fn arb_tree() -> BoxedStrategy<Tree> {
    let leaf = prop_oneof![
        Just(Tree::Null),
        any::<bool>().prop_map(Tree::Bool),
        arb_number().prop_map(Tree::Number),
        arb_text().prop_map(Tree::Text),
    ];

    leaf.prop_recursive(4, 64, 8, |inner| {
        prop_oneof![
            proptest::collection::vec(inner.clone(), 0..8).prop_map(Tree::Array),
            proptest::collection::vec((arb_key(), inner), 0..8).prop_map(Tree::Object),
        ]
    })
    .boxed()
}
