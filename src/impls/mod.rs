//! Conversions between [`Node`](crate::Node) trees and other JSON models.

mod serde_json;
