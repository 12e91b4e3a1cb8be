// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com
//
// Wire behavior of the References array of a Node: absent versus empty,
// exact element counts, and hostile counts.

use uacodec::{
    from_binary, to_binary, EncodingLimits, ExpandedNodeId, Node, NodeClass, NodeId,
    QualifiedName, ReferenceNode, UaError,
};

/// Offset of the References count in an encoding of `base()`.
const COUNT_OFFSET: usize = 26;

fn base() -> Node {
    Node {
        node_id: NodeId::numeric(0, 85),
        node_class: NodeClass::Object,
        browse_name: QualifiedName::new(0, "Root"),
        references: Some(Vec::new()),
        ..Node::default()
    }
}

fn organizes(target: u32) -> ReferenceNode {
    ReferenceNode {
        reference_type_id: NodeId::numeric(0, 35),
        is_inverse: false,
        target_id: ExpandedNodeId::from(NodeId::numeric(0, target)),
    }
}

fn with_count(count: i32) -> Vec<u8> {
    let mut bytes = to_binary(&base(), &EncodingLimits::default()).unwrap();
    bytes[COUNT_OFFSET..].copy_from_slice(&count.to_le_bytes());
    bytes
}

#[test]
fn test_absent_and_empty_are_distinct() {
    let limits = EncodingLimits::default();

    let absent = from_binary::<Node>(&with_count(-1), &limits).unwrap();
    assert_eq!(absent.references, None);

    let empty = from_binary::<Node>(&with_count(0), &limits).unwrap();
    assert_eq!(empty.references, Some(Vec::new()));

    assert_ne!(absent, empty);
    assert_eq!(to_binary(&absent, &limits).unwrap(), with_count(-1));
}

#[test]
fn test_any_negative_count_is_absent() {
    for count in [-2, -100, i32::MIN] {
        let node = from_binary::<Node>(&with_count(count), &EncodingLimits::default()).unwrap();
        assert_eq!(node.references, None, "count {count}");
    }
}

#[test]
fn test_elements_follow_count_in_order() {
    let node = Node {
        references: Some((86..=90).map(organizes).collect()),
        ..base()
    };
    let limits = EncodingLimits::default();
    let bytes = to_binary(&node, &limits).unwrap();

    assert_eq!(&bytes[COUNT_OFFSET..COUNT_OFFSET + 4], &5i32.to_le_bytes());
    // Each element: two-byte NodeId, Boolean, two-byte ExpandedNodeId.
    assert_eq!(bytes.len(), COUNT_OFFSET + 4 + 5 * 5);
    assert_eq!(&bytes[COUNT_OFFSET + 4..COUNT_OFFSET + 9], &[0x00, 35, 0x00, 0x00, 86]);

    let decoded = from_binary::<Node>(&bytes, &limits).unwrap();
    let targets: Vec<_> = decoded
        .references
        .unwrap()
        .iter()
        .map(|r| r.target_id.node_id.clone())
        .collect();
    assert_eq!(targets, (86..=90).map(|id| NodeId::numeric(0, id)).collect::<Vec<_>>());
}

#[test]
fn test_count_larger_than_payload_fails_without_allocating() {
    // A count near the array limit with no elements behind it must fail on
    // the first missing element, not on a giant pre-allocation.
    let limits = EncodingLimits::default();
    let count = i32::try_from(limits.max_array_length).unwrap();
    let err = from_binary::<Node>(&with_count(count), &limits).unwrap_err();
    assert!(err.is_decoding());
}

#[test]
fn test_count_over_limit_rejected() {
    let limits = EncodingLimits::default().with_max_array_length(3);
    let err = from_binary::<Node>(&with_count(4), &limits).unwrap_err();
    assert!(matches!(err, UaError::Decoding { .. }));

    let node = Node {
        references: Some((1..=4).map(organizes).collect()),
        ..base()
    };
    assert!(matches!(to_binary(&node, &limits), Err(UaError::Encoding { .. })));
}

#[test]
fn test_bad_element_fails_whole_array() {
    let node = Node {
        references: Some(vec![organizes(86), organizes(87)]),
        ..base()
    };
    let mut bytes = to_binary(&node, &EncodingLimits::default()).unwrap();
    // Second element's ReferenceTypeId encoding byte.
    bytes[COUNT_OFFSET + 4 + 5] = 0x3F;
    assert!(from_binary::<Node>(&bytes, &EncodingLimits::default())
        .unwrap_err()
        .is_decoding());
}
