#![cfg(test)]
//! Randomized lockstep tests for `Chain`.
//!
//! Drives a chain and a plain `Vec` model through the same operation
//! sequence. The model keeps `(handle, payload)` pairs in chain order, so it
//! predicts not just the payload sequence but which handle sits where; after
//! every step the chain must agree on length, order, end pointers, link
//! symmetry, and handle liveness. Payloads are drawn from a small domain so
//! duplicates (and first-match semantics) come up constantly.

use crate::chain::{Chain, ItemNotFound, NodeHandle};
use proptest::collection::vec;
use proptest::prelude::*;
use proptest::test_runner::TestCaseError;

#[derive(Clone, Debug)]
enum Op {
    PushBack(u8),
    PushFront(u8),
    PopFront,
    PopBack,
    Remove(u8),
    Replace(u8, u8),
    /// Unlink by handle; the index picks from the live pool.
    RemoveNodeAt(usize),
    /// In-place payload mutation through a pooled handle.
    MutateAt(usize, u8),
    Find(u8),
    Clear,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    let value = 0u8..16;
    prop_oneof![
        4 => value.clone().prop_map(Op::PushBack),
        2 => value.clone().prop_map(Op::PushFront),
        1 => Just(Op::PopFront),
        1 => Just(Op::PopBack),
        2 => value.clone().prop_map(Op::Remove),
        2 => (value.clone(), value.clone()).prop_map(|(old, new)| Op::Replace(old, new)),
        2 => any::<usize>().prop_map(Op::RemoveNodeAt),
        2 => (any::<usize>(), value.clone()).prop_map(|(at, new)| Op::MutateAt(at, new)),
        1 => value.prop_map(Op::Find),
        1 => Just(Op::Clear),
    ]
}

fn check_consistency(
    chain: &Chain<u8>,
    model: &[(NodeHandle, u8)],
    retired: &[NodeHandle],
) -> Result<(), TestCaseError> {
    prop_assert_eq!(chain.len(), model.len());
    prop_assert_eq!(chain.is_empty(), model.is_empty());

    let payloads: Vec<u8> = model.iter().map(|(_, value)| *value).collect();
    prop_assert_eq!(chain.items(), payloads);

    prop_assert_eq!(chain.front().copied(), model.first().map(|(_, v)| *v));
    prop_assert_eq!(chain.back().copied(), model.last().map(|(_, v)| *v));
    prop_assert_eq!(chain.head(), model.first().map(|(h, _)| *h));
    prop_assert_eq!(chain.tail(), model.last().map(|(h, _)| *h));

    // Forward and backward walks must visit the same nodes, and exactly the
    // nodes the model says are live, in order.
    let mut forward = Vec::with_capacity(model.len());
    let mut cursor = chain.head();
    while let Some(handle) = cursor {
        forward.push(handle);
        cursor = handle.next(chain);
    }
    let mut backward = Vec::with_capacity(model.len());
    let mut cursor = chain.tail();
    while let Some(handle) = cursor {
        backward.push(handle);
        cursor = handle.prev(chain);
    }
    backward.reverse();
    prop_assert_eq!(&forward, &backward);
    let pooled: Vec<NodeHandle> = model.iter().map(|(handle, _)| *handle).collect();
    prop_assert_eq!(&forward, &pooled);

    for (handle, value) in model {
        prop_assert_eq!(handle.data(chain), Some(value));
    }
    for handle in retired {
        prop_assert!(handle.data(chain).is_none());
        prop_assert!(handle.next(chain).is_none());
        prop_assert!(handle.prev(chain).is_none());
    }
    Ok(())
}

proptest! {
    #[test]
    fn chain_matches_model(ops in vec(op_strategy(), 1..200)) {
        let mut chain: Chain<u8> = Chain::new();
        let mut model: Vec<(NodeHandle, u8)> = Vec::new();
        let mut retired: Vec<NodeHandle> = Vec::new();

        for op in ops {
            match op {
                Op::PushBack(value) => {
                    let handle = chain.push_back(value);
                    model.push((handle, value));
                }
                Op::PushFront(value) => {
                    let handle = chain.push_front(value);
                    model.insert(0, (handle, value));
                }
                Op::PopFront => {
                    if model.is_empty() {
                        prop_assert_eq!(chain.pop_front(), None);
                    } else {
                        let (handle, value) = model.remove(0);
                        prop_assert_eq!(chain.pop_front(), Some(value));
                        retired.push(handle);
                    }
                }
                Op::PopBack => match model.pop() {
                    Some((handle, value)) => {
                        prop_assert_eq!(chain.pop_back(), Some(value));
                        retired.push(handle);
                    }
                    None => prop_assert_eq!(chain.pop_back(), None),
                },
                Op::Remove(value) => {
                    match model.iter().position(|(_, v)| *v == value) {
                        Some(at) => {
                            let (handle, _) = model.remove(at);
                            prop_assert_eq!(chain.remove(&value), Ok(value));
                            retired.push(handle);
                        }
                        None => prop_assert_eq!(chain.remove(&value), Err(ItemNotFound)),
                    }
                }
                Op::Replace(old, new) => {
                    match model.iter().position(|(_, v)| *v == old) {
                        Some(at) => {
                            model[at].1 = new;
                            prop_assert_eq!(chain.replace(&old, new), Ok(old));
                        }
                        None => prop_assert_eq!(chain.replace(&old, new), Err(ItemNotFound)),
                    }
                }
                Op::RemoveNodeAt(at) => {
                    if model.is_empty() {
                        continue;
                    }
                    let (handle, value) = model.remove(at % model.len());
                    prop_assert_eq!(chain.remove_node(handle), Some(value));
                    retired.push(handle);
                }
                Op::MutateAt(at, new) => {
                    if model.is_empty() {
                        continue;
                    }
                    let at = at % model.len();
                    let (handle, _) = model[at];
                    *handle.data_mut(&mut chain).expect("pooled handle is live") = new;
                    model[at].1 = new;
                }
                Op::Find(value) => {
                    let expected = model.iter().map(|(_, v)| v).find(|v| **v == value);
                    prop_assert_eq!(chain.find(|v| *v == value), expected);
                }
                Op::Clear => {
                    retired.extend(model.drain(..).map(|(handle, _)| handle));
                    chain.clear();
                }
            }
            check_consistency(&chain, &model, &retired)?;
        }
    }
}
