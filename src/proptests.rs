use std::vec;
use std::vec::Vec;

use bitvec::prelude::*;
use proptest::prelude::*;

use crate::config::{code_words_for, FIXED_CODE_LEN};
use crate::domain::index_of;
use crate::{decode, encode, Codebook, Histogram, MinHeap, Packed, Tree};

const MAX_LEN: usize = 512;
const WORDS: usize = code_words_for(MAX_LEN);

fn symbols() -> impl Strategy<Value = u8> {
    prop_oneof![
        // Skewed toward a few symbols so trees get deep and lopsided.
        3 => prop::sample::select(b"etaoin ".to_vec()),
        1 => b' '..=b'~',
    ]
}

fn input_strategy() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(symbols(), 1..=MAX_LEN)
}

#[derive(Debug, Clone)]
enum HeapOp {
    Push(u32),
    Pop,
}

fn heap_ops() -> impl Strategy<Value = Vec<HeapOp>> {
    prop::collection::vec(
        prop_oneof![
            2 => (0u32..50).prop_map(HeapOp::Push),
            1 => Just(HeapOp::Pop),
        ],
        0..200,
    )
}

fn build(input: &[u8]) -> (Histogram, Tree) {
    let mut histogram = Histogram::new();
    histogram.count(input).unwrap();
    let mut tree = Tree::new();
    tree.build(&histogram, &mut MinHeap::new()).unwrap();
    (histogram, tree)
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    #[test]
    fn prop_round_trip(input in input_strategy()) {
        let (_, tree) = build(&input);
        let mut words: Packed<WORDS> = BitArray::ZERO;
        let bits = encode(&tree, &input, &mut words).unwrap();

        let mut out = vec![0u8; input.len()];
        let n = decode(&tree, &words, bits, &mut out).unwrap();
        prop_assert_eq!(n, input.len());
        prop_assert_eq!(out, input);
    }

    #[test]
    fn prop_bit_length_conservation(input in input_strategy()) {
        let (_, tree) = build(&input);
        let book = Codebook::from_tree(&tree).unwrap();
        let expected: usize = input
            .iter()
            .map(|&s| book.get(index_of(s).unwrap()).unwrap().len())
            .sum();

        let mut words: Packed<WORDS> = BitArray::ZERO;
        prop_assert_eq!(encode(&tree, &input, &mut words).unwrap(), expected);
        prop_assert!(expected <= input.len() * FIXED_CODE_LEN);
    }

    #[test]
    fn prop_tree_size_law(input in input_strategy()) {
        let (histogram, tree) = build(&input);
        let d = histogram.distinct();
        prop_assert_eq!(tree.len(), 2 * d - 1);
        prop_assert_eq!(tree.root(), Some(tree.len() - 1));
        prop_assert!(tree.is_consistent());
        prop_assert_eq!(
            tree.get(tree.len() - 1).unwrap().weight() as usize,
            input.len()
        );
    }

    #[test]
    fn prop_prefix_free(input in input_strategy()) {
        let (_, tree) = build(&input);
        let book = Codebook::from_tree(&tree).unwrap();
        for (i, a) in book.iter() {
            for (j, b) in book.iter() {
                if i != j {
                    prop_assert!(!a.is_prefix_of(&b), "{} prefixes {}", i, j);
                }
            }
        }
    }

    #[test]
    fn prop_frequent_symbols_get_shorter_codes(input in input_strategy()) {
        let (histogram, tree) = build(&input);
        prop_assume!(histogram.distinct() >= 2);
        let book = Codebook::from_tree(&tree).unwrap();
        for (i, a) in book.iter() {
            for (j, b) in book.iter() {
                if histogram.get(i) > histogram.get(j) {
                    prop_assert!(a.len() <= b.len());
                }
            }
        }
    }

    #[test]
    fn prop_heap_invariant(ops in heap_ops()) {
        let mut heap: MinHeap<u32, 256> = MinHeap::new();
        let mut model: Vec<u32> = Vec::new();
        for op in ops {
            match op {
                HeapOp::Push(x) => {
                    heap.push(x).unwrap();
                    model.push(x);
                }
                HeapOp::Pop => {
                    model.sort_unstable_by(|a, b| b.cmp(a));
                    prop_assert_eq!(heap.pop(), model.pop());
                }
            }
            prop_assert!(heap.is_valid());
            prop_assert_eq!(heap.len(), model.len());
        }
    }

    #[test]
    fn prop_heapify_any_order(items in prop::collection::vec(any::<u32>(), 0..95)) {
        let mut heap: MinHeap<u32, 95> = MinHeap::new();
        heap.build(items.iter().copied()).unwrap();
        prop_assert!(heap.is_valid());

        let mut sorted = items.clone();
        sorted.sort_unstable();
        let mut drained = Vec::new();
        while let Some(x) = heap.pop() {
            drained.push(x);
        }
        prop_assert_eq!(drained, sorted);
    }
}
