// MIT License
//
// Copyright (c) 2020 Gregory Meyer
//
// Permission is hereby granted, free of charge, to any person
// obtaining a copy of this software and associated documentation files
// (the "Software"), to deal in the Software without restriction,
// including without limitation the rights to use, copy, modify, merge,
// publish, distribute, sublicense, and/or sell copies of the Software,
// and to permit persons to whom the Software is furnished to do so,
// subject to the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS
// BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN
// ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN
// CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
// SOFTWARE.

use super::*;

use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Put(i32, i32),
    Remove(i32),
    Merge(i32, i32),
    RemoveNth(usize),
    Trim,
}

fn ops_strategy() -> impl Strategy<Value = Vec<Op>> {
    // a narrow key range keeps collisions frequent and includes the empty marker
    let key = -16i32..48;
    let op = prop_oneof![
        40 => (key.clone(), any::<i32>()).prop_map(|(k, v)| Op::Put(k, v)),
        30 => key.clone().prop_map(Op::Remove),
        15 => (key, any::<i32>()).prop_map(|(k, v)| Op::Merge(k, v)),
        10 => any::<usize>().prop_map(Op::RemoveNth),
        5 => Just(Op::Trim),
    ];

    prop::collection::vec(op, 0..400)
}

/// The expected iteration order: each segment's entries in insertion order,
/// segments in index order.
fn expected_order(map: &HashMap<i32, i32>, model: &[(i32, i32)]) -> Vec<(i32, i32)> {
    (0..map.num_segments())
        .flat_map(move |segment| {
            model
                .iter()
                .copied()
                .filter(move |&(k, _)| map.segment_index(k) == segment)
        })
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    #[test]
    fn prop_equivalence(ops in ops_strategy(), num_segments in 1usize..=4) {
        let map: HashMap<i32, i32> = HashMap::builder()
            .num_segments(num_segments)
            .capacity(2)
            .default_value(i32::MIN)
            .build()
            .unwrap();
        let mut model: Vec<(i32, i32)> = Vec::new();

        for op in ops {
            match op {
                Op::Put(k, v) => {
                    let expected = match model.iter_mut().find(|(key, _)| *key == k) {
                        Some(entry) => std::mem::replace(&mut entry.1, v),
                        None => {
                            model.push((k, v));
                            i32::MIN
                        }
                    };

                    prop_assert_eq!(map.put(k, v), expected);
                }
                Op::Remove(k) => {
                    let expected = match model.iter().position(|&(key, _)| key == k) {
                        Some(index) => model.remove(index).1,
                        None => i32::MIN,
                    };

                    prop_assert_eq!(map.remove(k), expected);
                }
                Op::Merge(k, v) => {
                    let expected = match model.iter_mut().find(|(key, _)| *key == k) {
                        Some(entry) => {
                            entry.1 = entry.1.wrapping_add(v);
                            entry.1
                        }
                        None => {
                            model.push((k, v));
                            v
                        }
                    };

                    prop_assert_eq!(map.merge(k, v, |a, b| Some(a.wrapping_add(b))), expected);
                }
                Op::RemoveNth(n) => {
                    if model.is_empty() {
                        continue;
                    }

                    let order = expected_order(&map, &model);
                    let target = order[n % order.len()];

                    let mut iter = map.iter();
                    let mut removed = None;
                    while let Some(entry) = iter.next() {
                        if entry == target {
                            removed = iter.remove();
                            break;
                        }
                    }

                    prop_assert_eq!(removed, Some(target));
                    model.retain(|&(k, _)| k != target.0);
                }
                Op::Trim => prop_assert!(map.trim()),
            }

            map.assert_consistent();
            prop_assert_eq!(map.len(), model.len());
        }

        prop_assert_eq!(map.iter().collect::<Vec<_>>(), expected_order(&map, &model));

        for &(k, v) in &model {
            prop_assert_eq!(map.get(k), v);
        }
    }
}
