//! Property tests for option states and versioned flattening.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use optstate_store::{OptionKey, OptionRegistry, OptionState, Versioned};
use proptest::prelude::*;

static KEYS: LazyLock<Vec<OptionKey<i64>>> = LazyLock::new(|| {
    (0..6)
        .map(|i| OptionRegistry::global().create(format!("prop/key-{i}"), Some(-1)).unwrap())
        .collect()
});

/// Per-version patches: version -> (key index -> value).
fn patches() -> impl Strategy<Value = BTreeMap<i32, BTreeMap<usize, i64>>> {
    prop::collection::btree_map(
        -20i32..20,
        prop::collection::btree_map(0usize..6, any::<i64>(), 0..4),
        0..6,
    )
}

fn build(patches: &BTreeMap<i32, BTreeMap<usize, i64>>) -> Versioned {
    let mut builder = OptionState::versioned();
    for (version, values) in patches {
        builder.version(*version, |b| {
            for (index, value) in values {
                b.value(&KEYS[*index], *value);
            }
        });
    }
    builder.build()
}

/// Reference model: the last write at or below `target` wins.
fn expected(patches: &BTreeMap<i32, BTreeMap<usize, i64>>, target: i32, index: usize) -> Option<i64> {
    patches
        .range(..=target)
        .filter_map(|(_, values)| values.get(&index).copied())
        .last()
}

proptest! {
    #[test]
    fn flattening_matches_last_write_model(patches in patches(), target in -25i32..25) {
        let view = build(&patches).at(target);
        for (index, key) in KEYS.iter().enumerate() {
            let model = expected(&patches, target, index);
            prop_assert_eq!(view.has(key), model.is_some());
            prop_assert_eq!(view.value(key).copied(), Some(model.unwrap_or(-1)));
        }
    }

    #[test]
    fn flattening_is_idempotent(patches in patches(), target in -25i32..25) {
        let versioned = build(&patches);
        prop_assert_eq!(versioned.at(target), versioned.at(target));
    }

    #[test]
    fn inclusion_is_monotonic(patches in patches(), a in -25i32..25, b in -25i32..25) {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        let versioned = build(&patches);
        let low_versions: Vec<i32> = versioned.at(low).child_states().map(|(v, _)| *v).collect();
        let high_versions: Vec<i32> = versioned.at(high).child_states().map(|(v, _)| *v).collect();
        prop_assert!(low_versions.iter().all(|v| high_versions.contains(v)));

        // Values fixed by `low` survive unless a version in (low, high] overrides them.
        let low_view = versioned.at(low);
        let high_view = versioned.at(high);
        for (index, key) in KEYS.iter().enumerate() {
            let overridden = low < high
                && patches
                    .range(low + 1..=high)
                    .any(|(_, values)| values.contains_key(&index));
            if low_view.has(key) && !overridden {
                prop_assert_eq!(low_view.value(key), high_view.value(key));
            }
        }
    }

    #[test]
    fn later_version_wins(first in -10i32..10, gap in 1i32..10, p in any::<i64>(), q in any::<i64>()) {
        let key = &KEYS[0];
        let versioned = OptionState::versioned()
            .version(first, |b| { b.value(key, p); })
            .version(first + gap, |b| { b.value(key, q); })
            .build();
        prop_assert_eq!(versioned.value(key), Some(&q));
        let lower = versioned.at(first + gap - 1);
        prop_assert_eq!(lower.value(key), Some(&p));
    }

    #[test]
    fn builder_round_trips_existing_state(values in prop::collection::btree_map(0usize..6, any::<i64>(), 0..6)) {
        let mut builder = OptionState::builder();
        for (index, value) in &values {
            builder.value(&KEYS[*index], *value);
        }
        let existing = builder.build();
        let copied = OptionState::builder().values(&existing).build();
        prop_assert_eq!(copied, existing);
    }

    #[test]
    fn last_set_value_is_read_back(index in 0usize..6, values in prop::collection::vec(any::<i64>(), 1..5)) {
        let mut builder = OptionState::builder();
        for value in &values {
            builder.value(&KEYS[index], *value);
        }
        let state = builder.build();
        prop_assert!(state.has(&KEYS[index]));
        prop_assert_eq!(state.value(&KEYS[index]), values.last());
    }
}
