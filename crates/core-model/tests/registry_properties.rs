//! Property tests over random tab lifecycles.

use std::collections::HashSet;

use core_model::TabRegistry;
use core_state::DocumentId;
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    New,
    Close(usize),
    Switch(usize),
    Next,
    Prev,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        Just(Op::New),
        (0usize..8).prop_map(Op::Close),
        (0usize..8).prop_map(Op::Switch),
        Just(Op::Next),
        Just(Op::Prev),
    ]
}

proptest! {
    // At least one tab is always open, the active id is always one of them,
    // and no id is ever handed out twice.
    #[test]
    fn lifecycle_invariants(ops in proptest::collection::vec(op(), 1..40)) {
        let mut reg = TabRegistry::new();
        let mut seen: HashSet<DocumentId> = reg.ids().into_iter().collect();
        for op in ops {
            let ids = reg.ids();
            match op {
                Op::New => {
                    let id = reg.new_tab();
                    prop_assert!(seen.insert(id), "id {} reused", id);
                }
                Op::Close(i) => {
                    let target = ids[i % ids.len()];
                    prop_assert!(reg.close_tab(target));
                    prop_assert!(reg.get(target).is_none());
                }
                Op::Switch(i) => {
                    let target = ids[i % ids.len()];
                    prop_assert!(reg.switch_tab(target));
                    prop_assert_eq!(reg.active_id(), target);
                }
                Op::Next => reg.next_tab(),
                Op::Prev => reg.prev_tab(),
            }
            for id in reg.ids() {
                seen.insert(id);
            }
            prop_assert!(reg.tab_count() >= 1);
            prop_assert!(reg.ids().contains(&reg.active_id()));
        }
    }
}
