//! Property tests for the per-kind asset slot state machine.

use proptest::prelude::*;
use storyboard_core::{AssetSlot, GenerationState};

#[derive(Debug, Clone)]
enum SlotOp {
    Begin,
    Complete(String),
    Fail,
    Assign(String),
    StaleComplete,
}

fn arb_op() -> impl Strategy<Value = SlotOp> {
    prop_oneof![
        Just(SlotOp::Begin),
        "[a-z]{1,8}\\.mp3".prop_map(SlotOp::Complete),
        Just(SlotOp::Fail),
        "[a-z]{1,8}\\.png".prop_map(SlotOp::Assign),
        Just(SlotOp::StaleComplete),
    ]
}

proptest! {
    /// Once a slot holds an asset it keeps holding one, whatever happens to
    /// later generations.
    #[test]
    fn asset_never_disappears(ops in prop::collection::vec(arb_op(), 1..40)) {
        let mut slot = AssetSlot::default();
        let mut had_asset = false;
        for op in ops {
            match op {
                SlotOp::Begin => {
                    slot.begin();
                }
                SlotOp::Complete(url) => {
                    let epoch = slot.epoch();
                    slot.complete(epoch, url);
                }
                SlotOp::Fail => {
                    let epoch = slot.epoch();
                    slot.fail(epoch, "generator unavailable");
                }
                SlotOp::Assign(url) => slot.assign(url),
                SlotOp::StaleComplete => {
                    let epoch = slot.epoch().wrapping_sub(1);
                    prop_assert!(!slot.complete(epoch, "late.mp4"));
                }
            }
            had_asset |= slot.has_asset();
            if had_asset {
                prop_assert!(slot.has_asset());
            }
        }
    }

    /// Any number of starts without a completion enters `generating` once.
    #[test]
    fn repeated_begin_enters_generating_once(starts in 1usize..10) {
        let mut slot = AssetSlot::default();
        let transitions = (0..starts).filter_map(|_| slot.begin()).count();
        prop_assert_eq!(transitions, 1);
        prop_assert_eq!(slot.state(), GenerationState::Generating);
        prop_assert_eq!(slot.epoch(), 1);
    }
}
