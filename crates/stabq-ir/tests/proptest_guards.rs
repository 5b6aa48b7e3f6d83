//! Property-based tests for classical guards and conditional nesting.
//!
//! Nested `with_condition` blocks must behave exactly like a single guard
//! holding the conjunction of every enclosing requirement.

use proptest::prelude::*;
use stabq_ir::{Circuit, ClbitId, Guard, Operation, Qubit};

const NUM_CLBITS: u32 = 4;

fn arb_guard() -> impl Strategy<Value = Guard> {
    prop::collection::vec((0..NUM_CLBITS, any::<bool>()), 0..=3)
        .prop_map(|pairs| Guard::pattern(pairs.into_iter().map(|(c, v)| (ClbitId(c), v))))
}

fn arb_bits() -> impl Strategy<Value = Vec<bool>> {
    prop::collection::vec(any::<bool>(), NUM_CLBITS as usize)
}

/// Build a circuit with `guards` nested outermost-first around one X gate.
fn nested(guards: &[Guard]) -> Circuit {
    fn build(c: &mut Circuit, guards: &[Guard]) -> stabq_ir::IrResult<()> {
        match guards.split_first() {
            None => {
                c.x(Qubit::data(0))?;
                Ok(())
            }
            Some((first, rest)) => {
                c.with_condition(first.clone(), |c| build(c, rest))?;
                Ok(())
            }
        }
    }

    let mut circuit = Circuit::declare_registers("nested", 1, 0, NUM_CLBITS as usize).unwrap();
    build(&mut circuit, guards).unwrap();
    circuit
}

/// Reference semantics: walk the blocks, checking each guard at its level.
fn fires(ops: &[Operation], bits: &[bool]) -> bool {
    ops.iter().any(|op| match op {
        Operation::Gate { .. } => true,
        Operation::Measure { .. } => false,
        Operation::Conditional { guard, body } => guard.is_satisfied_by(bits) && fires(body, bits),
    })
}

proptest! {
    #[test]
    fn nested_guards_compose_as_and(
        guards in prop::collection::vec(arb_guard(), 1..=3),
        bits in arb_bits(),
    ) {
        let circuit = nested(&guards);
        let expected = guards.iter().all(|g| g.is_satisfied_by(&bits));

        prop_assert_eq!(fires(circuit.operations(), &bits), expected);

        let flattened = circuit.guarded_operations();
        let flat_fires = flattened.iter().any(|(g, _)| g.is_satisfied_by(&bits));
        prop_assert_eq!(flat_fires, expected);
    }

    #[test]
    fn conjunction_is_satisfied_iff_both_are(
        a in arb_guard(),
        b in arb_guard(),
        bits in arb_bits(),
    ) {
        let both = a.is_satisfied_by(&bits) && b.is_satisfied_by(&bits);
        match a.and(&b) {
            Some(ab) => prop_assert_eq!(ab.is_satisfied_by(&bits), both),
            None => prop_assert!(!both),
        }
    }
}

#[test]
fn two_level_nest_fires_only_on_one_combination() {
    let circuit = nested(&[Guard::bit(ClbitId(0), true), Guard::bit(ClbitId(1), false)]);

    for (b0, b1) in [(false, false), (false, true), (true, false), (true, true)] {
        let bits = [b0, b1, false, false];
        assert_eq!(
            fires(circuit.operations(), &bits),
            b0 && !b1,
            "bits ({b0}, {b1})"
        );
    }
}
