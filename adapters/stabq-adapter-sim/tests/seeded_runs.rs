//! Integration tests for seeded simulator runs.

use stabq_adapter_sim::SimulatorBackend;
use stabq_hal::{Backend, HalError};
use stabq_ir::{Circuit, ClbitId, Guard, Qubit};

fn coin_flips(n: u32) -> Circuit {
    let mut circuit = Circuit::declare_registers("coins", n as usize, 0, n as usize).unwrap();
    for i in 0..n {
        circuit.h(Qubit::data(i)).unwrap();
    }
    let qubits: Vec<_> = (0..n).map(Qubit::data).collect();
    let clbits: Vec<_> = (0..n).map(ClbitId).collect();
    circuit.measure(&qubits, &clbits).unwrap();
    circuit
}

#[test]
fn same_seed_same_outcomes() {
    let circuit = coin_flips(8);
    let a = SimulatorBackend::new().with_seed(99).run(&circuit).unwrap();
    let b = SimulatorBackend::new().with_seed(99).run(&circuit).unwrap();
    assert_eq!(a.clbits, b.clbits);
    assert_eq!(a.state, b.state);
}

#[test]
fn measured_state_is_a_basis_state() {
    let circuit = coin_flips(4);
    let result = SimulatorBackend::new().with_seed(3).run(&circuit).unwrap();

    let amps = result.state.amplitudes();
    assert_eq!(amps.len(), 1);
    let label = amps.keys().next().unwrap();
    // Label is MSB first; clbit k holds qubit k.
    let expected: String = result
        .clbits
        .iter()
        .rev()
        .map(|&b| if b { '1' } else { '0' })
        .collect();
    assert_eq!(label, &expected);
}

#[test]
fn nested_conditions_need_both_bits() {
    let mut circuit = Circuit::declare_registers("nested", 1, 2, 2).unwrap();
    circuit.x(Qubit::ancilla(0)).unwrap();
    circuit
        .measure(&[Qubit::ancilla(0), Qubit::ancilla(1)], &[ClbitId(0), ClbitId(1)])
        .unwrap();
    circuit
        .with_condition(Guard::bit(ClbitId(0), true), |c| {
            c.with_condition(Guard::bit(ClbitId(1), true), |c| {
                c.x(Qubit::data(0))?;
                Ok(())
            })?;
            c.z(Qubit::data(0))?;
            Ok(())
        })
        .unwrap();

    let result = SimulatorBackend::new().run(&circuit).unwrap();
    assert_eq!(result.clbits, vec![true, false]);
    assert_eq!(result.fired.len(), 1);
    assert_eq!(result.fired[0].name(), "z");
}

#[test]
fn validation_reports_size() {
    let backend = SimulatorBackend::with_max_qubits(2);
    let circuit = coin_flips(3);
    assert!(!backend.validate(&circuit).is_valid());
    assert!(matches!(
        backend.run(&circuit),
        Err(HalError::CircuitTooLarge(_))
    ));
}
