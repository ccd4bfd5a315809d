//! Execution Control.
//!
//! Continue alternates fixed quanta with interrupt checks:
//!
//! - One quantum always runs before the first check.
//! - `EINTR` from the wait runs another quantum; other errors stop the run.
//! - A target that stops on its own ends the run without a check.

use std::io;

use pretty_assertions::assert_eq;

use nyuzi_stub::exec::{ExecutionController, StopCause};

use crate::common::mocks::probe::ScriptedProbe;
use crate::common::mocks::target::RecordingTarget;

#[test]
fn test_interrupt_after_first_quantum() {
    let controller = ExecutionController::new(1000);
    let mut target = RecordingTarget::new(4);
    let mut probe = ScriptedProbe::immediate();
    let cause = controller.continue_until_interrupt(&mut target, &mut probe);
    assert_eq!(cause, StopCause::Interrupted);
    assert_eq!(target.advances, vec![1000]);
    assert_eq!(probe.calls, 1);
}

#[test]
fn test_quiet_checks_keep_running() {
    let controller = ExecutionController::new(25);
    let mut target = RecordingTarget::new(1);
    let mut probe = ScriptedProbe::interrupt_after(3);
    let cause = controller.continue_until_interrupt(&mut target, &mut probe);
    assert_eq!(cause, StopCause::Interrupted);
    assert_eq!(target.advances, vec![25; 4]);
}

#[test]
fn test_eintr_is_retried() {
    let controller = ExecutionController::new(10);
    let mut target = RecordingTarget::new(1);
    let mut probe = ScriptedProbe::new(vec![
        Err(io::Error::from(io::ErrorKind::Interrupted)),
        Err(io::Error::from(io::ErrorKind::Interrupted)),
        Ok(true),
    ]);
    let cause = controller.continue_until_interrupt(&mut target, &mut probe);
    assert_eq!(cause, StopCause::Interrupted);
    assert_eq!(target.advances.len(), 3);
}

#[test]
fn test_other_wait_errors_stop_the_run() {
    let controller = ExecutionController::new(10);
    let mut target = RecordingTarget::new(1);
    let mut probe = ScriptedProbe::new(vec![
        Ok(false),
        Err(io::Error::from(io::ErrorKind::InvalidInput)),
    ]);
    let cause = controller.continue_until_interrupt(&mut target, &mut probe);
    assert_eq!(cause, StopCause::WaitFailed);
    assert_eq!(target.advances.len(), 2);
}

#[test]
fn test_target_stop_ends_the_run_without_a_check() {
    let controller = ExecutionController::new(10);
    let mut target = RecordingTarget::new(1);
    target.stop_on_advance = Some(2);
    let mut probe = ScriptedProbe::interrupt_after(100);
    let cause = controller.continue_until_interrupt(&mut target, &mut probe);
    assert_eq!(cause, StopCause::TargetStopped);
    assert_eq!(target.advances.len(), 2);
    assert_eq!(probe.calls, 1);
}

#[test]
fn test_step_runs_the_selected_strand() {
    let controller = ExecutionController::default();
    let mut target = RecordingTarget::new(4);
    assert!(controller.select_strand(&mut target, 2));
    controller.single_step(&mut target);
    assert_eq!(target.steps, vec![2]);
    assert_eq!(target.selected, 2);
}

#[test]
fn test_out_of_range_selection_changes_nothing() {
    let controller = ExecutionController::default();
    let mut target = RecordingTarget::new(4);
    assert!(controller.select_strand(&mut target, 1));
    assert!(!controller.select_strand(&mut target, 4));
    assert_eq!(target.selected, 1);
}

#[test]
fn test_default_quantum_is_one_thousand_cycles() {
    assert_eq!(ExecutionController::default().quantum_cycles(), 1000);
}
