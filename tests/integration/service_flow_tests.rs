//! Integration tests for the ElevatorService → FSM → ports pipeline.
//!
//! Each group starts the car in a known situation (stopped, moving,
//! waiting) and checks both the resulting state and the exact sequence of
//! port calls.

use super::mock_hw::{Call, MockHardware};

use elevator_fsm::app::ports::PortSet;
use elevator_fsm::app::service::ElevatorService;
use elevator_fsm::config::ElevatorConfig;
use elevator_fsm::fsm::StateId;

const GROUND: usize = 1;

fn make_service() -> (ElevatorService, MockHardware) {
    let mut service = ElevatorService::new(ElevatorConfig::default()).unwrap();
    let mut hw = MockHardware::new();
    service.start(&mut hw);
    assert_eq!(hw.take(), vec![Call::InService]);
    (service, hw)
}

fn cfg() -> ElevatorConfig {
    ElevatorConfig::default()
}

/// Car travelling to the floor above ground; setup calls already drained.
fn make_moving() -> (ElevatorService, MockHardware) {
    let (mut service, mut hw) = make_service();
    assert!(service.floor_requested(GROUND + 1, &mut hw));
    assert_eq!(service.state(), StateId::Moving);
    hw.take();
    (service, hw)
}

/// Doors open at ground; setup calls already drained.
fn make_waiting() -> (ElevatorService, MockHardware) {
    let (mut service, mut hw) = make_service();
    assert!(service.open_button(&mut hw));
    assert!(service.doors_opened(&mut hw));
    assert!(service.is_waiting());
    hw.take();
    (service, hw)
}

// ── Stopped ──────────────────────────────────────────────────

#[test]
fn stopped_is_idle_with_no_activity() {
    let (service, hw) = make_service();
    assert!(service.is_idle());
    assert!(service.is_in_service());
    assert!(!service.is_waiting());
    assert!(hw.calls.is_empty());
}

#[test]
fn same_floor_request_opens_doors_without_moving() {
    let (mut service, mut hw) = make_service();

    assert!(service.floor_requested(GROUND, &mut hw));

    assert_eq!(service.state(), StateId::Opening);
    assert!(!service.is_idle());
    assert_eq!(
        hw.calls,
        vec![
            Call::Arrived(GROUND),
            Call::OpenDoors,
            Call::StartTimer(cfg().door_open_timeout()),
        ]
    );
    assert!(service.history().all(|t| t.to != StateId::Moving));
}

#[test]
fn open_button_opens_doors() {
    let (mut service, mut hw) = make_service();

    assert!(service.open_button(&mut hw));

    assert_eq!(service.state(), StateId::Opening);
    assert_eq!(
        hw.calls,
        vec![
            Call::Arrived(GROUND),
            Call::OpenDoors,
            Call::StartTimer(cfg().door_open_timeout()),
        ]
    );
}

#[test]
fn new_floor_request_moves_with_one_command_and_one_timer() {
    let (mut service, mut hw) = make_service();

    assert!(service.floor_requested(GROUND + 1, &mut hw));

    assert_eq!(service.state(), StateId::Moving);
    assert_eq!(
        hw.calls,
        vec![
            Call::GoToFloor(GROUND + 1),
            Call::StartTimer(cfg().move_timeout()),
        ]
    );
    assert_eq!(service.position().destination_floor, GROUND + 1);
}

#[test]
fn same_floor_door_timeout_goes_out_of_service() {
    let (mut service, mut hw) = make_service();
    assert!(service.floor_requested(GROUND, &mut hw));
    hw.take();

    assert!(service.timer_expired(&mut hw));

    assert!(!service.is_in_service());
    assert_eq!(hw.calls, vec![Call::OutOfService, Call::StopTimer]);
}

#[test]
fn same_floor_door_fault_goes_out_of_service() {
    let (mut service, mut hw) = make_service();
    assert!(service.floor_requested(GROUND, &mut hw));
    hw.take();

    assert!(service.door_fault(&mut hw));

    assert!(!service.is_in_service());
    assert_eq!(hw.count(&Call::OutOfService), 1);
}

#[test]
fn stopped_ignores_hardware_events() {
    let (mut service, mut hw) = make_service();

    assert!(!service.arrived(&mut hw));
    assert!(!service.doors_opened(&mut hw));
    assert!(!service.doors_closed(&mut hw));
    assert!(!service.door_fault(&mut hw));
    assert!(!service.drive_fault(&mut hw));
    assert!(!service.timer_expired(&mut hw));
    assert!(!service.close_button(&mut hw));
    assert!(!service.stop_button(&mut hw));
    assert!(!service.restore_service(&mut hw));

    assert!(service.is_idle());
    assert!(hw.calls.is_empty());
    assert_eq!(service.transition_count(), 0);
}

#[test]
fn floor_zero_is_rejected() {
    let (mut service, mut hw) = make_service();

    assert!(!service.floor_requested(0, &mut hw));

    assert!(service.is_idle());
    assert_eq!(service.position().destination_floor, GROUND);
    assert!(hw.calls.is_empty());
}

// ── Moving ───────────────────────────────────────────────────

#[test]
fn arrival_then_doors_opened_ends_waiting() {
    let (mut service, mut hw) = make_moving();
    assert!(!service.is_waiting());

    assert!(service.arrived(&mut hw));
    assert!(service.doors_opened(&mut hw));

    assert!(service.is_waiting());
    assert_eq!(
        hw.calls,
        vec![
            Call::Arrived(GROUND + 1),
            Call::OpenDoors,
            Call::StartTimer(cfg().door_open_timeout()),
            Call::StartTimer(cfg().waiting_time()),
        ]
    );
}

#[test]
fn stop_button_holds_the_car() {
    let (mut service, mut hw) = make_moving();

    assert!(service.stop_button(&mut hw));

    assert_eq!(service.state(), StateId::Holding);
    assert_eq!(
        hw.calls,
        vec![Call::StopDrive, Call::AlarmOn, Call::StopTimer]
    );
}

#[test]
fn second_stop_button_resumes_without_further_events() {
    let (mut service, mut hw) = make_moving();

    assert!(service.stop_button(&mut hw));
    assert!(service.stop_button(&mut hw));

    assert_eq!(service.state(), StateId::Moving);
    assert_eq!(
        hw.calls,
        vec![
            Call::StopDrive,
            Call::AlarmOn,
            Call::StopTimer,
            Call::StartDrive,
            Call::AlarmOff,
            Call::GoToFloor(GROUND + 1),
            Call::StartTimer(cfg().move_timeout()),
        ]
    );
}

#[test]
fn holding_ignores_everything_but_stop() {
    let (mut service, mut hw) = make_moving();
    assert!(service.stop_button(&mut hw));
    hw.take();

    assert!(!service.timer_expired(&mut hw));
    assert!(!service.arrived(&mut hw));
    assert!(!service.drive_fault(&mut hw));
    assert!(!service.floor_requested(GROUND + 3, &mut hw));

    assert_eq!(service.state(), StateId::Holding);
    assert_eq!(service.position().destination_floor, GROUND + 1);
    assert!(hw.calls.is_empty());
}

#[test]
fn drive_timeout_goes_out_of_service() {
    let (mut service, mut hw) = make_moving();

    assert!(service.timer_expired(&mut hw));

    assert!(!service.is_in_service());
    assert_eq!(hw.calls, vec![Call::OutOfService, Call::StopTimer]);
}

#[test]
fn drive_fault_goes_out_of_service() {
    let (mut service, mut hw) = make_moving();

    assert!(service.drive_fault(&mut hw));

    assert!(!service.is_in_service());
    assert!(!service.is_idle());
    assert_eq!(hw.count(&Call::OutOfService), 1);
}

#[test]
fn floor_request_while_moving_keeps_destination() {
    let (mut service, mut hw) = make_moving();

    assert!(!service.floor_requested(GROUND + 4, &mut hw));
    assert!(service.arrived(&mut hw));

    assert_eq!(hw.calls[0], Call::Arrived(GROUND + 1));
}

// ── Waiting ──────────────────────────────────────────────────

#[test]
fn open_button_keeps_doors_open() {
    let (mut service, mut hw) = make_waiting();

    assert!(service.open_button(&mut hw));

    assert!(service.is_waiting());
    assert_eq!(hw.calls, vec![Call::StartTimer(cfg().waiting_time())]);
}

#[test]
fn waiting_timer_closes_doors() {
    let (mut service, mut hw) = make_waiting();

    assert!(service.timer_expired(&mut hw));

    assert_eq!(service.state(), StateId::Closing);
    assert_eq!(
        hw.calls,
        vec![Call::CloseDoors, Call::StartTimer(cfg().door_close_timeout())]
    );
}

#[test]
fn close_button_closes_doors() {
    let (mut service, mut hw) = make_waiting();

    assert!(service.close_button(&mut hw));

    assert_eq!(service.state(), StateId::Closing);
    assert_eq!(
        hw.calls,
        vec![Call::CloseDoors, Call::StartTimer(cfg().door_close_timeout())]
    );
}

#[test]
fn doors_closed_returns_to_idle() {
    let (mut service, mut hw) = make_waiting();

    assert!(service.close_button(&mut hw));
    assert!(service.doors_closed(&mut hw));

    assert!(service.is_idle());
    assert_eq!(hw.calls.last(), Some(&Call::StopTimer));
}

#[test]
fn waiting_ignores_faults() {
    let (mut service, mut hw) = make_waiting();

    assert!(!service.door_fault(&mut hw));
    assert!(!service.drive_fault(&mut hw));

    assert!(service.is_waiting());
    assert!(service.is_in_service());
}

#[test]
fn door_close_timeout_goes_out_of_service() {
    let (mut service, mut hw) = make_waiting();
    assert!(service.close_button(&mut hw));

    assert!(service.timer_expired(&mut hw));

    assert!(!service.is_in_service());
}

#[test]
fn full_round_trip_returns_to_idle_at_new_destination() {
    let (mut service, mut hw) = make_moving();

    assert!(service.arrived(&mut hw));
    assert!(service.doors_opened(&mut hw));
    assert!(service.timer_expired(&mut hw));
    assert!(service.doors_closed(&mut hw));

    assert!(service.is_idle());
    assert_eq!(service.position().destination_floor, GROUND + 1);
    let path: Vec<_> = service.history().map(|t| t.to).collect();
    assert_eq!(
        path,
        vec![
            StateId::Moving,
            StateId::Opening,
            StateId::Waiting,
            StateId::Closing,
            StateId::Stopped,
        ]
    );
}

// ── Separate adapters ────────────────────────────────────────

#[test]
fn port_set_routes_each_command_to_its_adapter() {
    let mut service = ElevatorService::new(cfg()).unwrap();
    let mut ports = PortSet::new(
        MockHardware::new(),
        MockHardware::new(),
        MockHardware::new(),
        MockHardware::new(),
    );
    service.start(&mut ports);

    assert!(service.floor_requested(GROUND + 1, &mut ports));
    assert!(service.arrived(&mut ports));

    assert_eq!(ports.ui.calls, vec![Call::InService, Call::Arrived(GROUND + 1)]);
    assert_eq!(ports.door.calls, vec![Call::OpenDoors]);
    assert_eq!(ports.drive.calls, vec![Call::GoToFloor(GROUND + 1)]);
    assert_eq!(
        ports.timer.calls,
        vec![
            Call::StartTimer(cfg().move_timeout()),
            Call::StartTimer(cfg().door_open_timeout()),
        ]
    );
}

#[test]
fn port_set_answers_drive_queries_from_the_drive_adapter() {
    let mut service = ElevatorService::new(cfg()).unwrap();
    let mut ports = PortSet::new(
        MockHardware::new(),
        MockHardware::new(),
        MockHardware::new(),
        MockHardware::new(),
    );
    assert!(service.open_button(&mut ports));
    assert!(service.door_fault(&mut ports));

    // Only the drive member's answer counts.
    ports.ui.floor = GROUND;
    ports.drive.floor = GROUND + 2;
    assert!(service.restore_service(&mut ports));

    assert_eq!(service.state(), StateId::Moving);
    assert_eq!(service.position().current_floor, GROUND + 2);
}
