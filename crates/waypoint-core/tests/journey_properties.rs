//! Behavioural properties of the journey engine over many event sequences.
//!
//! Sequences are enumerated exhaustively up to a short length and then
//! sampled with a fixed-seed generator for longer runs, so every run checks
//! the same inputs.

use waypoint_core::{BoardingPolicy, JourneyEngine, Outcome, RiskPolicy, reconcile};
use waypoint_types::{
    JourneyEvent, JourneyState, JourneyType, Location, LoungeState, TransportState,
};

const CANONICAL_JOURNEY: [&str; 12] = [
    "RESET",
    "VIP_ENTERED_TERMINAL",
    "FACE_VERIFIED",
    "FLIGHT_DELAYED",
    "FLIGHT_DELAYED",
    "BOARDING_STARTED",
    "VIP_ARRIVED_AT_GATE",
    "FLIGHT_LANDED",
    "BAGGAGE_TRANSFERRED",
    "FLIGHT_LANDED",
    "BAGGAGE_CLAIMED",
    "VIP_EXITED_TERMINAL",
];

fn itinerary() -> Vec<String> {
    vec!["HYD".to_owned(), "DEL".to_owned(), "LHR".to_owned()]
}

fn engine() -> JourneyEngine {
    JourneyEngine::new(itinerary(), RiskPolicy::default(), BoardingPolicy::default())
}

/// Every event sequence of exactly `len` events from the vocabulary.
fn sequences(len: u32) -> Vec<Vec<JourneyEvent>> {
    let mut out: Vec<Vec<JourneyEvent>> = vec![Vec::new()];
    for _ in 0..len {
        out = out
            .into_iter()
            .flat_map(|prefix| {
                JourneyEvent::KNOWN.into_iter().map(move |event| {
                    let mut next = prefix.clone();
                    next.push(event);
                    next
                })
            })
            .collect();
    }
    out
}

/// Deterministic pseudo-random sequence (64-bit LCG).
fn sampled_sequence(seed: u64, len: usize) -> Vec<JourneyEvent> {
    let mut x = seed;
    (0..len)
        .map(|_| {
            x = x
                .wrapping_mul(6_364_136_223_846_793_005)
                .wrapping_add(1_442_695_040_888_963_407);
            let pick = usize::try_from(x >> 33).unwrap_or(0) % JourneyEvent::KNOWN.len();
            JourneyEvent::KNOWN
                .get(pick)
                .cloned()
                .unwrap_or(JourneyEvent::Reset)
        })
        .collect()
}

fn check_invariants(events: &[JourneyEvent]) {
    let mut engine = engine();
    let mut previous = engine.snapshot().connection_risk_score;

    for event in events {
        let applied = engine.apply(event);
        let state = &applied.snapshot;

        assert!(state.connection_risk_score <= 100);
        assert!(state.current_leg_index < state.itinerary.len());
        assert_eq!(state.itinerary, itinerary());
        if *event != JourneyEvent::Reset {
            assert!(
                state.connection_risk_score >= previous,
                "risk decreased on {event} in {events:?}"
            );
        }
        previous = state.connection_risk_score;
    }
}

#[test]
fn invariants_hold_for_all_short_sequences() {
    for len in 1..=3 {
        for events in sequences(len) {
            check_invariants(&events);
        }
    }
}

#[test]
fn invariants_hold_for_sampled_long_sequences() {
    for seed in 0..200 {
        check_invariants(&sampled_sequence(seed, 40));
    }
}

#[test]
fn reset_then_prefix_matches_fresh_document() {
    let risk = RiskPolicy::default();
    let dirty_histories = [
        sampled_sequence(7, 15),
        sampled_sequence(99, 25),
        vec![JourneyEvent::FlightDelayed; 4],
    ];

    for history in &dirty_histories {
        for cut in 0..=CANONICAL_JOURNEY.len() {
            let prefix: Vec<JourneyEvent> = CANONICAL_JOURNEY
                .iter()
                .take(cut)
                .map(|name| JourneyEvent::parse(name))
                .collect();

            let mut fresh = JourneyState::initial(itinerary());
            for event in &prefix {
                fresh = reconcile(&fresh, event, risk).state;
            }

            let mut dirty = JourneyState::initial(itinerary());
            for event in history {
                dirty = reconcile(&dirty, event, risk).state;
            }
            dirty = reconcile(&dirty, &JourneyEvent::Reset, risk).state;
            for event in &prefix {
                dirty = reconcile(&dirty, event, risk).state;
            }

            assert_eq!(dirty, fresh, "prefix length {cut}");
        }
    }
}

#[test]
fn repeated_landing_stops_after_two_advances() {
    let mut engine = engine();
    let outcomes: Vec<Outcome> = (0..5)
        .map(|_| engine.apply(&JourneyEvent::FlightLanded).outcome)
        .collect();

    assert_eq!(
        outcomes,
        vec![
            Outcome::Applied,
            Outcome::Applied,
            Outcome::GuardRejected,
            Outcome::GuardRejected,
            Outcome::GuardRejected,
        ]
    );
    assert_eq!(engine.snapshot().current_leg_index, 2);
    assert_eq!(engine.snapshot().journey_type, JourneyType::Arrival);
}

#[test]
fn face_verification_only_acts_on_reserved_lounge() {
    for events in sequences(2) {
        let mut engine = engine();
        for event in &events {
            engine.apply(event);
        }
        let before = engine.snapshot().clone();
        let applied = engine.apply(&JourneyEvent::FaceVerified);

        if before.lounge_state == LoungeState::Reserved {
            assert_eq!(applied.outcome, Outcome::Applied);
            assert_eq!(applied.snapshot.current_location, Location::Lounge);
        } else {
            assert_eq!(applied.snapshot, before, "after {events:?}");
        }
    }
}

#[test]
fn canonical_journey_ends_with_driver_assigned() {
    let mut engine = engine();
    let mut state = engine.snapshot().clone();
    for name in CANONICAL_JOURNEY {
        state = engine.apply(&JourneyEvent::parse(name)).snapshot;
    }

    assert_eq!(&state, engine.snapshot());
    assert_eq!(state.current_leg_index, 2);
    assert_eq!(state.journey_type, JourneyType::Arrival);
    assert_eq!(state.current_location, Location::BaggageClaim);
    assert_eq!(state.connection_risk_score, 70);
    assert_eq!(state.transport_state, TransportState::DriverAssigned);
    assert_eq!(engine.diagnostics().boarding_window_minutes, 120);
}
