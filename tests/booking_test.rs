//! Integration tests for the seat-booking core.
//!
//! Exercises validation, availability and the atomic order transaction
//! against a real Postgres, including the concurrent double-booking race.
//!
//! Run with: `cargo test --test booking_test` (requires Docker).

#![allow(clippy::expect_used)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::panic)]

mod common;

use common::{count_rows, seed_journey, setup_test_db};
use train_station::BookingError;
use train_station::booking::{self, TicketRequest, available, create_order};
use train_station::queries;
use train_station::types::{JourneyId, UserId};
use uuid::Uuid;

fn user() -> UserId {
    UserId::from_uuid(Uuid::new_v4())
}

fn request(cargo: i32, seat: i32, journey: JourneyId) -> TicketRequest {
    TicketRequest {
        cargo_number: cargo,
        seat_number: seat,
        journey,
    }
}

/// Scenario A: booking two seats on a 2x3 train leaves four available.
#[tokio::test]
async fn booking_reduces_availability() {
    let (_container, pool) = setup_test_db().await;
    let journey = seed_journey(&pool, 2, 3).await;

    assert_eq!(available(&pool, journey).await.unwrap(), Some(6));

    let order = create_order(
        &pool,
        user(),
        &[request(1, 1, journey), request(1, 2, journey)],
    )
    .await
    .expect("order should commit");

    assert_eq!(order.tickets.len(), 2);
    assert_eq!(available(&pool, journey).await.unwrap(), Some(4));
}

/// Scenario C: an empty batch is rejected before anything is written.
#[tokio::test]
async fn empty_order_is_rejected() {
    let (_container, pool) = setup_test_db().await;
    seed_journey(&pool, 2, 3).await;

    let err = create_order(&pool, user(), &[]).await.unwrap_err();
    assert!(matches!(err, BookingError::EmptyOrder));
    assert_eq!(count_rows(&pool, "orders").await, 0);
}

/// Scenario D: cargo 5 on a 2-compartment train names the valid range.
#[tokio::test]
async fn invalid_cargo_names_valid_range() {
    let (_container, pool) = setup_test_db().await;
    let journey = seed_journey(&pool, 2, 3).await;

    let err = create_order(&pool, user(), &[request(5, 1, journey)])
        .await
        .unwrap_err();

    match err {
        BookingError::InvalidTicket { index, fields } => {
            assert_eq!(index, 0);
            assert_eq!(
                fields.get("cargo_number").map(String::as_str),
                Some("cargo_number must be between 1 and 2")
            );
        }
        other => panic!("expected InvalidTicket, got {other:?}"),
    }
    assert_eq!(count_rows(&pool, "orders").await, 0);
    assert_eq!(count_rows(&pool, "tickets").await, 0);
}

/// A ticket for a journey that does not exist fails at its position.
#[tokio::test]
async fn unknown_journey_is_a_field_error() {
    let (_container, pool) = setup_test_db().await;
    let journey = seed_journey(&pool, 2, 3).await;

    let err = create_order(
        &pool,
        user(),
        &[request(1, 1, journey), request(1, 1, JourneyId::new(9999))],
    )
    .await
    .unwrap_err();

    match err {
        BookingError::InvalidTicket { index, fields } => {
            assert_eq!(index, 1);
            assert!(fields.contains_key("journey"));
        }
        other => panic!("expected InvalidTicket, got {other:?}"),
    }
    assert_eq!(count_rows(&pool, "tickets").await, 0);
}

/// Scenario E: the same seat twice within one batch aborts the whole
/// order; the second occurrence is reported as taken.
#[tokio::test]
async fn duplicate_seat_within_batch_aborts_order() {
    let (_container, pool) = setup_test_db().await;
    let journey = seed_journey(&pool, 2, 3).await;

    let err = create_order(
        &pool,
        user(),
        &[request(1, 1, journey), request(1, 1, journey)],
    )
    .await
    .unwrap_err();

    match err {
        BookingError::SeatTaken { index, .. } => assert_eq!(index, 1),
        other => panic!("expected SeatTaken, got {other:?}"),
    }
    assert_eq!(count_rows(&pool, "orders").await, 0);
    assert_eq!(count_rows(&pool, "tickets").await, 0);
}

/// A seat committed by a prior order cannot be booked again, and the
/// failing order leaves no partial state behind.
#[tokio::test]
async fn previously_sold_seat_aborts_whole_batch() {
    let (_container, pool) = setup_test_db().await;
    let journey = seed_journey(&pool, 2, 3).await;

    create_order(&pool, user(), &[request(1, 1, journey)])
        .await
        .expect("first order should commit");

    // Second batch: a fresh seat first, then the conflict. Both must roll
    // back together.
    let err = create_order(
        &pool,
        user(),
        &[request(2, 1, journey), request(1, 1, journey)],
    )
    .await
    .unwrap_err();

    match err {
        BookingError::SeatTaken {
            index,
            cargo_number,
            seat_number,
            ..
        } => {
            assert_eq!(index, 1);
            assert_eq!((cargo_number, seat_number), (1, 1));
        }
        other => panic!("expected SeatTaken, got {other:?}"),
    }

    assert_eq!(count_rows(&pool, "orders").await, 1);
    assert_eq!(count_rows(&pool, "tickets").await, 1);
    assert_eq!(available(&pool, journey).await.unwrap(), Some(5));
}

/// Scenario B: two concurrent requests for the same seat; exactly one
/// commits, the other observes the conflict.
#[tokio::test]
async fn concurrent_bookings_cannot_share_a_seat() {
    let (_container, pool) = setup_test_db().await;
    let journey = seed_journey(&pool, 2, 3).await;

    let first_requests = [request(1, 1, journey)];
    let second_requests = [request(1, 1, journey)];
    let (first, second) = tokio::join!(
        create_order(&pool, user(), &first_requests),
        create_order(&pool, user(), &second_requests),
    );

    let winners = usize::from(first.is_ok()) + usize::from(second.is_ok());
    assert_eq!(winners, 1, "exactly one of the two bookings must commit");

    let loser = if first.is_err() { first } else { second };
    assert!(matches!(
        loser.unwrap_err(),
        BookingError::SeatTaken { index: 0, .. }
    ));

    assert_eq!(count_rows(&pool, "tickets").await, 1);
    assert_eq!(available(&pool, journey).await.unwrap(), Some(5));
}

/// Availability reports `None` for journeys that do not exist.
#[tokio::test]
async fn availability_of_unknown_journey_is_none() {
    let (_container, pool) = setup_test_db().await;
    assert_eq!(available(&pool, JourneyId::new(12345)).await.unwrap(), None);
}

/// Repeated detail reads between writes return an identical taken-seats
/// set.
#[tokio::test]
async fn taken_seats_are_stable_between_writes() {
    let (_container, pool) = setup_test_db().await;
    let journey = seed_journey(&pool, 2, 3).await;

    create_order(
        &pool,
        user(),
        &[request(2, 3, journey), request(1, 1, journey)],
    )
    .await
    .expect("order should commit");

    let first = queries::journey_detail(&pool, journey)
        .await
        .unwrap()
        .expect("journey exists");
    let second = queries::journey_detail(&pool, journey)
        .await
        .unwrap()
        .expect("journey exists");

    assert_eq!(first.taken_seats, second.taken_seats);
    assert_eq!(first.taken_seats.len(), 2);
    // Sorted by (cargo, seat), independent of insert order.
    assert_eq!(
        (first.taken_seats[0].cargo_number, first.taken_seats[0].seat_number),
        (1, 1)
    );
}

/// The caller only sees their own orders.
#[tokio::test]
async fn order_listing_is_owner_scoped() {
    let (_container, pool) = setup_test_db().await;
    let journey = seed_journey(&pool, 2, 3).await;

    let alice = user();
    let bob = user();

    create_order(&pool, alice, &[request(1, 1, journey)])
        .await
        .expect("alice's order should commit");

    let alice_orders = queries::list_orders(&pool, alice).await.unwrap();
    let bob_orders = queries::list_orders(&pool, bob).await.unwrap();

    assert_eq!(alice_orders.len(), 1);
    assert_eq!(alice_orders[0].tickets.len(), 1);
    assert!(bob_orders.is_empty());
}

/// Journey list computes availability for every row in one pass.
#[tokio::test]
async fn journey_list_annotates_availability() {
    let (_container, pool) = setup_test_db().await;
    let journey = seed_journey(&pool, 2, 3).await;

    booking::create_order(&pool, user(), &[request(1, 1, journey)])
        .await
        .expect("order should commit");

    let journeys = queries::list_journeys(&pool).await.unwrap();
    assert_eq!(journeys.len(), 1);
    assert_eq!(journeys[0].tickets_available, 5);
    assert_eq!(journeys[0].route, "Central → Harbor");
    assert_eq!(journeys[0].train, "Night Express");
}
