//! The declared check list for the VeloX bike agency API.
//!
//! Order: catalog reads, form submissions, negative-input cases, then
//! routing and CORS. Checks are independent; the order only keeps the
//! printed output readable.

use crate::check::Check;
use crate::expect::Expectation;
use crate::fixtures::Fixtures;
use client::{ApiRequest, BookingRequest, ContactSubmission, NewsletterSignup};
use serde::Serialize;
use serde_json::{json, Value};

pub const BIKE_FIELDS: &[&str] = &["id", "name", "type", "price", "features", "specifications"];
pub const CONTACT_FIELDS: &[&str] = &["id", "name", "email", "message", "timestamp"];
pub const CORS_HEADERS: &[&str] = &[
    "Access-Control-Allow-Origin",
    "Access-Control-Allow-Methods",
    "Access-Control-Allow-Headers",
];

const OK: u16 = 200;
const BAD_REQUEST: u16 = 400;
const NOT_FOUND: u16 = 404;

pub fn sample_contact() -> ContactSubmission {
    ContactSubmission {
        name: "John Smith".to_string(),
        email: "john.smith@example.com".to_string(),
        message: "I'm interested in the VeloX Pro bike. Can you provide more details about financing options?".to_string(),
    }
}

pub fn sample_newsletter(stamp: i64) -> NewsletterSignup {
    NewsletterSignup {
        email: format!("test+{}@example.com", stamp),
    }
}

pub fn sample_booking(bike_id: u64, stamp: i64) -> BookingRequest {
    BookingRequest {
        bike_id,
        customer_name: "Sarah Johnson".to_string(),
        customer_email: format!("booking.test.{}@example.com", stamp),
        customer_phone: "+1-555-123-4567".to_string(),
        message: "I would like to schedule a test ride for the VeloX Pro. I'm available weekdays after 5 PM.".to_string(),
    }
}

/// Serializes `payload` and drops `field`, for the missing-field cases.
pub fn without<T: Serialize>(payload: &T, field: &str) -> Value {
    let mut value = serde_json::to_value(payload).unwrap_or_else(|_| json!({}));
    if let Some(object) = value.as_object_mut() {
        object.remove(field);
    }
    value
}

fn to_body<T: Serialize>(payload: &T) -> Value {
    serde_json::to_value(payload).unwrap_or_else(|_| json!({}))
}

/// Builds every check in declared order. `stamp` (unix seconds) keeps
/// generated e-mail addresses unique per run.
pub fn bike_agency_checks(fixtures: &Fixtures, stamp: i64) -> Vec<Check> {
    let mut checks = Vec::new();
    checks.extend(catalog_checks(fixtures));
    checks.extend(submission_checks(fixtures, stamp));
    checks.extend(missing_field_checks(fixtures, stamp));
    checks.extend(routing_checks(fixtures));
    checks
}

fn catalog_checks(fixtures: &Fixtures) -> Vec<Check> {
    vec![
        Check::new(
            "API Root Endpoint",
            ApiRequest::get(""),
            Expectation::object(OK, &["message", "endpoints"]),
        ),
        Check::new(
            "Get All Bikes",
            ApiRequest::get("/bikes"),
            Expectation::collection(OK, Some(fixtures.catalog_size), BIKE_FIELDS),
        ),
        Check::new(
            "Get Bike by Valid ID",
            ApiRequest::get(format!("/bikes/{}", fixtures.valid_bike_id)),
            Expectation::field_equals(OK, "id", json!(fixtures.valid_bike_id)),
        ),
        Check::new(
            "Get Bike by Invalid ID",
            ApiRequest::get(format!("/bikes/{}", fixtures.missing_bike_id)),
            Expectation::Rejected { status: NOT_FOUND },
        ),
    ]
}

fn submission_checks(fixtures: &Fixtures, stamp: i64) -> Vec<Check> {
    vec![
        Check::new(
            "Contact Form Valid Data",
            ApiRequest::post("/contact", to_body(&sample_contact())),
            Expectation::created(OK, "id"),
        ),
        Check::new(
            "Get Contacts",
            ApiRequest::get("/contact"),
            Expectation::collection(OK, None, CONTACT_FIELDS).newest_first_by("timestamp"),
        ),
        Check::new(
            "Newsletter Valid Email",
            ApiRequest::post("/newsletter", to_body(&sample_newsletter(stamp))),
            Expectation::created(OK, "id"),
        ),
        Check::new(
            "Booking Valid Data",
            ApiRequest::post(
                "/booking",
                to_body(&sample_booking(fixtures.valid_bike_id, stamp)),
            ),
            Expectation::created(OK, "bookingId"),
        ),
    ]
}

fn missing_field_checks(fixtures: &Fixtures, stamp: i64) -> Vec<Check> {
    let contact = sample_contact();
    let newsletter = sample_newsletter(stamp);
    let booking = sample_booking(fixtures.valid_bike_id, stamp);
    let rejected = Expectation::Rejected {
        status: BAD_REQUEST,
    };

    let mut checks = Vec::new();
    for (label, field) in [("Name", "name"), ("Email", "email"), ("Message", "message")] {
        checks.push(Check::new(
            format!("Contact Form Missing {}", label),
            ApiRequest::post("/contact", without(&contact, field)),
            rejected.clone(),
        ));
    }

    checks.push(Check::new(
        "Newsletter Missing Email",
        ApiRequest::post("/newsletter", without(&newsletter, "email")),
        rejected.clone(),
    ));

    for (label, field) in [
        ("BikeId", "bikeId"),
        ("CustomerName", "customerName"),
        ("CustomerEmail", "customerEmail"),
    ] {
        checks.push(Check::new(
            format!("Booking Missing {}", label),
            ApiRequest::post("/booking", without(&booking, field)),
            rejected.clone(),
        ));
    }

    checks
}

fn routing_checks(fixtures: &Fixtures) -> Vec<Check> {
    let mut checks: Vec<Check> = fixtures
        .invalid_routes
        .iter()
        .map(|route| {
            Check::new(
                format!("Invalid Route {}", route),
                ApiRequest::get(route.clone()),
                Expectation::Status(NOT_FOUND),
            )
        })
        .collect();

    checks.push(Check::new(
        "CORS Headers",
        ApiRequest::get("/"),
        Expectation::headers(CORS_HEADERS),
    ));

    checks
}
