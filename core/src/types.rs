//! DTOs for the sample users API.
//!
//! # Design
//! These types mirror the mock-server's schema but are defined independently;
//! integration tests catch any drift between the two crates. Deserialization
//! enforces the shape, `Validate` enforces the value rules serde cannot
//! express (positive ids, email format).

use serde::{Deserialize, Serialize};

use crate::validate::{Checker, Validate};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Geo {
    pub lat: String,
    pub lng: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Address {
    pub street: String,
    pub suite: String,
    pub city: String,
    pub zipcode: String,
    pub geo: Geo,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub name: String,
    pub catch_phrase: String,
    pub bs: String,
}

/// A user as served by `/users`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub username: String,
    pub email: String,
    pub address: Address,
    pub phone: String,
    pub website: String,
    pub company: Company,
}

impl Validate for User {
    fn validate(&self, check: &mut Checker) {
        check
            .require("id", self.id > 0, "Number must be greater than 0")
            .require("email", is_email(&self.email), "Invalid email");
    }
}

fn is_email(value: &str) -> bool {
    match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
        }
        None => false,
    }
}

const FIRST_NAMES: [&str; 6] = ["Ada", "Grace", "Linus", "Barbara", "Ken", "Margaret"];
const LAST_NAMES: [&str; 5] = ["Lovelace", "Hopper", "Liskov", "Thompson", "Hamilton"];
const CITIES: [&str; 4] = ["Gwenborough", "Wisokyburgh", "McKenziehaven", "South Elvis"];

impl User {
    /// Deterministic, valid user for request payloads. Equal seeds give
    /// equal users.
    pub fn fixture(seed: u64) -> Self {
        let pick = |table: &[&str], salt: u64| {
            let index = seed.wrapping_mul(31).wrapping_add(salt) % table.len() as u64;
            table[index as usize].to_string()
        };
        let first = pick(&FIRST_NAMES, 0);
        let last = pick(&LAST_NAMES, 7);
        let username = format!("{}{seed}", first.to_lowercase());
        Self {
            id: i64::try_from(seed % 1000).unwrap_or(0) + 1,
            name: format!("{first} {last}"),
            email: format!("{username}@example.com"),
            username,
            address: Address {
                street: format!("{} Main Street", seed % 900 + 100),
                suite: format!("Apt. {}", seed % 90 + 10),
                city: pick(&CITIES, 3),
                zipcode: format!("{:05}", seed.wrapping_mul(7919) % 100_000),
                geo: Geo {
                    lat: format!("{:.4}", (seed % 180) as f64 - 90.0),
                    lng: format!("{:.4}", (seed % 360) as f64 - 180.0),
                },
            },
            phone: format!("1-555-{:03}-{:04}", seed % 1000, seed.wrapping_mul(13) % 10_000),
            website: format!("{}.example.org", last.to_lowercase()),
            company: Company {
                name: format!("{last} Group"),
                catch_phrase: "Synergized client-server interface".to_string(),
                bs: "harness real-time e-markets".to_string(),
            },
        }
    }
}
