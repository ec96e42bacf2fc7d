//! Live route tracker server.
//!
//! Keeps an ordered driving itinerary from the current position through a
//! fixed list of stops up to date: every refresh interval it asks for one
//! route through all stops, names each leg's end by reverse geocoding, and
//! publishes the labeled result for the web frontend.

pub mod config;
pub mod directions;
pub mod domain;
pub mod geocoding;
pub mod geolocation;
pub mod itinerary;
pub mod maps;
pub mod refresh;
pub mod stops;
pub mod web;
