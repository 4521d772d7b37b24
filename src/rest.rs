//! PostgREST クライアント

mod client;
mod query;

pub use client::{PingReport, RestClient, HOST_LABEL, PING_TABLE};
pub use query::{Direction, Filter, Order, TableQuery};
