pub mod configuration;
pub mod issuance;
pub mod routes;
pub mod startup;
pub mod telemetry;
