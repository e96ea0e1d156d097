pub mod client;
pub mod configuration;
pub mod db;
pub mod helpers;
pub mod middleware;
pub mod models;
pub mod pb;
pub mod routes;
pub mod sample;
pub mod services;
pub mod startup;
pub mod telemetry;
