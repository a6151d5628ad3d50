//! Statistical risk measures, solvency scoring, and trade simulations.

pub mod risk_calculator;
mod risk_model;
pub mod risk_service;
pub mod simulation;

pub use risk_calculator::*;
pub use risk_model::*;
pub use risk_service::*;
pub use simulation::*;

#[cfg(test)]
mod risk_calculator_tests;


#[cfg(test)]
mod risk_service_tests;
