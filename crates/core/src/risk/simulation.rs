//! Pure "what-if" trade simulations.
//!
//! Side-effect-free arithmetic over the current position and a proposed
//! trade. Monetary outputs and weights are rounded to 2 decimal places,
//! average prices to 4.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::constants::{DISPLAY_DECIMAL_PRECISION, PRICE_DECIMAL_PRECISION};
use crate::errors::{Error, Result};

/// Current state of the position being simulated against.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationContext {
    pub quantity: Decimal,
    pub average_price: Decimal,
    pub current_price: Decimal,
    /// Total portfolio value, used for the weight projection.
    pub portfolio_value: Decimal,
}

/// The proposed trade.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum SimulationRequest {
    Buy { quantity: Decimal, price: Decimal },
    Sell { quantity: Decimal, price: Decimal },
    PriceChange { change_percent: Decimal },
}

/// Projected position after the simulated trade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationOutcome {
    pub new_quantity: Decimal,
    pub new_average_price: Decimal,
    pub new_position_value: Decimal,
    /// Position weight within the portfolio, percent.
    pub new_portfolio_weight: Decimal,
    /// Unrealized PnL for buys and price moves; realized PnL for sells.
    pub projected_pnl: Decimal,
}

/// Dispatches a simulation request.
pub fn simulate(context: &SimulationContext, request: &SimulationRequest) -> Result<SimulationOutcome> {
    match *request {
        SimulationRequest::Buy { quantity, price } => simulate_buy(
            context.quantity,
            context.average_price,
            quantity,
            price,
            context.portfolio_value,
        ),
        SimulationRequest::Sell { quantity, price } => simulate_sell(
            context.quantity,
            context.average_price,
            quantity,
            price,
            context.portfolio_value,
        ),
        SimulationRequest::PriceChange { change_percent } => simulate_price_change(
            context.quantity,
            context.average_price,
            context.current_price,
            change_percent,
            context.portfolio_value,
        ),
    }
}

/// Projects buying `buy_quantity` at `buy_price`: the average cost folds the
/// new units in, the position is marked at the buy price, and the portfolio
/// grows by the invested amount.
pub fn simulate_buy(
    current_quantity: Decimal,
    current_average_price: Decimal,
    buy_quantity: Decimal,
    buy_price: Decimal,
    portfolio_value: Decimal,
) -> Result<SimulationOutcome> {
    if buy_quantity <= Decimal::ZERO {
        return Err(Error::Validation("buy quantity must be positive".into()));
    }
    if buy_price < Decimal::ZERO {
        return Err(Error::Validation("buy price cannot be negative".into()));
    }

    let new_quantity = current_quantity + buy_quantity;
    let new_cost_basis = current_quantity * current_average_price + buy_quantity * buy_price;
    let new_average_price = new_cost_basis / new_quantity;

    let new_position_value = new_quantity * buy_price;
    let new_portfolio_value = portfolio_value + buy_quantity * buy_price;
    let projected_pnl = new_position_value - new_cost_basis;

    Ok(SimulationOutcome {
        new_quantity,
        new_average_price: new_average_price.round_dp(PRICE_DECIMAL_PRECISION),
        new_position_value: new_position_value.round_dp(DISPLAY_DECIMAL_PRECISION),
        new_portfolio_weight: weight_percent(new_position_value, new_portfolio_value),
        projected_pnl: projected_pnl.round_dp(DISPLAY_DECIMAL_PRECISION),
    })
}

/// Projects selling `sell_quantity` at `sell_price`. Selling never changes
/// the average cost basis; the PnL reported is the realized gain on the
/// sold units.
pub fn simulate_sell(
    current_quantity: Decimal,
    current_average_price: Decimal,
    sell_quantity: Decimal,
    sell_price: Decimal,
    portfolio_value: Decimal,
) -> Result<SimulationOutcome> {
    if sell_quantity <= Decimal::ZERO {
        return Err(Error::Validation("sell quantity must be positive".into()));
    }
    if sell_quantity > current_quantity {
        return Err(Error::Validation(format!(
            "cannot sell {} of a position holding {}",
            sell_quantity, current_quantity
        )));
    }

    let realized_pnl = sell_quantity * (sell_price - current_average_price);
    let new_quantity = current_quantity - sell_quantity;
    let new_position_value = new_quantity * sell_price;

    // Proceeds stay in the portfolio as cash: total value is unchanged.
    Ok(SimulationOutcome {
        new_quantity,
        new_average_price: current_average_price.round_dp(PRICE_DECIMAL_PRECISION),
        new_position_value: new_position_value.round_dp(DISPLAY_DECIMAL_PRECISION),
        new_portfolio_weight: weight_percent(new_position_value, portfolio_value),
        projected_pnl: realized_pnl.round_dp(DISPLAY_DECIMAL_PRECISION),
    })
}

/// Projects a relative price move of `change_percent` on the current
/// position; the portfolio total shifts by the same value delta.
pub fn simulate_price_change(
    current_quantity: Decimal,
    current_average_price: Decimal,
    current_price: Decimal,
    change_percent: Decimal,
    portfolio_value: Decimal,
) -> Result<SimulationOutcome> {
    let new_price = current_price * (Decimal::ONE + change_percent / dec!(100));
    if new_price < Decimal::ZERO {
        return Err(Error::Validation(format!(
            "price change of {}% takes the price below zero",
            change_percent
        )));
    }

    let new_position_value = current_quantity * new_price;
    let new_portfolio_value = portfolio_value + current_quantity * (new_price - current_price);
    let projected_pnl = current_quantity * (new_price - current_average_price);

    Ok(SimulationOutcome {
        new_quantity: current_quantity,
        new_average_price: current_average_price.round_dp(PRICE_DECIMAL_PRECISION),
        new_position_value: new_position_value.round_dp(DISPLAY_DECIMAL_PRECISION),
        new_portfolio_weight: weight_percent(new_position_value, new_portfolio_value),
        projected_pnl: projected_pnl.round_dp(DISPLAY_DECIMAL_PRECISION),
    })
}

fn weight_percent(position_value: Decimal, portfolio_value: Decimal) -> Decimal {
    if portfolio_value <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    (position_value / portfolio_value * dec!(100)).round_dp(DISPLAY_DECIMAL_PRECISION)
}
