use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use log::{info, warn};
use serde::Serialize;

use crate::core::buildcore::{Restaurant, SharedRestaurant};
use crate::core::config::RestaurantConfig;
use crate::core::error::{QueueError, RunError};
use crate::core::log::append_logs;
use crate::core::menu::{pick_random_menu_item, MenuItem};
use crate::core::order::Order;

/// How often an idle cook checks whether the session was abandoned
const ABANDON_POLL: Duration = Duration::from_millis(50);

/// What a finished kitchen session looked like
#[derive(Clone, Debug, Serialize)]
pub struct RunSummary {
    pub orders_placed: u64,
    pub orders_served: u64,
    /// Orders fulfilled by each cook, indexed by cook id
    pub served_per_cook: Vec<usize>,
    pub journal_entries: usize,
}

/// Run one full session: customers place random menu orders, cooks serve
/// them until the restaurant reports no more work, then the restaurant closes.
pub fn run(config: &RestaurantConfig) -> Result<RunSummary, RunError> {
    run_with_customer(config, place_random_orders)
}

/// Like [`run`], with `customer(restaurant, customer_id, orders)` standing in
/// for each customer thread. It returns how many orders it placed.
///
/// If a customer panics its orders never arrive: the cooks are released, every
/// thread is joined and the first failure is returned without closing.
pub fn run_with_customer<F>(config: &RestaurantConfig, customer: F) -> Result<RunSummary, RunError>
where
    F: Fn(&Restaurant<MenuItem>, usize, usize) -> usize + Send + Sync + 'static,
{
    config.validate()?;
    let expected = config.expected_orders();
    let restaurant: SharedRestaurant<MenuItem> = Arc::new(Restaurant::open(
        "BensChilliBowl",
        config.capacity,
        expected,
    ));
    let customer = Arc::new(customer);
    let abandoned = Arc::new(AtomicBool::new(false));

    let customers: Vec<_> = (0..config.customers)
        .map(|customer_id| {
            let restaurant = Arc::clone(&restaurant);
            let customer = Arc::clone(&customer);
            let orders = config.orders_per_customer;
            thread::spawn(move || (*customer)(&*restaurant, customer_id, orders))
        })
        .collect();

    let cooks: Vec<_> = (0..config.cooks)
        .map(|cook_id| {
            let restaurant = Arc::clone(&restaurant);
            let abandoned = Arc::clone(&abandoned);
            thread::spawn(move || cook(&restaurant, cook_id, &abandoned))
        })
        .collect();

    let mut first_error = None;
    let mut orders_placed = 0;
    for (customer_id, handle) in customers.into_iter().enumerate() {
        match handle.join() {
            Ok(placed) => orders_placed += placed as u64,
            Err(_) => {
                warn!("[Customer {}] Panicked, abandoning the session", customer_id);
                first_error.get_or_insert(RunError::CustomerPanicked(customer_id));
            }
        }
    }
    if first_error.is_some() {
        abandoned.store(true, Ordering::SeqCst);
    }

    let mut served_per_cook = Vec::with_capacity(config.cooks);
    for (cook_id, handle) in cooks.into_iter().enumerate() {
        match handle.join() {
            Ok(served) => served_per_cook.push(served),
            Err(_) => {
                first_error.get_or_insert(RunError::CookPanicked(cook_id));
            }
        }
    }
    if let Some(err) = first_error {
        return Err(err);
    }

    let logs = restaurant.logs();
    if let Some(path) = &config.journal_path {
        append_logs(&logs, path)?;
        info!("Order journal appended to {}", path.display());
    }

    let orders_served = restaurant.stats().handled;
    let restaurant = Arc::try_unwrap(restaurant).map_err(|_| RunError::StillShared)?;
    restaurant.close();

    Ok(RunSummary {
        orders_placed,
        orders_served,
        served_per_cook,
        journal_entries: logs.len(),
    })
}

fn place_random_orders(
    restaurant: &Restaurant<MenuItem>,
    customer_id: usize,
    orders: usize,
) -> usize {
    for _ in 0..orders {
        let order = Order::new(customer_id, pick_random_menu_item());
        restaurant.place_order(order);
    }
    orders
}

fn cook(restaurant: &Restaurant<MenuItem>, cook_id: usize, abandoned: &AtomicBool) -> usize {
    let mut fulfilled = 0;
    loop {
        match restaurant.take_order_timeout(cook_id, ABANDON_POLL) {
            Ok(Some(_order)) => fulfilled += 1,
            Ok(None) => break,
            Err(QueueError::Timeout(_)) if !abandoned.load(Ordering::SeqCst) => {}
            Err(QueueError::Timeout(_)) => {
                warn!("[Cook {}] Session abandoned with orders outstanding", cook_id);
                break;
            }
        }
    }
    info!("[Cook {}] Fulfilled {} orders", cook_id, fulfilled);
    fulfilled
}
