use std::path::PathBuf;

use clap::Parser;
use ChilliBowlQueue::core::config::RestaurantConfig;
use ChilliBowlQueue::core::error::RunError;
use ChilliBowlQueue::core::kitchen;

#[derive(Parser, Debug)]
#[command(
    name = "chilli-bowl",
    version,
    about = "Customers and cooks sharing one bounded order queue",
    long_about = None
)]
struct Cli {
    /// JSON config file; flags below override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Maximum number of orders waiting at once [default: 100]
    #[arg(long)]
    capacity: Option<usize>,

    /// Number of customer threads [default: 90]
    #[arg(long)]
    customers: Option<usize>,

    /// Number of cook threads [default: 10]
    #[arg(long)]
    cooks: Option<usize>,

    /// Orders placed by each customer [default: 3]
    #[arg(long)]
    orders_per_customer: Option<usize>,

    /// Append the order journal to this file as NDJSON
    #[arg(long)]
    journal: Option<PathBuf>,
}

impl Cli {
    fn into_config(self) -> Result<RestaurantConfig, RunError> {
        let mut config = match &self.config {
            Some(path) => RestaurantConfig::from_json_file(path)?,
            None => RestaurantConfig::default(),
        };
        if let Some(capacity) = self.capacity {
            config.capacity = capacity;
        }
        if let Some(customers) = self.customers {
            config.customers = customers;
        }
        if let Some(cooks) = self.cooks {
            config.cooks = cooks;
        }
        if let Some(orders) = self.orders_per_customer {
            config.orders_per_customer = orders;
        }
        if self.journal.is_some() {
            config.journal_path = self.journal;
        }
        Ok(config)
    }
}

fn run(cli: Cli) -> Result<(), RunError> {
    let config = cli.into_config()?;
    let summary = kitchen::run(&config)?;

    println!(
        "{} orders placed, {} served",
        summary.orders_placed, summary.orders_served
    );
    for (cook_id, served) in summary.served_per_cook.iter().enumerate() {
        println!("  cook {:>3}: {} orders", cook_id, served);
    }
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(err) = run(Cli::parse()) {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}
