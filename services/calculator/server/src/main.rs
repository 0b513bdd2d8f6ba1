#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate rocket;

use std::error::Error;

use log::info;

mod api;
mod config;
mod error;

#[rocket::main]
async fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let figment = config::figment();
    let config: config::Config = figment.extract()?;

    info!(
        "Accepting expressions of up to {} characters",
        config.calculator.max_expression_length
    );

    rocket::custom(figment)
        .manage(config.calculator)
        .mount("/", api::routes())
        .register("/", api::catchers())
        .launch()
        .await?;

    Ok(())
}
