//! Cross-tabulates an entity type over one or two attributes.
//!
//! Run with: cargo run --example aggregate -- <entity> <x> [y]
//!
//! Requires .env file with:
//! - MOLGENIS_URL
//! - MOLGENIS_USERNAME
//! - MOLGENIS_PASSWORD

use std::env;

use molgenis_lib::MolgenisClient;
use serde_json::Value;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt::init();

    let url = env::var("MOLGENIS_URL").expect("MOLGENIS_URL not set");
    let username = env::var("MOLGENIS_USERNAME").expect("MOLGENIS_USERNAME not set");
    let password = env::var("MOLGENIS_PASSWORD").expect("MOLGENIS_PASSWORD not set");

    let mut args = env::args().skip(1);
    let entity = args.next().expect("usage: aggregate <entity> <x> [y]");
    let x = args.next().expect("usage: aggregate <entity> <x> [y]");
    let y = args.next();

    let client = MolgenisClient::new(url)?;
    client.try_authenticate(&username, &password).await?;

    let mut builder = client.aggregate(entity, x);
    if let Some(y) = y {
        builder = builder.y(y);
    }
    let result = builder.execute::<Value, Value>().await?;

    println!("x: {}", result.x_attribute.name);
    if let Some(y) = &result.y_attribute {
        println!("y: {}", y.name);
    }
    println!();

    for (row, counts) in result.matrix.iter().enumerate() {
        let label = result.y_labels.get(row).map(Value::to_string).unwrap_or_default();
        for (column, count) in counts.iter().enumerate() {
            println!("{label:<20} {:<20} {count}", result.x_labels[column]);
        }
    }
    println!("\ntotal: {}", result.total());

    client.deauthenticate().await;
    Ok(())
}
