//! Lists the entity types of a MOLGENIS server, page by page.
//!
//! Run with: cargo run --example list_entity_types
//!
//! Requires .env file with:
//! - MOLGENIS_URL
//!
//! Optional:
//! - MOLGENIS_USERNAME
//! - MOLGENIS_PASSWORD

use std::env;
use std::time::Duration;

use futures::StreamExt;
use molgenis_lib::MolgenisClient;
use molgenis_lib::Sort;
use molgenis_lib::model::metadata::EntityType;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt::init();

    let url = env::var("MOLGENIS_URL").expect("MOLGENIS_URL not set");

    let client = MolgenisClient::builder()
        .url(url)
        .timeout(Duration::from_secs(30))
        .build()?;

    if let (Ok(username), Ok(password)) = (env::var("MOLGENIS_USERNAME"), env::var("MOLGENIS_PASSWORD")) {
        let user = client.try_authenticate(&username, &password).await?;
        println!("Logged in as {}\n", user.display_name());
    }

    let mut entity_types = client
        .query::<EntityType>()
        .attrs(&["id", "label", "package", "isAbstract"])
        .sort(Sort::asc("id"))
        .page_size(100)
        .stream();

    let mut count = 0;
    while let Some(entity_type) = entity_types.next().await {
        let entity_type = entity_type?;
        let package = entity_type.package.as_ref().map(|p| p.id.as_str()).unwrap_or("-");
        println!("{:<50} {:<30} {}", entity_type.id, package, entity_type.label);
        count += 1;
    }
    println!("\n{count} entity types");

    if client.is_authenticated() {
        client.deauthenticate().await;
    }

    Ok(())
}
