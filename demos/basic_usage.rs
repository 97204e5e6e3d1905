use bearer_token::{current_time, TokenData, TokenGenerator, TokenOptions};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Generator issuing tokens valid for one minute
    let generator = TokenGenerator::from_options(
        TokenOptions::new("my-private-key").lifetime(60).algorithm("sha1"),
    )
    .expect("Failed to configure generator");

    let credential = generator.create("user42").expect("Failed to issue token");
    println!("Access token: {}", credential.access_token);
    println!("Expires at (epoch): {}", credential.expiration);

    // Validate straight away
    let extraction = generator.extract_token(&credential.access_token);
    print_extraction("immediately", extraction.is_valid, extraction.data.as_ref());

    // Validate as if 61 seconds had passed
    let later = current_time() + Duration::from_secs(61);
    let extraction = generator.extract_token_at(&credential.access_token, later);
    print_extraction("after 61s", extraction.is_valid, extraction.data.as_ref());

    // Multi-field seed data comes back as a sequence
    let credential = generator
        .create(vec!["alice", "admin"])
        .expect("Failed to issue token");
    let extraction = generator.extract_token(&credential.access_token);
    print_extraction("multi-field", extraction.is_valid, extraction.data.as_ref());
}

fn print_extraction(label: &str, is_valid: bool, data: Option<&TokenData>) {
    match data {
        Some(TokenData::Single(value)) => println!("[{label}] valid={is_valid} data={value}"),
        Some(TokenData::Multiple(fields)) => {
            println!("[{label}] valid={is_valid} data={}", fields.join(", "))
        }
        None => println!("[{label}] valid={is_valid} (no data)"),
    }
}
