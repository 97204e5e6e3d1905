use bearer_token::TokenGenerator;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let generator = TokenGenerator::from_parts(b"my-private-key", Some(3600), Some("sha256"))
        .expect("Failed to configure generator");

    let credential = generator.create("user42").expect("Failed to issue token");
    println!("Login:    {}", credential.basic_login);
    println!("Password: {}", credential.basic_password);
    println!(
        "Header:   {}",
        credential
            .basic_authorization_header()
            .expect("Failed to render header")
    );

    // A server receiving the pair validates it without any lookup
    let extraction = generator.extract_basic(&credential.basic_login, &credential.basic_password);
    println!("Genuine pair valid: {}", extraction.is_valid);

    let extraction = generator.extract_basic(&credential.basic_login, "bm90IHRoZSBtYWM=");
    println!("Forged pair valid:  {}", extraction.is_valid);
}
