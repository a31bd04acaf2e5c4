// src/bin/check_token.rs
// Operator utility: verify a bearer token against the configured
// verification material and print its subject. Useful when triaging 401s
// without going through the HTTP edge.
use anyhow::Result;
use audit_history::application::ports::security::TokenVerifier;
use audit_history::infrastructure::security::token::JwtVerifier;
use std::env;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let secret = env::var("SUPABASE_JWT_SECRET")
        .map_err(|_| anyhow::anyhow!("SUPABASE_JWT_SECRET must be set"))?;
    let token = env::args()
        .nth(1)
        .ok_or_else(|| anyhow::anyhow!("usage: check-token <jwt>"))?;

    let verifier = JwtVerifier::new(&secret);
    let mode = if verifier.is_rsa() { "rsa" } else { "hmac" };

    let subject = verifier.extract_subject(&token).await?;
    println!("mode: {mode}");
    println!("subject: {subject}");
    Ok(())
}
