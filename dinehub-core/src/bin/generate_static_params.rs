//! Print the outlet route params to pre-render, as JSON
//!
//! Exits non-zero on any failure so the build stops.

use dinehub_client::StaticParamResolver;
use dinehub_core::setup_environment;
use shared::error::AppError;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    setup_environment();

    let resolver = StaticParamResolver::from_env();
    let params = match resolver.generate_static_params().await {
        Ok(params) => params,
        Err(e) => {
            let err = AppError::from(e);
            if let Some(hint) = err.detail("hint").and_then(|h| h.as_str()) {
                eprintln!("hint: {hint}");
            }
            return Err(err.into());
        }
    };

    tracing::info!(count = params.len(), "Resolved static outlet params");
    println!("{}", serde_json::to_string(&params)?);
    Ok(())
}
