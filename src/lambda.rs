#[cfg(feature = "lambda")]
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
#[cfg(feature = "lambda")]
use skylux::app::service::{evaluate, AssessmentRequest, AssessmentResponse};
#[cfg(feature = "lambda")]
use skylux::utils::{logger, validation::Validate};
#[cfg(feature = "lambda")]
use skylux::{Catalog, TomlConfig};

#[cfg(feature = "lambda")]
struct Settings {
    catalog: Catalog,
    default_language: String,
}

#[cfg(feature = "lambda")]
fn load_settings() -> skylux::Result<Settings> {
    // 設定檔可選，未提供時使用內建翻譯
    let config = match std::env::var("SKYLUX_CONFIG") {
        Ok(path) => TomlConfig::from_file(path)?,
        Err(_) => TomlConfig::default(),
    };
    config.validate()?;

    Ok(Settings {
        catalog: config.catalog()?,
        default_language: config.default_language().to_string(),
    })
}

#[cfg(feature = "lambda")]
async fn function_handler(
    settings: &Settings,
    event: LambdaEvent<AssessmentRequest>,
) -> Result<AssessmentResponse, Error> {
    tracing::info!(request_id = %event.context.request_id, "Evaluating assessment request");

    let response = evaluate(
        event.payload,
        &settings.catalog,
        &settings.default_language,
        chrono::Utc::now(),
    )
    .map_err(|e| {
        tracing::error!("❌ Assessment failed: {} (Severity: {:?})", e, e.severity());
        Box::new(e) as Box<dyn std::error::Error + Send + Sync>
    })?;

    tracing::info!(
        session_id = %response.session_id,
        score = response.score,
        tier = response.tier.as_str(),
        "Assessment evaluated"
    );
    Ok(response)
}

#[cfg(feature = "lambda")]
#[tokio::main]
async fn main() -> Result<(), Error> {
    logger::init_lambda_logger();

    let settings = load_settings()?;
    let settings = &settings;

    run(service_fn(move |event: LambdaEvent<AssessmentRequest>| async move {
        function_handler(settings, event).await
    }))
    .await
}
