use clap::Parser;
use house_price_predictor::utils::error::{ErrorSeverity, PredictorError};
use house_price_predictor::utils::{logger, validation::Validate};
use house_price_predictor::{ArtifactLoader, CliConfig, LocalStorage, Predictor, TomlConfig};
use serde_json::json;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    // 先讀設定檔，日誌格式由它決定
    let file_config = match config.config.as_deref().map(TomlConfig::from_file).transpose() {
        Ok(file_config) => file_config,
        Err(e) => {
            eprintln!("❌ Failed to load config file: {}", e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    let verbose = config.verbose || file_config.as_ref().map(|c| c.verbose()).unwrap_or(false);
    if file_config.as_ref().map(|c| c.json_logs()).unwrap_or(false) {
        logger::init_json_logger(verbose);
    } else {
        logger::init_cli_logger(verbose);
    }

    tracing::info!("🚀 Starting house-price-predictor");
    tracing::debug!("CLI config: {:?}", config);

    let validation = config
        .validate()
        .and_then(|_| file_config.as_ref().map_or(Ok(()), |c| c.validate()));
    if let Err(e) = validation {
        fail(&e);
    }

    let paths = config.artifact_paths(file_config.as_ref());
    if let Err(e) = paths.validate() {
        fail(&e);
    }

    // 啟動時載入模型；失敗就停止，不提供部分功能
    let storage = LocalStorage::new(paths.dir.clone());
    let loader = ArtifactLoader::new(storage, paths);
    let artifacts = match loader.load().await {
        Ok(artifacts) => artifacts,
        Err(e) => fail(&e),
    };

    if config.check {
        println!("✅ Artifacts OK");
        return Ok(());
    }

    let predictor = Predictor::new(artifacts);
    let form = config.form_input();

    let estimate = match form.validate().and_then(|_| predictor.estimate(&form.to_raw())) {
        Ok(estimate) => estimate,
        Err(e) => fail(&e),
    };

    if config.json {
        let report = json!({
            "input": form,
            "engineered": estimate.engineered,
            "prediction": estimate.prediction,
            "formatted": estimate.prediction.formatted(),
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Estimated Value: {}", estimate.prediction);
    }

    Ok(())
}

fn fail(e: &PredictorError) -> ! {
    tracing::error!(
        "❌ Prediction failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

    let exit_code = match e.severity() {
        // 輸入錯誤
        ErrorSeverity::Medium => 2,
        // 設定錯誤
        ErrorSeverity::High => 1,
        // 模型或系統錯誤
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}
