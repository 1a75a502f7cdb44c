use clap::Parser;
use skylux::app::summary::interpretation_label;
use skylux::config::{Command, ScoreArgs};
use skylux::utils::error::ErrorSeverity;
use skylux::utils::{logger, validation::Validate};
use skylux::{
    scorer, CliConfig, ConsoleRenderer, CsvExporter, LocalStorage, Session,
    SkyluxError, TomlConfig,
};

fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting skylux CLI");
    tracing::debug!("CLI config: {:?}", config);

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let settings = match load_settings(&config) {
        Ok(settings) => settings,
        Err(e) => exit_with(e),
    };

    let result = match &config.command {
        Command::Run {
            output_path,
            no_export,
        } => run_assessment(&config, &settings, output_path.as_deref(), *no_export),
        Command::Score(args) => print_score(&config, &settings, args),
    };

    if let Err(e) = result {
        exit_with(e);
    }

    Ok(())
}

fn load_settings(config: &CliConfig) -> skylux::Result<TomlConfig> {
    let settings = match &config.config {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path);
            TomlConfig::from_file(path)?
        }
        None => TomlConfig::default(),
    };
    settings.validate()?;
    Ok(settings)
}

fn selected_language<'a>(config: &'a CliConfig, settings: &'a TomlConfig) -> &'a str {
    config
        .lang
        .as_deref()
        .unwrap_or_else(|| settings.default_language())
}

fn run_assessment(
    config: &CliConfig,
    settings: &TomlConfig,
    output_path: Option<&str>,
    no_export: bool,
) -> skylux::Result<()> {
    let catalog = settings.catalog()?;
    let mut session = Session::new(selected_language(config, settings));

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let mut renderer = ConsoleRenderer::new(stdin.lock(), stdout.lock(), &catalog);
    renderer.run(&mut session)?;

    if no_export || !settings.export_enabled() {
        tracing::debug!("CSV export disabled");
        return Ok(());
    }

    let output_path = output_path.unwrap_or_else(|| settings.output_path());
    let exporter = CsvExporter::new(LocalStorage::new(output_path.to_string()));
    let path = exporter.export(&session, chrono::Utc::now())?;
    renderer.announce_export(&session, &path)?;
    Ok(())
}

fn print_score(config: &CliConfig, settings: &TomlConfig, args: &ScoreArgs) -> skylux::Result<()> {
    let answers = args.answers();
    let score = scorer::score(&answers);

    if args.csv {
        let csv_output = skylux::app::export::render_csv(&answers, &score, chrono::Utc::now())?;
        print!("{}", csv_output);
        return Ok(());
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&score)?);
        return Ok(());
    }

    let catalog = settings.catalog()?;
    let language = catalog.resolve(selected_language(config, settings));
    println!(
        "{}",
        skylux::app::summary::score_line(&catalog, language, &score)
    );
    println!("{}", catalog.text(language, interpretation_label(score.tier)));
    Ok(())
}

fn exit_with(e: SkyluxError) -> ! {
    // 記錄詳細錯誤信息
    tracing::error!(
        "❌ skylux failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    // 根據錯誤嚴重程度決定退出碼
    let exit_code = match e.severity() {
        ErrorSeverity::Low => 0,      // 使用者取消
        ErrorSeverity::Medium => 2,   // 輸入或流程錯誤
        ErrorSeverity::High => 1,     // 配置或輸出錯誤
        ErrorSeverity::Critical => 3, // 系統錯誤
    };
    std::process::exit(exit_code);
}
