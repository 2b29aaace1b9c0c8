//! Hidden prompt detector: find and remove prompts hidden in documents

use anyhow::Context;
use clap::Parser;
use colored::Colorize;
use hidden_prompt_detector::cli::{self, Cli, Commands, ConfigAction};
use hidden_prompt_detector::output::export::{cleaned_file_name, report_file_name, save_to_file};
use hidden_prompt_detector::output::{ConsoleFormatter, DetectionReport};
use hidden_prompt_detector::processing::patterns::{self, Language};
use hidden_prompt_detector::{Config, DetectionPipeline, DetectorError};
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info};
use std::path::{Path, PathBuf};
use std::process;
use std::time::Duration;

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    // Load configuration
    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);
    let config = match Config::load_from(&config_path) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            eprintln!("{}", e.user_message().red());
            process::exit(1);
        }
    };

    // Execute command
    if let Err(e) = run_command(cli.command, config, &config_path).await {
        error!("Command failed: {:#}", e);
        let message = match e.downcast_ref::<DetectorError>() {
            Some(detector_error) => detector_error.user_message(),
            None => format!("处理文件时出错: {:#}\nError processing file: {:#}", e, e),
        };
        eprintln!("{}", message.red());
        process::exit(1);
    }
}

async fn run_command(command: Commands, mut config: Config, config_path: &Path) -> anyhow::Result<()> {
    match command {
        Commands::Scan {
            file,
            output_dir,
            no_report,
            no_clean,
            detailed,
            no_color,
        } => {
            // Reject unsupported formats before touching the file
            cli::validate_file_extension(&file)?;

            if output_dir.is_some() {
                config.output.output_dir = output_dir;
            }
            config.output.write_report &= !no_report;
            config.output.write_cleaned &= !no_clean;
            config.output.detailed |= detailed;
            config.output.color_output &= !no_color;

            if !config.output.color_output {
                colored::control::set_override(false);
            }

            scan(&file, &config).await?;
        }

        Commands::Patterns { language } => {
            list_patterns(language);
        }

        Commands::Config { action } => match action {
            Some(ConfigAction::Show) | None => {
                println!("⚙️  Current Configuration ({})\n", config_path.display());
                let rendered = toml::to_string_pretty(&config).context("Failed to render configuration")?;
                println!("{}", rendered);
            }

            Some(ConfigAction::Reset) => {
                println!("🔄 Resetting configuration to defaults...");
                Config::default()
                    .save_to(config_path)
                    .with_context(|| format!("Failed to write {}", config_path.display()))?;
                println!("✅ Configuration reset successfully!");
            }

            Some(ConfigAction::Path) => {
                println!("{}", config_path.display());
            }
        },
    }

    Ok(())
}

async fn scan(file: &Path, config: &Config) -> anyhow::Result<()> {
    info!("Scanning {}", file.display());
    let pipeline = DetectionPipeline::new()?;

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    spinner.set_message("正在分析文件... / Analyzing file...");
    spinner.enable_steady_tick(Duration::from_millis(100));

    let scanned = pipeline.scan_file(file).await;
    spinner.finish_and_clear();
    let result = scanned?;

    let file_name = file
        .file_name()
        .and_then(|name| name.to_str())
        .map(str::to_string)
        .unwrap_or_else(|| file.display().to_string());

    let formatter = ConsoleFormatter::new(config.output.color_output, config.output.detailed)
        .with_preview_chars(config.output.preview_chars);
    print!("{}", formatter.format_result(&result, &file_name));

    let output_dir = config.output_dir_for(file);
    println!();

    if config.output.write_cleaned {
        let path = output_dir.join(cleaned_file_name(&file_name, result.file_type));
        save_to_file(&result.cleaned_text, &path)
            .await
            .with_context(|| format!("Failed to write cleaned file {}", path.display()))?;
        println!("💾 清理后的文件 / Cleaned file: {}", path.display());
    }

    if config.output.write_report && result.has_detections() {
        let path: PathBuf = output_dir.join(report_file_name(&file_name));
        let report = DetectionReport::new(&result, file_name.as_str()).render();
        save_to_file(&report, &path)
            .await
            .with_context(|| format!("Failed to write report {}", path.display()))?;
        println!("📄 检测报告 / Detection report: {}", path.display());
    }

    Ok(())
}

fn list_patterns(language: Option<Language>) {
    println!("🔍 Detection patterns (case-insensitive, matched in order)\n");
    for (index, spec) in patterns::PATTERNS.iter().enumerate() {
        if language.is_some_and(|wanted| wanted != spec.language) {
            continue;
        }
        println!(
            "{:>2}. [{}] {} {}",
            index + 1,
            spec.language,
            format!("{:<24}", spec.name).bold(),
            spec.source
        );
    }
}
