use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Instant;
use chrono::Utc;
use crate::config::config_manager::ConfigManager;
use crate::enums::commands::Commands;
use crate::enums::compliance_status::ComplianceStatus;
use crate::enums::framework::Framework;
use crate::enums::gate_status::GateStatus;
use crate::enums::output_format::OutputFormat;
use crate::enums::rule_category::RuleCategory;
use crate::enums::severity::Severity;
use crate::errors::{ErrorHandler, GuardError, GuardResult, ResultExt};
use crate::logger::progress_spinner::ProgressSpinner;
use crate::logger::report_printer::ReportPrinter;
use crate::services::compliance_reporter::ComplianceReporter;
use crate::services::pattern_evaluator::PatternEvaluator;
use crate::services::policy_checker::PolicyChecker;
use crate::services::quality_gates::QualityGates;
use crate::services::renderers::renderer_for;
use crate::services::rule_catalog::RuleCatalog;
use crate::services::sarif_processor::SarifProcessor;
use crate::services::source_scanner::SourceScanner;
use crate::services::suppression_loader::SuppressionLoader;
use crate::structs::config::config::Config;
use crate::structs::policy::suppression::SuppressionList;
use crate::structs::source::scan_report::ScanReport;

const FAILURE: u8 = 1;

pub struct CommandRunner {
    config_path: Option<PathBuf>,
    start_time: Option<Instant>,
}

impl CommandRunner {
    pub const fn new(config_path: Option<PathBuf>) -> Self {
        Self {
            config_path,
            start_time: None,
        }
    }

    /// `Ok(ExitCode::from(1))` means the command ran and a gate failed;
    /// `Err` means it could not run at all.
    pub async fn run_command(&mut self, command: Commands) -> GuardResult<ExitCode> {
        self.start_time = Some(Instant::now());

        let result = match command {
            Commands::Init { path, force } => self.init_command(path.as_deref(), force),
            Commands::Validate => self.validate_command(),
            Commands::Rules { category } => self.rules_command(category),
            Commands::Eval { text, category, first, format } => self.eval_command(&text, category, first, format),
            Commands::Scan { path, format, output, suppressions, fail_on } => {
                self.scan_command(path, format, output, suppressions, fail_on).await
            }
            Commands::ProcessSarif { sarif_file, output } => self.process_sarif_command(&sarif_file, &output).await,
            Commands::Gate { sarif_dir, compliance_file, no_fail_on_critical, no_fail_on_high, max_medium, output } => {
                self.gate_command(
                    &sarif_dir,
                    compliance_file.as_deref(),
                    !no_fail_on_critical,
                    !no_fail_on_high,
                    max_medium,
                    &output,
                )
                .await
            }
            Commands::Report { sarif_dir, output_dir, standards, template } => {
                self.report_command(&sarif_dir, &output_dir, &standards, template).await
            }
            Commands::Policy { policy, dependencies, suppressions, output } => {
                self.policy_command(&policy, &dependencies, suppressions.as_deref(), output.as_deref()).await
            }
        };

        if let Some(start) = self.start_time {
            log::info!("⏱️  Command completed in {:.2}s", start.elapsed().as_secs_f64());
        }

        result
    }

    fn load_config(&self) -> GuardResult<Config> {
        ConfigManager::load(self.config_path.as_deref()).map_err(|e| {
            log::error!("❌ Failed to load configuration: {}", e);
            log::error!("💡 Run 'bfsi-guard init' to create a configuration file.");
            e
        })
    }

    /// Rule sets that fail to compile are reported and skipped.
    fn load_catalog(config: &Config) -> GuardResult<Arc<RuleCatalog>> {
        let (catalog, errors) = RuleCatalog::load(&config.rules);
        ErrorHandler::handle_multiple_errors(&errors, "rule set loading");

        if catalog.is_empty() {
            return Err(GuardError::config_error("no rule set could be loaded", Some("rules")));
        }
        Ok(Arc::new(catalog))
    }

    async fn load_suppressions(path: Option<&Path>) -> GuardResult<SuppressionList> {
        match path {
            Some(path) => {
                let list = SuppressionLoader::load(path).await?.active_on(Utc::now().date_naive());
                if list.is_empty() {
                    log::warn!("⚠️ {} has no active suppressions", path.display());
                } else {
                    log::info!("🔕 {} active suppressions loaded", list.len());
                }
                Ok(list)
            }
            None => Ok(SuppressionList::default()),
        }
    }

    async fn write_output(path: &Path, content: &str) -> GuardResult<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.with_operation("create output directory")?;
        }
        tokio::fs::write(path, content)
            .await
            .map_err(|e| GuardError::file_error(&path.to_string_lossy(), "write", &e.to_string()))?;
        log::info!("📝 Wrote {}", path.display());
        Ok(())
    }

    fn init_command(&self, path: Option<&Path>, force: bool) -> GuardResult<ExitCode> {
        log::info!("🚀 Initializing bfsi-guard configuration...");
        let path = path.or(self.config_path.as_deref());
        let created = ConfigManager::create_sample_config(path, force)?;

        println!("✅ Configuration file created: {}", created.display());
        println!("📝 Edit it to add custom rule sets or tune the gates.");
        println!("🔧 Run 'bfsi-guard validate' to check your configuration.");
        Ok(ExitCode::SUCCESS)
    }

    fn validate_command(&self) -> GuardResult<ExitCode> {
        log::info!("🔍 Validating configuration...");
        let config = self.load_config()?;
        let result = ConfigManager::validate_config(&config);
        result.print_summary();

        Ok(if result.is_valid { ExitCode::SUCCESS } else { ExitCode::from(FAILURE) })
    }

    fn rules_command(&self, category: Option<RuleCategory>) -> GuardResult<ExitCode> {
        let config = self.load_config()?;
        let catalog = Self::load_catalog(&config)?;
        ReportPrinter::print_rules(&catalog, category);
        Ok(ExitCode::SUCCESS)
    }

    fn eval_command(
        &self,
        text: &str,
        category: Option<RuleCategory>,
        first: bool,
        format: OutputFormat,
    ) -> GuardResult<ExitCode> {
        let config = self.load_config()?;
        let catalog = Self::load_catalog(&config)?;
        let evaluator = PatternEvaluator::new(Arc::clone(&catalog));
        let matches = if first {
            evaluator.first_match(text, category).into_iter().collect()
        } else {
            evaluator.evaluate(text, category)
        };

        match format {
            OutputFormat::Text => ReportPrinter::print_matches(text, &matches),
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&matches)?),
            OutputFormat::Sarif => {
                let report = ScanReport::new("<input>", matches, 0, 0, 0);
                println!("{}", renderer_for(OutputFormat::Sarif, catalog).render(&report)?);
            }
        }
        Ok(ExitCode::SUCCESS)
    }

    async fn scan_command(
        &self,
        path: PathBuf,
        format: Option<OutputFormat>,
        output: Option<PathBuf>,
        suppressions: Option<PathBuf>,
        fail_on: Option<Severity>,
    ) -> GuardResult<ExitCode> {
        log::info!("🔍 Starting pattern scan of {}", path.display());
        let config = self.load_config()?;
        let catalog = Self::load_catalog(&config)?;
        let suppressions = Self::load_suppressions(suppressions.as_deref()).await?;
        let format = format.unwrap_or(config.output.format);

        let scanner = SourceScanner::new(PatternEvaluator::new(Arc::clone(&catalog)), config.scan.clone());
        let spinner = ProgressSpinner::start("Scanning");
        let scanned = tokio::task::spawn_blocking(move || scanner.scan(&path, &suppressions))
            .await
            .with_operation("scan worker")?;

        let report = match scanned {
            Ok(report) => {
                spinner.finish(&format!("Scanned {} files", report.files_scanned)).await;
                report
            }
            Err(e) => {
                spinner.fail("Scan failed").await;
                return Err(e);
            }
        };

        let renderer = renderer_for(format, catalog);
        let rendered = renderer.render(&report)?;
        match output {
            Some(output) => {
                if output.extension().and_then(|e| e.to_str()) != Some(renderer.extension()) {
                    log::warn!("⚠️ {} does not end in .{}, writing it anyway", output.display(), renderer.extension());
                }
                Self::write_output(&output, &rendered).await?;
            }
            None => println!("{rendered}"),
        }

        if let Some(threshold) = fail_on {
            if report.has_findings_at_or_above(threshold) {
                log::error!("❌ Findings at or above '{}' severity", threshold);
                return Ok(ExitCode::from(FAILURE));
            }
        }
        Ok(ExitCode::SUCCESS)
    }

    async fn process_sarif_command(&self, sarif_file: &Path, output: &Path) -> GuardResult<ExitCode> {
        let report = SarifProcessor::default().process_file(sarif_file).await?;
        Self::write_output(output, &serde_json::to_string_pretty(&report)?).await?;
        ReportPrinter::print_processing_summary(&report, &output.to_string_lossy());

        Ok(if report.summary.compliance_status == ComplianceStatus::Critical {
            ExitCode::from(FAILURE)
        } else {
            ExitCode::SUCCESS
        })
    }

    async fn gate_command(
        &self,
        sarif_dir: &Path,
        compliance_file: Option<&Path>,
        fail_on_critical: bool,
        fail_on_high: bool,
        max_medium: Option<usize>,
        output: &Path,
    ) -> GuardResult<ExitCode> {
        log::info!("🚦 Evaluating quality gates for {}", sarif_dir.display());
        let config = self.load_config()?;
        let gates = QualityGates::new(config.gates).with_overrides(fail_on_critical, fail_on_high, max_medium);

        let report = gates.run(sarif_dir, compliance_file).await?;
        Self::write_output(output, &serde_json::to_string_pretty(&report)?).await?;
        ReportPrinter::print_gate_report(&report);

        Ok(if report.build_decision == GateStatus::Fail {
            ExitCode::from(FAILURE)
        } else {
            ExitCode::SUCCESS
        })
    }

    async fn report_command(
        &self,
        sarif_dir: &Path,
        output_dir: &Path,
        standards: &str,
        template: Option<PathBuf>,
    ) -> GuardResult<ExitCode> {
        let frameworks = Framework::parse_list(standards)
            .map_err(|reason| GuardError::validation_error("standards", standards, &reason))?;
        if frameworks.is_empty() {
            return Err(GuardError::validation_error("standards", standards, "at least one standard is required"));
        }

        let config = self.load_config()?;
        let template = template.or_else(|| config.output.report_template.map(PathBuf::from));

        let reporter = ComplianceReporter::new(&frameworks);
        let report = reporter.generate(sarif_dir, output_dir, template.as_deref()).await?;
        ReportPrinter::print_compliance_report(&report);
        Ok(ExitCode::SUCCESS)
    }

    async fn policy_command(
        &self,
        policy: &Path,
        dependencies: &Path,
        suppressions: Option<&Path>,
        output: Option<&Path>,
    ) -> GuardResult<ExitCode> {
        log::info!("📦 Checking dependencies against {}", policy.display());
        let policy = PolicyChecker::load_policy(policy).await?;
        let dependencies = PolicyChecker::load_dependencies(dependencies).await?;
        let suppressions = Self::load_suppressions(suppressions).await?;

        let checker = PolicyChecker::new(&policy)?;
        let report = checker.check(&dependencies, &suppressions, Utc::now().date_naive());

        if let Some(output) = output {
            Self::write_output(output, &serde_json::to_string_pretty(&report)?).await?;
        }
        ReportPrinter::print_policy_report(&report);

        Ok(if report.passed() { ExitCode::SUCCESS } else { ExitCode::from(FAILURE) })
    }
}
