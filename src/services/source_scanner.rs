use std::fs;
use std::path::{Path, PathBuf};
#[cfg(feature = "parallel-processing")]
use rayon::prelude::*;
use crate::errors::GuardResult;
use crate::services::pattern_evaluator::PatternEvaluator;
use crate::services::repo_scanner::RepoScanner;
use crate::services::token_extractor::TokenExtractor;
use crate::structs::config::scan_config::ScanConfig;
use crate::structs::policy::suppression::SuppressionList;
use crate::structs::rules::match_result::MatchResult;
use crate::structs::source::scan_report::ScanReport;

enum FileOutcome {
    Scanned(Vec<MatchResult>),
    Skipped,
}

pub struct SourceScanner {
    evaluator: PatternEvaluator,
    config: ScanConfig,
}

impl SourceScanner {
    pub const fn new(evaluator: PatternEvaluator, config: ScanConfig) -> Self {
        Self { evaluator, config }
    }

    /// Scans every eligible file under `root`. Individual files that cannot be
    /// read are counted as skipped; only an unreadable root is an error.
    pub fn scan(&self, root: &Path, suppressions: &SuppressionList) -> GuardResult<ScanReport> {
        let walker = RepoScanner::from_config(root, &self.config);
        let files = walker.scan_files()?;
        log::info!("🔍 Scanning {} files under {}", files.len(), root.display());

        let max_size = self.config.max_file_size_bytes();
        let outcomes = self.scan_all(&walker, &files, max_size);

        let mut findings = Vec::new();
        let mut files_scanned = 0;
        let mut files_skipped = 0;
        for outcome in outcomes {
            match outcome {
                FileOutcome::Scanned(file_findings) => {
                    files_scanned += 1;
                    findings.extend(file_findings);
                }
                FileOutcome::Skipped => files_skipped += 1,
            }
        }

        findings.sort_by(|a, b| {
            a.source_location
                .cmp(&b.source_location)
                .then_with(|| a.rule_id.cmp(&b.rule_id))
        });
        findings.dedup();

        let before = findings.len();
        findings.retain(|finding| match suppressions.find_for_finding(finding) {
            Some(suppression) => {
                log::debug!("🔕 Suppressed {} ({})", finding.rule_id, suppression.notes);
                false
            }
            None => true,
        });
        let suppressed = before - findings.len();

        log::info!(
            "✅ Scan finished: {} files scanned, {} skipped, {} findings, {} suppressed",
            files_scanned,
            files_skipped,
            findings.len(),
            suppressed
        );

        Ok(ScanReport::new(
            &root.to_string_lossy(),
            findings,
            files_scanned,
            files_skipped,
            suppressed,
        ))
    }

    #[cfg(feature = "parallel-processing")]
    fn scan_all(&self, walker: &RepoScanner, files: &[PathBuf], max_size: u64) -> Vec<FileOutcome> {
        files
            .par_iter()
            .map(|path| self.scan_file(walker, path, max_size))
            .collect()
    }

    #[cfg(not(feature = "parallel-processing"))]
    fn scan_all(&self, walker: &RepoScanner, files: &[PathBuf], max_size: u64) -> Vec<FileOutcome> {
        files
            .iter()
            .map(|path| self.scan_file(walker, path, max_size))
            .collect()
    }

    fn scan_file(&self, walker: &RepoScanner, path: &Path, max_size: u64) -> FileOutcome {
        let Some(extractor) = TokenExtractor::for_path(path) else {
            return FileOutcome::Skipped;
        };

        match fs::metadata(path) {
            Ok(meta) if meta.len() > max_size => {
                log::debug!("⏭️ Skipping {} ({} bytes exceeds limit)", path.display(), meta.len());
                return FileOutcome::Skipped;
            }
            Ok(_) => {}
            Err(e) => {
                log::warn!("⚠️ Cannot stat {}: {}", path.display(), e);
                return FileOutcome::Skipped;
            }
        }

        log::debug!(
            "📄 Scanning {} as {}",
            path.display(),
            TokenExtractor::language_for(path).unwrap_or("source")
        );
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                log::warn!("⚠️ Cannot read {}: {}", path.display(), e);
                return FileOutcome::Skipped;
            }
        };

        let relative = walker.relative_path(path);
        let findings = self.scan_content(&extractor, &content, &relative);
        if !findings.is_empty() {
            log::debug!("📍 {}: {} findings", relative, findings.len());
        }
        FileOutcome::Scanned(findings)
    }

    pub fn scan_content(&self, extractor: &TokenExtractor, content: &str, file: &str) -> Vec<MatchResult> {
        extractor
            .extract(content)
            .iter()
            .flat_map(|token| self.evaluator.evaluate_token(token, file))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use crate::services::rule_catalog::RuleCatalog;
    use crate::structs::policy::suppression::Suppression;
    use crate::structs::rules::glob_pattern::GlobPattern;
    use tempfile::TempDir;

    const PAYMENT_JAVA: &str = r#"public class PaymentService {
    private String cardNumber;
    // private String cvv;
    Cipher cipher = Cipher.getInstance("DES/ECB/PKCS5Padding");
    String bucket = "https://s3.us-east-1.amazonaws.com/statements";
}
"#;

    fn scanner(config: ScanConfig) -> SourceScanner {
        let (catalog, _) = RuleCatalog::builtin();
        SourceScanner::new(PatternEvaluator::new(Arc::new(catalog)), config)
    }

    fn fixture() -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("src")).unwrap();
        fs::write(dir.path().join("src/PaymentService.java"), PAYMENT_JAVA).unwrap();
        fs::write(dir.path().join("src/clean.py"), "preferred_language = 'en'\n").unwrap();
        dir
    }

    #[test]
    fn finds_payment_crypto_and_region_issues() {
        let dir = fixture();
        let report = scanner(ScanConfig::default())
            .scan(dir.path(), &SuppressionList::default())
            .unwrap();

        let ids: Vec<_> = report.findings.iter().map(|f| f.rule_id.as_str()).collect();
        assert_eq!(
            ids,
            vec!["payment-data-exposure", "weak-cipher-mode", "weak-transaction-encryption", "rbi-data-localization"]
        );
        assert_eq!(report.files_scanned, 2);
        let location = report.findings[0].source_location.as_ref().unwrap();
        assert_eq!(location.to_string(), "src/PaymentService.java:2:20");
    }

    #[test]
    fn rust_lifetimes_do_not_hide_identifiers() {
        let scanner = scanner(ScanConfig::default());
        let rust = TokenExtractor::for_path(Path::new("src/pay.rs")).unwrap();

        let with_lifetime = scanner.scan_content(&rust, "fn pay<'a>(card_number: &'a str) {}", "src/pay.rs");
        let without = scanner.scan_content(&rust, "fn pay(card_number: &str) {}", "src/pay.rs");

        assert_eq!(with_lifetime.len(), 1);
        assert_eq!(with_lifetime.len(), without.len());
        assert_eq!(with_lifetime[0].matched_text, "card_number");
    }

    #[cfg(unix)]
    #[test]
    fn symlink_cycle_is_scanned_once() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("A.java"), "class A { String cvv; }\n").unwrap();
        std::os::unix::fs::symlink(dir.path(), dir.path().join("loop")).unwrap();

        let report = scanner(ScanConfig::default())
            .scan(dir.path(), &SuppressionList::default())
            .unwrap();

        assert_eq!(report.files_scanned, 1);
        assert_eq!(report.findings.len(), 1);
    }

    #[test]
    fn oversized_files_are_skipped() {
        let dir = fixture();
        let config = ScanConfig {
            max_file_size: "10B".to_string(),
            ..ScanConfig::default()
        };
        let report = scanner(config).scan(dir.path(), &SuppressionList::default()).unwrap();
        assert_eq!(report.files_skipped, 2);
        assert!(report.findings.is_empty());
    }

    #[test]
    fn suppressed_findings_are_counted_not_reported() {
        let dir = fixture();
        let suppressions = SuppressionList {
            entries: vec![Suppression {
                notes: "legacy gateway, tracked".to_string(),
                rule_ids: vec!["rbi-data-localization".to_string()],
                file_patterns: vec![GlobPattern::compile("src/%").unwrap()],
                ..Suppression::default()
            }],
        };

        let report = scanner(ScanConfig::default()).scan(dir.path(), &suppressions).unwrap();
        assert_eq!(report.suppressed_findings, 1);
        assert!(report.findings.iter().all(|f| f.rule_id != "rbi-data-localization"));
    }
}
