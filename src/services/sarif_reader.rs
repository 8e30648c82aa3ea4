use std::path::{Path, PathBuf};
use crate::config::constants::SARIF_EXTENSION;
use crate::errors::{GuardError, GuardResult};
use crate::services::repo_scanner::RepoScanner;
use crate::structs::sarif::sarif_log::SarifLog;

pub struct SarifReader;

impl SarifReader {
    pub fn parse(content: &str) -> GuardResult<SarifLog> {
        serde_json::from_str(content).map_err(|e| {
            GuardError::parse_error("SARIF", Some(e.line()), &e.to_string())
        })
    }

    pub async fn read_file(path: &Path) -> GuardResult<SarifLog> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| GuardError::file_error(&path.to_string_lossy(), "read", &e.to_string()))?;

        Self::parse(&content).map_err(|e| e.with_context(&path.to_string_lossy()))
    }

    pub fn find_sarif_files(dir: &Path) -> GuardResult<Vec<PathBuf>> {
        RepoScanner::find_files_with_extension(dir, SARIF_EXTENSION)
    }

    /// Reads every `.sarif` below `dir`. Files that fail to read or parse are
    /// logged and left out.
    pub async fn read_dir(dir: &Path) -> GuardResult<Vec<(PathBuf, SarifLog)>> {
        let files = Self::find_sarif_files(dir)?;
        log::info!("📂 Found {} SARIF files in {}", files.len(), dir.display());

        let mut logs = Vec::with_capacity(files.len());
        for file in files {
            match Self::read_file(&file).await {
                Ok(log) => logs.push((file, log)),
                Err(e) => log::warn!("⚠️ Skipping {}: {}", file.display(), e),
            }
        }
        Ok(logs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const CODEQL_LOG: &str = r#"{
  "version": "2.1.0",
  "runs": [{
    "tool": {"driver": {"name": "CodeQL", "semanticVersion": "2.15.0"}},
    "results": [{
      "ruleId": "java/weak-cryptographic-algorithm",
      "level": "error",
      "message": {"text": "Use of DES"},
      "locations": [{"physicalLocation": {"artifactLocation": {"uri": "src/Crypto.java"}, "region": {"startLine": 12}}}]
    }]
  }]
}"#;

    #[test]
    fn parses_codeql_output_ignoring_unknown_fields() {
        let log = SarifReader::parse(CODEQL_LOG).unwrap();
        let result = &log.runs[0].results[0];
        assert_eq!(log.runs[0].tool.driver.name, "CodeQL");
        assert_eq!(result.rule_id_or_unknown(), "java/weak-cryptographic-algorithm");
        let region = result.locations[0].physical_location.as_ref().unwrap().region.as_ref().unwrap();
        assert_eq!(region.start_line, Some(12));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        assert!(matches!(SarifReader::parse("{not json"), Err(GuardError::ParseError { .. })));
    }

    #[tokio::test]
    async fn unreadable_files_in_a_directory_are_skipped() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("good.sarif"), CODEQL_LOG).unwrap();
        std::fs::write(dir.path().join("broken.sarif"), "garbage").unwrap();

        let logs = SarifReader::read_dir(dir.path()).await.unwrap();
        assert_eq!(logs.len(), 1);
        assert!(logs[0].0.ends_with("good.sarif"));
    }
}
