use std::fs;
use std::path::Path;
use assert_cmd::Command;
use tempfile::TempDir;

pub const PAYMENT_JAVA: &str = r#"public class PaymentService {
    private String cardNumber;
    // private String cvv;
    Cipher cipher = Cipher.getInstance("DES/ECB/PKCS5Padding");
    String bucket = "https://s3.us-east-1.amazonaws.com/statements";
}
"#;

/// Runs the binary inside `workspace` with HOME pointed there too, so no
/// user-level config leaks into the test.
pub fn guard(workspace: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_bfsi-guard"));
    cmd.current_dir(workspace).env("HOME", workspace).env_remove("RUST_LOG");
    cmd
}

pub fn workspace() -> TempDir {
    tempfile::tempdir().expect("tempdir")
}

pub fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent");
    }
    fs::write(path, content).expect("write fixture");
}

pub fn read_json(path: &Path) -> serde_json::Value {
    let raw = fs::read(path).expect("read output");
    serde_json::from_slice(&raw).expect("output json")
}

pub fn sarif(results: &[(&str, &str)]) -> String {
    let results: Vec<_> = results
        .iter()
        .map(|(rule, level)| {
            serde_json::json!({
                "ruleId": rule,
                "level": level,
                "message": {"text": format!("{rule} finding")},
                "locations": [{
                    "physicalLocation": {
                        "artifactLocation": {"uri": "src/Payment.java"},
                        "region": {"startLine": 12}
                    }
                }]
            })
        })
        .collect();

    serde_json::json!({
        "version": "2.1.0",
        "runs": [{"tool": {"driver": {"name": "codeql"}}, "results": results}]
    })
    .to_string()
}
