//! Integration tests for racecache

mod cli_tests {
    use assert_cmd::{cargo::cargo_bin_cmd, Command};
    use predicates::prelude::*;
    use std::path::Path;
    use tempfile::TempDir;

    /// Command isolated from any user config
    fn racecache(config_dir: &Path) -> Command {
        let mut cmd = cargo_bin_cmd!("racecache");
        cmd.env("RACECACHE_CONFIG", config_dir.join("config.toml"));
        cmd
    }

    #[test]
    fn help_displays() {
        let temp = TempDir::new().unwrap();
        racecache(temp.path())
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("Race a fast local cache"));
    }

    #[test]
    fn version_displays() {
        let temp = TempDir::new().unwrap();
        racecache(temp.path())
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("racecache"));
    }

    #[test]
    fn no_arguments_runs_configured_lookups() {
        let temp = TempDir::new().unwrap();
        std::fs::write(
            temp.path().join("config.toml"),
            "[store]\nlatency_ms = 5\n\n[driver]\niterations = 4\npace_ms = 1\n",
        )
        .unwrap();

        racecache(temp.path())
            .assert()
            .success()
            .stdout(predicate::str::contains("from store"))
            .stdout(predicate::str::is_match(r"requests\s+4").unwrap());
    }

    #[test]
    fn repeated_key_is_served_from_cache() {
        let temp = TempDir::new().unwrap();
        racecache(temp.path())
            .args(["run", "-n", "2", "--keys", "1", "--latency-ms", "10", "--pace-ms", "40"])
            .assert()
            .success()
            .stdout(predicate::str::contains("from store  #1 \"The Hobbit\""))
            .stdout(predicate::str::contains("from cache  #1 \"The Hobbit\""));
    }

    #[test]
    fn absent_key_reports_not_found() {
        let temp = TempDir::new().unwrap();
        racecache(temp.path())
            .args(["run", "-n", "1", "--keys", "99", "--latency-ms", "1"])
            .assert()
            .success()
            .stdout(predicate::str::contains("not found   key 99"));
    }

    #[test]
    fn json_format_emits_one_object_per_line() {
        let temp = TempDir::new().unwrap();
        let output = racecache(temp.path())
            .args([
                "run", "-n", "3", "--keys", "2,3", "--latency-ms", "2", "--pace-ms", "1",
                "--format", "json",
            ])
            .output()
            .unwrap();
        assert!(output.status.success());

        let stdout = String::from_utf8(output.stdout).unwrap();
        let lines: Vec<serde_json::Value> = stdout
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();

        assert_eq!(lines.len(), 4);
        for trace in &lines[..3] {
            assert!(trace["origin"] == "cache" || trace["origin"] == "store");
            assert_eq!(trace["record"]["id"], trace["key"]);
        }
        assert_eq!(lines[3]["summary"]["requests"], 3);
        assert_eq!(lines[3]["summary"]["probes_completed"], 6);
    }

    #[test]
    fn custom_dataset_is_served() {
        let temp = TempDir::new().unwrap();
        let dataset = temp.path().join("books.toml");
        std::fs::write(
            &dataset,
            "[[records]]\nid = 1\ntitle = \"A\"\nauthor = \"Anon\"\nyear = 2001\n",
        )
        .unwrap();

        racecache(temp.path())
            .args(["run", "-n", "1", "--keys", "1", "--latency-ms", "1", "--dataset"])
            .arg(&dataset)
            .assert()
            .success()
            .stdout(predicate::str::contains("#1 \"A\" by Anon (2001)"));
    }

    #[test]
    fn random_keys_come_from_custom_dataset() {
        let temp = TempDir::new().unwrap();
        let dataset = temp.path().join("books.toml");
        std::fs::write(
            &dataset,
            "[[records]]\nid = 100\ntitle = \"A\"\nauthor = \"Anon\"\nyear = 2001\n\n\
             [[records]]\nid = 101\ntitle = \"B\"\nauthor = \"Anon\"\nyear = 2002\n",
        )
        .unwrap();

        racecache(temp.path())
            .args(["run", "-n", "6", "--seed", "1", "--latency-ms", "1", "--pace-ms", "1"])
            .arg("--dataset")
            .arg(&dataset)
            .assert()
            .success()
            .stdout(predicate::str::contains("not found   key").not())
            .stdout(predicate::str::is_match(r"not found\s+0\n").unwrap())
            .stdout(predicate::str::is_match(r"#10[01] ").unwrap());
    }

    #[test]
    fn invalid_dataset_fails_with_hint() {
        let temp = TempDir::new().unwrap();
        let dataset = temp.path().join("dupes.toml");
        std::fs::write(
            &dataset,
            "[[records]]\nid = 1\ntitle = \"A\"\nauthor = \"X\"\nyear = 1\n\n\
             [[records]]\nid = 1\ntitle = \"B\"\nauthor = \"Y\"\nyear = 2\n",
        )
        .unwrap();

        racecache(temp.path())
            .args(["dataset", "--dataset"])
            .arg(&dataset)
            .assert()
            .failure()
            .stderr(predicate::str::contains("duplicate key 1"))
            .stderr(predicate::str::contains("Hint:"));
    }

    #[test]
    fn dataset_lists_builtin_records() {
        let temp = TempDir::new().unwrap();
        racecache(temp.path())
            .arg("dataset")
            .assert()
            .success()
            .stdout(predicate::str::contains("Dune"))
            .stdout(predicate::str::contains("10 record(s)"));
    }

    #[test]
    fn config_path() {
        let temp = TempDir::new().unwrap();
        racecache(temp.path())
            .args(["config", "path"])
            .assert()
            .success()
            .stdout(predicate::str::contains("config.toml"));
    }

    #[test]
    fn config_show() {
        let temp = TempDir::new().unwrap();
        racecache(temp.path())
            .args(["config", "show"])
            .assert()
            .success()
            .stdout(predicate::str::contains("[driver]"));
    }

    #[test]
    fn invalid_config_fails() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("config.toml"), "[driver]\niterations = -1\n").unwrap();

        racecache(temp.path())
            .args(["config", "show"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Invalid configuration"));
    }

    #[test]
    fn unknown_log_format_fails() {
        let temp = TempDir::new().unwrap();
        std::fs::write(
            temp.path().join("config.toml"),
            "[general]\nlog_format = \"jsn\"\n",
        )
        .unwrap();

        racecache(temp.path())
            .args(["run", "-n", "1", "--latency-ms", "1"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Invalid configuration"));
    }
}
