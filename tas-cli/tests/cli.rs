use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::time::{SystemTime, UNIX_EPOCH};

fn data_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("data")
}

fn scratch_dir(tag: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos())
        .unwrap_or_default();
    let dir = std::env::temp_dir().join(format!("tas-cli-{tag}-{}-{nanos}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn tas_in(data: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_tas"))
        .arg("--data-dir")
        .arg(data)
        .args(args)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .output()
        .expect("tas binary runs")
}

fn tas(args: &[&str]) -> Output {
    tas_in(&data_dir(), args)
}

fn stdout_of(output: &Output) -> String {
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout.clone()).unwrap()
}

fn world_lines(text: &str) -> Vec<&str> {
    text.lines().filter(|line| line.starts_with("UNK 0000 ")).collect()
}

#[test]
fn world_prints_requested_count() {
    let text = stdout_of(&tas(&["--seed", "7", "world", "5"]));
    let worlds = world_lines(&text);
    assert_eq!(worlds.len(), 5, "{text}");
    for line in worlds {
        let profile = line.split_whitespace().nth(2).unwrap();
        assert_eq!(profile.len(), 9, "{line}");
        assert_eq!(&profile[7..8], "-", "{line}");
    }
}

#[test]
fn zero_worlds_means_one() {
    let text = stdout_of(&tas(&["--seed", "7", "world", "0"]));
    assert_eq!(world_lines(&text).len(), 1);
}

#[test]
fn seeded_runs_repeat() {
    let first = stdout_of(&tas(&["--seed", "42", "world", "4", "--scheme", "custom"]));
    let second = stdout_of(&tas(&["--seed", "42", "world", "4", "--scheme", "custom"]));
    assert_eq!(first, second);
}

#[test]
fn long_form_includes_description() {
    let text = stdout_of(&tas(&["--seed", "3", "world", "--long"]));
    assert!(text.lines().count() > 3, "{text}");
}

#[test]
fn unknown_scheme_fails_before_generation() {
    let output = tas(&["world", "--scheme", "galactic"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("galactic"), "{stderr}");
    assert!(world_lines(&String::from_utf8_lossy(&output.stdout)).is_empty());
}

#[test]
fn world_debug_reports_averages() {
    let text = stdout_of(&tas(&["--seed", "1", "world-debug"]));
    assert!(text.contains("Attribute averages over"), "{text}");
    assert!(text.contains("tech level"));
}

#[test]
fn standard_trade_between_known_worlds() {
    let text = stdout_of(&tas(&["--seed", "5", "trade", "Regina", "Efate"]));
    assert!(text.contains("Standard trade from Regina to Efate"), "{text}");
    for section in ["Passengers", "Freight", "Mail"] {
        assert!(text.contains(section), "{section}");
    }
}

#[test]
fn unknown_world_is_an_error() {
    let output = tas(&["trade", "Regina", "Nowhere"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Nowhere"));
}

#[test]
fn speculative_sale_lists_every_good() {
    let text = stdout_of(&tas(&["spec", "Efate", "sell"]));
    assert!(text.contains("Prices paid for cargo on Efate"), "{text}");
    assert!(text.contains("Lot 11:"));
    assert!(text.contains("Lot 66:"));
    assert!(!text.contains("Tons available"));
}

#[test]
fn speculative_purchase_renumbers_lots() {
    let text = stdout_of(&tas(&["--seed", "11", "spec", "Regina", "buy"]));
    assert!(text.contains("Goods for sale on Regina"), "{text}");
    assert!(text.contains("Lot 1:"));
}

#[test]
fn sector_writes_world_files() {
    let out_dir = scratch_dir("sector");
    let output = tas(&[
        "--seed",
        "2",
        "--to-file",
        "--output-dir",
        out_dir.to_str().unwrap(),
        "sector",
        "Spinward",
    ]);
    let text = stdout_of(&output);
    assert!(text.contains("Subsector Spinward"), "{text}");

    let written = fs::read_dir(out_dir.join("sector-Spinward"))
        .unwrap()
        .filter_map(Result::ok)
        .count();
    assert!(written > 0);
    let heading = text
        .lines()
        .find(|line| line.starts_with("Subsector"))
        .unwrap();
    assert!(heading.contains(&format!("({written} worlds)")), "{heading}");
    fs::remove_dir_all(out_dir).unwrap();
}

#[test]
fn polish_rewrites_names_in_data_dir() {
    let dir = scratch_dir("polish");
    fs::write(dir.join("world-names.txt"), "Zila\nAki\nZila\n").unwrap();
    let text = stdout_of(&tas_in(&dir, &["polish"]));
    assert!(text.contains("3 names in, 2 names out"), "{text}");
    assert_eq!(
        fs::read_to_string(dir.join("world-names.txt")).unwrap(),
        "Aki\nZila"
    );
    fs::remove_dir_all(dir).unwrap();
}
