use std::fs;
use std::path::PathBuf;

use chrono::{TimeZone, Utc};
use rust_decimal::Decimal;

use swingline::{BarLoader, SwingConfig, SwingError, SwingSide, TickLoader, swing_transitions};

/// 单个测试的临时目录，drop 时整体删除。
struct FixtureDir(PathBuf);

impl FixtureDir {
    fn new(test: &str) -> Self {
        let dir = std::env::temp_dir()
            .join(format!("swingline-tests-{}-{test}", std::process::id()));
        fs::create_dir_all(&dir).expect("temp dir");
        Self(dir)
    }

    fn file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.0.join(name);
        fs::write(&path, content).expect("fixture written");
        path
    }
}

impl Drop for FixtureDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.0);
    }
}

#[test]
fn bar_csv_loads_exact_prices_in_file_order() {
    let dir = FixtureDir::new("bar_order");
    let path = dir.file(
        "bars.csv",
        "datetime,open,high,low,close,volume\n\
         2024-01-08 06:30:00,1.09700,1.09715,1.09690,1.09705,12\n\
         2024-01-08 06:31:00,1.09705,1.09710,1.09680,1.09690,\n\
         2024-01-08T06:32:00Z,1.09690,1.09700,1.09675,1.09695,7\n",
    );

    let bars = BarLoader::load(&path).expect("bars load");
    assert_eq!(bars.len(), 3);
    assert_eq!(bars[0].datetime, Utc.with_ymd_and_hms(2024, 1, 8, 6, 30, 0).unwrap());
    assert_eq!(bars[0].high_price, Decimal::new(109715, 5));
    assert_eq!(bars[1].volume, Decimal::ZERO);
    assert_eq!(bars[2].low_price, Decimal::new(109675, 5));
}

#[test]
fn bar_csv_accepts_long_column_names() {
    let dir = FixtureDir::new("bar_long");
    let path = dir.file(
        "bars_long.csv",
        "datetime,open_price,high_price,low_price,close_price\n\
         2024-01-08,100,101,99,100.5\n",
    );

    let bars = BarLoader::load(&path).expect("bars load");
    assert_eq!(bars.len(), 1);
    assert_eq!(bars[0].close_price, Decimal::new(1005, 1));
}

#[test]
fn bad_bar_rows_are_errors() {
    let dir = FixtureDir::new("bar_bad");
    let path = dir.file(
        "bars_bad.csv",
        "datetime,open,high,low,close\nnot-a-date,1,2,0.5,1.5\n",
    );
    assert!(matches!(
        BarLoader::load(&path),
        Err(SwingError::InvalidDatetime(_))
    ));

    let path = dir.file(
        "bars_bad_price.csv",
        "datetime,open,high,low,close\n2024-01-08,1,high,0.5,1.5\n",
    );
    assert!(matches!(
        BarLoader::load(&path),
        Err(SwingError::InvalidNumber(_))
    ));

    assert!(matches!(
        BarLoader::load(std::env::temp_dir().join("swingline-missing.csv")),
        Err(SwingError::Csv(_))
    ));
}

#[test]
fn tick_file_aggregates_then_scans() {
    let dir = FixtureDir::new("ticks");
    // 每分钟一笔：低点 4727.5 出现在第 3 分钟。
    let lows = ["4730", "4729", "4727.5", "4728.25", "4729.75"];
    let mut content = String::new();
    for (minute, low) in lows.iter().enumerate() {
        content.push_str(&format!(
            "20240108,06{:02}15000,{low},{low},{low},1\n",
            30 + minute
        ));
    }
    content.push_str("\nbroken,line\n");
    let path = dir.file("ticks.csv", &content);

    let bars = TickLoader::load_minute_bars(&path).expect("ticks load");
    assert_eq!(bars.len(), 5);
    assert_eq!(bars[4].datetime, Utc.with_ymd_and_hms(2024, 1, 8, 6, 34, 0).unwrap());

    let points = SwingConfig::new(2).compute(&bars).expect("valid config");
    assert_eq!(swing_transitions(&points, SwingSide::Low), vec![(2, 4727.5)]);
}

#[test]
fn config_loads_from_yaml_and_json() {
    let dir = FixtureDir::new("config_ok");
    let yaml = dir.file("swing.yaml", "strength: 3\n");
    assert_eq!(SwingConfig::load(&yaml).expect("yaml config").strength, 3);

    let json = dir.file("swing.json", "{\"strength\": 2}");
    assert_eq!(SwingConfig::load(&json).expect("json config").strength, 2);

    let empty = dir.file("swing_default.json", "{}");
    assert_eq!(
        SwingConfig::load(&empty).expect("default config"),
        SwingConfig::default()
    );
    assert_eq!(SwingConfig::default().strength, 5);
}

#[test]
fn config_rejects_bad_strength_and_format() {
    let dir = FixtureDir::new("config_bad");
    let zero = dir.file("swing_zero.yml", "strength: 0\n");
    assert!(matches!(
        SwingConfig::load(&zero),
        Err(SwingError::InvalidParameter { value: 0, .. })
    ));

    let toml = dir.file("swing.toml", "strength = 3\n");
    assert!(matches!(
        SwingConfig::load(&toml),
        Err(SwingError::UnsupportedFormat(_))
    ));

    assert!(SwingConfig::new(-2).validate().is_err());
    assert!(SwingConfig::new(1).validate().is_ok());
}

#[test]
fn fixture_dir_is_removed_after_use() {
    let root = {
        let dir = FixtureDir::new("cleanup");
        let path = dir.file("bars.csv", "datetime,open,high,low,close\n2024-01-08,1,2,0.5,1.5\n");
        assert_eq!(BarLoader::load(&path).expect("bars load").len(), 1);
        dir.0.clone()
    };
    assert!(!root.exists());
}
