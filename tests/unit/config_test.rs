//! Config loading and validation through the public API.

use std::fs;

use tgalign::config::ConfigError;
use tgalign::textgrid::TierSelector;
use tgalign::validate::Numbering;
use tgalign::Config;

#[test]
fn missing_file_yields_defaults() {
    let tmp = tempfile::tempdir().unwrap();
    let config = Config::load_from(&tmp.path().join("config.toml")).unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn partial_file_keeps_other_defaults() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("config.toml");
    fs::write(
        &path,
        "[alignment]\nword_tier = \"words\"\nlow_confidence = 0.8\n\n[validation]\nnumbering = \"contiguous\"\n",
    )
    .unwrap();

    let config = Config::load_from(&path).unwrap();

    assert_eq!(
        config.alignment.word_tier,
        TierSelector::Name("words".into())
    );
    assert_eq!(config.alignment.low_confidence, 0.8);
    assert_eq!(config.alignment.min_line_gap, 0.5);
    assert_eq!(config.validation.numbering, Numbering::Contiguous);
    assert_eq!(config.merge.max_span, 28.0);
    assert_eq!(config.files.checked_suffix, ".ok.txt");
}

#[test]
fn tier_index_from_integer() {
    let config: Config = toml::from_str("[alignment]\nword_tier = 2\n").unwrap();
    assert_eq!(config.alignment.word_tier, TierSelector::Index(2));
}

#[test]
fn save_and_load_round_trip() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("nested").join("config.toml");
    let mut config = Config::default();
    config.merge.connector = "・".into();
    config.split.loglevel = "error".into();

    config.save_to(&path).unwrap();

    assert_eq!(Config::load_from(&path).unwrap(), config);
}

#[test]
fn defaults_are_valid() {
    Config::default().validate().unwrap();
}

#[test]
fn out_of_range_values_are_rejected() {
    let mut config = Config::default();
    config.alignment.low_confidence = 1.5;
    assert!(matches!(
        config.validate(),
        Err(ConfigError::OutOfUnitRange {
            key: "alignment.low_confidence",
            ..
        })
    ));

    let mut config = Config::default();
    config.merge.max_span = f64::NAN;
    assert!(matches!(
        config.validate(),
        Err(ConfigError::NotPositive {
            key: "merge.max_span",
            ..
        })
    ));

    let mut config = Config::default();
    config.validation.max_span = 0.0;
    assert!(config.validate().is_err());
}

#[test]
fn sentinel_must_not_be_alignable() {
    let mut config = Config::default();
    config.alignment.sentinel = "おわり".into();
    assert!(matches!(
        config.validate(),
        Err(ConfigError::AlignableSentinel { .. })
    ));
}

#[test]
fn sentinel_must_not_share_folded_alphanumerics() {
    for sentinel in ["x", "END", "#9", "ｘ"] {
        let mut config = Config::default();
        config.alignment.sentinel = sentinel.into();
        assert!(
            matches!(
                config.validate(),
                Err(ConfigError::AlignableSentinel { .. })
            ),
            "{sentinel:?} accepted"
        );
    }

    let mut config = Config::default();
    config.alignment.sentinel = "<eos>".into();
    assert!(config.validate().is_err());
    config.alignment.sentinel = "##".into();
    assert!(config.validate().is_ok());
}

#[test]
fn invalid_group_pattern_is_rejected() {
    let mut config = Config::default();
    config.split.group_pattern = "(".into();
    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("split.group_pattern"), "{err}");
}

#[test]
fn invalid_file_reports_the_path() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("config.toml");
    fs::write(&path, "[merge]\nmin_gap = -1.0\n").unwrap();

    let err = Config::load_from(&path).unwrap_err();
    let chain = format!("{:#}", err);
    assert!(chain.contains("Invalid config"), "{chain}");
    assert!(chain.contains("merge.min_gap"), "{chain}");
}

#[test]
fn annotated_toml_documents_fields() {
    let annotated = Config::default().to_annotated_toml().unwrap();
    assert!(annotated.contains("[alignment]"));
    assert!(annotated.contains("# Longest merged block (seconds)\nmax_span = 28.0"));
}
