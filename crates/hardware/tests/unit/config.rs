//! # Configuration Tests
//!
//! Tests for variant records, defaults, JSON deserialization, and validation.

use intc_core::config::*;
use intc_core::{Intc, IntcError};
use pretty_assertions::assert_eq;
use rstest::rstest;

#[test]
fn test_ast2700_record() {
    let config = IntcVariant::Ast2700.config();
    assert_eq!(config.num_lines, 32);
    assert_eq!(config.num_inpins, 9);
    assert_eq!(config.num_outpins, 9);
    assert_eq!(config.mem_size, 0x4000);
    assert_eq!(config.nr_regs, 0x808 >> 2);
    assert_eq!(config.reg_offset, 0x1000);
    assert_eq!(config.window_size(), 0x808);
    assert_eq!(config.validate(), Ok(()));
}

#[test]
fn test_defaults_are_ast2700() {
    assert_eq!(IntcConfig::default(), IntcVariant::Ast2700.config());
    let config = Config::default();
    assert_eq!(config.base_addr, 0x1210_0000);
    assert_eq!(config.variant, IntcVariant::Ast2700);
    assert!(config.intc.is_none());
    assert_eq!(config.intc_config(), IntcVariant::Ast2700.config());
}

#[test]
fn test_variant_identity() {
    assert_eq!(IntcVariant::Ast2700.name(), "aspeed.intc-ast2700");
    assert_eq!(IntcVariant::Ast2700.description(), "ASPEED 2700 INTC Controller");
    assert_eq!(
        IntcVariant::matching(&IntcConfig::default()),
        Some(IntcVariant::Ast2700)
    );
    let custom = IntcConfig {
        num_inpins: 2,
        ..IntcConfig::default()
    };
    assert_eq!(IntcVariant::matching(&custom), None);
}

#[test]
fn test_json_empty_document() {
    let config = Config::from_json("{}").unwrap();
    assert_eq!(config.base_addr, 0x1210_0000);
    assert_eq!(config.variant, IntcVariant::Ast2700);
    assert!(config.intc.is_none());
}

#[rstest]
#[case("Ast2700")]
#[case("AST2700")]
fn test_json_variant_names(#[case] name: &str) {
    let json = format!(r#"{{ "variant": "{name}", "base_addr": 4096 }}"#);
    let config = Config::from_json(&json).unwrap();
    assert_eq!(config.variant, IntcVariant::Ast2700);
    assert_eq!(config.base_addr, 0x1000);
}

#[test]
fn test_json_partial_record_overrides_variant() {
    let json = r#"{ "intc": { "num_inpins": 2, "num_outpins": 2 } }"#;
    let config = Config::from_json(json).unwrap();
    let intc = config.intc_config();
    assert_eq!(intc.num_inpins, 2);
    assert_eq!(intc.num_outpins, 2);
    assert_eq!(intc.num_lines, 32);
    assert_eq!(intc.nr_regs, 0x808 >> 2);
    assert_eq!(intc.reg_offset, 0x1000);
}

#[test]
fn test_json_rejects_unknown_variant() {
    let err = Config::from_json(r#"{ "variant": "Ast2600" }"#).unwrap_err();
    assert!(matches!(err, IntcError::InvalidConfig(_)));
}

#[test]
fn test_json_rejects_malformed_text() {
    let err = Config::from_json("{ base_addr: ").unwrap_err();
    assert!(matches!(err, IntcError::InvalidConfig(_)));
}

#[rstest]
#[case::no_lines(IntcConfig { num_lines: 0, ..IntcConfig::default() })]
#[case::too_many_lines(IntcConfig { num_lines: 33, ..IntcConfig::default() })]
#[case::no_inpins(IntcConfig { num_inpins: 0, ..IntcConfig::default() })]
#[case::too_many_inpins(IntcConfig { num_inpins: 17, nr_regs: 0x1008 >> 2, mem_size: 0x8000, ..IntcConfig::default() })]
#[case::no_outpins(IntcConfig { num_outpins: 0, ..IntcConfig::default() })]
#[case::regs_miss_last_status(IntcConfig { nr_regs: 0x804 >> 2, ..IntcConfig::default() })]
#[case::window_past_container(IntcConfig { reg_offset: 0x3900, ..IntcConfig::default() })]
fn test_validate_rejects(#[case] config: IntcConfig) {
    assert!(matches!(
        config.validate(),
        Err(IntcError::InvalidConfig(_))
    ));
    assert!(matches!(
        Intc::new(0, config),
        Err(IntcError::InvalidConfig(_))
    ));
}

#[test]
fn test_validate_accepts_max_inpins() {
    let config = IntcConfig {
        num_inpins: 16,
        num_outpins: 16,
        nr_regs: 0x1000 >> 2,
        ..IntcConfig::default()
    };
    assert_eq!(config.validate(), Ok(()));
}

#[test]
fn test_from_config_uses_effective_record() {
    let json = r#"{ "base_addr": 305135616, "intc": { "num_inpins": 2, "num_outpins": 2 } }"#;
    let config = Config::from_json(json).unwrap();
    let intc = Intc::from_config(&config).unwrap();
    assert_eq!(intc.config().num_inpins, 2);
    assert_eq!(intc.type_name(), "aspeed.intc");
    assert_eq!(intc.description(), "ASPEED INTC Controller");
}
