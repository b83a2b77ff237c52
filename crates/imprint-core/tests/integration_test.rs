// Imprint Integration Tests
//
// These tests drive the pipeline from its textual and file front ends:
// key script -> Engine -> TextBuffer, and TOML -> Config -> Engine
//
// Run with: cargo test --test integration_test

use imprint_core::mapping::{AltRepeatTable, ExpanderTable, WordMacroTable};
use imprint_core::output::{KeyEmitter, Output, TextBuffer};
use imprint_core::script::{parse_script, ScriptStep};
use imprint_core::{Engine, EngineConfig, Key, KeyEvent, LastKeyMemory, ModMask};
use strum::IntoEnumIterator;

// Helper: replay a script and return the typed text
fn run_script(engine: &mut Engine, script: &str) -> String {
    let steps = parse_script(script).unwrap();
    let mut buffer = TextBuffer::new();
    let mut last = 0;
    for step in steps {
        match step {
            ScriptStep::Event(event) => {
                buffer.emit_all(&engine.tick(event.time_ms));
                buffer.emit_all(&engine.process_event(event));
                last = event.time_ms;
            }
            ScriptStep::Layer(layer) => engine.set_layer(layer),
        }
    }
    buffer.emit_all(&engine.tick(last + engine.config().combo_term_ms));
    buffer.text()
}

#[test]
fn test_script_through_engine() {
    let mut engine = Engine::default();
    let text = run_script(&mut engine, "S-i SPACE T HV_SWITCH E SPACE A MAGIC_RIGHT");
    assert_eq!(text, "I the all ");
}

#[test]
fn test_script_sentence_and_caps_word() {
    let mut engine = Engine::default();
    let text = run_script(
        &mut engine,
        "o k DOT SPACE CW_TOGG B MAGIC_RIGHT w e SPACE n o",
    );
    assert_eq!(text, "ok. BECAUSE WE no");
}

#[test]
fn test_script_qu_hold() {
    let mut engine = Engine::default();
    assert_eq!(run_script(&mut engine, "QU e SPACE QU@300"), "que q");
}

#[test]
fn test_script_home_row_mods() {
    let mut engine = Engine::default();
    // Tap, plain letter, lone hold, and a roll that releases the mod-tap first
    assert_eq!(
        run_script(&mut engine, "HRM_N a HRM_D@250 HRM_D+C"),
        "nadc"
    );
    assert!(engine.mod_tap_mods().is_empty());
}

#[test]
fn test_script_layers_do_not_type() {
    let mut engine = Engine::default();
    assert_eq!(run_script(&mut engine, "layer=nav a layer=base"), "a");
    assert_eq!(engine.layer(), imprint_core::Layer::Base);
}

#[test]
fn test_every_expander_miss_is_silent() {
    for side in [Key::MagicLeft, Key::MagicRight] {
        let table = match side {
            Key::MagicLeft => ExpanderTable::left(),
            _ => ExpanderTable::right(),
        };
        for key in Key::iter() {
            if table.lookup(key).is_some()
                || key.is_synthetic()
                || !LastKeyMemory::accepts(key)
            {
                continue;
            }
            let mut engine = Engine::default();
            engine.process_event(KeyEvent::press(key, ModMask::NONE, 0));
            engine.process_event(KeyEvent::release(key, ModMask::NONE, 10));
            let before = engine.memory();
            let outputs = engine.process_event(KeyEvent::press(side, ModMask::NONE, 20));
            assert!(outputs.is_empty(), "{side} after {key}: {outputs:?}");
            assert_eq!(engine.memory(), before, "{side} after {key}");
        }
    }
}

#[test]
fn test_every_expander_hit_sets_repeat_key() {
    for (side, table) in [
        (Key::MagicLeft, ExpanderTable::left()),
        (Key::MagicRight, ExpanderTable::right()),
    ] {
        for (key, entry) in table.iter() {
            assert!(!entry.text.is_empty());
            assert!(entry.backspaces <= 2);

            // Synthetic repeat keys are only reached by chaining
            if key.is_synthetic() {
                continue;
            }
            let mut engine = Engine::default();
            engine.process_event(KeyEvent::press(*key, ModMask::NONE, 0));
            engine.process_event(KeyEvent::release(*key, ModMask::NONE, 10));
            let outputs = engine.process_event(KeyEvent::press(side, ModMask::NONE, 20));
            let typed = outputs.iter().any(|o| matches!(o, Output::Text { .. }));
            assert!(typed, "{side} after {key}");
            assert_eq!(engine.memory().key(), entry.repeat_key());
            assert!(engine.memory().mods().is_empty());
        }
    }
}

#[test]
fn test_alt_repeat_tables_never_chain() {
    for table in [AltRepeatTable::sfb(), AltRepeatTable::completion()] {
        for (key, text) in table.iter() {
            assert!(!text.is_empty(), "{} {key}", table.name());
        }
    }
    let mut engine = Engine::default();
    engine.process_event(KeyEvent::press(Key::R, ModMask::NONE, 0));
    for t in [10, 20, 30] {
        let outputs = engine.process_event(KeyEvent::press(Key::AltRep2, ModMask::NONE, t));
        assert_eq!(outputs.as_slice(), &[Output::text("ight", false)]);
    }
    assert_eq!(engine.memory().key(), Key::R);
}

#[test]
fn test_word_macros_keep_caps_word() {
    let mut engine = Engine::default();
    engine.set_caps_word(true);
    for (key, word) in WordMacroTable::get().iter() {
        let outputs = engine.process_event(KeyEvent::press(*key, ModMask::NONE, 0));
        assert_eq!(outputs.as_slice(), &[Output::text(word.text, true)]);
        assert!(engine.caps_word_active(), "{key}");
        assert_eq!(engine.memory().key(), word.repeat);
    }
}

#[test]
fn test_engine_config_combos() {
    let mut engine = Engine::new(EngineConfig {
        combos: vec![imprint_core::ComboDef::new(Key::J, Key::K, Key::Escape)],
        ..EngineConfig::default()
    });
    let text = run_script(&mut engine, "J+K j k");
    assert_eq!(text, "jk");
}

#[cfg(feature = "config-file")]
mod config_file {
    use super::*;
    use imprint_core::{ComboDef, Config};

    const EXAMPLE: &str = include_str!("../../../config/imprint.toml");

    #[test]
    fn test_example_config_parses() {
        let config = Config::from_toml(EXAMPLE).unwrap();
        assert_eq!(config.tapping_term_ms, 200);
        assert_eq!(
            config.combos,
            vec![
                ComboDef::new(Key::L, Key::M, Key::Tab),
                ComboDef::new(Key::T, Key::H, Key::Tab),
                ComboDef::new(Key::H, Key::A, Key::SentenceCaseOn),
            ]
        );
    }

    #[test]
    fn test_example_config_drives_engine() {
        let config = Config::from_toml(EXAMPLE).unwrap();
        let mut engine = Engine::new(config.engine_config());
        assert_eq!(run_script(&mut engine, "L+M t h e"), "\tthe");
    }

    #[test]
    fn test_config_tapping_term_reaches_qu() {
        let config = Config::from_toml("[general]\ntapping_term_ms = 100\n").unwrap();
        let mut engine = Engine::new(config.engine_config());
        assert_eq!(run_script(&mut engine, "QU@150"), "q");
    }
}
