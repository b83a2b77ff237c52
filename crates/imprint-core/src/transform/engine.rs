// Imprint Transform Engine
// Owns every piece of pipeline state and routes each key event through it
//
// Event order:
// - combos resolve first, then mod-taps hold back everything until they settle
// - mode toggles (caps word, sentence case) are consumed outright
// - caps word gate, sentence-case tracker and within-word state observe a press
// - trigger keys go to their handler, everything else is forwarded

use smallvec::SmallVec;

use crate::input::{ComboDef, ComboDetector};
use crate::led::{scheme_for_layer, Layer, LedNotifier, LedScheme, NoLed};
use crate::mapping::{AltRepeatTable, MagicSide, WordMacroTable};
use crate::output::{Output, Outputs};
use crate::state::{CapsWord, CapsWordVerdict, LastKeyMemory, SentenceCase, SentenceState};
use crate::transform::magic::{self, FragmentCase};
use crate::transform::quote::QuoteHelper;
use crate::transform::tap_hold::{DualKey, ModTap, TapHoldTimers, DEFAULT_TAPPING_TERM_MS};
use crate::transform::vowel;
use crate::{Action, Key, KeyEvent, ModMask};

/// Engine settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Tap/hold threshold for dual-purpose and mod-tap keys
    pub tapping_term_ms: u64,
    /// Window in which both keys of a chord must go down
    pub combo_term_ms: u64,
    pub combos: Vec<ComboDef>,
    /// Pressing both shift keys toggles caps word
    pub both_shifts_toggle: bool,
    /// Sentence case starts enabled
    pub sentence_case: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tapping_term_ms: DEFAULT_TAPPING_TERM_MS,
            combo_term_ms: 50,
            combos: Vec::new(),
            both_shifts_toggle: true,
            sentence_case: true,
        }
    }
}

/// A mod-tap that is down but not yet settled, and the events that arrived
/// behind it
#[derive(Debug)]
struct PendingModTap {
    mod_tap: ModTap,
    buffered: SmallVec<[KeyEvent; 4]>,
}

/// The input pipeline context.
///
/// One event is fully processed before the next; every handler reads the
/// state the previous event left behind.
pub struct Engine {
    config: EngineConfig,
    combos: ComboDetector,
    timers: TapHoldTimers,
    pending_mod_tap: Option<PendingModTap>,
    held_mod_taps: SmallVec<[ModTap; 4]>,
    memory: LastKeyMemory,
    sentence: SentenceCase,
    caps_word: CapsWord,
    quote: QuoteHelper,
    layer: Layer,
    led: Box<dyn LedNotifier>,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            combos: ComboDetector::new(config.combos.clone(), config.combo_term_ms),
            timers: TapHoldTimers::new(config.tapping_term_ms),
            pending_mod_tap: None,
            held_mod_taps: SmallVec::new(),
            memory: LastKeyMemory::new(),
            sentence: SentenceCase::new(config.sentence_case),
            caps_word: CapsWord::new(),
            quote: QuoteHelper::new(),
            layer: Layer::Base,
            led: Box::new(NoLed),
            config,
        }
    }

    /// Attach an LED notifier; it is sent the current scheme straight away
    pub fn with_led(mut self, notifier: impl LedNotifier + 'static) -> Self {
        self.led = Box::new(notifier);
        let scheme = self.led_scheme();
        self.led.show(scheme);
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn memory(&self) -> LastKeyMemory {
        self.memory
    }

    pub fn caps_word_active(&self) -> bool {
        self.caps_word.is_active()
    }

    pub fn sentence_state(&self) -> SentenceState {
        self.sentence.state()
    }

    pub fn sentence_case_enabled(&self) -> bool {
        self.sentence.is_enabled()
    }

    pub fn within_word(&self) -> bool {
        self.quote.within_word()
    }

    /// Modifiers currently held by mod-tap keys
    pub fn mod_tap_mods(&self) -> ModMask {
        self.held_mod_taps
            .iter()
            .fold(ModMask::NONE, |mask, held| mask | held.mask())
    }

    pub fn layer(&self) -> Layer {
        self.layer
    }

    /// Scheme the LEDs should currently show
    pub fn led_scheme(&self) -> LedScheme {
        if self.caps_word.is_active() {
            LedScheme::CapsWord
        } else {
            scheme_for_layer(self.layer)
        }
    }

    /// Report the highest active layer
    pub fn set_layer(&mut self, layer: Layer) {
        if layer == self.layer {
            return;
        }
        log::debug!("layer {} -> {}", self.layer, layer);
        self.layer = layer;
        if !self.caps_word.is_active() {
            self.led.show(scheme_for_layer(layer));
        }
    }

    /// Turn caps word on or off from outside the key stream
    pub fn set_caps_word(&mut self, active: bool) {
        if active {
            if self.caps_word.activate() {
                self.led.show(LedScheme::CapsWord);
            }
        } else if self.caps_word.deactivate() {
            self.led.show(scheme_for_layer(self.layer));
        }
    }

    /// Process one input event
    pub fn process_event(&mut self, event: KeyEvent) -> Outputs {
        log::trace!("event {}", event);
        let mut out = Outputs::new();
        for resolved in self.combos.feed(event) {
            self.route(resolved, &mut out);
        }
        out
    }

    /// Advance the clock with no new input.
    ///
    /// Flushes an expired chord press and settles a mod-tap held for the
    /// whole tapping term.
    pub fn tick(&mut self, now_ms: u64) -> Outputs {
        let mut out = Outputs::new();
        if let Some(held) = self.combos.tick(now_ms) {
            self.route(held, &mut out);
        }
        self.expire_mod_tap(now_ms, &mut out);
        out
    }

    fn toggle_caps_word(&mut self) {
        let scheme = if self.caps_word.toggle() {
            LedScheme::CapsWord
        } else {
            scheme_for_layer(self.layer)
        };
        self.led.show(scheme);
    }

    /// Mod-tap stage between the combo detector and the handlers
    fn route(&mut self, event: KeyEvent, out: &mut Outputs) {
        self.expire_mod_tap(event.time_ms, out);

        if let Some(pending) = self.pending_mod_tap.as_mut() {
            if event.is_release() && event.key == pending.mod_tap.key {
                self.tap_mod_tap(event, out);
                return;
            }
            // A key pressed and released inside the mod-tap makes it a hold
            let nested = event.is_release()
                && pending
                    .buffered
                    .iter()
                    .any(|held| held.is_press() && held.key == event.key);
            pending.buffered.push(event);
            if nested {
                self.hold_mod_tap(out);
            }
            return;
        }

        if let Some(mod_tap) = ModTap::for_key(event.key) {
            if event.is_press() {
                let mods = event.mods | self.mod_tap_mods();
                self.timers.on_press(event.key, event.time_ms, mods, false);
                self.pending_mod_tap = Some(PendingModTap {
                    mod_tap,
                    buffered: SmallVec::new(),
                });
            } else {
                self.release_mod_tap(mod_tap, out);
            }
            return;
        }

        self.handle(event, out);
    }

    fn expire_mod_tap(&mut self, now_ms: u64, out: &mut Outputs) {
        let expired = self
            .pending_mod_tap
            .as_ref()
            .map(|pending| self.timers.is_past_term(pending.mod_tap.key, now_ms))
            .unwrap_or(false);
        if expired {
            self.hold_mod_tap(out);
        }
    }

    /// Released inside the tapping term: type the tap key, then replay
    fn tap_mod_tap(&mut self, release: KeyEvent, out: &mut Outputs) {
        let Some(pending) = self.pending_mod_tap.take() else {
            return;
        };
        let (_, record) = self.timers.on_release(release.key, release.time_ms);
        let (pressed_at, mods) = record
            .map(|r| (r.time_ms, r.mods))
            .unwrap_or((release.time_ms, release.mods));
        let tap = pending.mod_tap.tap;
        log::debug!("{} tapped -> {}", release.key, tap);

        self.handle(KeyEvent::press(tap, mods, pressed_at), out);
        self.handle(KeyEvent::release(tap, mods, release.time_ms), out);
        for event in pending.buffered {
            self.route(event, out);
        }
    }

    /// Settle the pending mod-tap as its modifier, then replay
    fn hold_mod_tap(&mut self, out: &mut Outputs) {
        let Some(pending) = self.pending_mod_tap.take() else {
            return;
        };
        let mod_tap = pending.mod_tap;
        self.timers.take(mod_tap.key);
        log::debug!("{} held -> {}", mod_tap.key, mod_tap.modifier);

        if !self
            .held_mod_taps
            .iter()
            .any(|held| held.modifier == mod_tap.modifier)
        {
            out.push(Output::forward(mod_tap.modifier, Action::Press));
        }
        self.held_mod_taps.push(mod_tap);
        for event in pending.buffered {
            self.route(event, out);
        }
    }

    fn release_mod_tap(&mut self, mod_tap: ModTap, out: &mut Outputs) {
        let Some(pos) = self
            .held_mod_taps
            .iter()
            .position(|held| held.key == mod_tap.key)
        else {
            log::debug!("{} released without a press", mod_tap.key);
            return;
        };
        self.held_mod_taps.remove(pos);
        if !self
            .held_mod_taps
            .iter()
            .any(|held| held.modifier == mod_tap.modifier)
        {
            out.push(Output::forward(mod_tap.modifier, Action::Release));
        }
    }

    fn handle(&mut self, event: KeyEvent, out: &mut Outputs) {
        let event = KeyEvent {
            mods: event.mods | self.mod_tap_mods(),
            ..event
        };
        if event.is_press() {
            self.handle_press(event, out);
        } else {
            self.handle_release(event, out);
        }
    }

    fn handle_press(&mut self, event: KeyEvent, out: &mut Outputs) {
        let key = event.key;
        match key {
            Key::CapsWordToggle => {
                self.toggle_caps_word();
                return;
            }
            Key::SentenceCaseOn => {
                self.sentence.enable();
                return;
            }
            Key::SentenceCaseToggle => {
                self.sentence.toggle();
                return;
            }
            _ => {}
        }

        if self.config.both_shifts_toggle && both_shifts_down(&event) {
            self.toggle_caps_word();
        }

        let weak_shift = match self.caps_word.on_press(&event) {
            CapsWordVerdict::Continue { shift } => shift,
            CapsWordVerdict::Ended => {
                self.led.show(scheme_for_layer(self.layer));
                false
            }
            CapsWordVerdict::Inactive => false,
        };
        let caps_word = self.caps_word.is_active();
        let capitalise = self.sentence.on_event(&event);
        let case = FragmentCase {
            shifted: caps_word,
            capitalise,
        };

        if key == Key::QuotePair {
            out.extend(self.quote.trigger());
            self.memory.set(Key::Quote, ModMask::NONE);
            return;
        }
        // Text triggers update the word state from what they type
        let types_text =
            key.is_magic_trigger() || key.is_alt_repeat() || key.is_word_macro();
        if !types_text {
            self.quote.observe(&event);
        }

        if let Some(side) = MagicSide::from_trigger(key) {
            self.magic(side, case, out);
            return;
        }

        if let Some(table) = AltRepeatTable::for_trigger(key) {
            let remembered = self.memory.key();
            match table.expand(remembered) {
                Some(text) => {
                    log::debug!("{} after {} -> {:?}", table.name(), remembered, text);
                    magic::type_fragment(out, text, 0, case);
                    self.quote.observe_text(text);
                }
                None => {
                    log::debug!("{} has nothing for {}", table.name(), remembered);
                    self.restore_capital(capitalise);
                }
            }
            return;
        }

        if let Some(word) = WordMacroTable::get().lookup(key) {
            magic::type_fragment(out, word.text, 0, case);
            self.quote.observe_text(word.text);
            self.memory.set(word.repeat, ModMask::NONE);
            return;
        }

        if DualKey::for_key(key).is_some() {
            self.timers
                .on_press(key, event.time_ms, event.mods, capitalise);
            return;
        }

        if matches!(key, Key::HvSwitch | Key::HvSwitchReverse) {
            let reverse = key == Key::HvSwitchReverse;
            let choice = vowel::choose(reverse, self.memory.key(), event.mods);
            let mods = vowel::tap_mods(event.mods, caps_word || capitalise);
            out.push(Output::Tap { key: choice, mods });
            self.memory.set(choice, ModMask::NONE);
            return;
        }

        if key.is_synthetic() {
            return;
        }

        let extra_mods = if weak_shift || capitalise {
            ModMask::LSHIFT
        } else {
            ModMask::NONE
        };
        out.push(Output::Forward {
            key,
            action: Action::Press,
            extra_mods,
        });
        let remembered_mods = if capitalise {
            event.mods | ModMask::LSHIFT
        } else {
            event.mods
        };
        self.memory.observe(key, remembered_mods);
    }

    fn handle_release(&mut self, event: KeyEvent, out: &mut Outputs) {
        let key = event.key;
        if let Some(dual) = DualKey::for_key(key) {
            self.resolve_dual(dual, event, out);
            return;
        }
        if key.is_synthetic() {
            return;
        }
        out.push(Output::forward(key, Action::Release));
    }

    fn magic(&mut self, side: MagicSide, case: FragmentCase, out: &mut Outputs) {
        let remembered = self.memory.key();
        let Some(entry) = magic::expand(side, remembered, self.memory.mods()) else {
            log::debug!("magic {} has nothing for {}", side, remembered);
            self.restore_capital(case.capitalise);
            return;
        };
        log::debug!("magic {} after {} -> {:?}", side, remembered, entry.text);
        magic::type_fragment(out, entry.text, entry.backspaces, case);
        self.quote.observe_text(entry.text);
        self.memory.set(entry.repeat_key(), ModMask::NONE);
        if entry.text.trim_end().ends_with(['.', '!', '?']) {
            self.sentence.prime();
        }
    }

    /// A trigger that typed nothing hands its capital to the next letter
    fn restore_capital(&mut self, capitalise: bool) {
        if capitalise {
            self.sentence.prime();
        }
    }

    fn resolve_dual(&mut self, dual: DualKey, event: KeyEvent, out: &mut Outputs) {
        let (resolution, record) = self.timers.on_release(event.key, event.time_ms);
        let caps_word = self.caps_word.is_active();
        let first_upper = caps_word || record.map(|r| r.wants_capital()).unwrap_or(false);
        let held = record.map(|r| r.mods).unwrap_or(event.mods) - ModMask::SHIFT;

        let mut last = dual.first;
        for (i, letter) in dual.emitted(resolution).enumerate() {
            let upper = if i == 0 { first_upper } else { caps_word };
            let mods = if upper { held | ModMask::LSHIFT } else { held };
            out.push(Output::Tap { key: letter, mods });
            last = letter;
        }
        self.memory.set(last, ModMask::NONE);
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

/// The press of one shift key while the other is already down
fn both_shifts_down(event: &KeyEvent) -> bool {
    match event.key {
        Key::LeftShift => event.mods.contains(ModMask::RSHIFT),
        Key::RightShift => event.mods.contains(ModMask::LSHIFT),
        _ => false,
    }
}
