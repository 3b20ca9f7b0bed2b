// Neokeys Neo2 Layout
// Neo2 on a host set to the German QWERTZ layout: layers, remap tables and dual-function keys
//
// Output keys are named by their US position. The host's German layout decides the character,
// so e.g. RAlt-E produces the euro sign.

use smallvec::smallvec;

use crate::mapping::{DualKey, DualSource, ModifierHoldMap, OutputAction, RemapTable, RemapTables};
use crate::state::Layer;
use crate::{Combo, CustomKey, Key, Keycode, Modifier, ModifierSet};

pub const NEO_1: Layer = Layer(0);
pub const NEO_3: Layer = Layer(1);
pub const NEO_4: Layer = Layer(2);
pub const NEO_5: Layer = Layer(3);
pub const NEO_6: Layer = Layer(4);
pub const DE_NORMAL: Layer = Layer(5);
pub const FKEYS: Layer = Layer(6);

/// Default tapping term in milliseconds
pub const TAPPING_TERM_MS: u16 = 150;

fn shift() -> ModifierSet {
    ModifierSet::from(Modifier::LShift)
}

fn altgr() -> ModifierSet {
    ModifierSet::from(Modifier::RAlt)
}

fn shift_altgr() -> ModifierSet {
    shift().with(Modifier::RAlt)
}

/// Table used while shift is held; modifiers are cleared around each emission
pub fn shifted_table() -> RemapTable {
    use crate::mapping::OutputAction::SingleTapWithModifiers as Mods;

    [
        (CustomKey::Neo2N1, Mods(Key::Grave, shift())), // degree
        (CustomKey::Neo2N2, Mods(Key::N3, shift())),    // section
        (CustomKey::Neo2N3, Mods(Key::N1, altgr())),    // superscript 1
        (CustomKey::Neo2N4, Mods(Key::Z, altgr())),     // right angled quote
        (CustomKey::Neo2N5, Mods(Key::X, altgr())),     // left angled quote
        (CustomKey::Neo2N6, Mods(Key::N4, shift())),    // dollar
        (CustomKey::Neo2N7, Mods(Key::E, altgr())),     // euro
        (CustomKey::Neo2N8, Mods(Key::V, altgr())),     // low-9 double quote
        (CustomKey::Neo2N9, Mods(Key::B, altgr())),     // left double quote
        (CustomKey::Neo2N0, Mods(Key::N, altgr())),     // right double quote
        (CustomKey::Neo2Minus, Mods(Key::Slash, shift_altgr())), // em dash
        (CustomKey::Neo2Comma, Mods(Key::Slash, altgr())),       // en dash
        (CustomKey::Neo2Dot, Mods(Key::Comma, altgr())),         // bullet
        (CustomKey::Neo2SharpS, Mods(Key::S, shift_altgr())),    // capital sharp s
    ]
    .into_iter()
    .map(|(custom, action)| (Keycode::Custom(custom), action))
    .collect()
}

/// Table used without shift
pub fn unshifted_table() -> RemapTable {
    let digits = [
        (CustomKey::Neo2N1, Key::N1),
        (CustomKey::Neo2N2, Key::N2),
        (CustomKey::Neo2N3, Key::N3),
        (CustomKey::Neo2N4, Key::N4),
        (CustomKey::Neo2N5, Key::N5),
        (CustomKey::Neo2N6, Key::N6),
        (CustomKey::Neo2N7, Key::N7),
        (CustomKey::Neo2N8, Key::N8),
        (CustomKey::Neo2N9, Key::N9),
        (CustomKey::Neo2N0, Key::N0),
        (CustomKey::Neo2Minus, Key::Slash),
        (CustomKey::Neo2Comma, Key::Comma),
        (CustomKey::Neo2Dot, Key::Dot),
        (CustomKey::Neo2SharpS, Key::Minus),
    ];

    let mut table: RemapTable = digits
        .into_iter()
        .map(|(custom, key)| (Keycode::Custom(custom), OutputAction::SingleTap(key)))
        .collect();

    // Dead keys: tap space after them so the bare accent comes out
    table.insert(
        Keycode::Basic(Key::Grave),
        OutputAction::Sequence(smallvec![Combo::plain(Key::Grave), Combo::plain(Key::Space)]),
    );
    table.insert(
        Keycode::Modded(Key::Equal, shift()),
        OutputAction::Sequence(smallvec![
            Combo::from_set(shift(), Key::Equal),
            Combo::plain(Key::Space)
        ]),
    );

    table.insert(
        Keycode::Custom(CustomKey::YeldirCtlTab),
        OutputAction::SingleTapWithModifiers(Key::Tab, ModifierSet::from(Modifier::LCtrl)),
    );
    table.insert(
        Keycode::Custom(CustomKey::YeldirCtlSTab),
        OutputAction::SingleTapWithModifiers(
            Key::Tab,
            ModifierSet::from(Modifier::LShift).with(Modifier::LCtrl),
        ),
    );
    table
}

pub fn remap_tables() -> RemapTables {
    RemapTables::new(shifted_table(), unshifted_table())
}

/// Layer 3 is held by either mod-3 key; the right one also taps "y", or "@" while the left one
/// is down
pub fn dual_keys() -> Vec<DualKey> {
    vec![DualKey::new(
        "neo3",
        NEO_3,
        [
            DualSource::hold(CustomKey::Neo2LMod3),
            DualSource::timed(CustomKey::Neo2RMod3, OutputAction::SingleTap(Key::Y))
                .with_companion(OutputAction::SingleTapWithModifiers(Key::N2, shift())),
        ],
    )]
}

pub fn modifier_holds() -> ModifierHoldMap {
    let mut holds = ModifierHoldMap::new();
    holds.insert(
        Keycode::Custom(CustomKey::YeldirAc),
        ModifierSet::from(Modifier::LAlt).with(Modifier::LCtrl),
    );
    holds
}
