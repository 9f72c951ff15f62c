//! End-to-end configure behavior against a headless platform: defaults,
//! value sources, per-kind parsing, and query/describe output.

use larch_options::{
    Configurable, DeclKind, InternalSlot, OptionContext, OptionDecl, OptionFlags, OptionInfo,
    OptionStorage, OptionTemplate,
};
use larch_testing::HeadlessPlatform;
use larch_value::Value;

const GEOMETRY: u32 = 0x1;
const STATE: u32 = 0x2;
const REDRAW: u32 = 0x4;

static WIDGET_OPTIONS: [OptionDecl; 11] = [
    OptionDecl::new("-width", DeclKind::Integer)
        .database("width", "Width")
        .default_text("0")
        .with_flags(OptionFlags::NULL_OK)
        .in_value_slot(0)
        .in_internal_slot(0)
        .change_mask(GEOMETRY),
    OptionDecl::new("-state", DeclKind::StringTable(&["normal", "disabled"]))
        .database("state", "State")
        .default_text("normal")
        .in_value_slot(1)
        .in_internal_slot(1)
        .change_mask(STATE),
    OptionDecl::new(
        "-background",
        DeclKind::Color {
            mono_default: Some("white"),
        },
    )
    .database("background", "Background")
    .default_text("red")
    .in_value_slot(2)
    .in_internal_slot(2)
    .change_mask(REDRAW),
    OptionDecl::new("-bg", DeclKind::Synonym("-background")),
    OptionDecl::new(
        "-foreground",
        DeclKind::Color {
            mono_default: Some("black"),
        },
    )
    .default_text("black")
    .in_value_slot(3)
    .in_internal_slot(3),
    OptionDecl::new("-font", DeclKind::Font)
        .default_text("Helvetica 12")
        .in_internal_slot(4),
    OptionDecl::new("-borderwidth", DeclKind::Pixels)
        .default_text("2")
        .in_internal_slot(5),
    OptionDecl::new("-insert", DeclKind::Index)
        .default_text("0")
        .in_internal_slot(6),
    OptionDecl::new("-relief", DeclKind::Relief)
        .default_text("flat")
        .in_value_slot(4)
        .in_internal_slot(7),
    OptionDecl::new("-anchor", DeclKind::Anchor)
        .default_text("center")
        .with_flags(OptionFlags::NULL_OK)
        .in_internal_slot(8),
    OptionDecl::new("-text", DeclKind::String)
        .default_text("")
        .in_value_slot(5),
];
static WIDGET_TEMPLATE: OptionTemplate = OptionTemplate::new(&WIDGET_OPTIONS);

fn new_record() -> OptionStorage {
    OptionStorage::new(6, 9)
}

fn vals(texts: &[&str]) -> Vec<Value> {
    texts.iter().map(|t| Value::new(*t)).collect()
}

#[test]
fn init_applies_table_defaults() {
    let platform = HeadlessPlatform::new();
    let win = platform.new_window(".app", 24);
    let ctx = OptionContext::new();
    let table = ctx.compile(&WIDGET_TEMPLATE);
    let mut rec = new_record();

    table.init_options(&mut rec, Some(&win)).expect("defaults apply");

    assert_eq!(rec.internal_slot(InternalSlot(0)).as_int(), Some(0));
    assert_eq!(rec.internal_slot(InternalSlot(1)).as_enum_index(), Some(0));
    assert_eq!(rec.internal_slot(InternalSlot(5)).as_pixels(), Some(2));
    assert_eq!(
        rec.internal_slot(InternalSlot(6)).as_index().map(|i| i.raw()),
        Some(0)
    );
    let bg = table
        .get_value(&rec, &Value::new("-background"), Some(&win))
        .unwrap();
    assert_eq!(bg.as_str(), "red");
    let text = table.get_value(&rec, &Value::new("-text"), Some(&win)).unwrap();
    assert_eq!(text.as_str(), "");
}

#[test]
fn theme_database_beats_system_default_beats_table() {
    let platform = HeadlessPlatform::new();
    platform.set_theme_value("width", "Width", "42");
    platform.set_system_default("width", "Width", "13");
    platform.set_system_default("state", "State", "disabled");
    let win = platform.new_window(".app", 24);
    let ctx = OptionContext::new();
    let table = ctx.compile(&WIDGET_TEMPLATE);
    let mut rec = new_record();

    table.init_options(&mut rec, Some(&win)).unwrap();

    assert_eq!(rec.internal_slot(InternalSlot(0)).as_int(), Some(42));
    assert_eq!(
        rec.internal_slot(InternalSlot(1)).as_enum_index(),
        Some(1),
        "system default applies when the theme has no entry"
    );
}

#[test]
fn shallow_display_uses_monochrome_default() {
    let platform = HeadlessPlatform::new();
    let win = platform.new_window(".mono", 1);
    let ctx = OptionContext::new();
    let table = ctx.compile(&WIDGET_TEMPLATE);
    let mut rec = new_record();

    table.init_options(&mut rec, Some(&win)).unwrap();

    let bg = table
        .get_value(&rec, &Value::new("-background"), Some(&win))
        .unwrap();
    assert_eq!(bg.as_str(), "white");
}

#[test]
fn init_error_names_the_value_source() {
    let platform = HeadlessPlatform::new();
    platform.set_theme_value("width", "Width", "abc");
    let win = platform.new_window(".app", 24);
    let ctx = OptionContext::new();
    let table = ctx.compile(&WIDGET_TEMPLATE);
    let mut rec = new_record();

    let err = table.init_options(&mut rec, Some(&win)).unwrap_err();
    assert_eq!(
        err.to_string(),
        "expected integer or \"\" but got \"abc\"\n    (database entry for \"-width\" in widget \".app\")"
    );
}

#[test]
fn set_options_applies_pairs_and_reports_mask() {
    let platform = HeadlessPlatform::new();
    let win = platform.new_window(".app", 24);
    let ctx = OptionContext::new();
    let table = ctx.compile(&WIDGET_TEMPLATE);
    let mut rec = new_record();
    table.init_options(&mut rec, Some(&win)).unwrap();

    let mask = table
        .set_options(&mut rec, Some(&win), &vals(&["-width", "10", "-state", "dis"]), None)
        .expect("both pairs apply");

    assert_eq!(mask, GEOMETRY | STATE);
    assert_eq!(rec.internal_slot(InternalSlot(0)).as_int(), Some(10));
    let state = table.get_value(&rec, &Value::new("-state"), Some(&win)).unwrap();
    assert_eq!(state.as_str(), "disabled", "stored value is the full name");
}

#[test]
fn parse_failure_leaves_the_option_unchanged() {
    let platform = HeadlessPlatform::new();
    let win = platform.new_window(".app", 24);
    let ctx = OptionContext::new();
    let table = ctx.compile(&WIDGET_TEMPLATE);
    let mut rec = new_record();
    table.init_options(&mut rec, Some(&win)).unwrap();
    table
        .set_options(&mut rec, Some(&win), &vals(&["-width", "10"]), None)
        .unwrap();

    let err = table
        .set_options(&mut rec, Some(&win), &vals(&["-width", "foo"]), None)
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "expected integer or \"\" but got \"foo\"\n    (processing \"-width\" option)"
    );
    assert_eq!(rec.internal_slot(InternalSlot(0)).as_int(), Some(10));
    let width = table.get_value(&rec, &Value::new("-width"), Some(&win)).unwrap();
    assert_eq!(width.as_str(), "10");
}

#[test]
fn trailing_name_without_value_is_an_error() {
    let ctx = OptionContext::new();
    let table = ctx.compile(&WIDGET_TEMPLATE);
    let mut rec = new_record();

    let err = table
        .set_options(&mut rec, None, &vals(&["-width"]), None)
        .unwrap_err();
    assert_eq!(err.to_string(), "value for \"-width\" missing");
}

#[test]
fn unknown_and_ambiguous_names_are_distinguished() {
    let ctx = OptionContext::new();
    let table = ctx.compile(&WIDGET_TEMPLATE);
    let mut rec = new_record();

    let err = table
        .set_options(&mut rec, None, &vals(&["-bogus", "1"]), None)
        .unwrap_err();
    assert_eq!(err.to_string(), "unknown option \"-bogus\"");

    // -b prefixes -background, -bg, and -borderwidth
    let err = table
        .set_options(&mut rec, None, &vals(&["-b", "1"]), None)
        .unwrap_err();
    assert_eq!(err.to_string(), "ambiguous option \"-b\"");
}

#[test]
fn abbreviations_and_synonyms_resolve_to_the_canonical_option() {
    let platform = HeadlessPlatform::new();
    let win = platform.new_window(".app", 24);
    let ctx = OptionContext::new();
    let table = ctx.compile(&WIDGET_TEMPLATE);
    let mut rec = new_record();
    table.init_options(&mut rec, Some(&win)).unwrap();

    // -fo is ambiguous between -font and -foreground; -for is unique
    let err = table
        .set_options(&mut rec, Some(&win), &vals(&["-fo", "blue"]), None)
        .unwrap_err();
    assert_eq!(err.to_string(), "ambiguous option \"-fo\"");
    table
        .set_options(&mut rec, Some(&win), &vals(&["-for", "blue"]), None)
        .unwrap();
    let fg = table
        .get_value(&rec, &Value::new("-foreground"), Some(&win))
        .unwrap();
    assert_eq!(fg.as_str(), "blue");

    // the -bg synonym writes through to -background's slots
    table
        .set_options(&mut rec, Some(&win), &vals(&["-bg", "green"]), None)
        .unwrap();
    let bg = table
        .get_value(&rec, &Value::new("-background"), Some(&win))
        .unwrap();
    assert_eq!(bg.as_str(), "green");
}

#[test]
fn empty_string_clears_nullable_options() {
    let platform = HeadlessPlatform::new();
    let win = platform.new_window(".app", 24);
    let ctx = OptionContext::new();
    let table = ctx.compile(&WIDGET_TEMPLATE);
    let mut rec = new_record();
    table.init_options(&mut rec, Some(&win)).unwrap();

    table
        .set_options(&mut rec, Some(&win), &vals(&["-width", "", "-anchor", ""]), None)
        .unwrap();
    assert_eq!(rec.internal_slot(InternalSlot(0)).as_int(), None);
    assert_eq!(rec.internal_slot(InternalSlot(8)).as_anchor(), None);
    let width = table.get_value(&rec, &Value::new("-width"), Some(&win)).unwrap();
    assert_eq!(width.as_str(), "");
    let anchor = table.get_value(&rec, &Value::new("-anchor"), Some(&win)).unwrap();
    assert_eq!(anchor.as_str(), "");
}

#[test]
fn domain_values_are_stored_in_canonical_form() {
    let platform = HeadlessPlatform::new();
    let win = platform.new_window(".app", 24);
    let ctx = OptionContext::new();
    let table = ctx.compile(&WIDGET_TEMPLATE);
    let mut rec = new_record();
    table.init_options(&mut rec, Some(&win)).unwrap();

    table
        .set_options(
            &mut rec,
            Some(&win),
            &vals(&["-relief", "rai", "-anchor", "se", "-state", "dis"]),
            None,
        )
        .unwrap();
    let relief = table.get_value(&rec, &Value::new("-relief"), Some(&win)).unwrap();
    assert_eq!(relief.as_str(), "raised");
    let anchor = table.get_value(&rec, &Value::new("-anchor"), Some(&win)).unwrap();
    assert_eq!(anchor.as_str(), "se");
    let state = table.get_value(&rec, &Value::new("-state"), Some(&win)).unwrap();
    assert_eq!(state.as_str(), "disabled");
}

#[test]
fn bad_domain_value_lists_the_alternatives() {
    let platform = HeadlessPlatform::new();
    let win = platform.new_window(".app", 24);
    let ctx = OptionContext::new();
    let table = ctx.compile(&WIDGET_TEMPLATE);
    let mut rec = new_record();

    let err = table
        .set_options(&mut rec, Some(&win), &vals(&["-state", "xyz"]), None)
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "bad state \"xyz\": must be normal or disabled\n    (processing \"-state\" option)"
    );
}

#[test]
fn pixel_options_accept_physical_units() {
    let platform = HeadlessPlatform::new();
    let win = platform.new_window(".app", 24); // 4 px/mm
    let ctx = OptionContext::new();
    let table = ctx.compile(&WIDGET_TEMPLATE);
    let mut rec = new_record();

    table
        .set_options(&mut rec, Some(&win), &vals(&["-borderwidth", "2c"]), None)
        .unwrap();
    assert_eq!(rec.internal_slot(InternalSlot(5)).as_pixels(), Some(80));

    table
        .set_options(&mut rec, Some(&win), &vals(&["-borderwidth", "1.5i"]), None)
        .unwrap();
    assert_eq!(rec.internal_slot(InternalSlot(5)).as_pixels(), Some(152));

    table
        .set_options(&mut rec, Some(&win), &vals(&["-borderwidth", "7"]), None)
        .unwrap();
    assert_eq!(rec.internal_slot(InternalSlot(5)).as_pixels(), Some(7));

    let err = table
        .set_options(&mut rec, Some(&win), &vals(&["-borderwidth", "xyz"]), None)
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "expected screen distance but got \"xyz\"\n    (processing \"-borderwidth\" option)"
    );
}

#[test]
fn index_options_round_trip_through_queries() {
    let ctx = OptionContext::new();
    let table = ctx.compile(&WIDGET_TEMPLATE);
    let mut rec = new_record();

    for text in ["5", "end", "end-2", "end+1"] {
        table
            .set_options(&mut rec, None, &vals(&["-insert", text]), None)
            .unwrap();
        let back = table.get_value(&rec, &Value::new("-insert"), None).unwrap();
        assert_eq!(back.as_str(), text);
    }

    // arithmetic spellings evaluate before storing
    table
        .set_options(&mut rec, None, &vals(&["-insert", "2+3"]), None)
        .unwrap();
    let back = table.get_value(&rec, &Value::new("-insert"), None).unwrap();
    assert_eq!(back.as_str(), "5");

    // indices accept the empty string without NULL_OK
    table
        .set_options(&mut rec, None, &vals(&["-insert", ""]), None)
        .unwrap();
    assert_eq!(rec.internal_slot(InternalSlot(6)).as_index(), None);
    let back = table.get_value(&rec, &Value::new("-insert"), None).unwrap();
    assert_eq!(back.as_str(), "");

    let err = table
        .set_options(&mut rec, None, &vals(&["-insert", "bogus"]), None)
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "bad index \"bogus\": must be integer?[+-]integer?, end?[+-]integer?, or \"\"\n    (processing \"-insert\" option)"
    );
}

#[test]
fn color_allocation_failure_names_the_option() {
    let platform = HeadlessPlatform::new();
    let win = platform.new_window(".app", 24);
    let ctx = OptionContext::new();
    let table = ctx.compile(&WIDGET_TEMPLATE);
    let mut rec = new_record();

    let err = table
        .set_options(&mut rec, Some(&win), &vals(&["-background", "vermillion"]), None)
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "unknown color name \"vermillion\" (option \"-background\")\n    (processing \"-background\" option)"
    );
}

#[test]
fn window_dependent_kinds_require_a_window() {
    let ctx = OptionContext::new();
    let table = ctx.compile(&WIDGET_TEMPLATE);
    let mut rec = new_record();

    let err = table
        .set_options(&mut rec, None, &vals(&["-background", "red"]), None)
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "option \"-background\" requires a window\n    (processing \"-background\" option)"
    );
}

#[test]
fn options_without_value_slots_format_their_internal_form() {
    let platform = HeadlessPlatform::new();
    let win = platform.new_window(".app", 24);
    let ctx = OptionContext::new();
    let table = ctx.compile(&WIDGET_TEMPLATE);
    let mut rec = new_record();

    table
        .set_options(&mut rec, Some(&win), &vals(&["-font", "Courier 10"]), None)
        .unwrap();
    let font = table.get_value(&rec, &Value::new("-font"), Some(&win)).unwrap();
    assert_eq!(font.as_str(), "Courier 10");
}

#[test]
fn describe_reports_synonyms_in_short_form() {
    let platform = HeadlessPlatform::new();
    let win = platform.new_window(".app", 24);
    let ctx = OptionContext::new();
    let table = ctx.compile(&WIDGET_TEMPLATE);
    let mut rec = new_record();
    table.init_options(&mut rec, Some(&win)).unwrap();

    let all = table.describe(&rec, None, Some(&win)).unwrap();
    assert_eq!(all.len(), WIDGET_OPTIONS.len());
    match &all[3] {
        OptionInfo::Synonym { name, canonical } => {
            assert_eq!(*name, "-bg");
            assert_eq!(*canonical, "-background");
        }
        other => panic!("expected the synonym entry, got {other:?}"),
    }

    // asking for the synonym by name redirects to the full entry
    let one = table
        .describe(&rec, Some(&Value::new("-bg")), Some(&win))
        .unwrap();
    assert_eq!(one.len(), 1);
    match &one[0] {
        OptionInfo::Direct {
            name,
            db_name,
            default,
            current,
            ..
        } => {
            assert_eq!(*name, "-background");
            assert_eq!(*db_name, Some("background"));
            assert_eq!(default.as_ref().map(Value::as_str), Some("red"));
            assert_eq!(current.as_str(), "red");
        }
        other => panic!("expected a direct entry, got {other:?}"),
    }
}

#[test]
fn describe_defaults_are_mono_aware() {
    let platform = HeadlessPlatform::new();
    let win = platform.new_window(".mono", 1);
    let ctx = OptionContext::new();
    let table = ctx.compile(&WIDGET_TEMPLATE);
    let rec = new_record();

    let one = table
        .describe(&rec, Some(&Value::new("-background")), Some(&win))
        .unwrap();
    match &one[0] {
        OptionInfo::Direct { default, .. } => {
            assert_eq!(default.as_ref().map(Value::as_str), Some("white"));
        }
        other => panic!("expected a direct entry, got {other:?}"),
    }
}
