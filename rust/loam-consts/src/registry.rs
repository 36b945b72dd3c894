//! Fixed table of environment-derived constant names.
//!
//! Lookup consults this table before any pushed frame, so these names can
//! never be shadowed by loaded data. Keeping the table data-driven (name to
//! provider function) means adding a constant is one entry here, with no
//! change to the lookup logic.

use std::collections::BTreeMap;

use loam_value::{Decimal, Value};

use crate::env::{Control, Environment};

/// Resolves one environment-derived constant.
pub type Provider = fn(&dyn Environment) -> Value;

/// Compass tokens exposed as `HEX_DIRECTIONS`, clockwise from north.
pub const HEX_DIRECTIONS: [&str; 6] = ["n", "ne", "se", "s", "sw", "nw"];

/// Capability flags are reported as 0/1 ints, not booleans.
fn flag(on: bool) -> Value {
    Value::Int(i64::from(on))
}

/// The built-in name table.
pub fn builtin_providers() -> BTreeMap<&'static str, Provider> {
    let mut table: BTreeMap<&'static str, Provider> = BTreeMap::new();
    table.insert("DOUBLE_SCALE", |env| flag(env.double_scale()));
    table.insert("SCREEN_WIDTH", |env| Value::Int(env.screen_width()));
    table.insert("SCREEN_HEIGHT", |env| Value::Int(env.screen_height()));
    table.insert("LOW_END_SYSTEM", |env| flag(env.low_end_system()));
    table.insert("HANDHELD_SYSTEM", |env| flag(env.handheld_system()));
    table.insert("HIGH_END_SYSTEM", |env| flag(!env.low_end_system()));
    table.insert("SERVER_ADDRESS", |env| Value::string(env.server_host()));
    table.insert("SERVER_PORT", |env| Value::Int(env.server_port()));
    table.insert("USERNAME", |env| Value::string(env.username()));
    table.insert("PASSWORD", |env| Value::string(env.password()));
    table.insert("UP_KEY", |env| Value::string(env.key_name(Control::Up)));
    table.insert("DOWN_KEY", |env| Value::string(env.key_name(Control::Down)));
    table.insert("LEFT_KEY", |env| Value::string(env.key_name(Control::Left)));
    table.insert("RIGHT_KEY", |env| {
        Value::string(env.key_name(Control::Right))
    });
    table.insert("JUMP_KEY", |env| Value::string(env.key_name(Control::Jump)));
    table.insert("ATTACK_KEY", |env| {
        Value::string(env.key_name(Control::Attack))
    });
    table.insert("LOCALE", |env| Value::string(env.locale()));
    table.insert("EPSILON", |_| Value::Decimal(Decimal::EPSILON));
    table.insert("HEX_DIRECTIONS", |_| Value::string_list(HEX_DIRECTIONS));
    table.insert("BUILD_OPTIONS", |env| {
        Value::string_list(env.build_options())
    });
    table
}
